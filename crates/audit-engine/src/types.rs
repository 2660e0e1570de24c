//! 엔진 도메인 타입
//!
//! - [`MatchRecord`]: (파일, catcher) 쌍의 매칭 결과
//! - [`SkippedFile`]: 매칭에서 제외된 파일과 사유
//! - [`AuditReport`]: 한 번의 감사 실행 결과 (호출자에게 반환하는 payload)

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use callaudit_core::types::{ReportArtifact, ReportFormat, ReportRow};

/// detail 추출기 하나의 캡처 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailCapture {
    /// detail 이름
    pub name: String,
    /// 원본 캡처 문자열 (텍스트 등장 순서)
    pub values: Vec<String>,
}

/// 매칭 레코드
///
/// primary 패턴이 한 번 이상 매칭된 (파일, catcher) 쌍마다 하나씩 생성됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub catcher_id: String,
    pub category: String,
    pub sub_category: String,
    /// 스캔 루트 기준 상대 경로 (`/` 구분)
    pub file_name: String,
    /// primary 패턴 비중첩 매칭 횟수 (항상 1 이상)
    pub match_count: usize,
    /// catcher의 detail 선언 순서를 따름
    pub detail_captures: Vec<DetailCapture>,
}

/// 파일 제외 사유
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// 읽기 실패 (권한, 인코딩 등)
    Unreadable { message: String },
    /// 크기 상한 초과
    TooLarge { size: u64, max: u64 },
    /// 파일이 제외 마커로 시작
    ExclusionMarker,
    /// 파일에 테스트 마커가 포함됨
    TestMarker,
}

impl SkipReason {
    /// 메트릭 레이블 값
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => "unreadable",
            Self::TooLarge { .. } => "too_large",
            Self::ExclusionMarker => "exclusion_marker",
            Self::TestMarker => "test_marker",
        }
    }

    /// 사용자에게 경고로 보고해야 하는 사유인지 여부
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Unreadable { .. } | Self::TooLarge { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { message } => write!(f, "unreadable: {message}"),
            Self::TooLarge { size, max } => write!(f, "too large: {size} bytes (max: {max})"),
            Self::ExclusionMarker => f.write_str("excluded by marker"),
            Self::TestMarker => f.write_str("test code"),
        }
    }
}

/// 제외된 파일
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn new(file_name: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            file_name: file_name.into(),
            reason,
        }
    }
}

/// 리포트 작성기 실패 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub format: ReportFormat,
    pub message: String,
}

/// 감사 실행 결과
///
/// 스크립트나 CI 작업이 의존하는 출력 계약입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// 실행 ID (UUID v4)
    pub run_id: String,
    /// 실행 시작 시각
    pub started_at: DateTime<Utc>,
    /// 소요 시간 (밀리초)
    pub duration_ms: u64,
    /// 스캔 루트
    pub root: PathBuf,
    /// 사람이 읽는 요약 문자열
    pub summary: String,
    /// 매칭까지 수행된 파일 수
    pub files_scanned: usize,
    /// 정렬된 리포트 행
    pub rows: Vec<ReportRow>,
    /// 제외된 파일과 사유
    pub skipped: Vec<SkippedFile>,
    /// 생성된 리포트 파일
    pub artifacts: Vec<ReportArtifact>,
    /// 리포트 작성기 실패 (감사 자체는 성공)
    pub export_errors: Vec<ExportFailure>,
    /// 취소로 인해 일부 파일만 처리되었는지 여부
    pub cancelled: bool,
}

impl AuditReport {
    /// 읽기 실패나 크기 초과로 제외된 파일 목록
    pub fn unreadable(&self) -> impl Iterator<Item = &SkippedFile> {
        self.skipped.iter().filter(|s| s.reason.is_error())
    }
}
