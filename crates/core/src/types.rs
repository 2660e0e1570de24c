//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 엔진과 CLI, 그리고 외부 리포트 작성기가 공유하는 데이터 구조를 정의합니다.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// namespace 접두사가 없는 파일에 사용하는 namespace 값
pub const DEFAULT_NAMESPACE: &str = "Custom";

/// 리포트 행
///
/// 하나의 (파일, catcher) 매칭 결과를 표시/출력용으로 평탄화한 형태입니다.
/// JSON 출력 시 필드명은 `type`, `subType`, `fileName`, `nameSpace`, `matches`, `detail`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// 최상위 분류 (예: INBOUND, OUTBOUND)
    #[serde(rename = "type")]
    pub category: String,
    /// 하위 분류 (예: SOAP, REST, HTTP)
    #[serde(rename = "subType")]
    pub sub_category: String,
    /// 스캔 루트 기준 상대 경로
    pub file_name: String,
    /// 파일명의 `prefix__` 접두사, 없으면 [`DEFAULT_NAMESPACE`]
    pub name_space: String,
    /// primary 패턴 매칭 횟수
    pub matches: usize,
    /// detail 캡처 표시 문자열
    pub detail: String,
}

impl ReportRow {
    /// 컬럼 키에 해당하는 표시 값을 반환합니다.
    pub fn value(&self, key: ColumnKey) -> Cow<'_, str> {
        match key {
            ColumnKey::Type => Cow::Borrowed(&self.category),
            ColumnKey::SubType => Cow::Borrowed(&self.sub_category),
            ColumnKey::FileName => Cow::Borrowed(&self.file_name),
            ColumnKey::NameSpace => Cow::Borrowed(&self.name_space),
            ColumnKey::Matches => Cow::Owned(self.matches.to_string()),
            ColumnKey::Detail => Cow::Borrowed(&self.detail),
        }
    }
}

/// 리포트 컬럼 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "subType")]
    SubType,
    #[serde(rename = "fileName")]
    FileName,
    #[serde(rename = "nameSpace")]
    NameSpace,
    #[serde(rename = "matches")]
    Matches,
    #[serde(rename = "detail")]
    Detail,
}

impl ColumnKey {
    /// 직렬화 시 사용하는 키 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::SubType => "subType",
            Self::FileName => "fileName",
            Self::NameSpace => "nameSpace",
            Self::Matches => "matches",
            Self::Detail => "detail",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 출력 컬럼 정의 (키 + 표시 헤더)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub header: String,
}

impl ColumnSpec {
    pub fn new(key: ColumnKey, header: impl Into<String>) -> Self {
        Self {
            key,
            header: header.into(),
        }
    }

    /// 리포트 파일 출력용 전체 컬럼 목록
    pub fn export_columns() -> Vec<ColumnSpec> {
        vec![
            Self::new(ColumnKey::Type, "IN/OUT"),
            Self::new(ColumnKey::SubType, "Type"),
            Self::new(ColumnKey::FileName, "File"),
            Self::new(ColumnKey::NameSpace, "Namespace"),
            Self::new(ColumnKey::Matches, "Number"),
            Self::new(ColumnKey::Detail, "Detail"),
        ]
    }

    /// 콘솔 표 출력용 컬럼 목록 (`detail` 제외)
    pub fn console_columns() -> Vec<ColumnSpec> {
        Self::export_columns()
            .into_iter()
            .filter(|c| c.key != ColumnKey::Detail)
            .collect()
    }
}

/// 리포트 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    /// 대소문자를 구분하지 않고 문자열에서 형식을 파싱합니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// 파일 확장자
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 생성된 리포트 파일 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub path: PathBuf,
    pub format: ReportFormat,
}
