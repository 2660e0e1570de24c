//! 파이프라인 trait -- 외부 협력자 확장 포인트 정의

use std::path::Path;

use crate::error::ExportError;
use crate::types::{ColumnSpec, ReportArtifact, ReportFormat, ReportRow};

/// 리포트 작성기 trait
///
/// 새로운 리포트 형식을 지원하려면 이 trait을 구현합니다.
/// 엔진은 정렬된 행과 컬럼 정의만 넘기며, 파일 형식은 알지 못합니다.
pub trait ReportWriter: Send + Sync {
    /// 이 작성기가 생성하는 형식
    fn format(&self) -> ReportFormat;

    /// 행 목록을 기록하고 생성된 파일 정보를 반환
    fn write(
        &self,
        rows: &[ReportRow],
        columns: &[ColumnSpec],
    ) -> Result<ReportArtifact, ExportError>;
}

/// 소스 텍스트 읽기 trait
///
/// 스캔 대상 파일의 내용을 UTF-8 문자열로 읽습니다.
/// 엔진은 `read_text` 전에 `size`로 크기 상한을 먼저 확인합니다.
pub trait SourceReader: Send + Sync {
    /// 파일 크기 (바이트)
    fn size(&self, path: &Path) -> std::io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }

    /// 파일 전체 내용을 읽음
    fn read_text(&self, path: &Path) -> std::io::Result<String>;
}
