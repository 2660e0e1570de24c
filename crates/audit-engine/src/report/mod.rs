//! 리포트 모듈 -- 콘솔 표 출력과 리포트 작성기 호출
//!
//! 엔진은 정렬된 행과 컬럼 정의를 조립해 [`ReportWriter`]에 넘깁니다.
//! 작성기 실패는 [`ExportOutcome::errors`]에 기록될 뿐 감사를 실패시키지 않습니다.

pub mod csv;
pub mod json;
pub mod table;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use callaudit_core::error::ExportError;
use callaudit_core::metrics as m;
use callaudit_core::pipeline::ReportWriter;
use callaudit_core::types::{ColumnSpec, ReportArtifact, ReportFormat, ReportRow};

use crate::types::ExportFailure;

pub use self::csv::CsvReportWriter;
pub use self::json::JsonReportWriter;
pub use self::table::render_table;

/// 리포트 출력 결과
#[derive(Debug, Default, Clone)]
pub struct ExportOutcome {
    pub artifacts: Vec<ReportArtifact>,
    pub errors: Vec<ExportFailure>,
}

/// 모든 작성기에 행을 넘기고 결과를 모읍니다.
///
/// 하나의 작성기 실패는 다른 작성기에 영향을 주지 않습니다.
pub fn export(
    rows: &[ReportRow],
    columns: &[ColumnSpec],
    writers: &[Arc<dyn ReportWriter>],
) -> ExportOutcome {
    let mut outcome = ExportOutcome::default();

    for writer in writers {
        let format = writer.format();
        match writer.write(rows, columns) {
            Ok(artifact) => {
                info!(
                    format = %format,
                    path = %artifact.path.display(),
                    rows = rows.len(),
                    "report generated"
                );
                outcome.artifacts.push(artifact);
            }
            Err(e) => {
                warn!(format = %format, error = %e, "report writer failed");
                metrics::counter!(m::EXPORT_FAILURES_TOTAL, m::LABEL_FORMAT => format.extension())
                    .increment(1);
                outcome.errors.push(ExportFailure {
                    format,
                    message: e.to_string(),
                });
            }
        }
    }

    outcome
}

/// 형식 목록에 해당하는 기본 파일 작성기를 생성합니다.
pub fn writers_for(
    formats: &[ReportFormat],
    output_dir: &Path,
    file_stem: &str,
) -> Vec<Arc<dyn ReportWriter>> {
    formats
        .iter()
        .map(|format| -> Arc<dyn ReportWriter> {
            match format {
                ReportFormat::Csv => Arc::new(CsvReportWriter::new(output_dir, file_stem)),
                ReportFormat::Json => Arc::new(JsonReportWriter::new(output_dir, file_stem)),
            }
        })
        .collect()
}

/// 출력 디렉토리를 만들고 `<dir>/<stem>.<ext>` 경로를 반환합니다.
pub(crate) fn prepare_output_path(
    output_dir: &Path,
    file_stem: &str,
    format: ReportFormat,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|e| ExportError::WriteFailed {
        format: format.to_string(),
        path: output_dir.display().to_string(),
        reason: format!("failed to create output directory: {e}"),
    })?;
    Ok(output_dir.join(format!("{file_stem}.{}", format.extension())))
}
