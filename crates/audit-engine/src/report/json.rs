//! JSON 리포트 작성기

use std::path::PathBuf;

use serde_json::{Map, Value};

use callaudit_core::error::ExportError;
use callaudit_core::pipeline::ReportWriter;
use callaudit_core::types::{ColumnKey, ColumnSpec, ReportArtifact, ReportFormat, ReportRow};

use super::prepare_output_path;

/// `<output_dir>/<file_stem>.json`에 컬럼 키를 필드명으로 하는 객체 배열을 기록합니다.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    output_dir: PathBuf,
    file_stem: String,
}

impl JsonReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
        }
    }
}

fn row_to_value(row: &ReportRow, columns: &[ColumnSpec]) -> Value {
    let mut object = Map::with_capacity(columns.len());
    for column in columns {
        let value = match column.key {
            ColumnKey::Matches => Value::from(row.matches),
            key => Value::from(row.value(key).into_owned()),
        };
        object.insert(column.key.as_str().to_owned(), value);
    }
    Value::Object(object)
}

impl ReportWriter for JsonReportWriter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }

    fn write(
        &self,
        rows: &[ReportRow],
        columns: &[ColumnSpec],
    ) -> Result<ReportArtifact, ExportError> {
        let path = prepare_output_path(&self.output_dir, &self.file_stem, self.format())?;

        let document = Value::Array(rows.iter().map(|r| row_to_value(r, columns)).collect());
        let bytes = serde_json::to_vec_pretty(&document).map_err(|e| ExportError::Serialize {
            format: ReportFormat::Json.to_string(),
            reason: e.to_string(),
        })?;

        std::fs::write(&path, bytes).map_err(|e| ExportError::WriteFailed {
            format: ReportFormat::Json.to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "json report written");

        Ok(ReportArtifact {
            path,
            format: ReportFormat::Json,
        })
    }
}
