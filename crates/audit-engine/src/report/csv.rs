//! CSV 리포트 작성기

use std::path::PathBuf;

use callaudit_core::error::ExportError;
use callaudit_core::pipeline::ReportWriter;
use callaudit_core::types::{ColumnSpec, ReportArtifact, ReportFormat, ReportRow};

use super::prepare_output_path;

/// `<output_dir>/<file_stem>.csv`에 헤더 행과 데이터 행을 기록합니다.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    output_dir: PathBuf,
    file_stem: String,
}

impl CsvReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: file_stem.into(),
        }
    }
}

impl ReportWriter for CsvReportWriter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn write(
        &self,
        rows: &[ReportRow],
        columns: &[ColumnSpec],
    ) -> Result<ReportArtifact, ExportError> {
        let path = prepare_output_path(&self.output_dir, &self.file_stem, self.format())?;
        let write_failed = |reason: String| ExportError::WriteFailed {
            format: ReportFormat::Csv.to_string(),
            path: path.display().to_string(),
            reason,
        };

        let mut writer = csv::Writer::from_path(&path).map_err(|e| write_failed(e.to_string()))?;

        writer
            .write_record(columns.iter().map(|c| c.header.as_str()))
            .map_err(|e| write_failed(e.to_string()))?;

        for row in rows {
            writer
                .write_record(columns.iter().map(|c| row.value(c.key).into_owned()))
                .map_err(|e| write_failed(e.to_string()))?;
        }

        writer.flush().map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!(path = %path.display(), rows = rows.len(), "csv report written");

        Ok(ReportArtifact {
            path,
            format: ReportFormat::Csv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            category: "OUTBOUND".to_owned(),
            sub_category: "HTTP".to_owned(),
            file_name: "classes/acme__Client.cls".to_owned(),
            name_space: "acme".to_owned(),
            matches: 2,
            detail: "endPoint: 'callout:A'), 'callout:B')".to_owned(),
        }
    }

    #[test]
    fn writes_header_and_quoted_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvReportWriter::new(dir.path(), "audit");

        let artifact = writer
            .write(&[sample_row()], &ColumnSpec::export_columns())
            .unwrap();
        assert_eq!(artifact.path, dir.path().join("audit.csv"));
        assert_eq!(artifact.format, ReportFormat::Csv);

        let content = std::fs::read_to_string(&artifact.path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "IN/OUT,Type,File,Namespace,Number,Detail"
        );
        assert_eq!(
            lines.next().unwrap(),
            "OUTBOUND,HTTP,classes/acme__Client.cls,acme,2,\"endPoint: 'callout:A'), 'callout:B')\""
        );
    }

    #[test]
    fn empty_rows_produce_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvReportWriter::new(dir.path().join("nested/out"), "audit");

        let artifact = writer.write(&[], &ColumnSpec::export_columns()).unwrap();
        let content = std::fs::read_to_string(&artifact.path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
