//! 감사 오케스트레이터 -- 스캔부터 리포트까지 한 번의 실행을 관리
//!
//! # 내부 아키텍처
//!
//! ```text
//! root --> FileScanner --> [SourceFile]
//!                              |  (rayon par_iter, 파일 단위 독립)
//!                              v
//!            load_source --> SourceFilter --> CatchMatcher --> FileOutcome
//!                              |
//!                              v  (순서 보존 collect)
//!                  to_rows --> sort_rows --> export(ReportWriter...)
//!                              |
//!                              v
//!                          AuditReport
//! ```
//!
//! 전체 파이프라인은 `spawn_blocking` 위에서 동기적으로 실행됩니다.
//! 취소 토큰은 파일마다 확인하며, 취소되면 남은 파일을 버리고
//! 부분 결과를 `cancelled = true`로 반환합니다.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use callaudit_core::metrics as m;
use callaudit_core::pipeline::{ReportWriter, SourceReader};
use callaudit_core::types::ColumnSpec;

use crate::aggregate::{sort_rows, to_rows};
use crate::catcher::CatcherRegistry;
use crate::config::AuditConfig;
use crate::error::AuditEngineError;
use crate::matcher::CatchMatcher;
use crate::report::{ExportOutcome, export, writers_for};
use crate::scanner::{FileScanner, FsSourceReader, SourceFile, SourceFilter, load_source};
use crate::types::{AuditReport, MatchRecord, SkippedFile};

/// 파일 하나의 처리 결과
enum FileOutcome {
    Matched(Vec<MatchRecord>),
    Skipped(SkippedFile),
    Cancelled,
}

/// 감사 오케스트레이터
///
/// 레지스트리와 설정은 생성 시점에 고정됩니다. `run`은 여러 번 호출할 수 있으며
/// 각 실행은 서로 독립적입니다.
#[derive(Clone)]
pub struct Auditor {
    inner: Arc<AuditorInner>,
}

struct AuditorInner {
    config: AuditConfig,
    scanner: FileScanner,
    filter: SourceFilter,
    matcher: CatchMatcher,
    reader: Arc<dyn SourceReader>,
    writers: Vec<Arc<dyn ReportWriter>>,
    columns: Vec<ColumnSpec>,
}

impl Auditor {
    pub fn config(&self) -> &AuditConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &CatcherRegistry {
        self.inner.matcher.registry()
    }

    /// 감사를 한 번 실행합니다.
    ///
    /// 파일 단위 에러는 결과의 `skipped`에, 작성기 에러는 `export_errors`에
    /// 기록되며 실행 자체는 성공합니다.
    ///
    /// # Errors
    ///
    /// - 스캔 루트를 읽을 수 없는 경우 (`Io`)
    /// - blocking 태스크가 실패한 경우 (`Task`)
    pub async fn run(&self, cancel: CancellationToken) -> Result<AuditReport, AuditEngineError> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.execute(&cancel))
            .await
            .map_err(|e| AuditEngineError::Task(format!("spawn_blocking failed: {e}")))?
    }
}

impl AuditorInner {
    fn execute(&self, cancel: &CancellationToken) -> Result<AuditReport, AuditEngineError> {
        let started = Instant::now();
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let root = self.config.root.as_path();

        info!(
            run_id = %run_id,
            root = %root.display(),
            catchers = self.matcher.registry().len(),
            parallel = self.config.parallel,
            "audit started"
        );

        let enumeration = self.scanner.enumerate(root)?;
        let mut skipped = enumeration.skipped;

        let outcomes: Vec<FileOutcome> = if self.config.parallel {
            enumeration
                .files
                .par_iter()
                .map(|file| self.process_file(file, cancel))
                .collect()
        } else {
            enumeration
                .files
                .iter()
                .map(|file| self.process_file(file, cancel))
                .collect()
        };

        // fan-in: 작업 순서와 무관하게 정렬 단계에서 순서가 결정됨
        let mut records = Vec::new();
        let mut files_scanned = 0usize;
        let mut cancelled = false;
        for outcome in outcomes {
            match outcome {
                FileOutcome::Matched(found) => {
                    files_scanned += 1;
                    records.extend(found);
                }
                FileOutcome::Skipped(file) => skipped.push(file),
                FileOutcome::Cancelled => cancelled = true,
            }
        }

        for file in &skipped {
            metrics::counter!(m::FILES_SKIPPED_TOTAL, m::LABEL_REASON => file.reason.label())
                .increment(1);
        }
        metrics::counter!(m::FILES_SCANNED_TOTAL)
            .increment(u64::try_from(files_scanned).unwrap_or(u64::MAX));
        record_match_metrics(&records);

        let rows = sort_rows(&to_rows(&records));

        let export_outcome = if cancelled {
            warn!(run_id = %run_id, "audit cancelled, skipping report export");
            ExportOutcome::default()
        } else {
            export(&rows, &self.columns, &self.writers)
        };

        let elapsed = started.elapsed();
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        metrics::histogram!(m::AUDIT_DURATION_SECONDS).record(elapsed.as_secs_f64());

        let summary = summarize(rows.len(), files_scanned, skipped.len(), cancelled);

        info!(
            run_id = %run_id,
            files_scanned,
            rows = rows.len(),
            skipped = skipped.len(),
            artifacts = export_outcome.artifacts.len(),
            export_errors = export_outcome.errors.len(),
            cancelled,
            duration_ms,
            "audit completed"
        );

        Ok(AuditReport {
            run_id,
            started_at,
            duration_ms,
            root: root.to_path_buf(),
            summary,
            files_scanned,
            rows,
            skipped,
            artifacts: export_outcome.artifacts,
            export_errors: export_outcome.errors,
            cancelled,
        })
    }

    fn process_file(&self, file: &SourceFile, cancel: &CancellationToken) -> FileOutcome {
        if cancel.is_cancelled() {
            return FileOutcome::Cancelled;
        }

        let text = match load_source(self.reader.as_ref(), file, self.config.max_file_size) {
            Ok(text) => text,
            Err(reason) => {
                warn!(path = %file.file_name, reason = %reason, "failed to load source, skipping");
                return FileOutcome::Skipped(SkippedFile::new(file.file_name.clone(), reason));
            }
        };

        if let Some(reason) = self.filter.classify(&text) {
            debug!(path = %file.file_name, reason = %reason, "source filtered");
            return FileOutcome::Skipped(SkippedFile::new(file.file_name.clone(), reason));
        }

        let records = self.matcher.match_file(&file.file_name, &text);
        if !records.is_empty() {
            debug!(path = %file.file_name, records = records.len(), "catchers matched");
        }
        FileOutcome::Matched(records)
    }
}

/// 카테고리별 primary 매칭 횟수를 누적합니다.
fn record_match_metrics(records: &[MatchRecord]) {
    for record in records {
        metrics::counter!(m::MATCHES_TOTAL, m::LABEL_CATEGORY => record.category.clone())
            .increment(u64::try_from(record.match_count).unwrap_or(u64::MAX));
    }
}

/// 사람이 읽는 요약 문자열을 만듭니다.
fn summarize(rows: usize, files_scanned: usize, skipped: usize, cancelled: bool) -> String {
    let mut summary = if rows == 0 {
        format!("No call-in/call-out found in {files_scanned} scanned file(s)")
    } else {
        format!("Found {rows} call-in/call-out row(s) in {files_scanned} scanned file(s)")
    };
    if skipped > 0 {
        summary.push_str(&format!(", {skipped} file(s) skipped"));
    }
    if cancelled {
        summary.push_str(" (cancelled, partial result)");
    }
    summary
}

/// [`Auditor`] 빌더
///
/// 레지스트리를 지정하지 않으면 내장 catcher 세트를 사용합니다.
/// 작성기를 지정하지 않으면 설정의 `formats`에서 파일 작성기를 생성합니다.
pub struct AuditorBuilder {
    config: AuditConfig,
    registry: Option<Arc<CatcherRegistry>>,
    reader: Option<Arc<dyn SourceReader>>,
    writers: Option<Vec<Arc<dyn ReportWriter>>>,
    columns: Vec<ColumnSpec>,
}

impl AuditorBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: AuditConfig::default(),
            registry: None,
            reader: None,
            writers: None,
            columns: ColumnSpec::export_columns(),
        }
    }

    /// 엔진 설정을 지정합니다.
    pub fn config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// catcher 레지스트리를 지정합니다.
    pub fn registry(mut self, registry: impl Into<Arc<CatcherRegistry>>) -> Self {
        self.registry = Some(registry.into());
        self
    }

    /// 소스 읽기 구현을 지정합니다 (기본: 파일 시스템).
    pub fn source_reader(mut self, reader: Arc<dyn SourceReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// 리포트 작성기를 추가합니다. 호출하면 설정 기반 기본 작성기는 사용하지 않습니다.
    pub fn writer(mut self, writer: Arc<dyn ReportWriter>) -> Self {
        self.writers.get_or_insert_with(Vec::new).push(writer);
        self
    }

    /// 리포트 컬럼 정의를 지정합니다 (기본: 전체 export 컬럼).
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    /// 오케스트레이터를 빌드합니다.
    ///
    /// # Errors
    ///
    /// - 설정 검증 실패 또는 잘못된 glob (`Config`)
    /// - 내장 catcher 컴파일 실패 (`Pattern`)
    pub fn build(self) -> Result<Auditor, AuditEngineError> {
        self.config.validate()?;

        if self.columns.is_empty() {
            return Err(AuditEngineError::Config {
                field: "columns".to_owned(),
                reason: "at least one report column required".to_owned(),
            });
        }

        let registry = match self.registry {
            Some(registry) => registry,
            None => Arc::new(CatcherRegistry::builtin()?),
        };

        let scanner = FileScanner::new(&self.config.include, &self.config.ignore)?;
        let filter = SourceFilter::new(
            self.config.exclusion_marker.clone(),
            self.config.test_marker.clone(),
        )
        .ignore_case(self.config.test_marker_ignore_case);

        let writers = if !self.config.report_enabled {
            Vec::new()
        } else {
            match self.writers {
                Some(writers) => writers,
                None => writers_for(
                    &self.config.formats,
                    &self.config.output_dir,
                    &self.config.file_stem,
                ),
            }
        };

        let reader = self
            .reader
            .unwrap_or_else(|| Arc::new(FsSourceReader) as Arc<dyn SourceReader>);

        Ok(Auditor {
            inner: Arc::new(AuditorInner {
                config: self.config,
                scanner,
                filter,
                matcher: CatchMatcher::new(registry),
                reader,
                writers,
                columns: self.columns,
            }),
        })
    }
}

impl Default for AuditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
