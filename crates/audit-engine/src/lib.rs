#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`AuditEngineError`)
//! - [`config`]: Engine configuration (`AuditConfig`, builder)
//! - [`types`]: Domain types (`MatchRecord`, `SkippedFile`, `AuditReport`)
//! - [`catcher`]: Pattern definitions (`CatcherDef`, `CatcherRegistry`, `CatcherLoader`)
//! - [`scanner`]: File discovery and source filtering (`FileScanner`, `SourceFilter`)
//! - [`matcher`]: Catcher evaluation per file (`CatchMatcher`)
//! - [`aggregate`]: Row derivation and sorting (`to_rows`, `sort_rows`)
//! - [`report`]: Console table and report writers (`render_table`, `export`)
//! - [`auditor`]: Main orchestrator (`Auditor`, `AuditorBuilder`)
//!
//! # Architecture
//!
//! ```text
//! root --> FileScanner --> SourceFilter --> CatchMatcher (CatcherRegistry)
//!                                                |
//!                                         Vec<MatchRecord>
//!                                                |
//!                                     to_rows --> sort_rows
//!                                                |
//!                               +----------------+----------------+
//!                               |                                 |
//!                         render_table                 ReportWriter (csv, json)
//! ```

pub mod aggregate;
pub mod auditor;
pub mod catcher;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod types;

// --- Public API Re-exports ---

// Orchestrator
pub use auditor::{Auditor, AuditorBuilder};

// Configuration
pub use config::{AuditConfig, AuditConfigBuilder};

// Error
pub use error::AuditEngineError;

// Types
pub use types::{AuditReport, DetailCapture, ExportFailure, MatchRecord, SkipReason, SkippedFile};

// Catcher
pub use catcher::{Catcher, CatcherDef, CatcherLoader, CatcherRegistry, DetailDef};

// Pipeline stages
pub use aggregate::{
    DEFAULT_SORT_KEYS, SortDirection, SortKey, derive_namespace, format_detail,
    normalize_capture, sort_rows, sort_rows_by, to_row, to_rows,
};
pub use matcher::CatchMatcher;
pub use report::{CsvReportWriter, ExportOutcome, JsonReportWriter, export, render_table};
pub use scanner::{Enumeration, FileScanner, FsSourceReader, SourceFile, SourceFilter};
