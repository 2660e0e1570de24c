#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CallauditError, ConfigError, ExportError, PatternError, ScanError};

// 설정
pub use config::CallauditConfig;

// 파이프라인 trait
pub use pipeline::{ReportWriter, SourceReader};

// 도메인 타입
pub use types::{ColumnKey, ColumnSpec, DEFAULT_NAMESPACE, ReportArtifact, ReportFormat, ReportRow};
