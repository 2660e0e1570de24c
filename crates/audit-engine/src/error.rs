//! 감사 엔진 에러 타입
//!
//! [`AuditEngineError`]는 엔진 내부에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<AuditEngineError> for CallauditError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **catcher 정의**: `Pattern`, `CatcherLoad`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`, `FileTooBig`
//! - **리포트 출력**: `Export`
//! - **작업 태스크**: `Task`

use callaudit_core::error::{
    CallauditError, ConfigError, ExportError, PatternError, ScanError,
};

/// 감사 엔진 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AuditEngineError {
    /// catcher 패턴 에러 (레지스트리 구성 시점)
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// catcher 정의 파일 로딩 실패
    #[error("catcher load error: {path}: {reason}")]
    CatcherLoad {
        /// 정의 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 리포트 출력 에러
    #[error(transparent)]
    Export(#[from] ExportError),

    /// blocking 태스크 실패 (join 에러 등)
    #[error("task error: {0}")]
    Task(String),
}

impl From<AuditEngineError> for CallauditError {
    fn from(err: AuditEngineError) -> Self {
        match err {
            AuditEngineError::Pattern(e) => CallauditError::Pattern(e),
            AuditEngineError::CatcherLoad { path, reason } => {
                CallauditError::Pattern(PatternError::LoadFailed { path, reason })
            }
            AuditEngineError::Config { field, reason } => {
                CallauditError::Config(ConfigError::InvalidValue { field, reason })
            }
            AuditEngineError::Io { path, source } => CallauditError::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
            AuditEngineError::FileTooBig { path, size, max } => {
                CallauditError::Pattern(PatternError::LoadFailed {
                    path,
                    reason: format!("file too large: {size} bytes (max: {max})"),
                })
            }
            AuditEngineError::Export(e) => CallauditError::Export(e),
            AuditEngineError::Task(msg) => CallauditError::Scan(ScanError::Task(msg)),
        }
    }
}
