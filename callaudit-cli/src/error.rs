//! CLI-specific error types and exit code mapping

use callaudit_core::error::CallauditError;
use callaudit_engine::AuditEngineError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Catcher definitions could not be loaded or compiled.
    #[error("catcher error: {0}")]
    Pattern(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from callaudit-core.
    #[error("{0}")]
    Core(#[from] CallauditError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                        |
    /// |------|--------------------------------|
    /// | 0    | Success                        |
    /// | 1    | General / command error        |
    /// | 2    | Configuration error            |
    /// | 3    | Catcher / pattern error        |
    /// | 10   | IO error                       |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Pattern(_) => 3,
            Self::Io(_) => 10,
            Self::Core(core) => match core {
                CallauditError::Config(_) => 2,
                CallauditError::Pattern(_) => 3,
                CallauditError::Io(_) => 10,
                CallauditError::Scan(_) | CallauditError::Export(_) => 1,
            },
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<AuditEngineError> for CliError {
    fn from(e: AuditEngineError) -> Self {
        Self::Core(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callaudit_core::error::{ConfigError, ExportError, PatternError, ScanError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("bad value".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::from(CallauditError::Config(ConfigError::ParseFailed {
            reason: "expected `]`".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_pattern_error() {
        let err = CliError::from(CallauditError::Pattern(PatternError::MissingCaptureGroup {
            catcher: "inbound-rest".to_owned(),
            detail: "restResource".to_owned(),
        }));
        assert_eq!(err.exit_code(), 3, "pattern error should return exit code 3");
        assert_eq!(CliError::Pattern("x".to_owned()).exit_code(), 3);
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert_eq!(CliError::Io(io_err).exit_code(), 10);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(CliError::Core(CallauditError::Io(io_err)).exit_code(), 10);
    }

    #[test]
    fn test_exit_code_command_and_scan_errors() {
        assert_eq!(CliError::Command("oops".to_owned()).exit_code(), 1);
        assert_eq!(
            CliError::Core(CallauditError::Scan(ScanError::Task("panicked".to_owned())))
                .exit_code(),
            1
        );
        assert_eq!(
            CliError::Core(CallauditError::Export(ExportError::Serialize {
                format: "json".to_owned(),
                reason: "x".to_owned(),
            }))
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        assert_eq!(CliError::JsonSerialize(json_err).exit_code(), 1);
    }

    #[test]
    fn test_engine_errors_keep_their_category() {
        let err = CliError::from(AuditEngineError::CatcherLoad {
            path: "catchers.toml".to_owned(),
            reason: "no [[catcher]] entries".to_owned(),
        });
        assert_eq!(err.exit_code(), 3);

        let err = CliError::from(AuditEngineError::Config {
            field: "include".to_owned(),
            reason: "invalid glob".to_owned(),
        });
        assert_eq!(err.exit_code(), 2);

        let err = CliError::from(AuditEngineError::Io {
            path: "/missing".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = err.to_string();
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }
}
