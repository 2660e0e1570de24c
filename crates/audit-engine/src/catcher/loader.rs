//! catcher 정의 파일 로더 -- TOML 파일에서 catcher 레지스트리를 구성합니다.
//!
//! 파일 전체가 하나의 레지스트리가 됩니다. 개별 정의가 잘못되면
//! 파일 전체를 거부합니다 (스캔 시작 전 치명적 에러).

use std::path::Path;

use crate::config::AuditConfig;
use crate::error::AuditEngineError;

use super::registry::CatcherRegistry;
use super::types::{CatcherDef, CatcherFile};

/// catcher 정의 파일 최대 크기
const MAX_CATCHER_FILE_SIZE: u64 = 1024 * 1024; // 1MB
const MAX_CATCHERS_COUNT: usize = 1_000;

/// catcher 정의 파일 로더
pub struct CatcherLoader;

impl CatcherLoader {
    /// TOML 파일에서 catcher 정의 목록을 로드합니다.
    ///
    /// # Errors
    /// - 파일을 읽을 수 없는 경우
    /// - 파일 크기가 상한을 초과하는 경우
    /// - TOML 파싱 실패, 정의가 비어 있거나 너무 많은 경우
    pub async fn load_file(path: impl AsRef<Path>) -> Result<Vec<CatcherDef>, AuditEngineError> {
        let path = path.as_ref();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| AuditEngineError::CatcherLoad {
                path: path.display().to_string(),
                reason: format!("failed to read file metadata: {e}"),
            })?;

        if metadata.len() > MAX_CATCHER_FILE_SIZE {
            return Err(AuditEngineError::FileTooBig {
                path: path.display().to_string(),
                size: usize::try_from(metadata.len()).unwrap_or(usize::MAX),
                max: usize::try_from(MAX_CATCHER_FILE_SIZE).unwrap_or(usize::MAX),
            });
        }

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AuditEngineError::CatcherLoad {
                    path: path.display().to_string(),
                    reason: format!("failed to read file: {e}"),
                })?;

        Self::parse_toml(&content, &path.display().to_string())
    }

    /// TOML 문자열에서 catcher 정의 목록을 파싱합니다.
    pub fn parse_toml(toml_str: &str, source: &str) -> Result<Vec<CatcherDef>, AuditEngineError> {
        let file: CatcherFile =
            toml::from_str(toml_str).map_err(|e| AuditEngineError::CatcherLoad {
                path: source.to_owned(),
                reason: format!("invalid TOML: {e}"),
            })?;

        if file.catchers.is_empty() {
            return Err(AuditEngineError::CatcherLoad {
                path: source.to_owned(),
                reason: "no [[catcher]] entries defined".to_owned(),
            });
        }

        if file.catchers.len() > MAX_CATCHERS_COUNT {
            return Err(AuditEngineError::CatcherLoad {
                path: source.to_owned(),
                reason: format!("too many catchers: max {MAX_CATCHERS_COUNT}"),
            });
        }

        Ok(file.catchers)
    }

    /// 파일을 로드하고 레지스트리로 컴파일합니다.
    pub async fn load_registry(
        path: impl AsRef<Path>,
    ) -> Result<CatcherRegistry, AuditEngineError> {
        let path = path.as_ref();
        let defs = Self::load_file(path).await?;
        let registry = CatcherRegistry::from_defs(&defs)?;

        tracing::info!(
            path = %path.display(),
            count = registry.len(),
            "loaded catcher definitions"
        );

        Ok(registry)
    }

    /// 설정에 따라 레지스트리를 결정합니다.
    ///
    /// `catchers_path`가 지정되면 해당 파일을, 아니면 내장 세트를 사용합니다.
    pub async fn resolve(config: &AuditConfig) -> Result<CatcherRegistry, AuditEngineError> {
        match &config.catchers_path {
            Some(path) => Self::load_registry(path).await,
            None => Ok(CatcherRegistry::builtin()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[catcher]]
id = "outbound-http"
category = "OUTBOUND"
sub_category = "HTTP"
primary_pattern = 'new\s+HttpRequest'

[[catcher.details]]
name = "endPoint"
pattern = 'setEndpoint\((?P<value>.*?);'

[[catcher]]
id = "outbound-named"
category = "OUTBOUND"
sub_category = "NAMED"
primary_pattern = 'callout:'
"#;

    #[test]
    fn parse_toml_keeps_order() {
        let defs = CatcherLoader::parse_toml(SAMPLE, "test").unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].id, "outbound-http");
        assert_eq!(defs[1].id, "outbound-named");
    }

    #[test]
    fn parse_toml_rejects_empty_file() {
        let err = CatcherLoader::parse_toml("", "empty.toml").unwrap_err();
        assert!(err.to_string().contains("no [[catcher]]"));
    }

    #[test]
    fn parse_toml_rejects_missing_field() {
        let toml_str = r#"
[[catcher]]
id = "x"
category = "INBOUND"
"#;
        let err = CatcherLoader::parse_toml(toml_str, "bad.toml").unwrap_err();
        assert!(matches!(err, AuditEngineError::CatcherLoad { .. }));
    }

    #[tokio::test]
    async fn load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let registry = CatcherLoader::load_registry(file.path()).await.unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn load_registry_surfaces_pattern_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[[catcher]]
id = "x"
category = "INBOUND"
sub_category = "SOAP"
primary_pattern = "ok"

[[catcher.details]]
name = "d"
pattern = "no group here"
"#,
        )
        .unwrap();

        let err = CatcherLoader::load_registry(file.path()).await.unwrap_err();
        assert!(matches!(err, AuditEngineError::Pattern(_)));
    }

    #[tokio::test]
    async fn load_file_missing() {
        let err = CatcherLoader::load_file("/nonexistent/catchers.toml")
            .await
            .unwrap_err();
        assert!(matches!(err, AuditEngineError::CatcherLoad { .. }));
    }

    #[tokio::test]
    async fn resolve_uses_builtin_without_path() {
        let registry = CatcherLoader::resolve(&AuditConfig::default()).await.unwrap();
        assert_eq!(registry.len(), 3);
    }
}
