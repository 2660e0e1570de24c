//! 감사 엔진 설정
//!
//! [`AuditConfig`]는 core의 [`CallauditConfig`]에서 파생되며,
//! 문자열 설정을 경로와 [`ReportFormat`] 같은 타입 값으로 변환합니다.
//!
//! # 사용 예시
//!
//! ```
//! use callaudit_engine::{AuditConfig, AuditConfigBuilder};
//!
//! let config = AuditConfig::default();
//! config.validate().unwrap();
//!
//! let config = AuditConfigBuilder::new()
//!     .root("force-app")
//!     .include("**/*.cls")
//!     .parallel(false)
//!     .build()
//!     .unwrap();
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use callaudit_core::config::CallauditConfig;
use callaudit_core::types::ReportFormat;

use crate::error::AuditEngineError;

/// 설정 상한값 상수
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// 감사 엔진 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// 스캔 루트
    pub root: PathBuf,
    /// 대상 파일 glob
    pub include: String,
    /// 제외 glob 목록
    pub ignore: Vec<String>,
    /// 파일 시작 제외 마커 (빈 문자열이면 비활성)
    pub exclusion_marker: String,
    /// 테스트 코드 마커 (빈 문자열이면 비활성)
    pub test_marker: String,
    /// 테스트 마커 ASCII 대소문자 무시 여부
    pub test_marker_ignore_case: bool,
    /// 파일 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 파일 단위 병렬 처리 여부
    pub parallel: bool,
    /// catcher 정의 파일 (None이면 내장 세트)
    pub catchers_path: Option<PathBuf>,

    // --- 리포트 ---
    /// 리포트 파일 생성 여부
    pub report_enabled: bool,
    /// 리포트 출력 디렉토리
    pub output_dir: PathBuf,
    /// 리포트 파일명 (확장자 제외)
    pub file_stem: String,
    /// 리포트 형식
    pub formats: Vec<ReportFormat>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::from_core(&CallauditConfig::default())
    }
}

impl AuditConfig {
    /// core 설정에서 엔진 설정을 생성합니다.
    ///
    /// 알 수 없는 리포트 형식은 core 검증에서 거부되므로 여기서는 무시됩니다.
    pub fn from_core(core: &CallauditConfig) -> Self {
        let catchers_path = match core.scan.catchers_path.trim() {
            "" => None,
            path => Some(PathBuf::from(path)),
        };

        Self {
            root: PathBuf::from(&core.scan.root),
            include: core.scan.include.clone(),
            ignore: core.scan.ignore.clone(),
            exclusion_marker: core.scan.exclusion_marker.clone(),
            test_marker: core.scan.test_marker.clone(),
            test_marker_ignore_case: core.scan.test_marker_ignore_case,
            max_file_size: core.scan.max_file_size,
            parallel: core.scan.parallel,
            catchers_path,
            report_enabled: core.report.enabled,
            output_dir: PathBuf::from(&core.report.output_dir),
            file_stem: core.report.file_stem.clone(),
            formats: core.report.parsed_formats(),
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `include`: 비어 있으면 안 됨
    /// - `max_file_size`: 1-104857600 (100MB)
    /// - 리포트 활성화 시 `formats` 하나 이상, `file_stem`은 단일 파일명
    pub fn validate(&self) -> Result<(), AuditEngineError> {
        if self.include.trim().is_empty() {
            return Err(AuditEngineError::Config {
                field: "include".to_owned(),
                reason: "include glob must not be empty".to_owned(),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(AuditEngineError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }

        if self.report_enabled {
            if self.formats.is_empty() {
                return Err(AuditEngineError::Config {
                    field: "formats".to_owned(),
                    reason: "at least one format required when reports are enabled".to_owned(),
                });
            }

            let stem = &self.file_stem;
            if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
                return Err(AuditEngineError::Config {
                    field: "file_stem".to_owned(),
                    reason: "file_stem must be a plain file name".to_owned(),
                });
            }
        }

        Ok(())
    }
}

/// [`AuditConfig`] 빌더
#[derive(Default)]
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    pub fn include(mut self, glob: impl Into<String>) -> Self {
        self.config.include = glob.into();
        self
    }

    pub fn ignore(mut self, globs: Vec<String>) -> Self {
        self.config.ignore = globs;
        self
    }

    pub fn exclusion_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.exclusion_marker = marker.into();
        self
    }

    pub fn test_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.test_marker = marker.into();
        self
    }

    pub fn test_marker_ignore_case(mut self, ignore_case: bool) -> Self {
        self.config.test_marker_ignore_case = ignore_case;
        self
    }

    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn catchers_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.catchers_path = path;
        self
    }

    pub fn report_enabled(mut self, enabled: bool) -> Self {
        self.config.report_enabled = enabled;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn file_stem(mut self, stem: impl Into<String>) -> Self {
        self.config.file_stem = stem.into();
        self
    }

    pub fn formats(mut self, formats: Vec<ReportFormat>) -> Self {
        self.config.formats = formats;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `AuditEngineError::Config` 반환
    pub fn build(self) -> Result<AuditConfig, AuditEngineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AuditConfig::default().validate().unwrap();
    }

    #[test]
    fn from_core_preserves_values() {
        let mut core = CallauditConfig::default();
        core.scan.root = "force-app".to_owned();
        core.scan.include = "**/*.trigger".to_owned();
        core.scan.catchers_path = "catchers.toml".to_owned();
        core.report.formats = vec!["json".to_owned()];

        let config = AuditConfig::from_core(&core);
        assert_eq!(config.root, PathBuf::from("force-app"));
        assert_eq!(config.include, "**/*.trigger");
        assert_eq!(config.catchers_path, Some(PathBuf::from("catchers.toml")));
        assert_eq!(config.formats, vec![ReportFormat::Json]);
    }

    #[test]
    fn from_core_blank_catchers_path_is_none() {
        let mut core = CallauditConfig::default();
        core.scan.catchers_path = "   ".to_owned();
        assert!(AuditConfig::from_core(&core).catchers_path.is_none());
    }

    #[test]
    fn validate_rejects_zero_max_file_size() {
        let config = AuditConfig {
            max_file_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_formats_when_enabled() {
        let config = AuditConfig {
            formats: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_empty_formats_when_disabled() {
        let config = AuditConfig {
            report_enabled: false,
            formats: vec![],
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn builder_rejects_nested_file_stem() {
        let result = AuditConfigBuilder::new().file_stem("a/b").build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_sets_fields() {
        let config = AuditConfigBuilder::new()
            .root("src")
            .parallel(false)
            .test_marker("")
            .test_marker_ignore_case(true)
            .build()
            .unwrap();
        assert_eq!(config.root, PathBuf::from("src"));
        assert!(config.test_marker_ignore_case);
        assert!(!config.parallel);
        assert!(config.test_marker.is_empty());
    }
}
