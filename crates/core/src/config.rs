//! 설정 관리 -- callaudit.toml 파싱 및 런타임 설정
//!
//! [`CallauditConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CALLAUDIT_SCAN_INCLUDE=**/*.trigger` 형식)
//! 3. 설정 파일 (`callaudit.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), callaudit_core::error::CallauditError> {
//! use callaudit_core::config::CallauditConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CallauditConfig::load("callaudit.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CallauditConfig::parse("[scan]\ninclude = \"**/*.trigger\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CallauditError, ConfigError};
use crate::types::ReportFormat;

/// 설정 상한값 상수
const MAX_FILE_SIZE_LIMIT: usize = 100 * 1024 * 1024; // 100 MB
const MAX_PATH_LEN: usize = 4096;

/// callaudit 통합 설정
///
/// `callaudit.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallauditConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl CallauditConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CallauditError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값을 사용하여 로드합니다.
    ///
    /// 파일이 존재하지만 파싱에 실패하면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, CallauditError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(CallauditError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CallauditError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CallauditError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CallauditError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CallauditError> {
        toml::from_str(toml_str).map_err(|e| {
            CallauditError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CALLAUDIT_{SECTION}_{FIELD}`
    /// 예: `CALLAUDIT_SCAN_TEST_MARKER=@IsTest`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CALLAUDIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CALLAUDIT_GENERAL_LOG_FORMAT");

        // Scan
        override_string(&mut self.scan.root, "CALLAUDIT_SCAN_ROOT");
        override_string(&mut self.scan.include, "CALLAUDIT_SCAN_INCLUDE");
        override_csv(&mut self.scan.ignore, "CALLAUDIT_SCAN_IGNORE");
        override_string(
            &mut self.scan.exclusion_marker,
            "CALLAUDIT_SCAN_EXCLUSION_MARKER",
        );
        override_string(&mut self.scan.test_marker, "CALLAUDIT_SCAN_TEST_MARKER");
        override_bool(
            &mut self.scan.test_marker_ignore_case,
            "CALLAUDIT_SCAN_TEST_MARKER_IGNORE_CASE",
        );
        override_usize(&mut self.scan.max_file_size, "CALLAUDIT_SCAN_MAX_FILE_SIZE");
        override_bool(&mut self.scan.parallel, "CALLAUDIT_SCAN_PARALLEL");
        override_string(&mut self.scan.catchers_path, "CALLAUDIT_SCAN_CATCHERS_PATH");

        // Report
        override_bool(&mut self.report.enabled, "CALLAUDIT_REPORT_ENABLED");
        override_string(&mut self.report.output_dir, "CALLAUDIT_REPORT_OUTPUT_DIR");
        override_string(&mut self.report.file_stem, "CALLAUDIT_REPORT_FILE_STEM");
        override_csv(&mut self.report.formats, "CALLAUDIT_REPORT_FORMATS");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CallauditError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scan.root.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.root".to_owned(),
                reason: "scan root must not be empty".to_owned(),
            }
            .into());
        }

        if self.scan.root.len() > MAX_PATH_LEN {
            return Err(ConfigError::InvalidValue {
                field: "scan.root".to_owned(),
                reason: format!("path exceeds maximum length {MAX_PATH_LEN}"),
            }
            .into());
        }

        if self.scan.include.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.include".to_owned(),
                reason: "include glob must not be empty".to_owned(),
            }
            .into());
        }

        if self.scan.ignore.iter().any(|g| g.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "scan.ignore".to_owned(),
                reason: "ignore globs must not be empty".to_owned(),
            }
            .into());
        }

        if self.scan.max_file_size == 0 || self.scan.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        if self.report.enabled {
            if self.report.output_dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "report.output_dir".to_owned(),
                    reason: "output_dir must not be empty when reports are enabled".to_owned(),
                }
                .into());
            }

            if self.report.output_dir.len() > MAX_PATH_LEN {
                return Err(ConfigError::InvalidValue {
                    field: "report.output_dir".to_owned(),
                    reason: format!("path exceeds maximum length {MAX_PATH_LEN}"),
                }
                .into());
            }

            if Path::new(&self.report.output_dir)
                .components()
                .any(|c| c == std::path::Component::ParentDir)
            {
                return Err(ConfigError::InvalidValue {
                    field: "report.output_dir".to_owned(),
                    reason: "output_dir contains path traversal pattern '..'".to_owned(),
                }
                .into());
            }

            // file_stem은 디렉토리 구분자 없는 단일 파일명이어야 함
            let stem = &self.report.file_stem;
            if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
                return Err(ConfigError::InvalidValue {
                    field: "report.file_stem".to_owned(),
                    reason: "file_stem must be a plain file name".to_owned(),
                }
                .into());
            }

            if self.report.formats.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "report.formats".to_owned(),
                    reason: "at least one format required when reports are enabled".to_owned(),
                }
                .into());
            }

            if let Some(bad) = self
                .report
                .formats
                .iter()
                .find(|f| ReportFormat::from_str_loose(f).is_none())
            {
                return Err(ConfigError::InvalidValue {
                    field: "report.formats".to_owned(),
                    reason: format!("unknown format '{bad}', expected: csv, json"),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 스캔 루트 디렉토리
    pub root: String,
    /// 대상 파일 glob (루트 기준 상대 경로에 적용)
    pub include: String,
    /// 제외 glob 목록
    pub ignore: Vec<String>,
    /// 파일 내용이 이 문자열로 시작하면 건너뜀 (빈 문자열이면 비활성)
    pub exclusion_marker: String,
    /// 파일 내용에 이 문자열이 있으면 건너뜀 (빈 문자열이면 비활성)
    pub test_marker: String,
    /// 테스트 마커 비교 시 ASCII 대소문자 무시 여부 (기본: 구분)
    pub test_marker_ignore_case: bool,
    /// 파일 최대 크기 (바이트)
    pub max_file_size: usize,
    /// 파일 단위 병렬 매칭 여부
    pub parallel: bool,
    /// catcher 정의 파일 경로 (빈 문자열이면 내장 catcher 사용)
    pub catchers_path: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: ".".to_owned(),
            include: "**/*.cls".to_owned(),
            ignore: vec!["**/node_modules/**".to_owned()],
            exclusion_marker: "hidden".to_owned(),
            test_marker: "@isTest".to_owned(),
            test_marker_ignore_case: false,
            max_file_size: 10 * 1024 * 1024, // 10 MB
            parallel: true,
            catchers_path: String::new(),
        }
    }
}

/// 리포트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 리포트 파일 생성 여부
    pub enabled: bool,
    /// 출력 디렉토리
    pub output_dir: String,
    /// 출력 파일명 (확장자 제외)
    pub file_stem: String,
    /// 출력 형식 목록 (csv, json)
    pub formats: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: "callaudit-report".to_owned(),
            file_stem: "callin-callout-audit".to_owned(),
            formats: vec!["csv".to_owned(), "json".to_owned()],
        }
    }
}

impl ReportConfig {
    /// 설정된 형식 문자열을 [`ReportFormat`]으로 변환합니다 (중복 제거, 순서 유지).
    ///
    /// 알 수 없는 형식은 `validate()`에서 거부되므로 여기서는 무시합니다.
    pub fn parsed_formats(&self) -> Vec<ReportFormat> {
        let mut formats = Vec::new();
        for f in self.formats.iter().filter_map(|f| ReportFormat::from_str_loose(f)) {
            if !formats.contains(&f) {
                formats.push(f);
            }
        }
        formats
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
