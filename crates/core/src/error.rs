//! 에러 타입 -- 도메인별 에러 정의

/// callaudit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CallauditError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// catcher 패턴 에러 (스캔 시작 전 치명적)
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// 스캔 처리 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// 리포트 출력 에러
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// catcher 정의 에러
///
/// catcher 레지스트리는 스캔 시작 전에 한 번 검증되므로,
/// 이 에러는 스캔 도중에는 발생하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// 정규식 컴파일 실패
    #[error("invalid regex in catcher '{catcher}' ({target}): {reason}")]
    InvalidRegex {
        catcher: String,
        target: String,
        reason: String,
    },

    /// detail 추출기에 `value` 캡처 그룹이 없음
    #[error("detail '{detail}' of catcher '{catcher}' has no named capture group 'value'")]
    MissingCaptureGroup { catcher: String, detail: String },

    /// catcher 정의 값 오류 (빈 id, 중복 이름 등)
    #[error("invalid catcher '{catcher}': {reason}")]
    InvalidDefinition { catcher: String, reason: String },

    /// catcher 정의 파일 로딩 실패
    #[error("failed to load catchers from {path}: {reason}")]
    LoadFailed { path: String, reason: String },
}

/// 스캔 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 작업 태스크 실패
    #[error("scan task failed: {0}")]
    Task(String),
}

/// 리포트 출력 에러
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// 출력 파일 쓰기 실패
    #[error("failed to write {format} report to {path}: {reason}")]
    WriteFailed {
        format: String,
        path: String,
        reason: String,
    },

    /// 직렬화 실패
    #[error("failed to serialize {format} report: {reason}")]
    Serialize { format: String, reason: String },
}
