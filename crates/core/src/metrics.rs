//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 엔진은 이 상수를 사용하여 `metrics::counter!()`, `metrics::histogram!()`
//! 매크로를 호출합니다. 레코더가 설치되지 않으면 모든 호출은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `callaudit_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// catcher 분류 레이블 키 (INBOUND, OUTBOUND 등)
pub const LABEL_CATEGORY: &str = "category";

/// 건너뛴 사유 레이블 키 (unreadable, too_large, exclusion_marker, test_marker)
pub const LABEL_REASON: &str = "reason";

/// 리포트 형식 레이블 키 (csv, json)
pub const LABEL_FORMAT: &str = "format";

// ─── Audit 메트릭 ──────────────────────────────────────────────────

/// 매칭까지 수행된 파일 수 (counter)
pub const FILES_SCANNED_TOTAL: &str = "callaudit_files_scanned_total";

/// 건너뛴 파일 수 (counter, label: reason)
pub const FILES_SKIPPED_TOTAL: &str = "callaudit_files_skipped_total";

/// primary 패턴 매칭 횟수 합계 (counter, label: category)
pub const MATCHES_TOTAL: &str = "callaudit_matches_total";

/// 리포트 출력 실패 수 (counter, label: format)
pub const EXPORT_FAILURES_TOTAL: &str = "callaudit_export_failures_total";

/// 한 번의 audit 소요 시간 (histogram, 초)
pub const AUDIT_DURATION_SECONDS: &str = "callaudit_audit_duration_seconds";

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 프로세스 시작 시 한 번 호출합니다. 레코더가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        FILES_SCANNED_TOTAL,
        "Total number of source files evaluated against the catcher registry"
    );
    describe_counter!(
        FILES_SKIPPED_TOTAL,
        "Total number of source files skipped, by reason"
    );
    describe_counter!(
        MATCHES_TOTAL,
        "Total number of primary pattern matches, by catcher category"
    );
    describe_counter!(
        EXPORT_FAILURES_TOTAL,
        "Total number of report writer failures, by format"
    );
    describe_histogram!(
        AUDIT_DURATION_SECONDS,
        "Time to complete a single audit pass in seconds"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_use_prefix() {
        for name in [
            FILES_SCANNED_TOTAL,
            FILES_SKIPPED_TOTAL,
            MATCHES_TOTAL,
            EXPORT_FAILURES_TOTAL,
            AUDIT_DURATION_SECONDS,
        ] {
            assert!(name.starts_with("callaudit_"), "{name}");
        }
    }

    #[test]
    fn describe_all_without_recorder_is_noop() {
        describe_all();
    }
}
