//! 집계 및 정렬 -- 매칭 레코드를 리포트 행으로 변환합니다.
//!
//! 행 변환은 레코드에 대한 순수 함수이며, 정렬은 입력을 변경하지 않고
//! 새 벡터를 반환하는 안정 정렬입니다.

use std::cmp::Ordering;

use callaudit_core::types::{ColumnKey, DEFAULT_NAMESPACE, ReportRow};

use crate::types::{DetailCapture, MatchRecord};

/// namespace 접두사 구분자
pub const NAMESPACE_SEPARATOR: &str = "__";

/// detail 값 사이 구분자
pub const VALUE_DELIMITER: &str = ", ";

/// detail 그룹 사이 구분자
pub const GROUP_DELIMITER: &str = " | ";

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 정렬 키
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: ColumnKey,
    pub direction: SortDirection,
}

impl SortKey {
    pub const fn asc(field: ColumnKey) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: ColumnKey) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// 기본 정렬: type, subType, fileName 오름차순 후 matches 내림차순
pub const DEFAULT_SORT_KEYS: [SortKey; 4] = [
    SortKey::asc(ColumnKey::Type),
    SortKey::asc(ColumnKey::SubType),
    SortKey::asc(ColumnKey::FileName),
    SortKey::desc(ColumnKey::Matches),
];

/// 매칭 레코드를 리포트 행으로 변환합니다.
pub fn to_row(record: &MatchRecord) -> ReportRow {
    ReportRow {
        category: record.category.clone(),
        sub_category: record.sub_category.clone(),
        file_name: record.file_name.clone(),
        name_space: derive_namespace(&record.file_name),
        matches: record.match_count,
        detail: format_detail(&record.detail_captures),
    }
}

/// 레코드 목록을 순서대로 행으로 변환합니다.
pub fn to_rows(records: &[MatchRecord]) -> Vec<ReportRow> {
    records.iter().map(to_row).collect()
}

/// 파일 이름에서 namespace를 추출합니다.
///
/// 경로의 마지막 구성요소에서 첫 `__` 앞부분을 사용합니다.
/// 구분자가 없거나 앞부분이 비어 있으면 `Custom`입니다.
pub fn derive_namespace(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match base.split_once(NAMESPACE_SEPARATOR) {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_owned(),
        _ => DEFAULT_NAMESPACE.to_owned(),
    }
}

/// 캡처 문자열을 표시용으로 정규화합니다.
///
/// 개행을 공백으로 바꾸고 연속 공백을 하나로 줄인 뒤 앞뒤 공백을 제거합니다.
pub fn normalize_capture(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// detail 캡처를 하나의 표시 문자열로 만듭니다.
///
/// catcher 선언 순서대로 `name: v1, v2` 그룹을 ` | `로 연결합니다.
/// 정규화 후 비어 있는 값과 값이 없는 그룹은 생략됩니다.
pub fn format_detail(captures: &[DetailCapture]) -> String {
    captures
        .iter()
        .filter_map(|capture| {
            let values: Vec<String> = capture
                .values
                .iter()
                .map(|v| normalize_capture(v))
                .filter(|v| !v.is_empty())
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(format!("{}: {}", capture.name, values.join(VALUE_DELIMITER)))
            }
        })
        .collect::<Vec<_>>()
        .join(GROUP_DELIMITER)
}

/// 기본 정렬 키로 행을 정렬한 새 벡터를 반환합니다.
pub fn sort_rows(rows: &[ReportRow]) -> Vec<ReportRow> {
    sort_rows_by(rows, &DEFAULT_SORT_KEYS)
}

/// 지정한 키 순서로 행을 안정 정렬한 새 벡터를 반환합니다.
///
/// 모든 키가 같은 행은 입력 순서를 유지합니다.
pub fn sort_rows_by(rows: &[ReportRow], keys: &[SortKey]) -> Vec<ReportRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_rows(a, b, keys));
    sorted
}

fn compare_rows(a: &ReportRow, b: &ReportRow, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_field(a, b, key.field);
        let ordering = match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_field(a: &ReportRow, b: &ReportRow, field: ColumnKey) -> Ordering {
    match field {
        ColumnKey::Matches => a.matches.cmp(&b.matches),
        other => a.value(other).cmp(&b.value(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, sub: &str, file: &str, matches: usize) -> ReportRow {
        ReportRow {
            category: category.to_owned(),
            sub_category: sub.to_owned(),
            file_name: file.to_owned(),
            name_space: derive_namespace(file),
            matches,
            detail: String::new(),
        }
    }

    fn capture(name: &str, values: &[&str]) -> DetailCapture {
        DetailCapture {
            name: name.to_owned(),
            values: values.iter().map(|v| (*v).to_owned()).collect(),
        }
    }

    #[test]
    fn namespace_from_prefix() {
        assert_eq!(derive_namespace("ns__MyClass.cls"), "ns");
        assert_eq!(derive_namespace("MyClass.cls"), "Custom");
    }

    #[test]
    fn namespace_uses_base_name_only() {
        assert_eq!(derive_namespace("force_app__x/classes/MyClass.cls"), "Custom");
        assert_eq!(derive_namespace("classes/acme__Billing.cls"), "acme");
        assert_eq!(derive_namespace("classes\\acme__Billing.cls"), "acme");
    }

    #[test]
    fn namespace_uses_first_separator() {
        assert_eq!(derive_namespace("a__b__C.cls"), "a");
        assert_eq!(derive_namespace("__Odd.cls"), "Custom");
    }

    #[test]
    fn normalize_collapses_whitespace_and_newlines() {
        assert_eq!(
            normalize_capture("  String  ping(\r\n    String a)\t"),
            "String ping( String a)"
        );
        assert_eq!(normalize_capture("\n \n"), "");
    }

    #[test]
    fn format_detail_follows_declaration_order() {
        let captures = vec![
            capture("endPoint", &["'callout:A')", "base +\n  '/v1')"]),
            capture("method", &["'POST'"]),
        ];
        assert_eq!(
            format_detail(&captures),
            "endPoint: 'callout:A'), base + '/v1') | method: 'POST'"
        );
    }

    #[test]
    fn format_detail_omits_empty_groups() {
        let captures = vec![capture("a", &[]), capture("b", &["x"]), capture("c", &["  "])];
        assert_eq!(format_detail(&captures), "b: x");
        assert_eq!(format_detail(&[capture("a", &[])]), "");
    }

    #[test]
    fn format_detail_is_idempotent() {
        let captures = vec![capture("webServiceName", &["String ping() ", "Integer  add()"])];
        assert_eq!(format_detail(&captures), format_detail(&captures));
    }

    #[test]
    fn to_row_copies_record_fields() {
        let record = MatchRecord {
            catcher_id: "outbound-http".to_owned(),
            category: "OUTBOUND".to_owned(),
            sub_category: "HTTP".to_owned(),
            file_name: "classes/acme__Client.cls".to_owned(),
            match_count: 2,
            detail_captures: vec![capture("endPoint", &["'callout:X')"])],
        };
        let row = to_row(&record);
        assert_eq!(row.category, "OUTBOUND");
        assert_eq!(row.name_space, "acme");
        assert_eq!(row.matches, 2);
        assert_eq!(row.detail, "endPoint: 'callout:X')");
    }

    #[test]
    fn sort_uses_mixed_direction_keys() {
        let rows = vec![
            row("OUTBOUND", "HTTP", "A.cls", 1),
            row("INBOUND", "SOAP", "B.cls", 1),
            row("INBOUND", "REST", "C.cls", 5),
            row("INBOUND", "SOAP", "A.cls", 1),
            row("INBOUND", "SOAP", "A.cls", 4),
        ];
        let sorted = sort_rows(&rows);
        let keys: Vec<_> = sorted
            .iter()
            .map(|r| (r.category.as_str(), r.sub_category.as_str(), r.file_name.as_str(), r.matches))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("INBOUND", "REST", "C.cls", 5),
                ("INBOUND", "SOAP", "A.cls", 4),
                ("INBOUND", "SOAP", "A.cls", 1),
                ("INBOUND", "SOAP", "B.cls", 1),
                ("OUTBOUND", "HTTP", "A.cls", 1),
            ]
        );
    }

    #[test]
    fn file_name_outranks_match_count() {
        let rows = vec![row("X", "Y", "B", 1), row("X", "Y", "A", 3)];
        let sorted = sort_rows(&rows);
        assert_eq!(sorted[0].file_name, "A");
        assert_eq!(sorted[1].file_name, "B");

        let rows = vec![row("X", "Y", "B", 3), row("X", "Y", "A", 1)];
        let sorted = sort_rows(&rows);
        assert_eq!(sorted[0].file_name, "A");
        assert_eq!(sorted[0].matches, 1);
    }

    #[test]
    fn sort_is_stable_and_leaves_input_untouched() {
        let mut first = row("X", "Y", "A", 2);
        first.detail = "first".to_owned();
        let mut second = row("X", "Y", "A", 2);
        second.detail = "second".to_owned();
        let rows = vec![row("Z", "Y", "A", 1), first, second];

        let sorted = sort_rows(&rows);
        assert_eq!(sorted[0].detail, "first");
        assert_eq!(sorted[1].detail, "second");
        assert_eq!(rows[0].category, "Z");
    }

    #[test]
    fn sort_by_custom_keys() {
        let rows = vec![row("A", "X", "f1", 1), row("B", "X", "f2", 9)];
        let sorted = sort_rows_by(&rows, &[SortKey::desc(ColumnKey::Matches)]);
        assert_eq!(sorted[0].matches, 9);
    }
}
