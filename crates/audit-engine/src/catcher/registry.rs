//! catcher 레지스트리 -- 정규식 컴파일 및 검증
//!
//! [`CatcherRegistry`]는 스캔 시작 전에 한 번 구성되는 불변 값입니다.
//! 모든 정규식은 구성 시점에 컴파일되며, 잘못된 정의는 이 단계에서
//! [`PatternError`]로 거부됩니다. 스캔 도중에는 패턴 에러가 발생하지 않습니다.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use callaudit_core::error::PatternError;

use super::builtin::builtin_defs;
use super::types::CatcherDef;

/// detail 정규식이 반드시 선언해야 하는 캡처 그룹 이름
pub const VALUE_GROUP: &str = "value";

/// 정규식 컴파일 크기 상한 (바이트)
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// 컴파일된 detail 추출기
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    name: String,
    pattern: Regex,
}

impl DetailExtractor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// 텍스트 전체에서 `value` 그룹 캡처를 등장 순서대로 수집합니다.
    ///
    /// `value` 그룹이 참여하지 않은 매칭은 건너뜁니다.
    pub fn captures(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.name(VALUE_GROUP))
            .map(|m| m.as_str().to_owned())
            .collect()
    }
}

/// 컴파일된 catcher
#[derive(Debug, Clone)]
pub struct Catcher {
    id: String,
    category: String,
    sub_category: String,
    primary: Regex,
    details: Vec<DetailExtractor>,
}

impl Catcher {
    /// 정의를 검증하고 정규식을 컴파일합니다.
    ///
    /// primary 패턴은 대소문자 무시 + 멀티라인, detail 패턴은 여기에
    /// `.`의 개행 매칭이 추가됩니다.
    pub fn compile(def: &CatcherDef) -> Result<Self, PatternError> {
        let id = def.id.trim();
        if id.is_empty() {
            return Err(PatternError::InvalidDefinition {
                catcher: def.id.clone(),
                reason: "id must not be empty".to_owned(),
            });
        }

        for (field, value) in [
            ("category", &def.category),
            ("sub_category", &def.sub_category),
            ("primary_pattern", &def.primary_pattern),
        ] {
            if value.trim().is_empty() {
                return Err(PatternError::InvalidDefinition {
                    catcher: id.to_owned(),
                    reason: format!("{field} must not be empty"),
                });
            }
        }

        let primary = RegexBuilder::new(&def.primary_pattern)
            .case_insensitive(true)
            .multi_line(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| PatternError::InvalidRegex {
                catcher: id.to_owned(),
                target: "primary".to_owned(),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        let mut details = Vec::with_capacity(def.details.len());
        for detail in &def.details {
            let name = detail.name.trim();
            if name.is_empty() {
                return Err(PatternError::InvalidDefinition {
                    catcher: id.to_owned(),
                    reason: "detail name must not be empty".to_owned(),
                });
            }
            if !seen.insert(name.to_owned()) {
                return Err(PatternError::InvalidDefinition {
                    catcher: id.to_owned(),
                    reason: format!("duplicate detail name '{name}'"),
                });
            }

            let pattern = RegexBuilder::new(&detail.pattern)
                .case_insensitive(true)
                .multi_line(true)
                .dot_matches_new_line(true)
                .size_limit(REGEX_SIZE_LIMIT)
                .build()
                .map_err(|e| PatternError::InvalidRegex {
                    catcher: id.to_owned(),
                    target: format!("detail '{name}'"),
                    reason: e.to_string(),
                })?;

            if !pattern
                .capture_names()
                .any(|n| n == Some(VALUE_GROUP))
            {
                return Err(PatternError::MissingCaptureGroup {
                    catcher: id.to_owned(),
                    detail: name.to_owned(),
                });
            }

            details.push(DetailExtractor {
                name: name.to_owned(),
                pattern,
            });
        }

        Ok(Self {
            id: id.to_owned(),
            category: def.category.trim().to_owned(),
            sub_category: def.sub_category.trim().to_owned(),
            primary,
            details,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sub_category(&self) -> &str {
        &self.sub_category
    }

    pub fn primary(&self) -> &Regex {
        &self.primary
    }

    pub fn details(&self) -> &[DetailExtractor] {
        &self.details
    }

    /// primary 패턴의 비중첩 매칭 횟수
    pub fn count_matches(&self, text: &str) -> usize {
        self.primary.find_iter(text).count()
    }
}

/// 불변 catcher 레지스트리
///
/// 선언 순서를 유지하며, id는 레지스트리 내에서 고유합니다.
#[derive(Debug, Clone)]
pub struct CatcherRegistry {
    catchers: Vec<Catcher>,
}

impl CatcherRegistry {
    /// 정의 목록을 컴파일하여 레지스트리를 구성합니다.
    ///
    /// 하나라도 잘못된 정의가 있으면 전체가 거부됩니다.
    pub fn from_defs(defs: &[CatcherDef]) -> Result<Self, PatternError> {
        let mut seen = HashSet::new();
        let mut catchers = Vec::with_capacity(defs.len());

        for def in defs {
            let catcher = Catcher::compile(def)?;
            if !seen.insert(catcher.id.clone()) {
                return Err(PatternError::InvalidDefinition {
                    catcher: catcher.id,
                    reason: "duplicate catcher id".to_owned(),
                });
            }
            catchers.push(catcher);
        }

        tracing::debug!(count = catchers.len(), "catcher registry compiled");
        Ok(Self { catchers })
    }

    /// 내장 catcher 세트로 레지스트리를 구성합니다.
    pub fn builtin() -> Result<Self, PatternError> {
        Self::from_defs(&builtin_defs())
    }

    pub fn catchers(&self) -> &[Catcher] {
        &self.catchers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Catcher> {
        self.catchers.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Catcher> {
        self.catchers.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.catchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catcher::types::DetailDef;

    fn def(id: &str, primary: &str, details: Vec<DetailDef>) -> CatcherDef {
        CatcherDef {
            id: id.to_owned(),
            category: "INBOUND".to_owned(),
            sub_category: "SOAP".to_owned(),
            primary_pattern: primary.to_owned(),
            details,
        }
    }

    #[test]
    fn builtin_registry_compiles() {
        let registry = CatcherRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.get("outbound-http").is_some());
    }

    #[test]
    fn primary_is_case_insensitive() {
        let catcher = Catcher::compile(&def("soap", "webservice static", vec![])).unwrap();
        assert_eq!(catcher.count_matches("WebService Static x; webservice static y"), 2);
    }

    #[test]
    fn count_is_non_overlapping() {
        let catcher = Catcher::compile(&def("aa", "aa", vec![])).unwrap();
        assert_eq!(catcher.count_matches("aaaa"), 2);
        assert_eq!(catcher.count_matches("aaa"), 1);
    }

    #[test]
    fn invalid_primary_regex_is_rejected() {
        let err = Catcher::compile(&def("bad", "(unclosed", vec![])).unwrap_err();
        match err {
            PatternError::InvalidRegex { catcher, target, .. } => {
                assert_eq!(catcher, "bad");
                assert_eq!(target, "primary");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn invalid_detail_regex_names_detail() {
        let err = Catcher::compile(&def(
            "bad",
            "x",
            vec![DetailDef::new("endPoint", "(?P<value>[")],
        ))
        .unwrap_err();
        assert!(err.to_string().contains("endPoint"));
    }

    #[test]
    fn detail_without_value_group_is_rejected() {
        let err = Catcher::compile(&def(
            "http",
            "new HttpRequest",
            vec![DetailDef::new("endPoint", r"setEndpoint\((.*?);")],
        ))
        .unwrap_err();
        assert!(matches!(err, PatternError::MissingCaptureGroup { .. }));
    }

    #[test]
    fn duplicate_detail_name_is_rejected() {
        let err = Catcher::compile(&def(
            "dup",
            "x",
            vec![
                DetailDef::new("a", "(?P<value>x)"),
                DetailDef::new("a", "(?P<value>y)"),
            ],
        ))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate detail name"));
    }

    #[test]
    fn empty_labels_are_rejected() {
        let mut d = def("x", "x", vec![]);
        d.category = "  ".to_owned();
        let err = Catcher::compile(&d).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn duplicate_catcher_id_is_rejected() {
        let err =
            CatcherRegistry::from_defs(&[def("same", "a", vec![]), def("same", "b", vec![])])
                .unwrap_err();
        assert!(err.to_string().contains("duplicate catcher id"));
    }

    #[test]
    fn detail_captures_span_lines() {
        let catcher = Catcher::compile(&def(
            "soap",
            "webservice static",
            vec![DetailDef::new(
                "webServiceName",
                r"webservice static (?P<value>.*?)\{",
            )],
        ))
        .unwrap();
        let text = "global webservice static String ping(\n  String a) {\n}";
        let caps = catcher.details()[0].captures(text);
        assert_eq!(caps, vec!["String ping(\n  String a) "]);
    }

    #[test]
    fn optional_value_group_skips_non_participating_matches() {
        let catcher = Catcher::compile(&def(
            "opt",
            "x",
            vec![DetailDef::new("v", r"x(?:=(?P<value>\d+))?")],
        ))
        .unwrap();
        assert_eq!(catcher.details()[0].captures("x=1 x x=3"), vec!["1", "3"]);
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let registry = CatcherRegistry::from_defs(&[
            def("second", "b", vec![]),
            def("first", "a", vec![]),
        ])
        .unwrap();
        let ids: Vec<_> = registry.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["second", "first"]);
    }
}
