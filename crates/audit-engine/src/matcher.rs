//! catcher 매칭 -- 파일 텍스트에 레지스트리 전체를 적용합니다.
//!
//! [`CatchMatcher`]는 순수 함수처럼 동작합니다. 같은 텍스트와 레지스트리에
//! 대해서는 항상 같은 레코드를 같은 순서로 생성하므로 파일 단위로
//! 병렬 실행해도 결과가 달라지지 않습니다.

use std::sync::Arc;

use crate::catcher::CatcherRegistry;
use crate::types::{DetailCapture, MatchRecord};

/// catcher 매처
#[derive(Debug, Clone)]
pub struct CatchMatcher {
    registry: Arc<CatcherRegistry>,
}

impl CatchMatcher {
    /// 새 매처를 생성합니다.
    pub fn new(registry: Arc<CatcherRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CatcherRegistry {
        &self.registry
    }

    /// 한 파일에 대해 모든 catcher를 평가합니다.
    ///
    /// primary 패턴이 한 번도 매칭되지 않은 catcher는 레코드를 만들지 않습니다.
    /// 매칭된 catcher는 detail 추출기를 파일 전체 텍스트에 독립적으로 적용하며,
    /// primary 매칭 위치로 범위를 좁히지 않습니다.
    pub fn match_file(&self, file_name: &str, text: &str) -> Vec<MatchRecord> {
        let mut records = Vec::new();

        for catcher in self.registry.iter() {
            let match_count = catcher.count_matches(text);
            if match_count == 0 {
                continue;
            }

            let detail_captures = catcher
                .details()
                .iter()
                .map(|detail| DetailCapture {
                    name: detail.name().to_owned(),
                    values: detail.captures(text),
                })
                .collect();

            tracing::trace!(
                file = file_name,
                catcher = catcher.id(),
                matches = match_count,
                "catcher matched"
            );

            records.push(MatchRecord {
                catcher_id: catcher.id().to_owned(),
                category: catcher.category().to_owned(),
                sub_category: catcher.sub_category().to_owned(),
                file_name: file_name.to_owned(),
                match_count,
                detail_captures,
            });
        }

        records
    }
}
