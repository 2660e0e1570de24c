//! catcher 정의 타입 -- 파일/코드에서 선언하는 원본 형태
//!
//! [`CatcherDef`]는 컴파일 전의 선언 데이터입니다.
//! 실제 매칭에는 [`Catcher`](super::registry::Catcher)로 컴파일된 값을 사용합니다.

use serde::{Deserialize, Serialize};

/// catcher 정의
///
/// TOML 파일에서는 `[[catcher]]` 테이블 배열로 선언합니다.
///
/// ```toml
/// [[catcher]]
/// id = "outbound-http"
/// category = "OUTBOUND"
/// sub_category = "HTTP"
/// primary_pattern = 'new\s+HttpRequest'
///
/// [[catcher.details]]
/// name = "endPoint"
/// pattern = 'setEndpoint\((?P<value>.*?);'
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatcherDef {
    /// 레지스트리 내 고유 ID
    pub id: String,
    /// 최상위 분류 (리포트의 `type`)
    pub category: String,
    /// 하위 분류 (리포트의 `subType`)
    pub sub_category: String,
    /// 파일 전체 텍스트에 적용되는 primary 정규식
    pub primary_pattern: String,
    /// detail 추출기 목록 (선언 순서 유지)
    #[serde(default)]
    pub details: Vec<DetailDef>,
}

/// detail 추출기 정의
///
/// `pattern`은 이름이 `value`인 캡처 그룹을 반드시 포함해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailDef {
    pub name: String,
    pub pattern: String,
}

impl DetailDef {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// catcher 정의 파일의 최상위 구조
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatcherFile {
    #[serde(default, rename = "catcher")]
    pub catchers: Vec<CatcherDef>,
}
