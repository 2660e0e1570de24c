//! catcher 모듈 -- 패턴 정의 모델, 레지스트리, 로더
//!
//! # 구성
//!
//! - [`types`]: 선언 형태 (`CatcherDef`, `DetailDef`, `CatcherFile`)
//! - [`registry`]: 컴파일된 불변 레지스트리 (`CatcherRegistry`, `Catcher`)
//! - [`loader`]: TOML 정의 파일 로더 (`CatcherLoader`)
//! - [`builtin`]: 내장 catcher 세트

pub mod builtin;
pub mod loader;
pub mod registry;
pub mod types;

pub use builtin::builtin_defs;
pub use loader::CatcherLoader;
pub use registry::{Catcher, CatcherRegistry, DetailExtractor, VALUE_GROUP};
pub use types::{CatcherDef, CatcherFile, DetailDef};
