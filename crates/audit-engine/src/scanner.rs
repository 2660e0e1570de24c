//! 파일 스캐너 -- 대상 파일 탐색, 소스 로딩, 마커 필터
//!
//! # 처리 흐름
//!
//! ```text
//! root --> FileScanner::enumerate (include glob, ignore globs)
//!            |
//!            v
//!        SourceFile --> load_source (크기 상한, UTF-8) --> SourceFilter::classify
//!                                                             |
//!                                                             v
//!                                                        매칭 대상 텍스트
//! ```
//!
//! 개별 파일 실패는 [`SkippedFile`]로 기록되고 스캔은 계속됩니다.

use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobMatcher, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use callaudit_core::pipeline::SourceReader;

use crate::error::AuditEngineError;
use crate::types::{SkipReason, SkippedFile};

/// 스캔 대상 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// 실제 파일 경로 (root와 결합된 경로)
    pub path: PathBuf,
    /// 스캔 루트 기준 상대 경로 (`/` 구분)
    pub file_name: String,
}

/// 탐색 결과
#[derive(Debug, Default)]
pub struct Enumeration {
    /// 바이트 순으로 정렬된 대상 파일
    pub files: Vec<SourceFile>,
    /// 탐색 중 읽지 못한 항목
    pub skipped: Vec<SkippedFile>,
}

/// glob 기반 파일 탐색기
pub struct FileScanner {
    include: GlobMatcher,
    ignores: GlobSet,
}

impl FileScanner {
    /// include glob과 ignore glob 목록으로 탐색기를 생성합니다.
    ///
    /// # Errors
    ///
    /// glob 문법이 잘못되면 `AuditEngineError::Config` 반환
    pub fn new(include: &str, ignores: &[String]) -> Result<Self, AuditEngineError> {
        let include = Glob::new(include)
            .map_err(|e| AuditEngineError::Config {
                field: "include".to_owned(),
                reason: format!("invalid glob '{include}': {e}"),
            })?
            .compile_matcher();

        let mut builder = GlobSetBuilder::new();
        for pattern in ignores {
            let glob = Glob::new(pattern).map_err(|e| AuditEngineError::Config {
                field: "ignore".to_owned(),
                reason: format!("invalid glob '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let ignores = builder.build().map_err(|e| AuditEngineError::Config {
            field: "ignore".to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { include, ignores })
    }

    /// 상대 경로가 ignore glob에 해당하는지 확인합니다.
    pub fn is_ignored(&self, relative: &str) -> bool {
        self.ignores.is_match(relative)
    }

    /// 상대 경로가 탐색 대상인지 확인합니다 (include 일치 + ignore 불일치).
    pub fn is_candidate(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.is_ignored(relative)
    }

    /// 루트 아래의 대상 파일을 탐색합니다 (동기 I/O).
    ///
    /// 심볼릭 링크는 따라가지 않습니다. ignore glob에 일치하는 디렉토리는
    /// 하위 탐색을 생략합니다. 결과는 상대 경로 기준으로 정렬됩니다.
    ///
    /// # Errors
    ///
    /// 루트가 존재하지 않거나 디렉토리가 아니면 `AuditEngineError::Io` 반환
    pub fn enumerate(&self, root: &Path) -> Result<Enumeration, AuditEngineError> {
        let metadata = std::fs::metadata(root).map_err(|e| AuditEngineError::Io {
            path: root.display().to_string(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(AuditEngineError::Io {
                path: root.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "scan root is not a directory",
                ),
            });
        }

        let mut enumeration = Enumeration::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                match entry.path().strip_prefix(root) {
                    Ok(rel) => !self.is_ignored(&relative_name(rel)),
                    Err(_) => true,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let file_name = e
                        .path()
                        .and_then(|p| p.strip_prefix(root).ok())
                        .map(relative_name)
                        .unwrap_or_else(|| root.display().to_string());
                    warn!(path = %file_name, error = %e, "failed to read directory entry");
                    enumeration.skipped.push(SkippedFile::new(
                        file_name,
                        SkipReason::Unreadable {
                            message: e.to_string(),
                        },
                    ));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let file_name = relative_name(rel);

            if self.is_candidate(&file_name) {
                enumeration.files.push(SourceFile {
                    path: entry.path().to_path_buf(),
                    file_name,
                });
            }
        }

        enumeration
            .files
            .sort_by(|a, b| a.file_name.cmp(&b.file_name));

        debug!(
            root = %root.display(),
            files = enumeration.files.len(),
            unreadable = enumeration.skipped.len(),
            "enumerated source files"
        );

        Ok(enumeration)
    }
}

/// 상대 경로를 `/` 구분 문자열로 변환합니다.
fn relative_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// 내용 기반 파일 필터
///
/// 제외 마커로 시작하거나 테스트 마커를 포함하는 파일을 매칭 전에 걸러냅니다.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    exclusion_marker: String,
    test_marker: String,
    ignore_case: bool,
}

impl SourceFilter {
    /// 빈 문자열 마커는 비활성으로 취급합니다. 테스트 마커는 대소문자를 구분합니다.
    pub fn new(exclusion_marker: impl Into<String>, test_marker: impl Into<String>) -> Self {
        Self {
            exclusion_marker: exclusion_marker.into(),
            test_marker: test_marker.into(),
            ignore_case: false,
        }
    }

    /// 테스트 마커를 ASCII 대소문자 무시로 비교합니다.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// 제외 사유를 반환합니다. 매칭 대상이면 `None`.
    pub fn classify(&self, text: &str) -> Option<SkipReason> {
        if !self.exclusion_marker.is_empty() && text.starts_with(&self.exclusion_marker) {
            return Some(SkipReason::ExclusionMarker);
        }

        if !self.test_marker.is_empty() {
            let found = if self.ignore_case {
                contains_ignore_ascii_case(text, &self.test_marker)
            } else {
                text.contains(self.test_marker.as_str())
            };
            if found {
                return Some(SkipReason::TestMarker);
            }
        }

        None
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// 파일 시스템 기반 [`SourceReader`]
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn read_text(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// 파일 내용을 읽습니다 (동기 I/O).
///
/// 크기 초과, I/O 실패, 잘못된 UTF-8은 [`SkipReason`]으로 반환되며
/// 호출자는 해당 파일만 건너뛰고 스캔을 계속합니다.
pub fn load_source(
    reader: &dyn SourceReader,
    file: &SourceFile,
    max_file_size: usize,
) -> Result<String, SkipReason> {
    let size = reader.size(&file.path).map_err(|e| SkipReason::Unreadable {
        message: e.to_string(),
    })?;

    let max = u64::try_from(max_file_size).unwrap_or(u64::MAX);
    if size > max {
        return Err(SkipReason::TooLarge { size, max });
    }

    reader
        .read_text(&file.path)
        .map_err(|e| SkipReason::Unreadable {
            message: e.to_string(),
        })
}
