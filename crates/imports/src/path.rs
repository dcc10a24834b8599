//! Lexical path handling for import targets.
//!
//! Import identity is purely lexical: `./a/../b.graphql` and `b.graphql` name
//! the same file, but symlinks are not followed and the target does not need
//! to exist yet.

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` segments without touching the filesystem.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Resolve an import written in `importer` against the importer's directory.
///
/// A leading `/` in the written path does not escape the importer's
/// directory; the path is always appended segment by segment.
#[must_use]
pub fn resolve_import_path(importer: &Path, written: &str) -> PathBuf {
    let mut joined = importer
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);

    for component in Path::new(written).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {}
            other => joined.push(other.as_os_str()),
        }
    }

    normalize(&joined)
}

/// Make `path` absolute against the working directory and normalize it.
pub fn canonicalize_lexically(path: &Path) -> std::io::Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c.graphql")),
            PathBuf::from("/a/c.graphql")
        );
    }

    #[test]
    fn test_normalize_keeps_leading_parent_segments() {
        assert_eq!(
            normalize(Path::new("../../x.graphql")),
            PathBuf::from("../../x.graphql")
        );
    }

    #[test]
    fn test_normalize_parent_at_root() {
        assert_eq!(normalize(Path::new("/../x.graphql")), PathBuf::from("/x.graphql"));
    }

    #[test]
    fn test_normalize_empty_is_current_dir() {
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_sibling() {
        assert_eq!(
            resolve_import_path(Path::new("/src/a.graphql"), "./b.graphql"),
            PathBuf::from("/src/b.graphql")
        );
    }

    #[test]
    fn test_resolve_parent_directory() {
        assert_eq!(
            resolve_import_path(Path::new("/src/queries/a.graphql"), "../fragments/f.graphql"),
            PathBuf::from("/src/fragments/f.graphql")
        );
    }

    #[test]
    fn test_resolve_leading_slash_stays_relative() {
        assert_eq!(
            resolve_import_path(Path::new("/src/a.graphql"), "/shared/b.graphql"),
            PathBuf::from("/src/shared/b.graphql")
        );
    }

    #[test]
    fn test_resolve_from_bare_file_name() {
        assert_eq!(
            resolve_import_path(Path::new("a.graphql"), "./b.graphql"),
            PathBuf::from("b.graphql")
        );
    }
}
