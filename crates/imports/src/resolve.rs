//! Concurrent discovery of every file reachable from an entry point.

use crate::parse::{parse_file, ParsedFile};
use crate::path::canonicalize_lexically;
use crate::{ImportError, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// Every parsed file of one resolution, keyed by normalized path.
///
/// Holds at most one [`ParsedFile`] per path, however many times or in
/// whatever cyclic pattern it was imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionCache {
    entry: PathBuf,
    files: BTreeMap<PathBuf, ParsedFile>,
}

impl ResolutionCache {
    /// Build a cache from already-parsed files.
    ///
    /// Later files with a path already present replace the earlier one.
    #[must_use]
    pub fn from_files(
        entry: impl Into<PathBuf>,
        files: impl IntoIterator<Item = ParsedFile>,
    ) -> Self {
        Self {
            entry: entry.into(),
            files: files
                .into_iter()
                .map(|file| (file.file_path.clone(), file))
                .collect(),
        }
    }

    #[must_use]
    pub fn entry(&self) -> &Path {
        &self.entry
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&ParsedFile> {
        self.files.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in a fixed order: the entry first, then the rest by path.
    pub fn files(&self) -> impl Iterator<Item = &ParsedFile> {
        let entry = self.files.get(&self.entry);
        entry.into_iter().chain(
            self.files
                .values()
                .filter(move |file| file.file_path != self.entry),
        )
    }
}

/// Parse `entry` and every file it transitively imports.
///
/// Each newly discovered file gets its own task; reads run concurrently and
/// may finish in any order. The cache and the scheduled set are only touched
/// by this driver loop. The first failure aborts the whole resolution, and
/// dropping the task set cancels reads still in flight.
#[tracing::instrument(skip(entry), fields(entry = %entry.display()))]
pub async fn resolve_imports(entry: &Path) -> Result<ResolutionCache> {
    let entry = canonicalize_lexically(entry).map_err(|source| ImportError::Io {
        path: entry.to_path_buf(),
        source,
    })?;

    let mut files = BTreeMap::new();
    let mut scheduled = HashSet::from([entry.clone()]);
    let mut tasks = JoinSet::new();
    tasks.spawn(parse_file(entry.clone()));

    while let Some(joined) = tasks.join_next().await {
        let parsed = joined??;

        for import in &parsed.imports {
            if scheduled.insert(import.absolute_path.clone()) {
                tracing::trace!(
                    from = %parsed.file_path.display(),
                    import = %import.absolute_path.display(),
                    "Scheduling import"
                );
                tasks.spawn(parse_file(import.absolute_path.clone()));
            } else {
                tracing::trace!(import = %import.absolute_path.display(), "Import already scheduled");
            }
        }

        files.insert(parsed.file_path.clone(), parsed);
    }

    tracing::info!(files = files.len(), "Resolved imports");
    Ok(ResolutionCache { entry, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_source;

    #[test]
    fn test_files_yields_entry_first() {
        let cache = ResolutionCache::from_files(
            "/p/z.graphql",
            [
                parse_source(Path::new("/p/a.graphql"), "fragment A on T { id }"),
                parse_source(Path::new("/p/z.graphql"), "query Z { z }"),
                parse_source(Path::new("/p/m.graphql"), "fragment M on T { id }"),
            ],
        );

        let order: Vec<_> = cache.files().map(|f| f.file_path.clone()).collect();
        assert_eq!(
            order,
            vec![
                PathBuf::from("/p/z.graphql"),
                PathBuf::from("/p/a.graphql"),
                PathBuf::from("/p/m.graphql"),
            ]
        );
    }

    #[test]
    fn test_from_files_keeps_one_file_per_path() {
        let cache = ResolutionCache::from_files(
            "/p/a.graphql",
            [
                parse_source(Path::new("/p/a.graphql"), "query First { a }"),
                parse_source(Path::new("/p/a.graphql"), "query Second { a }"),
            ],
        );

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(Path::new("/p/a.graphql")).map(|f| f.body.as_str()),
            Some("query Second { a }")
        );
    }
}
