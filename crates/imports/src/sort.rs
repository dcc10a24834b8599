//! Dependency ordering of parsed files.

use crate::parse::ParsedFile;
use crate::resolve::ResolutionCache;
use std::collections::HashSet;
use std::path::Path;

/// Order files so that each one follows every file it imports.
///
/// Depth-first post-order from the entry, then from the remaining files in
/// the cache's fixed order. A file is visited at most once, so an import
/// cycle terminates, but the edge that closes the cycle is not honored: in
/// `A -> B -> A` starting at `A`, `B` is placed before `A` even though `B`
/// imports `A`.
#[must_use]
pub fn sort_files(cache: &ResolutionCache) -> Vec<&ParsedFile> {
    let mut visited = HashSet::with_capacity(cache.len());
    let mut sorted = Vec::with_capacity(cache.len());

    for file in cache.files() {
        visit(cache, file, &mut visited, &mut sorted);
    }

    sorted
}

fn visit<'a>(
    cache: &'a ResolutionCache,
    file: &'a ParsedFile,
    visited: &mut HashSet<&'a Path>,
    sorted: &mut Vec<&'a ParsedFile>,
) {
    if !visited.insert(file.file_path.as_path()) {
        return;
    }

    for import in &file.imports {
        if let Some(imported) = cache.get(&import.absolute_path) {
            visit(cache, imported, visited, sorted);
        } else {
            tracing::trace!(
                import = %import.absolute_path.display(),
                "Import not in cache, skipping"
            );
        }
    }

    sorted.push(file);
}
