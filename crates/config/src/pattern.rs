//! Include/exclude glob matching relative to a project root.

use crate::{ConfigError, Result};
use std::path::Path;

/// Compiled include and exclude globs.
///
/// A path matches when it is under `root`, matches no exclude pattern and
/// matches at least one include pattern.
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl PatternSet {
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Match a path given relative to the project root.
    #[must_use]
    pub fn matches_relative(&self, relative: &str) -> bool {
        let options = glob::MatchOptions {
            require_literal_separator: true,
            ..glob::MatchOptions::default()
        };
        if self
            .exclude
            .iter()
            .any(|pattern| pattern.matches_with(relative, options))
        {
            tracing::trace!(path = relative, "Excluded by pattern");
            return false;
        }
        self.include
            .iter()
            .any(|pattern| pattern.matches_with(relative, options))
    }

    /// Match an absolute path against patterns rooted at `root`.
    #[must_use]
    pub fn matches(&self, path: &Path, root: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            tracing::trace!(path = %path.display(), "Outside project root");
            return false;
        };
        self.matches_relative(&relative.to_string_lossy().replace('\\', "/"))
    }

    /// The include patterns, for walking the file system.
    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(glob::Pattern::as_str)
    }
}

fn compile<P>(patterns: P) -> Result<Vec<glob::Pattern>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let mut compiled = Vec::new();
    for pattern in patterns {
        for expanded in expand_braces(pattern.as_ref()) {
            let glob = glob::Pattern::new(&expanded).map_err(|source| ConfigError::Pattern {
                pattern: expanded.clone(),
                source,
            })?;
            compiled.push(glob);
        }
    }
    Ok(compiled)
}

/// Strip `./` and `/` prefixes and collapse doubled slashes.
pub(crate) fn normalize_pattern(pattern: &str) -> String {
    let mut normalized = pattern.trim();
    normalized = normalized.strip_prefix("./").unwrap_or(normalized);
    normalized = normalized.strip_prefix('/').unwrap_or(normalized);

    let mut result = normalized.to_string();
    while result.contains("//") {
        result = result.replace("//", "/");
    }
    result
}

/// Expand a single brace group, so `src/*.{graphql,gql}` becomes two patterns.
pub(crate) fn expand_braces(pattern: &str) -> Vec<String> {
    let normalized = normalize_pattern(pattern);

    if let (Some(start), Some(end)) = (normalized.find('{'), normalized.find('}')) {
        if start < end {
            let before = &normalized[..start];
            let after = &normalized[end + 1..];
            return normalized[start + 1..end]
                .split(',')
                .map(|option| format!("{before}{}{after}", option.trim()))
                .collect();
        }
    }

    vec![normalized]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pattern() {
        assert_eq!(normalize_pattern("./src/**/*.graphql"), "src/**/*.graphql");
        assert_eq!(normalize_pattern("/src//a.graphql"), "src/a.graphql");
    }

    #[test]
    fn test_expand_braces() {
        assert_eq!(
            expand_braces("src/*.{graphql, gql}"),
            vec!["src/*.graphql", "src/*.gql"]
        );
        assert_eq!(expand_braces("src/*.graphql"), vec!["src/*.graphql"]);
    }

    #[test]
    fn test_exclude_wins() {
        let set = PatternSet::new(["**/*.graphql"], ["**/generated/**"]).unwrap();
        assert!(set.matches_relative("src/query.graphql"));
        assert!(!set.matches_relative("src/generated/query.graphql"));
        assert!(!set.matches_relative("src/query.ts"));
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let set = PatternSet::new(["src/*.graphql"], Vec::<String>::new()).unwrap();
        assert!(set.matches_relative("src/a.graphql"));
        assert!(!set.matches_relative("src/nested/a.graphql"));
    }

    #[test]
    fn test_matches_absolute_under_root() {
        let set = PatternSet::new(["**/*.graphql"], Vec::<String>::new()).unwrap();
        let root = Path::new("/project");
        assert!(set.matches(Path::new("/project/src/a.graphql"), root));
        assert!(!set.matches(Path::new("/elsewhere/a.graphql"), root));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PatternSet::new(["src/[.graphql"], Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { pattern, .. } if pattern == "src/[.graphql"));
    }
}
