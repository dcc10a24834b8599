use graphql_config::{PatternSet, ProjectConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File suffix the default filter accepts
pub const GRAPHQL_SUFFIX: &str = ".graphql";

type Predicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Decides which files the loader handles.
#[derive(Clone)]
pub struct FileFilter(Matcher);

#[derive(Clone)]
enum Matcher {
    Suffix(String),
    Globs { patterns: PatternSet, root: PathBuf },
    Custom(Predicate),
}

impl FileFilter {
    /// Paths whose name ends with `suffix`.
    #[must_use]
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self(Matcher::Suffix(suffix.into()))
    }

    /// Paths under `root` matching an include glob and no exclude glob.
    pub fn globs<I, E>(
        include: I,
        exclude: E,
        root: impl Into<PathBuf>,
    ) -> graphql_config::Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self(Matcher::Globs {
            patterns: PatternSet::new(include, exclude)?,
            root: root.into(),
        }))
    }

    /// The document and exclude patterns of a config project.
    pub fn from_project(
        project: &ProjectConfig,
        root: impl Into<PathBuf>,
    ) -> graphql_config::Result<Self> {
        Ok(Self(Matcher::Globs {
            patterns: project.pattern_set()?,
            root: root.into(),
        }))
    }

    #[must_use]
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self(Matcher::Custom(Arc::new(predicate)))
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match &self.0 {
            Matcher::Suffix(suffix) => path.to_string_lossy().ends_with(suffix.as_str()),
            Matcher::Globs { patterns, root } => patterns.matches(path, root),
            Matcher::Custom(predicate) => predicate(path),
        }
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::suffix(GRAPHQL_SUFFIX)
    }
}

impl fmt::Debug for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Matcher::Suffix(suffix) => f.debug_tuple("Suffix").field(suffix).finish(),
            Matcher::Globs { patterns, root } => f
                .debug_struct("Globs")
                .field("patterns", patterns)
                .field("root", root)
                .finish(),
            Matcher::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_graphql_suffix() {
        let filter = FileFilter::default();
        assert!(filter.matches(Path::new("src/query.graphql")));
        assert!(!filter.matches(Path::new("src/query.gql")));
        assert!(!filter.matches(Path::new("src/query.graphql.js")));
    }

    #[test]
    fn test_globs() {
        let filter =
            FileFilter::globs(["src/**/*.{graphql,gql}"], ["**/ignored/**"], "/repo").unwrap();
        assert!(filter.matches(Path::new("/repo/src/a.gql")));
        assert!(filter.matches(Path::new("/repo/src/deep/a.graphql")));
        assert!(!filter.matches(Path::new("/repo/src/ignored/a.graphql")));
        assert!(!filter.matches(Path::new("/other/src/a.graphql")));
    }

    #[test]
    fn test_custom() {
        let filter = FileFilter::custom(|path| path.starts_with("/allowed"));
        assert!(filter.matches(Path::new("/allowed/x.txt")));
        assert!(!filter.matches(Path::new("/denied/x.graphql")));
        assert_eq!(format!("{filter:?}"), "Custom(..)");
    }
}
