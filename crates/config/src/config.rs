use crate::pattern::PatternSet;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Document glob used when a project declares none
pub const DEFAULT_DOCUMENTS: &str = "**/*.graphql";

/// Name of the implicit project in a single-project config
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: BTreeMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// All projects, by name. A single-project config yields `"default"`.
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects } => projects.get(name),
        }
    }

    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single GraphQL project.
///
/// Keys other tools read from a shared config (`schema` and so on) are
/// accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Document patterns (entry files to generate modules for)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<DocumentsConfig>,

    /// File patterns to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// File patterns to exclude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Tool-specific extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Document patterns, or [`DEFAULT_DOCUMENTS`] when none are declared.
    ///
    /// `include` patterns are added to the documents, as GraphQL config does.
    #[must_use]
    pub fn document_patterns(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = self
            .documents
            .as_ref()
            .map(DocumentsConfig::patterns)
            .unwrap_or_default();
        if let Some(include) = &self.include {
            patterns.extend(include.iter().map(String::as_str));
        }
        if patterns.is_empty() {
            patterns.push(DEFAULT_DOCUMENTS);
        }
        patterns
    }

    #[must_use]
    pub fn exclude_patterns(&self) -> Vec<&str> {
        self.exclude
            .as_ref()
            .map(|exclude| exclude.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Compile this project's document and exclude patterns.
    pub fn pattern_set(&self) -> Result<PatternSet> {
        PatternSet::new(self.document_patterns(), self.exclude_patterns())
    }

    /// Loader options from `extensions.loader`, with defaults when absent.
    ///
    /// ```yaml
    /// extensions:
    ///   loader:
    ///     outputExtension: js
    ///     outDir: dist/graphql
    /// ```
    pub fn loader(&self) -> std::result::Result<LoaderExtension, serde_json::Error> {
        match self.extensions.as_ref().and_then(|ext| ext.get("loader")) {
            Some(value) => serde_json::from_value(value.clone()),
            None => Ok(LoaderExtension::default()),
        }
    }
}

/// Documents source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentsConfig {
    /// Single pattern
    Pattern(String),
    /// Multiple patterns
    Patterns(Vec<String>),
}

impl DocumentsConfig {
    #[must_use]
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            Self::Pattern(pattern) => vec![pattern.as_str()],
            Self::Patterns(patterns) => patterns.iter().map(String::as_str).collect(),
        }
    }
}

/// The `extensions.loader` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LoaderExtension {
    /// Appended to the source file name: `query.graphql` becomes `query.graphql.js`
    pub output_extension: String,

    /// Output root, relative to the config directory. Without it, modules are
    /// written next to their sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for LoaderExtension {
    fn default() -> Self {
        Self {
            output_extension: "js".to_string(),
            out_dir: None,
        }
    }
}

impl LoaderExtension {
    /// Where the module generated from `source` is written.
    ///
    /// With an `outDir`, the source's position under `root` is mirrored
    /// beneath it; sources outside `root` keep only their file name.
    #[must_use]
    pub fn output_path(&self, source: &Path, root: &Path) -> PathBuf {
        let mut file_name = source
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        file_name.push(".");
        file_name.push(&self.output_extension);

        match &self.out_dir {
            None => source.with_file_name(file_name),
            Some(out_dir) => {
                let relative_dir = source
                    .parent()
                    .and_then(|parent| parent.strip_prefix(root).ok())
                    .unwrap_or_else(|| Path::new(""));
                root.join(out_dir).join(relative_dir).join(file_name)
            }
        }
    }
}
