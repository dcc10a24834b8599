use crate::{FileFilter, Result};
use graphql_document::DocumentTransform;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// How a [`Loader`] picks files and rewrites their documents
#[derive(Clone, Default)]
pub struct LoaderOptions {
    pub filter: FileFilter,
    /// Applied to every document before it is serialized
    pub transform: Option<Arc<dyn DocumentTransform>>,
}

impl LoaderOptions {
    #[must_use]
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl DocumentTransform + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("filter", &self.filter)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Turns `.graphql` entry files into JavaScript module text.
///
/// A build tool asks [`Loader::matches`] (or just calls [`Loader::load`])
/// for every file it sees and uses the returned text as the module contents.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoaderOptions,
}

impl Loader {
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.options.filter.matches(path)
    }

    /// Generate the module for `path`, or `None` when the filter rejects it.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn load(&self, path: &Path) -> Result<Option<String>> {
        if !self.matches(path) {
            tracing::trace!("Skipping file rejected by filter");
            return Ok(None);
        }

        let source = graphql_imports::generate_graphql_string(path).await?;
        let module = graphql_document::generate_module(&source, self.options.transform.as_deref())?;
        tracing::debug!(bytes = module.len(), "Loaded GraphQL module");
        Ok(Some(module))
    }
}
