use anyhow::{Context, Result};
use graphql_config::{
    find_config, load_config, ConfigError, GraphQLConfig, LoaderExtension, ProjectConfig,
    DEFAULT_PROJECT,
};
use graphql_loader::{FileFilter, Loader, LoaderOptions};
use std::path::{Path, PathBuf};

/// The selected project and the directory its patterns are relative to
#[derive(Debug)]
pub struct CommandContext {
    pub project_name: String,
    pub project: ProjectConfig,
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load config and select a project.
    ///
    /// Without `--config`, the config is searched for from the current
    /// directory upwards; when there is none, the current directory is used
    /// with default settings.
    pub fn load(config_path: Option<PathBuf>, project_name: Option<&str>) -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to read current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(&current_dir).context("Failed to search for config")?,
        };

        let Some(config_path) = config_path else {
            tracing::debug!(dir = %current_dir.display(), "No config found, using defaults");
            if let Some(name) = project_name.filter(|name| *name != DEFAULT_PROJECT) {
                return Err(ConfigError::NotFound(current_dir))
                    .with_context(|| format!("Project '{name}' requested without a config file"));
            }
            return Ok(Self {
                project_name: DEFAULT_PROJECT.to_string(),
                project: ProjectConfig::default(),
                base_dir: current_dir,
            });
        };

        let config = load_config(&config_path).context("Failed to load config")?;
        let (name, project) = select_project(&config, project_name, &config_path)?;

        let base_dir = config_path
            .parent()
            .map_or_else(|| current_dir.clone(), Path::to_path_buf);
        let base_dir = if base_dir.as_os_str().is_empty() {
            current_dir
        } else {
            std::path::absolute(&base_dir).context("Failed to resolve config directory")?
        };

        Ok(Self {
            project_name: name.to_string(),
            project: project.clone(),
            base_dir,
        })
    }

    pub fn loader_extension(&self) -> Result<LoaderExtension> {
        self.project
            .loader()
            .with_context(|| format!("Invalid extensions.loader in project '{}'", self.project_name))
    }

    /// A loader that accepts this project's documents.
    pub fn loader(&self) -> Result<Loader> {
        let filter = FileFilter::from_project(&self.project, &self.base_dir)?;
        Ok(Loader::new(LoaderOptions::default().with_filter(filter)))
    }
}

/// Pick the requested project, or the only/default one.
///
/// A multi-project config needs `--project` unless it has a project named
/// `default`.
fn select_project<'a>(
    config: &'a GraphQLConfig,
    requested: Option<&str>,
    config_path: &Path,
) -> Result<(&'a str, &'a ProjectConfig), ConfigError> {
    let name = requested.unwrap_or(DEFAULT_PROJECT);
    config
        .projects()
        .find(|(project_name, _)| *project_name == name)
        .ok_or_else(|| {
            let available: Vec<&str> = config.projects().map(|(name, _)| name).collect();
            let message = if requested.is_none() && config.is_multi_project() {
                format!(
                    "Multi-project configuration requires --project (available: {})",
                    available.join(", ")
                )
            } else {
                format!(
                    "Project '{name}' not found (available: {})",
                    available.join(", ")
                )
            };
            ConfigError::Invalid {
                path: config_path.to_path_buf(),
                message,
            }
        })
}
