use crate::{ConfigError, GraphQLConfig, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphqlrc.yml",
    ".graphqlrc.yaml",
    ".graphqlrc.json",
    ".graphqlrc",
    "graphql.config.yml",
    "graphql.config.yaml",
    "graphql.config.json",
];

/// Find a GraphQL config file by walking up from `start_dir`.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.exists() && config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a GraphQL config from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        projects = config.project_count(),
        multi_project = config.is_multi_project(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a GraphQL config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        "" if file_name == ".graphqlrc" => {
            // No extension: YAML is a superset in practice, JSON second
            tracing::trace!("Trying YAML then JSON for .graphqlrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Validate the loaded configuration
#[tracing::instrument(skip(config, path), fields(path = %path.display(), projects = config.project_count()))]
fn validate_config(config: &GraphQLConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    for (project_name, project_config) in config.projects() {
        tracing::trace!(project = project_name, "Validating project config");

        if let Some(ref documents) = project_config.documents {
            let doc_patterns = documents.patterns();
            if doc_patterns.is_empty() {
                return Err(invalid(format!(
                    "Project '{project_name}' has empty documents configuration"
                )));
            }
            if doc_patterns.iter().any(|pattern| pattern.trim().is_empty()) {
                return Err(invalid(format!(
                    "Project '{project_name}' has empty document pattern"
                )));
            }
        }

        if project_config
            .exclude_patterns()
            .iter()
            .any(|pattern| pattern.trim().is_empty())
        {
            return Err(invalid(format!(
                "Project '{project_name}' has empty exclude pattern"
            )));
        }

        project_config.pattern_set()?;

        let loader = project_config.loader().map_err(|e| {
            invalid(format!(
                "Project '{project_name}' has invalid extensions.loader: {e}"
            ))
        })?;
        let extension = loader.output_extension.trim_start_matches('.');
        if extension.trim().is_empty() {
            return Err(invalid(format!(
                "Project '{project_name}' has empty outputExtension"
            )));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml_single_project() {
        let file = write_config(
            ".yml",
            r#"
schema: "schema.graphql"
documents: "src/**/*.graphql"
extensions:
  loader:
    outputExtension: mjs
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert!(!config.is_multi_project());
        let project = config.get_project("default").unwrap();
        assert_eq!(project.document_patterns(), vec!["src/**/*.graphql"]);
        assert_eq!(project.loader().unwrap().output_extension, "mjs");
    }

    #[test]
    fn test_load_yaml_multi_project() {
        let file = write_config(
            ".yaml",
            r#"
projects:
  web:
    documents: "web/**/*.graphql"
  mobile:
    documents:
      - "mobile/**/*.graphql"
      - "shared/**/*.graphql"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert!(config.is_multi_project());
        assert_eq!(config.project_count(), 2);
        assert_eq!(
            config.get_project("mobile").unwrap().document_patterns().len(),
            2
        );
    }

    #[test]
    fn test_load_json_single_project() {
        let file = write_config(
            ".json",
            r#"{ "documents": "**/*.graphql", "extensions": { "loader": { "outDir": "dist" } } }"#,
        );

        let config = load_config(file.path()).unwrap();
        let loader = config.get_project("default").unwrap().loader().unwrap();
        assert_eq!(loader.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(loader.output_extension, "js");
    }

    #[test]
    fn test_graphqlrc_without_extension_accepts_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".graphqlrc");
        fs::write(&path, r#"{"documents": ["a/*.graphql"]}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.get_project("default").is_some());
    }

    #[test]
    fn test_unsupported_format() {
        let result = load_config_from_str("documents = 'x'", Path::new("graphql.config.toml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validation_empty_document_pattern() {
        let file = write_config(".yml", "documents: \"\"\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_empty_output_extension() {
        let file = write_config(
            ".yml",
            r#"
extensions:
  loader:
    outputExtension: ""
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty outputExtension"));
    }

    #[test]
    fn test_validation_unknown_loader_key() {
        let file = write_config(
            ".yml",
            r#"
extensions:
  loader:
    outputDirectory: dist
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("extensions.loader"));
    }

    #[test]
    fn test_validation_bad_glob() {
        let file = write_config(".yml", "documents: \"src/[*.graphql\"\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Pattern { .. })));
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".graphqlrc.yml");
        fs::write(&config_path, "documents: \"**/*.graphql\"").unwrap();

        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".graphqlrc.yml");
        fs::write(&config_path, "documents: \"**/*.graphql\"").unwrap();

        let sub_dir = temp_dir.path().join("src").join("queries");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".graphqlrc.yml"), "documents: a.graphql").unwrap();
        fs::write(
            temp_dir.path().join("graphql.config.json"),
            r#"{"documents": "b.graphql"}"#,
        )
        .unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".graphqlrc.yml");
    }
}
