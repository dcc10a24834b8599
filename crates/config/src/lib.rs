//! # GraphQL Config
//!
//! Discovers and loads `.graphqlrc` files and reads the loader's options
//! from a project's `extensions.loader` block.

mod config;
mod error;
mod loader;
mod pattern;

pub use config::{
    DocumentsConfig, GraphQLConfig, LoaderExtension, ProjectConfig, DEFAULT_DOCUMENTS,
    DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
pub use pattern::PatternSet;
