//! # GraphQL Imports
//!
//! Resolves `#import "./other.graphql"` directives across a tree of GraphQL
//! files and stitches the bodies together into a single source string in
//! dependency order.
//!
//! ```rust,ignore
//! let source = graphql_imports::generate_graphql_string(Path::new("src/query.graphql")).await?;
//! ```
//!
//! The pipeline is:
//! - [`parse_file`] splits one file into its import header and body
//! - [`resolve_imports`] discovers every reachable file exactly once
//! - [`sort_files`] orders files so imports come before importers
//! - [`assemble`] joins the ordered bodies

mod assemble;
mod error;
mod parse;
mod path;
mod resolve;
mod sort;

pub use assemble::assemble;
pub use error::{ImportError, Result};
pub use parse::{parse_file, parse_source, ImportParser, ImportReference, ParsedFile};
pub use path::{normalize, resolve_import_path};
pub use resolve::{resolve_imports, ResolutionCache};
pub use sort::sort_files;

use std::path::Path;

/// Resolve `entry` and its imports into one GraphQL source string.
pub async fn generate_graphql_string(entry: &Path) -> Result<String> {
    let cache = resolve_imports(entry).await?;
    let ordered = sort_files(&cache);
    Ok(assemble(&ordered))
}
