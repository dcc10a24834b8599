//! # GraphQL Loader
//!
//! Loads `.graphql` files that use `#import "./other.graphql"` directives and
//! produces JavaScript module text exporting the parsed document node.
//!
//! ```rust,ignore
//! use graphql_loader::{Loader, LoaderOptions};
//!
//! let loader = Loader::new(LoaderOptions::default());
//! if let Some(module) = loader.load(Path::new("src/user.graphql")).await? {
//!     // `module` is the contents of `src/user.graphql` as seen by the bundler
//! }
//! ```
//!
//! The generated module has a default export with the whole document and a
//! named export per named operation:
//!
//! ```text
//! const documentNode = {"kind":"Document",...};
//! export const GetUser = {"kind":"Document",...};
//! export default documentNode;
//! ```

mod error;
mod filter;
mod loader;

pub use error::{LoadError, Result};
pub use filter::{FileFilter, GRAPHQL_SUFFIX};
pub use loader::{Loader, LoaderOptions};

pub use graphql_document::{
    ast, generate_module, BoxError, DocumentError, DocumentTransform,
};
pub use graphql_imports::{generate_graphql_string, ImportError};

/// Generate module text from already-assembled GraphQL source.
pub fn generate_contents_from_graphql_string(
    graphql: &str,
    transform: Option<&dyn DocumentTransform>,
) -> std::result::Result<String, DocumentError> {
    generate_module(graphql, transform)
}
