//! # GraphQL Document
//!
//! Turns assembled GraphQL source into a JavaScript module exporting its
//! document node.
//!
//! ```rust,ignore
//! let module = graphql_document::generate_module(&source, None)?;
//! ```
//!
//! - [`parse_document`] parses source into [`ast::Document`]
//! - [`FragmentTable`] and [`fragments_for_operation`] compute the fragments
//!   each operation needs
//! - [`to_document_node_string`] writes a node as a JavaScript literal
//! - [`generate_module`] ties these together

pub mod ast;
mod codegen;
mod error;
mod fragments;
mod lower;
pub mod serialize;

pub use codegen::{generate_module, DocumentTransform};
pub use error::{BoxError, DocumentError, Result};
pub use fragments::{collect_fragment_references, fragments_for_operation, FragmentTable};
pub use lower::parse_document;
pub use serialize::{to_document_node_string, UndefinedFormatter};
