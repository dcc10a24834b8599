//! # GraphQL Test Utilities
//!
//! Shared test infrastructure for the loader crates.
//!
//! ```ignore
//! use graphql_test_utils::TestProject;
//!
//! let project = TestProject::new()
//!     .with_file("fragments.graphql", "fragment UserFields on User { id name }")
//!     .with_file("query.graphql", "#import \"./fragments.graphql\"\nquery { user { ...UserFields } }");
//!
//! let entry = project.path("query.graphql");
//! ```

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::new_without_default)]

pub mod fixtures;
mod project;

pub use project::TestProject;
