use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Anything that can stop a file from becoming a module
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Import(#[from] graphql_imports::ImportError),

    #[error(transparent)]
    Document(#[from] graphql_document::DocumentError),
}
