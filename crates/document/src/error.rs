use thiserror::Error;

/// Error type a [`crate::DocumentTransform`] may return
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from turning assembled GraphQL text into a module
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("GraphQL syntax error: {message}")]
    Parse { message: String },

    #[error("Unknown fragment \"{name}\"")]
    MissingFragment { name: String },

    #[error("Fragment \"{name}\" spreads itself")]
    FragmentCycle { name: String },

    #[error("Failed to serialize document node: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Transform(BoxError),
}

pub type Result<T> = std::result::Result<T, DocumentError>;
