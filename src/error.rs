use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsanaError {
    #[error("Asana is unreachable and no cached copy exists: {0}")]
    RemoteUnavailable(String),

    #[error("Task not found in any cached project: {0}")]
    TaskNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Asana API error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Not configured: missing {0}. Run 'asana-tool config set <key> <value>' first.")]
    NotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AsanaError {
    /// True when the remote service could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AsanaError::RemoteUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, AsanaError>;
