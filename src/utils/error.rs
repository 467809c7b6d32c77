use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// The backend answered with a non-success status. Displays as the
    /// status reason phrase only, which is what ends up in the page.
    #[error("{status}")]
    Request { status: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid resource path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DashboardError {
    pub fn request(status: reqwest::StatusCode) -> Self {
        let status = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        Self::Request { status }
    }

    /// True for the errors a load cycle can end with.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Transport(_) | Self::InvalidPath { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
