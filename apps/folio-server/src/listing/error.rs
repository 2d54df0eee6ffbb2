#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Folder '{0}' does not exist")]
    NotFound(String),

    #[error("You do not have permission to read this folder")]
    Forbidden,

    #[error("{0}")]
    InvalidParameter(String),

    // The cause is logged by the HTTP layer, never sent to the caller.
    #[error("Internal Server Error")]
    Internal(#[from] std::io::Error),

    #[error("Server is shutting down")]
    ShuttingDown,
}

impl ListingError {
    pub fn invalid_count() -> Self {
        ListingError::InvalidParameter(
            "Invalid count parameter: Count must be a non-negative integer.".into(),
        )
    }

    /// Stable label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ListingError::NotFound(_) => "not_found",
            ListingError::Forbidden => "forbidden",
            ListingError::InvalidParameter(_) => "invalid_parameter",
            ListingError::Internal(_) => "internal",
            ListingError::ShuttingDown => "shutting_down",
        }
    }
}
