use thiserror::Error;

/// Failure kinds for a single assignment run.
///
/// Every stage fails fast: the first error aborts the rest of the pipeline
/// and is reported by the top-level runner, which exits non-zero. There is no
/// fallback team on failure.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Required configuration or trigger context is missing or invalid.
    /// Raised before any GitHub call is made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No valid draw is possible: the candidate list is empty, or no
    /// candidate team has any distinct members.
    #[error("selection failed: {0}")]
    Selection(String),

    /// An external GitHub call failed. Not retried.
    #[error("{stage} failed: {cause:#}")]
    Collaborator {
        stage: &'static str,
        cause: anyhow::Error,
    },
}

impl AssignmentError {
    pub fn collaborator(stage: &'static str, cause: anyhow::Error) -> Self {
        Self::Collaborator { stage, cause }
    }
}
