use thiserror::Error;

/// Closed set of failure classes for the text-generation backend. The retry
/// wrapper inspects the variant to decide eligibility.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),
    #[error("model error: {0}")]
    Model(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("content policy violation: {0}")]
    ContentPolicy(String),
    #[error("network error: {0}")]
    Network(String),
}

impl AiError {
    /// Authentication, validation and content-policy failures will not get
    /// better on a retry; everything else is treated as transient.
    pub fn is_transient(&self) -> bool {
        !matches!(
            self,
            AiError::Authentication(_) | AiError::Validation(_) | AiError::ContentPolicy(_)
        )
    }
}
