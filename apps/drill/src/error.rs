//! Error handling for the drill service

use review_queue::QueueError;
use thiserror::Error;

/// State store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Review service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not enrolled: {0}")]
    NotEnrolled(String),

    #[error("Already enrolled: {0}")]
    AlreadyEnrolled(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// True when the learner has simply run out of questions.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Queue(QueueError::Exhausted))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use review_queue::Corruption;

    #[test]
    fn test_error_display_not_enrolled() {
        let error = ServiceError::NotEnrolled("ada".to_string());
        assert_eq!(error.to_string(), "Not enrolled: ada");
    }

    #[test]
    fn test_error_display_already_enrolled() {
        let error = ServiceError::AlreadyEnrolled("ada".to_string());
        assert_eq!(error.to_string(), "Already enrolled: ada");
    }

    #[test]
    fn test_queue_errors_pass_through() {
        let error = ServiceError::from(QueueError::CorruptState(Corruption::SelfLink { index: 2 }));
        assert_eq!(
            error.to_string(),
            "corrupt queue state: item 2 links to itself"
        );
        assert!(!error.is_exhausted());
    }

    #[test]
    fn test_exhausted_detection() {
        assert!(ServiceError::from(QueueError::Exhausted).is_exhausted());
    }

    #[test]
    fn test_store_error_display() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ServiceError::from(StoreError::from(io));
        assert_eq!(error.to_string(), "Store error: IO error: denied");
    }
}
