//! State management-specific error types.

/// Errors that can occur during state operations. The orchestrator's design
/// philosophy is to degrade visually rather than fail, so most invalid
/// operations are silently skipped; these variants cover the cases that are
/// still worth surfacing to callers.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The emblem geometry has not finished loading
    #[error("Emblem geometry not loaded")]
    #[allow(dead_code)]
    GeometryNotLoaded,

    /// Content event channel disconnected
    #[error("Content channel disconnected")]
    ContentChannelClosed,

    /// Phase value outside the sequence range
    #[error("Invalid phase: {0}")]
    #[allow(dead_code)]
    InvalidPhase(u8),

    /// Generic state error
    #[error("State error: {0}")]
    #[allow(dead_code)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::GeometryNotLoaded;
        assert!(error.to_string().contains("not loaded"));

        let error = StateError::ContentChannelClosed;
        assert!(error.to_string().contains("disconnected"));

        let error = StateError::InvalidPhase(27);
        assert!(error.to_string().contains("27"));

        let error = StateError::Other("Generic error".to_string());
        assert!(error.to_string().contains("Generic error"));
    }
}
