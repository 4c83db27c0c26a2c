/// Result type for batcher operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Contract violations reported by [`SpriteBatcher::flush`](crate::SpriteBatcher::flush).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The shader effect passed to a flush has already been disposed.
    #[error("Cannot flush with disposed shader effect '{effect}'")]
    EffectDisposed {
        /// Name of the disposed effect.
        effect: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BatchError::EffectDisposed {
            effect: "bloom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot flush with disposed shader effect 'bloom'"
        );
    }
}
