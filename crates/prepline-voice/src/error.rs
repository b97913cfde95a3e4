//! Error types for the voice engine.

use prepline_core::PrepError;

/// Errors from executing voice actions.
///
/// Query answering itself never fails; only applying an action to a
/// completion set can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("step {index} is out of range for a timeline with {step_count} steps")]
    StepOutOfRange { index: usize, step_count: usize },
    #[error("core error: {0}")]
    Core(#[from] PrepError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_error_display() {
        let err = VoiceError::StepOutOfRange {
            index: 9,
            step_count: 4,
        };
        assert_eq!(
            err.to_string(),
            "step 9 is out of range for a timeline with 4 steps"
        );
    }

    #[test]
    fn test_voice_error_from_prep_error() {
        let err: VoiceError = PrepError::Config("bad".into()).into();
        assert!(matches!(err, VoiceError::Core(_)));
        assert!(err.to_string().contains("bad"));
    }
}
