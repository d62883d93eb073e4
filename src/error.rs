//! Error types for pipeline evaluation.
//!
//! The engine itself can only fail in one way: a fused run was handed a
//! value that is not a sequence. Every other failure originates in
//! user-supplied stage logic and is carried through untouched, so callers
//! can downcast it back to the type their stage produced.

/// The boxed error type stage logic reports failures with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents errors that can occur while evaluating a pipeline.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::PipeError;
///
/// let error = PipeError::NotSequence { found: "int" };
/// assert_eq!(format!("{error}"), "fused run expected a sequence, found int");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    /// A stage (eager transform or lazy evaluator) raised an error.
    ///
    /// The source is exactly the error the stage returned.
    #[error("stage failed: {0}")]
    Stage(#[source] BoxError),

    /// A fused run or a sequence-only transform received a non-sequence.
    #[error("fused run expected a sequence, found {found}")]
    NotSequence {
        /// The kind of value that was found instead.
        found: &'static str,
    },
}

impl PipeError {
    /// Wraps an error raised by stage logic.
    pub fn stage<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Stage(error.into())
    }

    /// Returns the stage's own error, if this failure came from a stage.
    pub fn into_stage_error(self) -> Option<BoxError> {
        match self {
            Self::Stage(error) => Some(error),
            Self::NotSequence { .. } => None,
        }
    }

    /// Returns `true` if the failure came from stage logic.
    pub const fn is_stage(&self) -> bool {
        matches!(self, Self::Stage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fmt;

    #[derive(Debug, PartialEq, Eq)]
    struct Overflow(i64);

    impl fmt::Display for Overflow {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "overflow at {}", self.0)
        }
    }

    impl std::error::Error for Overflow {}

    #[rstest]
    fn test_stage_error_display_includes_source() {
        let error = PipeError::stage(Overflow(7));
        assert_eq!(format!("{error}"), "stage failed: overflow at 7");
    }

    #[rstest]
    fn test_stage_error_downcasts_to_original() {
        let error = PipeError::stage(Overflow(7));
        let source = error.into_stage_error().unwrap();
        assert_eq!(source.downcast_ref::<Overflow>(), Some(&Overflow(7)));
    }

    #[rstest]
    fn test_stage_error_from_string() {
        let error = PipeError::stage("bad input");
        assert!(error.is_stage());
        assert_eq!(format!("{error}"), "stage failed: bad input");
    }

    #[rstest]
    fn test_not_sequence_has_no_stage_error() {
        let error = PipeError::NotSequence { found: "record" };
        assert!(!error.is_stage());
        assert!(error.into_stage_error().is_none());
    }

    #[rstest]
    fn test_source_is_exposed() {
        use std::error::Error;

        let error = PipeError::stage(Overflow(1));
        assert_eq!(error.source().unwrap().to_string(), "overflow at 1");
    }
}
