use thiserror::Error;

/// Errors that end an arrangement before it produces a result.
///
/// A single object that cannot be placed is not an error, see
/// [`PlacementOutcome::Unplaced`](crate::job::PlacementOutcome::Unplaced).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArrangeError {
    /// The build volume, configuration or one of the objects is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller cancelled the arrangement. No partial result is reported.
    #[error("arrangement was cancelled")]
    Cancelled,
}

/// Result type used throughout the library.
pub type ArrangeResult<T> = std::result::Result<T, ArrangeError>;

/// Returns early with [`ArrangeError::InvalidInput`] if the condition does not hold.
macro_rules! ensure_input {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::ArrangeError::InvalidInput(format!($($arg)+)));
        }
    };
}

pub(crate) use ensure_input;

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(value: f64) -> ArrangeResult<f64> {
        ensure_input!(value > 0.0, "value must be positive, got {value}");
        Ok(value)
    }

    #[test]
    fn error_display() {
        let err = ArrangeError::InvalidInput("bed width must be positive".into());
        assert_eq!(format!("{err}"), "invalid input: bed width must be positive");
        assert_eq!(format!("{}", ArrangeError::Cancelled), "arrangement was cancelled");
    }

    #[test]
    fn ensure_input_short_circuits() {
        assert_eq!(positive(2.0), Ok(2.0));
        match positive(-1.0) {
            Err(ArrangeError::InvalidInput(msg)) => assert!(msg.contains("-1")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
