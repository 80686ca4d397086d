//! Error types for Inferir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Inferir operations.
///
/// Provides detailed context about failures including invalid hyperparameters
/// and numerical instability during iteration.
///
/// # Examples
///
/// ```
/// use inferir::error::InferirError;
///
/// let err = InferirError::InvalidHyperparameter {
///     param: "v0".to_string(),
///     value: "-1.0".to_string(),
///     constraint: "> 0".to_string(),
/// };
/// assert!(err.to_string().contains("Invalid hyperparameter"));
/// ```
#[derive(Debug)]
pub enum InferirError {
    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A division produced a zero or non-finite denominator during iteration.
    NumericalInstability {
        /// Quantity that degenerated
        context: String,
        /// Offending value
        value: f64,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for InferirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferirError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            InferirError::NumericalInstability { context, value } => {
                write!(f, "Numerical instability: {context} = {value}")
            }
            InferirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for InferirError {}

impl From<&str> for InferirError {
    fn from(msg: &str) -> Self {
        InferirError::Other(msg.to_string())
    }
}

impl From<String> for InferirError {
    fn from(msg: String) -> Self {
        InferirError::Other(msg)
    }
}

impl InferirError {
    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for InferirError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<InferirError> for &str {
    fn eq(&self, other: &InferirError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, InferirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = InferirError::InvalidHyperparameter {
            param: "b0".to_string(),
            value: "-0.5".to_string(),
            constraint: "> 0".to_string(),
        };
        assert!(err.to_string().contains("Invalid hyperparameter"));
        assert!(err.to_string().contains("b0"));
        assert!(err.to_string().contains("-0.5"));
        assert!(err.to_string().contains("> 0"));
    }

    #[test]
    fn test_numerical_instability_display() {
        let err = InferirError::NumericalInstability {
            context: "precision scale denominator".to_string(),
            value: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Numerical instability"));
        assert!(msg.contains("precision scale denominator"));
    }

    #[test]
    fn test_from_str() {
        let err: InferirError = "test error".into();
        assert!(matches!(err, InferirError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: InferirError = "test error".to_string().into();
        assert!(matches!(err, InferirError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_empty_input_helper() {
        let err = InferirError::empty_input("observations");
        let msg = err.to_string();
        assert!(msg.contains("empty input"));
        assert!(msg.contains("observations"));
    }

    #[test]
    fn test_error_eq_str() {
        let err = InferirError::Other("test error".to_string());
        assert!(err == "test error");
        assert!("test error" == err);
    }

    #[test]
    fn test_error_debug_impl() {
        let err = InferirError::Other("test".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Other"));
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error;
        let err = InferirError::Other("test".to_string());
        assert!(err.source().is_none());
    }
}
