//! Error type shared by every pipeline stage.
//!
//! All stages are pure and deterministic, so there is no retry story:
//! every error propagates straight to the caller of the pipeline.

/// Errors produced by the disaggregation pipeline.
#[derive(Clone, PartialEq)]
pub enum DisaggError {
    /// Malformed input at a stage boundary (empty series, non-positive
    /// duration/step, non-monotonic knots, mismatched lengths, ...).
    InvalidInput(String),
    /// A zero-valued original interval whose re-aggregated fine mean is
    /// materially nonzero: the percentage deviation is undefined and the
    /// discrepancy cannot be reported as a number.
    UndefinedMetric(String),
    /// The spline system could not be solved (degenerate knot geometry).
    Numerical(String),
}

impl DisaggError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DisaggError::InvalidInput(message.into())
    }

    pub fn undefined_metric(message: impl Into<String>) -> Self {
        DisaggError::UndefinedMetric(message.into())
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        DisaggError::Numerical(message.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            DisaggError::InvalidInput(_) => "invalid input",
            DisaggError::UndefinedMetric(_) => "undefined metric",
            DisaggError::Numerical(_) => "numerical failure",
        }
    }

    fn message(&self) -> &str {
        match self {
            DisaggError::InvalidInput(m)
            | DisaggError::UndefinedMetric(m)
            | DisaggError::Numerical(m) => m,
        }
    }
}

impl std::fmt::Display for DisaggError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::fmt::Debug for DisaggError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisaggError")
            .field("kind", &self.kind())
            .field("message", &self.message())
            .finish()
    }
}

impl std::error::Error for DisaggError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = DisaggError::invalid_input("duration must be > 0");
        assert_eq!(err.to_string(), "invalid input: duration must be > 0");
    }
}
