//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice expression could not be parsed.
    #[error("invalid dice expression \"{input}\": {reason}")]
    InvalidExpression {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Advantage and disadvantage were both requested for one roll.
    #[error("advantage and disadvantage are mutually exclusive")]
    ConflictingRollMode,
}

impl MechError {
    /// Shorthand for an expression parse failure.
    pub fn invalid_expression(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
