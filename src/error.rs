use thiserror::Error;

/// Failures that cross the solver boundary. Anything recoverable is mapped
/// into the output envelope as a non-zero `code` plus a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl SolverError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Envelope (and process exit) code.
    pub fn code(&self) -> u32 {
        match self {
            Self::Internal(_) => 1,
            Self::InvalidInput(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_envelope_contract() {
        assert_eq!(SolverError::internal("overflow").code(), 1);
        assert_eq!(SolverError::invalid_input("bad matrix").code(), 2);
    }
}
