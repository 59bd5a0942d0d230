use thiserror::Error;

/// Errors raised while encoding addresses, instructions, or transactions.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid instruction argument: {0}")]
    InvalidArgument(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = SolError::InvalidAddress("bad decode".into());
        assert_eq!(err.to_string(), "invalid address: bad decode");
    }

    #[test]
    fn display_invalid_argument() {
        let err = SolError::InvalidArgument("symbol too long".into());
        assert_eq!(
            err.to_string(),
            "invalid instruction argument: symbol too long"
        );
    }

    #[test]
    fn display_transaction_build_error() {
        let err = SolError::TransactionBuildError("too many accounts".into());
        assert_eq!(err.to_string(), "transaction build error: too many accounts");
    }

    #[test]
    fn display_signing_error() {
        let err = SolError::SigningError("missing signer".into());
        assert_eq!(err.to_string(), "signing error: missing signer");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(SolError::SerializationError("truncated".into()));
        assert!(err.to_string().contains("truncated"));
    }
}
