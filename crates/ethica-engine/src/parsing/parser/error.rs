use thiserror::Error;

/// A grammar rule failed.
///
/// Token fields hold the offending token rendered with its `Display`
/// (`TYPE lexeme index`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{message} (at {token})")]
    Unexpected { token: String, message: String },

    #[error("{message}: token has no index (at {token})")]
    MissingIndex { token: String, message: String },

    #[error("unknown subexpression `{index}` (at {token})")]
    UnknownSubexpression { token: String, index: String },
}
