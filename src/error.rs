use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by command methods.
///
/// Argument errors are raised before any request is built; protocol and
/// transport errors come back from the single request a command issues.
#[derive(Error, Debug)]
pub enum Error {
    /// A flag value is outside the closed set recognized for its parameter.
    #[error("invalid {param}: {value:#x} is not a recognized constant")]
    InvalidArgument { param: &'static str, value: u32 },

    /// A session or element identifier was empty.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// The server answered with a non-success status, or with a body that is
    /// not a JSON object carrying `value`.
    #[error("protocol error (status {status}): {body}")]
    Protocol { status: u16, body: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Returns a machine-readable error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::EmptyIdentifier(_) => "empty_identifier",
            Error::Protocol { .. } => "protocol_error",
            Error::Encode(_) => "encode_failed",
            Error::Transport(_) => "transport_error",
        }
    }

    /// True for errors raised locally, before a request could be sent.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. } | Error::EmptyIdentifier(_)
        )
    }
}
