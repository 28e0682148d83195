//! Application error types.
//!
//! Failures live in two tiers. The [`Error`] enum is the
//! protocol-violation tier: malformed payloads, unknown tools, transport
//! and serialization faults. It maps onto gRPC status codes and aborts
//! the call it occurs in. The [`ToolError`] struct is the business tier:
//! a classified tool outcome carried *inside* a successful response and
//! propagated end-to-end without reclassification.
//!
//! All errors use `thiserror` for automatic Error trait derivation and
//! provide clear messages with context.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application result type for the protocol-violation tier.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for tool execution: exactly one of a value or a
/// classified [`ToolError`] is populated.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Protocol-violation tier error enum.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed request payloads (map to gRPC INVALID_ARGUMENT).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown tool name (map to gRPC NOT_FOUND).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal errors, including crashed tool handlers (map to gRPC INTERNAL).
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// gRPC call errors (boxed to reduce Result size).
    #[error("grpc error: {0}")]
    Grpc(#[from] Box<tonic::Status>),

    /// gRPC transport errors (endpoint construction, server bind/serve).
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert to gRPC status code.
    pub fn to_grpc_status(&self) -> tonic::Status {
        match self {
            Error::Validation(msg) => tonic::Status::invalid_argument(msg),
            Error::NotFound(msg) => tonic::Status::not_found(msg),
            Error::Internal(msg) => tonic::Status::internal(msg),
            Error::Serialization(e) => {
                tonic::Status::internal(format!("serialization error: {}", e))
            }
            Error::Grpc(status) => (**status).clone(),
            Error::Transport(e) => tonic::Status::internal(format!("transport error: {}", e)),
            Error::Io(e) => tonic::Status::internal(format!("io error: {}", e)),
        }
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// Implement From<Error> for Status to enable ? operator in gRPC handlers
impl From<Error> for tonic::Status {
    fn from(err: Error) -> Self {
        err.to_grpc_status()
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Error::Grpc(Box::new(status))
    }
}

// =============================================================================
// Tool error taxonomy
// =============================================================================

/// Closed set of tool error kinds.
///
/// The first six kinds travel on the wire as lower-snake-case strings.
/// `RpcError` and `ParseError` are synthesized by the client to classify
/// transport and decode failures; the server never emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// Transient failure; the caller may retry. Advisory only — nothing
    /// in this crate retries automatically.
    Retryable,
    /// Non-transient failure; retrying will not help.
    Permanent,
    /// The tool rejected its input on business grounds.
    InvalidInput,
    /// Unexpected failure inside the tool or server.
    InternalError,
    /// Input did not satisfy the tool's declared schema.
    ValidationError,
    /// The tool ran and reported a failure outcome.
    ExecutionError,
    /// Client-synthesized: the rpc itself failed (refused, timeout, aborted).
    RpcError,
    /// Client-synthesized: the response payload could not be decoded.
    ParseError,
}

impl ToolErrorKind {
    /// Wire rendering of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorKind::Retryable => "retryable",
            ToolErrorKind::Permanent => "permanent",
            ToolErrorKind::InvalidInput => "invalid_input",
            ToolErrorKind::InternalError => "internal_error",
            ToolErrorKind::ValidationError => "validation_error",
            ToolErrorKind::ExecutionError => "execution_error",
            ToolErrorKind::RpcError => "rpc_error",
            ToolErrorKind::ParseError => "parse_error",
        }
    }

    /// Decode a wire kind string. Unrecognized kinds collapse to
    /// `InternalError` rather than trusting the peer's spelling.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "retryable" => ToolErrorKind::Retryable,
            "permanent" => ToolErrorKind::Permanent,
            "invalid_input" => ToolErrorKind::InvalidInput,
            "internal_error" => ToolErrorKind::InternalError,
            "validation_error" => ToolErrorKind::ValidationError,
            "execution_error" => ToolErrorKind::ExecutionError,
            "rpc_error" => ToolErrorKind::RpcError,
            "parse_error" => ToolErrorKind::ParseError,
            _ => ToolErrorKind::InternalError,
        }
    }
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified tool failure: kind + message + optional cause.
///
/// Constructed once at the failure site and passed through verbatim by
/// every layer between the tool and the caller. The cause is local-only;
/// it never crosses the wire.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause (kept local, not serialized).
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

// Convenience constructors, one per kind
impl ToolError {
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Retryable, msg)
    }

    pub fn permanent(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Permanent, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidInput, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InternalError, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ValidationError, msg)
    }

    pub fn execution(msg: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionError, msg)
    }
}
