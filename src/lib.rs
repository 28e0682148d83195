//! # Toolrpc - Remote Tool Invocation Protocol
//!
//! Rust implementation of a gRPC tool-execution protocol providing:
//! - Typed `Execute` rpc: run a named tool with structured input, get a
//!   structured result or a classified error
//! - Dual payload encoding (JSON text or binary byte-carrier) with the
//!   response mode matching the request
//! - A closed error taxonomy separating retryable, permanent, validation,
//!   and transport failures
//! - Schema introspection: clients discover a tool's expected input shape
//!   at runtime via `GetToolSchema`
//!
//! ## Architecture
//!
//! Tools are bound to the server at construction; request handling is
//! stateless:
//! ```text
//!   ToolClient ── tonic channel ──►  ToolServiceImpl
//!      │                               │
//!   local schema                   Arc<ToolRegistry>
//!   (optional)                        │
//!                                  ToolHandler::call
//! ```
//!
//! Schema queries bypass execution entirely; protocol violations surface
//! as grpc statuses while tool-level errors travel in-band.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod client;
pub mod codec;
pub mod grpc;
pub mod proto;
pub mod schema;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use client::{execute_tool, ToolClient};
pub use codec::{EncodingMode, Payload};
pub use schema::{FieldKind, InputSchema, ToolSchema};
pub use tools::{FnHandler, ToolHandler, ToolRegistration, ToolRegistry};
pub use types::{ClientConfig, Config, Error, Result, ToolError, ToolErrorKind, ToolResult};
