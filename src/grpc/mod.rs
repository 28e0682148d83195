//! gRPC service implementations.
//!
//! Implements the ToolService proto (execute dispatch + schema query),
//! the proto ↔ domain conversions, and the serve entry points.

pub mod conversions;
pub mod server;
pub mod tool_service;

pub use server::{serve, serve_with_shutdown};
pub use tool_service::ToolServiceImpl;
