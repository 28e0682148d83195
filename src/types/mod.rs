//! Core types for the tool service.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: both failure tiers (protocol-violation and taxonomy)
//!   with thiserror derives
//! - **Config**: configuration structures for server, client, and
//!   observability

mod config;
mod errors;

pub use config::{ClientConfig, Config, ObservabilityConfig, ServerConfig};
pub use errors::{Error, Result, ToolError, ToolErrorKind, ToolResult};
