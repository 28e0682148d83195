//! Tool infrastructure — handler trait, registry, registration metadata.
//!
//! Tools are bound to a server explicitly at construction time: build a
//! [`ToolRegistry`], register each [`ToolRegistration`], freeze it behind
//! an `Arc`, and hand it to the service. Handlers implement [`ToolHandler`]
//! (or wrap a closure with [`FnHandler`]).

pub mod handler;
pub mod registry;

pub use handler::{into_tool_error, FnHandler, ToolHandler};
pub use registry::{ToolRegistration, ToolRegistry};
