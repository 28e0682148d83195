//! Tool handler seam — the trait server-side tools implement.
//!
//! A handler receives the decoded input value and returns either a result
//! value or a classified [`ToolError`]. Handlers never see wire bytes;
//! decoding and encoding stay in the transport layer.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{ToolError, ToolResult};

/// Server-side tool implementation.
///
/// `Err(ToolError)` is a *business* failure and travels in-band to the
/// caller verbatim. Infrastructure failures (panics, transport faults)
/// are not the handler's concern.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, input: Value) -> ToolResult<Value>;
}

/// Adapter letting plain async functions and closures serve as handlers.
pub struct FnHandler<F> {
    func: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult<Value>> + Send + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }

    /// Wrap directly into the trait-object form registrations store.
    pub fn arc(func: F) -> Arc<dyn ToolHandler> {
        Arc::new(Self::new(func))
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ToolResult<Value>> + Send + 'static,
{
    async fn call(&self, input: Value) -> ToolResult<Value> {
        (self.func)(input).await
    }
}

/// Classify any error chain into a [`ToolError`] for in-band transport.
///
/// Handlers bubbling arbitrary errors with `?` can finish with this to
/// keep the wire taxonomy closed.
pub fn into_tool_error<E>(err: E) -> ToolError
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = err.to_string();
    ToolError::new(crate::types::ToolErrorKind::ExecutionError, message).with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolErrorKind;
    use serde_json::json;

    struct Doubler;

    #[async_trait]
    impl ToolHandler for Doubler {
        async fn call(&self, input: Value) -> ToolResult<Value> {
            let n = input["n"]
                .as_f64()
                .ok_or_else(|| ToolError::invalid_input("n must be a number"))?;
            Ok(json!({"doubled": n * 2.0}))
        }
    }

    #[tokio::test]
    async fn test_struct_handler_returns_result() {
        let out = Doubler.call(json!({"n": 4})).await.unwrap();
        assert_eq!(out, json!({"doubled": 8.0}));
    }

    #[tokio::test]
    async fn test_struct_handler_returns_business_error() {
        let err = Doubler.call(json!({"n": "four"})).await.unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_fn_handler_adapts_closure() {
        let handler = FnHandler::new(|input: Value| async move {
            Ok(json!({"echo": input}))
        });
        let out = handler.call(json!("hi")).await.unwrap();
        assert_eq!(out, json!({"echo": "hi"}));
    }

    #[tokio::test]
    async fn test_fn_handler_arc_is_object_safe() {
        let handler: Arc<dyn ToolHandler> =
            FnHandler::arc(|_input: Value| async move { Ok(json!(null)) });
        assert_eq!(handler.call(json!({})).await.unwrap(), json!(null));
    }

    #[test]
    fn test_into_tool_error_classifies_as_execution() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = into_tool_error(io);
        assert_eq!(err.kind, ToolErrorKind::ExecutionError);
        assert!(err.message.contains("pipe closed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
