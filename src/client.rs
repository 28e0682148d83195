//! Tool Invoker — typed client for the ToolService rpc surface.
//!
//! [`ToolClient::execute`] has exactly one failure channel: every way a
//! call can go wrong (local validation, transport, embedded tool error,
//! undecodable result) comes back as a [`ToolError`], never as a panic
//! and never as a transport-native type. The schema-query path is
//! different plumbing: [`ToolClient::get_tool_schema`] propagates
//! transport failures as the crate [`Error`](crate::Error).
//!
//! The channel is lazy: [`ToolClient::connect`] only parses the endpoint
//! and needs no runtime; the channel is created and connected on the
//! first call. Dropping the client releases it.

use serde_json::Value;
use tonic::transport::{Channel, Endpoint};

use crate::codec::{self, EncodingMode, Payload};
use crate::proto::{
    execute_response, tool_service_client::ToolServiceClient, ExecuteRequest, GetToolSchemaRequest,
};
use crate::schema::{InputSchema, ToolSchema};
use crate::types::{ClientConfig, Result, ToolError, ToolErrorKind};

/// Client for one ToolService endpoint.
#[derive(Debug, Clone)]
pub struct ToolClient {
    endpoint: Endpoint,
    stub: Option<ToolServiceClient<Channel>>,
    mode: EncodingMode,
    schema: Option<InputSchema>,
}

impl ToolClient {
    /// Build a client from config. Only the endpoint is parsed here; no
    /// runtime is needed and nothing is connected. A server that is down
    /// only shows up as an `RpcError` on the first `execute`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let endpoint = Endpoint::from_shared(config.endpoint.clone())?
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        Ok(Self {
            endpoint,
            stub: None,
            mode: config.mode,
            schema: None,
        })
    }

    /// Attach a local validation schema. Inputs failing it are rejected
    /// client-side without contacting the server.
    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Encoding mode used for requests (responses arrive in the same mode).
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Stub backing every rpc. Channel creation needs the tokio runtime,
    /// so it is deferred to the first call.
    fn stub(&mut self) -> &mut ToolServiceClient<Channel> {
        let endpoint = &self.endpoint;
        self.stub
            .get_or_insert_with(|| ToolServiceClient::new(endpoint.connect_lazy()))
    }

    /// Execute a tool and return its decoded result.
    ///
    /// The error side of the returned `Result` is the full taxonomy:
    /// server-side kinds pass through verbatim, transport failures come
    /// back as `RpcError`, undecodable results as `ParseError`.
    pub async fn execute(
        &mut self,
        tool_name: &str,
        input: Value,
    ) -> std::result::Result<Value, ToolError> {
        // Local schema rejection short-circuits before any network contact
        if let Some(schema) = &self.schema {
            let violations = schema.validate(&input);
            if !violations.is_empty() {
                return Err(ToolError::validation(violations.join("; ")));
            }
        }

        let payload = codec::encode(&input, self.mode).map_err(|e| {
            ToolError::new(
                ToolErrorKind::ParseError,
                format!("Failed to encode input: {}", e),
            )
        })?;

        tracing::debug!(tool = %tool_name, mode = %self.mode, "executing remote tool");

        let request = ExecuteRequest {
            tool_name: tool_name.to_string(),
            input: Some(payload.into()),
        };

        let response = match self.stub().execute(request).await {
            Ok(response) => response.into_inner(),
            Err(status) => {
                tracing::warn!(tool = %tool_name, status = %status, "tool rpc failed");
                return Err(ToolError::new(
                    ToolErrorKind::RpcError,
                    format!("RPC failed: {}", status),
                ));
            }
        };

        match response.outcome {
            // Embedded tool errors pass through with kind and message intact
            Some(execute_response::Outcome::Error(proto_err)) => Err(ToolError::from(proto_err)),
            Some(execute_response::Outcome::JsonResult(text)) => {
                decode_result(&Payload::Json(text))
            }
            Some(execute_response::Outcome::ProtoResult(bytes)) => {
                decode_result(&Payload::Binary(bytes))
            }
            None => Err(ToolError::new(
                ToolErrorKind::ParseError,
                "Response carried no outcome",
            )),
        }
    }

    /// Fetch a tool's input schema from the server.
    pub async fn get_tool_schema(&mut self, tool_name: &str) -> Result<ToolSchema> {
        let request = GetToolSchemaRequest {
            tool_name: tool_name.to_string(),
        };
        let response = self.stub().get_tool_schema(request).await?;
        Ok(ToolSchema::from(response.into_inner()))
    }
}

fn decode_result(payload: &Payload) -> std::result::Result<Value, ToolError> {
    codec::decode(payload).map_err(|e| {
        ToolError::new(
            ToolErrorKind::ParseError,
            format!("Failed to decode {} result: {}", payload.mode(), e),
        )
    })
}

/// One-off convenience: connect, execute once, release the channel.
///
/// Connection setup failures are normalized into `RpcError` so the
/// single-channel contract of [`ToolClient::execute`] holds here too.
pub async fn execute_tool(
    config: ClientConfig,
    tool_name: &str,
    input: Value,
) -> std::result::Result<Value, ToolError> {
    let mut client = ToolClient::connect(config).map_err(|e| {
        ToolError::new(
            ToolErrorKind::RpcError,
            format!("Connection setup failed: {}", e),
        )
    })?;
    client.execute(tool_name, input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    #[test]
    fn test_connect_rejects_invalid_endpoint() {
        let config = ClientConfig::for_endpoint("not a uri");
        assert!(ToolClient::connect(config).is_err());
    }

    #[test]
    fn test_connect_needs_no_runtime() {
        // Plain #[test]: construction must succeed with no reactor
        // running, and with nothing listening on the endpoint
        let config = ClientConfig::for_endpoint("http://127.0.0.1:1");
        assert!(ToolClient::connect(config).is_ok());
    }

    #[test]
    fn test_with_schema_and_mode() {
        let config = ClientConfig::for_endpoint("http://127.0.0.1:1")
            .with_mode(EncodingMode::Binary);
        let client = ToolClient::connect(config)
            .unwrap()
            .with_schema(InputSchema::new().field("x", FieldKind::Number, ""));
        assert_eq!(client.mode(), EncodingMode::Binary);
        assert!(client.schema.is_some());
        assert!(client.stub.is_none());
    }
}
