//! ToolService gRPC implementation.
//!
//! Implements tool_service proto: Execute dispatch and the schema query.
//!
//! Failures split into two tiers. Malformed requests (no payload,
//! undecodable payload, unknown tool) and crashed handlers are *protocol*
//! failures and surface as non-OK grpc statuses. Schema rejections and
//! errors returned by the tool itself are *business* failures and travel
//! in-band, inside the response oneof, so the caller's taxonomy sees them
//! verbatim.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::codec::{self, Payload};
use crate::proto::{
    execute_response, tool_service_server::ToolService, ExecuteRequest, ExecuteResponse,
    GetToolSchemaRequest, ToolSchema,
};
use crate::schema;
use crate::tools::ToolRegistry;
use crate::types::{Error, ToolError};

/// ToolService implementation dispatching to a fixed registry.
///
/// The registry is bound at construction and immutable afterwards; which
/// tools a server exposes is never looked up from the environment at
/// request time.
#[derive(Debug, Clone)]
pub struct ToolServiceImpl {
    registry: Arc<ToolRegistry>,
}

impl ToolServiceImpl {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[tonic::async_trait]
impl ToolService for ToolServiceImpl {
    async fn execute(
        &self,
        request: Request<ExecuteRequest>,
    ) -> std::result::Result<Response<ExecuteResponse>, Status> {
        let req = request.into_inner();

        // Exactly one payload variant must be populated; the variant fixes
        // the response encoding.
        let input = req
            .input
            .ok_or_else(|| Error::validation("Missing input payload").to_grpc_status())?;
        let payload = Payload::from(input);
        let mode = payload.mode();

        let input_value = codec::decode(&payload).map_err(|e| {
            Error::validation(format!("Invalid {} payload: {}", mode, e)).to_grpc_status()
        })?;

        let registration = self.registry.get(&req.tool_name).ok_or_else(|| {
            Error::not_found(format!("Unknown tool: {}", req.tool_name)).to_grpc_status()
        })?;

        tracing::debug!(tool = %req.tool_name, mode = %mode, "executing tool");

        // Schema rejection is a business outcome, not a transport failure
        if let Some(input_schema) = &registration.schema {
            let violations = input_schema.validate(&input_value);
            if !violations.is_empty() {
                let message = violations.join("; ");
                tracing::warn!(tool = %req.tool_name, %message, "input rejected by schema");
                return Ok(Response::new(ExecuteResponse {
                    outcome: Some(execute_response::Outcome::Error(
                        ToolError::validation(message).into(),
                    )),
                }));
            }
        }

        // Run the handler on its own task so a panicking tool fails this
        // call alone, not the server
        let handler = Arc::clone(&registration.handler);
        let outcome = tokio::spawn(async move { handler.call(input_value).await })
            .await
            .map_err(|e| {
                tracing::error!(tool = %req.tool_name, error = %e, "tool execution panicked");
                Status::internal(format!("Tool execution panicked: {}", req.tool_name))
            })?;

        let outcome = match outcome {
            Ok(result) => {
                // Response encoding matches the request's mode
                let result_payload = codec::encode(&result, mode).map_err(|e| {
                    Error::internal(format!("Failed to encode result: {}", e)).to_grpc_status()
                })?;
                execute_response::Outcome::from(result_payload)
            }
            Err(tool_error) => {
                tracing::debug!(
                    tool = %req.tool_name,
                    kind = %tool_error.kind,
                    "tool returned error"
                );
                execute_response::Outcome::Error(tool_error.into())
            }
        };

        Ok(Response::new(ExecuteResponse {
            outcome: Some(outcome),
        }))
    }

    async fn get_tool_schema(
        &self,
        request: Request<GetToolSchemaRequest>,
    ) -> std::result::Result<Response<ToolSchema>, Status> {
        let req = request.into_inner();

        let registration = self.registry.get(&req.tool_name).ok_or_else(|| {
            Error::not_found(format!("Unknown tool: {}", req.tool_name)).to_grpc_status()
        })?;

        let tool_schema = schema::ToolSchema {
            tool_name: registration.name.clone(),
            description: registration.description.clone(),
            fields: schema::translate(registration.schema.as_ref()),
        };

        Ok(Response::new(ToolSchema::from(tool_schema)))
    }
}
