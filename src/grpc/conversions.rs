//! Proto ↔ Domain conversions.
//!
//! Converts between protobuf types (crate::proto::*) and domain types
//! (crate::codec::*, crate::schema::*, crate::types::*). All conversions
//! here are infallible: payload variants map one-to-one onto the request
//! and response oneofs, and unrecognized wire error kinds and field type
//! tags fold into their documented fallbacks instead of failing.

use crate::codec::Payload;
use crate::proto;
use crate::schema::{self, FieldKind};
use crate::types::{ToolError, ToolErrorKind};

// =============================================================================
// Payload ↔ request/response oneofs
// =============================================================================

impl From<Payload> for proto::execute_request::Input {
    fn from(payload: Payload) -> proto::execute_request::Input {
        match payload {
            Payload::Json(text) => proto::execute_request::Input::JsonData(text),
            Payload::Binary(bytes) => proto::execute_request::Input::ProtoData(bytes),
        }
    }
}

impl From<proto::execute_request::Input> for Payload {
    fn from(input: proto::execute_request::Input) -> Payload {
        match input {
            proto::execute_request::Input::JsonData(text) => Payload::Json(text),
            proto::execute_request::Input::ProtoData(bytes) => Payload::Binary(bytes),
        }
    }
}

impl From<Payload> for proto::execute_response::Outcome {
    fn from(payload: Payload) -> proto::execute_response::Outcome {
        match payload {
            Payload::Json(text) => proto::execute_response::Outcome::JsonResult(text),
            Payload::Binary(bytes) => proto::execute_response::Outcome::ProtoResult(bytes),
        }
    }
}

// =============================================================================
// ToolError conversions
// =============================================================================

impl From<ToolError> for proto::ToolError {
    fn from(err: ToolError) -> proto::ToolError {
        proto::ToolError {
            r#type: err.kind.as_str().to_string(),
            message: err.message,
        }
    }
}

// The source chain stays server-side; the wire carries kind and message.
impl From<proto::ToolError> for ToolError {
    fn from(proto: proto::ToolError) -> ToolError {
        ToolError::new(ToolErrorKind::from_wire(&proto.r#type), proto.message)
    }
}

// =============================================================================
// Schema conversions
// =============================================================================

impl From<schema::SchemaField> for proto::FieldSchema {
    fn from(field: schema::SchemaField) -> proto::FieldSchema {
        proto::FieldSchema {
            name: field.name,
            r#type: field.kind.type_tag().to_string(),
            required: field.required,
            description: field.description,
        }
    }
}

impl From<proto::FieldSchema> for schema::SchemaField {
    fn from(proto: proto::FieldSchema) -> schema::SchemaField {
        schema::SchemaField {
            name: proto.name,
            kind: FieldKind::from_type_tag(&proto.r#type),
            required: proto.required,
            description: proto.description,
        }
    }
}

impl From<schema::ToolSchema> for proto::ToolSchema {
    fn from(schema: schema::ToolSchema) -> proto::ToolSchema {
        proto::ToolSchema {
            tool_name: schema.tool_name,
            description: schema.description,
            fields: schema.fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<proto::ToolSchema> for schema::ToolSchema {
    fn from(proto: proto::ToolSchema) -> schema::ToolSchema {
        schema::ToolSchema {
            tool_name: proto.tool_name,
            description: proto.description,
            fields: proto.fields.into_iter().map(Into::into).collect(),
        }
    }
}
