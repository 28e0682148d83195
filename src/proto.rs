//! Generated protobuf/gRPC types for the tool service.
//!
//! Sourced from `proto/tool_service.proto` via `tonic-build` (see
//! `build.rs`). Domain code converts through `crate::grpc::conversions`
//! rather than using these types directly.

tonic::include_proto!("toolrpc.v1");
