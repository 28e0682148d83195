//! Tool registry — name → registration, bound at construction time.
//!
//! A registry is assembled up front, then frozen behind an `Arc` and
//! handed to the service. Which tools a server exposes is decided once,
//! explicitly, when the registry is built; nothing is looked up from the
//! environment at request time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::schema::InputSchema;
use crate::types::{Error, Result};

use super::handler::ToolHandler;

/// One registered tool: identity, optional input schema, implementation.
pub struct ToolRegistration {
    pub name: String,
    pub description: String,
    pub schema: Option<InputSchema>,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolRegistration {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema: None,
            handler,
        }
    }

    /// Attach an input schema; inputs are validated against it before the
    /// handler runs.
    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

impl fmt::Debug for ToolRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// In-memory tool registry. Owns registrations, keyed by tool name.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolRegistration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Names are unique; re-registering is an error.
    pub fn register(&mut self, registration: ToolRegistration) -> Result<()> {
        if registration.name.is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        if self.tools.contains_key(&registration.name) {
            return Err(Error::validation(format!(
                "Tool already registered: {}",
                registration.name
            )));
        }
        self.tools.insert(registration.name.clone(), registration);
        Ok(())
    }

    /// Get a registration by tool name.
    pub fn get(&self, name: &str) -> Option<&ToolRegistration> {
        self.tools.get(name)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
