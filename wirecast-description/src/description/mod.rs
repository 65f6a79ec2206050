//! Service description types and parsing.

mod file;
mod parse;
mod validate;

use std::sync::Arc;

pub use file::DescriptionFile;
use indexmap::IndexMap;
pub use validate::ParseContext;

use crate::{Operation, Schema};

/// The operations of a service and the models they respond with.
///
/// Models are shared (`Arc`) so a parsed result can hold on to the schema
/// that produced it without copying.
#[derive(Debug, Clone, Default)]
pub struct ServiceDescription {
    name: Option<String>,
    description: Option<String>,
    operations: IndexMap<String, Operation>,
    models: IndexMap<String, Arc<Schema>>,
}

impl ServiceDescription {
    /// Create an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add (or replace) an operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations
            .insert(operation.name().to_string(), operation);
        self
    }

    /// Add (or replace) a model, keyed by the schema's name.
    pub fn with_model(mut self, schema: Schema) -> Self {
        self.models.insert(schema.name.clone(), Arc::new(schema));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Operations in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Look up a model schema by name.
    pub fn get_schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.models.get(name).cloned()
    }

    /// Models in declaration order.
    pub fn models(&self) -> impl Iterator<Item = (&str, &Arc<Schema>)> {
        self.models.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
