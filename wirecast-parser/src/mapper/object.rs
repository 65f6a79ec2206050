use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use wirecast_core::{Location, Response};
use wirecast_description::Schema;

use crate::{Command, Fields, ResponseVisitor, Result, VisitorRegistry, visitors::retain_declared};

/// Maps an object model's located properties into one flat object.
///
/// Every distinct location gets exactly one `before` and one `after`, in
/// the order the locations first appear among the properties; `visit` runs
/// once per located property in declaration order. Properties without a
/// location are skipped: they are expected to be filled in as part of
/// another property's value.
///
/// If the model forbids additional properties, keys it does not declare are
/// dropped once every property has been visited.
pub struct ObjectMapper<'r> {
    registry: &'r VisitorRegistry,
}

impl<'r> ObjectMapper<'r> {
    pub fn new(registry: &'r VisitorRegistry) -> Self {
        Self { registry }
    }

    /// Map the response through `schema`.
    pub fn map(&self, schema: &Schema, command: &Command, response: &Response) -> Result<Value> {
        let mut result = Value::Object(Fields::new());

        // Locations in first-seen order, each with its visitor.
        let mut visitors: IndexMap<&Location, Arc<dyn ResponseVisitor>> = IndexMap::new();

        for location in located(schema).map(|(location, _)| location) {
            if visitors.contains_key(location) {
                continue;
            }
            let visitor = self.registry.resolve(location)?;
            tracing::trace!(%location, visitor = visitor.name(), "before");
            visitor.before(command, response, &mut result)?;
            visitors.insert(location, visitor);
        }

        for (location, property) in located(schema) {
            // Every located property's visitor was resolved above.
            if let Some(visitor) = visitors.get(location) {
                tracing::trace!(%location, property = %property.name, "visit");
                visitor.visit(command, response, property, &mut result)?;
            }
        }

        if let Value::Object(fields) = &mut result {
            retain_declared(fields, schema);
        }

        for (location, visitor) in &visitors {
            tracing::trace!(%location, visitor = visitor.name(), "after");
            visitor.after(command)?;
        }

        Ok(result)
    }
}

fn located(schema: &Schema) -> impl Iterator<Item = (&Location, &Schema)> {
    schema
        .properties()
        .iter()
        .filter_map(|property| property.location.as_ref().map(|location| (location, property)))
}
