use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use super::ITEMS_KEY;
use crate::{Command, Error, Fields, Result, VisitorRegistry};

/// Maps an array model through the visitor of its own location.
///
/// The array is visited as a unit: the visitor sees a copy of the model
/// named [`ITEMS_KEY`] and an accumulator holding its `before` output under
/// that key, exactly as if it were the single property of an object. The
/// value it leaves under the key is the result. The model itself is never
/// modified, so it can be shared between concurrent parses.
pub struct ArrayMapper<'r> {
    registry: &'r VisitorRegistry,
}

impl<'r> ArrayMapper<'r> {
    pub fn new(registry: &'r VisitorRegistry) -> Self {
        Self { registry }
    }

    /// Map the response through `schema`.
    pub fn map(&self, schema: &Schema, command: &Command, response: &Response) -> Result<Value> {
        let location = schema
            .location
            .as_ref()
            .ok_or_else(|| Error::UnlocatedArray {
                model: schema.name.clone(),
            })?;
        let visitor = self.registry.resolve(location)?;

        let mut result = Value::Null;
        tracing::trace!(%location, visitor = visitor.name(), "before");
        visitor.before(command, response, &mut result)?;

        let mut wrapped = Value::Object(Fields::from_iter([(ITEMS_KEY.to_string(), result)]));
        let mut items = schema.renamed(ITEMS_KEY);
        items.sent_as = None;

        tracing::trace!(%location, model = %schema.name, "visit");
        visitor.visit(command, response, &items, &mut wrapped)?;

        tracing::trace!(%location, visitor = visitor.name(), "after");
        visitor.after(command)?;

        Ok(match wrapped {
            Value::Object(mut fields) => fields.shift_remove(ITEMS_KEY).unwrap_or(Value::Null),
            _ => Value::Null,
        })
    }
}
