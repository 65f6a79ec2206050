//! Schema-driven mapping of a response into a value.
//!
//! [`visit_result`] dispatches on the shape of the model: objects go through
//! [`ObjectMapper`], arrays through [`ArrayMapper`]. Scalar models cannot be
//! mapped on their own.

mod array;
mod object;

pub use array::ArrayMapper;
pub use object::ObjectMapper;
use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::{Schema, SchemaKind};

use crate::{Command, Error, Result, VisitorRegistry};

/// Key an array model is presented under while its visitor runs.
pub const ITEMS_KEY: &str = "items";

/// Map a response through a model.
///
/// # Errors
///
/// Returns [`Error::UnsupportedModelType`] for scalar models, and any error
/// raised by the registry or a visitor.
pub fn visit_result(
    registry: &VisitorRegistry,
    schema: &Schema,
    command: &Command,
    response: &Response,
) -> Result<Value> {
    match &schema.kind {
        SchemaKind::Object { .. } => ObjectMapper::new(registry).map(schema, command, response),
        SchemaKind::Array { .. } => ArrayMapper::new(registry).map(schema, command, response),
        SchemaKind::Scalar(ty) => Err(Error::UnsupportedModelType {
            model: schema.name.clone(),
            tag: ty.as_str().to_string(),
        }),
    }
}
