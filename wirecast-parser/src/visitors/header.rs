use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::{Schema, SchemaKind};

use super::{coerce_scalar, fields_mut};
use crate::{Command, Fields, ResponseVisitor, Result};

/// Extracts response headers.
///
/// - A scalar property takes the header named by its wire name; several
///   values are joined with `", "`.
/// - An array property takes every value of the header as a list.
/// - An object property that allows additional properties collects every
///   header starting with its wire name, keyed by the rest of the name.
///
/// Header names are matched case-insensitively. Absent headers leave the
/// result untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderVisitor;

impl HeaderVisitor {
    fn prefixed(response: &Response, prefix: &str) -> Fields {
        let prefix = prefix.to_ascii_lowercase();
        let mut headers = Fields::new();
        for name in response.headers().keys() {
            if let Some(rest) = name.as_str().strip_prefix(prefix.as_str()) {
                headers.insert(rest.to_string(), Value::String(joined(response, name.as_str())));
            }
        }
        headers
    }
}

impl ResponseVisitor for HeaderVisitor {
    fn name(&self) -> &'static str {
        "header"
    }

    fn visit(
        &self,
        _command: &Command,
        response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        let wire_name = schema.wire_name();

        let value = match &schema.kind {
            SchemaKind::Object {
                additional_properties: true,
                ..
            } => Value::Object(Self::prefixed(response, wire_name)),
            SchemaKind::Array { items } => {
                let values = response.header_values(wire_name);
                if values.is_empty() {
                    return Ok(());
                }
                let scalar = match &items.kind {
                    SchemaKind::Scalar(ty) => Some(*ty),
                    _ => None,
                };
                Value::Array(
                    values
                        .into_iter()
                        .map(|v| {
                            let mut value = Value::String(v.into_owned());
                            if let Some(ty) = scalar {
                                coerce_scalar(ty, &mut value);
                            }
                            value
                        })
                        .collect(),
                )
            }
            kind => {
                if response.header_values(wire_name).is_empty() {
                    return Ok(());
                }
                let mut value = Value::String(joined(response, wire_name));
                if let SchemaKind::Scalar(ty) = kind {
                    coerce_scalar(*ty, &mut value);
                }
                value
            }
        };

        fields_mut(result).insert(schema.name.clone(), value);
        Ok(())
    }
}

fn joined(response: &Response, name: &str) -> String {
    response.header_values(name).join(", ")
}
