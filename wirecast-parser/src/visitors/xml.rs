use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::{Schema, SchemaKind};

use super::{coerce_scalar, merge_document, rename_value, retain_declared};
use crate::{Command, ResponseVisitor, Result, decode};

/// Maps elements of an XML body.
///
/// Works like [`JsonVisitor`](super::JsonVisitor) on the decoded root
/// element, with two XML-specific adjustments driven by the schema:
///
/// - Array properties always come out as lists. A single element becomes a
///   one-item list, and a wrapper element around the items
///   (`<users><user/><user/></users>`) is unwrapped using the item schema's
///   wire name.
/// - Element text is converted to the declared integer, number or boolean
///   type when it parses as one.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlVisitor;

impl ResponseVisitor for XmlVisitor {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn before(&self, _command: &Command, response: &Response, result: &mut Value) -> Result<()> {
        if let Some(document) = decode::xml_body(response)? {
            merge_document(result, document);
        }
        Ok(())
    }

    fn visit(
        &self,
        _command: &Command,
        _response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        if let Value::Object(fields) = result {
            rename_value(fields, schema, process);
        }
        Ok(())
    }
}

fn process(schema: &Schema, value: &mut Value) {
    match &schema.kind {
        SchemaKind::Object { properties, .. } => {
            if let Value::Object(fields) = value {
                for property in properties {
                    rename_value(fields, property, process);
                }
                retain_declared(fields, schema);
            }
        }
        SchemaKind::Array { items } => {
            normalize_list(items, value);
            if let Value::Array(values) = value {
                for value in values {
                    process(items, value);
                }
            }
        }
        SchemaKind::Scalar(ty) => coerce_scalar(*ty, value),
    }
}

fn normalize_list(items: &Schema, value: &mut Value) {
    let inner = match value {
        Value::Object(fields) => fields.shift_remove(items.wire_name()),
        _ => None,
    };
    if let Some(inner) = inner {
        *value = inner;
    }

    match value {
        Value::Array(_) => {}
        Value::Null => *value = Value::Array(Vec::new()),
        Value::String(text) if text.is_empty() => *value = Value::Array(Vec::new()),
        other => {
            let single = other.take();
            *other = Value::Array(vec![single]);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::StatusCode;
    use serde_json::json;
    use wirecast_description::{ScalarType, ServiceDescription};

    use super::*;
    use crate::Error;

    fn command() -> Command {
        Command::new(Arc::new(ServiceDescription::new()), "Get")
    }

    fn before(body: &'static str) -> Result<Value> {
        let mut result = json!({});
        let response = Response::new(StatusCode::OK).with_body(body);
        XmlVisitor.before(&command(), &response, &mut result)?;
        Ok(result)
    }

    fn visit(schema: &Schema, mut result: Value) -> Value {
        let response = Response::new(StatusCode::OK);
        XmlVisitor
            .visit(&command(), &response, schema, &mut result)
            .unwrap();
        result
    }

    fn user() -> Schema {
        Schema::object(
            "user",
            vec![
                Schema::scalar("id", ScalarType::Integer),
                Schema::scalar("active", ScalarType::Boolean),
            ],
        )
    }

    #[test]
    fn test_before_merges_root_children() {
        let result = before("<user><id>3</id><active>true</active></user>").unwrap();
        assert_eq!(result, json!({ "id": "3", "active": "true" }));
    }

    #[test]
    fn test_before_rejects_malformed_xml() {
        assert!(matches!(before("<user><id></user>"), Err(Error::Xml { .. })));
        assert!(matches!(
            before("<x><a>1</a></x><y><a>2</a></y>"),
            Err(Error::Xml { .. })
        ));
    }

    #[test]
    fn test_scalars_are_coerced() {
        let schema = Schema::scalar("id", ScalarType::Integer);
        assert_eq!(visit(&schema, json!({ "id": "3" })), json!({ "id": 3 }));
    }

    #[test]
    fn test_single_element_becomes_list() {
        let schema = Schema::array("user", user());
        let result = visit(&schema, json!({ "user": { "id": "1", "active": "0" } }));
        assert_eq!(result, json!({ "user": [{ "id": 1, "active": false }] }));
    }

    #[test]
    fn test_wrapper_element_is_unwrapped() {
        let schema = Schema::array("users", user().sent_as("user"));
        let result = visit(
            &schema,
            json!({ "users": { "user": [{ "id": "1" }, { "id": "2" }] } }),
        );
        assert_eq!(result, json!({ "users": [{ "id": 1 }, { "id": 2 }] }));
    }

    #[test]
    fn test_empty_wrapper_is_empty_list() {
        let schema = Schema::array("users", user().sent_as("user"));
        assert_eq!(visit(&schema, json!({ "users": "" })), json!({ "users": [] }));
    }
}
