use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::{Schema, SchemaKind};

use super::{merge_document, rename_value, retain_declared};
use crate::{Command, ResponseVisitor, Result, decode};

/// Maps keys of a JSON body.
///
/// `before` decodes the body once and merges it into the accumulator, so
/// every key of the document is present even if no property declares it.
/// `visit` then moves each property from its wire name to its result name,
/// applying nested renames and dropping undeclared keys of nested objects
/// that forbid additional properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonVisitor;

impl ResponseVisitor for JsonVisitor {
    fn name(&self) -> &'static str {
        "json"
    }

    fn before(&self, _command: &Command, response: &Response, result: &mut Value) -> Result<()> {
        if let Some(document) = decode::json_body(response)? {
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
    match (&schema.kind, value) {
        (SchemaKind::Object { properties, .. }, Value::Object(fields)) => {
            for property in properties {
                rename_value(fields, property, process);
            }
            retain_declared(fields, schema);
        }
        (SchemaKind::Array { items }, Value::Array(values)) => {
            for value in values {
                process(items, value);
            }
        }
        _ => {}
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

    fn response(body: &'static str) -> Response {
        Response::new(StatusCode::OK).with_body(body)
    }

    #[test]
    fn test_before_merges_document() {
        let mut result = json!({ "status": 200 });
        JsonVisitor
            .before(&command(), &response(r#"{"id": 1}"#), &mut result)
            .unwrap();
        assert_eq!(result, json!({ "status": 200, "id": 1 }));
    }

    #[test]
    fn test_before_rejects_invalid_json() {
        let mut result = json!({});
        let err = JsonVisitor
            .before(&command(), &response("{"), &mut result)
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_visit_renames_nested_values() {
        let schema = Schema::object(
            "user",
            vec![
                Schema::scalar("id", ScalarType::Integer).sent_as("user_id"),
                Schema::array(
                    "tags",
                    Schema::object("tag", vec![Schema::scalar("label", ScalarType::String).sent_as("l")])
                        .additional_properties(false),
                ),
            ],
        )
        .sent_as("User");

        let mut result = json!({
            "User": {
                "user_id": 9,
                "tags": [{ "l": "a", "junk": 1 }, { "l": "b" }],
                "extra": true
            }
        });
        JsonVisitor
            .visit(&command(), &response(""), &schema, &mut result)
            .unwrap();

        assert_eq!(
            result,
            json!({
                "user": {
                    "id": 9,
                    "tags": [{ "label": "a" }, { "label": "b" }],
                    "extra": true
                }
            })
        );
    }

    #[test]
    fn test_visit_missing_key_is_noop() {
        let schema = Schema::scalar("id", ScalarType::Integer);
        let mut result = json!({ "other": 1 });
        JsonVisitor
            .visit(&command(), &response(""), &schema, &mut result)
            .unwrap();
        assert_eq!(result, json!({ "other": 1 }));
    }
}
