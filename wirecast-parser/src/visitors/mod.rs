//! Built-in location visitors.
//!
//! | location       | visitor                 | extracts                          |
//! |----------------|-------------------------|-----------------------------------|
//! | `statusCode`   | [`StatusCodeVisitor`]   | the numeric status code           |
//! | `reasonPhrase` | [`ReasonPhraseVisitor`] | the status line's reason phrase   |
//! | `header`       | [`HeaderVisitor`]       | a header, or a prefixed family    |
//! | `body`         | [`BodyVisitor`]         | the body as text                  |
//! | `json`         | [`JsonVisitor`]         | keys of a JSON body               |
//! | `xml`          | [`XmlVisitor`]          | elements of an XML body           |

mod body;
mod header;
mod json;
mod reason_phrase;
mod status_code;
mod xml;

pub use body::BodyVisitor;
pub use header::HeaderVisitor;
pub use json::JsonVisitor;
pub use reason_phrase::ReasonPhraseVisitor;
use serde_json::{Number, Value};
pub use status_code::StatusCodeVisitor;
use wirecast_description::{ScalarType, Schema};
pub use xml::XmlVisitor;

use crate::Fields;

/// View the accumulator as an object, replacing anything else with `{}`.
pub(crate) fn fields_mut(result: &mut Value) -> &mut Fields {
    if !result.is_object() {
        *result = Value::Object(Fields::new());
    }
    match result {
        Value::Object(fields) => fields,
        _ => unreachable!("accumulator was just made an object"),
    }
}

/// Merge a decoded body document into the accumulator.
///
/// Objects are merged key by key. Any other document only replaces an empty
/// (`null`) accumulator, which is what array models start from.
pub(crate) fn merge_document(result: &mut Value, document: Value) {
    match document {
        Value::Object(doc) if result.is_object() || result.is_null() => {
            fields_mut(result).extend(doc);
        }
        other if result.is_null() => *result = other,
        _ => tracing::debug!("body document is not an object, ignoring it"),
    }
}

/// Move the value stored under `schema`'s wire name to its result name,
/// post-processing it on the way.
pub(crate) fn rename_value(fields: &mut Fields, schema: &Schema, process: fn(&Schema, &mut Value)) {
    let wire_name = schema.wire_name();
    if wire_name == schema.name {
        if let Some(value) = fields.get_mut(wire_name) {
            process(schema, value);
        }
        return;
    }

    if let Some(mut value) = fields.shift_remove(wire_name) {
        process(schema, &mut value);
        fields.insert(schema.name.clone(), value);
    }
}

/// Drop keys an object schema does not declare, if it forbids extras.
pub(crate) fn retain_declared(fields: &mut Fields, schema: &Schema) {
    if schema.allows_additional_properties() {
        return;
    }
    let properties = schema.properties();
    fields.retain(|key, _| properties.iter().any(|p| p.name == *key));
}

/// Convert textual values (headers, XML text) to the declared scalar type.
///
/// Values that don't parse are left as they are.
pub(crate) fn coerce_scalar(ty: ScalarType, value: &mut Value) {
    let Value::String(text) = value else {
        return;
    };
    let trimmed = text.trim();

    let coerced = match ty {
        ScalarType::Integer => trimmed.parse::<i64>().ok().map(Value::from),
        ScalarType::Number => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ScalarType::Boolean => match trimmed {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        ScalarType::Null if trimmed.is_empty() => Some(Value::Null),
        _ => None,
    };

    if let Some(coerced) = coerced {
        *value = coerced;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_fields_mut_replaces_non_objects() {
        let mut value = json!([1, 2]);
        fields_mut(&mut value).insert("a".to_string(), json!(1));
        assert_eq!(value, json!({ "a": 1 }));
    }

    #[test]
    fn test_merge_document() {
        let mut result = json!({ "status": 200 });
        merge_document(&mut result, json!({ "id": 1 }));
        assert_eq!(result, json!({ "status": 200, "id": 1 }));

        let mut result = Value::Null;
        merge_document(&mut result, json!([1, 2]));
        assert_eq!(result, json!([1, 2]));

        let mut result = json!({ "status": 200 });
        merge_document(&mut result, json!([1, 2]));
        assert_eq!(result, json!({ "status": 200 }));
    }

    #[test]
    fn test_rename_value() {
        fn noop(_: &Schema, _: &mut Value) {}

        let mut fields = json!({ "user_id": 7, "other": true })
            .as_object()
            .cloned()
            .unwrap();
        let schema = Schema::scalar("id", ScalarType::Integer).sent_as("user_id");
        rename_value(&mut fields, &schema, noop);

        assert_eq!(Value::Object(fields), json!({ "other": true, "id": 7 }));
    }

    #[test]
    fn test_coerce_scalar() {
        let mut value = json!(" 42 ");
        coerce_scalar(ScalarType::Integer, &mut value);
        assert_eq!(value, json!(42));

        let mut value = json!("1.5");
        coerce_scalar(ScalarType::Number, &mut value);
        assert_eq!(value, json!(1.5));

        let mut value = json!("true");
        coerce_scalar(ScalarType::Boolean, &mut value);
        assert_eq!(value, json!(true));

        let mut value = json!("abc");
        coerce_scalar(ScalarType::Integer, &mut value);
        assert_eq!(value, json!("abc"));

        let mut value = json!("7");
        coerce_scalar(ScalarType::String, &mut value);
        assert_eq!(value, json!("7"));
    }
}
