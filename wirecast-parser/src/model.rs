//! Parse results.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use wirecast_description::Schema;

use crate::Fields;

/// Parsed data paired with the schema that describes it.
#[derive(Debug, Clone)]
pub struct Model {
    data: Value,
    schema: Arc<Schema>,
}

impl Model {
    pub fn new(data: Value, schema: Arc<Schema>) -> Self {
        Self { data, schema }
    }

    /// The parsed data: an object for object models, a list for array models.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The schema that produced the data.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Look up a top-level key of object data.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

/// What [`ResponseParser::parse`](crate::ResponseParser::parse) produced.
#[derive(Debug, Clone)]
pub enum ParsedResponse {
    /// No model applies; the fallback parser's output, untouched.
    Raw(Fields),
    /// Data described by the operation's response model.
    Model(Model),
}

impl ParsedResponse {
    /// The model, if one applied.
    pub fn as_model(&self) -> Option<&Model> {
        match self {
            ParsedResponse::Model(model) => Some(model),
            ParsedResponse::Raw(_) => None,
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, ParsedResponse::Model(_))
    }

    /// The parsed data, dropping any schema.
    pub fn into_value(self) -> Value {
        match self {
            ParsedResponse::Raw(fields) => Value::Object(fields),
            ParsedResponse::Model(model) => model.into_data(),
        }
    }
}

impl Serialize for ParsedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParsedResponse::Raw(fields) => fields.serialize(serializer),
            ParsedResponse::Model(model) => model.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wirecast_description::ScalarType;

    use super::*;

    #[test]
    fn test_model_accessors() {
        let schema = Arc::new(Schema::object(
            "User",
            vec![Schema::scalar("id", ScalarType::Integer).at("json")],
        ));
        let model = Model::new(json!({ "id": 7 }), Arc::clone(&schema));

        assert_eq!(model.get("id"), Some(&json!(7)));
        assert!(Arc::ptr_eq(model.schema(), &schema));
        assert_eq!(serde_json::to_value(&model).unwrap(), json!({ "id": 7 }));
    }

    #[test]
    fn test_parsed_response_into_value() {
        let mut fields = Fields::new();
        fields.insert("body".to_string(), json!("hi"));
        let raw = ParsedResponse::Raw(fields);

        assert!(!raw.is_model());
        assert!(raw.as_model().is_none());
        assert_eq!(raw.into_value(), json!({ "body": "hi" }));
    }
}
