use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use super::fields_mut;
use crate::{Command, ResponseVisitor, Result};

/// Stores the whole body as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyVisitor;

impl ResponseVisitor for BodyVisitor {
    fn name(&self) -> &'static str {
        "body"
    }

    fn visit(
        &self,
        _command: &Command,
        response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        let body = response.body_text().into_owned();
        fields_mut(result).insert(schema.name.clone(), Value::String(body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::StatusCode;
    use serde_json::json;
    use wirecast_description::{ScalarType, ServiceDescription};

    use super::*;

    fn visit(response: &Response) -> Value {
        let command = Command::new(Arc::new(ServiceDescription::new()), "Get");
        let schema = Schema::scalar("content", ScalarType::String).sent_as("ignored");
        let mut result = json!({});
        BodyVisitor
            .visit(&command, response, &schema, &mut result)
            .unwrap();
        result
    }

    #[test]
    fn test_body_as_text() {
        let response = Response::new(StatusCode::OK).with_body("plain text\n");
        assert_eq!(visit(&response), json!({ "content": "plain text\n" }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let response = Response::new(StatusCode::OK).with_body(&b"ok \xff\xfe done"[..]);
        assert_eq!(
            visit(&response),
            json!({ "content": "ok \u{FFFD}\u{FFFD} done" })
        );
    }

    #[test]
    fn test_empty_body_is_empty_string() {
        let response = Response::new(StatusCode::NO_CONTENT);
        assert_eq!(visit(&response), json!({ "content": "" }));
    }
}
