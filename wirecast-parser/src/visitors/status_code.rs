use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use super::fields_mut;
use crate::{Command, ResponseVisitor, Result};

/// Extracts the numeric status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusCodeVisitor;

impl ResponseVisitor for StatusCodeVisitor {
    fn name(&self) -> &'static str {
        "statusCode"
    }

    fn visit(
        &self,
        _command: &Command,
        response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        fields_mut(result).insert(
            schema.name.clone(),
            Value::from(response.status().as_u16()),
        );
        Ok(())
    }
}
