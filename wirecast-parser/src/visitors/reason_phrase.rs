use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use super::fields_mut;
use crate::{Command, ResponseVisitor, Result};

/// Extracts the reason phrase of the status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReasonPhraseVisitor;

impl ResponseVisitor for ReasonPhraseVisitor {
    fn name(&self) -> &'static str {
        "reasonPhrase"
    }

    fn visit(
        &self,
        _command: &Command,
        response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()> {
        let reason = response.reason().map(Value::from).unwrap_or(Value::Null);
        fields_mut(result).insert(schema.name.clone(), reason);
        Ok(())
    }
}
