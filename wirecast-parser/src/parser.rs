//! The response parser.

use serde_json::Value;
use wirecast_core::{ProcessingMode, Response, ResponseKind};
use wirecast_description::Schema;

use crate::{
    Command, DefaultParser, FallbackParser, Model, ParsedResponse, Result, ResponseVisitor,
    VisitorRegistry, mapper,
};

/// Parses responses into models using a registry of location visitors.
///
/// The parser holds no per-parse state: one instance can serve any number
/// of parses, including concurrent ones from several threads.
pub struct ResponseParser {
    registry: VisitorRegistry,
    fallback: Box<dyn FallbackParser>,
}

impl ResponseParser {
    /// Create a parser from a registry and the parser used when no model applies.
    pub fn new(registry: VisitorRegistry, fallback: impl FallbackParser + 'static) -> Self {
        Self {
            registry,
            fallback: Box::new(fallback),
        }
    }

    /// A parser with the built-in visitors and [`DefaultParser`] as fallback.
    pub fn with_default_visitors() -> Self {
        Self::new(VisitorRegistry::with_defaults(), DefaultParser)
    }

    /// Register a visitor, replacing any previous one for the location.
    pub fn register_visitor(
        &mut self,
        location: impl Into<wirecast_core::Location>,
        visitor: impl ResponseVisitor + 'static,
    ) -> &mut Self {
        self.registry.register(location, visitor);
        self
    }

    pub fn registry(&self) -> &VisitorRegistry {
        &self.registry
    }

    /// Parse the response to `command`.
    ///
    /// If the operation responds with a model that the service describes,
    /// the model drives the parse. Otherwise the fallback parser's output is
    /// returned as is. When the command selects [`ProcessingMode::Raw`] the
    /// fallback output is still wrapped in the model, but no visitor runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`](crate::Error::UnknownOperation)
    /// if the description has no such operation, and propagates visitor,
    /// registry and fallback errors unchanged.
    pub fn parse(
        &self,
        command: &Command,
        response: &Response,
        content_type: Option<&str>,
    ) -> Result<ParsedResponse> {
        let operation = command.operation()?;

        let schema = match (operation.response_kind(), operation.response_model()) {
            (ResponseKind::Model, Some(model)) => command.description().get_schema(model),
            _ => None,
        };

        let Some(schema) = schema else {
            tracing::debug!(
                operation = operation.name(),
                "no response model, using fallback parser"
            );
            let fields = self.fallback.parse_raw(command, response, content_type)?;
            return Ok(ParsedResponse::Raw(fields));
        };

        if command.processing_mode() == ProcessingMode::Raw {
            tracing::debug!(
                operation = operation.name(),
                model = %schema.name,
                "raw processing requested, skipping visitors"
            );
            let fields = self.fallback.parse_raw(command, response, content_type)?;
            return Ok(ParsedResponse::Model(Model::new(
                Value::Object(fields),
                schema,
            )));
        }

        tracing::debug!(
            operation = operation.name(),
            model = %schema.name,
            kind = schema.type_tag(),
            "mapping response"
        );
        let data = self.visit_result(&schema, command, response)?;
        Ok(ParsedResponse::Model(Model::new(data, schema)))
    }

    /// Map a response through `schema`, bypassing operation lookup.
    pub fn visit_result(
        &self,
        schema: &Schema,
        command: &Command,
        response: &Response,
    ) -> Result<Value> {
        mapper::visit_result(&self.registry, schema, command, response)
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::with_default_visitors()
    }
}

impl std::fmt::Debug for ResponseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseParser")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
