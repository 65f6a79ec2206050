//! Parsing of responses no model applies to.

use serde_json::Value;
use wirecast_core::Response;

use crate::{Command, Fields, Result, decode};

/// Key used for bodies that don't decode to a mapping.
pub const BODY_KEY: &str = "body";

/// Turns a response into a generic mapping when no model applies, or when
/// the command asks for raw processing.
///
/// Closures with the same signature implement the trait:
///
/// ```ignore
/// let parser = ResponseParser::new(VisitorRegistry::with_defaults(), |_: &Command, response: &Response, _: Option<&str>| {
///     Ok(Fields::from_iter([("status".to_string(), response.status().as_u16().into())]))
/// });
/// ```
pub trait FallbackParser: Send + Sync {
    /// Produce a mapping for the response.
    ///
    /// `content_type` overrides the response's own `Content-Type` header.
    fn parse_raw(
        &self,
        command: &Command,
        response: &Response,
        content_type: Option<&str>,
    ) -> Result<Fields>;
}

impl<F> FallbackParser for F
where
    F: Fn(&Command, &Response, Option<&str>) -> Result<Fields> + Send + Sync,
{
    fn parse_raw(
        &self,
        command: &Command,
        response: &Response,
        content_type: Option<&str>,
    ) -> Result<Fields> {
        self(command, response, content_type)
    }
}

/// Decodes the body according to its content type.
///
/// | content type contains | result                                        |
/// |-----------------------|-----------------------------------------------|
/// | `json`                | the JSON object (other values under `body`)   |
/// | `xml`                 | the root element (text roots under `body`)    |
/// | anything else         | `{"body": <text>}`                            |
///
/// An empty body always yields an empty mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl FallbackParser for DefaultParser {
    fn parse_raw(
        &self,
        _command: &Command,
        response: &Response,
        content_type: Option<&str>,
    ) -> Result<Fields> {
        if response.body().is_empty() {
            return Ok(Fields::new());
        }

        let content_type = content_type
            .map(str::to_ascii_lowercase)
            .or_else(|| response.content_type().map(|ct| ct.to_ascii_lowercase()))
            .unwrap_or_default();

        let document = if content_type.contains("json") {
            decode::json_body(response)?
        } else if content_type.contains("xml") {
            decode::xml_body(response)?
        } else {
            Some(Value::String(response.body_text().into_owned()))
        };

        tracing::trace!(content_type = %content_type, "fallback parse");

        Ok(match document {
            None => Fields::new(),
            Some(Value::Object(fields)) => fields,
            Some(other) => Fields::from_iter([(BODY_KEY.to_string(), other)]),
        })
    }
}
