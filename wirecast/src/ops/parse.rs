//! Parse operation - map a saved response through the description.

use std::sync::Arc;

use eyre::{Context, Result};
use serde_json::Value;
use wirecast_core::{ProcessingMode, Response};
use wirecast_description::ServiceDescription;
use wirecast_parser::{Command, ResponseParser};

/// What to parse the response as.
#[derive(Debug)]
pub struct ParseOptions<'a> {
    pub operation: &'a str,
    pub content_type: Option<&'a str>,
    pub raw: bool,
}

/// Execute the parse operation.
///
/// `message` is a raw HTTP/1.x response. Returns the parsed data.
pub fn parse(
    description: ServiceDescription,
    message: &[u8],
    options: &ParseOptions<'_>,
) -> Result<Value> {
    let response = Response::from_message(message).wrap_err("Failed to read response")?;
    tracing::debug!(
        status = response.status().as_u16(),
        body_len = response.body().len(),
        "read response"
    );

    let mut command = Command::new(Arc::new(description), options.operation);
    if options.raw {
        command = command.with_processing_mode(ProcessingMode::Raw);
    }

    let parsed = ResponseParser::with_default_visitors()
        .parse(&command, &response, options.content_type)
        .wrap_err_with(|| format!("Failed to parse response for '{}'", options.operation))?;

    Ok(parsed.into_value())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SERVICE: &str = r#"
        [operations.GetUser]
        response_model = "User"

        [models.User]
        type = "object"
        properties = { id = { type = "integer", location = "json", sent_as = "user_id" }, status = { type = "integer", location = "statusCode" } }
    "#;

    const MESSAGE: &[u8] =
        b"HTTP/1.1 201 Created\r\nContent-Type: application/json\r\n\r\n{\"user_id\": 5}";

    fn options(raw: bool) -> ParseOptions<'static> {
        ParseOptions {
            operation: "GetUser",
            content_type: None,
            raw,
        }
    }

    #[test]
    fn test_parse_model() {
        let value = parse(SERVICE.parse().unwrap(), MESSAGE, &options(false)).unwrap();
        assert_eq!(value, json!({ "id": 5, "status": 201 }));
    }

    #[test]
    fn test_parse_raw() {
        let value = parse(SERVICE.parse().unwrap(), MESSAGE, &options(true)).unwrap();
        assert_eq!(value, json!({ "user_id": 5 }));
    }

    #[test]
    fn test_unknown_operation() {
        let options = ParseOptions {
            operation: "DeleteUser",
            ..options(false)
        };
        let err = parse(SERVICE.parse().unwrap(), MESSAGE, &options).unwrap_err();
        assert!(err.to_string().contains("DeleteUser"));
    }

    #[test]
    fn test_unreadable_message() {
        let err = parse(SERVICE.parse().unwrap(), b"\r\n\r\n", &options(false)).unwrap_err();
        assert_eq!(err.to_string(), "Failed to read response");
    }
}
