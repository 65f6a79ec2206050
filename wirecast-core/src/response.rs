//! The wire response handed to the parser.

use std::borrow::Cow;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE};
use thiserror::Error;

/// Headers beyond this count are rejected.
pub const MAX_HEADERS: usize = 128;

/// Errors raised while reading a raw HTTP response message.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response message is empty")]
    MissingStatusLine,

    #[error("invalid status line '{line}'")]
    InvalidStatusLine { line: String },

    #[error("invalid status code '{code}'")]
    InvalidStatus { code: String },

    #[error("invalid header: {message}")]
    InvalidHeader { message: String },

    #[error("more than {max} headers")]
    TooManyHeaders { max: usize },
}

/// A received HTTP response: status line, headers and body.
///
/// The parser only ever reads from a response; it is built once by the
/// transport (or by [`Response::from_message`]) and passed by reference.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create an empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Set the reason phrase reported on the status line.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Append a header value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Read a response from a raw HTTP/1.x message.
    ///
    /// Accepts both `\r\n` and `\n` line endings and folded (obs-fold)
    /// header values. Everything after the first blank line is the body; a
    /// message without a blank line has no body.
    pub fn from_message(message: &[u8]) -> Result<Self, ResponseError> {
        let (head, body) = split_message(message);
        let head = trim_line_breaks(head);
        if head.is_empty() {
            return Err(ResponseError::MissingStatusLine);
        }

        // The head is re-terminated so httparse always sees a complete message.
        let mut buf = Vec::with_capacity(head.len() + 4);
        buf.extend_from_slice(head);
        buf.extend_from_slice(b"\r\n\r\n");

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut parsed = httparse::Response::new(&mut headers);
        let status = httparse::ParserConfig::default()
            .allow_obsolete_multiline_headers_in_responses(true)
            .allow_spaces_after_header_name_in_responses(true)
            .parse_response(&mut parsed, &buf)
            .map_err(|e| head_error(e, head))?;
        if status.is_partial() {
            return Err(ResponseError::InvalidStatusLine {
                line: status_line(head),
            });
        }

        let code = parsed.code.unwrap_or_default();
        let status = StatusCode::from_u16(code).map_err(|_| ResponseError::InvalidStatus {
            code: code.to_string(),
        })?;

        let mut response = Response::new(status).with_body(Bytes::copy_from_slice(body));
        response.reason = parsed
            .reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .map(str::to_string);

        for header in parsed.headers.iter() {
            let invalid = |message: &str| ResponseError::InvalidHeader {
                message: format!("{message} in '{}'", header.name),
            };
            let name = HeaderName::from_bytes(header.name.as_bytes())
                .map_err(|_| invalid("invalid name"))?;
            let value = HeaderValue::from_bytes(&unfold(header.value))
                .map_err(|_| invalid("invalid value"))?;
            response.headers.append(name, value);
        }

        Ok(response)
    }

    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase from the status line, or the canonical one.
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .or_else(|| self.status.canonical_reason())
    }

    /// All headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Every value of the named header, in received order.
    pub fn header_values(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect()
    }

    /// The `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<Cow<'_, str>> {
        self.headers
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
    }

    /// The raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

fn split_message(message: &[u8]) -> (&[u8], &[u8]) {
    let crlf = find(message, b"\r\n\r\n").map(|pos| (pos, 4));
    let lf = find(message, b"\n\n").map(|pos| (pos, 2));

    let boundary = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };

    match boundary {
        Some((pos, len)) => (&message[..pos], &message[pos + len..]),
        None => (message, &[]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn trim_line_breaks(mut bytes: &[u8]) -> &[u8] {
    while let [b'\r' | b'\n', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b'\r' | b'\n'] = bytes {
        bytes = rest;
    }
    bytes
}

fn status_line(head: &[u8]) -> String {
    let line = head.split(|&b| b == b'\n').next().unwrap_or_default();
    String::from_utf8_lossy(line).trim_end_matches('\r').to_string()
}

fn head_error(error: httparse::Error, head: &[u8]) -> ResponseError {
    match error {
        httparse::Error::Version => ResponseError::InvalidStatusLine {
            line: status_line(head),
        },
        httparse::Error::Status => ResponseError::InvalidStatus {
            code: status_line(head)
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .to_string(),
        },
        httparse::Error::TooManyHeaders => ResponseError::TooManyHeaders { max: MAX_HEADERS },
        other => ResponseError::InvalidHeader {
            message: other.to_string(),
        },
    }
}

/// Join the lines of a folded header value with single spaces.
fn unfold(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    let mut folding = false;
    for &byte in value {
        match byte {
            b'\r' | b'\n' => folding = true,
            b' ' | b'\t' if folding => {}
            _ => {
                if folding {
                    out.push(b' ');
                    folding = false;
                }
                out.push(byte);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_message_crlf() {
        let message = b"HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nX-Id: 7\r\n\r\n{\"ok\":true}";
        let response = Response::from_message(message).unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.reason(), Some("Created"));
        assert_eq!(response.content_type().as_deref(), Some("application/json"));
        assert_eq!(response.header_values("x-id"), vec!["7"]);
        assert_eq!(response.body_text(), "{\"ok\":true}");
    }

    #[test]
    fn test_from_message_lf_and_custom_reason() {
        let message = b"HTTP/1.0 404 Nothing Here\nX-Tag: a\nX-Tag: b\n\nmissing\n";
        let response = Response::from_message(message).unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.reason(), Some("Nothing Here"));
        assert_eq!(response.header_values("X-Tag"), vec!["a", "b"]);
        assert_eq!(response.body_text(), "missing\n");
    }

    #[test]
    fn test_from_message_without_body() {
        let response = Response::from_message(b"HTTP/1.1 204 No Content\r\n").unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_reason_falls_back_to_canonical() {
        let response = Response::from_message(b"HTTP/1.1 200\r\n\r\n").unwrap();
        assert_eq!(response.reason(), Some("OK"));
    }

    #[test]
    fn test_from_message_errors() {
        assert!(matches!(
            Response::from_message(b""),
            Err(ResponseError::MissingStatusLine)
        ));
        assert!(matches!(
            Response::from_message(b"SPDY 200 OK\r\n\r\n"),
            Err(ResponseError::InvalidStatusLine { .. })
        ));
        assert!(matches!(
            Response::from_message(b"HTTP/1.1 abc OK\r\n\r\n"),
            Err(ResponseError::InvalidStatus { .. })
        ));
        assert!(matches!(
            Response::from_message(b"HTTP/1.1 200 OK\r\nnot a header\r\n\r\n"),
            Err(ResponseError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_from_message_error_details() {
        match Response::from_message(b"SPDY 200 OK\r\n\r\n") {
            Err(ResponseError::InvalidStatusLine { line }) => assert_eq!(line, "SPDY 200 OK"),
            other => panic!("unexpected result: {other:?}"),
        }
        match Response::from_message(b"HTTP/1.1 abc OK\r\n\r\n") {
            Err(ResponseError::InvalidStatus { code }) => assert_eq!(code, "abc"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_folded_header_is_joined() {
        let message = b"HTTP/1.1 200 OK\r\nX-Note: first\r\n  second\r\nX-Id: 1\r\n\r\n";
        let response = Response::from_message(message).unwrap();

        assert_eq!(response.header_values("x-note"), vec!["first second"]);
        assert_eq!(response.header_values("x-id"), vec!["1"]);
    }

    #[test]
    fn test_too_many_headers() {
        let mut message = b"HTTP/1.1 200 OK\r\n".to_vec();
        for i in 0..=MAX_HEADERS {
            message.extend_from_slice(format!("X-H{i}: v\r\n").as_bytes());
        }
        message.extend_from_slice(b"\r\n");

        assert!(matches!(
            Response::from_message(&message),
            Err(ResponseError::TooManyHeaders { max: MAX_HEADERS })
        ));
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let response = Response::from_message(b"\r\nHTTP/1.1 202 Accepted\r\n\r\nqueued").unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.body_text(), "queued");
    }

    #[test]
    fn test_builder() {
        let response = Response::new(StatusCode::OK)
            .with_reason("Fine")
            .with_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("abc"),
            )
            .with_body("hello");

        assert_eq!(response.reason(), Some("Fine"));
        assert_eq!(response.header_values("X-Request-Id"), vec!["abc"]);
        assert_eq!(response.body_text(), "hello");
    }
}
