//! Schema-driven response parsing.
//!
//! A [`ResponseParser`] turns a [`Response`](wirecast_core::Response) into
//! data shaped by the operation's response model. Each property of the model
//! names the location it lives at (a header, the status code, a key of a
//! JSON body, ...) and a [`ResponseVisitor`] registered for that location
//! extracts it.
//!
//! # Module Organization
//!
//! - [`registry`] - Location to visitor lookup ([`VisitorRegistry`])
//! - [`visitors`] - Built-in visitors for the built-in locations
//! - [`mapper`] - Object and array mapping, driving the visitor lifecycle
//! - [`fallback`] - Parsing of responses no model applies to
//! - [`testing`] - Recording visitors for tests (feature-gated)
//!
//! # Example
//!
//! ```ignore
//! let description = Arc::new(ServiceDescription::from_file("service.toml")?);
//! let parser = ResponseParser::with_default_visitors();
//!
//! let command = Command::new(description, "GetUser");
//! let parsed = parser.parse(&command, &response, None)?;
//! println!("{}", serde_json::to_string_pretty(&parsed)?);
//! ```

mod command;
pub(crate) mod decode;
mod error;
pub mod fallback;
pub mod mapper;
mod model;
mod parser;
pub mod registry;
mod visitor;
pub mod visitors;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::Command;
pub use decode::{XML_ATTRIBUTES_KEY, XML_TEXT_KEY};
pub use error::{Error, Result};
pub use fallback::{DefaultParser, FallbackParser};
pub use model::{Model, ParsedResponse};
pub use parser::ResponseParser;
pub use registry::VisitorRegistry;
pub use visitor::ResponseVisitor;

/// A string-keyed mapping of parsed values, in insertion order.
pub type Fields = serde_json::Map<String, serde_json::Value>;
