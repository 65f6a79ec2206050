//! Service descriptions for wirecast.
//!
//! A service description lists the operations of a service and the models
//! their responses are mapped into. Descriptions are usually loaded from a
//! TOML file:
//!
//! ```toml
//! [operations.GetUser]
//! response_model = "User"
//!
//! [models.User]
//! type = "object"
//!
//! [models.User.properties.id]
//! type = "integer"
//! location = "json"
//! ```
//!
//! but can also be assembled in code with [`ServiceDescription::with_model`]
//! and [`ServiceDescription::with_operation`].
//!
//! Array `items` take the array model's name, which is also their wire name
//! unless `sent_as` is set. For XML arrays wrapped in a parent element, set
//! `items.sent_as` to the item element name:
//!
//! ```toml
//! [models.Users]
//! type = "array"
//! location = "xml"
//! items = { type = "object", sent_as = "user", properties = { id = { type = "integer" } } }
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod description;
mod error;
mod operation;
mod schema;

pub use description::{DescriptionFile, ParseContext, ServiceDescription};
pub use error::{Error, Result, SourceContext};
pub use operation::Operation;
pub use schema::{ScalarType, Schema, SchemaKind};
