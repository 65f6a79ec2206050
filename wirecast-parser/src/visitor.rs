//! The location visitor trait.

use serde_json::Value;
use wirecast_core::Response;
use wirecast_description::Schema;

use crate::{Command, Result};

/// A handler that extracts the values living at one response location.
///
/// Within a single parse the mapper calls `before` once, then `visit` for
/// every property at the visitor's location (in declaration order), then
/// `after` once. Visitors are shared between parses, possibly across
/// threads, so any state that must survive from `before` to `visit` belongs
/// in `result`, never in the visitor itself.
///
/// # Example
///
/// ```ignore
/// struct CookieVisitor;
///
/// impl ResponseVisitor for CookieVisitor {
///     fn name(&self) -> &'static str { "cookie" }
///
///     fn visit(&self, _command: &Command, response: &Response, schema: &Schema, result: &mut Value) -> Result<()> {
///         let cookies = response.header_values("set-cookie");
///         // ... find the cookie named schema.wire_name() and store it under schema.name
///         Ok(())
///     }
/// }
/// ```
pub trait ResponseVisitor: Send + Sync {
    /// The name of this visitor (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called once before any property at this location is visited.
    ///
    /// `result` is the accumulator being built: an object when mapping an
    /// object model, `null` when mapping an array model.
    ///
    /// # Errors
    ///
    /// Return an error to abort the parse.
    #[allow(unused_variables)]
    fn before(&self, command: &Command, response: &Response, result: &mut Value) -> Result<()> {
        Ok(())
    }

    /// Extract the value described by `schema` into `result[schema.name]`.
    ///
    /// # Errors
    ///
    /// Return an error to abort the parse.
    fn visit(
        &self,
        command: &Command,
        response: &Response,
        schema: &Schema,
        result: &mut Value,
    ) -> Result<()>;

    /// Called once after every property at this location has been visited.
    ///
    /// # Errors
    ///
    /// Return an error to abort the parse.
    #[allow(unused_variables)]
    fn after(&self, command: &Command) -> Result<()> {
        Ok(())
    }
}
