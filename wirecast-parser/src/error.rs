use miette::Diagnostic;
use thiserror::Error;
use wirecast_core::Location;

/// Result type for response parsing.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("model '{model}' has type '{tag}'; only object and array models can be mapped")]
    #[diagnostic(
        code(wirecast::unsupported_model_type),
        help("wrap the value in an object model and give the property a location")
    )]
    UnsupportedModelType { model: String, tag: String },

    #[error("no visitor registered for location '{location}'")]
    #[diagnostic(
        code(wirecast::unregistered_location),
        help("register a visitor for '{location}' before parsing")
    )]
    UnregisteredLocation { location: Location },

    #[error("array model '{model}' has no location")]
    #[diagnostic(
        code(wirecast::unlocated_array),
        help("set `location` on the array model so a visitor can extract it")
    )]
    UnlocatedArray { model: String },

    #[error("unknown operation '{name}'")]
    #[diagnostic(code(wirecast::unknown_operation))]
    UnknownOperation { name: String },

    #[error("invalid JSON body")]
    #[diagnostic(code(wirecast::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid XML body: {message}")]
    #[diagnostic(code(wirecast::xml))]
    Xml { message: String },

    #[error("{location} visitor failed: {message}")]
    #[diagnostic(code(wirecast::visitor))]
    Visitor { location: Location, message: String },
}

impl Error {
    /// Create a visitor failure for the given location.
    pub fn visitor(location: impl Into<Location>, message: impl Into<String>) -> Self {
        Error::Visitor {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(source: quick_xml::Error) -> Self {
        Error::Xml {
            message: source.to_string(),
        }
    }
}
