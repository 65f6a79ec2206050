//! Response locations.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where in a response a piece of data lives.
///
/// Each location is handled by exactly one visitor. The built-in locations
/// cover the status line, the headers and the common body encodings;
/// [`Location::Custom`] lets callers plug in their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    /// The numeric status code.
    StatusCode,
    /// The reason phrase from the status line.
    ReasonPhrase,
    /// A response header (or a family of prefixed headers).
    Header,
    /// The raw body as text.
    Body,
    /// A key of a JSON body.
    Json,
    /// An element of an XML body.
    Xml,
    /// A location handled by a caller-provided visitor.
    Custom(String),
}

impl Location {
    /// Get the name used for this location in service descriptions.
    pub fn as_str(&self) -> &str {
        match self {
            Location::StatusCode => "statusCode",
            Location::ReasonPhrase => "reasonPhrase",
            Location::Header => "header",
            Location::Body => "body",
            Location::Json => "json",
            Location::Xml => "xml",
            Location::Custom(name) => name,
        }
    }

    /// Returns true if this is one of the built-in locations.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Location::Custom(_))
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        match name {
            "statusCode" => Location::StatusCode,
            "reasonPhrase" => Location::ReasonPhrase,
            "header" => Location::Header,
            "body" => Location::Body,
            "json" => Location::Json,
            "xml" => Location::Xml,
            other => Location::Custom(other.to_string()),
        }
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        match Location::from(name.as_str()) {
            Location::Custom(_) => Location::Custom(name),
            builtin => builtin,
        }
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        match location {
            Location::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Location::from(s))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for location in [
            Location::StatusCode,
            Location::ReasonPhrase,
            Location::Header,
            Location::Body,
            Location::Json,
            Location::Xml,
        ] {
            assert!(location.is_builtin());
            assert_eq!(Location::from(location.as_str()), location);
        }
    }

    #[test]
    fn test_unknown_name_is_custom() {
        let location: Location = "cookie".parse().unwrap();
        assert_eq!(location, Location::Custom("cookie".to_string()));
        assert!(!location.is_builtin());
        assert_eq!(location.to_string(), "cookie");
    }

    #[test]
    fn test_location_names_are_case_sensitive() {
        assert_eq!(
            Location::from("Header"),
            Location::Custom("Header".to_string())
        );
    }
}
