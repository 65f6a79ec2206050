//! Core type definitions.

use serde::Deserialize;

/// What an operation declares as its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// No structured model; the response is handed to the fallback parser.
    #[default]
    Raw,
    /// The response is described by a named model.
    Model,
}

impl ResponseKind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Raw => "raw",
            ResponseKind::Model => "model",
        }
    }
}

/// How a command wants its response processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingMode {
    /// Skip schema-driven mapping and use the fallback parser output.
    Raw,
    /// Map the response through its model.
    #[default]
    Model,
}

impl ProcessingMode {
    /// Command option key that selects the processing mode.
    pub const OPTION_KEY: &'static str = "command.response_processing";

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Raw => "raw",
            ProcessingMode::Model => "model",
        }
    }

    /// Parse an option value. Unknown values yield `None`.
    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "raw" => Some(ProcessingMode::Raw),
            "model" => Some(ProcessingMode::Model),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_kind_as_str() {
        assert_eq!(ResponseKind::Raw.as_str(), "raw");
        assert_eq!(ResponseKind::Model.as_str(), "model");
        assert_eq!(ResponseKind::default(), ResponseKind::Raw);
    }

    #[test]
    fn test_processing_mode_from_option() {
        assert_eq!(ProcessingMode::from_option("raw"), Some(ProcessingMode::Raw));
        assert_eq!(
            ProcessingMode::from_option("model"),
            Some(ProcessingMode::Model)
        );
        assert_eq!(ProcessingMode::from_option("native"), None);
        assert_eq!(ProcessingMode::default(), ProcessingMode::Model);
    }
}
