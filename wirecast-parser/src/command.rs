//! The command whose response is being parsed.

use std::sync::Arc;

use indexmap::IndexMap;
use wirecast_core::ProcessingMode;
use wirecast_description::{Operation, ServiceDescription};

use crate::{Error, Result};

/// An invocation of a service operation.
///
/// Visitors receive the command untouched; the parser itself only reads the
/// operation (to find the response model) and the processing mode option.
#[derive(Debug, Clone)]
pub struct Command {
    operation: String,
    description: Arc<ServiceDescription>,
    options: IndexMap<String, String>,
}

impl Command {
    /// Create a command for the named operation of a service.
    pub fn new(description: Arc<ServiceDescription>, operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            description,
            options: IndexMap::new(),
        }
    }

    /// Set an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Select how the response should be processed.
    pub fn with_processing_mode(self, mode: ProcessingMode) -> Self {
        self.with_option(ProcessingMode::OPTION_KEY, mode.as_str())
    }

    /// Get an option value.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn operation_name(&self) -> &str {
        &self.operation
    }

    /// The operation this command invokes.
    pub fn operation(&self) -> Result<&Operation> {
        self.description
            .operation(&self.operation)
            .ok_or_else(|| Error::UnknownOperation {
                name: self.operation.clone(),
            })
    }

    /// The service description the operation belongs to.
    pub fn description(&self) -> &ServiceDescription {
        &self.description
    }

    /// The processing mode selected through [`ProcessingMode::OPTION_KEY`].
    ///
    /// Defaults to [`ProcessingMode::Model`]; unrecognised values are
    /// treated as the default.
    pub fn processing_mode(&self) -> ProcessingMode {
        match self.option(ProcessingMode::OPTION_KEY) {
            None => ProcessingMode::default(),
            Some(value) => ProcessingMode::from_option(value).unwrap_or_else(|| {
                tracing::warn!(value, "unknown response processing mode, using model");
                ProcessingMode::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> Arc<ServiceDescription> {
        Arc::new(ServiceDescription::new().with_operation(Operation::new("Ping")))
    }

    #[test]
    fn test_operation_lookup() {
        let command = Command::new(description(), "Ping");
        assert_eq!(command.operation().unwrap().name(), "Ping");

        let missing = Command::new(description(), "Pong");
        assert!(matches!(
            missing.operation(),
            Err(Error::UnknownOperation { name }) if name == "Pong"
        ));
    }

    #[test]
    fn test_processing_mode_option() {
        let command = Command::new(description(), "Ping");
        assert_eq!(command.processing_mode(), ProcessingMode::Model);

        let raw = command.clone().with_processing_mode(ProcessingMode::Raw);
        assert_eq!(raw.option(ProcessingMode::OPTION_KEY), Some("raw"));
        assert_eq!(raw.processing_mode(), ProcessingMode::Raw);

        let odd = command.with_option(ProcessingMode::OPTION_KEY, "native");
        assert_eq!(odd.processing_mode(), ProcessingMode::Model);
    }
}
