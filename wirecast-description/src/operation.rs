use wirecast_core::ResponseKind;

/// An operation of a service: what it responds with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    response_kind: ResponseKind,
    response_model: Option<String>,
    description: Option<String>,
}

impl Operation {
    /// Create an operation with a raw (unmodelled) response.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response_kind: ResponseKind::Raw,
            response_model: None,
            description: None,
        }
    }

    /// Declare the model the operation responds with.
    pub fn responding_with(mut self, model: impl Into<String>) -> Self {
        self.response_kind = ResponseKind::Model;
        self.response_model = Some(model.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn response_kind(&self) -> ResponseKind {
        self.response_kind
    }

    /// Name of the response model, if one is declared.
    pub fn response_model(&self) -> Option<&str> {
        self.response_model.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn from_parts(
        name: String,
        response_kind: ResponseKind,
        response_model: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name,
            response_kind,
            response_model,
            description,
        }
    }
}
