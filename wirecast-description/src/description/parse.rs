//! Service description parsing from files and strings.

use std::{path::Path, str::FromStr, sync::Arc};

use indexmap::IndexMap;
use serde::Deserialize;
use wirecast_core::ResponseKind;

use super::{ServiceDescription, validate::ParseContext};
use crate::{
    Error, Operation, Result, Schema, error::SourceContext, schema::deserialize::RawSchema,
};

/// Root of a service description file.
#[derive(Debug, Deserialize)]
struct RawDescription {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    operations: IndexMap<String, RawOperation>,
    #[serde(default)]
    models: IndexMap<String, RawSchema>,
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    response_kind: Option<ResponseKind>,
    response_model: Option<String>,
    description: Option<String>,
}

impl FromStr for ServiceDescription {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_description(s, "service.toml")
    }
}

impl ServiceDescription {
    /// Parse a service description file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_description(&content, &path.display().to_string())
    }

    /// Parse a service description from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_description(content, filename)
    }
}

/// Parse a description from content with the given filename for error reporting.
pub fn parse_description(content: &str, filename: &str) -> Result<ServiceDescription> {
    let raw: RawDescription = toml::from_str(content)
        .map_err(|e| SourceContext::new(content, filename).parse_error(e))?;
    let ctx = ParseContext::new(content, filename);

    let mut models = IndexMap::with_capacity(raw.models.len());
    for (name, model) in &raw.models {
        let schema = model.build(name, &ctx.push(name))?;
        models.insert(name.clone(), Arc::new(schema));
    }

    let mut operations = IndexMap::with_capacity(raw.operations.len());
    for (name, op) in &raw.operations {
        let operation = build_operation(name, op, &models, &ctx)?;
        operations.insert(name.clone(), operation);
    }

    tracing::debug!(
        filename,
        operations = operations.len(),
        models = models.len(),
        "loaded service description"
    );

    Ok(ServiceDescription {
        name: raw.name,
        description: raw.description,
        operations,
        models,
    })
}

fn build_operation(
    name: &str,
    raw: &RawOperation,
    models: &IndexMap<String, Arc<Schema>>,
    ctx: &ParseContext<'_>,
) -> Result<Operation> {
    let source = ctx.source_context();

    // An explicit kind wins; otherwise naming a model implies a modelled response.
    let kind = raw.response_kind.unwrap_or(match raw.response_model {
        Some(_) => ResponseKind::Model,
        None => ResponseKind::Raw,
    });

    if kind == ResponseKind::Model {
        let Some(model) = raw.response_model.as_deref() else {
            return Err(source.validation_error_at(
                format!("operation '{name}' has response_kind = \"model\" but no response_model"),
                super::validate::find_name_span(ctx.src(), name),
            ));
        };

        if !models.contains_key(model) {
            return Err(source.unknown_model_error(
                name,
                model,
                ctx.find_value_span("response_model", model),
            ));
        }
    }

    Ok(Operation::from_parts(
        name.to_string(),
        kind,
        raw.response_model.clone(),
        raw.description.clone(),
    ))
}
