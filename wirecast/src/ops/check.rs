//! Check operation - description validation.
//!
//! Loading a description already rejects malformed models. This pass looks
//! for models that load fine but cannot be mapped with the built-in visitors.

use std::path::Path;

use wirecast_core::Location;
use wirecast_description::{Schema, SchemaKind, ServiceDescription};
use wirecast_parser::VisitorRegistry;

use crate::reports::CheckReport;

/// Execute the check operation.
pub fn check(description: &ServiceDescription, config_path: &Path) -> CheckReport {
    let registry = VisitorRegistry::with_defaults();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    let mut operations = Vec::with_capacity(description.operation_count());
    for operation in description.operations() {
        let Some(model) = operation.response_model() else {
            operations.push(format!("{} (raw)", operation.name()));
            continue;
        };
        if let Some(schema) = description.get_schema(model) {
            operations.push(format!("{} -> {} ({})", operation.name(), model, schema.type_tag()));
            if let SchemaKind::Scalar(_) = schema.kind {
                errors.push(format!(
                    "operation '{}' responds with '{}', a {} model; only object and array models can be mapped",
                    operation.name(),
                    model,
                    schema.type_tag()
                ));
            }
        }
    }

    let mut models = Vec::with_capacity(description.model_count());
    for (name, schema) in description.models() {
        models.push(format!("{} ({})", name, schema.type_tag()));

        let used = description
            .operations()
            .any(|operation| operation.response_model() == Some(name));
        if !used {
            infos.push(format!("model '{name}' is not used by any operation"));
        }

        match &schema.kind {
            SchemaKind::Array { items } => match &schema.location {
                None => errors.push(format!("array model '{name}' has no location")),
                Some(location) => {
                    if !registry.contains(location) {
                        warnings.push(format!(
                            "array model '{name}' uses location '{location}', which has no built-in visitor"
                        ));
                    }
                    if *location == Location::Xml && items.sent_as.is_none() {
                        warnings.push(format!(
                            "xml array model '{name}' has no items.sent_as; the item element name defaults to '{}', so a wrapper element around differently named items is not unwrapped",
                            items.wire_name()
                        ));
                    }
                    nested_locations(schema, name, &mut infos);
                }
            },
            SchemaKind::Object { properties, .. } => {
                for property in properties {
                    let path = format!("{}.{}", name, property.name);
                    if let Some(location) = &property.location {
                        if !registry.contains(location) {
                            warnings.push(format!(
                                "property '{path}' uses location '{location}', which has no built-in visitor"
                            ));
                        }
                    }
                    nested_locations(property, &path, &mut infos);
                }
            }
            SchemaKind::Scalar(_) => {}
        }
    }

    CheckReport {
        config_path: config_path.to_path_buf(),
        name: description.name().map(str::to_string),
        operations,
        models,
        errors,
        warnings,
        infos,
    }
}

/// Report locations below the top level; they are never visited on their own.
fn nested_locations(schema: &Schema, path: &str, infos: &mut Vec<String>) {
    let children: Vec<(String, &Schema)> = match &schema.kind {
        SchemaKind::Object { properties, .. } => properties
            .iter()
            .map(|property| (format!("{}.{}", path, property.name), property))
            .collect(),
        SchemaKind::Array { items } => vec![(format!("{path}[]"), &**items)],
        SchemaKind::Scalar(_) => Vec::new(),
    };

    for (child_path, child) in children {
        if let Some(location) = &child.location {
            infos.push(format!(
                "location '{location}' of nested property '{child_path}' is ignored; it is read from its parent's value"
            ));
        }
        nested_locations(child, &child_path, infos);
    }
}
