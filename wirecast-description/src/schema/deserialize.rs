use indexmap::IndexMap;
use serde::Deserialize;
use wirecast_core::Location;

use super::{ScalarType, Schema, SchemaKind};
use crate::{Result, description::ParseContext};

/// A schema table as written in the description, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSchema {
    #[serde(rename = "type")]
    ty: String,
    location: Option<String>,
    sent_as: Option<String>,
    description: Option<String>,
    additional_properties: Option<bool>,
    properties: Option<RawProperties>,
    items: Option<Box<RawSchema>>,
}

/// Property with name field for array format deserialization
#[derive(Debug, Deserialize)]
pub(crate) struct NamedRawSchema {
    name: String,
    #[serde(flatten)]
    schema: RawSchema,
}

/// Untagged enum to support both array and map formats for properties
/// - Map: `[models.User.properties.id]` or `properties = { id = { type = "integer" } }`
/// - Array: `[[models.User.properties]]` with `name = "..."` field
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawProperties {
    Array(Vec<NamedRawSchema>),
    Map(IndexMap<String, RawSchema>),
}

impl RawProperties {
    /// Properties in declaration order.
    fn entries(&self) -> Vec<(&str, &RawSchema)> {
        match self {
            RawProperties::Array(vec) => vec
                .iter()
                .map(|p| (p.name.as_str(), &p.schema))
                .collect(),
            RawProperties::Map(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        }
    }
}

impl RawSchema {
    /// Validate and convert into a [`Schema`] named `name`.
    ///
    /// `ctx` must already point at this node.
    pub(crate) fn build<'a>(&'a self, name: &str, ctx: &ParseContext<'a>) -> Result<Schema> {
        let source = ctx.source_context();

        let location = match self.location.as_deref() {
            Some(location) if location.trim().is_empty() => {
                return Err(source.validation_error_at(
                    format!("{} has an empty location", ctx.subject()),
                    ctx.find_span(),
                ));
            }
            Some(location) => Some(Location::from(location)),
            None => None,
        };

        let kind = match self.ty.as_str() {
            "object" => {
                self.reject_items(ctx)?;
                let properties = match &self.properties {
                    Some(properties) => properties
                        .entries()
                        .into_iter()
                        .map(|(prop_name, raw)| raw.build(prop_name, &ctx.push(prop_name)))
                        .collect::<Result<Vec<_>>>()?,
                    None => Vec::new(),
                };
                SchemaKind::Object {
                    properties,
                    additional_properties: self.additional_properties.unwrap_or(true),
                }
            }
            "array" => {
                self.reject_properties(ctx)?;
                let items = self.items.as_deref().ok_or_else(|| {
                    source.validation_error_at(
                        format!("{} is an array but has no 'items'", ctx.subject()),
                        ctx.find_span(),
                    )
                })?;
                // Items inherit the array's name, which is also their wire
                // name unless `sent_as` is set. XML item lists inside a wrapper
                // element are only unwrapped when that wire name matches the
                // item element, so XML arrays normally set `items.sent_as`.
                SchemaKind::Array {
                    items: Box::new(items.build(name, &ctx.push("items"))?),
                }
            }
            other => {
                let ty = ScalarType::from_name(other).ok_or_else(|| {
                    source.unknown_type_error(
                        other,
                        ctx.subject(),
                        ctx.find_value_span("type", other),
                    )
                })?;
                self.reject_items(ctx)?;
                self.reject_properties(ctx)?;
                SchemaKind::Scalar(ty)
            }
        };

        Ok(Schema {
            name: name.to_string(),
            location,
            sent_as: self.sent_as.clone(),
            description: self.description.clone(),
            kind,
        })
    }

    fn reject_items(&self, ctx: &ParseContext<'_>) -> Result<()> {
        if self.items.is_some() {
            return Err(ctx.source_context().validation_error_at(
                format!(
                    "{} has type '{}' but declares 'items' (only arrays have items)",
                    ctx.subject(),
                    self.ty
                ),
                ctx.find_span(),
            ));
        }
        Ok(())
    }

    fn reject_properties(&self, ctx: &ParseContext<'_>) -> Result<()> {
        if self.properties.is_some() {
            return Err(ctx.source_context().validation_error_at(
                format!(
                    "{} has type '{}' but declares 'properties' (only objects have properties)",
                    ctx.subject(),
                    self.ty
                ),
                ctx.find_span(),
            ));
        }
        Ok(())
    }
}
