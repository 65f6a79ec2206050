//! Response model schemas.
//!
//! A [`Schema`] describes one field or container of an expected response.
//! Objects carry ordered properties, arrays carry a single item schema and
//! everything else is a scalar leaf.

pub(crate) mod deserialize;

use std::fmt;

use wirecast_core::Location;

/// Scalar (leaf) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Any,
}

impl ScalarType {
    /// Get the type name used in service descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Number => "number",
            ScalarType::Boolean => "boolean",
            ScalarType::Null => "null",
            ScalarType::Any => "any",
        }
    }

    /// Look up a scalar type by its description name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(ScalarType::String),
            "integer" => Some(ScalarType::Integer),
            "number" => Some(ScalarType::Number),
            "boolean" => Some(ScalarType::Boolean),
            "null" => Some(ScalarType::Null),
            "any" => Some(ScalarType::Any),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Named properties, in declaration order.
    Object {
        properties: Vec<Schema>,
        /// Whether keys not declared in `properties` are kept.
        additional_properties: bool,
    },
    /// A homogeneous list.
    Array { items: Box<Schema> },
    /// A leaf value.
    Scalar(ScalarType),
}

/// A field or container of an expected response.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Key of this value in the result.
    pub name: String,
    /// Which visitor extracts this value. Unlocated nodes are only filled in
    /// as part of a located ancestor.
    pub location: Option<Location>,
    /// Key of this value on the wire, when it differs from `name`.
    pub sent_as: Option<String>,
    pub description: Option<String>,
    pub kind: SchemaKind,
}

impl Schema {
    /// Create a schema node of the given kind.
    pub fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            location: None,
            sent_as: None,
            description: None,
            kind,
        }
    }

    /// Create an object schema that keeps additional properties.
    pub fn object(name: impl Into<String>, properties: Vec<Schema>) -> Self {
        Self::new(
            name,
            SchemaKind::Object {
                properties,
                additional_properties: true,
            },
        )
    }

    /// Create an array schema.
    pub fn array(name: impl Into<String>, items: Schema) -> Self {
        Self::new(
            name,
            SchemaKind::Array {
                items: Box::new(items),
            },
        )
    }

    /// Create a scalar schema.
    pub fn scalar(name: impl Into<String>, ty: ScalarType) -> Self {
        Self::new(name, SchemaKind::Scalar(ty))
    }

    /// Set the location.
    pub fn at(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the wire name.
    pub fn sent_as(mut self, wire_name: impl Into<String>) -> Self {
        self.sent_as = Some(wire_name.into());
        self
    }

    /// Set whether undeclared keys are kept. No effect on non-object nodes.
    pub fn additional_properties(mut self, allowed: bool) -> Self {
        if let SchemaKind::Object {
            additional_properties,
            ..
        } = &mut self.kind
        {
            *additional_properties = allowed;
        }
        self
    }

    /// A copy of this node under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Key of this value on the wire.
    pub fn wire_name(&self) -> &str {
        self.sent_as.as_deref().unwrap_or(&self.name)
    }

    /// The type tag as written in service descriptions.
    pub fn type_tag(&self) -> &'static str {
        match &self.kind {
            SchemaKind::Object { .. } => "object",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Scalar(ty) => ty.as_str(),
        }
    }

    /// Object properties; empty for other kinds.
    pub fn properties(&self) -> &[Schema] {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties,
            _ => &[],
        }
    }

    /// Find a property by result name.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties().iter().find(|p| p.name == name)
    }

    /// Array item schema, if this is an array.
    pub fn items(&self) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Array { items } => Some(items),
            _ => None,
        }
    }

    /// Whether undeclared keys are kept (always true for non-objects).
    pub fn allows_additional_properties(&self) -> bool {
        match &self.kind {
            SchemaKind::Object {
                additional_properties,
                ..
            } => *additional_properties,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Schema {
        Schema::object(
            "User",
            vec![
                Schema::scalar("id", ScalarType::Integer)
                    .at(Location::Json)
                    .sent_as("user_id"),
                Schema::scalar("etag", ScalarType::String).at(Location::Header),
            ],
        )
    }

    #[test]
    fn test_wire_name_defaults_to_name() {
        let schema = user();
        assert_eq!(schema.property("id").unwrap().wire_name(), "user_id");
        assert_eq!(schema.property("etag").unwrap().wire_name(), "etag");
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(user().type_tag(), "object");
        assert_eq!(Schema::array("list", user()).type_tag(), "array");
        assert_eq!(Schema::scalar("n", ScalarType::Number).type_tag(), "number");
    }

    #[test]
    fn test_renamed_leaves_original_untouched() {
        let list = Schema::array("Users", user()).at(Location::Json);
        let renamed = list.renamed("items");

        assert_eq!(list.name, "Users");
        assert_eq!(renamed.name, "items");
        assert_eq!(renamed.location, Some(Location::Json));
        assert_eq!(renamed.items(), list.items());
    }

    #[test]
    fn test_additional_properties() {
        assert!(user().allows_additional_properties());
        assert!(!user().additional_properties(false).allows_additional_properties());
        assert!(Schema::scalar("s", ScalarType::String)
            .additional_properties(false)
            .allows_additional_properties());
    }

    #[test]
    fn test_scalar_type_names() {
        for ty in [
            ScalarType::String,
            ScalarType::Integer,
            ScalarType::Number,
            ScalarType::Boolean,
            ScalarType::Null,
            ScalarType::Any,
        ] {
            assert_eq!(ScalarType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(ScalarType::from_name("object"), None);
    }
}
