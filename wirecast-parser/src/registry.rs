//! Location to visitor lookup.

use std::{collections::HashMap, fmt, sync::Arc};

use wirecast_core::Location;

use crate::{
    Error, Result, ResponseVisitor,
    visitors::{
        BodyVisitor, HeaderVisitor, JsonVisitor, ReasonPhraseVisitor, StatusCodeVisitor,
        XmlVisitor,
    },
};

/// Registry of visitors keyed by location.
///
/// A registry is a plain value: build one, register visitors, then hand it
/// to a [`ResponseParser`](crate::ResponseParser). Several registries can
/// coexist, e.g. one per test.
///
/// # Example
///
/// ```ignore
/// let mut registry = VisitorRegistry::with_defaults();
/// registry.register("cookie", CookieVisitor);
///
/// let visitor = registry.resolve(&Location::Json)?;
/// ```
#[derive(Clone, Default)]
pub struct VisitorRegistry {
    visitors: HashMap<Location, Arc<dyn ResponseVisitor>>,
}

impl VisitorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in visitors for every built-in location.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Location::StatusCode, StatusCodeVisitor);
        registry.register(Location::ReasonPhrase, ReasonPhraseVisitor);
        registry.register(Location::Header, HeaderVisitor);
        registry.register(Location::Body, BodyVisitor);
        registry.register(Location::Json, JsonVisitor);
        registry.register(Location::Xml, XmlVisitor);
        registry
    }

    /// Register a visitor, replacing any previous one for the location.
    pub fn register(
        &mut self,
        location: impl Into<Location>,
        visitor: impl ResponseVisitor + 'static,
    ) {
        self.register_shared(location, Arc::new(visitor));
    }

    /// Register an already shared visitor, replacing any previous one.
    pub fn register_shared(
        &mut self,
        location: impl Into<Location>,
        visitor: Arc<dyn ResponseVisitor>,
    ) {
        let location = location.into();
        tracing::trace!(%location, visitor = visitor.name(), "registering visitor");
        self.visitors.insert(location, visitor);
    }

    /// Get the visitor for a location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnregisteredLocation`] if nothing is registered for
    /// the location.
    pub fn resolve(&self, location: &Location) -> Result<Arc<dyn ResponseVisitor>> {
        self.visitors
            .get(location)
            .cloned()
            .ok_or_else(|| Error::UnregisteredLocation {
                location: location.clone(),
            })
    }

    /// Check if a visitor is registered for the location.
    pub fn contains(&self, location: &Location) -> bool {
        self.visitors.contains_key(location)
    }

    /// Registered locations, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.visitors.keys()
    }

    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl fmt::Debug for VisitorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locations: Vec<_> = self.visitors.keys().map(Location::as_str).collect();
        locations.sort_unstable();
        f.debug_struct("VisitorRegistry")
            .field("locations", &locations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use wirecast_core::Response;
    use wirecast_description::Schema;

    use super::*;
    use crate::Command;

    struct NamedVisitor(&'static str);

    impl ResponseVisitor for NamedVisitor {
        fn name(&self) -> &'static str {
            self.0
        }

        fn visit(
            &self,
            _command: &Command,
            _response: &Response,
            _schema: &Schema,
            _result: &mut Value,
        ) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults_cover_builtin_locations() {
        let registry = VisitorRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        for location in [
            Location::StatusCode,
            Location::ReasonPhrase,
            Location::Header,
            Location::Body,
            Location::Json,
            Location::Xml,
        ] {
            assert!(registry.contains(&location), "missing {location}");
        }
    }

    #[test]
    fn test_resolve_returns_same_instance() {
        let registry = VisitorRegistry::with_defaults();
        let a = registry.resolve(&Location::Json).unwrap();
        let b = registry.resolve(&Location::Json).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_resolve_unregistered_location() {
        let registry = VisitorRegistry::new();
        assert!(registry.is_empty());

        let err = registry
            .resolve(&Location::Custom("cookie".to_string()))
            .err()
            .expect("lookup should fail");
        assert!(matches!(
            err,
            Error::UnregisteredLocation { ref location } if location.as_str() == "cookie"
        ));
        assert_eq!(
            err.to_string(),
            "no visitor registered for location 'cookie'"
        );
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut registry = VisitorRegistry::new();
        registry.register("cookie", NamedVisitor("first"));
        registry.register("cookie", NamedVisitor("second"));

        assert_eq!(registry.len(), 1);
        let visitor = registry.resolve(&Location::from("cookie")).unwrap();
        assert_eq!(visitor.name(), "second");
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = VisitorRegistry::new();
        let b = VisitorRegistry::new();
        a.register(Location::Body, NamedVisitor("body"));

        assert!(a.contains(&Location::Body));
        assert!(!b.contains(&Location::Body));
    }

    #[test]
    fn test_debug_lists_locations() {
        let mut registry = VisitorRegistry::new();
        registry.register(Location::Json, NamedVisitor("json"));
        registry.register(Location::Body, NamedVisitor("body"));
        assert_eq!(
            format!("{registry:?}"),
            r#"VisitorRegistry { locations: ["body", "json"] }"#
        );
    }
}
