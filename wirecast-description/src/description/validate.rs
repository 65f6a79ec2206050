//! Validation context and span lookup for description parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::error::SourceContext;

/// Parsing and validation context that carries source information.
///
/// Holds the source content, filename, and the current path through the
/// description (model name, then nested property names), so that errors
/// raised deep inside a model can point at the right place.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "service.toml");
/// let nested = ctx.push("User").push("address");
/// assert_eq!(nested.subject(), "property 'User.address'");
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments (e.g., ["User", "address", "street"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe the node at the current path for error messages.
    ///
    /// A single segment is a model, anything deeper is a property.
    pub fn subject(&self) -> String {
        match self.path.len() {
            0 => "service description".to_string(),
            1 => format!("model '{}'", self.path_string()),
            _ => format!("property '{}'", self.path_string()),
        }
    }

    /// Find the span of the innermost path segment in the source.
    pub fn find_span(&self) -> Option<SourceSpan> {
        self.path
            .last()
            .and_then(|name| find_name_span(self.source.src(), name))
    }

    /// Find the span of a `key = "value"` pair's value in the source.
    pub fn find_value_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), key, value)
    }
}

/// Find the span of a name in the TOML source
/// Searches for patterns like `.name]`, `.name.`, `{ name =`, or `name = "value"`
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    // Table header patterns with leading dot
    // e.g., [models.User] or [models.User.properties.id]
    let header_patterns = [format!(".{}]", name), format!(".{}.", name)];

    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            let start = pos + 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    // Inline table patterns
    // e.g., { name = or , name =
    let inline_patterns = [
        (format!("{{ {} ", name), 2usize),
        (format!("{{ {}=", name), 2usize),
        (format!("{{{}=", name), 1usize),
        (format!(", {} ", name), 2usize),
        (format!(", {}=", name), 2usize),
        (format!(",{}=", name), 1usize),
    ];

    for (pattern, skip) in &inline_patterns {
        if let Some(pos) = src.find(pattern) {
            let start = pos + skip;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    // Array format: [[models.User.properties]] followed by name = "id"
    find_value_span(src, "name", name)
}

/// Find the span of the value in `key = "value"` (either quote style).
pub(crate) fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        for sep in [" = ", "="] {
            let pattern = format!("{key}{sep}{quote}{value}{quote}");
            if let Some(pos) = src.find(&pattern) {
                let start = pos + key.len() + sep.len() + 1;
                return Some(SourceSpan::from((start, value.len())));
            }
        }
    }

    // No fallback - better to have no span than point to wrong location
    None
}
