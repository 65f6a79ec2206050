//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from description validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the description file.
    pub config_path: PathBuf,
    /// Service name.
    pub name: Option<String>,
    /// One summary line per operation.
    pub operations: Vec<String>,
    /// One summary line per model.
    pub models: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.is_valid() {
            return;
        }
        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        if let Some(name) = &self.name {
            out.key_value("service", name);
        }

        out.section(&count(self.operations.len(), "operation"));
        for operation in &self.operations {
            out.list_item(operation);
        }

        out.section(&count(self.models.len(), "model"));
        for model in &self.models {
            out.list_item(model);
        }
    }
}

fn count(n: usize, noun: &str) -> String {
    format!("{} {}{}", n, noun, if n == 1 { "" } else { "s" })
}
