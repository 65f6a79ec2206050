use std::path::{Path, PathBuf};

use super::ServiceDescription;
use crate::Result;

/// A service description file with both raw content and parsed description.
pub struct DescriptionFile {
    path: PathBuf,
    content: String,
    description: ServiceDescription,
}

impl DescriptionFile {
    /// Open and parse a service description file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let description = ServiceDescription::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            description,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed description.
    pub fn description(&self) -> &ServiceDescription {
        &self.description
    }

    /// Consume the file, keeping only the parsed description.
    pub fn into_description(self) -> ServiceDescription {
        self.description
    }
}
