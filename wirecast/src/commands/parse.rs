use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use wirecast_description::DescriptionFile;

use super::UnwrapOrExit;
use crate::ops::{self, ParseOptions};

#[derive(Args)]
pub struct ParseCommand {
    /// Path to the service description (defaults to ./service.toml)
    #[arg(short, long, default_value = "service.toml")]
    pub description: PathBuf,

    /// Operation the response belongs to
    #[arg(short, long)]
    pub operation: String,

    /// File holding the raw HTTP response (status line, headers, body)
    #[arg(short, long)]
    pub response: PathBuf,

    /// Content type to assume instead of the response's Content-Type header
    #[arg(long)]
    pub content_type: Option<String>,

    /// Skip the visitors and return the fallback parse
    #[arg(long)]
    pub raw: bool,

    /// Print the result on a single line
    #[arg(long)]
    pub compact: bool,
}

impl ParseCommand {
    pub fn run(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    /// Parse the response file and format the result as JSON.
    fn render(&self) -> Result<String> {
        let file = DescriptionFile::open(&self.description).unwrap_or_exit();
        let message = std::fs::read(&self.response)
            .wrap_err_with(|| format!("Failed to read {}", self.response.display()))?;

        let options = ParseOptions {
            operation: &self.operation,
            content_type: self.content_type.as_deref(),
            raw: self.raw,
        };
        let value = ops::parse(file.into_description(), &message, &options)?;

        let output = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const SERVICE: &str = r#"
[operations.GetUser]
response_model = "User"

[models.User]
type = "object"
additional_properties = false

[models.User.properties.id]
type = "integer"
location = "json"
sent_as = "user_id"

[models.User.properties.etag]
type = "string"
location = "header"
sent_as = "ETag"
"#;

    const MESSAGE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nETag: \"v2\"\r\n\r\n{\"user_id\": 9, \"token\": \"hidden\"}";

    fn command(dir: &TempDir, raw: bool, compact: bool) -> ParseCommand {
        let description = dir.path().join("service.toml");
        let response = dir.path().join("response.http");
        fs::write(&description, SERVICE).unwrap();
        fs::write(&response, MESSAGE).unwrap();

        ParseCommand {
            description,
            operation: "GetUser".to_string(),
            response,
            content_type: None,
            raw,
            compact,
        }
    }

    #[test]
    fn test_parse_from_files() {
        let dir = TempDir::new().unwrap();
        let output = command(&dir, false, true).render().unwrap();
        assert_eq!(output, r#"{"id":9,"etag":"\"v2\""}"#);
    }

    #[test]
    fn test_raw_from_files() {
        let dir = TempDir::new().unwrap();
        let output = command(&dir, true, true).render().unwrap();
        assert_eq!(output, r#"{"user_id":9,"token":"hidden"}"#);
    }

    #[test]
    fn test_pretty_output() {
        let dir = TempDir::new().unwrap();
        let output = command(&dir, false, false).render().unwrap();
        assert_eq!(output, "{\n  \"id\": 9,\n  \"etag\": \"\\\"v2\\\"\"\n}");
    }

    #[test]
    fn test_missing_response_file() {
        let dir = TempDir::new().unwrap();
        let mut cmd = command(&dir, false, false);
        cmd.response = dir.path().join("missing.http");

        let err = cmd.render().unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
