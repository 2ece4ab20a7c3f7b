//! Script resolution from `pyproject.toml`
//!
//! Poetry projects declare runnable entry points under
//! `[tool.poetry.scripts]`. The buildpack refuses to guess among multiple
//! candidates: only a manifest with exactly one script yields a run target,
//! anything else defers to the `BP_POETRY_RUN_TARGET` override.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced while resolving the script name.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The manifest exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest is not valid TOML, or `[tool.poetry.scripts]` has an
    /// unexpected shape (a script mapped to a list, for example).
    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

impl ParseError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn toml(path: &Path, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

/// Resolves the single runnable script declared by a Poetry manifest.
///
/// Tests substitute deterministic implementations; production wiring uses
/// [`PyProjectTomlParser`].
pub trait PyProjectParser {
    /// Returns the script name when the manifest declares exactly one script.
    ///
    /// A missing manifest, an empty scripts table, and more than one entry
    /// all resolve to `Ok(None)`: absence and ambiguity are not failures,
    /// they just mean nothing can be inferred.
    fn parse(&self, path: &Path) -> Result<Option<String>, ParseError>;
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Tool,
}

#[derive(Debug, Default, Deserialize)]
struct Tool {
    #[serde(default)]
    poetry: Poetry,
}

#[derive(Debug, Default, Deserialize)]
struct Poetry {
    #[serde(default)]
    scripts: BTreeMap<String, String>,
}

/// File-based [`PyProjectParser`] over the TOML manifest.
///
/// Stateless; every call re-reads the file.
#[derive(Debug, Default)]
pub struct PyProjectTomlParser;

impl PyProjectTomlParser {
    pub fn new() -> Self {
        Self
    }
}

impl PyProjectParser for PyProjectTomlParser {
    fn parse(&self, path: &Path) -> Result<Option<String>, ParseError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ParseError::io(path, source)),
        };

        let manifest: PyProject =
            toml::from_str(&raw).map_err(|source| ParseError::toml(path, source))?;

        let scripts = manifest.tool.poetry.scripts;
        if scripts.len() != 1 {
            return Ok(None);
        }

        Ok(scripts.into_keys().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_single_script_resolves() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"
[tool.poetry]
name = "myapp"
version = "0.1.0"

[tool.poetry.scripts]
some-script = "myapp.server:main"
"#,
        );

        let parser = PyProjectTomlParser::new();
        let script = parser.parse(&path).unwrap();

        assert_eq!(script.as_deref(), Some("some-script"));
    }

    #[test]
    fn test_multiple_scripts_are_ambiguous() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"
[tool.poetry.scripts]
first = "myapp:one"
second = "myapp:two"
"#,
        );

        let parser = PyProjectTomlParser::new();
        assert_eq!(parser.parse(&path).unwrap(), None);
    }

    #[test]
    fn test_empty_scripts_table() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "[tool.poetry.scripts]\n");

        let parser = PyProjectTomlParser::new();
        assert_eq!(parser.parse(&path).unwrap(), None);
    }

    #[test]
    fn test_manifest_without_scripts_section() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"
[tool.poetry]
name = "myapp"

[tool.poetry.dependencies]
flask = "^2.3.0"
"#,
        );

        let parser = PyProjectTomlParser::new();
        assert_eq!(parser.parse(&path).unwrap(), None);
    }

    #[test]
    fn test_missing_manifest_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyproject.toml");

        let parser = PyProjectTomlParser::new();
        assert_eq!(parser.parse(&path).unwrap(), None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "not = [valid");

        let parser = PyProjectTomlParser::new();
        let err = parser.parse(&path).unwrap_err();

        assert!(err.to_string().contains("failed to parse"));
        assert!(matches!(err, ParseError::Toml { .. }));
    }

    #[test]
    fn test_script_mapped_to_list_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"
[tool.poetry.scripts]
some-script = ["not", "a", "string"]
"#,
        );

        let parser = PyProjectTomlParser::new();
        let err = parser.parse(&path).unwrap_err();

        assert!(matches!(err, ParseError::Toml { .. }));
    }

    #[test]
    fn test_unreadable_manifest_is_an_error() {
        // A directory at the manifest path fails the read without being
        // NotFound.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::create_dir(&path).unwrap();

        let parser = PyProjectTomlParser::new();
        let err = parser.parse(&path).unwrap_err();

        assert!(err.to_string().contains("failed to read"));
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"
[tool.poetry.scripts]
only = "myapp:main"
"#,
        );

        let parser = PyProjectTomlParser::new();
        let first = parser.parse(&path).unwrap();
        let second = parser.parse(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.as_deref(), Some("only"));
    }
}
