//! Launch process data model
//!
//! The build phase registers container start commands through `launch.toml`:
//! ordered `[[processes]]` tables. At most one process is the default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Launch metadata handed to the lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMetadata {
    #[serde(default)]
    pub processes: Vec<Process>,
}

/// A single launch process descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Process type label (`web`, `no-reload`).
    pub r#type: String,

    /// Executable to invoke.
    pub command: String,

    /// Arguments, in order.
    #[serde(default)]
    pub args: Vec<String>,

    /// Whether the lifecycle starts this process when none is named.
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,

    /// Invoke directly rather than through a shell.
    #[serde(default, skip_serializing_if = "is_false")]
    pub direct: bool,
}

impl fmt::Display for Process {
    /// Human rendering used in build logs:
    /// `web (default): poetry run some-script`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.r#type)?;
        if self.default {
            write!(f, " (default)")?;
        }
        write!(f, ": {}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_process() -> Process {
        Process {
            r#type: "web".to_string(),
            command: "poetry".to_string(),
            args: vec!["run".to_string(), "some-script".to_string()],
            default: true,
            direct: true,
        }
    }

    #[test]
    fn test_display_marks_default() {
        assert_eq!(
            web_process().to_string(),
            "web (default): poetry run some-script"
        );
    }

    #[test]
    fn test_display_non_default() {
        let process = Process {
            r#type: "no-reload".to_string(),
            default: false,
            ..web_process()
        };

        assert_eq!(process.to_string(), "no-reload: poetry run some-script");
    }

    #[test]
    fn test_serializes_to_launch_toml() {
        let launch = LaunchMetadata {
            processes: vec![web_process()],
        };

        let rendered = toml::to_string(&launch).unwrap();

        assert!(rendered.contains("[[processes]]"));
        assert!(rendered.contains(r#"type = "web""#));
        assert!(rendered.contains(r#"command = "poetry""#));
        assert!(rendered.contains(r#"args = ["run", "some-script"]"#));
        assert!(rendered.contains("default = true"));
        assert!(rendered.contains("direct = true"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let launch = LaunchMetadata {
            processes: vec![web_process()],
        };

        let rendered = toml::to_string(&launch).unwrap();
        let parsed: LaunchMetadata = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed, launch);
    }
}
