//! Build Plan data model
//!
//! The detect phase communicates its dependency requirements to the
//! lifecycle through the Build Plan file: ordered `[[requires]]` tables with
//! per-requirement phase metadata.

use serde::{Deserialize, Serialize};

/// A Build Plan contributed during detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Dependencies this buildpack provides. Always empty here; the poetry
    /// run buildpack only consumes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<Provision>,

    /// Dependencies required from other buildpacks, in declaration order.
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

/// A provided dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub name: String,
}

/// A required dependency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,

    #[serde(default)]
    pub metadata: RequirementMetadata,
}

impl Requirement {
    /// Requirement tagged as needed when the launch process runs.
    pub fn launch(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: RequirementMetadata {
                launch: true,
                ..Default::default()
            },
        }
    }
}

/// Phase metadata attached to a requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementMetadata {
    /// Needed while the image is built.
    #[serde(default, skip_serializing_if = "is_false")]
    pub build: bool,

    /// Needed when the launch process runs.
    #[serde(default, skip_serializing_if = "is_false")]
    pub launch: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}
