//! Draw input files
//!
//! The engine itself has no file format. This is the shape the CLI reads:
//! an event's members, its exclusion rules, and optionally the previous
//! cycle's accepted assignments.
//!
//! ```json
//! {
//!   "members": ["ana", "ben", "cai"],
//!   "exclusions": [{ "giver": "ana", "blocked": "ben" }],
//!   "previous_assignments": [{ "giver": "cai", "receiver": "ana" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::draw::{AntiRecurrence, Assignment, AssignmentSet, DrawRequest, Exclusion, MemberId};
use crate::error::{Error, Result};

/// Supported on-disk encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnsupportedFormat(ext)),
        }
    }
}

/// Members, exclusions and history for one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawInput {
    pub members: Vec<MemberId>,

    #[serde(default)]
    pub exclusions: Vec<Exclusion>,

    /// Last cycle's accepted assignments; empty after a reset
    #[serde(default)]
    pub previous_assignments: Vec<Assignment>,
}

impl DrawInput {
    /// Read and parse a JSON or TOML input file
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = InputFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: InputFormat) -> Result<Self> {
        let input = match format {
            InputFormat::Json => serde_json::from_str(content)?,
            InputFormat::Toml => toml::from_str(content)?,
        };
        Ok(input)
    }

    /// Build the engine request
    ///
    /// History is reduced to one receiver per giver, and entries for givers
    /// who are no longer members are dropped.
    pub fn into_request(self) -> DrawRequest {
        let mut history = AntiRecurrence::from_assignments(self.previous_assignments);
        history.retain_members(&self.members);

        DrawRequest::new(self.members)
            .with_exclusions(self.exclusions)
            .with_history(history)
    }
}

/// Read a stored assignment list (JSON array or TOML `assignments` table)
pub fn load_assignments(path: &Path) -> Result<AssignmentSet> {
    #[derive(Deserialize)]
    struct TomlAssignments {
        assignments: Vec<Assignment>,
    }

    let content = std::fs::read_to_string(path)?;
    let assignments = match InputFormat::from_path(path)? {
        InputFormat::Json => serde_json::from_str(&content)?,
        InputFormat::Toml => toml::from_str::<TomlAssignments>(&content)?.assignments,
    };
    Ok(AssignmentSet::new(assignments))
}
