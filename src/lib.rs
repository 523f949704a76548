//! santa-draw - Gift-exchange draw engine
//!
//! Computes "Secret Santa" assignments: every member gives exactly once and
//! receives exactly once, nobody draws themselves, and no pairing breaks an
//! exclusion or repeats last cycle's draw.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`draw`] - Constraint model, matchers and the draw orchestrator
//! - [`config`] - Engine configuration (env, TOML)
//! - [`input`] - JSON/TOML input files used by the CLI
//! - [`error`] - Unified error type and classification
//!
//! # Example
//!
//! ```
//! use santa_draw::prelude::*;
//!
//! let request = DrawRequest::new(["ana", "ben", "cai"])
//!     .with_exclusions([Exclusion::new("ana", "ben")]);
//!
//! match DrawEngine::default().draw(&request) {
//!     Ok(outcome) => {
//!         for assignment in outcome.assignments.iter() {
//!             println!("{assignment}");
//!         }
//!     }
//!     Err(err) => eprintln!("{}", err.user_message()),
//! }
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod input;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::DrawConfig;
    pub use crate::draw::{
        AntiRecurrence, Assignment, AssignmentSet, DrawEngine, DrawError, DrawOutcome,
        DrawRequest, DrawResult, Exclusion, MatcherKind, MemberId,
    };
    pub use crate::error::{Classify, Error, ErrorCategory, Result};
    pub use crate::input::DrawInput;
}

// Direct re-exports for convenience
pub use draw::{DrawEngine, DrawError, DrawRequest, DrawResult};
