//! Gift-exchange draw engine
//!
//! Given the members of an event, their exclusions, and last cycle's pairings,
//! this module produces a one-to-one giver -> receiver assignment with no
//! self-assignment, or proves that none exists.
//!
//! # Overview
//!
//! The engine is a pure function boundary. Loading members and history, and
//! persisting the resulting pairs atomically, belong to the caller. Nothing
//! is retained between invocations.
//!
//! # Pipeline
//!
//! ```text
//!   DrawRequest
//!        │
//!        ▼
//!   ┌──────────┐  InsufficientParticipants / DuplicateMembers
//!   │ validate │──────────────────────────────────────────────▶ Err
//!   └────┬─────┘
//!        ▼
//!   ┌────────────────────┐  found
//!   │ RandomizedMatcher  │───────────────────────────────────▶ Ok(Randomized)
//!   │ (bounded shuffles) │
//!   └────┬───────────────┘
//!        │ exhausted
//!        ▼
//!   ┌────────────────────┐  perfect matching
//!   │   ExactMatcher     │───────────────────────────────────▶ Ok(Exact)
//!   │ (augmenting paths) │
//!   └────┬───────────────┘
//!        │ matching < members
//!        ▼
//!      Err(Infeasible)
//! ```
//!
//! # Modules
//!
//! - [`constraints`] - Member ids, exclusions, anti-recurrence history, validation
//! - [`randomized`] - Shuffle-and-check heuristic
//! - [`exact`] - Kuhn's maximum bipartite matching
//! - [`engine`] - Orchestrator and outcome types
//! - [`result`] - Assignments and invariant checks
//! - [`error`] - Failure classification
//!
//! # Quick Start
//!
//! ```
//! use santa_draw::draw::{AntiRecurrence, DrawEngine, DrawRequest, Exclusion};
//!
//! let request = DrawRequest::new(["ana", "ben", "cai", "dee"])
//!     .with_exclusions(Exclusion::mutual("ana", "ben"))
//!     .with_history(AntiRecurrence::new().with_pair("cai", "dee"));
//!
//! let outcome = DrawEngine::default().draw(&request).unwrap();
//! assert_eq!(outcome.assignments.len(), 4);
//! assert!(outcome.assignments.verify(&request).is_ok());
//! ```
//!
//! # Anti-recurrence
//!
//! History entries are hard constraints with the same strength as
//! exclusions. A draw that is only possible by repeating last cycle's pairing
//! fails with `Infeasible`; clear or trim the history before retrying.

pub mod constraints;
pub mod engine;
pub mod error;
pub mod exact;
pub mod randomized;
pub mod result;

// Re-export main types
pub use constraints::{AntiRecurrence, ConstraintSet, DrawRequest, Exclusion, MemberId};
pub use engine::{DrawEngine, DrawOutcome, DrawResult, MatcherKind};
pub use error::DrawError;
pub use exact::ExactMatcher;
pub use randomized::{RandomizedMatcher, RandomizedOutcome, DEFAULT_MAX_ATTEMPTS};
pub use result::{Assignment, AssignmentSet, InvariantViolation};
