//! Error types for the draw engine

use std::fmt;

use super::constraints::MemberId;

/// Classified reasons a draw can fail
///
/// Validation kinds are always raised before any matching work starts.
/// `Infeasible` is the only kind produced by the matching stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Fewer than two members were supplied
    InsufficientParticipants {
        count: usize,
    },

    /// The same member identifier appears more than once
    DuplicateMembers {
        member: MemberId,
    },

    /// No permutation satisfies the exclusions and history
    Infeasible {
        /// Size of the maximum matching found by the exact pass
        matched: usize,
        /// Number of members that needed a receiver
        required: usize,
    },
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientParticipants { count } => {
                write!(
                    f,
                    "Insufficient participants: {} supplied, at least 2 required",
                    count
                )
            }
            Self::DuplicateMembers { member } => {
                write!(f, "Duplicate member identifier: '{}'", member)
            }
            Self::Infeasible { matched, required } => {
                write!(
                    f,
                    "Draw infeasible: only {} of {} members can be matched",
                    matched, required
                )
            }
        }
    }
}

impl std::error::Error for DrawError {}

impl DrawError {
    /// Create an insufficient participants error
    pub fn insufficient(count: usize) -> Self {
        Self::InsufficientParticipants { count }
    }

    /// Create a duplicate members error
    pub fn duplicate(member: MemberId) -> Self {
        Self::DuplicateMembers { member }
    }

    /// Create an infeasible error
    pub fn infeasible(matched: usize, required: usize) -> Self {
        Self::Infeasible { matched, required }
    }

    /// Stable machine-readable code for the failure kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientParticipants { .. } => "insufficient_participants",
            Self::DuplicateMembers { .. } => "duplicate_members",
            Self::Infeasible { .. } => "infeasible",
        }
    }

    /// Message suitable for showing to the person who triggered the draw
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientParticipants { .. } => {
                "Need at least two participants to run the draw.".to_string()
            }
            Self::DuplicateMembers { member } => {
                format!("Duplicate participant data for '{}'.", member)
            }
            Self::Infeasible { .. } => {
                "Cannot satisfy the current exclusions. Remove some and retry.".to_string()
            }
        }
    }

    /// Whether the organizer can fix this by editing constraints and retrying
    ///
    /// Validation failures point at broken input data rather than
    /// an over-constrained event.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }

    /// True for failures raised before any matching was attempted
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InsufficientParticipants { .. } | Self::DuplicateMembers { .. }
        )
    }
}
