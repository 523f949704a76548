//! Constraint model for a single draw
//!
//! Members, directional exclusions and last cycle's pairings, plus the one
//! predicate both matchers consult to decide whether a giver may give to a
//! receiver.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::error::DrawError;
use super::result::Assignment;

// ============================================================================
// Member Identifier
// ============================================================================

/// Opaque participant identifier
///
/// The engine never interprets the contents; it only compares identifiers
/// for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for MemberId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Exclusion
// ============================================================================

/// "giver must not give to blocked"
///
/// Exclusions are directional. Use [`Exclusion::mutual`] for the
/// symmetric case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exclusion {
    pub giver: MemberId,
    pub blocked: MemberId,
}

impl Exclusion {
    /// Create a directional exclusion
    pub fn new(giver: impl Into<MemberId>, blocked: impl Into<MemberId>) -> Self {
        Self {
            giver: giver.into(),
            blocked: blocked.into(),
        }
    }

    /// Both directions between two members
    pub fn mutual(a: impl Into<MemberId>, b: impl Into<MemberId>) -> [Self; 2] {
        let a = a.into();
        let b = b.into();
        [
            Self {
                giver: a.clone(),
                blocked: b.clone(),
            },
            Self {
                giver: b,
                blocked: a,
            },
        ]
    }
}

// ============================================================================
// Anti-Recurrence History
// ============================================================================

/// Last cycle's pairings, giver -> receiver
///
/// Every entry is a hard forbidden edge for the current draw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AntiRecurrence {
    previous: HashMap<MemberId, MemberId>,
}

impl AntiRecurrence {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce a previous cycle's accepted assignments to a giver -> receiver map
    ///
    /// If a giver appears more than once the last entry wins.
    pub fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = Assignment>,
    {
        assignments
            .into_iter()
            .map(|a| (a.giver, a.receiver))
            .collect()
    }

    /// Record that `giver` gave to `receiver` last cycle
    pub fn insert(
        &mut self,
        giver: impl Into<MemberId>,
        receiver: impl Into<MemberId>,
    ) -> Option<MemberId> {
        self.previous.insert(giver.into(), receiver.into())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_pair(mut self, giver: impl Into<MemberId>, receiver: impl Into<MemberId>) -> Self {
        self.insert(giver, receiver);
        self
    }

    /// Receiver `giver` was assigned last cycle, if any
    pub fn previous_receiver(&self, giver: &MemberId) -> Option<&MemberId> {
        self.previous.get(giver)
    }

    /// Whether the history forbids giver -> receiver
    pub fn forbids(&self, giver: &MemberId, receiver: &MemberId) -> bool {
        self.previous.get(giver) == Some(receiver)
    }

    /// Drop entries whose giver is not part of the current draw
    pub fn retain_members(&mut self, members: &[MemberId]) {
        let current: HashSet<&MemberId> = members.iter().collect();
        self.previous.retain(|giver, _| current.contains(giver));
    }

    pub fn len(&self) -> usize {
        self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    /// Iterate over (giver, previous receiver) pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &MemberId)> {
        self.previous.iter()
    }
}

impl FromIterator<(MemberId, MemberId)> for AntiRecurrence {
    fn from_iter<T: IntoIterator<Item = (MemberId, MemberId)>>(iter: T) -> Self {
        Self {
            previous: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Constraint Set
// ============================================================================

/// Exclusions and history for one draw
///
/// Exclusions or history naming identifiers outside the member list are
/// kept but never match a candidate pair.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    /// giver -> receivers the giver may not draw
    exclusions: HashMap<MemberId, HashSet<MemberId>>,
    history: AntiRecurrence,
}

impl ConstraintSet {
    /// Create an empty constraint set (only self-assignment is forbidden)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exclusions
    pub fn with_exclusions<I>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = Exclusion>,
    {
        for exclusion in exclusions {
            self.add_exclusion(exclusion);
        }
        self
    }

    /// Set anti-recurrence history
    pub fn with_history(mut self, history: AntiRecurrence) -> Self {
        self.history = history;
        self
    }

    /// Add a single exclusion; returns false if it was already present
    pub fn add_exclusion(&mut self, exclusion: Exclusion) -> bool {
        self.exclusions
            .entry(exclusion.giver)
            .or_default()
            .insert(exclusion.blocked)
    }

    /// Whether giver -> receiver is an explicit exclusion
    pub fn is_excluded(&self, giver: &MemberId, receiver: &MemberId) -> bool {
        self.exclusions
            .get(giver)
            .is_some_and(|blocked| blocked.contains(receiver))
    }

    /// The single allowed-pair predicate shared by every matcher
    ///
    /// `giver != receiver`, not excluded, and not last cycle's pairing.
    pub fn is_allowed(&self, giver: &MemberId, receiver: &MemberId) -> bool {
        giver != receiver
            && !self.is_excluded(giver, receiver)
            && !self.history.forbids(giver, receiver)
    }

    /// Receivers from `members` that `giver` may draw, in member order
    pub fn allowed_receivers<'a>(
        &'a self,
        giver: &'a MemberId,
        members: &'a [MemberId],
    ) -> impl Iterator<Item = &'a MemberId> + 'a {
        members.iter().filter(move |r| self.is_allowed(giver, r))
    }

    /// Number of distinct exclusion pairs
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.values().map(HashSet::len).sum()
    }

    /// All exclusions, in arbitrary order
    pub fn exclusions(&self) -> impl Iterator<Item = Exclusion> + '_ {
        self.exclusions.iter().flat_map(|(giver, blocked)| {
            blocked.iter().map(move |b| Exclusion {
                giver: giver.clone(),
                blocked: b.clone(),
            })
        })
    }

    pub fn history(&self) -> &AntiRecurrence {
        &self.history
    }
}

// ============================================================================
// Draw Request
// ============================================================================

/// Everything the engine needs for one invocation
#[derive(Debug, Clone, Default)]
pub struct DrawRequest {
    members: Vec<MemberId>,
    constraints: ConstraintSet,
}

impl DrawRequest {
    /// Create a request with no constraints beyond self-assignment
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MemberId>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
            constraints: ConstraintSet::new(),
        }
    }

    /// Add exclusions
    pub fn with_exclusions<I>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = Exclusion>,
    {
        self.constraints = self.constraints.with_exclusions(exclusions);
        self
    }

    /// Set anti-recurrence history
    pub fn with_history(mut self, history: AntiRecurrence) -> Self {
        self.constraints = self.constraints.with_history(history);
        self
    }

    /// Replace the whole constraint set
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Members in caller order
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Shorthand for `constraints().is_allowed(..)`
    pub fn is_allowed(&self, giver: &MemberId, receiver: &MemberId) -> bool {
        self.constraints.is_allowed(giver, receiver)
    }

    /// Reject structurally invalid requests
    ///
    /// Rules run in order: member count first, then duplicate identifiers.
    pub fn validate(&self) -> Result<(), DrawError> {
        if self.members.len() < 2 {
            return Err(DrawError::insufficient(self.members.len()));
        }

        let mut seen = HashSet::with_capacity(self.members.len());
        for member in &self.members {
            if !seen.insert(member) {
                return Err(DrawError::duplicate(member.clone()));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
