//! Assignment types and invariant checking

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use super::constraints::{DrawRequest, MemberId};

/// One giver -> receiver pairing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: MemberId,
    pub receiver: MemberId,
}

impl Assignment {
    pub fn new(giver: impl Into<MemberId>, receiver: impl Into<MemberId>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.giver, self.receiver)
    }
}

/// Ways an assignment list can break the draw invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("expected {expected} assignments, found {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("member '{0}' gives more than once")]
    RepeatedGiver(MemberId),

    #[error("member '{0}' receives more than once")]
    RepeatedReceiver(MemberId),

    #[error("'{0}' is not a member of this draw")]
    UnknownMember(MemberId),

    #[error("member '{0}' is assigned to themselves")]
    SelfAssignment(MemberId),

    #[error("assignment {0} is excluded")]
    Excluded(Assignment),

    #[error("assignment {0} repeats last cycle")]
    Recurrence(Assignment),
}

/// A complete assignment: one entry per member, in giver order of the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet {
    assignments: Vec<Assignment>,
}

impl AssignmentSet {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_vec(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Who `giver` gives to
    pub fn receiver_of(&self, giver: &MemberId) -> Option<&MemberId> {
        self.assignments
            .iter()
            .find(|a| &a.giver == giver)
            .map(|a| &a.receiver)
    }

    /// Who gives to `receiver`
    pub fn giver_of(&self, receiver: &MemberId) -> Option<&MemberId> {
        self.assignments
            .iter()
            .find(|a| &a.receiver == receiver)
            .map(|a| &a.giver)
    }

    /// Copy ordered by giver identifier, for stable display
    pub fn sorted(&self) -> Vec<Assignment> {
        let mut sorted = self.assignments.clone();
        sorted.sort_by(|a, b| a.giver.cmp(&b.giver));
        sorted
    }

    /// Check every draw invariant against `request`
    ///
    /// Returns the first violation found. The request itself is assumed to
    /// have passed validation.
    pub fn verify(&self, request: &DrawRequest) -> Result<(), InvariantViolation> {
        let members = request.members();
        if self.assignments.len() != members.len() {
            return Err(InvariantViolation::WrongCount {
                expected: members.len(),
                actual: self.assignments.len(),
            });
        }

        let member_set: HashSet<&MemberId> = members.iter().collect();
        let mut givers = HashSet::with_capacity(members.len());
        let mut receivers = HashSet::with_capacity(members.len());

        for assignment in &self.assignments {
            for id in [&assignment.giver, &assignment.receiver] {
                if !member_set.contains(id) {
                    return Err(InvariantViolation::UnknownMember(id.clone()));
                }
            }
            if !givers.insert(&assignment.giver) {
                return Err(InvariantViolation::RepeatedGiver(assignment.giver.clone()));
            }
            if !receivers.insert(&assignment.receiver) {
                return Err(InvariantViolation::RepeatedReceiver(assignment.receiver.clone()));
            }
            if assignment.giver == assignment.receiver {
                return Err(InvariantViolation::SelfAssignment(assignment.giver.clone()));
            }

            let constraints = request.constraints();
            if constraints.is_excluded(&assignment.giver, &assignment.receiver) {
                return Err(InvariantViolation::Excluded(assignment.clone()));
            }
            if constraints.history().forbids(&assignment.giver, &assignment.receiver) {
                return Err(InvariantViolation::Recurrence(assignment.clone()));
            }
        }

        Ok(())
    }
}

impl IntoIterator for AssignmentSet {
    type Item = Assignment;
    type IntoIter = std::vec::IntoIter<Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::constraints::{AntiRecurrence, Exclusion};

    fn cycle(names: &[&str]) -> AssignmentSet {
        let n = names.len();
        AssignmentSet::new(
            (0..n)
                .map(|i| Assignment::new(names[i], names[(i + 1) % n]))
                .collect(),
        )
    }

    #[test]
    fn test_valid_cycle_verifies() {
        let request = DrawRequest::new(["a", "b", "c"]);
        assert!(cycle(&["a", "b", "c"]).verify(&request).is_ok());
    }

    #[test]
    fn test_wrong_count() {
        let request = DrawRequest::new(["a", "b", "c"]);
        let set = AssignmentSet::new(vec![Assignment::new("a", "b")]);
        assert_eq!(
            set.verify(&request),
            Err(InvariantViolation::WrongCount { expected: 3, actual: 1 })
        );
    }

    #[test]
    fn test_self_assignment_detected() {
        let request = DrawRequest::new(["a", "b"]);
        let set = AssignmentSet::new(vec![Assignment::new("a", "a"), Assignment::new("b", "b")]);
        assert!(matches!(
            set.verify(&request),
            Err(InvariantViolation::SelfAssignment(_))
        ));
    }

    #[test]
    fn test_repeated_receiver_detected() {
        let request = DrawRequest::new(["a", "b", "c"]);
        let set = AssignmentSet::new(vec![
            Assignment::new("a", "b"),
            Assignment::new("c", "b"),
            Assignment::new("b", "a"),
        ]);
        assert_eq!(
            set.verify(&request),
            Err(InvariantViolation::RepeatedReceiver(MemberId::new("b")))
        );
    }

    #[test]
    fn test_unknown_member_detected() {
        let request = DrawRequest::new(["a", "b"]);
        let set = AssignmentSet::new(vec![Assignment::new("a", "z"), Assignment::new("b", "a")]);
        assert_eq!(
            set.verify(&request),
            Err(InvariantViolation::UnknownMember(MemberId::new("z")))
        );
    }

    #[test]
    fn test_excluded_and_recurrence_detected() {
        let set = cycle(&["a", "b", "c"]);

        let excluded = DrawRequest::new(["a", "b", "c"]).with_exclusions([Exclusion::new("b", "c")]);
        assert_eq!(
            set.verify(&excluded),
            Err(InvariantViolation::Excluded(Assignment::new("b", "c")))
        );

        let repeated = DrawRequest::new(["a", "b", "c"])
            .with_history(AntiRecurrence::new().with_pair("c", "a"));
        assert_eq!(
            set.verify(&repeated),
            Err(InvariantViolation::Recurrence(Assignment::new("c", "a")))
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let set = cycle(&["a", "b", "c"]);
        assert_eq!(set.receiver_of(&MemberId::new("a")), Some(&MemberId::new("b")));
        assert_eq!(set.giver_of(&MemberId::new("a")), Some(&MemberId::new("c")));
        assert_eq!(set.receiver_of(&MemberId::new("z")), None);
    }

    #[test]
    fn test_sorted_orders_by_giver() {
        let set = AssignmentSet::new(vec![Assignment::new("c", "a"), Assignment::new("a", "c")]);
        let sorted = set.sorted();
        assert_eq!(sorted[0].giver, MemberId::new("a"));
        assert_eq!(sorted[1].giver, MemberId::new("c"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Assignment::new("a", "b").to_string(), "a -> b");
    }
}
