//! Shuffle-and-check matcher
//!
//! Cheap when constraints are sparse. Running out of attempts says nothing
//! about feasibility; the caller must fall back to the exact matcher.

use rand::seq::SliceRandom;
use rand::Rng;

use super::constraints::{DrawRequest, MemberId};
use super::result::{Assignment, AssignmentSet};

/// Default number of shuffles tried before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 500;

/// What a randomized run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomizedOutcome {
    /// A valid assignment found on attempt number `attempts` (1-based)
    Found {
        assignments: AssignmentSet,
        attempts: usize,
    },
    /// Budget spent without a valid shuffle
    Exhausted { attempts: usize },
}

impl RandomizedOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            Self::Found { attempts, .. } | Self::Exhausted { attempts } => *attempts,
        }
    }
}

/// Uniform shuffle matcher with a bounded attempt budget
#[derive(Debug, Clone, Copy)]
pub struct RandomizedMatcher {
    max_attempts: usize,
}

impl RandomizedMatcher {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Try up to `max_attempts` shuffles of the member list
    ///
    /// Giver `i` (request order) is paired with position `i` of the shuffled
    /// receivers. One disallowed pair discards the whole attempt.
    pub fn run<R: Rng + ?Sized>(&self, request: &DrawRequest, rng: &mut R) -> RandomizedOutcome {
        let givers = request.members();
        let mut receivers: Vec<&MemberId> = givers.iter().collect();

        for attempt in 1..=self.max_attempts {
            receivers.shuffle(rng);

            let valid = givers
                .iter()
                .zip(receivers.iter())
                .all(|(giver, receiver)| request.is_allowed(giver, receiver));

            if valid {
                let assignments = givers
                    .iter()
                    .zip(receivers.iter())
                    .map(|(giver, receiver)| Assignment {
                        giver: giver.clone(),
                        receiver: (*receiver).clone(),
                    })
                    .collect();

                tracing::debug!(attempt, "Randomized matcher found an assignment");
                return RandomizedOutcome::Found {
                    assignments: AssignmentSet::new(assignments),
                    attempts: attempt,
                };
            }
        }

        tracing::debug!(
            max_attempts = self.max_attempts,
            members = givers.len(),
            "Randomized matcher exhausted its budget"
        );
        RandomizedOutcome::Exhausted {
            attempts: self.max_attempts,
        }
    }
}

impl Default for RandomizedMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::constraints::{AntiRecurrence, Exclusion};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_finds_assignment_without_constraints() {
        let request = DrawRequest::new(["a", "b", "c", "d"]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        match RandomizedMatcher::default().run(&request, &mut rng) {
            RandomizedOutcome::Found { assignments, attempts } => {
                assert!(attempts >= 1);
                assert!(assignments.verify(&request).is_ok());
            }
            RandomizedOutcome::Exhausted { .. } => panic!("expected an assignment"),
        }
    }

    #[test]
    fn test_respects_constraints() {
        let request = DrawRequest::new(["a", "b", "c", "d", "e"])
            .with_exclusions([Exclusion::new("a", "b"), Exclusion::new("c", "d")])
            .with_history(AntiRecurrence::new().with_pair("e", "a"));

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let RandomizedOutcome::Found { assignments, .. } =
                RandomizedMatcher::default().run(&request, &mut rng)
            {
                assert!(assignments.verify(&request).is_ok(), "seed {seed}");
            }
        }
    }

    #[test]
    fn test_exhausts_on_infeasible_input() {
        let request = DrawRequest::new(["a", "b"]).with_exclusions(Exclusion::mutual("a", "b"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = RandomizedMatcher::new(25).run(&request, &mut rng);
        assert_eq!(outcome, RandomizedOutcome::Exhausted { attempts: 25 });
    }

    #[test]
    fn test_zero_budget_never_searches() {
        let request = DrawRequest::new(["a", "b"]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = RandomizedMatcher::new(0).run(&request, &mut rng);
        assert_eq!(outcome.attempts(), 0);
        assert!(matches!(outcome, RandomizedOutcome::Exhausted { .. }));
    }

    #[test]
    fn test_same_seed_same_result() {
        let request = DrawRequest::new(["a", "b", "c", "d", "e", "f"]);
        let first = RandomizedMatcher::default().run(&request, &mut ChaCha8Rng::seed_from_u64(42));
        let second = RandomizedMatcher::default().run(&request, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
