//! Draw orchestration
//!
//! validate -> randomized pass -> exact pass. The exact pass always runs when
//! the randomized pass comes back empty, so a failure here is either a
//! validation error or a proven `Infeasible`.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constraints::DrawRequest;
use super::error::DrawError;
use super::exact::ExactMatcher;
use super::randomized::{RandomizedMatcher, RandomizedOutcome};
use super::result::AssignmentSet;
use crate::config::DrawConfig;

/// Result of one engine invocation
pub type DrawResult = Result<DrawOutcome, DrawError>;

/// Which pass produced the assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    Randomized,
    Exact,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Randomized => write!(f, "randomized"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// A successful draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOutcome {
    /// One assignment per member, in request giver order
    pub assignments: AssignmentSet,

    /// Pass that produced `assignments`
    pub matcher: MatcherKind,

    /// Randomized attempts spent (the full budget when `matcher` is `Exact`)
    pub attempts: usize,

    pub drawn_at: DateTime<Utc>,
}

/// Stateless draw engine
///
/// Holds only tuning parameters, so one engine can serve any number of
/// independent draws, including concurrently.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    randomized: RandomizedMatcher,
    exact: ExactMatcher,
    seed: Option<u64>,
}

impl DrawEngine {
    /// Create an engine from configuration
    pub fn new(config: &DrawConfig) -> Self {
        Self {
            randomized: RandomizedMatcher::new(config.max_attempts),
            exact: ExactMatcher::new(),
            seed: config.seed,
        }
    }

    /// Override the randomized attempt budget
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.randomized = RandomizedMatcher::new(max_attempts);
        self
    }

    /// Pin the RNG seed used by [`draw`](Self::draw)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.randomized.max_attempts()
    }

    /// Run a draw with the engine's own RNG
    ///
    /// Seeded from the configured seed when one is set, otherwise from OS
    /// entropy.
    pub fn draw(&self, request: &DrawRequest) -> DrawResult {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.draw_with_rng(request, &mut rng)
    }

    /// Run a draw with a caller-supplied RNG
    pub fn draw_with_rng<R: Rng + ?Sized>(&self, request: &DrawRequest, rng: &mut R) -> DrawResult {
        request.validate()?;

        let members = request.members().len();
        let (assignments, matcher, attempts) = match self.randomized.run(request, rng) {
            RandomizedOutcome::Found {
                assignments,
                attempts,
            } => (assignments, MatcherKind::Randomized, attempts),
            RandomizedOutcome::Exhausted { attempts } => {
                tracing::debug!(members, attempts, "Falling back to exact matcher");
                match self.exact.solve_shuffled(request, rng) {
                    Ok(assignments) => (assignments, MatcherKind::Exact, attempts),
                    Err(err) => {
                        tracing::warn!(
                            members,
                            exclusions = request.constraints().exclusion_count(),
                            history = request.constraints().history().len(),
                            error = %err,
                            "Draw is infeasible"
                        );
                        return Err(err);
                    }
                }
            }
        };

        tracing::info!(
            members,
            matcher = %matcher,
            attempts,
            "Draw completed"
        );

        Ok(DrawOutcome {
            assignments,
            matcher,
            attempts,
            drawn_at: Utc::now(),
        })
    }

    /// Validate and decide feasibility without drawing
    ///
    /// Uses only the exact matcher, so the verdict is the same on every call.
    pub fn check_feasibility(&self, request: &DrawRequest) -> Result<(), DrawError> {
        request.validate()?;
        let required = request.members().len();
        let matched = self.exact.max_matching_size(request);
        if matched < required {
            return Err(DrawError::infeasible(matched, required));
        }
        Ok(())
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(&DrawConfig::default())
    }
}
