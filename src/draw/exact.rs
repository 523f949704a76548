//! Exact matcher: maximum bipartite matching by augmenting paths
//!
//! Left vertices are givers, right vertices are receivers, and an edge exists
//! wherever [`ConstraintSet::is_allowed`](super::constraints::ConstraintSet::is_allowed)
//! holds. A full assignment exists iff the maximum matching covers every
//! giver, so this is the only place an `Infeasible` verdict comes from.
//!
//! Runs in O(V·E). The DFS recurses at most once per member, which is fine
//! for event-sized inputs.

use rand::seq::SliceRandom;
use rand::Rng;

use super::constraints::DrawRequest;
use super::error::DrawError;
use super::result::{Assignment, AssignmentSet};

/// Kuhn's algorithm over the allowed-pair graph
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

/// Allowed-pair graph in index form
struct BipartiteGraph {
    /// giver index -> allowed receiver indices
    edges: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    fn build(request: &DrawRequest) -> Self {
        let members = request.members();
        let edges = members
            .iter()
            .map(|giver| {
                members
                    .iter()
                    .enumerate()
                    .filter(|(_, receiver)| request.is_allowed(giver, receiver))
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();
        Self { edges }
    }

    fn size(&self) -> usize {
        self.edges.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Maximum matching as receiver index -> matched giver index
    fn maximum_matching(&self) -> (Vec<Option<usize>>, usize) {
        let n = self.size();
        let mut match_receiver: Vec<Option<usize>> = vec![None; n];
        let mut seen = vec![false; n];
        let mut matched = 0;

        for giver in 0..n {
            seen.iter_mut().for_each(|s| *s = false);
            if self.augment(giver, &mut seen, &mut match_receiver) {
                matched += 1;
            }
        }

        (match_receiver, matched)
    }

    /// Look for an augmenting path starting at `giver`
    fn augment(
        &self,
        giver: usize,
        seen: &mut [bool],
        match_receiver: &mut [Option<usize>],
    ) -> bool {
        for &receiver in &self.edges[giver] {
            if seen[receiver] {
                continue;
            }
            seen[receiver] = true;

            let free = match match_receiver[receiver] {
                None => true,
                Some(current) => self.augment(current, seen, match_receiver),
            };
            if free {
                match_receiver[receiver] = Some(giver);
                return true;
            }
        }
        false
    }
}

impl ExactMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic solve: same request, same assignment
    pub fn solve(&self, request: &DrawRequest) -> Result<AssignmentSet, DrawError> {
        let graph = BipartiteGraph::build(request);
        Self::finish(request, &graph)
    }

    /// Solve with each giver's edge list shuffled first
    ///
    /// The feasibility verdict is identical to [`solve`](Self::solve); only
    /// which of several valid assignments comes back depends on `rng`.
    pub fn solve_shuffled<R: Rng + ?Sized>(
        &self,
        request: &DrawRequest,
        rng: &mut R,
    ) -> Result<AssignmentSet, DrawError> {
        let mut graph = BipartiteGraph::build(request);
        for edges in &mut graph.edges {
            edges.shuffle(rng);
        }
        Self::finish(request, &graph)
    }

    /// Size of the maximum matching, without building assignments
    pub fn max_matching_size(&self, request: &DrawRequest) -> usize {
        BipartiteGraph::build(request).maximum_matching().1
    }

    fn finish(request: &DrawRequest, graph: &BipartiteGraph) -> Result<AssignmentSet, DrawError> {
        let members = request.members();
        let (match_receiver, matched) = graph.maximum_matching();

        tracing::debug!(
            members = members.len(),
            edges = graph.edge_count(),
            matched,
            "Exact matcher finished"
        );

        if matched < members.len() {
            return Err(DrawError::infeasible(matched, members.len()));
        }

        // Invert receiver -> giver so the output follows request giver order.
        let mut receiver_of = vec![0usize; members.len()];
        for (receiver, giver) in match_receiver.iter().enumerate() {
            if let Some(giver) = giver {
                receiver_of[*giver] = receiver;
            }
        }

        let assignments = members
            .iter()
            .zip(receiver_of)
            .map(|(giver, receiver)| Assignment {
                giver: giver.clone(),
                receiver: members[receiver].clone(),
            })
            .collect();

        Ok(AssignmentSet::new(assignments))
    }
}
