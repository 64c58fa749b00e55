//! Multi-start greedy growth with local refinement
//!
//! Gantree: L4_Selection → GreedySelector
//!
//! 1. Sample `min(num_starts, |E|)` directed edges as seeds (ChaCha8,
//!    seeded). Grow each seed by adding the cheapest frontier qubit until
//!    the patch has `k` qubits; seeds stuck in a small component are
//!    discarded.
//! 2. Keep the lowest-scoring complete patch (earliest start wins ties).
//! 3. Hill-climb with single swaps that keep the patch connected and lower
//!    its score, always applying the first improving swap in ascending
//!    (member, boundary) order.
//! 4. If no start completes (or none was sampled), grow from the cheapest
//!    edge instead. A complete fallback patch is refined like any other;
//!    an incomplete one is returned as is.
//!
//! Frontier ties are broken by the lowest qubit index. Without a seed the
//! generator is drawn from OS entropy and results may differ between runs.

use crate::graph::{WeightedEdge, WeightedGraph};
use crate::selector::{check_preconditions, single_qubit_selection, Patch, PatchSelector, Selection};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smartlayout_core::{params, LayoutError, LayoutResult, QubitId, Weight};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Configuration
// ============================================================================

/// Greedy selector configuration
/// Gantree: GreedyConfig // 탐색 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreedyConfig {
    /// Number of random seed edges; 0 grows only from the cheapest edge
    /// Gantree: num_starts: usize // 시작점 수 (20)
    pub num_starts: usize,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    pub seed: Option<u64>,

    /// Run local refinement after growth
    pub refine: bool,
}

impl GreedyConfig {
    /// Set number of starts
    pub fn with_num_starts(mut self, num_starts: usize) -> Self {
        self.num_starts = num_starts;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable/disable refinement
    pub fn with_refinement(mut self, enabled: bool) -> Self {
        self.refine = enabled;
        self
    }
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            num_starts: params::DEFAULT_NUM_STARTS,
            seed: None,
            refine: true,
        }
    }
}

impl fmt::Display for GreedyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GreedyConfig(starts={}, seed={:?}, refine={})",
            self.num_starts, self.seed, self.refine
        )
    }
}

// ============================================================================
// GreedySelector
// ============================================================================

/// Default patch selector: greedy growth + swap refinement
/// Gantree: GreedySelector // 탐욕 선택기
#[derive(Debug, Clone, Default)]
pub struct GreedySelector {
    config: GreedyConfig,
}

impl GreedySelector {
    /// Create selector
    pub fn new(config: GreedyConfig) -> Self {
        Self { config }
    }

    /// Create seeded selector with default settings
    pub fn seeded(seed: u64) -> Self {
        Self::new(GreedyConfig::default().with_seed(seed))
    }

    /// Configuration
    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

impl PatchSelector for GreedySelector {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select(&self, graph: &WeightedGraph, k: usize) -> LayoutResult<Selection> {
        check_preconditions(graph, k)?;

        if k == 1 {
            return single_qubit_selection(graph);
        }

        let mut rng = self.rng();
        let num_seeds = self.config.num_starts.min(graph.num_edges());
        let seeds = rand::seq::index::sample(&mut rng, graph.num_edges(), num_seeds);

        let mut best: Option<(Weight, Vec<QubitId>)> = None;
        let mut completed = 0;

        for idx in seeds.iter() {
            let patch = grow(graph, &graph.edges()[idx], k);
            if patch.len() != k {
                continue;
            }
            completed += 1;

            let score = graph.score(&patch);
            if best.as_ref().map_or(true, |(s, _)| score < *s) {
                best = Some((score, patch));
            }
        }

        let (patch, initial_score, fallback) = match best {
            Some((score, patch)) => (patch, score, false),
            None => {
                let edge = graph
                    .min_edge()
                    .ok_or_else(|| LayoutError::EmptyGraph("graph has no edges".to_string()))?;
                let patch = grow(graph, edge, k);
                let score = graph.score(&patch);
                log::warn!(
                    "No greedy start reached {} qubits; fallback grew {} from edge ({}, {})",
                    k,
                    patch.len(),
                    edge.source,
                    edge.target
                );
                (patch, score, true)
            }
        };

        let (patch, score, swaps) = if self.config.refine && patch.len() == k {
            refine(graph, patch, initial_score)
        } else {
            (patch, initial_score, 0)
        };

        let selection = Selection {
            patch: Patch::new(patch, score),
            requested: k,
            initial_score,
            swaps,
            trials: num_seeds,
            completed_trials: completed,
            fallback,
        };

        log::info!(
            "Selected {} ({} swaps, {}/{} starts complete)",
            selection.patch,
            swaps,
            completed,
            num_seeds
        );

        Ok(selection)
    }
}

// ============================================================================
// Growth and Refinement
// ============================================================================

/// `(weight, qubit)` ordering used for frontier choice
fn frontier_cmp(a: (Weight, QubitId), b: (Weight, QubitId)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Grow a patch from a seed edge until it has `k` qubits or gets stuck
/// Gantree: grow(graph, edge, k) -> Vec<QubitId> // 성장
pub(crate) fn grow(graph: &WeightedGraph, seed: &WeightedEdge, k: usize) -> Vec<QubitId> {
    let mut in_patch = vec![false; graph.num_nodes()];
    let mut patch = Vec::with_capacity(k.max(2));

    for q in [seed.source, seed.target] {
        if !in_patch[q] {
            in_patch[q] = true;
            patch.push(q);
        }
    }

    while patch.len() < k {
        let mut best: Option<(Weight, QubitId)> = None;

        for &q in &patch {
            for nbr in graph.neighbors(q).filter(|&n| !in_patch[n]) {
                let Some(w) = graph.connecting_weight(q, nbr) else {
                    continue;
                };
                if best.map_or(true, |b| frontier_cmp((w, nbr), b) == Ordering::Less) {
                    best = Some((w, nbr));
                }
            }
        }

        match best {
            Some((_, q)) => {
                in_patch[q] = true;
                patch.push(q);
            }
            None => break,
        }
    }

    patch
}

/// First-improvement swap hill-climbing under the connectivity constraint
/// Gantree: refine(graph, patch, score) -> (patch, score, swaps) // 국소 개선
pub(crate) fn refine(
    graph: &WeightedGraph,
    patch: Vec<QubitId>,
    score: Weight,
) -> (Vec<QubitId>, Weight, usize) {
    let mut current: BTreeSet<QubitId> = patch.into_iter().collect();
    let mut current_score = score;
    let mut swaps = 0;

    'scan: loop {
        let boundary: BTreeSet<QubitId> = current
            .iter()
            .flat_map(|&q| graph.neighbors(q))
            .filter(|q| !current.contains(q))
            .collect();

        for &out in &current {
            for &inn in &boundary {
                let mut candidate = current.clone();
                candidate.remove(&out);
                candidate.insert(inn);

                let nodes: Vec<QubitId> = candidate.iter().copied().collect();
                if !graph.is_connected_set(&nodes) {
                    continue;
                }

                let candidate_score = graph.score(&nodes);
                if candidate_score < current_score - params::IMPROVEMENT_TOLERANCE {
                    log::debug!(
                        "swap {} -> {}: {:.6} -> {:.6}",
                        out,
                        inn,
                        current_score,
                        candidate_score
                    );
                    current = candidate;
                    current_score = candidate_score;
                    swaps += 1;
                    continue 'scan;
                }
            }
        }

        break;
    }

    (current.into_iter().collect(), current_score, swaps)
}

// ============================================================================
// Tests
// ============================================================================
