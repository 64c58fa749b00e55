//! Exact patch search for small devices
//!
//! Gantree: L4_Selection → ExhaustiveSelector
//!
//! Enumerates every `k`-subset in lexicographic order and keeps the connected
//! one with the lowest score. Refuses to run when `C(n, k)` exceeds the
//! configured limit.

use crate::graph::WeightedGraph;
use crate::selector::{check_preconditions, single_qubit_selection, Patch, PatchSelector, Selection};
use smartlayout_core::{params, LayoutError, LayoutResult, QubitId, Weight};

/// Brute-force selector, useful as a reference for the greedy search
/// Gantree: ExhaustiveSelector // 전수 탐색
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSelector {
    limit: u64,
}

impl ExhaustiveSelector {
    /// Create with a custom candidate limit
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    /// Maximum number of candidates this selector will enumerate
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for ExhaustiveSelector {
    fn default() -> Self {
        Self::with_limit(params::EXHAUSTIVE_LIMIT)
    }
}

/// Binomial coefficient, `None` on overflow
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;

    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    u64::try_from(acc).ok()
}

/// Advance `indices` to the next lexicographic combination of `0..n`
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let Some(pos) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
        return false;
    };

    indices[pos] += 1;
    for i in pos + 1..k {
        indices[i] = indices[i - 1] + 1;
    }
    true
}

impl PatchSelector for ExhaustiveSelector {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn select(&self, graph: &WeightedGraph, k: usize) -> LayoutResult<Selection> {
        check_preconditions(graph, k)?;

        if k == 1 {
            return single_qubit_selection(graph);
        }

        let n = graph.num_nodes();
        let candidates = binomial(n, k).unwrap_or(u64::MAX);
        if candidates > self.limit {
            return Err(LayoutError::SearchSpaceTooLarge {
                candidates,
                limit: self.limit,
            });
        }

        let mut indices: Vec<QubitId> = (0..k).collect();
        let mut best: Option<(Weight, Vec<QubitId>)> = None;
        let mut trials = 0;
        let mut completed = 0;

        loop {
            trials += 1;
            if graph.is_connected_set(&indices) {
                completed += 1;
                let score = graph.score(&indices);
                if best.as_ref().map_or(true, |(s, _)| score < *s) {
                    best = Some((score, indices.clone()));
                }
            }
            if !next_combination(&mut indices, n) {
                break;
            }
        }

        let (score, qubits) = best.ok_or_else(|| {
            LayoutError::EmptyGraph(format!("no connected {}-qubit patch exists", k))
        })?;

        log::info!(
            "Exhaustive search: {} candidates, {} connected, best score {:.6}",
            trials,
            completed,
            score
        );

        Ok(Selection {
            patch: Patch::new(qubits, score),
            requested: k,
            initial_score: score,
            swaps: 0,
            trials,
            completed_trials: completed,
            fallback: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(27, 7), Some(888_030));
        assert_eq!(binomial(3, 5), Some(0));
        assert_eq!(binomial(4, 0), Some(1));
        assert_eq!(binomial(1000, 500), None);
    }

    #[test]
    fn test_next_combination_order() {
        let mut idx = vec![0, 1];
        let mut seen = vec![idx.clone()];
        while next_combination(&mut idx, 4) {
            seen.push(idx.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn test_finds_optimum() {
        // Cheapest edge 0-4 sits between two expensive ones
        let graph = WeightedGraph::from_weighted_edges(
            5,
            &[(0, 1, 0.5), (1, 2, 0.2), (2, 3, 0.2), (3, 4, 0.9), (0, 4, 0.05)],
        )
        .unwrap();
        let selection = ExhaustiveSelector::default().select(&graph, 3).unwrap();

        assert_eq!(selection.patch.qubits(), &[1, 2, 3]);
        assert_relative_eq!(selection.patch.score(), 0.4, epsilon = 1e-12);
        assert_eq!(selection.trials, 10);
    }

    #[test]
    fn test_limit_enforced() {
        let graph = WeightedGraph::from_weighted_edges(6, &[(0, 1, 1.0)]).unwrap();
        let err = ExhaustiveSelector::with_limit(10).select(&graph, 3).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::SearchSpaceTooLarge {
                candidates: 20,
                limit: 10
            }
        ));
    }

    #[test]
    fn test_no_connected_patch() {
        let graph = WeightedGraph::from_weighted_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
        let err = ExhaustiveSelector::default().select(&graph, 3).unwrap_err();
        assert!(err.is_structural());
    }
}
