//! Patch selection strategy
//!
//! Gantree: L4_Selection → PatchSelector
//!
//! A selector picks a connected set of `k` qubits with low total weight from
//! a [`WeightedGraph`]. The default is [`crate::GreedySelector`]; an exact
//! [`crate::ExhaustiveSelector`] is available for small devices.

use crate::graph::WeightedGraph;
use smartlayout_core::{Diagnostic, LayoutError, LayoutResult, QubitId, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selected qubits and their total weight
/// Gantree: Patch // 선택 패치
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    qubits: Vec<QubitId>,
    score: Weight,
}

impl Patch {
    /// Create a patch; qubits are sorted and deduplicated
    pub fn new(mut qubits: Vec<QubitId>, score: Weight) -> Self {
        qubits.sort_unstable();
        qubits.dedup();
        Self { qubits, score }
    }

    /// Physical qubits, ascending
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Total weight of the patch
    pub fn score(&self) -> Weight {
        self.score
    }

    /// Number of qubits
    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    /// Whether the patch is empty
    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    /// Consume into the qubit list
    pub fn into_qubits(self) -> Vec<QubitId> {
        self.qubits
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patch({:?}, score={:.6})", self.qubits, self.score)
    }
}

/// Outcome of one selection, with search statistics
/// Gantree: Selection // 선택 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen patch
    pub patch: Patch,

    /// Requested patch size
    pub requested: usize,

    /// Score before local refinement
    pub initial_score: Weight,

    /// Accepted refinement swaps
    pub swaps: usize,

    /// Trials run (greedy starts or enumerated candidates)
    pub trials: usize,

    /// Trials that produced a connected patch of the requested size
    pub completed_trials: usize,

    /// Whether the fallback path produced the patch
    pub fallback: bool,
}

impl Selection {
    /// Whether the patch has the requested size
    pub fn is_complete(&self) -> bool {
        self.patch.len() == self.requested
    }

    /// Warnings describing a best-effort result
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        if self.is_complete() {
            Vec::new()
        } else {
            vec![Diagnostic::PartialPatch {
                requested: self.requested,
                achieved: self.patch.len(),
            }]
        }
    }
}

/// Strategy for choosing a connected low-weight patch
/// Gantree: PatchSelector // trait
pub trait PatchSelector {
    /// Short identifier recorded in reports
    fn name(&self) -> &'static str;

    /// Select a patch of `k` qubits from `graph`
    fn select(&self, graph: &WeightedGraph, k: usize) -> LayoutResult<Selection>;
}

impl<S: PatchSelector + ?Sized> PatchSelector for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn select(&self, graph: &WeightedGraph, k: usize) -> LayoutResult<Selection> {
        (**self).select(graph, k)
    }
}

/// Preconditions shared by all selectors
///
/// `k` must be in `1..=n`, and the graph must have at least one edge.
pub fn check_preconditions(graph: &WeightedGraph, k: usize) -> LayoutResult<()> {
    if k == 0 {
        return Err(LayoutError::InvalidParameter(
            "patch size must be >= 1".to_string(),
        ));
    }
    if k > graph.num_nodes() {
        return Err(LayoutError::SizeConstraint {
            requested: k,
            available: graph.num_nodes(),
        });
    }
    if graph.num_edges() == 0 {
        return Err(LayoutError::EmptyGraph("graph has no edges".to_string()));
    }
    Ok(())
}

/// Single-qubit patch: the lower endpoint of the cheapest edge
pub(crate) fn single_qubit_selection(graph: &WeightedGraph) -> LayoutResult<Selection> {
    let edge = graph
        .min_edge()
        .ok_or_else(|| LayoutError::EmptyGraph("graph has no edges".to_string()))?;

    Ok(Selection {
        patch: Patch::new(vec![edge.source.min(edge.target)], 0.0),
        requested: 1,
        initial_score: 0.0,
        swaps: 0,
        trials: 0,
        completed_trials: 0,
        fallback: false,
    })
}

// ============================================================================
// Tests
// ============================================================================
