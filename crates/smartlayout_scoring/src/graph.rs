//! Weighted coupling graph
//!
//! Gantree: L3_Scoring → GraphBuilder
//!
//! Builds a directed graph over all device qubits whose edge weights come
//! from [`WeightModel`]. Weights are comparable only within one build, since
//! auto-scaled coefficients depend on the target patch size.

use crate::weights::{ResolvedWeights, WeightModel, WeightParams};
use smartlayout_calibration::{
    CalibrationIndex, CalibrationSnapshot, CalibrationStats, GateRecord, NodeRecord,
};
use smartlayout_core::{
    params, Connectivity, Coupling, CoverageKind, Diagnostic, LayoutError, LayoutResult, QubitId,
    Weight,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

// ============================================================================
// WeightedGraph
// ============================================================================

/// Directed weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    /// Control qubit
    pub source: QubitId,
    /// Target qubit
    pub target: QubitId,
    /// Composite weight (finite, >= 0)
    pub weight: Weight,
    /// Whether this direction was synthesized from its reverse
    pub synthesized: bool,
}

/// Weighted directed graph over qubits `0..n`
/// Gantree: WeightedGraph // 가중 그래프
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    num_nodes: usize,
    edges: Vec<WeightedEdge>,
    lookup: HashMap<Coupling, usize>,
    adjacency: Vec<BTreeSet<QubitId>>,
}

impl WeightedGraph {
    /// Create a graph with isolated nodes
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            lookup: HashMap::new(),
            adjacency: vec![BTreeSet::new(); num_nodes],
        }
    }

    /// Create from explicit `(source, target, weight)` triples
    ///
    /// Useful for driving selectors without calibration data.
    pub fn from_weighted_edges(
        num_nodes: usize,
        edges: &[(QubitId, QubitId, Weight)],
    ) -> LayoutResult<Self> {
        let mut graph = Self::with_nodes(num_nodes);

        for &(u, v, w) in edges {
            if u == v {
                return Err(LayoutError::InvalidCoupling(u, v));
            }
            for q in [u, v] {
                if q >= num_nodes {
                    return Err(LayoutError::QubitOutOfRange {
                        qubit: q,
                        max: num_nodes.saturating_sub(1),
                    });
                }
            }
            if !w.is_finite() || w < 0.0 {
                return Err(LayoutError::InvalidParameter(format!(
                    "edge ({}, {}) weight must be finite and >= 0, got {}",
                    u, v, w
                )));
            }
            graph.set_edge(u, v, w, false);
        }

        Ok(graph)
    }

    /// Insert or overwrite a directed edge
    pub(crate) fn set_edge(&mut self, u: QubitId, v: QubitId, weight: Weight, synthesized: bool) {
        let edge = WeightedEdge {
            source: u,
            target: v,
            weight,
            synthesized,
        };

        match self.lookup.get(&(u, v)) {
            Some(&idx) => self.edges[idx] = edge,
            None => {
                self.lookup.insert((u, v), self.edges.len());
                self.edges.push(edge);
                self.adjacency[u].insert(v);
                self.adjacency[v].insert(u);
            }
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Number of nodes, including isolated ones
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of directed edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Directed edges in insertion order
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Weight of the directed edge `u -> v`
    pub fn weight(&self, u: QubitId, v: QubitId) -> Option<Weight> {
        self.lookup.get(&(u, v)).map(|&idx| self.edges[idx].weight)
    }

    /// Weight used to reach `to` from `from`: `from -> to` if present,
    /// otherwise `to -> from`
    pub fn connecting_weight(&self, from: QubitId, to: QubitId) -> Option<Weight> {
        self.weight(from, to).or_else(|| self.weight(to, from))
    }

    /// Cost of an undirected pair: the cheaper of its directions
    pub fn pair_weight(&self, a: QubitId, b: QubitId) -> Option<Weight> {
        match (self.weight(a, b), self.weight(b, a)) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (x, y) => x.or(y),
        }
    }

    /// Neighbors in either direction, ascending
    pub fn neighbors(&self, q: QubitId) -> impl Iterator<Item = QubitId> + '_ {
        self.adjacency
            .get(q)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Cheapest directed edge; ties broken by `(source, target)`
    pub fn min_edge(&self) -> Option<&WeightedEdge> {
        self.edges.iter().min_by(|a, b| {
            a.weight
                .total_cmp(&b.weight)
                .then((a.source, a.target).cmp(&(b.source, b.target)))
        })
    }

    // ========================================================================
    // Patch Queries
    // ========================================================================

    /// Total weight of a node set, each linked pair counted once
    /// Gantree: score(nodes) -> Weight // 패치 점수
    pub fn score(&self, nodes: &[QubitId]) -> Weight {
        // Ordered iteration keeps the floating-point sum reproducible
        let members: BTreeSet<QubitId> = nodes.iter().copied().collect();

        members
            .iter()
            .flat_map(|&a| {
                self.neighbors(a)
                    .filter(move |&b| a < b)
                    .map(move |b| (a, b))
            })
            .filter(|(_, b)| members.contains(b))
            .filter_map(|(a, b)| self.pair_weight(a, b))
            .sum()
    }

    /// Whether the induced subgraph (direction ignored) is connected
    pub fn is_connected_set(&self, nodes: &[QubitId]) -> bool {
        let members: HashSet<QubitId> = nodes.iter().copied().collect();
        let Some(&start) = nodes.first() else {
            return false;
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if members.contains(&next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited.len() == members.len()
    }
}

impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeightedGraph({} nodes, {} edges)",
            self.num_nodes,
            self.edges.len()
        )
    }
}

// ============================================================================
// GraphBuilder
// ============================================================================

/// Result of one graph build
/// Gantree: GraphBuild // 빌드 결과
#[derive(Debug, Clone)]
pub struct GraphBuild {
    /// The weighted graph
    pub graph: WeightedGraph,
    /// Statistics the weights were scaled with
    pub stats: CalibrationStats,
    /// Effective coefficients
    pub weights: ResolvedWeights,
    /// Non-fatal warnings
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds weighted graphs from connectivity and calibration
/// Gantree: GraphBuilder // 그래프 빌더
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    params: WeightParams,
}

impl GraphBuilder {
    /// Create a builder with the given (possibly partial) coefficients
    pub fn new(params: WeightParams) -> Self {
        Self { params }
    }

    /// Configured coefficients
    pub fn params(&self) -> &WeightParams {
        &self.params
    }

    /// Build from a calibration snapshot
    pub fn build_snapshot(&self, snapshot: &CalibrationSnapshot, k: usize) -> LayoutResult<GraphBuild> {
        self.build(&snapshot.connectivity, &snapshot.qubits, &snapshot.gates, k)
    }

    /// Build the weighted graph; `k` is used for auto-scaling only
    /// Gantree: build(conn, nodes, gates, k) -> GraphBuild // 그래프 생성
    ///
    /// Every listed connection gets its own weight. Then, for each listed
    /// `(u, v)`:
    /// - if `(v, u)` is not listed, it is added with `w(u,v) + penalty`
    ///   (or its own weight, if `(v, u)` happens to carry native data);
    /// - if `(v, u)` is listed but uncalibrated while `(u, v)` is
    ///   calibrated, `(v, u)` is re-weighted to `w(u,v) + penalty`.
    ///
    /// Fails with `InvalidParameter` if any weight overflows to a
    /// non-finite value.
    pub fn build(
        &self,
        connectivity: &Connectivity,
        nodes: &[NodeRecord],
        gates: &[GateRecord],
        k: usize,
    ) -> LayoutResult<GraphBuild> {
        let stats = CalibrationStats::collect(nodes, gates);
        let model = WeightModel::new(&self.params, stats, k)?;
        let n = connectivity.num_qubits();
        let index = CalibrationIndex::new(n, nodes, gates);

        let weigh = |u: QubitId, v: QubitId| {
            model.edge_weight(index.coupling(u, v), index.qubit(u), index.qubit(v))
        };

        let mut graph = WeightedGraph::with_nodes(n);
        let forward: Vec<(Coupling, Weight)> = connectivity
            .couplings()
            .iter()
            .map(|&(u, v)| ((u, v), weigh(u, v)))
            .collect();

        for &((u, v), w) in &forward {
            graph.set_edge(u, v, w, false);
        }

        for &((u, v), w) in &forward {
            if !connectivity.contains(v, u) {
                if index.is_native(v, u) {
                    graph.set_edge(v, u, weigh(v, u), false);
                } else {
                    graph.set_edge(v, u, model.reverse_weight(w), true);
                }
            } else if index.is_native(u, v) && !index.is_native(v, u) {
                graph.set_edge(v, u, model.reverse_weight(w), true);
            }
        }

        if let Some(edge) = graph.edges().iter().find(|e| !e.weight.is_finite()) {
            return Err(LayoutError::InvalidParameter(format!(
                "edge ({}, {}) weight is not finite; check calibration magnitudes and coefficients",
                edge.source, edge.target
            )));
        }

        let diagnostics = self.diagnose(connectivity, &index, &graph);

        log::debug!(
            "built {} with {}; {}",
            graph,
            model.weights(),
            model.stats()
        );

        Ok(GraphBuild {
            graph,
            stats: model.stats().clone(),
            weights: *model.weights(),
            diagnostics,
        })
    }

    fn diagnose(
        &self,
        connectivity: &Connectivity,
        index: &CalibrationIndex,
        graph: &WeightedGraph,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let n = connectivity.num_qubits();

        if graph.num_edges() == 0 {
            log::warn!("Empty graph: no coupling edges found among {} qubits", n);
            diagnostics.push(Diagnostic::EmptyGraph { num_nodes: n });
        }

        let covered = index.calibrated_qubits();
        if n > 0 && (covered as f64) < params::SPARSE_COVERAGE * n as f64 {
            log::warn!("Only {}/{} qubits carry calibration data", covered, n);
            diagnostics.push(Diagnostic::SparseCalibration {
                kind: CoverageKind::Qubits,
                covered,
                total: n,
            });
        }

        let total = connectivity.num_couplings();
        let native = connectivity
            .couplings()
            .iter()
            .filter(|&&(u, v)| index.is_native(u, v))
            .count();
        if total > 0 && (native as f64) < params::SPARSE_COVERAGE * total as f64 {
            log::warn!("Only {}/{} couplings carry calibration data", native, total);
            diagnostics.push(Diagnostic::SparseCalibration {
                kind: CoverageKind::Couplings,
                covered: native,
                total,
            });
        }

        diagnostics
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zero_weights() -> WeightParams {
        WeightParams::auto()
            .with_alpha(0.0)
            .with_beta(0.0)
            .with_gamma(0.0)
            .with_delta(0.0)
    }

    #[test]
    fn test_isolated_nodes_are_kept() {
        let conn = Connectivity::from_edges(5, vec![(0, 1)]).unwrap();
        let build = GraphBuilder::default().build(&conn, &[], &[], 2).unwrap();

        assert_eq!(build.graph.num_nodes(), 5);
        assert_eq!(build.graph.num_edges(), 2); // native + synthesized reverse
        assert_eq!(build.graph.neighbors(4).count(), 0);
    }

    #[test]
    fn test_reverse_synthesis_adds_penalty() {
        let conn = Connectivity::from_edges(2, vec![(0, 1)]).unwrap();
        let gates = vec![GateRecord::two_qubit("cx", 0, 1).with_error(0.02)];
        let build = GraphBuilder::new(zero_weights().with_direction_penalty(0.3))
            .build(&conn, &[], &gates, 2)
            .unwrap();

        let forward = build.graph.weight(0, 1).unwrap();
        let reverse = build.graph.weight(1, 0).unwrap();
        assert_relative_eq!(forward, 0.02, epsilon = 1e-12);
        assert_relative_eq!(reverse, 0.32, epsilon = 1e-12);
        assert!(build.graph.edges()[1].synthesized);
        assert_relative_eq!(build.graph.pair_weight(1, 0).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_listed_uncalibrated_reverse_is_penalized() {
        let conn = Connectivity::from_undirected(2, &[(0, 1)]).unwrap();
        let gates = vec![GateRecord::two_qubit("cx", 1, 0).with_error(0.01)];
        let build = GraphBuilder::new(zero_weights())
            .build(&conn, &[], &gates, 2)
            .unwrap();

        assert_relative_eq!(build.graph.weight(1, 0).unwrap(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(build.graph.weight(0, 1).unwrap(), 0.51, epsilon = 1e-12);
    }

    #[test]
    fn test_both_directions_native() {
        let conn = Connectivity::from_undirected(2, &[(0, 1)]).unwrap();
        let gates = vec![
            GateRecord::two_qubit("cx", 0, 1).with_error(0.01),
            GateRecord::two_qubit("cx", 1, 0).with_error(0.03),
        ];
        let build = GraphBuilder::new(zero_weights())
            .build(&conn, &[], &gates, 2)
            .unwrap();

        assert_relative_eq!(build.graph.weight(0, 1).unwrap(), 0.01, epsilon = 1e-12);
        assert_relative_eq!(build.graph.weight(1, 0).unwrap(), 0.03, epsilon = 1e-12);
        assert!(build.graph.edges().iter().all(|e| !e.synthesized));
    }

    #[test]
    fn test_unlisted_native_reverse_uses_own_weight() {
        let conn = Connectivity::from_edges(2, vec![(0, 1)]).unwrap();
        let gates = vec![
            GateRecord::two_qubit("cx", 0, 1).with_error(0.01),
            GateRecord::two_qubit("cx", 1, 0).with_error(0.04),
        ];
        let build = GraphBuilder::new(zero_weights())
            .build(&conn, &[], &gates, 2)
            .unwrap();

        assert_relative_eq!(build.graph.weight(1, 0).unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_uncalibrated_edges_use_default_penalty() {
        let conn = Connectivity::linear(3);
        let gates = vec![GateRecord::two_qubit("cx", 0, 1).with_error(0.02)];
        let build = GraphBuilder::new(zero_weights())
            .build(&conn, &[], &gates, 2)
            .unwrap();

        assert_relative_eq!(build.graph.weight(1, 2).unwrap(), 0.03, epsilon = 1e-12);
        assert!(build
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SparseCalibration { kind: CoverageKind::Qubits, .. })));
    }

    #[test]
    fn test_sparse_coupling_calibration_reported() {
        let conn = Connectivity::linear(5);
        let nodes: Vec<NodeRecord> = (0..5)
            .map(|q| {
                NodeRecord::new(q)
                    .with_parameter("gate_error", 2e-4)
                    .with_parameter("readout_error", 0.01)
            })
            .collect();
        let gates = vec![GateRecord::two_qubit("cx", 0, 1).with_error(0.01)];

        let build = GraphBuilder::default().build(&conn, &nodes, &gates, 3).unwrap();

        assert!(build.diagnostics.contains(&Diagnostic::SparseCalibration {
            kind: CoverageKind::Couplings,
            covered: 1,
            total: 4,
        }));
        assert!(!build
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::SparseCalibration { kind: CoverageKind::Qubits, .. })));
    }

    #[test]
    fn test_oversized_error_rates_stay_finite() {
        let conn = Connectivity::linear(3);
        let gates = vec![
            GateRecord::two_qubit("cx", 0, 1).with_error(1e308),
            GateRecord::two_qubit("cx", 1, 2).with_error(1e308),
        ];
        let build = GraphBuilder::default().build(&conn, &[], &gates, 2).unwrap();

        assert_eq!(build.graph.num_edges(), 4);
        for edge in build.graph.edges() {
            assert!(edge.weight.is_finite(), "edge {:?}", edge);
            assert!(edge.weight >= 0.0);
        }
        // Rejected rates count as uncalibrated
        assert_eq!(build.stats.samples.two_qubit_errors, 0);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let conn = Connectivity::linear(2);
        let gates = vec![GateRecord::two_qubit("cx", 0, 1)
            .with_error(0.01)
            .with_duration(1e308)];
        let err = GraphBuilder::default()
            .build(&conn, &[], &gates, 2)
            .unwrap_err();

        assert!(matches!(&err, LayoutError::InvalidParameter(msg) if msg.contains("(0, 1)")));
    }

    #[test]
    fn test_empty_connectivity_warns_but_builds() {
        let conn = Connectivity::from_edges(3, vec![]).unwrap();
        let build = GraphBuilder::default().build(&conn, &[], &[], 2).unwrap();

        assert_eq!(build.graph.num_nodes(), 3);
        assert_eq!(build.graph.num_edges(), 0);
        assert!(build
            .diagnostics
            .contains(&Diagnostic::EmptyGraph { num_nodes: 3 }));
    }

    #[test]
    fn test_invalid_params_fail_build() {
        let conn = Connectivity::linear(3);
        let err = GraphBuilder::new(WeightParams::auto().with_gamma(-0.1))
            .build(&conn, &[], &[], 2)
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_weights_nonnegative_and_above_native_error() {
        let snapshot = CalibrationSnapshot::ibm_typical(Connectivity::heavy_hex_7());
        let build = GraphBuilder::default().build_snapshot(&snapshot, 4).unwrap();

        for edge in build.graph.edges() {
            assert!(edge.weight.is_finite());
            assert!(edge.weight >= 0.01, "edge {:?}", edge);
        }
        assert!(build.diagnostics.is_empty());
    }

    #[test]
    fn test_score_counts_pairs_once() {
        let graph =
            WeightedGraph::from_weighted_edges(3, &[(0, 1, 1.0), (1, 0, 3.0), (1, 2, 2.0)]).unwrap();

        assert_relative_eq!(graph.score(&[0, 1, 2]), 3.0, epsilon = 1e-12);
        assert_relative_eq!(graph.score(&[0, 2]), 0.0, epsilon = 1e-12);
        assert_eq!(graph.connecting_weight(1, 0), Some(3.0));
        assert_eq!(graph.connecting_weight(2, 1), Some(2.0));
    }

    #[test]
    fn test_connected_set() {
        let graph = WeightedGraph::from_weighted_edges(4, &[(0, 1, 1.0), (2, 1, 1.0)]).unwrap();

        assert!(graph.is_connected_set(&[0, 1, 2]));
        assert!(!graph.is_connected_set(&[0, 2]));
        assert!(!graph.is_connected_set(&[0, 3]));
        assert!(graph.is_connected_set(&[3]));
        assert!(!graph.is_connected_set(&[]));
    }

    #[test]
    fn test_min_edge_tie_break() {
        let graph =
            WeightedGraph::from_weighted_edges(4, &[(2, 3, 0.5), (1, 2, 0.5), (0, 1, 0.9)]).unwrap();
        let min = graph.min_edge().unwrap();
        assert_eq!((min.source, min.target), (1, 2));
    }

    #[test]
    fn test_from_weighted_edges_validates() {
        assert!(WeightedGraph::from_weighted_edges(2, &[(0, 1, -1.0)]).is_err());
        assert!(WeightedGraph::from_weighted_edges(2, &[(0, 2, 1.0)]).is_err());
        assert!(WeightedGraph::from_weighted_edges(2, &[(1, 1, 1.0)]).is_err());
    }
}
