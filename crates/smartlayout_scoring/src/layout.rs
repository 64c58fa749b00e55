//! Patch selection facade and report
//!
//! Gantree: L5_Report → SmartLayout
//!
//! Ties the pipeline together: statistics, weighted graph, patch selection
//! and the optional distance cost, summarized in a serializable
//! [`LayoutReport`] the caller can attach to its compiled output.

use crate::distance::{interaction_cost, Interaction};
use crate::graph::{GraphBuild, GraphBuilder};
use crate::greedy::{GreedyConfig, GreedySelector};
use crate::selector::{PatchSelector, Selection};
use crate::weights::{ResolvedWeights, WeightParams};
use smartlayout_calibration::{CalibrationSnapshot, CalibrationStats, GateRecord, NodeRecord};
use smartlayout_core::{
    params, Connectivity, Diagnostic, LayoutError, LayoutResult, QubitId, Weight,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LayoutConfig
// ============================================================================

/// Complete layout configuration
/// Gantree: LayoutConfig // 레이아웃 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Weight coefficients; missing ones are auto-scaled
    #[serde(default)]
    pub weights: WeightParams,

    /// Greedy search settings
    #[serde(default)]
    pub selection: GreedyConfig,

    /// Row width of the grid used for distance cost
    pub distance_row_width: usize,
}

impl LayoutConfig {
    /// Set weight coefficients
    pub fn with_weights(mut self, weights: WeightParams) -> Self {
        self.weights = weights;
        self
    }

    /// Set greedy search settings
    pub fn with_selection(mut self, selection: GreedyConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Set seed for the greedy search
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.selection.seed = Some(seed);
        self
    }

    /// Set distance grid row width
    pub fn with_distance_row_width(mut self, width: usize) -> Self {
        self.distance_row_width = width;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> LayoutResult<()> {
        self.weights.validate()?;
        if self.distance_row_width == 0 {
            return Err(LayoutError::InvalidParameter(
                "distance_row_width must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            weights: WeightParams::default(),
            selection: GreedyConfig::default(),
            distance_row_width: params::DISTANCE_ROW_WIDTH,
        }
    }
}

impl fmt::Display for LayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LayoutConfig({}, row_width={})",
            self.selection, self.distance_row_width
        )
    }
}

// ============================================================================
// LayoutReport
// ============================================================================

/// Search statistics of the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionTrace {
    /// Score before refinement
    pub initial_score: Weight,
    /// Accepted refinement swaps
    pub swaps: usize,
    /// Trials run
    pub trials: usize,
    /// Trials that reached the requested size
    pub completed_trials: usize,
    /// Whether the fallback produced the patch
    pub fallback: bool,
}

impl From<&Selection> for SelectionTrace {
    fn from(selection: &Selection) -> Self {
        Self {
            initial_score: selection.initial_score,
            swaps: selection.swaps,
            trials: selection.trials,
            completed_trials: selection.completed_trials,
            fallback: selection.fallback,
        }
    }
}

/// Layout metadata
/// Gantree: LayoutReport // 결과 메타데이터
///
/// Logical qubit `i` maps to `physical_qubits[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Selected physical qubits, ascending
    pub physical_qubits: Vec<QubitId>,

    /// Requested patch size
    pub num_qubits: usize,

    /// Total weight of the patch
    pub score: Weight,

    /// Effective weight coefficients
    pub weights: ResolvedWeights,

    /// Calibration statistics used for scaling
    pub stats: CalibrationStats,

    /// Weighted Manhattan cost of the interactions (0 when disabled)
    pub distance_cost: f64,

    /// Calibration time of the input, if known
    pub calibration_time: Option<String>,

    /// Selector that produced the patch
    pub selector: String,

    /// Non-fatal warnings from graph build and selection
    pub diagnostics: Vec<Diagnostic>,

    /// Search statistics
    pub trace: SelectionTrace,
}

impl LayoutReport {
    /// Whether the patch has the requested size
    pub fn is_complete(&self) -> bool {
        self.physical_qubits.len() == self.num_qubits
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for LayoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LayoutReport({:?}, score={:.6}, selector={}",
            self.physical_qubits, self.score, self.selector
        )?;
        if !self.diagnostics.is_empty() {
            write!(f, ", {} warnings", self.diagnostics.len())?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// SmartLayout
// ============================================================================

/// Noise-aware layout planner
/// Gantree: SmartLayout // 통합 진입점
#[derive(Debug, Clone)]
pub struct SmartLayout<S: PatchSelector = GreedySelector> {
    config: LayoutConfig,
    builder: GraphBuilder,
    selector: S,
}

impl SmartLayout<GreedySelector> {
    /// Create with the greedy selector configured by `config.selection`
    pub fn new(config: LayoutConfig) -> Self {
        let selector = GreedySelector::new(config.selection.clone());
        Self::with_selector(config, selector)
    }
}

impl Default for SmartLayout<GreedySelector> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<S: PatchSelector> SmartLayout<S> {
    /// Create with a custom selector; `config.selection` is then unused
    pub fn with_selector(config: LayoutConfig, selector: S) -> Self {
        Self {
            builder: GraphBuilder::new(config.weights.clone()),
            config,
            selector,
        }
    }

    /// Configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Selector
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Build the weighted graph only
    pub fn build_graph(
        &self,
        connectivity: &Connectivity,
        nodes: &[NodeRecord],
        gates: &[GateRecord],
        k: usize,
    ) -> LayoutResult<GraphBuild> {
        self.builder.build(connectivity, nodes, gates, k)
    }

    /// Select a `k`-qubit patch from raw records
    /// Gantree: plan(conn, nodes, gates, k, interactions) -> LayoutReport // 레이아웃 계획
    pub fn plan(
        &self,
        connectivity: &Connectivity,
        nodes: &[NodeRecord],
        gates: &[GateRecord],
        k: usize,
        interactions: &[Interaction],
    ) -> LayoutResult<LayoutReport> {
        self.run(connectivity, nodes, gates, k, interactions, None)
    }

    /// Select a `k`-qubit patch from a snapshot
    pub fn plan_snapshot(
        &self,
        snapshot: &CalibrationSnapshot,
        k: usize,
        interactions: &[Interaction],
    ) -> LayoutResult<LayoutReport> {
        self.run(
            &snapshot.connectivity,
            &snapshot.qubits,
            &snapshot.gates,
            k,
            interactions,
            snapshot.last_update.clone(),
        )
    }

    fn run(
        &self,
        connectivity: &Connectivity,
        nodes: &[NodeRecord],
        gates: &[GateRecord],
        k: usize,
        interactions: &[Interaction],
        calibration_time: Option<String>,
    ) -> LayoutResult<LayoutReport> {
        self.config.validate()?;

        let build = self.build_graph(connectivity, nodes, gates, k)?;
        let selection = self.selector.select(&build.graph, k)?;

        let physical_qubits = selection.patch.qubits().to_vec();
        let distance_cost = if build.weights.distance_weight > 0.0 {
            build.weights.distance_weight
                * interaction_cost(interactions, &physical_qubits, self.config.distance_row_width)?
        } else {
            0.0
        };

        let mut diagnostics = build.diagnostics;
        diagnostics.extend(selection.diagnostics());

        let report = LayoutReport {
            physical_qubits,
            num_qubits: k,
            score: selection.patch.score(),
            weights: build.weights,
            stats: build.stats,
            distance_cost,
            calibration_time,
            selector: self.selector.name().to_string(),
            diagnostics,
            trace: SelectionTrace::from(&selection),
        };

        log::info!("{}", report);

        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhaustive::ExhaustiveSelector;
    use approx::assert_relative_eq;

    fn snapshot() -> CalibrationSnapshot {
        CalibrationSnapshot::ibm_typical(Connectivity::grid(3, 3))
            .with_last_update("2024-05-01T12:00:00Z")
    }

    #[test]
    fn test_config_validate() {
        assert!(LayoutConfig::default().validate().is_ok());
        assert!(LayoutConfig::default()
            .with_distance_row_width(0)
            .validate()
            .is_err());
        assert!(LayoutConfig::default()
            .with_weights(WeightParams::auto().with_beta(-1.0))
            .validate()
            .is_err());
        assert!(LayoutConfig::default()
            .with_selection(GreedyConfig::default().with_num_starts(0))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_decoded_connectivity_is_validated() {
        let bad = r#"{"num_qubits": 2, "couplings": [[0, 5]], "name": null}"#;
        assert!(serde_json::from_str::<Connectivity>(bad).is_err());

        let good = r#"{"num_qubits": 3, "couplings": [[0, 1], [1, 2]], "name": null}"#;
        let conn: Connectivity = serde_json::from_str(good).unwrap();
        let report = SmartLayout::new(LayoutConfig::default().with_seed(2))
            .plan(&conn, &[], &[], 2, &[])
            .unwrap();
        assert_eq!(report.physical_qubits.len(), 2);
    }

    #[test]
    fn test_plan_snapshot_report() {
        let layout = SmartLayout::new(LayoutConfig::default().with_seed(42));
        let report = layout.plan_snapshot(&snapshot(), 4, &[]).unwrap();

        assert_eq!(report.physical_qubits.len(), 4);
        assert_eq!(report.num_qubits, 4);
        assert_eq!(report.selector, "greedy");
        assert_eq!(report.calibration_time.as_deref(), Some("2024-05-01T12:00:00Z"));
        assert_eq!(report.distance_cost, 0.0);
        assert!(report.is_complete());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_distance_cost_enabled() {
        let config = LayoutConfig::default()
            .with_seed(1)
            .with_weights(WeightParams::default().with_distance_weight(0.5));
        let snap = snapshot();
        let report = SmartLayout::new(config)
            .plan_snapshot(&snap, 2, &[(0, 1), (0, 1)])
            .unwrap();

        let raw = interaction_cost(&[(0, 1), (0, 1)], &report.physical_qubits, 8).unwrap();
        assert!(raw > 0.0);
        assert_relative_eq!(report.distance_cost, 0.5 * raw);
    }

    #[test]
    fn test_custom_selector() {
        let layout = SmartLayout::with_selector(LayoutConfig::default(), ExhaustiveSelector::default());
        let report = layout.plan_snapshot(&snapshot(), 3, &[]).unwrap();
        assert_eq!(report.selector, "exhaustive");
        assert_eq!(report.physical_qubits.len(), 3);
    }

    #[test]
    fn test_partial_patch_reported() {
        // Two disconnected pairs; k = 3 can only reach 2
        let conn = Connectivity::from_edges(4, vec![(0, 1), (2, 3)]).unwrap();
        let report = SmartLayout::new(LayoutConfig::default().with_seed(5))
            .plan(&conn, &[], &[], 3, &[])
            .unwrap();

        assert!(!report.is_complete());
        assert!(report.trace.fallback);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::PartialPatch { requested: 3, achieved: 2 })));
    }

    #[test]
    fn test_report_json() {
        let report = SmartLayout::new(LayoutConfig::default().with_seed(9))
            .plan_snapshot(&snapshot(), 3, &[])
            .unwrap();

        let json = report.to_json().unwrap();
        assert!(json.contains("physical_qubits"));
        assert!(json.contains("calibration_time"));

        let parsed = LayoutReport::from_json(&json).unwrap();
        assert_eq!(parsed.physical_qubits, report.physical_qubits);
    }

    #[test]
    fn test_size_constraint_propagates() {
        let err = SmartLayout::default()
            .plan(&Connectivity::linear(5), &[], &[], 6, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::SizeConstraint {
                requested: 6,
                available: 5
            }
        ));
    }
}
