//! # SmartLayout Scoring
//!
//! Noise-aware weighted coupling graphs and connected patch selection.
//!
//! ## Gantree Architecture
//!
//! ```text
//! smartlayout_scoring // L3+L4+L5: Scoring + Selection + Report (완료)
//!     L3_Scoring // 가중 그래프 (완료)
//!         WeightModel // 가중치 공식/자동 스케일 (완료)
//!         GraphBuilder // 그래프 생성, 역방향 합성 (완료)
//!     L4_Selection // 패치 선택 (완료)
//!         PatchSelector // trait (완료)
//!         GreedySelector // 다중 시작 탐욕 + 교환 개선 (완료)
//!         ExhaustiveSelector // 전수 탐색 (완료)
//!     L5_Report // 결과 (완료)
//!         DistanceCost // 맨해튼 거리 비용 (완료)
//!         SmartLayout // 통합 진입점 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use smartlayout_scoring::prelude::*;
//! use smartlayout_calibration::CalibrationSnapshot;
//! use smartlayout_core::Connectivity;
//!
//! let snapshot = CalibrationSnapshot::ibm_typical(Connectivity::heavy_hex_7());
//! let layout = SmartLayout::new(LayoutConfig::default().with_seed(42));
//!
//! let report = layout.plan_snapshot(&snapshot, 4, &[]).unwrap();
//! assert_eq!(report.physical_qubits.len(), 4);
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! ## Graph and Selector Separately
//!
//! ```rust
//! use smartlayout_scoring::prelude::*;
//!
//! let graph = WeightedGraph::from_weighted_edges(
//!     4,
//!     &[(0, 1, 0.3), (1, 2, 0.1), (2, 3, 0.1)],
//! ).unwrap();
//!
//! let selection = GreedySelector::seeded(7).select(&graph, 3).unwrap();
//! assert_eq!(selection.patch.qubits(), &[1, 2, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Weight model (Gantree: L3_Scoring → WeightModel)
pub mod weights;

/// Weighted graph (Gantree: L3_Scoring → GraphBuilder)
pub mod graph;

/// Selector trait (Gantree: L4_Selection → PatchSelector)
pub mod selector;

/// Greedy selector (Gantree: L4_Selection → GreedySelector)
pub mod greedy;

/// Exact selector (Gantree: L4_Selection → ExhaustiveSelector)
pub mod exhaustive;

/// Distance cost (Gantree: L5_Report → DistanceCost)
pub mod distance;

/// Facade (Gantree: L5_Report → SmartLayout)
pub mod layout;

// ============================================================================
// Re-exports
// ============================================================================

pub use distance::{interaction_cost, manhattan_distance, Interaction};
pub use exhaustive::{binomial, ExhaustiveSelector};
pub use graph::{GraphBuild, GraphBuilder, WeightedEdge, WeightedGraph};
pub use greedy::{GreedyConfig, GreedySelector};
pub use layout::{LayoutConfig, LayoutReport, SelectionTrace, SmartLayout};
pub use selector::{check_preconditions, Patch, PatchSelector, Selection};
pub use weights::{ResolvedWeights, WeightModel, WeightParams};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use smartlayout_scoring::prelude::*;
    //! ```

    pub use crate::distance::Interaction;
    pub use crate::exhaustive::ExhaustiveSelector;
    pub use crate::graph::{GraphBuild, GraphBuilder, WeightedEdge, WeightedGraph};
    pub use crate::greedy::{GreedyConfig, GreedySelector};
    pub use crate::layout::{LayoutConfig, LayoutReport, SmartLayout};
    pub use crate::selector::{Patch, PatchSelector, Selection};
    pub use crate::weights::{ResolvedWeights, WeightParams};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
