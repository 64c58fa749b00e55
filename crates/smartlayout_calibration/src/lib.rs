//! # SmartLayout Calibration
//!
//! Calibration records and the summary statistics derived from them.
//!
//! ## Gantree Architecture
//!
//! ```text
//! smartlayout_calibration // L2: Calibration (완료)
//!     Records // 정규화 레코드 (완료)
//!         NodeRecord, GateRecord, Parameter
//!     StatsCollector // 통계 수집 (완료)
//!         CalibrationStats::collect()
//!     CalibrationIndex // 큐비트/연결 조회 (완료)
//!     CalibrationSnapshot // JSON 스냅샷 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use smartlayout_calibration::prelude::*;
//! use smartlayout_core::Connectivity;
//!
//! let snapshot = CalibrationSnapshot::ibm_typical(Connectivity::linear(5));
//! let stats = snapshot.stats();
//!
//! assert!((stats.mean_2q_error - 0.01).abs() < 1e-12);
//! println!("{}", stats);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Calibration records (Gantree: L2_Calibration → Records)
pub mod records;

/// Summary statistics (Gantree: L2_Calibration → StatsCollector)
pub mod stats;

/// Resolved lookup (Gantree: L2_Calibration → CalibrationIndex)
pub mod index;

/// Backend snapshot (Gantree: L2_Calibration → CalibrationSnapshot)
pub mod snapshot;

// ============================================================================
// Re-exports
// ============================================================================

pub use index::{CalibrationIndex, CouplingCalibration, QubitCalibration};
pub use records::{GateRecord, NodeRecord, Parameter};
pub use snapshot::CalibrationSnapshot;
pub use stats::{CalibrationStats, SampleCounts};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use smartlayout_calibration::prelude::*;
    //! ```

    pub use crate::index::{CalibrationIndex, CouplingCalibration, QubitCalibration};
    pub use crate::records::{GateRecord, NodeRecord, Parameter};
    pub use crate::snapshot::CalibrationSnapshot;
    pub use crate::stats::{CalibrationStats, SampleCounts};
}

// ============================================================================
// Integration Tests
// ============================================================================
