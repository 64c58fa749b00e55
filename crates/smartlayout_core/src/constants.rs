//! Constants for SmartLayout
//!
//! Gantree: L0_Foundation → Constants
//!
//! Calibration fallbacks, weighting defaults, and the recognized calibration
//! field names. Times are in seconds.

// ============================================================================
// Calibration Defaults
// Gantree: defaults // 기본값
// ============================================================================

pub mod defaults {
    //! Substitutes used when a calibration quantity was never measured

    /// Mean/max two-qubit gate error when no gate reports one
    /// Gantree: MEAN_2Q_ERROR: f64 = 1e-3
    pub const MEAN_2Q_ERROR: f64 = 1e-3;

    /// Mean single-qubit gate error when no qubit reports one
    /// Gantree: MEAN_1Q_ERROR: f64 = 1e-4
    pub const MEAN_1Q_ERROR: f64 = 1e-4;

    /// Mean readout error when no qubit reports one
    /// Gantree: MEAN_READOUT_ERROR: f64 = 2e-2
    pub const MEAN_READOUT_ERROR: f64 = 2e-2;

    /// Mean two-qubit gate duration (seconds)
    /// Gantree: MEAN_2Q_DURATION_S: f64 = 1e-6
    pub const MEAN_2Q_DURATION_S: f64 = 1e-6;

    /// Mean coherence (T1) time (seconds)
    /// Gantree: MEAN_COHERENCE_S: f64 = 60e-6
    pub const MEAN_COHERENCE_S: f64 = 60e-6;

    /// Per-qubit coherence time when the qubit has no T1 entry (seconds)
    pub const NODE_COHERENCE_S: f64 = MEAN_COHERENCE_S;

    /// Multiplier on the worst measured 2Q error for uncalibrated connections
    pub const UNCALIBRATED_ERROR_FACTOR: f64 = 1.5;

    /// Native error assumed for every connection when no 2Q error was sampled
    pub const UNCALIBRATED_ERROR_FLOOR: f64 = 10.0;
}

// ============================================================================
// Weight Parameters
// Gantree: params // 가중치 파라미터
// ============================================================================

pub mod params {
    //! Weighting defaults and numerical guards

    /// Guard against division by (near) zero
    /// Gantree: EPSILON: f64 = 1e-6
    pub const EPSILON: f64 = 1e-6;

    /// Decoherence coefficient used when `delta` is unset
    /// Gantree: DEFAULT_DELTA: f64 = 0.01
    pub const DEFAULT_DELTA: f64 = 0.01;

    /// Penalty added to synthesized (non-native) directions
    /// Gantree: DEFAULT_DIRECTION_PENALTY: f64 = 0.5
    pub const DEFAULT_DIRECTION_PENALTY: f64 = 0.5;

    /// External distance-cost weight (disabled)
    pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.0;

    /// Number of greedy starts
    /// Gantree: DEFAULT_NUM_STARTS: usize = 20
    pub const DEFAULT_NUM_STARTS: usize = 20;

    /// Minimum score decrease accepted by local refinement
    pub const IMPROVEMENT_TOLERANCE: f64 = 1e-12;

    /// Coverage below which calibration is reported as sparse
    pub const SPARSE_COVERAGE: f64 = 0.5;

    /// Row width of the grid used by the Manhattan distance cost
    pub const DISTANCE_ROW_WIDTH: usize = 8;

    /// Candidate limit for exhaustive patch search
    pub const EXHAUSTIVE_LIMIT: u64 = 200_000;
}

// ============================================================================
// Calibration Field Names
// Gantree: field_names // 필드 이름
// ============================================================================

pub mod field_names {
    //! Parameter names recognized in calibration records, in priority order

    /// Single-qubit error names
    pub const SINGLE_QUBIT_ERROR: [&str; 2] = ["gate_error", "single_qubit_error"];

    /// Readout error names
    pub const READOUT_ERROR: [&str; 2] = ["readout_error", "prob_meas1_prep0"];

    /// Coherence time name
    pub const COHERENCE_TIME: [&str; 1] = ["T1"];

    /// Two-qubit gate error name
    pub const GATE_ERROR: [&str; 1] = ["gate_error"];

    /// Two-qubit gate duration name
    pub const GATE_LENGTH: [&str; 1] = ["gate_length"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_positive() {
        assert!(defaults::MEAN_2Q_ERROR > 0.0);
        assert!(defaults::MEAN_COHERENCE_S > defaults::MEAN_2Q_DURATION_S);
        assert!(params::EPSILON > 0.0);
    }

    #[test]
    fn test_field_name_priority() {
        assert_eq!(field_names::SINGLE_QUBIT_ERROR[0], "gate_error");
        assert_eq!(field_names::READOUT_ERROR[1], "prob_meas1_prep0");
    }
}
