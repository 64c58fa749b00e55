//! Calibration snapshot of a backend
//!
//! Gantree: L2_Calibration → CalibrationSnapshot
//!
//! Bundles connectivity with the calibration records reported for it, in
//! the normalized record shape. Snapshots load from and save to JSON.

use crate::index::CalibrationIndex;
use crate::records::{GateRecord, NodeRecord};
use crate::stats::CalibrationStats;
use smartlayout_core::{Connectivity, LayoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Calibration data of one backend
/// Gantree: CalibrationSnapshot // 캘리브레이션 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSnapshot {
    /// Backend name
    pub backend_name: String,

    /// Calibration time as reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    /// Native connectivity
    pub connectivity: Connectivity,

    /// Per-qubit records
    #[serde(default)]
    pub qubits: Vec<NodeRecord>,

    /// Per-gate records
    #[serde(default)]
    pub gates: Vec<GateRecord>,
}

impl CalibrationSnapshot {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a snapshot without calibration records
    pub fn new(backend_name: &str, connectivity: Connectivity) -> Self {
        Self {
            backend_name: backend_name.to_string(),
            last_update: None,
            connectivity,
            qubits: Vec::new(),
            gates: Vec::new(),
        }
    }

    /// Create from uniform values (for testing/simulation)
    ///
    /// Every qubit gets the same 1Q error, readout error and T1; every
    /// native coupling gets a `cx` record with the same error and duration.
    pub fn uniform(
        backend_name: &str,
        connectivity: Connectivity,
        error_1q: f64,
        error_2q: f64,
        readout_error: f64,
        t1_s: f64,
        gate_length_s: f64,
    ) -> Self {
        let mut snapshot = Self::new(backend_name, connectivity);

        snapshot.qubits = (0..snapshot.connectivity.num_qubits())
            .map(|q| {
                NodeRecord::new(q)
                    .with_parameter("gate_error", error_1q)
                    .with_parameter("readout_error", readout_error)
                    .with_parameter("T1", t1_s)
            })
            .collect();

        snapshot.gates = snapshot
            .connectivity
            .couplings()
            .iter()
            .map(|&(c, t)| {
                GateRecord::two_qubit("cx", c, t)
                    .with_error(error_2q)
                    .with_duration(gate_length_s)
            })
            .collect();

        snapshot
    }

    /// Create IBM-typical calibration (for testing)
    pub fn ibm_typical(connectivity: Connectivity) -> Self {
        Self::uniform(
            "ibm_simulator",
            connectivity,
            0.0003, // 1Q error: 0.03%
            0.01,   // 2Q error: 1%
            0.01,   // Readout: 1%
            100e-6, // T1: 100 μs
            300e-9, // CX: 300 ns
        )
    }

    /// Set calibration time
    pub fn with_last_update(mut self, last_update: impl Into<String>) -> Self {
        self.last_update = Some(last_update.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.connectivity.num_qubits()
    }

    /// Summary statistics over all records
    /// Gantree: stats(&self) -> CalibrationStats // 통계
    pub fn stats(&self) -> CalibrationStats {
        CalibrationStats::collect(&self.qubits, &self.gates)
    }

    /// Per-qubit / per-connection lookup
    pub fn index(&self) -> CalibrationIndex {
        CalibrationIndex::new(self.num_qubits(), &self.qubits, &self.gates)
    }

    // ========================================================================
    // JSON I/O
    // ========================================================================

    /// Parse from JSON; connectivity is validated while decoding
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> LayoutResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl fmt::Display for CalibrationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationSnapshot({}, {}Q, {} qubit records, {} gate records)",
            self.backend_name,
            self.num_qubits(),
            self.qubits.len(),
            self.gates.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use smartlayout_core::LayoutError;

    #[test]
    fn test_uniform_snapshot() {
        let snapshot = CalibrationSnapshot::ibm_typical(Connectivity::linear(5));

        assert_eq!(snapshot.num_qubits(), 5);
        assert_eq!(snapshot.qubits.len(), 5);
        assert_eq!(snapshot.gates.len(), 4);
        assert!(snapshot.index().is_native(0, 1));
    }

    #[test]
    fn test_json_roundtrip_keeps_records() {
        let snapshot = CalibrationSnapshot::ibm_typical(Connectivity::ring(4))
            .with_last_update("2024-05-01T12:00:00Z");

        let json = snapshot.to_json().unwrap();
        let restored = CalibrationSnapshot::from_json(&json).unwrap();

        assert_eq!(snapshot, restored);
    }

    #[test]
    fn test_from_json_validates_connectivity() {
        let json = r#"{
            "backend_name": "broken",
            "connectivity": {"num_qubits": 2, "couplings": [[0, 4]], "name": null}
        }"#;

        let err = CalibrationSnapshot::from_json(json).unwrap_err();
        assert!(matches!(&err, LayoutError::JsonError(msg) if msg.contains("Qubit 4 out of range")));
    }

    #[test]
    fn test_missing_records_default_to_empty() {
        let json = r#"{
            "backend_name": "bare",
            "connectivity": {"num_qubits": 3, "couplings": [[0, 1], [1, 2]], "name": null}
        }"#;

        let snapshot = CalibrationSnapshot::from_json(json).unwrap();
        assert!(snapshot.qubits.is_empty());
        assert!(!snapshot.stats().has_measurements());
    }

    #[test]
    fn test_load_missing_file() {
        let err = CalibrationSnapshot::load("/nonexistent/calibration.json").unwrap_err();
        assert!(matches!(err, LayoutError::FileError(_)));
    }
}
