//! Per-qubit and per-connection calibration lookup
//!
//! Gantree: L2_Calibration → CalibrationIndex
//!
//! Resolves records into one entry per qubit and one per directed
//! connection. When several records describe the same qubit or connection,
//! the first usable value of each field wins.

use crate::records::{GateRecord, NodeRecord};
use smartlayout_core::{defaults, Coupling, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved calibration of one qubit
/// Gantree: QubitCalibration // 큐비트 보정값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitCalibration {
    /// Single-qubit gate error (0 when unmeasured)
    pub single_qubit_error: f64,
    /// Readout error (0 when unmeasured)
    pub readout_error: f64,
    /// Coherence time in seconds
    pub coherence_time: f64,
    /// Whether any error figure was measured natively
    pub calibrated: bool,
}

impl Default for QubitCalibration {
    fn default() -> Self {
        Self {
            single_qubit_error: 0.0,
            readout_error: 0.0,
            coherence_time: defaults::NODE_COHERENCE_S,
            calibrated: false,
        }
    }
}

/// Native calibration of one directed connection
/// Gantree: CouplingCalibration // 연결 보정값
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CouplingCalibration {
    /// Measured gate error
    pub error: Option<f64>,
    /// Measured gate duration (seconds)
    pub duration: Option<f64>,
}

impl CouplingCalibration {
    /// Whether the connection has a native error measurement
    pub fn is_native(&self) -> bool {
        self.error.is_some()
    }
}

/// Calibration lookup table
/// Gantree: CalibrationIndex // 조회 테이블
#[derive(Debug, Clone, Default)]
pub struct CalibrationIndex {
    qubits: Vec<QubitCalibration>,
    couplings: HashMap<Coupling, CouplingCalibration>,
}

impl CalibrationIndex {
    /// Build the index for a device of `num_qubits` qubits
    ///
    /// Node records outside `[0, num_qubits)` are ignored.
    pub fn new(num_qubits: usize, nodes: &[NodeRecord], gates: &[GateRecord]) -> Self {
        let mut qubits = vec![QubitCalibration::default(); num_qubits];
        let mut seen = vec![(false, false, false); num_qubits];

        for record in nodes {
            let Some(entry) = qubits.get_mut(record.qubit) else {
                log::debug!("skipping calibration for unknown qubit {}", record.qubit);
                continue;
            };
            let flags = &mut seen[record.qubit];

            if !flags.0 {
                if let Some(err) = record.single_qubit_error() {
                    entry.single_qubit_error = err;
                    entry.calibrated = true;
                    flags.0 = true;
                }
            }
            if !flags.1 {
                if let Some(err) = record.readout_error() {
                    entry.readout_error = err;
                    entry.calibrated = true;
                    flags.1 = true;
                }
            }
            if !flags.2 {
                if let Some(t1) = record.coherence_time() {
                    entry.coherence_time = t1;
                    flags.2 = true;
                }
            }
        }

        let mut couplings: HashMap<Coupling, CouplingCalibration> = HashMap::new();
        for gate in gates {
            let Some(coupling) = gate.coupling() else {
                continue;
            };
            let entry = couplings.entry(coupling).or_default();
            if entry.error.is_none() {
                entry.error = gate.gate_error();
            }
            if entry.duration.is_none() {
                entry.duration = gate.gate_length();
            }
        }

        Self { qubits, couplings }
    }

    /// Number of indexed qubits
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Calibration of a qubit, defaults if out of range
    pub fn qubit(&self, qubit: QubitId) -> QubitCalibration {
        self.qubits.get(qubit).copied().unwrap_or_default()
    }

    /// Native calibration of a directed connection
    pub fn coupling(&self, control: QubitId, target: QubitId) -> CouplingCalibration {
        self.couplings
            .get(&(control, target))
            .copied()
            .unwrap_or_default()
    }

    /// Whether `(control, target)` has a native error measurement
    pub fn is_native(&self, control: QubitId, target: QubitId) -> bool {
        self.coupling(control, target).is_native()
    }

    /// Number of qubits with at least one native error figure
    pub fn calibrated_qubits(&self) -> usize {
        self.qubits.iter().filter(|q| q.calibrated).count()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_qubit_defaults() {
        let index = CalibrationIndex::new(3, &[], &[]);
        let q = index.qubit(1);

        assert_eq!(q.single_qubit_error, 0.0);
        assert_eq!(q.readout_error, 0.0);
        assert_eq!(q.coherence_time, defaults::NODE_COHERENCE_S);
        assert!(!q.calibrated);
        assert_eq!(index.calibrated_qubits(), 0);
    }

    #[test]
    fn test_first_record_wins_per_field() {
        let nodes = vec![
            NodeRecord::new(0).with_parameter("readout_error", 0.02),
            NodeRecord::new(0)
                .with_parameter("readout_error", 0.5)
                .with_parameter("gate_error", 1e-4),
        ];
        let index = CalibrationIndex::new(2, &nodes, &[]);

        assert_eq!(index.qubit(0).readout_error, 0.02);
        assert_eq!(index.qubit(0).single_qubit_error, 1e-4);
        assert_eq!(index.calibrated_qubits(), 1);
    }

    #[test]
    fn test_out_of_range_records_ignored() {
        let nodes = vec![NodeRecord::new(9).with_parameter("readout_error", 0.02)];
        let index = CalibrationIndex::new(2, &nodes, &[]);
        assert_eq!(index.calibrated_qubits(), 0);
    }

    #[test]
    fn test_coupling_direction_matters() {
        let gates = vec![
            GateRecord::two_qubit("cx", 0, 1).with_error(0.01),
            GateRecord::two_qubit("cx", 0, 1).with_duration(400e-9),
        ];
        let index = CalibrationIndex::new(2, &[], &gates);

        assert!(index.is_native(0, 1));
        assert!(!index.is_native(1, 0));
        assert_eq!(index.coupling(0, 1).duration, Some(400e-9));
        assert_eq!(index.coupling(1, 0), CouplingCalibration::default());
    }
}
