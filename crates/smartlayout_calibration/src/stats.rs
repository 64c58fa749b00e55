//! Calibration summary statistics
//!
//! Gantree: L2_Calibration → StatsCollector
//!
//! Reduces raw node and gate records into the scalar statistics used to
//! auto-scale weighting coefficients. Every quantity falls back to a
//! documented default when nothing was measured.

use crate::records::{GateRecord, NodeRecord};
use smartlayout_core::defaults;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of measurements behind each statistic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCounts {
    /// Two-qubit gate errors
    pub two_qubit_errors: usize,
    /// Two-qubit gate durations
    pub two_qubit_durations: usize,
    /// Single-qubit errors
    pub single_qubit_errors: usize,
    /// Readout errors
    pub readout_errors: usize,
    /// Coherence times
    pub coherence_times: usize,
}

/// Scalar calibration summary
/// Gantree: CalibrationStats // 통계 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationStats {
    /// Mean two-qubit gate error
    pub mean_2q_error: f64,
    /// Worst two-qubit gate error
    pub max_2q_error: f64,
    /// Mean single-qubit gate error
    pub mean_1q_error: f64,
    /// Mean readout error
    pub mean_readout_error: f64,
    /// Mean two-qubit gate duration (seconds)
    pub mean_2q_duration: f64,
    /// Mean coherence time (seconds)
    pub mean_coherence_time: f64,
    /// Measurement counts
    pub samples: SampleCounts,
}

fn mean_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        default
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl CalibrationStats {
    /// Collect statistics from node and gate records
    /// Gantree: collect(nodes, gates) -> CalibrationStats // 통계 수집
    ///
    /// Gate records that do not act on exactly two qubits are skipped. Each
    /// node record contributes at most one value per quantity.
    pub fn collect(nodes: &[NodeRecord], gates: &[GateRecord]) -> Self {
        let mut twoq = Vec::new();
        let mut durations = Vec::new();

        for gate in gates.iter().filter(|g| g.coupling().is_some()) {
            if let Some(err) = gate.gate_error() {
                twoq.push(err);
            }
            if let Some(length) = gate.gate_length() {
                durations.push(length);
            }
        }

        let oneq: Vec<f64> = nodes.iter().filter_map(NodeRecord::single_qubit_error).collect();
        let readout: Vec<f64> = nodes.iter().filter_map(NodeRecord::readout_error).collect();
        let t1: Vec<f64> = nodes.iter().filter_map(NodeRecord::coherence_time).collect();

        let max_2q_error = twoq
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(defaults::MEAN_2Q_ERROR);

        Self {
            mean_2q_error: mean_or(&twoq, defaults::MEAN_2Q_ERROR),
            max_2q_error,
            mean_1q_error: mean_or(&oneq, defaults::MEAN_1Q_ERROR),
            mean_readout_error: mean_or(&readout, defaults::MEAN_READOUT_ERROR),
            mean_2q_duration: mean_or(&durations, defaults::MEAN_2Q_DURATION_S),
            mean_coherence_time: mean_or(&t1, defaults::MEAN_COHERENCE_S),
            samples: SampleCounts {
                two_qubit_errors: twoq.len(),
                two_qubit_durations: durations.len(),
                single_qubit_errors: oneq.len(),
                readout_errors: readout.len(),
                coherence_times: t1.len(),
            },
        }
    }

    /// Native error substituted for a connection without calibration
    ///
    /// `1.5 × max_2q_error` when at least one two-qubit error was measured,
    /// otherwise a fixed large value.
    pub fn uncalibrated_error(&self) -> f64 {
        if self.samples.two_qubit_errors > 0 {
            defaults::UNCALIBRATED_ERROR_FACTOR * self.max_2q_error
        } else {
            defaults::UNCALIBRATED_ERROR_FLOOR
        }
    }

    /// Whether any measurement at all was found
    pub fn has_measurements(&self) -> bool {
        self.samples != SampleCounts::default()
    }
}

impl Default for CalibrationStats {
    fn default() -> Self {
        Self::collect(&[], &[])
    }
}

impl fmt::Display for CalibrationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationStats(2Q={:.4}/{:.4}, 1Q={:.5}, RO={:.4}, dur={:.2e}s, T1={:.2e}s)",
            self.mean_2q_error,
            self.max_2q_error,
            self.mean_1q_error,
            self.mean_readout_error,
            self.mean_2q_duration,
            self.mean_coherence_time
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
