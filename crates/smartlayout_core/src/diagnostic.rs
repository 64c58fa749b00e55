//! Non-fatal diagnostics
//!
//! Gantree: L0_Foundation → Diagnostics
//!
//! Degenerate-but-usable input is reported here instead of failing. Callers
//! receive these alongside a valid result and decide whether to escalate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which calibration quantity is sparsely covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageKind {
    /// Per-qubit single-qubit/readout errors
    Qubits,
    /// Native two-qubit gate errors on the coupling map
    Couplings,
}

/// Warning attached to a graph build or a selection
/// Gantree: Diagnostic // 경고
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Graph was built with no edges
    EmptyGraph {
        /// Number of (isolated) nodes
        num_nodes: usize,
    },

    /// Most entries fell back to defaults
    SparseCalibration {
        /// Quantity affected
        kind: CoverageKind,
        /// Entries with native calibration
        covered: usize,
        /// Total entries
        total: usize,
    },

    /// Selection could not reach the requested size
    PartialPatch {
        /// Requested patch size
        requested: usize,
        /// Size actually returned
        achieved: usize,
    },
}

impl Diagnostic {
    /// Whether the diagnostic means the result is smaller than requested
    pub fn is_partial(&self) -> bool {
        matches!(self, Diagnostic::PartialPatch { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyGraph { num_nodes } => {
                write!(f, "empty graph: no coupling edges among {} qubits", num_nodes)
            }
            Diagnostic::SparseCalibration {
                kind,
                covered,
                total,
            } => write!(
                f,
                "sparse calibration: {}/{} {:?} carry native data",
                covered, total, kind
            ),
            Diagnostic::PartialPatch {
                requested,
                achieved,
            } => write!(
                f,
                "partial patch: requested {} qubits, achieved {}",
                requested, achieved
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = Diagnostic::PartialPatch {
            requested: 5,
            achieved: 3,
        };
        assert!(d.is_partial());
        assert!(d.to_string().contains("achieved 3"));

        let d = Diagnostic::EmptyGraph { num_nodes: 4 };
        assert!(!d.is_partial());
        assert!(d.to_string().contains("4 qubits"));
    }

    #[test]
    fn test_serialization() {
        let d = Diagnostic::SparseCalibration {
            kind: CoverageKind::Couplings,
            covered: 1,
            total: 6,
        };
        let json = serde_json::to_string(&d).unwrap();
        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(d, restored);
    }
}
