//! Core types for SmartLayout
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Fundamental type aliases shared by the calibration and scoring crates.

// ============================================================================
// Type Aliases
// ============================================================================

/// Physical qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Directed physical connection: (control, target)
/// Gantree: Coupling // pub type Coupling = (QubitId, QubitId)
pub type Coupling = (QubitId, QubitId);

/// Composite edge weight (dimensionless cost)
/// Gantree: Weight // pub type Weight = f64
pub type Weight = f64;

// ============================================================================
// Helpers
// ============================================================================

/// Normalize an undirected pair so the smaller index comes first
#[inline]
pub fn ordered_pair(a: QubitId, b: QubitId) -> Coupling {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
