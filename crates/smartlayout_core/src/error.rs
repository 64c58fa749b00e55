//! Error types for SmartLayout
//!
//! Gantree: L0_Foundation → Errors
//!
//! Only structural impossibilities are errors. Missing calibration never is;
//! it degrades to a default and, at most, a [`crate::Diagnostic`].

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for SmartLayout
/// Gantree: LayoutError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// Requested patch is larger than the device
    /// Gantree: SizeConstraint{{requested,available}} // 크기 초과
    #[error("Patch size {requested} exceeds available qubit count {available}")]
    SizeConstraint { requested: usize, available: usize },

    /// No edges, or no connected patch could be grown
    /// Gantree: EmptyGraph(String) // 빈 그래프
    #[error("Empty graph: {0}")]
    EmptyGraph(String),

    /// Exhaustive search would enumerate too many candidates
    #[error("Search space of {candidates} candidates exceeds limit {limit}")]
    SearchSpaceTooLarge { candidates: u64, limit: u64 },

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    /// Self-loop in connectivity
    #[error("Invalid coupling ({0}, {1}): qubits must be different")]
    InvalidCoupling(usize, usize),

    /// Invalid configuration value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for SmartLayout operations
/// Gantree: LayoutResult<T> // type alias
pub type LayoutResult<T> = Result<T, LayoutError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        LayoutError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl LayoutError {
    /// Check if the error reflects an impossible placement request
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LayoutError::SizeConstraint { .. }
                | LayoutError::EmptyGraph(_)
                | LayoutError::SearchSpaceTooLarge { .. }
        )
    }

    /// Check if the error is caused by malformed caller input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            LayoutError::QubitOutOfRange { .. }
                | LayoutError::InvalidCoupling(..)
                | LayoutError::InvalidParameter(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
