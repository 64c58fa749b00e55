//! # SmartLayout Core
//!
//! Foundation types, errors, diagnostics, and device connectivity for
//! noise-aware qubit patch selection.
//!
//! ## Gantree Architecture
//!
//! ```text
//! smartlayout_core // L0+L1: Foundation + Device (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // 핵심 타입 (완료)
//!         Constants // 기본값/필드 이름 (완료)
//!         Errors // 에러 타입 (완료)
//!         Diagnostics // 비치명 경고 (완료)
//!     L1_Device // 장치 구조 (완료)
//!         Connectivity // 연결 구조 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use smartlayout_core::prelude::*;
//!
//! let conn = Connectivity::from_undirected(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(conn.num_couplings(), 6);
//! assert!(conn.is_fully_connected());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Non-fatal diagnostics (Gantree: L0_Foundation → Diagnostics)
pub mod diagnostic;

/// Device connectivity (Gantree: L1_Device → Connectivity)
pub mod connectivity;

// ============================================================================
// Re-exports
// ============================================================================

pub use connectivity::Connectivity;
pub use constants::{defaults, field_names, params};
pub use diagnostic::{CoverageKind, Diagnostic};
pub use error::{LayoutError, LayoutResult};
pub use types::{Coupling, QubitId, Weight};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use smartlayout_core::prelude::*;
    //! ```

    pub use crate::connectivity::Connectivity;
    pub use crate::constants::{defaults, field_names, params};
    pub use crate::diagnostic::{CoverageKind, Diagnostic};
    pub use crate::error::{LayoutError, LayoutResult};
    pub use crate::types::{Coupling, QubitId, Weight};
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
