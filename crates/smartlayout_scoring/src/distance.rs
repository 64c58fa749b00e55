//! Manhattan-distance interaction cost
//!
//! Gantree: L5_Report → DistanceCost
//!
//! Physical qubit `p` sits at `(p / width, p % width)` on a row-major grid.
//! The cost of a layout is the summed grid distance of every two-qubit
//! interaction after mapping logical qubits through the layout.

use smartlayout_core::{LayoutError, LayoutResult, QubitId};

/// Logical two-qubit interaction `(a, b)`
pub type Interaction = (usize, usize);

/// Grid distance between two physical qubits
pub fn manhattan_distance(a: QubitId, b: QubitId, row_width: usize) -> usize {
    (a / row_width).abs_diff(b / row_width) + (a % row_width).abs_diff(b % row_width)
}

/// Summed distance of `interactions` under `layout` (logical -> physical)
/// Gantree: interaction_cost(interactions, layout, width) -> f64 // 거리 비용
pub fn interaction_cost(
    interactions: &[Interaction],
    layout: &[QubitId],
    row_width: usize,
) -> LayoutResult<f64> {
    if row_width == 0 {
        return Err(LayoutError::InvalidParameter(
            "distance row width must be > 0".to_string(),
        ));
    }

    let physical = |logical: usize| {
        layout
            .get(logical)
            .copied()
            .ok_or(LayoutError::QubitOutOfRange {
                qubit: logical,
                max: layout.len().saturating_sub(1),
            })
    };

    interactions.iter().try_fold(0.0, |acc, &(a, b)| {
        let d = manhattan_distance(physical(a)?, physical(b)?, row_width);
        Ok(acc + d as f64)
    })
}
