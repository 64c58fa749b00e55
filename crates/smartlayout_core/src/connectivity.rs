//! Device connectivity for SmartLayout
//!
//! Gantree: L1_Device → Connectivity
//!
//! Native directed connections of a device. Every listed connection is a
//! physical link; a direction that is not listed may still be driven at a
//! penalty, which the scoring crate accounts for.

use crate::error::{LayoutError, LayoutResult};
use crate::types::{ordered_pair, Coupling, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Device connectivity (coupling map)
/// Gantree: Connectivity // 연결 구조
///
/// Deserialization goes through [`Connectivity::from_edges`], so a decoded
/// map satisfies the same invariants as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConnectivity")]
pub struct Connectivity {
    /// Number of physical qubits, including isolated ones
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Native directed connections in input order, duplicates removed
    /// Gantree: couplings: Vec<(QubitId, QubitId)> // 연결 맵
    couplings: Vec<Coupling>,

    /// Optional device name
    name: Option<String>,
}

/// Unvalidated wire form of [`Connectivity`]
#[derive(Deserialize)]
struct RawConnectivity {
    num_qubits: usize,
    couplings: Vec<Coupling>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawConnectivity> for Connectivity {
    type Error = LayoutError;

    fn try_from(raw: RawConnectivity) -> LayoutResult<Self> {
        let mut connectivity = Self::from_edges(raw.num_qubits, raw.couplings)?;
        connectivity.name = raw.name;
        Ok(connectivity)
    }
}

impl Connectivity {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from directed connections
    /// Gantree: from_edges(n, map) -> Result<Self> // 맵에서 생성
    ///
    /// An empty list is accepted; it yields a device with isolated qubits.
    pub fn from_edges(num_qubits: usize, couplings: Vec<Coupling>) -> LayoutResult<Self> {
        let mut seen = HashSet::with_capacity(couplings.len());
        let mut unique = Vec::with_capacity(couplings.len());

        for (q1, q2) in couplings {
            if q1 == q2 {
                return Err(LayoutError::InvalidCoupling(q1, q2));
            }
            for q in [q1, q2] {
                if q >= num_qubits {
                    return Err(LayoutError::QubitOutOfRange {
                        qubit: q,
                        max: num_qubits.saturating_sub(1),
                    });
                }
            }
            if seen.insert((q1, q2)) {
                unique.push((q1, q2));
            }
        }

        Ok(Self {
            num_qubits,
            couplings: unique,
            name: None,
        })
    }

    /// Create from undirected links, listing both directions as native
    /// Gantree: from_undirected(n, links) -> Result<Self> // 양방향
    pub fn from_undirected(num_qubits: usize, links: &[Coupling]) -> LayoutResult<Self> {
        let couplings = links.iter().flat_map(|&(a, b)| [(a, b), (b, a)]).collect();
        Self::from_edges(num_qubits, couplings)
    }

    /// Create linear chain: 0-1-2-...-N-1
    pub fn linear(n: usize) -> Self {
        let couplings = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        Self::named(n, couplings, format!("linear_{}", n))
    }

    /// Create ring: 0-1-...-N-1-0
    /// Gantree: ring(n) -> Self // 원형
    pub fn ring(n: usize) -> Self {
        let mut couplings: Vec<Coupling> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        if n > 2 {
            couplings.push((n - 1, 0));
        }
        Self::named(n, couplings, format!("ring_{}", n))
    }

    /// Create grid topology
    /// Gantree: grid(rows, cols) -> Self // 그리드
    ///
    /// Qubit indexing: row * cols + col
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut couplings = Vec::new();

        for r in 0..rows {
            for c in 0..cols {
                let q = r * cols + c;

                // Right neighbor
                if c + 1 < cols {
                    couplings.push((q, q + 1));
                }

                // Down neighbor
                if r + 1 < rows {
                    couplings.push((q, q + cols));
                }
            }
        }

        Self::named(rows * cols, couplings, format!("grid_{}x{}", rows, cols))
    }

    /// Create the 7-qubit heavy-hex cell (IBM Lagos/Perth layout)
    pub fn heavy_hex_7() -> Self {
        let couplings = vec![(0, 1), (1, 2), (1, 3), (3, 5), (4, 5), (5, 6)];
        Self::named(7, couplings, "heavy_hex_7".to_string())
    }

    fn named(num_qubits: usize, couplings: Vec<Coupling>, name: String) -> Self {
        Self {
            num_qubits,
            couplings,
            name: Some(name),
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get native directed connections
    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    /// Get number of native directed connections
    pub fn num_couplings(&self) -> usize {
        self.couplings.len()
    }

    /// Get number of distinct physical links (direction ignored)
    pub fn num_links(&self) -> usize {
        self.couplings
            .iter()
            .map(|&(a, b)| ordered_pair(a, b))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Check if there are no connections at all
    pub fn is_empty(&self) -> bool {
        self.couplings.is_empty()
    }

    /// Get device name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set device name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    // ========================================================================
    // Connectivity Queries
    // ========================================================================

    /// Check if `(q1, q2)` is a native direction
    pub fn contains(&self, q1: QubitId, q2: QubitId) -> bool {
        self.couplings.contains(&(q1, q2))
    }

    /// Check if two qubits share a physical link in either direction
    /// Gantree: is_linked(q1, q2) -> bool // 연결 여부
    pub fn is_linked(&self, q1: QubitId, q2: QubitId) -> bool {
        self.contains(q1, q2) || self.contains(q2, q1)
    }

    /// Get neighbors of a qubit, direction ignored, sorted
    /// Gantree: neighbors(q) -> Vec<QubitId> // 이웃
    pub fn neighbors(&self, qubit: QubitId) -> Vec<QubitId> {
        let neighbors: BTreeSet<QubitId> = self
            .couplings
            .iter()
            .filter_map(|&(a, b)| {
                if a == qubit {
                    Some(b)
                } else if b == qubit {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        neighbors.into_iter().collect()
    }

    /// Check if every qubit is reachable from qubit 0
    pub fn is_fully_connected(&self) -> bool {
        if self.num_qubits <= 1 {
            return true;
        }

        let mut adj = vec![Vec::new(); self.num_qubits];
        for &(a, b) in &self.couplings {
            adj[a].push(b);
            adj[b].push(a);
        }

        let mut visited = vec![false; self.num_qubits];
        let mut queue = VecDeque::from([0]);
        visited[0] = true;
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for &next in &adj[current] {
                if !visited[next] {
                    visited[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == self.num_qubits
    }
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Connectivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Connectivity({} qubits, {} couplings{})",
            self.num_qubits,
            self.num_couplings(),
            self.name
                .as_ref()
                .map(|n| format!(", {}", n))
                .unwrap_or_default()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
