//! Composite edge weights
//!
//! Gantree: L3_Scoring → WeightModel
//!
//! Turns unit-heterogeneous calibration numbers into one scalar cost per
//! directed connection:
//!
//! ```text
//! w(u,v) = err(u,v)                          // native, or stats.uncalibrated_error()
//!        + alpha · (e1q(u) + e1q(v))
//!        + beta  · (ro(u) + ro(v))
//!        + gamma
//!        + delta · dur(u,v) / max(T1_mean, ε)
//! ```
//!
//! Unset coefficients are auto-scaled from [`CalibrationStats`] and the
//! target patch size; explicit ones are kept as given.

use smartlayout_calibration::{CalibrationStats, CouplingCalibration, QubitCalibration};
use smartlayout_core::{params, LayoutError, LayoutResult, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// WeightParams
// ============================================================================

/// Weighting coefficients, any of which may be left to auto-scaling
/// Gantree: WeightParams // 가중치 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightParams {
    /// Single-qubit error coefficient
    pub alpha: Option<f64>,

    /// Readout error coefficient
    pub beta: Option<f64>,

    /// Fixed per-edge proximity penalty
    pub gamma: Option<f64>,

    /// Decoherence coefficient
    pub delta: Option<f64>,

    /// Penalty for driving a connection against its native direction
    pub direction_penalty: Option<f64>,

    /// Weight of the external Manhattan distance cost
    pub distance_weight: Option<f64>,
}

impl WeightParams {
    /// All coefficients auto-scaled
    pub fn auto() -> Self {
        Self::default()
    }

    /// Set alpha
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Set beta
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Set gamma
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Set delta
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Set direction penalty
    pub fn with_direction_penalty(mut self, penalty: f64) -> Self {
        self.direction_penalty = Some(penalty);
        self
    }

    /// Set distance weight
    pub fn with_distance_weight(mut self, weight: f64) -> Self {
        self.distance_weight = Some(weight);
        self
    }

    /// Validate explicit coefficients: finite and non-negative
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> LayoutResult<()> {
        let fields = [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("delta", self.delta),
            ("direction_penalty", self.direction_penalty),
            ("distance_weight", self.distance_weight),
        ];

        for (name, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(LayoutError::InvalidParameter(format!(
                        "{} must be finite and >= 0, got {}",
                        name, v
                    )));
                }
            }
        }

        Ok(())
    }

    /// Fill unset coefficients from statistics and patch size
    /// Gantree: auto_scale(&self, stats, k) -> ResolvedWeights // 자동 스케일
    ///
    /// - `alpha = mean_2q_error / max(mean_1q_error, ε)`
    /// - `beta = alpha / 2`
    /// - `gamma = mean_2q_error / max(k, 1)`
    /// - `delta = 0.01`
    pub fn auto_scale(&self, stats: &CalibrationStats, k: usize) -> ResolvedWeights {
        let mean_2q = stats.mean_2q_error;
        let alpha = self
            .alpha
            .unwrap_or_else(|| mean_2q / stats.mean_1q_error.max(params::EPSILON));
        let beta = self.beta.unwrap_or(alpha / 2.0);
        let gamma = self.gamma.unwrap_or(mean_2q / k.max(1) as f64);

        ResolvedWeights {
            alpha,
            beta,
            gamma,
            delta: self.delta.unwrap_or(params::DEFAULT_DELTA),
            direction_penalty: self
                .direction_penalty
                .unwrap_or(params::DEFAULT_DIRECTION_PENALTY),
            distance_weight: self
                .distance_weight
                .unwrap_or(params::DEFAULT_DISTANCE_WEIGHT),
        }
    }
}

impl fmt::Display for WeightParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "auto".to_string(), |x| format!("{}", x));
        write!(
            f,
            "WeightParams(α={}, β={}, γ={}, δ={}, dir={}, dist={})",
            show(self.alpha),
            show(self.beta),
            show(self.gamma),
            show(self.delta),
            show(self.direction_penalty),
            show(self.distance_weight)
        )
    }
}

// ============================================================================
// ResolvedWeights
// ============================================================================

/// Effective coefficients after auto-scaling, frozen for one build
/// Gantree: ResolvedWeights // 확정 가중치
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedWeights {
    /// Single-qubit error coefficient
    pub alpha: f64,
    /// Readout error coefficient
    pub beta: f64,
    /// Proximity penalty
    pub gamma: f64,
    /// Decoherence coefficient
    pub delta: f64,
    /// Non-native direction penalty
    pub direction_penalty: f64,
    /// Distance cost weight
    pub distance_weight: f64,
}

impl ResolvedWeights {
    /// Convert back to explicit parameters (reproduces this exact weighting)
    pub fn to_params(&self) -> WeightParams {
        WeightParams {
            alpha: Some(self.alpha),
            beta: Some(self.beta),
            gamma: Some(self.gamma),
            delta: Some(self.delta),
            direction_penalty: Some(self.direction_penalty),
            distance_weight: Some(self.distance_weight),
        }
    }
}

impl fmt::Display for ResolvedWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weights(α={:.4}, β={:.4}, γ={:.2e}, δ={:.3}, dir={:.3})",
            self.alpha, self.beta, self.gamma, self.delta, self.direction_penalty
        )
    }
}

// ============================================================================
// WeightModel
// ============================================================================

/// Pure edge-weight function over frozen coefficients and statistics
/// Gantree: WeightModel // 가중치 모델
#[derive(Debug, Clone)]
pub struct WeightModel {
    weights: ResolvedWeights,
    stats: CalibrationStats,
}

impl WeightModel {
    /// Validate parameters and auto-scale them for patch size `k`
    pub fn new(params: &WeightParams, stats: CalibrationStats, k: usize) -> LayoutResult<Self> {
        params.validate()?;
        let weights = params.auto_scale(&stats, k);
        Ok(Self { weights, stats })
    }

    /// Effective coefficients
    pub fn weights(&self) -> &ResolvedWeights {
        &self.weights
    }

    /// Statistics the model was scaled with
    pub fn stats(&self) -> &CalibrationStats {
        &self.stats
    }

    /// Weight of the directed connection `u -> v`
    /// Gantree: edge_weight(cal, u, v) -> Weight // 간선 가중치
    pub fn edge_weight(
        &self,
        coupling: CouplingCalibration,
        u: QubitCalibration,
        v: QubitCalibration,
    ) -> Weight {
        let w = &self.weights;
        let base = coupling
            .error
            .unwrap_or_else(|| self.stats.uncalibrated_error());
        let duration = coupling.duration.unwrap_or(self.stats.mean_2q_duration);
        let decoherence =
            w.delta * duration / self.stats.mean_coherence_time.max(params::EPSILON);

        base + w.alpha * (u.single_qubit_error + v.single_qubit_error)
            + w.beta * (u.readout_error + v.readout_error)
            + w.gamma
            + decoherence
    }

    /// Weight of a direction synthesized from its native reverse
    pub fn reverse_weight(&self, forward: Weight) -> Weight {
        forward + self.weights.direction_penalty
    }
}

// ============================================================================
// Tests
// ============================================================================
