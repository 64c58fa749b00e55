//! Calibration records
//!
//! Gantree: L2_Calibration → Records
//!
//! Normalized shape of backend calibration data: per-qubit parameter lists
//! and per-gate entries carrying either direct fields or named parameters.
//! Lookups never fail; a missing, negative, or non-finite value reads as
//! absent, and so does an error rate above 1.

use smartlayout_core::{field_names, Coupling, QubitId};
use serde::{Deserialize, Serialize};

/// Named calibration value
/// Gantree: Parameter // 이름-값 쌍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, e.g. `readout_error`
    pub name: String,

    /// Measured value
    pub value: f64,

    /// Unit as reported by the backend, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Parameter {
    /// Create a unitless parameter
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            unit: None,
        }
    }

    /// Attach a unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Accept a value only if it is a usable measurement
#[inline]
pub(crate) fn measured(value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        log::debug!("ignoring unusable calibration value {}", value);
        None
    }
}

/// Accept a value only if it is a usable error probability in `[0, 1]`
#[inline]
pub(crate) fn measured_rate(value: f64) -> Option<f64> {
    match measured(value) {
        Some(rate) if rate <= 1.0 => Some(rate),
        Some(_) => {
            log::debug!("ignoring error rate {} outside [0, 1]", value);
            None
        }
        None => None,
    }
}

/// First usable parameter (in record order) whose name is listed
fn first_match(
    parameters: &[Parameter],
    names: &[&str],
    accept: fn(f64) -> Option<f64>,
) -> Option<f64> {
    parameters
        .iter()
        .filter(|p| names.contains(&p.name.as_str()))
        .find_map(|p| accept(p.value))
}

// ============================================================================
// Node Records
// ============================================================================

/// Per-qubit calibration entry
/// Gantree: NodeRecord // 큐비트 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Physical qubit
    pub qubit: QubitId,

    /// Reported parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl NodeRecord {
    /// Create an empty record
    pub fn new(qubit: QubitId) -> Self {
        Self {
            qubit,
            parameters: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    /// Single-qubit gate error (`gate_error` or `single_qubit_error`)
    pub fn single_qubit_error(&self) -> Option<f64> {
        first_match(&self.parameters, &field_names::SINGLE_QUBIT_ERROR, measured_rate)
    }

    /// Readout error (`readout_error` or `prob_meas1_prep0`)
    pub fn readout_error(&self) -> Option<f64> {
        first_match(&self.parameters, &field_names::READOUT_ERROR, measured_rate)
    }

    /// Coherence time in seconds (`T1`)
    pub fn coherence_time(&self) -> Option<f64> {
        first_match(&self.parameters, &field_names::COHERENCE_TIME, measured)
    }
}

// ============================================================================
// Gate Records
// ============================================================================

/// Per-gate calibration entry
/// Gantree: GateRecord // 게이트 레코드
///
/// Only entries acting on exactly two qubits describe a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Gate name, e.g. `cx` or `ecr`
    pub gate: String,

    /// Qubits the gate acts on, control first
    pub qubits: Vec<QubitId>,

    /// Direct error field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,

    /// Direct duration field (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Reported parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl GateRecord {
    /// Create a gate record without any calibration values
    pub fn new(gate: impl Into<String>, qubits: Vec<QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits,
            error: None,
            duration: None,
            parameters: Vec::new(),
        }
    }

    /// Create a two-qubit gate record, control first
    pub fn two_qubit(gate: impl Into<String>, control: QubitId, target: QubitId) -> Self {
        Self::new(gate, vec![control, target])
    }

    /// Set the direct error field
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the direct duration field
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    /// Directed connection, if this is a two-qubit gate
    pub fn coupling(&self) -> Option<Coupling> {
        match self.qubits.as_slice() {
            &[control, target] => Some((control, target)),
            _ => None,
        }
    }

    /// Gate error: direct field first, then `gate_error` parameter
    pub fn gate_error(&self) -> Option<f64> {
        self.error
            .and_then(measured_rate)
            .or_else(|| first_match(&self.parameters, &field_names::GATE_ERROR, measured_rate))
    }

    /// Gate duration: direct field first, then `gate_length` parameter
    pub fn gate_length(&self) -> Option<f64> {
        self.duration
            .and_then(measured)
            .or_else(|| first_match(&self.parameters, &field_names::GATE_LENGTH, measured))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_field_aliases() {
        let record = NodeRecord::new(0)
            .with_parameter("single_qubit_error", 2e-4)
            .with_parameter("prob_meas1_prep0", 0.03)
            .with_parameter("T1", 80e-6);

        assert_eq!(record.single_qubit_error(), Some(2e-4));
        assert_eq!(record.readout_error(), Some(0.03));
        assert_eq!(record.coherence_time(), Some(80e-6));
    }

    #[test]
    fn test_node_first_match_wins() {
        let record = NodeRecord::new(0)
            .with_parameter("readout_error", 0.01)
            .with_parameter("prob_meas1_prep0", 0.05)
            .with_parameter("readout_error", 0.09);

        assert_eq!(record.readout_error(), Some(0.01));
    }

    #[test]
    fn test_unusable_values_are_skipped() {
        let record = NodeRecord::new(0)
            .with_parameter("gate_error", f64::NAN)
            .with_parameter("gate_error", -1.0)
            .with_parameter("single_qubit_error", 3e-4);

        assert_eq!(record.single_qubit_error(), Some(3e-4));
        assert_eq!(record.coherence_time(), None);
    }

    #[test]
    fn test_error_rates_above_one_are_skipped() {
        let record = NodeRecord::new(0)
            .with_parameter("gate_error", 1e308)
            .with_parameter("single_qubit_error", 2e-4)
            .with_parameter("readout_error", 1.5)
            .with_parameter("T1", 2.0);

        assert_eq!(record.single_qubit_error(), Some(2e-4));
        assert_eq!(record.readout_error(), None);
        // Times are not probabilities
        assert_eq!(record.coherence_time(), Some(2.0));

        let gate = GateRecord::two_qubit("cx", 0, 1)
            .with_error(1e308)
            .with_parameter("gate_error", 0.02);
        assert_eq!(gate.gate_error(), Some(0.02));

        let gate = GateRecord::two_qubit("cx", 0, 1).with_error(1.0);
        assert_eq!(gate.gate_error(), Some(1.0));
    }

    #[test]
    fn test_gate_direct_fields_take_precedence() {
        let gate = GateRecord::two_qubit("cx", 0, 1)
            .with_error(0.01)
            .with_parameter("gate_error", 0.5)
            .with_parameter("gate_length", 300e-9);

        assert_eq!(gate.coupling(), Some((0, 1)));
        assert_eq!(gate.gate_error(), Some(0.01));
        assert_eq!(gate.gate_length(), Some(300e-9));
    }

    #[test]
    fn test_parameter_unit_is_informational() {
        let param = Parameter::new("T1", 75.0).with_unit("us");
        let record = NodeRecord {
            qubit: 0,
            parameters: vec![param],
        };

        assert_eq!(record.parameters[0].unit.as_deref(), Some("us"));
        assert_eq!(record.coherence_time(), Some(75.0));
    }

    #[test]
    fn test_single_qubit_gate_has_no_coupling() {
        let gate = GateRecord::new("sx", vec![3]).with_error(1e-4);
        assert_eq!(gate.coupling(), None);
    }

    #[test]
    fn test_gate_record_json() {
        let json = r#"{"gate":"cx","qubits":[2,1],"parameters":[{"name":"gate_error","value":0.02}]}"#;
        let gate: GateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(gate.coupling(), Some((2, 1)));
        assert_eq!(gate.gate_error(), Some(0.02));
        assert_eq!(gate.gate_length(), None);
    }
}
