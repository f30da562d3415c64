//! Analog output filter wire shapes.
//!
//! Three generations of filter encodings share this message: the legacy
//! feedforward/feedback taps, the 3.3-era exponential IIR + high-pass
//! form, and the 3.5-era variant that adds an explicit DC-gain term. The
//! converter decides which slots are legal for the connected server; the
//! wire type carries them all.

use serde::{Deserialize, Serialize};

use crate::container::ValueContainer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogOutputPortFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feedforward: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feedback: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedforward_v2: Option<ValueContainer<Vec<f64>>>,
    #[serde(default)]
    pub iir: IirFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IirFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exponential: Vec<ExponentialParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponential_v2: Option<ValueContainer<Vec<ExponentialParameters>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_pass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_pass_v2: Option<ValueContainer<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponential_dc_gain: Option<ValueContainer<Option<f64>>>,
}

/// One exponential filter term: `amplitude * exp(-t / time_constant)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExponentialParameters {
    pub amplitude: f64,
    pub time_constant: f64,
}
