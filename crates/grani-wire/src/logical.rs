//! Pulse, waveform, digital waveform, integration weight and oscillator
//! wire declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<PulseOperation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_marker: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub integration_weights: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub waveforms: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PulseOperation {
    Control,
    Measurement,
}

/// Waveform oneof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformDec {
    Constant(ConstantWaveformDec),
    Arbitrary(ArbitraryWaveformDec),
    Array(WaveformArrayDec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantWaveformDec {
    pub sample: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryWaveformDec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_overridable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_allowed_error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
}

/// Indexed family of sample vectors, selectable at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformArrayDec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples_array: Vec<WaveformSamples>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformSamples {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalWaveformDec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<DigitalWaveformSample>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalWaveformSample {
    pub value: bool,
    pub length: u32,
}

/// Run-length compressed integration weights. `value` is quantized to
/// 2^-15 steps; `length` is in nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationWeightDec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cosine: Vec<IntegrationWeightSample>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sine: Vec<IntegrationWeightSample>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationWeightSample {
    pub value: f64,
    pub length: u32,
}

/// Shared oscillator declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency_double: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixer: Option<MixerRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixerRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mixer: String,
    #[serde(default)]
    pub lo_frequency: i64,
    #[serde(default)]
    pub lo_frequency_double: f64,
}
