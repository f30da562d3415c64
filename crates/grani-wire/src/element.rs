//! Quantum element wire declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ports::{AdcPortReference, DacPortReference, GeneralPortReference, PortReference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub intermediate_frequency_negative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency_double: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency_oscillator: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency_oscillator_double: Option<f64>,
    /// Oscillator oneof: a named shared oscillator, or an explicit
    /// "no oscillator" marker. Absent means the element owns its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillator: Option<OscillatorChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_flight: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smearing: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<ElementThread>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_qe: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, AdcPortReference>,
    /// Input oneof: exactly one analog input kind may be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ElementInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_outputs: Option<ElementOutput>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_inputs: BTreeMap<String, DigitalInputPortReference>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_outputs: BTreeMap<String, DigitalOutputPortReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Sticky>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_offset: Option<HoldOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_pulse_parameters: Option<OutputPulseParameters>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rf_inputs: BTreeMap<String, GeneralPortReference>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rf_outputs: BTreeMap<String, GeneralPortReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OscillatorChoice {
    NamedOscillator(String),
    NoOscillator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementInput {
    SingleInput(SingleInput),
    MixInputs(MixInputs),
    SingleInputCollection(SingleInputCollection),
    MultipleInputs(MultipleInputs),
    MicrowaveInput(MicrowaveInputPortReference),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementOutput {
    MultipleOutputs(MultipleOutputs),
    MicrowaveOutput(MicrowaveOutputPortReference),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleInput {
    pub port: DacPortReference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixInputs {
    pub i: DacPortReference,
    pub q: DacPortReference,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mixer: String,
    /// Signed integer hertz; unlike intermediate frequencies the LO is not
    /// split into magnitude and sign.
    #[serde(default)]
    pub lo_frequency: i64,
    #[serde(default)]
    pub lo_frequency_double: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleInputCollection {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, DacPortReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleInputs {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, DacPortReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicrowaveInputPortReference {
    pub port: DacPortReference,
    #[serde(default)]
    pub upconverter: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MicrowaveOutputPortReference {
    pub port: AdcPortReference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultipleOutputs {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub port_references: BTreeMap<String, AdcPortReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputPortReference {
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub buffer: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalOutputPortReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortReference>,
}

/// Sticky mode: held analog/digital levels with a ramp-to-zero duration
/// in clock cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sticky {
    #[serde(default)]
    pub analog: bool,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub duration: u32,
}

/// Legacy hold-offset form, kept for servers that predate sticky mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldOffset {
    #[serde(default)]
    pub duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputPulseParameters {
    #[serde(default)]
    pub signal_threshold: i32,
    #[serde(default)]
    pub signal_polarity: Polarity,
    #[serde(default)]
    pub derivative_threshold: i32,
    #[serde(default)]
    pub derivative_polarity: Polarity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementThread {
    pub thread_name: String,
}
