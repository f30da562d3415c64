//! The user-facing configuration document.
//!
//! A typed but sparse mirror of the dictionary users write: every field is
//! optional and field names preserve the documented keys (including the
//! historical camelCase ones such as `singleInput` and `digitalInputs`).
//! Presence of a key is meaningful in update mode, so nothing here applies
//! defaults; that is the converter's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Port reference as written by users: `(controller, port)` for a
/// standalone controller or `(controller, fem, port)` for a chassis slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocPortRef {
    Full(String, u32, u32),
    Short(String, u32),
}

impl DocPortRef {
    /// Expands the short form with the conventional baseline FEM slot.
    pub fn with_fem(&self) -> (String, u32, u32) {
        match self {
            DocPortRef::Full(controller, fem, number) => (controller.clone(), *fem, *number),
            DocPortRef::Short(controller, number) => {
                (controller.clone(), grani_caps::BASELINE_FEM_IDX, *number)
            }
        }
    }
}

/// Distinguishes "key absent" from "key explicitly null" during
/// deserialization. Used with `#[serde(default, deserialize_with = ...)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ── top level ──

/// The whole document: physical topology plus the logical (element and
/// pulse-library) sections. On update, only the present sections are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDoc {
    /// Deprecated; ignored apart from a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controllers: Option<BTreeMap<String, ControllerDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transverters: Option<BTreeMap<String, TransverterDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<BTreeMap<String, ElementDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulses: Option<BTreeMap<String, PulseDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveforms: Option<BTreeMap<String, WaveformDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_waveforms: Option<BTreeMap<String, DigitalWaveformDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_weights: Option<BTreeMap<String, IntegrationWeightDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixers: Option<BTreeMap<String, Vec<MixerCorrectionDoc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillators: Option<BTreeMap<String, OscillatorDoc>>,
}

impl ConfigDoc {
    /// True when any logical-section key is present, regardless of content.
    pub fn has_logical_section(&self) -> bool {
        self.elements.is_some()
            || self.pulses.is_some()
            || self.waveforms.is_some()
            || self.digital_waveforms.is_some()
            || self.integration_weights.is_some()
            || self.oscillators.is_some()
    }
}

// ── controllers ──

/// A control device: either a standalone baseline controller (flat port
/// maps) or a chassis (`fems`). The two spellings are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerDoc {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub controller_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fems: Option<BTreeMap<u32, FemDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_outputs: Option<BTreeMap<u32, AnalogOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_inputs: Option<BTreeMap<u32, AnalogInputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_outputs: Option<BTreeMap<u32, DigitalOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_inputs: Option<BTreeMap<u32, DigitalInputDoc>>,
}

/// One FEM slot. Selected by the `type` key: `"MW"` is the microwave
/// variant, anything else (including an absent key) is the LF variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FemDoc {
    Lf(LfFemDoc),
    Mw(MwFemDoc),
}

impl<'de> Deserialize<'de> for FemDoc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_mw = value.get("type").and_then(serde_json::Value::as_str) == Some("MW");
        if is_mw {
            serde_json::from_value(value)
                .map(FemDoc::Mw)
                .map_err(serde::de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(FemDoc::Lf)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LfFemDoc {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub fem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_outputs: Option<BTreeMap<u32, LfAnalogOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_inputs: Option<BTreeMap<u32, AnalogInputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_outputs: Option<BTreeMap<u32, DigitalOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_inputs: Option<BTreeMap<u32, DigitalInputDoc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwFemDoc {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub fem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_outputs: Option<BTreeMap<u32, MwAnalogOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog_inputs: Option<BTreeMap<u32, MwAnalogInputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_outputs: Option<BTreeMap<u32, DigitalOutputDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_inputs: Option<BTreeMap<u32, DigitalInputDoc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogOutputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosstalk: Option<BTreeMap<u32, f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LfAnalogOutputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosstalk: Option<BTreeMap<u32, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsampling_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwAnalogOutputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_scale_power_dbm: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    /// Single-upconverter shorthand; exclusive with `upconverters`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upconverter_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upconverters: Option<BTreeMap<u32, UpconverterDoc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpconverterDoc {
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwAnalogInputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_db: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downconverter_frequency: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogInputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_db: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalOutputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadtime: Option<u32>,
}

/// Analog output filter. Which keys are legal depends on the server
/// generation; the converter enforces the split. `high_pass` and
/// `exponential_dc_gain` distinguish explicit null from absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedforward: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Vec<f64>>,
    /// `(amplitude, time_constant)` pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponential: Option<Vec<(f64, f64)>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub high_pass: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub exponential_dc_gain: Option<Option<f64>>,
}

// ── elements ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_flight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smearing: Option<i64>,
    /// Deprecated alias of `core`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<BTreeMap<String, DocPortRef>>,
    #[serde(
        rename = "digitalInputs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub digital_inputs: Option<BTreeMap<String, DigitalInputRefDoc>>,
    #[serde(
        rename = "digitalOutputs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub digital_outputs: Option<BTreeMap<String, DocPortRef>>,
    #[serde(
        rename = "singleInput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub single_input: Option<SingleInputDoc>,
    #[serde(rename = "mixInputs", default, skip_serializing_if = "Option::is_none")]
    pub mix_inputs: Option<MixInputsDoc>,
    #[serde(
        rename = "singleInputCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub single_input_collection: Option<InputCollectionDoc>,
    #[serde(
        rename = "multipleInputs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub multiple_inputs: Option<InputCollectionDoc>,
    #[serde(rename = "MWInput", default, skip_serializing_if = "Option::is_none")]
    pub mw_input: Option<MwInputDoc>,
    #[serde(rename = "MWOutput", default, skip_serializing_if = "Option::is_none")]
    pub mw_output: Option<MwOutputDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<StickyDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_offset: Option<HoldOffsetDoc>,
    /// Deprecated alias of `timeTaggingParameters`.
    #[serde(
        rename = "outputPulseParameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_pulse_parameters: Option<TimeTaggingDoc>,
    #[serde(
        rename = "timeTaggingParameters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_tagging_parameters: Option<TimeTaggingDoc>,
    #[serde(rename = "RF_inputs", default, skip_serializing_if = "Option::is_none")]
    pub rf_inputs: Option<BTreeMap<String, (String, u32)>>,
    #[serde(rename = "RF_outputs", default, skip_serializing_if = "Option::is_none")]
    pub rf_outputs: Option<BTreeMap<String, (String, u32)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_qe: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputRefDoc {
    pub delay: i64,
    pub buffer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<DocPortRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleInputDoc {
    pub port: DocPortRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixInputsDoc {
    #[serde(rename = "I")]
    pub i: DocPortRef,
    #[serde(rename = "Q")]
    pub q: DocPortRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo_frequency: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputCollectionDoc {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, DocPortRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwInputDoc {
    pub port: DocPortRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upconverter: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwOutputDoc {
    pub port: DocPortRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StickyDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analog: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldOffsetDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTaggingDoc {
    #[serde(rename = "signalThreshold")]
    pub signal_threshold: i32,
    #[serde(rename = "signalPolarity")]
    pub signal_polarity: String,
    #[serde(rename = "derivativeThreshold")]
    pub derivative_threshold: i32,
    #[serde(rename = "derivativePolarity")]
    pub derivative_polarity: String,
}

// ── pulses, waveforms, weights ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_marker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_weights: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveforms: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WaveformDoc {
    Constant(ConstantWaveformDoc),
    Arbitrary(ArbitraryWaveformDoc),
    Array(WaveformArrayDoc),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantWaveformDoc {
    pub sample: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryWaveformDoc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_overridable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_allowed_error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformArrayDoc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples_array: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalWaveformDoc {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<(i64, u32)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationWeightDoc {
    pub cosine: IwComponentDoc,
    pub sine: IwComponentDoc,
}

/// One integration-weight component: explicit `(value, duration)` pairs,
/// or the flat per-4ns-sample shorthand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IwComponentDoc {
    Pairs(Vec<(f64, f64)>),
    Flat(Vec<f64>),
}

impl Default for IwComponentDoc {
    fn default() -> Self {
        IwComponentDoc::Pairs(Vec::new())
    }
}

// ── mixers, oscillators ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixerCorrectionDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<(f64, f64, f64, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OscillatorDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo_frequency: Option<f64>,
}

// ── transverters ──

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterDoc {
    /// Shorthand wiring: the whole module is cabled to one controller (or
    /// one chassis FEM). Exclusive with any explicit I/Q or IF port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<ConnectivityDoc>,
    /// `((synth_device, synth_port), loopback_input)` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loopbacks: Option<Vec<((String, String), String)>>,
    #[serde(rename = "RF_outputs", default, skip_serializing_if = "Option::is_none")]
    pub rf_outputs: Option<BTreeMap<u32, TransverterRfOutputDoc>>,
    #[serde(rename = "RF_inputs", default, skip_serializing_if = "Option::is_none")]
    pub rf_inputs: Option<BTreeMap<u32, TransverterRfInputDoc>>,
    #[serde(rename = "IF_outputs", default, skip_serializing_if = "Option::is_none")]
    pub if_outputs: Option<IfOutputsDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectivityDoc {
    WithFem(String, u32),
    Name(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterRfOutputDoc {
    #[serde(
        rename = "LO_frequency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lo_frequency: Option<f64>,
    #[serde(rename = "LO_source", default, skip_serializing_if = "Option::is_none")]
    pub lo_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    /// `"ON"` or `"OFF"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_attenuators: Option<String>,
    #[serde(
        rename = "I_connection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub i_connection: Option<DocPortRef>,
    #[serde(
        rename = "Q_connection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub q_connection: Option<DocPortRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterRfInputDoc {
    #[serde(rename = "RF_source", default, skip_serializing_if = "Option::is_none")]
    pub rf_source: Option<String>,
    #[serde(
        rename = "LO_frequency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lo_frequency: Option<f64>,
    #[serde(rename = "LO_source", default, skip_serializing_if = "Option::is_none")]
    pub lo_source: Option<String>,
    #[serde(rename = "IF_mode_I", default, skip_serializing_if = "Option::is_none")]
    pub if_mode_i: Option<String>,
    #[serde(rename = "IF_mode_Q", default, skip_serializing_if = "Option::is_none")]
    pub if_mode_q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IfOutputsDoc {
    #[serde(rename = "IF_out1", default, skip_serializing_if = "Option::is_none")]
    pub if_out1: Option<SingleIfOutputDoc>,
    #[serde(rename = "IF_out2", default, skip_serializing_if = "Option::is_none")]
    pub if_out2: Option<SingleIfOutputDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleIfOutputDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<DocPortRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_port_ref_shapes() {
        let short: DocPortRef = serde_json::from_value(json!(["con1", 3])).unwrap();
        assert_eq!(short.with_fem(), ("con1".to_string(), 1, 3));
        let full: DocPortRef = serde_json::from_value(json!(["con1", 2, 3])).unwrap();
        assert_eq!(full.with_fem(), ("con1".to_string(), 2, 3));
    }

    #[test]
    fn test_fem_doc_dispatch_on_type() {
        let mw: FemDoc =
            serde_json::from_value(json!({"type": "MW", "analog_outputs": {}})).unwrap();
        assert!(matches!(mw, FemDoc::Mw(_)));
        let lf: FemDoc = serde_json::from_value(json!({"type": "LF"})).unwrap();
        assert!(matches!(lf, FemDoc::Lf(_)));
        let untyped: FemDoc = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(untyped, FemDoc::Lf(_)));
    }

    #[test]
    fn test_high_pass_null_vs_absent() {
        let with_null: FilterDoc = serde_json::from_value(json!({"high_pass": null})).unwrap();
        assert_eq!(with_null.high_pass, Some(None));
        let absent: FilterDoc = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.high_pass, None);
    }

    #[test]
    fn test_iw_component_shapes() {
        let pairs: IwComponentDoc = serde_json::from_value(json!([[0.5, 32]])).unwrap();
        assert!(matches!(pairs, IwComponentDoc::Pairs(_)));
        let flat: IwComponentDoc = serde_json::from_value(json!([0.5, 0.5, 0.25])).unwrap();
        assert!(matches!(flat, IwComponentDoc::Flat(_)));
    }

    #[test]
    fn test_waveform_tag() {
        let wf: WaveformDoc =
            serde_json::from_value(json!({"type": "constant", "sample": 0.2})).unwrap();
        assert!(matches!(wf, WaveformDoc::Constant(_)));
    }
}
