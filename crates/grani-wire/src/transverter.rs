//! Transverter (RF up/down conversion module) wire declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ports::{AdcPortReference, DacPortReference};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loopbacks: Vec<TransverterLoopback>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rf_outputs: BTreeMap<u32, TransverterRfOutputConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rf_inputs: BTreeMap<u32, TransverterRfInputConfig>,
    #[serde(default)]
    pub if_outputs: TransverterIfOutputsConfig,
}

/// Routes a synthesizer output back into one of the module's LO inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterLoopback {
    #[serde(default)]
    pub lo_source_input: LoopbackInput,
    #[serde(default)]
    pub lo_source_generator: SynthesizerPort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesizerPort {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub device_name: String,
    #[serde(default)]
    pub port_name: SynthesizerOutputName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SynthesizerOutputName {
    #[default]
    Synth1,
    Synth2,
    Synth3,
    Synth4,
    Synth5,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoopbackInput {
    #[default]
    Dmd1Lo,
    Dmd2Lo,
    Lo1,
    Lo2,
    Lo3,
    Lo4,
    Lo5,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterRfOutputConfig {
    #[serde(default)]
    pub lo_frequency: f64,
    #[serde(default)]
    pub lo_source: LoSourceInput,
    #[serde(default)]
    pub output_mode: OutputSwitchState,
    #[serde(default)]
    pub gain: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub input_attenuators: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_connection: Option<DacPortReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_connection: Option<DacPortReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterRfInputConfig {
    #[serde(default)]
    pub rf_source: DownconverterRfSource,
    #[serde(default)]
    pub lo_frequency: f64,
    #[serde(default)]
    pub lo_source: LoSourceInput,
    #[serde(default)]
    pub if_mode_i: IfMode,
    #[serde(default)]
    pub if_mode_q: IfMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterIfOutputsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_out1: Option<TransverterSingleIfOutputConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_out2: Option<TransverterSingleIfOutputConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransverterSingleIfOutputConfig {
    #[serde(default)]
    pub port: AdcPortReference,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoSourceInput {
    #[default]
    Internal,
    External,
    Analyzer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSwitchState {
    #[default]
    AlwaysOn,
    AlwaysOff,
    Triggered,
    TriggeredReversed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IfMode {
    #[default]
    Direct,
    Mixer,
    Envelope,
    Off,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownconverterRfSource {
    #[default]
    RfIn,
    Loopback1,
    Loopback2,
    Loopback3,
    Loopback4,
    Loopback5,
}
