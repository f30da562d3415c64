//! Control device and FEM wire declarations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::container::ValueContainer;
use crate::filter::AnalogOutputPortFilter;

/// One control device: a chassis holding FEMs by slot index.
///
/// A standalone baseline controller is represented as a single-entry map at
/// the conventional slot 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fems: BTreeMap<u32, FemDec>,
}

/// The FEM variant slotted into a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FemDec {
    /// Baseline controller.
    Controller(ControllerDec),
    /// Extended analog-sampling (LF) FEM.
    Lf(LfFemDec),
    /// Microwave FEM.
    Mw(MwFemDec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerDec {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub controller_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_outputs: BTreeMap<u32, AnalogOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_inputs: BTreeMap<u32, AnalogInputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_outputs: BTreeMap<u32, DigitalOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_inputs: BTreeMap<u32, DigitalInputPortDec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LfFemDec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_outputs: BTreeMap<u32, LfAnalogOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_inputs: BTreeMap<u32, AnalogInputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_outputs: BTreeMap<u32, DigitalOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_inputs: BTreeMap<u32, DigitalInputPortDec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwFemDec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_outputs: BTreeMap<u32, MwAnalogOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analog_inputs: BTreeMap<u32, MwAnalogInputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_outputs: BTreeMap<u32, DigitalOutputPortDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_inputs: BTreeMap<u32, DigitalInputPortDec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogOutputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<AnalogOutputPortFilter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub crosstalk: BTreeMap<u32, f64>,
}

/// LF-FEM analog output: the baseline port fields plus the octo-DAC
/// sampling controls and an upsertable crosstalk slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LfAnalogOutputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<AnalogOutputPortFilter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub crosstalk: BTreeMap<u32, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crosstalk_v2: Option<ValueContainer<BTreeMap<u32, f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<LfSamplingRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsampling_mode: Option<LfUpsamplingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<LfOutputMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LfSamplingRate {
    #[serde(rename = "GSPS1")]
    Gsps1,
    #[serde(rename = "GSPS2")]
    Gsps2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LfUpsamplingMode {
    Unset,
    Mw,
    Pulse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LfOutputMode {
    Direct,
    Amplified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalogInputPortDec {
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
pub struct MwAnalogOutputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_scale_power_dbm: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub upconverters: BTreeMap<u32, UpconverterConfigDec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upconverters_v2: Option<ValueContainer<BTreeMap<u32, UpconverterConfigDec>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpconverterConfigDec {
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MwAnalogInputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain_db: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<u32>,
    #[serde(default)]
    pub downconverter: DownconverterConfigDec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownconverterConfigDec {
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalOutputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverted: Option<bool>,
    #[serde(default)]
    pub level: VoltageLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalInputPortDec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<DigitalInputPolarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadtime: Option<u32>,
    #[serde(default)]
    pub level: VoltageLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DigitalInputPolarity {
    Rising,
    Falling,
}

/// The only level the hardware accepts; kept on the wire for schema
/// compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoltageLevel {
    #[default]
    Lvttl,
}
