//! Top-level configuration payload.
//!
//! Two wire shapes exist. The v1 shape is flat: every entity collection
//! sits at the top level, and standalone controllers may additionally be
//! spelled through the legacy `controllers` map. The v2 shape splits the
//! payload into a controller section (physical topology) and a logical
//! section (elements and pulse-library entities), and is the only shape
//! that supports partial updates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::{ControllerDec, DeviceDec};
use crate::element::ElementDec;
use crate::logical::{
    DigitalWaveformDec, IntegrationWeightDec, Oscillator, PulseDec, WaveformDec,
};
use crate::mixer::MixerDec;
use crate::transverter::TransverterConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ConfigVersion>,
}

/// Config shape oneof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigVersion {
    V1(ConfigV1),
    V2(ConfigV2),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigV1 {
    /// Legacy spelling for standalone controllers. Mutually exclusive with
    /// `control_devices` in any payload the converter produces.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub controllers: BTreeMap<String, ControllerDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub control_devices: BTreeMap<String, DeviceDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transverters: BTreeMap<String, TransverterConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub elements: BTreeMap<String, ElementDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pulses: BTreeMap<String, PulseDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub waveforms: BTreeMap<String, WaveformDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_waveforms: BTreeMap<String, DigitalWaveformDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub integration_weights: BTreeMap<String, IntegrationWeightDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mixers: BTreeMap<String, MixerDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub oscillators: BTreeMap<String, Oscillator>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigV2 {
    #[serde(default)]
    pub controller_config: ControllerSection,
    #[serde(default)]
    pub logical_config: LogicalSection,
}

/// Physical topology half of the v2 shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerSection {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub control_devices: BTreeMap<String, DeviceDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mixers: BTreeMap<String, MixerDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transverters: BTreeMap<String, TransverterConfig>,
}

/// Element and pulse-library half of the v2 shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicalSection {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub elements: BTreeMap<String, ElementDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pulses: BTreeMap<String, PulseDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub waveforms: BTreeMap<String, WaveformDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digital_waveforms: BTreeMap<String, DigitalWaveformDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub integration_weights: BTreeMap<String, IntegrationWeightDec>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub oscillators: BTreeMap<String, Oscillator>,
}

impl Config {
    pub fn v1(body: ConfigV1) -> Self {
        Self {
            version: Some(ConfigVersion::V1(body)),
        }
    }

    pub fn v2(body: ConfigV2) -> Self {
        Self {
            version: Some(ConfigVersion::V2(body)),
        }
    }

    pub fn as_v1(&self) -> Option<&ConfigV1> {
        match &self.version {
            Some(ConfigVersion::V1(v1)) => Some(v1),
            _ => None,
        }
    }

    pub fn as_v2(&self) -> Option<&ConfigV2> {
        match &self.version {
            Some(ConfigVersion::V2(v2)) => Some(v2),
            _ => None,
        }
    }

    /// Devices map, regardless of shape. Does not include the legacy v1
    /// `controllers` map.
    pub fn control_devices(&self) -> Option<&BTreeMap<String, DeviceDec>> {
        match &self.version {
            Some(ConfigVersion::V1(v1)) => Some(&v1.control_devices),
            Some(ConfigVersion::V2(v2)) => Some(&v2.controller_config.control_devices),
            None => None,
        }
    }

    pub fn control_devices_mut(&mut self) -> Option<&mut BTreeMap<String, DeviceDec>> {
        match &mut self.version {
            Some(ConfigVersion::V1(v1)) => Some(&mut v1.control_devices),
            Some(ConfigVersion::V2(v2)) => Some(&mut v2.controller_config.control_devices),
            None => None,
        }
    }

    pub fn transverters(&self) -> Option<&BTreeMap<String, TransverterConfig>> {
        match &self.version {
            Some(ConfigVersion::V1(v1)) => Some(&v1.transverters),
            Some(ConfigVersion::V2(v2)) => Some(&v2.controller_config.transverters),
            None => None,
        }
    }

    pub fn elements(&self) -> Option<&BTreeMap<String, ElementDec>> {
        match &self.version {
            Some(ConfigVersion::V1(v1)) => Some(&v1.elements),
            Some(ConfigVersion::V2(v2)) => Some(&v2.logical_config.elements),
            None => None,
        }
    }

    pub fn elements_mut(&mut self) -> Option<&mut BTreeMap<String, ElementDec>> {
        match &mut self.version {
            Some(ConfigVersion::V1(v1)) => Some(&mut v1.elements),
            Some(ConfigVersion::V2(v2)) => Some(&mut v2.logical_config.elements),
            None => None,
        }
    }

    pub fn mixers(&self) -> Option<&BTreeMap<String, MixerDec>> {
        match &self.version {
            Some(ConfigVersion::V1(v1)) => Some(&v1.mixers),
            Some(ConfigVersion::V2(v2)) => Some(&v2.controller_config.mixers),
            None => None,
        }
    }

    pub fn mixers_mut(&mut self) -> Option<&mut BTreeMap<String, MixerDec>> {
        match &mut self.version {
            Some(ConfigVersion::V1(v1)) => Some(&mut v1.mixers),
            Some(ConfigVersion::V2(v2)) => Some(&mut v2.controller_config.mixers),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_follow_shape() {
        let mut cfg = Config::v1(ConfigV1::default());
        cfg.elements_mut()
            .unwrap()
            .insert("qubit".to_string(), ElementDec::default());
        assert_eq!(cfg.elements().unwrap().len(), 1);
        assert!(cfg.as_v1().is_some());
        assert!(cfg.as_v2().is_none());

        let cfg = Config::v2(ConfigV2::default());
        assert!(cfg.elements().unwrap().is_empty());
        assert!(cfg.as_v2().is_some());
    }

    #[test]
    fn test_empty_collections_not_serialized() {
        let cfg = Config::v1(ConfigV1::default());
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["version"]["v1"], serde_json::json!({}));
    }
}
