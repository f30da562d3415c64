//! Physical port references.

use serde::{Deserialize, Serialize};

/// Reference to a DAC (analog output) port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DacPortReference {
    pub controller: String,
    pub fem: u32,
    pub number: u32,
}

impl DacPortReference {
    pub fn new(controller: impl Into<String>, fem: u32, number: u32) -> Self {
        Self {
            controller: controller.into(),
            fem,
            number,
        }
    }
}

/// Reference to an ADC (analog input) port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcPortReference {
    pub controller: String,
    pub fem: u32,
    pub number: u32,
}

impl AdcPortReference {
    pub fn new(controller: impl Into<String>, fem: u32, number: u32) -> Self {
        Self {
            controller: controller.into(),
            fem,
            number,
        }
    }
}

/// Reference to a digital port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortReference {
    pub controller: String,
    pub fem: u32,
    pub number: u32,
}

impl PortReference {
    pub fn new(controller: impl Into<String>, fem: u32, number: u32) -> Self {
        Self {
            controller: controller.into(),
            fem,
            number,
        }
    }
}

/// Reference to a port on an external device, addressed by device name.
/// Used for element RF connections to a transverter module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralPortReference {
    pub device_name: String,
    pub port: u32,
}
