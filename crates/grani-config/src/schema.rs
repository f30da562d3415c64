//! Loose-document loading.
//!
//! Users hand over arbitrary JSON-shaped dictionaries; this module walks
//! them section by section so that a malformed entry is reported with the
//! path of the entry that produced it (`controllers.con1.fems.2`) instead
//! of a whole-document deserialization error.

use std::collections::BTreeMap;

use grani_caps::ServerCapabilities;
use grani_wire::Config;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::convert::{Converter, Mode};
use crate::document::{ConfigDoc, ControllerDoc, FemDoc};
use crate::error::{ConfigResult, SchemaError};

const KNOWN_SECTIONS: &[&str] = &[
    "version",
    "controllers",
    "transverters",
    "elements",
    "pulses",
    "waveforms",
    "digital_waveforms",
    "integration_weights",
    "mixers",
    "oscillators",
];

/// Parse a loose document and convert it into the wire payload for the
/// given server.
pub fn load_config(
    raw: &Value,
    caps: &ServerCapabilities,
    mode: Mode,
    transverter_already_configured: bool,
) -> ConfigResult<Config> {
    let doc = parse_document(raw)?;
    Converter::new(caps, mode, transverter_already_configured).convert(&doc)
}

/// Parse a loose document into the typed form without converting it.
pub fn parse_document(raw: &Value) -> ConfigResult<ConfigDoc> {
    let Some(object) = raw.as_object() else {
        return Err(SchemaError::new("", "the configuration must be a mapping").into());
    };
    for key in object.keys() {
        if !KNOWN_SECTIONS.contains(&key.as_str()) {
            return Err(SchemaError::new(key.clone(), "unknown configuration section").into());
        }
    }

    let doc = ConfigDoc {
        version: object.get("version").cloned(),
        controllers: parse_controllers(object.get("controllers"))?,
        transverters: parse_section(object.get("transverters"), "transverters")?,
        elements: parse_section(object.get("elements"), "elements")?,
        pulses: parse_section(object.get("pulses"), "pulses")?,
        waveforms: parse_section(object.get("waveforms"), "waveforms")?,
        digital_waveforms: parse_section(object.get("digital_waveforms"), "digital_waveforms")?,
        integration_weights: parse_section(
            object.get("integration_weights"),
            "integration_weights",
        )?,
        mixers: parse_section(object.get("mixers"), "mixers")?,
        oscillators: parse_section(object.get("oscillators"), "oscillators")?,
    };
    Ok(doc)
}

fn parse_section<T: DeserializeOwned>(
    value: Option<&Value>,
    section: &str,
) -> Result<Option<BTreeMap<String, T>>, SchemaError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let Some(object) = value.as_object() else {
        return Err(SchemaError::new(section, "expected a mapping of named entries"));
    };
    let mut parsed = BTreeMap::new();
    for (name, entry) in object {
        let entry: T = serde_json::from_value(entry.clone())
            .map_err(|e| SchemaError::new(format!("{section}.{name}"), e.to_string()))?;
        parsed.insert(name.clone(), entry);
    }
    Ok(Some(parsed))
}

/// Controllers get one extra level of path resolution: when a chassis
/// entry fails to parse, the offending FEM slot is singled out.
fn parse_controllers(
    value: Option<&Value>,
) -> Result<Option<BTreeMap<String, ControllerDoc>>, SchemaError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let Some(object) = value.as_object() else {
        return Err(SchemaError::new(
            "controllers",
            "expected a mapping of named entries",
        ));
    };
    let mut parsed = BTreeMap::new();
    for (name, entry) in object {
        let controller: ControllerDoc = serde_json::from_value(entry.clone())
            .map_err(|e| locate_controller_error(name, entry, e))?;
        parsed.insert(name.clone(), controller);
    }
    Ok(Some(parsed))
}

fn locate_controller_error(name: &str, entry: &Value, error: serde_json::Error) -> SchemaError {
    if let Some(fems) = entry.get("fems").and_then(Value::as_object) {
        for (slot, fem) in fems {
            if let Err(fem_error) = serde_json::from_value::<FemDoc>(fem.clone()) {
                return SchemaError::new(
                    format!("controllers.{name}.fems.{slot}"),
                    format!("invalid FEM declaration: {fem_error}"),
                );
            }
        }
    }
    SchemaError::new(format!("controllers.{name}"), error.to_string())
}
