//! Transverter module conversion.
//!
//! Users may wire each RF channel explicitly, or give the module-level
//! `connectivity` shorthand and let the conventional cabling be derived:
//! upconverter k drives DAC ports 2k-1 (I) and 2k (Q), and the two IF
//! outputs land on ADC ports 1 and 2.

use grani_caps::BASELINE_FEM_IDX;
use grani_wire::{
    AdcPortReference, DacPortReference, DownconverterRfSource, IfMode, LoSourceInput,
    LoopbackInput, OutputSwitchState, SynthesizerOutputName, SynthesizerPort, TransverterConfig,
    TransverterIfOutputsConfig, TransverterLoopback, TransverterRfInputConfig,
    TransverterRfOutputConfig, TransverterSingleIfOutputConfig,
};

use crate::document::{
    ConnectivityDoc, DocPortRef, SingleIfOutputDoc, TransverterDoc, TransverterRfInputDoc,
    TransverterRfOutputDoc,
};
use crate::error::{ConfigError, ConfigResult};

const MIN_LO_FREQUENCY: f64 = 2e9;
const MAX_LO_FREQUENCY: f64 = 18e9;

pub(crate) fn transverter_to_wire(doc: &TransverterDoc) -> ConfigResult<TransverterConfig> {
    let connectivity = doc.connectivity.as_ref().map(|c| match c {
        ConnectivityDoc::WithFem(controller, fem) => (controller.clone(), *fem),
        ConnectivityDoc::Name(controller) => (controller.clone(), BASELINE_FEM_IDX),
    });

    let mut config = TransverterConfig::default();

    if let Some(loopbacks) = &doc.loopbacks {
        for ((device, synth_port), lo_input) in loopbacks {
            config.loopbacks.push(TransverterLoopback {
                lo_source_input: parse_loopback_input(lo_input)?,
                lo_source_generator: SynthesizerPort {
                    device_name: device.clone(),
                    port_name: parse_synthesizer_output(synth_port)?,
                },
            });
        }
    }

    if let Some(rf_outputs) = &doc.rf_outputs {
        for (&idx, output) in rf_outputs {
            config
                .rf_outputs
                .insert(idx, rf_output_to_wire(idx, output, connectivity.as_ref())?);
        }
    }
    if let Some(rf_inputs) = &doc.rf_inputs {
        for (&idx, input) in rf_inputs {
            config.rf_inputs.insert(idx, rf_input_to_wire(idx, input)?);
        }
    }

    config.if_outputs = if_outputs_to_wire(doc, connectivity.as_ref())?;

    Ok(config)
}

fn rf_output_to_wire(
    idx: u32,
    doc: &TransverterRfOutputDoc,
    connectivity: Option<&(String, u32)>,
) -> ConfigResult<TransverterRfOutputConfig> {
    let lo_frequency = doc.lo_frequency.ok_or_else(|| {
        ConfigError::InvalidTransverterParameter(
            "No LO frequency was set for upconverter".to_string(),
        )
    })?;
    if !(MIN_LO_FREQUENCY..=MAX_LO_FREQUENCY).contains(&lo_frequency) {
        return Err(ConfigError::InvalidTransverterParameter(format!(
            "LO frequency {lo_frequency} is out of range"
        )));
    }

    let gain = doc.gain.ok_or_else(|| {
        ConfigError::InvalidTransverterParameter("No gain was set for upconverter".to_string())
    })?;
    // Gain is settable in steps of 0.5 dB between -20 and 20.
    if (gain * 2.0).fract() != 0.0 || !(-20.0..=20.0).contains(&gain) {
        return Err(ConfigError::InvalidTransverterParameter(format!(
            "Gain should be an integer or half-integer between -20 and 20, got {gain}"
        )));
    }

    let (i_connection, q_connection) = match connectivity {
        Some((controller, fem)) => {
            if doc.i_connection.is_some() || doc.q_connection.is_some() {
                return Err(ConfigError::TransverterConnectionAmbiguity);
            }
            (
                Some(DacPortReference::new(controller.clone(), *fem, 2 * idx - 1)),
                Some(DacPortReference::new(controller.clone(), *fem, 2 * idx)),
            )
        }
        None => (
            doc.i_connection.as_ref().map(dac_ref),
            doc.q_connection.as_ref().map(dac_ref),
        ),
    };

    Ok(TransverterRfOutputConfig {
        lo_frequency,
        lo_source: parse_lo_source(doc.lo_source.as_deref().unwrap_or("internal"))?,
        output_mode: parse_output_mode(doc.output_mode.as_deref().unwrap_or("always_off"))?,
        gain,
        input_attenuators: parse_input_attenuators(
            doc.input_attenuators.as_deref().unwrap_or("OFF"),
        )?,
        i_connection,
        q_connection,
    })
}

fn rf_input_to_wire(idx: u32, doc: &TransverterRfInputDoc) -> ConfigResult<TransverterRfInputConfig> {
    let rf_source = parse_rf_source(doc.rf_source.as_deref().unwrap_or("RF_in"))?;
    // The first downconverter is hard-wired to the RF input connector; the
    // second has no internal LO of its own.
    if idx == 1 && rf_source != DownconverterRfSource::RfIn {
        return Err(ConfigError::InvalidTransverterParameter(
            "Downconverter 1 must be connected to RF-in".to_string(),
        ));
    }
    let default_lo_source = if idx == 1 { "internal" } else { "external" };
    let lo_source = parse_lo_source(doc.lo_source.as_deref().unwrap_or(default_lo_source))?;
    if idx == 2 && lo_source == LoSourceInput::Internal {
        return Err(ConfigError::InvalidTransverterParameter(
            "Downconverter 2 does not have internal LO".to_string(),
        ));
    }

    let lo_frequency = doc.lo_frequency.ok_or_else(|| {
        ConfigError::InvalidTransverterParameter(
            "No LO frequency was set for downconverter".to_string(),
        )
    })?;
    if !(MIN_LO_FREQUENCY..=MAX_LO_FREQUENCY).contains(&lo_frequency) {
        return Err(ConfigError::InvalidTransverterParameter(format!(
            "LO frequency {lo_frequency} is out of range"
        )));
    }

    Ok(TransverterRfInputConfig {
        rf_source,
        lo_frequency,
        lo_source,
        if_mode_i: parse_if_mode(doc.if_mode_i.as_deref().unwrap_or("direct"))?,
        if_mode_q: parse_if_mode(doc.if_mode_q.as_deref().unwrap_or("direct"))?,
    })
}

fn if_outputs_to_wire(
    doc: &TransverterDoc,
    connectivity: Option<&(String, u32)>,
) -> ConfigResult<TransverterIfOutputsConfig> {
    let docs = doc.if_outputs.clone().unwrap_or_default();
    Ok(TransverterIfOutputsConfig {
        if_out1: single_if_output(docs.if_out1.as_ref(), connectivity, 1, "out1")?,
        if_out2: single_if_output(docs.if_out2.as_ref(), connectivity, 2, "out2")?,
    })
}

fn single_if_output(
    doc: Option<&SingleIfOutputDoc>,
    connectivity: Option<&(String, u32)>,
    default_port: u32,
    default_name: &str,
) -> ConfigResult<Option<TransverterSingleIfOutputConfig>> {
    let port = match (connectivity, doc.and_then(|d| d.port.as_ref())) {
        (Some(_), Some(_)) => return Err(ConfigError::TransverterConnectionAmbiguity),
        (Some((controller, fem)), None) => {
            AdcPortReference::new(controller.clone(), *fem, default_port)
        }
        (None, Some(port)) => adc_ref(port),
        (None, None) => return Ok(None),
    };
    Ok(Some(TransverterSingleIfOutputConfig {
        port,
        name: doc
            .and_then(|d| d.name.clone())
            .unwrap_or_else(|| default_name.to_string()),
    }))
}

fn parse_loopback_input(value: &str) -> ConfigResult<LoopbackInput> {
    Ok(match value.to_uppercase().as_str() {
        "DMD1LO" => LoopbackInput::Dmd1Lo,
        "DMD2LO" => LoopbackInput::Dmd2Lo,
        "LO1" => LoopbackInput::Lo1,
        "LO2" => LoopbackInput::Lo2,
        "LO3" => LoopbackInput::Lo3,
        "LO4" => LoopbackInput::Lo4,
        "LO5" => LoopbackInput::Lo5,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid loopback input: {other}"
            )))
        }
    })
}

fn parse_synthesizer_output(value: &str) -> ConfigResult<SynthesizerOutputName> {
    Ok(match value.to_uppercase().as_str() {
        "SYNTH1" => SynthesizerOutputName::Synth1,
        "SYNTH2" => SynthesizerOutputName::Synth2,
        "SYNTH3" => SynthesizerOutputName::Synth3,
        "SYNTH4" => SynthesizerOutputName::Synth4,
        "SYNTH5" => SynthesizerOutputName::Synth5,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid synthesizer output: {other}"
            )))
        }
    })
}

fn parse_lo_source(value: &str) -> ConfigResult<LoSourceInput> {
    Ok(match value.to_lowercase().as_str() {
        "internal" => LoSourceInput::Internal,
        "external" => LoSourceInput::External,
        "analyzer" => LoSourceInput::Analyzer,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid LO source: {other}"
            )))
        }
    })
}

fn parse_output_mode(value: &str) -> ConfigResult<OutputSwitchState> {
    Ok(match value.to_lowercase().as_str() {
        "always_on" => OutputSwitchState::AlwaysOn,
        "always_off" => OutputSwitchState::AlwaysOff,
        "triggered" => OutputSwitchState::Triggered,
        "triggered_reversed" => OutputSwitchState::TriggeredReversed,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid output mode: {other}"
            )))
        }
    })
}

fn parse_input_attenuators(value: &str) -> ConfigResult<bool> {
    match value.to_uppercase().as_str() {
        "ON" => Ok(true),
        "OFF" => Ok(false),
        other => Err(ConfigError::InvalidTransverterParameter(format!(
            "Invalid input attenuators state: {other}, use 'ON' or 'OFF'"
        ))),
    }
}

fn parse_rf_source(value: &str) -> ConfigResult<DownconverterRfSource> {
    Ok(match value.to_lowercase().as_str() {
        "rf_in" => DownconverterRfSource::RfIn,
        "loopback_1" => DownconverterRfSource::Loopback1,
        "loopback_2" => DownconverterRfSource::Loopback2,
        "loopback_3" => DownconverterRfSource::Loopback3,
        "loopback_4" => DownconverterRfSource::Loopback4,
        "loopback_5" => DownconverterRfSource::Loopback5,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid RF source: {other}"
            )))
        }
    })
}

fn parse_if_mode(value: &str) -> ConfigResult<IfMode> {
    Ok(match value.to_lowercase().as_str() {
        "direct" => IfMode::Direct,
        "mixer" => IfMode::Mixer,
        "envelope" => IfMode::Envelope,
        "off" => IfMode::Off,
        other => {
            return Err(ConfigError::InvalidTransverterParameter(format!(
                "Invalid IF mode: {other}"
            )))
        }
    })
}

fn dac_ref(port: &DocPortRef) -> DacPortReference {
    let (controller, fem, number) = port.with_fem();
    DacPortReference::new(controller, fem, number)
}

fn adc_ref(port: &DocPortRef) -> AdcPortReference {
    let (controller, fem, number) = port.with_fem();
    AdcPortReference::new(controller, fem, number)
}

/// The gateway never reports transverter state in a shape this layer can
/// translate back, so deconversion is a permanent error.
pub(crate) fn transverter_to_doc() -> ConfigError {
    ConfigError::UnsupportedDeconversion("the transverter configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transverter(value: serde_json::Value) -> TransverterDoc {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_connectivity_shorthand_wires_conventional_ports() {
        let doc = transverter(json!({
            "connectivity": "con1",
            "RF_outputs": {"2": {"LO_frequency": 6e9, "gain": 0}},
            "IF_outputs": {"IF_out1": {"name": "readout"}},
        }));
        let config = transverter_to_wire(&doc).unwrap();
        let output = &config.rf_outputs[&2];
        assert_eq!(
            output.i_connection,
            Some(DacPortReference::new("con1", 1, 3))
        );
        assert_eq!(
            output.q_connection,
            Some(DacPortReference::new("con1", 1, 4))
        );
        let if_out = config.if_outputs.if_out1.as_ref().unwrap();
        assert_eq!(if_out.port, AdcPortReference::new("con1", 1, 1));
        assert_eq!(if_out.name, "readout");
    }

    #[test]
    fn test_connectivity_with_fem_slot() {
        let doc = transverter(json!({
            "connectivity": ["con1", 3],
            "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0}},
        }));
        let config = transverter_to_wire(&doc).unwrap();
        let output = &config.rf_outputs[&1];
        assert_eq!(output.i_connection, Some(DacPortReference::new("con1", 3, 1)));
        assert_eq!(output.q_connection, Some(DacPortReference::new("con1", 3, 2)));
    }

    #[test]
    fn test_connectivity_and_explicit_ports_conflict() {
        let doc = transverter(json!({
            "connectivity": "con1",
            "RF_outputs": {"1": {
                "LO_frequency": 6e9,
                "gain": 0,
                "I_connection": ["con1", 1],
            }},
        }));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(matches!(err, ConfigError::TransverterConnectionAmbiguity));
    }

    #[test]
    fn test_gain_is_required_on_every_upconverter() {
        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 6e9}},
        }));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(err.to_string().contains("No gain was set for upconverter"));
    }

    #[test]
    fn test_gain_must_be_half_integer_in_range() {
        for gain in [20.5, -20.5, 3.25] {
            let doc = transverter(json!({
                "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": gain}},
            }));
            assert!(transverter_to_wire(&doc).is_err(), "gain {gain} accepted");
        }
        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": -10.5}},
        }));
        assert_eq!(transverter_to_wire(&doc).unwrap().rf_outputs[&1].gain, -10.5);
    }

    #[test]
    fn test_lo_frequency_range() {
        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 1e9}},
        }));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let doc = transverter(json!({"RF_outputs": {"1": {}}}));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(err.to_string().contains("No LO frequency was set"));
    }

    #[test]
    fn test_downconverter_wiring_rules() {
        let doc = transverter(json!({
            "RF_inputs": {"1": {"LO_frequency": 6e9, "RF_source": "loopback_1"}},
        }));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(err.to_string().contains("Downconverter 1 must be connected to RF-in"));

        let doc = transverter(json!({
            "RF_inputs": {"2": {"LO_frequency": 6e9, "LO_source": "internal"}},
        }));
        let err = transverter_to_wire(&doc).unwrap_err();
        assert!(err.to_string().contains("Downconverter 2 does not have internal LO"));

        // Defaults: downconverter 1 internal, downconverter 2 external.
        let doc = transverter(json!({
            "RF_inputs": {
                "1": {"LO_frequency": 6e9},
                "2": {"LO_frequency": 6e9},
            },
        }));
        let config = transverter_to_wire(&doc).unwrap();
        assert_eq!(config.rf_inputs[&1].lo_source, LoSourceInput::Internal);
        assert_eq!(config.rf_inputs[&2].lo_source, LoSourceInput::External);
    }

    #[test]
    fn test_loopback_parsing_is_case_insensitive() {
        let doc = transverter(json!({
            "loopbacks": [[["synth_dev", "synth2"], "lo1"]],
        }));
        let config = transverter_to_wire(&doc).unwrap();
        assert_eq!(config.loopbacks[0].lo_source_input, LoopbackInput::Lo1);
        assert_eq!(
            config.loopbacks[0].lo_source_generator.port_name,
            SynthesizerOutputName::Synth2
        );
    }

    #[test]
    fn test_input_attenuators_parse() {
        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0, "input_attenuators": "on"}},
        }));
        assert!(transverter_to_wire(&doc).unwrap().rf_outputs[&1].input_attenuators);

        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0, "input_attenuators": "maybe"}},
        }));
        assert!(transverter_to_wire(&doc).is_err());
    }

    #[test]
    fn test_output_mode_default_is_always_off() {
        let doc = transverter(json!({
            "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0}},
        }));
        let config = transverter_to_wire(&doc).unwrap();
        assert_eq!(
            config.rf_outputs[&1].output_mode,
            OutputSwitchState::AlwaysOff
        );
    }

    #[test]
    fn test_if_output_defaults_without_connectivity() {
        let doc = transverter(json!({
            "IF_outputs": {"IF_out2": {"port": ["con2", 1]}},
        }));
        let config = transverter_to_wire(&doc).unwrap();
        assert!(config.if_outputs.if_out1.is_none());
        let out2 = config.if_outputs.if_out2.unwrap();
        assert_eq!(out2.port, AdcPortReference::new("con2", 1, 1));
        assert_eq!(out2.name, "out2");
    }
}
