//! Top-level document conversion.
//!
//! Translates the whole user document into the wire payload (and back),
//! then runs the transverter wiring passes: elements that reference a
//! transverter channel get their analog inputs, LO frequency and readout
//! outputs derived from the module topology, and legacy-shape payloads get
//! implicit mixers synthesized for IQ elements that never named one.

use std::collections::BTreeMap;

use grani_wire::{
    Config, ConfigV1, ConfigV2, CorrectionEntry, ElementDec, ElementInput, ElementOutput, Matrix,
    MixInputs, MixerDec, MultipleOutputs, TransverterRfOutputConfig,
};

use crate::convert::context::{Cx, Mode};
use crate::convert::device::{device_to_doc, device_to_wire};
use crate::convert::element::{element_to_doc, element_to_wire};
use crate::convert::integration_weights::{integration_weight_to_doc, integration_weight_to_wire};
use crate::convert::mixer::{mixer_to_doc, mixer_to_wire};
use crate::convert::oscillator::{oscillator_to_doc, oscillator_to_wire};
use crate::convert::pulse::{digital_waveform_to_doc, digital_waveform_to_wire, pulse_to_doc, pulse_to_wire};
use crate::convert::transverter::{transverter_to_doc, transverter_to_wire};
use crate::convert::waveform::{waveform_to_doc, waveform_to_wire};
use crate::document::ConfigDoc;
use crate::error::{ConfigError, ConfigResult};

/// Translates documents for one server connection.
pub struct Converter<'a> {
    cx: Cx<'a>,
    transverter_already_configured: bool,
}

impl<'a> Converter<'a> {
    pub fn new(
        caps: &'a grani_caps::ServerCapabilities,
        mode: Mode,
        transverter_already_configured: bool,
    ) -> Self {
        Self {
            cx: Cx::new(caps, mode),
            transverter_already_configured,
        }
    }

    pub fn convert(&self, doc: &ConfigDoc) -> ConfigResult<Config> {
        self.validate_preconditions(doc)?;

        let mut body = ConfigV1::default();

        if let Some(controllers) = &doc.controllers {
            for (name, controller) in controllers {
                body.control_devices
                    .insert(name.clone(), device_to_wire(&self.cx, controller)?);
            }
        }
        if let Some(transverters) = &doc.transverters {
            for (name, transverter) in transverters {
                body.transverters
                    .insert(name.clone(), transverter_to_wire(transverter)?);
            }
        }
        if let Some(elements) = &doc.elements {
            for (name, element) in elements {
                body.elements
                    .insert(name.clone(), element_to_wire(&self.cx, name, element)?);
            }
        }
        if let Some(pulses) = &doc.pulses {
            for (name, pulse) in pulses {
                body.pulses.insert(name.clone(), pulse_to_wire(pulse)?);
            }
        }
        if let Some(waveforms) = &doc.waveforms {
            for (name, waveform) in waveforms {
                body.waveforms
                    .insert(name.clone(), waveform_to_wire(&self.cx, waveform)?);
            }
        }
        if let Some(digital_waveforms) = &doc.digital_waveforms {
            for (name, waveform) in digital_waveforms {
                body.digital_waveforms
                    .insert(name.clone(), digital_waveform_to_wire(waveform));
            }
        }
        if let Some(weights) = &doc.integration_weights {
            for (name, weight) in weights {
                body.integration_weights
                    .insert(name.clone(), integration_weight_to_wire(weight));
            }
        }
        if let Some(mixers) = &doc.mixers {
            for (name, corrections) in mixers {
                body.mixers
                    .insert(name.clone(), mixer_to_wire(&self.cx, corrections)?);
            }
        }
        if let Some(oscillators) = &doc.oscillators {
            for (name, oscillator) in oscillators {
                body.oscillators
                    .insert(name.clone(), oscillator_to_wire(&self.cx, oscillator));
            }
        }

        if self.cx.init_mode() && !body.transverters.is_empty() {
            self.wire_upconverted_inputs(&mut body)?;
            self.infer_lo_frequencies(&mut body)?;
            self.wire_downconverted_outputs(&mut body)?;
        }

        if self.cx.caps.supports_config_v2() {
            Ok(Config::v2(split_sections(body)))
        } else {
            // Structural inference is an init-time concern; an update must
            // not invent entries the gateway already holds.
            if self.cx.init_mode() {
                self.synthesize_implicit_mixers(&mut body);
            }
            collapse_baseline_devices(&mut body);
            Ok(Config::v1(body))
        }
    }

    fn validate_preconditions(&self, doc: &ConfigDoc) -> ConfigResult<()> {
        if doc.version.is_some() {
            tracing::warn!("the 'version' key is deprecated and ignored");
        }
        if !self.cx.init_mode() {
            if doc.transverters.is_some() {
                return Err(ConfigError::TransverterUnsupportedOnUpdate);
            }
            if self.transverter_already_configured && doc.has_logical_section() {
                return Err(ConfigError::LockedByTransverter);
            }
        }
        Ok(())
    }

    /// Elements whose RF input points at a transverter upconverter inherit
    /// the I/Q DAC wiring of that channel.
    fn wire_upconverted_inputs(&self, body: &mut ConfigV1) -> ConfigResult<()> {
        let transverters = body.transverters.clone();
        for element in body.elements.values_mut() {
            for rf_input in element.rf_inputs.values() {
                let Some(output) = transverter_rf_output(&transverters, rf_input) else {
                    continue;
                };
                if element.inputs.is_some() {
                    return Err(ConfigError::InputConnectionAmbiguity(
                        "Ambiguous definition of element input".to_string(),
                    ));
                }
                element.inputs = Some(ElementInput::MixInputs(MixInputs {
                    i: output.i_connection.clone().unwrap_or_default(),
                    q: output.q_connection.clone().unwrap_or_default(),
                    ..Default::default()
                }));
            }
        }
        Ok(())
    }

    /// IQ elements wired through a transverter take the channel's LO. An
    /// element that states its own conflicting LO is rejected.
    fn infer_lo_frequencies(&self, body: &mut ConfigV1) -> ConfigResult<()> {
        let transverters = body.transverters.clone();
        for element in body.elements.values_mut() {
            let Some(ElementInput::MixInputs(mix)) = &mut element.inputs else {
                continue;
            };
            let output = element
                .rf_inputs
                .values()
                .find_map(|rf_input| transverter_rf_output(&transverters, rf_input))
                .or_else(|| {
                    transverters.values().flat_map(|t| t.rf_outputs.values()).find(|output| {
                        output.i_connection.as_ref() == Some(&mix.i)
                            && output.q_connection.as_ref() == Some(&mix.q)
                    })
                });
            let Some(output) = output else { continue };

            let transverter_lo = output.lo_frequency;
            if mix.lo_frequency != 0 && mix.lo_frequency != transverter_lo as i64 {
                return Err(ConfigError::Validation(
                    "LO frequency mismatch. The frequency stated in the element is different \
                     from the one stated in the transverter, remove the one in the element."
                        .to_string(),
                ));
            }
            mix.lo_frequency = transverter_lo as i64;
            if self.cx.caps.supports_double_frequency() {
                mix.lo_frequency_double = transverter_lo;
            }
        }
        Ok(())
    }

    /// Elements whose RF output points at a transverter downconverter get
    /// the module's IF outputs merged into their readout outputs.
    fn wire_downconverted_outputs(&self, body: &mut ConfigV1) -> ConfigResult<()> {
        let transverters = body.transverters.clone();
        for element in body.elements.values_mut() {
            for rf_output in element.rf_outputs.values() {
                let downconverted = transverters
                    .get(&rf_output.device_name)
                    .is_some_and(|t| t.rf_inputs.contains_key(&rf_output.port));
                if !downconverted {
                    continue;
                }
                let transverter = &transverters[&rf_output.device_name];
                let if_ports = [
                    transverter.if_outputs.if_out1.as_ref(),
                    transverter.if_outputs.if_out2.as_ref(),
                ];
                for if_output in if_ports.into_iter().flatten() {
                    let name = if_output.name.clone();
                    let port = if_output.port.clone();
                    if let Some(existing) = element.outputs.get(&name) {
                        if *existing != port {
                            return Err(ConfigError::OutputConnectionAmbiguity(format!(
                                "Output {name} is connected to {existing:?} but the transverter \
                                 downconverter is connected to {port:?}"
                            )));
                        }
                    }
                    match &mut element.multiple_outputs {
                        Some(ElementOutput::MicrowaveOutput(_)) => {
                            return Err(ConfigError::Validation(
                                "Cannot connect transverter to microwave output".to_string(),
                            ));
                        }
                        Some(ElementOutput::MultipleOutputs(outputs)) => {
                            outputs.port_references.insert(name.clone(), port.clone());
                        }
                        None => {
                            element.multiple_outputs =
                                Some(ElementOutput::MultipleOutputs(MultipleOutputs {
                                    port_references: BTreeMap::from([(
                                        name.clone(),
                                        port.clone(),
                                    )]),
                                }));
                        }
                    }
                    element.outputs.insert(name, port);
                }
            }
        }
        Ok(())
    }

    /// Legacy servers require every IQ pair to name a mixer; elements that
    /// left it blank get a fresh identity-calibrated one.
    fn synthesize_implicit_mixers(&self, body: &mut ConfigV1) {
        for (name, element) in &mut body.elements {
            let Some(ElementInput::MixInputs(mix)) = &mut element.inputs else {
                continue;
            };
            if element.intermediate_frequency.is_none() || !mix.mixer.is_empty() {
                continue;
            }
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            mix.mixer = format!("{name}_mixer_{}", &suffix[..3]);
            body.mixers
                .entry(mix.mixer.clone())
                .or_insert_with(|| MixerDec {
                    correction: vec![CorrectionEntry {
                        frequency: element.intermediate_frequency.unwrap_or_default(),
                        frequency_negative: element.intermediate_frequency_negative,
                        frequency_double: element.intermediate_frequency_double.unwrap_or_default(),
                        lo_frequency: mix.lo_frequency,
                        lo_frequency_double: mix.lo_frequency_double,
                        correction: Some(Matrix::new(1.0, 0.0, 0.0, 1.0)),
                    }],
                });
        }
    }

    pub fn deconvert(&self, config: &Config) -> ConfigResult<ConfigDoc> {
        if config.transverters().is_some_and(|t| !t.is_empty()) {
            return Err(transverter_to_doc());
        }

        let mut doc = ConfigDoc::default();

        if let Some(devices) = config.control_devices() {
            if !devices.is_empty() {
                doc.controllers = Some(
                    devices
                        .iter()
                        .map(|(name, device)| (name.clone(), device_to_doc(&self.cx, device)))
                        .collect(),
                );
            }
        }
        // Payloads predating the device map spell standalone controllers
        // through the legacy map instead.
        if let Some(v1) = config.as_v1() {
            if doc.controllers.is_none() && !v1.controllers.is_empty() {
                doc.controllers = Some(
                    v1.controllers
                        .iter()
                        .map(|(name, controller)| {
                            (
                                name.clone(),
                                crate::convert::device::controller_to_doc(&self.cx, controller),
                            )
                        })
                        .collect(),
                );
            }
        }

        if let Some(elements) = config.elements() {
            if !elements.is_empty() {
                doc.elements = Some(
                    elements
                        .iter()
                        .map(|(name, element)| (name.clone(), element_to_doc(element)))
                        .collect(),
                );
            }
        }
        if let Some(mixers) = config.mixers() {
            if !mixers.is_empty() {
                doc.mixers = Some(
                    mixers
                        .iter()
                        .map(|(name, mixer)| (name.clone(), mixer_to_doc(mixer)))
                        .collect(),
                );
            }
        }

        let logical = match &config.version {
            Some(grani_wire::ConfigVersion::V1(v1)) => Some((
                &v1.pulses,
                &v1.waveforms,
                &v1.digital_waveforms,
                &v1.integration_weights,
                &v1.oscillators,
            )),
            Some(grani_wire::ConfigVersion::V2(v2)) => Some((
                &v2.logical_config.pulses,
                &v2.logical_config.waveforms,
                &v2.logical_config.digital_waveforms,
                &v2.logical_config.integration_weights,
                &v2.logical_config.oscillators,
            )),
            None => None,
        };
        if let Some((pulses, waveforms, digital_waveforms, weights, oscillators)) = logical {
            if !pulses.is_empty() {
                doc.pulses = Some(
                    pulses
                        .iter()
                        .map(|(name, pulse)| (name.clone(), pulse_to_doc(pulse)))
                        .collect(),
                );
            }
            if !waveforms.is_empty() {
                doc.waveforms = Some(
                    waveforms
                        .iter()
                        .map(|(name, waveform)| (name.clone(), waveform_to_doc(waveform)))
                        .collect(),
                );
            }
            if !digital_waveforms.is_empty() {
                doc.digital_waveforms = Some(
                    digital_waveforms
                        .iter()
                        .map(|(name, waveform)| (name.clone(), digital_waveform_to_doc(waveform)))
                        .collect(),
                );
            }
            if !weights.is_empty() {
                doc.integration_weights = Some(
                    weights
                        .iter()
                        .map(|(name, weight)| (name.clone(), integration_weight_to_doc(weight)))
                        .collect(),
                );
            }
            if !oscillators.is_empty() {
                doc.oscillators = Some(
                    oscillators
                        .iter()
                        .map(|(name, oscillator)| (name.clone(), oscillator_to_doc(oscillator)))
                        .collect(),
                );
            }
        }

        Ok(doc)
    }
}

fn transverter_rf_output<'t>(
    transverters: &'t BTreeMap<String, grani_wire::TransverterConfig>,
    rf_input: &grani_wire::GeneralPortReference,
) -> Option<&'t TransverterRfOutputConfig> {
    transverters
        .get(&rf_input.device_name)?
        .rf_outputs
        .get(&rf_input.port)
}

/// Moves the logical entities into the v2 logical section and the
/// physical ones into the controller section.
fn split_sections(body: ConfigV1) -> ConfigV2 {
    let mut v2 = ConfigV2::default();
    v2.controller_config.control_devices = body.control_devices;
    v2.controller_config.mixers = body.mixers;
    v2.controller_config.transverters = body.transverters;
    v2.logical_config.elements = body.elements;
    v2.logical_config.pulses = body.pulses;
    v2.logical_config.waveforms = body.waveforms;
    v2.logical_config.digital_waveforms = body.digital_waveforms;
    v2.logical_config.integration_weights = body.integration_weights;
    v2.logical_config.oscillators = body.oscillators;
    v2
}

/// When every device is a lone baseline controller, the v1 payload also
/// fills the legacy `controllers` map that older servers read.
fn collapse_baseline_devices(body: &mut ConfigV1) {
    let all_baseline = !body.control_devices.is_empty()
        && body.control_devices.values().all(|device| {
            device.fems.len() == 1
                && matches!(
                    device.fems.get(&grani_caps::BASELINE_FEM_IDX),
                    Some(grani_wire::FemDec::Controller(_))
                )
        });
    if !all_baseline {
        return;
    }
    body.controllers = body
        .control_devices
        .iter()
        .filter_map(|(name, device)| match device.fems.get(&grani_caps::BASELINE_FEM_IDX) {
            Some(grani_wire::FemDec::Controller(controller)) => {
                Some((name.clone(), controller.clone()))
            }
            _ => None,
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use grani_caps::{caps, ServerCapabilities};
    use grani_wire::DacPortReference;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> ConfigDoc {
        serde_json::from_value(value).unwrap()
    }

    fn gen2() -> ServerCapabilities {
        ServerCapabilities::from_capabilities(caps::gen2())
    }

    fn v2_caps() -> ServerCapabilities {
        let mut all = caps::gen2();
        all.push(caps::CONFIG_V2);
        ServerCapabilities::from_capabilities(all)
    }

    #[test]
    fn test_wrapper_shape_follows_capability() {
        let config_doc = doc(json!({
            "controllers": {"con1": {"analog_outputs": {"1": {}}}},
            "elements": {"qubit": {"singleInput": {"port": ["con1", 1]}}},
        }));

        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        assert!(config.as_v1().is_some());

        let caps = v2_caps();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let v2 = config.as_v2().unwrap();
        assert_eq!(v2.controller_config.control_devices.len(), 1);
        assert_eq!(v2.logical_config.elements.len(), 1);
    }

    #[test]
    fn test_v1_fills_legacy_controllers_map() {
        let config_doc = doc(json!({
            "controllers": {"con1": {"analog_outputs": {"1": {}}}},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let v1 = config.as_v1().unwrap();
        assert!(v1.controllers.contains_key("con1"));
        assert!(v1.control_devices.contains_key("con1"));
    }

    #[test]
    fn test_chassis_skips_legacy_controllers_map() {
        let config_doc = doc(json!({
            "controllers": {"con1": {"fems": {"2": {"type": "LF"}}}},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let v1 = config.as_v1().unwrap();
        assert!(v1.controllers.is_empty());
        assert!(v1.control_devices.contains_key("con1"));
    }

    #[test]
    fn test_transverters_rejected_on_update() {
        let config_doc = doc(json!({
            "transverters": {"trans1": {"RF_outputs": {"1": {"LO_frequency": 6e9}}}},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Update, false);
        let err = converter.convert(&config_doc).unwrap_err();
        assert!(matches!(err, ConfigError::TransverterUnsupportedOnUpdate));
    }

    #[test]
    fn test_logical_update_locked_after_transverter_init() {
        let config_doc = doc(json!({
            "elements": {"qubit": {"singleInput": {"port": ["con1", 1]}}},
        }));
        let caps = v2_caps();
        let converter = Converter::new(&caps, Mode::Update, true);
        let err = converter.convert(&config_doc).unwrap_err();
        assert!(matches!(err, ConfigError::LockedByTransverter));

        // Physical-only updates stay allowed.
        let physical = doc(json!({
            "controllers": {"con1": {"analog_outputs": {"1": {"offset": 0.1}}}},
        }));
        assert!(converter.convert(&physical).is_ok());
    }

    #[test]
    fn test_upconverter_auto_wiring_and_lo_inference() {
        let config_doc = doc(json!({
            "transverters": {"trans1": {
                "connectivity": "con1",
                "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0}},
            }},
            "elements": {"qubit": {
                "intermediate_frequency": 50e6,
                "RF_inputs": {"port": ["trans1", 1]},
            }},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let element = &config.elements().unwrap()["qubit"];
        match element.inputs.as_ref().unwrap() {
            ElementInput::MixInputs(mix) => {
                assert_eq!(mix.i, DacPortReference::new("con1", 1, 1));
                assert_eq!(mix.q, DacPortReference::new("con1", 1, 2));
                assert_eq!(mix.lo_frequency, 6_000_000_000);
                assert_eq!(mix.lo_frequency_double, 6e9);
                // Legacy shape gets an implicit identity mixer.
                assert!(mix.mixer.starts_with("qubit_mixer_"));
                assert!(config.mixers().unwrap().contains_key(&mix.mixer));
            }
            other => panic!("unexpected input oneof: {other:?}"),
        }
    }

    #[test]
    fn test_explicit_input_conflicts_with_transverter_wiring() {
        let config_doc = doc(json!({
            "transverters": {"trans1": {
                "connectivity": "con1",
                "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0}},
            }},
            "elements": {"qubit": {
                "singleInput": {"port": ["con1", 1]},
                "RF_inputs": {"port": ["trans1", 1]},
            }},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let err = converter.convert(&config_doc).unwrap_err();
        assert!(matches!(err, ConfigError::InputConnectionAmbiguity(_)));
    }

    #[test]
    fn test_lo_mismatch_is_rejected() {
        let config_doc = doc(json!({
            "transverters": {"trans1": {
                "connectivity": "con1",
                "RF_outputs": {"1": {"LO_frequency": 6e9, "gain": 0}},
            }},
            "elements": {"qubit": {
                "intermediate_frequency": 50e6,
                "mixInputs": {
                    "I": ["con1", 1],
                    "Q": ["con1", 2],
                    "lo_frequency": 5e9,
                },
            }},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let err = converter.convert(&config_doc).unwrap_err();
        assert!(err.to_string().contains("LO frequency mismatch"));
    }

    #[test]
    fn test_downconverter_auto_wires_readout_outputs() {
        let config_doc = doc(json!({
            "transverters": {"trans1": {
                "connectivity": "con1",
                "RF_inputs": {"1": {"LO_frequency": 6e9}},
            }},
            "elements": {"resonator": {
                "time_of_flight": 100,
                "outputs": {},
                "RF_outputs": {"port": ["trans1", 1]},
            }},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let element = &config.elements().unwrap()["resonator"];
        assert_eq!(
            element.outputs["out1"],
            grani_wire::AdcPortReference::new("con1", 1, 1)
        );
        assert_eq!(
            element.outputs["out2"],
            grani_wire::AdcPortReference::new("con1", 1, 2)
        );
    }

    #[test]
    fn test_implicit_mixer_not_synthesized_on_update() {
        let config_doc = doc(json!({
            "elements": {"qubit": {
                "intermediate_frequency": 50e6,
                "mixInputs": {"I": ["con1", 1], "Q": ["con1", 2], "lo_frequency": 6e9},
            }},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Update, false);
        let config = converter.convert(&config_doc).unwrap();
        assert!(config.mixers().unwrap().is_empty());
        match config.elements().unwrap()["qubit"].inputs.as_ref().unwrap() {
            ElementInput::MixInputs(mix) => assert!(mix.mixer.is_empty()),
            other => panic!("unexpected input oneof: {other:?}"),
        }

        // The same payload gets one on init.
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        assert_eq!(config.mixers().unwrap().len(), 1);
    }

    #[test]
    fn test_implicit_mixer_not_synthesized_under_v2() {
        let config_doc = doc(json!({
            "elements": {"qubit": {
                "intermediate_frequency": 50e6,
                "mixInputs": {"I": ["con1", 1], "Q": ["con1", 2], "lo_frequency": 6e9},
            }},
        }));
        let caps = v2_caps();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        assert!(config.mixers().unwrap().is_empty());
        match config.elements().unwrap()["qubit"].inputs.as_ref().unwrap() {
            ElementInput::MixInputs(mix) => assert!(mix.mixer.is_empty()),
            other => panic!("unexpected input oneof: {other:?}"),
        }
    }

    #[test]
    fn test_deconvert_rejects_transverters() {
        let mut body = ConfigV1::default();
        body.transverters
            .insert("trans1".to_string(), Default::default());
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let err = converter.deconvert(&Config::v1(body)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDeconversion(_)));
    }

    #[test]
    fn test_full_round_trip_without_transverters() {
        let config_doc = doc(json!({
            "controllers": {"con1": {
                "analog_outputs": {"1": {"offset": 0.1}},
                "analog_inputs": {"1": {"offset": 0.0}},
            }},
            "elements": {"qubit": {
                "intermediate_frequency": 50e6,
                "singleInput": {"port": ["con1", 1]},
            }},
            "pulses": {"pi": {"operation": "control", "length": 40,
                               "waveforms": {"single": "gauss"}}},
            "waveforms": {"gauss": {"type": "arbitrary", "samples": [0.1, 0.2]}},
            "integration_weights": {"w": {"cosine": [[1.0, 40]], "sine": [[0.0, 40]]}},
        }));
        let caps = gen2();
        let converter = Converter::new(&caps, Mode::Init, false);
        let config = converter.convert(&config_doc).unwrap();
        let round = converter.deconvert(&config).unwrap();

        assert_eq!(
            round.controllers.as_ref().unwrap()["con1"]
                .analog_outputs
                .as_ref()
                .unwrap()[&1]
                .offset,
            Some(0.1)
        );
        assert_eq!(
            round.elements.as_ref().unwrap()["qubit"].intermediate_frequency,
            Some(50e6)
        );
        assert_eq!(
            round.pulses.as_ref().unwrap()["pi"].operation.as_deref(),
            Some("control")
        );
        assert!(round.waveforms.is_some());
        assert!(round.integration_weights.is_some());
    }
}
