//! Element conversion.
//!
//! Elements carry the densest validation surface of the whole document:
//! frequency and oscillator exclusivity, the five-way analog input oneof,
//! output/readout consistency and the sticky/hold-offset capability split.

use grani_wire::{
    AdcPortReference, DacPortReference, DigitalInputPortReference, DigitalOutputPortReference,
    ElementDec, ElementInput, ElementOutput, ElementThread, GeneralPortReference, HoldOffset,
    MicrowaveInputPortReference, MicrowaveOutputPortReference, MixInputs, MultipleInputs,
    MultipleOutputs, OscillatorChoice, OutputPulseParameters, Polarity, PortReference,
    SingleInput, SingleInputCollection, Sticky,
};

use crate::convert::context::Cx;
use crate::document::{DocPortRef, ElementDoc, TimeTaggingDoc};
use crate::error::{ConfigError, ConfigResult};

pub(crate) fn element_to_wire(
    cx: &Cx<'_>,
    name: &str,
    doc: &ElementDoc,
) -> ConfigResult<ElementDec> {
    validate_element(doc)?;

    let mut element = ElementDec::default();

    set_frequency(cx, doc, &mut element);

    if let Some(tof) = doc.time_of_flight {
        element.time_of_flight = Some(tof as i32);
    }
    if let Some(smearing) = doc.smearing {
        element.smearing = Some(smearing as i32);
    } else if doc.outputs.as_ref().is_some_and(|o| !o.is_empty()) {
        element.smearing = Some(0);
    }

    if doc.thread.is_some() {
        tracing::warn!("'thread' is deprecated. Use 'core' instead");
    }
    if let Some(core) = doc.core.clone().or_else(|| doc.thread.clone()) {
        element.thread = Some(ElementThread { thread_name: core });
    }

    element.measurement_qe = doc.measurement_qe.clone();

    if let Some(operations) = &doc.operations {
        element.operations = operations.clone();
    }

    if let Some(outputs) = &doc.outputs {
        element.outputs = outputs
            .iter()
            .map(|(k, port)| (k.clone(), adc_ref(port)))
            .collect();
        if !element.outputs.is_empty() {
            element.multiple_outputs = Some(ElementOutput::MultipleOutputs(MultipleOutputs {
                port_references: element.outputs.clone(),
            }));
        }
    }

    set_inputs(cx, doc, &mut element);

    if let Some(mw_output) = &doc.mw_output {
        element.multiple_outputs = Some(ElementOutput::MicrowaveOutput(
            MicrowaveOutputPortReference {
                port: adc_ref(&mw_output.port),
            },
        ));
    }

    set_oscillator(doc, &mut element);

    if let Some(digital_inputs) = &doc.digital_inputs {
        for (k, input) in digital_inputs {
            element.digital_inputs.insert(
                k.clone(),
                DigitalInputPortReference {
                    delay: input.delay as u32,
                    buffer: input.buffer as u32,
                    port: input.port.as_ref().map(digital_ref),
                },
            );
        }
    }
    if let Some(digital_outputs) = &doc.digital_outputs {
        for (k, port) in digital_outputs {
            element.digital_outputs.insert(
                k.clone(),
                DigitalOutputPortReference {
                    port: Some(digital_ref(port)),
                },
            );
        }
    }

    set_hold_offset(cx, name, doc, &mut element)?;

    if doc.output_pulse_parameters.is_some() {
        tracing::warn!(
            "'outputPulseParameters' is deprecated. Use 'timeTaggingParameters' instead"
        );
    }
    if let Some(params) = doc
        .time_tagging_parameters
        .as_ref()
        .or(doc.output_pulse_parameters.as_ref())
    {
        element.output_pulse_parameters = Some(time_tagging_to_wire(params)?);
    }

    if let Some(rf_inputs) = &doc.rf_inputs {
        for (k, (device_name, port)) in rf_inputs {
            element.rf_inputs.insert(
                k.clone(),
                GeneralPortReference {
                    device_name: device_name.clone(),
                    port: *port,
                },
            );
        }
    }
    if let Some(rf_outputs) = &doc.rf_outputs {
        for (k, (device_name, port)) in rf_outputs {
            element.rf_outputs.insert(
                k.clone(),
                GeneralPortReference {
                    device_name: device_name.clone(),
                    port: *port,
                },
            );
        }
    }

    Ok(element)
}

fn validate_element(doc: &ElementDoc) -> ConfigResult<()> {
    if doc.intermediate_frequency.is_some() && doc.oscillator.is_some() {
        return Err(ConfigError::Validation(
            "'intermediate_frequency' and 'oscillator' cannot be defined together".to_string(),
        ));
    }

    let has_outputs = doc.outputs.as_ref().is_some_and(|o| !o.is_empty())
        || doc.rf_outputs.as_ref().is_some_and(|o| !o.is_empty())
        || doc.mw_output.is_some();
    let has_readout_params = doc.time_of_flight.is_some() || doc.smearing.is_some();
    if has_readout_params && !has_outputs {
        if doc.outputs.is_some() {
            // An empty-but-present outputs map historically slipped through.
            tracing::warn!(
                "time_of_flight or smearing are defined alongside an empty 'outputs' map; \
                 this is going to cause ValidationError in the future"
            );
        } else {
            return Err(ConfigError::Validation(
                "time_of_flight and smearing are relevant only for elements with outputs"
                    .to_string(),
            ));
        }
    }
    if has_outputs && doc.time_of_flight.is_none() {
        return Err(ConfigError::Validation(
            "time_of_flight must be defined for elements with outputs".to_string(),
        ));
    }

    let inputs_given = [
        doc.single_input.is_some(),
        doc.mix_inputs.is_some(),
        doc.single_input_collection.is_some(),
        doc.multiple_inputs.is_some(),
        doc.mw_input.is_some(),
    ]
    .iter()
    .filter(|given| **given)
    .count();
    if inputs_given > 1 {
        return Err(ConfigError::Validation(
            "only one of 'singleInput', 'mixInputs', 'singleInputCollection', \
             'multipleInputs' and 'MWInput' may be defined for an element"
                .to_string(),
        ));
    }

    Ok(())
}

fn set_frequency(cx: &Cx<'_>, doc: &ElementDoc, element: &mut ElementDec) {
    let Some(frequency) = doc.intermediate_frequency else {
        return;
    };
    element.intermediate_frequency = Some(frequency.abs() as u64);
    element.intermediate_frequency_negative = frequency < 0.0;
    element.intermediate_frequency_oscillator = Some(frequency as i64);
    if cx.caps.supports_double_frequency() {
        element.intermediate_frequency_double = Some(frequency.abs());
        element.intermediate_frequency_oscillator_double = Some(frequency);
    }
}

fn set_inputs(cx: &Cx<'_>, doc: &ElementDoc, element: &mut ElementDec) {
    if let Some(single) = &doc.single_input {
        element.inputs = Some(ElementInput::SingleInput(SingleInput {
            port: dac_ref(&single.port),
        }));
    } else if let Some(mix) = &doc.mix_inputs {
        let lo_frequency = mix.lo_frequency.unwrap_or(0.0);
        element.inputs = Some(ElementInput::MixInputs(MixInputs {
            i: dac_ref(&mix.i),
            q: dac_ref(&mix.q),
            mixer: mix.mixer.clone().unwrap_or_default(),
            lo_frequency: lo_frequency as i64,
            lo_frequency_double: if cx.caps.supports_double_frequency() {
                lo_frequency
            } else {
                0.0
            },
        }));
    } else if let Some(collection) = &doc.single_input_collection {
        element.inputs = Some(ElementInput::SingleInputCollection(SingleInputCollection {
            inputs: collection
                .inputs
                .iter()
                .map(|(k, port)| (k.clone(), dac_ref(port)))
                .collect(),
        }));
    } else if let Some(multiple) = &doc.multiple_inputs {
        element.inputs = Some(ElementInput::MultipleInputs(MultipleInputs {
            inputs: multiple
                .inputs
                .iter()
                .map(|(k, port)| (k.clone(), dac_ref(port)))
                .collect(),
        }));
    } else if let Some(mw) = &doc.mw_input {
        element.inputs = Some(ElementInput::MicrowaveInput(MicrowaveInputPortReference {
            port: dac_ref(&mw.port),
            upconverter: mw.upconverter.unwrap_or(1),
        }));
    }
}

fn set_oscillator(doc: &ElementDoc, element: &mut ElementDec) {
    if let Some(oscillator) = &doc.oscillator {
        element.oscillator = Some(OscillatorChoice::NamedOscillator(oscillator.clone()));
    } else if doc.intermediate_frequency.is_none() {
        element.oscillator = Some(OscillatorChoice::NoOscillator);
    }
}

fn set_hold_offset(
    cx: &Cx<'_>,
    name: &str,
    doc: &ElementDoc,
    element: &mut ElementDec,
) -> ConfigResult<()> {
    if let Some(sticky) = &doc.sticky {
        let duration = sticky.duration.unwrap_or(4);
        if duration % 4 != 0 {
            return Err(ConfigError::Validation(format!(
                "Sticky's element duration must be a dividable by 4. Element: '{name}'"
            )));
        }
        if cx.caps.supports_sticky_elements() {
            element.sticky = Some(Sticky {
                analog: sticky.analog.unwrap_or(true),
                digital: sticky.digital.unwrap_or(false),
                duration: (duration / 4) as u32,
            });
        } else {
            if sticky.digital == Some(true) {
                return Err(ConfigError::Validation(format!(
                    "Server does not support digital sticky used in element '{name}'"
                )));
            }
            element.hold_offset = Some(HoldOffset {
                duration: (duration / 4) as u32,
            });
        }
    } else if let Some(hold_offset) = &doc.hold_offset {
        if cx.caps.supports_sticky_elements() {
            element.sticky = Some(Sticky {
                analog: true,
                digital: false,
                duration: hold_offset.duration.unwrap_or(1),
            });
        } else {
            element.hold_offset = Some(HoldOffset {
                duration: hold_offset.duration.unwrap_or_default(),
            });
        }
    }
    Ok(())
}

fn parse_polarity(value: &str) -> ConfigResult<Polarity> {
    match value.to_uppercase().as_str() {
        "ABOVE" => Ok(Polarity::Ascending),
        "ASCENDING" => {
            tracing::warn!("'ASCENDING' polarity is deprecated. Use 'ABOVE' instead");
            Ok(Polarity::Ascending)
        }
        "BELOW" => Ok(Polarity::Descending),
        "DESCENDING" => {
            tracing::warn!("'DESCENDING' polarity is deprecated. Use 'BELOW' instead");
            Ok(Polarity::Descending)
        }
        other => Err(ConfigError::Validation(format!(
            "Invalid signal polarity: {other}"
        ))),
    }
}

fn time_tagging_to_wire(doc: &TimeTaggingDoc) -> ConfigResult<OutputPulseParameters> {
    Ok(OutputPulseParameters {
        signal_threshold: doc.signal_threshold,
        signal_polarity: parse_polarity(&doc.signal_polarity)?,
        derivative_threshold: doc.derivative_threshold,
        derivative_polarity: parse_polarity(&doc.derivative_polarity)?,
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

fn digital_ref(port: &DocPortRef) -> PortReference {
    let (controller, fem, number) = port.with_fem();
    PortReference::new(controller, fem, number)
}

// ── deconversion ──

pub(crate) fn element_to_doc(wire: &ElementDec) -> ElementDoc {
    let mut doc = ElementDoc::default();

    if let Some(magnitude) = wire.intermediate_frequency {
        let sign = if wire.intermediate_frequency_negative {
            -1.0
        } else {
            1.0
        };
        doc.intermediate_frequency = Some(match wire.intermediate_frequency_double {
            Some(double) if double != 0.0 => sign * double,
            _ => sign * magnitude as f64,
        });
    }

    if let Some(OscillatorChoice::NamedOscillator(name)) = &wire.oscillator {
        doc.oscillator = Some(name.clone());
    }

    doc.time_of_flight = wire.time_of_flight.map(i64::from);
    doc.smearing = wire.smearing.map(i64::from);
    doc.core = wire.thread.as_ref().map(|t| t.thread_name.clone());
    doc.measurement_qe = wire.measurement_qe.clone();

    if !wire.operations.is_empty() {
        doc.operations = Some(wire.operations.clone());
    }
    if !wire.outputs.is_empty() {
        doc.outputs = Some(
            wire.outputs
                .iter()
                .map(|(k, port)| (k.clone(), adc_doc_ref(port)))
                .collect(),
        );
    }

    match &wire.inputs {
        Some(ElementInput::SingleInput(single)) => {
            doc.single_input = Some(crate::document::SingleInputDoc {
                port: dac_doc_ref(&single.port),
            });
        }
        Some(ElementInput::MixInputs(mix)) => {
            let lo = match mix.lo_frequency_double {
                d if d != 0.0 => d,
                _ => mix.lo_frequency as f64,
            };
            doc.mix_inputs = Some(crate::document::MixInputsDoc {
                i: dac_doc_ref(&mix.i),
                q: dac_doc_ref(&mix.q),
                mixer: (!mix.mixer.is_empty()).then(|| mix.mixer.clone()),
                lo_frequency: Some(lo),
            });
        }
        Some(ElementInput::SingleInputCollection(collection)) => {
            doc.single_input_collection = Some(crate::document::InputCollectionDoc {
                inputs: collection
                    .inputs
                    .iter()
                    .map(|(k, port)| (k.clone(), dac_doc_ref(port)))
                    .collect(),
            });
        }
        Some(ElementInput::MultipleInputs(multiple)) => {
            doc.multiple_inputs = Some(crate::document::InputCollectionDoc {
                inputs: multiple
                    .inputs
                    .iter()
                    .map(|(k, port)| (k.clone(), dac_doc_ref(port)))
                    .collect(),
            });
        }
        Some(ElementInput::MicrowaveInput(mw)) => {
            doc.mw_input = Some(crate::document::MwInputDoc {
                port: dac_doc_ref(&mw.port),
                upconverter: Some(mw.upconverter),
            });
        }
        None => {}
    }

    if let Some(ElementOutput::MicrowaveOutput(mw)) = &wire.multiple_outputs {
        doc.mw_output = Some(crate::document::MwOutputDoc {
            port: adc_doc_ref(&mw.port),
        });
    }

    if !wire.digital_inputs.is_empty() {
        doc.digital_inputs = Some(
            wire.digital_inputs
                .iter()
                .map(|(k, input)| {
                    (
                        k.clone(),
                        crate::document::DigitalInputRefDoc {
                            delay: i64::from(input.delay),
                            buffer: i64::from(input.buffer),
                            port: input.port.as_ref().map(digital_doc_ref),
                        },
                    )
                })
                .collect(),
        );
    }
    if !wire.digital_outputs.is_empty() {
        doc.digital_outputs = Some(
            wire.digital_outputs
                .iter()
                .filter_map(|(k, output)| {
                    output
                        .port
                        .as_ref()
                        .map(|port| (k.clone(), digital_doc_ref(port)))
                })
                .collect(),
        );
    }

    if let Some(sticky) = &wire.sticky {
        doc.sticky = Some(crate::document::StickyDoc {
            analog: Some(sticky.analog),
            digital: Some(sticky.digital),
            duration: Some(i64::from(sticky.duration.max(1)) * 4),
        });
    } else if let Some(hold_offset) = &wire.hold_offset {
        doc.hold_offset = Some(crate::document::HoldOffsetDoc {
            duration: Some(hold_offset.duration),
        });
    }

    if let Some(params) = &wire.output_pulse_parameters {
        doc.time_tagging_parameters = Some(TimeTaggingDoc {
            signal_threshold: params.signal_threshold,
            signal_polarity: polarity_name(params.signal_polarity).to_string(),
            derivative_threshold: params.derivative_threshold,
            derivative_polarity: polarity_name(params.derivative_polarity).to_string(),
        });
    }

    if !wire.rf_inputs.is_empty() {
        doc.rf_inputs = Some(
            wire.rf_inputs
                .iter()
                .map(|(k, r)| (k.clone(), (r.device_name.clone(), r.port)))
                .collect(),
        );
    }
    if !wire.rf_outputs.is_empty() {
        doc.rf_outputs = Some(
            wire.rf_outputs
                .iter()
                .map(|(k, r)| (k.clone(), (r.device_name.clone(), r.port)))
                .collect(),
        );
    }

    doc
}

fn polarity_name(polarity: Polarity) -> &'static str {
    match polarity {
        Polarity::Ascending => "ABOVE",
        Polarity::Descending => "BELOW",
    }
}

fn dac_doc_ref(port: &DacPortReference) -> DocPortRef {
    DocPortRef::Full(port.controller.clone(), port.fem, port.number)
}

fn adc_doc_ref(port: &AdcPortReference) -> DocPortRef {
    DocPortRef::Full(port.controller.clone(), port.fem, port.number)
}

fn digital_doc_ref(port: &PortReference) -> DocPortRef {
    DocPortRef::Full(port.controller.clone(), port.fem, port.number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::context::Mode;
    use grani_caps::{caps, ServerCapabilities};
    use serde_json::json;

    fn gen2() -> ServerCapabilities {
        ServerCapabilities::from_capabilities(caps::gen2())
    }

    fn element(value: serde_json::Value) -> ElementDoc {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_frequency_sign_magnitude_split() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "intermediate_frequency": -50e6,
            "singleInput": {"port": ["con1", 1]},
        }));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        assert_eq!(wire.intermediate_frequency, Some(50_000_000));
        assert!(wire.intermediate_frequency_negative);
        assert_eq!(wire.intermediate_frequency_double, Some(50e6));
        assert_eq!(wire.intermediate_frequency_oscillator, Some(-50_000_000));
        assert_eq!(wire.intermediate_frequency_oscillator_double, Some(-50e6));
        // An explicit frequency means no "no oscillator" marker.
        assert_eq!(wire.oscillator, None);
    }

    #[test]
    fn test_frequency_doubles_gated_by_capability() {
        let caps = ServerCapabilities::from_names(std::iter::empty::<String>());
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"intermediate_frequency": 25e6}));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        assert_eq!(wire.intermediate_frequency, Some(25_000_000));
        assert_eq!(wire.intermediate_frequency_double, None);
    }

    #[test]
    fn test_lo_double_gated_by_capability() {
        let caps = ServerCapabilities::from_names(std::iter::empty::<String>());
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "mixInputs": {"I": ["con1", 1], "Q": ["con1", 2], "lo_frequency": 5e9},
        }));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        match wire.inputs.unwrap() {
            ElementInput::MixInputs(mix) => {
                assert_eq!(mix.lo_frequency, 5_000_000_000);
                assert_eq!(mix.lo_frequency_double, 0.0);
            }
            other => panic!("unexpected input oneof: {other:?}"),
        }
    }

    #[test]
    fn test_negative_lo_keeps_its_sign() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "mixInputs": {"I": ["con1", 1], "Q": ["con1", 2], "lo_frequency": -4e8},
        }));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        match wire.inputs.unwrap() {
            ElementInput::MixInputs(mix) => {
                assert_eq!(mix.lo_frequency, -400_000_000);
                assert_eq!(mix.lo_frequency_double, -4e8);
            }
            other => panic!("unexpected input oneof: {other:?}"),
        }
    }

    #[test]
    fn test_frequency_and_oscillator_conflict() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "intermediate_frequency": 50e6,
            "oscillator": "osc1",
        }));
        let err = element_to_wire(&cx, "qubit", &doc).unwrap_err();
        assert!(err.to_string().contains("cannot be defined together"));
    }

    #[test]
    fn test_input_kinds_are_exclusive() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "singleInput": {"port": ["con1", 1]},
            "MWInput": {"port": ["con1", 1, 1]},
        }));
        let err = element_to_wire(&cx, "qubit", &doc).unwrap_err();
        assert!(err.to_string().contains("only one of"));
    }

    #[test]
    fn test_outputs_require_time_of_flight() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "outputs": {"out1": ["con1", 1]},
        }));
        let err = element_to_wire(&cx, "resonator", &doc).unwrap_err();
        assert!(err.to_string().contains("time_of_flight must be defined"));
    }

    #[test]
    fn test_time_of_flight_requires_outputs() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"time_of_flight": 100}));
        let err = element_to_wire(&cx, "resonator", &doc).unwrap_err();
        assert!(err.to_string().contains("relevant only for elements with outputs"));
    }

    #[test]
    fn test_outputs_default_smearing_and_mirror() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "time_of_flight": 100,
            "outputs": {"out1": ["con1", 1]},
        }));
        let wire = element_to_wire(&cx, "resonator", &doc).unwrap();
        assert_eq!(wire.smearing, Some(0));
        assert_eq!(wire.outputs["out1"], AdcPortReference::new("con1", 1, 1));
        match wire.multiple_outputs.unwrap() {
            ElementOutput::MultipleOutputs(out) => {
                assert_eq!(out.port_references["out1"], AdcPortReference::new("con1", 1, 1));
            }
            other => panic!("unexpected output oneof: {other:?}"),
        }
    }

    #[test]
    fn test_sticky_duration_must_divide_by_4() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"sticky": {"duration": 18}}));
        let err = element_to_wire(&cx, "qubit", &doc).unwrap_err();
        assert!(err.to_string().contains("dividable by 4"));
    }

    #[test]
    fn test_sticky_without_capability_becomes_hold_offset() {
        let caps = ServerCapabilities::from_names(std::iter::empty::<String>());
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"sticky": {"duration": 16, "analog": true}}));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        assert_eq!(wire.sticky, None);
        assert_eq!(wire.hold_offset, Some(HoldOffset { duration: 4 }));
    }

    #[test]
    fn test_digital_sticky_without_capability_is_rejected() {
        let caps = ServerCapabilities::from_names(std::iter::empty::<String>());
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"sticky": {"digital": true}}));
        let err = element_to_wire(&cx, "qubit", &doc).unwrap_err();
        assert!(err
            .to_string()
            .contains("Server does not support digital sticky used in element 'qubit'"));
    }

    #[test]
    fn test_sticky_with_capability_divides_duration() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"sticky": {"duration": 16, "digital": true}}));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        assert_eq!(
            wire.sticky,
            Some(Sticky {
                analog: true,
                digital: true,
                duration: 4,
            })
        );
    }

    #[test]
    fn test_polarity_aliases() {
        assert_eq!(parse_polarity("above").unwrap(), Polarity::Ascending);
        assert_eq!(parse_polarity("ASCENDING").unwrap(), Polarity::Ascending);
        assert_eq!(parse_polarity("below").unwrap(), Polarity::Descending);
        assert_eq!(parse_polarity("DESCENDING").unwrap(), Polarity::Descending);
        assert!(parse_polarity("sideways").is_err());
    }

    #[test]
    fn test_mw_input_defaults_first_upconverter() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"MWInput": {"port": ["con1", 2, 1]}}));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        match wire.inputs.unwrap() {
            ElementInput::MicrowaveInput(mw) => {
                assert_eq!(mw.upconverter, 1);
                assert_eq!(mw.port, DacPortReference::new("con1", 2, 1));
            }
            other => panic!("unexpected input oneof: {other:?}"),
        }
    }

    #[test]
    fn test_no_frequency_emits_no_oscillator_marker() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({"singleInput": {"port": ["con1", 1]}}));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        assert_eq!(wire.oscillator, Some(OscillatorChoice::NoOscillator));
    }

    #[test]
    fn test_deconvert_restores_signed_frequency_and_sticky() {
        let caps = gen2();
        let cx = Cx::new(&caps, Mode::Init);
        let doc = element(json!({
            "intermediate_frequency": -75e6,
            "sticky": {"duration": 8},
            "mixInputs": {
                "I": ["con1", 1],
                "Q": ["con1", 2],
                "mixer": "m1",
                "lo_frequency": 6.2e9,
            },
        }));
        let wire = element_to_wire(&cx, "qubit", &doc).unwrap();
        let round = element_to_doc(&wire);
        assert_eq!(round.intermediate_frequency, Some(-75e6));
        assert_eq!(
            round.sticky,
            Some(crate::document::StickyDoc {
                analog: Some(true),
                digital: Some(false),
                duration: Some(8),
            })
        );
        let mix = round.mix_inputs.unwrap();
        assert_eq!(mix.lo_frequency, Some(6.2e9));
        assert_eq!(mix.mixer.as_deref(), Some("m1"));
    }
}
