//! Control device conversion: baseline controllers, LF FEMs and MW FEMs.

use std::collections::BTreeMap;

use grani_caps::BASELINE_FEM_IDX;
use grani_wire::{
    AnalogInputPortDec, AnalogOutputPortDec, ControllerDec, DeviceDec, DigitalInputPolarity,
    DigitalInputPortDec, DigitalOutputPortDec, DownconverterConfigDec, FemDec,
    LfAnalogOutputPortDec, LfFemDec, LfOutputMode, LfSamplingRate, LfUpsamplingMode,
    MwAnalogInputPortDec, MwAnalogOutputPortDec, MwFemDec, UpconverterConfigDec, VoltageLevel,
};

use crate::convert::context::Cx;
use crate::convert::filter::{filter_to_doc, filter_to_wire};
use crate::document::{
    AnalogInputDoc, AnalogOutputDoc, ControllerDoc, DigitalInputDoc, DigitalOutputDoc, FemDoc,
    LfAnalogOutputDoc, LfFemDoc, MwAnalogInputDoc, MwAnalogOutputDoc, MwFemDoc, UpconverterDoc,
};
use crate::error::{ConfigError, ConfigResult};

/// Default type tag of a standalone baseline controller.
pub(crate) const BASELINE_CONTROLLER_TYPE: &str = "ctrl";
/// Type tag reported for a multi-FEM chassis when deconverting.
pub(crate) const CHASSIS_CONTROLLER_TYPE: &str = "chassis";
/// Upconverter slot used by the single-upconverter shorthand.
pub(crate) const DEFAULT_UPCONVERTER_IDX: u32 = 1;

pub(crate) fn device_to_wire(cx: &Cx<'_>, doc: &ControllerDoc) -> ConfigResult<DeviceDec> {
    let mut fems = BTreeMap::new();

    if let Some(doc_fems) = &doc.fems {
        // A baseline controller is never spelled as a FEM, so the flat port
        // maps cannot coexist with the chassis form.
        if doc.analog_outputs.is_some()
            || doc.analog_inputs.is_some()
            || doc.digital_outputs.is_some()
            || doc.digital_inputs.is_some()
        {
            return Err(ConfigError::Validation(
                "'analog_outputs', 'analog_inputs', 'digital_outputs' and 'digital_inputs' are \
                 not allowed when 'fems' is present"
                    .to_string(),
            ));
        }
        for (&idx, fem) in doc_fems {
            let converted = match fem {
                FemDoc::Lf(lf) => FemDec::Lf(lf_fem_to_wire(cx, lf)?),
                FemDoc::Mw(mw) => FemDec::Mw(mw_fem_to_wire(cx, mw)?),
            };
            fems.insert(idx, converted);
        }
    } else {
        fems.insert(
            BASELINE_FEM_IDX,
            FemDec::Controller(controller_to_wire(cx, doc)?),
        );
    }

    Ok(DeviceDec { fems })
}

fn controller_to_wire(cx: &Cx<'_>, doc: &ControllerDoc) -> ConfigResult<ControllerDec> {
    let mut cont = ControllerDec {
        controller_type: doc
            .controller_type
            .clone()
            .unwrap_or_else(|| BASELINE_CONTROLLER_TYPE.to_string()),
        ..Default::default()
    };

    if let Some(outputs) = &doc.analog_outputs {
        for (&idx, data) in outputs {
            cont.analog_outputs
                .insert(idx, analog_output_to_wire(cx, data)?);
        }
    }
    if let Some(inputs) = &doc.analog_inputs {
        for (&idx, data) in inputs {
            let converted = analog_input_to_wire(cx, data);
            // Baseline controllers sample at 1 GS/s only.
            if let Some(rate) = converted.sampling_rate {
                if rate != 1e9 {
                    return Err(ConfigError::Validation(format!(
                        "Sampling rate of {rate} is not supported for a baseline controller"
                    )));
                }
            }
            cont.analog_inputs.insert(idx, converted);
        }
    }
    if let Some(outputs) = &doc.digital_outputs {
        for (&idx, data) in outputs {
            cont.digital_outputs.insert(idx, digital_output_to_wire(cx, data));
        }
    }
    if let Some(inputs) = &doc.digital_inputs {
        for (&idx, data) in inputs {
            cont.digital_inputs
                .insert(idx, digital_input_to_wire(cx, data)?);
        }
    }
    Ok(cont)
}

fn lf_fem_to_wire(cx: &Cx<'_>, doc: &LfFemDoc) -> ConfigResult<LfFemDec> {
    let mut fem = LfFemDec::default();
    if let Some(outputs) = &doc.analog_outputs {
        for (&idx, data) in outputs {
            fem.analog_outputs
                .insert(idx, lf_analog_output_to_wire(cx, data)?);
        }
    }
    if let Some(inputs) = &doc.analog_inputs {
        for (&idx, data) in inputs {
            fem.analog_inputs.insert(idx, analog_input_to_wire(cx, data));
        }
    }
    if let Some(outputs) = &doc.digital_outputs {
        for (&idx, data) in outputs {
            fem.digital_outputs.insert(idx, digital_output_to_wire(cx, data));
        }
    }
    if let Some(inputs) = &doc.digital_inputs {
        for (&idx, data) in inputs {
            fem.digital_inputs
                .insert(idx, digital_input_to_wire(cx, data)?);
        }
    }
    Ok(fem)
}

fn mw_fem_to_wire(cx: &Cx<'_>, doc: &MwFemDoc) -> ConfigResult<MwFemDec> {
    let mut fem = MwFemDec::default();
    if let Some(outputs) = &doc.analog_outputs {
        for (&idx, data) in outputs {
            fem.analog_outputs
                .insert(idx, mw_analog_output_to_wire(cx, data)?);
        }
    }
    if let Some(inputs) = &doc.analog_inputs {
        for (&idx, data) in inputs {
            fem.analog_inputs
                .insert(idx, mw_analog_input_to_wire(cx, data)?);
        }
    }
    if let Some(outputs) = &doc.digital_outputs {
        for (&idx, data) in outputs {
            fem.digital_outputs.insert(idx, digital_output_to_wire(cx, data));
        }
    }
    if let Some(inputs) = &doc.digital_inputs {
        for (&idx, data) in inputs {
            fem.digital_inputs
                .insert(idx, digital_input_to_wire(cx, data)?);
        }
    }
    Ok(fem)
}

fn validate_delay(delay: Option<i64>) -> ConfigResult<Option<u32>> {
    match delay {
        Some(d) if d < 0 => Err(ConfigError::Validation(format!(
            "analog output delay cannot be a negative value, given value: {d}"
        ))),
        Some(d) => Ok(Some(d as u32)),
        None => Ok(None),
    }
}

fn analog_output_to_wire(cx: &Cx<'_>, doc: &AnalogOutputDoc) -> ConfigResult<AnalogOutputPortDec> {
    let mut out = AnalogOutputPortDec {
        offset: cx.default_for(doc.offset, 0.0),
        shareable: cx.default_for(doc.shareable, false),
        delay: validate_delay(cx.default_for(doc.delay, 0))?,
        ..Default::default()
    };
    if let Some(filter) = &doc.filter {
        out.filter = Some(filter_to_wire(cx, filter)?);
    }
    if let Some(crosstalk) = &doc.crosstalk {
        out.crosstalk = crosstalk.clone();
    }
    Ok(out)
}

fn lf_analog_output_to_wire(
    cx: &Cx<'_>,
    doc: &LfAnalogOutputDoc,
) -> ConfigResult<LfAnalogOutputPortDec> {
    validate_sampling_rate_and_upsampling_mode(cx, doc)?;

    let mut out = LfAnalogOutputPortDec {
        offset: cx.default_for(doc.offset, 0.0),
        shareable: cx.default_for(doc.shareable, false),
        delay: validate_delay(cx.default_for(doc.delay, 0))?,
        ..Default::default()
    };
    if let Some(filter) = &doc.filter {
        out.filter = Some(filter_to_wire(cx, filter)?);
    }
    if let Some(crosstalk) = &doc.crosstalk {
        if cx.caps.supports_config_v2() {
            out.crosstalk_v2 = Some(crosstalk.clone().into());
        } else {
            out.crosstalk = crosstalk.clone();
        }
    }

    let sampling_rate = cx.default_for(doc.sampling_rate, 1e9);
    let upsampling_mode = cx.default_for(doc.upsampling_mode.clone(), "mw".to_string());
    // The upsampling mode is tied to the sampling rate, so both enums are
    // written together.
    if let Some(rate) = sampling_rate {
        if rate == 1e9 {
            out.sampling_rate = Some(LfSamplingRate::Gsps1);
            out.upsampling_mode = Some(parse_upsampling_mode(upsampling_mode.as_deref())?);
        } else if rate == 2e9 {
            out.sampling_rate = Some(LfSamplingRate::Gsps2);
            out.upsampling_mode = Some(LfUpsamplingMode::Unset);
        } else {
            return Err(ConfigError::Validation(
                "Sampling rate should be either 1e9 or 2e9".to_string(),
            ));
        }
    }

    if let Some(mode) = cx.default_for(doc.output_mode.clone(), "direct".to_string()) {
        out.output_mode = Some(match mode.as_str() {
            "direct" => LfOutputMode::Direct,
            "amplified" => LfOutputMode::Amplified,
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid output mode: {other}"
                )))
            }
        });
    }

    Ok(out)
}

fn parse_upsampling_mode(mode: Option<&str>) -> ConfigResult<LfUpsamplingMode> {
    match mode {
        Some("mw") | None => Ok(LfUpsamplingMode::Mw),
        Some("pulse") => Ok(LfUpsamplingMode::Pulse),
        Some(other) => Err(ConfigError::Validation(format!(
            "Invalid upsampling mode: {other}"
        ))),
    }
}

fn validate_sampling_rate_and_upsampling_mode(
    cx: &Cx<'_>,
    doc: &LfAnalogOutputDoc,
) -> ConfigResult<()> {
    if doc.upsampling_mode.is_some()
        && doc.sampling_rate.is_some_and(|rate| rate != 1e9)
    {
        return Err(ConfigError::Validation(
            "'upsampling_mode' is only relevant for 'sampling_rate' of 1GHz.".to_string(),
        ));
    }
    if !cx.init_mode() {
        // The pair travels together on update: writing one of them alone
        // would desynchronize the stored pair.
        if doc.sampling_rate == Some(1e9) && doc.upsampling_mode.is_none() {
            return Err(ConfigError::Validation(
                "'upsampling_mode' should be provided when updating 'sampling_rate' to 1GHz."
                    .to_string(),
            ));
        }
        if doc.upsampling_mode.is_some() && doc.sampling_rate.is_none() {
            return Err(ConfigError::Validation(
                "'sampling_rate' of 1GHz should be provided when updating 'upsampling_mode'."
                    .to_string(),
            ));
        }
    }
    Ok(())
}

fn analog_input_to_wire(cx: &Cx<'_>, doc: &AnalogInputDoc) -> AnalogInputPortDec {
    AnalogInputPortDec {
        offset: cx.default_for(doc.offset, 0.0),
        shareable: cx.default_for(doc.shareable, false),
        gain_db: cx.default_for(doc.gain_db, 0),
        sampling_rate: cx.default_for(doc.sampling_rate, 1e9),
    }
}

fn mw_analog_output_to_wire(
    cx: &Cx<'_>,
    doc: &MwAnalogOutputDoc,
) -> ConfigResult<MwAnalogOutputPortDec> {
    if cx.init_mode() {
        cx.require_fields(
            &[("band", doc.band.is_some())],
            "microwave analog output port",
        )?;
    }

    let mut item = MwAnalogOutputPortDec {
        sampling_rate: cx.default_for(doc.sampling_rate, 1e9),
        full_scale_power_dbm: cx.default_for(doc.full_scale_power_dbm, -11),
        band: doc.band,
        delay: validate_delay(cx.default_for(doc.delay, 0))?,
        shareable: cx.default_for(doc.shareable, false),
        ..Default::default()
    };

    if let Some(upconverters) = resolve_upconverters(cx, doc)? {
        cx.set_versioned(&mut item.upconverters, &mut item.upconverters_v2, upconverters);
    }

    Ok(item)
}

fn resolve_upconverters(
    cx: &Cx<'_>,
    doc: &MwAnalogOutputDoc,
) -> ConfigResult<Option<BTreeMap<u32, UpconverterConfigDec>>> {
    if doc.upconverter_frequency.is_some() && doc.upconverters.is_some() {
        return Err(ConfigError::Validation(
            "Use either 'upconverter_frequency' or 'upconverters' but not both".to_string(),
        ));
    }
    if let Some(frequency) = doc.upconverter_frequency {
        let mut map = BTreeMap::new();
        map.insert(DEFAULT_UPCONVERTER_IDX, UpconverterConfigDec { frequency });
        return Ok(Some(map));
    }
    match cx.default_for(doc.upconverters.clone(), BTreeMap::new()) {
        Some(map) => Ok(Some(
            map.into_iter()
                .map(|(idx, UpconverterDoc { frequency })| {
                    (idx, UpconverterConfigDec { frequency })
                })
                .collect(),
        )),
        None if cx.init_mode() => Err(ConfigError::Validation(
            "You should declare at least one upconverter.".to_string(),
        )),
        None => Ok(None),
    }
}

fn mw_analog_input_to_wire(
    cx: &Cx<'_>,
    doc: &MwAnalogInputDoc,
) -> ConfigResult<MwAnalogInputPortDec> {
    if cx.init_mode() {
        cx.require_fields(
            &[
                ("band", doc.band.is_some()),
                (
                    "downconverter_frequency",
                    doc.downconverter_frequency.is_some(),
                ),
            ],
            "microwave analog input port",
        )?;
    }

    let mut item = MwAnalogInputPortDec {
        sampling_rate: cx.default_for(doc.sampling_rate, 1e9),
        gain_db: cx.default_for(doc.gain_db, 0),
        shareable: cx.default_for(doc.shareable, false),
        band: doc.band,
        ..Default::default()
    };
    if let Some(frequency) = doc.downconverter_frequency {
        item.downconverter = DownconverterConfigDec { frequency };
    }
    Ok(item)
}

fn digital_output_to_wire(cx: &Cx<'_>, doc: &DigitalOutputDoc) -> DigitalOutputPortDec {
    DigitalOutputPortDec {
        shareable: cx.default_for(doc.shareable, false),
        inverted: cx.default_for(doc.inverted, false),
        // LVTTL is the only level the hardware accepts.
        level: VoltageLevel::Lvttl,
    }
}

fn digital_input_to_wire(cx: &Cx<'_>, doc: &DigitalInputDoc) -> ConfigResult<DigitalInputPortDec> {
    if cx.init_mode() {
        cx.require_fields(
            &[
                ("threshold", doc.threshold.is_some()),
                ("polarity", doc.polarity.is_some()),
                ("deadtime", doc.deadtime.is_some()),
            ],
            "digital input port",
        )?;
    }

    let mut item = DigitalInputPortDec {
        shareable: cx.default_for(doc.shareable, false),
        threshold: doc.threshold,
        deadtime: doc.deadtime,
        level: VoltageLevel::Lvttl,
        ..Default::default()
    };
    if let Some(polarity) = &doc.polarity {
        item.polarity = Some(match polarity.to_uppercase().as_str() {
            "RISING" => DigitalInputPolarity::Rising,
            "FALLING" => DigitalInputPolarity::Falling,
            other => {
                return Err(ConfigError::Validation(format!("Invalid polarity: {other}")))
            }
        });
    }
    Ok(item)
}

// ── deconversion ──

pub(crate) fn device_to_doc(cx: &Cx<'_>, wire: &DeviceDec) -> ControllerDoc {
    // A lone baseline controller in the conventional slot collapses back to
    // the flat legacy form.
    if wire.fems.len() == 1 {
        if let Some(FemDec::Controller(cont)) = wire.fems.get(&BASELINE_FEM_IDX) {
            return controller_to_doc(cx, cont);
        }
    }
    ControllerDoc {
        controller_type: Some(CHASSIS_CONTROLLER_TYPE.to_string()),
        fems: Some(
            wire.fems
                .iter()
                .map(|(&idx, fem)| (idx, fem_to_doc(cx, fem)))
                .collect(),
        ),
        ..Default::default()
    }
}

pub(crate) fn controller_to_doc(cx: &Cx<'_>, wire: &ControllerDec) -> ControllerDoc {
    ControllerDoc {
        controller_type: Some(wire.controller_type.clone()),
        analog_outputs: Some(
            wire.analog_outputs
                .iter()
                .map(|(&idx, port)| (idx, analog_output_to_doc(cx, port)))
                .collect(),
        ),
        analog_inputs: Some(
            wire.analog_inputs
                .iter()
                .map(|(&idx, port)| (idx, analog_input_to_doc(port)))
                .collect(),
        ),
        digital_outputs: Some(
            wire.digital_outputs
                .iter()
                .map(|(&idx, port)| (idx, digital_output_to_doc(port)))
                .collect(),
        ),
        digital_inputs: Some(
            wire.digital_inputs
                .iter()
                .map(|(&idx, port)| (idx, digital_input_to_doc(port)))
                .collect(),
        ),
        fems: None,
    }
}

fn fem_to_doc(cx: &Cx<'_>, fem: &FemDec) -> FemDoc {
    match fem {
        FemDec::Lf(lf) => FemDoc::Lf(lf_fem_to_doc(cx, lf)),
        FemDec::Mw(mw) => FemDoc::Mw(mw_fem_to_doc(cx, mw)),
        // A baseline controller inside a multi-FEM chassis does not occur
        // in gateway output; render its ports through the LF document form.
        FemDec::Controller(cont) => FemDoc::Lf(LfFemDoc {
            fem_type: Some("LF".to_string()),
            analog_outputs: Some(
                cont.analog_outputs
                    .iter()
                    .map(|(&idx, port)| {
                        let base = analog_output_to_doc(cx, port);
                        (
                            idx,
                            LfAnalogOutputDoc {
                                offset: base.offset,
                                delay: base.delay,
                                shareable: base.shareable,
                                filter: base.filter,
                                crosstalk: base.crosstalk,
                                ..Default::default()
                            },
                        )
                    })
                    .collect(),
            ),
            analog_inputs: Some(
                cont.analog_inputs
                    .iter()
                    .map(|(&idx, port)| (idx, analog_input_to_doc(port)))
                    .collect(),
            ),
            digital_outputs: Some(
                cont.digital_outputs
                    .iter()
                    .map(|(&idx, port)| (idx, digital_output_to_doc(port)))
                    .collect(),
            ),
            digital_inputs: Some(
                cont.digital_inputs
                    .iter()
                    .map(|(&idx, port)| (idx, digital_input_to_doc(port)))
                    .collect(),
            ),
        }),
    }
}

fn lf_fem_to_doc(cx: &Cx<'_>, fem: &LfFemDec) -> LfFemDoc {
    LfFemDoc {
        fem_type: Some("LF".to_string()),
        analog_outputs: (!fem.analog_outputs.is_empty()).then(|| {
            fem.analog_outputs
                .iter()
                .map(|(&idx, port)| (idx, lf_analog_output_to_doc(cx, port)))
                .collect()
        }),
        analog_inputs: (!fem.analog_inputs.is_empty()).then(|| {
            fem.analog_inputs
                .iter()
                .map(|(&idx, port)| (idx, analog_input_to_doc(port)))
                .collect()
        }),
        digital_outputs: (!fem.digital_outputs.is_empty()).then(|| {
            fem.digital_outputs
                .iter()
                .map(|(&idx, port)| (idx, digital_output_to_doc(port)))
                .collect()
        }),
        digital_inputs: (!fem.digital_inputs.is_empty()).then(|| {
            fem.digital_inputs
                .iter()
                .map(|(&idx, port)| (idx, digital_input_to_doc(port)))
                .collect()
        }),
    }
}

fn mw_fem_to_doc(cx: &Cx<'_>, fem: &MwFemDec) -> MwFemDoc {
    MwFemDoc {
        fem_type: Some("MW".to_string()),
        analog_outputs: (!fem.analog_outputs.is_empty()).then(|| {
            fem.analog_outputs
                .iter()
                .map(|(&idx, port)| (idx, mw_analog_output_to_doc(cx, port)))
                .collect()
        }),
        analog_inputs: (!fem.analog_inputs.is_empty()).then(|| {
            fem.analog_inputs
                .iter()
                .map(|(&idx, port)| (idx, mw_analog_input_to_doc(port)))
                .collect()
        }),
        digital_outputs: (!fem.digital_outputs.is_empty()).then(|| {
            fem.digital_outputs
                .iter()
                .map(|(&idx, port)| (idx, digital_output_to_doc(port)))
                .collect()
        }),
        digital_inputs: (!fem.digital_inputs.is_empty()).then(|| {
            fem.digital_inputs
                .iter()
                .map(|(&idx, port)| (idx, digital_input_to_doc(port)))
                .collect()
        }),
    }
}

fn analog_output_to_doc(cx: &Cx<'_>, port: &AnalogOutputPortDec) -> AnalogOutputDoc {
    AnalogOutputDoc {
        offset: port.offset,
        delay: port.delay.map(i64::from),
        shareable: port.shareable,
        filter: port.filter.as_ref().map(|f| filter_to_doc(cx, f)),
        crosstalk: Some(port.crosstalk.clone()),
    }
}

fn lf_analog_output_to_doc(cx: &Cx<'_>, port: &LfAnalogOutputPortDec) -> LfAnalogOutputDoc {
    let crosstalk = if cx.caps.supports_config_v2() {
        port.crosstalk_v2
            .as_ref()
            .map(|c| c.value.clone())
            .unwrap_or_default()
    } else {
        port.crosstalk.clone()
    };
    LfAnalogOutputDoc {
        offset: port.offset,
        delay: port.delay.map(i64::from),
        shareable: port.shareable,
        filter: port.filter.as_ref().map(|f| filter_to_doc(cx, f)),
        crosstalk: Some(crosstalk),
        sampling_rate: port.sampling_rate.map(|rate| match rate {
            LfSamplingRate::Gsps1 => 1e9,
            LfSamplingRate::Gsps2 => 2e9,
        }),
        upsampling_mode: match port.upsampling_mode {
            Some(LfUpsamplingMode::Mw) => Some("mw".to_string()),
            Some(LfUpsamplingMode::Pulse) => Some("pulse".to_string()),
            Some(LfUpsamplingMode::Unset) | None => None,
        },
        output_mode: port.output_mode.map(|mode| {
            match mode {
                LfOutputMode::Direct => "direct",
                LfOutputMode::Amplified => "amplified",
            }
            .to_string()
        }),
    }
}

fn mw_analog_output_to_doc(cx: &Cx<'_>, port: &MwAnalogOutputPortDec) -> MwAnalogOutputDoc {
    let upconverters = if cx.caps.supports_config_v2() {
        port.upconverters_v2
            .as_ref()
            .map(|c| c.value.clone())
            .unwrap_or_default()
    } else {
        port.upconverters.clone()
    };
    MwAnalogOutputDoc {
        sampling_rate: port.sampling_rate,
        full_scale_power_dbm: port.full_scale_power_dbm,
        band: port.band,
        delay: port.delay.map(i64::from),
        shareable: port.shareable,
        upconverters: Some(
            upconverters
                .into_iter()
                .map(|(idx, up)| {
                    (
                        idx,
                        UpconverterDoc {
                            frequency: up.frequency,
                        },
                    )
                })
                .collect(),
        ),
        upconverter_frequency: None,
    }
}

fn mw_analog_input_to_doc(port: &MwAnalogInputPortDec) -> MwAnalogInputDoc {
    MwAnalogInputDoc {
        sampling_rate: port.sampling_rate,
        gain_db: port.gain_db,
        shareable: port.shareable,
        band: port.band,
        downconverter_frequency: Some(port.downconverter.frequency),
    }
}

fn analog_input_to_doc(port: &AnalogInputPortDec) -> AnalogInputDoc {
    AnalogInputDoc {
        offset: port.offset,
        gain_db: Some(port.gain_db.unwrap_or(0)),
        shareable: port.shareable,
        // The only allowed value; the gateway reports it as unset.
        sampling_rate: Some(1e9),
    }
}

fn digital_output_to_doc(port: &DigitalOutputPortDec) -> DigitalOutputDoc {
    DigitalOutputDoc {
        shareable: port.shareable,
        inverted: port.inverted,
    }
}

fn digital_input_to_doc(port: &DigitalInputPortDec) -> DigitalInputDoc {
    DigitalInputDoc {
        shareable: port.shareable,
        threshold: port.threshold,
        deadtime: port.deadtime,
        polarity: port.polarity.map(|p| {
            match p {
                DigitalInputPolarity::Rising => "RISING",
                DigitalInputPolarity::Falling => "FALLING",
            }
            .to_string()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::context::Mode;
    use grani_caps::{caps, ServerCapabilities};
    use serde_json::json;

    fn gen2_cx() -> ServerCapabilities {
        ServerCapabilities::from_capabilities(caps::gen2())
    }

    fn doc<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_baseline_controller_lands_in_conventional_slot() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let controller: ControllerDoc = doc(json!({
            "analog_outputs": {"1": {"offset": 0.1}},
        }));
        let device = device_to_wire(&cx, &controller).unwrap();
        assert_eq!(device.fems.len(), 1);
        match device.fems.get(&BASELINE_FEM_IDX).unwrap() {
            FemDec::Controller(cont) => {
                assert_eq!(cont.controller_type, "ctrl");
                assert_eq!(cont.analog_outputs[&1].offset, Some(0.1));
                // Init mode fills the documented defaults.
                assert_eq!(cont.analog_outputs[&1].delay, Some(0));
                assert_eq!(cont.analog_outputs[&1].shareable, Some(false));
            }
            other => panic!("expected baseline controller, got {other:?}"),
        }
    }

    #[test]
    fn test_fems_and_flat_ports_are_exclusive() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let controller: ControllerDoc = doc(json!({
            "fems": {"2": {"type": "LF"}},
            "analog_outputs": {"1": {}},
        }));
        let err = device_to_wire(&cx, &controller).unwrap_err();
        assert!(err.to_string().contains("not allowed when 'fems' is present"));
    }

    #[test]
    fn test_baseline_rejects_2gsps_input() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let controller: ControllerDoc = doc(json!({
            "analog_inputs": {"1": {"sampling_rate": 2e9, "offset": 0.0}},
        }));
        let err = device_to_wire(&cx, &controller).unwrap_err();
        assert!(err.to_string().contains("Sampling rate of 2000000000"));
    }

    #[test]
    fn test_lf_sampling_rate_enum_mapping() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let one_gsps: LfAnalogOutputDoc = doc(json!({"sampling_rate": 1e9}));
        let port = lf_analog_output_to_wire(&cx, &one_gsps).unwrap();
        assert_eq!(port.sampling_rate, Some(LfSamplingRate::Gsps1));
        assert_eq!(port.upsampling_mode, Some(LfUpsamplingMode::Mw));

        let two_gsps: LfAnalogOutputDoc = doc(json!({"sampling_rate": 2e9}));
        let port = lf_analog_output_to_wire(&cx, &two_gsps).unwrap();
        assert_eq!(port.sampling_rate, Some(LfSamplingRate::Gsps2));
        assert_eq!(port.upsampling_mode, Some(LfUpsamplingMode::Unset));

        let bad: LfAnalogOutputDoc = doc(json!({"sampling_rate": 1.5e9}));
        assert!(lf_analog_output_to_wire(&cx, &bad).is_err());
    }

    #[test]
    fn test_upsampling_mode_needs_1gsps() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let bad: LfAnalogOutputDoc =
            doc(json!({"sampling_rate": 2e9, "upsampling_mode": "pulse"}));
        let err = lf_analog_output_to_wire(&cx, &bad).unwrap_err();
        assert!(err.to_string().contains("only relevant for 'sampling_rate' of 1GHz"));
    }

    #[test]
    fn test_update_mode_requires_sampling_pair_together() {
        let mut set = caps::gen2();
        set.push(caps::CONFIG_V2);
        let caps = ServerCapabilities::from_capabilities(set);
        let cx = Cx::new(&caps, Mode::Update);

        let rate_only: LfAnalogOutputDoc = doc(json!({"sampling_rate": 1e9}));
        assert!(lf_analog_output_to_wire(&cx, &rate_only).is_err());

        let mode_only: LfAnalogOutputDoc = doc(json!({"upsampling_mode": "mw"}));
        assert!(lf_analog_output_to_wire(&cx, &mode_only).is_err());

        let both: LfAnalogOutputDoc =
            doc(json!({"sampling_rate": 1e9, "upsampling_mode": "mw"}));
        assert!(lf_analog_output_to_wire(&cx, &both).is_ok());
    }

    #[test]
    fn test_negative_delay_rejected() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let bad: AnalogOutputDoc = doc(json!({"delay": -3}));
        let err = analog_output_to_wire(&cx, &bad).unwrap_err();
        assert!(err.to_string().contains("cannot be a negative value"));
    }

    #[test]
    fn test_mw_output_upconverter_shorthand() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let output: MwAnalogOutputDoc =
            doc(json!({"band": 2, "upconverter_frequency": 5.5e9}));
        let port = mw_analog_output_to_wire(&cx, &output).unwrap();
        assert_eq!(
            port.upconverters[&DEFAULT_UPCONVERTER_IDX].frequency,
            5.5e9
        );

        let ambiguous: MwAnalogOutputDoc = doc(json!({
            "band": 2,
            "upconverter_frequency": 5.5e9,
            "upconverters": {"1": {"frequency": 5.5e9}},
        }));
        assert!(mw_analog_output_to_wire(&cx, &ambiguous).is_err());
    }

    #[test]
    fn test_mw_ports_require_band_on_init() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let output: MwAnalogOutputDoc = doc(json!({"upconverter_frequency": 5e9}));
        assert!(mw_analog_output_to_wire(&cx, &output).is_err());

        let input: MwAnalogInputDoc = doc(json!({"band": 1}));
        let err = mw_analog_input_to_wire(&cx, &input).unwrap_err();
        assert!(err.to_string().contains("downconverter_frequency"));
    }

    #[test]
    fn test_digital_input_polarity_parse() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let input: DigitalInputDoc =
            doc(json!({"threshold": 0.5, "polarity": "rising", "deadtime": 4}));
        let port = digital_input_to_wire(&cx, &input).unwrap();
        assert_eq!(port.polarity, Some(DigitalInputPolarity::Rising));
        assert_eq!(port.level, VoltageLevel::Lvttl);

        let bad: DigitalInputDoc =
            doc(json!({"threshold": 0.5, "polarity": "sideways", "deadtime": 4}));
        assert!(digital_input_to_wire(&cx, &bad).is_err());
    }

    #[test]
    fn test_deconvert_collapses_single_baseline_fem() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let controller: ControllerDoc = doc(json!({
            "analog_outputs": {"1": {"offset": 0.25}},
        }));
        let device = device_to_wire(&cx, &controller).unwrap();
        let round = device_to_doc(&cx, &device);
        assert!(round.fems.is_none());
        assert_eq!(round.controller_type.as_deref(), Some("ctrl"));
        assert_eq!(round.analog_outputs.unwrap()[&1].offset, Some(0.25));
    }

    #[test]
    fn test_deconvert_chassis_keeps_fem_types() {
        let caps = gen2_cx();
        let cx = Cx::new(&caps, Mode::Init);
        let controller: ControllerDoc = doc(json!({
            "fems": {
                "1": {"type": "LF"},
                "2": {"type": "MW", "analog_inputs": {"1": {"band": 1, "downconverter_frequency": 4e9}}},
            },
        }));
        let device = device_to_wire(&cx, &controller).unwrap();
        let round = device_to_doc(&cx, &device);
        assert_eq!(round.controller_type.as_deref(), Some("chassis"));
        let fems = round.fems.unwrap();
        assert!(matches!(fems[&1], FemDoc::Lf(_)));
        match &fems[&2] {
            FemDoc::Mw(mw) => {
                let inputs = mw.analog_inputs.as_ref().unwrap();
                assert_eq!(inputs[&1].downconverter_frequency, Some(4e9));
            }
            other => panic!("expected MW fem, got {other:?}"),
        }
    }
}
