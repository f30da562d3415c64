//! Default back-filling for legacy-shape payloads.
//!
//! Servers that predate partial updates expect every scalar port field to
//! be present. This pass walks a v1 payload and replaces absent scalars
//! with their zero values. Presence containers and `high_pass` stay
//! untouched: for those, absence itself is the meaningful state.

use grani_wire::{
    AnalogInputPortDec, AnalogOutputPortDec, Config, ConfigVersion, ControllerDec,
    DigitalInputPolarity, DigitalInputPortDec, DigitalOutputPortDec, FemDec,
    LfAnalogOutputPortDec, MwAnalogInputPortDec, MwAnalogOutputPortDec,
};

pub fn fill_defaults_in_config_v1(config: &mut Config) {
    let Some(ConfigVersion::V1(body)) = &mut config.version else {
        return;
    };
    for controller in body.controllers.values_mut() {
        fill_controller(controller);
    }
    for device in body.control_devices.values_mut() {
        for fem in device.fems.values_mut() {
            match fem {
                FemDec::Controller(controller) => fill_controller(controller),
                FemDec::Lf(lf) => {
                    lf.analog_outputs.values_mut().for_each(fill_lf_analog_output);
                    lf.analog_inputs.values_mut().for_each(fill_analog_input);
                    lf.digital_outputs.values_mut().for_each(fill_digital_output);
                    lf.digital_inputs.values_mut().for_each(fill_digital_input);
                }
                FemDec::Mw(mw) => {
                    mw.analog_outputs.values_mut().for_each(fill_mw_analog_output);
                    mw.analog_inputs.values_mut().for_each(fill_mw_analog_input);
                    mw.digital_outputs.values_mut().for_each(fill_digital_output);
                    mw.digital_inputs.values_mut().for_each(fill_digital_input);
                }
            }
        }
    }
}

fn fill_controller(controller: &mut ControllerDec) {
    controller.analog_outputs.values_mut().for_each(fill_analog_output);
    controller.analog_inputs.values_mut().for_each(fill_analog_input);
    controller.digital_outputs.values_mut().for_each(fill_digital_output);
    controller.digital_inputs.values_mut().for_each(fill_digital_input);
}

fn fill_analog_output(port: &mut AnalogOutputPortDec) {
    port.offset.get_or_insert(0.0);
    port.delay.get_or_insert(0);
    port.shareable.get_or_insert(false);
}

fn fill_lf_analog_output(port: &mut LfAnalogOutputPortDec) {
    port.offset.get_or_insert(0.0);
    port.delay.get_or_insert(0);
    port.shareable.get_or_insert(false);
}

fn fill_analog_input(port: &mut AnalogInputPortDec) {
    port.offset.get_or_insert(0.0);
    port.gain_db.get_or_insert(0);
    port.shareable.get_or_insert(false);
    port.sampling_rate.get_or_insert(0.0);
}

fn fill_mw_analog_output(port: &mut MwAnalogOutputPortDec) {
    port.sampling_rate.get_or_insert(0.0);
    port.full_scale_power_dbm.get_or_insert(0);
    port.delay.get_or_insert(0);
    port.shareable.get_or_insert(false);
}

fn fill_mw_analog_input(port: &mut MwAnalogInputPortDec) {
    port.sampling_rate.get_or_insert(0.0);
    port.gain_db.get_or_insert(0);
    port.shareable.get_or_insert(false);
}

fn fill_digital_output(port: &mut DigitalOutputPortDec) {
    port.shareable.get_or_insert(false);
    port.inverted.get_or_insert(false);
}

fn fill_digital_input(port: &mut DigitalInputPortDec) {
    port.shareable.get_or_insert(false);
    port.threshold.get_or_insert(0.0);
    port.deadtime.get_or_insert(0);
    port.polarity.get_or_insert(DigitalInputPolarity::Rising);
}

#[cfg(test)]
mod tests {
    use super::*;
    use grani_wire::{ConfigV1, DeviceDec};
    use std::collections::BTreeMap;

    #[test]
    fn test_fills_scalar_defaults_and_leaves_high_pass() {
        let mut outputs = BTreeMap::new();
        outputs.insert(
            1,
            AnalogOutputPortDec {
                filter: Some(Default::default()),
                ..Default::default()
            },
        );
        let mut inputs = BTreeMap::new();
        inputs.insert(1, DigitalInputPortDec::default());
        let controller = ControllerDec {
            analog_outputs: outputs,
            digital_inputs: inputs,
            ..Default::default()
        };

        let mut body = ConfigV1::default();
        body.controllers.insert("con1".to_string(), controller.clone());
        let mut device = DeviceDec::default();
        device
            .fems
            .insert(1, FemDec::Controller(controller));
        body.control_devices.insert("con1".to_string(), device);

        let mut config = Config::v1(body);
        fill_defaults_in_config_v1(&mut config);

        let v1 = config.as_v1().unwrap();
        let port = &v1.controllers["con1"].analog_outputs[&1];
        assert_eq!(port.offset, Some(0.0));
        assert_eq!(port.delay, Some(0));
        assert_eq!(port.shareable, Some(false));
        assert_eq!(port.filter.as_ref().unwrap().iir.high_pass, None);

        let input = &v1.controllers["con1"].digital_inputs[&1];
        assert_eq!(input.polarity, Some(DigitalInputPolarity::Rising));
        assert_eq!(input.threshold, Some(0.0));

        // The device map copy is filled the same way.
        match &v1.control_devices["con1"].fems[&1] {
            FemDec::Controller(cont) => {
                assert_eq!(cont.analog_outputs[&1].offset, Some(0.0));
            }
            other => panic!("unexpected fem: {other:?}"),
        }
    }

    #[test]
    fn test_v2_payload_is_untouched() {
        let mut config = Config::v2(Default::default());
        fill_defaults_in_config_v1(&mut config);
        assert!(config.as_v2().is_some());
    }
}
