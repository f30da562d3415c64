//! Post-conversion capability checks over the assembled wire payload.
//!
//! The per-entry converters gate the keys they translate; the rules here
//! need the whole payload (grouped listings, cross-entity checks) and run
//! once after conversion.

use grani_caps::{caps, ServerCapabilities};
use grani_wire::{Config, ElementInput, FemDec};

use crate::error::{ConfigError, ConfigResult};

/// What to do when a fractional frequency is declared against a server
/// that only takes integer hertz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrequencyPolicy {
    /// Reject the configuration.
    #[default]
    Strict,
    /// Truncate to the integer part and log a warning.
    TruncateWithWarning,
}

pub fn validate_config_capabilities(
    config: &Config,
    server_caps: &ServerCapabilities,
    frequency_policy: FrequencyPolicy,
) -> ConfigResult<()> {
    check_inverted_digital_outputs(config, server_caps)?;
    check_multiple_inputs(config, server_caps)?;
    check_analog_delay(config, server_caps)?;
    check_shared_oscillators(config, server_caps)?;
    check_crosstalk(config, server_caps)?;
    check_shareable_ports(config, server_caps)?;
    check_frequency_precision(config, server_caps, frequency_policy)?;
    Ok(())
}

fn check_inverted_digital_outputs(
    config: &Config,
    server_caps: &ServerCapabilities,
) -> ConfigResult<()> {
    if server_caps.supports(&caps::INVERTED_DIGITAL_OUTPUT) {
        return Ok(());
    }
    let Some(devices) = config.control_devices() else {
        return Ok(());
    };
    let mut inverted = Vec::new();
    for (name, device) in devices {
        for (&fem_idx, fem) in &device.fems {
            // MW FEM digital outputs are gated elsewhere; only baseline and
            // LF ports carry the legacy inversion flag.
            let outputs = match fem {
                FemDec::Controller(controller) => &controller.digital_outputs,
                FemDec::Lf(lf) => &lf.digital_outputs,
                FemDec::Mw(_) => continue,
            };
            for (&port, output) in outputs {
                if output.inverted == Some(true) {
                    inverted.push(format!("controller: {name}, fem: {fem_idx}, port: {port}"));
                }
            }
        }
    }
    if inverted.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "Server does not support inverted digital outputs used in: {}",
            inverted.join("; ")
        )))
    }
}

fn check_multiple_inputs(config: &Config, server_caps: &ServerCapabilities) -> ConfigResult<()> {
    if server_caps.supports(&caps::MULTIPLE_INPUTS_FOR_ELEMENT) {
        return Ok(());
    }
    let Some(elements) = config.elements() else {
        return Ok(());
    };
    for (name, element) in elements {
        if matches!(element.inputs, Some(ElementInput::MultipleInputs(_))) {
            return Err(ConfigError::Validation(format!(
                "Server does not support multiple inputs for elements used in '{name}'"
            )));
        }
    }
    Ok(())
}

fn check_analog_delay(config: &Config, server_caps: &ServerCapabilities) -> ConfigResult<()> {
    if server_caps.supports(&caps::ANALOG_DELAY) {
        return Ok(());
    }
    let Some(devices) = config.control_devices() else {
        return Ok(());
    };
    for (name, device) in devices {
        for fem in device.fems.values() {
            let delayed = match fem {
                FemDec::Controller(controller) => controller
                    .analog_outputs
                    .values()
                    .any(|port| port.delay.is_some_and(|d| d != 0)),
                FemDec::Lf(lf) => lf
                    .analog_outputs
                    .values()
                    .any(|port| port.delay.is_some_and(|d| d != 0)),
                FemDec::Mw(mw) => mw
                    .analog_outputs
                    .values()
                    .any(|port| port.delay.is_some_and(|d| d != 0)),
            };
            if delayed {
                return Err(ConfigError::Validation(format!(
                    "Server does not support analog delay used in controller '{name}'"
                )));
            }
        }
    }
    Ok(())
}

fn check_shared_oscillators(config: &Config, server_caps: &ServerCapabilities) -> ConfigResult<()> {
    if server_caps.supports(&caps::SHARED_OSCILLATORS) {
        return Ok(());
    }
    let Some(elements) = config.elements() else {
        return Ok(());
    };
    for (name, element) in elements {
        if matches!(
            element.oscillator,
            Some(grani_wire::OscillatorChoice::NamedOscillator(_))
        ) {
            return Err(ConfigError::Validation(format!(
                "Server does not support shared oscillators for elements used in '{name}'"
            )));
        }
    }
    Ok(())
}

fn check_crosstalk(config: &Config, server_caps: &ServerCapabilities) -> ConfigResult<()> {
    if server_caps.supports(&caps::CROSSTALK) {
        return Ok(());
    }
    let Some(devices) = config.control_devices() else {
        return Ok(());
    };
    for (name, device) in devices {
        for fem in device.fems.values() {
            let has_crosstalk = match fem {
                FemDec::Controller(controller) => controller
                    .analog_outputs
                    .values()
                    .any(|port| !port.crosstalk.is_empty()),
                FemDec::Lf(lf) => lf.analog_outputs.values().any(|port| {
                    !port.crosstalk.is_empty()
                        || port
                            .crosstalk_v2
                            .as_ref()
                            .is_some_and(|c| !c.value.is_empty())
                }),
                FemDec::Mw(_) => false,
            };
            if has_crosstalk {
                return Err(ConfigError::Validation(format!(
                    "Server does not support channel weights used in controller '{name}'"
                )));
            }
        }
    }
    Ok(())
}

fn check_shareable_ports(config: &Config, server_caps: &ServerCapabilities) -> ConfigResult<()> {
    if server_caps.supports(&caps::SHARED_PORTS) {
        return Ok(());
    }
    let Some(devices) = config.control_devices() else {
        return Ok(());
    };
    let mut listings = Vec::new();
    for (name, device) in devices {
        let mut ports = Vec::new();
        for (&fem_idx, fem) in &device.fems {
            let mut collect =
                |kind: &str, shared: Vec<u32>| {
                    for port in shared {
                        ports.push(format!("fem {fem_idx} {kind} {port}"));
                    }
                };
            match fem {
                FemDec::Controller(controller) => {
                    collect(
                        "analog output",
                        shared_keys(&controller.analog_outputs, |p| p.shareable),
                    );
                    collect(
                        "analog input",
                        shared_keys(&controller.analog_inputs, |p| p.shareable),
                    );
                    collect(
                        "digital output",
                        shared_keys(&controller.digital_outputs, |p| p.shareable),
                    );
                    collect(
                        "digital input",
                        shared_keys(&controller.digital_inputs, |p| p.shareable),
                    );
                }
                FemDec::Lf(lf) => {
                    collect(
                        "analog output",
                        shared_keys(&lf.analog_outputs, |p| p.shareable),
                    );
                    collect(
                        "analog input",
                        shared_keys(&lf.analog_inputs, |p| p.shareable),
                    );
                    collect(
                        "digital output",
                        shared_keys(&lf.digital_outputs, |p| p.shareable),
                    );
                    collect(
                        "digital input",
                        shared_keys(&lf.digital_inputs, |p| p.shareable),
                    );
                }
                FemDec::Mw(mw) => {
                    collect(
                        "analog output",
                        shared_keys(&mw.analog_outputs, |p| p.shareable),
                    );
                    collect(
                        "analog input",
                        shared_keys(&mw.analog_inputs, |p| p.shareable),
                    );
                    collect(
                        "digital output",
                        shared_keys(&mw.digital_outputs, |p| p.shareable),
                    );
                    collect(
                        "digital input",
                        shared_keys(&mw.digital_inputs, |p| p.shareable),
                    );
                }
            }
        }
        if !ports.is_empty() {
            listings.push(format!("controller {name}: {}", ports.join(", ")));
        }
    }
    if listings.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "Server does not support shareable ports. Shared ports found in: {}",
            listings.join("; ")
        )))
    }
}

fn shared_keys<P>(
    ports: &std::collections::BTreeMap<u32, P>,
    shareable: impl Fn(&P) -> Option<bool>,
) -> Vec<u32> {
    ports
        .iter()
        .filter(|(_, port)| shareable(port) == Some(true))
        .map(|(&idx, _)| idx)
        .collect()
}

/// Servers without the double-frequency slots only take integer hertz. An
/// element or mixer reference that would lose precision is either rejected
/// or truncated with a warning, per the policy.
fn check_frequency_precision(
    config: &Config,
    server_caps: &ServerCapabilities,
    policy: FrequencyPolicy,
) -> ConfigResult<()> {
    if server_caps.supports_double_frequency() {
        return Ok(());
    }
    let Some(elements) = config.elements() else {
        return Ok(());
    };
    for (name, element) in elements {
        if let (Some(magnitude), Some(double)) = (
            element.intermediate_frequency,
            element.intermediate_frequency_double,
        ) {
            handle_precision_loss(name, "intermediate_frequency", magnitude as i64, double, policy)?;
        }
        if let Some(ElementInput::MixInputs(mix)) = &element.inputs {
            if mix.lo_frequency_double != 0.0 {
                handle_precision_loss(
                    name,
                    "lo_frequency",
                    mix.lo_frequency,
                    mix.lo_frequency_double,
                    policy,
                )?;
            }
        }
    }
    Ok(())
}

fn handle_precision_loss(
    element: &str,
    field: &str,
    integer: i64,
    double: f64,
    policy: FrequencyPolicy,
) -> ConfigResult<()> {
    if double == integer as f64 {
        return Ok(());
    }
    match policy {
        FrequencyPolicy::Strict => Err(ConfigError::Validation(format!(
            "Server does not support float frequency. Element: {element}: {field}={double} \
             requires a server with fractional frequency support"
        ))),
        FrequencyPolicy::TruncateWithWarning => {
            tracing::warn!(
                "Server does not support float frequency. Element: {element}: {field}={double} \
                 will be casted to {integer}"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Converter, Mode};
    use crate::document::ConfigDoc;
    use grani_caps::Capability;
    use serde_json::json;

    fn convert_with(caps: &ServerCapabilities, value: serde_json::Value) -> Config {
        let doc: ConfigDoc = serde_json::from_value(value).unwrap();
        Converter::new(caps, Mode::Init, false).convert(&doc).unwrap()
    }

    fn all_but(excluded: &[Capability]) -> ServerCapabilities {
        ServerCapabilities::from_capabilities(
            caps::gen2().into_iter().filter(|c| !excluded.contains(c)),
        )
    }

    #[test]
    fn test_inverted_digital_output_listing() {
        let server = all_but(&[caps::INVERTED_DIGITAL_OUTPUT]);
        let config = convert_with(
            &server,
            json!({
                "controllers": {"con1": {
                    "digital_outputs": {"3": {"inverted": true}},
                }},
            }),
        );
        let err =
            validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("controller: con1, fem: 1, port: 3"));
    }

    #[test]
    fn test_multiple_inputs_gated() {
        let server = all_but(&[caps::MULTIPLE_INPUTS_FOR_ELEMENT]);
        let config = convert_with(
            &server,
            json!({
                "elements": {"qubit": {
                    "multipleInputs": {"inputs": {"a": ["con1", 1]}},
                }},
            }),
        );
        let err =
            validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).unwrap_err();
        assert!(err
            .to_string()
            .contains("Server does not support multiple inputs for elements used in 'qubit'"));
    }

    #[test]
    fn test_analog_delay_gated() {
        let server = all_but(&[caps::ANALOG_DELAY]);
        let config = convert_with(
            &server,
            json!({
                "controllers": {"con1": {"analog_outputs": {"1": {"delay": 12}}}},
            }),
        );
        let err =
            validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("analog delay"));

        // Zero delay is always fine.
        let config = convert_with(
            &server,
            json!({
                "controllers": {"con1": {"analog_outputs": {"1": {}}}},
            }),
        );
        assert!(validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).is_ok());
    }

    #[test]
    fn test_shareable_ports_grouped_listing() {
        let server = all_but(&[caps::SHARED_PORTS]);
        let config = convert_with(
            &server,
            json!({
                "controllers": {"con1": {
                    "analog_outputs": {"1": {"shareable": true}, "2": {}},
                    "digital_outputs": {"5": {"shareable": true}},
                }},
            }),
        );
        let err =
            validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Server does not support shareable ports."));
        assert!(message.contains("controller con1"));
        assert!(message.contains("analog output 1"));
        assert!(message.contains("digital output 5"));
        assert!(!message.contains("analog output 2"));
    }

    #[test]
    fn test_frequency_precision_policy() {
        let server = all_but(&[caps::DOUBLE_FREQUENCY]);
        // Fake a payload with a fractional frequency: build against a
        // double-capable server, then validate against one without it.
        let full = ServerCapabilities::from_capabilities(caps::gen2());
        let config = convert_with(
            &full,
            json!({
                "elements": {"qubit": {"intermediate_frequency": 50e6 + 0.5}},
            }),
        );
        let err =
            validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("does not support float frequency"));
        assert!(validate_config_capabilities(
            &config,
            &server,
            FrequencyPolicy::TruncateWithWarning
        )
        .is_ok());
    }

    #[test]
    fn test_clean_config_passes_all_rules() {
        let server = ServerCapabilities::default();
        let config = convert_with(
            &server,
            json!({
                "controllers": {"con1": {"analog_outputs": {"1": {"offset": 0.1}}}},
                "elements": {"qubit": {"singleInput": {"port": ["con1", 1]}}},
            }),
        );
        assert!(validate_config_capabilities(&config, &server, FrequencyPolicy::Strict).is_ok());
    }
}
