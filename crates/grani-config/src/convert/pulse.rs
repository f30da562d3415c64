//! Pulse and digital waveform conversion.

use grani_wire::{DigitalWaveformDec, DigitalWaveformSample, PulseDec, PulseOperation};

use crate::document::{DigitalWaveformDoc, PulseDoc};
use crate::error::{ConfigError, ConfigResult};

pub(crate) fn pulse_to_wire(doc: &PulseDoc) -> ConfigResult<PulseDec> {
    let operation = match doc.operation.as_deref() {
        Some("control") => Some(PulseOperation::Control),
        Some("measurement") => Some(PulseOperation::Measurement),
        Some(other) => {
            return Err(ConfigError::Validation(format!("Invalid operation {other}")))
        }
        None => None,
    };
    Ok(PulseDec {
        length: doc.length.map(|l| l as u32),
        operation,
        digital_marker: doc.digital_marker.clone(),
        integration_weights: doc.integration_weights.clone().unwrap_or_default(),
        waveforms: doc.waveforms.clone().unwrap_or_default(),
    })
}

pub(crate) fn pulse_to_doc(wire: &PulseDec) -> PulseDoc {
    PulseDoc {
        length: wire.length.map(u64::from),
        operation: wire.operation.map(|op| {
            match op {
                PulseOperation::Control => "control",
                PulseOperation::Measurement => "measurement",
            }
            .to_string()
        }),
        digital_marker: wire.digital_marker.clone(),
        integration_weights: (!wire.integration_weights.is_empty())
            .then(|| wire.integration_weights.clone()),
        waveforms: (!wire.waveforms.is_empty()).then(|| wire.waveforms.clone()),
    }
}

pub(crate) fn digital_waveform_to_wire(doc: &DigitalWaveformDoc) -> DigitalWaveformDec {
    DigitalWaveformDec {
        samples: doc
            .samples
            .iter()
            .map(|&(value, length)| DigitalWaveformSample {
                value: value != 0,
                length,
            })
            .collect(),
    }
}

pub(crate) fn digital_waveform_to_doc(wire: &DigitalWaveformDec) -> DigitalWaveformDoc {
    DigitalWaveformDoc {
        samples: wire
            .samples
            .iter()
            .map(|sample| (i64::from(sample.value), sample.length))
            .collect(),
    }
}
