//! Shared oscillator conversion.

use grani_wire::{MixerRef, Oscillator};

use crate::convert::context::Cx;
use crate::document::OscillatorDoc;

pub(crate) fn oscillator_to_wire(cx: &Cx<'_>, doc: &OscillatorDoc) -> Oscillator {
    let mut oscillator = Oscillator::default();
    if let Some(frequency) = doc.intermediate_frequency {
        oscillator.intermediate_frequency = Some(frequency as i64);
        if cx.caps.supports_double_frequency() {
            oscillator.intermediate_frequency_double = Some(frequency);
        }
    }
    if let Some(mixer) = &doc.mixer {
        let lo_frequency = doc.lo_frequency.unwrap_or(0.0);
        let mut mixer_ref = MixerRef {
            mixer: mixer.clone(),
            lo_frequency: lo_frequency as i64,
            ..Default::default()
        };
        if cx.caps.supports_double_frequency() {
            mixer_ref.lo_frequency_double = lo_frequency;
        }
        oscillator.mixer = Some(mixer_ref);
    }
    oscillator
}

pub(crate) fn oscillator_to_doc(wire: &Oscillator) -> OscillatorDoc {
    let mut doc = OscillatorDoc::default();
    if let Some(frequency) = wire.intermediate_frequency {
        doc.intermediate_frequency = Some(match wire.intermediate_frequency_double {
            Some(double) if double != 0.0 => double,
            _ => frequency as f64,
        });
    }
    if let Some(mixer) = &wire.mixer {
        doc.mixer = Some(mixer.mixer.clone());
        doc.lo_frequency = Some(if mixer.lo_frequency_double != 0.0 {
            mixer.lo_frequency_double
        } else {
            mixer.lo_frequency as f64
        });
    }
    doc
}
