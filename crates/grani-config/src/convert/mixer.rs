//! Mixer calibration conversion.

use grani_wire::{CorrectionEntry, Matrix, MixerDec};

use crate::convert::context::Cx;
use crate::document::MixerCorrectionDoc;
use crate::error::ConfigResult;

pub(crate) fn mixer_to_wire(
    cx: &Cx<'_>,
    corrections: &[MixerCorrectionDoc],
) -> ConfigResult<MixerDec> {
    let mut mixer = MixerDec::default();
    for doc in corrections {
        mixer.correction.push(correction_to_wire(cx, doc)?);
    }
    Ok(mixer)
}

fn correction_to_wire(cx: &Cx<'_>, doc: &MixerCorrectionDoc) -> ConfigResult<CorrectionEntry> {
    let frequency = cx.default_for(doc.intermediate_frequency, 0.0);
    let lo_frequency = cx.default_for(doc.lo_frequency, 0.0);
    cx.require_fields(
        &[
            ("intermediate_frequency", frequency.is_some()),
            ("lo_frequency", lo_frequency.is_some()),
            ("correction", doc.correction.is_some()),
        ],
        "mixer correction entry",
    )?;
    let frequency = frequency.unwrap_or_default();
    let lo_frequency = lo_frequency.unwrap_or_default();

    let mut entry = CorrectionEntry {
        frequency: frequency.abs() as u64,
        frequency_negative: frequency < 0.0,
        // The LO keeps its sign; only the IF uses the magnitude split.
        lo_frequency: lo_frequency as i64,
        ..Default::default()
    };
    if cx.caps.supports_double_frequency() {
        entry.frequency_double = frequency.abs();
        entry.lo_frequency_double = lo_frequency;
    }
    if let Some((v00, v01, v10, v11)) = doc.correction {
        entry.correction = Some(Matrix::new(v00, v01, v10, v11));
    }
    Ok(entry)
}

pub(crate) fn mixer_to_doc(wire: &MixerDec) -> Vec<MixerCorrectionDoc> {
    wire.correction.iter().map(correction_to_doc).collect()
}

fn correction_to_doc(entry: &CorrectionEntry) -> MixerCorrectionDoc {
    let sign = if entry.frequency_negative { -1.0 } else { 1.0 };
    let frequency = if entry.frequency_double != 0.0 {
        entry.frequency_double
    } else {
        entry.frequency as f64
    };
    let lo_frequency = if entry.lo_frequency_double != 0.0 {
        entry.lo_frequency_double
    } else {
        entry.lo_frequency as f64
    };
    MixerCorrectionDoc {
        intermediate_frequency: Some(sign * frequency),
        lo_frequency: Some(lo_frequency),
        correction: entry
            .correction
            .map(|matrix| (matrix.v00, matrix.v01, matrix.v10, matrix.v11)),
    }
}
