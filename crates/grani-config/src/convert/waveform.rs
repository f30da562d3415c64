//! Waveform conversion.

use grani_caps::caps;
use grani_wire::{
    ArbitraryWaveformDec, ConstantWaveformDec, WaveformArrayDec, WaveformDec, WaveformSamples,
};

use crate::convert::context::Cx;
use crate::document::{ArbitraryWaveformDoc, WaveformDoc};
use crate::error::{ConfigError, ConfigResult};

const DEFAULT_MAX_ALLOWED_ERROR: f64 = 1e-4;

pub(crate) fn waveform_to_wire(cx: &Cx<'_>, doc: &WaveformDoc) -> ConfigResult<WaveformDec> {
    match doc {
        WaveformDoc::Constant(constant) => Ok(WaveformDec::Constant(ConstantWaveformDec {
            sample: constant.sample,
        })),
        WaveformDoc::Arbitrary(arbitrary) => arbitrary_to_wire(arbitrary),
        WaveformDoc::Array(array) => {
            cx.caps.validate(&[caps::WAVEFORM_ARRAY])?;
            Ok(WaveformDec::Array(WaveformArrayDec {
                samples_array: array
                    .samples_array
                    .iter()
                    .map(|samples| WaveformSamples {
                        samples: samples.clone(),
                    })
                    .collect(),
            }))
        }
    }
}

fn arbitrary_to_wire(doc: &ArbitraryWaveformDoc) -> ConfigResult<WaveformDec> {
    let is_overridable = doc.is_overridable.unwrap_or(false);
    if is_overridable && doc.max_allowed_error.is_some() {
        return Err(ConfigError::Validation(
            "Overridable waveforms cannot have a maximum allowed error".to_string(),
        ));
    }
    if is_overridable && doc.sampling_rate.is_some() {
        return Err(ConfigError::Validation(
            "Overridable waveforms cannot have a sampling rate".to_string(),
        ));
    }
    if doc.max_allowed_error.is_some() && doc.sampling_rate.is_some() {
        return Err(ConfigError::Validation(
            "Cannot use both 'max_allowed_error' and 'sampling_rate'".to_string(),
        ));
    }

    let max_allowed_error = match (doc.max_allowed_error, doc.sampling_rate, is_overridable) {
        (Some(error), _, _) => Some(error),
        (None, None, false) => Some(DEFAULT_MAX_ALLOWED_ERROR),
        _ => None,
    };

    Ok(WaveformDec::Arbitrary(ArbitraryWaveformDec {
        samples: doc.samples.clone(),
        is_overridable,
        max_allowed_error,
        sampling_rate: doc.sampling_rate,
    }))
}

pub(crate) fn waveform_to_doc(wire: &WaveformDec) -> WaveformDoc {
    match wire {
        WaveformDec::Constant(constant) => {
            WaveformDoc::Constant(crate::document::ConstantWaveformDoc {
                sample: constant.sample,
            })
        }
        WaveformDec::Arbitrary(arbitrary) => {
            WaveformDoc::Arbitrary(ArbitraryWaveformDoc {
                samples: arbitrary.samples.clone(),
                is_overridable: Some(arbitrary.is_overridable),
                max_allowed_error: arbitrary.max_allowed_error,
                sampling_rate: arbitrary.sampling_rate,
            })
        }
        WaveformDec::Array(array) => WaveformDoc::Array(crate::document::WaveformArrayDoc {
            samples_array: array
                .samples_array
                .iter()
                .map(|samples| samples.samples.clone())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::context::Mode;
    use grani_caps::ServerCapabilities;
    use serde_json::json;

    fn waveform(value: serde_json::Value) -> WaveformDoc {
        serde_json::from_value(value).unwrap()
    }

    fn cx_for(caps: &ServerCapabilities) -> Cx<'_> {
        Cx::new(caps, Mode::Init)
    }

    #[test]
    fn test_arbitrary_defaults_max_allowed_error() {
        let caps = ServerCapabilities::default();
        let doc = waveform(json!({"type": "arbitrary", "samples": [0.1, 0.2]}));
        let wire = waveform_to_wire(&cx_for(&caps), &doc).unwrap();
        match wire {
            WaveformDec::Arbitrary(arb) => {
                assert_eq!(arb.max_allowed_error, Some(1e-4));
                assert!(!arb.is_overridable);
            }
            other => panic!("unexpected waveform: {other:?}"),
        }
    }

    #[test]
    fn test_arbitrary_option_exclusivity() {
        let caps = ServerCapabilities::default();
        let cx = cx_for(&caps);

        let doc = waveform(json!({
            "type": "arbitrary",
            "samples": [0.1],
            "is_overridable": true,
            "max_allowed_error": 1e-3,
        }));
        assert!(waveform_to_wire(&cx, &doc).is_err());

        let doc = waveform(json!({
            "type": "arbitrary",
            "samples": [0.1],
            "max_allowed_error": 1e-3,
            "sampling_rate": 1e9,
        }));
        assert!(waveform_to_wire(&cx, &doc).is_err());

        let doc = waveform(json!({
            "type": "arbitrary",
            "samples": [0.1],
            "sampling_rate": 1e9,
        }));
        match waveform_to_wire(&cx, &doc).unwrap() {
            WaveformDec::Arbitrary(arb) => assert_eq!(arb.max_allowed_error, None),
            other => panic!("unexpected waveform: {other:?}"),
        }
    }

    #[test]
    fn test_array_requires_capability() {
        let doc = waveform(json!({
            "type": "array",
            "samples_array": [[0.1, 0.2], [0.3]],
        }));

        let none = ServerCapabilities::default();
        assert!(waveform_to_wire(&cx_for(&none), &doc).is_err());

        let caps = ServerCapabilities::from_capabilities([caps::WAVEFORM_ARRAY]);
        let wire = waveform_to_wire(&cx_for(&caps), &doc).unwrap();
        match wire {
            WaveformDec::Array(array) => {
                assert_eq!(array.samples_array.len(), 2);
                assert_eq!(array.samples_array[0].samples, vec![0.1, 0.2]);
            }
            other => panic!("unexpected waveform: {other:?}"),
        }
    }
}
