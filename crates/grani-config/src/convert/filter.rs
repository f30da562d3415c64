//! Analog output filter conversion.
//!
//! Three exclusive shapes, selected by the server's capabilities:
//! feedforward + feedback taps on servers without the exponential IIR
//! form, feedforward + exponential + high_pass from 3.3, and additionally
//! exponential_dc_gain from 3.5.

use grani_caps::caps;
use grani_wire::{AnalogOutputPortFilter, ExponentialParameters, ValueContainer};

use crate::convert::context::Cx;
use crate::document::FilterDoc;
use crate::error::ConfigResult;

pub(crate) fn filter_to_wire(cx: &Cx<'_>, doc: &FilterDoc) -> ConfigResult<AnalogOutputPortFilter> {
    if cx.caps.supports(&caps::EXPONENTIAL_IIR_FILTER) {
        cx.reject_unsupported_keys(
            &[("feedback", doc.feedback.is_some())],
            &["high_pass", "exponential"],
            None,
            Some(&caps::EXPONENTIAL_IIR_FILTER),
        )?;
        modern_filter_to_wire(cx, doc)
    } else {
        cx.reject_unsupported_keys(
            &[
                ("exponential", doc.exponential.is_some()),
                ("high_pass", doc.high_pass.is_some()),
            ],
            &["feedback"],
            Some(&caps::EXPONENTIAL_IIR_FILTER),
            None,
        )?;
        Ok(AnalogOutputPortFilter {
            feedforward: doc.feedforward.clone().unwrap_or_default(),
            feedback: doc.feedback.clone().unwrap_or_default(),
            ..Default::default()
        })
    }
}

fn modern_filter_to_wire(cx: &Cx<'_>, doc: &FilterDoc) -> ConfigResult<AnalogOutputPortFilter> {
    let feedforward = cx.default_for(doc.feedforward.clone(), Vec::new());
    let exponential = cx.default_for(doc.exponential.clone(), Vec::new());
    let high_pass = cx.default_for(doc.high_pass, None);

    let mut item = AnalogOutputPortFilter::default();

    if let Some(taps) = feedforward {
        cx.set_versioned(&mut item.feedforward, &mut item.feedforward_v2, taps);
    }
    if let Some(terms) = exponential {
        let terms: Vec<ExponentialParameters> = terms
            .iter()
            .map(|&(amplitude, time_constant)| ExponentialParameters {
                amplitude,
                time_constant,
            })
            .collect();
        cx.set_versioned(&mut item.iir.exponential, &mut item.iir.exponential_v2, terms);
    }
    if let Some(value) = high_pass {
        // An explicit null is a meaningful write under the v2 shape.
        cx.set_versioned(&mut item.iir.high_pass, &mut item.iir.high_pass_v2, value);
    }

    if cx.caps.supports(&caps::EXPONENTIAL_DC_GAIN_FILTER) {
        let dc_gain = cx.default_for(doc.exponential_dc_gain, None);
        if let (Some(Some(hp)), None) = (high_pass, dc_gain.flatten()) {
            tracing::warn!(
                "setting `high_pass` to {hp} is equivalent to setting the `exponential_dc_gain` \
                 field to {hp}/0.5e9 and adding an exponential filter of (1-{hp}/0.5e9, {hp})"
            );
        }
        if let Some(value) = dc_gain {
            item.iir.exponential_dc_gain = Some(ValueContainer::new(value));
        }
    } else {
        cx.reject_unsupported_keys(
            &[("exponential_dc_gain", doc.exponential_dc_gain.is_some())],
            &["high_pass"],
            Some(&caps::EXPONENTIAL_DC_GAIN_FILTER),
            None,
        )?;
    }

    Ok(item)
}

pub(crate) fn filter_to_doc(cx: &Cx<'_>, wire: &AnalogOutputPortFilter) -> FilterDoc {
    if cx.caps.supports(&caps::EXPONENTIAL_IIR_FILTER) {
        let config_v2 = cx.caps.supports_config_v2();
        let exponential = if config_v2 {
            wire.iir
                .exponential_v2
                .as_ref()
                .map(|c| c.value.clone())
                .unwrap_or_default()
        } else {
            wire.iir.exponential.clone()
        };
        let feedforward = if config_v2 {
            wire.feedforward_v2
                .as_ref()
                .map(|c| c.value.clone())
                .unwrap_or_default()
        } else {
            wire.feedforward.clone()
        };
        let high_pass = if config_v2 {
            wire.iir.high_pass_v2.as_ref().and_then(|c| c.value)
        } else {
            wire.iir.high_pass
        };
        let mut doc = FilterDoc {
            feedforward: Some(feedforward),
            exponential: Some(
                exponential
                    .iter()
                    .map(|term| (term.amplitude, term.time_constant))
                    .collect(),
            ),
            high_pass: Some(high_pass),
            ..Default::default()
        };
        if cx.caps.supports(&caps::EXPONENTIAL_DC_GAIN_FILTER) {
            doc.exponential_dc_gain =
                Some(wire.iir.exponential_dc_gain.as_ref().and_then(|c| c.value));
        }
        doc
    } else {
        FilterDoc {
            feedforward: Some(wire.feedforward.clone()),
            feedback: Some(wire.feedback.clone()),
            ..Default::default()
        }
    }
}
