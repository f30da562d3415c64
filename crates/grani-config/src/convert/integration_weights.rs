//! Integration weight conversion.
//!
//! The flat shorthand gives one value per 4 ns sample; it is quantized to
//! the hardware's 2^-15 resolution and run-length compressed into
//! `(value, duration)` entries before hitting the wire.

use grani_wire::{IntegrationWeightDec, IntegrationWeightSample};

use crate::document::{IntegrationWeightDoc, IwComponentDoc};

const WEIGHT_RESOLUTION: f64 = 32768.0;
const SAMPLE_DURATION_NS: u32 = 4;

pub(crate) fn integration_weight_to_wire(doc: &IntegrationWeightDoc) -> IntegrationWeightDec {
    IntegrationWeightDec {
        cosine: component_to_wire(&doc.cosine),
        sine: component_to_wire(&doc.sine),
    }
}

fn component_to_wire(component: &IwComponentDoc) -> Vec<IntegrationWeightSample> {
    match component {
        IwComponentDoc::Pairs(pairs) => pairs
            .iter()
            .map(|&(value, length)| IntegrationWeightSample {
                value,
                length: length as u32,
            })
            .collect(),
        // A two-element flat list is historically read as a single
        // (value, duration) pair, not as two samples.
        IwComponentDoc::Flat(samples) if samples.len() == 2 => vec![IntegrationWeightSample {
            value: samples[0],
            length: samples[1] as u32,
        }],
        IwComponentDoc::Flat(samples) => compress_samples(samples),
    }
}

fn quantize(value: f64) -> f64 {
    (value * WEIGHT_RESOLUTION).round() / WEIGHT_RESOLUTION
}

fn compress_samples(samples: &[f64]) -> Vec<IntegrationWeightSample> {
    let mut compressed: Vec<IntegrationWeightSample> = Vec::new();
    for &raw in samples {
        let value = quantize(raw);
        match compressed.last_mut() {
            Some(last) if last.value == value => last.length += SAMPLE_DURATION_NS,
            _ => compressed.push(IntegrationWeightSample {
                value,
                length: SAMPLE_DURATION_NS,
            }),
        }
    }
    compressed
}

pub(crate) fn integration_weight_to_doc(wire: &IntegrationWeightDec) -> IntegrationWeightDoc {
    IntegrationWeightDoc {
        cosine: component_to_doc(&wire.cosine),
        sine: component_to_doc(&wire.sine),
    }
}

fn component_to_doc(samples: &[IntegrationWeightSample]) -> IwComponentDoc {
    IwComponentDoc::Pairs(
        samples
            .iter()
            .map(|sample| (sample.value, f64::from(sample.length)))
            .collect(),
    )
}
