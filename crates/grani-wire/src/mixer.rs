//! IQ mixer calibration wire declarations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MixerDec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correction: Vec<CorrectionEntry>,
}

/// One correction matrix, keyed by the (IF, LO) pair it calibrates.
///
/// The intermediate frequency is split into an unsigned magnitude plus a
/// sign flag; the LO is a plain signed integer. Each has a parallel
/// `_double` slot carrying the sub-hertz part for servers that accept
/// fractional frequencies. A zero double means "integer only".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub frequency_negative: bool,
    #[serde(default)]
    pub frequency_double: f64,
    #[serde(default)]
    pub lo_frequency: i64,
    #[serde(default)]
    pub lo_frequency_double: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<Matrix>,
}

/// 2x2 correction matrix, row major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub v00: f64,
    pub v01: f64,
    pub v10: f64,
    pub v11: f64,
}

impl Matrix {
    pub fn new(v00: f64, v01: f64, v10: f64, v11: f64) -> Self {
        Self { v00, v01, v10, v11 }
    }
}
