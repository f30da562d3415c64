//! Document-to-wire conversion.

mod context;
mod device;
mod element;
mod filter;
mod integration_weights;
mod main;
mod mixer;
mod oscillator;
mod pulse;
mod transverter;
mod waveform;

pub use context::{Cx, Mode};
pub use main::Converter;
