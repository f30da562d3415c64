//! Wire-message model for the gateway configuration protocol.
//!
//! These types mirror the gateway's configuration schema field-for-field.
//! The transport layer serializes them into the program-submission payload;
//! this crate only defines the shapes. Two conventions, both decided by the
//! connected server generation, run through the whole model:
//!
//! - **Oneofs are enums.** Every place the schema declares a set of
//!   mutually exclusive sub-messages (FEM variant, element input kind,
//!   waveform kind, config version) is a closed Rust enum, matched
//!   exhaustively by the converters.
//! - **Presence containers.** Fields that support partial updates under the
//!   v2 config shape carry a second `_v2` slot wrapped in
//!   [`ValueContainer`], so an update can distinguish "not touched" from
//!   "explicitly set to the default".

pub mod config;
pub mod container;
pub mod device;
pub mod element;
pub mod filter;
pub mod logical;
pub mod mixer;
pub mod ports;
pub mod transverter;

pub use config::{Config, ConfigV1, ConfigV2, ConfigVersion, ControllerSection, LogicalSection};
pub use container::ValueContainer;
pub use device::{
    AnalogInputPortDec, AnalogOutputPortDec, ControllerDec, DeviceDec, DigitalInputPolarity,
    DigitalInputPortDec, DigitalOutputPortDec, DownconverterConfigDec, FemDec,
    LfAnalogOutputPortDec, LfFemDec, LfOutputMode, LfSamplingRate, LfUpsamplingMode,
    MwAnalogInputPortDec, MwAnalogOutputPortDec, MwFemDec, UpconverterConfigDec, VoltageLevel,
};
pub use element::{
    DigitalInputPortReference, DigitalOutputPortReference, ElementDec, ElementInput,
    ElementOutput, ElementThread, HoldOffset, MicrowaveInputPortReference,
    MicrowaveOutputPortReference, MixInputs, MultipleInputs, MultipleOutputs, OscillatorChoice,
    OutputPulseParameters, Polarity, SingleInput, SingleInputCollection, Sticky,
};
pub use filter::{AnalogOutputPortFilter, ExponentialParameters, IirFilter};
pub use logical::{
    ArbitraryWaveformDec, ConstantWaveformDec, DigitalWaveformDec, DigitalWaveformSample,
    IntegrationWeightDec, IntegrationWeightSample, MixerRef, Oscillator, PulseDec, PulseOperation,
    WaveformArrayDec, WaveformDec, WaveformSamples,
};
pub use mixer::{CorrectionEntry, Matrix, MixerDec};
pub use ports::{AdcPortReference, DacPortReference, GeneralPortReference, PortReference};
pub use transverter::{
    DownconverterRfSource, IfMode, LoSourceInput, LoopbackInput, OutputSwitchState,
    SynthesizerOutputName, SynthesizerPort, TransverterConfig, TransverterIfOutputsConfig,
    TransverterLoopback, TransverterRfInputConfig, TransverterRfOutputConfig,
    TransverterSingleIfOutputConfig,
};
