//! Gateway capability negotiation.
//!
//! A connected gateway reports the set of named features it supports; this
//! crate turns that report into a queryable, immutable [`ServerCapabilities`]
//! value that the configuration translator consults for every version-gated
//! decision (wire shape, field encodings, feature gating).
//!
//! # Overview
//!
//! - [`Capability`] — a named, version-gated gateway feature.
//! - [`caps`] — the fixed catalog of known capabilities across the two
//!   gateway generations.
//! - [`ServerCapabilities`] — the per-connection set, built once at connect
//!   time and shared read-only afterwards.
//!
//! # Example
//!
//! ```
//! use grani_caps::{caps, ServerCapabilities};
//!
//! let server = ServerCapabilities::from_names(["gw.double_frequency"]);
//! assert!(server.supports(&caps::DOUBLE_FREQUENCY));
//! assert!(server.validate(&[caps::WAVEFORM_ARRAY]).is_err());
//! ```

pub mod capability;
pub mod error;
pub mod set;

pub use capability::{caps, Capability, BASELINE_FEM_IDX};
pub use error::CapabilityError;
pub use set::ServerCapabilities;
