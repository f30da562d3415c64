//! Configuration translation for the gateway client.
//!
//! Sits between the dictionaries users write and the wire payload the
//! gateway accepts. The pipeline is: parse the loose document
//! ([`schema::parse_document`]), convert it against the connected server's
//! capability set ([`convert::Converter`]), then run the whole-payload
//! capability rules ([`capability_rules::validate_config_capabilities`]).
//! Deconversion walks the same path backwards for payloads the gateway
//! reports.
//!
//! Everything is driven by an explicit [`grani_caps::ServerCapabilities`]
//! borrow; nothing here consults global state.

pub mod capability_rules;
pub mod convert;
pub mod document;
pub mod error;
pub mod fill_defaults;
pub mod schema;

pub use capability_rules::{validate_config_capabilities, FrequencyPolicy};
pub use convert::{Converter, Mode};
pub use document::ConfigDoc;
pub use error::{ConfigError, ConfigResult, SchemaError};
pub use fill_defaults::fill_defaults_in_config_v1;
pub use schema::{load_config, parse_document};
