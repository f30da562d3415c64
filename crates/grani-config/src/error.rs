//! Error taxonomy for configuration translation.

use grani_caps::CapabilityError;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A declared feature requires a capability the connected server does
    /// not report.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// A structural rule of the configuration was violated.
    #[error("{0}")]
    Validation(String),

    /// The loose document failed to deserialize; carries the path of the
    /// offending entry.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An element input is wired both explicitly and through a transverter
    /// connection.
    #[error("{0}")]
    InputConnectionAmbiguity(String),

    /// An element output is wired to two different ports.
    #[error("{0}")]
    OutputConnectionAmbiguity(String),

    /// A transverter connection is given both through the `connectivity`
    /// shorthand and through an explicit port.
    #[error(
        "the transverter connection is defined both through 'connectivity' and through an explicit I/Q or IF port"
    )]
    TransverterConnectionAmbiguity,

    #[error("{0}")]
    InvalidTransverterParameter(String),

    /// Transverter configuration is only accepted when opening a machine,
    /// never on update.
    #[error("transverters are not supported when updating an open machine")]
    TransverterUnsupportedOnUpdate,

    /// Once a transverter was configured at init, the logical configuration
    /// is frozen: updates could override the automatic wiring derived from
    /// the transverter topology.
    #[error(
        "since transverters were used in the initial configuration, no modifications to the \
         logical configuration are allowed; either avoid transverters or complete all logical \
         configuration when opening the machine"
    )]
    LockedByTransverter,

    /// Translating this wire entity back into a document is not available.
    #[error("converting {0} back to a document is not available")]
    UnsupportedDeconversion(&'static str),
}

/// Deserialization failure annotated with the document path that produced
/// it, e.g. `controllers.con1.fems.2`.
#[derive(Debug, Error)]
#[error("invalid configuration at '{path}': {message}")]
pub struct SchemaError {
    pub path: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
