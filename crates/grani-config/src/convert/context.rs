//! Shared conversion context and the versioned-field write helper.

use grani_caps::{Capability, ServerCapabilities};
use grani_wire::ValueContainer;

use crate::error::{ConfigError, ConfigResult};

/// Whether the document opens a machine or updates an open one.
///
/// In update mode against a v2-capable server, absent keys mean "leave the
/// stored value untouched"; everywhere else absent keys take their
/// documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Init,
    Update,
}

/// Conversion context threaded through every converter.
#[derive(Debug, Clone, Copy)]
pub struct Cx<'a> {
    pub caps: &'a ServerCapabilities,
    pub mode: Mode,
}

impl<'a> Cx<'a> {
    pub fn new(caps: &'a ServerCapabilities, mode: Mode) -> Self {
        Self { caps, mode }
    }

    pub fn init_mode(&self) -> bool {
        self.mode == Mode::Init
    }

    /// True when absent keys should be filled with their defaults. Only a
    /// v2 update leaves them absent.
    fn applies_defaults(&self) -> bool {
        self.init_mode() || !self.caps.supports_config_v2()
    }

    /// Mode-aware default application for a single optional field.
    pub fn default_for<T>(&self, value: Option<T>, default: T) -> Option<T> {
        match value {
            Some(v) => Some(v),
            None if self.applies_defaults() => Some(default),
            None => None,
        }
    }

    /// Writes `value` into the legacy slot or the v2 presence container,
    /// depending on which config shape the server speaks.
    pub fn set_versioned<T>(
        &self,
        legacy: &mut T,
        v2: &mut Option<ValueContainer<T>>,
        value: T,
    ) {
        if self.caps.supports_config_v2() {
            *v2 = Some(ValueContainer::new(value));
        } else {
            *legacy = value;
        }
    }

    /// Init mode requires certain keys; `present` pairs each required key
    /// name with whether it was given.
    pub fn require_fields(
        &self,
        present: &[(&str, bool)],
        parent_field: &str,
    ) -> ConfigResult<()> {
        for (field, is_present) in present {
            if !is_present {
                return Err(ConfigError::Validation(format!(
                    "{field} should be declared when initializing a {parent_field}"
                )));
            }
        }
        Ok(())
    }

    /// Rejects keys outside the window of server versions that understand
    /// them. Exactly one of `supported_from` / `supported_until` is given.
    pub fn reject_unsupported_keys(
        &self,
        used: &[(&str, bool)],
        supported_params: &[&str],
        supported_from: Option<&Capability>,
        supported_until: Option<&Capability>,
    ) -> ConfigResult<()> {
        let offending: Vec<&str> = used
            .iter()
            .filter(|(_, is_present)| *is_present)
            .map(|(name, _)| *name)
            .collect();
        if offending.is_empty() {
            return Ok(());
        }
        let window = match (supported_from, supported_until) {
            (Some(cap), _) => format!(
                "supported only from server version {} and later",
                cap.from_version().unwrap_or("unknown")
            ),
            (None, Some(cap)) => format!(
                "supported only until server version {}",
                cap.from_version().unwrap_or("unknown")
            ),
            (None, None) => unreachable!("a version bound is always provided"),
        };
        Err(ConfigError::Validation(format!(
            "The configuration keys {offending:?} are {window}. Use the keys {supported_params:?} instead."
        )))
    }
}
