//! The per-connection capability set.

use rustc_hash::FxHashSet;

use crate::capability::{caps, Capability, BASELINE_FEM_IDX};
use crate::error::{CapabilityError, CapabilityResult};

/// The set of capabilities supported by one connected server.
///
/// Built once at connection time from the names the server reports, then
/// treated as read-only for the lifetime of the connection. Safe to share
/// across threads; every conversion call borrows it immutably.
#[derive(Debug, Clone, Default)]
pub struct ServerCapabilities {
    supported: FxHashSet<Capability>,
}

impl ServerCapabilities {
    /// Build the set from the capability names the server reported.
    ///
    /// Names are intersected with the catalog; unknown names are ignored.
    /// If the generation-3 marker is present, the whole generation-2 tier
    /// is unioned in — some servers do not enumerate the legacy
    /// capabilities a newer generation implies.
    pub fn from_names<I, S>(reported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: FxHashSet<String> = reported
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .collect();

        let mut supported: FxHashSet<Capability> = caps::all()
            .iter()
            .copied()
            .filter(|cap| names.contains(cap.server_name()))
            .collect();

        if names.contains(caps::GEN3.server_name()) {
            supported.extend(caps::gen2());
        }

        Self { supported }
    }

    /// Build a set that supports the given capabilities directly.
    pub fn from_capabilities<I>(supported: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        Self {
            supported: supported.into_iter().collect(),
        }
    }

    /// Whether the server supports the given capability.
    pub fn supports(&self, capability: &Capability) -> bool {
        self.supported.contains(capability)
    }

    /// Shorthand for the most frequently consulted gates.
    pub fn supports_double_frequency(&self) -> bool {
        self.supports(&caps::DOUBLE_FREQUENCY)
    }

    pub fn supports_sticky_elements(&self) -> bool {
        self.supports(&caps::STICKY_ELEMENTS)
    }

    pub fn supports_config_v2(&self) -> bool {
        self.supports(&caps::CONFIG_V2)
    }

    /// FEM slot used when addressing a simulated device: generation-3
    /// servers address the baseline controller as FEM 1, older ones as 0.
    pub fn fem_number_in_simulator(&self) -> u32 {
        if self.supports(&caps::GEN3) {
            BASELINE_FEM_IDX
        } else {
            0
        }
    }

    /// Validate that every required capability is supported.
    ///
    /// On failure the error lists every unsupported capability's message,
    /// one per line. Requesting fast frame rotation against a server that
    /// flags it deprecated is not an error but emits a deprecation warning.
    pub fn validate(&self, required: &[Capability]) -> CapabilityResult<()> {
        if self.supports(&caps::FAST_FRAME_ROTATION_DEPRECATED)
            && required.contains(&caps::FAST_FRAME_ROTATION)
        {
            tracing::warn!(
                "fast_frame_rotation is deprecated as it is no longer faster than \
                 frame_rotation_2pi (and in fact, it is less efficient). It will be \
                 removed in future versions."
            );
        }

        let unsupported: Vec<String> = required
            .iter()
            .filter(|cap| !self.supports(cap))
            .map(Capability::unsupported_message)
            .collect();

        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(CapabilityError::Unsupported(unsupported.join("\nAlso: ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_intersects_catalog() {
        let set = ServerCapabilities::from_names(["gw.double_frequency", "not_a_real_capability"]);
        assert!(set.supports(&caps::DOUBLE_FREQUENCY));
        assert!(!set.supports(&caps::STICKY_ELEMENTS));
    }

    #[test]
    fn test_gen3_marker_backfills_gen2_tier() {
        let set = ServerCapabilities::from_names(["__gen3"]);
        assert!(set.supports(&caps::GEN3));
        // Implied even though the server never reported them.
        assert!(set.supports(&caps::DOUBLE_FREQUENCY));
        assert!(set.supports(&caps::STICKY_ELEMENTS));
        assert!(set.supports(&caps::COMMAND_TIMESTAMPS));
        // Gen-3 feature capabilities still need explicit reporting.
        assert!(!set.supports(&caps::CONFIG_V2));
        assert!(!set.supports(&caps::EXPONENTIAL_IIR_FILTER));
    }

    #[test]
    fn test_validate_ok() {
        let set = ServerCapabilities::from_capabilities([caps::WAVEFORM_ARRAY]);
        assert!(set.validate(&[caps::WAVEFORM_ARRAY]).is_ok());
    }

    #[test]
    fn test_validate_joins_messages() {
        let set = ServerCapabilities::from_names(Vec::<&str>::new());
        let err = set
            .validate(&[caps::WAVEFORM_ARRAY, caps::STICKY_ELEMENTS])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("waveform array is supported from server version 3.5"));
        assert!(message.contains("sticky elements is not supported"));
        assert!(message.contains("\nAlso: "));
    }

    #[test]
    fn test_fem_number_in_simulator() {
        let gen3 = ServerCapabilities::from_names(["__gen3"]);
        assert_eq!(gen3.fem_number_in_simulator(), 1);
        let gen2 = ServerCapabilities::from_names(["gw.double_frequency"]);
        assert_eq!(gen2.fem_number_in_simulator(), 0);
    }
}
