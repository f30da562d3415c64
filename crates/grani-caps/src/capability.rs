//! The capability catalog.
//!
//! Every feature the gateway may report is declared here once, together with
//! the server version that introduced it (when it is version-gated at all).
//! The catalog is closed: names the server reports that are not declared
//! here are ignored by [`crate::ServerCapabilities::from_names`].

/// FEM slot a baseline controller occupies when it is addressed through the
/// chassis-style device map.
pub const BASELINE_FEM_IDX: u32 = 1;

/// A named, version-gated gateway feature.
///
/// Pure value type; equality and hashing cover all three fields, so two
/// declarations with the same name but different versions are distinct
/// capabilities (in practice each name is declared exactly once, in
/// [`caps`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capability {
    server_name: &'static str,
    from_version: Option<&'static str>,
    display_name: Option<&'static str>,
}

impl Capability {
    const fn new(server_name: &'static str) -> Self {
        Self {
            server_name,
            from_version: None,
            display_name: None,
        }
    }

    const fn since(server_name: &'static str, from_version: &'static str) -> Self {
        Self {
            server_name,
            from_version: Some(from_version),
            display_name: None,
        }
    }

    const fn since_named(
        server_name: &'static str,
        from_version: &'static str,
        display_name: &'static str,
    ) -> Self {
        Self {
            server_name,
            from_version: Some(from_version),
            display_name: Some(display_name),
        }
    }

    /// The name the gateway uses when reporting this capability.
    pub fn server_name(&self) -> &'static str {
        self.server_name
    }

    /// First server version that supports this capability, if version-gated.
    pub fn from_version(&self) -> Option<&'static str> {
        self.from_version
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> String {
        match self.display_name {
            Some(name) => name.to_owned(),
            None => self
                .server_name
                .trim_start_matches("gw.")
                .replace('_', " "),
        }
    }

    /// The message reported when this capability is required but the
    /// connected server does not support it.
    pub fn unsupported_message(&self) -> String {
        let name = self.display_name();
        match self.from_version {
            Some(version) => {
                format!("{name} is supported from server version {version} and above.")
            }
            None => format!("{name} is not supported in the installed server version."),
        }
    }
}

/// The fixed capability catalog.
pub mod caps {
    use super::Capability;

    pub const JOB_STREAMING_STATE: Capability = Capability::new("gw.job_streaming_state");
    pub const MULTIPLE_INPUTS_FOR_ELEMENT: Capability =
        Capability::new("gw.multiple_inputs_for_element");
    pub const ANALOG_DELAY: Capability = Capability::new("gw.analog_delay");
    pub const SHARED_OSCILLATORS: Capability = Capability::new("gw.shared_oscillators");
    pub const CROSSTALK: Capability = Capability::new("gw.crosstalk");
    pub const SHARED_PORTS: Capability = Capability::new("gw.shared_ports");
    pub const INPUT_STREAM: Capability = Capability::new("gw.input_stream");
    pub const NEW_GRPC_STRUCTURE: Capability = Capability::new("gw.new_grpc_structure");
    pub const DOUBLE_FREQUENCY: Capability = Capability::new("gw.double_frequency");
    pub const COMMAND_TIMESTAMPS: Capability =
        Capability::since_named("gw.play_tag", "2.2", "timestamping commands");
    pub const INVERTED_DIGITAL_OUTPUT: Capability = Capability::new("gw.inverted_digital_output");
    pub const STICKY_ELEMENTS: Capability = Capability::new("gw.sticky_elements");
    pub const TRANSVERTER_RESET: Capability = Capability::new("gw.transverter_reset");
    pub const FAST_FRAME_ROTATION: Capability = Capability::since("gw.fast_frame_rotation", "2.2");
    pub const KEEPING_DC_OFFSETS: Capability = Capability::new("gw.keep_dc_offsets_when_closing");
    pub const TRANSVERTER_MANAGEMENT: Capability =
        Capability::since("support_transverter_mgmt", "2.5");

    // Generation 3
    pub const GEN3: Capability = Capability::since("__gen3", "3.0");
    pub const FEMS_RETURN_1_BASED: Capability = Capability::since("1_based_fem", "3.0");
    pub const WAVEFORM_REPORT_ENDPOINT: Capability =
        Capability::since("gw.waveform_report_endpoint", "3.3");
    pub const EXPONENTIAL_IIR_FILTER: Capability =
        Capability::since("gw.exponential_iir_filter", "3.3");
    pub const BROADCAST: Capability = Capability::since("gw.broadcast", "3.3");
    pub const CHUNK_STREAMING: Capability = Capability::since("gw.chunk_streaming", "3.3");
    pub const FAST_FRAME_ROTATION_DEPRECATED: Capability =
        Capability::since("gw.fast_frame_rotation_deprecated", "3.3");
    pub const CONFIG_V2: Capability = Capability::since("gw.config_v2", "3.5");
    pub const WAVEFORM_ARRAY: Capability = Capability::since("gw.waveform_array", "3.5");
    pub const EXPONENTIAL_DC_GAIN_FILTER: Capability =
        Capability::since("gw.exponential_dc_gain_filter", "3.5");
    pub const MULTIPLE_STREAMS_FETCHING: Capability =
        Capability::since("gw.multiple_streams_fetching", "3.5");
    pub const EXTERNAL_STREAM: Capability =
        Capability::since_named("gw.external_stream", "3.5", "declaring an external stream");

    /// Every capability in the catalog.
    pub fn all() -> &'static [Capability] {
        &[
            JOB_STREAMING_STATE,
            MULTIPLE_INPUTS_FOR_ELEMENT,
            ANALOG_DELAY,
            SHARED_OSCILLATORS,
            CROSSTALK,
            SHARED_PORTS,
            INPUT_STREAM,
            NEW_GRPC_STRUCTURE,
            DOUBLE_FREQUENCY,
            COMMAND_TIMESTAMPS,
            INVERTED_DIGITAL_OUTPUT,
            STICKY_ELEMENTS,
            TRANSVERTER_RESET,
            FAST_FRAME_ROTATION,
            KEEPING_DC_OFFSETS,
            TRANSVERTER_MANAGEMENT,
            GEN3,
            FEMS_RETURN_1_BASED,
            WAVEFORM_REPORT_ENDPOINT,
            EXPONENTIAL_IIR_FILTER,
            BROADCAST,
            CHUNK_STREAMING,
            FAST_FRAME_ROTATION_DEPRECATED,
            CONFIG_V2,
            WAVEFORM_ARRAY,
            EXPONENTIAL_DC_GAIN_FILTER,
            MULTIPLE_STREAMS_FETCHING,
            EXTERNAL_STREAM,
        ]
    }

    /// Catalog entries available below the given major-version threshold:
    /// everything that is not version-gated, plus everything introduced
    /// before `threshold`.
    ///
    /// Used to back-fill implied capabilities when a generation marker such
    /// as [`GEN3`] is present but the server did not enumerate the older
    /// entries it implies.
    pub fn tier_below(threshold: f32) -> Vec<Capability> {
        all()
            .iter()
            .copied()
            .filter(|cap| match cap.from_version() {
                None => true,
                Some(version) => version.parse::<f32>().is_ok_and(|v| v < threshold),
            })
            .collect()
    }

    /// The generation-2 tier: everything below 3.0.
    pub fn gen2() -> Vec<Capability> {
        tier_below(3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<_> = caps::all().iter().map(|c| c.server_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), caps::all().len());
    }

    #[test]
    fn test_display_name_strips_prefix() {
        assert_eq!(caps::DOUBLE_FREQUENCY.display_name(), "double frequency");
        assert_eq!(caps::COMMAND_TIMESTAMPS.display_name(), "timestamping commands");
    }

    #[test]
    fn test_unsupported_message_with_version() {
        assert_eq!(
            caps::WAVEFORM_ARRAY.unsupported_message(),
            "waveform array is supported from server version 3.5 and above."
        );
    }

    #[test]
    fn test_unsupported_message_without_version() {
        assert_eq!(
            caps::STICKY_ELEMENTS.unsupported_message(),
            "sticky elements is not supported in the installed server version."
        );
    }

    #[test]
    fn test_gen2_excludes_gen3_entries() {
        let gen2 = caps::gen2();
        assert!(gen2.contains(&caps::DOUBLE_FREQUENCY));
        assert!(gen2.contains(&caps::COMMAND_TIMESTAMPS));
        assert!(gen2.contains(&caps::TRANSVERTER_MANAGEMENT));
        assert!(!gen2.contains(&caps::GEN3));
        assert!(!gen2.contains(&caps::CONFIG_V2));
        assert!(!gen2.contains(&caps::EXPONENTIAL_IIR_FILTER));
    }
}
