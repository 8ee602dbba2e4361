//! Conversion run configuration

use crate::codec::PathCodec;
use crate::model::ReservedNames;

/// Configuration for one conversion run.
///
/// Debug and statistics toggles live here as explicit fields rather than
/// process-wide flags; the core never reads global state.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Substring removed from every decoded path (all occurrences)
    pub root_path_strip: Option<String>,

    /// String prepended to every decoded path after stripping
    pub path_prefix: String,

    /// Separator for decoded paths; defaults to the OS separator
    pub custom_separator: Option<String>,

    /// Name output files `"{folder} {playlist}"` instead of the bare name
    pub full_folder_names: bool,

    /// Re-root decoded paths at the home marker on single-rooted platforms
    pub platform_normalization: bool,

    /// Reserved folder/playlist names of the collection format
    pub reserved: ReservedNames,

    /// Verbose diagnostics for this run
    pub debug: bool,

    /// Collect file-extension statistics for this run
    pub stats: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self {
            root_path_strip: None,
            path_prefix: String::new(),
            custom_separator: None,
            full_folder_names: false,
            platform_normalization: false,
            reserved: ReservedNames::traktor(),
            debug: false,
            stats: false,
        }
    }

    /// Set the substring to strip from decoded paths
    pub fn with_root_path_strip(mut self, root: impl Into<String>) -> Self {
        let root = root.into();
        self.root_path_strip = (!root.is_empty()).then_some(root);
        self
    }

    /// Set the prefix prepended to decoded paths
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Override the OS-default path separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.custom_separator = Some(separator.into());
        self
    }

    /// Qualify output names with the containing folder
    pub fn with_full_folder_names(mut self, enabled: bool) -> Self {
        self.full_folder_names = enabled;
        self
    }

    /// Enable home-marker re-rooting of decoded paths
    pub fn with_platform_normalization(mut self, enabled: bool) -> Self {
        self.platform_normalization = enabled;
        self
    }

    /// Replace the reserved-name denylist
    pub fn with_reserved(mut self, reserved: ReservedNames) -> Self {
        self.reserved = reserved;
        self
    }

    /// Set the run's debug and statistics toggles
    pub fn with_run_flags(mut self, debug: bool, stats: bool) -> Self {
        self.debug = debug;
        self.stats = stats;
        self
    }

    /// Path codec configured from these options.
    pub fn codec(&self) -> PathCodec {
        PathCodec::new(
            self.custom_separator.clone(),
            self.root_path_strip.clone(),
            self.path_prefix.clone(),
            self.platform_normalization,
        )
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}
