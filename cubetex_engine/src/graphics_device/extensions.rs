/// Extension-capability registry
///
/// Devices expose optional capabilities by name. A capability may carry
/// constants (e.g. the internal format of sRGB storage).

use rustc_hash::FxHashMap;
use crate::graphics_device::TextureFormat;

/// Name under which sRGB texture support is registered
pub const SRGB_EXTENSION: &str = "SRGB";

/// A supported device extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// sRGB-encoded texture storage
    Srgb {
        /// Internal format for 4-channel sRGB storage
        srgb_alpha: TextureFormat,
    },
    /// Capability with no associated constants
    Supported,
}

/// Capability lookup by name
pub trait ExtensionRegistry {
    /// Get an extension by name, None if the device does not support it
    fn get(&self, name: &str) -> Option<&Extension>;

    /// sRGB internal format, if the sRGB extension is available
    fn srgb_format(&self) -> Option<TextureFormat> {
        match self.get(SRGB_EXTENSION) {
            Some(Extension::Srgb { srgb_alpha }) => Some(*srgb_alpha),
            _ => None,
        }
    }
}

/// Default extension registry filled by the device backend at startup
#[derive(Debug, Clone, Default)]
pub struct Extensions {
    extensions: FxHashMap<String, Extension>,
}

impl Extensions {
    /// Create an empty registry (no optional capabilities)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension, replacing any previous entry with the same name
    pub fn register(&mut self, name: &str, extension: Extension) {
        self.extensions.insert(name.to_string(), extension);
    }

    /// Registry with the sRGB extension already registered
    pub fn with_srgb(srgb_alpha: TextureFormat) -> Self {
        let mut extensions = Self::new();
        extensions.register(SRGB_EXTENSION, Extension::Srgb { srgb_alpha });
        extensions
    }

    /// Returns true if an extension is registered under this name
    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if no extension is registered
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl ExtensionRegistry for Extensions {
    fn get(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(name)
    }
}

#[cfg(test)]
#[path = "extensions_tests.rs"]
mod tests;
