/*!
# Cubetex Engine

Cube-map texture resources on top of an injected graphics device.

The crate is backend-agnostic: the device context, the extension registry and
the resource tracker are traits, passed explicitly to the resources that use
them, so everything runs against a recording mock in tests.

## Architecture

- **GraphicsDevice**: Device context trait (texture objects, sampler state, face uploads)
- **ExtensionRegistry**: Optional capability lookup (e.g. "SRGB")
- **CubeTexture**: Six-face texture with optional precomputed mip chain
- **ResourceManager**: Weak registry of live resources for bulk teardown
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod resource;

// Main cubetex namespace module
pub mod cubetex {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device sub-module
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
