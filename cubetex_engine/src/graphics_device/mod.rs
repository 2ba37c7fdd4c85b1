/// Graphics device module - device context trait, texture formats and extensions

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod extensions;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use extensions::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
