//! Resource management module
//!
//! Provides the cube texture resource, its face/image types and the
//! resource tracker used for bulk teardown.

mod resource_manager;
pub mod cube_face;
pub mod cube_texture;

pub use resource_manager::{Resource, ResourceKey, ResourceManager, ResourceTracker};
pub use cube_face::{CubeFace, CubeImage, CubeFaceImages};
pub use cube_texture::{CubeTexture, CubeTextureConfig};
