/// Cube faces and per-face image sources.
///
/// A cube texture is addressed by six named faces. Each name maps to a fixed
/// cube-map target:
///
/// | face   | target |
/// |--------|--------|
/// | right  | +X     |
/// | left   | -X     |
/// | top    | +Y     |
/// | bottom | -Y     |
/// | front  | +Z     |
/// | back   | -Z     |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_err;
use crate::graphics_device::{CubeMapFace, DecodedImage, TextureFormat};

// ===== CUBE FACE =====

/// Face identifier of a cube texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubeFace {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl CubeFace {
    /// All faces, in upload order
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Front,
        CubeFace::Back,
    ];

    /// Identifier string ("right", "left", ...)
    pub fn name(&self) -> &'static str {
        match self {
            CubeFace::Right => "right",
            CubeFace::Left => "left",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
            CubeFace::Front => "front",
            CubeFace::Back => "back",
        }
    }

    /// Cube-map target this face uploads to
    pub fn target(&self) -> CubeMapFace {
        match self {
            CubeFace::Right => CubeMapFace::PositiveX,
            CubeFace::Left => CubeMapFace::NegativeX,
            CubeFace::Top => CubeMapFace::PositiveY,
            CubeFace::Bottom => CubeMapFace::NegativeY,
            CubeFace::Front => CubeMapFace::PositiveZ,
            CubeFace::Back => CubeMapFace::NegativeZ,
        }
    }

    /// Outward unit axis of the face
    pub fn direction(&self) -> Vec3 {
        match self {
            CubeFace::Right => Vec3::X,
            CubeFace::Left => Vec3::NEG_X,
            CubeFace::Top => Vec3::Y,
            CubeFace::Bottom => Vec3::NEG_Y,
            CubeFace::Front => Vec3::Z,
            CubeFace::Back => Vec3::NEG_Z,
        }
    }

    /// Face sampled by a direction vector (dominant axis wins, ties favor X then Y)
    ///
    /// Returns None for the zero vector or non-finite input.
    pub fn from_direction(direction: Vec3) -> Option<CubeFace> {
        if !direction.is_finite() || direction == Vec3::ZERO {
            return None;
        }
        let abs = direction.abs();
        let face = if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x >= 0.0 { CubeFace::Right } else { CubeFace::Left }
        } else if abs.y >= abs.z {
            if direction.y >= 0.0 { CubeFace::Top } else { CubeFace::Bottom }
        } else if direction.z >= 0.0 {
            CubeFace::Front
        } else {
            CubeFace::Back
        };
        Some(face)
    }
}

impl fmt::Display for CubeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CubeFace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CubeFace::ALL
            .into_iter()
            .find(|face| face.name() == s)
            .ok_or_else(|| engine_err!(@ContractViolation, "cubetex::CubeFace",
                "Unknown cube face identifier '{}'", s))
    }
}

// ===== CUBE IMAGE =====

/// Image source of one face
#[derive(Debug, Clone)]
pub enum CubeImage {
    /// Raw RGBA pixels, 8 bits per channel (dimensions from the config)
    Bytes(Vec<u8>),
    /// Raw RGBA pixels, 32-bit float per channel (dimensions from the config)
    Floats(Vec<f32>),
    /// Decoded image with its own dimensions
    Decoded(Arc<dyn DecodedImage>),
}

impl CubeImage {
    /// Wrap a decoded image
    pub fn decoded<I: DecodedImage + 'static>(image: I) -> Self {
        CubeImage::Decoded(Arc::new(image))
    }

    /// Decode an encoded image (PNG) into RGBA8
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| engine_err!(@InvalidResource, "cubetex::CubeImage",
                "Failed to decode face image: {}", e))?;
        Ok(Self::decoded(image.to_rgba8()))
    }

    /// Returns true for raw pixel buffers (need explicit dimensions)
    pub fn is_raw(&self) -> bool {
        !matches!(self, CubeImage::Decoded(_))
    }

    /// Number of channel values in a raw buffer, None for decoded images
    pub fn raw_len(&self) -> Option<usize> {
        match self {
            CubeImage::Bytes(data) => Some(data.len()),
            CubeImage::Floats(data) => Some(data.len()),
            CubeImage::Decoded(_) => None,
        }
    }

    /// Upload format of a raw buffer, None for decoded images
    pub fn raw_format(&self) -> Option<TextureFormat> {
        match self {
            CubeImage::Bytes(_) => Some(TextureFormat::R8G8B8A8_UNORM),
            CubeImage::Floats(_) => Some(TextureFormat::R32G32B32A32_SFLOAT),
            CubeImage::Decoded(_) => None,
        }
    }

    /// Short name of the representation
    pub fn kind(&self) -> &'static str {
        match self {
            CubeImage::Bytes(_) => "u8 pixels",
            CubeImage::Floats(_) => "f32 pixels",
            CubeImage::Decoded(_) => "decoded image",
        }
    }
}

// ===== CUBE FACE IMAGES =====

/// Mapping from face to image source (one mip level)
#[derive(Debug, Clone, Default)]
pub struct CubeFaceImages {
    images: FxHashMap<CubeFace, CubeImage>,
}

impl CubeFaceImages {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a complete mapping by calling `f` once per face, in upload order
    pub fn from_fn<F: FnMut(CubeFace) -> CubeImage>(mut f: F) -> Self {
        CubeFace::ALL.into_iter().map(|face| (face, f(face))).collect()
    }

    /// Set the image of a face, returns the previous one
    pub fn insert(&mut self, face: CubeFace, image: CubeImage) -> Option<CubeImage> {
        self.images.insert(face, image)
    }

    /// Builder form of `insert`
    pub fn with(mut self, face: CubeFace, image: CubeImage) -> Self {
        self.images.insert(face, image);
        self
    }

    /// Remove the image of a face
    pub fn remove(&mut self, face: CubeFace) -> Option<CubeImage> {
        self.images.remove(&face)
    }

    /// Image of a face
    pub fn get(&self, face: CubeFace) -> Option<&CubeImage> {
        self.images.get(&face)
    }

    /// Number of faces with an image
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if no face has an image
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Faces without an image, in upload order
    pub fn missing_faces(&self) -> Vec<CubeFace> {
        CubeFace::ALL
            .into_iter()
            .filter(|face| !self.images.contains_key(face))
            .collect()
    }

    /// Returns true if all six faces have an image
    pub fn is_complete(&self) -> bool {
        self.images.len() == CubeFace::ALL.len()
    }

    /// Present faces and images, in upload order
    pub fn iter(&self) -> impl Iterator<Item = (CubeFace, &CubeImage)> {
        CubeFace::ALL
            .into_iter()
            .filter_map(move |face| self.images.get(&face).map(|image| (face, image)))
    }
}

impl FromIterator<(CubeFace, CubeImage)> for CubeFaceImages {
    fn from_iter<T: IntoIterator<Item = (CubeFace, CubeImage)>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "cube_face_tests.rs"]
mod tests;
