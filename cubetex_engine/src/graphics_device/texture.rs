/// Texture formats and the decoded-image trait

use std::fmt::Debug;

/// Texture storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    /// Standard 4-channel, 8 bits per channel
    R8G8B8A8_UNORM,
    /// 4-channel, 8 bits per channel, sRGB-encoded color
    R8G8B8A8_SRGB,
    /// 4-channel, 32-bit float per channel
    R32G32B32A32_SFLOAT,
}

impl TextureFormat {
    /// Number of channels per pixel
    pub fn component_count(&self) -> usize {
        4
    }

    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormat::R8G8B8A8_UNORM | TextureFormat::R8G8B8A8_SRGB => 4,
            TextureFormat::R32G32B32A32_SFLOAT => 16,
        }
    }

    /// Returns true if stored values are gamma-encoded
    pub fn is_srgb(&self) -> bool {
        matches!(self, TextureFormat::R8G8B8A8_SRGB)
    }

    /// Returns true if channels are floating point
    pub fn is_float(&self) -> bool {
        matches!(self, TextureFormat::R32G32B32A32_SFLOAT)
    }
}

/// Decoded image with self-describing dimensions
///
/// Pixels are RGBA, 8 bits per channel, rows tightly packed from the top.
pub trait DecodedImage: Debug + Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// RGBA8 pixel data (`width * height * 4` bytes)
    fn pixels(&self) -> &[u8];
}

impl DecodedImage for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn pixels(&self) -> &[u8] {
        self.as_raw()
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
