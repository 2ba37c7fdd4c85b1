/// GraphicsDevice trait - immediate-mode device context
///
/// The device is shared process-wide as `Arc<Mutex<dyn GraphicsDevice>>`.
/// Binding state lives on the device, so a caller holds the lock for the whole
/// bind/configure/upload sequence of one texture.

use std::num::NonZeroU32;
use crate::error::Result;
use crate::graphics_device::{TextureFormat, DecodedImage};

// ===== HANDLES =====

/// Native texture object name (never zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(NonZeroU32);

impl TextureHandle {
    /// Wrap a raw native name, returns None for the null name (0)
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw native name
    pub fn raw(&self) -> u32 {
        self.0.get()
    }
}

// ===== CUBE MAP TARGETS =====

/// Upload target of one cube-map face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeMapFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

// ===== SAMPLER STATE =====

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    /// Linear within a level, linear between mip levels (minification only)
    LinearMipmapLinear,
}

impl TextureFilter {
    /// Returns true if sampling reads from more than the base level
    pub fn uses_mipmaps(&self) -> bool {
        matches!(self, TextureFilter::LinearMipmapLinear)
    }
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Sampler parameter applied to the bound cube map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureParameter {
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
    WrapS(TextureWrap),
    WrapT(TextureWrap),
}

// ===== IMAGE UPLOAD =====

/// Source of one 2D image upload
#[derive(Debug, Clone, Copy)]
pub enum ImageUpload<'a> {
    /// Tightly packed pixel rows with explicit dimensions
    Pixels {
        format: TextureFormat,
        width: u32,
        height: u32,
        data: &'a [u8],
    },
    /// Decoded image, dimensions taken from the image itself
    Image {
        format: TextureFormat,
        image: &'a dyn DecodedImage,
    },
}

impl ImageUpload<'_> {
    /// Storage format of the upload
    pub fn format(&self) -> TextureFormat {
        match self {
            ImageUpload::Pixels { format, .. } | ImageUpload::Image { format, .. } => *format,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        match self {
            ImageUpload::Pixels { width, .. } => *width,
            ImageUpload::Image { image, .. } => image.width(),
        }
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        match self {
            ImageUpload::Pixels { height, .. } => *height,
            ImageUpload::Image { image, .. } => image.height(),
        }
    }
}

// ===== GRAPHICS DEVICE TRAIT =====

/// Device context trait
///
/// Implemented by backend-specific devices (OpenGL, WebGL, test mocks).
/// Only the cube-map subset needed by texture resources is exposed.
pub trait GraphicsDevice: Send + Sync {
    /// Allocate a native texture object
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if the device cannot create the object.
    fn create_texture(&mut self) -> Result<TextureHandle>;

    /// Release a native texture object
    fn delete_texture(&mut self, handle: TextureHandle);

    /// Select the active texture unit
    fn active_texture(&mut self, unit: u32);

    /// Bind a texture as the active cube map (None unbinds)
    fn bind_cube_map(&mut self, handle: Option<TextureHandle>);

    /// Set a sampler parameter on the bound cube map
    fn set_cube_map_parameter(&mut self, parameter: TextureParameter) -> Result<()>;

    /// Set whether rows are flipped vertically by subsequent uploads
    fn set_unpack_flip_y(&mut self, flip: bool);

    /// Upload one face image of the bound cube map at a mip level
    ///
    /// # Arguments
    ///
    /// * `face` - Cube-map face target
    /// * `level` - Mip level (0 = base)
    /// * `upload` - Pixel source and storage format
    fn upload_cube_face(&mut self, face: CubeMapFace, level: u32, upload: ImageUpload<'_>) -> Result<()>;
}
