/// Cube-map texture resource.
///
/// A `CubeTexture` owns one native cube-map texture object. Construction
/// validates the input, chooses the decoded-image storage format (sRGB when
/// requested and supported), configures sampler state, uploads the six base
/// faces and an optional precomputed mip chain. Disposal releases the native
/// object exactly once.

use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_err, engine_trace, engine_warn};
use crate::graphics_device::{
    GraphicsDevice, ExtensionRegistry, TextureHandle, TextureFormat,
    TextureParameter, TextureFilter, TextureWrap, ImageUpload,
};
use super::cube_face::{CubeFace, CubeImage, CubeFaceImages};
use super::resource_manager::{Resource, ResourceKey, ResourceTracker};

const SOURCE: &str = "cubetex::CubeTexture";

// ===== CONFIG =====

/// Construction input of a cube texture
#[derive(Debug, Clone)]
pub struct CubeTextureConfig {
    /// Base level image of each face
    pub images: CubeFaceImages,
    /// Precomputed mip chain, index 0 is mip level 1
    pub mip: Vec<CubeFaceImages>,
    /// Width of raw pixel buffers (unused for decoded images)
    pub width: Option<u32>,
    /// Height of raw pixel buffers (unused for decoded images)
    pub height: Option<u32>,
    /// Flip rows vertically during upload
    pub flip_y: bool,
    /// Store decoded images as sRGB when the device supports it
    pub srgb: bool,
}

impl Default for CubeTextureConfig {
    fn default() -> Self {
        Self {
            images: CubeFaceImages::new(),
            mip: Vec::new(),
            width: None,
            height: None,
            flip_y: false,
            srgb: true,
        }
    }
}

impl CubeTextureConfig {
    /// Config with the given base images and default options
    pub fn new(images: CubeFaceImages) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    /// Set raw buffer dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set vertical flip
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Request or refuse sRGB storage
    pub fn with_srgb(mut self, srgb: bool) -> Self {
        self.srgb = srgb;
        self
    }

    /// Append one mip level (six decoded images)
    pub fn with_mip_level(mut self, level: CubeFaceImages) -> Self {
        self.mip.push(level);
        self
    }

    /// Check the whole config before any device call
    ///
    /// Base faces must be square and share one size; mip chain index `i`
    /// must be `max(1, base >> (i + 1))` pixels on a side.
    /// Returns the raw buffer dimensions when at least one face is a raw buffer.
    pub fn validate(&self) -> Result<Option<(u32, u32)>> {
        let missing = self.images.missing_faces();
        if !missing.is_empty() {
            engine_bail!(@ContractViolation, SOURCE,
                "Missing base images for faces: {}", face_list(&missing));
        }

        let mut extent = None;
        if self.images.iter().any(|(_, image)| image.is_raw()) {
            let (width, height) = match (self.width, self.height) {
                (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
                (width, height) => engine_bail!(@ContractViolation, SOURCE,
                    "Raw pixel buffers need a non-zero width and height (got {:?} x {:?})",
                    width, height),
            };
            for (face, image) in self.images.iter() {
                if let (Some(len), Some(format)) = (image.raw_len(), image.raw_format()) {
                    let expected = width as usize * height as usize * format.component_count();
                    if len != expected {
                        engine_bail!(@ContractViolation, SOURCE,
                            "Face '{}' has {} channel values, expected {} for {}x{} RGBA ({})",
                            face, len, expected, width, height, image.kind());
                    }
                }
            }
            extent = Some((width, height));
        }

        let base_size = self.base_size(extent)?;

        for (index, level) in self.mip.iter().enumerate() {
            let level_index = mip_level(index)?;
            let missing = level.missing_faces();
            if !missing.is_empty() {
                engine_bail!(@ContractViolation, SOURCE,
                    "Mip level {} is missing faces: {}", level_index, face_list(&missing));
            }
            if level_index > base_size.ilog2() {
                engine_bail!(@ContractViolation, SOURCE,
                    "Mip level {} is past the end of the chain for a {}px base ({} levels at most)",
                    level_index, base_size, base_size.ilog2());
            }
            let expected = (base_size >> level_index).max(1);
            for (face, image) in level.iter() {
                let CubeImage::Decoded(decoded) = image else {
                    engine_bail!(@ContractViolation, SOURCE,
                        "Mip level {} face '{}' must be a decoded image, got {}",
                        level_index, face, image.kind());
                };
                if (decoded.width(), decoded.height()) != (expected, expected) {
                    engine_bail!(@ContractViolation, SOURCE,
                        "Mip level {} face '{}' is {}x{}, expected {}x{}",
                        level_index, face, decoded.width(), decoded.height(), expected, expected);
                }
            }
        }

        Ok(extent)
    }

    /// Side length shared by the six base faces
    fn base_size(&self, extent: Option<(u32, u32)>) -> Result<u32> {
        let mut base: Option<(CubeFace, u32)> = None;
        for (face, image) in self.images.iter() {
            let (width, height) = match (image, extent) {
                (CubeImage::Decoded(decoded), _) => (decoded.width(), decoded.height()),
                (_, Some(raw)) => raw,
                (_, None) => engine_bail!(@ContractViolation, SOURCE,
                    "Face '{}' is a raw buffer but no width/height was given", face),
            };
            if width == 0 || width != height {
                engine_bail!(@ContractViolation, SOURCE,
                    "Face '{}' is {}x{}, cube faces must be square and non-empty",
                    face, width, height);
            }
            match base {
                None => base = Some((face, width)),
                Some((first, size)) if size != width => engine_bail!(@ContractViolation, SOURCE,
                    "Face '{}' is {}x{} but face '{}' is {}x{}",
                    face, width, width, first, size, size),
                Some(_) => {}
            }
        }
        match base {
            Some((_, size)) => Ok(size),
            None => engine_bail!(@ContractViolation, SOURCE, "Cube texture has no base faces"),
        }
    }
}

/// Native level of mip chain entry `index` (entry 0 is level 1)
fn mip_level(index: usize) -> Result<u32> {
    u32::try_from(index)
        .ok()
        .and_then(|index| index.checked_add(1))
        .ok_or_else(|| engine_err!(@ContractViolation, SOURCE,
            "Mip chain entry {} does not fit a native mip level", index))
}

fn face_list(faces: &[CubeFace]) -> String {
    faces.iter().map(CubeFace::name).collect::<Vec<_>>().join(", ")
}

// ===== CUBE TEXTURE =====

/// Cube-map texture resource owning one native texture object
pub struct CubeTexture {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    handle: Option<TextureHandle>,
    format: TextureFormat,
    mip_level_count: u32,
}

impl CubeTexture {
    /// Create and fully upload a cube texture
    ///
    /// The device lock is held for the whole bind/configure/upload sequence.
    ///
    /// # Errors
    ///
    /// - `Error::ContractViolation` if the config is incomplete or malformed
    ///   (reported before any device call)
    /// - `Error::AllocationFailed` if the device cannot create the texture
    /// - any device upload error (the texture object is released first)
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        extensions: &dyn ExtensionRegistry,
        config: CubeTextureConfig,
    ) -> Result<Self> {
        let extent = config.validate()?;
        let mip_level_count = u32::try_from(config.mip.len())
            .map_err(|_| engine_err!(@ContractViolation, SOURCE,
                "Mip chain of {} levels does not fit a native mip level count", config.mip.len()))?;
        let format = Self::select_format(extensions, config.srgb);

        let handle = {
            let mut guard = device.lock()
                .map_err(|_| engine_err!(SOURCE, "GraphicsDevice lock poisoned"))?;

            let handle = guard.create_texture().map_err(|err| match err {
                Error::AllocationFailed(_) => err,
                other => engine_err!(@AllocationFailed, SOURCE,
                    "Failed to create cube texture: {}", other),
            })?;

            if let Err(err) = Self::populate(&mut *guard, handle, format, extent, &config) {
                guard.delete_texture(handle);
                return Err(err);
            }
            handle
        };

        engine_debug!(SOURCE, "Created cube texture {} ({:?}, {} mip levels)",
            handle.raw(), format, mip_level_count);

        Ok(Self {
            device,
            handle: Some(handle),
            format,
            mip_level_count,
        })
    }

    /// Create a cube texture and register it with a resource tracker
    ///
    /// The tracker only receives a weak back-reference; the returned `Arc` is
    /// the owner.
    pub fn create(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        extensions: &dyn ExtensionRegistry,
        tracker: &mut dyn ResourceTracker,
        config: CubeTextureConfig,
    ) -> Result<(ResourceKey, Arc<Mutex<CubeTexture>>)> {
        let texture = Arc::new(Mutex::new(Self::new(device, extensions, config)?));
        let resource: Arc<Mutex<dyn Resource>> = texture.clone();
        let key = tracker.add_resource(Arc::downgrade(&resource));
        Ok((key, texture))
    }

    /// Storage format used for decoded images
    fn select_format(extensions: &dyn ExtensionRegistry, srgb: bool) -> TextureFormat {
        if !srgb {
            return TextureFormat::R8G8B8A8_UNORM;
        }
        match extensions.srgb_format() {
            Some(format) => format,
            None => {
                engine_debug!(SOURCE, "sRGB requested but not supported, falling back to {:?}",
                    TextureFormat::R8G8B8A8_UNORM);
                TextureFormat::R8G8B8A8_UNORM
            }
        }
    }

    /// Bind, configure and upload every face and mip level
    fn populate(
        device: &mut dyn GraphicsDevice,
        handle: TextureHandle,
        format: TextureFormat,
        extent: Option<(u32, u32)>,
        config: &CubeTextureConfig,
    ) -> Result<()> {
        device.active_texture(0);
        device.bind_cube_map(Some(handle));

        device.set_cube_map_parameter(TextureParameter::MinFilter(TextureFilter::Linear))?;
        device.set_cube_map_parameter(TextureParameter::MagFilter(TextureFilter::Linear))?;
        device.set_cube_map_parameter(TextureParameter::WrapS(TextureWrap::ClampToEdge))?;
        device.set_cube_map_parameter(TextureParameter::WrapT(TextureWrap::ClampToEdge))?;

        device.set_unpack_flip_y(config.flip_y);

        for face in CubeFace::ALL {
            let image = config.images.get(face)
                .ok_or_else(|| engine_err!(@ContractViolation, SOURCE, "Missing base image for face '{}'", face))?;

            let upload = match image {
                CubeImage::Bytes(data) => {
                    let (width, height) = Self::raw_extent(extent, face)?;
                    ImageUpload::Pixels {
                        format: TextureFormat::R8G8B8A8_UNORM,
                        width,
                        height,
                        data,
                    }
                }
                CubeImage::Floats(data) => {
                    let (width, height) = Self::raw_extent(extent, face)?;
                    ImageUpload::Pixels {
                        format: TextureFormat::R32G32B32A32_SFLOAT,
                        width,
                        height,
                        data: bytemuck::cast_slice(data),
                    }
                }
                CubeImage::Decoded(image) => ImageUpload::Image {
                    format,
                    image: image.as_ref(),
                },
            };

            engine_trace!(SOURCE, "Uploading face '{}' level 0 as {:?}", face, upload.format());
            device.upload_cube_face(face.target(), 0, upload)?;
        }

        if !config.mip.is_empty() {
            device.set_cube_map_parameter(TextureParameter::MinFilter(TextureFilter::LinearMipmapLinear))?;

            for (index, level_images) in config.mip.iter().enumerate() {
                let level = mip_level(index)?;
                for face in CubeFace::ALL {
                    let image = match level_images.get(face) {
                        Some(CubeImage::Decoded(image)) => image,
                        _ => engine_bail!(@ContractViolation, SOURCE,
                            "Mip level {} face '{}' is not a decoded image", level, face),
                    };
                    engine_trace!(SOURCE, "Uploading face '{}' level {}", face, level);
                    device.upload_cube_face(face.target(), level, ImageUpload::Image {
                        format,
                        image: image.as_ref(),
                    })?;
                }
            }
        }

        Ok(())
    }

    fn raw_extent(extent: Option<(u32, u32)>, face: CubeFace) -> Result<(u32, u32)> {
        extent.ok_or_else(|| engine_err!(@ContractViolation, SOURCE,
            "Face '{}' is a raw buffer but no width/height was given", face))
    }

    /// Native texture object, None once disposed
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Storage format chosen for decoded images (base and mip levels)
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Number of precomputed mip levels above the base level
    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }

    /// Returns true once the native object has been released
    pub fn is_disposed(&self) -> bool {
        self.handle.is_none()
    }

    /// Release the native texture object
    ///
    /// Calling this more than once is a no-op. Blocks on the device lock, so
    /// it must not be called while the caller holds that lock. Dropping the
    /// texture does not block: if the device is locked at that point the
    /// native object is leaked and a warning is logged.
    pub fn dispose(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let mut device = self.device.lock().unwrap_or_else(PoisonError::into_inner);
        Self::release(&mut *device, handle);
    }

    fn release(device: &mut dyn GraphicsDevice, handle: TextureHandle) {
        device.delete_texture(handle);
        engine_debug!(SOURCE, "Disposed cube texture {}", handle.raw());
    }
}

impl Resource for CubeTexture {
    fn kind(&self) -> &'static str {
        "CubeTexture"
    }

    fn dispose(&mut self) {
        CubeTexture::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        CubeTexture::is_disposed(self)
    }
}

impl Drop for CubeTexture {
    fn drop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match self.device.try_lock() {
            Ok(mut device) => Self::release(&mut *device, handle),
            Err(TryLockError::Poisoned(poisoned)) => Self::release(&mut *poisoned.into_inner(), handle),
            Err(TryLockError::WouldBlock) => engine_warn!(SOURCE,
                "Cube texture {} dropped while the device is locked, native object leaked",
                handle.raw()),
        }
    }
}

#[cfg(test)]
#[path = "cube_texture_tests.rs"]
mod tests;
