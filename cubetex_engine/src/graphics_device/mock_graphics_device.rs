/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every device call so tests can assert the exact sequence of
/// state changes and uploads issued by texture resources.

use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, TextureHandle, CubeMapFace, TextureParameter, TextureFormat, ImageUpload,
};
use crate::{engine_bail, engine_err};

// ============================================================================
// Recorded calls
// ============================================================================

/// How an upload supplied its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSource {
    Pixels,
    Image,
}

/// One recorded face upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub handle: TextureHandle,
    pub face: CubeMapFace,
    pub level: u32,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub source: UploadSource,
    pub byte_len: usize,
}

/// One recorded device call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    CreateTexture(TextureHandle),
    DeleteTexture(TextureHandle),
    ActiveTexture(u32),
    BindCubeMap(Option<TextureHandle>),
    CubeMapParameter(TextureParameter),
    UnpackFlipY(bool),
    Upload(RecordedUpload),
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Recording device
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub calls: Vec<DeviceCall>,
    /// Make the next create_texture() calls fail
    pub fail_texture_creation: bool,
    /// Fail the upload with this index (0-based, counted across the device lifetime)
    pub fail_upload_at: Option<usize>,
    /// Deletes of handles that were not live
    pub invalid_deletes: u32,
    next_name: u32,
    live: FxHashSet<TextureHandle>,
    bound: Option<TextureHandle>,
    upload_count: usize,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded uploads, in call order
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::Upload(upload) => Some(upload.clone()),
                _ => None,
            })
            .collect()
    }

    /// All recorded sampler parameters, in call order
    pub fn parameters(&self) -> Vec<TextureParameter> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DeviceCall::CubeMapParameter(parameter) => Some(*parameter),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded delete calls for a handle
    pub fn delete_count(&self, handle: TextureHandle) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DeviceCall::DeleteTexture(handle))
            .count()
    }

    /// Number of texture objects currently alive
    pub fn live_texture_count(&self) -> usize {
        self.live.len()
    }

    /// Currently bound cube map
    pub fn bound_cube_map(&self) -> Option<TextureHandle> {
        self.bound
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self) -> Result<TextureHandle> {
        if self.fail_texture_creation {
            return Err(engine_err!(@AllocationFailed, "cubetex::mock", "create_texture: out of texture names"));
        }
        self.next_name += 1;
        let handle = TextureHandle::new(self.next_name)
            .ok_or_else(|| engine_err!(@AllocationFailed, "cubetex::mock", "create_texture: null name"))?;
        self.live.insert(handle);
        self.calls.push(DeviceCall::CreateTexture(handle));
        Ok(handle)
    }

    fn delete_texture(&mut self, handle: TextureHandle) {
        if !self.live.remove(&handle) {
            self.invalid_deletes += 1;
        }
        if self.bound == Some(handle) {
            self.bound = None;
        }
        self.calls.push(DeviceCall::DeleteTexture(handle));
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(DeviceCall::ActiveTexture(unit));
    }

    fn bind_cube_map(&mut self, handle: Option<TextureHandle>) {
        self.bound = handle;
        self.calls.push(DeviceCall::BindCubeMap(handle));
    }

    fn set_cube_map_parameter(&mut self, parameter: TextureParameter) -> Result<()> {
        if self.bound.is_none() {
            engine_bail!("cubetex::mock", "set_cube_map_parameter: no cube map bound");
        }
        if let TextureParameter::MagFilter(filter) = parameter {
            if filter.uses_mipmaps() {
                engine_bail!("cubetex::mock",
                    "set_cube_map_parameter: {:?} is not a valid magnification filter", filter);
            }
        }
        self.calls.push(DeviceCall::CubeMapParameter(parameter));
        Ok(())
    }

    fn set_unpack_flip_y(&mut self, flip: bool) {
        self.calls.push(DeviceCall::UnpackFlipY(flip));
    }

    fn upload_cube_face(&mut self, face: CubeMapFace, level: u32, upload: ImageUpload<'_>) -> Result<()> {
        let index = self.upload_count;
        self.upload_count += 1;

        let Some(handle) = self.bound else {
            engine_bail!("cubetex::mock", "upload_cube_face: no cube map bound");
        };
        if self.fail_upload_at == Some(index) {
            engine_bail!("cubetex::mock", "upload_cube_face: injected failure on upload {}", index);
        }

        let (source, byte_len) = match upload {
            ImageUpload::Pixels { format, width, height, data } => {
                let expected = width as usize * height as usize * format.bytes_per_pixel();
                if data.len() != expected {
                    engine_bail!("cubetex::mock",
                        "upload_cube_face: {:?} face got {} bytes, expected {}", face, data.len(), expected);
                }
                (UploadSource::Pixels, data.len())
            }
            ImageUpload::Image { image, .. } => (UploadSource::Image, image.pixels().len()),
        };

        self.calls.push(DeviceCall::Upload(RecordedUpload {
            handle,
            face,
            level,
            format: upload.format(),
            width: upload.width(),
            height: upload.height(),
            source,
            byte_len,
        }));
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
