/// Unit tests for MockGraphicsDevice
///
/// Checks that the mock records calls faithfully and enforces the binding
/// and size rules the cube texture tests rely on.

use crate::graphics_device::mock_graphics_device::*;
use crate::graphics_device::{
    GraphicsDevice, CubeMapFace, TextureParameter, TextureFilter, TextureWrap,
    TextureFormat, ImageUpload,
};
use crate::error::Error;

// ============================================================================
// Texture objects
// ============================================================================

#[test]
fn test_create_texture_returns_distinct_handles() {
    let mut device = MockGraphicsDevice::new();
    let a = device.create_texture().unwrap();
    let b = device.create_texture().unwrap();

    assert_ne!(a, b);
    assert_eq!(a.raw(), 1);
    assert_eq!(device.live_texture_count(), 2);
}

#[test]
fn test_create_texture_failure() {
    let mut device = MockGraphicsDevice::new();
    device.fail_texture_creation = true;

    let result = device.create_texture();
    assert!(matches!(result, Err(Error::AllocationFailed(_))));
    assert!(device.calls.is_empty());
}

#[test]
fn test_delete_texture_tracks_invalid_deletes() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    device.delete_texture(handle);
    assert_eq!(device.live_texture_count(), 0);
    assert_eq!(device.bound_cube_map(), None);
    assert_eq!(device.invalid_deletes, 0);

    device.delete_texture(handle);
    assert_eq!(device.invalid_deletes, 1);
    assert_eq!(device.delete_count(handle), 2);
}

// ============================================================================
// Sampler state
// ============================================================================

#[test]
fn test_parameter_requires_bound_cube_map() {
    let mut device = MockGraphicsDevice::new();
    let result = device.set_cube_map_parameter(TextureParameter::WrapS(TextureWrap::ClampToEdge));
    assert!(result.is_err());
}

#[test]
fn test_mipmap_mag_filter_rejected() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    assert!(device
        .set_cube_map_parameter(TextureParameter::MagFilter(TextureFilter::LinearMipmapLinear))
        .is_err());
    assert!(device
        .set_cube_map_parameter(TextureParameter::MinFilter(TextureFilter::LinearMipmapLinear))
        .is_ok());
    assert_eq!(
        device.parameters(),
        vec![TextureParameter::MinFilter(TextureFilter::LinearMipmapLinear)]
    );
}

// ============================================================================
// Uploads
// ============================================================================

#[test]
fn test_pixel_upload_is_recorded() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    let data = vec![0u8; 2 * 2 * 4];
    device.upload_cube_face(CubeMapFace::NegativeY, 0, ImageUpload::Pixels {
        format: TextureFormat::R8G8B8A8_UNORM,
        width: 2,
        height: 2,
        data: &data,
    }).unwrap();

    let uploads = device.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].handle, handle);
    assert_eq!(uploads[0].face, CubeMapFace::NegativeY);
    assert_eq!(uploads[0].source, UploadSource::Pixels);
    assert_eq!(uploads[0].byte_len, 16);
}

#[test]
fn test_pixel_upload_size_mismatch_rejected() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    let data = vec![0u8; 3];
    let result = device.upload_cube_face(CubeMapFace::PositiveX, 0, ImageUpload::Pixels {
        format: TextureFormat::R8G8B8A8_UNORM,
        width: 2,
        height: 2,
        data: &data,
    });
    assert!(result.is_err());
    assert!(device.uploads().is_empty());
}

#[test]
fn test_image_upload_takes_image_dimensions() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    let img = image::RgbaImage::new(16, 8);
    device.upload_cube_face(CubeMapFace::PositiveZ, 2, ImageUpload::Image {
        format: TextureFormat::R8G8B8A8_SRGB,
        image: &img,
    }).unwrap();

    let upload = &device.uploads()[0];
    assert_eq!((upload.width, upload.height), (16, 8));
    assert_eq!(upload.level, 2);
    assert_eq!(upload.format, TextureFormat::R8G8B8A8_SRGB);
    assert_eq!(upload.source, UploadSource::Image);
}

#[test]
fn test_injected_upload_failure() {
    let mut device = MockGraphicsDevice::new();
    device.fail_upload_at = Some(1);
    let handle = device.create_texture().unwrap();
    device.bind_cube_map(Some(handle));

    let img = image::RgbaImage::new(1, 1);
    let upload = ImageUpload::Image { format: TextureFormat::R8G8B8A8_UNORM, image: &img };
    assert!(device.upload_cube_face(CubeMapFace::PositiveX, 0, upload).is_ok());
    assert!(device.upload_cube_face(CubeMapFace::NegativeX, 0, upload).is_err());
    assert!(device.upload_cube_face(CubeMapFace::PositiveY, 0, upload).is_ok());
    assert_eq!(device.uploads().len(), 2);
}
