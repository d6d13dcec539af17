use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageBuffer, Rgba};
use transformations::{
    Cartooniser, Device, FilterCartooniser, ModelRegistry, ModelVariant, TransformationError,
    WeightStore,
};

fn bundled_weights() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("weights")
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("transformations-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

// Helper function to create a test image
fn create_test_image(width: u32, height: u32) -> DynamicImage {
    let mut image = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(width, height);

    // Create a simple gradient pattern
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let r = ((x as f32 / width as f32) * 255.0) as u8;
        let g = ((y as f32 / height as f32) * 255.0) as u8;
        *pixel = Rgba([r, g, 128, 255]);
    }

    DynamicImage::ImageRgba8(image)
}

#[test]
fn test_every_variant_cartoonises_with_bundled_weights() {
    let registry = ModelRegistry::with_reference_backends();
    let image = create_test_image(40, 30);

    for variant in ModelVariant::ALL {
        let backend = registry.backend(variant).unwrap();
        let result = backend.cartoonise(&image, &bundled_weights(), Device::Cpu);
        assert!(
            result.is_ok(),
            "Cartoonise failed for {}: {:?}",
            variant,
            result.err()
        );

        let output = result.unwrap();
        assert_eq!(output.width(), 40, "Output image has incorrect width");
        assert_eq!(output.height(), 30, "Output image has incorrect height");
    }
}

#[test]
fn test_missing_weights_are_reported_with_path() {
    let dir = scratch_dir();
    let cartooniser =
        FilterCartooniser::new(ModelVariant::CelebaDistill, Arc::new(WeightStore::new()));

    let err = cartooniser
        .cartoonise(&create_test_image(8, 8), &dir, Device::Cpu)
        .unwrap_err();

    match err {
        TransformationError::MissingWeights { path } => {
            assert_eq!(path, dir.join("celeba_distill.json"));
        }
        other => panic!("Expected MissingWeights, got {:?}", other),
    }
}

#[test]
fn test_malformed_weights_are_rejected() {
    let dir = scratch_dir();
    std::fs::write(dir.join("paprika.json"), b"{ not json").unwrap();

    let store = WeightStore::new();
    let err = store.load(&dir, ModelVariant::Paprika).unwrap_err();
    assert!(matches!(err, TransformationError::InvalidWeights { .. }));
    assert_eq!(store.cached_len(), 0);
}

#[test]
fn test_out_of_range_weights_are_rejected() {
    let dir = scratch_dir();
    std::fs::write(
        dir.join("paprika.json"),
        br#"{"levels": 1, "edge_threshold": 40.0}"#,
    )
    .unwrap();

    let err = WeightStore::new()
        .load(&dir, ModelVariant::Paprika)
        .unwrap_err();
    assert!(matches!(err, TransformationError::InvalidWeights { reason, .. } if reason.contains("levels")));
}

#[test]
fn test_weights_are_loaded_once_and_cached() {
    let dir = scratch_dir();
    let file = dir.join("face_paint_512_v2.json");
    std::fs::write(&file, br#"{"levels": 4, "edge_threshold": 40.0}"#).unwrap();

    let store = WeightStore::new();
    let first = store.load(&dir, ModelVariant::FacePaint512V2).unwrap();

    // A cached entry survives the file going away.
    std::fs::remove_file(&file).unwrap();
    let second = store.load(&dir, ModelVariant::FacePaint512V2).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.cached_len(), 1);
}

#[test]
fn test_cache_is_keyed_by_weights_folder() {
    let first_dir = scratch_dir();
    let second_dir = scratch_dir();
    std::fs::write(first_dir.join("paprika.json"), br#"{"levels": 3, "edge_threshold": 40.0}"#)
        .unwrap();
    std::fs::write(second_dir.join("paprika.json"), br#"{"levels": 7, "edge_threshold": 40.0}"#)
        .unwrap();

    let store = WeightStore::new();
    let first = store.load(&first_dir, ModelVariant::Paprika).unwrap();
    let second = store.load(&second_dir, ModelVariant::Paprika).unwrap();

    assert_eq!(first.levels, 3);
    assert_eq!(second.levels, 7);
    assert_eq!(store.cached_len(), 2);
}

#[test]
fn test_single_pixel_image() {
    let registry = ModelRegistry::with_reference_backends();
    let image = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(1, 1, Rgba([255, 0, 0, 255])));

    let result = registry
        .backend(ModelVariant::CelebaDistill)
        .unwrap()
        .cartoonise(&image, &bundled_weights(), Device::Cpu);

    assert!(
        result.is_ok(),
        "Failed to cartoonise single pixel image: {:?}",
        result.err()
    );
    assert_eq!(result.unwrap().to_rgba8().len(), 4, "Single pixel output should be 4 bytes");
}
