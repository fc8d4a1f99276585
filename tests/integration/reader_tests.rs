//! End-to-end region reading through a synthetic tile store.

use std::sync::Arc;

use wsi_region::{
    CropBox, FetchError, I64Vec2, InvalidRegion, PlannerConfig, ReadRegionError, RegionError,
    RegionReader, RegionRequest, ResampleError, ResampleKernel,
};

use super::test_utils::{
    cmu1_descriptor, init_tracing, two_level_descriptor, FailingResampler, FailingTileStore,
    ImageOpsResampler, SyntheticTileStore,
};

fn synthetic_reader(
    edge_deficit: u32,
    config: PlannerConfig,
) -> RegionReader<SyntheticTileStore, ImageOpsResampler> {
    let descriptor = Arc::new(two_level_descriptor());
    let store = SyntheticTileStore::new(Arc::clone(&descriptor)).with_edge_deficit(edge_deficit);
    RegionReader::with_config(store, ImageOpsResampler, descriptor, config)
}

// =============================================================================
// Successful reads
// =============================================================================

#[tokio::test]
async fn test_read_downsampled_region() {
    init_tracing();
    let reader = synthetic_reader(0, PlannerConfig::default());
    let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));

    let response = reader.read_region(&request).await.unwrap();

    assert_eq!(response.image.dimensions(), (50, 50));
    assert_eq!(response.plan.level, 1);
    assert_eq!(response.crop_box, CropBox::new(4.0, 4.0, 66.5, 66.5));

    let fetches = reader.store().get_fetches().await;
    assert_eq!(fetches, vec![(1, I64Vec2::new(484, 484), (71, 71))]);
}

#[tokio::test]
async fn test_native_scale_read_is_exact() {
    let reader = synthetic_reader(0, PlannerConfig::new(ResampleKernel::Nearest));
    let request = RegionRequest::new((10.0, 20.0), 1.0, (8.0, 8.0));

    let response = reader.read_region(&request).await.unwrap();

    // Half a pixel of support rounds up to one native pixel on each side
    assert_eq!(response.plan.level_zero_location, I64Vec2::new(9, 19));
    assert_eq!(response.crop_box, CropBox::new(1.0, 1.0, 9.0, 9.0));

    let image = &response.image;
    assert_eq!(image.dimensions(), (8, 8));
    assert_eq!(*image.get_pixel(0, 0), SyntheticTileStore::pixel_at(0, 10, 20));
    assert_eq!(*image.get_pixel(7, 7), SyntheticTileStore::pixel_at(0, 17, 27));
}

#[tokio::test]
async fn test_short_buffer_at_level_edge() {
    let reader = synthetic_reader(1, PlannerConfig::default());
    // Scaled size at 0.25 is exactly level 1, so the fetch reaches its far edge
    let request = RegionRequest::new((2400.0, 1900.0), 0.25, (100.0, 100.0));

    let response = reader.read_region(&request).await.unwrap();

    assert_eq!(response.plan.fetch_size, I64Vec2::new(103, 103));
    assert_eq!(response.plan.crop_box, CropBox::new(3.0, 3.0, 103.0, 103.0));
    assert_eq!(response.crop_box, CropBox::new(3.0, 3.0, 102.0, 102.0));
    assert_eq!(response.image.dimensions(), (100, 100));
}

#[tokio::test]
async fn test_read_from_non_integer_downsample_level() {
    let descriptor = Arc::new(cmu1_descriptor());
    let store = SyntheticTileStore::new(Arc::clone(&descriptor));
    let reader = RegionReader::new(store, ImageOpsResampler, descriptor);
    let request = RegionRequest::new((1000.0, 700.0), 0.1, (128.0, 128.0));

    let response = reader.read_region(&request).await.unwrap();

    assert_eq!(response.plan.level, 1);
    assert_eq!(response.plan.level_zero_location, I64Vec2::new(9964, 6964));
    assert_eq!(response.plan.fetch_size, I64Vec2::new(338, 338));
    assert!((response.crop_box.x0 - 8.9997).abs() < 1e-4);
    assert_eq!(response.image.dimensions(), (128, 128));
    assert_eq!(reader.store().fetch_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_share_reader() {
    let reader = Arc::new(synthetic_reader(0, PlannerConfig::default()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let reader = Arc::clone(&reader);
            tokio::spawn(async move {
                let offset = 100.0 * i as f64;
                let request = RegionRequest::new((offset, offset), 0.2, (50.0, 50.0));
                reader.read_region(&request).await
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.image.dimensions(), (50, 50));
        assert_eq!(response.plan.level, 1);
    }

    assert_eq!(reader.store().fetch_count(), 8);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_invalid_request_skips_store() {
    let reader = synthetic_reader(0, PlannerConfig::default());
    // Scaled width at 0.2 is 2000
    let request = RegionRequest::new((1990.0, 0.0), 0.2, (20.0, 20.0));

    let result = reader.read_region(&request).await;

    assert!(matches!(
        result,
        Err(ReadRegionError::Region(RegionError::Invalid(
            InvalidRegion::OutOfBounds { .. }
        )))
    ));
    assert_eq!(reader.store().fetch_count(), 0);
}

#[tokio::test]
async fn test_store_error_propagates() {
    let reader = RegionReader::new(FailingTileStore, ImageOpsResampler, two_level_descriptor());
    let request = RegionRequest::new((0.0, 0.0), 0.5, (32.0, 32.0));

    let err = reader.read_region(&request).await.unwrap_err();

    assert!(matches!(err, ReadRegionError::Fetch(FetchError::Decode(_))));
    assert!(err.to_string().contains("corrupt JPEG tile"));
}

#[tokio::test]
async fn test_resampler_error_propagates() {
    let descriptor = Arc::new(two_level_descriptor());
    let store = SyntheticTileStore::new(Arc::clone(&descriptor));
    let reader = RegionReader::new(store, FailingResampler, descriptor);
    let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));

    match reader.read_region(&request).await {
        Err(ReadRegionError::Resample(ResampleError::InvalidCropBox { width, height, .. })) => {
            assert_eq!((width, height), (71, 71));
        }
        other => panic!("Expected resample error, got {:?}", other.map(|r| r.plan)),
    }
    assert_eq!(reader.store().fetch_count(), 1);
}
