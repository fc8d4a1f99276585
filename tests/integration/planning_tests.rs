//! Planning tests against known-good plans.
//!
//! The table in `tests/fixtures/region_plans.json` holds plans for the
//! geometry of the CMU-1 sample slide, covering interior regions, regions
//! that straddle a level edge and regions that only fit on level 0.
//!
//! The plans were computed outside this crate with the dlup region request
//! algorithm, using the averaged downsamples OpenSlide reports for this slide
//! (`(46000 / w + 32914 / h) / 2`) and OpenSlide's best-level lookup.

use serde::Deserialize;
use wsi_region::{
    CropBox, I64Vec2, InvalidRegion, PlannerConfig, PlanningError, RegionError, RegionPlanner,
    RegionRequest, ResampleKernel,
};

use super::test_utils::{cmu1_descriptor, init_tracing, two_level_descriptor};

const FIXTURE: &str = include_str!("../fixtures/region_plans.json");
const EPSILON: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct PlanCase {
    location: [f64; 2],
    scaling: f64,
    size: [f64; 2],
    level: usize,
    level_zero_location: [i64; 2],
    fetch_size: [i64; 2],
    crop_box: [f64; 4],
}

fn load_cases() -> Vec<PlanCase> {
    serde_json::from_str(FIXTURE).expect("fixture should parse")
}

fn assert_crop_box_close(actual: CropBox, expected: [f64; 4], context: &str) {
    let actual = actual.as_tuple();
    let pairs = [
        (actual.0, expected[0]),
        (actual.1, expected[1]),
        (actual.2, expected[2]),
        (actual.3, expected[3]),
    ];
    for (got, want) in pairs {
        assert!(
            (got - want).abs() < EPSILON,
            "{}: crop box {:?} differs from {:?}",
            context,
            actual,
            expected
        );
    }
}

// =============================================================================
// Fixture table
// =============================================================================

#[test]
fn test_fixture_plans_match() {
    init_tracing();
    let descriptor = cmu1_descriptor();
    let planner = RegionPlanner::default();
    let cases = load_cases();
    assert!(!cases.is_empty());

    for case in cases {
        let request = RegionRequest::new(
            (case.location[0], case.location[1]),
            case.scaling,
            (case.size[0], case.size[1]),
        );
        let context = format!("{:?}", case);

        let plan = planner
            .plan_request(&request, &descriptor)
            .unwrap_or_else(|e| panic!("{}: planning failed: {}", context, e));

        assert_eq!(plan.level, case.level, "{}", context);
        assert_eq!(
            plan.level_zero_location,
            I64Vec2::new(case.level_zero_location[0], case.level_zero_location[1]),
            "{}",
            context
        );
        assert_eq!(
            plan.fetch_size,
            I64Vec2::new(case.fetch_size[0], case.fetch_size[1]),
            "{}",
            context
        );
        assert_crop_box_close(plan.crop_box, case.crop_box, &context);
        assert!(plan.crop_box.is_within(plan.fetch_size), "{}", context);
    }
}

#[test]
fn test_fixture_plans_stay_inside_levels() {
    let descriptor = cmu1_descriptor();
    let planner = RegionPlanner::default();

    for case in load_cases() {
        let request = RegionRequest::new(
            (case.location[0], case.location[1]),
            case.scaling,
            (case.size[0], case.size[1]),
        );
        let plan = planner.plan_request(&request, &descriptor).unwrap();
        let level = descriptor.level(plan.level).unwrap();

        let far = plan.native_origin.floor().as_i64vec2() + plan.fetch_size;
        assert!(far.x <= level.dimensions.x, "{:?}", case);
        assert!(far.y <= level.dimensions.y, "{:?}", case);
    }
}

// =============================================================================
// Level selection through the descriptor
// =============================================================================

#[test]
fn test_mpp_driven_request() {
    let descriptor = cmu1_descriptor();

    // 2 µm/px on a 0.499 µm/px slide
    let scaling = descriptor.scaling_for_mpp(2.0).unwrap();
    assert!((scaling - 0.2495).abs() < EPSILON);

    let request = RegionRequest::new((0.0, 0.0), scaling, (256.0, 256.0));
    let plan = RegionPlanner::default()
        .plan_request(&request, &descriptor)
        .unwrap();

    // 1 / 0.2495 is just above the 4.000243 downsample of level 1
    assert_eq!(plan.level, 1);
    assert_eq!(plan.level, descriptor.best_level_for_scaling(scaling).unwrap());
}

#[test]
fn test_upsampling_request_uses_level_zero() {
    let descriptor = cmu1_descriptor();
    let request = RegionRequest::new((10.0, 10.0), 2.0, (64.0, 64.0));

    let plan = RegionPlanner::default()
        .plan_request(&request, &descriptor)
        .unwrap();

    assert_eq!(plan.level, 0);
    // Support stays at the kernel radius when upsampling
    assert_eq!(plan.support_pixels.x, 3.0);
    assert_eq!(plan.output_dimensions(), (64, 64));
}

// =============================================================================
// Kernel configuration
// =============================================================================

#[test]
fn test_smaller_kernel_shrinks_fetch() {
    let descriptor = two_level_descriptor();
    let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));

    let lanczos = RegionPlanner::default()
        .plan_request(&request, &descriptor)
        .unwrap();
    let nearest = RegionPlanner::new(PlannerConfig::new(ResampleKernel::Nearest))
        .plan_request(&request, &descriptor)
        .unwrap();

    assert!(nearest.fetch_size.x < lanczos.fetch_size.x);
    assert!(nearest.fetch_size.y < lanczos.fetch_size.y);

    // Both describe the same requested region
    let width = |b: CropBox| b.width();
    assert!((width(nearest.crop_box) - width(lanczos.crop_box)).abs() < EPSILON);
}

#[test]
fn test_config_from_json_drives_planner() {
    let config = PlannerConfig::from_json(r#"{"kernel": "bilinear"}"#).unwrap();
    let planner = RegionPlanner::new(config);
    let request = RegionRequest::new((100.0, 100.0), 0.2, (50.0, 50.0));

    let plan = planner
        .plan_request(&request, &two_level_descriptor())
        .unwrap();

    assert_eq!(plan.level_zero_location, I64Vec2::new(492, 492));
    assert_eq!(plan.fetch_size, I64Vec2::new(67, 67));
}

// =============================================================================
// Error cases
// =============================================================================

#[test]
fn test_region_past_scaled_bounds_rejected() {
    let descriptor = cmu1_descriptor();
    // floor(46000 * 0.1) = 4600
    let request = RegionRequest::new((4550.0, 0.0), 0.1, (51.0, 10.0));

    let result = RegionPlanner::default().plan_request(&request, &descriptor);

    match result {
        Err(RegionError::Invalid(InvalidRegion::OutOfBounds { bounds, .. })) => {
            assert_eq!(bounds, I64Vec2::new(4600, 3291));
        }
        other => panic!("Expected OutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_region_touching_scaled_bounds_accepted() {
    let descriptor = cmu1_descriptor();
    let request = RegionRequest::new((4550.0, 0.0), 0.1, (50.0, 10.0));

    assert!(RegionPlanner::default()
        .plan_request(&request, &descriptor)
        .is_ok());
}

#[test]
fn test_explicit_level_out_of_range() {
    let descriptor = cmu1_descriptor();
    let request = RegionRequest::new((0.0, 0.0), 1.0, (10.0, 10.0));

    let result = RegionPlanner::default().plan(&request, 3, &descriptor);

    assert!(matches!(
        result,
        Err(PlanningError::LevelOutOfRange {
            level: 3,
            level_count: 3
        })
    ));
}
