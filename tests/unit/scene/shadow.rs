use super::*;
use crate::scene::{
    camera::SurfaceSize,
    sampler::FrameSampler,
    sequence::{ImageSequenceModel, SequenceModelDesc},
};

fn model(extent: WorldPoint) -> ImageSequenceModel {
    ImageSequenceModel::new(SequenceModelDesc {
        name: "m".to_string(),
        root: "frames".into(),
        sampler: FrameSampler::Clip {
            length_secs: 1.0,
            frame_count: 1,
            looping: false,
        },
        position: WorldPoint::new(2.0, 0.5, -1.0),
        extent,
        ground_pivot: false,
        materials: vec![],
    })
}

fn camera() -> Camera {
    Camera::new(
        SurfaceSize {
            width: 200,
            height: 100,
        },
        20.0,
    )
}

fn opts(mode: ShadowMode) -> ShadowOptions {
    ShadowOptions {
        mode,
        ..ShadowOptions::default()
    }
}

#[test]
fn none_mode_leaves_rig_untouched() {
    let mut rig = ShadowRig::default();
    rig.arrange(&opts(ShadowMode::None), &model(WorldPoint::new(1.0, 1.0, 1.0)), &camera())
        .unwrap();
    assert_eq!(rig.shadow, ShadowTransform::default());
}

#[test]
fn simple_shadow_sits_below_pivot_and_scales_to_footprint() {
    let mut rig = ShadowRig {
        quad_size: 2.0,
        ..ShadowRig::default()
    };
    let o = ShadowOptions {
        simple_scale: [1.5, 0.5],
        ..opts(ShadowMode::Simple)
    };
    rig.arrange(&o, &model(WorldPoint::new(4.0, 3.0, 2.0)), &camera())
        .unwrap();

    assert!(rig.shadow.attached);
    assert_eq!(rig.shadow.position.x, 2.0);
    assert!((rig.shadow.position.y - (0.5 - SHADOW_GROUND_OFFSET)).abs() < 1e-6);
    assert_eq!(rig.shadow.scale, WorldPoint::new(3.0, 1.0, 0.5));
}

#[test]
fn simple_shadow_with_flat_model_uses_raw_scale() {
    let mut rig = ShadowRig::default();
    let o = ShadowOptions {
        simple_scale: [2.0, 3.0],
        ..opts(ShadowMode::Simple)
    };
    rig.arrange(&o, &model(WorldPoint::new(0.0, 1.0, 1.0)), &camera())
        .unwrap();
    assert_eq!(rig.shadow.scale, WorldPoint::new(2.0, 1.0, 3.0));
}

#[test]
fn zero_simple_scale_is_ignored() {
    let mut rig = ShadowRig::default();
    let o = ShadowOptions {
        simple_scale: [0.0, 0.0],
        ..opts(ShadowMode::Simple)
    };
    rig.arrange(&o, &model(WorldPoint::new(1.0, 1.0, 1.0)), &camera())
        .unwrap();
    assert_eq!(rig.shadow.scale, WorldPoint::new(1.0, 1.0, 1.0));
}

#[test]
fn top_down_field_covers_camera_footprint() {
    let mut rig = ShadowRig {
        field_size: [5.0, 2.5],
        ..ShadowRig::default()
    };
    rig.arrange(&opts(ShadowMode::TopDown), &model(WorldPoint::new(1.0, 1.0, 1.0)), &camera())
        .unwrap();
    assert_eq!(rig.field.scale, WorldPoint::new(2.0, 1.0, 2.0));
}

#[test]
fn top_down_without_surface_is_config_error() {
    let mut rig = ShadowRig::default();
    let blind = Camera {
        surface: None,
        ..camera()
    };
    let err = rig
        .arrange(&opts(ShadowMode::TopDown), &model(WorldPoint::new(1.0, 1.0, 1.0)), &blind)
        .unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}

#[test]
fn matte_field_grows_with_height_over_light_slope() {
    let mut rig = ShadowRig {
        field_size: [1.0, 1.0],
        ..ShadowRig::default()
    };
    let o = ShadowOptions {
        light_pitch_deg: 45.0,
        ..opts(ShadowMode::Matte)
    };
    rig.arrange(&o, &model(WorldPoint::new(2.0, 3.0, 1.0)), &camera())
        .unwrap();
    // (3 / tan 45 + 2 / 2) * 2 = 8
    assert!((rig.field.scale.x - 8.0).abs() < 1e-4);
    assert!((rig.field.scale.z - 8.0).abs() < 1e-4);
}

#[test]
fn matte_requires_pitch_in_range() {
    let o = ShadowOptions {
        light_pitch_deg: 0.0,
        ..opts(ShadowMode::Matte)
    };
    assert!(o.validate().is_err());
    assert!(opts(ShadowMode::Simple).validate().is_ok());
}
