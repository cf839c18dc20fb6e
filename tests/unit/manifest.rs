use super::*;
use crate::bake::options::UnifyScope;

const MINIMAL: &str = r#"{
    "model": {
        "name": "knight",
        "root": "frames",
        "sampler": { "kind": "clip", "length_secs": 1.0, "frame_count": 4, "looping": true }
    },
    "camera": { "pixels_per_unit": 32.0, "surface": { "width": 128, "height": 128 } },
    "turntable": 8,
    "options": {
        "trimming": { "enabled": true, "margin": 2, "unify": "per_view" },
        "packing": { "enabled": true }
    }
}"#;

#[test]
fn minimal_manifest_fills_defaults() {
    let m = BakeManifest::from_reader(MINIMAL.as_bytes()).unwrap();
    assert!(m.validate().is_ok());
    assert_eq!(m.options.trimming.unify, UnifyScope::PerView);
    assert_eq!(m.options.packing.padding, 2);
    assert_eq!(m.options.packing.max_size, 4096);
    assert_eq!(m.options.output.folder, "Baked");
    assert_eq!(m.model.extent, crate::foundation::core::WorldPoint::new(1.0, 1.0, 1.0));

    let views = m.resolve_views().unwrap();
    assert_eq!(views.len(), 8);
    assert_eq!(views[1].name, "045");
}

#[test]
fn views_and_turntable_are_exclusive() {
    let mut m = BakeManifest::from_reader(MINIMAL.as_bytes()).unwrap();
    m.views = vec![ViewDescriptor::new("front", 0.0)];
    assert!(m.resolve_views().is_err());

    m.turntable = None;
    assert_eq!(m.resolve_views().unwrap()[0].name, "front");

    m.views.clear();
    let err = m.validate().unwrap_err();
    assert!(err.to_string().starts_with("configuration error"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = BakeManifest::from_reader(&b"{ \"model\": 3 }"[..]).unwrap_err();
    assert!(err.to_string().starts_with("serialization error"));
}

#[test]
fn relative_model_root_follows_manifest_dir() {
    let dir = std::env::temp_dir().join(format!("spritebake_manifest_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bake.json");
    std::fs::write(&path, MINIMAL).unwrap();

    let m = BakeManifest::from_path(&path).unwrap();
    assert_eq!(m.model.root, dir.join("frames"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn escaping_output_folder_fails_validation() {
    let mut m = BakeManifest::from_reader(MINIMAL.as_bytes()).unwrap();
    m.options.output.folder = "../../etc".to_string();
    assert!(m.validate().is_err());
}
