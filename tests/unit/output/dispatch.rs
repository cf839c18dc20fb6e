use super::*;
use crate::{
    foundation::core::{IntegerPoint, NORMAL_MAP_COLOR},
    output::{
        material::{DEFAULT_SHADER, StandardMaterialBuilder},
        naming::OutputOptions,
        packer::{PackedAtlas, ShelfPacker},
        persistence::InMemoryPersistence,
        prefab::{SPRITE_RENDERER, SpriteRendererBinder},
    },
};

fn naming() -> OutputNaming {
    let opts = OutputOptions {
        asset_root: PathBuf::from("out"),
        folder: "baked".to_string(),
        ..OutputOptions::default()
    };
    OutputNaming::new(&opts, "imp").unwrap()
}

fn record(name: &str, w: u32, h: u32, normal: bool) -> FrameRecord {
    FrameRecord::new(
        name,
        0,
        IntegerPoint::new(1, 2),
        Bitmap::filled(w, h, [9, 9, 9, 255]),
        normal.then(|| Bitmap::filled(w, h, NORMAL_MAP_COLOR)),
    )
}

#[derive(Default)]
struct CountingPacker {
    calls: usize,
    names: Vec<String>,
    inner: ShelfPacker,
}

impl Packer for CountingPacker {
    fn pack(&mut self, req: &PackRequest<'_>) -> BakeResult<PackedAtlas> {
        self.calls += 1;
        self.names = req.names.to_vec();
        self.inner.pack(req)
    }
}

#[test]
fn single_frame_writes_texture_material_and_sheet() {
    let naming = naming();
    let builder = StandardMaterialBuilder::default();
    let mut mem = InMemoryPersistence::new();
    let mut out = BakeOutputs::default();
    let mut ctx = FinalizeContext {
        naming: &naming,
        shader: DEFAULT_SHADER,
        materials: &builder,
        persistence: &mut mem,
    };
    finalize_single(&record("000_0000", 5, 4, true), &mut ctx, &mut out).unwrap();

    assert_eq!(
        out.textures,
        vec![
            naming.dir().join("imp_000_0000.png"),
            naming.dir().join("imp_000_0000_normal.png"),
        ]
    );
    let (_, material) = &mem.materials()[0];
    assert_eq!(material.name, "imp_000_0000");
    assert_eq!(
        material.texture("_BumpMap"),
        Some(naming.dir().join("imp_000_0000_normal.png").as_path())
    );
    let (_, sheet) = &mem.sprite_sheets()[0];
    assert_eq!(sheet.sprites.len(), 1);
    assert_eq!(sheet.sprites[0].rect, AtlasRect::new(0, 0, 5, 4));
    assert_eq!(sheet.sprites[0].pivot, IntegerPoint::new(1, 2));
    assert_eq!(out.first_material, Some(naming.dir().join("imp_000_0000.mat.json")));
}

#[test]
fn packed_path_calls_packer_once_in_record_order() {
    let naming = naming();
    let builder = StandardMaterialBuilder::default();
    let mut mem = InMemoryPersistence::new();
    let mut out = BakeOutputs::default();
    let mut packer = CountingPacker::default();
    let records = vec![
        record("b", 3, 3, false),
        record("a", 6, 2, false),
        record("c", 2, 7, false),
    ];
    let mut ctx = FinalizeContext {
        naming: &naming,
        shader: DEFAULT_SHADER,
        materials: &builder,
        persistence: &mut mem,
    };
    finalize_packed(records, &mut packer, &mut ctx, &mut out).unwrap();

    assert_eq!(packer.calls, 1);
    assert_eq!(packer.names, vec!["b", "a", "c"]);
    let (path, sheet) = &mem.sprite_sheets()[0];
    assert_eq!(path, &naming.dir().join("imp.sprites.json"));
    let names: Vec<&str> = sheet.sprites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["imp_b", "imp_a", "imp_c"]);
    assert_eq!(mem.textures().len(), 1);
    assert_eq!(out.first_sprite.as_ref().map(|s| s.name.as_str()), Some("imp_b"));
}

#[test]
fn packed_path_rejects_partial_normals() {
    let naming = naming();
    let builder = StandardMaterialBuilder::default();
    let mut mem = InMemoryPersistence::new();
    let mut out = BakeOutputs::default();
    let mut packer = CountingPacker::default();
    let mut ctx = FinalizeContext {
        naming: &naming,
        shader: DEFAULT_SHADER,
        materials: &builder,
        persistence: &mut mem,
    };
    let err = finalize_packed(
        vec![record("a", 2, 2, true), record("b", 2, 2, false)],
        &mut packer,
        &mut ctx,
        &mut out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("all or none"));
    assert_eq!(packer.calls, 0);
    assert!(mem.textures().is_empty());
}

#[test]
fn template_gets_first_sprite_and_material() {
    let naming = naming();
    let builder = StandardMaterialBuilder::default();
    let mut mem = InMemoryPersistence::new();
    let mut out = BakeOutputs::default();
    let mut ctx = FinalizeContext {
        naming: &naming,
        shader: DEFAULT_SHADER,
        materials: &builder,
        persistence: &mut mem,
    };
    finalize_single(&record("000_0000", 2, 2, false), &mut ctx, &mut out).unwrap();
    finalize_single(&record("000_0001", 2, 2, false), &mut ctx, &mut out).unwrap();
    let template = PrefabTemplate {
        name: "Imp".to_string(),
        components: vec![SPRITE_RENDERER.to_string()],
    };
    bind_template(&template, &SpriteRendererBinder, &mut ctx, &mut out).unwrap();

    assert_eq!(out.prefab, Some(naming.dir().join("imp.prefab.json")));
    let (_, prefab) = &mem.prefabs()[0];
    let renderer = prefab.component(SPRITE_RENDERER).unwrap();
    assert_eq!(renderer.properties["sprite"], "imp_000_0000");
}
