//! Spritebake turns an animated model into 2D sprite assets.
//!
//! A run captures the model from a list of views across its animation frames, crops every capture
//! to its content, optionally unifies crop rectangles and packs the frames into an atlas, then
//! saves textures, materials, sprite sheets and an optional prefab.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: an [`Extractor`] renders the model's color map (and optionally a normal map)
//!    for the current view and animation time.
//! 2. **Trim**: each capture is cropped to its tight content bound plus a margin. With
//!    unification, bounds are accumulated and applied once per view or once per run.
//! 3. **Finalize**: frames are saved one by one, or packed into a single atlas through a
//!    [`Packer`]. A [`PrefabTemplate`] can be bound to the first sprite and material.
//!
//! The run itself is a tick-driven state machine ([`Baker`]). Hosts with their own frame loop call
//! [`Baker::tick`]; everyone else calls [`bake`]. A run always ends in exactly one
//! [`BakeStatus`], and all collaborators are traits so the pipeline can be driven by any renderer
//! and any asset store.
//!
//! Output locations follow [`OutputNaming`].
#![forbid(unsafe_code)]

mod bake;
mod bitmap;
mod capture;
mod foundation;
mod manifest;
mod output;
mod scene;

pub use bake::baker::{BakeReport, BakeServices, BakeState, BakeStatus, Baker, Tick, bake};
pub use bake::clock::{Clock, ManualClock, SystemClock};
pub use bake::options::{BakeOptions, MAX_MARGIN, PackingOptions, TrimmingOptions, UnifyScope};
pub use bake::progress::{
    CancelToken, ProgressSignal, ProgressSink, TracingProgress, ViewProgress,
};
pub use bake::record::FrameRecord;
pub use bake::unify::{UnifiedBounds, unify_records};
pub use bitmap::geometry::{
    MapKind, adjust_pivot, compute_tight_bound, crop_with_margin, pivot_fallback_bound,
    tight_bound_or_pivot, union_rect,
};
pub use bitmap::{Bitmap, FALLBACK_SIZE};
pub use capture::adapter::{PARKING_POSITION, capture_color, capture_normal};
pub use capture::extractor::{CaptureRequest, Extractor};
pub use capture::sequence::SequenceExtractor;
pub use foundation::core::{
    CLEAR_COLOR, IntegerPoint, IntegerRect, NORMAL_MAP_COLOR, Rgba8, WHITE, WorldPoint,
};
pub use foundation::error::{BakeError, BakeResult};
pub use manifest::BakeManifest;
pub use output::dispatch::{
    BakeOutputs, FinalizeContext, bind_template, finalize_packed, finalize_single,
};
pub use output::material::{DEFAULT_SHADER, Material, MaterialBuilder, StandardMaterialBuilder};
pub use output::naming::{AssetPaths, OutputNaming, OutputOptions, normalize_folder};
pub use output::packer::{PackRequest, PackedAtlas, PackedCell, Packer, ShelfPacker};
pub use output::persistence::{FsPersistence, InMemoryPersistence, Persistence};
pub use output::prefab::{
    Component, PrefabInstance, PrefabTemplate, SPRITE_RENDERER, SpriteRendererBinder,
    TemplateBuilder,
};
pub use output::sprite::{AtlasRect, SpriteRef, SpriteSheet};
pub use scene::camera::{Camera, SurfaceSize};
pub use scene::model::{BakeModel, MaterialBackup, NormalMapMaterial};
pub use scene::sampler::{FrameSampler, SampledFrame};
pub use scene::sequence::{ImageSequenceModel, NORMAL_MAP_MATERIAL_NAME, SequenceModelDesc};
pub use scene::shadow::{
    NoShadow, SHADOW_GROUND_OFFSET, ShadowMode, ShadowOptions, ShadowPlacer, ShadowRig,
    ShadowTransform,
};
pub use scene::view::{ViewDescriptor, ViewRotation, turntable};
