use crate::{
    bitmap::{Bitmap, geometry::MapKind},
    foundation::{core::Rgba8, error::BakeResult},
    scene::{
        camera::{Camera, SurfaceSize},
        model::BakeModel,
    },
};

/// Everything an [`Extractor`] needs to know about one render.
#[derive(Clone, Copy, Debug)]
pub struct CaptureRequest<'a> {
    pub camera: &'a Camera,
    pub surface: SurfaceSize,
    /// Color pass or normal-map pass.
    pub pass: MapKind,
    /// Clear color of the render target.
    pub background: Rgba8,
}

/// Renders the current camera view of a model into a bitmap.
///
/// Implementations own the render surface for the duration of one call and release it before
/// returning. The returned bitmap is `surface.width x surface.height`.
pub trait Extractor {
    fn extract(&mut self, req: &CaptureRequest<'_>, model: &dyn BakeModel) -> BakeResult<Bitmap>;
}
