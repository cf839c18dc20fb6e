//! Color and normal-map capture around an [`Extractor`].
//!
//! Both captures are total with respect to a missing render surface: they return
//! [`Bitmap::white`] instead of failing. Every temporary change made to the scene (parked model,
//! detached or hidden shadow, swapped materials) is undone by a guard, so it is restored on every
//! exit path including extractor errors.

use crate::{
    bitmap::{Bitmap, geometry::MapKind},
    capture::extractor::{CaptureRequest, Extractor},
    foundation::{
        core::{CLEAR_COLOR, NORMAL_MAP_COLOR, WorldPoint},
        error::BakeResult,
    },
    scene::{
        camera::Camera,
        model::{BakeModel, MaterialBackup, NormalMapMaterial},
        shadow::{ShadowMode, ShadowOptions, ShadowPlacer},
    },
};

/// Where the model is moved while only its shadow is captured.
pub const PARKING_POSITION: WorldPoint = WorldPoint::new(10_000.0, 0.0, 0.0);

struct ModelParked<'m> {
    model: &'m mut dyn BakeModel,
    home: WorldPoint,
}

impl<'m> ModelParked<'m> {
    fn park(model: &'m mut dyn BakeModel) -> Self {
        let home = model.position();
        model.set_position(PARKING_POSITION);
        Self { model, home }
    }
}

impl Drop for ModelParked<'_> {
    fn drop(&mut self) {
        self.model.set_position(self.home);
    }
}

/// Unparents the simple shadow so it stays put while the model is parked.
struct ShadowDetached<'s> {
    shadow: &'s mut dyn ShadowPlacer,
}

impl<'s> ShadowDetached<'s> {
    fn detach(shadow: &'s mut dyn ShadowPlacer) -> Self {
        shadow.set_attached(false);
        Self { shadow }
    }
}

impl Drop for ShadowDetached<'_> {
    fn drop(&mut self) {
        self.shadow.set_attached(true);
    }
}

struct ShadowHidden<'s> {
    shadow: &'s mut dyn ShadowPlacer,
}

impl<'s> ShadowHidden<'s> {
    fn hide(shadow: &'s mut dyn ShadowPlacer) -> Self {
        shadow.set_visible(false);
        Self { shadow }
    }
}

impl Drop for ShadowHidden<'_> {
    fn drop(&mut self) {
        self.shadow.set_visible(true);
    }
}

struct MaterialSwap<'m> {
    model: &'m mut dyn BakeModel,
    backup: Option<MaterialBackup>,
}

impl<'m> MaterialSwap<'m> {
    fn swap(model: &'m mut dyn BakeModel, material: &NormalMapMaterial) -> Self {
        let backup = model.swap_materials(material);
        Self {
            model,
            backup: Some(backup),
        }
    }
}

impl Drop for MaterialSwap<'_> {
    fn drop(&mut self) {
        if let Some(backup) = self.backup.take() {
            self.model.restore_materials(backup);
        }
    }
}

/// Capture the model's color pass through `camera`.
///
/// With `opts.shadow_only` (and a shadow mode other than `None`) the model is parked out of view
/// and only its shadow is rendered; a simple shadow is unparented for the duration.
pub fn capture_color(
    extractor: &mut dyn Extractor,
    shadow: &mut dyn ShadowPlacer,
    camera: &Camera,
    model: &mut dyn BakeModel,
    opts: &ShadowOptions,
) -> BakeResult<Bitmap> {
    let Some(surface) = camera.surface else {
        tracing::warn!("no render surface; color capture falls back to a blank bitmap");
        return Ok(Bitmap::white());
    };
    let req = CaptureRequest {
        camera,
        surface,
        pass: MapKind::Color,
        background: CLEAR_COLOR,
    };

    if opts.mode == ShadowMode::None || !opts.shadow_only {
        return extractor.extract(&req, model);
    }

    let _detached = (opts.mode == ShadowMode::Simple && shadow.is_present())
        .then(|| ShadowDetached::detach(shadow));
    let parked = ModelParked::park(model);
    extractor.extract(&req, &*parked.model)
}

/// Capture the normal-map pass: the model wears `material` (rotated by `rot_x`/`rot_y`), the
/// shadow is hidden and the target is cleared to the flat normal color.
pub fn capture_normal(
    extractor: &mut dyn Extractor,
    shadow: &mut dyn ShadowPlacer,
    camera: &Camera,
    model: &mut dyn BakeModel,
    material: &mut NormalMapMaterial,
    rot_x: f32,
    rot_y: f32,
) -> BakeResult<Bitmap> {
    let Some(surface) = camera.surface else {
        tracing::warn!("no render surface; normal capture falls back to a blank bitmap");
        return Ok(Bitmap::white());
    };

    material.set_rotation(rot_x, rot_y);
    let swapped = MaterialSwap::swap(model, material);
    let _hidden = shadow.is_present().then(|| ShadowHidden::hide(shadow));

    let req = CaptureRequest {
        camera,
        surface,
        pass: MapKind::Normal,
        background: NORMAL_MAP_COLOR,
    };
    extractor.extract(&req, &*swapped.model)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/adapter.rs"]
mod tests;
