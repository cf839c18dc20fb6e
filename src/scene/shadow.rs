use crate::{
    foundation::{
        core::WorldPoint,
        error::{BakeError, BakeResult},
    },
    scene::{camera::Camera, model::BakeModel},
};

/// Drop applied below the model's bottom so the shadow never z-fights the feet.
pub const SHADOW_GROUND_OFFSET: f32 = 0.01;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMode {
    #[default]
    None,
    /// Blob quad parented under the model, scaled to its footprint.
    Simple,
    /// Shadow rendered by a top-down camera onto a field quad.
    TopDown,
    /// Matte field that catches the model's real shadow.
    Matte,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShadowOptions {
    pub mode: ShadowMode,
    /// Capture the shadow alone, with the model moved out of view.
    pub shadow_only: bool,
    /// Multiplier on the model footprint for [`ShadowMode::Simple`].
    pub simple_scale: [f32; 2],
    /// Light elevation used to size the [`ShadowMode::Matte`] field.
    pub light_pitch_deg: f32,
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            mode: ShadowMode::None,
            shadow_only: false,
            simple_scale: [1.0, 1.0],
            light_pitch_deg: 50.0,
        }
    }
}

impl ShadowOptions {
    pub fn validate(&self) -> BakeResult<()> {
        if !self.simple_scale.iter().all(|v| v.is_finite() && *v >= 0.0) {
            return Err(BakeError::config("shadow simple_scale must be finite and >= 0"));
        }
        if self.mode == ShadowMode::Matte
            && !(self.light_pitch_deg > 0.0 && self.light_pitch_deg < 90.0)
        {
            return Err(BakeError::config(
                "matte shadow requires a light pitch in (0, 90) degrees",
            ));
        }
        Ok(())
    }
}

/// Places and scales shadow geometry for the configured mode.
pub trait ShadowPlacer {
    /// Position and size the shadow for `opts.mode` around `model`.
    fn arrange(
        &mut self,
        opts: &ShadowOptions,
        model: &dyn BakeModel,
        camera: &Camera,
    ) -> BakeResult<()>;

    fn set_visible(&mut self, visible: bool);

    /// Parent (`true`) or unparent the shadow from the model.
    fn set_attached(&mut self, attached: bool);

    /// Whether any shadow geometry exists to hide or detach.
    fn is_present(&self) -> bool {
        true
    }
}

/// Placer for scenes without shadow geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShadow;

impl ShadowPlacer for NoShadow {
    fn arrange(&mut self, _: &ShadowOptions, _: &dyn BakeModel, _: &Camera) -> BakeResult<()> {
        Ok(())
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn set_attached(&mut self, _attached: bool) {}

    fn is_present(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowTransform {
    pub position: WorldPoint,
    pub scale: WorldPoint,
    pub attached: bool,
    pub visible: bool,
}

impl Default for ShadowTransform {
    fn default() -> Self {
        Self {
            position: WorldPoint::ZERO,
            scale: WorldPoint::new(1.0, 1.0, 1.0),
            attached: false,
            visible: true,
        }
    }
}

/// Shadow geometry tracked as plain transforms.
///
/// `quad_size` is the unscaled world size of the blob quad, `field_size` the unscaled size of the
/// top-down/matte field (x, z).
#[derive(Clone, Debug)]
pub struct ShadowRig {
    pub quad_size: f32,
    pub field_size: [f32; 2],
    pub shadow: ShadowTransform,
    pub field: ShadowTransform,
}

impl Default for ShadowRig {
    fn default() -> Self {
        Self {
            quad_size: 1.0,
            field_size: [10.0, 10.0],
            shadow: ShadowTransform::default(),
            field: ShadowTransform::default(),
        }
    }
}

impl ShadowRig {
    fn locate(&mut self, mode: ShadowMode, model: &dyn BakeModel) {
        let mut bottom = model.pivot_position();
        bottom.y -= SHADOW_GROUND_OFFSET;
        self.shadow.position = bottom;
        if mode == ShadowMode::Simple {
            self.shadow.attached = true;
        }
    }

    fn scale_simple(&mut self, scale: [f32; 2], model: &dyn BakeModel) {
        if scale[0].hypot(scale[1]) == 0.0 {
            return;
        }
        let size = model.extent();
        let x_ratio = size.x / self.quad_size;
        let z_ratio = size.z / self.quad_size;
        self.shadow.scale = if x_ratio > 0.0 && z_ratio > 0.0 {
            WorldPoint::new(x_ratio * scale[0], 1.0, z_ratio * scale[1])
        } else {
            WorldPoint::new(scale[0], 1.0, scale[1])
        };
    }

    fn scale_top_down_field(&mut self, camera: &Camera) -> BakeResult<()> {
        let (w, d) = camera
            .world_footprint()
            .ok_or_else(|| BakeError::config("top-down shadow needs a camera render surface"))?;
        self.field.scale = WorldPoint::new(w / self.field_size[0], 1.0, d / self.field_size[1]);
        Ok(())
    }

    fn scale_matte_field(&mut self, light_pitch_deg: f32, model: &dyn BakeModel) {
        let tan = light_pitch_deg.to_radians().tan();
        let size = model.extent();
        let half_width = size.x.max(size.z) / 2.0;
        let width = (size.y / tan + half_width) * 2.0;
        self.field.scale = WorldPoint::new(width / self.field_size[0], 1.0, width / self.field_size[1]);
    }
}

impl ShadowPlacer for ShadowRig {
    fn arrange(
        &mut self,
        opts: &ShadowOptions,
        model: &dyn BakeModel,
        camera: &Camera,
    ) -> BakeResult<()> {
        if opts.mode == ShadowMode::None {
            return Ok(());
        }
        if self.quad_size <= 0.0 || self.field_size.iter().any(|v| *v <= 0.0) {
            return Err(BakeError::config("shadow geometry sizes must be > 0"));
        }

        self.locate(opts.mode, model);
        match opts.mode {
            ShadowMode::None => {}
            ShadowMode::Simple => self.scale_simple(opts.simple_scale, model),
            ShadowMode::TopDown => self.scale_top_down_field(camera)?,
            ShadowMode::Matte => self.scale_matte_field(opts.light_pitch_deg, model),
        }
        tracing::debug!(mode = ?opts.mode, shadow = ?self.shadow, field = ?self.field, "shadow arranged");
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.shadow.visible = visible;
    }

    fn set_attached(&mut self, attached: bool) {
        self.shadow.attached = attached;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shadow.rs"]
mod tests;
