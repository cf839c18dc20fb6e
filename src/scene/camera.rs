use crate::foundation::{
    core::{IntegerPoint, WorldPoint},
    error::{BakeError, BakeResult},
};

/// Pixel size of the camera's render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Orthographic capture camera orbiting a look-at target.
///
/// `yaw_deg` turns around the world Y axis, `pitch_deg` tilts the view downwards. A camera without
/// a `surface` has nothing to render into; captures through it degrade to a blank bitmap.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    #[serde(default)]
    pub target: WorldPoint,
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default)]
    pub pitch_deg: f32,
    pub pixels_per_unit: f32,
    pub surface: Option<SurfaceSize>,
}

impl Camera {
    pub fn new(surface: SurfaceSize, pixels_per_unit: f32) -> Self {
        Self {
            target: WorldPoint::ZERO,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            pixels_per_unit,
            surface: Some(surface),
        }
    }

    pub fn validate(&self) -> BakeResult<()> {
        if !(self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0) {
            return Err(BakeError::config("camera pixels_per_unit must be > 0"));
        }
        if !(self.yaw_deg.is_finite() && self.pitch_deg.is_finite() && self.target.is_finite()) {
            return Err(BakeError::config("camera pose must be finite"));
        }
        if let Some(s) = self.surface
            && (s.width == 0 || s.height == 0)
        {
            return Err(BakeError::config("camera surface must be non-empty"));
        }
        Ok(())
    }

    pub fn look_at(&mut self, target: WorldPoint) {
        self.target = target;
    }

    pub fn orbit(&mut self, yaw_deg: f32, pitch_deg: f32) {
        self.yaw_deg = yaw_deg;
        self.pitch_deg = pitch_deg;
    }

    /// World-space width/depth covered by the render surface.
    pub fn world_footprint(&self) -> Option<(f32, f32)> {
        let s = self.surface?;
        Some((
            s.width as f32 / self.pixels_per_unit,
            s.height as f32 / self.pixels_per_unit,
        ))
    }

    /// Project a world point to image space (y down), rounding to the nearest pixel.
    pub fn world_to_screen(&self, p: WorldPoint) -> IntegerPoint {
        let (cx, cy) = self
            .surface
            .map(|s| (s.width as f32 * 0.5, s.height as f32 * 0.5))
            .unwrap_or((0.0, 0.0));

        let d = p.sub(self.target);
        let (sy, cyaw) = self.yaw_deg.to_radians().sin_cos();
        let (sp, cp) = self.pitch_deg.to_radians().sin_cos();

        let view_x = d.x * cyaw - d.z * sy;
        let view_z = d.x * sy + d.z * cyaw;
        let view_y = d.y * cp + view_z * sp;

        IntegerPoint::new(
            (cx + view_x * self.pixels_per_unit).round() as i32,
            (cy - view_y * self.pixels_per_unit).round() as i32,
        )
    }
}
