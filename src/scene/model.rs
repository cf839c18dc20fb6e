use crate::{foundation::core::WorldPoint, scene::sampler::SampledFrame};

/// Normal-encoding material substituted onto the model during the normal-map pass.
///
/// Owned by the bake run: created when the run initializes and dropped when it ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalMapMaterial {
    /// Slope of the view, in degrees.
    pub rot_x: f32,
    /// Camera yaw of the view, in degrees (0 when the model itself is rotated).
    pub rot_y: f32,
}

impl NormalMapMaterial {
    pub fn set_rotation(&mut self, rot_x: f32, rot_y: f32) {
        self.rot_x = rot_x;
        self.rot_y = rot_y;
    }
}

/// Materials taken off a model by [`BakeModel::swap_materials`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialBackup(pub Vec<String>);

/// The thing being baked: a mesh animation, a particle system, a pre-rendered sequence.
///
/// The pipeline only animates, positions and re-skins the model. Rendering it is the
/// [`Extractor`](crate::Extractor)'s job.
pub trait BakeModel {
    fn name(&self) -> &str;

    fn position(&self) -> WorldPoint;
    fn set_position(&mut self, position: WorldPoint);

    /// Ground anchor that becomes each view's 2D pivot.
    fn pivot_position(&self) -> WorldPoint;

    /// Size of the model's bounds in the current pose.
    fn extent(&self) -> WorldPoint;

    fn rotation_deg(&self) -> f32;
    fn rotate(&mut self, angle_deg: f32);

    /// Animation times to capture, in capture order.
    fn sampled_frames(&self) -> Vec<SampledFrame>;
    fn advance_time(&mut self, time: f32);
    fn current_time(&self) -> f32;
    fn clear_frames(&mut self);

    /// Put `material` on every renderer and return what was there before.
    fn swap_materials(&mut self, material: &NormalMapMaterial) -> MaterialBackup;
    fn restore_materials(&mut self, backup: MaterialBackup);
}
