use std::path::PathBuf;

use crate::{
    foundation::{
        core::WorldPoint,
        error::{BakeError, BakeResult},
    },
    scene::{
        model::{BakeModel, MaterialBackup, NormalMapMaterial},
        sampler::{FrameSampler, SampledFrame},
    },
};

pub const NORMAL_MAP_MATERIAL_NAME: &str = "normal_map";

fn unit_extent() -> WorldPoint {
    WorldPoint::new(1.0, 1.0, 1.0)
}

/// Description of a model whose frames were rendered ahead of time into image files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceModelDesc {
    pub name: String,
    /// Directory holding one sub-directory per yaw angle.
    pub root: PathBuf,
    pub sampler: FrameSampler,
    #[serde(default)]
    pub position: WorldPoint,
    #[serde(default = "unit_extent")]
    pub extent: WorldPoint,
    /// Pin the pivot to the ground plane (y = 0) instead of the model origin.
    #[serde(default)]
    pub ground_pivot: bool,
    #[serde(default)]
    pub materials: Vec<String>,
}

impl SequenceModelDesc {
    pub fn validate(&self) -> BakeResult<()> {
        if self.name.trim().is_empty() {
            return Err(BakeError::config("model name must be non-empty"));
        }
        if !(self.position.is_finite() && self.extent.is_finite()) {
            return Err(BakeError::config("model position and extent must be finite"));
        }
        self.sampler.validate()
    }
}

/// [`BakeModel`] backed by a pre-rendered image sequence.
#[derive(Clone, Debug)]
pub struct ImageSequenceModel {
    desc: SequenceModelDesc,
    position: WorldPoint,
    rotation_deg: f32,
    time: f32,
    materials: Vec<String>,
}

impl ImageSequenceModel {
    pub fn new(desc: SequenceModelDesc) -> Self {
        Self {
            position: desc.position,
            materials: desc.materials.clone(),
            rotation_deg: 0.0,
            time: 0.0,
            desc,
        }
    }

    pub fn desc(&self) -> &SequenceModelDesc {
        &self.desc
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }
}

impl BakeModel for ImageSequenceModel {
    fn name(&self) -> &str {
        &self.desc.name
    }

    fn position(&self) -> WorldPoint {
        self.position
    }

    fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    fn pivot_position(&self) -> WorldPoint {
        let y = if self.desc.ground_pivot {
            0.0
        } else {
            self.position.y
        };
        WorldPoint::new(self.position.x, y, self.position.z)
    }

    fn extent(&self) -> WorldPoint {
        self.desc.extent
    }

    fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    fn rotate(&mut self, angle_deg: f32) {
        self.rotation_deg = angle_deg;
    }

    fn sampled_frames(&self) -> Vec<SampledFrame> {
        self.desc.sampler.sample()
    }

    fn advance_time(&mut self, time: f32) {
        self.time = time;
    }

    fn current_time(&self) -> f32 {
        self.time
    }

    fn clear_frames(&mut self) {
        self.time = 0.0;
    }

    fn swap_materials(&mut self, _material: &NormalMapMaterial) -> MaterialBackup {
        let replaced = vec![NORMAL_MAP_MATERIAL_NAME.to_string(); self.materials.len().max(1)];
        MaterialBackup(std::mem::replace(&mut self.materials, replaced))
    }

    fn restore_materials(&mut self, backup: MaterialBackup) {
        self.materials = backup.0;
    }
}
