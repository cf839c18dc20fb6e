use crate::scene::{camera::Camera, model::BakeModel};

/// What turns between views: the camera around the model, or the model in front of the camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewRotation {
    #[default]
    Camera,
    Model,
}

/// One configured view of the model.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewDescriptor {
    pub name: String,
    pub angle_deg: f32,
    /// Re-arrange shadow geometry after this view is applied.
    #[serde(default)]
    pub rebuild_shadow: bool,
}

impl ViewDescriptor {
    pub fn new(name: impl Into<String>, angle_deg: f32) -> Self {
        Self {
            name: name.into(),
            angle_deg,
            rebuild_shadow: false,
        }
    }

    /// Pose the camera/model pair for this view.
    pub fn apply(
        &self,
        rotation: ViewRotation,
        slope_deg: f32,
        camera: &mut Camera,
        model: &mut dyn BakeModel,
    ) {
        match rotation {
            ViewRotation::Camera => camera.orbit(self.angle_deg, slope_deg),
            ViewRotation::Model => {
                model.rotate(self.angle_deg);
                camera.orbit(0.0, slope_deg);
            }
        }
    }

    /// `(rot_x, rot_y)` handed to the normal-map material for this view.
    pub fn normal_map_rotation(&self, rotation: ViewRotation, slope_deg: f32) -> (f32, f32) {
        let rot_y = match rotation {
            ViewRotation::Camera => self.angle_deg,
            ViewRotation::Model => 0.0,
        };
        (slope_deg, rot_y)
    }
}

/// `count` views evenly spaced around the model, named by their angle (`"000"`, `"090"`, ...).
pub fn turntable(count: u32) -> Vec<ViewDescriptor> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| {
            let angle = step * i as f32;
            ViewDescriptor::new(format!("{:03}", angle.round() as i32), angle)
        })
        .collect()
}
