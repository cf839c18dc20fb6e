use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    bitmap::{Bitmap, geometry::MapKind},
    capture::extractor::{CaptureRequest, Extractor},
    foundation::error::{BakeError, BakeResult},
    scene::model::BakeModel,
};

/// [`Extractor`] that reads pre-rendered frames instead of rendering.
///
/// Frames live at `<root>/<yaw:03>/<frame:04>.png`, with normal maps next to them as
/// `<frame:04>_normal.png`. The yaw is the camera yaw plus the model rotation, rounded to whole
/// degrees in `[0, 360)`. The frame is the sampled frame closest to the model's current time.
#[derive(Clone, Debug)]
pub struct SequenceExtractor {
    root: PathBuf,
}

impl SequenceExtractor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding `pass` for `frame` seen from `yaw_deg`.
    pub fn frame_path(&self, yaw_deg: f32, frame: u32, pass: MapKind) -> PathBuf {
        let yaw = (yaw_deg.round() as i32).rem_euclid(360);
        let file = match pass {
            MapKind::Color => format!("{frame:04}.png"),
            MapKind::Normal => format!("{frame:04}_normal.png"),
        };
        self.root.join(format!("{yaw:03}")).join(file)
    }
}

fn nearest_frame(model: &dyn BakeModel) -> u32 {
    let t = model.current_time();
    model
        .sampled_frames()
        .into_iter()
        .min_by(|a, b| (a.time - t).abs().total_cmp(&(b.time - t).abs()))
        .map_or(0, |f| f.index)
}

impl Extractor for SequenceExtractor {
    fn extract(&mut self, req: &CaptureRequest<'_>, model: &dyn BakeModel) -> BakeResult<Bitmap> {
        let frame = nearest_frame(model);
        let path = self.frame_path(req.camera.yaw_deg + model.rotation_deg(), frame, req.pass);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        let mut bitmap = Bitmap::decode(&bytes)?;

        if bitmap.width() != req.surface.width || bitmap.height() != req.surface.height {
            return Err(BakeError::capture(format!(
                "frame '{}' is {}x{}, camera surface is {}x{}",
                path.display(),
                bitmap.width(),
                bitmap.height(),
                req.surface.width,
                req.surface.height
            )));
        }

        if req.pass == MapKind::Normal {
            for y in 0..bitmap.height() as i32 {
                for x in 0..bitmap.width() as i32 {
                    if bitmap.pixel(x, y).is_some_and(|px| px[3] == 0) {
                        bitmap.set_pixel(x, y, req.background);
                    }
                }
            }
        }

        tracing::debug!(path = %path.display(), frame, "frame loaded");
        Ok(bitmap)
    }
}
