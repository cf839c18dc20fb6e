use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    bake::options::BakeOptions,
    foundation::error::{BakeError, BakeResult},
    scene::{
        camera::Camera,
        sequence::SequenceModelDesc,
        view::{ViewDescriptor, turntable},
    },
};

/// JSON description of one bake: which model, through which camera, from which views.
///
/// Views are either listed explicitly or generated as an evenly spaced turntable; exactly one
/// of `views` and `turntable` must be given.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BakeManifest {
    pub model: SequenceModelDesc,
    pub camera: Camera,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ViewDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turntable: Option<u32>,
    #[serde(default)]
    pub options: BakeOptions,
}

impl BakeManifest {
    pub fn from_reader<R: std::io::Read>(r: R) -> BakeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BakeError::serde(format!("parse bake manifest JSON: {e}")))
    }

    /// Read a manifest from disk. A relative model root is resolved against the manifest's
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> BakeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open bake manifest '{}'", path.display()))?;
        let mut manifest = Self::from_reader(BufReader::new(f))?;
        if manifest.model.root.is_relative()
            && let Some(dir) = path.parent()
        {
            manifest.model.root = dir.join(&manifest.model.root);
        }
        Ok(manifest)
    }

    /// The views to bake, in order.
    pub fn resolve_views(&self) -> BakeResult<Vec<ViewDescriptor>> {
        match (self.views.is_empty(), self.turntable) {
            (false, None) => Ok(self.views.clone()),
            (true, Some(n)) if n > 0 => Ok(turntable(n)),
            (true, Some(_)) => Err(BakeError::config("turntable view count must be >= 1")),
            (false, Some(_)) => Err(BakeError::config(
                "manifest gives both 'views' and 'turntable'; pick one",
            )),
            (true, None) => Err(BakeError::config(
                "manifest needs 'views' or 'turntable'",
            )),
        }
    }

    /// Check everything a run would check in `Initialize`, without touching the disk.
    pub fn validate(&self) -> BakeResult<()> {
        self.model.validate()?;
        self.camera.validate()?;
        self.options.validate()?;
        let views = self.resolve_views()?;
        for v in &views {
            if v.name.trim().is_empty() || !v.angle_deg.is_finite() {
                return Err(BakeError::config(format!(
                    "view '{}' needs a name and a finite angle",
                    v.name
                )));
            }
        }
        crate::output::naming::OutputNaming::new(&self.options.output, &self.model.name)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/manifest.rs"]
mod tests;
