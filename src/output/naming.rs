use std::path::{Path, PathBuf};

use crate::foundation::error::{BakeError, BakeResult};

fn default_asset_root() -> PathBuf {
    PathBuf::from("Assets")
}

fn default_folder() -> String {
    "Baked".to_string()
}

fn default_shader() -> String {
    crate::output::material::DEFAULT_SHADER.to_string()
}

/// Where and under which names a run writes its outputs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputOptions {
    /// Every output lands under this directory.
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
    /// Relative folder under `asset_root`. Must not escape it.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Appended to the model name to form the file base name.
    #[serde(default)]
    pub name_suffix: String,
    #[serde(default = "default_shader")]
    pub material_shader: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            asset_root: default_asset_root(),
            folder: default_folder(),
            name_suffix: String::new(),
            material_shader: default_shader(),
        }
    }
}

/// Normalize a folder relative to the asset root: `\` becomes `/`, `.` and empty parts are
/// dropped, absolute paths and `..` are rejected. An empty result means the root itself.
pub fn normalize_folder(folder: &str) -> BakeResult<String> {
    let s = folder.replace('\\', "/");
    if s.starts_with('/') || Path::new(&s).is_absolute() {
        return Err(BakeError::config(format!(
            "output folder '{folder}' must be relative to the asset root"
        )));
    }
    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BakeError::config(format!(
                "output folder '{folder}' must not contain '..'"
            )));
        }
        parts.push(part);
    }
    Ok(parts.join("/"))
}

fn check_name(kind: &str, name: &str) -> BakeResult<()> {
    if name.trim().is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(BakeError::config(format!(
            "{kind} '{name}' is not usable as a file name"
        )));
    }
    Ok(())
}

/// Output paths for one texture/material/sprite-sheet group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    pub stem: String,
    pub texture: PathBuf,
    pub normal: PathBuf,
    pub material: PathBuf,
    pub sprites: PathBuf,
}

/// Resolved output naming: `<asset_root>/<folder>/<model>` holding files based on
/// `<model><suffix>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNaming {
    dir: PathBuf,
    base: String,
}

impl OutputNaming {
    pub fn new(opts: &OutputOptions, model_name: &str) -> BakeResult<Self> {
        check_name("model name", model_name)?;
        if !opts.name_suffix.is_empty() {
            check_name("name suffix", &opts.name_suffix)?;
        }
        let folder = normalize_folder(&opts.folder)?;
        let mut dir = opts.asset_root.clone();
        if !folder.is_empty() {
            dir.push(folder);
        }
        dir.push(model_name);
        Ok(Self {
            dir,
            base: format!("{model_name}{}", opts.name_suffix),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Paths for a single frame (`Some(frame_name)`) or for the packed atlas (`None`).
    pub fn assets(&self, frame: Option<&str>) -> AssetPaths {
        let stem = match frame {
            Some(f) => format!("{}_{f}", self.base),
            None => self.base.clone(),
        };
        AssetPaths {
            texture: self.dir.join(format!("{stem}.png")),
            normal: self.dir.join(format!("{stem}_normal.png")),
            material: self.dir.join(format!("{stem}.mat.json")),
            sprites: self.dir.join(format!("{stem}.sprites.json")),
            stem,
        }
    }

    pub fn prefab(&self) -> PathBuf {
        self.dir.join(format!("{}.prefab.json", self.base))
    }
}
