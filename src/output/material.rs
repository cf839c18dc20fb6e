use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const DEFAULT_SHADER: &str = "Sprites/Default";

/// A material asset: a shader plus textures bound to named slots.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Material {
    pub name: String,
    pub shader: String,
    #[serde(default)]
    pub textures: BTreeMap<String, PathBuf>,
}

impl Material {
    pub fn new(name: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            textures: BTreeMap::new(),
        }
    }

    pub fn texture(&self, slot: &str) -> Option<&Path> {
        self.textures.get(slot).map(PathBuf::as_path)
    }

    pub fn set_texture(&mut self, slot: impl Into<String>, path: impl Into<PathBuf>) {
        self.textures.insert(slot.into(), path.into());
    }
}

/// Binds baked textures onto a material's texture slots.
pub trait MaterialBuilder {
    fn bind_textures(&self, material: &mut Material, color: &Path, normal: Option<&Path>);
}

/// Binds the color texture to the main slot and, when present, the normal map to the bump slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardMaterialBuilder {
    pub main_slot: String,
    pub bump_slot: String,
}

impl Default for StandardMaterialBuilder {
    fn default() -> Self {
        Self {
            main_slot: "_MainTex".to_string(),
            bump_slot: "_BumpMap".to_string(),
        }
    }
}

impl MaterialBuilder for StandardMaterialBuilder {
    fn bind_textures(&self, material: &mut Material, color: &Path, normal: Option<&Path>) {
        material.set_texture(self.main_slot.as_str(), color);
        if let Some(normal) = normal {
            material.set_texture(self.bump_slot.as_str(), normal);
        }
    }
}
