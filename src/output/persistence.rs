use std::path::{Path, PathBuf};

use crate::{
    bitmap::Bitmap,
    foundation::error::{BakeError, BakeResult},
    output::{material::Material, prefab::PrefabInstance, sprite::SpriteSheet},
};

/// Storage for bake outputs.
///
/// Paths are full output paths produced by [`OutputNaming`](crate::OutputNaming). Anything
/// saved before a run fails stays saved.
pub trait Persistence {
    fn create_folder(&mut self, dir: &Path) -> BakeResult<()>;
    fn save_texture(&mut self, path: &Path, bitmap: &Bitmap) -> BakeResult<()>;
    fn save_material(&mut self, path: &Path, material: &Material) -> BakeResult<()>;
    fn save_sprite_sheet(&mut self, path: &Path, sheet: &SpriteSheet) -> BakeResult<()>;
    fn save_prefab(&mut self, path: &Path, prefab: &PrefabInstance) -> BakeResult<()>;
}

/// Writes textures as PNG and everything else as pretty JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsPersistence;

impl FsPersistence {
    fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> BakeResult<()> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| BakeError::serde(format!("encode '{}': {e}", path.display())))?;
        std::fs::write(path, bytes)
            .map_err(|e| BakeError::persistence(format!("write '{}': {e}", path.display())))
    }
}

impl Persistence for FsPersistence {
    fn create_folder(&mut self, dir: &Path) -> BakeResult<()> {
        std::fs::create_dir_all(dir)
            .map_err(|e| BakeError::persistence(format!("create '{}': {e}", dir.display())))
    }

    fn save_texture(&mut self, path: &Path, bitmap: &Bitmap) -> BakeResult<()> {
        bitmap
            .to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| BakeError::persistence(format!("write png '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "texture saved");
        Ok(())
    }

    fn save_material(&mut self, path: &Path, material: &Material) -> BakeResult<()> {
        Self::write_json(path, material)
    }

    fn save_sprite_sheet(&mut self, path: &Path, sheet: &SpriteSheet) -> BakeResult<()> {
        Self::write_json(path, sheet)
    }

    fn save_prefab(&mut self, path: &Path, prefab: &PrefabInstance) -> BakeResult<()> {
        Self::write_json(path, prefab)
    }
}

/// In-memory persistence for tests and dry runs. Saves are kept in call order.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    pub(crate) folders: Vec<PathBuf>,
    pub(crate) textures: Vec<(PathBuf, Bitmap)>,
    pub(crate) materials: Vec<(PathBuf, Material)>,
    pub(crate) sprite_sheets: Vec<(PathBuf, SpriteSheet)>,
    pub(crate) prefabs: Vec<(PathBuf, PrefabInstance)>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn textures(&self) -> &[(PathBuf, Bitmap)] {
        &self.textures
    }

    pub fn materials(&self) -> &[(PathBuf, Material)] {
        &self.materials
    }

    pub fn sprite_sheets(&self) -> &[(PathBuf, SpriteSheet)] {
        &self.sprite_sheets
    }

    pub fn prefabs(&self) -> &[(PathBuf, PrefabInstance)] {
        &self.prefabs
    }

    pub fn texture(&self, path: &Path) -> Option<&Bitmap> {
        self.textures
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b)
    }
}

impl Persistence for InMemoryPersistence {
    fn create_folder(&mut self, dir: &Path) -> BakeResult<()> {
        if !self.folders.iter().any(|d| d == dir) {
            self.folders.push(dir.to_path_buf());
        }
        Ok(())
    }

    fn save_texture(&mut self, path: &Path, bitmap: &Bitmap) -> BakeResult<()> {
        self.textures.push((path.to_path_buf(), bitmap.clone()));
        Ok(())
    }

    fn save_material(&mut self, path: &Path, material: &Material) -> BakeResult<()> {
        self.materials.push((path.to_path_buf(), material.clone()));
        Ok(())
    }

    fn save_sprite_sheet(&mut self, path: &Path, sheet: &SpriteSheet) -> BakeResult<()> {
        self.sprite_sheets.push((path.to_path_buf(), sheet.clone()));
        Ok(())
    }

    fn save_prefab(&mut self, path: &Path, prefab: &PrefabInstance) -> BakeResult<()> {
        self.prefabs.push((path.to_path_buf(), prefab.clone()));
        Ok(())
    }
}
