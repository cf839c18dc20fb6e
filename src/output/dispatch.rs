//! Turns finished frame records into saved assets.

use std::path::{Path, PathBuf};

use crate::{
    bake::record::FrameRecord,
    bitmap::Bitmap,
    foundation::error::{BakeError, BakeResult},
    output::{
        material::{Material, MaterialBuilder},
        naming::{AssetPaths, OutputNaming},
        packer::{PackRequest, Packer},
        persistence::Persistence,
        prefab::{PrefabTemplate, TemplateBuilder},
        sprite::{AtlasRect, SpriteRef, SpriteSheet},
    },
};

/// Paths written by a run, in write order, plus the first sprite and material for template
/// binding.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BakeOutputs {
    pub textures: Vec<PathBuf>,
    pub materials: Vec<PathBuf>,
    pub sprite_sheets: Vec<PathBuf>,
    pub prefab: Option<PathBuf>,
    pub first_sprite: Option<SpriteRef>,
    pub first_material: Option<PathBuf>,
}

impl BakeOutputs {
    fn note_sprite(&mut self, sprite: &SpriteRef) {
        if self.first_sprite.is_none() {
            self.first_sprite = Some(sprite.clone());
        }
    }

    fn note_material(&mut self, path: &Path) {
        if self.first_material.is_none() {
            self.first_material = Some(path.to_path_buf());
        }
    }
}

/// Collaborators shared by every finalization path.
pub struct FinalizeContext<'a> {
    pub naming: &'a OutputNaming,
    pub shader: &'a str,
    pub materials: &'a dyn MaterialBuilder,
    pub persistence: &'a mut dyn Persistence,
}

impl FinalizeContext<'_> {
    fn save_maps(
        &mut self,
        paths: &AssetPaths,
        color: &Bitmap,
        normal: Option<&Bitmap>,
        out: &mut BakeOutputs,
    ) -> BakeResult<Option<PathBuf>> {
        self.persistence.save_texture(&paths.texture, color)?;
        out.textures.push(paths.texture.clone());
        let normal_path = match normal {
            Some(n) => {
                self.persistence.save_texture(&paths.normal, n)?;
                out.textures.push(paths.normal.clone());
                Some(paths.normal.clone())
            }
            None => None,
        };

        let mut material = Material::new(paths.stem.clone(), self.shader);
        self.materials
            .bind_textures(&mut material, &paths.texture, normal_path.as_deref());
        self.persistence.save_material(&paths.material, &material)?;
        out.materials.push(paths.material.clone());
        out.note_material(&paths.material);
        Ok(normal_path)
    }

    fn save_sheet(
        &mut self,
        path: &Path,
        sheet: &SpriteSheet,
        out: &mut BakeOutputs,
    ) -> BakeResult<()> {
        self.persistence.save_sprite_sheet(path, sheet)?;
        out.sprite_sheets.push(path.to_path_buf());
        if let Some(first) = sheet.sprites.first() {
            out.note_sprite(first);
        }
        Ok(())
    }
}

/// Save one frame as its own texture(s), material and single-sprite sheet.
pub fn finalize_single(
    record: &FrameRecord,
    ctx: &mut FinalizeContext<'_>,
    out: &mut BakeOutputs,
) -> BakeResult<()> {
    let paths = ctx.naming.assets(Some(&record.name));
    let normal_texture = ctx.save_maps(&paths, &record.color, record.normal.as_ref(), out)?;

    let (w, h) = (record.color.width(), record.color.height());
    let sheet = SpriteSheet {
        texture: paths.texture.clone(),
        normal_texture,
        width: w,
        height: h,
        sprites: vec![SpriteRef::new(
            paths.stem.clone(),
            paths.texture.clone(),
            AtlasRect::new(0, 0, w, h),
            record.pivot,
        )],
    };
    ctx.save_sheet(&paths.sprites, &sheet, out)?;
    tracing::debug!(frame = %record.name, "frame finalized");
    Ok(())
}

/// Pack every record into one atlas in a single [`Packer::pack`] call and save it.
///
/// Sprite order follows record order. Normal maps are all-or-nothing: a mix of records with and
/// without a normal map is rejected.
pub fn finalize_packed(
    records: Vec<FrameRecord>,
    packer: &mut dyn Packer,
    ctx: &mut FinalizeContext<'_>,
    out: &mut BakeOutputs,
) -> BakeResult<()> {
    let with_normals = records.iter().filter(|r| r.normal.is_some()).count();
    if with_normals != 0 && with_normals != records.len() {
        return Err(BakeError::packing(format!(
            "{with_normals} of {} frames have a normal map; expected all or none",
            records.len()
        )));
    }

    let mut names = Vec::with_capacity(records.len());
    let mut pivots = Vec::with_capacity(records.len());
    let mut colors = Vec::with_capacity(records.len());
    let mut normals = Vec::with_capacity(with_normals);
    for r in records {
        names.push(r.name);
        pivots.push(r.pivot);
        colors.push(r.color);
        if let Some(n) = r.normal {
            normals.push(n);
        }
    }

    let atlas = packer.pack(&PackRequest {
        names: &names,
        pivots: &pivots,
        colors: &colors,
        normals: (with_normals > 0).then_some(normals.as_slice()),
    })?;
    if atlas.cells.len() != names.len() {
        return Err(BakeError::packing(format!(
            "packer returned {} cells for {} frames",
            atlas.cells.len(),
            names.len()
        )));
    }

    let paths = ctx.naming.assets(None);
    let normal_texture = ctx.save_maps(&paths, &atlas.color, atlas.normal.as_ref(), out)?;
    let sheet = SpriteSheet {
        texture: paths.texture.clone(),
        normal_texture,
        width: atlas.color.width(),
        height: atlas.color.height(),
        sprites: atlas
            .cells
            .iter()
            .map(|c| {
                SpriteRef::new(
                    format!("{}_{}", ctx.naming.base(), c.name),
                    paths.texture.clone(),
                    c.rect,
                    c.pivot,
                )
            })
            .collect(),
    };
    ctx.save_sheet(&paths.sprites, &sheet, out)?;
    tracing::info!(frames = names.len(), atlas = %paths.texture.display(), "atlas finalized");
    Ok(())
}

/// Instantiate `template`, bind the run's first sprite and material onto it and save it.
pub fn bind_template(
    template: &PrefabTemplate,
    builder: &dyn TemplateBuilder,
    ctx: &mut FinalizeContext<'_>,
    out: &mut BakeOutputs,
) -> BakeResult<()> {
    let mut instance = template.instantiate();
    if let Some(sprite) = &out.first_sprite {
        builder.bind_first_sprite(&mut instance, sprite);
    }
    if let Some(material) = &out.first_material {
        builder.bind_first_material(&mut instance, material);
    }
    let path = ctx.naming.prefab();
    ctx.persistence.save_prefab(&path, &instance)?;
    tracing::info!(prefab = %path.display(), "prefab saved");
    out.prefab = Some(path);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/dispatch.rs"]
mod tests;
