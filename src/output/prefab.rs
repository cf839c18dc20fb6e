use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::error::{BakeError, BakeResult},
    output::sprite::SpriteRef,
};

pub const SPRITE_RENDERER: &str = "SpriteRenderer";

/// Object graph instantiated after a bake and bound to its first sprite and material.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PrefabTemplate {
    pub name: String,
    /// Component kinds on the root object, e.g. `"SpriteRenderer"`.
    #[serde(default)]
    pub components: Vec<String>,
}

impl PrefabTemplate {
    pub fn validate(&self) -> BakeResult<()> {
        if self.name.trim().is_empty() {
            return Err(BakeError::config("prefab template name must be non-empty"));
        }
        Ok(())
    }

    pub fn instantiate(&self) -> PrefabInstance {
        PrefabInstance {
            name: self.name.clone(),
            components: self
                .components
                .iter()
                .map(|kind| Component {
                    kind: kind.clone(),
                    properties: BTreeMap::new(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Component {
    pub kind: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PrefabInstance {
    pub name: String,
    pub components: Vec<Component>,
}

impl PrefabInstance {
    pub fn component(&self, kind: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.kind == kind)
    }

    pub fn component_mut(&mut self, kind: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind == kind)
    }
}

/// Binds bake outputs onto an instantiated template.
pub trait TemplateBuilder {
    fn bind_first_sprite(&self, instance: &mut PrefabInstance, sprite: &SpriteRef);
    fn bind_first_material(&self, instance: &mut PrefabInstance, material: &Path);
}

/// Writes the sprite and material onto the root `SpriteRenderer`, if the template has one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpriteRendererBinder;

impl TemplateBuilder for SpriteRendererBinder {
    fn bind_first_sprite(&self, instance: &mut PrefabInstance, sprite: &SpriteRef) {
        let Some(renderer) = instance.component_mut(SPRITE_RENDERER) else {
            return;
        };
        renderer
            .properties
            .insert("sprite".to_string(), sprite.name.clone());
        renderer.properties.insert(
            "sprite_texture".to_string(),
            sprite.texture.display().to_string(),
        );
    }

    fn bind_first_material(&self, instance: &mut PrefabInstance, material: &Path) {
        if let Some(renderer) = instance.component_mut(SPRITE_RENDERER) {
            renderer
                .properties
                .insert("material".to_string(), material.display().to_string());
        }
    }
}
