use std::path::PathBuf;

use crate::foundation::core::IntegerPoint;

/// Pixel rectangle inside a texture (top-left origin, exclusive size).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn overlaps(&self, other: &AtlasRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One named sprite: a region of a texture plus its pivot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpriteRef {
    pub name: String,
    pub texture: PathBuf,
    pub rect: AtlasRect,
    /// Pivot in pixels, relative to `rect`'s top-left (y down).
    pub pivot: IntegerPoint,
    /// Pivot as a fraction of `rect`, with y measured upwards from the bottom edge.
    pub pivot_normalized: [f32; 2],
}

impl SpriteRef {
    pub fn new(
        name: impl Into<String>,
        texture: impl Into<PathBuf>,
        rect: AtlasRect,
        pivot: IntegerPoint,
    ) -> Self {
        let w = rect.width.max(1) as f32;
        let h = rect.height.max(1) as f32;
        Self {
            name: name.into(),
            texture: texture.into(),
            rect,
            pivot,
            pivot_normalized: [pivot.x as f32 / w, 1.0 - pivot.y as f32 / h],
        }
    }
}

/// Sprite metadata for one texture, in input order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpriteSheet {
    pub texture: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<SpriteRef>,
}

impl SpriteSheet {
    pub fn find(&self, name: &str) -> Option<&SpriteRef> {
        self.sprites.iter().find(|s| s.name == name)
    }
}
