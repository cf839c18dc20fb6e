//! Atlas packing.
//!
//! [`ShelfPacker`] is deterministic: cells are placed in order of height (desc), width (desc),
//! then input index, onto shelves that open top to bottom. The atlas starts at the smallest
//! power-of-two square that fits the largest cell and doubles its shorter side until everything
//! fits or `max_size` is exceeded. Color and normal atlases share one layout.

use crate::{
    bitmap::Bitmap,
    foundation::{
        core::{CLEAR_COLOR, IntegerPoint, NORMAL_MAP_COLOR},
        error::{BakeError, BakeResult},
    },
    output::sprite::AtlasRect,
};

/// Parallel arrays describing the frames to pack. Index `i` of every array is the same frame.
#[derive(Clone, Copy, Debug)]
pub struct PackRequest<'a> {
    pub names: &'a [String],
    pub pivots: &'a [IntegerPoint],
    pub colors: &'a [Bitmap],
    /// Either a normal map for every frame or none at all.
    pub normals: Option<&'a [Bitmap]>,
}

impl PackRequest<'_> {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn validate(&self) -> BakeResult<()> {
        let n = self.colors.len();
        if self.names.len() != n || self.pivots.len() != n {
            return Err(BakeError::packing(format!(
                "pack request arrays disagree: {} names, {} pivots, {} bitmaps",
                self.names.len(),
                self.pivots.len(),
                n
            )));
        }
        if let Some(normals) = self.normals {
            if normals.len() != n {
                return Err(BakeError::packing(format!(
                    "expected a normal map for each of {n} frames, got {}",
                    normals.len()
                )));
            }
            for ((name, c), nm) in self.names.iter().zip(self.colors).zip(normals) {
                if (c.width(), c.height()) != (nm.width(), nm.height()) {
                    return Err(BakeError::packing(format!(
                        "normal map of '{name}' is {}x{}, color is {}x{}",
                        nm.width(),
                        nm.height(),
                        c.width(),
                        c.height()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// One packed frame. `pivot` is relative to `rect`'s top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedCell {
    pub name: String,
    pub rect: AtlasRect,
    pub pivot: IntegerPoint,
}

#[derive(Clone, Debug)]
pub struct PackedAtlas {
    pub color: Bitmap,
    pub normal: Option<Bitmap>,
    /// Cells in request order.
    pub cells: Vec<PackedCell>,
}

/// Combines many bitmaps into one atlas texture.
pub trait Packer {
    fn pack(&mut self, req: &PackRequest<'_>) -> BakeResult<PackedAtlas>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShelfPacker {
    /// Empty pixels kept around every cell.
    pub padding: u32,
    pub max_size: u32,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self {
            padding: 2,
            max_size: 4096,
        }
    }
}

struct Shelf {
    y: u32,
    height: u32,
    next_x: u32,
}

impl ShelfPacker {
    pub fn new(padding: u32, max_size: u32) -> Self {
        Self { padding, max_size }
    }

    fn padded(&self, b: &Bitmap) -> BakeResult<(u32, u32)> {
        let pad = self.padding.saturating_mul(2);
        match (b.width().checked_add(pad), b.height().checked_add(pad)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(BakeError::packing("cell size overflows")),
        }
    }

    /// Shelf layout of `order` inside `width x height`; `None` if it does not fit.
    fn layout(
        &self,
        sizes: &[(u32, u32)],
        order: &[usize],
        width: u32,
        height: u32,
    ) -> Option<Vec<AtlasRect>> {
        let mut shelves: Vec<Shelf> = Vec::new();
        let mut placed = vec![AtlasRect::default(); sizes.len()];

        for &i in order {
            let (w, h) = sizes[i];
            let slot = shelves
                .iter_mut()
                .find(|s| s.next_x + w <= width && h <= s.height);
            let (x, y) = match slot {
                Some(shelf) => {
                    let x = shelf.next_x;
                    shelf.next_x += w;
                    (x, shelf.y)
                }
                None => {
                    let y = shelves.last().map_or(0, |s| s.y + s.height);
                    if y + h > height || w > width {
                        return None;
                    }
                    shelves.push(Shelf {
                        y,
                        height: h,
                        next_x: w,
                    });
                    (0, y)
                }
            };
            placed[i] = AtlasRect::new(
                x + self.padding,
                y + self.padding,
                w - 2 * self.padding,
                h - 2 * self.padding,
            );
        }
        Some(placed)
    }
}

impl Packer for ShelfPacker {
    #[tracing::instrument(level = "debug", skip_all, fields(frames = req.len()))]
    fn pack(&mut self, req: &PackRequest<'_>) -> BakeResult<PackedAtlas> {
        req.validate()?;
        if req.is_empty() {
            return Err(BakeError::packing("nothing to pack"));
        }
        if self.max_size == 0 {
            return Err(BakeError::config("packing max_size must be > 0"));
        }

        let sizes = req
            .colors
            .iter()
            .map(|b| self.padded(b))
            .collect::<BakeResult<Vec<_>>>()?;
        let mut order: Vec<usize> = (0..sizes.len()).collect();
        order.sort_by(|&a, &b| {
            sizes[b]
                .1
                .cmp(&sizes[a].1)
                .then(sizes[b].0.cmp(&sizes[a].0))
                .then(a.cmp(&b))
        });

        let widest = sizes.iter().map(|s| s.0).max().unwrap_or(1);
        let tallest = sizes.iter().map(|s| s.1).max().unwrap_or(1);
        let side = widest.max(tallest).max(1).next_power_of_two();
        let (mut width, mut height) = (side, side);

        let rects = loop {
            if width > self.max_size || height > self.max_size {
                return Err(BakeError::packing(format!(
                    "{} frames do not fit in a {max}x{max} atlas",
                    sizes.len(),
                    max = self.max_size
                )));
            }
            if let Some(rects) = self.layout(&sizes, &order, width, height) {
                break rects;
            }
            if width <= height {
                width *= 2;
            } else {
                height *= 2;
            }
        };

        let mut color = Bitmap::filled(width, height, CLEAR_COLOR);
        for (src, r) in req.colors.iter().zip(&rects) {
            color.blit(src, r.x, r.y);
        }
        let normal = req.normals.map(|normals| {
            let mut atlas = Bitmap::filled(width, height, NORMAL_MAP_COLOR);
            for (src, r) in normals.iter().zip(&rects) {
                atlas.blit(src, r.x, r.y);
            }
            atlas
        });

        let cells = req
            .names
            .iter()
            .zip(req.pivots)
            .zip(rects)
            .map(|((name, pivot), rect)| PackedCell {
                name: name.clone(),
                rect,
                pivot: *pivot,
            })
            .collect();

        tracing::debug!(width, height, "atlas packed");
        Ok(PackedAtlas {
            color,
            normal,
            cells,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/packer.rs"]
mod tests;
