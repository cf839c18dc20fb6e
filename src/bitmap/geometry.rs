//! Pure bitmap geometry used by trimming and unification.
//!
//! Everything here is deterministic and stateless. Rect corners are inclusive and expressed in the
//! pixel space of the bitmap they are applied to.

use crate::{
    bitmap::Bitmap,
    foundation::{
        core::{IntegerPoint, IntegerRect, NORMAL_MAP_COLOR, Rgba8, margin_i32},
        error::{BakeError, BakeResult},
    },
};

/// Which kind of map a bitmap holds; decides how crop padding is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Color,
    Normal,
}

/// Minimal rectangle enclosing every pixel with non-zero alpha.
///
/// Returns `None` for a fully transparent bitmap.
pub fn compute_tight_bound(bitmap: &Bitmap) -> Option<IntegerRect> {
    let mut bound = IntegerRect::EMPTY;
    for y in 0..bitmap.height() {
        let row = bitmap.row(y);
        let mut first = None;
        let mut last = None;
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] != 0 {
                first.get_or_insert(x);
                last = Some(x);
            }
        }
        if let (Some(first), Some(last)) = (first, last) {
            let yi = y as i32;
            bound = bound.union(IntegerRect::from_corners(first as i32, yi, last as i32, yi));
        }
    }
    (!bound.is_empty()).then_some(bound)
}

/// Degenerate bound used when a frame has no foreground: a 3x3 square around the pivot.
pub fn pivot_fallback_bound(pivot: IntegerPoint) -> IntegerRect {
    IntegerRect::around(pivot, 1)
}

/// [`compute_tight_bound`], falling back to [`pivot_fallback_bound`] on empty content.
pub fn tight_bound_or_pivot(bitmap: &Bitmap, pivot: IntegerPoint) -> IntegerRect {
    compute_tight_bound(bitmap).unwrap_or_else(|| pivot_fallback_bound(pivot))
}

/// Copy `rect` out of `src` into a new bitmap padded by `margin` on every side.
///
/// The output is `(rect.width + 2 * margin) x (rect.height + 2 * margin)`. The margin, and any part
/// of `rect` that lies outside `src`, is filled with `background` for color maps and with
/// [`NORMAL_MAP_COLOR`] for normal maps.
pub fn crop_with_margin(
    src: &Bitmap,
    rect: IntegerRect,
    margin: u32,
    background: Rgba8,
    kind: MapKind,
) -> BakeResult<Bitmap> {
    let fill = match kind {
        MapKind::Color => background,
        MapKind::Normal => NORMAL_MAP_COLOR,
    };
    crop_with_fill(src, rect, margin, fill)
}

fn crop_with_fill(src: &Bitmap, rect: IntegerRect, margin: u32, fill: Rgba8) -> BakeResult<Bitmap> {
    if rect.is_empty() {
        return Err(BakeError::geometry("cannot crop to an empty rect"));
    }
    let pad = margin
        .checked_mul(2)
        .ok_or_else(|| BakeError::geometry(format!("crop margin {margin} is too large")))?;
    let out_w = rect
        .width()
        .checked_add(pad)
        .ok_or_else(|| BakeError::geometry("crop width overflows"))?;
    let out_h = rect
        .height()
        .checked_add(pad)
        .ok_or_else(|| BakeError::geometry("crop height overflows"))?;

    let mut out = Bitmap::filled(out_w, out_h, fill);
    if src.width() == 0 || src.height() == 0 {
        return Ok(out);
    }

    let src_max_x = src.width() as i64 - 1;
    let src_max_y = src.height() as i64 - 1;
    let x0 = i64::from(rect.min.x).max(0);
    let x1 = i64::from(rect.max.x).min(src_max_x);
    let y0 = i64::from(rect.min.y).max(0);
    let y1 = i64::from(rect.max.y).min(src_max_y);
    if x0 > x1 || y0 > y1 {
        return Ok(out);
    }

    let m = i64::from(margin);
    let dst_x = (x0 - i64::from(rect.min.x) + m) as usize;
    let span = (x1 - x0 + 1) as usize * 4;
    for sy in y0..=y1 {
        let dy = (sy - i64::from(rect.min.y) + m) as u32;
        let src_row = src.row(sy as u32);
        let dst_row = out.row_mut(dy);
        let s = x0 as usize * 4;
        dst_row[dst_x * 4..dst_x * 4 + span].copy_from_slice(&src_row[s..s + span]);
    }
    Ok(out)
}

/// Re-express `pivot` in the local space of a bitmap cropped at `rect_min` with `margin`.
pub fn adjust_pivot(pivot: IntegerPoint, rect_min: IntegerPoint, margin: u32) -> IntegerPoint {
    pivot.subtract_with_margin(rect_min, margin)
}

/// Grow `accumulator` to cover `rect`. Unioning into [`IntegerRect::EMPTY`] yields `rect`.
pub fn union_rect(accumulator: IntegerRect, rect: IntegerRect) -> IntegerRect {
    accumulator.union(rect)
}

/// Top-left of a crop's output bitmap in the source pixel space.
pub(crate) fn crop_origin(rect: IntegerRect, margin: u32) -> IntegerPoint {
    let m = margin_i32(margin);
    IntegerPoint::new(rect.min.x - m, rect.min.y - m)
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/geometry.rs"]
mod tests;
