//! Unification: re-cropping accumulated frames against one shared rectangle.

use crate::{
    bake::{options::UnifyScope, record::FrameRecord},
    bitmap::geometry::union_rect,
    foundation::{core::IntegerRect, error::BakeResult},
};

/// Union of the tight bounds seen so far, per view or across all views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnifiedBounds {
    PerView(Vec<IntegerRect>),
    AllViews(IntegerRect),
}

impl UnifiedBounds {
    /// Empty accumulator for `scope`, or `None` when unification is off.
    pub fn new(scope: UnifyScope, view_count: usize) -> Option<Self> {
        match scope {
            UnifyScope::Off => None,
            UnifyScope::PerView => Some(Self::PerView(vec![IntegerRect::EMPTY; view_count])),
            UnifyScope::AllViews => Some(Self::AllViews(IntegerRect::EMPTY)),
        }
    }

    pub fn include(&mut self, view_index: usize, rect: IntegerRect) {
        match self {
            Self::PerView(rects) => {
                if let Some(acc) = rects.get_mut(view_index) {
                    *acc = union_rect(*acc, rect);
                }
            }
            Self::AllViews(acc) => *acc = union_rect(*acc, rect),
        }
    }

    /// Rectangle that frames of `view_index` are cropped to. Empty if nothing was included.
    pub fn bound_for(&self, view_index: usize) -> IntegerRect {
        match self {
            Self::PerView(rects) => rects.get(view_index).copied().unwrap_or(IntegerRect::EMPTY),
            Self::AllViews(acc) => *acc,
        }
    }
}

/// Crop every record to its unified bound plus `margin`.
///
/// Records whose bound is empty are left untouched. Running this twice with the same bounds
/// leaves the records bit-identical.
pub fn unify_records(
    records: &mut [FrameRecord],
    bounds: &UnifiedBounds,
    margin: u32,
) -> BakeResult<()> {
    for record in records.iter_mut() {
        let rect = bounds.bound_for(record.view_index);
        if rect.is_empty() {
            continue;
        }
        record.trim(rect, margin)?;
    }
    tracing::debug!(frames = records.len(), ?bounds, "frames unified");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/bake/unify.rs"]
mod tests;
