use crate::{
    bitmap::{
        Bitmap,
        geometry::{MapKind, adjust_pivot, crop_origin, crop_with_margin},
    },
    foundation::{
        core::{CLEAR_COLOR, IntegerPoint, IntegerRect},
        error::BakeResult,
    },
};

/// One captured frame on its way to finalization.
///
/// `origin` is where the bitmap's top-left sits in the capture's screen space; it starts at zero
/// and moves with every crop. Crop rectangles are always given in screen space and translated
/// through `origin`, so cropping twice with the same rect changes nothing the second time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRecord {
    pub name: String,
    pub view_index: usize,
    pub origin: IntegerPoint,
    /// Pivot in the bitmap's local pixel space.
    pub pivot: IntegerPoint,
    pub color: Bitmap,
    pub normal: Option<Bitmap>,
}

impl FrameRecord {
    pub fn new(
        name: impl Into<String>,
        view_index: usize,
        screen_pivot: IntegerPoint,
        color: Bitmap,
        normal: Option<Bitmap>,
    ) -> Self {
        Self {
            name: name.into(),
            view_index,
            origin: IntegerPoint::ZERO,
            pivot: screen_pivot,
            color,
            normal,
        }
    }

    pub fn screen_pivot(&self) -> IntegerPoint {
        self.pivot.offset(self.origin)
    }

    /// Crop color and normal maps to the screen-space `rect` plus `margin`, in lockstep.
    pub fn trim(&mut self, rect: IntegerRect, margin: u32) -> BakeResult<()> {
        let local = rect.relative_to(self.origin);
        self.color = crop_with_margin(&self.color, local, margin, CLEAR_COLOR, MapKind::Color)?;
        if let Some(normal) = &self.normal {
            self.normal = Some(crop_with_margin(
                normal,
                local,
                margin,
                CLEAR_COLOR,
                MapKind::Normal,
            )?);
        }
        self.pivot = adjust_pivot(self.screen_pivot(), rect.min, margin);
        self.origin = crop_origin(rect, margin);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bake/record.rs"]
mod tests;
