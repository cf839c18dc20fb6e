use anyhow::Context as _;

use crate::foundation::{
    core::{IntegerPoint, Rgba8, WHITE},
    error::{BakeError, BakeResult},
};

pub(crate) mod geometry;

/// Side length of the bitmap returned when no render surface is available.
pub const FALLBACK_SIZE: u32 = 4;

/// A captured or cropped frame as straight-alpha RGBA8 pixels.
///
/// Row-major, tightly packed, `(0, 0)` is the top-left pixel. Cropping never mutates a bitmap in
/// place; it produces a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a bitmap filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let px = (width as usize).saturating_mul(height as usize);
        let mut data = Vec::with_capacity(px.saturating_mul(4));
        for _ in 0..px {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// The well-defined result of a capture without an active render surface.
    pub fn white() -> Self {
        Self::filled(FALLBACK_SIZE, FALLBACK_SIZE, WHITE)
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> BakeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| BakeError::geometry("bitmap dimensions overflow"))?;
        if data.len() != expected {
            return Err(BakeError::geometry(format!(
                "bitmap buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn to_image(&self) -> BakeResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .context("wrap bitmap as rgba image")
            .map_err(BakeError::from)
    }

    /// Decode PNG/JPEG/... bytes into a straight-alpha bitmap.
    pub fn decode(bytes: &[u8]) -> BakeResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn contains(&self, p: IntegerPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Pixel at `(x, y)`, or `None` when outside the bitmap.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if !self.contains(IntegerPoint::new(x, y)) {
            return None;
        }
        let i = self.index(x as u32, y as u32);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Write a pixel; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if !self.contains(IntegerPoint::new(x, y)) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&color);
    }

    /// Copy `src` into this bitmap with its top-left at `(x, y)`, clipping at the edges.
    pub(crate) fn blit(&mut self, src: &Bitmap, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = src.width.min(self.width - x) as usize;
        let rows = src.height.min(self.height - y);
        for sy in 0..rows {
            let s = &src.row(sy)[..cols * 4];
            let start = x as usize * 4;
            self.row_mut(y + sy)[start..start + cols * 4].copy_from_slice(s);
        }
    }

    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}
