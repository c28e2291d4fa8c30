use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use std::sync::Arc;

/// Ready-to-draw source pixels handed to the compositor by the asset loader.
///
/// Pixels are premultiplied RGBA8, row-major, tightly packed. The buffer is shared, so cloning a
/// `DrawableImage` or binding it as a texture never copies pixel data.
#[derive(Clone, Debug)]
pub struct DrawableImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl DrawableImage {
    /// Wrap already-premultiplied RGBA8 bytes.
    ///
    /// The buffer is not checked here; a mismatched length surfaces as a
    /// [`FrameStackError::ResourceBinding`] when the image is bound for drawing.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: impl Into<Arc<Vec<u8>>>) -> Self {
        Self {
            width,
            height,
            rgba8_premul: rgba8_premul.into(),
        }
    }

    /// Premultiply straight-alpha RGBA8 bytes and wrap them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> Self {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// Convert a decoded `image` buffer (straight alpha).
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_straight_rgba8(width, height, img.into_raw())
    }

    /// Solid single-colour image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_premul_rgba8(width, height, premul.repeat(n))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn shared_data(&self) -> Arc<Vec<u8>> {
        self.rgba8_premul.clone()
    }

    /// Check that the image can back a texture.
    pub(crate) fn validate(&self) -> FrameStackResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameStackError::resource_binding(format!(
                "image has empty dimensions {}x{}",
                self.width, self.height
            )));
        }
        if u16::try_from(self.width).is_err() || u16::try_from(self.height).is_err() {
            return Err(FrameStackError::resource_binding(format!(
                "image {}x{} exceeds the maximum texture size of {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.rgba8_premul.len() != expected {
            return Err(FrameStackError::resource_binding(format!(
                "image byte len mismatch: expected {expected}, got {}",
                self.rgba8_premul.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/drawable.rs"]
mod tests;
