use crate::foundation::error::{FrameStackError, FrameStackResult};

pub use kurbo::{Affine, Point, Rect};

/// Absolute 0-based frame index in timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Closed frame span `[start, end]` in timeline space.
///
/// Spans are not validated on construction: an inverted span (`end < start`) is representable and
/// simply never contains a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameSpan {
    /// Inclusive span start.
    pub start: FrameIndex,
    /// Inclusive span end.
    pub end: FrameIndex,
}

impl FrameSpan {
    /// Create a span from raw frame numbers.
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start: FrameIndex(start),
            end: FrameIndex(end),
        }
    }

    /// Create a span, rejecting `end < start`.
    pub fn checked(start: u64, end: u64) -> FrameStackResult<Self> {
        if start > end {
            return Err(FrameStackError::validation(
                "FrameSpan start must be <= end",
            ));
        }
        Ok(Self::new(start, end))
    }

    /// Return `true` when `f` is inside `[start, end]`. Both bounds are inclusive.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 <= self.end.0
    }

    /// Return `true` when `end < start`.
    pub fn is_inverted(self) -> bool {
        self.end.0 < self.start.0
    }

    /// Number of frames contained in the span (0 for inverted spans).
    pub fn len_frames(self) -> u64 {
        if self.is_inverted() {
            return 0;
        }
        self.end.0 - self.start.0 + 1
    }

    /// Normalized position of `f` inside the span, clamped to `[0, 1]`.
    ///
    /// Single-frame spans report `1.0`, so a one-frame transition lands on its end state.
    pub fn progress(self, f: FrameIndex) -> f32 {
        if self.is_inverted() {
            return 0.0;
        }
        let len = self.end.0 - self.start.0;
        if len == 0 {
            return 1.0;
        }
        let pos = f.0.clamp(self.start.0, self.end.0) - self.start.0;
        (pos as f64 / len as f64) as f32
    }
}

/// Output viewport: logical size plus device pixel density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Device pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> FrameStackResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(FrameStackError::validation(
                "Viewport pixel_ratio must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    /// Pixel size of render targets for this viewport: `(width * ratio, height * ratio)`.
    pub fn target_size(self) -> (u32, u32) {
        let scale = |v: u32| -> u32 {
            let px = (f64::from(v) * self.pixel_ratio).round();
            if px >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                px as u32
            }
        };
        (scale(self.width), scale(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
