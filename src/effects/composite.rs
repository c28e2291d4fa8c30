use crate::effects::transitions::WipeDir;
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::foundation::math::{mul_div255_u8, smoothstep, unit_to_u8_weight};

pub type PremulRgba8 = [u8; 4];

fn scale(channel: u8, weight: u16) -> u8 {
    mul_div255_u8(u16::from(channel), weight)
}

/// Weighted sum `a * (255 - wb) + b * wb` per channel, with 8-bit weights.
fn mix(a: PremulRgba8, wa: u16, b: PremulRgba8, wb: u16) -> PremulRgba8 {
    std::array::from_fn(|c| scale(a[c], wa).saturating_add(scale(b[c], wb)))
}

fn px_at(buf: &[u8], px: usize) -> PremulRgba8 {
    let i = px * 4;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let weight = unit_to_u8_weight(opacity);
    if weight == 0 {
        return dst;
    }
    let coverage = scale(src[3], weight);
    if coverage == 0 {
        return dst;
    }
    mix(dst, 255 - u16::from(coverage), src, weight)
}

pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let wb = unit_to_u8_weight(t);
    mix(a, 255 - wb, b, wb)
}

fn ensure_pair(dst: &[u8], src: &[u8], op: &str) -> FrameStackResult<()> {
    if dst.len() == src.len() && dst.len().is_multiple_of(4) {
        return Ok(());
    }
    Err(FrameStackError::effect(format!(
        "{op} expects equal-length rgba8 buffers (dst {}, src {})",
        dst.len(),
        src.len()
    )))
}

/// Rewrite every pixel of `dst` as `blend(pixel index, dst pixel, src pixel)`.
fn blend_pixels(
    dst: &mut [u8],
    src: &[u8],
    mut blend: impl FnMut(usize, PremulRgba8, PremulRgba8) -> PremulRgba8,
) {
    for (i, out) in dst.chunks_exact_mut(4).enumerate() {
        let cur = [out[0], out[1], out[2], out[3]];
        out.copy_from_slice(&blend(i, cur, px_at(src, i)));
    }
}

/// Source-over `src` onto `dst` in place.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FrameStackResult<()> {
    ensure_pair(dst, src, "over_in_place")?;
    blend_pixels(dst, src, |_, d, s| over(d, s, opacity));
    Ok(())
}

/// Write `crossfade(background, src, t)` for every pixel of `src` into `dst`.
pub fn crossfade_with_color(
    dst: &mut [u8],
    src: &[u8],
    background: PremulRgba8,
    t: f32,
) -> FrameStackResult<()> {
    ensure_pair(dst, src, "crossfade_with_color")?;
    let wb = unit_to_u8_weight(t);
    blend_pixels(dst, src, |_, _, s| mix(background, 255 - wb, s, wb));
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct WipeParams {
    pub width: u32,
    pub height: u32,
    pub t: f32,
    pub dir: WipeDir,
    pub soft_edge: f32,
}

impl WipeParams {
    fn pixel_count(&self) -> FrameStackResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or_else(|| FrameStackError::effect("wipe buffer size overflow"))
    }

    fn travel_len(&self) -> u32 {
        match self.dir {
            WipeDir::LeftToRight | WipeDir::RightToLeft => self.width,
            WipeDir::TopToBottom | WipeDir::BottomToTop => self.height,
        }
    }

    /// Distance of pixel `(x, y)` from the edge the wipe starts at.
    fn travelled(&self, x: u32, y: u32) -> f32 {
        let d = match self.dir {
            WipeDir::LeftToRight => x,
            WipeDir::RightToLeft => self.width - 1 - x,
            WipeDir::TopToBottom => y,
            WipeDir::BottomToTop => self.height - 1 - y,
        };
        d as f32
    }
}

/// Moving reveal boundary along the travel axis, feathered by `feather` pixels on each side.
struct RevealEdge {
    at: f32,
    feather: f32,
}

impl RevealEdge {
    fn new(params: &WipeParams) -> Self {
        let len = params.travel_len() as f32;
        let feather = params.soft_edge.max(0.0) * len;
        let t = params.t.clamp(0.0, 1.0);
        // Overshoot both ends so the feather is fully off-frame at t = 0 and t = 1.
        Self {
            at: t * (len + 2.0 * feather) - feather,
            feather,
        }
    }

    fn revealed(&self, pos: f32) -> f32 {
        if self.feather > 0.0 {
            1.0 - smoothstep(self.at - self.feather, self.at + self.feather, pos)
        } else if pos < self.at {
            1.0
        } else {
            0.0
        }
    }
}

/// Reveal `src` over a solid `background` along `dir`; `t = 0` is all background, `t = 1` is all
/// source.
pub fn wipe_with_color(
    dst: &mut [u8],
    src: &[u8],
    background: PremulRgba8,
    params: WipeParams,
) -> FrameStackResult<()> {
    let pixels = params.pixel_count()?;
    if dst.len() != pixels * 4 || src.len() != pixels * 4 {
        return Err(FrameStackError::effect(format!(
            "wipe_with_color expects {}x{} rgba8 buffers",
            params.width, params.height
        )));
    }

    let edge = RevealEdge::new(&params);
    let width = params.width.max(1) as usize;
    blend_pixels(dst, src, |i, _, s| {
        let (x, y) = ((i % width) as u32, (i / width) as u32);
        crossfade(background, s, edge.revealed(params.travelled(x, y)))
    });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
