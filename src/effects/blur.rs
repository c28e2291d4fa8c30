use crate::foundation::error::{FrameStackError, FrameStackResult};

/// Largest blur radius accepted by the built-in blur routine.
pub const MAX_BLUR_RADIUS_PX: u32 = 256;

const Q16_ONE: i64 = 1 << 16;

/// Normalized Gaussian weights in Q16 fixed point, summing to exactly `1 << 16`.
pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> FrameStackResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![Q16_ONE as u32]);
    }
    if radius > MAX_BLUR_RADIUS_PX {
        return Err(FrameStackError::validation(format!(
            "blur radius {radius} exceeds the {MAX_BLUR_RADIUS_PX}px limit"
        )));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(FrameStackError::validation(format!(
            "blur sigma must be finite and positive, got {sigma}"
        )));
    }

    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let r = i64::from(radius);
    let taps: Vec<f64> = (-r..=r)
        .map(|d| (-(d * d) as f64 / two_sigma_sq).exp())
        .collect();
    let total: f64 = taps.iter().sum();
    if total <= 0.0 {
        return Err(FrameStackError::effect("gaussian kernel sum is zero"));
    }

    let mut q: Vec<i64> = taps
        .iter()
        .map(|w| ((w / total) * Q16_ONE as f64).round() as i64)
        .map(|w| w.clamp(0, Q16_ONE))
        .collect();

    // Rounding drift goes to the centre tap.
    let drift = Q16_ONE - q.iter().sum::<i64>();
    let centre = q.len() / 2;
    q[centre] = (q[centre] + drift).clamp(0, Q16_ONE);

    Ok(q.into_iter().map(|w| w as u32).collect())
}

/// Separable blur of a premultiplied RGBA8 buffer. `tmp` must be as long as `src`.
pub(crate) fn blur_rgba8_premul_q16(
    src: &[u8],
    dst: &mut [u8],
    tmp: &mut [u8],
    width: u32,
    height: u32,
    kernel_q16: &[u32],
) {
    if kernel_q16.len() <= 1 {
        dst.copy_from_slice(src);
        return;
    }

    let (w, h) = (width as usize, height as usize);
    convolve_lines(src, tmp, Lines::rows(w, h), kernel_q16);
    convolve_lines(tmp, dst, Lines::columns(w, h), kernel_q16);
}

/// A set of parallel pixel lines through a `w x h` image, addressed by pixel index.
#[derive(Clone, Copy)]
struct Lines {
    count: usize,
    len: usize,
    /// Pixel step between neighbours on a line.
    step: usize,
    /// Pixel step between the first pixels of adjacent lines.
    stride: usize,
}

impl Lines {
    fn rows(w: usize, h: usize) -> Self {
        Self {
            count: h,
            len: w,
            step: 1,
            stride: w,
        }
    }

    fn columns(w: usize, h: usize) -> Self {
        Self {
            count: w,
            len: h,
            step: w,
            stride: 1,
        }
    }

    fn pixel(&self, line: usize, pos: usize) -> usize {
        line * self.stride + pos * self.step
    }
}

/// 1D convolution along each line, clamping taps to the line ends.
fn convolve_lines(src: &[u8], dst: &mut [u8], lines: Lines, kernel: &[u32]) {
    if lines.len == 0 {
        return;
    }
    let radius = kernel.len() / 2;
    let last = lines.len - 1;

    for line in 0..lines.count {
        for pos in 0..lines.len {
            let mut acc = [0u64; 4];
            for (tap, &weight) in kernel.iter().enumerate() {
                let sample = (pos + tap).saturating_sub(radius).min(last);
                let base = lines.pixel(line, sample) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[base..base + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            let out = lines.pixel(line, pos) * 4;
            for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                *d = ((a + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
