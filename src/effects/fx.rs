use crate::effects::blur::{MAX_BLUR_RADIUS_PX, blur_rgba8_premul_q16, gaussian_kernel_q16};
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8_weight};
use crate::render::pass::PassContext;
use std::sync::Arc;

/// Host-supplied effect routine.
///
/// A routine reads [`PassContext::read`], writes [`PassContext::write_mut`] and decides whether it
/// is terminal by calling [`PassContext::present`]. Whatever it leaves in the write target becomes
/// the input of the next active attachment.
pub trait EffectRoutine: std::fmt::Debug + Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    /// Render one pass.
    fn render(&self, ctx: &mut PassContext<'_>) -> FrameStackResult<()>;
}

/// Filter and effect routines carried by [`crate::Track::Filter`] and [`crate::Track::Effect`].
#[derive(Clone, Debug)]
pub enum Fx {
    /// 4x5 row-major colour matrix applied to straight-alpha RGBA in `[0, 1]`.
    ColorMatrix {
        /// Matrix coefficients; the fifth column is an additive offset.
        matrix: [f32; 20],
    },
    /// Separable Gaussian blur.
    Blur {
        /// Kernel radius in pixels (0 is a copy).
        radius_px: u32,
        /// Gaussian sigma in pixels.
        sigma: f32,
    },
    /// Colour inversion that keeps alpha.
    Invert,
    /// Uniform opacity multiplier.
    Opacity {
        /// Multiplier in `[0, 1]`.
        value: f32,
    },
    /// Routine supplied by the host application.
    Custom(Arc<dyn EffectRoutine>),
}

impl Fx {
    /// Identity colour matrix.
    pub const IDENTITY_MATRIX: [f32; 20] = [
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0, //
    ];

    /// Rec. 709 luma grayscale.
    pub fn grayscale() -> Self {
        let (r, g, b) = (0.2126, 0.7152, 0.0722);
        Self::ColorMatrix {
            matrix: [
                r, g, b, 0.0, 0.0, //
                r, g, b, 0.0, 0.0, //
                r, g, b, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0, //
            ],
        }
    }

    /// Classic sepia tone.
    pub fn sepia() -> Self {
        Self::ColorMatrix {
            matrix: [
                0.393, 0.769, 0.189, 0.0, 0.0, //
                0.349, 0.686, 0.168, 0.0, 0.0, //
                0.272, 0.534, 0.131, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 0.0, //
            ],
        }
    }

    /// Additive brightness offset in `[-1, 1]`.
    pub fn brightness(offset: f32) -> Self {
        let mut matrix = Self::IDENTITY_MATRIX;
        matrix[4] = offset;
        matrix[9] = offset;
        matrix[14] = offset;
        Self::ColorMatrix { matrix }
    }

    /// Wrap a host routine.
    pub fn custom(routine: impl EffectRoutine + 'static) -> Self {
        Self::Custom(Arc::new(routine))
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        match self {
            Self::ColorMatrix { .. } => "color_matrix",
            Self::Blur { .. } => "blur",
            Self::Invert => "invert",
            Self::Opacity { .. } => "opacity",
            Self::Custom(r) => r.name(),
        }
    }

    pub(crate) fn apply(&self, ctx: &mut PassContext<'_>) -> FrameStackResult<()> {
        match self {
            Self::ColorMatrix { matrix } => {
                let (read, write) = ctx.read_write();
                color_matrix_rgba8_premul(read.data(), write.data_mut(), matrix);
            }
            Self::Blur { radius_px, sigma } => {
                let kernel = gaussian_kernel_q16(*radius_px, *sigma)?;
                let (read, write) = ctx.read_write();
                let (w, h) = (read.width(), read.height());
                let mut tmp = vec![0u8; read.data().len()];
                blur_rgba8_premul_q16(read.data(), write.data_mut(), &mut tmp, w, h, &kernel);
            }
            Self::Invert => {
                let (read, write) = ctx.read_write();
                invert_rgba8_premul(read.data(), write.data_mut());
            }
            Self::Opacity { value } => {
                let (read, write) = ctx.read_write();
                opacity_rgba8_premul(read.data(), write.data_mut(), *value);
            }
            Self::Custom(routine) => return routine.render(ctx),
        }
        ctx.present()
    }
}

/// Parse an effect descriptor (`kind` plus JSON `params`) into a built-in [`Fx`].
pub fn parse_fx(kind: &str, params: &serde_json::Value) -> FrameStackResult<Fx> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(FrameStackError::validation("effect kind must be non-empty"));
    }
    let params = Params(params);

    match kind.as_str() {
        "grayscale" | "greyscale" => Ok(Fx::grayscale()),
        "sepia" => Ok(Fx::sepia()),
        "invert" => Ok(Fx::Invert),
        "brightness" => {
            let value = params.f32("value")?;
            Ok(Fx::brightness(value.clamp(-1.0, 1.0)))
        }
        "opacity" => {
            let value = params.f32("value")?;
            if !(0.0..=1.0).contains(&value) {
                return Err(FrameStackError::validation(
                    "opacity.value must be within [0, 1]",
                ));
            }
            Ok(Fx::Opacity { value })
        }
        "color_matrix" | "colormatrix" => {
            let arr = params
                .require("matrix")?
                .as_array()
                .ok_or_else(|| FrameStackError::validation("color_matrix.matrix must be an array"))?;
            if arr.len() != 20 {
                return Err(FrameStackError::validation(
                    "color_matrix.matrix must have length 20",
                ));
            }
            let mut matrix = [0.0f32; 20];
            for (slot, v) in matrix.iter_mut().zip(arr) {
                let f = v.as_f64().ok_or_else(|| {
                    FrameStackError::validation("color_matrix.matrix entries must be numbers")
                })? as f32;
                if !f.is_finite() {
                    return Err(FrameStackError::validation(
                        "color_matrix.matrix entries must be finite",
                    ));
                }
                *slot = f;
            }
            Ok(Fx::ColorMatrix { matrix })
        }
        "blur" => {
            let radius_px = params.u32("radius_px")?;
            if radius_px > MAX_BLUR_RADIUS_PX {
                return Err(FrameStackError::validation(format!(
                    "blur.radius_px must be <= {MAX_BLUR_RADIUS_PX}"
                )));
            }
            let sigma = if params.has("sigma") {
                params.f32("sigma")?
            } else {
                (radius_px as f32 / 2.0).max(0.5)
            };
            if sigma <= 0.0 {
                return Err(FrameStackError::validation("blur.sigma must be > 0"));
            }
            Ok(Fx::Blur { radius_px, sigma })
        }
        _ => Err(FrameStackError::validation(format!(
            "no built-in effect named `{kind}`"
        ))),
    }
}

/// Typed access to a JSON parameter object.
struct Params<'a>(&'a serde_json::Value);

impl Params<'_> {
    fn require(&self, key: &str) -> FrameStackResult<&serde_json::Value> {
        self.0
            .get(key)
            .ok_or_else(|| FrameStackError::validation(format!("effect param `{key}` is required")))
    }

    fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some()
    }

    fn u32(&self, key: &str) -> FrameStackResult<u32> {
        let n = self.require(key)?.as_u64().ok_or_else(|| {
            FrameStackError::validation(format!("effect param `{key}` is not an unsigned integer"))
        })?;
        u32::try_from(n)
            .map_err(|_| FrameStackError::validation(format!("effect param `{key}` overflows u32")))
    }

    fn f32(&self, key: &str) -> FrameStackResult<f32> {
        let n = self
            .require(key)?
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| FrameStackError::validation(format!("effect param `{key}` is not a number")))?;
        if n.is_finite() {
            Ok(n)
        } else {
            Err(FrameStackError::validation(format!(
                "effect param `{key}` is not finite"
            )))
        }
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Applies `m` to straight-alpha channels and re-premultiplies the result.
pub(crate) fn color_matrix_rgba8_premul(src: &[u8], dst: &mut [u8], m: &[f32; 20]) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let alpha = f32::from(s[3]) / 255.0;
        let unpremul = if alpha > 0.0 { alpha.recip() } else { 0.0 };
        let input = [
            f32::from(s[0]) / 255.0 * unpremul,
            f32::from(s[1]) / 255.0 * unpremul,
            f32::from(s[2]) / 255.0 * unpremul,
            alpha,
        ];

        let mut out = [0.0f32; 4];
        for (o, row) in out.iter_mut().zip(m.chunks_exact(5)) {
            let dot: f32 = row[..4].iter().zip(&input).map(|(k, v)| k * v).sum();
            *o = (dot + row[4]).clamp(0.0, 1.0);
        }

        let out_alpha = out[3];
        for (dc, oc) in d[..3].iter_mut().zip(&out[..3]) {
            *dc = unit_to_u8(oc * out_alpha);
        }
        d[3] = unit_to_u8(out_alpha);
    }
}

pub(crate) fn invert_rgba8_premul(src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let a = s[3];
        d[0] = a.saturating_sub(s[0]);
        d[1] = a.saturating_sub(s[1]);
        d[2] = a.saturating_sub(s[2]);
        d[3] = a;
    }
}

pub(crate) fn opacity_rgba8_premul(src: &[u8], dst: &mut [u8], value: f32) {
    debug_assert_eq!(src.len(), dst.len());
    let w = unit_to_u8_weight(value);
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = mul_div255_u8(u16::from(*s), w);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
