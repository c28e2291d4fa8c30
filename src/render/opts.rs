use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{FrameStackError, FrameStackResult};

/// Compositor configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositorOpts {
    /// Device pixels per viewport pixel.
    pub pixel_ratio: f64,
    /// Default presentation mode; `false` keeps every result offscreen.
    pub render_to_screen: bool,
    /// Straight-alpha RGBA colour the visible surface and pre-passes clear to.
    pub clear_rgba: [u8; 4],
    /// Upper bound on the combined bytes of the two offscreen targets.
    pub max_target_bytes: usize,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            render_to_screen: true,
            clear_rgba: [0, 0, 0, 255],
            max_target_bytes: 512 * 1024 * 1024,
        }
    }
}

impl CompositorOpts {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> FrameStackResult<Self> {
        let opts: Self =
            serde_json::from_str(s).map_err(|e| FrameStackError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Set the pixel ratio.
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Set the default presentation mode.
    pub fn with_render_to_screen(mut self, render_to_screen: bool) -> Self {
        self.render_to_screen = render_to_screen;
        self
    }

    /// Set the clear colour (straight alpha).
    pub fn with_clear_rgba(mut self, clear_rgba: [u8; 4]) -> Self {
        self.clear_rgba = clear_rgba;
        self
    }

    /// Set the offscreen byte budget.
    pub fn with_max_target_bytes(mut self, max_target_bytes: usize) -> Self {
        self.max_target_bytes = max_target_bytes;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> FrameStackResult<()> {
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(FrameStackError::validation(format!(
                "pixel_ratio must be finite and > 0, got {}",
                self.pixel_ratio
            )));
        }
        if self.max_target_bytes == 0 {
            return Err(FrameStackError::validation("max_target_bytes must be > 0"));
        }
        Ok(())
    }

    pub(crate) fn clear_premul(&self) -> [u8; 4] {
        let [r, g, b, a] = self.clear_rgba;
        Rgba8Premul::from_straight_rgba(r, g, b, a).to_array()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/opts.rs"]
mod tests;
