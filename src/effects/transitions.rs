use crate::effects::composite::{WipeParams, crossfade_with_color, wipe_with_color};
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::render::pass::PassContext;

/// Direction a wipe travels across the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipeDir {
    /// Reveal from the left edge.
    LeftToRight,
    /// Reveal from the right edge.
    RightToLeft,
    /// Reveal from the top edge.
    TopToBottom,
    /// Reveal from the bottom edge.
    BottomToTop,
}

/// Built-in transition routines, animated by the attachment span progress.
///
/// Transitions blend the incoming pass against the clear colour, so a fade-in starting at the
/// attachment's first frame begins fully cleared and ends on the unmodified image.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionFx {
    /// Clear colour to image.
    FadeIn,
    /// Image to clear colour.
    FadeOut,
    /// Directional reveal of the image over the clear colour.
    Wipe {
        /// Travel direction.
        dir: WipeDir,
        /// Feather width as a fraction of the travel axis, `[0, 1]`.
        soft_edge: f32,
    },
}

impl TransitionFx {
    /// Stable name used in logs and resource descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FadeIn => "fade_in",
            Self::FadeOut => "fade_out",
            Self::Wipe { .. } => "wipe",
        }
    }

    pub(crate) fn apply(&self, ctx: &mut PassContext<'_>) -> FrameStackResult<()> {
        let t = ctx.progress();
        let bg = ctx.clear_color();
        let (read, write) = ctx.read_write();
        match *self {
            Self::FadeIn => crossfade_with_color(write.data_mut(), read.data(), bg, t)?,
            Self::FadeOut => crossfade_with_color(write.data_mut(), read.data(), bg, 1.0 - t)?,
            Self::Wipe { dir, soft_edge } => {
                let params = WipeParams {
                    width: read.width(),
                    height: read.height(),
                    t,
                    dir,
                    soft_edge,
                };
                wipe_with_color(write.data_mut(), read.data(), bg, params)?;
            }
        }
        ctx.present()
    }
}

const WIPE_DIRS: [(WipeDir, &[&str]); 4] = [
    (WipeDir::LeftToRight, &["left_to_right", "lefttoright", "ltr"]),
    (WipeDir::RightToLeft, &["right_to_left", "righttoleft", "rtl"]),
    (WipeDir::TopToBottom, &["top_to_bottom", "toptobottom", "ttb"]),
    (WipeDir::BottomToTop, &["bottom_to_top", "bottomtotop", "btt"]),
];

impl std::str::FromStr for WipeDir {
    type Err = FrameStackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        WIPE_DIRS
            .iter()
            .find(|(_, aliases)| aliases.contains(&needle.as_str()))
            .map(|(dir, _)| *dir)
            .ok_or_else(|| FrameStackError::validation(format!("`{needle}` is not a wipe direction")))
    }
}

fn parse_wipe(params: &serde_json::Value) -> FrameStackResult<TransitionFx> {
    let fields = match params {
        serde_json::Value::Null => None,
        serde_json::Value::Object(map) => Some(map),
        _ => {
            return Err(FrameStackError::validation(
                "wipe params must be a JSON object",
            ));
        }
    };
    let field = |key: &str| fields.and_then(|m| m.get(key));

    let dir = match field("dir").and_then(|v| v.as_str()) {
        Some(s) => s.parse()?,
        None => WipeDir::LeftToRight,
    };
    let soft_edge = match field("soft_edge").and_then(|v| v.as_f64()) {
        Some(v) if !(v as f32).is_finite() => {
            return Err(FrameStackError::validation("wipe soft_edge is not finite"));
        }
        Some(v) => (v as f32).clamp(0.0, 1.0),
        None => 0.0,
    };
    Ok(TransitionFx::Wipe { dir, soft_edge })
}

/// Parse a transition descriptor (`kind` plus JSON `params`).
pub fn parse_transition(kind: &str, params: &serde_json::Value) -> FrameStackResult<TransitionFx> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "" => Err(FrameStackError::validation("transition kind is empty")),
        "fade_in" | "fadein" | "fade-in" => Ok(TransitionFx::FadeIn),
        "fade_out" | "fadeout" | "fade-out" => Ok(TransitionFx::FadeOut),
        "wipe" => parse_wipe(params),
        other => Err(FrameStackError::validation(format!(
            "no built-in transition named `{other}`"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
