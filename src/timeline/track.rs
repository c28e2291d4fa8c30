use crate::effects::fx::Fx;
use crate::effects::transitions::TransitionFx;
use crate::foundation::error::FrameStackResult;
use crate::render::pass::PassContext;
use crate::resource::kind::ResourceKind;

/// Behaviour attached to a timeline attachment, one variant per [`ResourceKind`].
#[derive(Clone, Debug)]
pub enum Track {
    /// Video (and picture) source track; carries no pass routine.
    Video,
    /// Audio track; has no visual output.
    Audio,
    /// Static picture track; carries no pass routine.
    Picture,
    /// Sticker overlay, composited outside the buffer chain.
    Sticker,
    /// Text overlay, composited outside the buffer chain.
    Text,
    /// Look/colour filter.
    Filter(Fx),
    /// Visual effect.
    Effect(Fx),
    /// Transition animated over the attachment span.
    Transition(TransitionFx),
}

impl Track {
    /// Kind tag of this track.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Video => ResourceKind::Video,
            Self::Audio => ResourceKind::Audio,
            Self::Picture => ResourceKind::Picture,
            Self::Sticker => ResourceKind::Sticker,
            Self::Text => ResourceKind::Text,
            Self::Filter(_) => ResourceKind::Filter,
            Self::Effect(_) => ResourceKind::Effect,
            Self::Transition(_) => ResourceKind::Transition,
        }
    }

    /// Routine name used in logs.
    pub fn routine_name(&self) -> &str {
        match self {
            Self::Filter(fx) | Self::Effect(fx) => fx.name(),
            Self::Transition(t) => t.name(),
            other => other.kind().as_str(),
        }
    }

    /// Run this track's pass against `ctx`.
    ///
    /// Tracks without a visual routine forward the pass input unchanged and present it, so the
    /// frame still reaches the screen. A later presenting pass replaces that output.
    pub fn render_effect(&self, ctx: &mut PassContext<'_>) -> FrameStackResult<()> {
        match self {
            Self::Filter(fx) | Self::Effect(fx) => fx.apply(ctx),
            Self::Transition(t) => t.apply(ctx),
            Self::Video | Self::Audio | Self::Picture | Self::Sticker | Self::Text => {
                ctx.forward();
                ctx.present()
            }
        }
    }
}
