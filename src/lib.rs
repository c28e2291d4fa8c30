//! framestack is the frame-compositing core of a timeline video editor.
//!
//! Given one source image and the attachments (filters, effects, transitions, overlays) anchored
//! to closed frame spans, a [`Compositor`] produces the composited output for a frame:
//!
//! - Every active, non-overlay attachment gets a pre-pass render of the scene into the offscreen
//!   pool, then its effect routine, chained in input order through two ping-pong targets
//! - With nothing active, the scene is rendered straight to the destination
//! - Results land on the visible surface or stay offscreen, chosen per draw
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod effects;
pub(crate) mod render;
pub(crate) mod resource;
pub(crate) mod scene;
pub(crate) mod timeline;

pub use crate::assets::drawable::DrawableImage;
pub use crate::foundation::core::{
    Affine, FrameIndex, FrameSpan, Point, Rect, Rgba8Premul, Viewport,
};
pub use crate::foundation::error::{FrameStackError, FrameStackResult};

pub use crate::effects::blur::MAX_BLUR_RADIUS_PX;
pub use crate::effects::fx::{EffectRoutine, Fx, parse_fx};
pub use crate::effects::transitions::{TransitionFx, WipeDir, parse_transition};
pub use crate::render::compositor::{Compositor, DrawOutcome};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::opts::CompositorOpts;
pub use crate::render::pass::PassContext;
pub use crate::render::sink::{Destination, PresentationSink};
pub use crate::render::targets::{
    FilterMode, PixelFormat, RenderTarget, RenderTargetPool, TargetDesc, Which,
};
pub use crate::resource::kind::ResourceKind;
pub use crate::resource::model::{FxSpec, Resource};
pub use crate::scene::Scene;
pub use crate::scene::camera::{FRUSTUM, OrthographicCamera};
pub use crate::scene::plane::{Material, Plane, PlaneGeometry, Side, Texture};
pub use crate::timeline::attachment::{
    Attachment, AttachmentSpec, active_attachments, attachments_from_json_str,
};
pub use crate::timeline::track::Track;
