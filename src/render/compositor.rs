use crate::assets::drawable::DrawableImage;
use crate::foundation::core::{FrameIndex, Viewport};
use crate::foundation::error::FrameStackResult;
use crate::render::frame::FrameRGBA;
use crate::render::opts::CompositorOpts;
use crate::render::pass::PassContext;
use crate::render::sink::{Destination, PresentationSink};
use crate::render::targets::{RenderTarget, RenderTargetPool, TargetDesc, Which};
use crate::scene::Scene;
use crate::scene::plane::{Material, Texture};
use crate::timeline::attachment::{Attachment, active_attachments};

/// What a draw did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Where the final output went.
    pub destination: Destination,
    /// Whether at least one attachment was active at the frame.
    pub attached: bool,
    /// Effect passes run.
    pub passes: usize,
    /// Scene renders into the offscreen pool ahead of a pass.
    pub prepasses: usize,
    /// Whether a final result was presented.
    pub presented: bool,
}

/// Per-frame compositor: applies active attachments through the target pool and presents the
/// result.
#[derive(Debug)]
pub struct Compositor {
    opts: CompositorOpts,
    viewport: Viewport,
    scene: Scene,
    targets: RenderTargetPool,
    sink: PresentationSink,
}

impl Compositor {
    /// Build the scene, the two offscreen targets, and the visible surface for a
    /// `width x height` viewport.
    pub fn new(width: u32, height: u32, opts: CompositorOpts) -> FrameStackResult<Self> {
        opts.validate()?;
        let viewport = Viewport::new(width, height, opts.pixel_ratio)?;
        let (tw, th) = viewport.target_size();
        let targets = RenderTargetPool::new(tw, th, opts.max_target_bytes)?;
        let sink = PresentationSink::new(tw, th, opts.render_to_screen, opts.clear_premul())?;
        tracing::debug!(width, height, tw, th, "compositor initialized");
        Ok(Self {
            opts,
            viewport,
            scene: Scene::new(viewport),
            targets,
            sink,
        })
    }

    /// Resize the viewport, reallocating both offscreen targets and the visible surface.
    ///
    /// Nothing changes when any allocation fails.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: u32, height: u32) -> FrameStackResult<()> {
        let viewport = Viewport::new(width, height, self.viewport.pixel_ratio)?;
        let (tw, th) = viewport.target_size();
        let screen = RenderTarget::allocate(TargetDesc::rgba_linear(tw, th))?;
        self.targets.resize(tw, th)?;
        self.sink.replace_screen(screen);
        self.scene.resize(viewport);
        self.viewport = viewport;
        tracing::debug!(tw, th, "render targets reallocated");
        Ok(())
    }

    /// Composite `image` at `frame` into the default destination.
    pub fn draw(
        &mut self,
        image: &DrawableImage,
        attachments: &[Attachment],
        frame: FrameIndex,
    ) -> FrameStackResult<DrawOutcome> {
        let dest = if self.opts.render_to_screen {
            Destination::Screen
        } else {
            Destination::Offscreen
        };
        self.draw_to(image, attachments, frame, dest)
    }

    /// Composite `image` at `frame` into `dest`.
    ///
    /// Every active attachment, in input order, gets a pre-pass render of the scene followed by
    /// its effect routine; the routine's output feeds the next one. With no active attachment the
    /// scene is rendered straight to the destination. An effect error aborts the draw before
    /// anything reaches the screen.
    #[tracing::instrument(
        skip(self, image, attachments, frame),
        fields(frame = frame.0, attachments = attachments.len())
    )]
    pub fn draw_to(
        &mut self,
        image: &DrawableImage,
        attachments: &[Attachment],
        frame: FrameIndex,
        dest: Destination,
    ) -> FrameStackResult<DrawOutcome> {
        self.scene
            .set_material(Material::new(Texture::from_image(image)?));
        let destination = self.sink.bind(dest == Destination::Screen);
        self.targets.retarget(Which::Buffer1);

        let mut outcome = DrawOutcome {
            destination,
            attached: false,
            passes: 0,
            prepasses: 0,
            presented: false,
        };
        if let Err(err) = self.run_chain(attachments, frame, &mut outcome) {
            self.sink.discard();
            return Err(err);
        }

        if !outcome.attached {
            self.sink
                .render(&mut self.scene, destination, &mut self.targets)?;
            outcome.presented = true;
            return Ok(outcome);
        }

        if destination == Destination::Screen {
            self.sink.commit();
        }
        if !outcome.presented {
            tracing::warn!(
                passes = outcome.passes,
                "no attachment presented a result; output left unchanged"
            );
        }
        Ok(outcome)
    }

    fn run_chain(
        &mut self,
        attachments: &[Attachment],
        frame: FrameIndex,
        outcome: &mut DrawOutcome,
    ) -> FrameStackResult<()> {
        for attachment in active_attachments(attachments, frame) {
            outcome.attached = true;

            self.sink
                .render(&mut self.scene, Destination::Offscreen, &mut self.targets)?;
            outcome.prepasses += 1;

            let (read, write) = self.targets.split_pass();
            let mut ctx = PassContext::new(
                frame,
                attachment.span(),
                read,
                write,
                outcome.destination,
                &mut self.sink,
            );
            attachment.track.render_effect(&mut ctx)?;
            let presented = ctx.presented();
            outcome.passes += 1;
            outcome.presented |= presented;
            tracing::debug!(
                pass = outcome.passes,
                routine = attachment.track.routine_name(),
                presented,
                "attachment pass"
            );

            self.targets.swap();
            self.scene.rebind_texture(self.targets.current());
        }
        Ok(())
    }

    /// Fill the visible surface with the clear colour.
    pub fn clear(&mut self) {
        self.sink.clear();
    }

    /// Read back the visible surface or the current offscreen target.
    pub fn read_back(&self, dest: Destination) -> FrameRGBA {
        match dest {
            Destination::Screen => self.sink.frame(),
            Destination::Offscreen => self.targets.current().to_frame(),
        }
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Options this compositor was built with.
    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    /// Scene state.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Offscreen target pool.
    pub fn targets(&self) -> &RenderTargetPool {
        &self.targets
    }

    /// Visible surface.
    pub fn sink(&self) -> &PresentationSink {
        &self.sink
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
