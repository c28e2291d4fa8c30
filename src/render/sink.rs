use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::render::frame::FrameRGBA;
use crate::render::targets::{RenderTarget, RenderTargetPool, TargetDesc};
use crate::scene::Scene;

/// Where a draw's final output goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The visible surface.
    Screen,
    /// The pool's current offscreen target.
    Offscreen,
}

/// The visible surface plus the default presentation mode.
///
/// Presentations made during an attachment chain are staged and only reach the visible surface
/// once the whole chain succeeded, so a failing effect never leaves a partial frame on screen.
#[derive(Debug)]
pub struct PresentationSink {
    screen: RenderTarget,
    staged: Option<Vec<u8>>,
    render_to_screen: bool,
    clear_premul: [u8; 4],
}

impl PresentationSink {
    /// Allocate a `width x height` visible surface cleared to `clear_premul`.
    pub fn new(
        width: u32,
        height: u32,
        render_to_screen: bool,
        clear_premul: [u8; 4],
    ) -> FrameStackResult<Self> {
        let mut screen = RenderTarget::allocate(TargetDesc::rgba_linear(width, height))?;
        screen.clear(clear_premul);
        Ok(Self {
            screen,
            staged: None,
            render_to_screen,
            clear_premul,
        })
    }

    /// Resolve a requested destination against the default mode.
    ///
    /// The screen is used only when both the request and the default mode allow it.
    pub fn bind(&self, to_screen: bool) -> Destination {
        if to_screen && self.render_to_screen {
            Destination::Screen
        } else {
            Destination::Offscreen
        }
    }

    /// Default presentation mode.
    pub fn render_to_screen(&self) -> bool {
        self.render_to_screen
    }

    /// Premultiplied clear colour.
    pub fn clear_color(&self) -> [u8; 4] {
        self.clear_premul
    }

    /// Visible surface size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.screen.width(), self.screen.height())
    }

    /// One draw of `scene` into `dest`.
    pub fn render(
        &mut self,
        scene: &mut Scene,
        dest: Destination,
        pool: &mut RenderTargetPool,
    ) -> FrameStackResult<()> {
        match dest {
            Destination::Screen => scene.render_into(&mut self.screen, self.clear_premul),
            Destination::Offscreen => scene.render_into(pool.current_mut(), self.clear_premul),
        }
    }

    /// Fill the visible surface with the clear colour, without a render pass.
    pub fn clear(&mut self) {
        self.staged = None;
        self.screen.clear(self.clear_premul);
    }

    /// Read back the visible surface.
    pub fn frame(&self) -> FrameRGBA {
        self.screen.to_frame()
    }

    pub(crate) fn stage(&mut self, target: &RenderTarget) -> FrameStackResult<()> {
        if (target.width(), target.height()) != self.size() {
            return Err(FrameStackError::validation(format!(
                "cannot present {}x{} target on {}x{} surface",
                target.width(),
                target.height(),
                self.screen.width(),
                self.screen.height()
            )));
        }
        let buf = self.staged.get_or_insert_with(Vec::new);
        buf.clear();
        buf.extend_from_slice(target.data());
        Ok(())
    }

    pub(crate) fn commit(&mut self) -> bool {
        match self.staged.take() {
            Some(buf) => {
                self.screen.data_mut().copy_from_slice(&buf);
                true
            }
            None => false,
        }
    }

    pub(crate) fn discard(&mut self) {
        self.staged = None;
    }

    pub(crate) fn replace_screen(&mut self, mut screen: RenderTarget) {
        screen.clear(self.clear_premul);
        self.screen = screen;
        self.staged = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
