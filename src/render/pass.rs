use crate::foundation::core::{FrameIndex, FrameSpan};
use crate::foundation::error::FrameStackResult;
use crate::render::sink::{Destination, PresentationSink};
use crate::render::targets::RenderTarget;

/// Everything one attachment's effect routine may touch during its pass.
///
/// `read` holds the pre-pass render of the scene (the chained result so far); `write` is the
/// other pooled target. After the routine returns, the compositor swaps the two so `write`
/// becomes the input of the next pass.
#[derive(Debug)]
pub struct PassContext<'a> {
    frame: FrameIndex,
    span: FrameSpan,
    read: &'a RenderTarget,
    write: &'a mut RenderTarget,
    destination: Destination,
    sink: &'a mut PresentationSink,
    presented: bool,
}

impl<'a> PassContext<'a> {
    pub(crate) fn new(
        frame: FrameIndex,
        span: FrameSpan,
        read: &'a RenderTarget,
        write: &'a mut RenderTarget,
        destination: Destination,
        sink: &'a mut PresentationSink,
    ) -> Self {
        Self {
            frame,
            span,
            read,
            write,
            destination,
            sink,
            presented: false,
        }
    }

    /// Frame being composited.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Active span of the attachment.
    pub fn span(&self) -> FrameSpan {
        self.span
    }

    /// Position of the frame within the span, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.span.progress(self.frame)
    }

    /// Premultiplied clear colour of the visible surface.
    pub fn clear_color(&self) -> [u8; 4] {
        self.sink.clear_color()
    }

    /// Where a presentation goes.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Input target.
    pub fn read(&self) -> &RenderTarget {
        self.read
    }

    /// Output target.
    pub fn write_mut(&mut self) -> &mut RenderTarget {
        &mut *self.write
    }

    /// Input and output at once.
    pub fn read_write(&mut self) -> (&RenderTarget, &mut RenderTarget) {
        (self.read, &mut *self.write)
    }

    /// Copy the input to the output unchanged.
    pub fn forward(&mut self) {
        self.write.data_mut().copy_from_slice(self.read.data());
    }

    /// Mark the output as the final result of this draw.
    ///
    /// For [`Destination::Screen`] the output is queued for the visible surface; it lands there
    /// once every pass of the draw has succeeded. Offscreen, the output stays in the pool and
    /// becomes its current target after the pass.
    pub fn present(&mut self) -> FrameStackResult<()> {
        if self.destination == Destination::Screen {
            self.sink.stage(&*self.write)?;
        }
        self.presented = true;
        Ok(())
    }

    /// Whether [`Self::present`] was called during this pass.
    pub fn presented(&self) -> bool {
        self.presented
    }
}
