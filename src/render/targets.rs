use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::render::frame::FrameRGBA;

/// Pixel storage format of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit premultiplied RGBA.
    Rgba8Premul,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8Premul => 4,
        }
    }
}

/// Sampling used when a target (or texture) is magnified or minified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear.
    Linear,
}

impl FilterMode {
    pub(crate) fn image_quality(self) -> vello_cpu::peniko::ImageQuality {
        match self {
            Self::Nearest => vello_cpu::peniko::ImageQuality::Low,
            Self::Linear => vello_cpu::peniko::ImageQuality::Medium,
        }
    }
}

/// Shape of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetDesc {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Storage format.
    pub format: PixelFormat,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
}

impl TargetDesc {
    /// RGBA target with linear min/mag filtering.
    pub fn rgba_linear(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgba8Premul,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
        }
    }

    /// Total bytes of pixel storage.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(self.format.bytes_per_pixel())
    }
}

/// Offscreen pixel buffer used as an intermediate compositing surface.
pub struct RenderTarget {
    desc: TargetDesc,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTarget")
            .field("desc", &self.desc)
            .finish_non_exhaustive()
    }
}

impl RenderTarget {
    /// Allocate a cleared (transparent) target.
    pub fn allocate(desc: TargetDesc) -> FrameStackResult<Self> {
        if desc.width == 0 || desc.height == 0 {
            return Err(FrameStackError::target_allocation(format!(
                "render target size {}x{} is empty",
                desc.width, desc.height
            )));
        }
        let w: u16 = desc.width.try_into().map_err(|_| {
            FrameStackError::target_allocation(format!(
                "render target width {} exceeds {}",
                desc.width,
                u16::MAX
            ))
        })?;
        let h: u16 = desc.height.try_into().map_err(|_| {
            FrameStackError::target_allocation(format!(
                "render target height {} exceeds {}",
                desc.height,
                u16::MAX
            ))
        })?;
        Ok(Self {
            desc,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Target shape.
    pub fn desc(&self) -> TargetDesc {
        self.desc
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.desc.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.desc.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Mutable premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }

    /// Fill every pixel with a premultiplied colour.
    pub fn clear(&mut self, premul: [u8; 4]) {
        for px in self.data_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Copy another target of the same size into this one.
    pub fn copy_from(&mut self, src: &RenderTarget) -> FrameStackResult<()> {
        if src.width() != self.width() || src.height() != self.height() {
            return Err(FrameStackError::validation(format!(
                "cannot copy {}x{} target into {}x{} target",
                src.width(),
                src.height(),
                self.width(),
                self.height()
            )));
        }
        self.data_mut().copy_from_slice(src.data());
        Ok(())
    }

    /// Read back as a frame.
    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }
}

/// Which of the two pooled targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Which {
    /// First target.
    Buffer1,
    /// Second target.
    Buffer2,
}

impl Which {
    fn index(self) -> usize {
        match self {
            Self::Buffer1 => 0,
            Self::Buffer2 => 1,
        }
    }

    /// The other target.
    pub fn flipped(self) -> Self {
        match self {
            Self::Buffer1 => Self::Buffer2,
            Self::Buffer2 => Self::Buffer1,
        }
    }
}

/// Two same-sized offscreen targets used for ping-pong passes.
///
/// The current target is what a pass reads; the other one is what it writes. `current` always
/// names one of the two pooled targets.
#[derive(Debug)]
pub struct RenderTargetPool {
    targets: [RenderTarget; 2],
    current: Which,
    max_bytes: usize,
}

impl RenderTargetPool {
    /// Allocate both targets at `width x height` device pixels.
    ///
    /// `max_bytes` caps the combined storage of the pair.
    pub fn new(width: u32, height: u32, max_bytes: usize) -> FrameStackResult<Self> {
        Ok(Self {
            targets: Self::allocate_pair(width, height, max_bytes)?,
            current: Which::Buffer1,
            max_bytes,
        })
    }

    fn allocate_pair(width: u32, height: u32, max_bytes: usize) -> FrameStackResult<[RenderTarget; 2]> {
        let desc = TargetDesc::rgba_linear(width, height);
        let pair_bytes = desc.byte_len().saturating_mul(2);
        if pair_bytes > max_bytes {
            return Err(FrameStackError::target_allocation(format!(
                "render target pair {width}x{height} needs {pair_bytes} bytes, limit is {max_bytes}"
            )));
        }
        Ok([RenderTarget::allocate(desc)?, RenderTarget::allocate(desc)?])
    }

    /// Reallocate both targets at a new size.
    ///
    /// Always reallocates, even for an unchanged size. The swap is all-or-nothing: on failure the
    /// previous pair stays bound. `current` is reset to [`Which::Buffer1`].
    pub fn resize(&mut self, width: u32, height: u32) -> FrameStackResult<()> {
        let fresh = Self::allocate_pair(width, height, self.max_bytes)?;
        self.targets = fresh;
        self.current = Which::Buffer1;
        Ok(())
    }

    /// Device-pixel size shared by both targets.
    pub fn size(&self) -> (u32, u32) {
        (self.targets[0].width(), self.targets[0].height())
    }

    /// Which target is current.
    pub fn which(&self) -> Which {
        self.current
    }

    /// The current (read) target.
    pub fn current(&self) -> &RenderTarget {
        &self.targets[self.current.index()]
    }

    /// Mutable access to the current target.
    pub fn current_mut(&mut self) -> &mut RenderTarget {
        &mut self.targets[self.current.index()]
    }

    /// The non-current (write) target.
    pub fn other(&self) -> &RenderTarget {
        &self.targets[self.current.flipped().index()]
    }

    /// A specific pooled target.
    pub fn get(&self, which: Which) -> &RenderTarget {
        &self.targets[which.index()]
    }

    /// Make the other target current.
    pub fn swap(&mut self) {
        self.current = self.current.flipped();
    }

    /// Point `current` at a specific target.
    pub fn retarget(&mut self, which: Which) {
        self.current = which;
    }

    /// Borrow `(current, other)` as `(read, write)` for one pass.
    pub fn split_pass(&mut self) -> (&RenderTarget, &mut RenderTarget) {
        let [a, b] = &mut self.targets;
        match self.current {
            Which::Buffer1 => (&*a, b),
            Which::Buffer2 => (&*b, a),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/targets.rs"]
mod tests;
