use std::sync::Arc;

use crate::assets::drawable::DrawableImage;
use crate::foundation::core::Affine;
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::render::targets::{FilterMode, RenderTarget};

/// Recorded plane dimensions (viewport CSS pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaneGeometry {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Which faces of the plane are rasterised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// Front faces only.
    #[default]
    Front,
    /// Back faces only.
    Back,
    /// Both faces.
    Double,
}

impl Side {
    /// Whether a plane drawn with `transform` shows a face this side renders.
    pub fn is_visible(self, transform: Affine) -> bool {
        let det = transform.determinant();
        match self {
            Self::Front => det > 0.0,
            Self::Back => det < 0.0,
            Self::Double => det != 0.0,
        }
    }
}

/// Premultiplied RGBA texture bound to the plane material.
///
/// Image-backed textures share the caller's pixels. The raster upload is built lazily on the first
/// scaled draw after `needs_update` was set.
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
    filter: FilterMode,
    needs_update: bool,
    uploaded: Option<vello_cpu::Image>,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("filter", &self.filter)
            .field("needs_update", &self.needs_update)
            .field("uploaded", &self.uploaded.is_some())
            .finish()
    }
}

impl Texture {
    /// Bind a drawable image. Fails with `ResourceBinding` when the image is unusable.
    pub fn from_image(image: &DrawableImage) -> FrameStackResult<Self> {
        image.validate()?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            pixels: image.shared_data(),
            filter: FilterMode::Linear,
            needs_update: true,
            uploaded: None,
        })
    }

    /// Snapshot a render target's pixels.
    pub fn from_target(target: &RenderTarget) -> Self {
        Self {
            width: target.width(),
            height: target.height(),
            pixels: Arc::new(target.data().to_vec()),
            filter: target.desc().mag_filter,
            needs_update: true,
            uploaded: None,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the next draw re-uploads the pixels.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Request a re-upload on the next draw.
    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    pub(crate) fn upload(&mut self) -> FrameStackResult<vello_cpu::Image> {
        if let Some(img) = self.uploaded.as_ref().filter(|_| !self.needs_update) {
            return Ok(img.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&self.pixels, self.width, self.height)?;
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: self.filter.image_quality(),
                ..vello_cpu::peniko::ImageSampler::default()
            },
        };
        self.uploaded = Some(img.clone());
        self.needs_update = false;
        Ok(img)
    }
}

/// Unlit single-texture material.
#[derive(Clone, Debug)]
pub struct Material {
    /// Rasterised faces.
    pub side: Side,
    /// Colour texture.
    pub map: Texture,
}

impl Material {
    /// Front-side material showing `map`.
    pub fn new(map: Texture) -> Self {
        Self {
            side: Side::Front,
            map,
        }
    }
}

/// Unit quad spanning the camera frustum.
#[derive(Clone, Debug, Default)]
pub struct Plane {
    /// Recorded dimensions.
    pub geometry: PlaneGeometry,
    /// Current material, if any.
    pub material: Option<Material>,
}

impl Plane {
    /// Texture pixel space (`[0, w] x [0, h]`, y down) to world space on the unit quad.
    pub fn uv_to_world(tex_w: u32, tex_h: u32) -> Affine {
        Affine::new([
            1.0 / f64::from(tex_w),
            0.0,
            0.0,
            -1.0 / f64::from(tex_h),
            -0.5,
            0.5,
        ])
    }
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FrameStackResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameStackError::resource_binding("texture width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameStackError::resource_binding("texture height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FrameStackError::resource_binding("texture byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}
