//! Orthographic scene: a camera and one textured plane covering the viewport.

pub(crate) mod camera;
pub(crate) mod plane;

use crate::effects::composite::over_in_place;
use crate::foundation::core::{Affine, Viewport};
use crate::foundation::error::{FrameStackError, FrameStackResult};
use crate::render::targets::RenderTarget;
use camera::{FRUSTUM, OrthographicCamera};
use plane::{Material, Plane, PlaneGeometry, Texture};

/// Camera plus plane. Rendering it fills a target with the plane texture.
pub struct Scene {
    camera: OrthographicCamera,
    plane: Plane,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("camera", &self.camera)
            .field("plane", &self.plane)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Scene sized to `viewport`, with no material bound.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            camera: OrthographicCamera::new(FRUSTUM),
            plane: Plane {
                geometry: PlaneGeometry {
                    width: viewport.width,
                    height: viewport.height,
                },
                material: None,
            },
            ctx: None,
        }
    }

    /// Replace the camera and record the new plane dimensions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera = OrthographicCamera::new(FRUSTUM);
        self.plane.geometry = PlaneGeometry {
            width: viewport.width,
            height: viewport.height,
        };
    }

    /// Active camera.
    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    /// The textured plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Bound material, if any.
    pub fn material(&self) -> Option<&Material> {
        self.plane.material.as_ref()
    }

    /// Assign a new material to the plane.
    pub fn set_material(&mut self, material: Material) {
        self.plane.material = Some(material);
    }

    /// Point the current material at a snapshot of `target` so the next render sees it.
    pub(crate) fn rebind_texture(&mut self, target: &RenderTarget) {
        let map = Texture::from_target(target);
        match self.plane.material.as_mut() {
            Some(m) => m.map = map,
            None => self.plane.material = Some(Material::new(map)),
        }
    }

    /// Rasterise the scene into `target` over the premultiplied clear colour.
    ///
    /// A texture the same size as the target is copied exactly; anything else is stretched over
    /// the plane with the texture's filter.
    pub fn render_into(&mut self, target: &mut RenderTarget, clear: [u8; 4]) -> FrameStackResult<()> {
        let (tw, th) = (target.width(), target.height());
        let Some(material) = self.plane.material.as_mut() else {
            target.clear(clear);
            return Ok(());
        };

        let transform = self.camera.projection(tw, th)
            * Plane::uv_to_world(material.map.width(), material.map.height());
        if !material.side.is_visible(transform) {
            target.clear(clear);
            return Ok(());
        }

        if material.map.width() == tw && material.map.height() == th {
            target.clear(clear);
            return over_in_place(target.data_mut(), material.map.data(), 1.0);
        }

        let paint = material.map.upload()?;
        let (w, h) = (material.map.width(), material.map.height());
        let mut ctx = take_ctx(&mut self.ctx, tw, th)?;
        let mut layer = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);
        self.ctx = Some(ctx);

        target.clear(clear);
        over_in_place(target.data_mut(), layer.data_as_u8_slice(), 1.0)
    }
}

fn take_ctx(
    slot: &mut Option<vello_cpu::RenderContext>,
    width: u32,
    height: u32,
) -> FrameStackResult<vello_cpu::RenderContext> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameStackError::target_allocation("target width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameStackError::target_allocation("target height exceeds u16"))?;
    let mut ctx = match slot.take() {
        Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
        _ => vello_cpu::RenderContext::new(w, h),
    };
    ctx.reset();
    Ok(ctx)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
