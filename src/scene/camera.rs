use crate::foundation::core::{Affine, Point};

/// Half-extent of the orthographic frustum in world units.
pub const FRUSTUM: f64 = 0.5;

/// Orthographic camera looking down at the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthographicCamera {
    /// Left clip plane.
    pub left: f64,
    /// Right clip plane.
    pub right: f64,
    /// Top clip plane.
    pub top: f64,
    /// Bottom clip plane.
    pub bottom: f64,
    /// Near clip plane.
    pub near: f64,
    /// Far clip plane.
    pub far: f64,
    /// Point the camera is aimed at.
    pub look_at: Point,
}

impl OrthographicCamera {
    /// Symmetric camera spanning `[-frustum, frustum]` on both axes, aimed at the origin.
    pub fn new(frustum: f64) -> Self {
        Self {
            left: -frustum,
            right: frustum,
            top: frustum,
            bottom: -frustum,
            near: 0.0,
            far: 1.0,
            look_at: Point::ORIGIN,
        }
    }

    /// World-to-target transform for a `target_w x target_h` pixel target (y down).
    pub fn projection(&self, target_w: u32, target_h: u32) -> Affine {
        let tw = f64::from(target_w);
        let th = f64::from(target_h);
        let sx = tw / (self.right - self.left);
        let sy = -th / (self.top - self.bottom);
        Affine::new([sx, 0.0, 0.0, sy, -self.left * sx, self.top * th / (self.top - self.bottom)])
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self::new(FRUSTUM)
    }
}
