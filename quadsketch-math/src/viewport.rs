use crate::{degrees_to_radians, Matrix3, Vector2};

/// A 2D camera over a pixel-sized screen.
///
/// Combines a pixel-to-clip-space projection with a camera transform built from
/// `position`, `rotation` and `scale`. The camera and projection matrices are
/// owned scratch space, rebuilt from scratch on every
/// [`view_projection_matrix`](Self::view_projection_matrix) call; nothing is
/// cached between mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Camera scale; defaults to `(1, 1)`.
    pub scale: Vector2,
    /// Camera translation in pixels; defaults to the origin.
    pub position: Vector2,
    /// Camera rotation in radians; defaults to `0`.
    pub rotation: f32,
    screen_size: Vector2,
    camera: Matrix3,
    projection: Matrix3,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scale: Vector2::one(),
            position: Vector2::zero(),
            rotation: degrees_to_radians(0.0),
            screen_size: Vector2::new(width, height),
            camera: Matrix3::identity(),
            projection: Matrix3::identity(),
        }
    }

    pub fn screen_size(&self) -> Vector2 {
        self.screen_size
    }

    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        self.screen_size.set(width, height);
        self
    }

    /// Rebuilds and returns `projection * camera`.
    ///
    /// The camera matrix is composed as `identity → translate(position) →
    /// rotate(rotation) → scale(scale)`.
    pub fn view_projection_matrix(&mut self) -> &Matrix3 {
        self.projection
            .set_identity()
            .projection(self.screen_size.x(), self.screen_size.y());
        self.camera
            .set_identity()
            .translate(&self.position)
            .rotate(self.rotation)
            .scale(&self.scale);

        self.projection.multiply(&self.camera)
    }
}
