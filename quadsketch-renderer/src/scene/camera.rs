use quadsketch_math::{degrees_to_radians, Matrix4, Vector2, Vector3, Viewport};

/// A source of the combined view-projection matrix fed to the quad shader.
///
/// World space is y-up with quads lying in the `z = 0` plane. `pan` offsets
/// are in world units; `zoom` factors above `1.0` magnify.
pub trait Camera {
    /// Rebuilds and returns `projection * view`.
    fn view_projection(&mut self) -> Matrix4;

    /// Adapts the projection to a new canvas size in pixels.
    fn resize(&mut self, width: f32, height: f32);

    /// Moves the camera parallel to the `z = 0` plane.
    fn pan(&mut self, dx: f32, dy: f32);

    /// Scales the apparent size of the scene around the screen center.
    fn zoom(&mut self, factor: f32);
}

/// Which camera a sketch views its scene through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "js-api", derive(serde::Deserialize))]
#[cfg_attr(feature = "js-api", serde(rename_all = "camelCase"))]
pub enum CameraMode {
    #[default]
    Perspective,
    Orthographic,
    Viewport,
}

impl CameraMode {
    /// Creates a camera of this kind framing a scene of roughly `extent` world
    /// units across, on a canvas of `width` x `height` pixels.
    ///
    /// Sizes below one pixel are treated as one.
    pub fn create(self, width: f32, height: f32, extent: f32) -> Box<dyn Camera> {
        let (width, height) = (width.max(1.0), height.max(1.0));
        let extent = extent.max(1.0);
        match self {
            CameraMode::Perspective => {
                let eye = Vector3::new(0.0, -extent * 0.6, extent * 1.1);
                Box::new(PerspectiveCamera::new(60.0, width / height, eye))
            },
            CameraMode::Orthographic => {
                Box::new(OrthographicCamera::new(extent * 0.6, width / height))
            },
            CameraMode::Viewport => {
                let pixels_per_unit = width.min(height) / (extent * 1.2);
                Box::new(ViewportCamera::new(width, height, pixels_per_unit))
            },
        }
    }
}

/// Perspective camera looking from `eye` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vector3,
    pub target: Vector3,
    pub up: Vector3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, eye: Vector3) -> Self {
        Self {
            fov,
            aspect,
            near: 0.1,
            far: 1000.0,
            eye,
            target: Vector3::zero(),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Camera for PerspectiveCamera {
    fn view_projection(&mut self) -> Matrix4 {
        let projection =
            Matrix4::perspective(degrees_to_radians(self.fov), self.aspect, self.near, self.far);

        let mut view = Matrix4::identity();
        view.look_at(&self.eye, &self.target, &self.up).invert();

        let mut view_projection = Matrix4::identity();
        view_projection.multiply_matrices(&projection, &view);
        view_projection
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let offset = Vector3::new(dx, dy, 0.0);
        self.eye.add(&offset);
        self.target.add(&offset);
    }

    fn zoom(&mut self, factor: f32) {
        let mut offset = Vector3::zero();
        offset.subtract_vectors(&self.eye, &self.target).scale(1.0 / factor);
        self.eye = self.target;
        self.eye.add(&offset);
    }
}

/// Orthographic camera centered on `position`, showing `half_height` world
/// units above and below it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub half_height: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vector3,
}

impl OrthographicCamera {
    pub fn new(half_height: f32, aspect: f32) -> Self {
        Self {
            half_height,
            aspect,
            near: -100.0,
            far: 100.0,
            position: Vector3::zero(),
        }
    }
}

impl Camera for OrthographicCamera {
    fn view_projection(&mut self) -> Matrix4 {
        let half_width = self.half_height * self.aspect;
        let projection = Matrix4::ortho(
            -half_width,
            half_width,
            -self.half_height,
            self.half_height,
            self.near,
            self.far,
        );

        let mut view = Matrix4::from_translation(&self.position);
        view.invert();

        let mut view_projection = Matrix4::identity();
        view_projection.multiply_matrices(&projection, &view);
        view_projection
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        self.position.add(&Vector3::new(dx, dy, 0.0));
    }

    fn zoom(&mut self, factor: f32) {
        self.half_height /= factor;
    }
}

/// Pixel-space 2D camera built on [`Viewport`].
///
/// World units are scaled to `pixels_per_unit` with y flipped to point up,
/// and the world origin starts at the screen center.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    viewport: Viewport,
}

impl ViewportCamera {
    pub fn new(width: f32, height: f32, pixels_per_unit: f32) -> Self {
        let mut viewport = Viewport::new(width, height);
        viewport.scale.set(pixels_per_unit, -pixels_per_unit);
        viewport.position.set(width * 0.5, height * 0.5);
        Self { viewport }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    fn screen_center(&self) -> Vector2 {
        let size = self.viewport.screen_size();
        Vector2::new(size.x() * 0.5, size.y() * 0.5)
    }
}

impl Camera for ViewportCamera {
    fn view_projection(&mut self) -> Matrix4 {
        Matrix4::from_matrix3(self.viewport.view_projection_matrix())
    }

    fn resize(&mut self, width: f32, height: f32) {
        // keep the world point under the screen center in place
        let old = self.screen_center();
        self.viewport.resize(width, height);
        let new = self.screen_center();
        self.viewport
            .position
            .add(&Vector2::new(new.x() - old.x(), new.y() - old.y()));
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let vp = &mut self.viewport;
        let (x, y) = (vp.position.x(), vp.position.y());
        vp.position.set(x - dx * vp.scale.x(), y - dy * vp.scale.y());
    }

    fn zoom(&mut self, factor: f32) {
        let center = self.screen_center();
        let vp = &mut self.viewport;
        let (x, y) = (vp.position.x(), vp.position.y());
        vp.position.set(
            center.x() - (center.x() - x) * factor,
            center.y() - (center.y() - y) * factor,
        );
        vp.scale.set(vp.scale.x() * factor, vp.scale.y() * factor);
    }
}

#[cfg(test)]
mod tests {
    use quadsketch_math::FlatBuffer;

    use super::*;

    fn project(camera: &mut dyn Camera, x: f32, y: f32) -> (f32, f32) {
        let p = camera.view_projection().transform_point(&Vector3::new(x, y, 0.0));
        (p.x(), p.y())
    }

    fn assert_near(actual: (f32, f32), expected: (f32, f32)) {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;
        assert!(
            close(actual.0, expected.0) && close(actual.1, expected.1),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn perspective_projects_through_eye() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, Vector3::new(0.0, 0.0, 10.0));

        // f = 1 / tan(22.5°); x_ndc = f / distance
        assert_near(project(&mut camera, 0.0, 0.0), (0.0, 0.0));
        assert_near(project(&mut camera, 1.0, 0.0), (0.241_421, 0.0));
        assert_near(project(&mut camera, 0.0, -1.0), (0.0, -0.241_421));
    }

    #[test]
    fn perspective_zoom_halves_distance() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, Vector3::new(0.0, 0.0, 10.0));
        camera.zoom(2.0);

        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, 5.0));
        assert_near(project(&mut camera, 1.0, 0.0), (0.482_843, 0.0));
    }

    #[test]
    fn perspective_pan_moves_eye_and_target() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, Vector3::new(0.0, 0.0, 10.0));
        camera.pan(3.0, -2.0);

        assert_eq!(camera.eye, Vector3::new(3.0, -2.0, 10.0));
        assert_eq!(camera.target, Vector3::new(3.0, -2.0, 0.0));
        assert_near(project(&mut camera, 3.0, -2.0), (0.0, 0.0));
    }

    #[test]
    fn orthographic_maps_extents_to_clip_edges() {
        let mut camera = OrthographicCamera::new(5.0, 2.0);
        camera.pan(1.0, 0.0);

        assert_near(project(&mut camera, 1.0, 0.0), (0.0, 0.0));
        assert_near(project(&mut camera, 11.0, 5.0), (1.0, 1.0));
        assert_near(project(&mut camera, -9.0, -5.0), (-1.0, -1.0));

        camera.zoom(5.0);
        assert_near(project(&mut camera, 3.0, 1.0), (1.0, 1.0));
    }

    #[test]
    fn orthographic_resize_keeps_vertical_extent() {
        let mut camera = OrthographicCamera::new(5.0, 1.0);
        camera.resize(400.0, 100.0);

        assert_near(project(&mut camera, 20.0, 5.0), (1.0, 1.0));
    }

    #[test]
    fn viewport_centers_world_origin() {
        let mut camera = ViewportCamera::new(800.0, 600.0, 100.0);

        assert_near(project(&mut camera, 0.0, 0.0), (0.0, 0.0));
        assert_near(project(&mut camera, 4.0, 3.0), (1.0, 1.0));
        assert_near(project(&mut camera, -4.0, -3.0), (-1.0, -1.0));
    }

    #[test]
    fn viewport_pan_and_zoom() {
        let mut camera = ViewportCamera::new(800.0, 600.0, 100.0);

        camera.pan(1.0, 1.0);
        assert_near(project(&mut camera, 1.0, 1.0), (0.0, 0.0));

        camera.pan(-1.0, -1.0);
        camera.zoom(2.0);
        assert_near(project(&mut camera, 0.0, 0.0), (0.0, 0.0));
        assert_near(project(&mut camera, 2.0, 1.5), (1.0, 1.0));
    }

    #[test]
    fn viewport_resize_keeps_center() {
        let mut camera = ViewportCamera::new(800.0, 600.0, 100.0);
        camera.resize(1000.0, 800.0);

        assert_eq!(camera.viewport().screen_size(), Vector2::new(1000.0, 800.0));
        assert_near(project(&mut camera, 0.0, 0.0), (0.0, 0.0));
        assert_near(project(&mut camera, 5.0, 4.0), (1.0, 1.0));
    }

    #[test]
    fn every_mode_frames_the_origin() {
        for mode in [CameraMode::Perspective, CameraMode::Orthographic, CameraMode::Viewport] {
            let mut camera = mode.create(800.0, 600.0, 10.0);
            let (x, y) = project(camera.as_mut(), 0.0, 0.0);
            assert!(x.abs() <= 1.0 && y.abs() <= 1.0, "{mode:?}: ({x}, {y})");
        }
    }

    #[test]
    fn every_mode_stays_finite_on_empty_canvas() {
        for mode in [CameraMode::Perspective, CameraMode::Orthographic, CameraMode::Viewport] {
            let mut camera = mode.create(800.0, 0.0, 10.0);
            let view_projection = camera.view_projection();
            assert!(
                view_projection.as_slice().iter().all(|v| v.is_finite()),
                "{mode:?}: {view_projection:?}"
            );
        }
    }
}
