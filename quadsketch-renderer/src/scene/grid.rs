use quadsketch_math::{number_in_range, Color, Space2, Vector2, Vector3};

use crate::scene::{Instance, InstanceBuffer};

/// Layout of the quad grid in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cols: u16,
    pub rows: u16,
    /// Distance between neighbouring quad centers.
    pub spacing: f32,
    /// Edge length of a quad at rest.
    pub quad_size: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { cols: 16, rows: 12, spacing: 1.25, quad_size: 1.0 }
    }
}

impl GridLayout {
    /// Width and height spanned by the quad centers.
    pub fn extent(&self) -> (f32, f32) {
        let span = |n: u16| n.saturating_sub(1) as f32 * self.spacing;
        (span(self.cols), span(self.rows))
    }

    /// Grid coordinates, with a single-column or single-row grid widened to
    /// `[0, 1]` so the remapping stays finite.
    fn grid_space(&self) -> Space2 {
        let axis = |n: u16| n.saturating_sub(1).max(1) as f32;
        Space2::new(axis(self.cols), axis(self.rows))
    }

    /// World rectangle covered by the quad centers, centered on the origin.
    fn world_space(&self) -> Space2 {
        let (w, h) = self.extent();
        Space2::with_min(-w * 0.5, w * 0.5, -h * 0.5, h * 0.5)
    }
}

/// An animated grid of colored quads.
///
/// Quad `(col, row)` sits in the `z = 0` plane with row `0` at the bottom.
/// Its red and green channels follow its column and row; blue and scale pulse
/// over time in a wave running diagonally across the grid.
#[derive(Debug, Clone)]
pub struct Scene {
    layout: GridLayout,
    instances: InstanceBuffer,
    elapsed: f32,
}

impl Scene {
    pub fn new(layout: GridLayout) -> Self {
        let grid = layout.grid_space();
        let world = layout.world_space();

        let instances = (0..layout.rows)
            .flat_map(|row| (0..layout.cols).map(move |col| (col, row)))
            .map(|(col, row)| {
                let mut center = Vector2::zero();
                grid.transform_into(&world, &Vector2::new(col as f32, row as f32), &mut center);

                let (u, v) = grid_color(&grid, col, row);
                let color = Color::new(u, v, 0.5, 1.0);

                let mut instance = Instance::new(Vector3::new(center.x(), center.y(), 0.0), color);
                instance.scale.set(layout.quad_size, layout.quad_size, 1.0);
                instance
            })
            .collect();

        Self {
            layout,
            instances: InstanceBuffer::new(instances),
            elapsed: 0.0,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Seconds of animation applied so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// Advances the animation to `elapsed` seconds since start.
    pub fn update(&mut self, elapsed: f32) {
        self.elapsed = elapsed;

        let cols = self.layout.cols.max(1) as usize;
        let rest = self.layout.quad_size;
        for (idx, instance) in self.instances.instances_mut().iter_mut().enumerate() {
            let (col, row) = (idx % cols, idx / cols);
            let wave = (elapsed * 2.0 - (col + row) as f32 * 0.35).sin();

            let size = rest * number_in_range(-1.0, 1.0, 0.6, 1.0, wave);
            instance.scale.set(size, size, 1.0);
            instance.color.set_b(number_in_range(-1.0, 1.0, 0.2, 1.0, wave));
        }
    }

    /// Rebuilds the model matrices and returns the packed instance data.
    pub fn pack(&mut self) -> &[f32] {
        self.instances.pack()
    }
}

/// Red and green channel for the quad at `(col, row)`.
fn grid_color(grid: &Space2, col: u16, row: u16) -> (f32, f32) {
    let mut uv = Vector2::new(col as f32, row as f32);
    grid.transform(&Space2::new(1.0, 1.0), &mut uv);
    (uv.x(), uv.y())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout(cols: u16, rows: u16) -> GridLayout {
        GridLayout { cols, rows, spacing: 2.0, quad_size: 1.0 }
    }

    #[test]
    fn grid_is_centered_on_origin() {
        let scene = Scene::new(layout(3, 2));
        let positions: Vec<_> = scene
            .instances()
            .instances()
            .iter()
            .map(|i| (i.position.x(), i.position.y()))
            .collect();

        assert_eq!(
            positions,
            vec![(-2.0, -1.0), (0.0, -1.0), (2.0, -1.0), (-2.0, 1.0), (0.0, 1.0), (2.0, 1.0)]
        );
    }

    #[test]
    fn colors_span_unit_range() {
        let scene = Scene::new(layout(5, 3));
        let instances = scene.instances().instances();

        let first = instances[0].color;
        let last = instances[instances.len() - 1].color;
        assert_eq!((first.r(), first.g()), (0.0, 0.0));
        assert_eq!((last.r(), last.g()), (1.0, 1.0));
        assert_eq!(instances[2].color.r(), 0.5);
    }

    #[test]
    fn single_row_grid_stays_finite() {
        let mut scene = Scene::new(layout(4, 1));
        let data = scene.pack();

        assert!(data.iter().all(|v| v.is_finite()));
        assert_eq!(scene.instances().instances()[0].color.g(), 0.0);
        assert_eq!(scene.instances().instances()[0].position.y(), 0.0);
    }

    #[test]
    fn update_animates_scale_and_blue() {
        let mut scene = Scene::new(layout(2, 2));
        scene.update(std::f32::consts::FRAC_PI_4);

        // wave = sin(pi/2) = 1 for the first quad
        let first = &scene.instances().instances()[0];
        assert_eq!(first.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(first.color.b(), 1.0);

        for instance in scene.instances().instances() {
            assert!((0.6..=1.0).contains(&instance.scale.x()));
            assert!((0.2..=1.0).contains(&instance.color.b()));
        }
    }

    #[test]
    fn pack_writes_every_instance() {
        let mut scene = Scene::new(layout(3, 3));
        scene.update(0.5);
        let data = scene.pack().to_vec();

        assert_eq!(data.len(), 9 * Instance::STRIDE);
        let last = &data[8 * Instance::STRIDE..];
        assert_eq!(&last[12..15], &[2.0, 2.0, 0.0]);
    }
}
