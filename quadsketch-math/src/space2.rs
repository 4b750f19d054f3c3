use crate::{number_in_range, Vector2};

/// An axis-aligned rectangle used as a coordinate remapping domain.
///
/// A `Space2` describes no geometry of its own; it only names a coordinate
/// system (pixels, normalized device coordinates, model units, ...) so points
/// can be converted between two of them. Each axis must have `max > min`;
/// this is not checked, and a zero-width axis yields non-finite coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Space2 {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Space2 {
    /// Creates the space `[0, max_x] × [0, max_y]`.
    pub const fn new(max_x: f32, max_y: f32) -> Self {
        Self::with_min(0.0, max_x, 0.0, max_y)
    }

    pub const fn with_min(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Remaps `point` from this space into `target`, in place.
    pub fn transform<'a>(&self, target: &Space2, point: &'a mut Vector2) -> &'a mut Vector2 {
        let (x, y) = self.remap(target, point);
        point.set(x, y)
    }

    /// Remaps `point` from this space into `target`, writing the result to `out`.
    pub fn transform_into<'a>(
        &self,
        target: &Space2,
        point: &Vector2,
        out: &'a mut Vector2,
    ) -> &'a mut Vector2 {
        let (x, y) = self.remap(target, point);
        out.set(x, y)
    }

    fn remap(&self, target: &Space2, point: &Vector2) -> (f32, f32) {
        let x = number_in_range(self.min_x, self.max_x, target.min_x, target.max_x, point.x());
        let y = number_in_range(self.min_y, self.max_y, target.min_y, target.max_y, point.y());
        (x, y)
    }
}
