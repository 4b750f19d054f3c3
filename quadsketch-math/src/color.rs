use crate::flat::impl_flat_buffer;

/// RGBA color with unclamped `f32` channels.
///
/// Defaults to opaque black, `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    data: [f32; 4],
}

impl_flat_buffer!(Color);

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { data: [r, g, b, a] }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    pub fn from_rgb(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
        let b = (rgb & 0xFF) as f32 / 255.0;
        Self::new(r, g, b, 1.0)
    }

    pub fn r(&self) -> f32 {
        self.data[0]
    }

    pub fn g(&self) -> f32 {
        self.data[1]
    }

    pub fn b(&self) -> f32 {
        self.data[2]
    }

    pub fn a(&self) -> f32 {
        self.data[3]
    }

    pub fn set_r(&mut self, r: f32) -> &mut Self {
        self.data[0] = r;
        self
    }

    pub fn set_g(&mut self, g: f32) -> &mut Self {
        self.data[1] = g;
        self
    }

    pub fn set_b(&mut self, b: f32) -> &mut Self {
        self.data[2] = b;
        self
    }

    pub fn set_a(&mut self, a: f32) -> &mut Self {
        self.data[3] = a;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_opaque_black() {
        let c = Color::default();
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn channels_are_not_clamped() {
        let mut c = Color::default();
        c.set_r(2.5).set_g(-1.0).set_a(0.0);

        assert_eq!(c, Color::new(2.5, -1.0, 0.0, 0.0));
    }

    #[test]
    fn unpacks_rgb() {
        assert_eq!(Color::from_rgb(0xFF0000), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::from_rgb(0x00FF00).g(), 1.0);
        assert_eq!(Color::from_rgb(0x000000), Color::default());
    }
}
