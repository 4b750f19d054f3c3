use crate::gl::GL;

/// Manages simple WebGL state to reduce redundant state changes
#[derive(Debug, Default)]
pub struct GlState {
    // Viewport dimensions
    viewport: [i32; 4], // [x, y, width, height]

    // Clear color
    clear_color: [f32; 4],

    // Blend function state; `None` while blending is disabled
    blend_func: Option<(u32, u32)>, // (src_factor, dst_factor)

    depth_test: bool,
}

impl GlState {
    /// Create a new GLState object with WebGL defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set viewport dimensions
    pub fn viewport(&mut self, gl: &GL, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        let new_viewport = [x, y, width, height];
        if self.viewport != new_viewport {
            gl.viewport(x, y, width, height);
            self.viewport = new_viewport;
        }
        self
    }

    /// Set clear color
    pub fn clear_color(&mut self, gl: &GL, r: f32, g: f32, b: f32, a: f32) -> &mut Self {
        let new_color = [r, g, b, a];
        if self.clear_color != new_color {
            gl.clear_color(r, g, b, a);
            self.clear_color = new_color;
        }
        self
    }

    /// Enable blending with the given factors, or disable it with `None`
    pub fn blend(&mut self, gl: &GL, func: Option<(u32, u32)>) -> &mut Self {
        if self.blend_func == func {
            return self;
        }

        match func {
            Some((src, dst)) => {
                if self.blend_func.is_none() {
                    self.capability(gl, GL::BLEND, true);
                }
                gl.blend_func(src, dst);
            },
            None => self.capability(gl, GL::BLEND, false),
        }
        self.blend_func = func;
        self
    }

    /// Enable or disable depth testing
    pub fn depth_test(&mut self, gl: &GL, enable: bool) -> &mut Self {
        if self.depth_test != enable {
            self.capability(gl, GL::DEPTH_TEST, enable);
            self.depth_test = enable;
        }
        self
    }

    /// Reset all tracked state to WebGL defaults
    pub fn reset(&mut self, gl: &GL) {
        self.blend(gl, None);
        self.depth_test(gl, false);

        // Note: We don't reset viewport or clear_color as these are typically
        // set based on canvas dimensions or application needs
    }

    fn capability(&self, gl: &GL, capability: u32, enable: bool) {
        if enable {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}
