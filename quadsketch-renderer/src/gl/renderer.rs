use quadsketch_math::Color;
use web_sys::HtmlCanvasElement;

use crate::{
    error::Error,
    gl::{context::GlState, RenderContext, GL},
    js,
};

/// High-level WebGL2 renderer for the sketch scene.
///
/// The `Renderer` manages the WebGL2 rendering context and canvas, and provides
/// a simplified interface for rendering drawable objects. It handles frame
/// management and viewport setup; all projection work happens in the cameras.
#[derive(Debug)]
pub struct Renderer {
    gl: web_sys::WebGl2RenderingContext,
    canvas: web_sys::HtmlCanvasElement,
    state: GlState,
    clear_color: Color,
}

impl Renderer {
    /// Creates a new renderer by querying for a canvas element with the given selector.
    ///
    /// # Parameters
    /// * `canvas_id` - CSS selector for the canvas element (e.g., "canvas" or "#my-canvas")
    ///
    /// # Errors
    /// * `Error::Initialization` - Canvas element not found, or WebGL2 unavailable
    pub fn create(canvas_id: &str) -> Result<Self, Error> {
        let canvas = js::get_canvas_by_id(canvas_id)?;
        Self::create_with_canvas(canvas)
    }

    /// Sets the color the canvas is cleared to at the start of each frame.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Creates a new renderer from an existing HTML canvas element.
    pub fn create_with_canvas(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let (width, height) = (canvas.width(), canvas.height());

        // initialize WebGL context
        let gl = js::get_webgl2_context(&canvas)?;

        let mut renderer = Self {
            gl,
            canvas,
            state: GlState::new(),
            clear_color: Color::default(),
        };
        renderer.resize(width as _, height as _);
        Ok(renderer)
    }

    /// Resizes the canvas and updates the viewport.
    pub fn resize(&mut self, width: i32, height: i32) {
        let (width, height) = (width.max(0), height.max(0));
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.state.viewport(&self.gl, 0, 0, width, height);
    }

    /// Clears the color and depth buffers with the specified color.
    pub fn clear(&mut self, color: &Color) {
        self.state.clear_color(&self.gl, color.r(), color.g(), color.b(), color.a());
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    /// Begins a new rendering frame.
    pub fn begin_frame(&mut self) {
        let color = self.clear_color;
        self.clear(&color);
    }

    /// Renders a drawable object.
    ///
    /// This method calls the drawable's prepare, draw, and cleanup methods
    /// in sequence, providing it with a render context.
    #[allow(private_bounds)]
    pub fn render(&mut self, drawable: &impl Drawable) {
        let mut context = RenderContext { gl: &self.gl, state: &mut self.state };

        drawable.prepare(&mut context);
        drawable.draw(&mut context);
        drawable.cleanup(&mut context);
    }

    /// Ends the current rendering frame.
    pub fn end_frame(&mut self) {
        self.gl.flush();
    }

    /// Returns a reference to the WebGL2 rendering context.
    pub fn gl(&self) -> &GL {
        &self.gl
    }

    /// Returns a reference to the HTML canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Returns the current canvas dimensions as `(width, height)` in pixels.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas.width() as i32, self.canvas.height() as i32)
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.state.reset(&self.gl);
    }
}

/// Trait for objects that can be rendered by the renderer.
pub(super) trait Drawable {
    /// Prepares the object for rendering.
    ///
    /// This method should bind shaders, uniforms and vertex data required for rendering.
    fn prepare(&self, context: &mut RenderContext);

    /// Performs the actual rendering.
    ///
    /// All necessary state should already be set up from the `prepare()` call.
    fn draw(&self, context: &mut RenderContext);

    /// Cleans up after rendering.
    ///
    /// This method should unbind any resources that were bound during `prepare()`.
    fn cleanup(&self, context: &mut RenderContext);
}
