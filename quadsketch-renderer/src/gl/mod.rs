mod buffer;
mod context;
mod program;
mod quad_batch;
mod renderer;

use buffer::*;
pub(crate) use program::*;
pub use quad_batch::*;
pub use renderer::*;

pub(crate) type GL = web_sys::WebGl2RenderingContext;

use crate::gl::context::GlState;

/// Rendering context that provides access to WebGL state.
pub(super) struct RenderContext<'a> {
    pub gl: &'a web_sys::WebGl2RenderingContext,
    pub state: &'a mut GlState,
}
