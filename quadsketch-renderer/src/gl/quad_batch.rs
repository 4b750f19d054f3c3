use quadsketch_math::{FlatBuffer, Matrix4};
use web_sys::{console, WebGl2RenderingContext};

use crate::{
    error::Error,
    gl::{
        buffer_upload_f32, create_buffer_f32, create_buffer_u8, Drawable, RenderContext,
        ShaderProgram, GL,
    },
    scene::Instance,
};

/// Instanced renderer for unit quads.
///
/// Every instance is a unit square centered on the origin, placed by its own
/// model matrix and tinted by its own color. The per-instance data comes from
/// [`InstanceBuffer::pack`](crate::scene::InstanceBuffer::pack) and is uploaded
/// verbatim; see [`Instance`] for the layout.
#[derive(Debug)]
pub struct QuadBatch {
    shader: ShaderProgram,
    buffers: QuadBuffers,
    view_projection_loc: web_sys::WebGlUniformLocation,
    view_projection: Matrix4,
    instance_count: i32,
}

#[derive(Debug)]
struct QuadBuffers {
    vao: web_sys::WebGlVertexArrayObject,
    _vertices: web_sys::WebGlBuffer,
    _indices: web_sys::WebGlBuffer,
    instances: web_sys::WebGlBuffer,
}

impl QuadBatch {
    const FRAGMENT_GLSL: &'static str = include_str!("../../shaders/quad.frag");
    const VERTEX_GLSL: &'static str = include_str!("../../shaders/quad.vert");

    /// Creates the quad geometry, the instance buffer and the shader program.
    ///
    /// `packed` is the initial instance data; its length must be a multiple of
    /// [`Instance::STRIDE`].
    pub fn new(gl: &WebGl2RenderingContext, packed: &[f32]) -> Result<Self, Error> {
        let vao = gl.create_vertex_array().ok_or(Error::vertex_array_creation_failed())?;
        gl.bind_vertex_array(Some(&vao));
        let buffers = setup_buffers(gl, vao, packed)?;
        gl.bind_vertex_array(None);

        let shader = ShaderProgram::create(gl, Self::VERTEX_GLSL, Self::FRAGMENT_GLSL)?;
        let view_projection_loc = gl
            .get_uniform_location(&shader.program, "u_view_projection")
            .ok_or(Error::uniform_location_failed("u_view_projection"))?;

        let instance_count = (packed.len() / Instance::STRIDE) as i32;
        console::log_1(&format!("quad batch: {instance_count} instances").into());

        Ok(Self {
            shader,
            buffers,
            view_projection_loc,
            view_projection: Matrix4::identity(),
            instance_count,
        })
    }

    /// Sets the matrix applied to every instance on the next draw.
    pub fn set_view_projection(&mut self, matrix: Matrix4) {
        self.view_projection = matrix;
    }

    /// Replaces the instance data on the GPU.
    ///
    /// The instance count follows the length of `packed`.
    pub fn update_instances(&mut self, gl: &WebGl2RenderingContext, packed: &[f32]) {
        gl.bind_vertex_array(Some(&self.buffers.vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffers.instances));
        buffer_upload_f32(gl, GL::ARRAY_BUFFER, packed, GL::DYNAMIC_DRAW);
        gl.bind_vertex_array(None);

        self.instance_count = (packed.len() / Instance::STRIDE) as i32;
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count as usize
    }
}

fn setup_buffers(
    gl: &WebGl2RenderingContext,
    vao: web_sys::WebGlVertexArrayObject,
    packed: &[f32],
) -> Result<QuadBuffers, Error> {
    #[rustfmt::skip]
    let vertices = [
        -0.5, -0.5,
         0.5, -0.5,
         0.5,  0.5,
        -0.5,  0.5,
    ];
    let indices = [0, 1, 2, 0, 2, 3];

    let vertex_buf = create_buffer_f32(gl, GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW)?;
    enable_vertex_attrib(gl, attrib::POS, 2, 0, 2 * 4);

    let instance_buf = create_buffer_f32(gl, GL::ARRAY_BUFFER, packed, GL::DYNAMIC_DRAW)?;
    let stride = (Instance::STRIDE * 4) as i32;
    for column in 0..4 {
        enable_instance_attrib(gl, attrib::MODEL + column, 4, column as i32 * 16, stride);
    }
    let color_offset = (Instance::COLOR_OFFSET * 4) as i32;
    enable_instance_attrib(gl, attrib::COLOR, 4, color_offset, stride);

    Ok(QuadBuffers {
        vao,
        _vertices: vertex_buf,
        _indices: create_buffer_u8(gl, GL::ELEMENT_ARRAY_BUFFER, &indices, GL::STATIC_DRAW)?,
        instances: instance_buf,
    })
}

fn enable_instance_attrib(
    gl: &WebGl2RenderingContext,
    index: u32,
    size: i32,
    offset: i32,
    stride: i32,
) {
    enable_vertex_attrib(gl, index, size, offset, stride);
    gl.vertex_attrib_divisor(index, 1);
}

fn enable_vertex_attrib(
    gl: &WebGl2RenderingContext,
    index: u32,
    size: i32,
    offset: i32,
    stride: i32,
) {
    gl.enable_vertex_attrib_array(index);
    gl.vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, false, stride, offset);
}

impl Drawable for QuadBatch {
    fn prepare(&self, context: &mut RenderContext) {
        let gl = context.gl;
        context
            .state
            .depth_test(gl, true)
            .blend(gl, Some((GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA)));

        self.shader.use_program(gl);
        gl.bind_vertex_array(Some(&self.buffers.vao));
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.view_projection_loc),
            false,
            self.view_projection.as_slice(),
        );
    }

    fn draw(&self, context: &mut RenderContext) {
        let gl = context.gl;
        gl.draw_elements_instanced_with_i32(
            GL::TRIANGLES,
            6,
            GL::UNSIGNED_BYTE,
            0,
            self.instance_count,
        );
    }

    fn cleanup(&self, context: &mut RenderContext) {
        context.gl.bind_vertex_array(None);
    }
}

/// Vertex attribute locations, matching `layout(location = ..)` in `quad.vert`.
mod attrib {
    pub const POS: u32 = 0;
    /// First of four consecutive `vec4` slots holding the model matrix columns.
    pub const MODEL: u32 = 1;
    pub const COLOR: u32 = 5;
}
