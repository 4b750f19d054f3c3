use crate::gl::GL;

/// Uploads an array of `f32` values to the currently bound WebGL buffer.
///
/// # Parameters
/// * `gl` - WebGL context
/// * `target` - Buffer target (e.g., GL::ARRAY_BUFFER)
/// * `data` - Values to upload
/// * `usage` - Usage hint (e.g., GL::STATIC_DRAW)
pub(crate) fn buffer_upload_f32(gl: &GL, target: u32, data: &[f32], usage: u32) {
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(target, &view, usage);
    }
}

/// Creates a buffer, binds it to `target` and fills it with `data`.
pub(crate) fn create_buffer_f32(
    gl: &GL,
    target: u32,
    data: &[f32],
    usage: u32,
) -> Result<web_sys::WebGlBuffer, crate::Error> {
    let buffer = gl.create_buffer().ok_or(crate::Error::buffer_creation_failed("vbo-f32"))?;
    gl.bind_buffer(target, Some(&buffer));
    buffer_upload_f32(gl, target, data, usage);

    Ok(buffer)
}

/// Creates a buffer, binds it to `target` and fills it with `data`.
pub(crate) fn create_buffer_u8(
    gl: &GL,
    target: u32,
    data: &[u8],
    usage: u32,
) -> Result<web_sys::WebGlBuffer, crate::Error> {
    let buffer = gl.create_buffer().ok_or(crate::Error::buffer_creation_failed("vbo-u8"))?;
    gl.bind_buffer(target, Some(&buffer));
    gl.buffer_data_with_u8_array(target, data, usage);

    Ok(buffer)
}
