use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::{
    input::CameraCommand,
    scene::{CameraMode, GridLayout},
    FrameLoop, Sketch, SketchBuilder,
};

/// Scene options accepted from JavaScript.
///
/// Every field is optional; omitted fields take their defaults.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneConfig {
    pub cols: u16,
    pub rows: u16,
    pub spacing: f32,
    pub quad_size: f32,
    pub camera: CameraMode,
    /// Background color as `0xRRGGBB`.
    pub clear_color: u32,
    pub keyboard: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let layout = GridLayout::default();
        Self {
            cols: layout.cols,
            rows: layout.rows,
            spacing: layout.spacing,
            quad_size: layout.quad_size,
            camera: CameraMode::default(),
            clear_color: 0x101018,
            keyboard: true,
        }
    }
}

impl SceneConfig {
    fn apply(&self, builder: SketchBuilder) -> SketchBuilder {
        builder
            .grid(self.cols, self.rows)
            .spacing(self.spacing)
            .quad_size(self.quad_size)
            .camera(self.camera)
            .clear_color(self.clear_color)
            .keyboard(self.keyboard)
    }
}

/// JavaScript handle to a running quad sketch
#[wasm_bindgen]
#[derive(Debug)]
pub struct QuadSketch {
    frame_loop: FrameLoop,
}

#[wasm_bindgen]
impl QuadSketch {
    /// Builds a sketch on the canvas matching `canvas_id` and starts animating it.
    ///
    /// `config` is a `SceneConfig`-shaped object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config: JsValue) -> Result<QuadSketch, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            SceneConfig::default()
        } else {
            from_value::<SceneConfig>(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let sketch = config
            .apply(Sketch::builder(canvas_id))
            .build()
            .map_err(|e| JsValue::from_str(&format!("Failed to create sketch: {e}")))?;
        let frame_loop = FrameLoop::start(sketch).map_err(|e| JsValue::from_str(&e.to_string()))?;

        console::log_1(&"QuadSketch initialized".into());
        Ok(QuadSketch { frame_loop })
    }

    /// Stops the animation; the last frame stays on the canvas.
    #[wasm_bindgen]
    pub fn stop(&self) {
        self.frame_loop.stop();
    }

    #[wasm_bindgen(getter, js_name = "isRunning")]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Resizes the canvas drawing buffer, in pixels.
    #[wasm_bindgen]
    pub fn resize(&self, width: i32, height: i32) {
        self.frame_loop.sketch().borrow_mut().resize(width, height);
    }

    /// Switches to `"perspective"`, `"orthographic"` or `"viewport"`.
    #[wasm_bindgen(js_name = "setCamera")]
    pub fn set_camera(&self, mode: JsValue) -> Result<(), JsValue> {
        let mode = from_value::<CameraMode>(mode).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.frame_loop.sketch().borrow_mut().set_camera_mode(mode);
        Ok(())
    }

    /// Pans the camera by `(dx, dy)` world units on the next frame.
    #[wasm_bindgen]
    pub fn pan(&self, dx: f32, dy: f32) {
        self.frame_loop.sketch().borrow().push_command(CameraCommand::Pan { dx, dy });
    }

    /// Zooms the camera by `factor` on the next frame.
    #[wasm_bindgen]
    pub fn zoom(&self, factor: f32) {
        self.frame_loop.sketch().borrow().push_command(CameraCommand::Zoom(factor));
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"quadsketch WASM module loaded".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_default_layout() {
        let config = SceneConfig::default();
        let layout = GridLayout::default();

        assert_eq!((config.cols, config.rows), (layout.cols, layout.rows));
        assert_eq!(config.camera, CameraMode::Perspective);
        assert!(config.keyboard);
    }
}
