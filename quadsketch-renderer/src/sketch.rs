use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use compact_str::CompactString;
use quadsketch_math::{Color, FlatBuffer, Matrix4};
use web_sys::console;

use crate::{
    gl::{QuadBatch, Renderer},
    input::{CameraCommand, CameraKeys, CommandQueue},
    scene::{Camera, CameraMode, GridLayout, Scene},
    Error,
};

/// An animated grid of instanced quads drawn to a canvas.
///
/// Owns the renderer, the GPU quad batch, the CPU-side scene and the active
/// camera. Call [`render_frame`](Self::render_frame) once per display refresh,
/// or hand the sketch to a [`FrameLoop`](crate::FrameLoop).
pub struct Sketch {
    renderer: Renderer,
    batch: QuadBatch,
    scene: Scene,
    camera: Box<dyn Camera>,
    camera_mode: CameraMode,
    commands: CommandQueue,
    _keys: Option<CameraKeys>,
}

impl Sketch {
    #[allow(private_bounds)]
    pub fn builder(canvas: impl Into<CanvasSource>) -> SketchBuilder {
        SketchBuilder::new(canvas.into())
    }

    /// Applies queued camera commands, advances the animation to `elapsed`
    /// seconds and draws the scene.
    ///
    /// Fails without drawing when the WebGL context is lost or the camera
    /// produces a non-finite view-projection matrix.
    pub fn render_frame(&mut self, elapsed: f32) -> Result<(), Error> {
        if self.renderer.gl().is_context_lost() {
            return Err(Error::context_lost());
        }

        {
            let mut commands = self.commands.borrow_mut();
            while let Some(command) = commands.pop_front() {
                command.apply(self.camera.as_mut());
            }
        }

        let view_projection = checked_view_projection(self.camera.as_mut())?;
        self.scene.update(elapsed);
        self.batch.update_instances(self.renderer.gl(), self.scene.pack());
        self.batch.set_view_projection(view_projection);

        self.renderer.begin_frame();
        self.renderer.render(&self.batch);
        self.renderer.end_frame();
        Ok(())
    }

    /// Resizes the canvas and adapts the camera to the new aspect ratio.
    ///
    /// Negative sizes are clamped to zero. The camera keeps its previous
    /// framing while the canvas has no area.
    pub fn resize(&mut self, width: i32, height: i32) {
        let (width, height) = (width.max(0), height.max(0));
        self.renderer.resize(width, height);
        resize_camera(self.camera.as_mut(), width, height);
    }

    /// Replaces the camera with a freshly framed one of the given kind.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        let (width, height) = self.renderer.canvas_size();
        self.camera = mode.create(width as f32, height as f32, scene_extent(self.scene.layout()));
        self.camera_mode = mode;

        console::log_1(&format!("camera: {mode:?}").into());
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// Queues a camera command for the next frame.
    pub fn push_command(&self, command: CameraCommand) {
        self.commands.borrow_mut().push_back(command);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        self.renderer.canvas_size()
    }

    pub fn canvas(&self) -> &web_sys::HtmlCanvasElement {
        self.renderer.canvas()
    }
}

fn resize_camera(camera: &mut dyn Camera, width: i32, height: i32) {
    if width > 0 && height > 0 {
        camera.resize(width as f32, height as f32);
    }
}

fn checked_view_projection(camera: &mut dyn Camera) -> Result<Matrix4, Error> {
    let view_projection = camera.view_projection();
    if view_projection.as_slice().iter().all(|v| v.is_finite()) {
        Ok(view_projection)
    } else {
        Err(Error::non_finite_view_projection())
    }
}

/// Largest world extent of the grid, including the quads themselves.
fn scene_extent(layout: &GridLayout) -> f32 {
    let (width, height) = layout.extent();
    width.max(height) + layout.quad_size
}

enum CanvasSource {
    Id(CompactString),
    Element(web_sys::HtmlCanvasElement),
}

pub struct SketchBuilder {
    canvas: CanvasSource,
    layout: GridLayout,
    camera_mode: CameraMode,
    clear_color: u32,
    keyboard: bool,
}

impl SketchBuilder {
    fn new(canvas: CanvasSource) -> Self {
        SketchBuilder {
            canvas,
            layout: GridLayout::default(),
            camera_mode: CameraMode::default(),
            clear_color: 0x101018,
            keyboard: true,
        }
    }

    /// Number of quad columns and rows.
    pub fn grid(mut self, cols: u16, rows: u16) -> Self {
        self.layout.cols = cols;
        self.layout.rows = rows;
        self
    }

    /// Distance between neighbouring quad centers, in world units.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.layout.spacing = spacing;
        self
    }

    /// Edge length of a quad at rest, in world units.
    pub fn quad_size(mut self, size: f32) -> Self {
        self.layout.quad_size = size;
        self
    }

    pub fn camera(mut self, mode: CameraMode) -> Self {
        self.camera_mode = mode;
        self
    }

    /// Background color as `0xRRGGBB`.
    pub fn clear_color(mut self, color: u32) -> Self {
        self.clear_color = color;
        self
    }

    /// Whether arrow/WASD and `+`/`-` keys control the camera.
    pub fn keyboard(mut self, enabled: bool) -> Self {
        self.keyboard = enabled;
        self
    }

    pub fn build(self) -> Result<Sketch, Error> {
        let renderer = match self.canvas {
            CanvasSource::Id(id) => Renderer::create(&id)?,
            CanvasSource::Element(element) => Renderer::create_with_canvas(element)?,
        };
        let renderer = renderer.clear_color(Color::from_rgb(self.clear_color));

        let mut scene = Scene::new(self.layout);
        let batch = QuadBatch::new(renderer.gl(), scene.pack())?;

        let (width, height) = renderer.canvas_size();
        console::log_1(&format!("canvas size {width}x{height}").into());
        let camera = self.camera_mode.create(width as f32, height as f32, scene_extent(&self.layout));

        let commands: CommandQueue = Rc::new(RefCell::new(VecDeque::new()));
        let keys = if self.keyboard { Some(CameraKeys::new(commands.clone())?) } else { None };

        Ok(Sketch {
            renderer,
            batch,
            scene,
            camera,
            camera_mode: self.camera_mode,
            commands,
            _keys: keys,
        })
    }
}

impl From<&str> for CanvasSource {
    fn from(id: &str) -> Self {
        CanvasSource::Id(id.into())
    }
}

impl From<CompactString> for CanvasSource {
    fn from(id: CompactString) -> Self {
        CanvasSource::Id(id)
    }
}

impl From<web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(element: web_sys::HtmlCanvasElement) -> Self {
        CanvasSource::Element(element)
    }
}

impl<'a> From<&'a web_sys::HtmlCanvasElement> for CanvasSource {
    fn from(value: &'a web_sys::HtmlCanvasElement) -> Self {
        value.clone().into()
    }
}
