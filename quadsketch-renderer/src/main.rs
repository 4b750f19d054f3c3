use quadsketch_renderer::{scene::CameraMode, Error, FrameLoop, Sketch};

fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    run().unwrap()
}

fn run() -> Result<(), Error> {
    let sketch = Sketch::builder("#canvas")
        .grid(24, 16)
        .camera(CameraMode::Perspective)
        .build()?;

    // the loop lives for as long as the page does
    std::mem::forget(FrameLoop::start(sketch)?);

    Ok(())
}
