use std::{
    cell::{Cell, RefCell},
    fmt::{Debug, Formatter},
    rc::Rc,
    time::Duration,
};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::console;
use web_time::Instant;

use crate::{js, Error, Sketch};

/// Timing of a single animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Sum of all clamped deltas; the animation clock.
    pub elapsed: f32,
    pub frame_index: u64,
}

/// Animation clock advanced once per frame.
///
/// Deltas are clamped so a backgrounded tab or a debugger pause does not make
/// the animation jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f32,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            elapsed: 0.0,
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;
        self.elapsed += dt.as_secs_f32();

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Drives a [`Sketch`] from `requestAnimationFrame`.
///
/// Each display refresh advances the [`FrameClock`] and renders one frame.
/// A failing frame is logged to the console and stops the loop. Dropping the
/// `FrameLoop` stops it as well.
pub struct FrameLoop {
    sketch: Rc<RefCell<Sketch>>,
    running: Rc<Cell<bool>>,
    pending_frame: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    /// Starts rendering `sketch` on every animation frame.
    ///
    /// # Errors
    /// Returns an error if the first frame cannot be requested.
    pub fn start(sketch: Sketch) -> Result<Self, Error> {
        let sketch = Rc::new(RefCell::new(sketch));
        let running = Rc::new(Cell::new(true));
        let pending_frame = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let tick = {
            let sketch = sketch.clone();
            let running = running.clone();
            let pending_frame = pending_frame.clone();
            let callback = callback.clone();
            let mut clock = FrameClock::new();

            Closure::wrap(Box::new(move |_timestamp: f64| {
                pending_frame.set(None);
                if !running.get() {
                    return;
                }

                let time = clock.tick();
                if let Err(e) = sketch.borrow_mut().render_frame(time.elapsed) {
                    console::error_1(&format!("frame {}: {e}", time.frame_index).into());
                    running.set(false);
                    return;
                }

                match schedule(&callback) {
                    Ok(id) => pending_frame.set(id),
                    Err(e) => {
                        console::error_1(&format!("{e}").into());
                        running.set(false);
                    },
                }
            }) as Box<dyn FnMut(_)>)
        };
        *callback.borrow_mut() = Some(tick);

        pending_frame.set(schedule(&callback)?);
        console::log_1(&"frame loop started".into());

        Ok(Self { sketch, running, pending_frame, callback })
    }

    /// The sketch being rendered, shared with the frame callback.
    pub fn sketch(&self) -> Rc<RefCell<Sketch>> {
        self.sketch.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Stops the loop and cancels the pending frame, if any.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending_frame.take() {
            if let Ok(window) = js::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

fn schedule(callback: &RefCell<Option<FrameCallback>>) -> Result<Option<i32>, Error> {
    match callback.borrow().as_ref() {
        Some(closure) => js::request_animation_frame(closure.as_ref().unchecked_ref()).map(Some),
        None => Ok(None),
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // breaks the callback -> callback reference cycle
        self.callback.borrow_mut().take();
    }
}

impl Debug for FrameLoop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.running.get())
            .field("pending_frame", &self.pending_frame.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clock_accumulates_deltas() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick_at(start + Duration::from_millis(100));
        let second = clock.tick_at(start + Duration::from_millis(150));

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!((second.dt - 0.05).abs() < 1e-6);
        assert!((second.elapsed - 0.15).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_stalls() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let time = clock.tick_at(start + Duration::from_secs(30));

        assert_eq!(time.dt, 0.25);
        assert_eq!(time.elapsed, 0.25);
    }

    #[test]
    fn clock_ignores_time_going_backwards() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);

        let time = clock.tick_at(start - Duration::from_millis(500));

        assert_eq!(time.dt, 0.0);
        assert_eq!(time.elapsed, 0.0);
    }
}
