use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt::{Debug, Formatter},
    rc::Rc,
};

use wasm_bindgen::{closure::Closure, JsCast};

use crate::{js, scene::Camera, Error};

/// World units moved per pan key press.
const PAN_STEP: f32 = 0.5;
/// Zoom factor applied per zoom key press.
const ZOOM_STEP: f32 = 1.1;

/// A camera adjustment requested by user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Move the camera by `(dx, dy)` world units.
    Pan { dx: f32, dy: f32 },
    /// Magnify by the given factor; values below `1.0` zoom out.
    Zoom(f32),
}

impl CameraCommand {
    /// Applies this command to `camera`.
    pub fn apply(self, camera: &mut dyn Camera) {
        match self {
            CameraCommand::Pan { dx, dy } => camera.pan(dx, dy),
            CameraCommand::Zoom(factor) => camera.zoom(factor),
        }
    }
}

/// Maps a `KeyboardEvent.key` value to a camera command.
///
/// Arrow keys and WASD pan, `+`/`=` zoom in and `-`/`_` zoom out. Letter keys
/// match regardless of case.
pub fn command_for_key(key: &str) -> Option<CameraCommand> {
    use CameraCommand::*;

    let command = match key {
        "ArrowLeft" | "a" | "A" => Pan { dx: -PAN_STEP, dy: 0.0 },
        "ArrowRight" | "d" | "D" => Pan { dx: PAN_STEP, dy: 0.0 },
        "ArrowUp" | "w" | "W" => Pan { dx: 0.0, dy: PAN_STEP },
        "ArrowDown" | "s" | "S" => Pan { dx: 0.0, dy: -PAN_STEP },
        "+" | "=" => Zoom(ZOOM_STEP),
        "-" | "_" => Zoom(1.0 / ZOOM_STEP),
        _ => return None,
    };
    Some(command)
}

/// Commands queued by input handlers until the next frame consumes them.
pub type CommandQueue = Rc<RefCell<VecDeque<CameraCommand>>>;

/// Keyboard camera controls.
///
/// Listens for `keydown` on the window and queues the mapped
/// [`CameraCommand`]s. The listener is removed when the handler is dropped.
pub struct CameraKeys {
    window: web_sys::Window,
    on_key_down: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl CameraKeys {
    /// Attaches a `keydown` listener that pushes commands into `queue`.
    ///
    /// # Errors
    /// Returns an error if the window is unavailable or the listener cannot be
    /// attached.
    pub fn new(queue: CommandQueue) -> Result<Self, Error> {
        let window = js::window()?;

        let on_key_down = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                event.prevent_default();
                queue.borrow_mut().push_back(command);
            }
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref())
            .map_err(|_| Error::listener_failed("keydown"))?;

        Ok(Self { window, on_key_down })
    }
}

impl Drop for CameraKeys {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "keydown",
            self.on_key_down.as_ref().unchecked_ref(),
        );
    }
}

impl Debug for CameraKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scene::OrthographicCamera;

    #[test]
    fn arrows_and_wasd_agree() {
        let pairs = [("ArrowLeft", "a"), ("ArrowRight", "d"), ("ArrowUp", "w"), ("ArrowDown", "s")];
        for (arrow, letter) in pairs {
            assert_eq!(command_for_key(arrow), command_for_key(letter));
            assert_eq!(command_for_key(letter), command_for_key(&letter.to_uppercase()));
            assert!(command_for_key(arrow).is_some());
        }
    }

    #[test]
    fn zoom_keys_are_reciprocal() {
        let (Some(CameraCommand::Zoom(zoom_in)), Some(CameraCommand::Zoom(zoom_out))) =
            (command_for_key("+"), command_for_key("-"))
        else {
            panic!("expected zoom commands");
        };

        assert!(zoom_in > 1.0);
        assert!((zoom_in * zoom_out - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(command_for_key("Enter"), None);
        assert_eq!(command_for_key("q"), None);
        assert_eq!(command_for_key(""), None);
    }

    #[test]
    fn commands_drive_camera() {
        let mut camera = OrthographicCamera::new(5.0, 1.0);

        CameraCommand::Pan { dx: 1.0, dy: -2.0 }.apply(&mut camera);
        CameraCommand::Zoom(2.0).apply(&mut camera);

        assert_eq!((camera.position.x(), camera.position.y()), (1.0, -2.0));
        assert_eq!(camera.half_height, 2.5);
    }
}
