//! CPU-side scene state: instances, cameras and the animated quad grid.
//!
//! Nothing here touches WebGL; the [`gl`](crate::gl) layer only consumes the
//! packed float buffers and matrices produced by this module.

mod camera;
mod grid;
mod instance;

pub use camera::*;
pub use grid::*;
pub use instance::*;
