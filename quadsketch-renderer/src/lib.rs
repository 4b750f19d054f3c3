mod error;
mod frame_loop;
mod gl;
mod sketch;

pub(crate) mod js;

pub mod input;
pub mod scene;
#[cfg(feature = "js-api")]
pub mod wasm;

pub use ::quadsketch_math as math;
pub use frame_loop::*;
pub use sketch::*;

pub use crate::{
    error::Error,
    gl::{QuadBatch, Renderer},
};
