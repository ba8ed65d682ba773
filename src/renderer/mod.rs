//! Rendering module
//!
//! `scene` builds a backend-agnostic draw list; `canvas` paints it with the
//! browser's 2D context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{Color, DrawCmd, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
