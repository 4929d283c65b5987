//! A textured, rotating cube rendered through an OpenGL-style shader pipeline.
//!
//! The [`abs`] module wraps the GPU: the [`abs::GraphicsContext`] trait,
//! shader compilation, static buffers and textures. The [`render`] module
//! builds the meshes, resolves program bindings, computes transforms, issues
//! the draw for each frame and drives the animation.

pub mod abs;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;

pub use error::{Result, SceneError};
