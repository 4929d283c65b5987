//! This module contains the GPU-facing building blocks of the renderer:
//! the rendering-context trait, shader compilation, static buffers and textures.

pub mod buffer;
pub mod context;
pub mod shader;
pub mod texture;

#[cfg(test)]
pub mod recording;

pub use buffer::*;
pub use context::*;
pub use shader::*;
pub use texture::*;
