//! Static GPU buffers.
//!
//! [`GpuBuffer`] owns one vertex or index buffer uploaded once with a static
//! usage hint. [`VertexArray`] owns the vertex array object the attribute
//! bindings are recorded into.

use std::sync::Arc;

use crate::abs::{BufferTarget, GraphicsContext};
use crate::error::{Result, SceneError};

/// Plain-old-data element types that can be uploaded as raw bytes.
pub trait BufferElement: Copy {}

impl BufferElement for f32 {}
impl BufferElement for u16 {}

/// Represents a buffer stored on the GPU side.
pub struct GpuBuffer<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Buffer,
    target: BufferTarget,
    len: usize,
}

impl<G: GraphicsContext> GpuBuffer<G> {
    /// Creates a buffer at `target` and uploads `data` into it.
    pub fn new<T: BufferElement>(gl: &Arc<G>, target: BufferTarget, data: &[T]) -> Result<Self> {
        let id = gl.create_buffer().map_err(SceneError::Gpu)?;
        gl.bind_buffer(target, Some(id));
        // SAFETY: `T` is `f32` or `u16`, which have no padding or invalid bit patterns.
        let bytes = unsafe {
            std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data))
        };
        gl.buffer_static_data(target, bytes);
        if target == BufferTarget::Vertex {
            gl.bind_buffer(target, None);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            id,
            target,
            len: data.len(),
        })
    }

    /// Binds the buffer to its target.
    pub fn bind(&self) {
        self.gl.bind_buffer(self.target, Some(self.id));
    }

    /// Number of elements uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }
}

impl<G: GraphicsContext> Drop for GpuBuffer<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.id);
    }
}

/// Represents a vertex array object.
pub struct VertexArray<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::VertexArray,
}

impl<G: GraphicsContext> VertexArray<G> {
    pub fn new(gl: &Arc<G>) -> Result<Self> {
        let id = gl.create_vertex_array().map_err(SceneError::Gpu)?;
        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.id));
    }
}

impl<G: GraphicsContext> Drop for VertexArray<G> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.id);
    }
}
