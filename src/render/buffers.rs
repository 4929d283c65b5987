//! GPU-resident copies of a [`Geometry`].

use std::sync::Arc;

use crate::abs::{BufferTarget, GpuBuffer, GraphicsContext, VertexArray};
use crate::error::Result;
use crate::render::geometry::{DrawCall, Geometry, SurfaceData};

/// The buffer feeding the second vertex attribute.
pub enum SurfaceBuffer<G: GraphicsContext> {
    Colors(GpuBuffer<G>),
    TexCoords(GpuBuffer<G>),
    Flat,
}

/// Every buffer one variant draws from, uploaded once.
pub struct SceneBuffers<G: GraphicsContext> {
    pub vertex_array: VertexArray<G>,
    pub position: GpuBuffer<G>,
    pub position_components: i32,
    pub surface: SurfaceBuffer<G>,
    pub indices: Option<GpuBuffer<G>>,
    pub draw: DrawCall,
}

impl<G: GraphicsContext> SceneBuffers<G> {
    /// Validates `geometry` and uploads it with a static usage hint.
    pub fn upload(gl: &Arc<G>, geometry: &Geometry) -> Result<Self> {
        geometry.validate()?;

        let vertex_array = VertexArray::new(gl)?;
        vertex_array.bind();

        let position = GpuBuffer::new(gl, BufferTarget::Vertex, &geometry.positions)?;
        let surface = match &geometry.surface {
            SurfaceData::Colors(data) => {
                SurfaceBuffer::Colors(GpuBuffer::new(gl, BufferTarget::Vertex, data)?)
            }
            SurfaceData::TexCoords(data) => {
                SurfaceBuffer::TexCoords(GpuBuffer::new(gl, BufferTarget::Vertex, data)?)
            }
            SurfaceData::Flat => SurfaceBuffer::Flat,
        };
        let indices = geometry
            .indices
            .as_ref()
            .map(|indices| GpuBuffer::new(gl, BufferTarget::Index, indices))
            .transpose()?;

        gl.bind_vertex_array(None);

        log::debug!(
            "uploaded {} vertices, {} indices",
            geometry.vertex_count(),
            indices.as_ref().map_or(0, GpuBuffer::len)
        );

        Ok(Self {
            vertex_array,
            position,
            position_components: geometry.position_components,
            surface,
            indices,
            draw: geometry.draw,
        })
    }
}
