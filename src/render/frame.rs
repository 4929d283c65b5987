//! Issues the GPU calls for a single frame.

use crate::abs::{DepthFunc, GraphicsContext, IndexType, Texture};
use crate::render::bindings::{ProgramBindings, SurfaceAttribute};
use crate::render::buffers::{SceneBuffers, SurfaceBuffer};
use crate::render::geometry::DrawCall;
use crate::render::transform::TransformState;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const CLEAR_DEPTH: f32 = 1.0;
/// Texture unit the cube texture is sampled from.
pub const TEXTURE_UNIT: u32 = 0;

/// Renders one frame.
///
/// Handles are assumed valid: a [`crate::render::RenderSession`] only exists
/// once its program linked and its buffers uploaded. The program is made
/// current before any uniform is written, since uniform uploads target the
/// current program.
pub fn render_frame<G: GraphicsContext>(
    gl: &G,
    bindings: &ProgramBindings<G>,
    buffers: &SceneBuffers<G>,
    texture: Option<&Texture<G>>,
    transform: &TransformState,
) {
    gl.clear_color_and_depth(CLEAR_COLOR, CLEAR_DEPTH);
    gl.enable_depth_test(DepthFunc::LessEqual);

    bindings.program.use_program();
    buffers.vertex_array.bind();

    buffers.position.bind();
    gl.vertex_attrib_pointer_f32(
        bindings.attributes.position,
        buffers.position_components,
        0,
        0,
    );
    gl.enable_vertex_attrib_array(bindings.attributes.position);

    match (&buffers.surface, bindings.attributes.surface) {
        (SurfaceBuffer::Colors(colors), Some(SurfaceAttribute::Color(location))) => {
            colors.bind();
            gl.vertex_attrib_pointer_f32(location, 4, 0, 0);
            gl.enable_vertex_attrib_array(location);
        }
        (SurfaceBuffer::TexCoords(uvs), Some(SurfaceAttribute::TexCoord(location))) => {
            uvs.bind();
            gl.vertex_attrib_pointer_f32(location, 2, 0, 0);
            gl.enable_vertex_attrib_array(location);

            if let Some(texture) = texture {
                texture.bind(TEXTURE_UNIT);
            }
            if let Some(sampler) = &bindings.uniforms.sampler {
                gl.uniform_i32(sampler, TEXTURE_UNIT as i32);
            }
        }
        (SurfaceBuffer::Flat, None) => {}
        (_, attribute) => debug_assert!(
            false,
            "surface buffer does not match surface attribute {:?}",
            attribute
        ),
    }

    if let Some(indices) = &buffers.indices {
        indices.bind();
    }

    gl.uniform_matrix4(
        &bindings.uniforms.projection,
        &transform.projection.to_cols_array(),
    );
    gl.uniform_matrix4(
        &bindings.uniforms.model_view,
        &transform.model_view.to_cols_array(),
    );

    match buffers.draw {
        DrawCall::Indexed { mode, count } => {
            gl.draw_elements(mode, count, IndexType::UnsignedShort, 0)
        }
        DrawCall::Arrays { mode, count } => gl.draw_arrays(mode, 0, count),
    }

    gl.bind_vertex_array(None);
}
