//! Attribute and uniform locations of a linked program.

use crate::abs::{GraphicsContext, ShaderProgram};
use crate::error::{Result, SceneError};

pub const POSITION_ATTRIBUTE: &str = "a_position";
pub const COLOR_ATTRIBUTE: &str = "a_color";
pub const TEX_COORD_ATTRIBUTE: &str = "a_tex_coord";
pub const PROJECTION_UNIFORM: &str = "u_projection";
pub const MODEL_VIEW_UNIFORM: &str = "u_model_view";
pub const SAMPLER_UNIFORM: &str = "u_sampler";

/// Which per-vertex input, besides position, the program consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceInput {
    Color,
    TexCoord,
    None,
}

/// The second vertex attribute of a program, by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAttribute {
    Color(u32),
    TexCoord(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLocations {
    pub position: u32,
    pub surface: Option<SurfaceAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformLocations<L> {
    pub projection: L,
    pub model_view: L,
    /// Absent when the program samples no texture or the compiler dropped it.
    pub sampler: Option<L>,
}

/// A linked program together with the locations the renderer writes to.
///
/// This is the sole owner of the program; dropping it deletes the program.
pub struct ProgramBindings<G: GraphicsContext> {
    pub program: ShaderProgram<G>,
    pub attributes: AttributeLocations,
    pub uniforms: UniformLocations<G::UniformLocation>,
}

fn require<T>(location: Option<T>, name: &str) -> Result<T> {
    location.ok_or_else(|| SceneError::MissingLocation {
        name: name.to_string(),
    })
}

/// Resolves every location the renderer needs for `input`.
///
/// Missing position, surface or matrix locations are fatal. A missing sampler
/// only disables the sampler upload.
pub fn resolve_bindings<G: GraphicsContext>(
    gl: &G,
    program: ShaderProgram<G>,
    input: SurfaceInput,
) -> Result<ProgramBindings<G>> {
    let id = program.id();

    let position = require(gl.attrib_location(id, POSITION_ATTRIBUTE), POSITION_ATTRIBUTE)?;
    let surface = match input {
        SurfaceInput::Color => Some(SurfaceAttribute::Color(require(
            gl.attrib_location(id, COLOR_ATTRIBUTE),
            COLOR_ATTRIBUTE,
        )?)),
        SurfaceInput::TexCoord => Some(SurfaceAttribute::TexCoord(require(
            gl.attrib_location(id, TEX_COORD_ATTRIBUTE),
            TEX_COORD_ATTRIBUTE,
        )?)),
        SurfaceInput::None => None,
    };

    let projection = require(gl.uniform_location(id, PROJECTION_UNIFORM), PROJECTION_UNIFORM)?;
    let model_view = require(gl.uniform_location(id, MODEL_VIEW_UNIFORM), MODEL_VIEW_UNIFORM)?;
    let sampler = match input {
        SurfaceInput::TexCoord => {
            let sampler = gl.uniform_location(id, SAMPLER_UNIFORM);
            if sampler.is_none() {
                log::warn!("`{}` not found, texture unit will not be set", SAMPLER_UNIFORM);
            }
            sampler
        }
        _ => None,
    };

    log::debug!(
        "resolved bindings: position={} surface={:?}",
        position,
        surface
    );

    Ok(ProgramBindings {
        program,
        attributes: AttributeLocations { position, surface },
        uniforms: UniformLocations {
            projection,
            model_view,
            sampler,
        },
    })
}
