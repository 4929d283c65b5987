//! Shader compilation
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing
//! GPU shader objects, and [`compile_program`] which turns a vertex/fragment
//! source pair into a linked program.

use std::sync::Arc;

use crate::abs::{GraphicsContext, ShaderStage};
use crate::error::{Result, SceneError};

/// Represents an individual compiled shader stage.
pub struct Shader<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Shader,
}

impl<G: GraphicsContext> Shader<G> {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the shader object is deleted before the error is returned.
    pub fn new(gl: &Arc<G>, stage: ShaderStage, source: &str) -> Result<Self> {
        let shader = gl.create_shader(stage).map_err(SceneError::Gpu)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(SceneError::Compile { stage, log });
        }

        log::debug!("compiled {} shader {:?}", stage, shader);
        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
        })
    }
}

impl<G: GraphicsContext> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a linked shader program.
pub struct ShaderProgram<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Program,
}

impl<G: GraphicsContext> ShaderProgram<G> {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self> {
        let program = gl.create_program().map_err(SceneError::Gpu)?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(SceneError::Link { log });
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        log::debug!("linked program {:?}", program);
        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
        })
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.id));
    }

    /// The raw program handle, for location queries.
    pub fn id(&self) -> G::Program {
        self.id
    }
}

impl<G: GraphicsContext> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}

/// Compiles both stages and links them into a program.
///
/// A stage that fails to compile is released along with any stage compiled
/// before it; no program object is left behind on any error path.
pub fn compile_program<G: GraphicsContext>(
    gl: &Arc<G>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<G>> {
    let vert = Shader::new(gl, ShaderStage::Vertex, vertex_source)?;
    let frag = Shader::new(gl, ShaderStage::Fragment, fragment_source)?;
    ShaderProgram::new(gl, &[&vert, &frag])
}

/// Compiles the `vert.glsl`/`frag.glsl` pair under `src/render/shaders/<name>/`.
#[macro_export]
macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        $crate::abs::compile_program(
            &$gl,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
    };
}
