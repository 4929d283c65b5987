//! One render session: every GPU object a variant needs, set up in one go.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::abs::{GraphicsContext, Texture, TextureProvider};
use crate::error::{Result, SceneError};
use crate::render::bindings::{ProgramBindings, SurfaceInput, resolve_bindings};
use crate::render::buffers::SceneBuffers;
use crate::render::frame::render_frame;
use crate::render::geometry::{
    Geometry, Surface, build_cube_geometry, build_line_geometry, build_square_geometry,
};
use crate::render::transform::{TransformState, aspect_ratio, compute_frame};
use crate::shader_program;

/// Which demo scene is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    TexturedCube,
    ColoredCube,
    Square,
    Line,
}

impl Variant {
    pub fn needs_texture(self) -> bool {
        self == Variant::TexturedCube
    }

    fn surface_input(self) -> SurfaceInput {
        match self {
            Variant::TexturedCube => SurfaceInput::TexCoord,
            Variant::ColoredCube => SurfaceInput::Color,
            Variant::Square | Variant::Line => SurfaceInput::None,
        }
    }

    fn geometry(self) -> Geometry {
        match self {
            Variant::TexturedCube => build_cube_geometry(Surface::Textured),
            Variant::ColoredCube => build_cube_geometry(Surface::Colored),
            Variant::Square => build_square_geometry(),
            Variant::Line => build_line_geometry(),
        }
    }
}

/// Owns the program bindings, buffers and texture of one variant.
///
/// Construction fails on any compile, link, lookup or upload error, so a live
/// session always satisfies the preconditions of [`render_frame`].
pub struct RenderSession<G: GraphicsContext> {
    gl: Arc<G>,
    variant: Variant,
    bindings: ProgramBindings<G>,
    buffers: SceneBuffers<G>,
    texture: Option<Texture<G>>,
}

impl<G: GraphicsContext> RenderSession<G> {
    /// Sets up `variant`. The textured cube requires `texture`; other
    /// variants ignore it.
    pub fn new(gl: &Arc<G>, variant: Variant, texture: Option<Texture<G>>) -> Result<Self> {
        if variant.needs_texture() && texture.is_none() {
            return Err(SceneError::MissingTexture);
        }

        let program = match variant {
            Variant::TexturedCube => shader_program!(textured, gl)?,
            Variant::ColoredCube => shader_program!(colored, gl)?,
            Variant::Square | Variant::Line => shader_program!(flat, gl)?,
        };
        let bindings = resolve_bindings(gl.as_ref(), program, variant.surface_input())?;
        let buffers = SceneBuffers::upload(gl, &variant.geometry())?;

        log::info!("render session ready: {:?}", variant);
        Ok(Self {
            gl: Arc::clone(gl),
            variant,
            bindings,
            buffers,
            texture: texture.filter(|_| variant.needs_texture()),
        })
    }

    /// Sets up `variant`, loading its texture through `provider` when it needs one.
    pub fn load(
        gl: &Arc<G>,
        variant: Variant,
        provider: &dyn TextureProvider<G>,
        texture_path: &Path,
    ) -> Result<Self> {
        let texture = if variant.needs_texture() {
            Some(provider.load(gl, texture_path)?)
        } else {
            None
        };
        Self::new(gl, variant, texture)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Renders one frame at `angle`, sized to the current viewport.
    pub fn render_frame(&self, angle: f32) -> TransformState {
        let (width, height) = self.gl.viewport_size();
        let transform = compute_frame(aspect_ratio(width, height), angle);
        render_frame(
            self.gl.as_ref(),
            &self.bindings,
            &self.buffers,
            self.texture.as_ref(),
            &transform,
        );
        transform
    }
}
