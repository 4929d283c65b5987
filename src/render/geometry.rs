//! Hard-coded meshes for every scene variant.
//!
//! Geometry is built on the CPU as plain arrays and checked with
//! [`Geometry::validate`] before [`crate::render::SceneBuffers`] uploads it.

use crate::abs::Primitive;
use crate::error::{Result, SceneError};

/// Vertices per cube face.
pub const FACE_VERTICES: usize = 4;
/// Number of cube faces.
pub const FACES: usize = 6;
/// Vertices in the cube mesh.
pub const CUBE_VERTICES: usize = FACES * FACE_VERTICES;
/// Indices drawn per cube frame.
pub const CUBE_INDICES: usize = FACES * FACE_INDEX_PATTERN.len();

/// Two triangles sharing the `v0`-`v2` diagonal.
const FACE_INDEX_PATTERN: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Front, back, top, bottom, right, left; counter-clockwise from outside.
#[rustfmt::skip]
const CUBE_POSITIONS: [f32; CUBE_VERTICES * 3] = [
    // Front
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    // Back
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    // Top
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
    // Bottom
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    // Right
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // Left
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
];

/// One RGBA colour per face, in face order.
pub const FACE_COLORS: [[f32; 4]; FACES] = [
    [1.0, 1.0, 1.0, 1.0], // white
    [1.0, 0.0, 0.0, 1.0], // red
    [0.0, 1.0, 0.0, 1.0], // green
    [0.0, 0.0, 1.0, 1.0], // blue
    [1.0, 1.0, 0.0, 1.0], // yellow
    [1.0, 0.0, 1.0, 1.0], // purple
];

/// Every face samples the full image.
const FACE_TEX_COORDS: [[f32; 2]; FACE_VERTICES] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

#[rustfmt::skip]
const SQUARE_POSITIONS: [f32; 8] = [
     1.0,  1.0,
    -1.0,  1.0,
     1.0, -1.0,
    -1.0, -1.0,
];

#[rustfmt::skip]
const LINE_POSITIONS: [f32; 4] = [
    -1.0, -1.0,
     1.0,  1.0,
];

/// How the cube's faces are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Colored,
    Textured,
}

/// Per-vertex data fed to the second attribute, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceData {
    /// RGBA, 4 floats per vertex.
    Colors(Vec<f32>),
    /// UV, 2 floats per vertex.
    TexCoords(Vec<f32>),
    /// A single colour fixed in the fragment shader.
    Flat,
}

impl SurfaceData {
    /// Floats per vertex, or `None` for [`SurfaceData::Flat`].
    pub fn components(&self) -> Option<i32> {
        match self {
            SurfaceData::Colors(_) => Some(4),
            SurfaceData::TexCoords(_) => Some(2),
            SurfaceData::Flat => None,
        }
    }
}

/// The single draw call that renders a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// `count` 16-bit indices starting at byte offset 0.
    Indexed { mode: Primitive, count: i32 },
    /// `count` vertices starting at vertex 0.
    Arrays { mode: Primitive, count: i32 },
}

/// CPU-side mesh data for one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<f32>,
    /// Floats per position (3 for the cube, 2 for flat shapes).
    pub position_components: i32,
    pub surface: SurfaceData,
    pub indices: Option<Vec<u16>>,
    pub draw: DrawCall,
}

impl Geometry {
    /// Number of vertices described by `positions`.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / self.position_components as usize
    }

    /// Checks that buffer lengths agree and every index addresses a vertex.
    pub fn validate(&self) -> Result<()> {
        if !(2..=4).contains(&self.position_components) {
            return Err(SceneError::InvariantViolation(format!(
                "{} floats per position, expected 2 to 4",
                self.position_components
            )));
        }
        let vertices = self.vertex_count();
        if self.positions.len() % self.position_components as usize != 0 {
            return Err(SceneError::InvariantViolation(format!(
                "{} position floats is not a multiple of {}",
                self.positions.len(),
                self.position_components
            )));
        }

        match &self.surface {
            SurfaceData::Colors(data) | SurfaceData::TexCoords(data) => {
                let per_vertex = self.surface.components().unwrap_or(1) as usize;
                if data.len() != vertices * per_vertex {
                    return Err(SceneError::InvariantViolation(format!(
                        "surface data holds {} floats, expected {} for {} vertices",
                        data.len(),
                        vertices * per_vertex,
                        vertices
                    )));
                }
            }
            SurfaceData::Flat => {}
        }

        match (&self.indices, self.draw) {
            (Some(indices), DrawCall::Indexed { count, .. }) => {
                if indices.len() != count as usize {
                    return Err(SceneError::InvariantViolation(format!(
                        "draw call covers {} indices but the buffer holds {}",
                        count,
                        indices.len()
                    )));
                }
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices) {
                    return Err(SceneError::InvariantViolation(format!(
                        "index {} outside [0, {}]",
                        bad,
                        vertices.saturating_sub(1)
                    )));
                }
            }
            (None, DrawCall::Arrays { count, .. }) => {
                if count as usize > vertices {
                    return Err(SceneError::InvariantViolation(format!(
                        "draw call covers {} vertices but only {} exist",
                        count, vertices
                    )));
                }
            }
            _ => {
                return Err(SceneError::InvariantViolation(
                    "index buffer presence does not match the draw call".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Triangle indices for the cube: the face pattern offset by 4 per face.
pub fn cube_indices() -> Vec<u16> {
    (0..FACES as u16)
        .flat_map(|face| {
            FACE_INDEX_PATTERN
                .iter()
                .map(move |i| i + face * FACE_VERTICES as u16)
        })
        .collect()
}

/// Builds the 24-vertex cube with either per-face colours or texture coordinates.
pub fn build_cube_geometry(surface: Surface) -> Geometry {
    let surface = match surface {
        Surface::Colored => SurfaceData::Colors(
            FACE_COLORS
                .iter()
                .flat_map(|color| std::iter::repeat_n(color, FACE_VERTICES))
                .flatten()
                .copied()
                .collect(),
        ),
        Surface::Textured => SurfaceData::TexCoords(
            std::iter::repeat_n(FACE_TEX_COORDS.iter(), FACES)
                .flatten()
                .flatten()
                .copied()
                .collect(),
        ),
    };

    Geometry {
        positions: CUBE_POSITIONS.to_vec(),
        position_components: 3,
        surface,
        indices: Some(cube_indices()),
        draw: DrawCall::Indexed {
            mode: Primitive::Triangles,
            count: CUBE_INDICES as i32,
        },
    }
}

/// A 2x2 square in the z = 0 plane, drawn as a four-vertex strip.
pub fn build_square_geometry() -> Geometry {
    Geometry {
        positions: SQUARE_POSITIONS.to_vec(),
        position_components: 2,
        surface: SurfaceData::Flat,
        indices: None,
        draw: DrawCall::Arrays {
            mode: Primitive::TriangleStrip,
            count: 4,
        },
    }
}

/// A single diagonal line segment across the square's extent.
pub fn build_line_geometry() -> Geometry {
    Geometry {
        positions: LINE_POSITIONS.to_vec(),
        position_components: 2,
        surface: SurfaceData::Flat,
        indices: None,
        draw: DrawCall::Arrays {
            mode: Primitive::Lines,
            count: 2,
        },
    }
}
