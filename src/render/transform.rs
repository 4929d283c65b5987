//! Per-frame camera and object transforms.

use glam::{Mat4, Vec3};

/// Vertical field of view of the camera.
pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// Where the mesh sits relative to the camera.
pub const MODEL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -6.0);
/// Rotation rate about Y relative to Z.
pub const Y_RATE: f32 = 0.7;
/// Rotation rate about X relative to Z.
pub const X_RATE: f32 = 0.3;

/// The two matrices uploaded for every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub projection: Mat4,
    pub model_view: Mat4,
}

/// Width over height, falling back to 1.0 for a collapsed viewport.
pub fn aspect_ratio(width: i32, height: i32) -> f32 {
    if width <= 0 || height <= 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Computes the projection and model-view matrices for one frame.
///
/// The aspect ratio only widens or narrows the horizontal field of view; the
/// camera never moves. The model-view is `T · Rz(a) · Ry(0.7a) · Rx(0.3a)`,
/// applied in exactly that order.
pub fn compute_frame(aspect_ratio: f32, angle: f32) -> TransformState {
    let projection = Mat4::perspective_rh_gl(
        FIELD_OF_VIEW_DEGREES.to_radians(),
        aspect_ratio,
        Z_NEAR,
        Z_FAR,
    );

    let model_view = Mat4::from_translation(MODEL_OFFSET)
        * Mat4::from_rotation_z(angle)
        * Mat4::from_rotation_y(angle * Y_RATE)
        * Mat4::from_rotation_x(angle * X_RATE);

    TransformState {
        projection,
        model_view,
    }
}
