//! Module for anything related to rendering the scene.
//!
//! Geometry, program bindings, transforms and the per-frame draw are kept in
//! separate submodules; [`RenderSession`] ties them together and
//! [`AnimationLoop`] drives it.

pub mod animation;
pub mod bindings;
pub mod buffers;
pub mod frame;
pub mod geometry;
pub mod session;
pub mod transform;

pub use animation::{AnimationLoop, FrameRequest, FrameTick, LoopState, Scheduler, VsyncScheduler};
pub use bindings::{ProgramBindings, resolve_bindings};
pub use buffers::SceneBuffers;
pub use frame::render_frame;
pub use geometry::{Geometry, build_cube_geometry};
pub use session::{RenderSession, Variant};
pub use transform::{TransformState, compute_frame};
