//! Error types
//!
//! Every fallible setup step in the crate returns [`Result<T>`], an alias over
//! [`SceneError`]. Per-frame rendering never fails; the variants below only
//! surface while a session is being built or while the launcher starts up.

use std::path::PathBuf;

use thiserror::Error;

use crate::abs::ShaderStage;

/// Errors raised while setting up a render session.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A single shader stage failed to compile.
    #[error("{stage} shader failed to compile: {log}")]
    Compile {
        /// The stage whose compilation failed.
        stage: ShaderStage,
        /// The driver's diagnostic log.
        log: String,
    },

    /// Both stages compiled but the program failed to link.
    #[error("shader program failed to link: {log}")]
    Link {
        /// The driver's diagnostic log.
        log: String,
    },

    /// A texture asset could not be read or decoded.
    #[error("failed to load asset {}: {cause}", path.display())]
    AssetLoad { path: PathBuf, cause: String },

    /// A required attribute or uniform is not present in the linked program.
    #[error("shader variable `{name}` not found in linked program")]
    MissingLocation { name: String },

    /// Geometry or state that can only be wrong through a programming error.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The GPU refused to allocate an object.
    #[error("GPU object allocation failed: {0}")]
    Gpu(String),

    /// A textured variant was set up without a texture.
    #[error("the textured variant needs a texture but none was supplied")]
    MissingTexture,

    /// The configuration file exists but could not be used.
    #[error("invalid config {}: {cause}", path.display())]
    Config { path: PathBuf, cause: String },

    /// Window or GL context creation failed.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Alias for `std::result::Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
