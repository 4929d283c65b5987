//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct, a CPU-side owner of a GPU
//! texture, and the [`TextureProvider`] seam through which image assets are
//! turned into textures.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;

use crate::abs::{GraphicsContext, SamplerParams, TextureFilter, TextureWrap};
use crate::error::{Result, SceneError};

/// Represents a texture stored on the GPU side.
pub struct Texture<G: GraphicsContext> {
    gl: Arc<G>,
    id: G::Texture,
    width: u32,
    height: u32,
}

impl<G: GraphicsContext> Texture<G> {
    /// Creates a new texture from the given [`image::DynamicImage`].
    ///
    /// The image is flipped vertically before upload so that texture
    /// coordinate `(0, 0)` samples the visually bottom-left texel.
    pub fn new(gl: &Arc<G>, image: &DynamicImage) -> Result<Self> {
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::new_from_data(gl, width, height, rgba.as_raw())
    }

    /// Creates a new texture from raw RGBA rows, first row at the bottom.
    pub fn new_from_data(gl: &Arc<G>, width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(SceneError::InvariantViolation(format!(
                "texture data is {} bytes, expected {} for {}x{} RGBA",
                data.len(),
                expected,
                width,
                height
            )));
        }

        let texture = gl.create_texture().map_err(SceneError::Gpu)?;
        gl.bind_texture_2d(Some(texture));
        gl.tex_image_2d_rgba(width, height, data);
        // Mipmaps need power-of-two sizes on GLES-class hardware.
        if width.is_power_of_two() && height.is_power_of_two() {
            gl.generate_mipmap_2d();
            gl.tex_sampler_params(SamplerParams {
                wrap: TextureWrap::Repeat,
                min_filter: TextureFilter::LinearMipmapLinear,
                mag_filter: TextureFilter::Linear,
            });
        } else {
            gl.tex_sampler_params(SamplerParams {
                wrap: TextureWrap::ClampToEdge,
                min_filter: TextureFilter::Linear,
                mag_filter: TextureFilter::Linear,
            });
        }
        gl.bind_texture_2d(None);

        Ok(Self {
            gl: Arc::clone(gl),
            id: texture,
            width,
            height,
        })
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        self.gl.active_texture_unit(unit);
        self.gl.bind_texture_2d(Some(self.id));
    }
}

impl<G: GraphicsContext> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.id);
    }
}

/// Turns an asset path into a ready-to-bind texture.
pub trait TextureProvider<G: GraphicsContext> {
    fn load(&self, gl: &Arc<G>, path: &Path) -> Result<Texture<G>>;
}

/// Loads textures from image files on disk with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageTextureProvider;

impl<G: GraphicsContext> TextureProvider<G> for ImageTextureProvider {
    fn load(&self, gl: &Arc<G>, path: &Path) -> Result<Texture<G>> {
        let image = image::open(path).map_err(|e| SceneError::AssetLoad {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let texture = Texture::new(gl, &image)?;
        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            texture.width(),
            texture.height()
        );
        Ok(texture)
    }
}
