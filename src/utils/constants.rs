use crate::glm;
use gl::types::*;

pub(crate) const WIN_TITLE: &str = "Landscape Scene";
pub(crate) const DEFAULT_WIN_WIDTH: u32 = 800;
pub(crate) const DEFAULT_WIN_HEIGHT: u32 = 600;
pub(crate) const DEFAULT_TEXTURE_DIR: &str = "assets/textures/landscape";

/// clear color behind all sprites
pub const BACKGROUND_COLOR: glm::Vec4 = glm::Vec4::new(0.1, 0.1, 0.1, 1.0);

pub(crate) const NEAR_PLANE_SPRITE: f32 = -1.0;
pub(crate) const FAR_PLANE_SPRITE: f32 = 1.0;

pub const Z_AXIS: glm::Vec3 = glm::Vec3::new(0.0, 0.0, 1.0);

/// placeholder for an empty texture slot (will never name a texture)
pub const NO_TEXTURE: GLuint = 0;

/// placeholder for an unbound vertex array or program
pub const NO_OBJECT: GLuint = 0;

/// what gl yields for a uniform name that is not active in the program
pub const INVALID_LOCATION: GLint = -1;

/// two triangles
pub const QUAD_VERTEX_COUNT: GLsizei = 6;

/// the texture unit every sprite samples from
pub const SPRITE_TEXTURE_UNIT: GLuint = 0;

// uniform names in the sprite shader
pub const PROJECTION_UNIFORM: &str = "proj";
pub const MODEL_UNIFORM: &str = "matrix";
pub const SAMPLER_UNIFORM: &str = "basic_texture";

// vertex attribute locations in the sprite shader
pub(crate) const POSITION_ATTRIB: GLuint = 0;
pub(crate) const UV_ATTRIB: GLuint = 2;
