pub mod engine;
pub mod engine_builder;
pub mod rendering;
pub mod scene;
pub mod systems;
pub mod utils;

pub use env_logger;
pub use log;
pub use nalgebra_glm as glm;
pub use stb_image;
pub use winit;

/// All features that are very common to use.
pub mod prelude {
    pub use crate::engine::{Engine, EngineError, EngineState};
    pub use crate::engine_builder::SceneAttributes;
    pub use crate::glm;
    pub use crate::glm::vec2;
    pub use crate::glm::Mat4;
    pub use crate::glm::Vec2;
    pub use crate::glm::Vec4;
    pub use crate::log;
    pub use crate::rendering::backend::{GlBackend, GpuBackend};
    pub use crate::rendering::data::{DecodedImage, ImageDecoder, StbDecoder, Texture, TextureError};
    pub use crate::rendering::mesh::QuadMesh;
    pub use crate::rendering::recording::{GpuCommand, RecordingBackend};
    pub use crate::rendering::shader::{ShaderError, ShaderProgram};
    pub use crate::rendering::sprite::Sprite;
    pub use crate::scene::{build_scene, SpriteDefinition, LANDSCAPE_SCENE};
    pub use crate::systems::rendering_system::SceneRenderer;
    pub use crate::utils::constants::*;
    pub use gl::types::*;
}

/// Common internally used names.
pub(crate) mod internal_prelude {
    pub(crate) use crate::prelude::*;
    pub(crate) use crate::utils::file::*;
    pub(crate) use crate::utils::tools::*;
    pub(crate) use std::cell::{Cell, RefCell};
    pub(crate) use std::collections::HashMap;
    pub(crate) use std::error::Error;
    pub(crate) use std::fmt::{Debug, Display, Formatter};
    pub(crate) use std::path::{Path, PathBuf};
    pub(crate) use std::rc::Rc;
}
