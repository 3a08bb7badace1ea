use std::path::{Path, PathBuf};

// directory paths
macro_rules! sprite_shader_path {
    ($file:literal) => {
        concat!(
            concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders/"),
            $file
        )
    };
}

// shader files
pub(crate) const SPRITE_VERT: &str = include_str!(sprite_shader_path!("sprite.vert"));
pub(crate) const SPRITE_FRAG: &str = include_str!(sprite_shader_path!("sprite.frag"));

/// yields the path of a texture file located in the given texture directory
pub fn get_texture_path(texture_dir: impl AsRef<Path>, file_name: &str) -> PathBuf {
    texture_dir.as_ref().join(file_name)
}
