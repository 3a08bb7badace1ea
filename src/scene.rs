//! The landscape is a fixed table of sprites, listed back to front.

use crate::internal_prelude::*;

/// One row of a scene table. Position and size are fractions of the window size, so the
/// table stays the same when the window is configured differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDefinition {
    pub name: &'static str,
    pub file: &'static str,
    /// center of the sprite relative to the window
    pub position: (f32, f32),
    /// extent of the sprite relative to the window
    pub size: (f32, f32),
    /// degrees around the sprite center
    pub rotation: f32,
}

impl SpriteDefinition {
    /// yields the (position, size) in pixels for a window of the given size
    pub fn resolve(&self, width: u32, height: u32) -> (glm::Vec2, glm::Vec2) {
        let (width, height) = (width as f32, height as f32);
        (
            glm::vec2(self.position.0 * width, self.position.1 * height),
            glm::vec2(self.size.0 * width, self.size.1 * height),
        )
    }
}

/// sky, clouds, rocks and ground in draw order
pub const LANDSCAPE_SCENE: [SpriteDefinition; 5] = [
    SpriteDefinition {
        name: "sky",
        file: "sky.png",
        position: (0.5, 0.5),
        size: (1.0, 1.0),
        rotation: 0.0,
    },
    SpriteDefinition {
        name: "clouds_1",
        file: "clouds_1.png",
        position: (0.5, 0.3),
        size: (1.0, 0.4),
        rotation: 0.0,
    },
    SpriteDefinition {
        name: "clouds_2",
        file: "clouds_2.png",
        position: (0.5, 0.25),
        size: (0.7, 0.2),
        rotation: 0.0,
    },
    SpriteDefinition {
        name: "rocks",
        file: "rocks.png",
        position: (0.5, 0.5),
        size: (1.0, 1.0),
        rotation: 0.0,
    },
    SpriteDefinition {
        name: "ground",
        file: "ground.png",
        position: (0.5, 0.5),
        size: (1.0, 1.0),
        rotation: 0.0,
    },
];

/// creates one sprite per definition in the same order, sprites whose texture fails to load stay in the list without a texture
pub fn build_scene(
    backend: &Rc<dyn GpuBackend>,
    decoder: &dyn ImageDecoder,
    texture_dir: &Path,
    window_size: (u32, u32),
    definitions: &[SpriteDefinition],
) -> Vec<Sprite> {
    let sprites: Vec<Sprite> = definitions
        .iter()
        .map(|definition| {
            let (position, size) = definition.resolve(window_size.0, window_size.1);
            Sprite::new(
                backend,
                decoder,
                get_texture_path(texture_dir, definition.file),
                position,
                size,
                definition.rotation,
            )
        })
        .collect();

    let loaded = sprites.iter().filter(|sprite| sprite.has_texture()).count();
    log::info!(
        "built scene with {} sprites ({} textured)",
        sprites.len(),
        loaded
    );
    sprites
}
