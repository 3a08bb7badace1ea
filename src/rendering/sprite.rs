use crate::internal_prelude::*;
use crate::rendering::data::load_texture;
use crate::rendering::mesh::QuadMesh;
use crate::rendering::shader::ShaderProgram;

/// A textured quad with a fixed transform. The sprite is the only owner of its texture: it can be moved out with
/// ``take``/``transfer_from`` but never copied, and the texture is deleted exactly once when the owner goes away.
pub struct Sprite {
    texture: Option<Texture>,
    position: glm::Vec2,
    size: glm::Vec2,
    rotation: f32,
}

impl Sprite {
    /// Loads the texture at ``path`` and creates a sprite centered at ``position`` with ``size`` in pixels and ``rotation`` in degrees.
    /// A texture that fails to load is logged and leaves the sprite without a texture, it is still valid but draws nothing.
    pub fn new(
        backend: &Rc<dyn GpuBackend>,
        decoder: &dyn ImageDecoder,
        path: impl AsRef<Path>,
        position: glm::Vec2,
        size: glm::Vec2,
        rotation: f32,
    ) -> Self {
        let path = path.as_ref();
        let texture = match load_texture(backend, decoder, path) {
            Ok(texture) => Some(texture),
            Err(err) => {
                log::error!(
                    "failed to load the texture for sprite {}: {}",
                    path.display(),
                    err.reason
                );
                None
            }
        };
        Self {
            texture,
            position,
            size,
            rotation,
        }
    }

    /// creates a sprite that owns no texture
    pub fn textureless(position: glm::Vec2, size: glm::Vec2, rotation: f32) -> Self {
        Self {
            texture: None,
            position,
            size,
            rotation,
        }
    }

    /// the owned texture name or ``NO_TEXTURE``
    #[inline]
    pub fn texture_id(&self) -> GLuint {
        self.texture.as_ref().map_or(NO_TEXTURE, Texture::id)
    }

    #[inline]
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    #[inline]
    pub fn position(&self) -> glm::Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> glm::Vec2 {
        self.size
    }

    /// rotation in degrees
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Moves the texture and a copy of the transform into a new sprite. ``self`` keeps its transform but owns no texture afterwards.
    pub fn take(&mut self) -> Self {
        Self {
            texture: self.texture.take(),
            position: self.position,
            size: self.size,
            rotation: self.rotation,
        }
    }

    /// Releases the current texture and takes over the texture and transform of ``other``, which is left without a texture.
    pub fn transfer_from(&mut self, other: &mut Sprite) {
        self.release();
        self.texture = other.texture.take();
        self.position = other.position;
        self.size = other.size;
        self.rotation = other.rotation;
    }

    /// deletes the texture now instead of on drop, does nothing if there is none
    pub fn release(&mut self) {
        if let Some(texture) = self.texture.take() {
            log::debug!("releasing sprite texture {}", texture.id());
        }
    }

    /// the model matrix placing the unit quad
    pub fn model_matrix(&self) -> glm::Mat4 {
        model_transform(&self.position, &self.size, self.rotation)
    }

    /// yields the axis-aligned (min, max) corners the sprite covers in scene coordinates
    pub fn bounds(&self) -> (glm::Vec2, glm::Vec2) {
        let model = self.model_matrix();
        let mut min = glm::vec2(f32::INFINITY, f32::INFINITY);
        let mut max = glm::vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (x, y) in [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)] {
            let corner = mult_mat4_vec3(&model, &glm::vec3(x, y, 0.0)).xy();
            min = glm::min2(&min, &corner);
            max = glm::max2(&max, &corner);
        }
        (min, max)
    }

    /// draws the sprite, a sprite without texture issues no gl calls at all
    pub fn draw(&self, shader: &ShaderProgram, mesh: &QuadMesh) {
        let Some(texture) = self.texture.as_ref() else {
            return;
        };
        shader.bind();
        shader.upload_mat4(MODEL_UNIFORM, &self.model_matrix());
        texture.bind(SPRITE_TEXTURE_UNIT);
        mesh.draw();
        texture.unbind();
    }
}

impl Debug for Sprite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sprite")
            .field("texture", &self.texture_id())
            .field("position", &self.position)
            .field("size", &self.size)
            .field("rotation", &self.rotation)
            .finish()
    }
}
