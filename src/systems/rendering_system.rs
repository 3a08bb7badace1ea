use crate::internal_prelude::*;

/// Owns the gpu pipeline and the sprites of the scene and draws a frame.
/// Fields drop in order, so the sprite textures go first and the shared mesh and program last.
pub struct SceneRenderer {
    sprites: Vec<Sprite>,
    mesh: QuadMesh,
    shader: ShaderProgram,
    projection: glm::Mat4,
    clear_color: glm::Vec4,
    backend: Rc<dyn GpuBackend>,
}

impl SceneRenderer {
    /// sets up the pipeline and loads the scene described by the attributes
    pub fn new(
        backend: Rc<dyn GpuBackend>,
        decoder: &dyn ImageDecoder,
        config: &SceneAttributes,
    ) -> Result<Self, ShaderError> {
        backend.enable_alpha_blending();
        let shader = ShaderProgram::sprite(&backend)?;
        let mesh = QuadMesh::unit_quad(&backend);
        let (width, height) = config.size();
        let projection = ortho_projection(width, height);

        let sprites = build_scene(
            &backend,
            decoder,
            config.texture_dir(),
            config.size(),
            config.scene(),
        );

        // the sampler always reads from unit 0
        shader.bind();
        shader.upload_int(SAMPLER_UNIFORM, SPRITE_TEXTURE_UNIT as GLint);

        Ok(Self {
            sprites,
            mesh,
            shader,
            projection,
            clear_color: config.clear_color(),
            backend,
        })
    }

    /// start the rendering for all sprites, back to front
    pub fn render(&self) {
        self.backend.clear(&self.clear_color);
        self.shader.bind();
        self.shader.upload_mat4(PROJECTION_UNIFORM, &self.projection);
        for sprite in self.sprites.iter() {
            sprite.draw(&self.shader, &self.mesh);
        }
    }

    /// adapts the viewport to a new framebuffer size, the projection is not touched
    pub fn on_resize(&self, width: u32, height: u32) {
        self.backend.viewport(width, height);
    }

    #[inline]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[inline]
    pub fn projection(&self) -> &glm::Mat4 {
        &self.projection
    }

    #[inline]
    pub fn shader(&self) -> &ShaderProgram {
        &self.shader
    }

    #[inline]
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }
}

impl Debug for SceneRenderer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("sprites", &self.sprites)
            .field("mesh", &self.mesh)
            .field("shader", &self.shader)
            .finish()
    }
}
