use crate::internal_prelude::*;
use crate::rendering::data::Vertex;

/// a single call that reached a ``RecordingBackend``
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    GenTexture(GLuint),
    BindTexture(GLuint),
    ActiveTexture(GLuint),
    TexImage { width: u32, height: u32, bytes: usize },
    GenerateMipmap,
    TexParameter(GLenum, GLenum),
    DeleteTexture(GLuint),
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    UseProgram(GLuint),
    UniformMat4 { location: GLint, matrix: glm::Mat4 },
    UniformInt { location: GLint, value: GLint },
    CreateVertexArray { vao: GLuint, vbo: GLuint, vertices: usize },
    DeleteVertexArray { vao: GLuint, vbo: GLuint },
    BindVertexArray(GLuint),
    DrawTriangles { first: GLint, count: GLsizei },
    Clear(glm::Vec4),
    EnableAlphaBlending,
    Viewport { width: u32, height: u32 },
}

/// Headless backend that hands out object names and records every call instead of talking to a driver.
/// Useful to inspect what a frame does without a window.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: RefCell<Vec<GpuCommand>>,
    next_name: Cell<GLuint>,
    uniforms: RefCell<HashMap<String, GLint>>,
    shader_failure: Option<String>,
}

impl RecordingBackend {
    /// creates a new recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// creates a backend on which every program fails to link with the given log
    pub fn failing_shaders(log: &str) -> Self {
        Self {
            shader_failure: Some(log.to_string()),
            ..Self::default()
        }
    }

    /// all recorded calls in order
    pub fn commands(&self) -> Vec<GpuCommand> {
        self.commands.borrow().clone()
    }

    /// yields and forgets the recorded calls
    pub fn take_commands(&self) -> Vec<GpuCommand> {
        self.commands.take()
    }

    /// the number of recorded draw calls
    pub fn draw_count(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|command| matches!(command, GpuCommand::DrawTriangles { .. }))
            .count()
    }

    /// the texture bound to the 2D target when each draw call was issued
    pub fn drawn_textures(&self) -> Vec<GLuint> {
        let mut bound = NO_TEXTURE;
        let mut drawn = Vec::new();
        for command in self.commands.borrow().iter() {
            match command {
                GpuCommand::BindTexture(texture) => bound = *texture,
                GpuCommand::DrawTriangles { .. } => drawn.push(bound),
                _ => {}
            }
        }
        drawn
    }

    /// the texture currently bound to the 2D target
    pub fn bound_texture(&self) -> GLuint {
        self.commands
            .borrow()
            .iter()
            .rev()
            .find_map(|command| match command {
                GpuCommand::BindTexture(texture) => Some(*texture),
                _ => None,
            })
            .unwrap_or(NO_TEXTURE)
    }

    /// textures that were generated and not deleted yet
    pub fn live_textures(&self) -> Vec<GLuint> {
        let deleted = self.deleted_textures();
        self.commands
            .borrow()
            .iter()
            .filter_map(|command| match command {
                GpuCommand::GenTexture(texture) if !deleted.contains(texture) => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// every texture deletion in order (a name showing up twice is a double release)
    pub fn deleted_textures(&self) -> Vec<GLuint> {
        self.commands
            .borrow()
            .iter()
            .filter_map(|command| match command {
                GpuCommand::DeleteTexture(texture) => Some(*texture),
                _ => None,
            })
            .collect()
    }

    fn record(&self, command: GpuCommand) {
        log::trace!("gpu command: {command:?}");
        self.commands.borrow_mut().push(command);
    }

    fn next_name(&self) -> GLuint {
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        name
    }
}

impl GpuBackend for RecordingBackend {
    fn gen_texture(&self) -> GLuint {
        let texture = self.next_name();
        self.record(GpuCommand::GenTexture(texture));
        texture
    }

    fn bind_texture(&self, texture: GLuint) {
        self.record(GpuCommand::BindTexture(texture));
    }

    fn active_texture(&self, unit: GLuint) {
        self.record(GpuCommand::ActiveTexture(unit));
    }

    fn tex_image_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(GpuCommand::TexImage {
            width,
            height,
            bytes: pixels.len(),
        });
    }

    fn generate_mipmap(&self) {
        self.record(GpuCommand::GenerateMipmap);
    }

    fn tex_parameter(&self, parameter: GLenum, value: GLenum) {
        self.record(GpuCommand::TexParameter(parameter, value));
    }

    fn delete_texture(&self, texture: GLuint) {
        self.record(GpuCommand::DeleteTexture(texture));
    }

    fn create_program(&self, _vertex_src: &str, _fragment_src: &str) -> Result<GLuint, ShaderError> {
        if let Some(log) = &self.shader_failure {
            return Err(ShaderError::Link { log: log.clone() });
        }
        let program = self.next_name();
        self.record(GpuCommand::CreateProgram(program));
        Ok(program)
    }

    fn delete_program(&self, program: GLuint) {
        self.record(GpuCommand::DeleteProgram(program));
    }

    fn use_program(&self, program: GLuint) {
        self.record(GpuCommand::UseProgram(program));
    }

    fn uniform_location(&self, _program: GLuint, name: &str) -> GLint {
        let mut uniforms = self.uniforms.borrow_mut();
        let next = uniforms.len() as GLint;
        *uniforms.entry(name.to_string()).or_insert(next)
    }

    fn uniform_mat4(&self, location: GLint, matrix: &glm::Mat4) {
        self.record(GpuCommand::UniformMat4 {
            location,
            matrix: *matrix,
        });
    }

    fn uniform_int(&self, location: GLint, value: GLint) {
        self.record(GpuCommand::UniformInt { location, value });
    }

    fn create_vertex_array(&self, vertices: &[Vertex]) -> (GLuint, GLuint) {
        let vao = self.next_name();
        let vbo = self.next_name();
        self.record(GpuCommand::CreateVertexArray {
            vao,
            vbo,
            vertices: vertices.len(),
        });
        (vao, vbo)
    }

    fn delete_vertex_array(&self, vao: GLuint, vbo: GLuint) {
        self.record(GpuCommand::DeleteVertexArray { vao, vbo });
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(GpuCommand::BindVertexArray(vao));
    }

    fn draw_triangles(&self, first: GLint, count: GLsizei) {
        self.record(GpuCommand::DrawTriangles { first, count });
    }

    fn clear(&self, color: &glm::Vec4) {
        self.record(GpuCommand::Clear(*color));
    }

    fn enable_alpha_blending(&self) {
        self.record(GpuCommand::EnableAlphaBlending);
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(GpuCommand::Viewport { width, height });
    }
}
