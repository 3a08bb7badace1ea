use crate::internal_prelude::*;
use crate::rendering::data::Vertex;
use crate::rendering::shader::{compile_shader, link_program, ShaderError};
use std::ffi::{c_void, CStr, CString};
use std::ptr;

/// The part of the gl api the scene is drawn with. Every call happens on the render thread.
pub trait GpuBackend {
    /// generates a new texture name
    fn gen_texture(&self) -> GLuint;
    /// binds a texture to the 2D target of the active unit (``NO_TEXTURE`` unbinds)
    fn bind_texture(&self, texture: GLuint);
    /// selects the active texture unit
    fn active_texture(&self, unit: GLuint);
    /// uploads rgba8 pixels to the bound 2D texture
    fn tex_image_rgba(&self, width: u32, height: u32, pixels: &[u8]);
    /// builds the mipmap chain of the bound 2D texture
    fn generate_mipmap(&self);
    /// sets an integer parameter on the bound 2D texture
    fn tex_parameter(&self, parameter: GLenum, value: GLenum);
    fn delete_texture(&self, texture: GLuint);

    /// compiles and links a vertex and fragment shader into a program
    fn create_program(&self, vertex_src: &str, fragment_src: &str) -> Result<GLuint, ShaderError>;
    fn delete_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);
    /// looks up a uniform, yields ``INVALID_LOCATION`` for unknown names
    fn uniform_location(&self, program: GLuint, name: &str) -> GLint;
    fn uniform_mat4(&self, location: GLint, matrix: &glm::Mat4);
    fn uniform_int(&self, location: GLint, value: GLint);

    /// uploads interleaved vertices and yields the vertex array and buffer names
    fn create_vertex_array(&self, vertices: &[Vertex]) -> (GLuint, GLuint);
    fn delete_vertex_array(&self, vao: GLuint, vbo: GLuint);
    fn bind_vertex_array(&self, vao: GLuint);
    fn draw_triangles(&self, first: GLint, count: GLsizei);

    fn clear(&self, color: &glm::Vec4);
    fn enable_alpha_blending(&self);
    fn viewport(&self, width: u32, height: u32);
}

/// backend that forwards to the loaded opengl functions
#[derive(Debug)]
pub struct GlBackend {
    _private: (),
}

impl GlBackend {
    /// loads the gl function pointers (needs a current context), yields ``None`` if the core functions are missing
    pub fn load_with<F>(mut loader: F) -> Option<Self>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => loader(symbol.as_c_str()),
            Err(_) => ptr::null(),
        });
        let loaded = gl::CreateProgram::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::GenerateMipmap::is_loaded()
            && gl::DrawArrays::is_loaded();
        loaded.then(|| {
            log_gl_config();
            Self { _private: () }
        })
    }
}

impl GpuBackend for GlBackend {
    fn gen_texture(&self) -> GLuint {
        let mut tex_id = 0;
        unsafe {
            gl::GenTextures(1, &mut tex_id);
        }
        tex_id
    }

    fn bind_texture(&self, texture: GLuint) {
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture);
        }
    }

    fn active_texture(&self, unit: GLuint) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
        }
    }

    fn tex_image_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const GLvoid,
            );
        }
    }

    fn generate_mipmap(&self) {
        unsafe {
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }
    }

    fn tex_parameter(&self, parameter: GLenum, value: GLenum) {
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, parameter, value as GLint);
        }
    }

    fn delete_texture(&self, texture: GLuint) {
        unsafe {
            gl::DeleteTextures(1, &texture);
        }
    }

    fn create_program(&self, vertex_src: &str, fragment_src: &str) -> Result<GLuint, ShaderError> {
        unsafe {
            let vs = compile_shader(vertex_src, gl::VERTEX_SHADER)?;
            let fs = match compile_shader(fragment_src, gl::FRAGMENT_SHADER) {
                Ok(fs) => fs,
                Err(err) => {
                    gl::DeleteShader(vs);
                    return Err(err);
                }
            };
            link_program(vs, fs)
        }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }

    fn use_program(&self, program: GLuint) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        let Ok(c_name) = CString::new(name) else {
            return INVALID_LOCATION;
        };
        unsafe { gl::GetUniformLocation(program, c_name.as_ptr()) }
    }

    fn uniform_mat4(&self, location: GLint, matrix: &glm::Mat4) {
        unsafe {
            gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr());
        }
    }

    fn uniform_int(&self, location: GLint, value: GLint) {
        unsafe {
            gl::Uniform1i(location, value);
        }
    }

    fn create_vertex_array(&self, vertices: &[Vertex]) -> (GLuint, GLuint) {
        let mut vao = 0;
        let mut vbo = 0;
        let stride = size_of::<Vertex>() as GLsizei;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(vertices) as GLsizeiptr,
                vertices.as_ptr() as *const GLvoid,
                gl::STATIC_DRAW,
            );
            gl::VertexAttribPointer(
                POSITION_ATTRIB,
                3,
                gl::FLOAT,
                gl::FALSE,
                stride,
                std::mem::offset_of!(Vertex, position) as *const GLvoid,
            );
            gl::EnableVertexAttribArray(POSITION_ATTRIB);
            gl::VertexAttribPointer(
                UV_ATTRIB,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                std::mem::offset_of!(Vertex, uv_coords) as *const GLvoid,
            );
            gl::EnableVertexAttribArray(UV_ATTRIB);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(NO_OBJECT);
        }
        (vao, vbo)
    }

    fn delete_vertex_array(&self, vao: GLuint, vbo: GLuint) {
        unsafe {
            gl::DeleteVertexArrays(1, &vao);
            gl::DeleteBuffers(1, &vbo);
        }
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe {
            gl::BindVertexArray(vao);
        }
    }

    fn draw_triangles(&self, first: GLint, count: GLsizei) {
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, first, count);
        }
    }

    fn clear(&self, color: &glm::Vec4) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, color.w);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn enable_alpha_blending(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn viewport(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
        }
    }
}

/// prints info about the used gl renderer
fn log_gl_config() {
    if let Some(renderer) = get_gl_string(gl::RENDERER) {
        log::info!("Running on {}", renderer.to_string_lossy());
    }
    if let Some(version) = get_gl_string(gl::VERSION) {
        log::info!("OpenGL Version {}", version.to_string_lossy());
    }
    if let Some(shaders_version) = get_gl_string(gl::SHADING_LANGUAGE_VERSION) {
        log::info!("Shaders version on {}", shaders_version.to_string_lossy());
    }
}

/// retrieves a string value from gl
fn get_gl_string(variant: GLenum) -> Option<&'static CStr> {
    unsafe {
        let s = gl::GetString(variant);
        (!s.is_null()).then(|| CStr::from_ptr(s.cast()))
    }
}
