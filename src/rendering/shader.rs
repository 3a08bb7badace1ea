use crate::internal_prelude::*;
use std::ffi::CString;
use std::ptr;

/// Error returned when the sprite shader does not compile or link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Compile { stage: &'static str, log: String },
    Link { log: String },
}

impl Display for ShaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {log}")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link: {log}"),
        }
    }
}

impl Error for ShaderError {}

/// shader program to use to render
pub struct ShaderProgram {
    id: GLuint,
    uniform_locations: HashMap<String, GLint>,
    backend: Rc<dyn GpuBackend>,
}

impl ShaderProgram {
    /// creates new shader program from source code
    pub fn new(
        backend: &Rc<dyn GpuBackend>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let id = backend.create_program(vertex_src, fragment_src)?;
        log::debug!("linked shader program {id}");

        Ok(Self {
            id,
            uniform_locations: HashMap::new(),
            backend: Rc::clone(backend),
        })
    }

    /// creates the textured sprite program and registers its uniforms
    pub fn sprite(backend: &Rc<dyn GpuBackend>) -> Result<Self, ShaderError> {
        let mut program = Self::new(backend, SPRITE_VERT, SPRITE_FRAG)?;
        program.add_unif_location(PROJECTION_UNIFORM);
        program.add_unif_location(MODEL_UNIFORM);
        program.add_unif_location(SAMPLER_UNIFORM);
        Ok(program)
    }

    #[inline]
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// sets an uniform location
    pub fn add_unif_location(&mut self, name: &str) {
        let unif = self.backend.uniform_location(self.id, name);
        if unif == INVALID_LOCATION {
            log::warn!("uniform {name:?} is not active in shader program {}", self.id);
        }
        self.uniform_locations.insert(name.to_string(), unif);
    }

    /// gets an uniform location (unregistered names are treated like inactive ones, uploads to them are ignored by gl)
    pub fn get_unif(&self, name: &str) -> GLint {
        self.uniform_locations
            .get(name)
            .copied()
            .unwrap_or(INVALID_LOCATION)
    }

    /// makes this the active program
    pub fn bind(&self) {
        self.backend.use_program(self.id);
    }

    /// uploads a matrix uniform to the active program
    pub fn upload_mat4(&self, name: &str, matrix: &glm::Mat4) {
        self.backend.uniform_mat4(self.get_unif(name), matrix);
    }

    /// uploads an integer uniform to the active program
    pub fn upload_int(&self, name: &str, value: GLint) {
        self.backend.uniform_int(self.get_unif(name), value);
    }
}

impl Debug for ShaderProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("id", &self.id)
            .field("uniform_locations", &self.uniform_locations)
            .finish()
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.backend.delete_program(self.id);
    }
}

/// compiles a gl shader
pub(crate) unsafe fn compile_shader(src: &str, ty: GLenum) -> Result<GLuint, ShaderError> {
    let stage = if ty == gl::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let c_str = CString::new(src.as_bytes()).map_err(|_| ShaderError::Compile {
        stage,
        log: String::from("source contains a nul byte"),
    })?;

    // Create GLSL shaders
    let shader = gl::CreateShader(ty);
    gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    // Get the compile status
    let mut status = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

    if status != (gl::TRUE as GLint) {
        let mut len = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetShaderInfoLog(
            shader,
            len,
            ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        );
        gl::DeleteShader(shader);
        return Err(ShaderError::Compile {
            stage,
            log: info_log_to_string(buf),
        });
    }
    Ok(shader)
}

/// links a gl shader program (consumes both shaders)
pub(crate) unsafe fn link_program(vs: GLuint, fs: GLuint) -> Result<GLuint, ShaderError> {
    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);

    gl::DetachShader(program, fs);
    gl::DetachShader(program, vs);
    gl::DeleteShader(fs);
    gl::DeleteShader(vs);

    // Get the link status
    let mut status = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    if status != (gl::TRUE as GLint) {
        let mut len: GLint = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(
            program,
            len,
            ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        );
        gl::DeleteProgram(program);
        return Err(ShaderError::Link {
            log: info_log_to_string(buf),
        });
    }
    Ok(program)
}

/// strips the trailing null characters of a gl info log
fn info_log_to_string(mut buf: Vec<u8>) -> String {
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_program_test() {
        let recording = Rc::new(RecordingBackend::new());
        let backend: Rc<dyn GpuBackend> = recording.clone();
        let program = ShaderProgram::sprite(&backend).unwrap();

        assert_ne!(program.get_unif(PROJECTION_UNIFORM), INVALID_LOCATION);
        assert_ne!(program.get_unif(MODEL_UNIFORM), INVALID_LOCATION);
        assert_ne!(program.get_unif(SAMPLER_UNIFORM), INVALID_LOCATION);
        assert_eq!(program.get_unif("not_registered"), INVALID_LOCATION);

        let id = program.id();
        drop(program);
        assert_eq!(
            recording.commands(),
            vec![GpuCommand::CreateProgram(id), GpuCommand::DeleteProgram(id)]
        );
    }

    #[test]
    fn shader_failure_test() {
        let recording = Rc::new(RecordingBackend::failing_shaders("syntax error"));
        let backend: Rc<dyn GpuBackend> = recording.clone();
        let err = ShaderProgram::sprite(&backend).unwrap_err();
        assert_eq!(
            err,
            ShaderError::Link {
                log: String::from("syntax error")
            }
        );
        assert!(recording.commands().is_empty());
    }

    #[test]
    fn info_log_test() {
        assert_eq!(info_log_to_string(b"bad token\0".to_vec()), "bad token");
        assert_eq!(info_log_to_string(vec![0]), "");
    }
}
