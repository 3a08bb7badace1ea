use crate::internal_prelude::*;
use stb_image::image::LoadResult;

/// the channel count every image is converted to on decode
pub const RGBA_CHANNELS: usize = 4;

/// rgba pixel data of a decoded image, freed when dropped
#[derive(Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// checks that the size is non-zero and matches the pixel buffer
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == self.width as usize * self.height as usize * RGBA_CHANNELS
    }
}

impl Debug for DecodedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// anything that turns an image file into rgba pixels
pub trait ImageDecoder {
    /// decodes the file with 4 channels regardless of the channel count in the source, or yields the decoder's failure reason
    fn decode_rgba(&self, path: &Path) -> Result<DecodedImage, String>;
}

/// image decoder backed by stb_image
#[derive(Debug, Default, Clone, Copy)]
pub struct StbDecoder;

impl ImageDecoder for StbDecoder {
    fn decode_rgba(&self, path: &Path) -> Result<DecodedImage, String> {
        match stb_image::image::load_with_depth(path, RGBA_CHANNELS, false) {
            LoadResult::ImageU8(image) => Ok(DecodedImage {
                width: image.width as u32,
                height: image.height as u32,
                pixels: image.data,
            }),
            LoadResult::ImageF32(_) => Err(String::from("hdr images are not supported")),
            LoadResult::Error(reason) => Err(reason),
        }
    }
}

/// Error returned when a texture could not be created from an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureError {
    pub path: PathBuf,
    pub reason: String,
}

impl TextureError {
    fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl Display for TextureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not load texture {}: {}",
            self.path.display(),
            self.reason
        )
    }
}

impl Error for TextureError {}

/// sampling setup applied to every sprite texture
pub(crate) const SPRITE_TEXTURE_PARAMETERS: [(GLenum, GLenum); 4] = [
    (gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE),
    (gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE),
    (gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR),
    (gl::TEXTURE_MAG_FILTER, gl::LINEAR),
];

/// an opengl texture that is deleted once its owner goes away
pub struct Texture {
    id: GLuint,
    width: u32,
    height: u32,
    backend: Rc<dyn GpuBackend>,
}

impl Texture {
    /// the gl texture name
    #[inline]
    pub fn id(&self) -> GLuint {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// binds the texture to the given texture unit
    pub(crate) fn bind(&self, unit: GLuint) {
        self.backend.active_texture(unit);
        self.backend.bind_texture(self.id);
    }

    /// clears the texture binding of the active unit
    pub(crate) fn unbind(&self) {
        self.backend.bind_texture(NO_TEXTURE);
    }
}

impl Debug for Texture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::trace!("deleting texture {}", self.id);
        self.backend.delete_texture(self.id);
    }
}

/// loads an opengl texture from an image file
pub fn load_texture(
    backend: &Rc<dyn GpuBackend>,
    decoder: &dyn ImageDecoder,
    path: impl AsRef<Path>,
) -> Result<Texture, TextureError> {
    let path = path.as_ref();
    let image = decoder
        .decode_rgba(path)
        .map_err(|reason| TextureError::new(path, reason))?;

    if !image.is_valid() {
        return Err(TextureError::new(
            path,
            format!(
                "invalid image data ({}x{}, {} bytes)",
                image.width,
                image.height,
                image.pixels.len()
            ),
        ));
    }

    // generate gl texture
    let id = backend.gen_texture();
    backend.bind_texture(id);
    backend.tex_image_rgba(image.width, image.height, &image.pixels);
    backend.generate_mipmap();
    for (parameter, value) in SPRITE_TEXTURE_PARAMETERS {
        backend.tex_parameter(parameter, value);
    }
    backend.bind_texture(NO_TEXTURE);

    let (width, height) = (image.width, image.height);
    drop(image);
    log::debug!(
        "uploaded texture {} ({}x{}) from {}",
        id,
        width,
        height,
        path.display()
    );

    Ok(Texture {
        id,
        width,
        height,
        backend: Rc::clone(backend),
    })
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
/// data for a single vertex (the color slot is kept for the layout but not sampled)
pub struct Vertex {
    pub position: glm::Vec3,
    pub color: glm::Vec3,
    pub uv_coords: glm::Vec2,
}

impl Vertex {
    pub const fn new(position: glm::Vec3, color: glm::Vec3, uv_coords: glm::Vec2) -> Self {
        Self {
            position,
            color,
            uv_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SolidDecoder;

    impl ImageDecoder for SolidDecoder {
        fn decode_rgba(&self, path: &Path) -> Result<DecodedImage, String> {
            match path.file_name().and_then(|name| name.to_str()) {
                Some("empty.png") => Ok(DecodedImage {
                    width: 0,
                    height: 0,
                    pixels: Vec::new(),
                }),
                Some("missing.png") => Err(String::from("can't fopen")),
                _ => Ok(DecodedImage {
                    width: 2,
                    height: 3,
                    pixels: vec![255; 2 * 3 * RGBA_CHANNELS],
                }),
            }
        }
    }

    fn backend() -> (Rc<RecordingBackend>, Rc<dyn GpuBackend>) {
        let recording = Rc::new(RecordingBackend::new());
        let backend: Rc<dyn GpuBackend> = recording.clone();
        (recording, backend)
    }

    #[test]
    fn texture_upload_test() {
        let (recording, backend) = backend();
        let texture = load_texture(&backend, &SolidDecoder, "sky.png").unwrap();
        assert_ne!(texture.id(), NO_TEXTURE);
        assert_eq!((texture.width(), texture.height()), (2, 3));

        let id = texture.id();
        assert_eq!(
            recording.commands(),
            vec![
                GpuCommand::GenTexture(id),
                GpuCommand::BindTexture(id),
                GpuCommand::TexImage {
                    width: 2,
                    height: 3,
                    bytes: 24
                },
                GpuCommand::GenerateMipmap,
                GpuCommand::TexParameter(gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE),
                GpuCommand::TexParameter(gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE),
                GpuCommand::TexParameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR),
                GpuCommand::TexParameter(gl::TEXTURE_MAG_FILTER, gl::LINEAR),
                GpuCommand::BindTexture(NO_TEXTURE),
            ]
        );
        assert_eq!(recording.bound_texture(), NO_TEXTURE);
    }

    #[test]
    fn texture_error_test() {
        let (recording, backend) = backend();
        let error = load_texture(&backend, &SolidDecoder, "missing.png").unwrap_err();
        assert_eq!(error.reason, "can't fopen");
        assert_eq!(error.path, Path::new("missing.png"));
        assert!(error.to_string().contains("can't fopen"));

        assert!(load_texture(&backend, &SolidDecoder, "empty.png").is_err());
        assert!(recording.commands().is_empty());
    }

    #[test]
    fn texture_drop_test() {
        let (recording, backend) = backend();
        let texture = load_texture(&backend, &SolidDecoder, "rocks.png").unwrap();
        let id = texture.id();
        assert_eq!(recording.live_textures(), vec![id]);
        drop(texture);
        assert!(recording.live_textures().is_empty());
        assert_eq!(recording.deleted_textures(), vec![id]);
    }

    #[test]
    fn stb_missing_file_test() {
        let reason = StbDecoder
            .decode_rgba(Path::new("does/not/exist.png"))
            .unwrap_err();
        assert!(!reason.is_empty());
    }

    #[test]
    fn vertex_layout_test() {
        assert_eq!(size_of::<Vertex>(), 8 * size_of::<f32>());
        assert_eq!(std::mem::offset_of!(Vertex, uv_coords), 6 * size_of::<f32>());
    }
}
