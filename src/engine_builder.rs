use crate::engine::{Engine, EngineError};
use crate::internal_prelude::*;
use winit::dpi::LogicalSize;
use winit::window::WindowAttributes;

/// All the settings the scene is run with. The defaults reproduce the landscape demo.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneAttributes {
    pub(crate) title: String,
    pub(crate) size: (u32, u32),
    pub(crate) resizable: bool,
    pub(crate) use_vsync: bool,
    pub(crate) clear_color: glm::Vec4,
    pub(crate) texture_dir: PathBuf,
    pub(crate) scene: Vec<SpriteDefinition>,
}

impl SceneAttributes {
    /// creates the default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// sets the window title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// sets the window size in logical pixels, the projection spans exactly this size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// allows the window to be resized (the scene is stretched, the projection stays fixed)
    pub fn with_resizable(mut self, flag: bool) -> Self {
        self.resizable = flag;
        self
    }

    pub fn with_vsync(mut self, flag: bool) -> Self {
        self.use_vsync = flag;
        self
    }

    /// sets the background color behind all sprites
    pub fn with_clear_color(mut self, color: glm::Vec4) -> Self {
        self.clear_color = color;
        self
    }

    /// sets the directory the texture files are loaded from
    pub fn with_texture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.texture_dir = dir.into();
        self
    }

    /// replaces the sprite table (back to front)
    pub fn with_scene(mut self, definitions: &[SpriteDefinition]) -> Self {
        self.scene = definitions.to_vec();
        self
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn clear_color(&self) -> glm::Vec4 {
        self.clear_color
    }

    #[inline]
    pub fn texture_dir(&self) -> &Path {
        &self.texture_dir
    }

    #[inline]
    pub fn scene(&self) -> &[SpriteDefinition] {
        &self.scene
    }

    /// checks the attributes and creates the engine
    pub fn build_engine(self) -> Result<Engine, EngineError> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "window size {}x{} is empty",
                self.size.0, self.size.1
            )));
        }
        Ok(Engine::new(self))
    }

    /// generates the winit window attributes
    pub(crate) fn generate_win_attrs(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.title.as_str())
            .with_inner_size(LogicalSize::new(self.size.0, self.size.1))
            .with_resizable(self.resizable)
            .with_transparent(false)
    }
}

impl Default for SceneAttributes {
    fn default() -> Self {
        Self {
            title: WIN_TITLE.to_string(),
            size: (DEFAULT_WIN_WIDTH, DEFAULT_WIN_HEIGHT),
            resizable: false,
            use_vsync: true,
            clear_color: BACKGROUND_COLOR,
            texture_dir: PathBuf::from(DEFAULT_TEXTURE_DIR),
            scene: LANDSCAPE_SCENE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_test() {
        let attributes = SceneAttributes::new();
        assert_eq!(attributes.size(), (800, 600));
        assert_eq!(attributes.clear_color(), glm::vec4(0.1, 0.1, 0.1, 1.0));
        assert_eq!(attributes.texture_dir(), Path::new("assets/textures/landscape"));
        assert_eq!(attributes.scene(), &LANDSCAPE_SCENE[..]);
        assert_eq!(attributes.title, "Landscape Scene");
    }

    #[test]
    fn builder_test() {
        let attributes = SceneAttributes::new()
            .with_title("test")
            .with_size(320, 240)
            .with_resizable(true)
            .with_vsync(false)
            .with_clear_color(glm::vec4(0.2, 0.4, 0.6, 1.0))
            .with_texture_dir("textures")
            .with_scene(&LANDSCAPE_SCENE[..2]);
        assert_eq!(attributes.title, "test");
        assert_eq!(attributes.size(), (320, 240));
        assert!(!attributes.use_vsync);
        assert_eq!(attributes.clear_color(), glm::vec4(0.2, 0.4, 0.6, 1.0));
        assert_eq!(attributes.texture_dir(), Path::new("textures"));
        assert_eq!(attributes.scene().len(), 2);

        let win_attrs = attributes.generate_win_attrs();
        assert!(win_attrs.resizable);
        assert_eq!(win_attrs.title, "test");
    }

    #[test]
    fn fixed_window_test() {
        assert!(!SceneAttributes::new().generate_win_attrs().resizable);
    }

    #[test]
    fn empty_window_test() {
        let result = SceneAttributes::new().with_size(0, 600).build_engine();
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }
}
