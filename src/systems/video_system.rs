use crate::engine::EngineError;
use crate::internal_prelude::*;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

/// holds the window and the gl context
pub struct VideoSystem {
    config_template: ConfigTemplateBuilder,
    display_builder: DisplayBuilder,
    gl_context: Option<PossiblyCurrentContext>,
    gl_surface: Option<Surface<WindowSurface>>,
    window: Option<Window>,
    stored_config: SceneAttributes,
}

impl VideoSystem {
    /// creates a new video system, nothing is opened before ``on_resumed``
    pub(crate) fn new(config: &SceneAttributes) -> Self {
        let config_template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder =
            DisplayBuilder::new().with_window_attributes(Some(config.generate_win_attrs()));

        Self {
            config_template,
            display_builder,
            gl_context: None,
            gl_surface: None,
            window: None,
            stored_config: config.clone(),
        }
    }

    /// opens the window, makes a gl context current on it and loads the gl functions
    pub(crate) fn on_resumed(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<Rc<dyn GpuBackend>, EngineError> {
        let (window, gl_config) = self
            .display_builder
            .clone()
            .build(event_loop, self.config_template.clone(), gl_config_picker)
            .map_err(|err| EngineError::Window(err.to_string()))?;

        log::info!("Picked a config with {} samples", gl_config.num_samples());

        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(
                event_loop,
                self.stored_config.generate_win_attrs(),
                &gl_config,
            )
            .map_err(|err| EngineError::Window(err.to_string()))?,
        };

        let raw_window_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|err| EngineError::Window(err.to_string()))?;

        let not_current_gl_context = create_gl_context(&gl_config, raw_window_handle)?;

        let attrs = window
            .build_surface_attributes(Default::default())
            .map_err(|err| EngineError::Surface(err.to_string()))?;

        let gl_surface = unsafe {
            gl_config
                .display()
                .create_window_surface(&gl_config, &attrs)
                .map_err(|err| EngineError::Surface(err.to_string()))?
        };

        // the context has to be current for the function loading and all resource setup
        let gl_context = not_current_gl_context
            .make_current(&gl_surface)
            .map_err(|err| EngineError::Context(err.to_string()))?;

        let gl_display = gl_config.display();
        let backend = GlBackend::load_with(|symbol| gl_display.get_proc_address(symbol))
            .ok_or(EngineError::GlLoader)?;

        self.gl_context = Some(gl_context);
        self.gl_surface = Some(gl_surface);
        self.window = Some(window);

        if let Err(err) = self.set_vsync(self.stored_config.use_vsync) {
            log::error!("Error setting vsync: {err}");
        }

        Ok(Rc::new(backend))
    }

    /// enables or disables vsync for opengl
    pub fn set_vsync(&mut self, flag: bool) -> Result<(), String> {
        log::debug!("set vsync: {flag}");
        let interval = if flag {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let (Some(gl_surface), Some(gl_context)) =
            (self.gl_surface.as_ref(), self.gl_context.as_ref())
        {
            return gl_surface
                .set_swap_interval(gl_context, interval)
                .map_err(|err| err.to_string());
        }
        Err(String::from("no gl surface to set the swap interval on"))
    }

    /// call the opengl window swap
    pub(crate) fn swap_window(&self) {
        if let (Some(gl_surface), Some(gl_context)) =
            (self.gl_surface.as_ref(), self.gl_context.as_ref())
        {
            if let Err(err) = gl_surface.swap_buffers(gl_context) {
                log::error!("failed to swap buffers: {err}");
            }
        }
    }

    /// requests a redraw of the winit window
    pub(crate) fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    /// resizes the gl surface, yields whether the framebuffer actually has a size
    pub(crate) fn resize_surface(&self, width: u32, height: u32) -> bool {
        // Some platforms like EGL require resizing GL surface to update the size.
        if let (Some(gl_surface), Some(gl_context), Some(width), Some(height)) = (
            self.gl_surface.as_ref(),
            self.gl_context.as_ref(),
            NonZeroU32::new(width),
            NonZeroU32::new(height),
        ) {
            gl_surface.resize(gl_context, width, height);
            return true;
        }
        false
    }

    /// drops the surface, the context and then the window
    pub(crate) fn shutdown(&mut self) {
        if self.window.is_some() {
            log::debug!("closing the window");
        }
        self.gl_surface = None;
        self.gl_context = None;
        self.window = None;
    }
}

/// tries a core context with the version the shaders are written for first and falls back to whatever core context there is
fn create_gl_context(
    gl_config: &Config,
    raw_window_handle: raw_window_handle::RawWindowHandle,
) -> Result<NotCurrentContext, EngineError> {
    let gl_display = gl_config.display();

    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 0))))
        .build(Some(raw_window_handle));

    let fallback_context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .with_context_api(ContextApi::OpenGl(None))
        .build(Some(raw_window_handle));

    unsafe {
        gl_display
            .create_context(gl_config, &context_attributes)
            .or_else(|_| gl_display.create_context(gl_config, &fallback_context_attributes))
            .map_err(|err| EngineError::Context(err.to_string()))
    }
}

/// find the config with the maximum number of samples, glutin-winit gives no way to report an empty list from here
fn gl_config_picker(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|accum, config| {
            if config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .expect("the display yielded no gl config")
}
