use crate::internal_prelude::*;
use crate::systems::video_system::VideoSystem;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// all possible states of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// no window yet
    Starting,
    /// a frame is drawn on every redraw
    Running,
    /// everything is released, the event loop is about to return
    Terminated,
}

/// Errors that make it impossible to show the scene at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidConfig(String),
    EventLoop(String),
    Window(String),
    Context(String),
    Surface(String),
    GlLoader,
    Shader(ShaderError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfig(msg) => write!(f, "invalid scene attributes: {msg}"),
            EngineError::EventLoop(msg) => write!(f, "failed to run the event loop: {msg}"),
            EngineError::Window(msg) => write!(f, "failed to create the window: {msg}"),
            EngineError::Context(msg) => write!(f, "failed to create the gl context: {msg}"),
            EngineError::Surface(msg) => write!(f, "failed to create the gl surface: {msg}"),
            EngineError::GlLoader => f.write_str("failed to load the opengl functions"),
            EngineError::Shader(err) => write!(f, "failed to build the sprite shader: {err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::Shader(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ShaderError> for EngineError {
    fn from(err: ShaderError) -> Self {
        EngineError::Shader(err)
    }
}

/// main engine
pub struct Engine {
    config: SceneAttributes,
    state: EngineState,
    exit_state: Option<Result<(), EngineError>>,
    video_system: VideoSystem,
    renderer: Option<SceneRenderer>,
    decoder: StbDecoder,
}

impl Engine {
    /// engine setup on startup
    pub(crate) fn new(config: SceneAttributes) -> Self {
        let video_system = VideoSystem::new(&config);
        Self {
            config,
            state: EngineState::Starting,
            exit_state: Some(Ok(())),
            video_system,
            renderer: None,
            decoder: StbDecoder,
        }
    }

    /// runs the main loop until the window is closed
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let event_loop = EventLoop::new().map_err(|err| EngineError::EventLoop(err.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(self)
            .map_err(|err| EngineError::EventLoop(err.to_string()))?;
        self.exit_state.take().unwrap_or(Ok(()))?;
        Ok(())
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// access to the renderer while the engine is running
    pub fn renderer(&self) -> Option<&SceneRenderer> {
        self.renderer.as_ref()
    }

    /// creates the window, the context and all gpu resources
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let backend = self.video_system.on_resumed(event_loop)?;
        self.renderer = Some(SceneRenderer::new(backend, &self.decoder, &self.config)?);
        Ok(())
    }

    /// gets called every frame
    fn on_frame_redraw(&mut self) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.render();
            self.video_system.swap_window();
        }
    }

    /// releases the gpu resources while the context is still current and stops the loop
    fn terminate(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == EngineState::Terminated {
            return;
        }
        self.renderer = None;
        self.state = EngineState::Terminated;
        log::debug!("engine state: {:?}", self.state);
        event_loop.exit();
    }
}

impl ApplicationHandler for Engine {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state != EngineState::Starting {
            return;
        }
        match self.init(event_loop) {
            Ok(()) => {
                self.state = EngineState::Running;
                log::debug!("engine state: {:?}", self.state);
            }
            Err(err) => {
                log::error!("{err}");
                self.exit_state = Some(Err(err));
                self.terminate(event_loop);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.terminate(event_loop),
            WindowEvent::RedrawRequested => self.on_frame_redraw(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_ref() {
                    if self.video_system.resize_surface(size.width, size.height) {
                        renderer.on_resize(size.width, size.height);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.state == EngineState::Running {
            self.video_system.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.renderer = None;
        self.video_system.shutdown();
    }
}
