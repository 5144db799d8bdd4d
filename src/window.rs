//! The public window: one native backend, its event FIFO and a camera.

use glam::Vec3;

use crate::{
    camera::Camera,
    color::Color,
    error::CasementError,
    event::{Event, EventQueue},
    gpu::RenderContextError,
    logging::{self, SharedLogger},
    options::Options,
    platform::{self, Backend},
};

/// A native window with a drawing surface, an input event queue and a
/// camera.
///
/// All methods must be called from the thread that created the window.
pub struct Window {
    backend: Box<dyn Backend>,
    events: EventQueue,
    camera: Camera,
    clear_color: Color,
    logger: SharedLogger,
}

/// Builder for [`Window`].
pub struct WindowBuilder {
    options: Options,
    logger: Option<SharedLogger>,
}

// ── Builder ──

impl WindowBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            logger: None,
        }
    }

    /// Replace all options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Initial drawable size.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options.window.width = width;
        self.options.window.height = height;
        self
    }

    /// Window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.window.title = title.into();
        self
    }

    /// Logger for the window, its backend and its camera. Defaults to the
    /// `log` facade.
    #[must_use]
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Open the native window with the configured backend.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports when it cannot create the window or
    /// its drawing context.
    pub fn build(self) -> Result<Window, CasementError> {
        let logger = self.logger.unwrap_or_else(logging::default_logger);
        let backend =
            platform::create_backend(&self.options.window, logger.clone())?;
        Ok(Window::assemble(backend, &self.options, logger))
    }

    /// Wrap an already created backend.
    #[must_use]
    pub fn build_with_backend(self, backend: Box<dyn Backend>) -> Window {
        let logger = self.logger.unwrap_or_else(logging::default_logger);
        Window::assemble(backend, &self.options, logger)
    }
}

impl Window {
    /// Open a `width` x `height` window with default options.
    ///
    /// # Errors
    ///
    /// See [`WindowBuilder::build`].
    pub fn new(width: u32, height: u32) -> Result<Self, CasementError> {
        Self::builder().size(width, height).build()
    }

    /// Start configuring a window.
    #[must_use]
    pub fn builder() -> WindowBuilder {
        WindowBuilder::new()
    }

    /// Wrap an already created backend, applying `options`.
    #[must_use]
    pub fn with_backend(backend: Box<dyn Backend>, options: &Options) -> Self {
        Self::builder()
            .options(options.clone())
            .build_with_backend(backend)
    }

    fn assemble(
        mut backend: Box<dyn Backend>,
        options: &Options,
        logger: SharedLogger,
    ) -> Self {
        let mut camera = Camera::with_logger(logger.clone());
        let cam = &options.camera;
        camera.set_perspective_matrix(
            cam.fovy.to_radians(),
            options.window.aspect(),
            cam.znear,
            cam.zfar,
        );
        camera.set_orthographic_bounds(cam.orthographic);
        camera.look_at(
            Vec3::from_array(cam.eye),
            Vec3::from_array(cam.at),
            Vec3::from_array(cam.up),
        );

        if !options.window.cursor_visible {
            backend.show_cursor(false);
        }
        if options.window.cursor_locked {
            backend.lock_cursor(true);
        }
        if options.window.fullscreen {
            if let Err(e) = backend.set_fullscreen(true) {
                logger.warn(format_args!("starting windowed: {e}"));
            }
        }
        for (action, name) in options.keybindings.invalid_bindings() {
            logger.warn(format_args!(
                "binding for {action:?} ignored: unknown key {name:?}"
            ));
        }

        Self {
            backend,
            events: EventQueue::new(),
            camera,
            clear_color: Color::BLACK,
            logger,
        }
    }

    // ── Lifecycle ──

    /// Whether the native window still exists.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.backend.is_open()
    }

    /// Destroy the native window. Events already queued can still be
    /// polled.
    pub fn close(&mut self) {
        self.backend.close();
    }

    /// Next event, pumping the backend first. `None` once nothing is
    /// pending.
    pub fn get_event(&mut self) -> Option<Event> {
        if self.backend.is_open() {
            self.backend.pump(&mut self.events);
        }
        self.events.pop()
    }

    // ── Window state ──

    /// Ask for a new drawable size. A [`Event::WindowResized`] follows once
    /// the platform applied it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Enter or leave fullscreen.
    ///
    /// # Errors
    ///
    /// [`CasementError::Unsupported`] when the platform cannot do it,
    /// [`CasementError::Closed`] after close.
    pub fn set_fullscreen(
        &mut self,
        fullscreen: bool,
    ) -> Result<(), CasementError> {
        self.backend.set_fullscreen(fullscreen)
    }

    /// Drawable size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.backend.size()
    }

    /// Whether the window has keyboard focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.backend.has_focus()
    }

    /// Set the title bar text.
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
    }

    /// Show or hide the pointer over the window.
    pub fn show_cursor(&mut self, visible: bool) {
        self.backend.show_cursor(visible);
    }

    /// Hold the pointer at the window center. While locked, every
    /// [`Event::MouseMoved`] is relative to the center.
    pub fn lock_cursor(&mut self, locked: bool) {
        self.backend.lock_cursor(locked);
    }

    // ── Camera ──

    /// The window's camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The window's camera, for navigation and matrix reads.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    // ── Drawing ──

    /// Color the next [`display`](Self::display) clears to.
    pub fn clear(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Present a frame cleared to the last [`clear`](Self::clear) color.
    ///
    /// Without a drawing context (possible on the X11 backend) this does
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`CasementError::Closed`] after close, [`CasementError::Gpu`] when
    /// the frame cannot be acquired.
    pub fn display(&mut self) -> Result<(), CasementError> {
        if !self.backend.is_open() {
            return Err(CasementError::Closed);
        }
        let Some(context) = self.backend.render_context() else {
            self.logger
                .trace(format_args!("display without a drawing context"));
            return Ok(());
        };
        context
            .present_clear(self.clear_color.into())
            .map_err(|e| CasementError::Gpu(RenderContextError::Frame(e)))
    }
}
