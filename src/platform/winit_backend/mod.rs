//! winit backend.
//!
//! winit wants to own the main loop; this backend inverts that by pumping the
//! event loop with a zero timeout on every [`Backend::pump`] call, so the
//! application keeps its own poll-driven loop.

mod keymap;

use std::{sync::Arc, time::Duration};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{CursorGrabMode, Fullscreen, Window, WindowAttributes, WindowId},
};

use super::{
    cursor::{center_of, CursorLock, MotionAction},
    Backend,
};
use crate::{
    error::CasementError,
    event::{Event, EventQueue, MouseButton},
    gpu::RenderContext,
    logging::SharedLogger,
    options::WindowOptions,
};

/// How many startup pumps to wait for the platform to resume the app.
const STARTUP_PUMPS: usize = 200;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

/// Window opened through winit.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    state: WinitState,
}

/// Everything the [`ApplicationHandler`] callbacks touch.
struct WinitState {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    context: Option<RenderContext>,
    staged: Vec<Event>,
    cursor_pos: (i32, i32),
    cursor: CursorLock,
    wheel: WheelAccumulator,
    size: (u32, u32),
    closed: bool,
    startup_error: Option<CasementError>,
    logger: SharedLogger,
}

impl WinitBackend {
    /// Create the event loop and pump it until the window exists.
    ///
    /// # Errors
    ///
    /// [`CasementError::EventLoop`] if winit cannot start,
    /// [`CasementError::WindowCreation`] if the window is refused or never
    /// appears, [`CasementError::Gpu`] if no drawing context can be created.
    pub fn new(
        options: &WindowOptions,
        logger: SharedLogger,
    ) -> Result<Self, CasementError> {
        let mut event_loop = EventLoop::new()
            .map_err(|e| CasementError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let attributes = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(PhysicalSize::new(options.width, options.height));

        let mut state = WinitState {
            attributes,
            window: None,
            context: None,
            staged: Vec::new(),
            cursor_pos: (0, 0),
            cursor: CursorLock::default(),
            wheel: WheelAccumulator::default(),
            size: (options.width, options.height),
            closed: false,
            startup_error: None,
            logger,
        };

        for _ in 0..STARTUP_PUMPS {
            let status = event_loop
                .pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut state);
            if let Some(err) = state.startup_error.take() {
                return Err(err);
            }
            if state.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(CasementError::EventLoop(format!(
                    "event loop exited during startup with code {code}"
                )));
            }
        }
        if state.window.is_none() {
            return Err(CasementError::WindowCreation(
                "platform never resumed the application".into(),
            ));
        }

        Ok(Self { event_loop, state })
    }

    fn window(&self) -> Option<&Window> {
        self.state.window.as_deref()
    }
}

impl WinitState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) {
        let window = match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.startup_error =
                    Some(CasementError::WindowCreation(e.to_string()));
                return;
            }
        };

        let size = window.inner_size();
        self.size = (size.width, size.height);
        match pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            self.size,
            self.logger.clone(),
        )) {
            Ok(context) => self.context = Some(context),
            Err(e) => {
                self.startup_error = Some(e.into());
                return;
            }
        }

        self.logger.info(format_args!(
            "window created ({}x{})",
            self.size.0, self.size.1
        ));
        self.window = Some(window);
    }

    /// Drop the surface, then the window it targets.
    fn release(&mut self) {
        self.context = None;
        self.window = None;
        self.closed = true;
    }

    fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let pos = (position.x as i32, position.y as i32);
        self.cursor_pos = pos;
        match self.cursor.on_motion(pos, self.size) {
            MotionAction::Forward => {
                self.staged.push(Event::mouse_moved(pos.0, pos.1));
            }
            MotionAction::ForwardAndRecenter(center) => {
                self.staged.push(Event::mouse_moved(pos.0, pos.1));
                let warped = self.window.as_ref().map(|window| {
                    window.set_cursor_position(PhysicalPosition::new(
                        center.0, center.1,
                    ))
                });
                if let Some(Err(e)) = warped {
                    self.cursor.cancel_warp();
                    self.logger.trace(format_args!("cursor warp failed: {e}"));
                }
            }
            MotionAction::Suppress => {}
        }
    }

    fn on_resized(&mut self, size: PhysicalSize<u32>) {
        if (size.width, size.height) == self.size {
            return;
        }
        self.size = (size.width, size.height);
        if let Some(context) = &mut self.context {
            context.resize(size.width, size.height);
        }
        self.staged
            .push(Event::window_resized(size.width, size.height));
    }
}

/// Pixel travel that counts as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Turns wheel deltas into whole notches; positive scrolls up.
///
/// Line deltas round to at least one notch each. Pixel deltas (touchpads)
/// arrive in small steps and are summed until a notch worth of travel has
/// accumulated; the remainder carries over to the next delta.
#[derive(Debug, Default)]
struct WheelAccumulator {
    pixels: f64,
}

impl WheelAccumulator {
    fn notches(&mut self, delta: MouseScrollDelta) -> i32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => {
                if y == 0.0 {
                    return 0;
                }
                let notches = y.round() as i32;
                if notches == 0 {
                    y.signum() as i32
                } else {
                    notches
                }
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // direction change: drop travel in the old direction
                if self.pixels * pos.y < 0.0 {
                    self.pixels = 0.0;
                }
                self.pixels += pos.y;
                let notches = (self.pixels / PIXELS_PER_NOTCH).trunc();
                self.pixels -= notches * PIXELS_PER_NOTCH;
                notches as i32
            }
        }
    }
}

impl ApplicationHandler for WinitState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && !self.closed {
            self.create_window(event_loop);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.closed {
            return;
        }
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.staged.push(Event::window_closed());
                self.release();
            }
            WindowEvent::Resized(size) => self.on_resized(size),
            WindowEvent::Focused(focused) => {
                self.staged.push(Event::window_focus(focused));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = keymap::translate(&event) else {
                    self.logger.trace(format_args!(
                        "untranslated key {:?}",
                        event.physical_key
                    ));
                    return;
                };
                self.staged.push(match event.state {
                    ElementState::Pressed => Event::key_pressed(key),
                    ElementState::Released => Event::key_released(key),
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    let (x, y) = self.cursor_pos;
                    self.staged.push(Event::mouse_button(
                        x,
                        y,
                        button,
                        state.is_pressed(),
                    ));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = self.wheel.notches(delta);
                if notches != 0 {
                    self.staged.push(Event::mouse_wheel(notches));
                }
            }
            _ => {}
        }
    }
}

impl Backend for WinitBackend {
    fn pump(&mut self, queue: &mut EventQueue) {
        if self.state.closed {
            return;
        }
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);
        queue.extend(self.state.staged.drain(..));

        if let PumpStatus::Exit(code) = status {
            if !self.state.closed {
                self.state.logger.warn(format_args!(
                    "event loop exited with code {code}"
                ));
                queue.push(Event::window_closed());
                self.state.release();
            }
        }
    }

    fn is_open(&self) -> bool {
        self.state.window.is_some()
    }

    fn close(&mut self) {
        if self.is_open() {
            self.state.logger.info(format_args!("closing window"));
        }
        self.state.release();
    }

    fn size(&self) -> (u32, u32) {
        self.state.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        // applied synchronously by some platforms, otherwise a Resized event
        // follows
        let applied = self.window().and_then(|window| {
            window.request_inner_size(PhysicalSize::new(width, height))
        });
        if let Some(size) = applied {
            self.state.on_resized(size);
        }
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = self.window() {
            window.set_title(title);
        }
    }

    fn set_fullscreen(
        &mut self,
        fullscreen: bool,
    ) -> Result<(), CasementError> {
        let window = self.window().ok_or(CasementError::Closed)?;
        window.set_fullscreen(
            fullscreen.then_some(Fullscreen::Borderless(None)),
        );
        Ok(())
    }

    fn has_focus(&self) -> bool {
        self.window().is_some_and(Window::has_focus)
    }

    fn show_cursor(&mut self, visible: bool) {
        if let Some(window) = self.window() {
            window.set_cursor_visible(visible);
        }
    }

    fn lock_cursor(&mut self, locked: bool) {
        self.state.cursor.set_locked(locked);
        let Some(window) = self.state.window.as_deref() else {
            return;
        };
        let result = if locked {
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = result {
            self.state
                .logger
                .warn(format_args!("cursor grab unsupported: {e}"));
        }

        if locked {
            let center = center_of(self.state.size);
            let warped = window
                .set_cursor_position(PhysicalPosition::new(center.0, center.1));
            if warped.is_ok() {
                self.state.cursor.expect_warp(center);
            }
        }
    }

    fn render_context(&self) -> Option<&RenderContext> {
        self.state.context.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_deltas_round_to_whole_notches() {
        let mut wheel = WheelAccumulator::default();
        let mut line = |y| wheel.notches(MouseScrollDelta::LineDelta(0.0, y));
        assert_eq!(line(1.0), 1);
        assert_eq!(line(-2.0), -2);
        assert_eq!(line(0.2), 1);
        assert_eq!(line(-0.3), -1);
        assert_eq!(line(0.0), 0);
    }

    #[test]
    fn pixel_deltas_accumulate_into_notches() {
        let mut wheel = WheelAccumulator::default();
        let mut pixels = |y| {
            let delta = PhysicalPosition::new(0.0, y);
            wheel.notches(MouseScrollDelta::PixelDelta(delta))
        };

        // a gentle touchpad gesture: ten small steps, two notches
        let total: i32 = (0..10).map(|_| pixels(4.0)).sum();
        assert_eq!(total, 2);

        assert_eq!(pixels(45.0), 2);
        assert_eq!(pixels(-4.0), 0);
        assert_eq!(pixels(-16.0), -1);
    }
}
