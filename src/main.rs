//! Demo binary for the casement window shim.

use std::{collections::HashSet, path::Path, time::Instant};

use casement::{
    options::{KeyAction, Options},
    CasementError, Color, Event, Window,
};
use glam::Vec3;

/// Free-flight demo: WASD/QE to move, the lock key to toggle mouse look.
struct Demo {
    window: Window,
    options: Options,
    held: HashSet<KeyAction>,
    locked: bool,
    fullscreen: bool,
    last_frame_time: Instant,
}

impl Demo {
    fn new(options: Options) -> Result<Self, CasementError> {
        let window = Window::builder().options(options.clone()).build()?;
        Ok(Self {
            window,
            locked: options.window.cursor_locked,
            fullscreen: options.window.fullscreen,
            options,
            held: HashSet::new(),
            last_frame_time: Instant::now(),
        })
    }

    fn run(&mut self) -> Result<(), CasementError> {
        while self.window.is_opened() {
            while let Some(event) = self.window.get_event() {
                self.handle_event(event);
            }
            if !self.window.is_opened() {
                break;
            }

            let dt = self.last_frame_time.elapsed().as_secs_f32();
            self.last_frame_time = Instant::now();
            self.fly(dt);

            // tint the background by heading so turning is visible
            let camera = self.window.camera();
            let heading = camera.horizontal_angle().sin() * 0.5 + 0.5;
            let pitch = camera.vertical_angle().sin() * 0.5 + 0.5;
            self.window.clear(Color::rgb(
                0.1,
                0.1 + 0.3 * heading,
                0.2 + 0.3 * pitch,
            ));
            self.window.display()?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::KeyPressed { key } => {
                match self.options.keybindings.lookup(key) {
                    Some(KeyAction::Quit) => self.window.close(),
                    Some(KeyAction::ToggleCursorLock) => {
                        self.locked = !self.locked;
                        self.window.lock_cursor(self.locked);
                        self.window.show_cursor(!self.locked);
                    }
                    Some(KeyAction::ToggleFullscreen) => {
                        self.fullscreen = !self.fullscreen;
                        if let Err(e) =
                            self.window.set_fullscreen(self.fullscreen)
                        {
                            log::warn!("{e}");
                            self.fullscreen = !self.fullscreen;
                        }
                    }
                    Some(action) => {
                        let _ = self.held.insert(action);
                    }
                    None => {}
                }
            }
            Event::KeyReleased { key } => {
                if let Some(action) = self.options.keybindings.lookup(key) {
                    let _ = self.held.remove(&action);
                }
            }
            Event::MouseMoved { x, y } if self.locked => {
                let (width, height) = self.window.size();
                let dx = (x - (width / 2) as i32) as f32;
                let dy = (y - (height / 2) as i32) as f32;
                let sensitivity = self.options.camera.mouse_sensitivity;
                self.window
                    .camera_mut()
                    .mouse_look(dx * sensitivity, dy * sensitivity);
            }
            Event::MouseWheel { delta } => {
                let step = self.options.camera.move_speed * 0.1;
                self.window.camera_mut().move_forward(delta as f32 * step);
            }
            Event::WindowResized { width, height } => {
                let cam = &self.options.camera;
                let aspect = width as f32 / height.max(1) as f32;
                let (fovy, znear, zfar) =
                    (cam.fovy.to_radians(), cam.znear, cam.zfar);
                self.window
                    .camera_mut()
                    .set_perspective_matrix(fovy, aspect, znear, zfar);
            }
            Event::WindowFocus { focused: false } => self.held.clear(),
            Event::WindowClosed => log::info!("window closed"),
            _ => {}
        }
    }

    fn fly(&mut self, dt: f32) {
        // (right, up, front)
        let mut local = Vec3::ZERO;
        for action in &self.held {
            local += match action {
                KeyAction::MoveForward => Vec3::Z,
                KeyAction::MoveBackward => Vec3::NEG_Z,
                KeyAction::StrafeLeft => Vec3::NEG_X,
                KeyAction::StrafeRight => Vec3::X,
                KeyAction::Ascend => Vec3::Y,
                KeyAction::Descend => Vec3::NEG_Y,
                _ => Vec3::ZERO,
            };
        }
        if local != Vec3::ZERO {
            let step = self.options.camera.move_speed * dt;
            self.window.camera_mut().move_relative(local.normalize() * step);
        }
    }
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let result = Demo::new(options).and_then(|mut demo| demo.run());
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
