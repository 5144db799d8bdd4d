use std::os::raw::c_ulong;

use super::keymap;
use crate::{
    event::{Event, EventQueue, MouseButton},
    logging::SharedLogger,
    platform::cursor::{CursorLock, MotionAction},
};

/// An Xlib event reduced to the fields the translator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notification {
    Key { keysym: c_ulong, pressed: bool },
    Button { button: u32, x: i32, y: i32, pressed: bool },
    Motion { x: i32, y: i32 },
    Configure { width: u32, height: u32 },
    Focus(bool),
    DeleteRequest,
    Destroyed,
}

/// Side effect the backend has to carry out after a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reaction {
    None,
    Recenter(i32, i32),
    Viewport(u32, u32),
    /// Destroy the native window.
    Release,
    /// The server already destroyed the window; only drop our handles.
    Forget,
}

/// Turns notifications into events; holds the state that spans several
/// notifications.
pub(crate) struct Translator {
    pub(crate) cursor: CursorLock,
    pub(crate) size: (u32, u32),
    logger: SharedLogger,
}

impl Translator {
    pub(crate) fn new(size: (u32, u32), logger: SharedLogger) -> Self {
        Self {
            cursor: CursorLock::default(),
            size,
            logger,
        }
    }

    pub(crate) fn translate(
        &mut self,
        notification: Notification,
        queue: &mut EventQueue,
    ) -> Reaction {
        match notification {
            Notification::Key { keysym, pressed } => {
                match keymap::from_keysym(keysym) {
                    Some(key) if pressed => queue.push(Event::key_pressed(key)),
                    Some(key) => queue.push(Event::key_released(key)),
                    None => self
                        .logger
                        .trace(format_args!("untranslated keysym {keysym:#x}")),
                }
                Reaction::None
            }
            Notification::Button {
                button,
                x,
                y,
                pressed,
            } => {
                self.button(button, (x, y), pressed, queue);
                Reaction::None
            }
            Notification::Motion { x, y } => {
                match self.cursor.on_motion((x, y), self.size) {
                    MotionAction::Forward => {
                        queue.push(Event::mouse_moved(x, y));
                        Reaction::None
                    }
                    MotionAction::ForwardAndRecenter((cx, cy)) => {
                        queue.push(Event::mouse_moved(x, y));
                        Reaction::Recenter(cx, cy)
                    }
                    MotionAction::Suppress => Reaction::None,
                }
            }
            Notification::Configure { width, height } => {
                // also sent for moves and restacking
                if (width, height) == self.size || width == 0 || height == 0 {
                    return Reaction::None;
                }
                self.size = (width, height);
                queue.push(Event::window_resized(width, height));
                Reaction::Viewport(width, height)
            }
            Notification::Focus(focused) => {
                queue.push(Event::window_focus(focused));
                Reaction::None
            }
            Notification::DeleteRequest => {
                queue.push(Event::window_closed());
                Reaction::Release
            }
            Notification::Destroyed => {
                queue.push(Event::window_closed());
                Reaction::Forget
            }
        }
    }

    /// Core buttons 4 and 5 are the vertical wheel, 6 and 7 the horizontal
    /// one, 8 and 9 the side buttons.
    fn button(
        &self,
        button: u32,
        (x, y): (i32, i32),
        pressed: bool,
        queue: &mut EventQueue,
    ) {
        let button = match button {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 | 5 => {
                if pressed {
                    let delta = if button == 4 { 1 } else { -1 };
                    queue.push(Event::mouse_wheel(delta));
                }
                return;
            }
            6 | 7 => return,
            8 => MouseButton::X1,
            9 => MouseButton::X2,
            other => {
                self.logger
                    .trace(format_args!("ignoring pointer button {other}"));
                return;
            }
        };
        queue.push(Event::mouse_button(x, y, button, pressed));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use log::Level;
    use x11_dl::keysym;

    use super::*;
    use crate::{event::Key, logging::RecordingLogger};

    fn translator() -> (Translator, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::default());
        (Translator::new((800, 600), logger.clone()), logger)
    }

    fn drain(queue: &mut EventQueue) -> Vec<Event> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    fn button(button: u32, pressed: bool) -> Notification {
        Notification::Button {
            button,
            x: 5,
            y: 7,
            pressed,
        }
    }

    #[test]
    fn wheel_buttons_become_wheel_events_on_press_only() {
        let (mut t, _) = translator();
        let mut queue = EventQueue::new();
        for n in [
            button(4, true),
            button(4, false),
            button(5, true),
            button(5, false),
            button(6, true),
            button(7, false),
        ] {
            assert_eq!(t.translate(n, &mut queue), Reaction::None);
        }
        assert_eq!(
            drain(&mut queue),
            vec![Event::mouse_wheel(1), Event::mouse_wheel(-1)]
        );
    }

    #[test]
    fn regular_buttons_carry_position() {
        let (mut t, _) = translator();
        let mut queue = EventQueue::new();
        let _ = t.translate(button(3, true), &mut queue);
        let _ = t.translate(button(8, false), &mut queue);
        assert_eq!(
            drain(&mut queue),
            vec![
                Event::MousePressed {
                    x: 5,
                    y: 7,
                    button: MouseButton::Right
                },
                Event::MouseReleased {
                    x: 5,
                    y: 7,
                    button: MouseButton::X1
                },
            ]
        );
    }

    #[test]
    fn keys_translate_and_unknown_keysyms_are_logged() {
        let (mut t, logger) = translator();
        let mut queue = EventQueue::new();
        let press = Notification::Key {
            keysym: c_ulong::from(keysym::XK_Escape),
            pressed: true,
        };
        let _ = t.translate(press, &mut queue);
        let _ = t.translate(
            Notification::Key {
                keysym: 0xdead,
                pressed: true,
            },
            &mut queue,
        );
        assert_eq!(drain(&mut queue), vec![Event::key_pressed(Key::Esc)]);
        assert!(logger.contains(Level::Trace, "untranslated keysym"));
    }

    #[test]
    fn locked_motion_requests_recenter_and_drops_the_echo() {
        let (mut t, _) = translator();
        t.cursor.set_locked(true);
        let mut queue = EventQueue::new();

        let reaction =
            t.translate(Notification::Motion { x: 420, y: 300 }, &mut queue);
        assert_eq!(reaction, Reaction::Recenter(400, 300));
        let reaction =
            t.translate(Notification::Motion { x: 400, y: 300 }, &mut queue);
        assert_eq!(reaction, Reaction::None);
        assert_eq!(drain(&mut queue), vec![Event::mouse_moved(420, 300)]);
    }

    #[test]
    fn configure_only_reports_size_changes() {
        let (mut t, _) = translator();
        let mut queue = EventQueue::new();
        let same = Notification::Configure {
            width: 800,
            height: 600,
        };
        assert_eq!(t.translate(same, &mut queue), Reaction::None);

        let bigger = Notification::Configure {
            width: 1024,
            height: 768,
        };
        assert_eq!(
            t.translate(bigger, &mut queue),
            Reaction::Viewport(1024, 768)
        );
        assert_eq!(
            drain(&mut queue),
            vec![Event::window_resized(1024, 768)]
        );
        assert_eq!(t.size, (1024, 768));
    }

    #[test]
    fn close_request_releases_the_window() {
        let (mut t, _) = translator();
        let mut queue = EventQueue::new();
        let _ = t.translate(Notification::Focus(true), &mut queue);
        assert_eq!(
            t.translate(Notification::DeleteRequest, &mut queue),
            Reaction::Release
        );
        assert_eq!(
            drain(&mut queue),
            vec![Event::window_focus(true), Event::window_closed()]
        );
    }

    #[test]
    fn external_destroy_forgets_the_window_without_destroying_it() {
        let (mut t, _) = translator();
        let mut queue = EventQueue::new();
        assert_eq!(
            t.translate(Notification::Destroyed, &mut queue),
            Reaction::Forget
        );
        assert_eq!(drain(&mut queue), vec![Event::window_closed()]);
    }
}
