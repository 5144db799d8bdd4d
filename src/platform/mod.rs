//! Native window backends.
//!
//! Each backend owns one native window and its drawing surface, and
//! translates the platform's notifications into [`Event`](crate::event::Event)
//! values. Which backend [`create_backend`] opens is chosen by
//! [`BackendKind`] among the ones compiled in.

/// Cursor-lock state machine shared by the backends.
pub mod cursor;
#[cfg(feature = "winit-backend")]
/// Backend driving a winit event loop by pumping.
pub mod winit_backend;
#[cfg(all(target_os = "linux", feature = "x11-backend"))]
/// Backend talking to Xlib directly.
pub mod x11;

use serde::{Deserialize, Serialize};

use crate::{
    error::CasementError, event::EventQueue, gpu::RenderContext,
    logging::SharedLogger, options::WindowOptions,
};

/// One native window and its event source.
///
/// All calls happen on the thread that created the backend. After the window
/// is closed (by the user or through [`close`](Self::close)) every operation
/// is a no-op and [`pump`](Self::pump) queues nothing.
pub trait Backend {
    /// Drain pending native notifications without blocking, appending the
    /// translated events to `queue` in delivery order.
    fn pump(&mut self, queue: &mut EventQueue);

    /// Whether the native window still exists.
    fn is_open(&self) -> bool;

    /// Destroy the native window and its drawing surface.
    fn close(&mut self);

    /// Drawable size in physical pixels.
    fn size(&self) -> (u32, u32);

    /// Ask for a new drawable size.
    fn resize(&mut self, width: u32, height: u32);

    /// Set the window title.
    fn set_title(&mut self, title: &str);

    /// Enter or leave fullscreen.
    ///
    /// # Errors
    ///
    /// [`CasementError::Unsupported`] when the window manager cannot do it,
    /// [`CasementError::Closed`] after close.
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), CasementError>;

    /// Whether the window has keyboard focus.
    fn has_focus(&self) -> bool;

    /// Show or hide the pointer over the window.
    fn show_cursor(&mut self, visible: bool);

    /// Hold the pointer at the window center (see
    /// [`cursor::CursorLock`]).
    fn lock_cursor(&mut self, locked: bool);

    /// The drawing context, if one could be created.
    fn render_context(&self) -> Option<&RenderContext>;
}

/// Native backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// winit, on every platform it supports.
    #[default]
    Winit,
    /// Raw Xlib (Linux only).
    X11,
}

/// Open a window with the requested backend.
///
/// If that backend is not compiled in, the other one is used and a warning
/// is logged.
///
/// # Errors
///
/// Propagates the backend's creation error, or returns
/// [`CasementError::Unsupported`] when no backend is compiled in.
pub fn create_backend(
    options: &WindowOptions,
    logger: SharedLogger,
) -> Result<Box<dyn Backend>, CasementError> {
    let kind = resolve(options.backend, &logger)?;
    logger.info(format_args!("opening {kind:?} window"));
    open(kind, options, logger)
}

fn compiled(kind: BackendKind) -> bool {
    match kind {
        BackendKind::Winit => cfg!(feature = "winit-backend"),
        BackendKind::X11 => {
            cfg!(all(target_os = "linux", feature = "x11-backend"))
        }
    }
}

fn resolve(
    requested: BackendKind,
    logger: &SharedLogger,
) -> Result<BackendKind, CasementError> {
    if compiled(requested) {
        return Ok(requested);
    }
    let fallback = match requested {
        BackendKind::Winit => BackendKind::X11,
        BackendKind::X11 => BackendKind::Winit,
    };
    if compiled(fallback) {
        logger.warn(format_args!(
            "{requested:?} backend not compiled in, using {fallback:?}"
        ));
        Ok(fallback)
    } else {
        Err(CasementError::Unsupported("no window backend compiled in"))
    }
}

#[allow(unused_variables)]
fn open(
    kind: BackendKind,
    options: &WindowOptions,
    logger: SharedLogger,
) -> Result<Box<dyn Backend>, CasementError> {
    match kind {
        #[cfg(feature = "winit-backend")]
        BackendKind::Winit => Ok(Box::new(
            winit_backend::WinitBackend::new(options, logger)?,
        )),
        #[cfg(all(target_os = "linux", feature = "x11-backend"))]
        BackendKind::X11 => {
            Ok(Box::new(x11::X11Backend::new(options, logger)?))
        }
        #[allow(unreachable_patterns)]
        _ => Err(CasementError::Unsupported("window backend")),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use log::Level;

    use super::*;
    use crate::logging::RecordingLogger;

    #[test]
    fn compiled_backend_is_kept() {
        let recorder = Arc::new(RecordingLogger::default());
        let logger: SharedLogger = recorder.clone();
        for kind in [BackendKind::Winit, BackendKind::X11] {
            if compiled(kind) {
                assert_eq!(resolve(kind, &logger).ok(), Some(kind));
            }
        }
        assert!(!recorder.contains(Level::Warn, "not compiled in"));
    }

    #[test]
    fn missing_backend_falls_back_with_warning() {
        let recorder = Arc::new(RecordingLogger::default());
        let logger: SharedLogger = recorder.clone();
        for kind in [BackendKind::Winit, BackendKind::X11] {
            if compiled(kind) {
                continue;
            }
            match resolve(kind, &logger) {
                Ok(other) => {
                    assert_ne!(other, kind);
                    assert!(recorder.contains(Level::Warn, "not compiled in"));
                }
                Err(e) => {
                    assert!(matches!(e, CasementError::Unsupported(_)));
                }
            }
        }
    }

    #[test]
    fn backend_kind_reads_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            backend: BackendKind,
        }
        let w: Wrapper = toml::from_str("backend = \"x11\"").unwrap();
        assert_eq!(w.backend, BackendKind::X11);
    }
}
