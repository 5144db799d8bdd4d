//! Raw Xlib backend.
//!
//! libX11 is loaded at runtime through `x11-dl`. Decoding of the `XEvent`
//! union happens here; everything after that is the plain
//! [`Translator`](translate::Translator), which the unit tests drive
//! directly.

mod keymap;
mod translate;

use std::{
    ffi::CString,
    mem,
    os::raw::{c_char, c_int, c_long},
    ptr::{self, NonNull},
};

use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle,
};
use x11_dl::xlib;

use self::translate::{Notification, Reaction, Translator};
use super::{cursor, Backend};
use crate::{
    error::CasementError, event::EventQueue, gpu::RenderContext,
    logging::SharedLogger, options::WindowOptions,
};

const EVENT_MASK: c_long = xlib::KeyPressMask
    | xlib::KeyReleaseMask
    | xlib::ButtonPressMask
    | xlib::ButtonReleaseMask
    | xlib::PointerMotionMask
    | xlib::StructureNotifyMask
    | xlib::FocusChangeMask;

/// `_NET_WM_STATE` client message actions.
const NET_WM_STATE_REMOVE: c_long = 0;
const NET_WM_STATE_ADD: c_long = 1;

/// Window opened through Xlib.
pub struct X11Backend {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    screen: c_int,
    root: xlib::Window,
    /// Zero once the window has been destroyed.
    window: xlib::Window,
    wm_delete: xlib::Atom,
    blank_cursor: xlib::Cursor,
    context: Option<RenderContext>,
    translator: Translator,
    logger: SharedLogger,
}

impl X11Backend {
    /// Connect to the X server named by `DISPLAY` and map a window.
    ///
    /// A missing drawing surface is not fatal: the window works without one
    /// and a warning is logged.
    ///
    /// # Errors
    ///
    /// [`CasementError::WindowCreation`] if libX11 cannot be loaded or the
    /// display cannot be opened.
    pub fn new(
        options: &WindowOptions,
        logger: SharedLogger,
    ) -> Result<Self, CasementError> {
        let xlib = xlib::Xlib::open()
            .map_err(|e| CasementError::WindowCreation(e.to_string()))?;

        // SAFETY: a null name selects the DISPLAY environment variable.
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(CasementError::WindowCreation(
                "cannot open X display".into(),
            ));
        }

        // SAFETY: `display` is a live connection for all calls below.
        let (screen, root, window) = unsafe {
            let screen = (xlib.XDefaultScreen)(display);
            let root = (xlib.XRootWindow)(display, screen);
            let window = (xlib.XCreateSimpleWindow)(
                display,
                root,
                0,
                0,
                options.width.max(1),
                options.height.max(1),
                0,
                (xlib.XBlackPixel)(display, screen),
                (xlib.XBlackPixel)(display, screen),
            );
            (screen, root, window)
        };

        let mut backend = Self {
            xlib,
            display,
            screen,
            root,
            window,
            wm_delete: 0,
            blank_cursor: 0,
            context: None,
            translator: Translator::new(
                (options.width, options.height),
                logger.clone(),
            ),
            logger,
        };
        if window == 0 {
            return Err(CasementError::WindowCreation(
                "XCreateSimpleWindow failed".into(),
            ));
        }

        backend.wm_delete = backend.intern_atom("WM_DELETE_WINDOW", false);
        let mut protocols = [backend.wm_delete];
        // SAFETY: the window belongs to this connection; `protocols` outlives
        // the call.
        unsafe {
            let _ = (backend.xlib.XSelectInput)(display, window, EVENT_MASK);
            let _ = (backend.xlib.XSetWMProtocols)(
                display,
                window,
                protocols.as_mut_ptr(),
                1,
            );
            let _ = (backend.xlib.XMapWindow)(display, window);
            let _ = (backend.xlib.XFlush)(display);
        }
        backend.set_title(&options.title);

        backend.context = backend.create_context();
        backend.logger.info(format_args!(
            "X11 window {window:#x} created ({}x{})",
            options.width, options.height
        ));
        Ok(backend)
    }

    fn create_context(&self) -> Option<RenderContext> {
        let instance = wgpu::Instance::default();
        let target = wgpu::SurfaceTargetUnsafe::RawHandle {
            raw_display_handle: RawDisplayHandle::Xlib(
                XlibDisplayHandle::new(
                    NonNull::new(self.display.cast()),
                    self.screen,
                ),
            ),
            raw_window_handle: RawWindowHandle::Xlib(XlibWindowHandle::new(
                self.window,
            )),
        };

        // SAFETY: the display and window stay valid until `release`, which
        // drops the context before destroying either of them.
        let surface = match unsafe { instance.create_surface_unsafe(target) } {
            Ok(surface) => surface,
            Err(e) => {
                self.logger.warn(format_args!(
                    "no drawing surface for X11 window: {e}"
                ));
                return None;
            }
        };

        match pollster::block_on(RenderContext::from_surface(
            &instance,
            surface,
            self.translator.size,
            self.logger.clone(),
        )) {
            Ok(context) => Some(context),
            Err(e) => {
                self.logger.warn(format_args!(
                    "no drawing context for X11 window: {e}"
                ));
                None
            }
        }
    }

    fn intern_atom(&self, name: &str, only_if_exists: bool) -> xlib::Atom {
        let Ok(name) = CString::new(name) else {
            return 0;
        };
        // SAFETY: `name` is NUL-terminated and outlives the call.
        unsafe {
            (self.xlib.XInternAtom)(
                self.display,
                name.as_ptr(),
                c_int::from(only_if_exists),
            )
        }
    }

    /// Pull the fields we use out of the event union.
    fn decode(&self, event: xlib::XEvent) -> Option<Notification> {
        match event.get_type() {
            ty @ (xlib::KeyPress | xlib::KeyRelease) => {
                let mut key = xlib::XKeyEvent::from(event);
                // SAFETY: `key` is a key event read from this display.
                let keysym = unsafe { (self.xlib.XLookupKeysym)(&mut key, 0) };
                Some(Notification::Key {
                    keysym,
                    pressed: ty == xlib::KeyPress,
                })
            }
            ty @ (xlib::ButtonPress | xlib::ButtonRelease) => {
                let button = xlib::XButtonEvent::from(event);
                Some(Notification::Button {
                    button: button.button,
                    x: button.x,
                    y: button.y,
                    pressed: ty == xlib::ButtonPress,
                })
            }
            xlib::MotionNotify => {
                let motion = xlib::XMotionEvent::from(event);
                Some(Notification::Motion {
                    x: motion.x,
                    y: motion.y,
                })
            }
            xlib::ConfigureNotify => {
                let configure = xlib::XConfigureEvent::from(event);
                Some(Notification::Configure {
                    width: u32::try_from(configure.width).unwrap_or(0),
                    height: u32::try_from(configure.height).unwrap_or(0),
                })
            }
            xlib::FocusIn => Some(Notification::Focus(true)),
            xlib::FocusOut => Some(Notification::Focus(false)),
            xlib::ClientMessage => {
                let message = xlib::XClientMessageEvent::from(event);
                let atom = message.data.get_long(0) as xlib::Atom;
                (atom == self.wm_delete).then_some(Notification::DeleteRequest)
            }
            xlib::DestroyNotify => Some(Notification::Destroyed),
            _ => None,
        }
    }

    fn warp_pointer(&self, x: i32, y: i32) {
        // SAFETY: the window is open; zero source window means "anywhere".
        unsafe {
            let _ = (self.xlib.XWarpPointer)(
                self.display,
                0,
                self.window,
                0,
                0,
                0,
                0,
                x,
                y,
            );
            let _ = (self.xlib.XFlush)(self.display);
        }
    }

    /// A 1x1 transparent cursor, created on first use.
    fn blank_cursor(&mut self) -> xlib::Cursor {
        if self.blank_cursor != 0 {
            return self.blank_cursor;
        }
        let data: [c_char; 1] = [0];
        // SAFETY: the bitmap data is one fully transparent pixel and
        // outlives the call; the pixmap is freed once the cursor holds it.
        unsafe {
            let pixmap = (self.xlib.XCreateBitmapFromData)(
                self.display,
                self.window,
                data.as_ptr(),
                1,
                1,
            );
            let mut fg: xlib::XColor = mem::zeroed();
            let mut bg: xlib::XColor = mem::zeroed();
            self.blank_cursor = (self.xlib.XCreatePixmapCursor)(
                self.display,
                pixmap,
                pixmap,
                &mut fg,
                &mut bg,
                0,
                0,
            );
            let _ = (self.xlib.XFreePixmap)(self.display, pixmap);
        }
        self.blank_cursor
    }

    /// Drop the surface, then destroy the native window. Idempotent.
    fn release(&mut self) {
        self.context = None;
        if self.window == 0 {
            return;
        }
        // SAFETY: the window and cursor were created on this display and
        // are released exactly once, guarded by the zero checks.
        unsafe {
            if self.blank_cursor != 0 {
                let _ =
                    (self.xlib.XFreeCursor)(self.display, self.blank_cursor);
                self.blank_cursor = 0;
            }
            let _ = (self.xlib.XDestroyWindow)(self.display, self.window);
            let _ = (self.xlib.XFlush)(self.display);
        }
        self.window = 0;
        self.logger.info(format_args!("X11 window destroyed"));
    }

    /// The window is gone on the server side: drop the surface and the
    /// cursor, but never touch the dead window id.
    fn forget(&mut self) {
        self.context = None;
        if self.window == 0 {
            return;
        }
        if self.blank_cursor != 0 {
            // SAFETY: the cursor belongs to the display, not the window.
            let _ = unsafe {
                (self.xlib.XFreeCursor)(self.display, self.blank_cursor)
            };
            self.blank_cursor = 0;
        }
        self.window = 0;
        self.logger
            .info(format_args!("X11 window destroyed by the server"));
    }
}

impl Backend for X11Backend {
    fn pump(&mut self, queue: &mut EventQueue) {
        // SAFETY: `display` is open for the lifetime of `self`; XNextEvent
        // is only called when XPending reported a queued event, so it does
        // not block.
        while self.window != 0
            && unsafe { (self.xlib.XPending)(self.display) } > 0
        {
            let mut event: xlib::XEvent = unsafe { mem::zeroed() };
            let _ = unsafe { (self.xlib.XNextEvent)(self.display, &mut event) };

            let Some(notification) = self.decode(event) else {
                continue;
            };
            match self.translator.translate(notification, queue) {
                Reaction::None => {}
                Reaction::Recenter(x, y) => self.warp_pointer(x, y),
                Reaction::Viewport(width, height) => {
                    if let Some(context) = &mut self.context {
                        context.resize(width, height);
                    }
                }
                Reaction::Release => self.release(),
                Reaction::Forget => self.forget(),
            }
        }
    }

    fn is_open(&self) -> bool {
        self.window != 0
    }

    fn close(&mut self) {
        self.release();
    }

    fn size(&self) -> (u32, u32) {
        if self.window == 0 {
            return self.translator.size;
        }
        // SAFETY: plain query into a zeroed out-struct.
        unsafe {
            let mut attributes: xlib::XWindowAttributes = mem::zeroed();
            if (self.xlib.XGetWindowAttributes)(
                self.display,
                self.window,
                &mut attributes,
            ) == 0
            {
                return self.translator.size;
            }
            (
                u32::try_from(attributes.width).unwrap_or(0),
                u32::try_from(attributes.height).unwrap_or(0),
            )
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.window == 0 || width == 0 || height == 0 {
            return;
        }
        // SAFETY: the window is open.
        unsafe {
            let _ = (self.xlib.XResizeWindow)(
                self.display,
                self.window,
                width,
                height,
            );
            let _ = (self.xlib.XFlush)(self.display);
        }
        // the ConfigureNotify that follows queues the event
    }

    fn set_title(&mut self, title: &str) {
        if self.window == 0 {
            return;
        }
        let title = CString::new(title.replace('\0', "")).unwrap_or_default();
        // SAFETY: NUL-terminated title, open window.
        unsafe {
            let _ = (self.xlib.XStoreName)(
                self.display,
                self.window,
                title.as_ptr(),
            );
            let _ = (self.xlib.XFlush)(self.display);
        }
    }

    fn set_fullscreen(
        &mut self,
        fullscreen: bool,
    ) -> Result<(), CasementError> {
        if self.window == 0 {
            return Err(CasementError::Closed);
        }
        let wm_state = self.intern_atom("_NET_WM_STATE", true);
        let wm_fullscreen = self.intern_atom("_NET_WM_STATE_FULLSCREEN", true);
        if wm_state == 0 || wm_fullscreen == 0 {
            self.logger.warn(format_args!(
                "window manager does not support _NET_WM_STATE_FULLSCREEN"
            ));
            return Err(CasementError::Unsupported("fullscreen"));
        }

        // SAFETY: a zeroed client message is a valid starting point; every
        // field the window manager reads is set below.
        unsafe {
            let mut message: xlib::XClientMessageEvent = mem::zeroed();
            message.type_ = xlib::ClientMessage;
            message.window = self.window;
            message.message_type = wm_state;
            message.format = 32;
            message.data.set_long(
                0,
                if fullscreen {
                    NET_WM_STATE_ADD
                } else {
                    NET_WM_STATE_REMOVE
                },
            );
            message.data.set_long(1, wm_fullscreen as c_long);
            message.data.set_long(2, 0);
            // source indication: normal application
            message.data.set_long(3, 1);

            let mut event = xlib::XEvent::from(message);
            let _ = (self.xlib.XSendEvent)(
                self.display,
                self.root,
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut event,
            );
            let _ = (self.xlib.XFlush)(self.display);
        }
        Ok(())
    }

    fn has_focus(&self) -> bool {
        if self.window == 0 {
            return false;
        }
        let mut focused: xlib::Window = 0;
        let mut revert_to: c_int = 0;
        // SAFETY: plain query into locals.
        unsafe {
            let _ = (self.xlib.XGetInputFocus)(
                self.display,
                &mut focused,
                &mut revert_to,
            );
        }
        focused == self.window
    }

    fn show_cursor(&mut self, visible: bool) {
        if self.window == 0 {
            return;
        }
        if visible {
            // SAFETY: the window is open.
            unsafe {
                let _ = (self.xlib.XUndefineCursor)(self.display, self.window);
            }
        } else {
            let cursor = self.blank_cursor();
            // SAFETY: the cursor was created on this display.
            unsafe {
                let _ = (self.xlib.XDefineCursor)(
                    self.display,
                    self.window,
                    cursor,
                );
            }
        }
        // SAFETY: open display.
        unsafe {
            let _ = (self.xlib.XFlush)(self.display);
        }
    }

    fn lock_cursor(&mut self, locked: bool) {
        self.translator.cursor.set_locked(locked);
        if locked && self.window != 0 {
            let center = cursor::center_of(self.translator.size);
            self.translator.cursor.expect_warp(center);
            self.warp_pointer(center.0, center.1);
        }
    }

    fn render_context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        self.release();
        // SAFETY: opened in `new`, closed exactly once here.
        unsafe {
            let _ = (self.xlib.XCloseDisplay)(self.display);
        }
    }
}
