// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Minimal windowing shim: a native window with a wgpu drawing surface, one
//! ordered stream of platform-neutral input events, and a look-at camera.
//!
//! # Key entry points
//!
//! - [`Window`] - opens the native window, polls events, presents frames
//! - [`Event`] - the closed set of input and window notifications
//! - [`Camera`] - eye/target/up camera with lazily rebuilt view matrix
//! - [`options::Options`] - window, camera and keybinding settings (TOML)
//!
//! # Architecture
//!
//! A [`platform::Backend`] (winit, or raw Xlib on Linux) owns the native
//! window and its [`gpu::RenderContext`]. Every [`Window::get_event`] pumps
//! the backend without blocking; the backend translates each native
//! notification into zero or more [`Event`]s and appends them to the
//! window's FIFO, from which one event is returned per call.
//!
//! ```no_run
//! use casement::{Color, Event, Window};
//!
//! let mut window = Window::new(800, 600)?;
//! while window.is_opened() {
//!     while let Some(event) = window.get_event() {
//!         if let Event::KeyPressed { .. } = event {
//!             window.close();
//!         }
//!     }
//!     if window.is_opened() {
//!         let _view_proj = window
//!             .camera_mut()
//!             .view_projection_matrix(casement::ProjectionKind::Perspective);
//!         window.clear(Color::BLUE);
//!         window.display()?;
//!     }
//! }
//! # Ok::<(), casement::CasementError>(())
//! ```

pub mod camera;
pub mod color;
pub mod error;
pub mod event;
pub mod gpu;
pub mod logging;
pub mod options;
pub mod platform;
pub mod window;

pub use camera::{Camera, ProjectionKind};
pub use color::Color;
pub use error::CasementError;
pub use event::{Event, EventKind, Key, MouseButton};
pub use window::{Window, WindowBuilder};
