//! GPU context for the window's drawing surface.

/// wgpu device, surface, and queue initialization.
pub mod render_context;

pub use render_context::{RenderContext, RenderContextError};
