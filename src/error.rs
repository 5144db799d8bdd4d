//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the casement crate.
#[derive(Debug)]
pub enum CasementError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The native event loop could not be created or pumped.
    EventLoop(String),
    /// The native window could not be created.
    WindowCreation(String),
    /// The operation needs an open window.
    Closed,
    /// The backend or window manager lacks the capability.
    Unsupported(&'static str),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for CasementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::EventLoop(msg) => write!(f, "event loop error: {msg}"),
            Self::WindowCreation(msg) => {
                write!(f, "window creation failed: {msg}")
            }
            Self::Closed => write!(f, "window is closed"),
            Self::Unsupported(what) => write!(f, "unsupported: {what}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for CasementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CasementError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for CasementError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert_eq!(CasementError::Closed.to_string(), "window is closed");
        assert_eq!(
            CasementError::Unsupported("fullscreen").to_string(),
            "unsupported: fullscreen"
        );
        assert!(CasementError::EventLoop("boom".into())
            .to_string()
            .contains("boom"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: CasementError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CasementError::Io(_)));
        assert!(err.source().is_some());
        assert!(CasementError::Closed.source().is_none());
    }
}
