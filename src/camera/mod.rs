//! Look-at camera producing view and projection matrices.
//!
//! [`Camera`] keeps the user's `(eye, at, up)` triple, derives an
//! orthonormal [`Basis`] from it, and rebuilds the view matrix lazily from
//! whichever half (rotation or translation) changed.

/// Orthonormal basis derivation and the heading/pitch helpers.
pub mod basis;
/// The camera and its projection/view matrices.
pub mod core;

pub use self::{
    basis::Basis,
    core::{Camera, OrthographicBounds, ProjectionKind},
};
