use serde::{Deserialize, Serialize};

use crate::camera::{
    core::{DEFAULT_FOV, Z_FAR, Z_NEAR},
    OrthographicBounds,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection, placement and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Orthographic view volume.
    pub orthographic: OrthographicBounds,
    /// Initial eye position.
    pub eye: [f32; 3],
    /// Initial look-at target.
    pub at: [f32; 3],
    /// Initial up hint.
    pub up: [f32; 3],
    /// Radians of mouse look per pixel of pointer travel.
    pub mouse_sensitivity: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: DEFAULT_FOV.to_degrees(),
            znear: Z_NEAR,
            zfar: Z_FAR,
            orthographic: OrthographicBounds::default(),
            eye: [0.0, 0.0, 0.0],
            at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            mouse_sensitivity: 0.003,
            move_speed: 5.0,
        }
    }
}
