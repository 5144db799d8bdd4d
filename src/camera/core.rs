use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::basis::{self, Basis, Recovery};
use crate::logging::{self, SharedLogger};

/// Default near clipping plane for the perspective projection.
pub const Z_NEAR: f32 = 0.1;
/// Default far clipping plane for the perspective projection.
pub const Z_FAR: f32 = 1000.0;
/// Default vertical field of view (60°).
pub const DEFAULT_FOV: f32 = FRAC_PI_3;
/// Default aspect ratio (4:3).
pub const DEFAULT_ASPECT: f32 = 1.33;

/// Which projection [`Camera::view_projection_matrix`] combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    /// Orthographic projection; the view matrix is not applied.
    Orthographic,
    /// Perspective projection combined with the view matrix.
    #[default]
    Perspective,
}

/// Bounds of an orthographic view volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicBounds {
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Top plane.
    pub top: f32,
    /// Near plane.
    pub near: f32,
    /// Far plane.
    pub far: f32,
}

impl Default for OrthographicBounds {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: -1.0,
            far: 1.0,
        }
    }
}

/// Which cached matrices are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DirtyState {
    rotation: bool,
    translation: bool,
}

impl DirtyState {
    const BOTH: Self = Self {
        rotation: true,
        translation: true,
    };

    fn any(self) -> bool {
        self.rotation || self.translation
    }
}

/// Look-at camera with a lazily rebuilt view matrix.
///
/// The user-facing state is the `(eye, at, up)` triple, where `up` is only a
/// hint. Every mutation re-derives the orthonormal [`Basis`] actually used
/// for rendering and marks the affected part of the view matrix stale;
/// [`view_matrix`](Self::view_matrix) rebuilds only what is stale.
///
/// Angles are radians.
pub struct Camera {
    orthographic: Mat4,
    perspective: Mat4,

    view: Mat4,
    rotation: Mat4,
    translation: Mat4,

    eye: Vec3,
    at: Vec3,
    up: Vec3,
    basis: Basis,

    xz_angle: f32,
    y_angle: f32,

    dirty: DirtyState,
    logger: SharedLogger,
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("eye", &self.eye)
            .field("at", &self.at)
            .field("up", &self.up)
            .field("basis", &self.basis)
            .field("xz_angle", &self.xz_angle)
            .field("y_angle", &self.y_angle)
            .finish_non_exhaustive()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at the origin looking down -Z with Y up, logging through the
    /// `log` facade.
    #[must_use]
    pub fn new() -> Self {
        Self::with_logger(logging::default_logger())
    }

    /// Same as [`new`](Self::new) but reporting diagnostics to `logger`.
    #[must_use]
    pub fn with_logger(logger: SharedLogger) -> Self {
        let mut camera = Self {
            orthographic: Mat4::IDENTITY,
            perspective: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            translation: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            at: Vec3::NEG_Z,
            up: Vec3::Y,
            basis: Basis::default(),
            xz_angle: 0.0,
            y_angle: 0.0,
            dirty: DirtyState::default(),
            logger,
        };
        camera.set_orthographic_bounds(OrthographicBounds::default());
        camera.set_perspective_matrix(
            DEFAULT_FOV,
            DEFAULT_ASPECT,
            Z_NEAR,
            Z_FAR,
        );
        camera.look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        camera
    }

    // ── Projection ──

    /// Replace the orthographic projection.
    pub fn set_orthographic_matrix(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.orthographic =
            Mat4::orthographic_rh(left, right, bottom, top, near, far);
    }

    /// Replace the orthographic projection from a bounds value.
    pub fn set_orthographic_bounds(&mut self, bounds: OrthographicBounds) {
        self.set_orthographic_matrix(
            bounds.left,
            bounds.right,
            bounds.bottom,
            bounds.top,
            bounds.near,
            bounds.far,
        );
    }

    /// Replace the perspective projection. `fov` is the vertical field of
    /// view in radians.
    ///
    /// Uses the `[0, 1]` depth range of wgpu.
    pub fn set_perspective_matrix(
        &mut self,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) {
        self.perspective = Mat4::perspective_rh(fov, aspect, near, far);
    }

    /// The orthographic projection matrix.
    #[must_use]
    pub fn orthographic_projection_matrix(&self) -> Mat4 {
        self.orthographic
    }

    /// The perspective projection matrix.
    #[must_use]
    pub fn perspective_projection_matrix(&self) -> Mat4 {
        self.perspective
    }

    // ── View ──

    /// World-to-view matrix, rebuilding only the stale parts.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.dirty.any() {
            self.update_view_matrix();
        }
        self.view
    }

    /// Projection combined with the view for the requested kind.
    ///
    /// The orthographic variant is the bare projection: orthographic mode
    /// draws in view space and ignores the camera orientation.
    pub fn view_projection_matrix(&mut self, kind: ProjectionKind) -> Mat4 {
        match kind {
            ProjectionKind::Orthographic => self.orthographic,
            ProjectionKind::Perspective => {
                self.perspective * self.view_matrix()
            }
        }
    }

    fn update_view_matrix(&mut self) {
        if self.dirty.rotation {
            let Basis { front, right, up } = self.basis;
            self.rotation = Mat4::from_cols(
                Vec4::new(right.x, up.x, -front.x, 0.0),
                Vec4::new(right.y, up.y, -front.y, 0.0),
                Vec4::new(right.z, up.z, -front.z, 0.0),
                Vec4::W,
            );
        }
        if self.dirty.translation {
            self.translation = Mat4::from_translation(-self.eye);
        }

        self.dirty = DirtyState::default();
        self.view = self.rotation * self.translation;
    }

    // ── Orientation ──

    /// Point the camera from `eye` at `at`, with `up` as the roll hint.
    pub fn look_at(&mut self, eye: Vec3, at: Vec3, up: Vec3) {
        self.eye = eye;
        self.at = at;
        self.up = up.try_normalize().unwrap_or(Vec3::Y);

        if basis::is_zero(at - eye) {
            self.logger.warn(format_args!(
                "look_at with coincident eye and target {eye}, \
                 keeping the previous direction"
            ));
        }

        let (basis, recovery) =
            Basis::look_at(self.eye, self.at, self.up, &self.basis);
        self.basis = basis;

        match recovery {
            Some(Recovery::PreviousRight) => self.logger.trace(format_args!(
                "right was zero, reverted to {}",
                self.basis.right
            )),
            Some(Recovery::Arbitrary) => self.logger.trace(format_args!(
                "right was zero and could not be recovered, picked {}",
                self.basis.right
            )),
            None => {}
        }

        self.dirty = DirtyState::BOTH;
        self.update_angles();
    }

    /// Yaw around the camera's own up axis.
    ///
    /// `at` follows the new view direction at the same distance, so a later
    /// [`rotate_around`](Self::rotate_around) orbits the moved target.
    pub fn rotate(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(self.basis.up, angle);
        let distance = (self.at - self.eye).length();

        self.basis.front = (rot * self.basis.front).normalize();
        self.basis.right = (rot * self.basis.right).normalize();
        self.at = self.eye + self.basis.front * distance;

        self.dirty.rotation = true;
        self.update_angles();
    }

    /// Rotate the view direction around an arbitrary world axis.
    pub fn rotate_about(&mut self, axis: Vec3, angle: f32) {
        let Some(axis) = axis.try_normalize() else {
            self.logger
                .warn(format_args!("rotate_about with a zero axis ignored"));
            return;
        };
        let rot = Quat::from_axis_angle(axis, angle);
        self.look_at(self.eye, self.eye + rot * (self.at - self.eye), self.up);
    }

    /// Orbit the eye around the target, keeping the target fixed.
    pub fn rotate_around(&mut self, angle: f32) {
        let rot = Quat::from_axis_angle(self.basis.up, angle);
        self.look_at(self.at + rot * (self.eye - self.at), self.at, self.up);
    }

    /// Turn by pointer deltas.
    ///
    /// The deltas are subtracted from the current heading and pitch (a
    /// pointer moving down pitches the view down), the pitch is clamped to
    /// `[-π/2, π/2]`, and the target is rebuilt at the same distance. The
    /// orientation is recomputed from the stored angles every call, so no
    /// error accumulates.
    pub fn mouse_look(&mut self, dx: f32, dy: f32) {
        let heading = self.xz_angle - dx;
        let pitch = (self.y_angle - dy).clamp(-FRAC_PI_2, FRAC_PI_2);

        let len = (self.at - self.eye).length();
        let at = self.eye
            + Vec3::new(
                len * heading.sin() * pitch.cos(),
                len * pitch.sin(),
                len * heading.cos() * pitch.cos(),
            );

        self.look_at(self.eye, at, self.up);
    }

    fn update_angles(&mut self) {
        self.xz_angle = basis::heading(self.basis.front, self.xz_angle);
        self.y_angle = basis::pitch(self.basis.front);
    }

    // ── Translation ──

    /// Move along the view direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.translate(self.basis.front * distance);
    }

    /// Move by a world-space offset.
    pub fn move_by(&mut self, delta: Vec3) {
        self.translate(delta);
    }

    /// Move sideways along the right vector.
    pub fn strafe(&mut self, distance: f32) {
        self.translate(self.basis.right * distance);
    }

    /// Move along the camera's up vector.
    pub fn ascend(&mut self, distance: f32) {
        self.translate(self.basis.up * distance);
    }

    /// Move by an offset given as `(right, up, front)` components.
    pub fn move_relative(&mut self, delta: Vec3) {
        self.translate(self.basis.to_world(delta));
    }

    fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.at += delta;
        self.dirty.translation = true;
    }

    // ── Accessors ──

    /// Eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at target.
    #[must_use]
    pub fn at(&self) -> Vec3 {
        self.at
    }

    /// Up hint as last passed to [`look_at`](Self::look_at), normalized.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit view direction.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        self.basis.front
    }

    /// Unit right vector.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.basis.right
    }

    /// Unit up vector orthogonal to the view direction.
    #[must_use]
    pub fn up_real(&self) -> Vec3 {
        self.basis.up
    }

    /// The full orthonormal basis.
    #[must_use]
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Heading around world Y; `atan2(front.x, front.z)`.
    #[must_use]
    pub fn horizontal_angle(&self) -> f32 {
        self.xz_angle
    }

    /// Pitch above the horizontal plane.
    #[must_use]
    pub fn vertical_angle(&self) -> f32 {
        self.y_angle
    }
}

#[cfg(test)]
mod tests {
    use std::{f32::consts::PI, sync::Arc};

    use log::Level;

    use super::*;
    use crate::logging::RecordingLogger;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn mat_approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new();
        assert_eq!(camera.eye(), Vec3::ZERO);
        assert_eq!(camera.front(), Vec3::NEG_Z);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up_real(), Vec3::Y);
        assert!((camera.horizontal_angle() - PI).abs() < 1e-6);
        assert!(camera.vertical_angle().abs() < 1e-6);
    }

    #[test]
    fn view_matrix_matches_glam_look_at() {
        let mut camera = Camera::new();
        let eye = Vec3::new(3.0, 2.0, 7.0);
        let at = Vec3::new(-1.0, 0.5, 0.0);
        camera.look_at(eye, at, Vec3::Y);

        let expected = Mat4::look_at_rh(eye, at, Vec3::Y);
        assert!(mat_approx(camera.view_matrix(), expected));
    }

    #[test]
    fn view_matrix_is_idempotent() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        let first = camera.view_matrix();
        assert!(!camera.dirty.any());
        let second = camera.view_matrix();
        assert_eq!(first.to_cols_array(), second.to_cols_array());
    }

    #[test]
    fn accessors_leave_dirty_state_alone() {
        let mut camera = Camera::new();
        camera.move_forward(1.0);
        let before = camera.dirty;
        let _ = camera.eye();
        let _ = camera.front();
        let _ = camera.perspective_projection_matrix();
        let _ = camera.orthographic_projection_matrix();
        let _ = camera.horizontal_angle();
        assert_eq!(camera.dirty, before);
        assert!(camera.dirty.translation);
    }

    #[test]
    fn move_only_dirties_translation() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::new(0.0, 1.0, 4.0), Vec3::ZERO, Vec3::Y);
        let _ = camera.view_matrix();
        let rotation_before = camera.rotation;

        camera.move_forward(2.5);
        assert_eq!(
            camera.dirty,
            DirtyState {
                rotation: false,
                translation: true
            }
        );

        let view = camera.view_matrix();
        assert_eq!(
            camera.rotation.to_cols_array(),
            rotation_before.to_cols_array()
        );
        assert!(mat_approx(
            view,
            Mat4::look_at_rh(camera.eye(), camera.at(), Vec3::Y)
        ));
    }

    #[test]
    fn move_forward_translates_eye_and_target() {
        let mut camera = Camera::new();
        camera.move_forward(1.0);
        assert!(approx(camera.eye(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(approx(camera.at(), Vec3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn strafe_ascend_and_relative_moves_use_camera_axes() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::ZERO, Vec3::X, Vec3::Y);

        camera.strafe(2.0);
        assert!(approx(camera.eye(), Vec3::new(0.0, 0.0, 2.0)));

        camera.ascend(1.0);
        assert!(approx(camera.eye(), Vec3::new(0.0, 1.0, 2.0)));

        camera.move_relative(Vec3::new(-2.0, -1.0, 3.0));
        assert!(approx(camera.eye(), Vec3::new(3.0, 0.0, 0.0)));
        assert!(approx(camera.at() - camera.eye(), Vec3::X));

        camera.move_by(Vec3::new(0.0, 0.0, -1.0));
        assert!(approx(camera.eye(), Vec3::new(3.0, 0.0, -1.0)));
    }

    #[test]
    fn rotate_around_half_turn_swaps_sides() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        camera.rotate_around(PI);

        assert!(approx(camera.eye(), Vec3::new(0.0, 0.0, -5.0)));
        assert_eq!(camera.at(), Vec3::ZERO);
        assert!(approx(camera.front(), Vec3::Z));
    }

    #[test]
    fn rotate_yaws_and_keeps_target_on_view_ray() {
        let mut camera = Camera::new();
        camera.look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0), Vec3::Y);
        camera.rotate(FRAC_PI_2);

        // counter-clockwise seen from above: -Z turns into -X
        assert!(approx(camera.front(), Vec3::NEG_X));
        assert!(approx(camera.right(), Vec3::NEG_Z));
        assert!(approx(camera.at(), Vec3::new(-3.0, 0.0, 0.0)));
        assert!(camera.dirty.rotation);
        assert!((camera.horizontal_angle() + FRAC_PI_2).abs() < 1e-5);

        let expected = Mat4::look_at_rh(camera.eye(), camera.at(), Vec3::Y);
        assert!(mat_approx(camera.view_matrix(), expected));
    }

    #[test]
    fn rotate_about_world_axis() {
        let mut camera = Camera::new();
        camera.rotate_about(Vec3::X, FRAC_PI_2 / 2.0);
        let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
        assert!(approx(camera.front(), expected));
        assert!((camera.vertical_angle() - FRAC_PI_2 / 2.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_about_zero_axis_is_ignored() {
        let logger = Arc::new(RecordingLogger::default());
        let mut camera = Camera::with_logger(logger.clone());
        camera.rotate_about(Vec3::ZERO, 1.0);
        assert_eq!(camera.front(), Vec3::NEG_Z);
        assert!(logger.contains(Level::Warn, "zero axis"));
    }

    #[test]
    fn degenerate_look_at_recovers_and_logs() {
        let logger = Arc::new(RecordingLogger::default());
        let mut camera = Camera::with_logger(logger.clone());
        camera.look_at(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::Y);

        let right = camera.right();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(camera.front()).abs() < 1e-5);
        assert!(approx(right, Vec3::X));
        assert!(logger.contains(Level::Trace, "right was zero"));
    }

    #[test]
    fn mouse_look_pitch_stays_clamped() {
        let mut camera = Camera::new();
        for _ in 0..50 {
            camera.mouse_look(0.05, -0.3);
            let pitch = camera.vertical_angle();
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch));
            assert!((camera.front().length() - 1.0).abs() < 1e-5);
        }
        assert!((camera.vertical_angle() - FRAC_PI_2).abs() < 1e-3);

        for _ in 0..50 {
            camera.mouse_look(-0.05, 0.3);
            let pitch = camera.vertical_angle();
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch));
        }
        assert!((camera.vertical_angle() + FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn mouse_look_keeps_target_distance() {
        let mut camera = Camera::new();
        camera.look_at(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -4.0),
            Vec3::Y,
        );
        camera.mouse_look(0.3, 0.2);
        assert!(((camera.at() - camera.eye()).length() - 5.0).abs() < 1e-4);
        assert_eq!(camera.eye(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn mouse_look_sign_convention() {
        let mut camera = Camera::new();
        // positive dy pitches down
        camera.mouse_look(0.0, 0.2);
        assert!(camera.front().y < 0.0);
        assert!((camera.vertical_angle() + 0.2).abs() < 1e-5);

        // zero deltas reproduce the current orientation
        let front = camera.front();
        camera.mouse_look(0.0, 0.0);
        assert!(approx(camera.front(), front));
    }

    #[test]
    fn orthographic_view_projection_ignores_view() {
        let mut camera = Camera::new();
        camera.set_orthographic_matrix(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);
        camera.look_at(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(
            camera.view_projection_matrix(ProjectionKind::Orthographic),
            camera.orthographic_projection_matrix()
        );
    }

    #[test]
    fn perspective_view_projection_combines_view() {
        let mut camera = Camera::new();
        camera.set_perspective_matrix(1.0, 1.5, 0.5, 50.0);
        camera.look_at(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, Vec3::Y);
        let expected = Mat4::perspective_rh(1.0, 1.5, 0.5, 50.0)
            * Mat4::look_at_rh(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert!(mat_approx(
            camera.view_projection_matrix(ProjectionKind::Perspective),
            expected
        ));
    }
}
