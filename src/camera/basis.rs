use glam::Vec3;

/// Threshold below which a vector component (or magnitude) is treated as
/// zero.
pub const EPSILON: f32 = 1e-4;

/// Orthonormal, right-handed camera basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    /// Unit view direction.
    pub front: Vec3,
    /// Unit vector pointing to the right of the view direction.
    pub right: Vec3,
    /// Unit up vector actually used for rendering (orthogonal to `front`).
    pub up: Vec3,
}

/// How a degenerate `front × up` product was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The previous right vector, flattened onto the horizontal plane.
    PreviousRight,
    /// The previous right vector was unusable too; an arbitrary vector
    /// orthogonal to the new front was picked.
    Arbitrary,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl Basis {
    /// Derive a basis looking from `eye` towards `at`, using `up_hint` to fix
    /// the roll.
    ///
    /// When the view direction is parallel to the hint the cross product
    /// vanishes. The previous right vector is then flattened (y zeroed) and
    /// renormalized so roll stays continuous, and the repair is reported.
    /// A zero-length view direction keeps the previous front.
    #[must_use]
    pub fn look_at(
        eye: Vec3,
        at: Vec3,
        up_hint: Vec3,
        previous: &Self,
    ) -> (Self, Option<Recovery>) {
        let front = (at - eye).try_normalize().unwrap_or(previous.front);
        let up_hint = up_hint.try_normalize().unwrap_or(Vec3::Y);

        let mut recovery = None;
        let cross = front.cross(up_hint);
        let right = if is_zero(cross) {
            let flattened = Vec3::new(previous.right.x, 0.0, previous.right.z);
            // strip whatever still lies along the new front
            let candidate = flattened - front * flattened.dot(front);
            if is_zero(candidate) {
                recovery = Some(Recovery::Arbitrary);
                front.any_orthonormal_vector()
            } else {
                recovery = Some(Recovery::PreviousRight);
                candidate.normalize()
            }
        } else {
            cross.normalize()
        };

        let up = right.cross(front).normalize();

        let basis = Self { front, right, up };
        debug_assert!(basis.front.dot(basis.front) > 0.0, "zero front");
        debug_assert!(basis.right.dot(basis.right) > 0.0, "zero right");
        debug_assert!(basis.up.dot(basis.up) > 0.0, "zero up");

        (basis, recovery)
    }

    /// Express a camera-local offset `(right, up, front)` in world space.
    #[must_use]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.right * local.x + self.up * local.y + self.front * local.z
    }
}

/// Magnitude test used for the degeneracy check.
#[must_use]
pub fn is_zero(v: Vec3) -> bool {
    v.length_squared() < EPSILON * EPSILON
}

/// Heading of `front` around the world Y axis.
///
/// Near the poles `atan2` is unstable, so `previous` is returned when the
/// horizontal component is negligible.
#[must_use]
pub fn heading(front: Vec3, previous: f32) -> f32 {
    if front.x.abs() >= EPSILON || front.z.abs() >= EPSILON {
        front.x.atan2(front.z)
    } else {
        previous
    }
}

/// Elevation of `front` above the horizontal plane.
#[must_use]
pub fn pitch(front: Vec3) -> f32 {
    let len = front.length();
    if len == 0.0 {
        return 0.0;
    }
    (front.y / len).clamp(-1.0, 1.0).asin()
}
