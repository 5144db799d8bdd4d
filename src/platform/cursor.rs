//! Cursor lock shared by the backends.
//!
//! While locked, every real pointer motion is forwarded and answered with a
//! warp back to the window center. The warp itself produces one synthetic
//! motion notification, which must not reach the application.

/// What the backend should do with a pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    /// Queue the motion.
    Forward,
    /// Queue the motion, then warp the pointer to the given position.
    ForwardAndRecenter((i32, i32)),
    /// Drop the motion; it was caused by our own warp.
    Suppress,
}

/// Lock flag plus the one-shot "ignore the next warp" marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorLock {
    locked: bool,
    pending_warp: Option<(i32, i32)>,
}

impl CursorLock {
    /// Enable or disable the lock. Unlocking forgets a pending warp.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.pending_warp = None;
        }
    }

    /// Whether the pointer is being held at the center.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Classify a pointer motion to `pos` in a window of `size`.
    ///
    /// The pending marker is consumed by the first motion after a warp
    /// whether or not that motion was the synthetic one.
    pub fn on_motion(
        &mut self,
        pos: (i32, i32),
        size: (u32, u32),
    ) -> MotionAction {
        if let Some(target) = self.pending_warp.take() {
            if (pos.0 - target.0).abs() <= 1 && (pos.1 - target.1).abs() <= 1 {
                return MotionAction::Suppress;
            }
        }

        if !self.locked {
            return MotionAction::Forward;
        }

        let center = center_of(size);
        if pos == center {
            return MotionAction::Forward;
        }

        self.pending_warp = Some(center);
        MotionAction::ForwardAndRecenter(center)
    }

    /// Mark a warp to `target` issued outside of
    /// [`on_motion`](Self::on_motion), so its echo is suppressed too.
    pub fn expect_warp(&mut self, target: (i32, i32)) {
        self.pending_warp = Some(target);
    }

    /// Forget the pending warp, e.g. when the warp request failed.
    pub fn cancel_warp(&mut self) {
        self.pending_warp = None;
    }
}

/// Pixel at the middle of a window of `size`.
#[must_use]
pub fn center_of(size: (u32, u32)) -> (i32, i32) {
    (
        i32::try_from(size.0 / 2).unwrap_or(i32::MAX),
        i32::try_from(size.1 / 2).unwrap_or(i32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: (u32, u32) = (800, 600);

    #[test]
    fn unlocked_motion_is_forwarded() {
        let mut lock = CursorLock::default();
        assert_eq!(lock.on_motion((10, 20), SIZE), MotionAction::Forward);
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Forward);
    }

    #[test]
    fn locked_motion_recenters_and_suppresses_exactly_one_echo() {
        let mut lock = CursorLock::default();
        lock.set_locked(true);

        assert_eq!(
            lock.on_motion((410, 295), SIZE),
            MotionAction::ForwardAndRecenter((400, 300))
        );
        // synthetic motion from the warp
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Suppress);
        // a real motion landing on the center afterwards is kept
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Forward);
    }

    #[test]
    fn explicit_warp_echo_is_suppressed() {
        let mut lock = CursorLock::default();
        lock.set_locked(true);
        lock.expect_warp(center_of(SIZE));
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Suppress);
    }

    #[test]
    fn stale_marker_is_dropped_by_a_real_motion() {
        let mut lock = CursorLock::default();
        lock.set_locked(true);
        let _ = lock.on_motion((500, 300), SIZE);

        // user moved again before the warp arrived
        assert_eq!(
            lock.on_motion((450, 250), SIZE),
            MotionAction::ForwardAndRecenter((400, 300))
        );
        assert_eq!(lock.on_motion((401, 299), SIZE), MotionAction::Suppress);
    }

    #[test]
    fn unlocking_and_cancelling_clear_the_marker() {
        let mut lock = CursorLock::default();
        lock.set_locked(true);
        let _ = lock.on_motion((0, 0), SIZE);
        lock.set_locked(false);
        assert!(!lock.is_locked());
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Forward);

        lock.set_locked(true);
        lock.expect_warp((400, 300));
        lock.cancel_warp();
        assert_eq!(lock.on_motion((400, 300), SIZE), MotionAction::Forward);
    }
}
