//! Pendulum-like sway of hanging ornaments.

use glam::Vec3;

use crate::ornament::SwayParams;
use crate::scene::SceneNodeId;

/// Move `current` a fixed fraction of the way toward `target`.
pub fn smooth_toward(current: Vec3, target: Vec3, smoothing: f32) -> Vec3 {
    current + (target - current) * smoothing.clamp(0.0, 1.0)
}

/// A swaying node and its smoothed rotation.
#[derive(Clone, Copy, Debug)]
pub struct SwayState {
    pub node: SceneNodeId,
    pub params: SwayParams,
    /// Current XYZ Euler rotation
    pub rotation: Vec3,
}

impl SwayState {
    /// Start at rest in the base orientation.
    pub fn new(node: SceneNodeId, params: SwayParams) -> Self {
        Self {
            node,
            params,
            rotation: params.base_rotation,
        }
    }

    /// Advance one frame toward the target at `time`; returns the new rotation.
    pub fn step(&mut self, time: f32) -> Vec3 {
        self.rotation = smooth_toward(self.rotation, self.params.target(time), self.params.smoothing);
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_within_one_percent() {
        // (1 - 0.08)^56 < 0.01 <= (1 - 0.08)^55
        let target = Vec3::X;
        let mut current = Vec3::ZERO;
        let mut steps = 0;
        let mut last = 0.0;
        while (target.x - current.x).abs() >= 0.01 {
            current = smooth_toward(current, target, 0.08);
            assert!(current.x > last, "not monotone at step {steps}");
            last = current.x;
            steps += 1;
            assert!(steps < 1000);
        }
        assert_eq!(steps, 56);
    }

    #[test]
    fn test_never_overshoots() {
        let mut current = Vec3::ZERO;
        for _ in 0..500 {
            current = smooth_toward(current, Vec3::ONE, 0.08);
            assert!(current.x <= 1.0);
        }
    }

    #[test]
    fn test_state_follows_target() {
        let params = SwayParams {
            phase: 0.0,
            speed: 1.0,
            amplitude_x: 0.05,
            amplitude_z: 0.05,
            smoothing: 0.08,
            base_rotation: Vec3::new(0.0, 2.0, 0.0),
        };
        let mut state = SwayState::new(SceneNodeId(1), params);
        assert_eq!(state.rotation, params.base_rotation);
        for i in 0..600 {
            let r = state.step(i as f32 / 60.0);
            assert!((r.y - 2.0).abs() < 1e-6);
            assert!(r.x.abs() <= 0.05 && r.z.abs() <= 0.05);
        }
    }
}
