//! Persistent root displacement carried across locomotion clips.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Accumulated root position. `y` is always 0.
    position: [f32; 3],
    /// Unit walking direction.
    direction: [f32; 3],
    pub walk_speed: f32,
    pub run_speed: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            direction: [0.0, 0.0, 1.0],
            walk_speed: 1.0,
            run_speed: 2.0,
        }
    }
}

impl LocomotionState {
    pub fn new(walk_speed: f32, run_speed: f32) -> Self {
        Self {
            walk_speed,
            run_speed,
            ..Self::default()
        }
    }

    /// Normalise and store the direction. Zero-length or non-finite input is ignored.
    /// Returns whether the direction changed.
    pub fn set_direction(&mut self, x: f32, y: f32, z: f32) -> bool {
        let len = (x * x + y * y + z * z).sqrt();
        if !(len > 0.0 && len.is_finite()) {
            return false;
        }
        self.direction = [x / len, y / len, z / len];
        true
    }

    #[inline]
    pub fn direction(&self) -> [f32; 3] {
        self.direction
    }

    pub fn set_speeds(&mut self, walk: f32, run: f32) {
        self.walk_speed = walk;
        self.run_speed = run;
    }

    /// Add the horizontal part of `delta`. The vertical component is dropped.
    pub fn accumulate(&mut self, delta: [f32; 3]) {
        self.position[0] += delta[0];
        self.position[2] += delta[2];
    }

    /// Displacement of `distance` along the walking direction, projected onto x/z.
    #[inline]
    pub fn along(&self, distance: f32) -> [f32; 3] {
        [distance * self.direction[0], 0.0, distance * self.direction[2]]
    }

    pub fn reset(&mut self) {
        self.position = [0.0; 3];
    }

    #[inline]
    pub fn current_position(&self) -> [f32; 3] {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalised_and_zero_is_ignored() {
        let mut loco = LocomotionState::default();
        assert_eq!(loco.direction(), [0.0, 0.0, 1.0]);
        assert!(loco.set_direction(3.0, 0.0, 4.0));
        let d = loco.direction();
        assert!((d[0] - 0.6).abs() < 1e-6 && (d[2] - 0.8).abs() < 1e-6);
        assert!(!loco.set_direction(0.0, 0.0, 0.0));
        assert!(!loco.set_direction(f32::NAN, 0.0, 1.0));
        assert_eq!(loco.direction(), d);
    }

    #[test]
    fn accumulate_ignores_vertical_component() {
        let mut loco = LocomotionState::default();
        loco.accumulate([1.0, 5.0, -2.0]);
        loco.accumulate([0.5, -1.0, 0.5]);
        assert_eq!(loco.current_position(), [1.5, 0.0, -1.5]);
        loco.reset();
        assert_eq!(loco.current_position(), [0.0; 3]);
    }

    #[test]
    fn along_projects_onto_ground_plane() {
        let mut loco = LocomotionState::default();
        loco.set_direction(0.0, 1.0, 1.0);
        let d = loco.along(2.0);
        assert_eq!(d[1], 0.0);
        assert!((d[2] - 2.0f32.sqrt()).abs() < 1e-5);
    }
}
