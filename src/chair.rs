//! Chair joint state and per-part model matrices.
//!
//! The chair is eight cubes: a seat slab, four legs, a backrest panel, and
//! two armrests. Two joint angles articulate it: the backrest hinges at the
//! seat back, and the armrests follow that hinge rigidly before applying
//! their own elbow rotation. Every matrix is rebuilt from scratch on each
//! call, so repeated redraws with unchanged state are bit-identical.
//!
//! Matrix chains read left to right in the order the transforms are applied
//! to the part's local frame: hinge rotations come before the child's local
//! offset, so rotating a joint sweeps all descendants rigidly. Each chain
//! ends in a non-uniform scale whose components are half-extents of the
//! ±1 cube.

use glam::{Mat4, Vec3};

/// Degrees added or removed per key press.
pub const ANGLE_STEP: f32 = 5.0;

/// Valid backrest tilt range in degrees.
pub const BACKREST_RANGE: (f32, f32) = (-90.0, 60.0);

/// Valid armrest tilt range in degrees.
pub const ARM_RANGE: (f32, f32) = (-90.0, 90.0);

/// Number of cubes drawn per frame.
pub const PART_COUNT: usize = 8;

/// Which side of the chair an armrest sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign used to mirror armrest offsets in X.
    fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// The two articulated degrees of freedom, in degrees.
///
/// Mutated only by keyboard input and read during redraw; adjustments
/// saturate silently at the range bounds rather than being rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChairState {
    /// Backrest hinge angle, clamped to [`BACKREST_RANGE`].
    pub backrest_angle: f32,
    /// Armrest elbow angle, clamped to [`ARM_RANGE`].
    pub arm_angle: f32,
}

impl Default for ChairState {
    fn default() -> Self {
        Self {
            backrest_angle: 10.0,
            arm_angle: 10.0,
        }
    }
}

impl ChairState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the backrest hinge by `delta` degrees, saturating at the range.
    pub fn adjust_backrest(&mut self, delta: f32) {
        self.backrest_angle =
            (self.backrest_angle + delta).clamp(BACKREST_RANGE.0, BACKREST_RANGE.1);
    }

    /// Adjust the armrest elbow by `delta` degrees, saturating at the range.
    pub fn adjust_arm(&mut self, delta: f32) {
        self.arm_angle = (self.arm_angle + delta).clamp(ARM_RANGE.0, ARM_RANGE.1);
    }

    /// Re-clamp both angles to their valid ranges.
    ///
    /// Applied after every key press, matched or not; the key handler
    /// clamps and redraws unconditionally.
    pub fn clamp(&mut self) {
        self.backrest_angle = self.backrest_angle.clamp(BACKREST_RANGE.0, BACKREST_RANGE.1);
        self.arm_angle = self.arm_angle.clamp(ARM_RANGE.0, ARM_RANGE.1);
    }

    /// Model matrices for all eight parts in draw order:
    /// seat, four legs, backrest, left armrest, right armrest.
    pub fn part_matrices(&self) -> [Mat4; PART_COUNT] {
        let legs = leg_matrices();
        [
            seat_matrix(),
            legs[0],
            legs[1],
            legs[2],
            legs[3],
            backrest_matrix(self.backrest_angle),
            armrest_matrix(Side::Left, self.backrest_angle, self.arm_angle),
            armrest_matrix(Side::Right, self.backrest_angle, self.arm_angle),
        ]
    }
}

/// The flat seat slab: half-extents (2, 0.2, 2) centered at (0, 2.5, 0).
pub fn seat_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 2.5, 0.0))
        * Mat4::from_scale(Vec3::new(2.0, 0.2, 2.0))
}

/// The four legs: 0.4 x 2.4 x 0.4 boxes at the seat corners.
pub fn leg_matrices() -> [Mat4; 4] {
    // Half-extents of the 0.4 x 2.4 x 0.4 legs on the ±1 cube.
    let scale = Mat4::from_scale(Vec3::new(0.2, 1.2, 0.2));
    [
        Mat4::from_translation(Vec3::new(-1.6, 1.2, -1.6)) * scale,
        Mat4::from_translation(Vec3::new(1.6, 1.2, -1.6)) * scale,
        Mat4::from_translation(Vec3::new(-1.6, 1.2, 1.6)) * scale,
        Mat4::from_translation(Vec3::new(1.6, 1.2, 1.6)) * scale,
    ]
}

/// The backrest hinge frame: seat-back pivot plus the hinge rotation.
///
/// Shared by the backrest panel and (offset laterally) by both armrests, so
/// rotating the hinge carries all three parts together.
pub fn backrest_hinge(backrest_deg: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 2.5, -2.0))
        * Mat4::from_rotation_x(backrest_deg.to_radians())
}

/// The backrest panel: hinged at the seat back, panel placed above the hinge.
pub fn backrest_matrix(backrest_deg: f32) -> Mat4 {
    backrest_hinge(backrest_deg)
        * Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0))
        * Mat4::from_scale(Vec3::new(2.0, 2.0, 0.2))
}

/// An armrest: follows the backrest hinge, then rotates about its own elbow.
///
/// The trailing (0, -1, 0) translation re-anchors the elbow pivot at the
/// armrest's near end so the elbow rotation swings the far end.
pub fn armrest_matrix(side: Side, backrest_deg: f32, arm_deg: f32) -> Mat4 {
    let s = side.sign();
    Mat4::from_translation(Vec3::new(s, 2.5, -2.0))
        * Mat4::from_rotation_x(backrest_deg.to_radians())
        * Mat4::from_translation(Vec3::new(s * 1.1, 2.0, 0.0))
        * Mat4::from_rotation_x(arm_deg.to_radians())
        * Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0))
        * Mat4::from_scale(Vec3::new(0.2, 1.2, 0.3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_mat4_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-5);
        }
    }

    #[test]
    fn adjustments_stay_in_range() {
        let mut state = ChairState::new();
        for _ in 0..100 {
            state.adjust_backrest(-ANGLE_STEP);
            state.adjust_arm(-ANGLE_STEP);
        }
        assert_eq!(state.backrest_angle, BACKREST_RANGE.0);
        assert_eq!(state.arm_angle, ARM_RANGE.0);

        for _ in 0..100 {
            state.adjust_backrest(ANGLE_STEP);
            state.adjust_arm(ANGLE_STEP);
        }
        assert_eq!(state.backrest_angle, BACKREST_RANGE.1);
        assert_eq!(state.arm_angle, ARM_RANGE.1);
    }

    #[test]
    fn boundary_presses_saturate_without_overshoot() {
        let mut state = ChairState {
            backrest_angle: 60.0,
            arm_angle: -90.0,
        };
        state.adjust_backrest(ANGLE_STEP);
        state.adjust_arm(-ANGLE_STEP);
        assert_eq!(state.backrest_angle, 60.0);
        assert_eq!(state.arm_angle, -90.0);

        // Further presses in the same direction stay pinned.
        state.adjust_backrest(ANGLE_STEP);
        state.adjust_arm(-ANGLE_STEP);
        assert_eq!(state.backrest_angle, 60.0);
        assert_eq!(state.arm_angle, -90.0);
    }

    #[test]
    fn interleaved_press_sequence_stays_in_range() {
        let mut state = ChairState::new();
        let deltas = [5.0, 5.0, -5.0, 5.0, -5.0, -5.0, 5.0, -5.0, 5.0, 5.0];
        for (i, d) in deltas.iter().cycle().take(500).enumerate() {
            if i % 2 == 0 {
                state.adjust_backrest(*d);
            } else {
                state.adjust_arm(*d);
            }
            assert!(state.backrest_angle >= BACKREST_RANGE.0);
            assert!(state.backrest_angle <= BACKREST_RANGE.1);
            assert!(state.arm_angle >= ARM_RANGE.0);
            assert!(state.arm_angle <= ARM_RANGE.1);
        }
    }

    #[test]
    fn backrest_at_zero_reduces_to_translate_scale() {
        let expected = Mat4::from_translation(Vec3::new(0.0, 4.5, -2.0))
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 0.2));
        assert_mat4_eq(backrest_matrix(0.0), expected);
    }

    #[test]
    fn armrests_follow_the_backrest_hinge_rigidly() {
        // For any hinge angle, the armrest chain factors through the
        // backrest hinge frame shifted by the fixed lateral offset.
        for angle in [-90.0, -30.0, 0.0, 15.0, 60.0] {
            for side in [Side::Left, Side::Right] {
                let s = match side {
                    Side::Left => -1.0,
                    Side::Right => 1.0,
                };
                let via_hinge = Mat4::from_translation(Vec3::new(s, 0.0, 0.0))
                    * backrest_hinge(angle)
                    * Mat4::from_translation(Vec3::new(s * 1.1, 2.0, 0.0))
                    * Mat4::from_rotation_x(25.0_f32.to_radians())
                    * Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0))
                    * Mat4::from_scale(Vec3::new(0.2, 1.2, 0.3));
                assert_mat4_eq(armrest_matrix(side, angle, 25.0), via_hinge);
            }
        }
    }

    #[test]
    fn part_matrices_are_rebuilt_identically() {
        let state = ChairState {
            backrest_angle: -35.0,
            arm_angle: 40.0,
        };
        let first = state.part_matrices();
        let second = state.part_matrices();
        assert_eq!(first, second);
    }

    #[test]
    fn seat_normal_matrix_is_inverse_transpose() {
        // The seat's non-uniform scale makes the plain model matrix wrong
        // for normals; the inverse transpose rescales them correctly.
        let model = seat_matrix();
        let normal_matrix = model.inverse().transpose();

        let up = glam::Vec4::new(0.0, 1.0, 0.0, 0.0);
        let transformed = (normal_matrix * up).truncate().normalize();
        assert_relative_eq!(transformed.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(transformed.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(transformed.z, 0.0, epsilon = 1e-5);

        // Under non-uniform scale the inverse transpose differs from the
        // model matrix itself.
        assert_ne!(normal_matrix, model);
    }

    #[test]
    fn clamp_pulls_out_of_range_state_back() {
        let mut state = ChairState {
            backrest_angle: 500.0,
            arm_angle: -500.0,
        };
        state.clamp();
        assert_eq!(state.backrest_angle, BACKREST_RANGE.1);
        assert_eq!(state.arm_angle, ARM_RANGE.0);
    }
}
