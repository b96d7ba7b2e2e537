//! Arrow-key to joint-adjustment mapping.
//!
//! Left/right tilt the backrest, up/down tilt the armrests. Everything else
//! maps to no adjustment; the caller still clamps state and requests a
//! redraw on every key press.

use winit::keyboard::KeyCode;

use crate::chair::ANGLE_STEP;

/// Which joint a key press adjusts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Joint {
    Backrest,
    Arm,
}

/// A single key press translated into a joint delta in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointAdjust {
    pub joint: Joint,
    pub delta: f32,
}

/// Maps a key to its joint adjustment, or `None` for unrecognized keys.
pub fn joint_adjustment(key: KeyCode) -> Option<JointAdjust> {
    let (joint, delta) = match key {
        KeyCode::ArrowLeft => (Joint::Backrest, -ANGLE_STEP),
        KeyCode::ArrowRight => (Joint::Backrest, ANGLE_STEP),
        KeyCode::ArrowUp => (Joint::Arm, ANGLE_STEP),
        KeyCode::ArrowDown => (Joint::Arm, -ANGLE_STEP),
        _ => return None,
    };
    Some(JointAdjust { joint, delta })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_their_joints() {
        assert_eq!(
            joint_adjustment(KeyCode::ArrowLeft),
            Some(JointAdjust {
                joint: Joint::Backrest,
                delta: -5.0
            })
        );
        assert_eq!(
            joint_adjustment(KeyCode::ArrowRight),
            Some(JointAdjust {
                joint: Joint::Backrest,
                delta: 5.0
            })
        );
        assert_eq!(
            joint_adjustment(KeyCode::ArrowUp),
            Some(JointAdjust {
                joint: Joint::Arm,
                delta: 5.0
            })
        );
        assert_eq!(
            joint_adjustment(KeyCode::ArrowDown),
            Some(JointAdjust {
                joint: Joint::Arm,
                delta: -5.0
            })
        );
    }

    #[test]
    fn other_keys_map_to_none() {
        for key in [KeyCode::Space, KeyCode::KeyW, KeyCode::Escape, KeyCode::Enter] {
            assert_eq!(joint_adjustment(key), None);
        }
    }
}
