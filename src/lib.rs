//! # Armchair
//!
//! A small wgpu demo that renders an articulated chair built from cuboid
//! primitives. Two joint angles drive the model: the backrest hinges at the
//! seat back, and the armrests follow that hinge before rotating at their
//! own elbow. The arrow keys tilt the joints in 5-degree steps; every key
//! press triggers a full redraw.
//!
//! The scene is eight draws of one shared unit cube, each placed by a model
//! matrix rebuilt from the current joint state. Shading is per-vertex
//! Lambert from a fixed directional light plus a constant ambient term.

mod camera;
mod chair;
mod chair_pass;
mod cube;
mod error;
mod gpu;
mod input;

pub use camera::Camera;
pub use chair::{
    ANGLE_STEP, ARM_RANGE, BACKREST_RANGE, ChairState, PART_COUNT, Side, armrest_matrix,
    backrest_hinge, backrest_matrix, leg_matrices, seat_matrix,
};
pub use chair_pass::{AMBIENT_LIGHT, ChairPass, FrameUniforms, PartUniforms, part_uniforms};
pub use cube::{CUBE_INDICES, CUBE_VERTICES, Cube, Vertex};
pub use error::SetupError;
pub use gpu::GpuContext;
pub use input::{Joint, JointAdjust, joint_adjustment};

// Re-export the math types used in the public API.
pub use glam::{Mat4, Quat, Vec3, Vec4};

// Re-export the winit key type used by the input mapping.
pub use winit::keyboard::KeyCode;
