//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions, velocities, and forces.
///
/// Alias for `nalgebra::Vector3<f32>`, used throughout the crate for world
/// positions, pointer displacement, and Euler rotation state.
pub type Vec3 = Vector3<f32>;
