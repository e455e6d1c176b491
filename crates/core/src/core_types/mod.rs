//! Core types and utilities

pub mod envelope;
pub mod particle;
pub mod vec3;

pub use envelope::{fade_envelope, remap_clamped, MinMax};
pub use particle::Particle;
pub use vec3::Vec3;
