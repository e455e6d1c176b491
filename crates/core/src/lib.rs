//! Pointer Trail Simulation Core
//!
//! Frame-driven particle trail that follows a 2D pointer through a projected
//! 3D plane. Pointer motion is unprojected onto the z = 0 world plane; once
//! enough travel accumulates, a pooled particle is revived with an impulse
//! along the recent motion, then falls under gravity while it fades and
//! settles its rotation over a bounded lifespan.
//!
//! The crate covers the pool/lifecycle manager and the physics pipeline that
//! produces per-frame transform and opacity data for a fixed-size instance
//! buffer. Rendering, asset loading and window plumbing are external
//! collaborators reached through two narrow seams:
//! - [`Projector`]: camera position + NDC unprojection, injected once the
//!   camera exists
//! - [`InstanceSink`]: the per-instance (transform, opacity) destination
//!   written every frame

// Core types and utilities
pub mod core_types;

// Render-facing seams
pub mod instancing;
pub mod projection;

// Field orchestration
pub mod simulation;

// Re-export core types
pub use core_types::{fade_envelope, remap_clamped, MinMax, Particle, Vec3};

// Re-export the seams
pub use instancing::{InstanceBuffer, InstanceSink, InstanceSlot};
pub use projection::{pointer_to_world, PerspectiveCamera, Projector, Viewport};

// Re-export field types
pub use simulation::{ParticleField, SettingsError, TrailSettings, DEFAULT_POOL_SIZE};
