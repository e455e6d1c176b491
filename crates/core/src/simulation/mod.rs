//! Field-level orchestration: the settings surface and the particle field.

pub mod settings;
pub mod trail_field;

pub use settings::{SettingsError, TrailSettings};
pub use trail_field::{ParticleField, DEFAULT_POOL_SIZE};
