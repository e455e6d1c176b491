//! Pooled trail particle
//!
//! A particle is a plain value type: physical state (position, velocity,
//! accumulated acceleration), a normalized lifespan counter, and the visual
//! state derived from it (opacity, settling rotation). Particles are created
//! once at pool construction and revived in place by [`Particle::setup`];
//! they are never destroyed or reallocated.

use crate::core_types::envelope::{fade_envelope, MinMax};
use crate::core_types::vec3::Vec3;
use nalgebra::{Matrix4, Rotation3, Translation3};
use serde::{Deserialize, Serialize};

/// Per-axis rotation decay rates, scaled by the direction captured at spawn.
const ROTATION_DECAY: [f32; 3] = [0.01, 0.02, 0.02];

/// Sign in {-1, 0, 1}; zero (and NaN) map to 0, unlike `f32::signum`.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// A single pooled particle.
///
/// Physical state is integrated with a split-step (velocity-Verlet style)
/// scheme: half the frame's acceleration is applied to velocity before the
/// position drift and the other half after. Forces accumulated through
/// [`Particle::apply_force`] last for one update only.
///
/// The tunable fields (`die_speed`, `opacity_range`, `z_range`, `max_z`) are
/// owned by the field's settings surface and re-synced into every particle
/// each frame; they are plain public fields rather than constructor state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// World position.
    pub position: Vec3,
    /// Per-frame displacement (not time-normalized).
    pub velocity: Vec3,
    /// Force accumulator, cleared at the end of every update.
    pub acceleration: Vec3,
    /// XYZ Euler angles, decaying toward zero over the particle's life.
    pub rotation: Vec3,
    /// Lifespan decrement rate, injected from field settings.
    pub die_speed: f32,
    /// Opacity envelope range, injected from field settings.
    pub opacity_range: MinMax,
    /// Depth envelope range, injected from field settings.
    pub z_range: MinMax,
    /// Depth envelope amplitude, injected from field settings.
    pub max_z: f32,
    rotation_direction: Vec3,
    lifespan: f32,
    is_dead: bool,
    opacity: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Particle {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            rotation: Vec3::zeros(),
            die_speed: 0.01,
            opacity_range: MinMax::new(0.2, 0.8),
            z_range: MinMax::new(0.2, 0.8),
            max_z: 2.0,
            rotation_direction: Vec3::zeros(),
            lifespan: 1.0,
            is_dead: true,
            opacity: 0.0,
        }
    }
}

impl Particle {
    /// Revive this slot with a fresh state and the given initial velocity.
    ///
    /// Resets all physical state, sets the lifespan back to 1.0 and clears
    /// the dead flag. Calling this on a still-live particle silently
    /// truncates its remaining life; the round-robin spawn policy accepts
    /// that trade for O(1) spawning.
    pub fn setup(&mut self, initial_velocity: Vec3) {
        self.reset();
        self.velocity = initial_velocity;
    }

    fn reset(&mut self) {
        self.acceleration = Vec3::zeros();
        self.velocity = Vec3::zeros();
        self.lifespan = 1.0;
        self.is_dead = false;
    }

    /// Set the orientation from a motion-derived direction vector and record
    /// the per-axis sign the rotation will decay along.
    ///
    /// The sign is captured once here so the settling motion keeps a fixed
    /// direction for the particle's whole life instead of re-deriving it
    /// every frame.
    pub fn apply_rotation_envelope(&mut self, direction: Vec3) {
        self.rotation = direction;
        self.rotation_direction = Vec3::new(
            sign(self.rotation.x),
            sign(self.rotation.y),
            sign(self.rotation.z),
        );
    }

    /// Accumulate a force for the next update. Forces do not persist across
    /// frames; the caller re-applies them every frame.
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Advance physics and visual state by `delta`. No-op on a dead particle.
    pub fn update(&mut self, delta: f32) {
        if self.is_dead {
            return;
        }

        // Half-kick / drift / half-kick: acceleration is constant within the
        // frame, so the symmetric split damps the error of a plain explicit
        // Euler step under per-frame gravity.
        let half_impulse = self.acceleration * (delta * 0.5);
        self.velocity += half_impulse;
        self.position += self.velocity;
        self.velocity += half_impulse;

        self.lifespan -= self.die_speed * delta * 2.0;
        self.is_dead = self.lifespan <= 0.0;
        self.acceleration = Vec3::zeros();

        self.update_opacity();
        self.update_rotation(delta);
    }

    fn update_opacity(&mut self) {
        self.opacity = fade_envelope(self.lifespan, self.opacity_range);
    }

    fn update_rotation(&mut self, delta: f32) {
        self.rotation.x -= ROTATION_DECAY[0] * self.rotation_direction.x * delta;
        self.rotation.y -= ROTATION_DECAY[1] * self.rotation_direction.y * delta;
        self.rotation.z -= ROTATION_DECAY[2] * self.rotation_direction.z * delta;
    }

    /// Depth offset derived from the lifespan and the `z_range`/`max_z`
    /// tunables, for sinks that displace billboards toward the camera over
    /// a particle's life. Same two-ramp shape as the opacity envelope.
    pub fn depth_offset(&self) -> f32 {
        fade_envelope(self.lifespan, self.z_range) * self.max_z
    }

    /// Compose position and rotation into a world transform (unit scale).
    pub fn transform(&self) -> Matrix4<f32> {
        let rotation = Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Translation3::from(self.position).to_homogeneous() * rotation.to_homogeneous()
    }

    /// Normalized remaining life, 1.0 at spawn down to 0.0 at death.
    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    /// A particle is dead once its lifespan reaches zero, and stays dead
    /// until the next [`Particle::setup`].
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Current opacity in `[0, 1]`, derived from the lifespan envelope.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}
