//! Pointer-driven particle field
//!
//! [`ParticleField`] owns a fixed pool of particles and turns raw pointer
//! motion into per-frame instance data. Each frame it projects the latest
//! pointer position onto the z = 0 world plane, derives a velocity from the
//! displacement since the previous frame, spawns a particle once enough
//! pointer travel has accumulated, advances every particle under gravity and
//! writes all transforms and opacities into the render sink.
//!
//! Spawning is round-robin over the pool: the next slot is overwritten
//! whether or not its particle is still alive. That bounds spawn cost to
//! O(1) and keeps the pool at a fixed size, at the cost of occasionally
//! truncating a visible particle under high spawn rates.

use crate::core_types::particle::Particle;
use crate::core_types::vec3::Vec3;
use crate::instancing::InstanceSink;
use crate::projection::{pointer_to_world, Projector, Viewport};
use crate::simulation::settings::TrailSettings;
use tracing::{debug, info};

/// Default particle pool capacity.
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Base spawn impulse per unit delta, before the velocity modifier.
const SPAWN_SPEED: f32 = 0.13;

/// Fixed-capacity particle pool driven by pointer motion.
pub struct ParticleField {
    pool: Vec<Particle>,
    next_spawn_index: usize,
    pointer_position: Vec3,
    position_previous: Vec3,
    position_current: Vec3,
    velocity: Vec3,
    accumulated_travel: f32,
    /// Live-tunable parameters, re-read at the start of every frame. An
    /// external panel may mutate this between frames.
    pub settings: TrailSettings,
    viewport: Viewport,
    projector: Option<Box<dyn Projector>>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE, TrailSettings::default())
    }
}

impl ParticleField {
    /// Create a field with `amount` pooled particles, all initially dead.
    pub fn new(amount: usize, settings: TrailSettings) -> Self {
        info!(
            "Trail field initialized: pool={}, spawn_distance={:.2}",
            amount, settings.spawn_distance
        );
        ParticleField {
            pool: vec![Particle::default(); amount],
            next_spawn_index: 0,
            pointer_position: Vec3::zeros(),
            position_previous: Vec3::zeros(),
            position_current: Vec3::zeros(),
            velocity: Vec3::zeros(),
            accumulated_travel: 0.0,
            settings,
            viewport: Viewport::default(),
            projector: None,
        }
    }

    /// Inject the camera collaborator. Until this is called the field skips
    /// pointer projection and spawning, which is the expected state during
    /// startup.
    pub fn set_projector(&mut self, projector: Box<dyn Projector>) {
        self.projector = Some(projector);
    }

    pub fn has_projector(&self) -> bool {
        self.projector.is_some()
    }

    /// Record the latest raw pointer position in screen pixels. Only the
    /// most recent value matters; there is no buffering.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_position.x = x;
        self.pointer_position.y = y;
    }

    /// Update the viewport dimensions. Must be called on every window
    /// resize, before the next frame's pointer projection.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Advance the whole field by one frame and write every pool slot into
    /// the sink. `delta` is the clock-provided frame delta; all physics is
    /// scaled by it.
    pub fn update(&mut self, delta: f32, sink: &mut dyn InstanceSink) {
        self.update_pointer_target();
        self.update_velocity();
        self.maybe_spawn(delta);
        self.advance_all(delta, sink);
    }

    /// Re-project the pointer onto the world plane, shifting the previous
    /// frame's position down. No-op while the camera collaborator is absent
    /// or the pointer ray misses the plane.
    fn update_pointer_target(&mut self) {
        let Some(projector) = &self.projector else {
            return;
        };
        if let Some(world) = pointer_to_world(self.pointer_position, self.viewport, projector.as_ref())
        {
            self.position_previous = self.position_current;
            self.position_current = world;
        }
    }

    /// Raw world-space displacement since the previous frame. Deliberately
    /// not normalized by delta; the spawn impulse tuning assumes
    /// displacement, not a rate.
    fn update_velocity(&mut self) {
        self.velocity = self.position_current - self.position_previous;
    }

    /// Accumulate pointer travel and spawn one particle each time it
    /// crosses the spawn distance. Gating on distance rather than elapsed
    /// time makes fast motion lay particles more densely along its path at
    /// any frame rate.
    fn maybe_spawn(&mut self, delta: f32) {
        self.accumulated_travel += (self.position_current - self.position_previous).norm();
        if self.accumulated_travel > self.settings.spawn_distance {
            self.spawn(delta);
            self.accumulated_travel = 0.0;
        }
    }

    fn spawn(&mut self, delta: f32) {
        if self.projector.is_none() || self.pool.is_empty() {
            return;
        }

        let normalized = self
            .velocity
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        let initial_velocity =
            normalized * delta * SPAWN_SPEED * self.settings.velocity_modifier;

        let index = self.next_spawn_index;
        self.next_spawn_index = (self.next_spawn_index + 1) % self.pool.len();

        // Tilt away from the travel direction: a fixed pitch plus a yaw that
        // follows the horizontal component of the motion
        let direction = Vec3::new(-normalized.norm() * 0.5, normalized.x, 0.0);

        let particle = &mut self.pool[index];
        particle.setup(initial_velocity);
        particle.position = self.position_current;
        particle.apply_rotation_envelope(direction);

        debug!(
            "Spawned particle {} at ({:.2}, {:.2}, {:.2})",
            index, self.position_current.x, self.position_current.y, self.position_current.z
        );
    }

    /// Push the frame's settings into every particle, apply gravity, advance
    /// physics and emit transform + opacity for every pool slot.
    fn advance_all(&mut self, delta: f32, sink: &mut dyn InstanceSink) {
        let gravity =
            Vec3::new(self.settings.gravity.x, -self.settings.gravity.y, 0.0) * delta * 3.0;

        for (index, particle) in self.pool.iter_mut().enumerate() {
            particle.die_speed = self.settings.die_speed;
            particle.opacity_range = self.settings.opacity_range;
            particle.z_range = self.settings.z_range;
            particle.max_z = self.settings.max_z;

            particle.apply_force(gravity);
            particle.update(delta);

            sink.write_instance(index, &particle.transform(), particle.opacity());
        }
    }

    /// The particle pool, in slot order. Fixed size for the field's life.
    pub fn pool(&self) -> &[Particle] {
        &self.pool
    }

    /// Pool slot the next spawn will overwrite.
    pub fn next_spawn_index(&self) -> usize {
        self.next_spawn_index
    }

    /// World-space pointer displacement measured this frame.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Current projected pointer position on the world plane.
    pub fn pointer_world_position(&self) -> Vec3 {
        self.position_current
    }

    /// Pointer travel accumulated toward the next spawn.
    pub fn accumulated_travel(&self) -> f32 {
        self.accumulated_travel
    }

    /// Number of currently live particles.
    pub fn live_count(&self) -> usize {
        self.pool.iter().filter(|p| !p.is_dead()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instancing::InstanceBuffer;

    #[test]
    fn test_pool_size_is_fixed() {
        let field = ParticleField::new(25, TrailSettings::default());
        assert_eq!(field.pool().len(), 25);
        assert_eq!(field.live_count(), 0);
    }

    #[test]
    fn test_update_without_projector_is_quiescent() {
        let mut field = ParticleField::default();
        let mut buffer = InstanceBuffer::new(DEFAULT_POOL_SIZE);

        field.pointer_moved(640.0, 360.0);
        for _ in 0..10 {
            field.update(1.0, &mut buffer);
        }

        // No projection, no travel, no spawns; particles stay dead but the
        // sink still receives all pool slots
        assert_eq!(field.live_count(), 0);
        assert_eq!(field.next_spawn_index(), 0);
        assert_eq!(field.velocity(), Vec3::zeros());
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_settings_resync_every_frame() {
        let mut field = ParticleField::new(3, TrailSettings::default());
        let mut buffer = InstanceBuffer::new(3);

        field.settings.die_speed = 0.07;
        field.settings.max_z = 5.0;
        field.update(1.0, &mut buffer);

        for particle in field.pool() {
            assert_eq!(particle.die_speed, 0.07);
            assert_eq!(particle.max_z, 5.0);
        }
    }
}
