//! Distance-gated spawning and round-robin pool recycling
//!
//! Drives a small field with a planar test projector so pointer pixels map
//! 1:1 onto world units, making travel distances exact.

use trail_sim_core::{InstanceBuffer, ParticleField, Projector, TrailSettings, Vec3};

/// Test camera: NDC maps straight onto the z = 0 plane, scaled to 100 world
/// units per NDC unit. With a 200x200 viewport a pointer pixel is exactly
/// one world unit.
struct PlanarProjector;

impl Projector for PlanarProjector {
    fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, 10.0)
    }

    fn unproject(&self, ndc: Vec3) -> Vec3 {
        Vec3::new(ndc.x * 100.0, ndc.y * 100.0, 0.0)
    }
}

fn planar_field(amount: usize) -> (ParticleField, InstanceBuffer) {
    let mut field = ParticleField::new(amount, TrailSettings::default());
    field.set_projector(Box::new(PlanarProjector));
    field.resize(200.0, 200.0);
    // Settle the pointer target at the world origin
    field.pointer_moved(100.0, 100.0);
    let mut buffer = InstanceBuffer::new(amount);
    field.update(1.0, &mut buffer);
    assert_eq!(field.live_count(), 0);
    (field, buffer)
}

#[test]
fn test_spawn_gates_on_accumulated_travel() {
    let (mut field, mut buffer) = planar_field(10);

    // Two frames of 1.4995 world units: accumulated travel 2.999, below the
    // spawn distance of 3
    field.pointer_moved(101.4995, 100.0);
    field.update(1.0, &mut buffer);
    field.pointer_moved(102.999, 100.0);
    field.update(1.0, &mut buffer);

    assert_eq!(field.live_count(), 0);
    assert_eq!(field.next_spawn_index(), 0);
    assert!(field.accumulated_travel() < 3.0);

    // 0.0011 more crosses the threshold: exactly one spawn, accumulator
    // resets to zero
    field.pointer_moved(103.0001, 100.0);
    field.update(1.0, &mut buffer);

    assert_eq!(field.live_count(), 1);
    assert_eq!(field.next_spawn_index(), 1);
    assert_eq!(field.accumulated_travel(), 0.0);
}

#[test]
fn test_velocity_is_raw_displacement() {
    let (mut field, mut buffer) = planar_field(10);

    field.pointer_moved(110.0, 100.0);
    field.update(1.0, &mut buffer);

    // 10 pointer pixels map to 10 world units, untouched by delta
    assert!((field.velocity().x - 10.0).abs() < 1e-3);
    assert!(field.velocity().y.abs() < 1e-3);

    field.update(2.0, &mut buffer);
    assert!(field.velocity().norm() < 1e-3, "no motion, no velocity");
}

#[test]
fn test_round_robin_visits_every_slot_then_wraps() {
    let (mut field, mut buffer) = planar_field(4);

    // Each frame moves 4 world units, above the spawn distance, so every
    // update spawns exactly one particle
    let mut x = 100.0;
    for expected_index in 1..=4 {
        x += 4.0;
        field.pointer_moved(x, 100.0);
        field.update(1.0, &mut buffer);
        assert_eq!(field.next_spawn_index(), expected_index % 4);
    }

    assert_eq!(field.pool().len(), 4);
    assert_eq!(field.live_count(), 4);

    // Slots were claimed in order along the pointer path
    let positions: Vec<f32> = field.pool().iter().map(|p| p.position.x).collect();
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1], "spawn order broken: {positions:?}");
    }

    // The fifth spawn wraps around and overwrites slot 0, reviving it with
    // a fresh lifespan while slot 1 has been aging since its spawn
    x += 4.0;
    field.pointer_moved(x, 100.0);
    field.update(1.0, &mut buffer);
    assert_eq!(field.next_spawn_index(), 1);
    assert!(field.pool()[0].lifespan() > field.pool()[1].lifespan());
    assert_eq!(field.pool().len(), 4);
}

#[test]
fn test_slow_travel_accumulates_across_frames() {
    let (mut field, mut buffer) = planar_field(10);

    // 0.49 world units per frame: six steps total 2.94, the seventh pushes
    // the total past the spawn distance
    let mut x = 100.0;
    for _ in 0..6 {
        x += 0.49;
        field.pointer_moved(x, 100.0);
        field.update(1.0, &mut buffer);
    }
    assert_eq!(field.live_count(), 0);

    x += 0.49;
    field.pointer_moved(x, 100.0);
    field.update(1.0, &mut buffer);
    assert_eq!(field.live_count(), 1);
}
