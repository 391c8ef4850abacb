//! Body Tests - Integration, Interpolation and Intersection
//!
//! Kernel-level properties of a single body: forward-Euler integration,
//! blend endpoints, self-exclusion and the unit test volumes.

use glam::{Mat4, Vec3};
use proptest::prelude::*;
use rasengan_engine::physics::{BodyTag, BodyTemplate, ColliderSet, IntersectTest};
use rasengan_engine::render::{BodyInstance, instance_bytes};

fn vec3_in(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec3> {
    (range.clone(), range.clone(), range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

// ============================================================================
// Integration (forward Euler)
// ============================================================================

proptest! {
    #[test]
    fn test_constant_velocity_integrates_linearly(
        start in vec3_in(-50.0..50.0),
        velocity in vec3_in(-10.0..10.0),
        dt in 0.001f32..0.1,
        steps in 0usize..200,
    ) {
        let mut body = BodyTemplate::new(BodyTag::Projectile, Vec3::ONE)
            .emplace(Mat4::from_translation(start), velocity, 0.0);

        for _ in 0..steps {
            body.advance(dt);
        }

        let expected = start + velocity * (steps as f32 * dt);
        let tolerance = 1e-3 * (1.0 + expected.length());
        prop_assert!(
            (body.center - expected).length() <= tolerance,
            "center {} expected {}", body.center, expected
        );
        prop_assert_eq!(body.rotation, glam::Mat3::IDENTITY);
    }

    // ========================================================================
    // Interpolation boundary
    // ========================================================================

    #[test]
    fn test_blend_endpoints_are_exact(
        start in vec3_in(-50.0..50.0),
        velocity in vec3_in(-10.0..10.0),
        size in vec3_in(0.1..5.0),
        spin in -3.0f32..3.0,
        axis in vec3_in(-1.0..1.0),
        dt in 0.01f32..0.1,
    ) {
        let mut body = BodyTemplate::new(BodyTag::MovingWall, size)
            .emplace(Mat4::from_translation(start), velocity, spin)
            .with_spin_axis(axis);
        body.advance(dt);

        let previous = body.previous().to_matrix() * Mat4::from_scale(size);
        let current = body.pose().to_matrix() * Mat4::from_scale(size);

        prop_assert_eq!(body.blend(0.0), previous);
        prop_assert_eq!(body.drawn_location(), previous);
        prop_assert_eq!(body.blend(1.0), current);
        prop_assert_eq!(body.drawn_location(), current);
    }
}

#[test]
fn test_blend_halfway_between_poses() {
    let mut body = BodyTemplate::new(BodyTag::Projectile, Vec3::ONE)
        .emplace(Mat4::IDENTITY, Vec3::new(4.0, 0.0, 0.0), 0.0);
    body.advance(0.5);

    let drawn = body.blend(0.5);
    assert!((drawn.w_axis.truncate() - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
}

// ============================================================================
// Self-exclusion
// ============================================================================

#[test]
fn test_body_never_intersects_itself() {
    let mut colliders = ColliderSet::standard();
    let body = BodyTemplate::new(BodyTag::Character, Vec3::new(0.5, 0.1, 1.0))
        .emplace(Mat4::IDENTITY, Vec3::ZERO, 0.0);

    for index in 0..colliders.len() {
        colliders.select(index).unwrap();
        assert!(
            !body.intersects(&body, colliders.active()),
            "collider {index} reported a self-intersection"
        );
    }
}

#[test]
fn test_identical_copy_does_intersect() {
    let colliders = ColliderSet::standard();
    let body = BodyTemplate::new(BodyTag::StaticWall, Vec3::new(1.0, 5.0, 1.0))
        .emplace(Mat4::IDENTITY, Vec3::ZERO, 0.0);
    let twin = body.clone();

    assert!(body.intersects(&twin, colliders.active()));
}

// ============================================================================
// Test volumes
// ============================================================================

#[test]
fn test_sphere_containment_boundary() {
    let sphere = IntersectTest::Sphere;
    assert!(sphere.contains(Vec3::ZERO, 0.0));
    assert!(!sphere.contains(Vec3::X, 0.0));
    assert!(!sphere.contains(Vec3::NEG_Y, 0.0));
    assert!(sphere.contains(Vec3::X, 1e-4));
    assert!(sphere.contains(Vec3::NEG_Z, 0.5));
}

#[test]
fn test_cube_containment_boundary() {
    let cube = IntersectTest::Cube;
    assert!(cube.contains(Vec3::ONE, 0.0));
    assert!(!cube.contains(Vec3::new(1.01, 0.0, 0.0), 0.0));
    assert!(cube.contains(Vec3::new(1.05, -1.05, 0.0), 0.1));
}

// ============================================================================
// Instance records (must stay 80 bytes for the renderer)
// ============================================================================

#[test]
fn test_body_instance_layout() {
    assert_eq!(std::mem::size_of::<BodyInstance>(), 80);

    let body = BodyTemplate::new(BodyTag::Ground, Vec3::ONE)
        .emplace(Mat4::from_translation(Vec3::new(0.0, -3.5, 0.0)), Vec3::ZERO, 0.0);
    let instances = [BodyInstance::from_body(&body), BodyInstance::from_body(&body)];

    assert_eq!(instance_bytes(&instances).len(), 160);
    assert_eq!(instances[0].tag, BodyTag::Ground.code());
}
