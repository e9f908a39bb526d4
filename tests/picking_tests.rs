//! Picking Engine Tests
//!
//! Tests for:
//! - BoundingBox slab intersection
//! - Screen-point unprojection into world rays
//! - pick(): nearest-first selection, registry-order ties, misses,
//!   transformed objects

use glam::{Mat4, Quat, Vec2, Vec3};
use loam::picking::{BoundingBox, PickTarget, Ray, pick, pick_hit};
use loam::Viewport;

const NEAR: f32 = 0.1;

fn camera_at(position: Vec3, target: Vec3) -> Mat4 {
    Mat4::look_at_rh(position, target, Vec3::Y)
}

fn projection() -> Mat4 {
    Mat4::perspective_rh(45f32.to_radians(), 1.0, NEAR, 100.0)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 800.0)
}

fn center() -> Vec2 {
    Vec2::new(400.0, 400.0)
}

// ============================================================================
// BoundingBox
// ============================================================================

#[test]
fn ray_hits_box_head_on() {
    let bounds = BoundingBox::unit();
    let t = bounds
        .intersect_ray(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
        .unwrap();
    assert!((t - 9.5).abs() < 1e-5);
}

#[test]
fn ray_misses_box_to_the_side() {
    let bounds = BoundingBox::unit();
    assert!(bounds
        .intersect_ray(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z)
        .is_none());
}

#[test]
fn ray_pointing_away_misses() {
    let bounds = BoundingBox::unit();
    assert!(bounds
        .intersect_ray(Vec3::new(0.0, 0.0, 10.0), Vec3::Z)
        .is_none());
}

#[test]
fn ray_starting_inside_hits_at_zero() {
    let bounds = BoundingBox::unit();
    let t = bounds.intersect_ray(Vec3::ZERO, Vec3::X).unwrap();
    assert_eq!(t, 0.0);
}

#[test]
fn axis_parallel_ray_respects_slab_bounds() {
    let bounds = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
    // Grazing along x at y = 0, z = 0: inside the y/z slabs.
    assert!(bounds.intersect_ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).is_some());
    // Outside the y slab entirely.
    assert!(bounds.intersect_ray(Vec3::new(-5.0, 3.0, 0.0), Vec3::X).is_none());
}

// ============================================================================
// Unprojection
// ============================================================================

#[test]
fn center_ray_points_down_the_view_axis() {
    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let ray = Ray::from_screen(center(), &viewport(), view, projection());

    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    // Origin sits on the near plane, not at the eye.
    assert!((ray.origin.z - (10.0 - NEAR)).abs() < 1e-3);
    assert!(ray.origin.x.abs() < 1e-3);
}

#[test]
fn screen_right_maps_to_world_positive_x() {
    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let ray = Ray::from_screen(Vec2::new(600.0, 400.0), &viewport(), view, projection());
    assert!(ray.direction.x > 0.1);
}

// ============================================================================
// pick()
// ============================================================================

#[test]
fn pick_returns_object_under_cursor_with_surface_distance() {
    let bounds = [BoundingBox::unit()];
    let targets = vec![PickTarget {
        id: 1,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    }];

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let hit = pick_hit(center(), &viewport(), view, projection(), targets).unwrap();

    assert_eq!(hit.id, 1);
    // Near plane to the front face: 10 - 0.1 - 0.5.
    assert!((hit.distance - 9.4).abs() < 1e-2);
}

#[test]
fn pick_with_nothing_in_the_path_returns_none() {
    let bounds = [BoundingBox::unit()];
    let targets = vec![PickTarget {
        id: 1,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    }];

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let selected = pick(Vec2::new(5.0, 5.0), &viewport(), view, projection(), targets);
    assert_eq!(selected, None);
}

#[test]
fn pick_prefers_the_nearest_object() {
    let bounds = [BoundingBox::unit()];
    let far = PickTarget {
        id: 1,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    };
    let near = PickTarget {
        id: 2,
        world: Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)),
        bounds: &bounds,
    };

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let selected = pick(center(), &viewport(), view, projection(), vec![far, near]);
    assert_eq!(selected, Some(2));
}

#[test]
fn pick_tie_keeps_first_in_registry_order() {
    let bounds = [BoundingBox::unit()];
    let first = PickTarget {
        id: 7,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    };
    let second = PickTarget {
        id: 3,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    };

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let selected = pick(center(), &viewport(), view, projection(), vec![first, second]);
    assert_eq!(selected, Some(7));
}

#[test]
fn pick_accounts_for_object_scale() {
    let bounds = [BoundingBox::unit()];
    let targets = vec![PickTarget {
        id: 1,
        world: Mat4::from_scale(Vec3::splat(2.0)),
        bounds: &bounds,
    }];

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let hit = pick_hit(center(), &viewport(), view, projection(), targets).unwrap();

    // Scaled to 2, the front face sits at z = 1: 10 - 0.1 - 1.
    assert!((hit.distance - 8.9).abs() < 1e-2);
}

#[test]
fn pick_accounts_for_object_rotation_and_translation() {
    let bounds = [BoundingBox::unit()];
    let world = Mat4::from_rotation_translation(
        Quat::from_rotation_y(45f32.to_radians()),
        Vec3::new(3.0, 0.0, 0.0),
    );
    let targets = vec![PickTarget {
        id: 9,
        world,
        bounds: &bounds,
    }];

    // Look straight at the object's new position.
    let view = camera_at(Vec3::new(3.0, 0.0, 10.0), Vec3::new(3.0, 0.0, 0.0));
    let selected = pick(center(), &viewport(), view, projection(), targets);
    assert_eq!(selected, Some(9));
}

#[test]
fn pick_scans_every_submesh() {
    // Two disjoint boxes; only the offset one is under the ray.
    let bounds = [
        BoundingBox::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(11.0, 11.0, 11.0)),
        BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
    ];
    let targets = vec![PickTarget {
        id: 4,
        world: Mat4::IDENTITY,
        bounds: &bounds,
    }];

    let view = camera_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let selected = pick(center(), &viewport(), view, projection(), targets);
    assert_eq!(selected, Some(4));
}
