//! Mouse picking
//!
//! Resolves a screen-space point plus the active camera matrices into the
//! scene object struck nearest to the viewer. A world-space ray is built by
//! unprojecting the point at the near and far depth planes; each candidate's
//! sub-mesh bounding boxes are tested in the object's local space and the
//! winning hit is the minimum positive world-space distance. Ties keep the
//! first candidate encountered, so iteration order (registry order) is part
//! of the contract.
//!
//! The scan is O(objects × submeshes) per pick, which is fine at editor
//! scale; a spatial index could slot in front of [`pick`] if scenes grow.

use glam::{Mat4, Vec2, Vec3};
use smallvec::SmallVec;

use crate::camera::Viewport;
use crate::scene::ObjectId;

/// Axis-aligned bounding box in the owning mesh's local space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A unit cube centered on the origin.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab test. Returns the distance along `direction` to the entry point,
    /// or 0.0 when the origin is already inside. `direction` need not be
    /// normalized; the result is in units of its length.
    #[must_use]
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let inv = direction.recip();
        let t_a = (self.min - origin) * inv;
        let t_b = (self.max - origin) * inv;

        let t_min = t_a.min(t_b).max_element();
        let t_max = t_a.max(t_b).min_element();

        if t_max >= t_min.max(0.0) {
            Some(t_min.max(0.0))
        } else {
            None
        }
    }
}

/// A picking ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Unprojects a window-client point through the camera into a
    /// world-space ray from the near plane towards the far plane.
    ///
    /// Depth follows the wgpu convention: 0 at the near plane, 1 at the far
    /// plane.
    #[must_use]
    pub fn from_screen(screen: Vec2, viewport: &Viewport, view: Mat4, projection: Mat4) -> Self {
        let inverse_vp = (projection * view).inverse();
        let near = unproject(inverse_vp, viewport.to_ndc(screen, 0.0));
        let far = unproject(inverse_vp, viewport.to_ndc(screen, 1.0));

        Self {
            origin: near,
            direction: (far - near).normalize_or(Vec3::NEG_Z),
        }
    }

    /// Maps the ray through a matrix. The direction is re-normalized so
    /// intersection distances stay in the target space's units.
    #[must_use]
    pub fn transformed(&self, matrix: Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction).normalize_or(Vec3::NEG_Z),
        }
    }
}

fn unproject(inverse_vp: Mat4, ndc: Vec3) -> Vec3 {
    let h = inverse_vp * ndc.extend(1.0);
    h.truncate() / h.w
}

/// Sub-mesh bounds for one object; nearly always a handful of boxes.
pub type SubMeshBounds = SmallVec<[BoundingBox; 4]>;

/// One pick candidate.
#[derive(Debug, Clone, Copy)]
pub struct PickTarget<'a> {
    pub id: ObjectId,
    /// Local-to-world matrix (scale, then rotation, then translation)
    pub world: Mat4,
    /// Sub-mesh bounding boxes in local space
    pub bounds: &'a [BoundingBox],
}

/// A resolved pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: ObjectId,
    /// World-space distance from the near-plane point to the struck surface
    pub distance: f32,
}

/// Scans the candidates and returns the nearest hit, if any.
pub fn pick_hit<'a>(
    screen: Vec2,
    viewport: &Viewport,
    view: Mat4,
    projection: Mat4,
    targets: impl IntoIterator<Item = PickTarget<'a>>,
) -> Option<PickHit> {
    let ray = Ray::from_screen(screen, viewport, view, projection);
    let mut nearest: Option<PickHit> = None;

    for target in targets {
        let inverse_world = target.world.inverse();
        let local_ray = ray.transformed(inverse_world);

        for bounds in target.bounds {
            let Some(t_local) = bounds.intersect_ray(local_ray.origin, local_ray.direction) else {
                continue;
            };

            // Local distances are not comparable across differently scaled
            // objects; map the hit back to world space before ranking.
            let hit_local = local_ray.origin + local_ray.direction * t_local;
            let hit_world = target.world.transform_point3(hit_local);
            let distance = (hit_world - ray.origin).length();

            let closer = nearest.is_none_or(|best| distance < best.distance);
            if closer {
                nearest = Some(PickHit {
                    id: target.id,
                    distance,
                });
            }
        }
    }

    nearest
}

/// As [`pick_hit`], returning only the selected id — the editor's contract.
pub fn pick<'a>(
    screen: Vec2,
    viewport: &Viewport,
    view: Mat4,
    projection: Mat4,
    targets: impl IntoIterator<Item = PickTarget<'a>>,
) -> Option<ObjectId> {
    pick_hit(screen, viewport, view, projection, targets).map(|hit| hit.id)
}
