use bevy::prelude::*;

use crate::sandbox::orientation::Orientation;
use crate::sandbox::pool::{BlockPool, CollisionFace, ProxyId};

/// Nearest proxy struck by a pointer ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyHit {
    /// Registry id of the struck proxy.
    pub proxy: ProxyId,
    /// World position of the proxy plane centre.
    pub position: Vec3,
    /// Orientation tag of the proxy.
    pub orientation: Orientation,
    /// World rotation of the proxy plane.
    pub rotation: Quat,
    /// Ray parameter of the intersection.
    pub distance: f32,
}

/// Intersect a ray with one square proxy plane of side `grid_size`.
///
/// Planes are one-sided: a ray arriving from behind the face misses.
fn intersect_face(origin: Vec3, direction: Vec3, face: &CollisionFace, grid_size: f32) -> Option<f32> {
    let normal = face.orientation.normal();
    let facing = direction.dot(normal);
    if facing >= 0.0 {
        return None;
    }
    let distance = (face.position - origin).dot(normal) / facing;
    if distance < 0.0 {
        return None;
    }
    let local = origin + direction * distance - face.position;
    let rotation = face.rotation();
    let half = grid_size / 2.0;
    let u = local.dot(rotation * Vec3::X);
    let v = local.dot(rotation * Vec3::Y);
    (u.abs() <= half && v.abs() <= half).then_some(distance)
}

/// Nearest front-facing proxy hit along a ray, or `None` when the ray hits nothing.
///
/// Equal distances keep the proxy registered first.
pub fn raycast_proxies(pool: &BlockPool, origin: Vec3, direction: Vec3) -> Option<ProxyHit> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }
    let grid_size = pool.grid_size();
    let mut nearest: Option<ProxyHit> = None;
    for (id, face) in pool.proxies() {
        let Some(distance) = intersect_face(origin, direction, face, grid_size) else {
            continue;
        };
        if nearest.is_some_and(|hit| hit.distance <= distance) {
            continue;
        }
        nearest = Some(ProxyHit {
            proxy: id,
            position: face.position,
            orientation: face.orientation,
            rotation: face.rotation(),
            distance,
        });
    }
    nearest
}
