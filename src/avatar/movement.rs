use bevy::prelude::*;

use crate::avatar::components::{Avatar, AvatarPart};
use crate::sandbox::{HoveredFace, PointerRay};
use crate::{AVATAR_WALK_SPEED, FLOOR_Y, SANDBOX_SIZE, WALK_ANIM_SPEED, WALK_SWING_MAX};

/// Build the ground-plane walk direction from keys, relative to the body's facing.
pub(crate) fn walk_direction(input: &ButtonInput<KeyCode>, body_rotation: Quat) -> Vec3 {
    let forward = body_rotation * Vec3::Z;
    // The avatar faces +Z, so its right hand points to -X.
    let right = body_rotation * Vec3::NEG_X;
    let mut direction = Vec3::ZERO;
    if input.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction += forward;
    }
    if input.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction -= forward;
    }
    if input.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction -= right;
    }
    if input.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction += right;
    }
    direction.y = 0.0;
    direction.normalize_or_zero()
}

/// Keep a ground position inside the square sandbox of edge `size`.
pub(crate) fn clamp_to_sandbox(position: Vec3, size: f32) -> Vec3 {
    let half = size / 2.0;
    Vec3::new(
        position.x.clamp(-half, half),
        position.y,
        position.z.clamp(-half, half),
    )
}

/// Point where a ray meets the horizontal plane at height `y`, ahead of the origin.
pub(crate) fn ray_plane_point(origin: Vec3, direction: Vec3, y: f32) -> Option<Vec3> {
    if direction.y.abs() <= f32::EPSILON {
        return None;
    }
    let t = (y - origin.y) / direction.y;
    (t > 0.0).then(|| origin + direction * t)
}

/// Turn the head toward the cursor when the pointer moves; the body follows every frame.
pub fn avatar_facing_system(
    pointer: Res<PointerRay>,
    hovered: Res<HoveredFace>,
    mut query: Query<(&Transform, &mut Avatar)>,
) {
    // Prefer the hovered face, fall back to the floor plane under the cursor.
    let target = if pointer.moved {
        hovered.0.map(|hit| hit.position).or_else(|| {
            pointer
                .ray
                .and_then(|ray| ray_plane_point(ray.origin, ray.direction, FLOOR_Y))
        })
    } else {
        None
    };
    for (transform, mut avatar) in &mut query {
        if let Some(target) = target {
            avatar.aim_head(transform.translation, target);
        }
        avatar.turn_body();
    }
}

/// Walk on WASD or arrow keys and drive the limb swing.
pub fn avatar_walk_system(
    time: Res<Time>,
    input: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut Transform, &mut Avatar)>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut avatar) in &mut query {
        let direction = walk_direction(&input, avatar.body_rotation());
        if direction == Vec3::ZERO {
            avatar.walk.relax(WALK_ANIM_SPEED);
            continue;
        }
        let next = transform.translation + direction * AVATAR_WALK_SPEED * dt;
        transform.translation = clamp_to_sandbox(next, SANDBOX_SIZE);
        avatar.walk.advance(WALK_ANIM_SPEED, WALK_SWING_MAX);
    }
}

/// Apply body yaw to the root and head turn and limb swing to the part pivots.
pub fn avatar_pose_system(
    mut avatar_query: Query<(&Avatar, &mut Transform)>,
    mut part_query: Query<(&AvatarPart, &ChildOf, &mut Transform), Without<Avatar>>,
) {
    for (avatar, mut transform) in &mut avatar_query {
        transform.rotation = avatar.body_rotation();
    }
    for (part, child_of, mut transform) in &mut part_query {
        if let Ok((avatar, _)) = avatar_query.get(child_of.parent()) {
            transform.rotation = part.pose(avatar);
        }
    }
}
