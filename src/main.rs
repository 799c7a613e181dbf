use bevy::prelude::*;

mod avatar;
mod sandbox;
mod scene;

use avatar::{avatar_facing_system, avatar_pose_system, avatar_walk_system};
use sandbox::{
    block_interaction_system, block_texture_loading_system, highlighter_system,
    pointer_ray_system, scene_sync_system, template_hotkey_system,
};
use scene::{orbit_camera_system, setup_scene};

// Edge length of one block and spacing of the placement lattice, in world units.
const GRID_SIZE: f32 = 2.0;
// Edge length of the square sandbox floor.
const SANDBOX_SIZE: f32 = 40.0;
// Height of the floor plane.
const FLOOR_Y: f32 = -2.0;
// Placeable block types: name, texture, and the flat colour drawn when the
// texture is missing. The first one starts selected.
const BLOCK_TYPES: [(&str, &str, Color); 4] = [
    ("dirt", "textures/dirt.png", Color::srgb(0.45, 0.31, 0.20)),
    ("grass", "textures/grass.png", Color::srgb(0.33, 0.62, 0.25)),
    ("stone", "textures/stone.png", Color::srgb(0.52, 0.52, 0.54)),
    ("sand", "textures/sand.png", Color::srgb(0.86, 0.80, 0.55)),
];
// Initial orbit camera yaw.
const CAMERA_INITIAL_YAW: f32 = 0.6;
// Initial orbit camera elevation.
const CAMERA_INITIAL_PITCH: f32 = 0.7;
// Initial orbit camera distance from the sandbox centre.
const CAMERA_INITIAL_DISTANCE: f32 = 36.0;
// Where the avatar's feet start.
const AVATAR_SPAWN: Vec3 = Vec3::new(-4.0, FLOOR_Y, 4.0);
// Avatar walking speed in units per second.
const AVATAR_WALK_SPEED: f32 = 4.0;
// Limb swing change per frame.
const WALK_ANIM_SPEED: f32 = 0.02;
// Largest limb swing in radians.
const WALK_SWING_MAX: f32 = 0.6;

// App entry point and system registration.
fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                block_texture_loading_system,
                (
                    orbit_camera_system,
                    pointer_ray_system,
                    block_interaction_system,
                    template_hotkey_system,
                    scene_sync_system,
                    highlighter_system,
                    avatar_facing_system,
                    avatar_walk_system,
                    avatar_pose_system,
                )
                    .chain(),
            ),
        )
        .run();
}
