mod components;
mod movement;

pub use components::{Avatar, AvatarPart};
pub use movement::{avatar_facing_system, avatar_pose_system, avatar_walk_system};
