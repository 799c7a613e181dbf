use bevy::prelude::*;

mod camera;
mod setup;

pub use camera::orbit_camera_system;
pub use setup::setup_scene;

/// Orbit controller: the camera circles `target` at `distance`.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Yaw around the target in radians.
    pub yaw: f32,
    /// Elevation above the target's horizon in radians.
    pub pitch: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Radians per pixel of drag.
    pub sensitivity: f32,
    /// Distance change per scroll line.
    pub zoom_step: f32,
}

impl OrbitCamera {
    /// Lowest elevation; keeps the camera above the floor.
    const PITCH_MIN: f32 = 0.05;
    /// Highest elevation; stops short of straight down.
    const PITCH_MAX: f32 = 1.5;
    /// Closest zoom.
    const DISTANCE_MIN: f32 = 6.0;
    /// Farthest zoom.
    const DISTANCE_MAX: f32 = 120.0;

    /// Build an orbit controller around `target`.
    pub fn new(yaw: f32, pitch: f32, distance: f32, target: Vec3) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(Self::PITCH_MIN, Self::PITCH_MAX),
            distance: distance.clamp(Self::DISTANCE_MIN, Self::DISTANCE_MAX),
            target,
            sensitivity: 0.005,
            zoom_step: 2.0,
        }
    }

    /// Rotate around the target from a drag delta in pixels.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(Self::PITCH_MIN, Self::PITCH_MAX);
    }

    /// Move toward (positive) or away from (negative) the target.
    pub fn apply_zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance - scroll * self.zoom_step).clamp(Self::DISTANCE_MIN, Self::DISTANCE_MAX);
    }

    /// Camera pose for the current angles.
    pub fn transform(&self) -> Transform {
        let offset = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0) * Vec3::Z;
        Transform::from_translation(self.target + offset * self.distance)
            .looking_at(self.target, Vec3::Y)
    }
}
