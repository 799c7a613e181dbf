use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::scene::OrbitCamera;

/// World-space ray under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickRay {
    /// Ray start (camera position on the near plane).
    pub origin: Vec3,
    /// Unit ray direction.
    pub direction: Vec3,
}

#[derive(Resource, Default)]
/// Pointer position and the camera ray through it, refreshed every frame.
pub struct PointerRay {
    /// Cursor (or first touch) position in window coordinates.
    pub cursor: Option<Vec2>,
    /// Camera ray through `cursor`.
    pub ray: Option<PickRay>,
    /// Whether the pointer moved since the previous frame.
    pub moved: bool,
}

impl PointerRay {
    /// Store this frame's pointer state and flag movement.
    fn update(&mut self, cursor: Option<Vec2>, ray: Option<PickRay>) {
        self.moved = cursor != self.cursor;
        self.cursor = cursor;
        self.ray = ray;
    }
}

/// Cast the camera ray through the mouse cursor, or the first touch on touch screens.
pub fn pointer_ray_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    camera_query: Query<(&bevy::camera::Camera, &GlobalTransform), With<OrbitCamera>>,
    mut pointer: ResMut<PointerRay>,
) {
    let cursor = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .or_else(|| touches.first_pressed_position());
    let ray = cursor.and_then(|cursor| {
        let (camera, camera_transform) = camera_query.single().ok()?;
        let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
        Some(PickRay {
            origin: ray.origin,
            direction: *ray.direction,
        })
    });
    pointer.update(cursor, ray);
}
