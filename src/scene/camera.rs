use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::scene::OrbitCamera;

/// Pixels per scroll line on devices that report pixel deltas.
const PIXELS_PER_LINE: f32 = 16.0;

/// Orbit on right-drag, zoom on scroll.
pub fn orbit_camera_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    let scroll = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    for (mut transform, mut camera) in &mut query {
        if buttons.pressed(MouseButton::Right) {
            camera.apply_drag(mouse_motion.delta);
        }
        if scroll != 0.0 {
            camera.apply_zoom(scroll);
        }
        *transform = camera.transform();
    }
}
