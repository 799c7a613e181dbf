use bevy::prelude::*;

use crate::sandbox::orientation::Orientation;

/// Key lattice steps per world unit.
const KEY_STEPS_PER_UNIT: f32 = 256.0;
/// Largest key magnitude on any axis; keeps key arithmetic clear of `i32` overflow.
const MAX_KEY_STEP: f32 = (1 << 30) as f32;

/// Exact integer identity of a grid-aligned position.
///
/// Positions are quantized once, when a block or face is created, so lookups
/// never compare floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey(pub IVec3);

impl CellKey {
    /// Quantize a world position onto the key lattice.
    ///
    /// Returns `None` for non-finite positions and positions too far out for
    /// the lattice, instead of letting distinct cells collapse onto one key.
    pub fn from_position(position: Vec3) -> Option<Self> {
        let scaled = (position * KEY_STEPS_PER_UNIT).round();
        (scaled.is_finite() && scaled.abs().max_element() <= MAX_KEY_STEP)
            .then(|| Self(scaled.as_ivec3()))
    }

    /// World position this key stands for.
    pub fn to_position(self) -> Vec3 {
        self.0.as_vec3() / KEY_STEPS_PER_UNIT
    }
}

/// Position of the block that would be spawned against a clicked face.
pub fn resolve_spawn_position(hit_face: Vec3, orientation: Orientation, grid_size: f32) -> Vec3 {
    hit_face + orientation.block_offset_from_hit_face(grid_size)
}

/// Position of the block that generated a clicked face.
///
/// Spawn addressing from the other side of the face.
pub fn resolve_destroy_position(
    hit_face: Vec3,
    orientation: Orientation,
    grid_size: f32,
) -> Vec3 {
    resolve_spawn_position(hit_face, orientation.opposite(), grid_size)
}
