use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;

/// Cube-face direction carried by every collision-face proxy.
///
/// Discriminants are the face indices used for the opposite-face rule, so the
/// declaration order matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Upward face (+Y).
    Top = 0,
    /// Face pointing along +X.
    Left = 1,
    /// Face pointing along +Z.
    Front = 2,
    /// Downward face (-Y).
    Bottom = 3,
    /// Face pointing along -X.
    Right = 4,
    /// Face pointing along -Z.
    Back = 5,
}

impl Orientation {
    /// All orientations in index order.
    pub const ALL: [Orientation; 6] = [
        Orientation::Top,
        Orientation::Left,
        Orientation::Front,
        Orientation::Bottom,
        Orientation::Right,
        Orientation::Back,
    ];

    /// Face index in `0..6`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an orientation by face index, wrapping modulo 6.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Face on the other side of the cube: `(index + 3) mod 6`.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Unit normal the face plane looks along.
    pub const fn normal(self) -> Vec3 {
        match self {
            Orientation::Top => Vec3::Y,
            Orientation::Left => Vec3::X,
            Orientation::Front => Vec3::Z,
            Orientation::Bottom => Vec3::NEG_Y,
            Orientation::Right => Vec3::NEG_X,
            Orientation::Back => Vec3::NEG_Z,
        }
    }

    /// Displacement from a clicked face to the block spawned against it.
    pub fn block_offset_from_hit_face(self, grid_size: f32) -> Vec3 {
        let half = grid_size / 2.0;
        match self {
            Orientation::Top => Vec3::ZERO,
            Orientation::Bottom => Vec3::new(0.0, -grid_size, 0.0),
            Orientation::Left => Vec3::new(half, -half, 1.0 - half),
            Orientation::Right => Vec3::new(-half, -half, half - 1.0),
            Orientation::Front => Vec3::new(half - 1.0, -half, half),
            Orientation::Back => Vec3::new(1.0 - half, -half, -half),
        }
    }

    /// Displacement from a block position to the proxy for this face.
    pub fn face_offset_from_block(self, grid_size: f32) -> Vec3 {
        let half = grid_size / 2.0;
        match self {
            Orientation::Top => Vec3::new(0.0, grid_size, 0.0),
            Orientation::Bottom => Vec3::ZERO,
            Orientation::Left => Vec3::new(half, half, 1.0 - half),
            Orientation::Right => Vec3::new(-half, half, half - 1.0),
            Orientation::Front => Vec3::new(half - 1.0, half, half),
            Orientation::Back => Vec3::new(1.0 - half, half, -half),
        }
    }

    /// XYZ Euler angles turning a +Z-facing unit plane to face along `normal()`.
    pub const fn face_rotation(self) -> Vec3 {
        match self {
            Orientation::Top => Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            Orientation::Bottom => Vec3::new(FRAC_PI_2, 0.0, 0.0),
            Orientation::Left => Vec3::new(0.0, FRAC_PI_2, 0.0),
            Orientation::Right => Vec3::new(0.0, -FRAC_PI_2, 0.0),
            Orientation::Front => Vec3::ZERO,
            Orientation::Back => Vec3::new(0.0, PI, 0.0),
        }
    }

    /// `face_rotation` as a quaternion.
    pub fn face_quat(self) -> Quat {
        let euler = self.face_rotation();
        Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
    }
}
