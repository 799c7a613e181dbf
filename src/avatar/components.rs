use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Humanoid avatar root: body yaw, head yaw and the walk swing.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Avatar {
    /// Yaw of the trunk in radians; 0 faces +Z.
    pub body_yaw: f32,
    /// World yaw the head is looking along.
    pub head_yaw: f32,
    /// Limb swing state.
    pub walk: WalkCycle,
}

impl Avatar {
    /// Largest step the body takes toward the head per update.
    const TURN_STEP: f32 = 0.1;

    /// Avatar facing `yaw` with head and body aligned and limbs at rest.
    pub fn new(yaw: f32) -> Self {
        Self {
            body_yaw: yaw,
            head_yaw: yaw,
            walk: WalkCycle::default(),
        }
    }

    /// Turn the head toward `target`; a target straight above or below keeps the current yaw.
    pub fn aim_head(&mut self, position: Vec3, target: Vec3) {
        if let Some(yaw) = yaw_towards(position, target) {
            self.head_yaw = yaw;
        }
    }

    /// Let the body take one step toward the head's yaw.
    pub fn turn_body(&mut self) {
        self.body_yaw = chase_yaw(self.body_yaw, self.head_yaw, Self::TURN_STEP);
    }

    /// Head yaw relative to the trunk, in `(-PI, PI]`.
    pub fn head_turn(&self) -> f32 {
        wrap_angle(self.head_yaw - self.body_yaw)
    }

    /// Trunk rotation in world space.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.body_yaw)
    }
}

/// World yaw that points from `from` to `to` on the ground plane.
pub fn yaw_towards(from: Vec3, to: Vec3) -> Option<f32> {
    let delta = (to - from).xz();
    (delta.length_squared() > f32::EPSILON).then(|| delta.x.atan2(delta.y))
}

/// Move `current` toward `target` by `step` when they differ by more than `step`.
pub fn chase_yaw(current: f32, target: f32, step: f32) -> f32 {
    let diff = wrap_angle(target - current);
    if diff > step {
        wrap_angle(current + step)
    } else if diff < -step {
        wrap_angle(current - step)
    } else {
        current
    }
}

/// Normalize an angle into `(-PI, PI]`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Pendulum state shared by arms and legs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WalkCycle {
    /// Current swing angle in radians.
    pub swing: f32,
    /// Whether the swing is currently increasing.
    rising: bool,
}

impl WalkCycle {
    /// Advance the swing by `step`, reversing at `+-max`.
    pub fn advance(&mut self, step: f32, max: f32) {
        if self.rising {
            self.swing += step;
            if self.swing >= max {
                self.swing = max;
                self.rising = false;
            }
        } else {
            self.swing -= step;
            if self.swing <= -max {
                self.swing = -max;
                self.rising = true;
            }
        }
    }

    /// Ease the swing back toward rest by `step`.
    pub fn relax(&mut self, step: f32) {
        if self.swing.abs() <= step {
            self.swing = 0.0;
        } else {
            self.swing -= step * self.swing.signum();
        }
    }
}

/// Body part of the avatar; each is a pivot entity with one cuboid child.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarPart {
    Head,
    Trunk,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl AvatarPart {
    /// Every part, in spawn order.
    pub const ALL: [Self; 6] = [
        Self::Head,
        Self::Trunk,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftLeg,
        Self::RightLeg,
    ];

    /// Cuboid extents of the part.
    pub fn size(self) -> Vec3 {
        match self {
            Self::Head => Vec3::splat(0.8),
            Self::Trunk => Vec3::new(0.8, 1.2, 0.4),
            Self::LeftArm | Self::RightArm | Self::LeftLeg | Self::RightLeg => {
                Vec3::new(0.4, 1.2, 0.4)
            }
        }
    }

    /// Pivot of the part relative to the avatar's feet; the avatar faces +Z.
    pub fn joint(self) -> Vec3 {
        match self {
            Self::Head => Vec3::new(0.0, 2.4, 0.0),
            Self::Trunk => Vec3::new(0.0, 1.2, 0.0),
            Self::LeftArm => Vec3::new(0.6, 2.4, 0.0),
            Self::RightArm => Vec3::new(-0.6, 2.4, 0.0),
            Self::LeftLeg => Vec3::new(0.2, 1.2, 0.0),
            Self::RightLeg => Vec3::new(-0.2, 1.2, 0.0),
        }
    }

    /// Offset of the cuboid centre from the pivot.
    pub fn mesh_offset(self) -> Vec3 {
        let half = self.size().y / 2.0;
        match self {
            Self::Head | Self::Trunk => Vec3::Y * half,
            _ => Vec3::NEG_Y * half,
        }
    }

    /// Base colour of the part.
    pub fn color(self) -> Color {
        match self {
            Self::Head | Self::LeftArm | Self::RightArm => Color::srgb(0.93, 0.76, 0.62),
            Self::Trunk => Color::srgb(0.22, 0.55, 0.78),
            Self::LeftLeg | Self::RightLeg => Color::srgb(0.25, 0.25, 0.45),
        }
    }

    /// Direction the limb swings in; arms swing against the leg on their side.
    fn swing_sign(self) -> f32 {
        match self {
            Self::LeftArm | Self::RightLeg => 1.0,
            Self::RightArm | Self::LeftLeg => -1.0,
            Self::Head | Self::Trunk => 0.0,
        }
    }

    /// Local pivot rotation for the avatar's current state.
    pub fn pose(self, avatar: &Avatar) -> Quat {
        match self {
            Self::Head => Quat::from_rotation_y(avatar.head_turn()),
            Self::Trunk => Quat::IDENTITY,
            limb => Quat::from_rotation_x(avatar.walk.swing * limb.swing_sign()),
        }
    }
}
