use bevy::prelude::*;

use crate::sandbox::interaction_state::{BuildMode, InteractionSettings};
use crate::sandbox::orientation::Orientation;
use crate::sandbox::pool::BlockPool;
use crate::sandbox::raycast::{ProxyHit, raycast_proxies};
use crate::sandbox::systems::pointer::PointerRay;

/// Lift of the outline above its face, to keep it off the block surface.
const HIGHLIGHT_LIFT: f32 = 0.01;
/// How far below the floor the outline is parked when nothing is hovered.
const PARK_DEPTH: f32 = 0.1;

/// Outline quad marking the face under the pointer.
#[derive(Component)]
pub struct Highlighter {
    /// Pose used when the pointer hits no face.
    pub parked: Transform,
}

impl Highlighter {
    /// Highlighter that parks just under the floor at `floor_y`.
    pub fn new(floor_y: f32) -> Self {
        Self {
            parked: Transform::from_xyz(0.0, floor_y - PARK_DEPTH, 0.0)
                .with_rotation(Orientation::Top.face_quat()),
        }
    }

    /// Pose for the current hit: on the face, or parked off-scene.
    pub fn pose(&self, hit: Option<&ProxyHit>) -> Transform {
        match hit {
            Some(hit) => Transform::from_translation(
                hit.position + hit.orientation.normal() * HIGHLIGHT_LIFT,
            )
            .with_rotation(hit.rotation),
            None => self.parked,
        }
    }
}

#[derive(Resource)]
/// Outline materials per interaction mode.
pub struct HighlighterMaterials {
    /// Outline colour in build mode.
    pub build: Handle<StandardMaterial>,
    /// Outline colour in destroy mode.
    pub destroy: Handle<StandardMaterial>,
}

impl HighlighterMaterials {
    /// Material for a mode.
    pub fn for_mode(&self, mode: BuildMode) -> &Handle<StandardMaterial> {
        match mode {
            BuildMode::Build => &self.build,
            BuildMode::Destroy => &self.destroy,
        }
    }
}

#[derive(Resource, Default)]
/// Nearest face under the pointer this frame.
pub struct HoveredFace(
    /// Hit under the pointer, if any.
    pub Option<ProxyHit>,
);

/// Track the hovered face and move the outline onto it.
pub fn highlighter_system(
    pointer: Res<PointerRay>,
    pool: Res<BlockPool>,
    settings: Res<InteractionSettings>,
    materials: Res<HighlighterMaterials>,
    mut hovered: ResMut<HoveredFace>,
    mut query: Query<
        (
            &Highlighter,
            &mut Transform,
            &mut bevy::pbr::MeshMaterial3d<StandardMaterial>,
        ),
    >,
) {
    let hit = pointer
        .ray
        .and_then(|ray| raycast_proxies(&pool, ray.origin, ray.direction));
    hovered.0 = hit;

    let Ok((highlighter, mut transform, mut material)) = query.single_mut() else {
        return;
    };
    *transform = highlighter.pose(hit.as_ref());
    let wanted = materials.for_mode(settings.mode);
    if material.0 != *wanted {
        material.0 = wanted.clone();
    }
}
