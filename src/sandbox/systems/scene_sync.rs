use bevy::prelude::*;
use std::collections::HashMap;

use crate::sandbox::catalog::BlockCatalog;
use crate::sandbox::pool::{BlockId, BlockPool, CollisionFace, ProxyId, SceneChange};

/// Marker for a rendered block entity; `SceneEntities` maps it back to its pool id.
#[derive(Component)]
pub struct BlockInstance;

/// Invisible scene node standing in for a collision-face proxy.
#[derive(Component)]
pub struct FaceProxy;

#[derive(Resource)]
/// Shared render and audio handles for pool-driven entities.
pub struct SceneAssets {
    /// Cube mesh with edge length equal to the grid size.
    pub block_mesh: Handle<Mesh>,
    /// Cue played when blocks are placed.
    pub place_sound: Handle<AudioSource>,
    /// Cue played when blocks are removed.
    pub remove_sound: Handle<AudioSource>,
}

#[derive(Resource, Default)]
/// Entities spawned for pool blocks and proxies, keyed by pool id.
pub struct SceneEntities {
    /// Entity per live block.
    pub blocks: HashMap<BlockId, Entity>,
    /// Entity per registered proxy.
    pub faces: HashMap<ProxyId, Entity>,
}

/// Audio cues owed for one batch of scene changes; at most one of each per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CueSet {
    /// A block was placed.
    pub(crate) place: bool,
    /// A block was removed.
    pub(crate) remove: bool,
}

impl CueSet {
    /// Collect the cues a batch of changes asks for.
    pub(crate) fn from_changes(changes: &[SceneChange]) -> Self {
        changes.iter().fold(Self::default(), |cues, change| match change {
            SceneChange::BlockSpawned { .. } => Self { place: true, ..cues },
            SceneChange::BlockDestroyed { .. } => Self { remove: true, ..cues },
            SceneChange::FaceRegistered { .. } => cues,
        })
    }
}

/// Translation of a block's cube mesh: the pool position is the bottom face centre.
pub(crate) fn block_visual_center(position: Vec3, grid_size: f32) -> Vec3 {
    position + Vec3::Y * (grid_size / 2.0)
}

/// Transform of a proxy scene node.
pub(crate) fn face_transform(face: &CollisionFace) -> Transform {
    Transform::from_translation(face.position).with_rotation(face.rotation())
}

/// Mirror pool changes into the scene graph and play placement/removal cues.
pub fn scene_sync_system(
    mut commands: Commands,
    mut pool: ResMut<BlockPool>,
    catalog: Res<BlockCatalog>,
    assets: Res<SceneAssets>,
    mut entities: ResMut<SceneEntities>,
) {
    let changes = pool.drain_scene_changes();
    if changes.is_empty() {
        return;
    }
    let grid_size = pool.grid_size();
    for change in &changes {
        match change {
            SceneChange::FaceRegistered { id, face } => {
                let entity = commands
                    .spawn((
                        FaceProxy,
                        face_transform(face),
                        Visibility::Hidden,
                    ))
                    .id();
                entities.faces.insert(*id, entity);
            }
            SceneChange::BlockSpawned {
                id,
                block_type,
                position,
            } => {
                let Some(material) = catalog.get(block_type).and_then(|t| t.material()) else {
                    warn!("no material for block type `{block_type}`");
                    continue;
                };
                let entity = commands
                    .spawn((
                        BlockInstance,
                        bevy::mesh::Mesh3d(assets.block_mesh.clone()),
                        bevy::pbr::MeshMaterial3d(material.clone()),
                        Transform::from_translation(block_visual_center(*position, grid_size)),
                    ))
                    .id();
                entities.blocks.insert(*id, entity);
            }
            SceneChange::BlockDestroyed { id, faces } => {
                if let Some(entity) = entities.blocks.remove(id) {
                    commands.entity(entity).despawn();
                }
                for face in faces {
                    if let Some(entity) = entities.faces.remove(face) {
                        commands.entity(entity).despawn();
                    }
                }
            }
        }
    }

    let cues = CueSet::from_changes(&changes);
    if cues.place {
        commands.spawn((
            AudioPlayer::new(assets.place_sound.clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
    if cues.remove {
        commands.spawn((
            AudioPlayer::new(assets.remove_sound.clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
}
