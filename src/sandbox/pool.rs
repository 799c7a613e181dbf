use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::sandbox::addressing::{CellKey, resolve_destroy_position, resolve_spawn_position};
use crate::sandbox::catalog::BlockCatalog;
use crate::sandbox::error::PoolError;
use crate::sandbox::orientation::Orientation;

/// Stable id of a placed block. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

/// Stable id of a collision-face proxy. Ids grow in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyId(u64);

/// Invisible plane bounding empty space next to a block, or tiling the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionFace {
    /// World position of the plane centre.
    pub position: Vec3,
    /// Face this plane represents.
    pub orientation: Orientation,
    /// Block whose face this is; `None` for ambient floor proxies.
    pub owner: Option<BlockId>,
}

impl CollisionFace {
    /// World rotation of the plane.
    pub fn rotation(&self) -> Quat {
        self.orientation.face_quat()
    }
}

/// A placed voxel and the six proxies registered around it.
#[derive(Clone, Debug)]
pub struct PlacedBlock {
    /// Block type key.
    pub block_type: String,
    /// World position (bottom-centre of the cube).
    pub position: Vec3,
    /// Quantized identity of `position`.
    pub cell: CellKey,
    /// Proxy ids indexed by `Orientation::index`.
    pub faces: [ProxyId; 6],
}

/// Notification for the renderer and audio collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneChange {
    /// A proxy joined the registry and needs a scene node.
    FaceRegistered {
        /// Registry id of the new proxy.
        id: ProxyId,
        /// Pose and tags of the new proxy.
        face: CollisionFace,
    },
    /// A block was placed; add its node and cue the placement sound.
    BlockSpawned {
        /// Id of the new block.
        id: BlockId,
        /// Type key used to pick the block material.
        block_type: String,
        /// World position of the block.
        position: Vec3,
    },
    /// A block and its six proxies were removed; drop the nodes and cue removal.
    BlockDestroyed {
        /// Id of the removed block.
        id: BlockId,
        /// Ids of the removed proxies.
        faces: [ProxyId; 6],
    },
}

/// One template entry that `bulk_spawn` could not place.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkSpawnFailure {
    /// Block type of the skipped entry.
    pub block_type: String,
    /// Stored position of the skipped entry.
    pub position: Vec3,
    /// Why the spawn was refused.
    pub error: PoolError,
}

/// Outcome of replaying a template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkSpawnSummary {
    /// Number of blocks placed.
    pub spawned: usize,
    /// Entries that were skipped.
    pub failures: Vec<BulkSpawnFailure>,
}

#[derive(Resource)]
/// Owner of every placed block and every collision-face proxy.
///
/// Invariant: the proxy registry holds exactly the ambient floor proxies plus
/// six proxies per live block, each tagged with that block as owner.
pub struct BlockPool {
    /// Lattice spacing and cube edge length.
    grid_size: f32,
    /// Floor proxies created at construction, never removed.
    ambient: Vec<ProxyId>,
    /// Proxy registry; iteration order is registration order.
    proxies: BTreeMap<ProxyId, CollisionFace>,
    /// Live blocks by id.
    blocks: HashMap<BlockId, PlacedBlock>,
    /// Per-type cell index of live blocks.
    instances: HashMap<String, HashMap<CellKey, BlockId>>,
    /// Cell index across all types.
    occupied: HashMap<CellKey, BlockId>,
    /// Scene changes not yet picked up by the renderer.
    pending: Vec<SceneChange>,
    /// Next block id to hand out.
    next_block: u64,
    /// Next proxy id to hand out.
    next_proxy: u64,
}

impl BlockPool {
    /// Build a pool whose floor at `floor_y` is tiled with TOP proxies.
    ///
    /// The floor spans `sandbox_size` on X and Z centred on the origin, one
    /// proxy per grid cell, walked X-major.
    pub fn new(grid_size: f32, sandbox_size: f32, floor_y: f32) -> Self {
        let mut pool = Self {
            grid_size,
            ambient: Vec::new(),
            proxies: BTreeMap::new(),
            blocks: HashMap::new(),
            instances: HashMap::new(),
            occupied: HashMap::new(),
            pending: Vec::new(),
            next_block: 0,
            next_proxy: 0,
        };
        let steps = (sandbox_size / grid_size).ceil() as usize;
        let origin = -sandbox_size / 2.0 + grid_size / 2.0;
        for i in 0..steps {
            for j in 0..steps {
                let position = Vec3::new(
                    origin + i as f32 * grid_size,
                    floor_y,
                    origin + j as f32 * grid_size,
                );
                let id = pool.register_face(CollisionFace {
                    position,
                    orientation: Orientation::Top,
                    owner: None,
                });
                pool.ambient.push(id);
            }
        }
        pool
    }

    /// Grid spacing used by every address computation of this pool.
    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Place a block against the face at `hit_face` with the given orientation.
    ///
    /// Registers the block's six proxies and queues the scene changes. On error
    /// nothing is modified.
    pub fn spawn(
        &mut self,
        catalog: &BlockCatalog,
        hit_face: Vec3,
        orientation: Orientation,
        block_type: &str,
    ) -> Result<BlockId, PoolError> {
        catalog.require_ready(block_type)?;
        let position = resolve_spawn_position(hit_face, orientation, self.grid_size);
        let cell = CellKey::from_position(position)
            .ok_or(PoolError::PositionOutOfRange { position })?;
        if self.occupied.contains_key(&cell) {
            return Err(PoolError::CellOccupied {
                cell: cell.to_position(),
            });
        }

        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.pending.push(SceneChange::BlockSpawned {
            id,
            block_type: block_type.to_owned(),
            position,
        });
        let grid_size = self.grid_size;
        let faces = Orientation::ALL.map(|face| {
            self.register_face(CollisionFace {
                position: position + face.face_offset_from_block(grid_size),
                orientation: face,
                owner: Some(id),
            })
        });

        self.blocks.insert(
            id,
            PlacedBlock {
                block_type: block_type.to_owned(),
                position,
                cell,
                faces,
            },
        );
        self.instances
            .entry(block_type.to_owned())
            .or_default()
            .insert(cell, id);
        self.occupied.insert(cell, id);
        Ok(id)
    }

    /// Remove the `block_type` block that generated the face at `hit_face`.
    ///
    /// Returns `false` without touching anything when no such block exists.
    pub fn destroy(&mut self, hit_face: Vec3, orientation: Orientation, block_type: &str) -> bool {
        let position = resolve_destroy_position(hit_face, orientation, self.grid_size);
        let Some(cell) = CellKey::from_position(position) else {
            return false;
        };
        let Some(id) = self
            .instances
            .get(block_type)
            .and_then(|cells| cells.get(&cell))
            .copied()
        else {
            return false;
        };
        self.remove_block(id).is_some()
    }

    /// Try `destroy` for each type in order until one removes a block.
    pub fn destroy_any<'a, I>(&mut self, hit_face: Vec3, orientation: Orientation, types: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        types
            .into_iter()
            .any(|block_type| self.destroy(hit_face, orientation, block_type))
    }

    /// Replay placements at TOP orientation, one `spawn` per entry.
    ///
    /// Refused entries are reported and skipped; the rest are still placed.
    pub fn bulk_spawn<I>(&mut self, catalog: &BlockCatalog, entries: I) -> BulkSpawnSummary
    where
        I: IntoIterator<Item = (String, Vec3)>,
    {
        let mut summary = BulkSpawnSummary::default();
        for (block_type, position) in entries {
            match self.spawn(catalog, position, Orientation::Top, &block_type) {
                Ok(_) => summary.spawned += 1,
                Err(error) => summary.failures.push(BulkSpawnFailure {
                    block_type,
                    position,
                    error,
                }),
            }
        }
        summary
    }

    /// Snapshot of live block positions per type, each list in spawn order.
    pub fn serialize(&self) -> BTreeMap<String, Vec<Vec3>> {
        self.instances
            .keys()
            .map(|block_type| {
                let positions = self
                    .instances(block_type)
                    .into_iter()
                    .map(|block| block.position)
                    .collect();
                (block_type.clone(), positions)
            })
            .collect()
    }

    /// Live blocks of one type in spawn order.
    pub fn instances(&self, block_type: &str) -> Vec<&PlacedBlock> {
        let Some(cells) = self.instances.get(block_type) else {
            return Vec::new();
        };
        let mut ids: Vec<BlockId> = cells.values().copied().collect();
        ids.sort_unstable();
        ids.iter().filter_map(|id| self.blocks.get(id)).collect()
    }

    /// Owning block and its type for a proxy; `None` for ambient or unknown proxies.
    pub fn owner_of(&self, proxy: ProxyId) -> Option<(BlockId, &str)> {
        let owner = self.proxies.get(&proxy)?.owner?;
        let block = self.blocks.get(&owner)?;
        Some((owner, block.block_type.as_str()))
    }

    /// Look up a live block.
    pub fn block(&self, id: BlockId) -> Option<&PlacedBlock> {
        self.blocks.get(&id)
    }

    /// Look up a registered proxy.
    #[cfg(test)]
    pub fn proxy(&self, id: ProxyId) -> Option<&CollisionFace> {
        self.proxies.get(&id)
    }

    /// Registered proxies in registration order.
    pub fn proxies(&self) -> impl Iterator<Item = (ProxyId, &CollisionFace)> {
        self.proxies.iter().map(|(id, face)| (*id, face))
    }

    /// Number of live blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of registered proxies, ambient included.
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Number of ambient floor proxies.
    pub fn ambient_count(&self) -> usize {
        self.ambient.len()
    }

    /// Take the scene changes queued since the last drain.
    pub fn drain_scene_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.pending)
    }

    /// Add a proxy to the registry and queue its scene node.
    fn register_face(&mut self, face: CollisionFace) -> ProxyId {
        let id = ProxyId(self.next_proxy);
        self.next_proxy += 1;
        self.pending.push(SceneChange::FaceRegistered {
            id,
            face: face.clone(),
        });
        self.proxies.insert(id, face);
        id
    }

    /// Remove a block, its indexes, and its six proxies.
    fn remove_block(&mut self, id: BlockId) -> Option<PlacedBlock> {
        let block = self.blocks.remove(&id)?;
        if let Some(cells) = self.instances.get_mut(&block.block_type) {
            cells.remove(&block.cell);
            if cells.is_empty() {
                self.instances.remove(&block.block_type);
            }
        }
        self.occupied.remove(&block.cell);
        for face in block.faces {
            self.proxies.remove(&face);
        }
        self.pending.push(SceneChange::BlockDestroyed {
            id,
            faces: block.faces,
        });
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::collections::HashSet;

    use super::*;

    /// Catalog with every listed type ready.
    fn ready_catalog(types: &[&str]) -> BlockCatalog {
        let mut catalog = BlockCatalog::default();
        for name in types {
            catalog.register(*name, Handle::<Image>::default(), Color::WHITE);
            catalog.mark_ready(name, Handle::<StandardMaterial>::default());
        }
        catalog
    }

    /// Small 2x2 floor at y = -2 on the default grid.
    fn small_pool() -> BlockPool {
        BlockPool::new(2.0, 4.0, -2.0)
    }

    /// Default sandbox floor is 20x20 TOP proxies centred on the origin.
    #[test]
    fn floor_is_tiled_with_ambient_top_proxies() {
        let pool = BlockPool::new(2.0, 40.0, -2.0);
        assert_eq!(pool.ambient_count(), 400);
        assert_eq!(pool.proxy_count(), 400);

        let faces: Vec<&CollisionFace> = pool.proxies().map(|(_, face)| face).collect();
        assert_eq!(faces[0].position, Vec3::new(-19.0, -2.0, -19.0));
        assert_eq!(faces[1].position, Vec3::new(-19.0, -2.0, -17.0));
        assert_eq!(faces[399].position, Vec3::new(19.0, -2.0, 19.0));
        assert!(
            faces
                .iter()
                .all(|face| face.orientation == Orientation::Top && face.owner.is_none())
        );
    }

    /// Spawning on a TOP hit at the origin lays out the six faces from the offset table.
    #[test]
    fn spawn_on_top_hit_creates_six_faces() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let before = pool.proxy_count();

        let id = pool
            .spawn(&catalog, Vec3::ZERO, Orientation::Top, "dirt")
            .expect("spawn");
        let block = pool.block(id).expect("block").clone();
        assert_eq!(block.position, Vec3::ZERO);
        assert_eq!(block.block_type, "dirt");
        assert_eq!(pool.proxy_count(), before + 6);

        let expected = [
            (Orientation::Top, Vec3::new(0.0, 2.0, 0.0)),
            (Orientation::Left, Vec3::new(1.0, 1.0, 0.0)),
            (Orientation::Front, Vec3::new(0.0, 1.0, 1.0)),
            (Orientation::Bottom, Vec3::new(0.0, 0.0, 0.0)),
            (Orientation::Right, Vec3::new(-1.0, 1.0, 0.0)),
            (Orientation::Back, Vec3::new(0.0, 1.0, -1.0)),
        ];
        for (orientation, position) in expected {
            let face = pool
                .proxy(block.faces[orientation.index()])
                .expect("face registered");
            assert_eq!(face.orientation, orientation);
            assert_eq!(face.position, position, "{orientation:?}");
            assert_eq!(face.owner, Some(id));
        }
    }

    /// Every spawned face sits at block position plus the face offset.
    #[test]
    fn spawn_faces_follow_face_offsets_from_any_hit() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let hit = Vec3::new(1.0, 1.0, 0.0);
        let id = pool
            .spawn(&catalog, hit, Orientation::Left, "dirt")
            .expect("spawn");
        let block = pool.block(id).expect("block");
        assert_eq!(block.position, Vec3::new(2.0, 0.0, 0.0));
        for o in Orientation::ALL {
            let face = pool.proxy(block.faces[o.index()]).expect("face");
            assert_eq!(face.position, block.position + o.face_offset_from_block(2.0));
        }
    }

    /// Clicking the new block's opposite face in destroy mode removes exactly that block.
    #[test]
    fn destroy_through_opposite_face_removes_spawned_block() {
        let catalog = ready_catalog(&["dirt"]);
        for o in Orientation::ALL {
            let mut pool = small_pool();
            let anchor = pool
                .spawn(&catalog, Vec3::new(1.0, -2.0, 1.0), Orientation::Top, "dirt")
                .expect("anchor");
            let anchor_face = pool
                .proxy(pool.block(anchor).expect("anchor block").faces[o.index()])
                .expect("anchor face")
                .position;

            let spawned = pool
                .spawn(&catalog, anchor_face, o, "dirt")
                .expect("spawn against face");
            let opposite = o.opposite();
            let clicked = pool
                .proxy(pool.block(spawned).expect("spawned block").faces[opposite.index()])
                .expect("opposite face")
                .position;

            let blocks = pool.block_count();
            let proxies = pool.proxy_count();
            assert!(pool.destroy(clicked, opposite, "dirt"), "{o:?}");
            assert!(pool.block(spawned).is_none());
            assert!(pool.block(anchor).is_some());
            assert_eq!(pool.block_count() + pool.proxy_count(), blocks + proxies - 7);
        }
    }

    /// A hit on empty space removes nothing and queues nothing.
    #[test]
    fn destroy_miss_is_a_no_op() {
        let catalog = ready_catalog(&["dirt", "stone"]);
        let mut pool = small_pool();
        pool.spawn(&catalog, Vec3::new(1.0, -2.0, 1.0), Orientation::Top, "dirt")
            .expect("spawn");
        pool.drain_scene_changes();
        let proxies = pool.proxy_count();

        // No stone blocks at all.
        assert!(!pool.destroy(Vec3::new(1.0, 0.0, 1.0), Orientation::Top, "stone"));
        // Floor proxy has no block beneath it.
        assert!(!pool.destroy(Vec3::new(-1.0, -2.0, -1.0), Orientation::Top, "dirt"));
        assert_eq!(pool.block_count(), 1);
        assert_eq!(pool.proxy_count(), proxies);
        assert!(pool.drain_scene_changes().is_empty());
    }

    /// Removing a block drops only its own proxies, even where faces coincide.
    #[test]
    fn destroy_leaves_neighbour_faces_alone() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let a = pool
            .spawn(&catalog, Vec3::ZERO, Orientation::Top, "dirt")
            .expect("a");
        let b = pool
            .spawn(&catalog, Vec3::new(1.0, 1.0, 0.0), Orientation::Left, "dirt")
            .expect("b");
        let b_faces = pool.block(b).expect("b").faces;

        assert!(pool.destroy(Vec3::new(1.0, 1.0, 0.0), Orientation::Left, "dirt"));
        assert!(pool.block(a).is_none());
        assert!(b_faces.iter().all(|face| pool.proxy(*face).is_some()));
        assert_eq!(pool.proxy_count(), pool.ambient_count() + 6);
    }

    /// Unknown and loading types are refused without touching the pool.
    #[test]
    fn spawn_refuses_unknown_and_loading_types() {
        let mut catalog = ready_catalog(&["dirt"]);
        catalog.register("stone", Handle::<Image>::default(), Color::WHITE);
        let mut pool = small_pool();
        let proxies = pool.proxy_count();
        pool.drain_scene_changes();

        assert_eq!(
            pool.spawn(&catalog, Vec3::ZERO, Orientation::Top, "glass"),
            Err(PoolError::UnknownBlockType("glass".to_owned()))
        );
        assert_eq!(
            pool.spawn(&catalog, Vec3::ZERO, Orientation::Top, "stone"),
            Err(PoolError::TemplateNotReady("stone".to_owned()))
        );
        assert_eq!(pool.block_count(), 0);
        assert_eq!(pool.proxy_count(), proxies);
        assert!(pool.drain_scene_changes().is_empty());
    }

    /// A second block in the same cell is refused, whatever its type.
    #[test]
    fn spawn_refuses_occupied_cell() {
        let catalog = ready_catalog(&["dirt", "stone"]);
        let mut pool = small_pool();
        pool.spawn(&catalog, Vec3::ZERO, Orientation::Top, "dirt")
            .expect("first");
        assert_eq!(
            pool.spawn(&catalog, Vec3::ZERO, Orientation::Top, "stone"),
            Err(PoolError::CellOccupied { cell: Vec3::ZERO })
        );
        assert_eq!(pool.block_count(), 1);
    }

    /// The per-type scan removes whichever type owns the face.
    #[test]
    fn destroy_any_scans_types_in_order() {
        let catalog = ready_catalog(&["dirt", "stone"]);
        let mut pool = small_pool();
        let id = pool
            .spawn(&catalog, Vec3::ZERO, Orientation::Top, "stone")
            .expect("stone");
        let top = pool.block(id).expect("stone block").faces[Orientation::Top.index()];
        assert_eq!(pool.owner_of(top), Some((id, "stone")));

        assert!(pool.destroy_any(Vec3::new(0.0, 2.0, 0.0), Orientation::Top, catalog.names()));
        assert_eq!(pool.block_count(), 0);
        assert_eq!(pool.owner_of(top), None);
        assert!(!pool.destroy_any(Vec3::new(0.0, 2.0, 0.0), Orientation::Top, catalog.names()));
    }

    /// Replaying a template and serializing gives back the same positions per type.
    #[test]
    fn bulk_spawn_then_serialize_round_trips() {
        let catalog = ready_catalog(&["dirt", "stone"]);
        let mut pool = BlockPool::new(2.0, 40.0, -2.0);
        let entries = vec![
            ("dirt".to_owned(), Vec3::new(1.0, -2.0, 1.0)),
            ("dirt".to_owned(), Vec3::new(3.0, -2.0, 1.0)),
            ("stone".to_owned(), Vec3::new(1.0, 0.0, 1.0)),
            ("dirt".to_owned(), Vec3::new(-5.0, -2.0, 7.0)),
        ];
        let summary = pool.bulk_spawn(&catalog, entries.clone());
        assert_eq!(summary.spawned, 4);
        assert!(summary.failures.is_empty());

        let snapshot = pool.serialize();
        for block_type in ["dirt", "stone"] {
            let expected: HashSet<CellKey> = entries
                .iter()
                .filter(|(t, _)| t == block_type)
                .filter_map(|(_, p)| CellKey::from_position(*p))
                .collect();
            let actual: HashSet<CellKey> = snapshot[block_type]
                .iter()
                .filter_map(|p| CellKey::from_position(*p))
                .collect();
            assert_eq!(actual, expected, "{block_type}");
        }
        assert_eq!(pool.proxy_count(), pool.ambient_count() + 4 * 6);
    }

    /// Bad entries are skipped and reported; good ones still land.
    #[test]
    fn bulk_spawn_reports_failures_and_continues() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let summary = pool.bulk_spawn(
            &catalog,
            vec![
                ("dirt".to_owned(), Vec3::new(1.0, -2.0, 1.0)),
                ("lava".to_owned(), Vec3::new(-1.0, -2.0, 1.0)),
                ("dirt".to_owned(), Vec3::new(1.0, -2.0, 1.0)),
                ("dirt".to_owned(), Vec3::new(-1.0, -2.0, -1.0)),
            ],
        );
        assert_eq!(summary.spawned, 2);
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(
            summary.failures[0].error,
            PoolError::UnknownBlockType("lava".to_owned())
        );
        assert!(matches!(
            summary.failures[1].error,
            PoolError::CellOccupied { .. }
        ));
    }

    /// Positions the key lattice cannot hold are refused, never merged into one cell.
    #[test]
    fn far_and_non_finite_positions_are_refused() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let summary = pool.bulk_spawn(
            &catalog,
            vec![
                ("dirt".to_owned(), Vec3::new(1.0e9, -2.0, 1.0)),
                ("dirt".to_owned(), Vec3::new(2.0e9, -2.0, 1.0)),
                ("dirt".to_owned(), Vec3::new(f32::NAN, -2.0, 1.0)),
                ("dirt".to_owned(), Vec3::new(1.0, -2.0, 1.0)),
            ],
        );
        assert_eq!(summary.spawned, 1);
        assert_eq!(summary.failures.len(), 3);
        assert!(summary.failures.iter().all(|failure| matches!(
            failure.error,
            PoolError::PositionOutOfRange { .. }
        )));
        assert_eq!(pool.block_count(), 1);
        assert_eq!(pool.proxy_count(), pool.ambient_count() + 6);

        assert!(!pool.destroy(Vec3::new(1.0e9, 0.0, 1.0), Orientation::Top, "dirt"));
        assert!(!pool.destroy(Vec3::splat(f32::INFINITY), Orientation::Top, "dirt"));
        assert_eq!(pool.block_count(), 1);
    }

    /// Serialize keeps spawn order and forgets emptied types.
    #[test]
    fn serialize_tracks_live_blocks_only() {
        let catalog = ready_catalog(&["dirt", "stone"]);
        let mut pool = small_pool();
        pool.spawn(&catalog, Vec3::new(1.0, -2.0, 1.0), Orientation::Top, "dirt")
            .expect("dirt 1");
        pool.spawn(&catalog, Vec3::new(-1.0, -2.0, 1.0), Orientation::Top, "dirt")
            .expect("dirt 2");
        pool.spawn(&catalog, Vec3::new(1.0, -2.0, -1.0), Orientation::Top, "stone")
            .expect("stone");
        assert!(pool.destroy(Vec3::new(1.0, 0.0, -1.0), Orientation::Top, "stone"));

        let snapshot = pool.serialize();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot["dirt"],
            vec![Vec3::new(1.0, -2.0, 1.0), Vec3::new(-1.0, -2.0, 1.0)]
        );
    }

    /// Scene changes announce the block before its faces and carry removal ids.
    #[test]
    fn scene_changes_pair_blocks_with_faces() {
        let catalog = ready_catalog(&["dirt"]);
        let mut pool = small_pool();
        let floor = pool.drain_scene_changes();
        assert_eq!(floor.len(), 4);

        let id = pool
            .spawn(&catalog, Vec3::ZERO, Orientation::Top, "dirt")
            .expect("spawn");
        let changes = pool.drain_scene_changes();
        assert_eq!(changes.len(), 7);
        assert!(matches!(
            &changes[0],
            SceneChange::BlockSpawned { id: spawned, block_type, .. }
                if *spawned == id && block_type == "dirt"
        ));
        assert!(changes[1..].iter().all(|change| matches!(
            change,
            SceneChange::FaceRegistered { face, .. } if face.owner == Some(id)
        )));

        let faces = pool.block(id).expect("block").faces;
        assert!(pool.destroy(Vec3::new(0.0, 2.0, 0.0), Orientation::Top, "dirt"));
        assert_eq!(
            pool.drain_scene_changes(),
            vec![SceneChange::BlockDestroyed { id, faces }]
        );
    }
}
