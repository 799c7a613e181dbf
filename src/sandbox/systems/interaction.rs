use bevy::input::touch::Touches;
use bevy::prelude::*;

use crate::sandbox::catalog::BlockCatalog;
use crate::sandbox::error::PoolError;
use crate::sandbox::interaction_state::{BuildMode, InteractionSettings};
use crate::sandbox::pool::{BlockId, BlockPool};
use crate::sandbox::raycast::{ProxyHit, raycast_proxies};
use crate::sandbox::systems::pointer::PointerRay;
use crate::sandbox::template::{TemplateCatalog, snapshot_to_json};

/// Result of one pointer activation that struck a proxy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Activation {
    /// A block was placed.
    Placed(BlockId),
    /// The block owning the clicked face was removed.
    Removed,
    /// Destroy mode on a face no block owns.
    NothingToRemove,
}

/// Turn a proxy hit into a spawn or destroy, depending on the mode.
///
/// Destroy uses the hit proxy's owner to pick the block type; floor proxies
/// have no owner and fall back to trying every registered type.
pub(crate) fn activate(
    pool: &mut BlockPool,
    catalog: &BlockCatalog,
    settings: &InteractionSettings,
    hit: &ProxyHit,
) -> Result<Activation, PoolError> {
    match settings.mode {
        BuildMode::Build => pool
            .spawn(catalog, hit.position, hit.orientation, &settings.selected_type)
            .map(Activation::Placed),
        BuildMode::Destroy => {
            let owner_type = pool
                .owner_of(hit.proxy)
                .map(|(_, block_type)| block_type.to_owned());
            let removed = match owner_type {
                Some(block_type) => pool.destroy(hit.position, hit.orientation, &block_type),
                None => pool.destroy_any(hit.position, hit.orientation, catalog.names()),
            };
            Ok(if removed {
                Activation::Removed
            } else {
                Activation::NothingToRemove
            })
        }
    }
}

/// Handle mode/selection hotkeys and place or remove blocks on click or tap.
pub fn block_interaction_system(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    keys: Res<ButtonInput<KeyCode>>,
    pointer: Res<PointerRay>,
    catalog: Res<BlockCatalog>,
    mut settings: ResMut<InteractionSettings>,
    mut pool: ResMut<BlockPool>,
) {
    settings.apply_hotkeys(&keys, &catalog);

    if !buttons.just_pressed(MouseButton::Left) && !touches.any_just_pressed() {
        return;
    }
    let Some(ray) = pointer.ray else {
        return;
    };
    // Clicks into open space are a no-op.
    let Some(hit) = raycast_proxies(&pool, ray.origin, ray.direction) else {
        return;
    };
    match activate(&mut pool, &catalog, &settings, &hit) {
        Ok(Activation::Placed(id)) => {
            if let Some(block) = pool.block(id) {
                debug!("placed `{}` at {}", block.block_type, block.position);
            }
        }
        Ok(outcome) => debug!(
            "{outcome:?} via {:?} face at {}",
            hit.orientation, hit.position
        ),
        Err(error) => warn!("{:?} refused: {error}", settings.mode),
    }
}

/// Replay the next template on `T`, log a pool snapshot on `P`.
pub fn template_hotkey_system(
    keys: Res<ButtonInput<KeyCode>>,
    templates: Res<TemplateCatalog>,
    catalog: Res<BlockCatalog>,
    mut settings: ResMut<InteractionSettings>,
    mut pool: ResMut<BlockPool>,
) {
    if keys.just_pressed(InteractionSettings::TEMPLATE_KEY) {
        replay_next_template(&templates, &catalog, &mut settings, &mut pool);
    }
    if keys.just_pressed(InteractionSettings::SNAPSHOT_KEY) {
        match snapshot_to_json(&pool.serialize()) {
            Ok(json) => info!(
                "pool snapshot ({} blocks, {} proxies): {json}",
                pool.block_count(),
                pool.proxy_count()
            ),
            Err(error) => warn!("pool snapshot failed: {error}"),
        }
    }
}

/// Advance the template choice and bulk-spawn it into the pool.
fn replay_next_template(
    templates: &TemplateCatalog,
    catalog: &BlockCatalog,
    settings: &mut InteractionSettings,
    pool: &mut BlockPool,
) {
    let Some(name) = settings.advance_template(templates) else {
        warn!("no templates loaded");
        return;
    };
    let entries = match templates.entries(&name) {
        Ok(entries) => entries,
        Err(error) => {
            warn!("{error}");
            return;
        }
    };
    let summary = pool.bulk_spawn(catalog, entries);
    info!(
        "template `{name}`: placed {} blocks, {} now in the sandbox",
        summary.spawned,
        pool.block_count()
    );
    for failure in &summary.failures {
        warn!(
            "template `{name}`: skipped {} at {}: {}",
            failure.block_type, failure.position, failure.error
        );
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;
    use crate::sandbox::orientation::Orientation;

    /// Catalog with "dirt" and "stone" ready.
    fn catalog() -> BlockCatalog {
        let mut catalog = BlockCatalog::default();
        for name in ["dirt", "stone"] {
            catalog.register(name, Handle::<Image>::default(), Color::WHITE);
            catalog.mark_ready(name, Handle::<StandardMaterial>::default());
        }
        catalog
    }

    /// Aim straight down at `(x, z)` and return the nearest hit.
    fn hit_from_above(pool: &BlockPool, x: f32, z: f32) -> ProxyHit {
        raycast_proxies(pool, Vec3::new(x, 50.0, z), Vec3::NEG_Y).expect("hit")
    }

    /// Build mode stacks blocks on whatever face is clicked.
    #[test]
    fn build_mode_places_selected_type() {
        let catalog = catalog();
        let mut pool = BlockPool::new(2.0, 8.0, -2.0);
        let mut settings = InteractionSettings::new("stone");

        let hit = hit_from_above(&pool, 1.0, 1.0);
        let first = activate(&mut pool, &catalog, &settings, &hit).expect("first");
        let Activation::Placed(first) = first else {
            panic!("expected placement, got {first:?}");
        };
        assert_eq!(pool.block(first).map(|b| b.position), Some(Vec3::new(1.0, -2.0, 1.0)));

        settings.selected_type = "dirt".to_owned();
        let hit = hit_from_above(&pool, 1.0, 1.0);
        assert_eq!(hit.orientation, Orientation::Top);
        let second = activate(&mut pool, &catalog, &settings, &hit).expect("second");
        let Activation::Placed(second) = second else {
            panic!("expected placement, got {second:?}");
        };
        let block = pool.block(second).expect("second block");
        assert_eq!(block.position, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(block.block_type, "dirt");
    }

    /// Destroy mode removes the owner of the clicked face and ignores the floor.
    #[test]
    fn destroy_mode_removes_face_owner() {
        let catalog = catalog();
        let mut pool = BlockPool::new(2.0, 8.0, -2.0);
        let mut settings = InteractionSettings::new("stone");
        let hit = hit_from_above(&pool, 1.0, 1.0);
        activate(&mut pool, &catalog, &settings, &hit).expect("place");
        let proxies = pool.proxy_count();

        settings.mode = BuildMode::Destroy;
        let floor_hit = hit_from_above(&pool, -3.0, -3.0);
        assert_eq!(
            activate(&mut pool, &catalog, &settings, &floor_hit),
            Ok(Activation::NothingToRemove)
        );
        assert_eq!(pool.proxy_count(), proxies);

        let block_hit = hit_from_above(&pool, 1.0, 1.0);
        assert_eq!(
            activate(&mut pool, &catalog, &settings, &block_hit),
            Ok(Activation::Removed)
        );
        assert_eq!(pool.block_count(), 0);
        assert_eq!(pool.proxy_count(), pool.ambient_count());
    }

    /// Unready selections surface the pool error and change nothing.
    #[test]
    fn build_mode_reports_unknown_type() {
        let catalog = catalog();
        let mut pool = BlockPool::new(2.0, 8.0, -2.0);
        let settings = InteractionSettings::new("obsidian");
        let hit = hit_from_above(&pool, 1.0, 1.0);
        assert_eq!(
            activate(&mut pool, &catalog, &settings, &hit),
            Err(PoolError::UnknownBlockType("obsidian".to_owned()))
        );
        assert_eq!(pool.block_count(), 0);
    }

    /// Replaying a template places its blocks and remembers the choice.
    #[test]
    fn template_replay_spawns_entries() {
        let catalog = catalog();
        let templates = TemplateCatalog::from_json(
            r#"{ "pillar": [{ "block": "stone", "positions": [[1, -2, 1], [1, 0, 1], [1, 2, 1]] }] }"#,
        )
        .expect("parse");
        let mut pool = BlockPool::new(2.0, 8.0, -2.0);
        let mut settings = InteractionSettings::new("dirt");

        replay_next_template(&templates, &catalog, &mut settings, &mut pool);
        assert_eq!(settings.template.as_deref(), Some("pillar"));
        assert_eq!(pool.instances("stone").len(), 3);

        // Replaying again finds every cell occupied.
        replay_next_template(&templates, &catalog, &mut settings, &mut pool);
        assert_eq!(pool.block_count(), 3);
    }
}
