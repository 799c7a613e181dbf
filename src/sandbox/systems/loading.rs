use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::sandbox::catalog::BlockCatalog;

/// Surface roughness of block materials.
const BLOCK_ROUGHNESS: f32 = 0.85;
/// Specular reflectance of block materials.
const BLOCK_REFLECTANCE: f32 = 0.04;

/// How a block type's texture request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextureOutcome {
    /// The image and its dependencies are loaded.
    Loaded,
    /// The asset server gave up on the image.
    Failed,
}

/// Build the material for a block type from its texture, or its solid fallback colour.
fn block_material(texture: Option<Handle<Image>>, base_color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color,
        base_color_texture: texture,
        perceptual_roughness: BLOCK_ROUGHNESS,
        metallic: 0.0,
        reflectance: BLOCK_REFLECTANCE,
        ..default()
    }
}

/// Build the block type's material for a finished load and mark it ready.
///
/// A failed texture still leaves the type placeable, drawn in its fallback colour.
pub(crate) fn promote_block_type(
    catalog: &mut BlockCatalog,
    materials: &mut Assets<StandardMaterial>,
    name: &str,
    outcome: TextureOutcome,
) {
    let Some(template) = catalog.get(name) else {
        return;
    };
    let material = match outcome {
        TextureOutcome::Loaded => block_material(Some(template.texture.clone()), Color::WHITE),
        TextureOutcome::Failed => block_material(None, template.fallback),
    };
    let material = materials.add(material);
    catalog.mark_ready(name, material);
}

/// Promote block types whose textures finished loading, falling back to flat colours on failure.
pub fn block_texture_loading_system(
    asset_server: Res<AssetServer>,
    mut catalog: ResMut<BlockCatalog>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut finished: Vec<(String, TextureOutcome)> = Vec::new();
    for template in catalog.loading() {
        if asset_server.is_loaded_with_dependencies(&template.texture) {
            finished.push((template.name.clone(), TextureOutcome::Loaded));
        } else if matches!(
            asset_server.load_state(&template.texture),
            LoadState::Failed(_)
        ) {
            finished.push((template.name.clone(), TextureOutcome::Failed));
        }
    }
    for (name, outcome) in finished {
        promote_block_type(&mut catalog, &mut materials, &name, outcome);
        match outcome {
            TextureOutcome::Loaded => info!("block type `{name}` ready"),
            TextureOutcome::Failed => {
                warn!("texture for block type `{name}` failed to load; using its flat colour");
            }
        }
    }
}
