mod addressing;
mod catalog;
mod error;
mod interaction_state;
mod orientation;
mod pool;
mod raycast;
mod systems;
mod template;

pub use catalog::BlockCatalog;
pub use interaction_state::InteractionSettings;
pub use pool::BlockPool;
pub use systems::{
    Highlighter, HighlighterMaterials, HoveredFace, PointerRay, SceneAssets, SceneEntities,
    block_interaction_system, block_texture_loading_system, highlighter_system,
    pointer_ray_system, scene_sync_system, template_hotkey_system,
};
pub use template::TemplateCatalog;
