mod highlighter;
mod interaction;
mod loading;
mod pointer;
mod scene_sync;

pub use highlighter::{Highlighter, HighlighterMaterials, HoveredFace, highlighter_system};
pub use interaction::{block_interaction_system, template_hotkey_system};
pub use loading::block_texture_loading_system;
pub use pointer::{PointerRay, pointer_ray_system};
pub use scene_sync::{SceneAssets, SceneEntities, scene_sync_system};
