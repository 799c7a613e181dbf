use bevy::prelude::*;

use crate::sandbox::catalog::BlockCatalog;
use crate::sandbox::template::TemplateCatalog;

/// What a pointer activation does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildMode {
    /// Place the selected block against the clicked face.
    #[default]
    Build,
    /// Remove the block that owns the clicked face.
    Destroy,
}

impl BuildMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            BuildMode::Build => BuildMode::Destroy,
            BuildMode::Destroy => BuildMode::Build,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq)]
/// Current mode, block selection, and template choice.
///
/// Input systems write it; the interaction controller only reads it.
pub struct InteractionSettings {
    /// Build or destroy on click.
    pub mode: BuildMode,
    /// Block type placed in build mode.
    pub selected_type: String,
    /// Last template replayed, if any.
    pub template: Option<String>,
}

impl InteractionSettings {
    /// Start in build mode with the given block type selected.
    pub fn new(selected_type: impl Into<String>) -> Self {
        Self {
            mode: BuildMode::Build,
            selected_type: selected_type.into(),
            template: None,
        }
    }

    /// Hotkey switching between build and destroy mode.
    const MODE_TOGGLE_KEY: KeyCode = KeyCode::Tab;
    /// Hotkeys selecting block types by registration slot.
    const SLOT_KEYS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    /// Hotkey replaying the next template.
    pub(crate) const TEMPLATE_KEY: KeyCode = KeyCode::KeyT;
    /// Hotkey logging a pool snapshot.
    pub(crate) const SNAPSHOT_KEY: KeyCode = KeyCode::KeyP;

    /// Flip the mode and return the new one.
    pub fn toggle_mode(&mut self) -> BuildMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Select the block type in a registration slot if it is ready.
    ///
    /// Types still loading (or failed) cannot be selected.
    pub fn select_slot(&mut self, catalog: &BlockCatalog, slot: usize) -> bool {
        let Some(template) = catalog.nth(slot) else {
            return false;
        };
        if !template.is_ready() {
            return false;
        }
        self.selected_type = template.name.clone();
        true
    }

    /// Move to the next template (wrapping) and return its name.
    pub fn advance_template(&mut self, templates: &TemplateCatalog) -> Option<String> {
        let next = templates.next_name(self.template.as_deref())?.to_owned();
        self.template = Some(next.clone());
        Some(next)
    }

    /// Apply mode and block-selection hotkeys.
    pub(crate) fn apply_hotkeys(&mut self, keys: &ButtonInput<KeyCode>, catalog: &BlockCatalog) {
        if keys.just_pressed(Self::MODE_TOGGLE_KEY) {
            let mode = self.toggle_mode();
            info!("interaction mode: {mode:?}");
        }
        for (slot, key) in Self::SLOT_KEYS.iter().enumerate() {
            if !keys.just_pressed(*key) {
                continue;
            }
            if self.select_slot(catalog, slot) {
                info!("selected block type `{}`", self.selected_type);
            } else {
                warn!("block slot {} is empty or still loading", slot + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;

    /// Catalog with "dirt" ready and "stone" loading.
    fn catalog() -> BlockCatalog {
        let mut catalog = BlockCatalog::default();
        catalog.register("dirt", Handle::<Image>::default(), Color::WHITE);
        catalog.register("stone", Handle::<Image>::default(), Color::WHITE);
        catalog.mark_ready("dirt", Handle::<StandardMaterial>::default());
        catalog
    }

    /// Tab flips the mode each press.
    #[test]
    fn mode_toggle_hotkey_flips_mode() {
        let mut settings = InteractionSettings::new("dirt");
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Tab);
        settings.apply_hotkeys(&keys, &catalog());
        assert_eq!(settings.mode, BuildMode::Destroy);
        assert_eq!(settings.mode.toggled(), BuildMode::Build);
    }

    /// Only ready types can be selected; empty slots are ignored.
    #[test]
    fn slot_selection_requires_ready_type() {
        let catalog = catalog();
        let mut settings = InteractionSettings::new("dirt");
        assert!(!settings.select_slot(&catalog, 1));
        assert!(!settings.select_slot(&catalog, 7));
        assert_eq!(settings.selected_type, "dirt");

        let mut catalog = catalog;
        catalog.mark_ready("stone", Handle::<StandardMaterial>::default());
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Digit2);
        settings.apply_hotkeys(&keys, &catalog);
        assert_eq!(settings.selected_type, "stone");
    }

    /// Template choice cycles through the catalog.
    #[test]
    fn advance_template_cycles() {
        let templates = TemplateCatalog::from_json(
            r#"{ "a": [], "b": [{ "block": "dirt", "positions": [[1, -2, 1]] }] }"#,
        )
        .expect("parse");
        let mut settings = InteractionSettings::new("dirt");
        assert_eq!(settings.advance_template(&templates).as_deref(), Some("a"));
        assert_eq!(settings.advance_template(&templates).as_deref(), Some("b"));
        assert_eq!(settings.advance_template(&templates).as_deref(), Some("a"));
        assert_eq!(settings.template.as_deref(), Some("a"));
    }
}
