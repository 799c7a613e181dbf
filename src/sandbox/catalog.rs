use bevy::prelude::*;

use crate::sandbox::error::PoolError;

/// Load progress of one block type's render template.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateState {
    /// Texture requested from the asset server, not resolved yet.
    Loading,
    /// Block material built, from the texture or from the fallback colour.
    Ready(Handle<StandardMaterial>),
}

/// Render template for one block type.
#[derive(Clone, Debug)]
pub struct BlockTemplate {
    /// Block type key used by the pool and templates.
    pub name: String,
    /// Texture handle the material is built from.
    pub texture: Handle<Image>,
    /// Solid colour used when the texture cannot be loaded.
    pub fallback: Color,
    /// Current load progress.
    pub state: TemplateState,
}

impl BlockTemplate {
    /// Return `true` once blocks of this type can be spawned.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, TemplateState::Ready(_))
    }

    /// Material for spawned blocks, if the template is ready.
    pub fn material(&self) -> Option<&Handle<StandardMaterial>> {
        match &self.state {
            TemplateState::Ready(material) => Some(material),
            _ => None,
        }
    }
}

#[derive(Resource, Default)]
/// Registered block types in registration order.
///
/// The pool only checks readiness here; meshes and materials are owned by the
/// asset collections.
pub struct BlockCatalog {
    templates: Vec<BlockTemplate>,
}

impl BlockCatalog {
    /// Register a block type whose texture is still loading.
    ///
    /// Re-registering an existing name restarts its load with the new texture.
    pub fn register(&mut self, name: impl Into<String>, texture: Handle<Image>, fallback: Color) {
        let name = name.into();
        let template = BlockTemplate {
            name: name.clone(),
            texture,
            fallback,
            state: TemplateState::Loading,
        };
        match self.position(&name) {
            Some(index) => self.templates[index] = template,
            None => self.templates.push(template),
        }
    }

    /// Promote a loading type to ready with its block material.
    pub fn mark_ready(&mut self, name: &str, material: Handle<StandardMaterial>) {
        if let Some(template) = self.get_mut(name) {
            template.state = TemplateState::Ready(material);
        }
    }

    /// Look up a block type by name.
    pub fn get(&self, name: &str) -> Option<&BlockTemplate> {
        self.templates.iter().find(|template| template.name == name)
    }

    /// Mutable lookup by name.
    fn get_mut(&mut self, name: &str) -> Option<&mut BlockTemplate> {
        self.templates
            .iter_mut()
            .find(|template| template.name == name)
    }

    /// Registration index of a block type.
    fn position(&self, name: &str) -> Option<usize> {
        self.templates
            .iter()
            .position(|template| template.name == name)
    }

    /// Block type at a registration index (hotkey slot).
    pub fn nth(&self, index: usize) -> Option<&BlockTemplate> {
        self.templates.get(index)
    }

    /// Registered type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|template| template.name.as_str())
    }

    /// Templates still waiting on their texture.
    pub fn loading(&self) -> impl Iterator<Item = &BlockTemplate> {
        self.templates
            .iter()
            .filter(|template| template.state == TemplateState::Loading)
    }

    /// Resolve a type for spawning, failing if unknown or still loading.
    pub fn require_ready(&self, name: &str) -> Result<&BlockTemplate, PoolError> {
        let template = self
            .get(name)
            .ok_or_else(|| PoolError::UnknownBlockType(name.to_owned()))?;
        if !template.is_ready() {
            return Err(PoolError::TemplateNotReady(name.to_owned()));
        }
        Ok(template)
    }
}
