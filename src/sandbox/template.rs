use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sandbox::error::TemplateError;

/// All placements of one block type inside a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Block type key.
    pub block: String,
    /// Block positions as `[x, y, z]`.
    pub positions: Vec<[f32; 3]>,
}

impl TemplateRecord {
    /// Expand into `(type, position)` pairs for `BlockPool::bulk_spawn`.
    pub fn entries(&self) -> impl Iterator<Item = (String, Vec3)> + '_ {
        self.positions
            .iter()
            .map(|position| (self.block.clone(), Vec3::from_array(*position)))
    }
}

#[derive(Resource, Clone, Debug, Default, PartialEq)]
/// Named templates available for replay, in name order.
pub struct TemplateCatalog {
    templates: BTreeMap<String, Vec<TemplateRecord>>,
}

impl TemplateCatalog {
    /// Parse a catalog of the form `{ "<name>": [ { "block", "positions" } ] }`.
    pub fn from_json(text: &str) -> Result<Self, TemplateError> {
        let templates = serde_json::from_str(text)?;
        Ok(Self { templates })
    }

    /// Template names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Return `true` when the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Placements of one template flattened for bulk spawning.
    pub fn entries(&self, name: &str) -> Result<Vec<(String, Vec3)>, TemplateError> {
        let records = self
            .templates
            .get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.to_owned()))?;
        Ok(records.iter().flat_map(|record| record.entries()).collect())
    }

    /// Name following `current` in order, wrapping; the first name when `current` is `None`.
    pub fn next_name(&self, current: Option<&str>) -> Option<&str> {
        let mut names = self.names();
        let Some(current) = current else {
            return names.next();
        };
        self.names()
            .skip_while(|name| *name != current)
            .nth(1)
            .or_else(|| names.next())
    }
}

/// Convert a pool snapshot into template records, one per type.
pub fn records_from_snapshot(snapshot: &BTreeMap<String, Vec<Vec3>>) -> Vec<TemplateRecord> {
    snapshot
        .iter()
        .map(|(block, positions)| TemplateRecord {
            block: block.clone(),
            positions: positions.iter().map(|p| p.to_array()).collect(),
        })
        .collect()
}

/// Render a pool snapshot as template JSON.
pub fn snapshot_to_json(snapshot: &BTreeMap<String, Vec<Vec3>>) -> Result<String, TemplateError> {
    Ok(serde_json::to_string(&records_from_snapshot(snapshot))?)
}
