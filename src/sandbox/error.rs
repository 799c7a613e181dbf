use bevy::prelude::*;
use thiserror::Error;

/// Reasons a pool mutation was refused. The pool is unchanged after any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoolError {
    /// The block type was never registered in the catalog.
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
    /// The block type is registered but its template has not finished loading.
    #[error("block type `{0}` is not ready yet")]
    TemplateNotReady(String),
    /// The target position is not finite or lies outside the addressable range.
    #[error("position {position} is out of range")]
    PositionOutOfRange {
        /// Requested block position.
        position: Vec3,
    },
    /// Another block already occupies the target cell.
    #[error("cell {cell} is already occupied")]
    CellOccupied {
        /// World position of the occupied cell.
        cell: Vec3,
    },
}

/// Failures while reading template catalogs.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The catalog text is not valid template JSON.
    #[error("malformed template catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// No template with this name exists in the catalog.
    #[error("no template named `{0}`")]
    UnknownTemplate(String),
}
