//! Placement compilation
//!
//! Converts a typed grid into everything the renderer needs:
//! - batched floor, ceiling, wall and decoration instances, pre-counted per category
//! - exhibit slots on straight walls (one) and pillars (two), filled in scan order
//! - plaques describing each slot that holds a real exhibit
//!
//! Uses a two-pass scheme: `batches::count_instances` sizes every batch, then
//! `compiler::compile` walks the grid again in the same order and fills them.

pub mod batches;
pub mod compiler;
pub mod params;
pub mod types;

pub use batches::{BatchCounts, BatchCursor, BatchSet, InstanceBatch};
pub use compiler::{compile, CompiledGallery};
pub use params::PlacementParams;
pub use types::{
    ExhibitSlot, InstanceRef, PlacementRecord, Plaque, SlotContent, SlotId, TileCategory, Transform,
};

/// Errors that can occur while compiling placements
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Pass B produced more instances than pass A counted
    BatchOverflow { category: TileCategory, capacity: usize },
    /// A slot named a mount instance that was never placed
    UnknownMount { mount: InstanceRef },
    InvalidParams(String),
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::BatchOverflow { category, capacity } => write!(
                f,
                "{} batch overflowed its counted capacity of {}",
                category.display_name(),
                capacity
            ),
            PlacementError::UnknownMount { mount } => write!(
                f,
                "{} instance {} does not exist",
                mount.category.display_name(),
                mount.index
            ),
            PlacementError::InvalidParams(e) => write!(f, "Invalid placement parameters: {}", e),
        }
    }
}

impl std::error::Error for PlacementError {}
