//! Batched instance storage
//!
//! Pass A counts how many instances each category needs so every batch can be sized
//! once, up front. Pass B fills the batches through a `BatchCursor` that tracks the
//! next free index per category. Decoration batches are shrunk afterwards to what
//! the dice actually placed.

use serde::Serialize;

use super::types::{InstanceRef, PlacementRecord, SlotId, TileCategory};
use super::PlacementError;
use crate::topology::{TileType, TypedGrid};

/// Instance counts per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchCounts([usize; TileCategory::COUNT]);

impl BatchCounts {
    pub fn get(&self, category: TileCategory) -> usize {
        self.0[category.index()]
    }

    pub fn add(&mut self, category: TileCategory, n: usize) {
        self.0[category.index()] += n;
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Pass A: upper bound of instances per category for `grid`.
///
/// Every corner is counted once as a potential chair and once as a potential plant.
pub fn count_instances(grid: &TypedGrid, decorations: bool) -> BatchCounts {
    let mut counts = BatchCounts::default();
    for (_, _, tile) in grid.iter() {
        if !tile.is_occupied() {
            continue;
        }
        counts.add(TileCategory::Floor, 1);
        counts.add(TileCategory::Ceiling, 1);
        counts.add(TileCategory::OuterWall, tile.walled_sides().len());
        match tile {
            TileType::Pillar => counts.add(TileCategory::PillarWall, 1),
            TileType::Corner(_) if decorations => {
                counts.add(TileCategory::Chair, 1);
                counts.add(TileCategory::Plant, 1);
            }
            _ => {}
        }
    }
    counts
}

/// Fixed-capacity draw group for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstanceBatch {
    pub category: TileCategory,
    /// Instances allocated for this batch
    pub capacity: usize,
    pub instances: Vec<PlacementRecord>,
}

impl InstanceBatch {
    fn with_capacity(category: TileCategory, capacity: usize) -> Self {
        Self {
            category,
            capacity,
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// One batch per category, in `TileCategory::all()` order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchSet {
    batches: Vec<InstanceBatch>,
}

impl BatchSet {
    /// Allocate every batch at its counted capacity.
    pub fn allocate(counts: &BatchCounts) -> Self {
        Self {
            batches: TileCategory::all()
                .iter()
                .map(|&category| InstanceBatch::with_capacity(category, counts.get(category)))
                .collect(),
        }
    }

    pub fn get(&self, category: TileCategory) -> &InstanceBatch {
        &self.batches[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstanceBatch> {
        self.batches.iter()
    }

    pub fn total_instances(&self) -> usize {
        self.batches.iter().map(InstanceBatch::len).sum()
    }

    /// Record that exhibit `slot` hangs on the instance `mount`.
    pub fn attach_slot(
        &mut self,
        mount: InstanceRef,
        slot: SlotId,
    ) -> Result<(), PlacementError> {
        let record = self.batches[mount.category.index()]
            .instances
            .get_mut(mount.index)
            .ok_or(PlacementError::UnknownMount { mount })?;
        record.slots.push(slot);
        Ok(())
    }

    /// Shrink each batch's capacity to what the cursor actually filled.
    pub fn shrink_to(&mut self, cursor: &BatchCursor) {
        for batch in &mut self.batches {
            batch.capacity = cursor.filled(batch.category);
            batch.instances.shrink_to_fit();
        }
    }
}

/// Next free instance index per category.
#[derive(Clone, Debug, Default)]
pub struct BatchCursor {
    next: [usize; TileCategory::COUNT],
}

impl BatchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filled(&self, category: TileCategory) -> usize {
        self.next[category.index()]
    }

    /// Write `record` at the cursor of its category and advance.
    pub fn place(
        &mut self,
        batches: &mut BatchSet,
        record: PlacementRecord,
    ) -> Result<InstanceRef, PlacementError> {
        let category = record.category;
        let index = self.next[category.index()];
        let batch = &mut batches.batches[category.index()];
        if index >= batch.capacity {
            return Err(PlacementError::BatchOverflow { category, capacity: batch.capacity });
        }
        batch.instances.push(record);
        self.next[category.index()] += 1;
        Ok(InstanceRef { category, index })
    }
}
