//! Placement output types
//!
//! Everything the renderer and the hover UI consume: batched tile instances,
//! wall-mounted exhibit slots and their plaques.

use serde::Serialize;

/// Renderable tile category. Each category becomes one batched draw group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TileCategory {
    Floor,
    Ceiling,
    OuterWall,
    PillarWall,
    Chair,
    Plant,
}

impl TileCategory {
    pub const COUNT: usize = 6;

    pub fn all() -> &'static [TileCategory; TileCategory::COUNT] {
        &[
            TileCategory::Floor,
            TileCategory::Ceiling,
            TileCategory::OuterWall,
            TileCategory::PillarWall,
            TileCategory::Chair,
            TileCategory::Plant,
        ]
    }

    pub fn index(self) -> usize {
        match self {
            TileCategory::Floor => 0,
            TileCategory::Ceiling => 1,
            TileCategory::OuterWall => 2,
            TileCategory::PillarWall => 3,
            TileCategory::Chair => 4,
            TileCategory::Plant => 5,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TileCategory::Floor => "Floor",
            TileCategory::Ceiling => "Ceiling",
            TileCategory::OuterWall => "Outer wall",
            TileCategory::PillarWall => "Pillar wall",
            TileCategory::Chair => "Chair",
            TileCategory::Plant => "Plant",
        }
    }
}

/// Position and Euler rotation (radians, XYZ) in world units. `+Y` is up.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
pub struct Transform {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl Transform {
    pub fn new(position: [f32; 3], rotation: [f32; 3]) -> Self {
        Self { position, rotation }
    }

    /// Upright transform turned `yaw` radians about `+Y`.
    pub fn yawed(position: [f32; 3], yaw: f32) -> Self {
        Self::new(position, [0.0, yaw, 0.0])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SlotId(pub u32);

/// Index of one instance inside its category batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceRef {
    pub category: TileCategory,
    pub index: usize,
}

/// One renderable tile instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacementRecord {
    pub category: TileCategory,
    /// Grid cell `(x, y)` that produced this instance
    pub cell: (usize, usize),
    pub transform: Transform,
    /// Exhibit slots mounted on this instance
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotId>,
}

/// What hangs in an exhibit slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotContent {
    /// Index into the ordered exhibit list
    Exhibit { index: usize },
    /// Decorative texture used once the exhibit list is exhausted
    Filler,
}

impl SlotContent {
    pub fn exhibit_index(&self) -> Option<usize> {
        match *self {
            SlotContent::Exhibit { index } => Some(index),
            SlotContent::Filler => None,
        }
    }
}

/// A wall-mounted picture frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExhibitSlot {
    pub id: SlotId,
    pub cell: (usize, usize),
    /// The wall or pillar instance this frame hangs on
    pub mount: InstanceRef,
    pub transform: Transform,
    /// Frame width and height in world units
    pub frame_size: [f32; 2],
    pub content: SlotContent,
}

/// Hover descriptor for one exhibit slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plaque {
    pub slot: SlotId,
    pub title: String,
    pub author: String,
}
