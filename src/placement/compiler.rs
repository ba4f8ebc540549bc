//! Pass B of placement: walk the typed grid and emit instances, slots and plaques.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::batches::{count_instances, BatchCursor, BatchSet, InstanceBatch};
use super::params::PlacementParams;
use super::types::{
    ExhibitSlot, InstanceRef, PlacementRecord, Plaque, SlotContent, SlotId, TileCategory, Transform,
};
use super::PlacementError;
use crate::exhibit::Exhibit;
use crate::seeds::GallerySeeds;
use crate::topology::{Corner, Side, TileType, TypedGrid};

/// Renderer-ready gallery.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompiledGallery {
    pub seed: i64,
    /// Grid side length in cells
    pub size: usize,
    pub spawn: Transform,
    pub batches: BatchSet,
    pub slots: Vec<ExhibitSlot>,
    pub plaques: Vec<Plaque>,
}

impl CompiledGallery {
    pub fn batch(&self, category: TileCategory) -> &InstanceBatch {
        self.batches.get(category)
    }

    /// Slots holding a real exhibit.
    pub fn exhibits_placed(&self) -> usize {
        self.slots.iter().filter(|s| s.content.exhibit_index().is_some()).count()
    }

    pub fn filler_slots(&self) -> usize {
        self.slots.len() - self.exhibits_placed()
    }

    /// Hover lookup for the inspection UI.
    pub fn plaque_for(&self, slot: SlotId) -> Option<&Plaque> {
        self.plaques.iter().find(|p| p.slot == slot)
    }
}

/// Compile `grid` into batched placements, hanging `exhibits` in row-major scan order.
pub fn compile(
    grid: &TypedGrid,
    exhibits: &[Exhibit],
    params: &PlacementParams,
    seeds: &GallerySeeds,
) -> Result<CompiledGallery, PlacementError> {
    validate(params)?;

    let counts = count_instances(grid, params.decorations);
    let mut batches = BatchSet::allocate(&counts);
    let mut cursor = BatchCursor::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seeds.decoration);
    let mut hanger = SlotHanger::new(exhibits, params);

    let half = params.tile_size / 2.0;
    for (x, y, tile) in grid.iter() {
        if !tile.is_occupied() {
            continue;
        }
        let cell = (x, y);
        let [cx, _, cz] = cell_center(x, y, params);

        let floor = Transform::new([cx, 0.0, cz], [-FRAC_PI_2, 0.0, 0.0]);
        cursor.place(&mut batches, record(TileCategory::Floor, cell, floor))?;
        let ceiling = Transform::new([cx, params.wall_height, cz], [FRAC_PI_2, 0.0, 0.0]);
        cursor.place(&mut batches, record(TileCategory::Ceiling, cell, ceiling))?;

        for &side in tile.walled_sides() {
            let (ox, oz) = outward(side);
            let yaw = side_yaw(side);
            let wall = Transform::yawed(
                [cx + ox * half, params.wall_height / 2.0, cz + oz * half],
                yaw,
            );
            let mount = cursor.place(&mut batches, record(TileCategory::OuterWall, cell, wall))?;

            if let TileType::Wall(_) = tile {
                let reach = half - params.wall_offset;
                let frame = Transform::yawed(
                    [cx + ox * reach, params.exhibit_height, cz + oz * reach],
                    yaw,
                );
                hanger.hang(&mut batches, mount, cell, frame)?;
            }
        }

        match *tile {
            TileType::Pillar => {
                let panel = Transform::yawed([cx, params.wall_height / 2.0, cz], 0.0);
                let mount =
                    cursor.place(&mut batches, record(TileCategory::PillarWall, cell, panel))?;
                let (height, offset) = (params.exhibit_height, params.wall_offset);
                let front = Transform::yawed([cx, height, cz + offset], 0.0);
                let back = Transform::yawed([cx, height, cz - offset], PI);
                hanger.hang(&mut batches, mount, cell, front)?;
                hanger.hang(&mut batches, mount, cell, back)?;
            }
            TileType::Corner(corner) if params.decorations => {
                if let Some(category) = roll_decoration(&mut rng, params) {
                    let (ox, oz) = corner
                        .sides()
                        .iter()
                        .fold((0.0, 0.0), |(ax, az), &side| {
                            let (sx, sz) = outward(side);
                            (ax + sx, az + sz)
                        });
                    let inset = params.decoration_inset;
                    let prop = Transform::yawed(
                        [cx + ox * inset, 0.0, cz + oz * inset],
                        corner_yaw(corner),
                    );
                    cursor.place(&mut batches, record(category, cell, prop))?;
                }
            }
            _ => {}
        }
    }

    batches.shrink_to(&cursor);

    let [sx, _, sz] = match grid.spawn_cell() {
        Some((x, y)) => cell_center(x, y, params),
        None => {
            let mid = grid.width.saturating_sub(1) as f32 / 2.0 * params.tile_size;
            [mid, 0.0, mid]
        }
    };

    Ok(CompiledGallery {
        seed: seeds.master,
        size: grid.width,
        spawn: Transform::new([sx, params.spawn_height, sz], [0.0, 0.0, 0.0]),
        batches,
        slots: hanger.slots,
        plaques: hanger.plaques,
    })
}

fn validate(params: &PlacementParams) -> Result<(), PlacementError> {
    let chance_ok = |p: f64| (0.0..=1.0).contains(&p);
    if !chance_ok(params.plant_chance) || !chance_ok(params.chair_chance) {
        return Err(PlacementError::InvalidParams(format!(
            "decoration chances must be within 0..=1 (plant {}, chair {})",
            params.plant_chance, params.chair_chance
        )));
    }
    if !(params.tile_size > 0.0) || !(params.max_frame[0] > 0.0) || !(params.max_frame[1] > 0.0) {
        return Err(PlacementError::InvalidParams(
            "tile and frame dimensions must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Hands out exhibits to slots in the order slots are created.
struct SlotHanger<'a> {
    exhibits: &'a [Exhibit],
    params: &'a PlacementParams,
    next_exhibit: usize,
    slots: Vec<ExhibitSlot>,
    plaques: Vec<Plaque>,
}

impl<'a> SlotHanger<'a> {
    fn new(exhibits: &'a [Exhibit], params: &'a PlacementParams) -> Self {
        Self {
            exhibits,
            params,
            next_exhibit: 0,
            slots: Vec::new(),
            plaques: Vec::new(),
        }
    }

    fn hang(
        &mut self,
        batches: &mut BatchSet,
        mount: InstanceRef,
        cell: (usize, usize),
        transform: Transform,
    ) -> Result<(), PlacementError> {
        let id = SlotId(self.slots.len() as u32);
        batches.attach_slot(mount, id)?;
        let (content, aspect) = match self.exhibits.get(self.next_exhibit) {
            Some(exhibit) => {
                let index = self.next_exhibit;
                self.next_exhibit += 1;
                self.plaques.push(Plaque {
                    slot: id,
                    title: exhibit.title.clone(),
                    author: exhibit.author.clone(),
                });
                (SlotContent::Exhibit { index }, exhibit.display_ratio())
            }
            None => (SlotContent::Filler, None),
        };

        self.slots.push(ExhibitSlot {
            id,
            cell,
            mount,
            transform,
            frame_size: self.params.frame_size(aspect),
            content,
        });
        Ok(())
    }
}

fn record(category: TileCategory, cell: (usize, usize), transform: Transform) -> PlacementRecord {
    PlacementRecord {
        category,
        cell,
        transform,
        slots: Vec::new(),
    }
}

fn roll_decoration(rng: &mut ChaCha8Rng, params: &PlacementParams) -> Option<TileCategory> {
    if rng.gen_bool(params.plant_chance) {
        Some(TileCategory::Plant)
    } else if rng.gen_bool(params.chair_chance) {
        Some(TileCategory::Chair)
    } else {
        None
    }
}

/// World position of a cell centre at floor level.
fn cell_center(x: usize, y: usize, params: &PlacementParams) -> [f32; 3] {
    [x as f32 * params.tile_size, 0.0, y as f32 * params.tile_size]
}

/// Unit step in world `(x, z)` from a cell centre toward `side`.
fn outward(side: Side) -> (f32, f32) {
    let (dx, dy) = side.offset();
    (dx as f32, dy as f32)
}

/// Yaw turning a `+Z`-facing panel on `side` toward the cell interior.
fn side_yaw(side: Side) -> f32 {
    match side {
        Side::Top => 0.0,
        Side::Bottom => PI,
        Side::Left => FRAC_PI_2,
        Side::Right => -FRAC_PI_2,
    }
}

/// Yaw of a corner prop looking diagonally into the room.
fn corner_yaw(corner: Corner) -> f32 {
    match corner {
        Corner::TopLeft => FRAC_PI_4,
        Corner::TopRight => -FRAC_PI_4,
        Corner::BottomLeft => 3.0 * FRAC_PI_4,
        Corner::BottomRight => -3.0 * FRAC_PI_4,
    }
}
