//! Topology classification
//!
//! Turns a land mask into a typed grid. Each land cell is scored by how many of its
//! four orthogonal neighbours are land, then the score is resolved into an oriented
//! tile type:
//! - 4 neighbours: open floor, or a free-standing pillar in large open areas
//! - 3 neighbours: a straight wall facing the single void side
//! - 2 neighbours: a corner between two adjacent void sides
//! - 1 neighbour: a niche walled on three sides
//!
//! Stray cells (no land neighbours) and straight corridors (void on two opposite
//! sides) resolve to floor.

use serde::Serialize;

use crate::tilemap::{Tilemap, MOORE};

/// One of the four orthogonal sides of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Sides in the order neighbours are checked when resolving orientation.
    pub const CHECK_ORDER: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];

    /// Grid offset `(dx, dy)` toward this side. Rows grow downward.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Side::Left => (-1, 0),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Top => (0, -1),
        }
    }
}

/// Orientation of a corner tile, named by its two walled sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn sides(self) -> [Side; 2] {
        match self {
            Corner::TopLeft => [Side::Top, Side::Left],
            Corner::TopRight => [Side::Top, Side::Right],
            Corner::BottomLeft => [Side::Bottom, Side::Left],
            Corner::BottomRight => [Side::Bottom, Side::Right],
        }
    }
}

/// Classified type of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TileType {
    #[default]
    Void,
    Floor,
    /// Interior floor hosting a double-sided exhibit wall
    Pillar,
    /// Single wall on the named side
    Wall(Side),
    Corner(Corner),
    /// Walled on three sides; the named side is the opening
    Niche(Side),
}

impl TileType {
    pub fn is_occupied(&self) -> bool {
        !matches!(self, TileType::Void)
    }

    /// Sides of this cell that carry an outer wall.
    pub fn walled_sides(&self) -> &'static [Side] {
        match self {
            TileType::Void | TileType::Floor | TileType::Pillar => &[],
            TileType::Wall(Side::Top) => &[Side::Top],
            TileType::Wall(Side::Bottom) => &[Side::Bottom],
            TileType::Wall(Side::Left) => &[Side::Left],
            TileType::Wall(Side::Right) => &[Side::Right],
            TileType::Corner(Corner::TopLeft) => &[Side::Top, Side::Left],
            TileType::Corner(Corner::TopRight) => &[Side::Top, Side::Right],
            TileType::Corner(Corner::BottomLeft) => &[Side::Bottom, Side::Left],
            TileType::Corner(Corner::BottomRight) => &[Side::Bottom, Side::Right],
            TileType::Niche(Side::Top) => &[Side::Left, Side::Right, Side::Bottom],
            TileType::Niche(Side::Bottom) => &[Side::Left, Side::Right, Side::Top],
            TileType::Niche(Side::Left) => &[Side::Right, Side::Bottom, Side::Top],
            TileType::Niche(Side::Right) => &[Side::Left, Side::Bottom, Side::Top],
        }
    }

    /// Number of exhibit slots this tile offers.
    pub fn exhibit_slots(&self) -> usize {
        match self {
            TileType::Wall(_) => 1,
            TileType::Pillar => 2,
            _ => 0,
        }
    }
}

/// Classified grid, the public output of the layout stage.
pub type TypedGrid = Tilemap<TileType>;

/// Per-type tile tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TileCounts {
    pub void: usize,
    pub floor: usize,
    pub pillar: usize,
    pub wall: usize,
    pub corner: usize,
    pub niche: usize,
}

impl TileCounts {
    pub fn occupied(&self) -> usize {
        self.floor + self.pillar + self.wall + self.corner + self.niche
    }

    /// Estimated exhibit capacity: two per pillar, one per straight wall.
    pub fn capacity(&self) -> usize {
        2 * self.pillar + self.wall
    }
}

impl Tilemap<TileType> {
    pub fn tile_counts(&self) -> TileCounts {
        let mut counts = TileCounts::default();
        for (_, _, tile) in self.iter() {
            match tile {
                TileType::Void => counts.void += 1,
                TileType::Floor => counts.floor += 1,
                TileType::Pillar => counts.pillar += 1,
                TileType::Wall(_) => counts.wall += 1,
                TileType::Corner(_) => counts.corner += 1,
                TileType::Niche(_) => counts.niche += 1,
            }
        }
        counts
    }

    /// Estimated number of exhibits this layout can host.
    pub fn capacity(&self) -> usize {
        self.tile_counts().capacity()
    }

    /// Cell nearest the geometric centre where an avatar can stand.
    ///
    /// Prefers open floor, then any occupied cell. Ties keep the first cell in row-major order.
    pub fn spawn_cell(&self) -> Option<(usize, usize)> {
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let nearest = |pred: &dyn Fn(&TileType) -> bool| {
            let mut best: Option<((usize, usize), f64)> = None;
            for (x, y, tile) in self.iter() {
                if !pred(tile) {
                    continue;
                }
                let d = (x as f64 + 0.5 - cx).powi(2) + (y as f64 + 0.5 - cy).powi(2);
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some(((x, y), d));
                }
            }
            best.map(|(cell, _)| cell)
        };
        nearest(&|t: &TileType| *t == TileType::Floor)
            .or_else(|| nearest(&|t: &TileType| t.is_occupied()))
    }
}

/// Degree-based class assigned before orientation is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Provisional {
    #[default]
    Void,
    Stray,
    Floor,
    Wall,
    Corner,
    Niche,
}

/// Classify a land mask into a typed grid of the same shape.
pub fn classify(occupancy: &Tilemap<bool>) -> TypedGrid {
    let bordered = occupancy.add_border(false);
    let provisional = score_degrees(&bordered);

    let mut typed = Tilemap::new_with(bordered.width, bordered.height, TileType::Void);
    for y in 1..bordered.height.saturating_sub(1) {
        for x in 1..bordered.width.saturating_sub(1) {
            let tile = match *provisional.get(x, y) {
                Provisional::Void => continue,
                Provisional::Stray => TileType::Floor,
                Provisional::Wall => TileType::Wall(wall_side(&bordered, x, y)),
                Provisional::Niche => TileType::Niche(niche_opening(&bordered, x, y)),
                Provisional::Corner => {
                    corner_type(&bordered, x, y).map_or(TileType::Floor, TileType::Corner)
                }
                Provisional::Floor => {
                    if promotes_to_pillar(&provisional, &typed, x, y) {
                        TileType::Pillar
                    } else {
                        TileType::Floor
                    }
                }
            };
            typed.set(x, y, tile);
        }
    }

    typed.remove_border()
}

/// Pass 1: count land neighbours of every land cell.
fn score_degrees(bordered: &Tilemap<bool>) -> Tilemap<Provisional> {
    let mut provisional = Tilemap::new(bordered.width, bordered.height);
    for y in 1..bordered.height.saturating_sub(1) {
        for x in 1..bordered.width.saturating_sub(1) {
            if !*bordered.get(x, y) {
                continue;
            }
            let degree = Side::CHECK_ORDER
                .iter()
                .filter(|side| is_land(bordered, x, y, **side))
                .count();
            let class = match degree {
                4 => Provisional::Floor,
                3 => Provisional::Wall,
                2 => Provisional::Corner,
                1 => Provisional::Niche,
                _ => Provisional::Stray,
            };
            provisional.set(x, y, class);
        }
    }
    provisional
}

#[inline]
fn is_land(bordered: &Tilemap<bool>, x: usize, y: usize, side: Side) -> bool {
    let (dx, dy) = side.offset();
    *bordered.get_offset(x, y, dx, dy)
}

/// The first void side in check order.
fn wall_side(bordered: &Tilemap<bool>, x: usize, y: usize) -> Side {
    Side::CHECK_ORDER
        .into_iter()
        .find(|&side| !is_land(bordered, x, y, side))
        .unwrap_or(Side::Top)
}

/// The first land side in check order is the opening.
fn niche_opening(bordered: &Tilemap<bool>, x: usize, y: usize) -> Side {
    Side::CHECK_ORDER
        .into_iter()
        .find(|&side| is_land(bordered, x, y, side))
        .unwrap_or(Side::Top)
}

/// Corner between two adjacent void sides, or `None` for a straight corridor.
fn corner_type(bordered: &Tilemap<bool>, x: usize, y: usize) -> Option<Corner> {
    let left = !is_land(bordered, x, y, Side::Left);
    let right = !is_land(bordered, x, y, Side::Right);
    let top = !is_land(bordered, x, y, Side::Top);
    let bottom = !is_land(bordered, x, y, Side::Bottom);

    if (left && right) || (top && bottom) {
        return None;
    }
    if left {
        Some(if top { Corner::TopLeft } else { Corner::BottomLeft })
    } else if right {
        Some(if top { Corner::TopRight } else { Corner::BottomRight })
    } else {
        None
    }
}

/// A floor cell becomes a pillar when its whole 8-neighbourhood is open floor and no
/// cell in the row above has already become one. Sweeping row-major, this lays
/// pillars out as horizontal walls with a walkable row between them.
fn promotes_to_pillar(
    provisional: &Tilemap<Provisional>,
    typed: &TypedGrid,
    x: usize,
    y: usize,
) -> bool {
    let open = MOORE
        .iter()
        .all(|&(dx, dy)| *provisional.get_offset(x, y, dx, dy) == Provisional::Floor);
    let blocked_above = (-1..=1).any(|dx| *typed.get_offset(x, y, dx, -1) == TileType::Pillar);
    open && !blocked_above
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::generate_occupancy;

    fn mask(rows: &[&str]) -> Tilemap<bool> {
        let rows = rows.iter().map(|r| r.chars().map(|c| c == '#').collect()).collect();
        Tilemap::from_rows(rows).unwrap()
    }

    fn code(tile: &TileType) -> &'static str {
        match tile {
            TileType::Void => "..",
            TileType::Floor => "f",
            TileType::Pillar => "P",
            TileType::Wall(Side::Left) => "lw",
            TileType::Wall(Side::Right) => "rw",
            TileType::Wall(Side::Bottom) => "bw",
            TileType::Wall(Side::Top) => "tw",
            TileType::Corner(Corner::TopLeft) => "tl",
            TileType::Corner(Corner::TopRight) => "tr",
            TileType::Corner(Corner::BottomLeft) => "bl",
            TileType::Corner(Corner::BottomRight) => "br",
            TileType::Niche(Side::Left) => "lu",
            TileType::Niche(Side::Right) => "ru",
            TileType::Niche(Side::Bottom) => "bu",
            TileType::Niche(Side::Top) => "tu",
        }
    }

    fn codes(grid: &TypedGrid) -> Vec<String> {
        grid.rows()
            .map(|row| row.iter().map(code).collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn test_golden_seed_1_size_5() {
        let grid = classify(&generate_occupancy(5, 1));
        assert_eq!(
            codes(&grid),
            vec![
                ".. .. .. .. ..",
                ".. .. tl tr ..",
                ".. ru f f tr",
                ".. .. lw f br",
                ".. .. bl br ..",
            ]
        );
        assert_eq!(grid.capacity(), 1);
    }

    #[test]
    fn test_golden_seed_7_size_5() {
        let grid = classify(&generate_occupancy(5, 7));
        assert_eq!(
            codes(&grid),
            vec![
                ".. .. .. .. ..",
                ".. .. bu .. ..",
                ".. tl f tw tr",
                ".. lw f f rw",
                ".. bl bw bw br",
            ]
        );
        assert_eq!(grid.capacity(), 5);
    }

    #[test]
    fn test_golden_seed_1_size_9_has_pillars() {
        let grid = classify(&generate_occupancy(9, 1));
        assert_eq!(
            codes(&grid),
            vec![
                ".. .. .. .. .. .. .. .. ..",
                ".. .. .. .. .. .. .. .. ..",
                ".. .. .. tl tw tw tr .. ..",
                ".. .. tl f f f f tr ..",
                ".. .. lw f P P f rw ..",
                ".. .. bl f f f f f lu",
                ".. .. .. lw f f f rw ..",
                ".. .. .. bl f f bw br ..",
                ".. .. .. .. bl br .. .. ..",
            ]
        );
        let counts = grid.tile_counts();
        assert_eq!(counts.pillar, 2);
        assert_eq!(counts.niche, 1);
        assert_eq!(grid.capacity(), 2 * 2 + counts.wall);
    }

    #[test]
    fn test_open_room_alternates_pillar_rows() {
        let grid = classify(&mask(&["#######"; 7]));
        assert_eq!(
            codes(&grid),
            vec![
                "tl tw tw tw tw tw tr",
                "lw f f f f f rw",
                "lw f P P P f rw",
                "lw f f f f f rw",
                "lw f P P P f rw",
                "lw f f f f f rw",
                "bl bw bw bw bw bw br",
            ]
        );
        assert_eq!(grid.capacity(), 2 * 6 + 20);
    }

    #[test]
    fn test_stray_cell_becomes_floor() {
        let grid = classify(&mask(&["...", ".#.", "..."]));
        assert_eq!(*grid.get(1, 1), TileType::Floor);
        assert_eq!(grid.tile_counts().occupied(), 1);
    }

    #[test]
    fn test_straight_corridors_become_floor() {
        let horizontal = classify(&mask(&["###"]));
        assert_eq!(
            (0..3).map(|x| *horizontal.get(x, 0)).collect::<Vec<_>>(),
            vec![TileType::Niche(Side::Right), TileType::Floor, TileType::Niche(Side::Left)]
        );

        let vertical = classify(&mask(&["#", "#", "#"]));
        assert_eq!(
            (0..3).map(|y| *vertical.get(0, y)).collect::<Vec<_>>(),
            vec![TileType::Niche(Side::Bottom), TileType::Floor, TileType::Niche(Side::Top)]
        );
    }

    #[test]
    fn test_every_land_cell_is_typed() {
        for seed in [-5, 0, 1, 3, 7, 42] {
            for size in [5, 9, 16, 25, 40] {
                let occupancy = generate_occupancy(size, seed);
                let grid = classify(&occupancy);
                assert_eq!((grid.width, grid.height), (size, size));
                for (x, y, &land) in occupancy.iter() {
                    assert_eq!(
                        land,
                        grid.get(x, y).is_occupied(),
                        "seed {} size {} ({}, {})",
                        seed,
                        size,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        for seed in [1, 7, 42] {
            let occupancy = generate_occupancy(21, seed);
            assert_eq!(classify(&occupancy), classify(&generate_occupancy(21, seed)));
        }
    }

    #[test]
    fn test_walled_sides_face_void() {
        let occupancy = generate_occupancy(30, 3);
        let grid = classify(&occupancy);
        for (x, y, tile) in grid.iter() {
            for side in tile.walled_sides() {
                let (dx, dy) = side.offset();
                let neighbour = occupancy
                    .try_get(x as isize + dx, y as isize + dy)
                    .copied()
                    .unwrap_or(false);
                assert!(!neighbour, "{:?} at ({}, {}) walls off land", tile, x, y);
            }
        }
    }

    #[test]
    fn test_spawn_cell_prefers_central_floor() {
        let grid = classify(&mask(&["#######"; 7]));
        assert_eq!(grid.spawn_cell(), Some((3, 3)));
        assert_eq!(classify(&mask(&["...", "..."])).spawn_cell(), None);
        assert_eq!(classify(&mask(&["##", "##"])).spawn_cell(), Some((0, 0)));
    }

    #[test]
    fn test_tiles_serialize_for_export() {
        let grid = classify(&mask(&["###"]));
        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["width"], 3);
        assert_eq!(value["data"][0], serde_json::json!({"Niche": "Right"}));
        assert_eq!(value["data"][1], "Floor");
        let corner = serde_json::to_value(TileType::Corner(Corner::TopLeft)).unwrap();
        assert_eq!(corner, serde_json::json!({"Corner": "TopLeft"}));
    }
}
