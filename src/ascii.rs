//! ASCII rendering and export module for gallery layouts
//!
//! Provides functions to render typed grids as ASCII text and export a gallery report.

use std::fs::File;
use std::io::{self, Write};
use chrono::Local;

use crate::placement::{CompiledGallery, TileCategory};
use crate::sizer::SizedLayout;
use crate::topology::{Corner, Side, TileType, TypedGrid};

/// Get ASCII character for a tile
pub fn tile_char(tile: &TileType) -> char {
    match tile {
        TileType::Void => ' ',
        TileType::Floor => '.',
        TileType::Pillar => '=',

        TileType::Wall(Side::Top) | TileType::Wall(Side::Bottom) => '-',
        TileType::Wall(Side::Left) | TileType::Wall(Side::Right) => '|',

        TileType::Corner(Corner::TopLeft) | TileType::Corner(Corner::BottomRight) => '/',
        TileType::Corner(Corner::TopRight) | TileType::Corner(Corner::BottomLeft) => '\\',

        // Points toward the opening
        TileType::Niche(Side::Top) => '^',
        TileType::Niche(Side::Bottom) => 'v',
        TileType::Niche(Side::Left) => '<',
        TileType::Niche(Side::Right) => '>',
    }
}

/// Preview colour of a tile family
pub fn tile_color(tile: &TileType) -> (u8, u8, u8) {
    match tile {
        TileType::Void => (24, 24, 28),
        TileType::Floor => (214, 200, 170),
        TileType::Pillar => (150, 60, 50),
        TileType::Wall(_) => (90, 90, 100),
        TileType::Corner(_) => (60, 60, 70),
        TileType::Niche(_) => (120, 110, 150),
    }
}

pub fn render_ascii_grid(grid: &TypedGrid) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height);

    for row in grid.rows() {
        for tile in row {
            result.push(tile_char(tile));
        }
        result.push('\n');
    }

    result
}

/// Render with ANSI true colour backgrounds
pub fn render_colored_ascii_grid(grid: &TypedGrid) -> String {
    let mut result = String::new();
    for row in grid.rows() {
        for tile in row {
            let bg = tile_color(tile);
            let fg = if bg.0 as u32 + bg.1 as u32 + bg.2 as u32 > 384 {
                (0, 0, 0)
            } else {
                (230, 230, 230)
            };
            result.push_str(&ansi_colored_char(tile_char(tile), fg, bg));
        }
        result.push('\n');
    }
    result
}

/// Format a single character with ANSI true color (24-bit) - foreground and background
pub fn ansi_colored_char(ch: char, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.0, fg.1, fg.2,
        bg.0, bg.1, bg.2,
        ch
    )
}

/// Print ASCII grid to stdout
pub fn print_ascii_grid(grid: &TypedGrid, colored: bool) {
    if colored {
        print!("{}", render_colored_ascii_grid(grid));
    } else {
        print!("{}", render_ascii_grid(grid));
    }
}

/// Generate legend for tile characters
pub fn tile_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== TILE LEGEND ===\n");
    legend.push_str("  . Floor        = Pillar (2 exhibits)\n");
    legend.push_str("  - | Wall (1 exhibit)\n");
    legend.push_str("  / \\ Corner\n");
    legend.push_str("  ^ v < > Niche (points at opening)\n");
    legend
}

/// Export a full gallery report: header, layout map, legend and statistics.
pub fn export_gallery_file(
    layout: &SizedLayout,
    compiled: &CompiledGallery,
    path: &str,
    verbose: bool,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    let grid = &layout.grid;
    let total = grid.width * grid.height;

    // Header
    writeln!(file, "=== GALLERY GENERATOR LAYOUT FILE ===")?;
    writeln!(file, "Seed: {}", layout.seed)?;
    writeln!(file, "Size: {}x{} (after {} attempts)", grid.width, grid.height, layout.attempts)?;
    writeln!(file, "Capacity: {}", layout.capacity)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP ===")?;
    write!(file, "{}", render_ascii_grid(grid))?;
    writeln!(file)?;

    write!(file, "{}", tile_legend())?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    writeln!(file, "Total tiles: {}", total)?;
    let counts = grid.tile_counts();
    let rows = [
        ("Void", counts.void),
        ("Floor", counts.floor),
        ("Pillar", counts.pillar),
        ("Wall", counts.wall),
        ("Corner", counts.corner),
        ("Niche", counts.niche),
    ];
    for (name, count) in rows {
        let pct = if total > 0 { 100.0 * count as f64 / total as f64 } else { 0.0 };
        writeln!(file, "  {:10} {:>6} ({:>5.1}%)", name, count, pct)?;
    }
    writeln!(file)?;

    writeln!(file, "Instance batches:")?;
    for category in TileCategory::all() {
        writeln!(file, "  {:12} {:>6}", category.display_name(), compiled.batch(*category).len())?;
    }
    writeln!(file)?;

    writeln!(file, "Exhibit slots: {}", compiled.slots.len())?;
    writeln!(file, "  Exhibits: {}", compiled.exhibits_placed())?;
    writeln!(file, "  Filler:   {}", compiled.filler_slots())?;

    if verbose {
        writeln!(file)?;
        writeln!(file, "=== PLAQUES ===")?;
        for plaque in &compiled.plaques {
            if let Some(slot) = compiled.slots.get(plaque.slot.0 as usize) {
                writeln!(
                    file,
                    "  #{:<4} ({:>3},{:>3}) {} by {}",
                    plaque.slot.0, slot.cell.0, slot.cell.1, plaque.title, plaque.author
                )?;
            }
        }
    }

    Ok(())
}
