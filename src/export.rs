//! Export compiled galleries to JSON and the typed grid to a PNG preview

use std::fs::File;
use std::io::{BufWriter, Write};

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::ascii::tile_color;
use crate::exhibit::Exhibit;
use crate::gallery::Gallery;
use crate::placement::CompiledGallery;
use crate::topology::TypedGrid;

/// Errors that can occur while writing exports
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Json(e) => write!(f, "JSON error: {}", e),
            ExportError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

/// Everything a renderer needs, in one document.
#[derive(Serialize)]
pub struct GalleryExport<'a> {
    pub seed: i64,
    pub decoration_seed: u64,
    pub size: usize,
    pub capacity: usize,
    pub grid: &'a TypedGrid,
    pub gallery: &'a CompiledGallery,
    /// Exhibit list the slot indices refer to
    pub exhibits: &'a [Exhibit],
}

impl<'a> GalleryExport<'a> {
    pub fn new(gallery: &'a Gallery, exhibits: &'a [Exhibit]) -> Self {
        Self {
            seed: gallery.seeds.master,
            decoration_seed: gallery.seeds.decoration,
            size: gallery.layout.size,
            capacity: gallery.layout.capacity,
            grid: &gallery.layout.grid,
            gallery: &gallery.compiled,
            exhibits,
        }
    }
}

pub fn write_gallery_json<W: Write>(
    gallery: &Gallery,
    exhibits: &[Exhibit],
    writer: W,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, &GalleryExport::new(gallery, exhibits))?;
    Ok(())
}

/// Export a generated gallery as pretty-printed JSON.
pub fn export_gallery_json(
    gallery: &Gallery,
    exhibits: &[Exhibit],
    path: &str,
) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_gallery_json(gallery, exhibits, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Pixels per grid cell in layout previews
pub const PREVIEW_CELL_SIZE: u32 = 8;

/// Colour tiles by family and mark exhibit cells: gold for a real exhibit, pale
/// grey for filler.
pub fn render_layout_image(
    grid: &TypedGrid,
    compiled: Option<&CompiledGallery>,
    cell_size: u32,
) -> RgbImage {
    let mut img: RgbImage =
        ImageBuffer::new(grid.width as u32 * cell_size, grid.height as u32 * cell_size);

    for (x, y, tile) in grid.iter() {
        let (r, g, b) = tile_color(tile);
        fill_square(
            &mut img,
            x as u32 * cell_size,
            y as u32 * cell_size,
            cell_size,
            Rgb([r, g, b]),
        );
    }

    if let Some(compiled) = compiled {
        let inset = cell_size / 4;
        let marker = cell_size.saturating_sub(2 * inset).max(1);
        for slot in &compiled.slots {
            let color = if slot.content.exhibit_index().is_some() {
                Rgb([230, 180, 40])
            } else {
                Rgb([200, 200, 200])
            };
            let (x, y) = slot.cell;
            if x < grid.width && y < grid.height {
                fill_square(
                    &mut img,
                    x as u32 * cell_size + inset,
                    y as u32 * cell_size + inset,
                    marker,
                    color,
                );
            }
        }
    }

    img
}

fn fill_square(img: &mut RgbImage, left: u32, top: u32, side: u32, color: Rgb<u8>) {
    for py in top..(top + side).min(img.height()) {
        for px in left..(left + side).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

/// Export a PNG preview of the layout.
pub fn export_layout_png(
    grid: &TypedGrid,
    compiled: Option<&CompiledGallery>,
    path: &str,
) -> Result<(), ExportError> {
    render_layout_image(grid, compiled, PREVIEW_CELL_SIZE).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::exhibit::placeholder_exhibits;
    use crate::gallery::generate_gallery;
    use crate::tilemap::Tilemap;
    use crate::topology::{classify, TileType};

    #[test]
    fn test_json_document_shape() {
        let exhibits = placeholder_exhibits(6);
        let gallery = generate_gallery(&exhibits, 7, &GalleryConfig::default()).unwrap();
        let mut buffer = Vec::new();
        write_gallery_json(&gallery, &exhibits, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["seed"], 7);
        assert_eq!(value["size"], gallery.layout.size);
        assert_eq!(value["exhibits"].as_array().unwrap().len(), 6);
        assert_eq!(value["gallery"]["plaques"].as_array().unwrap().len(), 6);
        let slots = value["gallery"]["slots"].as_array().unwrap();
        assert_eq!(slots.len(), gallery.compiled.slots.len());
        assert_eq!(slots[0]["content"]["kind"], "exhibit");
    }

    #[test]
    fn test_preview_marks_slots() {
        let grid = classify(&Tilemap::square(5, true));
        let plain = render_layout_image(&grid, None, 4);
        assert_eq!(plain.dimensions(), (20, 20));
        let (r, g, b) = tile_color(&TileType::Floor);
        assert_eq!(*plain.get_pixel(6, 6), Rgb([r, g, b]));

        let compiled = crate::placement::compile(
            &grid,
            &placeholder_exhibits(1),
            &crate::placement::PlacementParams::default(),
            &crate::seeds::GallerySeeds::from_master(1),
        )
        .unwrap();
        let marked = render_layout_image(&grid, Some(&compiled), 4);
        // First slot is the top wall at (1, 0)
        assert_eq!(*marked.get_pixel(5, 1), Rgb([230, 180, 40]));
        // Pillar at the centre holds filler
        assert_eq!(*marked.get_pixel(9, 9), Rgb([200, 200, 200]));
    }
}
