//! Whole-pipeline checks through the public API

use std::collections::HashSet;

use gallery_generator::ascii::export_gallery_file;
use gallery_generator::exhibit::{parse_exhibits, placeholder_exhibits};
use gallery_generator::export::{export_gallery_json, export_layout_png};
use gallery_generator::occupancy::generate_occupancy;
use gallery_generator::placement::{SlotContent, TileCategory};
use gallery_generator::sizer::{CancelToken, SizingError};
use gallery_generator::topology::{classify, TileType};
use gallery_generator::{generate_gallery, generate_gallery_with, GalleryConfig, GalleryError};
use gallery_generator::seeds::GallerySeeds;

#[test]
fn test_same_seed_same_gallery() {
    let exhibits = placeholder_exhibits(30);
    let a = generate_gallery(&exhibits, 5, &GalleryConfig::default()).unwrap();
    let b = generate_gallery(&exhibits, 5, &GalleryConfig::default()).unwrap();
    assert_eq!(a.layout.grid, b.layout.grid);
    assert_eq!(a.compiled, b.compiled);
}

#[test]
fn test_every_exhibit_hung_once() {
    for seed in [1, 3, 7, 42] {
        for count in [0, 1, 25, 80] {
            let exhibits = placeholder_exhibits(count);
            let gallery = generate_gallery(&exhibits, seed, &GalleryConfig::default()).unwrap();
            assert!(gallery.layout.capacity > count);

            let placed: Vec<usize> = gallery
                .compiled
                .slots
                .iter()
                .filter_map(|s| s.content.exhibit_index())
                .collect();
            assert_eq!(placed.len(), count);
            assert_eq!(placed.iter().collect::<HashSet<_>>().len(), count);
            assert_eq!(gallery.compiled.plaques.len(), count);
        }
    }
}

#[test]
fn test_no_exhibits_means_all_filler() {
    let gallery = generate_gallery(&[], 7, &GalleryConfig::default()).unwrap();
    assert_eq!(gallery.layout.size, 5);
    assert!(!gallery.compiled.slots.is_empty());
    assert!(gallery.compiled.slots.iter().all(|s| s.content == SlotContent::Filler));
    assert!(gallery.compiled.plaques.is_empty());
}

#[test]
fn test_no_unclassified_cells_reach_placement() {
    for seed in [2, 9, -4] {
        for size in [8, 17, 30] {
            let occupancy = generate_occupancy(size, seed);
            let grid = classify(&occupancy);
            for (x, y, tile) in grid.iter() {
                assert_eq!(
                    *occupancy.get(x, y),
                    *tile != TileType::Void,
                    "seed {} size {} at ({}, {})",
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
fn test_decorations_can_be_disabled() {
    let exhibits = placeholder_exhibits(60);
    let config = GalleryConfig::default().without_decorations();
    let gallery = generate_gallery(&exhibits, 3, &config).unwrap();
    assert!(gallery.compiled.batch(TileCategory::Chair).is_empty());
    assert!(gallery.compiled.batch(TileCategory::Plant).is_empty());
    assert!(!gallery.compiled.batch(TileCategory::Floor).is_empty());
}

#[test]
fn test_cancelled_before_start() {
    let token = CancelToken::new();
    token.cancel();
    let err = generate_gallery_with(
        &placeholder_exhibits(10),
        GallerySeeds::from_master(7),
        &GalleryConfig::default(),
        Some(&token),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, GalleryError::Sizing(SizingError::Cancelled { size: 5 })));
}

#[test]
fn test_json_exhibits_flow_to_plaques() {
    let json = r#"[
        {"image_url": "https://example.org/1.jpg", "title": "Harbour", "author": "M. Lind",
         "width": 1200, "height": 800},
        {"image_url": "https://example.org/2.jpg", "title": "Orchard", "author": "S. Okafor",
         "aspect_ratio": 0.8}
    ]"#;
    let exhibits = parse_exhibits(json).unwrap();
    let gallery = generate_gallery(&exhibits, 7, &GalleryConfig::default()).unwrap();
    let plaques = &gallery.compiled.plaques;
    assert_eq!(plaques.len(), 2);
    assert_eq!(plaques[0].title, "Harbour");
    assert_eq!(plaques[1].author, "S. Okafor");
    let second = &gallery.compiled.slots[plaques[1].slot.0 as usize];
    assert_eq!(second.content, SlotContent::Exhibit { index: 1 });
    let [w, h] = second.frame_size;
    assert!((w / h - 0.8).abs() < 1e-5);
}

#[test]
fn test_exports_write_files() {
    let exhibits = placeholder_exhibits(12);
    let gallery = generate_gallery(&exhibits, 11, &GalleryConfig::default()).unwrap();
    let dir = std::env::temp_dir();

    let report = dir.join("gallery_gen_test_report.txt");
    let report_path = report.to_str().unwrap();
    export_gallery_file(&gallery.layout, &gallery.compiled, report_path, true).unwrap();
    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("=== GALLERY GENERATOR LAYOUT FILE ==="));
    assert!(text.contains("Seed: 11"));
    assert!(text.contains("Untitled #12"));

    let json = dir.join("gallery_gen_test.json");
    export_gallery_json(&gallery, &exhibits, json.to_str().unwrap()).unwrap();
    let text = std::fs::read_to_string(&json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["capacity"], gallery.layout.capacity);

    let png = dir.join("gallery_gen_test.png");
    let png_path = png.to_str().unwrap();
    export_layout_png(&gallery.layout.grid, Some(&gallery.compiled), png_path).unwrap();
    assert!(std::fs::metadata(&png).unwrap().len() > 0);

    let _ = std::fs::remove_file(report);
    let _ = std::fs::remove_file(json);
    let _ = std::fs::remove_file(png);
}
