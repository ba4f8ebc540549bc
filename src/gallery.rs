//! End-to-end gallery generation: size the layout, then compile placements.

use crate::config::GalleryConfig;
use crate::exhibit::{Exhibit, ExhibitError};
use crate::placement::{compile, CompiledGallery, PlacementError};
use crate::seeds::GallerySeeds;
use crate::sizer::{size_layout_with, CancelToken, SizedLayout, SizingError};

/// A sized layout together with its compiled placements.
#[derive(Clone, Debug)]
pub struct Gallery {
    pub seeds: GallerySeeds,
    pub layout: SizedLayout,
    pub compiled: CompiledGallery,
}

/// Errors from any stage of generation
#[derive(Debug)]
pub enum GalleryError {
    Sizing(SizingError),
    Placement(PlacementError),
    Exhibits(ExhibitError),
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::Sizing(e) => write!(f, "{}", e),
            GalleryError::Placement(e) => write!(f, "{}", e),
            GalleryError::Exhibits(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GalleryError::Sizing(e) => Some(e),
            GalleryError::Placement(e) => Some(e),
            GalleryError::Exhibits(e) => Some(e),
        }
    }
}

impl From<SizingError> for GalleryError {
    fn from(e: SizingError) -> Self {
        GalleryError::Sizing(e)
    }
}

impl From<PlacementError> for GalleryError {
    fn from(e: PlacementError) -> Self {
        GalleryError::Placement(e)
    }
}

impl From<ExhibitError> for GalleryError {
    fn from(e: ExhibitError) -> Self {
        GalleryError::Exhibits(e)
    }
}

/// Generate a gallery large enough to hang every exhibit in `exhibits`.
pub fn generate_gallery(
    exhibits: &[Exhibit],
    seed: i64,
    config: &GalleryConfig,
) -> Result<Gallery, GalleryError> {
    generate_gallery_with(exhibits, GallerySeeds::from_master(seed), config, None, None)
}

/// Like [`generate_gallery`], with explicit seeds, a cancel token and a sizing
/// progress callback `(size, capacity)`.
pub fn generate_gallery_with(
    exhibits: &[Exhibit],
    seeds: GallerySeeds,
    config: &GalleryConfig,
    cancel: Option<&CancelToken>,
    progress: Option<&dyn Fn(usize, usize)>,
) -> Result<Gallery, GalleryError> {
    let layout = size_layout_with(
        exhibits.len(),
        seeds.layout,
        &config.mask,
        &config.sizer,
        cancel,
        progress,
    )?;
    let compiled = compile(&layout.grid, exhibits, &config.placement, &seeds)?;
    Ok(Gallery { seeds, layout, compiled })
}
