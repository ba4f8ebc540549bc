//! Gallery generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod config;
pub mod exhibit;
pub mod export;
pub mod gallery;
pub mod noise_field;
pub mod occupancy;
pub mod placement;
pub mod seeds;
pub mod sizer;
pub mod tilemap;
pub mod topology;

pub use config::GalleryConfig;
pub use gallery::{generate_gallery, generate_gallery_with, Gallery, GalleryError};
