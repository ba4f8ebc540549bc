//! Generation configuration

use crate::occupancy::MaskParams;
use crate::placement::PlacementParams;
use crate::sizer::SizerParams;

/// All tunables for one gallery run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalleryConfig {
    pub mask: MaskParams,
    pub sizer: SizerParams,
    pub placement: PlacementParams,
}

impl GalleryConfig {
    pub fn with_size_bounds(mut self, start_size: usize, max_size: usize) -> Self {
        self.sizer = SizerParams { start_size, max_size };
        self
    }

    pub fn without_decorations(mut self) -> Self {
        self.placement.decorations = false;
        self
    }
}
