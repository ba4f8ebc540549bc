//! Placement parameters

/// World-space dimensions and decoration odds used by the placement compiler.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Edge length of one grid cell in world units
    pub tile_size: f32,

    /// Floor-to-ceiling height
    pub wall_height: f32,

    /// Height of a frame's centre above the floor
    pub exhibit_height: f32,

    /// Gap between a frame and the wall it hangs on
    pub wall_offset: f32,

    /// Largest frame (width, height); exhibits are fitted inside it by aspect ratio
    pub max_frame: [f32; 2],

    /// Aspect ratio of filler frames and of exhibits without usable proportions
    pub filler_aspect: f32,

    /// Place plants and chairs in corners
    pub decorations: bool,

    /// Chance a corner gets a plant (0.0-1.0)
    pub plant_chance: f64,

    /// Chance a corner without a plant gets a chair (0.0-1.0)
    pub chair_chance: f64,

    /// Distance from the cell centre toward the corner where decorations stand
    pub decoration_inset: f32,

    /// Eye height of the spawn point
    pub spawn_height: f32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            tile_size: 4.0,
            wall_height: 4.0,
            exhibit_height: 1.8,
            wall_offset: 0.05,
            max_frame: [2.4, 1.8],
            filler_aspect: 1.0,
            decorations: true,
            plant_chance: 0.3,
            chair_chance: 0.3,
            decoration_inset: 1.2,
            spawn_height: 1.7,
        }
    }
}

impl PlacementParams {
    /// Frame size for an aspect ratio (width / height), fitted inside `max_frame`.
    pub fn frame_size(&self, aspect: Option<f32>) -> [f32; 2] {
        let aspect = aspect
            .filter(|a| a.is_finite() && *a > 0.0)
            .unwrap_or(self.filler_aspect);
        let [max_w, max_h] = self.max_frame;
        if aspect >= max_w / max_h {
            [max_w, max_w / aspect]
        } else {
            [max_h * aspect, max_h]
        }
    }
}
