//! Seed management for gallery generation
//!
//! The caller's seed drives the floor plan directly (it is the noise frequency of the
//! occupancy mask). Decoration rolls get their own seed derived from it so that
//! tweaking one system never reshuffles the other.

/// Seeds for each generation system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GallerySeeds {
    /// Master seed as supplied by the caller
    pub master: i64,
    /// Occupancy mask seed
    pub layout: i64,
    /// Decoration placement (plants, chairs)
    pub decoration: u64,
}

impl GallerySeeds {
    /// Derive all sub-seeds from a master seed.
    pub fn from_master(master: i64) -> Self {
        Self {
            master,
            layout: master,
            decoration: derive_seed(master, "decoration"),
        }
    }

    /// Override the decoration seed, keeping the layout.
    pub fn with_decoration(mut self, seed: u64) -> Self {
        self.decoration = seed;
        self
    }
}

/// Derive a sub-seed from a master seed and a system name.
///
/// Uses FNV-1a over the name followed by a splitmix64 finaliser, so derived seeds are
/// stable across platforms and compiler releases.
fn derive_seed(master: i64, system: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in system.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    splitmix64(hash ^ master as u64)
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl std::fmt::Display for GallerySeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GallerySeeds {{ master: {}, layout: {}, decoration: {} }}",
            self.master, self.layout, self.decoration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(GallerySeeds::from_master(12345), GallerySeeds::from_master(12345));
    }

    #[test]
    fn test_layout_follows_master() {
        for master in [-3, 0, 1, 42] {
            assert_eq!(GallerySeeds::from_master(master).layout, master);
        }
    }

    #[test]
    fn test_nearby_masters_decorate_differently() {
        let a = GallerySeeds::from_master(1).decoration;
        let b = GallerySeeds::from_master(2).decoration;
        assert_ne!(a, b);
    }

    #[test]
    fn test_decoration_override() {
        let seeds = GallerySeeds::from_master(7).with_decoration(99);
        assert_eq!(seeds.decoration, 99);
        assert_eq!(seeds.layout, 7);
    }
}
