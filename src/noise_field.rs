//! Gradient noise field
//!
//! Classic improved gradient noise over a 3D lattice, returning values in `[0, 1]`.
//! The occupancy mask samples it with Perlin's reference permutation so a given
//! seed always produces the same floor plan, independent of any RNG.

use noise::NoiseFn;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Ken Perlin's reference permutation of 0..256.
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Permutation table doubled to 512 entries so corner hashing never wraps.
#[derive(Clone)]
pub struct PermutationTable {
    values: [usize; 512],
}

impl PermutationTable {
    /// Perlin's fixed table.
    pub fn reference() -> Self {
        Self::from_permutation(&REFERENCE_PERMUTATION)
    }

    /// A shuffled permutation of 0..256 driven by `seed`.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut perm: Vec<u8> = (0..=255).collect();
        perm.shuffle(&mut rng);
        Self::from_permutation(&perm)
    }

    fn from_permutation(perm: &[u8]) -> Self {
        let mut values = [0usize; 512];
        for (i, &v) in perm.iter().enumerate().take(256) {
            values[i] = v as usize;
            values[i + 256] = v as usize;
        }
        Self { values }
    }

    #[inline]
    fn at(&self, i: usize) -> usize {
        self.values[i]
    }
}

/// Smoothed gradient noise returning values in `[0, 1]`.
#[derive(Clone)]
pub struct GradientNoise {
    perm: PermutationTable,
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::reference()
    }
}

impl GradientNoise {
    pub fn reference() -> Self {
        Self { perm: PermutationTable::reference() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { perm: PermutationTable::shuffled(seed) }
    }

    /// Sample the field. Total over all finite inputs.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let (zi, zf) = lattice(z);

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let p = &self.perm;
        let a = p.at(xi) + yi;
        let aa = p.at(a) + zi;
        let ab = p.at(a + 1) + zi;
        let b = p.at(xi + 1) + yi;
        let ba = p.at(b) + zi;
        let bb = p.at(b + 1) + zi;

        let near = lerp(
            v,
            lerp(u, grad(p.at(aa), xf, yf, zf), grad(p.at(ba), xf - 1.0, yf, zf)),
            lerp(u, grad(p.at(ab), xf, yf - 1.0, zf), grad(p.at(bb), xf - 1.0, yf - 1.0, zf)),
        );
        let far = lerp(
            v,
            lerp(
                u,
                grad(p.at(aa + 1), xf, yf, zf - 1.0),
                grad(p.at(ba + 1), xf - 1.0, yf, zf - 1.0),
            ),
            lerp(
                u,
                grad(p.at(ab + 1), xf, yf - 1.0, zf - 1.0),
                grad(p.at(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
            ),
        );

        (1.0 + lerp(w, near, far)) / 2.0
    }
}

impl NoiseFn<f64, 3> for GradientNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample(point[0], point[1], point[2])
    }
}

/// Lattice cell (mod 256) and fractional offset.
#[inline]
fn lattice(t: f64) -> (usize, f64) {
    let floor = t.floor();
    ((floor as i64 & 255) as usize, t - floor)
}

/// Quintic smoothing curve 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of 12 edge gradients selected by the low 4 hash bits.
#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
