/// A dense 2D grid addressed as `(x, y)` = (column, row).
///
/// Unlike a world map this grid does not wrap: lookups outside the grid are
/// either rejected (`try_get`) or avoided by padding with `add_border`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

/// The eight surrounding offsets, row by row.
pub const MOORE: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Square grid of side `size`.
    pub fn square(size: usize, value: T) -> Self {
        Self::new_with(size, size, value)
    }

    /// Build a grid from row vectors. Returns `None` if rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            data: rows.into_iter().flatten().collect(),
        })
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Bounds-checked lookup with signed coordinates.
    pub fn try_get(&self, x: isize, y: isize) -> Option<&T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    /// Lookup relative to `(x, y)`. Panics in debug builds if the result leaves the grid,
    /// so callers working on a bordered grid never need their own checks.
    pub fn get_offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> &T {
        let nx = (x as isize + dx) as usize;
        let ny = (y as isize + dy) as usize;
        self.get(nx, ny)
    }

    /// Copy of this grid surrounded by a one-cell ring of `fill`.
    pub fn add_border(&self, fill: T) -> Self {
        let mut bordered = Tilemap::new_with(self.width + 2, self.height + 2, fill);
        for (x, y, value) in self.iter() {
            bordered.set(x + 1, y + 1, value.clone());
        }
        bordered
    }

    /// Strip the outer ring added by `add_border`.
    pub fn remove_border(&self) -> Self {
        let width = self.width.saturating_sub(2);
        let height = self.height.saturating_sub(2);
        let mut data = Vec::with_capacity(width * height);
        for y in 1..=height {
            for x in 1..=width {
                data.push(self.get(x, y).clone());
            }
        }
        Self { width, height, data }
    }

    /// Number of cells matching a predicate.
    pub fn count<F: Fn(&T) -> bool>(&self, pred: F) -> usize {
        self.data.iter().filter(|v| pred(v)).count()
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}
