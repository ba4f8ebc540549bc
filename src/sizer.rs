//! Capacity-driven grid sizing
//!
//! Grows the grid one cell at a time, regenerating and reclassifying from scratch on
//! every step, until the layout can host more exhibits than requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::occupancy::{generate_occupancy_with, MaskParams};
use crate::topology::{classify, TypedGrid};

/// Bounds of the sizing search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizerParams {
    /// First grid size tried
    pub start_size: usize,
    /// Largest grid size tried before giving up
    pub max_size: usize,
}

impl Default for SizerParams {
    fn default() -> Self {
        Self {
            start_size: 5,
            max_size: 200,
        }
    }
}

/// Shared flag a caller can raise to stop a running search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// An accepted layout.
#[derive(Clone, Debug)]
pub struct SizedLayout {
    pub seed: i64,
    pub size: usize,
    pub grid: TypedGrid,
    pub capacity: usize,
    /// Number of grid sizes tried, including the accepted one
    pub attempts: usize,
}

/// Errors that can occur while sizing a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    /// No size up to `max_size` gave enough capacity
    Unsatisfiable {
        target: usize,
        max_size: usize,
        best_capacity: usize,
    },
    /// The search was cancelled before trying `size`
    Cancelled { size: usize },
    InvalidParams(String),
}

impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::Unsatisfiable { target, max_size, best_capacity } => write!(
                f,
                "Capacity unsatisfiable: {} exhibits requested, best capacity up to size {} was {}",
                target, max_size, best_capacity
            ),
            SizingError::Cancelled { size } => write!(f, "Sizing cancelled before size {}", size),
            SizingError::InvalidParams(e) => write!(f, "Invalid sizer parameters: {}", e),
        }
    }
}

impl std::error::Error for SizingError {}

/// Find the first grid size whose capacity strictly exceeds `target`.
pub fn size_layout(
    target: usize,
    seed: i64,
    mask: &MaskParams,
    params: &SizerParams,
) -> Result<SizedLayout, SizingError> {
    size_layout_with(target, seed, mask, params, None, None)
}

/// Sizing with an optional cancel token and a progress callback `(size, capacity)`
/// invoked after every attempt.
pub fn size_layout_with(
    target: usize,
    seed: i64,
    mask: &MaskParams,
    params: &SizerParams,
    cancel: Option<&CancelToken>,
    progress: Option<&dyn Fn(usize, usize)>,
) -> Result<SizedLayout, SizingError> {
    if params.start_size == 0 || params.start_size > params.max_size {
        return Err(SizingError::InvalidParams(format!(
            "start size {} must be in 1..={}",
            params.start_size, params.max_size
        )));
    }

    let mut best_capacity = 0;
    for (attempt, size) in (params.start_size..=params.max_size).enumerate() {
        if cancel.map_or(false, |c| c.is_cancelled()) {
            return Err(SizingError::Cancelled { size });
        }

        let grid = classify(&generate_occupancy_with(size, seed, mask));
        let capacity = grid.capacity();
        if let Some(cb) = progress {
            cb(size, capacity);
        }

        if capacity > target {
            return Ok(SizedLayout {
                seed,
                size,
                grid,
                capacity,
                attempts: attempt + 1,
            });
        }
        best_capacity = best_capacity.max(capacity);
    }

    Err(SizingError::Unsatisfiable {
        target,
        max_size: params.max_size,
        best_capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn size(target: usize, seed: i64) -> Result<SizedLayout, SizingError> {
        size_layout(target, seed, &MaskParams::default(), &SizerParams::default())
    }

    #[test]
    fn test_known_sizes_for_seed_7() {
        let known = [(0, 5, 5), (5, 8, 9), (20, 11, 23), (50, 16, 57), (100, 20, 102)];
        for (target, expected_size, expected_capacity) in known {
            let layout = size(target, 7).unwrap();
            assert_eq!(layout.size, expected_size, "target {}", target);
            assert_eq!(layout.capacity, expected_capacity, "target {}", target);
            assert_eq!(layout.grid.width, layout.size);
        }
    }

    #[test]
    fn test_capacity_strictly_exceeds_target() {
        for seed in [1, 3, 42, -5] {
            for target in [0, 10, 60, 150] {
                let layout = size(target, seed).unwrap();
                assert!(layout.capacity > target);
                assert_eq!(layout.grid.capacity(), layout.capacity);
                assert_eq!(layout.attempts, layout.size - SizerParams::default().start_size + 1);
            }
        }
    }

    #[test]
    fn test_accepted_size_is_the_first_that_fits() {
        let layout = size(60, 3).unwrap();
        let mask = MaskParams::default();
        for smaller in SizerParams::default().start_size..layout.size {
            let capacity = classify(&generate_occupancy_with(smaller, 3, &mask)).capacity();
            assert!(capacity <= 60, "size {} already had capacity {}", smaller, capacity);
        }
    }

    #[test]
    fn test_search_continues_past_capacity_drops() {
        // The seed is a noise frequency scaled by 1/N, so capacity can fall as N grows
        let mask = MaskParams::default();
        let capacities: Vec<usize> = (5..=8)
            .map(|n| classify(&generate_occupancy_with(n, 7, &mask)).capacity())
            .collect();
        assert_eq!(capacities, vec![5, 4, 0, 9]);

        let layout = size(5, 7).unwrap();
        assert_eq!(layout.size, 8);
        assert_eq!(layout.attempts, 4);
    }

    #[test]
    fn test_unsatisfiable_is_reported() {
        let params = SizerParams { start_size: 5, max_size: 12 };
        let err = size_layout(10_000, 7, &MaskParams::default(), &params).unwrap_err();
        match err {
            SizingError::Unsatisfiable { target, max_size, best_capacity } => {
                assert_eq!(target, 10_000);
                assert_eq!(max_size, 12);
                assert!(best_capacity > 0 && best_capacity < 10_000);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_invalid_params() {
        let mask = MaskParams::default();
        let params = SizerParams { start_size: 0, max_size: 10 };
        assert!(matches!(size_layout(1, 1, &mask, &params), Err(SizingError::InvalidParams(_))));
        let params = SizerParams { start_size: 20, max_size: 10 };
        assert!(matches!(size_layout(1, 1, &mask, &params), Err(SizingError::InvalidParams(_))));
    }

    #[test]
    fn test_cancel_stops_search() {
        let token = CancelToken::new();
        let seen = RefCell::new(Vec::new());
        let progress = |size: usize, _capacity: usize| {
            seen.borrow_mut().push(size);
            if size == 7 {
                token.cancel();
            }
        };
        let result = size_layout_with(
            10_000,
            7,
            &MaskParams::default(),
            &SizerParams::default(),
            Some(&token),
            Some(&progress),
        );
        assert_eq!(result.unwrap_err(), SizingError::Cancelled { size: 8 });
        assert_eq!(*seen.borrow(), vec![5, 6, 7]);
    }

    #[test]
    fn test_progress_reports_every_attempt() {
        let calls = RefCell::new(0);
        let progress = |_: usize, _: usize| *calls.borrow_mut() += 1;
        let layout = size_layout_with(
            20,
            7,
            &MaskParams::default(),
            &SizerParams::default(),
            None,
            Some(&progress),
        )
        .unwrap();
        assert_eq!(*calls.borrow(), layout.attempts);
    }
}
