//! Toroidal neighbour mapping.
//!
//! The generated world wraps horizontally and vertically, so every cell has
//! exactly four cardinal neighbours.

/// Wraps a possibly out-of-range coordinate into `[0, size)`.
#[inline]
pub fn wrap_coord(v: i64, size: usize) -> usize {
    debug_assert!(size > 0);
    v.rem_euclid(size as i64) as usize
}

/// Returns the four cardinal neighbours of `(x, y)` as `(x, y)` pairs, in the
/// order left, right, up, down.
pub fn neighbor_4(width: usize, height: usize, x: usize, y: usize) -> [(usize, usize); 4] {
    let (xi, yi) = (x as i64, y as i64);
    [
        (wrap_coord(xi - 1, width), y),
        (wrap_coord(xi + 1, width), y),
        (x, wrap_coord(yi - 1, height)),
        (x, wrap_coord(yi + 1, height)),
    ]
}

/// Same as [`neighbor_4`] but works on flat indices.
pub fn neighbor_4_index(width: usize, height: usize, index: usize) -> [usize; 4] {
    let (x, y) = (index % width, index / width);
    neighbor_4(width, height, x, y).map(|(nx, ny)| ny * width + nx)
}
