//! Path smoothing by straight-line skipping
//!
//! Uses tile passability along a Bresenham line, not the pixel sampled
//! line of sight in `TerrainGrid`: what matters here is whether a mover can
//! walk the segment, not whether it can see along it.

use crate::core::types::{MobilityClass, TileCoord};
use crate::terrain::{bresenham_line, TerrainGrid};

/// True if every tile on the Bresenham line between the two tiles is
/// passable for the mobility class (endpoints included)
pub fn has_clear_tile_line(
    grid: &TerrainGrid,
    from: TileCoord,
    to: TileCoord,
    mobility: MobilityClass,
) -> bool {
    bresenham_line(from, to)
        .into_iter()
        .all(|tile| grid.is_tile_passable(tile, mobility))
}

/// Drop waypoints that a straight walk can skip.
///
/// From each anchor, scans back from the end of the path and jumps to the
/// farthest waypoint with a clear line. Keeps the first and last waypoints
/// and only ever returns waypoints taken from `path`.
pub fn smooth_path(grid: &TerrainGrid, path: &[TileCoord], mobility: MobilityClass) -> Vec<TileCoord> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let last = path.len() - 1;
    let mut smoothed = vec![path[0]];
    let mut anchor = 0;

    while anchor < last {
        let next = (anchor + 2..=last)
            .rev()
            .find(|&candidate| has_clear_tile_line(grid, path[anchor], path[candidate], mobility))
            .unwrap_or(anchor + 1);

        smoothed.push(path[next]);
        anchor = next;
    }

    smoothed
}
