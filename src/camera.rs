//! Camera clamping shared by both axes of a [`TileMap`](crate::TileMap).

/// Clamp a requested camera offset on one axis.
///
/// Negative requests pin to 0. A request that would leave less than
/// `view_extent` pixels of map visible pins to the far edge. When the map is
/// smaller than the view the far edge is itself negative, so the result is
/// floored at 0.
#[inline]
pub fn clamp_axis(requested: i32, map_extent: i32, view_extent: i32) -> i32 {
    if requested < 0 {
        0
    } else if map_extent - requested < view_extent {
        max_offset(map_extent, view_extent)
    } else {
        requested
    }
}

/// Largest camera offset that still fills the view.
#[inline]
pub fn max_offset(map_extent: i32, view_extent: i32) -> i32 {
    (map_extent - view_extent).max(0)
}
