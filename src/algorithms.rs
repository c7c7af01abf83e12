mod boundary_walk;
mod segment_merge;
mod sweep;

pub use segment_merge::{merge_segments, normalize_direction, reverse_segments};
pub use sweep::make_complex_polygon;
