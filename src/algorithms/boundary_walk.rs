use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::BTreeMap;

use crate::data::{ComplexPolygon, Point, Polygon, Segment, Vector};

/// Reassembles merged boundary segments into signed polygons. Outer
/// boundaries come out counterclockwise, hole boundaries clockwise.
///
/// Cycles start at the canonically smallest remaining origin with a
/// synthetic incoming edge arriving from the left, which pins the first
/// step to the outer boundary of that component. At every vertex the walk
/// takes the leftmost turn: the outgoing edge most counterclockwise from
/// the reversed incoming direction. Each step consumes one edge, so the
/// walk terminates.
pub(crate) fn walk_segments(segments: Vec<Segment>) -> ComplexPolygon {
  let mut outgoing: BTreeMap<Point, Vec<Segment>> = BTreeMap::new();
  for segment in segments {
    outgoing
      .entry(segment.pos.clone())
      .or_insert_with(Vec::new)
      .push(segment);
  }
  let mut polygons = Vec::new();
  while let Some(start) = outgoing.keys().next().cloned() {
    let step_right = Vector::new(BigRational::one(), BigRational::zero());
    let mut current = Segment::from_pos_and_dir(&start - &step_right, step_right);
    let mut points = Vec::new();
    loop {
      let vertex = current.target();
      let edges = match outgoing.get_mut(&vertex) {
        Some(edges) => edges,
        None => break,
      };
      let base = -&current.dir;
      let chosen = edges
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
          a.dir
            .relative_to(&base)
            .ccw_angle_cmp(&b.dir.relative_to(&base))
        })
        .map(|(index, _)| index)
        .expect("vertex mapped to an empty edge list");
      current = edges.remove(chosen);
      if edges.is_empty() {
        outgoing.remove(&vertex);
      }
      points.push(current.pos.clone());
    }
    polygons.push(Polygon::new(points));
  }
  ComplexPolygon { polygons }
}
