use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::{Point, Segment, Vector};

/// Flips every segment whose direction lies in quadrant 3 or 4, so that all
/// directions point into the upper half-plane. Segments on the same
/// undirected line then share a direction, which is what lets
/// [`merge_segments`] collapse them instead of cancelling them.
pub fn normalize_direction(segments: &[Segment]) -> Vec<Segment> {
  segments
    .iter()
    .map(|segment| {
      if segment.dir.quadrant() >= 3 {
        segment.reversed()
      } else {
        segment.clone()
      }
    })
    .collect()
}

pub fn reverse_segments(segments: &[Segment]) -> Vec<Segment> {
  segments.iter().map(Segment::reversed).collect()
}

// Canonical representative of the undirected infinite line a segment spans.
// Ordered by the foot of the perpendicular from the origin, then by the
// angle of the direction normalized into the upper half-plane; two keys
// compare equal exactly when the segments lie on one line.
struct LineKey {
  foot: Point,
  up_dir: Vector,
}

impl LineKey {
  fn of(segment: &Segment) -> LineKey {
    let pos: Vector = (&segment.pos).into();
    let along = pos.inner(&segment.dir) / segment.dir.squared_magnitude();
    let foot = &segment.pos - &segment.dir.scaled(&along);
    let up_dir = if segment.dir.quadrant() >= 3 {
      -&segment.dir
    } else {
      segment.dir.clone()
    };
    LineKey { foot, up_dir }
  }
}

impl Ord for LineKey {
  fn cmp(&self, other: &Self) -> Ordering {
    // Distinct lines share a foot only when both pass through the origin;
    // the angular order is a total order there.
    self
      .foot
      .cmp(&other.foot)
      .then_with(|| self.up_dir.ccw_angle_cmp(&other.up_dir))
  }
}

impl PartialOrd for LineKey {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for LineKey {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for LineKey {}

/// Reduces a multiset of directed segments to a minimal equivalent one by
/// signed one-dimensional coverage per line: a segment counts +1 along its
/// direction and -1 against it, endpoints are swept in canonical order, and
/// a segment is emitted whenever the accumulated level returns to zero.
/// Overlaps of like direction collapse; opposite directions cancel. Interior
/// walls shared by two trapezoids disappear exactly this way.
pub fn merge_segments(segments: &[Segment]) -> Vec<Segment> {
  let mut lines: BTreeMap<LineKey, Vec<&Segment>> = BTreeMap::new();
  for segment in segments {
    lines.entry(LineKey::of(segment)).or_default().push(segment);
  }
  let mut merged = Vec::new();
  for (_, on_line) in lines {
    let mut events: BTreeMap<Point, i32> = BTreeMap::new();
    for segment in on_line {
      *events.entry(segment.pos.clone()).or_insert(0) += 1;
      *events.entry(segment.target()).or_insert(0) -= 1;
    }
    let mut level: i32 = 0;
    let mut start: Option<Point> = None;
    for (cur, delta) in events {
      if level > 0 && level + delta <= 0 {
        let from = start.clone().expect("positive run without a start point");
        merged.push(Segment::from_endpoints(from, cur.clone()));
      } else if level < 0 && level + delta >= 0 {
        let to = start.clone().expect("negative run without a start point");
        merged.push(Segment::from_endpoints(cur.clone(), to));
      }
      if (level >= 0 && level + delta < 0) || (level <= 0 && level + delta > 0) {
        start = Some(cur);
      }
      level += delta;
    }
  }
  merged
}

#[cfg(test)]
mod tests {
  use super::*;

  fn point(s: &str) -> Point {
    s.parse().unwrap()
  }

  fn segment(a: &str, b: &str) -> Segment {
    Segment::from_endpoints(point(a), point(b))
  }

  #[test]
  fn normalize_flips_downward_directions() {
    let normalized = normalize_direction(&[
      segment("0,0", "1,1"),
      segment("1,1", "0,0"),
      segment("2,2", "2,1"),
    ]);
    assert_eq!(normalized[0], segment("0,0", "1,1"));
    assert_eq!(normalized[1], segment("0,0", "1,1"));
    assert_eq!(normalized[2], segment("2,1", "2,2"));
  }

  #[test]
  fn reverse_flips_everything() {
    let reversed = reverse_segments(&[segment("0,0", "1,0"), segment("0,1", "0,0")]);
    assert_eq!(reversed, vec![segment("1,0", "0,0"), segment("0,0", "0,1")]);
  }

  #[test]
  fn like_directions_collapse() {
    let merged = merge_segments(&[segment("0,0", "2,0"), segment("1,0", "3,0")]);
    assert_eq!(merged, vec![segment("0,0", "3,0")]);
  }

  #[test]
  fn touching_runs_fuse() {
    let merged = merge_segments(&[segment("0,0", "1,1"), segment("1,1", "2,2")]);
    assert_eq!(merged, vec![segment("0,0", "2,2")]);
  }

  #[test]
  fn opposite_directions_cancel_on_overlap() {
    let merged = merge_segments(&[segment("0,0", "3,0"), segment("2,0", "1,0")]);
    assert_eq!(merged, vec![segment("0,0", "1,0"), segment("2,0", "3,0")]);
  }

  #[test]
  fn exact_opposites_vanish() {
    let merged = merge_segments(&[segment("0,0", "1,1"), segment("1,1", "0,0")]);
    assert!(merged.is_empty());
  }

  #[test]
  fn leftover_reverse_coverage_keeps_its_direction() {
    let merged = merge_segments(&[segment("3,0", "0,0"), segment("0,0", "1,0")]);
    assert_eq!(merged, vec![segment("3,0", "1,0")]);
  }

  #[test]
  fn parallel_lines_stay_apart() {
    let merged = merge_segments(&[segment("0,0", "1,0"), segment("0,1", "1,1")]);
    assert_eq!(merged.len(), 2);
  }

  #[test]
  fn lines_through_the_origin_are_told_apart() {
    let merged = merge_segments(&[segment("-1,-1", "1,1"), segment("-1,1", "1,-1")]);
    assert_eq!(merged.len(), 2);
  }
}
