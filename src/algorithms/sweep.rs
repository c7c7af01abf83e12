use num_rational::BigRational;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::boundary_walk::walk_segments;
use super::segment_merge::merge_segments;
use crate::data::{split_to_segments, ComplexPolygon, Point, Polygon, Segment};

// An edge chord crossing one ribbon. `open` means the edge runs downward
// through the strip and is therefore the left wall of the region on its
// right.
struct Side {
  open: bool,
  bottom_x: BigRational,
  top_x: BigRational,
  color: usize,
}

struct Ribbon {
  bottom_y: BigRational,
  top_y: BigRational,
  sides: Vec<Side>,
}

// Open sides sort before close sides with the same geometry so that touching
// regions fuse into one trapezoid.
fn compare_sides(a: &Side, b: &Side) -> Ordering {
  a.bottom_x
    .cmp(&b.bottom_x)
    .then_with(|| a.top_x.cmp(&b.top_x))
    .then_with(|| (!a.open).cmp(&(!b.open)))
}

// The x coordinate where the chord meets the horizontal line at `y`. Only
// called for segments that straddle the line, so `dir.y` is non-zero.
fn chord_x(segment: &Segment, y: &BigRational) -> BigRational {
  &segment.pos.x + &segment.dir.x * ((y - &segment.pos.y) / &segment.dir.y)
}

// Carves the plane into horizontal strips free of vertices and crossings,
// so every edge chord inside a strip runs straight from bottom to top.
fn compute_ribbons(colored: &[(usize, &[Polygon])]) -> Vec<Ribbon> {
  let mut ys: BTreeSet<BigRational> = BTreeSet::new();
  for (_, polygons) in colored {
    for polygon in polygons.iter() {
      for point in &polygon.points {
        ys.insert(point.y.clone());
      }
    }
  }
  let colored_segments: Vec<(usize, Vec<Segment>)> = colored
    .iter()
    .map(|(color, polygons)| (*color, split_to_segments(polygons)))
    .collect();
  let all_segments: Vec<&Segment> = colored_segments
    .iter()
    .flat_map(|(_, segments)| segments)
    .collect();
  for i in 0..all_segments.len() {
    for j in i + 1..all_segments.len() {
      if let Some(crossing) = all_segments[i].interior_intersection(all_segments[j]) {
        ys.insert(crossing.y);
      }
    }
  }
  let ys: Vec<BigRational> = ys.into_iter().collect();

  let mut ribbons = Vec::new();
  for window in ys.windows(2) {
    let (bottom_y, top_y) = (&window[0], &window[1]);
    let mut sides = Vec::new();
    for (color, segments) in &colored_segments {
      for segment in segments {
        let starts_above = &segment.pos.y >= top_y;
        let ends_above = &segment.target().y >= top_y;
        if starts_above != ends_above {
          sides.push(Side {
            open: starts_above,
            bottom_x: chord_x(segment, bottom_y),
            top_x: chord_x(segment, top_y),
            color: *color,
          });
        }
      }
    }
    sides.sort_by(compare_sides);
    ribbons.push(Ribbon {
      bottom_y: bottom_y.clone(),
      top_y: top_y.clone(),
      sides,
    });
  }
  ribbons
}

// A positive polygon spanning the strip between two walls; degenerate
// corners collapse so a triangle comes out with three vertices.
fn make_trapezoid(
  left: &Side,
  right: &Side,
  bottom_y: &BigRational,
  top_y: &BigRational,
) -> Polygon {
  let mut corners = vec![Point::new(left.bottom_x.clone(), bottom_y.clone())];
  if left.bottom_x != right.bottom_x {
    corners.push(Point::new(right.bottom_x.clone(), bottom_y.clone()));
  }
  corners.push(Point::new(right.top_x.clone(), top_y.clone()));
  if left.top_x != right.top_x {
    corners.push(Point::new(left.top_x.clone(), top_y.clone()));
  }
  Polygon::new(corners)
}

fn merge_disjoint(trapezoids: &[Polygon]) -> ComplexPolygon {
  walk_segments(merge_segments(&split_to_segments(trapezoids)))
}

/// Canonicalizes any multiset of signed polygons into a [`ComplexPolygon`]
/// covering the same region: negative polygons carve holes, overlaps of
/// positive polygons collapse. This is also the union operator when handed
/// the polygons of two regions at once.
pub fn make_complex_polygon(polygons: &[Polygon]) -> ComplexPolygon {
  let ribbons = compute_ribbons(&[(1, polygons)]);
  let mut trapezoids = Vec::new();
  for ribbon in &ribbons {
    let mut level: i32 = 0;
    let mut left_side: Option<&Side> = None;
    for side in &ribbon.sides {
      if side.open {
        if level == 0 {
          left_side = Some(side);
        }
        level += 1;
      } else {
        assert!(level > 0, "close side without a matching open side");
        level -= 1;
        if level == 0 {
          let left = left_side.take().expect("trapezoid closed without a left wall");
          trapezoids.push(make_trapezoid(left, side, &ribbon.bottom_y, &ribbon.top_y));
        }
      }
    }
    assert_eq!(level, 0, "unbalanced sides at end of ribbon");
  }
  merge_disjoint(&trapezoids)
}

impl ComplexPolygon {
  pub fn union(&self, other: &ComplexPolygon) -> ComplexPolygon {
    make_complex_polygon(&[self.polygons.clone(), other.polygons.clone()].concat())
  }

  /// Two-color sweep: a trapezoid is open exactly while both regions are
  /// covering, so the output is the common area.
  pub fn intersection(&self, other: &ComplexPolygon) -> ComplexPolygon {
    let ribbons = compute_ribbons(&[(1, self.polygons.as_slice()), (2, other.polygons.as_slice())]);
    let mut trapezoids = Vec::new();
    for ribbon in &ribbons {
      let mut levels = [0i32; 3];
      let mut left_side: Option<&Side> = None;
      for side in &ribbon.sides {
        if side.open {
          levels[side.color] += 1;
          if levels[side.color] == 1 && levels[1] >= 1 && levels[2] >= 1 {
            left_side = Some(side);
          }
        } else {
          assert!(
            levels[side.color] > 0,
            "close side without a matching open side"
          );
          if levels[side.color] == 1 && levels[1] >= 1 && levels[2] >= 1 {
            let left = left_side.take().expect("trapezoid closed without a left wall");
            trapezoids.push(make_trapezoid(left, side, &ribbon.bottom_y, &ribbon.top_y));
          }
          levels[side.color] -= 1;
        }
      }
      assert_eq!(levels[1], 0, "unbalanced sides at end of ribbon");
      assert_eq!(levels[2], 0, "unbalanced sides at end of ribbon");
    }
    merge_disjoint(&trapezoids)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use num_bigint::BigInt;
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn point(s: &str) -> Point {
    s.parse().unwrap()
  }

  fn rational(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
  }

  fn polygon(points: &[&str]) -> Polygon {
    Polygon::new(points.iter().map(|s| point(s)).collect())
  }

  fn unit_square_at(x: i64, y: i64) -> Polygon {
    let corner = |dx: i64, dy: i64| {
      Point::new(
        BigRational::from_integer(BigInt::from(x + dx)),
        BigRational::from_integer(BigInt::from(y + dy)),
      )
    };
    Polygon::new(vec![corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)])
  }

  #[test]
  fn squares_sharing_a_vertical_wall_fuse() {
    let left = polygon(&["0,0", "1/2,0", "1/2,1", "0,1"]);
    let right = polygon(&["1/2,0", "1,0", "1,1", "1/2,1"]);
    let complex = make_complex_polygon(&[left, right]);
    assert_eq!(complex.polygons.len(), 1);
    assert_eq!(complex.polygons[0].points.len(), 4);
    assert_eq!(complex.signed_area(), rational(1, 1));
  }

  #[test]
  fn squares_sharing_a_horizontal_wall_fuse() {
    let bottom = polygon(&["0,0", "1,0", "1,1/2", "0,1/2"]);
    let top = polygon(&["0,1/2", "1,1/2", "1,1", "0,1"]);
    let complex = make_complex_polygon(&[bottom, top]);
    assert_eq!(complex.polygons.len(), 1);
    assert_eq!(complex.polygons[0].points.len(), 4);
    assert_eq!(complex.signed_area(), rational(1, 1));
  }

  #[test]
  fn overlapping_squares_union() {
    let a = make_complex_polygon(&[unit_square_at(0, 0)]);
    let b = make_complex_polygon(&[unit_square_at(0, 0)]);
    assert_eq!(a.union(&b).signed_area(), rational(1, 1));

    let shifted = make_complex_polygon(&[polygon(&["1/2,0", "3/2,0", "3/2,1", "1/2,1"])]);
    assert_eq!(a.union(&shifted).signed_area(), rational(3, 2));
    assert_eq!(a.intersection(&shifted).signed_area(), rational(1, 2));
  }

  #[test]
  fn disjoint_intersection_is_empty() {
    let a = make_complex_polygon(&[unit_square_at(0, 0)]);
    let b = make_complex_polygon(&[unit_square_at(2, 0)]);
    let intersection = a.intersection(&b);
    assert!(intersection.polygons.is_empty());
    assert_eq!(intersection.signed_area(), rational(0, 1));
    assert_eq!(a.union(&b).signed_area(), rational(2, 1));
  }

  #[test]
  fn hole_polygons_come_out_negative() {
    let outer = polygon(&["0,0", "3,0", "3,3", "0,3"]);
    let hole = polygon(&["1,1", "2,1", "2,2", "1,2"]).reversed();
    let complex = make_complex_polygon(&[outer, hole]);
    assert_eq!(complex.signed_area(), rational(8, 1));
    assert_eq!(complex.polygons.len(), 2);
    let mut areas: Vec<BigRational> = complex
      .polygons
      .iter()
      .map(|polygon| polygon.signed_area())
      .collect();
    areas.sort();
    assert_eq!(areas, vec![rational(-1, 1), rational(9, 1)]);
  }

  #[test]
  fn diagonal_overlap_union() {
    // Two unit squares overlapping in a quarter square.
    let a = make_complex_polygon(&[unit_square_at(0, 0)]);
    let b = make_complex_polygon(&[polygon(&["1/2,1/2", "3/2,1/2", "3/2,3/2", "1/2,3/2"])]);
    assert_eq!(a.union(&b).signed_area(), rational(7, 4));
    assert_eq!(a.intersection(&b).signed_area(), rational(1, 4));
  }

  #[test]
  fn triangles_with_crossing_edges() {
    let a = make_complex_polygon(&[polygon(&["0,0", "2,0", "2,2"])]);
    let b = make_complex_polygon(&[polygon(&["2,0", "0,0", "0,2"]).reversed()]);
    // Each triangle has area 2; they overlap in a quarter of the square.
    assert_eq!(a.intersection(&b).signed_area(), rational(1, 1));
    assert_eq!(a.union(&b).signed_area(), rational(3, 1));
  }

  #[test]
  fn canonicalization_is_idempotent() {
    let overlapping = vec![
      unit_square_at(0, 0),
      polygon(&["1/2,1/2", "3/2,1/2", "3/2,3/2", "1/2,3/2"]),
      polygon(&["1,0", "2,0", "2,1", "1,1"]),
    ];
    let once = make_complex_polygon(&overlapping);
    let twice = make_complex_polygon(&once.polygons);
    assert_eq!(once.signed_area(), twice.signed_area());
  }

  fn coord() -> impl Strategy<Value = BigRational> {
    (-6i64..=6, 1i64..=4).prop_map(|(numer, denom)| rational(numer, denom))
  }

  fn rect() -> impl Strategy<Value = Polygon> {
    (coord(), coord(), coord(), coord())
      .prop_filter("degenerate rectangle", |(x0, x1, y0, y1)| {
        x0 != x1 && y0 != y1
      })
      .prop_map(|(x0, x1, y0, y1)| {
        let (x0, x1) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
        Polygon::new(vec![
          Point::new(x0.clone(), y0.clone()),
          Point::new(x1.clone(), y0),
          Point::new(x1, y1.clone()),
          Point::new(x0, y1),
        ])
      })
  }

  fn triangle() -> impl Strategy<Value = Polygon> {
    (coord(), coord(), coord(), coord(), coord(), coord()).prop_filter_map(
      "degenerate triangle",
      |(ax, ay, bx, by, cx, cy)| {
        let polygon = Polygon::new(vec![
          Point::new(ax, ay),
          Point::new(bx, by),
          Point::new(cx, cy),
        ]);
        let area = polygon.signed_area_2x();
        if area == rational(0, 1) {
          None
        } else if area < rational(0, 1) {
          Some(polygon.reversed())
        } else {
          Some(polygon)
        }
      },
    )
  }

  #[proptest]
  fn union_intersection_exactness_prop(
    #[strategy(rect())] a: Polygon,
    #[strategy(rect())] b: Polygon,
  ) {
    let ca = make_complex_polygon(&[a]);
    let cb = make_complex_polygon(&[b]);
    let total = ca.union(&cb).signed_area() + ca.intersection(&cb).signed_area();
    prop_assert_eq!(total, ca.signed_area() + cb.signed_area());
  }

  #[proptest]
  fn triangle_exactness_prop(
    #[strategy(triangle())] a: Polygon,
    #[strategy(triangle())] b: Polygon,
  ) {
    let ca = make_complex_polygon(&[a]);
    let cb = make_complex_polygon(&[b]);
    let total = ca.union(&cb).signed_area() + ca.intersection(&cb).signed_area();
    prop_assert_eq!(total, ca.signed_area() + cb.signed_area());
  }

  #[proptest]
  fn boolean_operators_commute_prop(
    #[strategy(rect())] a: Polygon,
    #[strategy(triangle())] b: Polygon,
  ) {
    let ca = make_complex_polygon(&[a]);
    let cb = make_complex_polygon(&[b]);
    prop_assert_eq!(ca.union(&cb).signed_area(), cb.union(&ca).signed_area());
    prop_assert_eq!(
      ca.intersection(&cb).signed_area(),
      cb.intersection(&ca).signed_area()
    );
  }

  #[proptest]
  fn canonicalization_idempotent_prop(
    #[strategy(rect())] a: Polygon,
    #[strategy(triangle())] b: Polygon,
  ) {
    let once = make_complex_polygon(&[a, b]);
    let twice = make_complex_polygon(&once.polygons);
    prop_assert_eq!(once.signed_area(), twice.signed_area());
  }

  #[proptest]
  fn canonicalization_through_union_prop(
    #[strategy(rect())] a: Polygon,
    #[strategy(triangle())] b: Polygon,
    #[strategy(rect())] x: Polygon,
  ) {
    let raw = vec![a.clone(), b.clone(), x.clone()];
    let canonical = [make_complex_polygon(&[a, b]).polygons, vec![x]].concat();
    prop_assert_eq!(
      make_complex_polygon(&raw).signed_area(),
      make_complex_polygon(&canonical).signed_area()
    );
  }
}
