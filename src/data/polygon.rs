use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::{Point, Segment};

/// A simple signed polygon: counterclockwise vertex order encloses area
/// (positive), clockwise order cuts a hole (negative). Facets read from a
/// solution are stored here too; their order carries no meaning until they
/// are normalized with [`make_counterclockwise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
  pub points: Vec<Point>,
}

impl Polygon {
  pub fn new(points: Vec<Point>) -> Polygon {
    Polygon { points }
  }

  /// Twice the signed area; avoids a division when only the sign matters.
  pub fn signed_area_2x(&self) -> BigRational {
    let n = self.points.len();
    let mut area = BigRational::zero();
    for i in 0..n {
      let p = &self.points[i];
      let q = &self.points[(i + 1) % n];
      area += &p.x * &q.y - &q.x * &p.y;
    }
    area
  }

  pub fn signed_area(&self) -> BigRational {
    self.signed_area_2x() / BigRational::from_integer(2.into())
  }

  /// One directed segment per edge, in traversal order.
  pub fn to_segments(&self) -> Vec<Segment> {
    let n = self.points.len();
    if n < 2 {
      return Vec::new();
    }
    (0..n)
      .map(|i| Segment::from_endpoints(self.points[i].clone(), self.points[(i + 1) % n].clone()))
      .collect()
  }

  pub fn reversed(&self) -> Polygon {
    Polygon::new(self.points.iter().rev().cloned().collect())
  }
}

/// Reverses every clockwise polygon so that all signed areas are positive.
pub fn make_counterclockwise(polygons: &[Polygon]) -> Vec<Polygon> {
  polygons
    .iter()
    .map(|polygon| {
      if polygon.signed_area_2x().is_negative() {
        polygon.reversed()
      } else {
        polygon.clone()
      }
    })
    .collect()
}

pub fn split_to_segments(polygons: &[Polygon]) -> Vec<Segment> {
  polygons
    .iter()
    .flat_map(|polygon| polygon.to_segments())
    .collect()
}

pub fn signed_area_of(polygons: &[Polygon]) -> BigRational {
  polygons
    .iter()
    .map(|polygon| polygon.signed_area())
    .fold(BigRational::zero(), |total, area| total + area)
}

/// A planar region with holes in canonical form: simple signed polygons of
/// which no three share an interior point, and any two that do have opposite
/// signs. Produced by the sweep pipeline; parsed problems are trusted to be
/// in this form already.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexPolygon {
  pub polygons: Vec<Polygon>,
}

impl ComplexPolygon {
  /// Equals the measure of the represented region.
  pub fn signed_area(&self) -> BigRational {
    signed_area_of(&self.polygons)
  }
}
