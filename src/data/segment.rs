use num_rational::BigRational;
use num_traits::Zero;

use super::{Point, Vector};

/// A directed segment from `pos` to `pos + dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
  pub pos: Point,
  pub dir: Vector,
}

/// The infinite line through `pos` with direction `dir`; same representation
/// as a segment.
pub type Line = Segment;

impl Segment {
  pub fn from_pos_and_dir(pos: Point, dir: Vector) -> Segment {
    Segment { pos, dir }
  }

  pub fn from_endpoints(a: Point, b: Point) -> Segment {
    let dir = &b - &a;
    Segment { pos: a, dir }
  }

  pub fn target(&self) -> Point {
    &self.pos + &self.dir
  }

  pub fn reversed(&self) -> Segment {
    Segment::from_pos_and_dir(self.target(), -&self.dir)
  }

  /// Intersection of the two infinite lines, if they are not parallel.
  pub fn line_intersection(&self, other: &Line) -> Option<Point> {
    let denom = other.dir.outer(&self.dir);
    if denom.is_zero() {
      return None;
    }
    let along = other.dir.outer(&(&other.pos - &self.pos)) / denom;
    Some(&self.pos + &self.dir.scaled(&along))
  }

  /// Closed-segment intersection test; touching endpoints and collinear
  /// overlap both count.
  pub fn intersects(&self, other: &Segment) -> bool {
    let s0 = &self.pos;
    let s1 = self.target();
    let t0 = &other.pos;
    let t1 = other.target();
    ccw(s0, &s1, t0) * ccw(s0, &s1, &t1) <= 0 && ccw(t0, &t1, s0) * ccw(t0, &t1, &s1) <= 0
  }

  /// The crossing point when it lies strictly inside both segments. Parallel
  /// segments and boundary touches yield `None`.
  pub fn interior_intersection(&self, other: &Segment) -> Option<Point> {
    if self.dir.outer(&other.dir).is_zero() {
      return None;
    }
    let zero = BigRational::zero();
    let one = BigRational::from_integer(1.into());
    let along_self =
      other.dir.outer(&(&other.pos - &self.pos)) / other.dir.outer(&self.dir);
    let along_other =
      self.dir.outer(&(&self.pos - &other.pos)) / self.dir.outer(&other.dir);
    if zero < along_self && along_self < one && zero < along_other && along_other < one {
      Some(&self.pos + &self.dir.scaled(&along_self))
    } else {
      None
    }
  }

  /// True iff `p` lies on this segment strictly between its endpoints.
  pub fn interior_contains(&self, p: &Point) -> bool {
    let diff = p - &self.pos;
    if !self.dir.outer(&diff).is_zero() {
      return false;
    }
    let along = self.dir.inner(&diff);
    BigRational::zero() < along && along < self.dir.squared_magnitude()
  }
}

// Placement of `s` against the directed ray p -> r: +1 strictly left,
// -1 strictly right. Collinear points: -1 behind p, +1 beyond r, 0 between
// them inclusive.
fn ccw(p: &Point, r: &Point, s: &Point) -> i8 {
  let a = r - p;
  let b = s - p;
  let op = a.outer(&b);
  let zero = BigRational::zero();
  if op > zero {
    return 1;
  }
  if op < zero {
    return -1;
  }
  if &a.x * &b.x < zero || &a.y * &b.y < zero {
    return -1;
  }
  if a.squared_magnitude() < b.squared_magnitude() {
    return 1;
  }
  0
}
