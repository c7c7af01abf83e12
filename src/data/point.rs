use num_rational::BigRational;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::Vector;
use crate::utils::{parse_rational, ParseError};

/// A point in the plane with exact rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
  pub x: BigRational,
  pub y: BigRational,
}

impl Point {
  pub fn new(x: BigRational, y: BigRational) -> Point {
    Point { x, y }
  }
}

// The canonical order: lowest y first, then lowest x. The sweep, the segment
// merger and the boundary walker all rely on this order.
impl Ord for Point {
  fn cmp(&self, other: &Self) -> Ordering {
    self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
  }
}

impl PartialOrd for Point {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Add<&Vector> for &Point {
  type Output = Point;
  fn add(self, rhs: &Vector) -> Point {
    Point::new(&self.x + &rhs.x, &self.y + &rhs.y)
  }
}

impl Sub<&Vector> for &Point {
  type Output = Point;
  fn sub(self, rhs: &Vector) -> Point {
    Point::new(&self.x - &rhs.x, &self.y - &rhs.y)
  }
}

// The displacement from `rhs` to `self`.
impl Sub<&Point> for &Point {
  type Output = Vector;
  fn sub(self, rhs: &Point) -> Vector {
    Vector::new(&self.x - &rhs.x, &self.y - &rhs.y)
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.x, self.y)
  }
}

impl FromStr for Point {
  type Err = ParseError;
  fn from_str(s: &str) -> Result<Point, ParseError> {
    let (x, y) = s
      .split_once(',')
      .ok_or_else(|| ParseError::InvalidPoint(s.to_string()))?;
    Ok(Point::new(parse_rational(x)?, parse_rational(y)?))
  }
}
