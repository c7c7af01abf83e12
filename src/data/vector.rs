use num_rational::BigRational;
use num_traits::Zero;
use std::cmp::Ordering;
use std::ops::Neg;

use super::Point;

/// A displacement in the plane with exact rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
  pub x: BigRational,
  pub y: BigRational,
}

impl Vector {
  pub fn new(x: BigRational, y: BigRational) -> Vector {
    Vector { x, y }
  }

  pub fn inner(&self, other: &Vector) -> BigRational {
    &self.x * &other.x + &self.y * &other.y
  }

  pub fn outer(&self, other: &Vector) -> BigRational {
    &self.x * &other.y - &self.y * &other.x
  }

  pub fn squared_magnitude(&self) -> BigRational {
    self.inner(self)
  }

  pub fn is_zero(&self) -> bool {
    self.x.is_zero() && self.y.is_zero()
  }

  pub fn scaled(&self, factor: &BigRational) -> Vector {
    Vector::new(&self.x * factor, &self.y * factor)
  }

  /// The quadrant of a non-zero vector, 1 through 4. Each quadrant owns the
  /// axis it starts from: the positive x-axis is in 1, the positive y-axis
  /// in 2, and so on counterclockwise.
  pub fn quadrant(&self) -> u8 {
    assert!(!self.is_zero(), "the zero vector has no quadrant");
    let zero = BigRational::zero();
    if self.x > zero && self.y >= zero {
      1
    } else if self.x <= zero && self.y > zero {
      2
    } else if self.x < zero && self.y <= zero {
      3
    } else {
      4
    }
  }

  /// Total order on non-zero vectors by counterclockwise angle from the
  /// positive x-axis. No trigonometry: quadrant first, then the sign of the
  /// outer product.
  pub fn ccw_angle_cmp(&self, other: &Vector) -> Ordering {
    self
      .quadrant()
      .cmp(&other.quadrant())
      .then_with(|| BigRational::zero().cmp(&self.outer(other)))
  }

  /// This vector expressed in the frame where `base` points along the
  /// positive x-axis: complex multiplication by the conjugate of `base`.
  /// Scales by |base|, which leaves angles intact.
  pub fn relative_to(&self, base: &Vector) -> Vector {
    Vector::new(self.inner(base), base.outer(self))
  }
}

impl Neg for &Vector {
  type Output = Vector;
  fn neg(self) -> Vector {
    Vector::new(-&self.x, -&self.y)
  }
}

impl From<&Point> for Vector {
  fn from(point: &Point) -> Vector {
    Vector::new(point.x.clone(), point.y.clone())
  }
}
