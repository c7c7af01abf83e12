use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::algorithms::make_complex_polygon;
use crate::data::{make_counterclockwise, ProblemSpec, SolutionSpec};

/// The exact resemblance of a valid solution to a problem: the area of the
/// intersection of target and folded silhouette over the area of their
/// union, a rational in [0, 1].
pub fn resemblance(problem: &ProblemSpec, solution: &SolutionSpec) -> BigRational {
  let silhouette = make_complex_polygon(&make_counterclockwise(&solution.dst_facets));
  let union_area = problem.silhouette.union(&silhouette).signed_area();
  let intersection_area = problem.silhouette.intersection(&silhouette).signed_area();
  debug!(
    "union area = {}, intersection area = {}",
    union_area, intersection_area
  );
  intersection_area / union_area
}

/// The contest score: the floor of one million times the resemblance.
pub fn integer_resemblance(problem: &ProblemSpec, solution: &SolutionSpec) -> i64 {
  let resemblance = resemblance(problem, solution);
  let scaled: BigInt = BigInt::from(1_000_000) * resemblance.numer() / resemblance.denom();
  scaled.to_i64().expect("resemblance is bounded by one")
}
