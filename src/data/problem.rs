use std::fmt;
use std::str::FromStr;

use super::{make_counterclockwise, split_to_segments, ComplexPolygon, Polygon, Segment, SolutionSpec};
use crate::algorithms::{make_complex_polygon, merge_segments, normalize_direction};
use crate::utils::{ParseError, Scanner};

/// A contest problem: the target silhouette plus its skeleton edges. The
/// skeleton is kept for parse and print fidelity; scoring only reads the
/// silhouette.
#[derive(Debug, Clone)]
pub struct ProblemSpec {
  pub silhouette: ComplexPolygon,
  pub skeleton: Vec<Segment>,
}

impl ProblemSpec {
  /// Builds the canonical problem a valid solution folds into: the
  /// silhouette is the canonicalized union of the destination facets, and
  /// the skeleton is the source facet edges collapsed into maximal
  /// undirected runs.
  pub fn from_solution(solution: &SolutionSpec) -> ProblemSpec {
    let silhouette = make_complex_polygon(&make_counterclockwise(&solution.dst_facets));
    let skeleton =
      merge_segments(&normalize_direction(&split_to_segments(&solution.src_facets)));
    ProblemSpec {
      silhouette,
      skeleton,
    }
  }
}

impl FromStr for ProblemSpec {
  type Err = ParseError;

  fn from_str(input: &str) -> Result<ProblemSpec, ParseError> {
    let mut scanner = Scanner::new(input);
    let polygon_count = scanner.count()?;
    let mut polygons = Vec::with_capacity(polygon_count);
    for _ in 0..polygon_count {
      let vertex_count = scanner.count()?;
      let mut points = Vec::with_capacity(vertex_count);
      for _ in 0..vertex_count {
        points.push(scanner.point()?);
      }
      polygons.push(Polygon::new(points));
    }
    let edge_count = scanner.count()?;
    let mut skeleton = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
      let a = scanner.point()?;
      let b = scanner.point()?;
      skeleton.push(Segment::from_endpoints(a, b));
    }
    Ok(ProblemSpec {
      silhouette: ComplexPolygon { polygons },
      skeleton,
    })
  }
}

impl fmt::Display for ProblemSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.silhouette.polygons.len())?;
    for polygon in &self.silhouette.polygons {
      writeln!(f, "{}", polygon.points.len())?;
      for point in &polygon.points {
        writeln!(f, "{}", point)?;
      }
    }
    writeln!(f, "{}", self.skeleton.len())?;
    for edge in &self.skeleton {
      writeln!(f, "{} {}", edge.pos, edge.target())?;
    }
    Ok(())
  }
}
