use std::str::FromStr;

use super::{Point, Polygon};
use crate::utils::{ParseError, Scanner};

/// A submitted folding: `n` source vertices in the unit square, their images
/// after folding, and `m` facets given as index lists into both point
/// arrays. The facet polygons are materialized once, at parse time.
#[derive(Debug, Clone)]
pub struct SolutionSpec {
  pub src_points: Vec<Point>,
  pub dst_points: Vec<Point>,
  pub facet_defs: Vec<Vec<usize>>,
  pub src_facets: Vec<Polygon>,
  pub dst_facets: Vec<Polygon>,
}

impl FromStr for SolutionSpec {
  type Err = ParseError;

  fn from_str(input: &str) -> Result<SolutionSpec, ParseError> {
    let mut scanner = Scanner::new(input);
    let vertex_count = scanner.count()?;
    let mut src_points = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
      src_points.push(scanner.point()?);
    }
    let facet_count = scanner.count()?;
    let mut facet_defs = Vec::with_capacity(facet_count);
    for _ in 0..facet_count {
      let arity = scanner.count()?;
      let mut facet_def = Vec::with_capacity(arity);
      for _ in 0..arity {
        let index = scanner.count()?;
        if index >= vertex_count {
          return Err(ParseError::FacetVertexOutOfRange {
            index,
            count: vertex_count,
          });
        }
        facet_def.push(index);
      }
      facet_defs.push(facet_def);
    }
    let mut dst_points = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
      dst_points.push(scanner.point()?);
    }
    let facets = |points: &[Point]| {
      facet_defs
        .iter()
        .map(|def| Polygon::new(def.iter().map(|&i| points[i].clone()).collect()))
        .collect()
    };
    let src_facets = facets(&src_points);
    let dst_facets = facets(&dst_points);
    Ok(SolutionSpec {
      src_points,
      dst_points,
      facet_defs,
      src_facets,
      dst_facets,
    })
  }
}
