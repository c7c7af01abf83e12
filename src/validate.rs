use log::{debug, info};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::algorithms::make_complex_polygon;
use crate::data::{
  make_counterclockwise, signed_area_of, split_to_segments, Point, Polygon, SolutionSpec,
};

/// The first predicate a solution fails, with enough context to locate the
/// offender. `Display` is the single-line descriptor the judge prints after
/// `ValidateSolutionError: `.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
  #[error("Facet #{index} must have no less than 3 vertices")]
  TooFewFacetVertices { index: usize },
  #[error("Source vertex {vertex} is out of the unit square.")]
  SourceVertexOutOfSquare { vertex: Point },
  #[error("No coordinate should appear more than once in the source positions part.")]
  DuplicateSourceVertex,
  #[error("Vertex {vertex} must not lie on an edge.")]
  VertexOnEdgeInterior { vertex: Point },
  #[error("Facet #{index} must not intersect with itself.")]
  SelfIntersectingFacet { index: usize },
  #[error("Facet #{index} is not mapped congruently.")]
  IncongruentFacet { index: usize },
  #[error("The sum of all facets area must be equal to 1. Current coverage area = {area}")]
  FacetAreaSum { area: BigRational },
  #[error("The union set of all facets at source positions must cover the unit square. Current coverage area = {area}")]
  UnitSquareCoverage { area: BigRational },
  #[error("Facet #{i} and #{j} must have non-empty intersection in the destination positions for the \"normalized\" requirement.")]
  UnfoldedNeighbors { i: usize, j: usize },
}

/// Runs the validity predicates in order and reports the first failure.
/// `check_normalized` additionally requires every interior crease to be an
/// actual fold; it is on when compiling a problem and off when judging
/// submissions.
pub fn validate_solution(
  spec: &SolutionSpec,
  check_normalized: bool,
) -> Result<(), ValidateError> {
  info!(
    "validating solution: {} vertices, {} facets",
    spec.src_points.len(),
    spec.facet_defs.len()
  );

  for (index, facet_def) in spec.facet_defs.iter().enumerate() {
    if facet_def.len() < 3 {
      return Err(ValidateError::TooFewFacetVertices { index });
    }
  }
  debug!("facet arity: passed");

  let zero = BigRational::zero();
  let one = BigRational::one();
  for vertex in &spec.src_points {
    if vertex.x < zero || vertex.x > one || vertex.y < zero || vertex.y > one {
      return Err(ValidateError::SourceVertexOutOfSquare {
        vertex: vertex.clone(),
      });
    }
  }
  debug!("unit square containment: passed");

  let mut sorted = spec.src_points.clone();
  sorted.sort();
  if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
    return Err(ValidateError::DuplicateSourceVertex);
  }
  debug!("distinct source vertices: passed");

  for edge in split_to_segments(&spec.src_facets) {
    for vertex in &spec.src_points {
      if edge.interior_contains(vertex) {
        return Err(ValidateError::VertexOnEdgeInterior {
          vertex: vertex.clone(),
        });
      }
    }
  }
  debug!("no vertex inside an edge: passed");

  for (index, facet) in spec.src_facets.iter().enumerate() {
    let edges = facet.to_segments();
    for i in 0..edges.len() {
      for j in i + 2..edges.len() {
        if i == 0 && j == edges.len() - 1 {
          continue;
        }
        if edges[i].intersects(&edges[j]) {
          return Err(ValidateError::SelfIntersectingFacet { index });
        }
      }
    }
  }
  debug!("no self-intersecting facet: passed");

  for index in 0..spec.src_facets.len() {
    if !congruent_mapping(&spec.src_facets[index], &spec.dst_facets[index]) {
      return Err(ValidateError::IncongruentFacet { index });
    }
  }
  debug!("congruent mapping: passed");

  let ccw_facets = make_counterclockwise(&spec.src_facets);
  let area_sum = signed_area_of(&ccw_facets);
  if area_sum != one {
    return Err(ValidateError::FacetAreaSum { area: area_sum });
  }
  let union_area = make_complex_polygon(&ccw_facets).signed_area();
  if union_area != one {
    return Err(ValidateError::UnitSquareCoverage { area: union_area });
  }
  debug!("unit square coverage: passed");

  if check_normalized {
    check_normalized_folding(spec)?;
    debug!("normalized folding: passed");
  }

  Ok(())
}

/// Whether `dst` is an exact rigid image of `src`: every edge keeps its
/// squared length, and one mirror sign makes all consecutive-edge inner and
/// outer products agree.
pub fn congruent_mapping(src: &Polygon, dst: &Polygon) -> bool {
  let src_edges = src.to_segments();
  let dst_edges = dst.to_segments();
  if src_edges.len() != dst_edges.len() {
    return false;
  }
  for (s, d) in src_edges.iter().zip(&dst_edges) {
    if s.dir.squared_magnitude() != d.dir.squared_magnitude() {
      return false;
    }
  }
  let n = src_edges.len();
  'mirror: for &mirrored in &[false, true] {
    for i in 0..n {
      let j = (i + 1) % n;
      if src_edges[i].dir.inner(&src_edges[j].dir) != dst_edges[i].dir.inner(&dst_edges[j].dir) {
        continue 'mirror;
      }
      let op_src = src_edges[i].dir.outer(&src_edges[j].dir);
      let op_dst = dst_edges[i].dir.outer(&dst_edges[j].dir);
      let matches = if mirrored {
        op_src == -&op_dst
      } else {
        op_src == op_dst
      };
      if !matches {
        continue 'mirror;
      }
    }
    return true;
  }
  false
}

// Every source edge shared by two facets must flip their relative
// orientation in the destination; an unflipped pair means the crease is not
// actually folded.
fn check_normalized_folding(spec: &SolutionSpec) -> Result<(), ValidateError> {
  let mut edge_owners: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
  for (index, facet_def) in spec.facet_defs.iter().enumerate() {
    for i in 0..facet_def.len() {
      let a = facet_def[i];
      let b = facet_def[(i + 1) % facet_def.len()];
      let key = (a.min(b), a.max(b));
      edge_owners.entry(key).or_insert_with(Vec::new).push(index);
    }
  }
  let src_signs = facet_signs(&spec.src_facets);
  let dst_signs = facet_signs(&spec.dst_facets);
  for owners in edge_owners.values() {
    assert!(owners.len() <= 2, "an edge is shared by more than two facets");
    if let [i, j] = owners[..] {
      if src_signs[i] * src_signs[j] == dst_signs[i] * dst_signs[j] {
        return Err(ValidateError::UnfoldedNeighbors { i, j });
      }
    }
  }
  Ok(())
}

fn facet_signs(facets: &[Polygon]) -> Vec<i32> {
  facets
    .iter()
    .map(|facet| {
      if facet.signed_area_2x().is_positive() {
        1
      } else {
        -1
      }
    })
    .collect()
}
