//! Exact geometry engine for judging origami folding contests.
//!
//! A *problem* is a target silhouette in the plane; a *solution* is a set of
//! facets of the unit square together with their folded images. The crate
//! validates solutions and scores them by the exact rational ratio of
//! intersection area to union area between target and folded silhouette.
//! All arithmetic is over [`num_rational::BigRational`]; there is no epsilon
//! anywhere.

pub mod algorithms;
pub mod data;
mod score;
mod utils;
mod validate;

pub use score::{integer_resemblance, resemblance};
pub use utils::ParseError;
pub use validate::{congruent_mapping, validate_solution, ValidateError};
