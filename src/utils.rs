use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use thiserror::Error;

use crate::data::Point;

/// Malformed problem or solution text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("unexpected end of input")]
  UnexpectedEnd,
  #[error("malformed count {0:?}")]
  InvalidCount(String),
  #[error("malformed number {0:?}")]
  InvalidNumber(String),
  #[error("malformed point {0:?}")]
  InvalidPoint(String),
  #[error("facet refers to vertex #{index} but only {count} vertices are defined")]
  FacetVertexOutOfRange { index: usize, count: usize },
}

/// Parses `p/q` or a bare integer into a canonical rational. The result is
/// reduced with a positive denominator regardless of the spelling.
pub(crate) fn parse_rational(token: &str) -> Result<BigRational, ParseError> {
  let bigint = |s: &str| {
    s.parse::<BigInt>()
      .map_err(|_| ParseError::InvalidNumber(token.to_string()))
  };
  match token.split_once('/') {
    None => Ok(BigRational::from_integer(bigint(token)?)),
    Some((numer, denom)) => {
      let denom = bigint(denom)?;
      if denom.is_zero() {
        return Err(ParseError::InvalidNumber(token.to_string()));
      }
      Ok(BigRational::new(bigint(numer)?, denom))
    }
  }
}

/// Whitespace-token scanner shared by the problem and solution parsers.
pub(crate) struct Scanner<'a> {
  tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Scanner<'a> {
  pub(crate) fn new(input: &'a str) -> Scanner<'a> {
    Scanner {
      tokens: input.split_whitespace(),
    }
  }

  pub(crate) fn token(&mut self) -> Result<&'a str, ParseError> {
    self.tokens.next().ok_or(ParseError::UnexpectedEnd)
  }

  pub(crate) fn count(&mut self) -> Result<usize, ParseError> {
    let token = self.token()?;
    token
      .parse()
      .map_err(|_| ParseError::InvalidCount(token.to_string()))
  }

  pub(crate) fn point(&mut self) -> Result<Point, ParseError> {
    self.token()?.parse()
  }
}
