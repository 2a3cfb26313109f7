//! .
//!
//! Errors raised by configuration loading, caption parsing and placement.
//! [`Error::UnplaceableShape`] never leaves the placement engine: it is the
//! restart signal of a single attempt, and only surfaces (as
//! [`Error::ExhaustedPlacementBudget`]) once the attempt budget is spent.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("unknown shape name: {0:?}")]
  InvalidShapeName(String),

  #[error("unknown color name: {0:?}")]
  InvalidColorName(String),

  #[error("invalid range [{lower}, {upper}]: bounds must be ordered, with a finite span")]
  InvalidRange { lower: f64, upper: f64 },

  #[error("allowed color set is empty")]
  EmptyColorSet,

  #[error("invalid configuration: {0}")]
  InvalidConfiguration(String),

  #[error("shape of size {width}x{height} does not fit the canvas")]
  UnplaceableShape { width: f64, height: f64 },

  #[error("placement budget exhausted after {attempts} attempts")]
  ExhaustedPlacementBudget { attempts: u64 },

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

/// Convenient wrapper around `std::Result`.
pub type Result<T> = std::result::Result<T, Error>;
