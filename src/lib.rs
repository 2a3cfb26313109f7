//! Procedural images of colored shapes, paired with captions.
//!
//! A caption such as `"red triangle, blue circle"` (or an explicit list of
//! [`Description`](description::Description)s) is turned into images where every
//! requested shape appears, optionally alongside random distractors, with a
//! bounded pairwise overlap. Each image comes with two captions: the requested
//! shapes only, and every shape on the canvas.
//!
//! - [`geometry`]: convex hulls, polygon intersection, the overlap ratio and the
//!   shape primitives.
//! - [`description`]: parameter ranges that realize into concrete shapes.
//! - [`placement`]: the rejection sampler and the parallel batch driver.
//! - [`philox`]: counter-based random stream, one per worker.
//! - [`drawing`]: SVG output (requires `drawing` feature).
//!
//! # Basic usage
//! ```
//! # use shape_captions::{
//! #   caption::parse_caption,
//! #   config::Configuration,
//! #   error::Result,
//! #   placement::Generator
//! # };
//! # fn main() -> Result<()> {
//! let config = Configuration { max_overlap: 0.1, ..Default::default() };
//! let requested = parse_caption("red triangle, blue circle", &config)?;
//!
//! // same seed, same images
//! let mut generator = Generator::new(config, 42)?;
//! let image = generator.generate(&requested)?;
//! assert_eq!(image.shapes.len(), 2);
//! assert!(image.requested_caption.starts_with("red triangle"));
//! #   Ok(())
//! # }
//! ```
//! Whole datasets go through [`generate_batch`](placement::generate_batch), which
//! gives group `i` its own Philox stream, so the output does not depend on the
//! thread count.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod util;
pub mod philox;
pub mod geometry;
pub mod palette;
pub mod description;
pub mod caption;
pub mod config;
pub mod placement;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub mod drawing;
