//! Rejection sampling of a shape sequence on the canvas.
//!
//! Each image is a sequence of descriptions: a random number of distractors
//! followed by the requested descriptions. Shapes are sampled and placed in
//! order. A shape that doesn't fit the canvas, or that overlaps *any* accepted
//! shape by more than `max_overlap`, discards the whole image and the sequence
//! restarts from the first shape, every shape being sampled anew. Only a full
//! pass yields an image, so every accepted pair satisfies the overlap budget at
//! once.
//!
//! Infeasible sequences never complete; `max_attempts` bounds the number of
//! passes and ends them with [`Error::ExhaustedPlacementBudget`].

use {
  log::{debug, trace},
  rand::seq::SliceRandom,
  itertools::Itertools,
  crate::{
    config::Configuration,
    description::{Description, Range},
    error::{Error, Result},
    geometry::{BoundingBox, Primitive, Shape, V2, overlap_ratio},
    palette::Color,
    philox::Philox
  }
};

pub mod batch;

pub use batch::generate_batch;

/// A sampled shape, already positioned on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedShape {
  pub shape: Shape,
  pub color: Color,
  pub caption: String,
  pub distractor: bool
}

#[derive(Debug, Clone)]
pub struct Image {
  pub shapes: Vec<PlacedShape>,
  /// Captions of the requested shapes only
  pub requested_caption: String,
  /// Captions of every shape, in placement order
  pub full_caption: String,
  /// Passes over the sequence, the successful one included
  pub attempts: u64
}

impl Image {
  fn new(shapes: Vec<PlacedShape>, attempts: u64) -> Self {
    let requested_caption = shapes.iter()
      .filter(|s| !s.distractor)
      .map(|s| s.caption.as_str())
      .join(", ");
    let full_caption = shapes.iter()
      .map(|s| s.caption.as_str())
      .join(", ");
    Self { shapes, requested_caption, full_caption, attempts }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
  Pending(usize),
  Accepted(usize),
  Restart,
}

#[derive(Debug)]
enum Rejection {
  Unplaceable(Error),
  Overlap { index: usize, ratio: f64 },
}

/// Owns the random stream of one worker. Images drawn from the same
/// generator depend on every image drawn before them.
pub struct Generator {
  rng: Philox,
  config: Configuration
}

impl Generator {
  pub fn new(config: Configuration, seed: u64) -> Result<Self> {
    Self::with_stream(config, seed, 0)
  }

  pub fn with_stream(config: Configuration, seed: u64, stream: u64) -> Result<Self> {
    config.validate()?;
    Ok(Self { rng: Philox::with_stream(seed, stream), config })
  }

  pub fn config(&self) -> &Configuration { &self.config }

  /// Distractors first, then the requested descriptions (shuffled if configured).
  fn sequence(&mut self, requested: &[Description]) -> Vec<(Description, bool)> {
    let count = self.config.distractors.sample(&mut self.rng);
    let mut sequence: Vec<_> = (0..count)
      .map(|_| (Description::random(
        &mut self.rng,
        self.config.default_size,
        self.config.default_rotation
      ), true))
      .collect();
    let mut requested = requested.to_vec();
    if self.config.shuffle {
      requested.shuffle(&mut self.rng);
    }
    sequence.extend(requested.into_iter().map(|d| (d, false)));
    sequence
  }

  /// Moves `shape` to a uniformly random offset keeping its bounding box
  /// inside the canvas.
  fn position(&mut self, shape: &Shape) -> Result<Shape> {
    let bb = shape.bounding_box();
    let (free_x, free_y) = (self.config.width - bb.width(), self.config.height - bb.height());
    if free_x < 0.0 || free_y < 0.0 {
      return Err(Error::UnplaceableShape { width: bb.width(), height: bb.height() });
    }
    let x = Range { lower: 0.0, upper: free_x }.sample(&mut self.rng);
    let y = Range { lower: 0.0, upper: free_y }.sample(&mut self.rng);
    Ok(shape.translate(V2::new(x - bb.min.x, y - bb.min.y)))
  }

  fn try_place(
    &mut self,
    (description, distractor): &(Description, bool),
    accepted: &[PlacedShape]
  ) -> Result<std::result::Result<PlacedShape, Rejection>> {
    let sampled = description.sample(&mut self.rng, self.config.hull_vertices)?;
    let shape = match self.position(&sampled.shape) {
      Ok(shape) => shape,
      Err(e @ Error::UnplaceableShape { .. }) => return Ok(Err(Rejection::Unplaceable(e))),
      Err(e) => return Err(e)
    };
    let hull = shape.convex_hull();
    let violation = accepted.iter()
      .enumerate()
      .map(|(index, other)| (index, overlap_ratio(hull, other.shape.convex_hull(), self.config.epsilon)))
      .find(|&(_, ratio)| ratio > self.config.max_overlap);
    Ok(match violation {
      Some((index, ratio)) => Err(Rejection::Overlap { index, ratio }),
      None => Ok(PlacedShape { shape, distractor: *distractor, ..sampled })
    })
  }

  /// Places one image for `requested`.
  pub fn generate(&mut self, requested: &[Description]) -> Result<Image> {
    requested.iter().try_for_each(Description::validate)?;
    let sequence = self.sequence(requested);
    let mut accepted: Vec<PlacedShape> = Vec::with_capacity(sequence.len());
    let mut attempts = 1;
    let mut state = State::Pending(0);

    loop {
      state = match state {
        State::Pending(i) if i == sequence.len() => break,
        State::Pending(i) => match self.try_place(&sequence[i], &accepted)? {
          Ok(placed) => {
            accepted.push(placed);
            State::Accepted(i)
          },
          Err(Rejection::Unplaceable(e)) => {
            trace!("attempt {attempts}, shape {i}: {e}");
            State::Restart
          },
          Err(Rejection::Overlap { index, ratio }) => {
            trace!("attempt {attempts}, shape {i} overlaps shape {index} by {ratio:.3}");
            State::Restart
          }
        },
        State::Accepted(i) => State::Pending(i + 1),
        State::Restart => {
          accepted.clear();
          if attempts >= self.config.max_attempts {
            debug!("giving up after {attempts} attempts on {} shapes", sequence.len());
            return Err(Error::ExhaustedPlacementBudget { attempts });
          }
          attempts += 1;
          State::Pending(0)
        }
      }
    }

    debug!("placed {} shapes in {attempts} attempts", accepted.len());
    Ok(Image::new(accepted, attempts))
  }
}
