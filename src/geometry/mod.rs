//! .
//!
//! Canvas coordinates: origin in the top-left corner, `x` to the right, `y` down,
//! measured in canvas units (the SVG user space). Every primitive here is an
//! immutable value.

use {
  euclid::{Point2D, Vector2D, Box2D},
  itertools::Itertools
};

pub mod hull;
pub mod shapes;

pub use hull::{ConvexPolygon, convex_hull, overlap_ratio};
pub use shapes::*;

/// Canvas coordinate basis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasSpace;

pub type P2 = Point2D<f64, CanvasSpace>;
pub type V2 = Vector2D<f64, CanvasSpace>;

/// Tolerance of segment intersection and of the near-parallel test.
/// Overridable through `Configuration::epsilon`.
pub const DEFAULT_EPSILON: f64 = 1e-10;

pub trait BoundingBox {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace>;
}

impl BoundingBox for [P2] {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    Box2D::from_points(self.iter())
  }
}

/// Signed shoelace area. Positive for counter-clockwise winding in a y-up basis.
pub fn area(vertices: &[P2]) -> f64 {
  if vertices.len() < 3 {
    return 0.0;
  }
  vertices.iter()
    .circular_tuple_windows()
    .map(|(a, b)| a.x * b.y - b.x * a.y)
    .sum::<f64>() / 2.0
}

/// Arithmetic mean of the vertices.
pub fn centroid(vertices: &[P2]) -> P2 {
  if vertices.is_empty() {
    return P2::origin();
  }
  let sum = vertices.iter()
    .fold(V2::zero(), |acc, v| acc + v.to_vector());
  (sum / vertices.len() as f64).to_point()
}

/// Even-odd ray casting. Points exactly on an edge follow the usual half-open
/// crossing rule, `(v[i].y > p.y) != (v[j].y > p.y)`.
pub fn point_in_polygon(vertices: &[P2], point: P2) -> bool {
  let n = vertices.len();
  if n < 3 {
    return false;
  }
  let mut inside = false;
  let mut j = n - 1;
  for i in 0..n {
    let (vi, vj) = (vertices[i], vertices[j]);
    if (vi.y > point.y) != (vj.y > point.y)
      && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x {
      inside = !inside;
    }
    j = i;
  }
  inside
}

/// Closed polygon edges, last vertex wrapping to the first.
pub fn edges(vertices: &[P2]) -> impl Iterator<Item = Line> + '_ {
  vertices.iter()
    .circular_tuple_windows()
    .map(|(&start, &end)| Line { start, end })
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
  pub start: P2,
  pub end: P2
}

impl Line {
  pub fn new(start: P2, end: P2) -> Self {
    Self { start, end }
  }

  pub fn translate(self, offset: V2) -> Self {
    Self { start: self.start + offset, end: self.end + offset }
  }

  fn contains_bounded(&self, point: P2, eps: f64) -> bool {
    let (min, max) = (self.start.min(self.end), self.start.max(self.end));
    point.x >= min.x - eps && point.x <= max.x + eps &&
    point.y >= min.y - eps && point.y <= max.y + eps
  }

  /// Intersection of two segments.
  ///
  /// The infinite lines are intersected first; `None` if they are parallel
  /// within `eps`, or if the crossing point lies outside either segment.
  pub fn intersection(&self, other: &Line, eps: f64) -> Option<P2> {
    let a1 = self.end.y - self.start.y;
    let b1 = self.start.x - self.end.x;
    let c1 = a1 * self.start.x + b1 * self.start.y;

    let a2 = other.end.y - other.start.y;
    let b2 = other.start.x - other.end.x;
    let c2 = a2 * other.start.x + b2 * other.start.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < eps {
      return None;
    }
    let point = P2::new(
      (b2 * c1 - b1 * c2) / det,
      (a1 * c2 - a2 * c1) / det
    );
    (self.contains_bounded(point, eps) && other.contains_bounded(point, eps))
      .then(|| point)
  }
}
