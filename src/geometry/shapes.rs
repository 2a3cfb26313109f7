use {
  std::f64::consts::PI,
  euclid::{Angle, Box2D, Rotation2D},
  once_cell::sync::OnceCell,
  super::{BoundingBox, CanvasSpace, ConvexPolygon, P2, V2, centroid}
};

/// Operations shared by every shape variant. All of them return a new value;
/// the receiver and its cached hull stay valid.
pub trait Primitive: BoundingBox + Sized {
  fn translate(&self, offset: V2) -> Self;
  /// Scale about the shape's own centroid (polygons) or center (curves)
  fn scale(&self, factor: f64) -> Self;
  /// Rotate about the shape's own centroid (polygons) or center (curves)
  fn rotate(&self, degrees: f64) -> Self;
  /// Circumscribed convex polygon, computed on first access and memoized.
  fn convex_hull(&self) -> &ConvexPolygon;
}

fn rotation(degrees: f64) -> Rotation2D<f64, CanvasSpace, CanvasSpace> {
  Rotation2D::new(Angle::degrees(degrees))
}

/// Unit vector at `degrees`, measured from the x axis towards y.
fn direction(degrees: f64) -> V2 {
  let (sin, cos) = degrees.to_radians().sin_cos();
  V2::new(cos, sin)
}

/// Radius of the N-gon circumscribing a unit circle: vertices at this
/// distance keep every edge tangent to (outside of) the circle.
fn circumscribed_radius(vertex_count: usize) -> f64 {
  1.0 / (PI / vertex_count.max(3) as f64).cos()
}

#[derive(Debug, Clone)]
pub struct Polygon {
  vertices: Vec<P2>,
  hull: OnceCell<ConvexPolygon>
}

impl Polygon {
  /// `vertices` must describe a simple polygon.
  pub fn new(vertices: Vec<P2>) -> Self {
    Self { vertices, hull: OnceCell::new() }
  }

  pub fn vertices(&self) -> &[P2] { &self.vertices }

  pub fn centroid(&self) -> P2 { centroid(&self.vertices) }

  fn map(&self, f: impl Fn(P2) -> P2) -> Self {
    Self::new(self.vertices.iter().map(|&v| f(v)).collect())
  }
}

impl BoundingBox for Polygon {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    self.vertices.as_slice().bounding_box()
  }
}

impl Primitive for Polygon {
  fn translate(&self, offset: V2) -> Self {
    self.map(|v| v + offset)
  }

  fn scale(&self, factor: f64) -> Self {
    let c = self.centroid();
    self.map(|v| c + (v - c) * factor)
  }

  fn rotate(&self, degrees: f64) -> Self {
    let c = self.centroid();
    let rot = rotation(degrees);
    self.map(|v| c + rot.transform_vector(v - c))
  }

  fn convex_hull(&self) -> &ConvexPolygon {
    self.hull.get_or_init(|| ConvexPolygon::from_simple_polygon(&self.vertices))
  }
}

#[derive(Debug, Clone)]
pub struct Circle {
  pub center: P2,
  pub radius: f64,
  pub vertex_count: usize,
  hull: OnceCell<ConvexPolygon>
}

impl Circle {
  pub fn new(center: P2, radius: f64, vertex_count: usize) -> Self {
    Self { center, radius, vertex_count, hull: OnceCell::new() }
  }
}

impl BoundingBox for Circle {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    let r = V2::splat(self.radius);
    Box2D::new(self.center - r, self.center + r)
  }
}

impl Primitive for Circle {
  fn translate(&self, offset: V2) -> Self {
    Self::new(self.center + offset, self.radius, self.vertex_count)
  }

  fn scale(&self, factor: f64) -> Self {
    Self::new(self.center, self.radius * factor, self.vertex_count)
  }

  /// Rotationally symmetric, the circle is returned unchanged.
  fn rotate(&self, _degrees: f64) -> Self {
    self.clone()
  }

  fn convex_hull(&self) -> &ConvexPolygon {
    self.hull.get_or_init(|| {
      let n = self.vertex_count.max(3);
      let r = self.radius * circumscribed_radius(n);
      ConvexPolygon::new((0..n)
        .map(|i| self.center + direction(360.0 * i as f64 / n as f64) * r)
        .collect())
    })
  }
}

/// Half disc covering the directions `angle ..= angle + 180` degrees.
#[derive(Debug, Clone)]
pub struct SemiCircle {
  pub center: P2,
  pub radius: f64,
  pub angle: f64,
  pub vertex_count: usize,
  hull: OnceCell<ConvexPolygon>
}

impl SemiCircle {
  pub fn new(center: P2, radius: f64, angle: f64, vertex_count: usize) -> Self {
    Self { center, radius, angle, vertex_count, hull: OnceCell::new() }
  }

  /// Ends of the flat side: `(arc start, arc end)`.
  pub fn endpoints(&self) -> (P2, P2) {
    (
      self.center + direction(self.angle) * self.radius,
      self.center + direction(self.angle + 180.0) * self.radius
    )
  }
}

impl BoundingBox for SemiCircle {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    let (start, end) = self.endpoints();
    let extremes = [0.0, 90.0, 180.0, 270.0f64].into_iter()
      .filter(|axis| (axis - self.angle).rem_euclid(360.0) <= 180.0)
      .map(|axis| self.center + direction(axis) * self.radius);
    Box2D::from_points([start, end].into_iter().chain(extremes))
  }
}

impl Primitive for SemiCircle {
  fn translate(&self, offset: V2) -> Self {
    Self::new(self.center + offset, self.radius, self.angle, self.vertex_count)
  }

  fn scale(&self, factor: f64) -> Self {
    Self::new(self.center, self.radius * factor, self.angle, self.vertex_count)
  }

  fn rotate(&self, degrees: f64) -> Self {
    Self::new(self.center, self.radius, self.angle + degrees, self.vertex_count)
  }

  fn convex_hull(&self) -> &ConvexPolygon {
    self.hull.get_or_init(|| {
      // half of the full-circle vertex budget, each segment spanning 180/k degrees
      let k = (self.vertex_count / 2).max(2);
      let r = self.radius * circumscribed_radius(2 * k);
      ConvexPolygon::new((0..=k)
        .map(|i| self.center + direction(self.angle + 180.0 * i as f64 / k as f64) * r)
        .collect())
    })
  }
}

#[derive(Debug, Clone)]
pub struct Ellipse {
  pub center: P2,
  pub radius_x: f64,
  pub radius_y: f64,
  /// Rotation of the `radius_x` axis, degrees
  pub angle: f64,
  pub vertex_count: usize,
  hull: OnceCell<ConvexPolygon>
}

impl Ellipse {
  pub fn new(center: P2, radius_x: f64, radius_y: f64, angle: f64, vertex_count: usize) -> Self {
    Self { center, radius_x, radius_y, angle, vertex_count, hull: OnceCell::new() }
  }
}

impl BoundingBox for Ellipse {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    let (sin, cos) = self.angle.to_radians().sin_cos();
    let (a, b) = (self.radius_x, self.radius_y);
    let half = V2::new(
      (a * a * cos * cos + b * b * sin * sin).sqrt(),
      (a * a * sin * sin + b * b * cos * cos).sqrt()
    );
    Box2D::new(self.center - half, self.center + half)
  }
}

impl Primitive for Ellipse {
  fn translate(&self, offset: V2) -> Self {
    Self::new(self.center + offset, self.radius_x, self.radius_y, self.angle, self.vertex_count)
  }

  fn scale(&self, factor: f64) -> Self {
    Self::new(self.center, self.radius_x * factor, self.radius_y * factor, self.angle, self.vertex_count)
  }

  fn rotate(&self, degrees: f64) -> Self {
    Self::new(self.center, self.radius_x, self.radius_y, self.angle + degrees, self.vertex_count)
  }

  fn convex_hull(&self) -> &ConvexPolygon {
    self.hull.get_or_init(|| {
      let n = self.vertex_count.max(3);
      // affine image of the N-gon circumscribing the unit circle
      let k = circumscribed_radius(n);
      let rot = rotation(self.angle);
      ConvexPolygon::new((0..n)
        .map(|i| {
          let d = direction(360.0 * i as f64 / n as f64);
          let local = V2::new(d.x * self.radius_x * k, d.y * self.radius_y * k);
          self.center + rot.transform_vector(local)
        })
        .collect())
    })
  }
}

/// Closed set of shape variants.
#[derive(Debug, Clone)]
pub enum Shape {
  Polygon(Polygon),
  Circle(Circle),
  SemiCircle(SemiCircle),
  Ellipse(Ellipse),
}

macro_rules! dispatch {
  ($self: expr, $s: ident => $body: expr) => {
    match $self {
      Shape::Polygon($s) => $body,
      Shape::Circle($s) => $body,
      Shape::SemiCircle($s) => $body,
      Shape::Ellipse($s) => $body,
    }
  };
}

macro_rules! dispatch_map {
  ($self: expr, $s: ident => $body: expr) => {
    match $self {
      Shape::Polygon($s) => Shape::Polygon($body),
      Shape::Circle($s) => Shape::Circle($body),
      Shape::SemiCircle($s) => Shape::SemiCircle($body),
      Shape::Ellipse($s) => Shape::Ellipse($body),
    }
  };
}

impl Shape {
  /// Pivot of `scale` and `rotate`.
  pub fn center(&self) -> P2 {
    match self {
      Shape::Polygon(s) => s.centroid(),
      Shape::Circle(s) => s.center,
      Shape::SemiCircle(s) => s.center,
      Shape::Ellipse(s) => s.center,
    }
  }
}

impl BoundingBox for Shape {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    dispatch!(self, s => s.bounding_box())
  }
}

impl Primitive for Shape {
  fn translate(&self, offset: V2) -> Self {
    dispatch_map!(self, s => s.translate(offset))
  }

  fn scale(&self, factor: f64) -> Self {
    dispatch_map!(self, s => s.scale(factor))
  }

  fn rotate(&self, degrees: f64) -> Self {
    dispatch_map!(self, s => s.rotate(degrees))
  }

  fn convex_hull(&self) -> &ConvexPolygon {
    dispatch!(self, s => s.convex_hull())
  }
}

impl From<Polygon> for Shape { fn from(s: Polygon) -> Self { Shape::Polygon(s) } }
impl From<Circle> for Shape { fn from(s: Circle) -> Self { Shape::Circle(s) } }
impl From<SemiCircle> for Shape { fn from(s: SemiCircle) -> Self { Shape::SemiCircle(s) } }
impl From<Ellipse> for Shape { fn from(s: Ellipse) -> Self { Shape::Ellipse(s) } }
