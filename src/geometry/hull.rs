use {
  std::collections::VecDeque,
  euclid::Box2D,
  super::{P2, CanvasSpace, BoundingBox, area, centroid, edges, point_in_polygon}
};

/// `> 0` when `c` lies to the left of the directed line `a -> b`.
#[inline(always)]
fn is_left(a: P2, b: P2, c: P2) -> f64 {
  (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Melkman's convex hull of a simple polygonal chain, O(n).
///
/// The deque holds the current hull with the most recently inserted vertex at
/// both ends. A vertex inside both supporting edges is skipped, otherwise
/// concave vertices are popped from each end before it is pushed.
///
/// Input must be a simple (non self-intersecting) polygon. Self-intersecting
/// input may produce a non-convex result.
pub fn convex_hull(points: &[P2]) -> Vec<P2> {
  if points.len() < 3 {
    return points.to_vec();
  }
  let (p0, p1, p2) = (points[0], points[1], points[2]);
  let mut deque: VecDeque<P2> = if is_left(p0, p1, p2) > 0.0 {
    [p2, p0, p1, p2].into_iter().collect()
  } else {
    [p2, p1, p0, p2].into_iter().collect()
  };

  for &p in &points[3..] {
    let n = deque.len();
    if is_left(deque[0], deque[1], p) > 0.0 && is_left(deque[n - 2], deque[n - 1], p) > 0.0 {
      continue;
    }
    while deque.len() > 2 && is_left(deque[0], deque[1], p) <= 0.0 {
      deque.pop_front();
    }
    deque.push_front(p);
    while deque.len() > 2 && is_left(deque[deque.len() - 2], deque[deque.len() - 1], p) <= 0.0 {
      deque.pop_back();
    }
    deque.push_back(p);
  }

  // front and back hold the same vertex
  deque.pop_back();
  deque.into_iter().collect()
}

/// Polygon with vertices in canonical order: sorted by angle around their
/// centroid. Two instances can be clipped against each other directly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexPolygon {
  vertices: Vec<P2>
}

impl ConvexPolygon {
  /// Sorts `points` by angle around their centroid. Points are assumed to be
  /// in convex position already.
  pub fn new(mut points: Vec<P2>) -> Self {
    let c = centroid(&points);
    points.sort_by(|a, b| {
      let (ta, tb) = ((a.y - c.y).atan2(a.x - c.x), (b.y - c.y).atan2(b.x - c.x));
      ta.total_cmp(&tb)
    });
    Self { vertices: points }
  }

  /// Hull of an arbitrary simple polygon.
  pub fn from_simple_polygon(points: &[P2]) -> Self {
    Self::new(convex_hull(points))
  }

  pub fn vertices(&self) -> &[P2] { &self.vertices }

  pub fn is_empty(&self) -> bool { self.vertices.len() < 3 }

  pub fn area(&self) -> f64 {
    area(&self.vertices).abs()
  }

  pub fn centroid(&self) -> P2 {
    centroid(&self.vertices)
  }

  pub fn contains(&self, point: P2) -> bool {
    point_in_polygon(&self.vertices, point)
  }

  /// Intersection of two convex polygons.
  ///
  /// Collects the vertices of each polygon lying inside the other, plus every
  /// edge/edge crossing, and restores canonical order. Fewer than three points
  /// yield an empty polygon.
  pub fn intersection(&self, other: &ConvexPolygon, eps: f64) -> ConvexPolygon {
    if self.is_empty() || other.is_empty() {
      return ConvexPolygon::default();
    }
    let mut points: Vec<P2> = self.vertices.iter()
      .filter(|&&v| other.contains(v))
      .chain(other.vertices.iter().filter(|&&v| self.contains(v)))
      .copied()
      .collect();
    for a in edges(&self.vertices) {
      points.extend(edges(&other.vertices)
        .filter_map(|b| a.intersection(&b, eps)));
    }
    if points.len() < 3 {
      return ConvexPolygon::default();
    }
    ConvexPolygon::new(points)
  }
}

impl BoundingBox for ConvexPolygon {
  fn bounding_box(&self) -> Box2D<f64, CanvasSpace> {
    self.vertices.as_slice().bounding_box()
  }
}

/// `max(I / area(a), I / area(b))` where `I` is the intersection area.
///
/// In `[0, 1]`. Polygons with disjoint bounding boxes short-circuit to 0,
/// a degenerate (zero area) operand contributes 0.
pub fn overlap_ratio(a: &ConvexPolygon, b: &ConvexPolygon, eps: f64) -> f64 {
  if !a.bounding_box().intersects(&b.bounding_box()) {
    return 0.0;
  }
  let shared = a.intersection(b, eps).area();
  let ratio = |total: f64| if total > 0.0 { shared / total } else { 0.0 };
  ratio(a.area())
    .max(ratio(b.area()))
    .min(1.0)
}
