//! Shape descriptions: parameter ranges that realize into concrete shapes.

use {
  std::f64::consts::PI,
  serde::{Deserialize, Serialize},
  rand::{Rng, seq::SliceRandom, distributions::uniform::SampleUniform},
  num_traits::{ToPrimitive, Zero},
  crate::{
    error::{Error, Result},
    geometry::{P2, Shape, Polygon, Circle, SemiCircle, Ellipse, Primitive},
    palette::Color,
    placement::PlacedShape
  }
};

/// Inclusive range, `[lower, upper]` on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[T; 2]", into = "[T; 2]", bound(serialize = "T: Serialize + Clone"))]
pub struct Range<T> {
  pub lower: T,
  pub upper: T
}

impl<T> From<[T; 2]> for Range<T> {
  fn from([lower, upper]: [T; 2]) -> Self {
    Self { lower, upper }
  }
}

impl<T> From<Range<T>> for [T; 2] {
  fn from(range: Range<T>) -> Self {
    [range.lower, range.upper]
  }
}

impl<T: Zero> Default for Range<T> {
  fn default() -> Self {
    Self { lower: T::zero(), upper: T::zero() }
  }
}

impl<T> Range<T>
  where T: SampleUniform + PartialOrd + ToPrimitive + Copy {
  pub fn new(lower: T, upper: T) -> Result<Self> {
    let range = Self { lower, upper };
    range.validate()?;
    Ok(range)
  }

  pub fn fixed(value: T) -> Self {
    Self { lower: value, upper: value }
  }

  /// Ordered, finite bounds with a finite span; anything else would make
  /// `gen_range` panic at sampling time.
  pub fn validate(&self) -> Result<()> {
    let lower = self.lower.to_f64().unwrap_or(f64::NAN);
    let upper = self.upper.to_f64().unwrap_or(f64::NAN);
    match self.lower <= self.upper && (upper - lower).is_finite() {
      true => Ok(()),
      false => Err(Error::InvalidRange { lower, upper })
    }
  }

  /// Uniform draw. A degenerate range returns its bound without touching `rng`.
  pub fn sample(&self, rng: &mut impl Rng) -> T {
    if self.lower == self.upper {
      return self.lower;
    }
    rng.gen_range(self.lower..=self.upper)
  }

  pub fn map<U>(&self, f: impl Fn(T) -> U) -> Range<U> {
    Range { lower: f(self.lower), upper: f(self.upper) }
  }
}

/// Circumradius-1 pentagon, pointing up (y down).
const UNIT_PENTAGON: [[f64; 2]; 5] = [
  [0.0, -1.0],
  [0.951_056_516_295_153_5, -0.309_016_994_374_947_4],
  [0.587_785_252_292_473_1, 0.809_016_994_374_947_5],
  [-0.587_785_252_292_473_1, 0.809_016_994_374_947_5],
  [-0.951_056_516_295_153_5, -0.309_016_994_374_947_4],
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeKind {
  /// Equilateral, `size` is the side length
  Triangle { size: Range<f64> },
  Square { size: Range<f64> },
  Rectangle { width: Range<f64>, height: Range<f64> },
  /// `size` is the circumscribed diameter
  Pentagon { size: Range<f64> },
  RegularPolygon { sides: Range<usize>, radius: Range<f64> },
  /// Plus sign; `thickness` is the width of both arms
  Cross { width: Range<f64>, height: Range<f64>, thickness: Range<f64> },
  Circle { radius: Range<f64> },
  #[serde(rename = "semicircle")]
  SemiCircle { radius: Range<f64> },
  Ellipse { radius_x: Range<f64>, radius_y: Range<f64> },
}

impl ShapeKind {
  pub const COUNT: usize = 9;

  /// Kind `index` (in declaration order) with every dimension derived from
  /// `size`, the nominal extent of the shape.
  pub fn nth(index: usize, size: Range<f64>) -> Self {
    let half = size.map(|s| s / 2.0);
    match index % Self::COUNT {
      0 => ShapeKind::Triangle { size },
      1 => ShapeKind::Square { size },
      2 => ShapeKind::Rectangle { width: size, height: half },
      3 => ShapeKind::Pentagon { size },
      4 => ShapeKind::RegularPolygon { sides: Range { lower: 5, upper: 8 }, radius: half },
      5 => ShapeKind::Cross { width: size, height: size, thickness: size.map(|s| s / 3.0) },
      6 => ShapeKind::Circle { radius: half },
      7 => ShapeKind::SemiCircle { radius: half },
      _ => ShapeKind::Ellipse { radius_x: half, radius_y: size.map(|s| s / 4.0) },
    }
  }

  /// Shape keyword as used in captions.
  pub fn from_keyword(keyword: &str, size: Range<f64>) -> Result<Self> {
    let half = size.map(|s| s / 2.0);
    let regular = |n| ShapeKind::RegularPolygon { sides: Range::fixed(n), radius: half };
    Ok(match keyword.to_ascii_lowercase().as_str() {
      "triangle" => Self::nth(0, size),
      "square" => Self::nth(1, size),
      "rectangle" => Self::nth(2, size),
      "pentagon" => Self::nth(3, size),
      "polygon" | "regular polygon" => Self::nth(4, size),
      "hexagon" => regular(6),
      "heptagon" => regular(7),
      "octagon" => regular(8),
      "cross" => Self::nth(5, size),
      "circle" => Self::nth(6, size),
      "semicircle" | "semi circle" => Self::nth(7, size),
      "ellipse" => Self::nth(8, size),
      _ => return Err(Error::InvalidShapeName(keyword.to_string()))
    })
  }

  pub fn validate(&self) -> Result<()> {
    let dims: Vec<&Range<f64>> = match self {
      ShapeKind::Triangle { size } | ShapeKind::Square { size } | ShapeKind::Pentagon { size } =>
        vec![size],
      ShapeKind::Rectangle { width, height } => vec![width, height],
      ShapeKind::RegularPolygon { sides, radius } => {
        sides.validate()?;
        if sides.lower < 3 {
          return Err(Error::InvalidConfiguration(
            format!("regular polygon needs at least 3 sides, got {}", sides.lower)));
        }
        vec![radius]
      },
      ShapeKind::Cross { width, height, thickness } => vec![width, height, thickness],
      ShapeKind::Circle { radius } | ShapeKind::SemiCircle { radius } => vec![radius],
      ShapeKind::Ellipse { radius_x, radius_y } => vec![radius_x, radius_y],
    };
    dims.into_iter().try_for_each(|range| {
      range.validate()?;
      match range.lower >= 0.0 {
        true => Ok(()),
        false => Err(Error::InvalidConfiguration(
          format!("negative shape dimension {}", range.lower)))
      }
    })
  }

  /// Axis-aligned, unrotated outline centred on the origin, and its caption name.
  pub fn realize(&self, rng: &mut impl Rng, vertex_count: usize) -> (Shape, &'static str) {
    let polygon = |points: Vec<[f64; 2]>| -> Shape {
      Polygon::new(points.into_iter().map(P2::from).collect()).into()
    };
    match self {
      ShapeKind::Triangle { size } => {
        let s = size.sample(rng);
        let h = s * 3f64.sqrt() / 2.0;
        (polygon(vec![[0.0, -2.0 * h / 3.0], [s / 2.0, h / 3.0], [-s / 2.0, h / 3.0]]), "triangle")
      },
      ShapeKind::Square { size } => {
        let a = size.sample(rng) / 2.0;
        (polygon(vec![[-a, -a], [a, -a], [a, a], [-a, a]]), "square")
      },
      ShapeKind::Rectangle { width, height } => {
        let (w, h) = (width.sample(rng) / 2.0, height.sample(rng) / 2.0);
        (polygon(vec![[-w, -h], [w, -h], [w, h], [-w, h]]), "rectangle")
      },
      ShapeKind::Pentagon { size } => {
        let r = size.sample(rng) / 2.0;
        (polygon(UNIT_PENTAGON.iter().map(|[x, y]| [x * r, y * r]).collect()), "pentagon")
      },
      ShapeKind::RegularPolygon { sides, radius } => {
        let n = sides.sample(rng);
        let r = radius.sample(rng);
        let points = (0..n)
          .map(|i| {
            let t = 2.0 * PI * i as f64 / n as f64 - PI / 2.0;
            [r * t.cos(), r * t.sin()]
          })
          .collect();
        (polygon(points), polygon_name(n))
      },
      ShapeKind::Cross { width, height, thickness } => {
        let (a, b) = (width.sample(rng) / 2.0, height.sample(rng) / 2.0);
        let c = (thickness.sample(rng) / 2.0).min(a).min(b);
        (polygon(vec![
          [-c, -b], [c, -b], [c, -c], [a, -c],
          [a, c], [c, c], [c, b], [-c, b],
          [-c, c], [-a, c], [-a, -c], [-c, -c],
        ]), "cross")
      },
      ShapeKind::Circle { radius } =>
        (Circle::new(P2::origin(), radius.sample(rng), vertex_count).into(), "circle"),
      ShapeKind::SemiCircle { radius } =>
        (SemiCircle::new(P2::origin(), radius.sample(rng), 0.0, vertex_count).into(), "semicircle"),
      ShapeKind::Ellipse { radius_x, radius_y } => {
        let rx = radius_x.sample(rng);
        let ry = radius_y.sample(rng);
        (Ellipse::new(P2::origin(), rx, ry, 0.0, vertex_count).into(), "ellipse")
      },
    }
  }
}

fn polygon_name(sides: usize) -> &'static str {
  match sides {
    3 => "triangle",
    4 => "square",
    5 => "pentagon",
    6 => "hexagon",
    7 => "heptagon",
    8 => "octagon",
    _ => "polygon"
  }
}

fn full_turn() -> Range<f64> {
  Range { lower: 0.0, upper: 360.0 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
  #[serde(flatten)]
  pub kind: ShapeKind,
  /// Degrees
  #[serde(default = "full_turn")]
  pub rotation: Range<f64>,
  /// `None` draws from [`Color::DEFAULT_SET`]
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub colors: Option<Vec<Color>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub caption: Option<String>,
}

impl Description {
  pub fn new(kind: ShapeKind) -> Self {
    Self { kind, rotation: full_turn(), colors: None, caption: None }
  }

  pub fn with_rotation(mut self, rotation: Range<f64>) -> Self {
    self.rotation = rotation;
    self
  }

  pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
    self.colors = Some(colors);
    self
  }

  pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
    self.caption = Some(caption.into());
    self
  }

  /// A random kind from the whole shape universe, unrestricted color.
  pub fn random(rng: &mut impl Rng, size: Range<f64>, rotation: Range<f64>) -> Self {
    Self::new(ShapeKind::nth(rng.gen_range(0..ShapeKind::COUNT), size))
      .with_rotation(rotation)
  }

  pub fn validate(&self) -> Result<()> {
    self.kind.validate()?;
    self.rotation.validate()?;
    match &self.colors {
      Some(colors) if colors.is_empty() => Err(Error::EmptyColorSet),
      _ => Ok(())
    }
  }

  fn pick_color(&self, rng: &mut impl Rng) -> Result<Color> {
    match self.colors.as_deref() {
      Some([color]) => Ok(*color),
      Some(colors) => colors.choose(rng).copied().ok_or(Error::EmptyColorSet),
      None => Ok(*Color::DEFAULT_SET.choose(rng).ok_or(Error::EmptyColorSet)?)
    }
  }

  /// Realize a concrete shape, rotated by a uniform draw from `rotation` and
  /// centred on the origin. Draw order: dimensions, rotation, color.
  pub fn sample(&self, rng: &mut impl Rng, vertex_count: usize) -> Result<PlacedShape> {
    let (shape, name) = self.kind.realize(rng, vertex_count);
    let shape = shape.rotate(self.rotation.sample(rng));
    let color = self.pick_color(rng)?;
    let caption = self.caption.clone()
      .unwrap_or_else(|| format!("{color} {name}"));
    Ok(PlacedShape { shape, color, caption, distractor: false })
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::{geometry::BoundingBox, philox::Philox}
  };

  fn kinds() -> Vec<ShapeKind> {
    (0..ShapeKind::COUNT)
      .map(|i| ShapeKind::nth(i, Range { lower: 10.0, upper: 30.0 }))
      .collect()
  }

  #[test] fn polygonal_hulls_have_area() -> Result<()> {
    let mut rng = Philox::new(3);
    for kind in kinds() {
      let description = Description::new(kind.clone());
      description.validate()?;
      for _ in 0..50 {
        let placed = description.sample(&mut rng, 64)?;
        assert!(placed.shape.convex_hull().area() > 0.0, "{kind:?}");
      }
    }
    Ok(())
  }

  #[test] fn cross_hull_is_its_bounding_octagon() {
    let kind = ShapeKind::Cross {
      width: Range::fixed(30.0),
      height: Range::fixed(30.0),
      thickness: Range::fixed(10.0)
    };
    let (shape, name) = kind.realize(&mut Philox::new(0), 64);
    assert_eq!(name, "cross");
    let hull = shape.convex_hull();
    // the 4 concave corners are dropped
    assert_eq!(hull.vertices().len(), 8);
    let expected = 30.0 * 30.0 - 4.0 * (10.0 * 10.0 / 2.0);
    assert!((hull.area() - expected).abs() < 1e-9);
  }

  #[test] fn fixed_square_dimensions() -> Result<()> {
    let description = Description::new(ShapeKind::Square { size: Range::fixed(20.0) })
      .with_rotation(Range::fixed(0.0))
      .with_colors(vec![Color::Blue]);
    let placed = description.sample(&mut Philox::new(11), 64)?;
    let bb = placed.shape.bounding_box();
    assert_eq!(bb.width(), 20.0);
    assert_eq!(bb.height(), 20.0);
    assert_eq!(placed.color, Color::Blue);
    assert_eq!(placed.caption, "blue square");
    Ok(())
  }

  #[test] fn caption_override() -> Result<()> {
    let placed = Description::new(ShapeKind::Circle { radius: Range::fixed(4.0) })
      .with_caption("a ball")
      .sample(&mut Philox::new(0), 16)?;
    assert_eq!(placed.caption, "a ball");
    Ok(())
  }

  #[test] fn colors_stay_in_allowed_set() -> Result<()> {
    let allowed = vec![Color::Red, Color::Cyan];
    let description = Description::new(ShapeKind::Square { size: Range::fixed(5.0) })
      .with_colors(allowed.clone());
    let mut rng = Philox::new(5);
    for _ in 0..100 {
      assert!(allowed.contains(&description.sample(&mut rng, 16)?.color));
    }
    Ok(())
  }

  #[test] fn invalid_ranges_are_rejected() {
    assert!(matches!(Range::new(3.0, 1.0), Err(Error::InvalidRange { lower, upper })
      if lower == 3.0 && upper == 1.0));
    let bad = Description::new(ShapeKind::Rectangle {
      width: Range { lower: 5.0, upper: 4.0 },
      height: Range::fixed(1.0)
    });
    assert!(matches!(bad.validate(), Err(Error::InvalidRange { .. })));
    let bad = Description::new(ShapeKind::Circle { radius: Range::fixed(1.0) })
      .with_rotation(Range { lower: 90.0, upper: 0.0 });
    assert!(matches!(bad.validate(), Err(Error::InvalidRange { .. })));
    let bad = Description::new(ShapeKind::Circle { radius: Range::fixed(1.0) })
      .with_colors(vec![]);
    assert!(matches!(bad.validate(), Err(Error::EmptyColorSet)));
  }

  #[test] fn unbounded_ranges_are_rejected() -> Result<()> {
    // ordered, but the span overflows
    let wide = Description::new(ShapeKind::Square { size: Range::fixed(10.0) })
      .with_rotation(Range { lower: -1.0e308, upper: 1.0e308 });
    assert!(matches!(wide.validate(), Err(Error::InvalidRange { .. })));
    for range in [
      Range { lower: 0.0, upper: f64::INFINITY },
      Range { lower: f64::NEG_INFINITY, upper: f64::INFINITY },
      Range { lower: f64::NAN, upper: 1.0 },
    ] {
      assert!(matches!(range.validate(), Err(Error::InvalidRange { .. })), "{range:?}");
    }
    Range { lower: -1.0e300, upper: 1.0e300 }.validate()?;
    Range { lower: 0, upper: usize::MAX }.validate()
  }

  #[test] fn same_seed_same_shapes() -> Result<()> {
    let description = Description::new(ShapeKind::nth(4, Range { lower: 5.0, upper: 50.0 }));
    let (mut a, mut b) = (Philox::new(99), Philox::new(99));
    for _ in 0..20 {
      let (x, y) = (description.sample(&mut a, 32)?, description.sample(&mut b, 32)?);
      assert_eq!(x.caption, y.caption);
      assert_eq!(x.shape.convex_hull(), y.shape.convex_hull());
    }
    Ok(())
  }

  #[test] fn deserialize_description() -> Result<()> {
    let description: Description = serde_json::from_str(r#"{
      "shape": "rectangle", "width": [10, 20], "height": [5, 5],
      "colors": ["red"]
    }"#)?;
    assert_eq!(description.kind, ShapeKind::Rectangle {
      width: Range { lower: 10.0, upper: 20.0 },
      height: Range::fixed(5.0)
    });
    assert_eq!(description.rotation, full_turn());
    assert_eq!(description.colors, Some(vec![Color::Red]));

    let semicircle: Description = serde_json::from_str(
      r#"{"shape": "semicircle", "radius": [1, 2], "rotation": [0, 0]}"#)?;
    assert!(matches!(semicircle.kind, ShapeKind::SemiCircle { .. }));
    Ok(())
  }
}
