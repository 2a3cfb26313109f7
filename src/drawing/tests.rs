use {
  super::*,
  regex::Regex,
  crate::{
    caption::parse_caption,
    description::Range,
    error::Result,
    geometry::{Polygon, Circle, SemiCircle, Ellipse},
    placement::Generator
  }
};

fn placed(shape: impl Into<Shape>, color: Color) -> PlacedShape {
  PlacedShape { shape: shape.into(), color, caption: String::new(), distractor: false }
}

fn draw_one(shape: PlacedShape) -> String {
  let mut svg = Svg::new(100.0, 100.0, Color::White);
  shape.draw(&mut svg);
  svg.finish()
}

#[test] fn document_frame() {
  let svg = Svg::new(64.0, 32.0, Color::Black).finish();
  assert!(svg.starts_with("<svg "));
  assert!(svg.ends_with("</svg>\n"));
  assert!(svg.contains(r#"viewBox="0 0 64.000 32.000""#));
  assert!(svg.contains(r##"<rect width="64.000" height="32.000" fill="#000000"/>"##));
}

#[test] fn polygon_path() {
  let triangle = Polygon::new(vec![P2::new(0.0, 0.0), P2::new(10.0, 0.0), P2::new(5.0, 8.5)]);
  let svg = draw_one(placed(triangle, Color::Red));
  assert!(svg.contains(
    r##"<path d="M0.000,0.000 L10.000,0.000 L5.000,8.500 Z" fill="#ff0000"/>"##), "{svg}");
}

#[test] fn curved_elements() {
  let svg = draw_one(placed(Circle::new(P2::new(50.0, 40.0), 12.5, 64), Color::Blue));
  assert!(svg.contains(r##"<circle cx="50.000" cy="40.000" r="12.500" fill="#0000ff"/>"##), "{svg}");

  let svg = draw_one(placed(Ellipse::new(P2::new(20.0, 30.0), 8.0, 3.0, 45.0, 64), Color::Green));
  assert!(svg.contains(
    r#"<ellipse cx="20.000" cy="30.000" rx="8.000" ry="3.000" transform="rotate(45.000 20.000 30.000)""#), "{svg}");

  // flat side from (14, 10) to (6, 10), arc through (10, 14)
  let svg = draw_one(placed(SemiCircle::new(P2::new(10.0, 10.0), 4.0, 0.0, 64), Color::Gray));
  assert!(svg.contains(
    r##"<path d="M14.000,10.000 A4.000,4.000 0 0 1 6.000,10.000 Z" fill="#808080"/>"##), "{svg}");
}

#[test] fn rendered_image_has_every_shape() -> Result<()> {
  let config = Configuration {
    distractors: Range::fixed(2),
    ..Default::default()
  };
  let requested = parse_caption("red square, blue circle, green semicircle", &config)?;
  let image = Generator::new(config.clone(), 21)?.generate(&requested)?;
  let svg = render_svg(&config, &image);

  let element = Regex::new(r#"<(path|circle|ellipse) [^>]*fill="(#[0-9a-f]{6})"/>"#).unwrap();
  let fills: Vec<String> = element.captures_iter(&svg)
    .map(|c| c[2].to_string())
    .collect();
  assert_eq!(fills.len(), image.shapes.len());
  for (fill, shape) in fills.iter().zip(&image.shapes) {
    assert_eq!(fill, &shape.color.hex());
  }
  assert_eq!(&fills[2..], ["#ff0000", "#0000ff", "#008000"]);
  Ok(())
}
