//! SVG output of placed images.
//!
//! Canvas units map 1:1 onto SVG user units; y grows downwards in both.

use {
  std::fmt::Write,
  crate::{
    config::Configuration,
    geometry::{Shape, P2},
    palette::Color,
    placement::{Image, PlacedShape}
  }
};

#[cfg(test)] mod tests;

pub trait Draw<Backend> {
  fn draw(&self, backend: &mut Backend);
}

/// SVG document under construction.
#[derive(Debug, Clone)]
pub struct Svg {
  buffer: String
}

impl Svg {
  pub fn new(width: f64, height: f64, background: Color) -> Self {
    let mut buffer = String::new();
    // writing into a String never fails
    let _ = write!(buffer,
      r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.3}" height="{height:.3}" viewBox="0 0 {width:.3} {height:.3}">"#);
    let _ = write!(buffer,
      r#"<rect width="{width:.3}" height="{height:.3}" fill="{}"/>"#, background.hex());
    Self { buffer }
  }

  fn element(&mut self, body: std::fmt::Arguments, fill: Color) {
    let _ = write!(self.buffer, "<{body} fill=\"{}\"/>", fill.hex());
  }

  pub fn finish(mut self) -> String {
    self.buffer.push_str("</svg>\n");
    self.buffer
  }
}

fn path_data(vertices: &[P2]) -> String {
  let mut d = String::new();
  for (i, v) in vertices.iter().enumerate() {
    let command = if i == 0 { 'M' } else { 'L' };
    let _ = write!(d, "{command}{:.3},{:.3} ", v.x, v.y);
  }
  d.push('Z');
  d
}

impl Draw<Svg> for PlacedShape {
  fn draw(&self, svg: &mut Svg) {
    match &self.shape {
      Shape::Polygon(polygon) =>
        svg.element(format_args!(r#"path d="{}""#, path_data(polygon.vertices())), self.color),
      Shape::Circle(c) =>
        svg.element(format_args!(r#"circle cx="{:.3}" cy="{:.3}" r="{:.3}""#,
          c.center.x, c.center.y, c.radius), self.color),
      Shape::SemiCircle(s) => {
        let (start, end) = s.endpoints();
        svg.element(format_args!(r#"path d="M{:.3},{:.3} A{r:.3},{r:.3} 0 0 1 {:.3},{:.3} Z""#,
          start.x, start.y, end.x, end.y, r = s.radius), self.color)
      },
      Shape::Ellipse(e) =>
        svg.element(format_args!(
          r#"ellipse cx="{cx:.3}" cy="{cy:.3}" rx="{:.3}" ry="{:.3}" transform="rotate({:.3} {cx:.3} {cy:.3})""#,
          e.radius_x, e.radius_y, e.angle, cx = e.center.x, cy = e.center.y), self.color),
    }
  }
}

/// Whole image as a standalone SVG document, shapes in placement order.
pub fn render_svg(config: &Configuration, image: &Image) -> String {
  let mut svg = Svg::new(config.width, config.height, config.background);
  image.shapes.iter()
    .for_each(|shape| shape.draw(&mut svg));
  svg.finish()
}
