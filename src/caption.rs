//! Caption text to descriptions: `"red triangle, blue circle, square"`.
//!
//! Clauses are separated by commas. Within a clause, a leading color word
//! restricts the color; the remaining words name the shape. Shapes named this
//! way take their dimensions from `Configuration::default_size` and
//! `default_rotation`.

use crate::{
  config::Configuration,
  description::{Description, ShapeKind},
  error::Result,
  palette::Color
};

pub fn parse_clause(clause: &str, config: &Configuration) -> Result<Description> {
  let words: Vec<&str> = clause.split_whitespace().collect();
  let (color, shape_words) = match words.split_first() {
    Some((first, rest)) if !rest.is_empty() => match first.parse::<Color>() {
      Ok(color) => (Some(color), rest),
      Err(_) => (None, words.as_slice())
    },
    _ => (None, words.as_slice())
  };
  let kind = ShapeKind::from_keyword(&shape_words.join(" "), config.default_size)?;
  let description = Description::new(kind).with_rotation(config.default_rotation);
  Ok(match color {
    Some(color) => description.with_colors(vec![color]),
    None => description
  })
}

/// Empty clauses (e.g. a trailing comma) are skipped.
pub fn parse_caption(text: &str, config: &Configuration) -> Result<Vec<Description>> {
  text.split(',')
    .map(str::trim)
    .filter(|clause| !clause.is_empty())
    .map(|clause| parse_clause(clause, config))
    .collect()
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::{description::Range, error::Error}
  };

  #[test] fn colors_and_shapes() -> Result<()> {
    let config = Configuration::default();
    let descriptions = parse_caption("red triangle, blue circle, square", &config)?;
    assert_eq!(descriptions.len(), 3);
    assert_eq!(descriptions[0].colors, Some(vec![Color::Red]));
    assert!(matches!(descriptions[0].kind, ShapeKind::Triangle { .. }));
    assert_eq!(descriptions[1].colors, Some(vec![Color::Blue]));
    assert!(matches!(descriptions[1].kind, ShapeKind::Circle { .. }));
    assert_eq!(descriptions[2].colors, None);
    assert_eq!(descriptions[2].kind, ShapeKind::Square { size: config.default_size });
    assert_eq!(descriptions[2].rotation, config.default_rotation);
    Ok(())
  }

  #[test] fn multi_word_shapes() -> Result<()> {
    let config = Configuration::default();
    let descriptions = parse_caption("Green regular polygon, hexagon,", &config)?;
    assert_eq!(descriptions.len(), 2);
    assert_eq!(descriptions[0].colors, Some(vec![Color::Green]));
    assert!(matches!(descriptions[0].kind, ShapeKind::RegularPolygon { .. }));
    assert!(matches!(&descriptions[1].kind,
      ShapeKind::RegularPolygon { sides, .. } if *sides == Range::fixed(6)));
    Ok(())
  }

  #[test] fn lone_color_word_is_a_shape_name() {
    let err = parse_caption("red", &Configuration::default());
    assert!(matches!(err, Err(Error::InvalidShapeName(name)) if name == "red"));
  }

  #[test] fn unknown_shape() {
    let err = parse_caption("circle, purple blob", &Configuration::default());
    assert!(matches!(err, Err(Error::InvalidShapeName(name)) if name == "blob"));
  }

  #[test] fn empty_caption() -> Result<()> {
    assert!(parse_caption("  ", &Configuration::default())?.is_empty());
    Ok(())
  }
}
