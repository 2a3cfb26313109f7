//! Configuration loading.
//!
//! Everything is validated here, before a single random draw is made: a bad
//! range is a configuration error, never a panic in the sampler.

use {
  std::path::Path,
  serde::{Deserialize, Serialize},
  crate::{
    caption::parse_caption,
    description::{Description, Range},
    error::{Error, Result},
    geometry::DEFAULT_EPSILON,
    palette::Color
  }
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
  /// Canvas size, in canvas units
  pub width: f64,
  pub height: f64,
  pub background: Color,
  pub images_per_description: usize,
  /// Shuffle the requested descriptions of every image
  pub shuffle: bool,
  /// Largest allowed pairwise [`overlap_ratio`](crate::geometry::overlap_ratio)
  pub max_overlap: f64,
  /// Number of distractor shapes per image
  pub distractors: Range<usize>,
  /// Placement restarts allowed per image before giving up
  pub max_attempts: u64,
  /// Vertex count of the N-gon circumscribing curved shapes
  pub hull_vertices: usize,
  /// Tolerance of segment intersection tests
  pub epsilon: f64,
  /// Nominal extent of shapes named by a caption, and of distractors
  pub default_size: Range<f64>,
  /// Degrees
  pub default_rotation: Range<f64>,
}

impl Default for Configuration {
  fn default() -> Self {
    Self {
      width: 128.0,
      height: 128.0,
      background: Color::White,
      images_per_description: 1,
      shuffle: false,
      max_overlap: 0.0,
      distractors: Range { lower: 0, upper: 0 },
      max_attempts: 10_000,
      hull_vertices: 64,
      epsilon: DEFAULT_EPSILON,
      default_size: Range { lower: 16.0, upper: 32.0 },
      default_rotation: Range { lower: 0.0, upper: 360.0 },
    }
  }
}

impl Configuration {
  pub fn validate(&self) -> Result<()> {
    let invalid = |msg: String| Err(Error::InvalidConfiguration(msg));
    if !(self.width > 0.0 && self.height > 0.0) {
      return invalid(format!("canvas must be positive, got {}x{}", self.width, self.height));
    }
    if self.images_per_description < 1 {
      return invalid("images_per_description must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&self.max_overlap) {
      return invalid(format!("max_overlap must be in [0, 1], got {}", self.max_overlap));
    }
    if self.max_attempts < 1 {
      return invalid("max_attempts must be at least 1".into());
    }
    if self.hull_vertices < 3 {
      return invalid(format!("hull_vertices must be at least 3, got {}", self.hull_vertices));
    }
    if !(self.epsilon >= 0.0) {
      return invalid(format!("epsilon must be non-negative, got {}", self.epsilon));
    }
    self.distractors.validate()?;
    self.default_size.validate()?;
    self.default_rotation.validate()?;
    if self.default_size.lower < 0.0 {
      return invalid(format!("default_size must be non-negative, got {}", self.default_size.lower));
    }
    Ok(())
  }

  pub fn from_json(json: &str) -> Result<Self> {
    let config: Self = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }
}

/// One requested image group: a caption to parse, or explicit descriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Group {
  Caption(String),
  Descriptions(Vec<Description>),
}

impl Group {
  pub fn descriptions(&self, config: &Configuration) -> Result<Vec<Description>> {
    let descriptions = match self {
      Group::Caption(text) => parse_caption(text, config)?,
      Group::Descriptions(list) => list.clone()
    };
    descriptions.iter().try_for_each(Description::validate)?;
    Ok(descriptions)
  }
}

/// A whole dataset: canvas configuration, seed and requested groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
  #[serde(flatten)]
  pub configuration: Configuration,
  #[serde(default)]
  pub seed: u64,
  pub groups: Vec<Group>,
}

impl DatasetConfig {
  pub fn from_json(json: &str) -> Result<Self> {
    let dataset: Self = serde_json::from_str(json)?;
    dataset.configuration.validate()?;
    dataset.resolve()?;
    Ok(dataset)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_json(&std::fs::read_to_string(path)?)
  }

  /// Descriptions of every group, parsed and validated.
  pub fn resolve(&self) -> Result<Vec<Vec<Description>>> {
    self.groups.iter()
      .map(|group| group.descriptions(&self.configuration))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::description::ShapeKind
  };

  #[test] fn defaults_are_valid() -> Result<()> {
    Configuration::default().validate()
  }

  #[test] fn partial_json_uses_defaults() -> Result<()> {
    let config = Configuration::from_json(r#"{ "width": 100, "height": 50, "max_overlap": 0.25 }"#)?;
    assert_eq!(config.width, 100.0);
    assert_eq!(config.height, 50.0);
    assert_eq!(config.max_overlap, 0.25);
    assert_eq!(config.background, Color::White);
    assert_eq!(config.epsilon, DEFAULT_EPSILON);
    Ok(())
  }

  #[test] fn rejects_inverted_ranges_at_load() {
    let err = Configuration::from_json(r#"{ "distractors": [3, 1] }"#);
    assert!(matches!(err, Err(Error::InvalidRange { lower, upper }) if lower == 3.0 && upper == 1.0));

    let err = DatasetConfig::from_json(r#"{
      "groups": [[{ "shape": "square", "size": [20, 10] }]]
    }"#);
    assert!(matches!(err, Err(Error::InvalidRange { .. })));

    let err = Configuration::from_json(r#"{ "default_rotation": [-1e308, 1e308] }"#);
    assert!(matches!(err, Err(Error::InvalidRange { .. })));
  }

  #[test] fn rejects_out_of_bounds_values() {
    for json in [
      r#"{ "width": 0 }"#,
      r#"{ "max_overlap": 1.5 }"#,
      r#"{ "images_per_description": 0 }"#,
      r#"{ "hull_vertices": 2 }"#,
      r#"{ "max_attempts": 0 }"#,
    ] {
      assert!(matches!(Configuration::from_json(json), Err(Error::InvalidConfiguration(_))), "{json}");
    }
  }

  #[test] fn dataset_groups() -> Result<()> {
    let dataset = DatasetConfig::from_json(r#"{
      "width": 64, "height": 64, "seed": 7,
      "groups": [
        "red triangle, circle",
        [{ "shape": "cross", "width": [10, 12], "height": [10, 12], "thickness": [3, 4] }]
      ]
    }"#)?;
    assert_eq!(dataset.seed, 7);
    assert_eq!(dataset.configuration.width, 64.0);
    let groups = dataset.resolve()?;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0][0].colors, Some(vec![Color::Red]));
    assert!(matches!(groups[1][0].kind, ShapeKind::Cross { .. }));
    Ok(())
  }

  #[test] fn dataset_unknown_shape() {
    let err = DatasetConfig::from_json(r#"{ "groups": ["blue dodecahedron"] }"#);
    assert!(matches!(err, Err(Error::InvalidShapeName(name)) if name == "dodecahedron"));
  }
}
