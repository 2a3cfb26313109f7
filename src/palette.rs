//! Named colors. Captions use the name, the renderer uses the RGB value.

use {
  std::{fmt, str::FromStr},
  serde::{Deserialize, Serialize},
  crate::error::{Error, Result}
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
  Red,
  Green,
  Blue,
  Yellow,
  Magenta,
  Cyan,
  Orange,
  Purple,
  Gray,
  White,
  Black,
}

impl Color {
  pub const ALL: [Color; 11] = [
    Color::Red, Color::Green, Color::Blue, Color::Yellow, Color::Magenta, Color::Cyan,
    Color::Orange, Color::Purple, Color::Gray, Color::White, Color::Black,
  ];

  /// Used by descriptions without a color restriction, and by distractors.
  pub const DEFAULT_SET: [Color; 9] = [
    Color::Red, Color::Green, Color::Blue, Color::Yellow, Color::Magenta, Color::Cyan,
    Color::Orange, Color::Purple, Color::Gray,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Color::Red => "red",
      Color::Green => "green",
      Color::Blue => "blue",
      Color::Yellow => "yellow",
      Color::Magenta => "magenta",
      Color::Cyan => "cyan",
      Color::Orange => "orange",
      Color::Purple => "purple",
      Color::Gray => "gray",
      Color::White => "white",
      Color::Black => "black",
    }
  }

  pub fn rgb(self) -> [u8; 3] {
    match self {
      Color::Red => [255, 0, 0],
      Color::Green => [0, 128, 0],
      Color::Blue => [0, 0, 255],
      Color::Yellow => [255, 255, 0],
      Color::Magenta => [255, 0, 255],
      Color::Cyan => [0, 255, 255],
      Color::Orange => [255, 165, 0],
      Color::Purple => [128, 0, 128],
      Color::Gray => [128, 128, 128],
      Color::White => [255, 255, 255],
      Color::Black => [0, 0, 0],
    }
  }

  /// `#rrggbb`
  pub fn hex(self) -> String {
    let [r, g, b] = self.rgb();
    format!("#{r:02x}{g:02x}{b:02x}")
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Color {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let lower = s.to_ascii_lowercase();
    let name = match lower.as_str() {
      "grey" => "gray",
      other => other
    };
    Color::ALL.into_iter()
      .find(|c| c.name() == name)
      .ok_or_else(|| Error::InvalidColorName(s.to_string()))
  }
}
