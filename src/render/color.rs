use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{TrailsError, TrailsResult};
use crate::foundation::math::unit_to_u8;

/// Straight-alpha color with unit-interval channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    /// Opaque white, the default trail color.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Construct from unit-interval channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS-style color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`
    /// or a basic named color.
    pub fn parse(s: &str) -> TrailsResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return parse_rgb_fn(s, args);
        }
        named(&lower).ok_or_else(|| TrailsError::parse(format!("unknown color \"{s}\"")))
    }

    /// Same color with alpha replaced by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        let a = self.a.clamp(0.0, 1.0);
        Rgba8Premul {
            r: unit_to_u8(self.r.clamp(0.0, 1.0) * a),
            g: unit_to_u8(self.g.clamp(0.0, 1.0) * a),
            b: unit_to_u8(self.b.clamp(0.0, 1.0) * a),
            a: unit_to_u8(a),
        }
    }

    /// `#rrggbbaa` form.
    pub fn to_hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a)
        )
    }
}

impl std::str::FromStr for Color {
    type Err = TrailsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> TrailsResult<Color> {
    let hex = &s[1..];

    fn nibble(c: u8) -> Option<u8> {
        (c as char).to_digit(16).map(|d| d as u8)
    }

    let digits: Option<Vec<u8>> = hex.bytes().map(nibble).collect();
    let Some(d) = digits else {
        return Err(TrailsError::parse(format!("invalid hex color \"{s}\"")));
    };

    let (r, g, b, a) = match d.len() {
        3 => (d[0] * 17, d[1] * 17, d[2] * 17, 255),
        4 => (d[0] * 17, d[1] * 17, d[2] * 17, d[3] * 17),
        6 => ((d[0] << 4) | d[1], (d[2] << 4) | d[3], (d[4] << 4) | d[5], 255),
        8 => (
            (d[0] << 4) | d[1],
            (d[2] << 4) | d[3],
            (d[4] << 4) | d[5],
            (d[6] << 4) | d[7],
        ),
        _ => {
            return Err(TrailsError::parse(format!(
                "hex color must be #rgb, #rgba, #rrggbb or #rrggbbaa, got \"{s}\""
            )));
        }
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn parse_rgb_fn(original: &str, args: &str) -> TrailsResult<Color> {
    let err = || TrailsError::parse(format!("invalid rgb color \"{original}\""));
    let args = args.strip_suffix(')').ok_or_else(err)?;
    let parts: Vec<f64> = args
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| err())?;

    match parts.as_slice() {
        [r, g, b] => Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, 1.0)),
        [r, g, b, a] => Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, *a)),
        _ => Err(err()),
    }
}

fn named(name: &str) -> Option<Color> {
    let (r, g, b, a): (u8, u8, u8, u8) = match name {
        "white" => (255, 255, 255, 255),
        "black" => (0, 0, 0, 255),
        "red" => (255, 0, 0, 255),
        "green" => (0, 128, 0, 255),
        "lime" => (0, 255, 0, 255),
        "blue" => (0, 0, 255, 255),
        "yellow" => (255, 255, 0, 255),
        "cyan" | "aqua" => (0, 255, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "orange" => (255, 165, 0, 255),
        "purple" => (128, 0, 128, 255),
        "transparent" => (0, 0, 0, 0),
        _ => return None,
    };
    Some(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

/// A single trail color or a palette sampled per tail segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Every segment uses this color.
    Single(Color),
    /// Every segment picks one of these at random, every frame.
    Palette(Vec<Color>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Single(Color::WHITE)
    }
}

impl ColorSpec {
    /// Parse an option value: a single color, or a comma-separated list (quotes ignored).
    pub fn parse(value: &str) -> TrailsResult<Self> {
        if !value.contains(',') {
            return Color::parse(value.trim_matches('\'')).map(Self::Single);
        }
        let colors = value
            .replace('\'', "")
            .split(',')
            .map(Color::parse)
            .collect::<TrailsResult<Vec<_>>>()?;
        Ok(Self::Palette(colors))
    }

    /// Configured colors in order.
    pub fn colors(&self) -> &[Color] {
        match self {
            Self::Single(c) => std::slice::from_ref(c),
            Self::Palette(cs) => cs,
        }
    }
}

/// Color source for tail segments, with an injectable random generator.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    rng: fastrand::Rng,
}

impl Palette {
    /// Build from a spec with an entropy-seeded generator.
    pub fn new(spec: &ColorSpec) -> Self {
        Self::with_rng(spec, fastrand::Rng::new())
    }

    /// Build from a spec with the given generator.
    pub fn with_rng(spec: &ColorSpec, rng: fastrand::Rng) -> Self {
        let mut palette = Self {
            colors: Vec::new(),
            rng,
        };
        palette.set_spec(spec);
        palette
    }

    /// Replace the colors, keeping the generator state.
    pub fn set_spec(&mut self, spec: &ColorSpec) {
        self.colors = spec.colors().to_vec();
        if self.colors.is_empty() {
            self.colors.push(Color::WHITE);
        }
    }

    /// Replace the generator.
    pub fn set_rng(&mut self, rng: fastrand::Rng) {
        self.rng = rng;
    }

    /// Colors this palette picks from.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The single configured color, or a uniformly random palette entry.
    pub fn pick(&mut self) -> Color {
        if self.colors.len() == 1 {
            return self.colors[0];
        }
        self.colors[self.rng.usize(..self.colors.len())]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/color.rs"]
mod tests;
