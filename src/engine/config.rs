use serde::{Deserialize, Serialize};

use crate::foundation::error::{TrailsError, TrailsResult};
use crate::render::color::ColorSpec;
use crate::source::path::DEFAULT_SUBDIVISIONS;

/// Highest accepted marker speed, in samples per tick.
pub const MAX_SPEED: f64 = 10.0;

/// Highest accepted step factor, in samples per pixel of segment extent.
pub const MAX_STEP_FACTOR: f64 = 64.0;

/// Engine options.
///
/// Produced once, either by [`parse_options`] from a `key=value` option string, by
/// [`TrailsConfig::from_json_str`], or directly in code, then handed to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrailsConfig {
    /// Target outline height as a fraction of the surface height; `0` leaves it to the width.
    pub image_height: f64,
    /// Target outline width as a fraction of the surface width; `0` leaves it to the height.
    pub image_width: f64,
    /// Samples a marker advances per tick, at most [`MAX_SPEED`].
    pub speed: f64,
    /// Samples generated per pixel of segment extent, at most [`MAX_STEP_FACTOR`].
    pub step_factor: f64,
    /// Pre-fit scale applied to the raw outline.
    pub scale: f64,
    /// Fill color; accepted for compatibility, not used when drawing.
    pub fill: Option<String>,
    /// Trail color or palette.
    pub color: ColorSpec,
    /// Curve samples per quadratic/cubic path segment.
    pub subdivisions: u32,
}

impl Default for TrailsConfig {
    fn default() -> Self {
        Self {
            image_height: 0.0,
            image_width: 0.8,
            speed: 8.0,
            step_factor: 4.0,
            scale: 1.0,
            fill: None,
            color: ColorSpec::default(),
            subdivisions: DEFAULT_SUBDIVISIONS,
        }
    }
}

impl TrailsConfig {
    /// Deserialize from JSON (kebab-case keys, every key optional).
    pub fn from_json_str(json: &str) -> TrailsResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| TrailsError::parse(format!("invalid config json: {e}")))?;
        cfg.validated()
    }

    /// Clamp `speed` to [`MAX_SPEED`] and reject values the engine cannot animate with,
    /// including a step factor above [`MAX_STEP_FACTOR`].
    pub fn validated(mut self) -> TrailsResult<Self> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TrailsError::parse(format!(
                "speed must be a positive number, got {}",
                self.speed
            )));
        }
        self.speed = self.speed.min(MAX_SPEED);
        if self.step_factor > MAX_STEP_FACTOR {
            return Err(TrailsError::parse(format!(
                "step-factor must be at most {MAX_STEP_FACTOR}, got {}",
                self.step_factor
            )));
        }
        for (name, v) in [
            ("image-height", self.image_height),
            ("image-width", self.image_width),
            ("step-factor", self.step_factor),
            ("scale", self.scale),
        ] {
            if !v.is_finite() {
                return Err(TrailsError::parse(format!("{name} must be finite")));
            }
        }
        Ok(self)
    }

    /// Whole samples the cursor moves per tick (never zero).
    pub fn stride(&self) -> usize {
        (self.speed as usize).max(1)
    }
}

/// Parse an option string such as `speed=4, step-factor=2, color='#f00,#0f0'`.
///
/// Options are comma-separated `key=value` pairs; commas inside single quotes do not separate
/// options. Unknown keys are ignored.
pub fn parse_options(options: &str) -> TrailsResult<TrailsConfig> {
    let mut cfg = TrailsConfig::default();

    for option in split_options(options) {
        let option = option.trim();
        if option.is_empty() {
            continue;
        }
        let (key, value) = option
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .unwrap_or((option, ""));

        match key {
            "image-height" => cfg.image_height = number(key, value)?,
            "image-width" => cfg.image_width = number(key, value)?,
            "speed" => cfg.speed = number(key, value)?,
            "step-factor" => cfg.step_factor = number(key, value)?,
            "scale" => cfg.scale = number(key, value)?,
            "subdivisions" => {
                cfg.subdivisions = value.parse().map_err(|_| {
                    TrailsError::parse(format!("subdivisions expects an integer, got \"{value}\""))
                })?
            }
            "fill" => cfg.fill = Some(value.trim_matches('\'').to_owned()),
            "color" => cfg.color = ColorSpec::parse(value)?,
            _ => tracing::debug!(key, "ignoring unknown option"),
        }
    }

    cfg.validated()
}

fn number(key: &str, value: &str) -> TrailsResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| TrailsError::parse(format!("{key} expects a number, got \"{value}\"")))
}

fn split_options(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
