use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// A text element anchored at its baseline start, SVG style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// `None` uses [`ChartConfig::font_size`].
    #[serde(default)]
    pub font_size: Option<f64>,
}

impl TextSpec {
    fn new(text: &str, x: f64, y: f64, font_size: Option<f64>) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            font_size,
        }
    }
}

/// Position of one legend row: label start and swatch centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSlot {
    pub label: String,
    pub text_x: f64,
    pub text_y: f64,
    pub swatch_x: f64,
    pub swatch_y: f64,
}

/// Every fixed parameter of the chart. Defaults reproduce the published
/// Alpe d'Huez chart; a JSON file may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    /// Gap between the canvas edge and each end of both scale ranges.
    pub margin: f64,

    pub background: String,
    /// Fill for riders without an allegation.
    pub clean_color: String,
    /// Fill for riders with an allegation.
    pub alleged_color: String,

    pub mark_radius: f64,
    pub mark_opacity: f32,
    pub mark_stroke_width: f64,
    /// Added to every mark centre after scaling.
    pub mark_offset: (f64, f64),

    pub tooltip_opacity: f32,

    /// Translation applied to the bottom axis group.
    pub x_axis_origin: (f64, f64),
    /// Translation applied to the left axis group.
    pub y_axis_origin: (f64, f64),
    pub tick_count: usize,
    pub tick_size: f64,
    pub tick_font_size: f64,

    pub font_size: f64,
    pub title: TextSpec,
    pub subtitle: TextSpec,
    pub x_label: TextSpec,
    /// Drawn rotated 90° counter-clockwise about its anchor.
    pub y_label: TextSpec,

    pub legend_clean: LegendSlot,
    pub legend_alleged: LegendSlot,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let width = 1000.0;
        let height = 500.0;
        Self {
            width,
            height,
            margin: 50.0,
            background: "#ffffff".to_string(),
            clean_color: "#ff993e".to_string(),
            alleged_color: "#4c92c3".to_string(),
            mark_radius: 6.0,
            mark_opacity: 0.8,
            mark_stroke_width: 1.0,
            mark_offset: (10.0, -10.0),
            tooltip_opacity: 0.8,
            x_axis_origin: (30.0, height - 60.0),
            y_axis_origin: (80.0, -10.0),
            tick_count: 10,
            tick_size: 6.0,
            tick_font_size: 10.0,
            font_size: 16.0,
            title: TextSpec::new("Doping in Professional Bicycle Racing", 400.0, 20.0, Some(20.0)),
            subtitle: TextSpec::new("35 Fastest times up Alpe d'Huez", 470.0, 40.0, Some(15.0)),
            x_label: TextSpec::new("Year", width / 2.0, height - 20.0, None),
            y_label: TextSpec::new("Time in Minutes", 30.0, 300.0, None),
            legend_clean: LegendSlot {
                label: "No doping allegations".to_string(),
                text_x: 770.0,
                text_y: 300.0,
                swatch_x: 980.0,
                swatch_y: 295.0,
            },
            legend_alleged: LegendSlot {
                label: "Riders with doping allegations".to_string(),
                text_x: 770.0,
                text_y: 330.0,
                swatch_x: 980.0,
                swatch_y: 325.0,
            },
        }
    }
}

impl ChartConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: ChartConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("validating config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ChartError::InvalidConfig {
                message: format!("canvas must be positive, got {}x{}", self.width, self.height),
            });
        }
        if self.margin < 0.0 || 2.0 * self.margin >= self.width.min(self.height) {
            return Err(ChartError::InvalidConfig {
                message: format!("margin {} leaves no drawable range", self.margin),
            });
        }
        if self.mark_radius <= 0.0 {
            return Err(ChartError::InvalidConfig {
                message: format!("mark radius must be positive, got {}", self.mark_radius),
            });
        }
        if self.tick_count == 0 {
            return Err(ChartError::InvalidConfig {
                message: "tick count must be at least 1".to_string(),
            });
        }
        for opacity in [self.mark_opacity, self.tooltip_opacity] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ChartError::InvalidConfig {
                    message: format!("opacity {opacity} outside 0..=1"),
                });
            }
        }
        for color in [&self.background, &self.clean_color, &self.alleged_color] {
            parse_hex(color)?;
        }
        Ok(())
    }

    /// Pixel range of the x scale.
    pub fn x_range(&self) -> (f64, f64) {
        (self.margin, self.width - self.margin)
    }

    /// Pixel range of the y scale (top to bottom, not inverted).
    pub fn y_range(&self) -> (f64, f64) {
        (self.margin, self.height - self.margin)
    }
}
