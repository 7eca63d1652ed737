use eframe::egui::Color32;
use palette::Srgb;

use crate::config::ChartConfig;
use crate::data::model::Record;
use crate::error::{ChartError, Result};

// ---------------------------------------------------------------------------
// Hex colour helpers
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex(value: &str) -> Result<Srgb<u8>> {
    value
        .trim()
        .parse::<Srgb<u8>>()
        .map_err(|e| ChartError::InvalidColor {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Format as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

pub fn to_color32(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Marker palette: allegation status → fill colour
// ---------------------------------------------------------------------------

/// The canvas background, the two fill colours of the chart and the legend
/// labels explaining them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPalette {
    pub background: Srgb<u8>,
    pub clean: Srgb<u8>,
    pub alleged: Srgb<u8>,
    clean_label: String,
    alleged_label: String,
}

impl MarkerPalette {
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        Ok(MarkerPalette {
            background: parse_hex(&config.background)?,
            clean: parse_hex(&config.clean_color)?,
            alleged: parse_hex(&config.alleged_color)?,
            clean_label: config.legend_clean.label.clone(),
            alleged_label: config.legend_alleged.label.clone(),
        })
    }

    /// Alleged colour iff the record carries a non-empty allegation.
    pub fn fill_for(&self, record: &Record) -> Srgb<u8> {
        if record.has_allegation() {
            self.alleged
        } else {
            self.clean
        }
    }

    /// Legend entries in display order: clean first, then alleged.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        vec![
            (self.clean_label.clone(), self.clean),
            (self.alleged_label.clone(), self.alleged),
        ]
    }
}
