use super::scene::{ChartScene, Point};
use crate::data::model::{Dataset, Record};

/// Hover text for one rider. The allegation, when present, follows a blank
/// line.
pub fn tooltip_text(record: &Record) -> String {
    let mut text = format!(
        "{}: {}\nYear: {}, Time: {}",
        record.name, record.nationality, record.year, record.time
    );
    if record.has_allegation() {
        text.push_str("\n\n");
        text.push_str(&record.doping);
    }
    text
}

// ---------------------------------------------------------------------------
// Tooltip overlay state
// ---------------------------------------------------------------------------

/// The single tooltip overlay shared by every mark.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    visible_opacity: f32,
    opacity: f32,
    position: Point,
    record: Option<usize>,
    text: String,
}

impl Tooltip {
    /// Starts hidden.
    pub fn new(visible_opacity: f32) -> Self {
        Self {
            visible_opacity,
            opacity: 0.0,
            position: Point::default(),
            record: None,
            text: String::new(),
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the record being described, while visible.
    pub fn record(&self) -> Option<usize> {
        self.record
    }

    /// Show the tooltip for `idx`. The overlay is placed at `at` when the
    /// pointer enters the mark and stays there while it moves over it.
    pub fn show(&mut self, dataset: &Dataset, idx: usize, at: Point) {
        let Some(record) = dataset.record(idx) else {
            return;
        };
        if self.record != Some(idx) {
            log::debug!("Hover enter: {} ({})", record.name, record.year);
            self.text = tooltip_text(record);
            self.record = Some(idx);
            self.position = at;
        }
        self.opacity = self.visible_opacity;
    }

    pub fn hide(&mut self) {
        if let Some(idx) = self.record.take() {
            log::debug!("Hover leave: record {idx}");
        }
        self.opacity = 0.0;
    }

    /// Track the pointer: show over a mark, hide elsewhere.
    pub fn pointer_moved(&mut self, scene: &ChartScene, dataset: &Dataset, at: Point) {
        match scene.hit_test(at) {
            Some(mark) => self.show(dataset, mark.record, at),
            None => self.hide(),
        }
    }

    /// The pointer left the canvas entirely.
    pub fn pointer_left(&mut self) {
        self.hide();
    }
}
