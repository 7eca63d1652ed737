use palette::Srgb;

use super::scale::{LinearScale, Tick, TimeScale};
use crate::color::MarkerPalette;
use crate::config::{ChartConfig, LegendSlot, TextSpec};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Geometry primitives (canvas coordinates, origin top-left)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A stroked, filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: Srgb<u8>,
    pub stroke_width: f64,
    /// Applies to fill and stroke alike.
    pub opacity: f32,
}

impl Circle {
    /// Includes the outer half of the stroke.
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius + self.stroke_width / 2.0
    }
}

/// Text anchored at its baseline start.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub anchor: Point,
    pub font_size: f64,
    /// Degrees, negative is counter-clockwise, about `anchor`.
    pub rotation: f64,
}

impl TextItem {
    fn from_spec(spec: &TextSpec, default_size: f64, rotation: f64) -> Self {
        TextItem {
            text: spec.text.clone(),
            anchor: Point::new(spec.x, spec.y),
            font_size: spec.font_size.unwrap_or(default_size),
            rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    /// Ticks hang below a horizontal domain line.
    Bottom,
    /// Ticks point left of a vertical domain line.
    Left,
}

/// An axis group: everything inside is relative to `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: AxisOrientation,
    pub origin: Point,
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    pub tick_size: f64,
    pub font_size: f64,
}

impl Axis {
    /// Absolute position of the point where a tick meets the domain line.
    pub fn tick_anchor(&self, tick: &Tick) -> Point {
        match self.orientation {
            AxisOrientation::Bottom => Point::new(self.origin.x + tick.offset, self.origin.y),
            AxisOrientation::Left => Point::new(self.origin.x, self.origin.y + tick.offset),
        }
    }

    /// Absolute endpoints of the domain line.
    pub fn domain_line(&self) -> (Point, Point) {
        let (r0, r1) = self.range;
        match self.orientation {
            AxisOrientation::Bottom => (
                Point::new(self.origin.x + r0, self.origin.y),
                Point::new(self.origin.x + r1, self.origin.y),
            ),
            AxisOrientation::Left => (
                Point::new(self.origin.x, self.origin.y + r0),
                Point::new(self.origin.x, self.origin.y + r1),
            ),
        }
    }
}

/// One rider's glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub circle: Circle,
    /// Index into the dataset.
    pub record: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: TextItem,
    pub swatch: Circle,
}

// ---------------------------------------------------------------------------
// ChartScene – everything that gets drawn
// ---------------------------------------------------------------------------

/// The complete, toolkit-independent chart. A pure function of the dataset
/// and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub width: f64,
    pub height: f64,
    pub background: Srgb<u8>,
    pub x_scale: LinearScale,
    pub y_scale: TimeScale,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub texts: Vec<TextItem>,
    pub legend: Vec<LegendEntry>,
    /// In dataset order; later marks draw on top.
    pub marks: Vec<Mark>,
}

impl ChartScene {
    pub fn build(dataset: &Dataset, config: &ChartConfig, palette: &MarkerPalette) -> Self {
        let (min_year, max_year) = dataset.year_extent();
        let x_scale = LinearScale::new(
            // Widened before padding so extreme years cannot overflow.
            (f64::from(min_year) - 1.0, f64::from(max_year) + 1.0),
            config.x_range(),
        );
        let y_scale = TimeScale::new(dataset.time_extent(), config.y_range());

        let x_axis = Axis {
            orientation: AxisOrientation::Bottom,
            origin: Point::new(config.x_axis_origin.0, config.x_axis_origin.1),
            range: x_scale.range,
            ticks: x_scale.ticks(config.tick_count),
            tick_size: config.tick_size,
            font_size: config.tick_font_size,
        };
        let y_axis = Axis {
            orientation: AxisOrientation::Left,
            origin: Point::new(config.y_axis_origin.0, config.y_axis_origin.1),
            range: y_scale.range(),
            ticks: y_scale.ticks(config.tick_count),
            tick_size: config.tick_size,
            font_size: config.tick_font_size,
        };

        let (dx, dy) = config.mark_offset;
        let marks = dataset
            .iter()
            .enumerate()
            .map(|(idx, (record, time))| Mark {
                circle: Circle {
                    center: Point::new(x_scale.map(record.year as f64) + dx, y_scale.map(time) + dy),
                    radius: config.mark_radius,
                    fill: palette.fill_for(record),
                    stroke_width: config.mark_stroke_width,
                    opacity: config.mark_opacity,
                },
                record: idx,
            })
            .collect();

        let texts = vec![
            TextItem::from_spec(&config.x_label, config.font_size, 0.0),
            TextItem::from_spec(&config.y_label, config.font_size, -90.0),
            TextItem::from_spec(&config.title, config.font_size, 0.0),
            TextItem::from_spec(&config.subtitle, config.font_size, 0.0),
        ];

        let slots: [&LegendSlot; 2] = [&config.legend_clean, &config.legend_alleged];
        let legend = slots
            .iter()
            .zip(palette.legend_entries())
            .map(|(slot, (label, fill))| LegendEntry {
                label: TextItem {
                    text: label,
                    anchor: Point::new(slot.text_x, slot.text_y),
                    font_size: config.font_size,
                    rotation: 0.0,
                },
                swatch: Circle {
                    center: Point::new(slot.swatch_x, slot.swatch_y),
                    radius: config.mark_radius,
                    fill,
                    stroke_width: config.mark_stroke_width,
                    opacity: config.mark_opacity,
                },
            })
            .collect();

        ChartScene {
            width: config.width,
            height: config.height,
            background: palette.background,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
            texts,
            legend,
            marks,
        }
    }

    /// The topmost mark under `p`, if any.
    pub fn hit_test(&self, p: Point) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| m.circle.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::to_hex;
    use crate::data::model::Record;

    fn rider(name: &str, year: i32, time: &str, doping: &str) -> Record {
        Record {
            name: name.into(),
            nationality: "ITA".into(),
            year,
            time: time.into(),
            doping: doping.into(),
            seconds: None,
            place: None,
            url: None,
        }
    }

    fn scene_for(records: Vec<Record>) -> ChartScene {
        let config = ChartConfig::default();
        let palette = MarkerPalette::from_config(&config).unwrap();
        let dataset = Dataset::from_records(records).unwrap();
        ChartScene::build(&dataset, &config, &palette)
    }

    #[test]
    fn x_domain_pads_one_year_each_side() {
        let scene = scene_for(vec![
            rider("A", 1994, "36:40", ""),
            rider("B", 2015, "35:10", "Admitted doping"),
        ]);
        assert_eq!(scene.x_scale.domain, (1993.0, 2016.0));
        assert_eq!(scene.y_scale.domain(), (35.0 * 60.0 + 10.0, 36.0 * 60.0 + 40.0));
    }

    #[test]
    fn marks_follow_year_and_offsets() {
        let scene = scene_for(vec![
            rider("A", 1994, "36:40", ""),
            rider("B", 2015, "35:10", "Admitted doping"),
        ]);
        let a = &scene.marks[0].circle;
        let b = &scene.marks[1].circle;

        assert!(a.center.x < b.center.x);
        let expected_ax = 50.0 + 900.0 / 23.0 + 10.0;
        assert!((a.center.x - expected_ax).abs() < 1e-9);
        // Slowest time sits at the bottom of the range, fastest at the top.
        assert_eq!(a.center.y, 450.0 - 10.0);
        assert_eq!(b.center.y, 50.0 - 10.0);
        assert_eq!(a.radius, 6.0);
        assert_eq!(a.opacity, 0.8);
    }

    #[test]
    fn x_positions_stay_in_range_and_increase() {
        let years = [2001, 1994, 2010, 1997, 2015, 2004];
        let scene = scene_for(
            years
                .iter()
                .map(|&y| rider("R", y, "37:00", ""))
                .collect(),
        );
        let mut pairs: Vec<(i32, f64)> = years
            .iter()
            .zip(&scene.marks)
            .map(|(&y, m)| (y, m.circle.center.x - 10.0))
            .collect();
        pairs.sort_by_key(|(y, _)| *y);
        assert!(pairs.iter().all(|(_, x)| (50.0..=950.0).contains(x)));
        assert!(pairs.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn fill_follows_allegation() {
        let scene = scene_for(vec![
            rider("A", 1994, "36:40", ""),
            rider("B", 2015, "35:10", "Admitted doping"),
        ]);
        assert_eq!(to_hex(scene.marks[0].circle.fill), "#ff993e");
        assert_eq!(to_hex(scene.marks[1].circle.fill), "#4c92c3");
    }

    #[test]
    fn static_text_and_legend() {
        let scene = scene_for(vec![rider("A", 1994, "36:40", "")]);
        let y_label = scene
            .texts
            .iter()
            .find(|t| t.text == "Time in Minutes")
            .unwrap();
        assert_eq!(y_label.rotation, -90.0);
        assert_eq!(y_label.anchor, Point::new(30.0, 300.0));

        let title = scene
            .texts
            .iter()
            .find(|t| t.text.starts_with("Doping in"))
            .unwrap();
        assert_eq!(title.font_size, 20.0);

        assert_eq!(scene.legend.len(), 2);
        assert_eq!(scene.legend[0].swatch.center, Point::new(980.0, 295.0));
        assert_eq!(to_hex(scene.legend[1].swatch.fill), "#4c92c3");
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let scene = scene_for(vec![rider("A", i32::MAX, "37:00", "")]);
        assert_eq!(
            scene.x_scale.domain,
            (f64::from(i32::MAX) - 1.0, f64::from(i32::MAX) + 1.0)
        );
        assert_eq!(scene.marks[0].circle.center.x, 500.0 + 10.0);

        let scene = scene_for(vec![rider("B", i32::MIN, "37:00", "")]);
        assert!(scene.x_scale.domain.0 < scene.x_scale.domain.1);
    }

    #[test]
    fn background_comes_from_palette() {
        let config = ChartConfig {
            background: "#f0f0f0".to_string(),
            ..ChartConfig::default()
        };
        let palette = MarkerPalette::from_config(&config).unwrap();
        let dataset = Dataset::from_records(vec![rider("A", 2000, "37:00", "")]).unwrap();
        let scene = ChartScene::build(&dataset, &config, &palette);
        assert_eq!(to_hex(scene.background), "#f0f0f0");
    }

    #[test]
    fn single_record_sits_mid_canvas_vertically() {
        let scene = scene_for(vec![rider("A", 2000, "37:00", "")]);
        assert_eq!(scene.marks[0].circle.center.y, 250.0 - 10.0);
        assert_eq!(scene.marks[0].circle.center.x, 500.0 + 10.0);
    }

    #[test]
    fn hit_test_prefers_topmost_mark() {
        let scene = scene_for(vec![
            rider("A", 2000, "37:00", ""),
            rider("B", 2000, "37:00", "x"),
            rider("C", 1994, "36:00", ""),
        ]);
        let center = scene.marks[0].circle.center;
        assert_eq!(scene.hit_test(center).map(|m| m.record), Some(1));
        assert_eq!(
            scene.hit_test(Point::new(center.x + 6.4, center.y)).map(|m| m.record),
            Some(1)
        );
        assert!(scene.hit_test(Point::new(center.x + 7.0, center.y)).is_none());
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let records = vec![
            rider("A", 1994, "36:40", ""),
            rider("B", 2015, "35:10", "Admitted doping"),
        ];
        assert_eq!(scene_for(records.clone()), scene_for(records));
    }
}
