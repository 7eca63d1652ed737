use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;

use crate::chart::scene::{Axis, AxisOrientation, ChartScene, Circle, TextItem};
use crate::chart::tooltip_text;
use crate::color::to_hex;
use crate::data::model::Dataset;

/// Render the scene as a standalone SVG document. Every mark carries a
/// `<title>` so viewers show the rider's tooltip on hover.
pub fn render_svg(scene: &ChartScene, dataset: &Dataset) -> String {
    let mut svg = String::new();
    let (w, h) = (scene.width, scene.height);

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        to_hex(scene.background)
    );

    axis_svg(&mut svg, &scene.x_axis);
    axis_svg(&mut svg, &scene.y_axis);

    for text in &scene.texts {
        text_svg(&mut svg, text);
    }

    svg.push_str("<g class=\"marks\">");
    for mark in &scene.marks {
        let title = dataset
            .record(mark.record)
            .map(tooltip_text)
            .unwrap_or_default();
        circle_svg(&mut svg, &mark.circle, Some(&title));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"legend\">");
    for entry in &scene.legend {
        text_svg(&mut svg, &entry.label);
        circle_svg(&mut svg, &entry.swatch, None);
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

/// Render and write to `path`.
pub fn export_svg(scene: &ChartScene, dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, render_svg(scene, dataset))
        .with_context(|| format!("writing SVG to {}", path.display()))?;
    log::info!("Exported chart with {} marks to {}", scene.marks.len(), path.display());
    Ok(())
}

fn axis_svg(svg: &mut String, axis: &Axis) {
    let (r0, r1) = axis.range;
    let k = axis.tick_size;
    let (anchor, domain_path) = match axis.orientation {
        AxisOrientation::Bottom => ("middle", format!("M{r0},{k}V0H{r1}V{k}")),
        AxisOrientation::Left => ("end", format!("M{},{r0}H0V{r1}H{}", -k, -k)),
    };

    let _ = write!(
        svg,
        "<g transform=\"translate({},{})\" fill=\"none\" font-size=\"{}\" font-family=\"sans-serif\" text-anchor=\"{anchor}\">",
        axis.origin.x, axis.origin.y, axis.font_size
    );
    let _ = write!(svg, "<path stroke=\"black\" d=\"{domain_path}\"/>");

    for tick in &axis.ticks {
        let label = escape_xml(&tick.label);
        match axis.orientation {
            AxisOrientation::Bottom => {
                let _ = write!(
                    svg,
                    "<g transform=\"translate({},0)\"><line stroke=\"black\" y2=\"{k}\"/><text fill=\"black\" y=\"{}\" dy=\"0.71em\">{label}</text></g>",
                    tick.offset,
                    k + 3.0
                );
            }
            AxisOrientation::Left => {
                let _ = write!(
                    svg,
                    "<g transform=\"translate(0,{})\"><line stroke=\"black\" x2=\"{}\"/><text fill=\"black\" x=\"{}\" dy=\"0.32em\">{label}</text></g>",
                    tick.offset,
                    -k,
                    -(k + 3.0)
                );
            }
        }
    }
    svg.push_str("</g>");
}

fn text_svg(svg: &mut String, text: &TextItem) {
    let (x, y) = (text.anchor.x, text.anchor.y);
    let transform = if text.rotation != 0.0 {
        format!(" transform=\"rotate({} {x} {y})\"", text.rotation)
    } else {
        String::new()
    };
    let _ = write!(
        svg,
        "<text x=\"{x}\" y=\"{y}\" font-size=\"{}px\"{transform}>{}</text>",
        text.font_size,
        escape_xml(&text.text)
    );
}

fn circle_svg(svg: &mut String, circle: &Circle, title: Option<&str>) {
    let _ = write!(
        svg,
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"black\" stroke-width=\"{}\" opacity=\"{}\">",
        circle.center.x,
        circle.center.y,
        circle.radius,
        to_hex(circle.fill),
        circle.stroke_width,
        circle.opacity
    );
    if let Some(title) = title {
        let _ = write!(svg, "<title>{}</title>", escape_xml(title));
    }
    svg.push_str("</circle>");
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::MarkerPalette;
    use crate::config::ChartConfig;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rider = |name: &str, year, time: &str, doping: &str| Record {
            name: name.into(),
            nationality: "ESP".into(),
            year,
            time: time.into(),
            doping: doping.into(),
            seconds: None,
            place: None,
            url: None,
        };
        Dataset::from_records(vec![
            rider("A & B", 1994, "36:40", ""),
            rider("C", 2015, "35:10", "Admitted <doping>"),
        ])
        .unwrap()
    }

    fn render() -> String {
        let config = ChartConfig::default();
        let ds = dataset();
        let scene = ChartScene::build(&ds, &config, &MarkerPalette::from_config(&config).unwrap());
        render_svg(&scene, &ds)
    }

    #[test]
    fn document_has_fixed_canvas() {
        let svg = render();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1000\" height=\"500\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn one_titled_circle_per_record_plus_swatches() {
        let svg = render();
        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("<title>").count(), 2);
        assert!(svg.contains("fill=\"#ff993e\""));
        assert!(svg.contains("fill=\"#4c92c3\""));
    }

    #[test]
    fn text_is_escaped() {
        let svg = render();
        assert!(svg.contains("A &amp; B: ESP"));
        assert!(svg.contains("Admitted &lt;doping&gt;"));
        assert!(svg.contains("Alpe d&#39;Huez"));
    }

    #[test]
    fn y_label_is_rotated_about_its_anchor() {
        let svg = render();
        assert!(svg.contains("transform=\"rotate(-90 30 300)\">Time in Minutes</text>"));
    }

    #[test]
    fn axes_carry_formatted_ticks() {
        let svg = render();
        assert!(svg.contains(">1994</text>"));
        assert!(svg.contains(">2016</text>"));
        assert!(svg.contains(">35:15</text>"));
    }

    #[test]
    fn export_writes_file() {
        let config = ChartConfig::default();
        let ds = dataset();
        let scene = ChartScene::build(&ds, &config, &MarkerPalette::from_config(&config).unwrap());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        export_svg(&scene, &ds, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_svg(&scene, &ds));
    }
}
