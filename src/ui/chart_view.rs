use eframe::egui::{
    self, epaint::TextShape, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui,
};

use crate::chart::scene::{Axis, AxisOrientation, ChartScene, Circle, Point, TextItem};
use crate::color::to_color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart canvas (central panel)
// ---------------------------------------------------------------------------

/// Paint the chart at its fixed size and drive the hover tooltip.
pub fn chart_view(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        scene,
        dataset,
        tooltip,
        status_message,
        ..
    } = state;

    let (Some(scene), Some(dataset)) = (scene.as_ref(), dataset.as_ref()) else {
        ui.centered_and_justified(|ui: &mut Ui| match status_message {
            Some(msg) => {
                ui.label(RichText::new(msg.as_str()).color(Color32::RED).heading());
            }
            None => {
                ui.heading("Open a rider dataset to view the chart  (File → Open…)");
            }
        });
        return;
    };

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let size = egui::vec2(scene.width as f32, scene.height as f32);
            let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
            paint_scene(ui, rect, scene);

            match response.hover_pos() {
                Some(pos) => {
                    let local = pos - rect.min;
                    tooltip.pointer_moved(scene, dataset, Point::new(local.x as f64, local.y as f64));
                }
                None => tooltip.pointer_left(),
            }

            if tooltip.is_visible() {
                let at = to_screen(rect, tooltip.position());
                egui::Area::new(egui::Id::new("chart_tooltip"))
                    .order(egui::Order::Tooltip)
                    .fixed_pos(at)
                    .interactable(false)
                    .show(ui.ctx(), |ui: &mut Ui| {
                        ui.multiply_opacity(tooltip.opacity());
                        egui::Frame::popup(ui.style()).show(ui, |ui: &mut Ui| {
                            ui.label(tooltip.text());
                        });
                    });
            }
        });
}

fn to_screen(rect: Rect, p: Point) -> Pos2 {
    rect.min + egui::vec2(p.x as f32, p.y as f32)
}

fn paint_scene(ui: &Ui, rect: Rect, scene: &ChartScene) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, to_color32(scene.background));

    paint_axis(&painter, rect, &scene.x_axis);
    paint_axis(&painter, rect, &scene.y_axis);

    for text in &scene.texts {
        paint_text(&painter, rect, text);
    }
    for mark in &scene.marks {
        paint_circle(&painter, rect, &mark.circle);
    }
    for entry in &scene.legend {
        paint_text(&painter, rect, &entry.label);
        paint_circle(&painter, rect, &entry.swatch);
    }
}

fn paint_axis(painter: &egui::Painter, rect: Rect, axis: &Axis) {
    let stroke = Stroke::new(1.0, Color32::BLACK);
    let font = FontId::proportional(axis.font_size as f32);
    let k = axis.tick_size;

    let (start, end) = axis.domain_line();
    painter.line_segment([to_screen(rect, start), to_screen(rect, end)], stroke);

    for tick in &axis.ticks {
        let at = axis.tick_anchor(tick);
        let (tip, label_at, align) = match axis.orientation {
            AxisOrientation::Bottom => (
                Point::new(at.x, at.y + k),
                Point::new(at.x, at.y + k + 3.0),
                Align2::CENTER_TOP,
            ),
            AxisOrientation::Left => (
                Point::new(at.x - k, at.y),
                Point::new(at.x - k - 3.0, at.y),
                Align2::RIGHT_CENTER,
            ),
        };
        painter.line_segment([to_screen(rect, at), to_screen(rect, tip)], stroke);
        painter.text(
            to_screen(rect, label_at),
            align,
            &tick.label,
            font.clone(),
            Color32::BLACK,
        );
    }
}

fn paint_text(painter: &egui::Painter, rect: Rect, text: &TextItem) {
    let font = FontId::proportional(text.font_size as f32);
    if text.rotation == 0.0 {
        painter.text(
            to_screen(rect, text.anchor),
            Align2::LEFT_BOTTOM,
            &text.text,
            font,
            Color32::BLACK,
        );
        return;
    }

    // Galleys rotate about their top-left corner; shift so the baseline
    // passes through the anchor.
    let galley = painter.layout_no_wrap(text.text.clone(), font, Color32::BLACK);
    let angle = (text.rotation as f32).to_radians();
    let height = galley.size().y;
    let shift = egui::vec2(angle.sin() * height, -angle.cos() * height);
    let pos = to_screen(rect, text.anchor) + shift;
    painter.add(TextShape::new(pos, galley, Color32::BLACK).with_angle(angle));
}

fn paint_circle(painter: &egui::Painter, rect: Rect, circle: &Circle) {
    let fill = to_color32(circle.fill).gamma_multiply(circle.opacity);
    let stroke = Stroke::new(
        circle.stroke_width as f32,
        Color32::BLACK.gamma_multiply(circle.opacity),
    );
    painter.circle(
        to_screen(rect, circle.center),
        circle.radius as f32,
        fill,
        stroke,
    );
}
