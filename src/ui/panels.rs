use eframe::egui::{self, Color32, RichText, Ui};

use crate::render::export_svg;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.scene.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export SVG…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(name) = state.source_name() {
            ui.label(RichText::new(name).strong());
        }

        if let Some(ds) = &state.dataset {
            let alleged = ds.records().iter().filter(|r| r.has_allegation()).count();
            ui.label(format!("{} riders, {} with doping allegations", ds.len(), alleged));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rider dataset")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let (Some(scene), Some(dataset)) = (&state.scene, &state.dataset) else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export chart as SVG")
        .add_filter("SVG", &["svg"])
        .set_file_name("chart.svg")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_svg(scene, dataset, &path) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
