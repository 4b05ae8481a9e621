use eframe::egui::{self, Ui};

use crate::app::PreviewState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Summary of the fit plus layer toggles.
pub fn top_bar(ui: &mut Ui, state: &mut PreviewState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&state.title);
        ui.separator();

        let level = &state.level;
        ui.label(format!(
            "{} samples, {} fit (order {}), {} export points",
            level.series.len(),
            level.curve.kind(),
            level.curve.order(),
            level.body.len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_samples, "Samples").clicked() {
            state.show_samples = !state.show_samples;
        }
        if ui.selectable_label(state.show_export, "Export grid").clicked() {
            state.show_export = !state.show_export;
        }
    });
}
