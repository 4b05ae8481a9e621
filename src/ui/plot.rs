use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::app::PreviewState;

// ---------------------------------------------------------------------------
// Curve preview (central panel)
// ---------------------------------------------------------------------------

/// Raw samples as dots, the preview resample as a line.
pub fn preview_plot(ui: &mut Ui, state: &PreviewState) {
    let level = &state.level;

    Plot::new("preview_plot")
        .legend(Legend::default())
        .x_axis_label("Index")
        .y_axis_label("Close")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if state.show_samples {
                let samples: PlotPoints = level.curve.knots().map(|(x, y)| [x, y]).collect();
                plot_ui.points(
                    Points::new(samples)
                        .name("samples")
                        .color(Color32::RED)
                        .radius(3.0),
                );
            }

            let preview: PlotPoints = level.preview.iter().map(|p| [p.x, p.value]).collect();
            plot_ui.line(
                Line::new(preview)
                    .name(level.curve.kind().name())
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );

            if state.show_export {
                let body: PlotPoints = level.body.iter().map(|p| [p.x, p.value]).collect();
                plot_ui.line(
                    Line::new(body)
                        .name("export grid")
                        .color(Color32::GOLD)
                        .width(1.0),
                );
            }
        });
}
