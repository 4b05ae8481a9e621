use eframe::egui;

use crate::pipeline::PreparedLevel;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Preview window state
// ---------------------------------------------------------------------------

pub struct PreviewState {
    pub title: String,
    pub level: PreparedLevel,
    pub show_samples: bool,
    pub show_export: bool,
}

impl PreviewState {
    pub fn new(title: impl Into<String>, level: PreparedLevel) -> Self {
        Self {
            title: title.into(),
            level,
            show_samples: true,
            show_export: false,
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PreviewApp {
    pub state: PreviewState,
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary + toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::preview_plot(ui, &self.state);
        });
    }
}

/// Open the preview window and block until it is closed.
pub fn show_preview(title: &str, level: PreparedLevel) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([500.0, 300.0]),
        ..Default::default()
    };

    let state = PreviewState::new(title, level);
    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp { state }))),
    )
}
