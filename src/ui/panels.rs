use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::ChartState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: which file, where in the run, and a way to move on.
pub fn top_bar(ui: &mut Ui, state: &mut ChartState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(&state.file.file_name);

        ui.separator();

        ui.label(format!("{} / {}", state.position, state.total));

        ui.separator();

        if state.chart.is_empty() {
            ui.label("no records");
        } else {
            ui.label(format!("{} tasks", state.chart.len()));
        }
        if let Some((min, max)) = state.chart.bounds() {
            ui.label(format!("latency {:.1} – {:.1} ms", min[1], max[1]));
        }

        ui.separator();

        let next_label = if state.position < state.total {
            "Next ▶"
        } else {
            "Close"
        };
        if ui.button(next_label).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}
