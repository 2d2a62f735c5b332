use eframe::egui;

use crate::plot_renderer::render_pie_grid;
use crate::ui::{
    Panel,
    PanelContext,
};

/// One composition pie per profiled sample
pub struct CompositionPanel;

impl CompositionPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for CompositionPanel {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        ui.heading("Retention Time Composition");
        ui.separator();

        if ctx.computed.pies.is_empty() {
            ui.label("No composition data yet");
            return;
        }

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                render_pie_grid(ui, &ctx.computed.pies);
            });
    }

    fn title(&self) -> &str {
        "Composition"
    }
}

impl Default for CompositionPanel {
    fn default() -> Self {
        Self::new()
    }
}
