use eframe::egui;

use crate::plot_renderer::render_overlay_chart;
use crate::ui::{
    Panel,
    PanelContext,
};

/// Relative-intensity lines of every profiled sample on shared axes
pub struct OverlayPanel;

impl OverlayPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for OverlayPanel {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        match &ctx.computed.overlay {
            Some(chart) if !chart.is_empty() => render_overlay_chart(ui, chart),
            Some(_) => {
                ui.label("No sample returned usable peak data");
            }
            None => {
                ui.label("Save a selection and press Confirm to draw chromatograms");
            }
        }
    }

    fn title(&self) -> &str {
        "Chromatograms"
    }
}

impl Default for OverlayPanel {
    fn default() -> Self {
        Self::new()
    }
}
