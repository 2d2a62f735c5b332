use eframe::egui;
use foodrepo::{
    DetectionMode,
    MergeWidth,
};

use crate::app::{
    AppCommand,
    CatalogState,
};
use crate::ui::{
    Panel,
    PanelContext,
};

/// Catalog loading, merge width and detection mode
pub struct SettingsPanel {
    /// Slider value while it is being dragged
    width_draft: Option<f64>,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self { width_draft: None }
    }

    fn render_catalog_section(&self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        ui.heading("Sample List");

        if ui.button("Load Sample List...").clicked() {
            ctx.file_loader.open_catalog_dialog();
        }
        if let Some(path) = ctx.file_loader.take_pending_catalog_path() {
            ctx.commands.push(AppCommand::LoadCatalog(path));
        }

        match &ctx.data.catalog {
            CatalogState::NotLoaded => {
                ui.label("No sample list loaded");
            }
            CatalogState::Loaded { path, catalog } => {
                display_filename(ui, path);
                ui.label(format!("✓ Loaded: {} samples", catalog.len()));
            }
            CatalogState::Unavailable { path, reason } => {
                ui.label(
                    egui::RichText::new(format!(
                        "Failed to load sample list from {}:",
                        path.display()
                    ))
                    .color(egui::Color32::RED),
                );
                ui.label(egui::RichText::new(reason).color(egui::Color32::RED).small());
            }
        }
    }

    fn render_merge_width(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        ui.heading("Merge Width");

        let mut width = self.width_draft.unwrap_or(ctx.data.merge_width.get());
        let response = ui.add(
            egui::Slider::new(&mut width, MergeWidth::MIN..=MergeWidth::MAX)
                .step_by(MergeWidth::STEP)
                .fixed_decimals(2)
                .suffix(" min"),
        );
        // Commit on drag end, not on every intermediate value.
        if response.dragged() {
            self.width_draft = Some(width);
            return;
        }
        self.width_draft = None;
        if (response.drag_stopped() || response.changed())
            && let Ok(width) = MergeWidth::try_new(width)
            && width != ctx.data.merge_width
        {
            ctx.commands.push(AppCommand::SetMergeWidth(width));
        }
    }

    fn render_detection_mode(&self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        ui.heading("Detection Mode");

        let current = ctx.data.session.mode();
        ui.horizontal(|ui| {
            for mode in DetectionMode::ALL {
                if ui.radio(current == mode, mode.as_str()).clicked() && current != mode {
                    ctx.commands.push(AppCommand::SetDetectionMode(mode));
                }
            }
        });
    }
}

impl Panel for SettingsPanel {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        self.render_catalog_section(ui, ctx);
        ui.add_space(10.0);
        ui.separator();

        self.render_merge_width(ui, ctx);
        ui.add_space(10.0);

        self.render_detection_mode(ui, ctx);
    }

    fn title(&self) -> &str {
        "Settings"
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn display_filename(ui: &mut egui::Ui, path: &std::path::Path) {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Unknown");
    ui.label(egui::RichText::new(filename).small().italics())
        .on_hover_text(path.display().to_string());
}
