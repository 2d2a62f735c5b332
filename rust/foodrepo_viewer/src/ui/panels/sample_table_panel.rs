use eframe::egui;

use crate::app::{
    AppCommand,
    CatalogState,
};
use crate::ui::components::render_sample_table;
use crate::ui::{
    Panel,
    PanelContext,
};

/// Panel for filtering the catalog and editing the selection draft
pub struct SampleTablePanel {
    filtered_indices: Vec<usize>,
    /// Filter text and catalog generation the cached indices were computed for
    last_search: Option<(String, u64)>,
}

impl SampleTablePanel {
    pub fn new() -> Self {
        Self {
            filtered_indices: Vec::new(),
            last_search: None,
        }
    }

    fn render_search_ui(&self, ui: &mut egui::Ui, search_line: &mut String) {
        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.text_edit_singleline(search_line);
            if ui.small_button("✖").clicked() {
                search_line.clear();
            }
        });
        ui.separator();
    }

    fn render_actions(&self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        let draft_count = ctx.ui.draft_included.iter().filter(|x| **x).count();
        let saved_count = ctx.data.session.selection().len();
        let dirty = ctx.data.draft_differs(&ctx.ui.draft_included);

        ui.horizontal(|ui| {
            if ui.button("Save Selection").clicked() {
                ctx.commands
                    .push(AppCommand::SaveSelection(ctx.data.snapshot(&ctx.ui.draft_included)));
            }
            if ui.button("Confirm").clicked() {
                ctx.commands.push(AppCommand::ConfirmSelection);
            }
            ui.separator();
            ui.label(format!("{} saved", saved_count));
            if dirty {
                ui.label(
                    egui::RichText::new(format!("{} checked, not saved", draft_count))
                        .color(egui::Color32::from_rgb(255, 161, 90)),
                );
            }
        });
        ui.separator();
    }
}

impl Panel for SampleTablePanel {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext) {
        ui.heading("Samples");
        ui.separator();

        let data = ctx.data;
        let catalog = match &data.catalog {
            CatalogState::Loaded { catalog, .. } => catalog,
            _ => {
                ui.label("Load a sample list to see the table");
                return;
            }
        };

        self.render_search_ui(ui, &mut ctx.ui.table_filter);
        self.render_actions(ui, ctx);

        let key = (ctx.ui.table_filter.clone(), data.catalog_generation);
        if self.last_search.as_ref() != Some(&key) {
            catalog.matching_indices(&key.0, &mut self.filtered_indices);
            self.last_search = Some(key);
        }

        ui.label(format!(
            "Showing {} of {} samples",
            self.filtered_indices.len(),
            catalog.len()
        ));

        let toggled = egui::ScrollArea::horizontal()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                render_sample_table(
                    ui,
                    &self.filtered_indices,
                    catalog.samples(),
                    &mut ctx.ui.draft_included,
                )
            })
            .inner;
        // The save status above the table was drawn from the old draft.
        if toggled {
            ui.ctx().request_repaint();
        }
    }

    fn title(&self) -> &str {
        "Samples"
    }
}

impl Default for SampleTablePanel {
    fn default() -> Self {
        Self::new()
    }
}
