use eframe::egui;
use foodrepo::Sample;

/// Renders the catalog rows in `filtered_idxs` with an inclusion checkbox each.
///
/// `draft_included` is indexed by catalog row. Returns true if any box was toggled.
pub fn render_sample_table(
    ui: &mut egui::Ui,
    filtered_idxs: &[usize],
    samples: &[Sample],
    draft_included: &mut [bool],
) -> bool {
    use egui_extras::{
        Column,
        TableBuilder,
    };

    let mut changed = false;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(40.0)) // Include
        .column(Column::auto().at_least(80.0)) // ID
        .column(Column::auto().at_least(200.0)) // Name
        .column(Column::remainder().at_least(120.0)) // Category
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Include");
            });
            header.col(|ui| {
                ui.strong("ID");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Category");
            });
        })
        .body(|body| {
            let row_height = 20.0;
            body.rows(row_height, filtered_idxs.len(), |mut row| {
                let original_idx = filtered_idxs[row.index()];
                let sample = &samples[original_idx];

                row.col(|ui| {
                    if let Some(included) = draft_included.get_mut(original_idx)
                        && ui.checkbox(included, "").changed()
                    {
                        changed = true;
                    }
                });
                row.col(|ui| {
                    ui.label(&sample.id);
                });
                row.col(|ui| {
                    ui.label(&sample.display_name);
                });
                row.col(|ui| {
                    ui.label(&sample.category);
                });
            });
        });

    changed
}
