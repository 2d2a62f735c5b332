// Panel modules for UI organization
// Each panel renders its portion of the UI and pushes commands for state changes

pub mod composition_panel;
pub mod overlay_panel;
pub mod sample_table_panel;
pub mod settings_panel;

pub use composition_panel::CompositionPanel;
pub use overlay_panel::OverlayPanel;
pub use sample_table_panel::SampleTablePanel;
pub use settings_panel::SettingsPanel;
