use eframe::egui;
use egui_dock::{
    DockArea,
    DockState,
    NodeIndex,
    Style,
    TabViewer,
};
use foodrepo::{
    CandidateRow,
    DetectionMode,
    FoodRepoError,
    MergeWidth,
    PeakSource,
    SampleCatalog,
    SessionState,
    run_batch,
};
use std::io::Write;
use std::path::PathBuf;

use crate::file_loader::FileLoader;
use crate::plot_renderer::{
    OverlayChart,
    PieChart,
};
use crate::ui::panels::{
    CompositionPanel,
    OverlayPanel,
    SampleTablePanel,
    SettingsPanel,
};
use crate::ui::{
    Panel,
    PanelContext,
};

/// Commands that trigger state changes in the application
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum AppCommand {
    /// Load (or reload) the sample catalog from a CSV file
    LoadCatalog(PathBuf),
    /// Replace the selection with the included rows of a full table snapshot
    SaveSelection(Vec<CandidateRow>),
    SetDetectionMode(DetectionMode),
    SetMergeWidth(MergeWidth),
    /// Fetch, bin and chart every selected sample
    ConfirmSelection,
}

/// Pane types for the tile layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Settings,
    Samples,
    Chromatograms,
    Composition,
}

/// Startup parameters taken from the command line
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub catalog_path: PathBuf,
    pub merge_width: MergeWidth,
    pub mode: DetectionMode,
}

/// State of the sample catalog
#[derive(Debug, Default)]
pub enum CatalogState {
    #[default]
    NotLoaded,
    Loaded {
        path: PathBuf,
        catalog: SampleCatalog,
    },
    /// Loading failed; nothing can be selected until a catalog loads
    Unavailable { path: PathBuf, reason: String },
}

/// Domain/data state - the catalog and the committed session
#[derive(Debug, Default)]
pub struct DataState {
    pub catalog: CatalogState,
    /// Bumped on every catalog (re)load so cached table filters are recomputed
    pub catalog_generation: u64,
    pub session: SessionState,
    pub merge_width: MergeWidth,
}

impl DataState {
    pub fn catalog(&self) -> Option<&SampleCatalog> {
        match &self.catalog {
            CatalogState::Loaded { catalog, .. } => Some(catalog),
            _ => None,
        }
    }

    /// Full snapshot of the table draft, one row per catalog entry.
    pub fn snapshot(&self, draft_included: &[bool]) -> Vec<CandidateRow> {
        let Some(catalog) = self.catalog() else {
            return Vec::new();
        };
        catalog
            .samples()
            .iter()
            .zip(draft_included.iter().copied().chain(std::iter::repeat(false)))
            .map(|(sample, included)| CandidateRow::new(sample.id.clone(), included))
            .collect()
    }

    /// Whether the draft disagrees with the committed selection.
    pub fn draft_differs(&self, draft_included: &[bool]) -> bool {
        let Some(catalog) = self.catalog() else {
            return false;
        };
        catalog
            .samples()
            .iter()
            .zip(draft_included.iter())
            .any(|(sample, included)| *included != self.session.is_selected(&sample.id))
    }

    /// Draft checkboxes matching the committed selection.
    fn draft_from_selection(&self) -> Vec<bool> {
        match self.catalog() {
            Some(catalog) => catalog
                .samples()
                .iter()
                .map(|s| self.session.is_selected(&s.id))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// UI-specific state - transient state that doesn't affect data
#[derive(Debug, Default)]
pub struct UiState {
    /// Filter text for the sample table
    pub table_filter: String,
    /// Per catalog row inclusion toggles, not committed until saved
    pub draft_included: Vec<bool>,
}

/// Computed state - charts and warnings of the last confirm
#[derive(Default)]
pub struct ComputedState {
    pub overlay: Option<OverlayChart>,
    pub pies: Vec<PieChart>,
    pub warnings: Vec<String>,
}

impl ComputedState {
    fn clear(&mut self) {
        self.overlay = None;
        self.pies.clear();
        self.warnings.clear();
    }
}

/// Main application state
pub struct ViewerApp {
    /// File loader for handling file dialogs and loading
    file_loader: FileLoader,

    data: DataState,
    ui: UiState,
    computed: ComputedState,

    /// Pending commands to be executed
    pending_commands: Vec<AppCommand>,

    /// Dock state for layout management
    dock_state: DockState<Pane>,

    settings_panel: SettingsPanel,
    table_panel: SampleTablePanel,
    overlay_panel: OverlayPanel,
    composition_panel: CompositionPanel,

    /// Where peak lists come from
    source: Box<dyn PeakSource>,

    /// Optional session log writer
    session_log: Option<Box<dyn Write + Send + Sync>>,
}

impl ViewerApp {
    /// Create a new test instance without eframe context or catalog
    #[cfg(test)]
    pub fn new_test(source: Box<dyn PeakSource>) -> Self {
        Self::with_parts(source, None)
    }

    pub fn new(
        config: ViewerConfig,
        source: Box<dyn PeakSource>,
        session_log: Option<Box<dyn Write + Send + Sync>>,
    ) -> Self {
        let mut app = Self::with_parts(source, session_log);
        app.data.merge_width = config.merge_width;
        app.data.session.set_mode(config.mode);
        app.pending_commands
            .push(AppCommand::LoadCatalog(config.catalog_path));
        app.handle_commands();
        app
    }

    fn with_parts(
        source: Box<dyn PeakSource>,
        session_log: Option<Box<dyn Write + Send + Sync>>,
    ) -> Self {
        Self {
            file_loader: FileLoader::new(),
            data: DataState::default(),
            ui: UiState::default(),
            computed: ComputedState::default(),
            pending_commands: Vec::new(),
            dock_state: Self::default_layout(),
            settings_panel: SettingsPanel::new(),
            table_panel: SampleTablePanel::new(),
            overlay_panel: OverlayPanel::new(),
            composition_panel: CompositionPanel::new(),
            source,
            session_log,
        }
    }

    /// Settings on the left, table and charts as tabs on the right
    fn default_layout() -> DockState<Pane> {
        let mut dock_state =
            DockState::new(vec![Pane::Samples, Pane::Chromatograms, Pane::Composition]);
        dock_state
            .main_surface_mut()
            .split_left(NodeIndex::root(), 0.22, vec![Pane::Settings]);
        dock_state
    }

    pub(crate) fn handle_commands(&mut self) {
        let commands = std::mem::take(&mut self.pending_commands);

        for cmd in commands {
            tracing::debug!("Handling command: {:?}", cmd);

            if let Some(logger) = &mut self.session_log {
                if let Ok(json) = serde_json::to_string(&cmd) {
                    let _ = writeln!(logger, "{}", json);
                }
            }

            match cmd {
                AppCommand::LoadCatalog(path) => {
                    self.load_catalog(path);
                }
                AppCommand::SaveSelection(rows) => {
                    let selection = self.data.session.commit_selection(rows);
                    tracing::info!("Saved selection of {} samples", selection.len());
                    self.ui.draft_included = self.data.draft_from_selection();
                }
                // Charts drawn with the old setting are dropped; nothing is
                // fetched until the next confirm.
                AppCommand::SetDetectionMode(mode) => {
                    self.data.session.set_mode(mode);
                    self.computed.clear();
                }
                AppCommand::SetMergeWidth(width) => {
                    self.data.merge_width = width;
                    self.computed.clear();
                }
                AppCommand::ConfirmSelection => {
                    self.run_confirmed_selection();
                }
            }
        }
    }

    fn load_catalog(&mut self, path: PathBuf) {
        self.computed.clear();
        match self.file_loader.load_catalog(&path) {
            Ok(catalog) => {
                tracing::info!("Loaded {} samples from {}", catalog.len(), path.display());
                self.data.catalog = CatalogState::Loaded { path, catalog };
            }
            Err(e) => {
                tracing::error!("Failed to load sample list: {}", e);
                self.computed.warnings.push(e.to_string());
                self.data.catalog = CatalogState::Unavailable {
                    path,
                    reason: e.to_string(),
                };
            }
        }
        self.data.catalog_generation += 1;
        self.ui.draft_included = self.data.draft_from_selection();
    }

    fn run_confirmed_selection(&mut self) {
        self.computed.clear();

        let catalog = match &self.data.catalog {
            CatalogState::Loaded { catalog, .. } => catalog,
            CatalogState::Unavailable { path, .. } => {
                self.computed
                    .warnings
                    .push(format!("Sample list unavailable: {}", path.display()));
                return;
            }
            CatalogState::NotLoaded => {
                self.computed
                    .warnings
                    .push("Load a sample list first".to_string());
                return;
            }
        };

        let report = match run_batch(
            self.source.as_ref(),
            catalog,
            self.data.session.selection(),
            self.data.session.mode(),
            self.data.merge_width.get(),
        ) {
            Ok(report) => report,
            Err(FoodRepoError::EmptySelection) => {
                tracing::warn!("Confirm pressed with an empty selection");
                self.computed
                    .warnings
                    .push("No samples selected. Save a selection first.".to_string());
                return;
            }
            Err(e) => {
                tracing::error!("Batch failed: {}", e);
                self.computed.warnings.push(e.to_string());
                return;
            }
        };

        self.computed.overlay = Some(OverlayChart::from_profiles(&report.profiles));
        self.computed.pies = report.profiles.iter().map(PieChart::from_profile).collect();
        self.computed.warnings = report.warnings.iter().map(|w| w.to_string()).collect();
    }

    fn render_warnings(ui: &mut egui::Ui, warnings: &[String]) {
        egui::ScrollArea::vertical()
            .max_height(120.0)
            .show(ui, |ui| {
                for warning in warnings {
                    ui.label(
                        egui::RichText::new(format!("⚠ {}", warning))
                            .color(egui::Color32::from_rgb(255, 161, 90)),
                    );
                }
            });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_commands();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Food Repository Viewer");
            ui.separator();
        });

        if !self.computed.warnings.is_empty() {
            egui::TopBottomPanel::bottom("warnings_panel").show(ctx, |ui| {
                Self::render_warnings(ui, &self.computed.warnings);
            });
        }

        let mut tab_viewer = AppTabViewer {
            file_loader: &mut self.file_loader,
            data: &self.data,
            ui: &mut self.ui,
            computed: &self.computed,
            pending_commands: &mut self.pending_commands,
            settings_panel: &mut self.settings_panel,
            table_panel: &mut self.table_panel,
            overlay_panel: &mut self.overlay_panel,
            composition_panel: &mut self.composition_panel,
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            DockArea::new(&mut self.dock_state)
                .style(Style::from_egui(ui.style().as_ref()))
                .show_inside(ui, &mut tab_viewer);
        });

        if !self.pending_commands.is_empty() {
            ctx.request_repaint();
        }
    }
}

struct AppTabViewer<'a> {
    file_loader: &'a mut FileLoader,
    data: &'a DataState,
    ui: &'a mut UiState,
    computed: &'a ComputedState,
    pending_commands: &'a mut Vec<AppCommand>,
    settings_panel: &'a mut SettingsPanel,
    table_panel: &'a mut SampleTablePanel,
    overlay_panel: &'a mut OverlayPanel,
    composition_panel: &'a mut CompositionPanel,
}

macro_rules! panel_context {
    ($viewer:expr) => {
        PanelContext::new(
            $viewer.data,
            $viewer.ui,
            $viewer.computed,
            $viewer.file_loader,
            $viewer.pending_commands,
        )
    };
}

impl<'a> TabViewer for AppTabViewer<'a> {
    type Tab = Pane;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match tab {
            Pane::Settings => self.settings_panel.title().into(),
            Pane::Samples => self.table_panel.title().into(),
            Pane::Chromatograms => self.overlay_panel.title().into(),
            Pane::Composition => self.composition_panel.title().into(),
        }
    }

    fn ui(&mut self, ui: &mut egui::Ui, tab: &mut Self::Tab) {
        match tab {
            Pane::Settings => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut ctx = panel_context!(self);
                        self.settings_panel.render(ui, &mut ctx);
                    });
            }
            Pane::Samples => {
                let mut ctx = panel_context!(self);
                self.table_panel.render(ui, &mut ctx);
            }
            Pane::Chromatograms => {
                let mut ctx = panel_context!(self);
                self.overlay_panel.render(ui, &mut ctx);
            }
            Pane::Composition => {
                let mut ctx = panel_context!(self);
                self.composition_panel.render(ui, &mut ctx);
            }
        }
    }

    fn is_closeable(&self, _tab: &Self::Tab) -> bool {
        false
    }
}
