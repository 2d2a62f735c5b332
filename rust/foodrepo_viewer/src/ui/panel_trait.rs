//! What a dock tab gets to see and do while it draws

use eframe::egui;

use crate::app::{
    AppCommand,
    ComputedState,
    DataState,
    UiState,
};
use crate::file_loader::FileLoader;

/// Append-only handle on the frame's command queue.
pub struct CommandSink<'a> {
    queue: &'a mut Vec<AppCommand>,
}

impl<'a> CommandSink<'a> {
    pub(crate) fn new(queue: &'a mut Vec<AppCommand>) -> Self {
        Self { queue }
    }

    #[inline]
    pub fn push(&mut self, cmd: AppCommand) {
        self.queue.push(cmd);
    }
}

/// Borrowed app state for one panel draw.
///
/// Session data and charts are read-only here. They change through
/// `commands`, which the app applies after the frame.
pub struct PanelContext<'a> {
    pub data: &'a DataState,
    pub ui: &'a mut UiState,
    pub computed: &'a ComputedState,
    pub file_loader: &'a mut FileLoader,
    pub commands: CommandSink<'a>,
}

impl<'a> PanelContext<'a> {
    pub fn new(
        data: &'a DataState,
        ui: &'a mut UiState,
        computed: &'a ComputedState,
        file_loader: &'a mut FileLoader,
        command_queue: &'a mut Vec<AppCommand>,
    ) -> Self {
        Self {
            data,
            ui,
            computed,
            file_loader,
            commands: CommandSink::new(command_queue),
        }
    }
}

/// A dock tab of the viewer.
pub trait Panel {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &mut PanelContext);

    /// Tab label.
    fn title(&self) -> &str;
}
