pub mod graphs;
pub mod settings;
pub mod toolbar;

use crate::preview::PreviewState;
use crate::stats::FrameStats;

/// Tracks which UI panels are open.
pub struct UiState {
    pub show_graphs: bool,
    pub show_settings: bool,
    /// Last save/load outcome shown in the settings panel.
    pub status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_graphs: true,
            show_settings: false,
            status: None,
        }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui(state: &mut PreviewState, ui_state: &mut UiState, stats: &mut FrameStats) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, state, ui_state, stats);

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, stats);
        }

        if ui_state.show_settings {
            settings::draw_settings(ctx, state, ui_state);
        }
    });

    egui_macroquad::draw();
}
