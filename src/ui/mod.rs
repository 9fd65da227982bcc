//! Side panel UI - cosmetic settings and game status
//!
//! The panel is the only writer of [`CosmeticConfig`]. Widgets edit a local
//! copy that is written back with `set_if_neq`, so the config resource is
//! only marked changed when a setting actually changed and the scene
//! rebuild conditions stay quiet otherwise.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::core::{BoardTheme, CosmeticConfig, PieceTheme, WeatherMode};
use crate::game::SelectionState;
use crate::rules::{BoardPosition, RulesEngine, TerminalStatus};

/// Draw the settings/status side panel
pub fn settings_panel(
    mut contexts: EguiContexts,
    mut config: ResMut<CosmeticConfig>,
    mut engine: ResMut<RulesEngine>,
    mut selection: ResMut<SelectionState>,
    mut position: ResMut<BoardPosition>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut edited = *config;

    egui::SidePanel::left("scene_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Board");
            ui.horizontal_wrapped(|ui| {
                for theme in [
                    BoardTheme::Classic,
                    BoardTheme::Modern,
                    BoardTheme::Wood,
                    BoardTheme::Marble,
                ] {
                    ui.radio_value(&mut edited.board_theme, theme, theme.name());
                }
            });

            ui.separator();
            ui.heading("Pieces");
            ui.horizontal_wrapped(|ui| {
                for theme in [PieceTheme::Classic, PieceTheme::Onyx, PieceTheme::Ember] {
                    ui.radio_value(&mut edited.piece_theme, theme, theme.name());
                }
            });

            ui.separator();
            ui.heading("Weather");
            ui.horizontal_wrapped(|ui| {
                for mode in [
                    WeatherMode::None,
                    WeatherMode::Rain,
                    WeatherMode::Snow,
                    WeatherMode::Heat,
                ] {
                    ui.radio_value(&mut edited.weather, mode, mode.name());
                }
            });

            ui.separator();
            ui.heading("Game");
            ui.label(status_line(&position));
            ui.add_space(4.0);
            ui.monospace(position.fen());
            ui.add_space(8.0);

            if ui.button("New game").clicked() {
                engine.reset();
                *position = engine.snapshot();
                *selection = SelectionState::Idle;
                info!("[UI] new game started");
            }
        });

    config.set_if_neq(edited);
}

fn status_line(position: &BoardPosition) -> String {
    match position.status() {
        TerminalStatus::None => format!("{} to move", position.side_to_move().name()),
        TerminalStatus::Check => {
            format!("{} to move - check!", position.side_to_move().name())
        }
        TerminalStatus::Checkmate => format!(
            "Checkmate - {} wins",
            position.side_to_move().opponent().name()
        ),
        TerminalStatus::Draw => "Draw".to_string(),
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, settings_panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_reports_turn_and_terminal_states() {
        let engine = RulesEngine::default();
        assert_eq!(status_line(&engine.snapshot()), "White to move");

        let check = RulesEngine::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").unwrap();
        assert_eq!(status_line(&check.snapshot()), "Black to move - check!");

        let mut mated = RulesEngine::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            mated
                .attempt_move(
                    crate::board::Square::from_algebraic(from).unwrap(),
                    crate::board::Square::from_algebraic(to).unwrap(),
                )
                .unwrap();
        }
        assert_eq!(status_line(&mated.snapshot()), "Checkmate - Black wins");

        let drawn = RulesEngine::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(status_line(&drawn.snapshot()), "Draw");
    }
}
