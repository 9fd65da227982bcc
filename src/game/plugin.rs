//! Game plugin - interaction state and input wiring
//!
//! Registers the rules engine, the initial position snapshot, and the
//! selection resource, then schedules the press handler ahead of every
//! scene reconciliation system via [`GameSystems`].

use bevy::prelude::*;

use crate::board::{File, Rank, Square};
use crate::rules::{PieceColor, PieceKind, PieceOnBoard, RulesEngine, TerminalStatus};

use super::pick::{board_press_system, PickRole, PickTarget};
use super::selection::SelectionState;
use super::system_sets::GameSystems;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // The snapshot resource starts as the engine's opening position so
        // the first reconciliation pass has something to render.
        let engine = RulesEngine::default();
        app.insert_resource(engine.snapshot());
        app.insert_resource(engine);
        app.init_resource::<SelectionState>();

        // Reflection support for the inspector-facing types
        app.register_type::<File>()
            .register_type::<Rank>()
            .register_type::<Square>()
            .register_type::<PieceColor>()
            .register_type::<PieceKind>()
            .register_type::<PieceOnBoard>()
            .register_type::<TerminalStatus>()
            .register_type::<PickRole>()
            .register_type::<PickTarget>();

        app.configure_sets(Update, (GameSystems::Input, GameSystems::Visual).chain());

        app.add_systems(Update, board_press_system.in_set(GameSystems::Input));
    }
}
