//! Move-intent guide lines
//!
//! While a selection is active, one line is drawn from the origin square to
//! each legal target. Gizmo lines are immediate mode: they are re-submitted
//! every frame from the current selection, so they can never outlive or lag
//! the state that produced them.

use bevy::prelude::*;

use crate::game::{GameSystems, SelectionState};

const GUIDE_LIFT: f32 = 0.3;

pub fn draw_move_guides(selection: Res<SelectionState>, mut gizmos: Gizmos) {
    let SelectionState::Active {
        origin,
        legal_targets,
    } = &*selection
    else {
        return;
    };

    let lift = Vec3::Y * GUIDE_LIFT;
    let from = origin.world_position() + lift;
    for target in legal_targets {
        gizmos.line(from, target.world_position() + lift, Color::srgb(0.0, 0.75, 1.0));
    }
}

pub struct GuidesPlugin;

impl Plugin for GuidesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_move_guides.in_set(GameSystems::Visual));
    }
}
