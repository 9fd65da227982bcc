//! Board surface rendering - square spawning and color reconciliation
//!
//! The 64 square entities are spawned once at startup and keyed by their
//! [`PickTarget`] tag. Color state is reconciled whenever the theme or the
//! selection changes: base checkerboard color from the board theme,
//! overridden by the selected-origin color, overridden by the legal-target
//! color. The reconciliation is a pure function of (theme, selection) per
//! square, so a full rebuild at any time produces the same scene.

use bevy::prelude::*;

use crate::board::Square;
use crate::core::{BoardTheme, CosmeticConfig};
use crate::game::{GameSystems, PickRole, PickShape, PickTarget, SelectionState};

/// Board squares are thin boxes; their top face sits at this height.
pub const BOARD_TOP: f32 = SQUARE_THICKNESS / 2.0;

const SQUARE_THICKNESS: f32 = 0.1;

/// Marker component for the 64 board square entities
#[derive(Component, Debug)]
pub struct BoardSquare;

/// Material handles for every color a square can take
///
/// The light/dark materials are mutated in place on theme change so all
/// squares sharing them update at once; the highlight materials are fixed.
#[derive(Resource)]
pub struct SquareMaterials {
    pub light: Handle<StandardMaterial>,
    pub dark: Handle<StandardMaterial>,
    pub selected: Handle<StandardMaterial>,
    pub target: Handle<StandardMaterial>,
}

impl FromWorld for SquareMaterials {
    fn from_world(world: &mut World) -> Self {
        let (light_color, dark_color) = BoardTheme::default().colors();
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        SquareMaterials {
            light: materials.add(light_color),
            dark: materials.add(dark_color),
            selected: materials.add(Color::srgb(0.10, 0.85, 0.25)),
            target: materials.add(Color::srgb(0.0, 0.75, 1.0)),
        }
    }
}

/// Spawn the 64 board squares
pub fn spawn_board(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<SquareMaterials>,
) {
    let mesh = meshes.add(Cuboid::new(1.0, SQUARE_THICKNESS, 1.0));

    for square in Square::all() {
        let material = if square.is_light() {
            materials.light.clone()
        } else {
            materials.dark.clone()
        };

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(square.world_position()),
            PickTarget {
                square,
                role: PickRole::Square,
            },
            PickShape,
            BoardSquare,
            Name::new(format!("Square {}", square.to_algebraic())),
        ));
    }

    info!("[BOARD] spawned 64 board squares");
}

/// Push the active board theme into the shared square materials
pub fn apply_board_theme(
    config: Res<CosmeticConfig>,
    square_materials: Res<SquareMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (light, dark) = config.board_theme.colors();
    if let Some(material) = materials.get_mut(&square_materials.light) {
        material.base_color = light;
    }
    if let Some(material) = materials.get_mut(&square_materials.dark) {
        material.base_color = dark;
    }
    info!("[BOARD] applied {} board theme", config.board_theme.name());
}

/// Reconcile every square's material with the current selection
pub fn apply_square_highlights(
    selection: Res<SelectionState>,
    materials: Res<SquareMaterials>,
    mut squares: Query<(&PickTarget, &mut MeshMaterial3d<StandardMaterial>), With<BoardSquare>>,
) {
    for (tag, mut material) in squares.iter_mut() {
        let desired = if selection.origin() == Some(tag.square) {
            materials.selected.clone()
        } else if selection.is_legal_target(tag.square) {
            materials.target.clone()
        } else if tag.square.is_light() {
            materials.light.clone()
        } else {
            materials.dark.clone()
        };

        if material.0 != desired {
            material.0 = desired;
        }
    }
}

pub struct BoardSurfacePlugin;

impl Plugin for BoardSurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SquareMaterials>();
        app.add_systems(Startup, spawn_board);
        app.add_systems(
            Update,
            (
                apply_board_theme.run_if(resource_changed::<CosmeticConfig>),
                apply_square_highlights.run_if(resource_changed::<SelectionState>),
            )
                .in_set(GameSystems::Visual),
        );
    }
}
