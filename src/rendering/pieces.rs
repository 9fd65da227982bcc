//! Piece rendering - mesh groups rebuilt from position snapshots
//!
//! Every piece is a small group: a tagged root entity carrying the
//! [`PickTarget`], with a base disc and a body mesh as children (the king
//! also gets a cross). Only the root knows which square the piece stands
//! on; the pick resolver walks up from whichever sub-mesh a ray hits.
//!
//! Rebuilding is wholesale: on every position or piece-theme change all
//! piece entities are despawned and respawned from the snapshot. The
//! snapshot is the only input, so the result is the same no matter how the
//! position got there.

use bevy::prelude::*;

use crate::board::Square;
use crate::core::CosmeticConfig;
use crate::game::{GameSystems, PickRole, PickShape, PickTarget};
use crate::rules::{BoardPosition, PieceColor, PieceKind, PieceOnBoard};

use super::board_surface::BOARD_TOP;

const BASE_RADIUS: f32 = 0.30;
const BASE_HEIGHT: f32 = 0.08;

/// Marker component for piece group roots
#[derive(Component, Debug)]
pub struct PieceInstance;

/// Shared primitive mesh handles for the piece kinds
#[derive(Resource)]
pub struct PieceMeshes {
    base: Handle<Mesh>,
    pawn: Handle<Mesh>,
    knight: Handle<Mesh>,
    bishop: Handle<Mesh>,
    rook: Handle<Mesh>,
    queen: Handle<Mesh>,
    king: Handle<Mesh>,
    king_cross: Handle<Mesh>,
}

impl FromWorld for PieceMeshes {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        PieceMeshes {
            base: meshes.add(Cylinder::new(BASE_RADIUS, BASE_HEIGHT)),
            pawn: meshes.add(Cylinder::new(0.20, body_height(PieceKind::Pawn))),
            knight: meshes.add(Cone {
                radius: 0.22,
                height: body_height(PieceKind::Knight),
            }),
            bishop: meshes.add(Cylinder::new(0.20, body_height(PieceKind::Bishop))),
            rook: meshes.add(Cuboid::new(0.32, body_height(PieceKind::Rook), 0.32)),
            queen: meshes.add(Cylinder::new(0.23, body_height(PieceKind::Queen))),
            king: meshes.add(Cylinder::new(0.25, body_height(PieceKind::King))),
            king_cross: meshes.add(Cuboid::new(0.07, 0.22, 0.07)),
        }
    }
}

fn body_height(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::Pawn => 0.45,
        PieceKind::Knight => 0.50,
        PieceKind::Bishop => 0.60,
        PieceKind::Rook => 0.45,
        PieceKind::Queen => 0.70,
        PieceKind::King => 0.80,
    }
}

/// Tear down and respawn every piece from the current snapshot
pub fn rebuild_pieces(
    mut commands: Commands,
    existing: Query<Entity, With<PieceInstance>>,
    position: Res<BoardPosition>,
    config: Res<CosmeticConfig>,
    piece_meshes: Res<PieceMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let (white_color, black_color) = config.piece_theme.colors();
    let white = materials.add(StandardMaterial {
        base_color: white_color,
        perceptual_roughness: 0.4,
        ..default()
    });
    let black = materials.add(StandardMaterial {
        base_color: black_color,
        perceptual_roughness: 0.4,
        ..default()
    });

    let mut count = 0;
    for (square, piece) in position.occupied() {
        let material = match piece.color {
            PieceColor::White => white.clone(),
            PieceColor::Black => black.clone(),
        };
        spawn_piece(&mut commands, &piece_meshes, material, piece, square);
        count += 1;
    }

    debug!("[BOARD] rebuilt {count} piece groups");
}

/// Helper to generate a piece name for the inspector
fn piece_name(piece: PieceOnBoard, square: Square) -> String {
    format!(
        "{} {} {}",
        piece.color.name(),
        piece.kind.name(),
        square.to_algebraic()
    )
}

fn spawn_piece(
    commands: &mut Commands,
    meshes: &PieceMeshes,
    material: Handle<StandardMaterial>,
    piece: PieceOnBoard,
    square: Square,
) {
    // Black pieces face the other way so asymmetric bodies read correctly.
    let rotation = match piece.color {
        PieceColor::White => Quat::IDENTITY,
        PieceColor::Black => Quat::from_rotation_y(std::f32::consts::PI),
    };

    let body_mesh = match piece.kind {
        PieceKind::Pawn => meshes.pawn.clone(),
        PieceKind::Knight => meshes.knight.clone(),
        PieceKind::Bishop => meshes.bishop.clone(),
        PieceKind::Rook => meshes.rook.clone(),
        PieceKind::Queen => meshes.queen.clone(),
        PieceKind::King => meshes.king.clone(),
    };
    let body_y = BOARD_TOP + BASE_HEIGHT + body_height(piece.kind) / 2.0;

    commands
        .spawn((
            Transform::from_translation(square.world_position()).with_rotation(rotation),
            Visibility::Inherited,
            PickTarget {
                square,
                role: PickRole::Piece,
            },
            PieceInstance,
            Name::new(piece_name(piece, square)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.base.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, BOARD_TOP + BASE_HEIGHT / 2.0, 0.0),
                PickShape,
            ));
            parent.spawn((
                Mesh3d(body_mesh),
                MeshMaterial3d(material.clone()),
                Transform::from_xyz(0.0, body_y, 0.0),
                PickShape,
            ));
            if piece.kind == PieceKind::King {
                let cross_y = body_y + body_height(PieceKind::King) / 2.0 + 0.11;
                parent.spawn((
                    Mesh3d(meshes.king_cross.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(0.0, cross_y, 0.0),
                    PickShape,
                ));
            }
        });
}

pub struct PiecesPlugin;

impl Plugin for PiecesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PieceMeshes>();
        app.add_systems(
            Update,
            rebuild_pieces
                .run_if(resource_changed::<BoardPosition>.or(resource_changed::<CosmeticConfig>))
                .in_set(GameSystems::Visual),
        );
    }
}
