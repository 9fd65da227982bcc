//! Pick resolution - pointer rays to board squares
//!
//! Converts a pointer press into a board square by casting a camera ray
//! against the pick-eligible meshes and walking the hit entity's ancestor
//! chain until something carries a [`PickTarget`] tag. Pieces are spawned as
//! multi-mesh groups with the tag on the group root, so the intersected
//! sub-mesh is usually one or two links below the tagged entity.
//!
//! Resolution is a pure query over the current scene and input; the only
//! state change happens afterwards, when the press outcome is applied to
//! the selection and position resources.

use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::board::Square;
use crate::rules::{BoardPosition, RulesEngine};

use super::selection::{process_press, SelectionState};

/// Upper bound on the ancestor walk from a hit mesh to its tag
///
/// Piece groups are two levels deep; anything deeper means the hit entity
/// does not belong to the board and the pick resolves to a miss.
pub const MAX_TAG_WALK: usize = 8;

/// Role of a pickable object, stored alongside its square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PickRole {
    /// A board square surface
    Square,
    /// A piece mesh group standing on its square
    Piece,
}

/// Tag attached to every pickable scene object at spawn time
///
/// Write-once: the tag is inserted when the object is created and never
/// mutated. It is the only channel through which ray hits are mapped back
/// to board semantics.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct PickTarget {
    pub square: Square,
    pub role: PickRole,
}

/// Marker for meshes that participate in pick ray tests
///
/// Weather particles, guide lines, and other cosmetic objects never carry
/// this marker and are therefore invisible to the resolver.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PickShape;

/// Walk the ancestor chain of a hit entity until a tag is found
///
/// Returns `None` when no ancestor within [`MAX_TAG_WALK`] links carries a
/// [`PickTarget`].
pub fn resolve_pick(
    hit: Entity,
    tags: &Query<&PickTarget>,
    parents: &Query<&ChildOf>,
) -> Option<PickTarget> {
    let mut current = hit;
    for _ in 0..MAX_TAG_WALK {
        if let Ok(tag) = tags.get(current) {
            return Some(*tag);
        }
        current = parents.get(current).ok()?.parent();
    }
    None
}

/// Handle a primary-button press on the board
///
/// Pick resolution, the selection transition, and any move commit all
/// happen inside this one system, so the scene reconciliation systems that
/// run later in the frame always observe a settled (position, selection)
/// pair.
#[allow(clippy::too_many_arguments)]
pub fn board_press_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut ray_cast: MeshRayCast,
    shapes: Query<(), With<PickShape>>,
    tags: Query<&PickTarget>,
    parents: Query<&ChildOf>,
    mut engine: ResMut<RulesEngine>,
    mut selection: ResMut<SelectionState>,
    mut position: ResMut<BoardPosition>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let picked = pick_under_cursor(&windows, &cameras, &mut ray_cast, &shapes, &tags, &parents);
    match picked {
        Some(target) => debug!("[PICK] hit {} ({:?})", target.square, target.role),
        None => debug!("[PICK] miss"),
    }

    let outcome = process_press(&selection, picked.map(|t| t.square), &mut engine);
    if let Some(snapshot) = outcome.committed {
        *position = snapshot;
    }
    selection.set_if_neq(outcome.next);
}

/// Resolve the square under the cursor, if any
fn pick_under_cursor(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    ray_cast: &mut MeshRayCast,
    shapes: &Query<(), With<PickShape>>,
    tags: &Query<&PickTarget>,
    parents: &Query<&ChildOf>,
) -> Option<PickTarget> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.single().ok()?;
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;

    let filter = |entity: Entity| shapes.contains(entity);
    let settings = MeshRayCastSettings::default()
        .always_early_exit()
        .with_filter(&filter);

    let (hit_entity, _) = ray_cast.cast_ray(ray, &settings).first()?;
    resolve_pick(*hit_entity, tags, parents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::SystemState;

    fn tag(notation: &str, role: PickRole) -> PickTarget {
        PickTarget {
            square: Square::from_algebraic(notation).unwrap(),
            role,
        }
    }

    fn resolve_in(world: &mut World, hit: Entity) -> Option<PickTarget> {
        let mut state: SystemState<(Query<&PickTarget>, Query<&ChildOf>)> =
            SystemState::new(world);
        let (tags, parents) = state.get(world);
        resolve_pick(hit, &tags, &parents)
    }

    #[test]
    fn test_direct_hit_on_tagged_entity() {
        let mut world = World::new();
        let square = world.spawn(tag("d4", PickRole::Square)).id();
        assert_eq!(resolve_in(&mut world, square), Some(tag("d4", PickRole::Square)));
    }

    #[test]
    fn test_hit_on_sub_mesh_walks_to_group_tag() {
        let mut world = World::new();
        let group = world.spawn(tag("g8", PickRole::Piece)).id();
        let body = world.spawn(ChildOf(group)).id();

        assert_eq!(resolve_in(&mut world, body), Some(tag("g8", PickRole::Piece)));
    }

    #[test]
    fn test_nearest_tag_wins_over_outer_ancestors() {
        let mut world = World::new();
        let outer = world.spawn(tag("a1", PickRole::Square)).id();
        let inner = world.spawn((tag("b2", PickRole::Piece), ChildOf(outer))).id();
        let mesh = world.spawn(ChildOf(inner)).id();

        assert_eq!(resolve_in(&mut world, mesh), Some(tag("b2", PickRole::Piece)));
    }

    #[test]
    fn test_untagged_chain_is_a_miss() {
        let mut world = World::new();
        let root = world.spawn_empty().id();
        let leaf = world.spawn(ChildOf(root)).id();

        assert_eq!(resolve_in(&mut world, leaf), None);
    }

    #[test]
    fn test_walk_depth_is_bounded() {
        let mut world = World::new();
        let tagged_root = world.spawn(tag("h1", PickRole::Square)).id();
        let mut current = tagged_root;
        for _ in 0..MAX_TAG_WALK {
            current = world.spawn(ChildOf(current)).id();
        }

        // The tag sits one link beyond the walk bound.
        assert_eq!(resolve_in(&mut world, current), None);
    }
}
