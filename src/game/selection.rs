//! Selection state machine
//!
//! Owns the one piece of mutable interaction state: whether a piece is
//! currently picked up, and where it may go. Transitions are computed by a
//! pure function over (current state, resolved pick, rules engine) so the
//! press handler observes fresh state passed in at call time instead of
//! capturing it at registration time.

use bevy::prelude::*;

use crate::board::Square;
use crate::rules::{BoardPosition, RulesEngine};

/// Current interaction state of the board surface
///
/// `legal_targets` is recomputed from the rules engine at the moment of
/// selection and discarded with the selection; it is never carried across a
/// position change.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing picked up
    #[default]
    Idle,
    /// A friendly piece is picked up and its destinations are highlighted
    Active {
        origin: Square,
        legal_targets: Vec<Square>,
    },
}

impl SelectionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SelectionState::Active { .. })
    }

    pub fn origin(&self) -> Option<Square> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Active { origin, .. } => Some(*origin),
        }
    }

    pub fn is_legal_target(&self, square: Square) -> bool {
        match self {
            SelectionState::Idle => false,
            SelectionState::Active { legal_targets, .. } => legal_targets.contains(&square),
        }
    }
}

/// Side effect requested by a selection transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// Nothing beyond the state change itself
    None,
    /// Submit the move to the rules adapter
    AttemptMove { from: Square, to: Square },
}

/// Compute the next selection state for a resolved pick
///
/// `pick` is `None` when the pointer ray hit nothing tagged with a board
/// square. Decision order for a hit square:
///
/// 1. An active selection whose legal-target set contains the square
///    commits the move (committing wins over re-selecting when both apply).
/// 2. A square holding a piece of the side to move starts a fresh
///    selection with newly computed targets.
/// 3. Anything else clears the selection.
pub fn transition(
    state: &SelectionState,
    pick: Option<Square>,
    engine: &RulesEngine,
) -> (SelectionState, SelectionAction) {
    let Some(square) = pick else {
        return (SelectionState::Idle, SelectionAction::None);
    };

    if let SelectionState::Active { origin, legal_targets } = state {
        if legal_targets.contains(&square) {
            return (
                SelectionState::Idle,
                SelectionAction::AttemptMove {
                    from: *origin,
                    to: square,
                },
            );
        }
    }

    let friendly = engine
        .piece_at(square)
        .is_some_and(|piece| piece.color == engine.turn());
    if friendly {
        let legal_targets = engine.legal_destinations(square);
        debug!(
            "[SELECT] selected {} with {} target(s)",
            square,
            legal_targets.len()
        );
        return (
            SelectionState::Active {
                origin: square,
                legal_targets,
            },
            SelectionAction::None,
        );
    }

    (SelectionState::Idle, SelectionAction::None)
}

/// Result of fully processing one pointer press
#[derive(Debug, Clone, PartialEq)]
pub struct PressOutcome {
    /// State to install after the press
    pub next: SelectionState,
    /// Fresh position snapshot, present only when a move committed
    pub committed: Option<BoardPosition>,
}

/// Run one press through the state machine and the rules adapter
///
/// A rejected move (stale targets relative to the engine) falls back to an
/// idle selection with no position change; nothing propagates to the caller
/// as a failure.
pub fn process_press(
    state: &SelectionState,
    pick: Option<Square>,
    engine: &mut RulesEngine,
) -> PressOutcome {
    let (next, action) = transition(state, pick, engine);
    match action {
        SelectionAction::AttemptMove { from, to } => match engine.attempt_move(from, to) {
            Ok(snapshot) => {
                info!("[SELECT] committed {from}->{to}");
                PressOutcome {
                    next: SelectionState::Idle,
                    committed: Some(snapshot),
                }
            }
            Err(err) => {
                warn!("[SELECT] {err}, clearing selection");
                PressOutcome {
                    next: SelectionState::Idle,
                    committed: None,
                }
            }
        },
        SelectionAction::None => PressOutcome {
            next,
            committed: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{PieceColor, PieceKind};

    fn sq(notation: &str) -> Square {
        Square::from_algebraic(notation).unwrap()
    }

    fn active(origin: &str, targets: &[&str]) -> SelectionState {
        SelectionState::Active {
            origin: sq(origin),
            legal_targets: targets.iter().map(|t| sq(t)).collect(),
        }
    }

    #[test]
    fn test_idle_pick_friendly_piece_selects() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&SelectionState::Idle, Some(sq("e2")), &engine);

        assert_eq!(action, SelectionAction::None);
        match next {
            SelectionState::Active { origin, legal_targets } => {
                assert_eq!(origin, sq("e2"));
                assert_eq!(legal_targets.len(), 2);
                assert!(legal_targets.contains(&sq("e3")));
                assert!(legal_targets.contains(&sq("e4")));
            }
            SelectionState::Idle => panic!("expected an active selection"),
        }
    }

    #[test]
    fn test_idle_pick_enemy_piece_stays_idle() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&SelectionState::Idle, Some(sq("e7")), &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(action, SelectionAction::None);
    }

    #[test]
    fn test_idle_pick_empty_square_stays_idle() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&SelectionState::Idle, Some(sq("d5")), &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(action, SelectionAction::None);
    }

    #[test]
    fn test_miss_always_resolves_to_idle() {
        let engine = RulesEngine::default();

        let (next, action) = transition(&SelectionState::Idle, None, &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(action, SelectionAction::None);

        let (next, action) = transition(&active("e2", &["e3", "e4"]), None, &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(action, SelectionAction::None);
    }

    #[test]
    fn test_active_pick_target_commits() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&active("e2", &["e3", "e4"]), Some(sq("e4")), &engine);

        assert_eq!(next, SelectionState::Idle);
        assert_eq!(
            action,
            SelectionAction::AttemptMove {
                from: sq("e2"),
                to: sq("e4"),
            }
        );
    }

    #[test]
    fn test_active_pick_other_friendly_piece_reselects() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&active("e2", &["e3", "e4"]), Some(sq("b1")), &engine);

        assert_eq!(action, SelectionAction::None);
        match next {
            SelectionState::Active { origin, legal_targets } => {
                assert_eq!(origin, sq("b1"));
                assert!(legal_targets.contains(&sq("a3")));
                assert!(legal_targets.contains(&sq("c3")));
            }
            SelectionState::Idle => panic!("expected re-selection"),
        }
    }

    #[test]
    fn test_active_pick_own_origin_reselects() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&active("e2", &["e3", "e4"]), Some(sq("e2")), &engine);

        assert_eq!(action, SelectionAction::None);
        assert_eq!(next.origin(), Some(sq("e2")));
        assert!(next.is_active());
    }

    #[test]
    fn test_active_pick_dead_square_deselects() {
        let engine = RulesEngine::default();
        let (next, action) = transition(&active("e2", &["e3", "e4"]), Some(sq("h5")), &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(action, SelectionAction::None);
    }

    #[test]
    fn test_capture_target_commits_instead_of_deselecting() {
        // Scandinavian setup: white pawn e4 can take the black pawn on d5.
        let mut engine = RulesEngine::default();
        engine.attempt_move(sq("e2"), sq("e4")).unwrap();
        engine.attempt_move(sq("d7"), sq("d5")).unwrap();

        let targets = engine.legal_destinations(sq("e4"));
        assert!(targets.contains(&sq("d5")));
        let state = SelectionState::Active {
            origin: sq("e4"),
            legal_targets: targets,
        };

        let (next, action) = transition(&state, Some(sq("d5")), &engine);
        assert_eq!(next, SelectionState::Idle);
        assert_eq!(
            action,
            SelectionAction::AttemptMove {
                from: sq("e4"),
                to: sq("d5"),
            }
        );
    }

    #[test]
    fn test_process_press_commit_then_idle() {
        let mut engine = RulesEngine::default();
        let state = active("e2", &["e3", "e4"]);

        let outcome = process_press(&state, Some(sq("e4")), &mut engine);
        assert_eq!(outcome.next, SelectionState::Idle);

        let position = outcome.committed.expect("move should commit");
        assert_eq!(position.side_to_move(), PieceColor::Black);
        assert_eq!(
            position.piece_at(sq("e4")).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn test_process_press_stale_targets_reject_to_idle() {
        let mut engine = RulesEngine::default();
        let before = engine.fen();

        // Targets that were never drawn from the engine: e2 cannot reach e5.
        let state = active("e2", &["e5"]);
        let outcome = process_press(&state, Some(sq("e5")), &mut engine);

        assert_eq!(outcome.next, SelectionState::Idle);
        assert_eq!(outcome.committed, None);
        assert_eq!(engine.fen(), before);
    }

    #[test]
    fn test_process_press_select_does_not_touch_position() {
        let mut engine = RulesEngine::default();
        let before = engine.fen();

        let outcome = process_press(&SelectionState::Idle, Some(sq("g1")), &mut engine);
        assert!(outcome.next.is_active());
        assert_eq!(outcome.committed, None);
        assert_eq!(engine.fen(), before);
    }
}
