//! System organization using SystemSets
//!
//! A pointer press must be fully processed (pick, selection transition,
//! move commit) before the same frame's scene reconciliation runs, so the
//! displayed scene always matches the (position, selection) pair that
//! produced it. The two sets below are chained in that order.

use bevy::prelude::*;

/// System execution order for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Pointer input: pick resolution, selection transitions, move commits
    Input,

    /// Scene reconciliation: square colors, piece rebuilds, guides, weather
    Visual,
}
