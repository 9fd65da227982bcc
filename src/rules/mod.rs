//! Rules engine adapter - single source of truth for chess legality
//!
//! Wraps [`shakmaty::Chess`] behind a thin facade so the rest of the crate
//! never touches move generation directly. The adapter is authoritative for:
//!
//! - Legal move generation per origin square
//! - Move execution (with forced queen promotion)
//! - Check / checkmate / draw detection
//! - Position serialization (FEN)
//!
//! The ECS side consumes [`BoardPosition`] snapshots: a fresh snapshot
//! replaces the resource after every committed move, and the scene systems
//! read only the snapshot, never the engine itself.
//!
//! # Coordinate system
//!
//! Crate-side [`Square`] values map 1:1 onto the engine's square type via
//! file/rank indices; the castling destination is normalized to the king's
//! landing square (g- or c-file) in both the legal-destination query and
//! move matching, so the two stay consistent by construction.

use bevy::prelude::*;
use shakmaty::{
    fen::Fen, CastlingMode, Chess, Color as EngineColor, EnPassantMode, File as EngineFile, Move,
    Position, Rank as EngineRank, Role, Square as EngineSquare,
};
use thiserror::Error;
use tracing::debug;

use crate::board::Square;

/// Side of a piece, crate-side mirror of the engine color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

/// Kind of a piece, crate-side mirror of the engine role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// A piece as it stands on a square of a position snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// Terminal (or near-terminal) state of the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum TerminalStatus {
    /// Game in progress, side to move not in check
    #[default]
    None,
    /// Side to move is in check but has legal replies
    Check,
    /// Side to move is checkmated
    Checkmate,
    /// Stalemate, dead position, or 50-move rule
    Draw,
}

impl TerminalStatus {
    pub fn is_game_over(self) -> bool {
        matches!(self, TerminalStatus::Checkmate | TerminalStatus::Draw)
    }
}

/// A move attempt that is not legal in the current position
///
/// Only reachable when a caller submits endpoints that were not drawn from
/// a fresh legal-destination query; the adapter validates regardless.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("move {from}->{to} is not legal in the current position")]
pub struct MoveRejected {
    pub from: Square,
    pub to: Square,
}

/// A position string that the engine could not load
#[derive(Error, Debug, Clone)]
#[error("invalid position notation: {0}")]
pub struct InvalidPosition(String);

/// Immutable snapshot of the authoritative position
///
/// Owned by the ECS as a resource and replaced wholesale after every
/// committed move or reset; the scene reconciliation systems treat it as
/// read-only input.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct BoardPosition {
    squares: [[Option<PieceOnBoard>; 8]; 8],
    side_to_move: PieceColor,
    status: TerminalStatus,
    fen: String,
}

impl BoardPosition {
    pub fn piece_at(&self, square: Square) -> Option<PieceOnBoard> {
        self.squares[square.file.index() as usize][square.rank.index() as usize]
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.side_to_move
    }

    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// Iterate over occupied squares, file-major
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceOnBoard)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

/// Chess engine resource wrapping the external rules engine
///
/// All mutation goes through [`RulesEngine::attempt_move`] and
/// [`RulesEngine::reset`]; every query is a pure synchronous computation
/// over the engine's internal representation.
#[derive(Resource, Debug, Clone)]
pub struct RulesEngine {
    game: Chess,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self {
            game: Chess::default(),
        }
    }
}

impl RulesEngine {
    /// Load a position from FEN
    pub fn from_fen(fen: &str) -> Result<Self, InvalidPosition> {
        let parsed: Fen = fen
            .parse()
            .map_err(|err: shakmaty::fen::ParseFenError| InvalidPosition(err.to_string()))?;
        let game = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|err: shakmaty::PositionError<Chess>| InvalidPosition(err.to_string()))?;
        Ok(Self { game })
    }

    /// Restore the starting position
    pub fn reset(&mut self) {
        self.game = Chess::default();
        debug!("[RULES] position reset");
    }

    /// Side to move in the current position
    pub fn turn(&self) -> PieceColor {
        color_from_engine(self.game.turn())
    }

    /// Piece standing on a square, if any
    pub fn piece_at(&self, square: Square) -> Option<PieceOnBoard> {
        self.game.board().piece_at(to_engine(square)).map(|piece| PieceOnBoard {
            kind: kind_from_engine(piece.role),
            color: color_from_engine(piece.color),
        })
    }

    /// Destination squares of every legal move from `origin`
    ///
    /// Empty when the square is vacant or holds a piece of the side not to
    /// move. Promotion variants collapse to the single forced-queen move.
    pub fn legal_destinations(&self, origin: Square) -> Vec<Square> {
        let from = to_engine(origin);
        let mut targets = Vec::new();
        for m in &self.game.legal_moves() {
            if !is_playable(m) {
                continue;
            }
            if let Some((move_from, move_to)) = move_endpoints(m) {
                if move_from == from {
                    let destination = from_engine(move_to);
                    if !targets.contains(&destination) {
                        targets.push(destination);
                    }
                }
            }
        }
        targets
    }

    /// Play the legal move matching the given endpoints
    ///
    /// Pawns reaching the last rank always promote to a queen. On success
    /// the internal position advances and a fresh snapshot is returned; on
    /// rejection the position is untouched.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<BoardPosition, MoveRejected> {
        let engine_from = to_engine(from);
        let engine_to = to_engine(to);
        let chosen = self
            .game
            .legal_moves()
            .iter()
            .find(|m| {
                is_playable(m)
                    && move_endpoints(m)
                        .is_some_and(|(f, t)| f == engine_from && t == engine_to)
            })
            .cloned();

        let Some(m) = chosen else {
            debug!("[RULES] rejected {from}->{to}: not in the legal set");
            return Err(MoveRejected { from, to });
        };

        match self.game.clone().play(&m) {
            Ok(next) => {
                self.game = next;
                debug!("[RULES] played {from}->{to}, {} to move", self.turn().name());
                Ok(self.snapshot())
            }
            Err(_) => Err(MoveRejected { from, to }),
        }
    }

    /// Terminal-state classification of the current position
    pub fn terminal_status(&self) -> TerminalStatus {
        if self.game.is_checkmate() {
            TerminalStatus::Checkmate
        } else if self.game.is_stalemate()
            || self.game.is_insufficient_material()
            || self.game.halfmoves() >= 100
        {
            TerminalStatus::Draw
        } else if self.game.is_check() {
            TerminalStatus::Check
        } else {
            TerminalStatus::None
        }
    }

    /// Serialize the current position as FEN
    pub fn fen(&self) -> String {
        Fen::from_position(self.game.clone(), EnPassantMode::Legal).to_string()
    }

    /// Build an immutable snapshot of the current position
    pub fn snapshot(&self) -> BoardPosition {
        let mut squares = [[None; 8]; 8];
        for square in Square::all() {
            squares[square.file.index() as usize][square.rank.index() as usize] =
                self.piece_at(square);
        }
        BoardPosition {
            squares,
            side_to_move: self.turn(),
            status: self.terminal_status(),
            fen: self.fen(),
        }
    }
}

/// Filter out the promotion variants that the forced-queen policy never plays
fn is_playable(m: &Move) -> bool {
    match m.promotion() {
        None => true,
        Some(role) => role == Role::Queen,
    }
}

/// Endpoints of a legal move as the board surface understands them
///
/// Castling is encoded king-from to king-destination (g- or c-file), the
/// squares a user actually clicks.
fn move_endpoints(m: &Move) -> Option<(EngineSquare, EngineSquare)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                EngineFile::G
            } else {
                EngineFile::C
            };
            Some((*king, EngineSquare::from_coords(file, rook.rank())))
        }
        Move::Put { .. } => None,
    }
}

fn to_engine(square: Square) -> EngineSquare {
    EngineSquare::from_coords(
        EngineFile::new(square.file.index() as u32),
        EngineRank::new(square.rank.index() as u32),
    )
}

fn from_engine(square: EngineSquare) -> Square {
    Square::new(u32::from(square.file()) as u8, u32::from(square.rank()) as u8)
}

fn color_from_engine(color: EngineColor) -> PieceColor {
    match color {
        EngineColor::White => PieceColor::White,
        EngineColor::Black => PieceColor::Black,
    }
}

fn kind_from_engine(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}
