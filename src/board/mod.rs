//! Board coordinates and world-space mapping
//!
//! Provides newtype patterns for chess-board addressing and the bidirectional
//! mapping between squares and 3D world positions. The board is centered at
//! the world origin with a unit pitch between square centers, so square a1
//! sits at world (-3.5, 0.0, -3.5) and h8 at (3.5, 0.0, 3.5).

use bevy::prelude::*;

/// Number of files/ranks on the board.
pub const BOARD_SIZE: u8 = 8;

/// Distance between adjacent square centers in world units.
pub const SQUARE_PITCH: f32 = 1.0;

/// World-space offset of file/rank 0 from the board center.
const CENTER_OFFSET: f32 = (BOARD_SIZE as f32 - 1.0) / 2.0;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
/// This newtype prevents mixing up the two board axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct File(pub u8);

impl File {
    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for File {
    fn from(value: u8) -> Self {
        debug_assert!(value < BOARD_SIZE, "File must be in range 0-7");
        File(value)
    }
}

impl From<File> for u8 {
    fn from(file: File) -> Self {
        file.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct Rank(pub u8);

impl Rank {
    /// Create a rank from its printed number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=BOARD_SIZE).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to its printed number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

impl From<u8> for Rank {
    fn from(value: u8) -> Self {
        debug_assert!(value < BOARD_SIZE, "Rank must be in range 0-7");
        Rank(value)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// Board square position (file, rank)
///
/// Combines [`File`] and [`Rank`] into the single addressing unit used by
/// the rules adapter, the pick resolver, and the scene reconciliation
/// systems. Exactly 64 values are valid; constructing one from out-of-range
/// indices is a caller bug, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from file and rank indices
    pub fn new(file: u8, rank: u8) -> Self {
        Square {
            file: File::from(file),
            rank: Rank::from(rank),
        }
    }

    /// Create a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let rank_num = rank_char.to_digit(10)? as u8;

        Some(Square {
            file: File::from_char(file_char)?,
            rank: Rank::from_number(rank_num)?,
        })
    }

    /// Convert square to algebraic notation (e.g., "e4")
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file.to_char(), self.rank.to_number())
    }

    /// Iterate over all 64 squares, file-major
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|file| (0..BOARD_SIZE).map(move |rank| Square::new(file, rank)))
    }

    /// Returns true for light squares in the standard checkerboard pattern
    ///
    /// a1 (0,0) is light under this scheme; adjacent squares alternate.
    pub fn is_light(self) -> bool {
        (self.file.0 + self.rank.0) % 2 == 0
    }

    /// World position of this square's center
    ///
    /// Files grow along +X, ranks along +Z. The square rest height is 0;
    /// callers add their own vertical offsets for meshes and overlays.
    pub fn world_position(self) -> Vec3 {
        Vec3::new(
            self.file.0 as f32 * SQUARE_PITCH - CENTER_OFFSET,
            0.0,
            self.rank.0 as f32 * SQUARE_PITCH - CENTER_OFFSET,
        )
    }

    /// Recover the square whose center is nearest to a world position
    ///
    /// Inverse of [`Square::world_position`] for positions over the board.
    /// Positions outside the board footprint are a caller bug.
    pub fn from_world(position: Vec3) -> Self {
        let file = ((position.x + CENTER_OFFSET) / SQUARE_PITCH).round();
        let rank = ((position.z + CENTER_OFFSET) / SQUARE_PITCH).round();
        debug_assert!(
            (0.0..BOARD_SIZE as f32).contains(&file) && (0.0..BOARD_SIZE as f32).contains(&rank),
            "world position {position:?} is outside the board"
        );
        Square::new(file as u8, rank as u8)
    }
}

impl From<(u8, u8)> for Square {
    fn from((file, rank): (u8, u8)) -> Self {
        Square::new(file, rank)
    }
}

impl From<Square> for (u8, u8) {
    fn from(square: Square) -> Self {
        (square.file.index(), square.rank.index())
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_to_char() {
        assert_eq!(File(0).to_char(), 'a');
        assert_eq!(File(4).to_char(), 'e');
        assert_eq!(File(7).to_char(), 'h');
    }

    #[test]
    fn test_rank_from_number() {
        assert_eq!(Rank::from_number(1), Some(Rank(0)));
        assert_eq!(Rank::from_number(8), Some(Rank(7)));
        assert_eq!(Rank::from_number(0), None);
        assert_eq!(Rank::from_number(9), None);
    }

    #[test]
    fn test_square_algebraic() {
        let square = Square::from_algebraic("e4").unwrap();
        assert_eq!(square.file.index(), 4);
        assert_eq!(square.rank.index(), 3);
        assert_eq!(square.to_algebraic(), "e4");

        assert_eq!(Square::from_algebraic("a1"), Some(Square::new(0, 0)));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::new(7, 7)));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("e4x"), None);
    }

    #[test]
    fn test_corner_world_positions() {
        assert_eq!(
            Square::new(0, 0).world_position(),
            Vec3::new(-3.5, 0.0, -3.5)
        );
        assert_eq!(Square::new(7, 7).world_position(), Vec3::new(3.5, 0.0, 3.5));
    }

    #[test]
    fn test_world_round_trip_all_squares() {
        for square in Square::all() {
            assert_eq!(Square::from_world(square.world_position()), square);
        }
    }

    #[test]
    fn test_from_world_snaps_within_square() {
        let center = Square::new(3, 4).world_position();
        let nudged = center + Vec3::new(0.4, 0.0, -0.4);
        assert_eq!(Square::from_world(nudged), Square::new(3, 4));
    }

    #[test]
    fn test_checkerboard_pattern() {
        assert!(Square::new(0, 0).is_light());
        for file in 0..7 {
            for rank in 0..8 {
                let here = Square::new(file, rank);
                let right = Square::new(file + 1, rank);
                assert_ne!(here.is_light(), right.is_light());
            }
        }
        for file in 0..8 {
            for rank in 0..7 {
                let here = Square::new(file, rank);
                let up = Square::new(file, rank + 1);
                assert_ne!(here.is_light(), up.is_light());
            }
        }
    }

    #[test]
    fn test_diagonal_same_shade() {
        assert_eq!(Square::new(0, 0).is_light(), Square::new(3, 3).is_light());
        assert_eq!(Square::new(2, 5).is_light(), Square::new(5, 2).is_light());
    }

    #[test]
    fn test_all_yields_64_distinct_squares() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        for (i, a) in squares.iter().enumerate() {
            for b in &squares[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
