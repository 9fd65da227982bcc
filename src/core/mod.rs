//! Cosmetic configuration shared across the scene systems
//!
//! [`CosmeticConfig`] is UI-facing state with no effect on game logic:
//! changing any field triggers a scene reconciliation pass and nothing else.
//! The rendering systems read it; only the settings panel writes it.

use bevy::prelude::*;

/// Resource tracking visual settings that can be changed from the side panel
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub struct CosmeticConfig {
    /// Board square color pairing
    pub board_theme: BoardTheme,

    /// Piece material color pairing
    pub piece_theme: PieceTheme,

    /// Ambient weather overlay
    pub weather: WeatherMode,
}

/// Board square color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum BoardTheme {
    #[default]
    Classic,
    Modern,
    Wood,
    Marble,
}

impl BoardTheme {
    pub fn name(&self) -> &'static str {
        match self {
            BoardTheme::Classic => "Classic",
            BoardTheme::Modern => "Modern",
            BoardTheme::Wood => "Wood",
            BoardTheme::Marble => "Marble",
        }
    }

    /// Returns (light_square_color, dark_square_color)
    pub fn colors(&self) -> (Color, Color) {
        match self {
            BoardTheme::Classic => (
                Color::srgb(0.93, 0.93, 0.82), // Cream
                Color::srgb(0.46, 0.59, 0.34), // Green
            ),
            BoardTheme::Modern => (
                Color::srgb(0.9, 0.9, 0.9), // Light gray
                Color::srgb(0.3, 0.3, 0.3), // Dark gray
            ),
            BoardTheme::Wood => (
                Color::srgb(0.85, 0.70, 0.55), // Light wood
                Color::srgb(0.55, 0.35, 0.20), // Dark wood
            ),
            BoardTheme::Marble => (
                Color::srgb(0.95, 0.95, 0.95), // White marble
                Color::srgb(0.15, 0.15, 0.15), // Black marble
            ),
        }
    }
}

/// Piece material themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PieceTheme {
    #[default]
    Classic,
    Onyx,
    Ember,
}

impl PieceTheme {
    pub fn name(&self) -> &'static str {
        match self {
            PieceTheme::Classic => "Classic",
            PieceTheme::Onyx => "Onyx",
            PieceTheme::Ember => "Ember",
        }
    }

    /// Returns (white_piece_color, black_piece_color)
    pub fn colors(&self) -> (Color, Color) {
        match self {
            PieceTheme::Classic => (
                Color::srgb(0.94, 0.94, 0.94), // Ivory
                Color::srgb(0.13, 0.13, 0.13), // Charcoal
            ),
            PieceTheme::Onyx => (
                Color::srgb(0.75, 0.80, 0.88), // Steel
                Color::srgb(0.05, 0.06, 0.10), // Onyx
            ),
            PieceTheme::Ember => (
                Color::srgb(0.93, 0.85, 0.70), // Sand
                Color::srgb(0.45, 0.12, 0.08), // Ember
            ),
        }
    }
}

/// Weather overlay modes
///
/// Pure scene dressing; the particle systems never touch game state and
/// their meshes are excluded from pick tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeatherMode {
    #[default]
    None,
    Rain,
    Snow,
    Heat,
}

impl WeatherMode {
    pub fn name(&self) -> &'static str {
        match self {
            WeatherMode::None => "None",
            WeatherMode::Rain => "Rain",
            WeatherMode::Snow => "Snow",
            WeatherMode::Heat => "Heat",
        }
    }
}

/// Registers the cosmetic configuration resource and its reflected types
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CosmeticConfig>();
        app.register_type::<CosmeticConfig>();
        app.register_type::<BoardTheme>();
        app.register_type::<PieceTheme>();
        app.register_type::<WeatherMode>();
    }
}
