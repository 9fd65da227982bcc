//! Scene synchronization: board surface, pieces, guides, weather

pub mod board_surface;
pub mod guides;
pub mod pieces;
pub mod weather;

pub use board_surface::BoardSurfacePlugin;
pub use guides::GuidesPlugin;
pub use pieces::PiecesPlugin;
pub use weather::WeatherPlugin;
