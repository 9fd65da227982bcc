//! Interaction layer: pick resolution and selection handling

pub mod pick;
pub mod plugin;
pub mod selection;
pub mod system_sets;

pub use pick::{resolve_pick, PickRole, PickShape, PickTarget};
pub use plugin::GamePlugin;
pub use selection::{process_press, transition, SelectionAction, SelectionState};
pub use system_sets::GameSystems;
