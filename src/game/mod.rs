//! Core game module containing shared components, resources, events, palette and constants.

mod components;
mod constants;
mod events;
mod palette;
mod resources;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use palette::*;
pub use resources::*;
