//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by enemy ID)
//! - No rendering or platform dependencies

pub mod blob;
pub mod perception;
pub mod population;
pub mod state;
pub mod tick;

pub use blob::{Blob, Color, Enemy, MoveKeys, Player};
pub use perception::{Decision, Target, TargetKind, decide, draw_jitter, nearest_visible, perceive};
pub use population::Population;
pub use state::{Arena, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_input, tick};
