//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies beyond the input event types

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod scenery;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{Rect, actor_box, collides, obstacle_boxes, out_of_bounds};
pub use difficulty::speed;
pub use physics::Actor;
pub use scenery::{Cloud, CloudSet, Ground};
pub use state::{Game, NameEntry, Scene, SceneKind, Session, layout};
pub use tick::{TickInput, TickOutcome, Transition, apply, tick};
pub use track::{Obstacle, Track, TrackUpdate};
