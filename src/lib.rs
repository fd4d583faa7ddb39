//! Flying Adventure - a side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle track, collisions, scenes)
//! - `draw`: Render boundary as plain data (draw commands built from sim state)
//! - `renderer`: WebGPU triangle pipeline and 2D text overlay
//! - `platform`: Input event queue shared by the browser and native front ends
//! - `config`: Tunable game parameters

pub mod config;
pub mod draw;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

/// Fixed tuning that is not part of [`GameConfig`]
pub mod consts {
    /// Tick rate while a session is running or showing the game-over overlay
    pub const PLAY_TICK_HZ: u32 = 60;
    /// Tick rate on the name entry screen
    pub const MENU_TICK_HZ: u32 = 30;

    /// Actor spawn point (x never changes)
    pub const ACTOR_X: f32 = 230.0;
    pub const ACTOR_SPAWN_Y: f32 = 350.0;
    pub const ACTOR_RADIUS: f32 = 15.0;

    /// Extra displacement applied on ascent, on top of the closed-form curve
    pub const ASCENT_BOOST: f32 = 2.0;
    /// Nose-up angle (degrees) while rising or near the spawn height
    pub const NOSE_UP_ANGLE: f32 = 25.0;
    /// Nose-down decay per tick and floor (degrees)
    pub const NOSE_DOWN_STEP: f32 = 5.0;
    pub const NOSE_DOWN_LIMIT: f32 = -90.0;
    /// Distance below spawn height that still counts as "near spawn"
    pub const NOSE_UP_BAND: f32 = 50.0;

    /// Wing animation: phase 2 = fully extended, drops one step every N ticks
    pub const WING_PHASE_MAX: u8 = 2;
    pub const WING_STEP_TICKS: u32 = 5;

    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Gap line bounds, half-open: [min, max)
    pub const GAP_HEIGHT_MIN: i32 = 100;
    pub const GAP_HEIGHT_MAX: i32 = 400;

    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 70.0;
    /// Spacing of ground tick marks
    pub const GROUND_MARK_SPACING: f32 = 30.0;

    pub const CLOUD_COUNT: usize = 5;

    pub const NAME_MAX_CHARS: usize = 15;
}
