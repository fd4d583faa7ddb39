//! Actor physics
//!
//! Displacement is not integrated from a running velocity. Each tick it is
//! evaluated in closed form from the ticks elapsed since the last flap:
//! `gravity * t^2 + impulse * t`, which gives a parabolic rise/fall anchored
//! at the flap.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::*;

/// The player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    /// Height the actor spawned at (reference for the nose-up band)
    pub spawn_y: f32,
    pub radius: f32,
    /// Impulse from the last flap (0 before the first flap)
    pub impulse: f32,
    /// Ticks since the last flap
    pub time: u32,
    /// Body angle in degrees (positive = nose up)
    pub angle: f32,
    /// Displacement applied on the last advance
    pub last_displacement: f32,
    /// 2 = wings fully extended, 0 = folded
    pub wing_phase: u8,
    wing_timer: u32,
    gravity: f32,
    flap_strength: f32,
    max_fall_speed: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            x,
            y,
            spawn_y: y,
            radius: ACTOR_RADIUS,
            impulse: 0.0,
            time: 0,
            angle: 0.0,
            last_displacement: 0.0,
            wing_phase: 0,
            wing_timer: 0,
            gravity: config.gravity,
            flap_strength: config.flap_strength,
            max_fall_speed: config.max_fall_speed,
        }
    }

    /// Actor at the standard session spawn point
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(ACTOR_X, ACTOR_SPAWN_Y, config)
    }

    /// Set the upward impulse and restart the curve
    pub fn flap(&mut self) {
        self.impulse = self.flap_strength;
        self.time = 0;
        self.wing_phase = WING_PHASE_MAX;
    }

    /// Per-tick displacement for the given ticks-since-flap, clamped and tuned
    pub fn displacement_at(&self, time: u32) -> f32 {
        let t = time as f32;
        let raw = self.gravity * t * t + self.impulse * t;
        if raw > self.max_fall_speed {
            self.max_fall_speed
        } else if raw < 0.0 {
            raw - ASCENT_BOOST
        } else {
            raw
        }
    }

    /// Advance one tick: move, rotate, and step the wing animation
    pub fn advance(&mut self) {
        self.time += 1;
        let displacement = self.displacement_at(self.time);
        self.y += displacement;
        self.last_displacement = displacement;

        if displacement < 0.0 || self.y < self.spawn_y + NOSE_UP_BAND {
            self.angle = NOSE_UP_ANGLE;
        } else if self.angle > NOSE_DOWN_LIMIT {
            self.angle = (self.angle - NOSE_DOWN_STEP).max(NOSE_DOWN_LIMIT);
        }

        self.wing_timer += 1;
        if self.wing_timer >= WING_STEP_TICKS {
            self.wing_timer = 0;
            self.wing_phase = self.wing_phase.saturating_sub(1);
        }
    }

    /// True while the last advance moved the actor upward
    pub fn is_rising(&self) -> bool {
        self.last_displacement < 0.0
    }
}
