//! Decorative scenery: scrolling ground and drifting clouds
//!
//! Not gameplay-affecting, but it draws from the same seeded RNG so a run
//! replays identically.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::CLOUD_COUNT;

/// Two screen-wide ground tiles that leapfrog each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub y: f32,
    pub height: f32,
    pub x1: f32,
    pub x2: f32,
    tile_width: f32,
}

impl Ground {
    pub fn new(config: &GameConfig) -> Self {
        let y = config.ground_y();
        Self {
            y,
            height: config.screen_height() - y,
            x1: 0.0,
            x2: config.screen_width(),
            tile_width: config.screen_width(),
        }
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn scroll(&mut self, speed: u32) {
        let speed = speed as f32;
        self.x1 -= speed;
        self.x2 -= speed;

        if self.x1 + self.tile_width <= 0.0 {
            self.x1 = self.x2 + self.tile_width;
        }
        if self.x2 + self.tile_width <= 0.0 {
            self.x2 = self.x1 + self.tile_width;
        }
    }
}

/// A background cloud (three overlapping circles when drawn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Cloud {
    /// New cloud just past the right edge of the screen
    pub fn spawn<R: Rng>(screen_width: f32, rng: &mut R) -> Self {
        Self {
            x: screen_width + rng.random_range(0..=300) as f32,
            y: rng.random_range(50..=200) as f32,
            size: rng.random_range(40..=80) as f32,
            speed: rng.random_range(1.0..3.0),
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.x < -self.size * 2.0
    }
}

/// Fixed-size set of clouds, recycled in place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudSet {
    pub clouds: Vec<Cloud>,
    screen_width: f32,
}

impl CloudSet {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let screen_width = config.screen_width();
        Self {
            clouds: (0..CLOUD_COUNT)
                .map(|_| Cloud::spawn(screen_width, rng))
                .collect(),
            screen_width,
        }
    }

    /// Drift every cloud left and replace any that left the screen
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.is_offscreen() {
                *cloud = Cloud::spawn(self.screen_width, rng);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
