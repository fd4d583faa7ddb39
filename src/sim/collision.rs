//! Collision detection
//!
//! Everything is axis-aligned boxes. The actor's circle is approximated by
//! its bounding square, and each obstacle contributes a top and a bottom box.

use serde::{Deserialize, Serialize};

use super::physics::Actor;
use super::track::Obstacle;

/// Axis-aligned rectangle (x, y = top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Negative sizes are clipped to zero
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap: touching edges do not count, empty boxes never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Point test, inclusive of the top-left edge and exclusive of the bottom-right
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Bounding square of the actor's circle
pub fn actor_box(actor: &Actor) -> Rect {
    Rect::new(
        actor.x - actor.radius,
        actor.y - actor.radius,
        actor.radius * 2.0,
        actor.radius * 2.0,
    )
}

/// Top and bottom segments of an obstacle; the top one may be empty
pub fn obstacle_boxes(obstacle: &Obstacle, screen_height: f32) -> [Rect; 2] {
    [
        Rect::new(obstacle.x, 0.0, obstacle.width, obstacle.top_height as f32),
        Rect::new(
            obstacle.x,
            obstacle.bottom_y as f32,
            obstacle.width,
            screen_height - obstacle.bottom_y as f32,
        ),
    ]
}

/// Does the actor overlap either segment of the obstacle?
pub fn collides(actor: &Actor, obstacle: &Obstacle, screen_height: f32) -> bool {
    let actor = actor_box(actor);
    obstacle_boxes(obstacle, screen_height)
        .iter()
        .any(|segment| actor.overlaps(segment))
}

/// Has the actor touched the ground or left through the top of the screen?
pub fn out_of_bounds(actor: &Actor, ground_y: f32) -> bool {
    actor.y + actor.radius > ground_y || actor.y - actor.radius < 0.0
}
