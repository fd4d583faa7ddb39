//! Obstacle generation and the scrolling track
//!
//! Obstacles are stored in spawn order, which is also left-to-right order.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision;
use super::physics::Actor;
use crate::config::GameConfig;
use crate::consts::{GAP_HEIGHT_MAX, GAP_HEIGHT_MIN, OBSTACLE_WIDTH};

/// A gated barrier: a top segment, a passable band, and a bottom segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    /// Randomly chosen line the band sits on, in [100, 400)
    pub gap_height: i32,
    /// Bottom edge of the top segment (may be negative: no top segment)
    pub top_height: i32,
    /// Top edge of the bottom segment
    pub bottom_y: i32,
    /// Set once, the first tick the actor is past the right edge
    pub passed: bool,
}

impl Obstacle {
    /// Obstacle with an explicit gap line
    pub fn with_gap(x: f32, gap_height: i32, gap: i32) -> Self {
        Self {
            x,
            width: OBSTACLE_WIDTH,
            gap_height,
            top_height: gap_height - gap,
            bottom_y: gap_height,
            passed: false,
        }
    }

    /// Obstacle with a uniformly random gap line
    pub fn spawn<R: Rng>(x: f32, gap: i32, rng: &mut R) -> Self {
        let gap_height = rng.random_range(GAP_HEIGHT_MIN..GAP_HEIGHT_MAX);
        Self::with_gap(x, gap_height, gap)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical middle of the passable band
    pub fn gap_center(&self) -> f32 {
        (self.top_height + self.bottom_y) as f32 / 2.0
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

/// What one track update observed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackUpdate {
    /// Obstacles that flipped to passed this tick
    pub passed: u32,
    /// Actor overlapped an obstacle (checked before movement)
    pub collided: bool,
    /// Obstacles retired off the left edge
    pub removed: usize,
}

/// Live obstacles plus the spawn/removal policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub obstacles: Vec<Obstacle>,
    gap: i32,
    spacing: f32,
    spawn_x: f32,
    screen_height: f32,
}

impl Track {
    /// Track with a single obstacle at the right edge of the screen
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let mut track = Self {
            obstacles: Vec::new(),
            gap: config.obstacle_gap,
            spacing: config.obstacle_spacing,
            spawn_x: config.screen_width(),
            screen_height: config.screen_height(),
        };
        track.spawn(rng);
        track
    }

    /// Append one obstacle at the right edge, no closer than `spacing` to the last one
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let x = match self.obstacles.last() {
            Some(last) => self.spawn_x.max(last.x + self.spacing),
            None => self.spawn_x,
        };
        let obstacle = Obstacle::spawn(x, self.gap, rng);
        log::debug!(
            "Spawned obstacle at x={} (gap line {}, top {})",
            obstacle.x,
            obstacle.gap_height,
            obstacle.top_height
        );
        self.obstacles.push(obstacle);
    }

    /// Advance the track one tick.
    ///
    /// Per obstacle, in order: collision test, pass test, scroll. Spawns for
    /// newly passed obstacles are appended after the loop, then off-screen
    /// obstacles are removed.
    pub fn update<R: Rng>(&mut self, actor: &Actor, speed: u32, rng: &mut R) -> TrackUpdate {
        let mut result = TrackUpdate::default();
        let speed = speed as f32;

        for obstacle in &mut self.obstacles {
            if collision::collides(actor, obstacle, self.screen_height) {
                result.collided = true;
            }
            if !obstacle.passed && actor.x > obstacle.right() {
                obstacle.passed = true;
                result.passed += 1;
            }
            obstacle.x -= speed;
        }

        for _ in 0..result.passed {
            self.spawn(rng);
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_offscreen());
        result.removed = before - self.obstacles.len();
        if result.removed > 0 {
            log::debug!("Retired {} obstacle(s)", result.removed);
        }

        result
    }

    /// Nearest obstacle the actor still has to get past
    pub fn next_unpassed(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ACTOR_X;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (GameConfig, Pcg32) {
        (GameConfig::default(), Pcg32::seed_from_u64(7))
    }

    /// Actor parked in the middle of every possible gap band
    fn safe_actor(config: &GameConfig, obstacle: &Obstacle) -> Actor {
        Actor::new(ACTOR_X, obstacle.gap_center(), config)
    }

    #[test]
    fn test_new_track_has_one_obstacle_at_right_edge() {
        let (config, mut rng) = setup();
        let track = Track::new(&config, &mut rng);
        assert_eq!(track.len(), 1);
        assert_eq!(track.obstacles[0].x, 900.0);
        assert!(!track.obstacles[0].passed);
    }

    #[test]
    fn test_gap_150_edge_case() {
        let o = Obstacle::with_gap(900.0, 150, 200);
        assert_eq!(o.top_height, -50);
        assert_eq!(o.bottom_y, 150);
        assert_eq!(o.gap_center(), 50.0);
    }

    #[test]
    fn test_update_scrolls_by_speed() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        let actor = safe_actor(&config, &track.obstacles[0]);
        let result = track.update(&actor, 8, &mut rng);
        assert_eq!(track.obstacles[0].x, 892.0);
        assert_eq!(result, TrackUpdate::default());
    }

    #[test]
    fn test_pass_is_edge_triggered_and_spawns_once() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        // right edge at 229: actor x 230 is already past it
        track.obstacles[0].x = 149.0;
        let actor = safe_actor(&config, &track.obstacles[0]);

        let first = track.update(&actor, 8, &mut rng);
        assert_eq!(first.passed, 1);
        assert_eq!(track.len(), 2);
        assert!(track.obstacles[0].passed);
        assert_eq!(track.obstacles[1].x, 900.0);

        for _ in 0..5 {
            let again = track.update(&actor, 8, &mut rng);
            assert_eq!(again.passed, 0);
        }
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn test_pass_uses_position_before_scroll() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        // right edge exactly at the actor: not past yet, even though it scrolls past this tick
        track.obstacles[0].x = 150.0;
        let actor = safe_actor(&config, &track.obstacles[0]);
        assert_eq!(track.update(&actor, 8, &mut rng).passed, 0);
        assert_eq!(track.update(&actor, 8, &mut rng).passed, 1);
    }

    #[test]
    fn test_offscreen_obstacles_removed_after_collision_check() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        track.obstacles[0].x = -75.0;
        track.obstacles[0].passed = true;
        let actor = safe_actor(&config, &track.obstacles[0]);
        let result = track.update(&actor, 8, &mut rng);
        assert_eq!(result.removed, 1);
        assert!(track.is_empty());
    }

    #[test]
    fn test_collision_reported_on_exit_tick() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        let mut actor = safe_actor(&config, &track.obstacles[0]);
        // obstacle overlapping actor column, actor inside the top segment
        track.obstacles[0] = Obstacle::with_gap(200.0, 399, 200);
        actor.y = 50.0;
        let result = track.update(&actor, 8, &mut rng);
        assert!(result.collided);
    }

    #[test]
    fn test_spacing_pushes_spawn_past_right_edge() {
        let config = GameConfig {
            obstacle_spacing: 1000.0,
            ..GameConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut track = Track::new(&config, &mut rng);
        track.obstacles[0].x = 100.0;
        track.spawn(&mut rng);
        assert_eq!(track.obstacles[1].x, 1100.0);
    }

    #[test]
    fn test_next_unpassed() {
        let (config, mut rng) = setup();
        let mut track = Track::new(&config, &mut rng);
        track.obstacles[0].passed = true;
        assert!(track.next_unpassed().is_none());

        // Far enough left that the spawn lands on the right edge
        track.obstacles[0].x = 300.0;
        track.spawn(&mut rng);
        assert_eq!(track.next_unpassed().map(|o| o.x), Some(900.0));

        // Too close: spacing pushes the next one out
        track.obstacles[1].passed = true;
        track.spawn(&mut rng);
        assert_eq!(track.next_unpassed().map(|o| o.x), Some(1400.0));
    }

    proptest! {
        #[test]
        fn prop_spawned_gap_within_bounds(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..32 {
                let o = Obstacle::spawn(900.0, 200, &mut rng);
                prop_assert!((GAP_HEIGHT_MIN..GAP_HEIGHT_MAX).contains(&o.gap_height));
                prop_assert_eq!(o.top_height, o.gap_height - 200);
                prop_assert_eq!(o.bottom_y, o.gap_height);
            }
        }
    }
}
