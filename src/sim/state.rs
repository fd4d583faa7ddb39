//! Game state: sessions, the name entry screen, and the scene machine
//!
//! A `Game` owns the config, the seeded RNG, and exactly one `Scene`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::physics::Actor;
use super::scenery::{CloudSet, Ground};
use super::track::Track;
use crate::config::GameConfig;
use crate::consts::*;

/// One play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub actor: Actor,
    pub track: Track,
    pub score: u32,
    pub ground: Ground,
    pub clouds: CloudSet,
    /// Ticks simulated in this session
    pub ticks: u64,
}

impl Session {
    /// Fresh session: actor at spawn, one obstacle at the right edge, score 0
    pub fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        Self {
            actor: Actor::spawn(config),
            track: Track::new(config, rng),
            score: 0,
            ground: Ground::new(config),
            clouds: CloudSet::new(config, rng),
            ticks: 0,
        }
    }
}

/// Username entry screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameEntry {
    pub buffer: String,
    /// Keystrokes only reach the buffer while the field is focused
    pub focused: bool,
    pub clouds: CloudSet,
}

impl NameEntry {
    pub fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            clouds: CloudSet::new(config, rng),
        }
    }

    /// Buffer is acceptable as an identity
    pub fn can_confirm(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Append a typed character (ignored when full or a control character)
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_control() || self.buffer.chars().count() >= NAME_MAX_CHARS {
            return false;
        }
        self.buffer.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }
}

/// Name entry widgets, centered on the screen
pub mod layout {
    use super::*;

    pub fn name_field(config: &GameConfig) -> Rect {
        let (cx, cy) = center(config);
        Rect::new(cx - 100.0, cy, 200.0, 40.0)
    }

    pub fn start_button(config: &GameConfig) -> Rect {
        let (cx, cy) = center(config);
        Rect::new(cx - 60.0, cy + 60.0, 120.0, 40.0)
    }

    /// Where the static mascot actor sits
    pub fn mascot(config: &GameConfig) -> (f32, f32) {
        let (cx, cy) = center(config);
        (cx, cy - 100.0)
    }

    fn center(config: &GameConfig) -> (f32, f32) {
        (
            (config.width / 2) as f32,
            (config.height / 2) as f32,
        )
    }
}

/// Top-level scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scene {
    /// Collecting the player's name
    NameEntry(NameEntry),
    /// Simulation running
    Active { identity: String, session: Session },
    /// Simulation frozen on the crash frame
    GameOver { identity: String, session: Session },
}

/// Scene identifier without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    NameEntry,
    Active,
    GameOver,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::NameEntry(NameEntry::default())
    }
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::NameEntry(_) => SceneKind::NameEntry,
            Scene::Active { .. } => SceneKind::Active,
            Scene::GameOver { .. } => SceneKind::GameOver,
        }
    }

    /// Session being played or shown, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            Scene::NameEntry(_) => None,
            Scene::Active { session, .. } | Scene::GameOver { session, .. } => Some(session),
        }
    }

    /// Name of the current player, if one has been entered
    pub fn identity(&self) -> Option<&str> {
        match self {
            Scene::NameEntry(_) => None,
            Scene::Active { identity, .. } | Scene::GameOver { identity, .. } => Some(identity),
        }
    }
}

impl SceneKind {
    /// Frame pacing for this scene
    pub fn tick_hz(&self) -> u32 {
        match self {
            SceneKind::NameEntry => MENU_TICK_HZ,
            SceneKind::Active | SceneKind::GameOver => PLAY_TICK_HZ,
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_hz() as f32
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    pub config: GameConfig,
    /// Seed the RNG was created from (for logs and replays)
    pub seed: u64,
    pub scene: Scene,
    rng: Pcg32,
}

impl Game {
    /// Start on the name entry screen
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scene = Scene::NameEntry(NameEntry::new(&config, &mut rng));
        Self {
            config,
            seed,
            scene,
            rng,
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.scene.kind()
    }

    /// Split borrow for the tick driver
    pub(crate) fn parts_mut(&mut self) -> (&GameConfig, &mut Scene, &mut Pcg32) {
        (&self.config, &mut self.scene, &mut self.rng)
    }

    pub(crate) fn new_session(&mut self) -> Session {
        Session::new(&self.config, &mut self.rng)
    }

    pub(crate) fn new_name_entry(&mut self) -> NameEntry {
        NameEntry::new(&self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_at_name_entry() {
        let game = Game::new(GameConfig::default(), 1);
        assert_eq!(game.kind(), SceneKind::NameEntry);
        assert!(game.scene.session().is_none());
        assert!(game.scene.identity().is_none());
        match &game.scene {
            Scene::NameEntry(entry) => {
                assert!(entry.buffer.is_empty());
                assert!(!entry.focused);
                assert_eq!(entry.clouds.len(), CLOUD_COUNT);
            }
            other => panic!("unexpected scene {:?}", other.kind()),
        }
    }

    #[test]
    fn test_fresh_session() {
        let mut game = Game::new(GameConfig::default(), 2);
        let session = game.new_session();
        assert_eq!(session.score, 0);
        assert_eq!(session.actor.x, ACTOR_X);
        assert_eq!(session.actor.y, ACTOR_SPAWN_Y);
        assert_eq!(session.track.len(), 1);
        assert_eq!(session.track.obstacles[0].x, 900.0);
    }

    #[test]
    fn test_name_buffer_limits() {
        let mut game = Game::new(GameConfig::default(), 3);
        let mut entry = game.new_name_entry();
        for c in "abcdefghijklmnopq".chars() {
            entry.push_char(c);
        }
        assert_eq!(entry.buffer, "abcdefghijklmno");
        assert!(!entry.push_char('z'));
        entry.backspace();
        assert!(!entry.push_char('\r'));
        assert!(entry.push_char('é'));
        assert_eq!(entry.buffer.chars().count(), NAME_MAX_CHARS);
    }

    #[test]
    fn test_whitespace_name_cannot_confirm() {
        let mut game = Game::new(GameConfig::default(), 4);
        let mut entry = game.new_name_entry();
        assert!(!entry.can_confirm());
        entry.push_char(' ');
        entry.push_char(' ');
        assert!(!entry.can_confirm());
        entry.push_char('x');
        assert!(entry.can_confirm());
    }

    #[test]
    fn test_layout_matches_screen_center() {
        let config = GameConfig::default();
        assert_eq!(layout::name_field(&config), Rect::new(350.0, 400.0, 200.0, 40.0));
        assert_eq!(layout::start_button(&config), Rect::new(390.0, 460.0, 120.0, 40.0));
        assert_eq!(layout::mascot(&config), (450.0, 300.0));
    }

    #[test]
    fn test_tick_rates() {
        assert_eq!(SceneKind::NameEntry.tick_hz(), 30);
        assert_eq!(SceneKind::Active.tick_hz(), 60);
        assert_eq!(SceneKind::GameOver.tick_hz(), 60);
    }
}
