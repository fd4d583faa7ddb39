//! Fixed-rate simulation tick
//!
//! One call = one tick: consume the drained input events, advance whatever
//! the current scene simulates, then apply at most one scene transition.

use rand_pcg::Pcg32;

use super::collision;
use super::difficulty;
use super::state::{Game, NameEntry, Scene, Session, layout};
use crate::config::GameConfig;
use crate::platform::{InputEvent, Key};

/// Autopilot flaps once the actor sinks this far above the next gap line
pub const AUTOPILOT_MARGIN: f32 = 50.0;

/// Input for a single tick (everything drained from the queue)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    /// Demo mode - the game flaps for the player
    pub autopilot: bool,
}

impl TickInput {
    pub fn from_events(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    fn key_down(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|e| match e {
            InputEvent::KeyDown(key) => Some(*key),
            _ => None,
        })
    }
}

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Scene change requested during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Name confirmed: begin a session as this player
    Start(String),
    /// Actor hit an obstacle or the world bounds
    Crash,
    /// New session, same player
    Restart,
    /// Back to name entry, player forgotten
    SwitchActor,
}

/// Advance the game by one tick
pub fn tick(game: &mut Game, input: &TickInput) -> TickOutcome {
    if input.events.contains(&InputEvent::Quit) {
        log::info!("Quit requested");
        return TickOutcome::Quit;
    }

    let (config, scene, rng) = game.parts_mut();
    let transition = match scene {
        Scene::NameEntry(entry) => name_entry_tick(entry, config, input, rng),
        Scene::Active { session, .. } => active_tick(session, config, input, rng),
        Scene::GameOver { .. } => game_over_tick(input),
    };

    if let Some(transition) = transition {
        apply(game, transition);
    }
    TickOutcome::Continue
}

/// Apply a transition to the scene machine.
///
/// Every (scene, transition) pair is handled; pairs that make no sense for
/// the current scene leave it untouched.
pub fn apply(game: &mut Game, transition: Transition) {
    let scene = std::mem::take(&mut game.scene);
    game.scene = match (scene, transition) {
        (Scene::NameEntry(_), Transition::Start(identity)) => {
            log::info!("Player '{}' starting a session", identity);
            let session = game.new_session();
            Scene::Active { identity, session }
        }
        (Scene::Active { identity, session }, Transition::Crash) => {
            log::info!(
                "Game over for '{}': score {} after {} ticks",
                identity,
                session.score,
                session.ticks
            );
            Scene::GameOver { identity, session }
        }
        (Scene::GameOver { identity, session }, Transition::Restart) => {
            log::info!("'{}' restarting (previous score {})", identity, session.score);
            let session = game.new_session();
            Scene::Active { identity, session }
        }
        (Scene::GameOver { identity, .. }, Transition::SwitchActor) => {
            log::info!("'{}' left, back to name entry", identity);
            Scene::NameEntry(game.new_name_entry())
        }
        (scene, transition) => {
            log::warn!("Ignoring {:?} in {:?}", transition, scene.kind());
            scene
        }
    };
}

fn name_entry_tick(
    entry: &mut NameEntry,
    config: &GameConfig,
    input: &TickInput,
    rng: &mut Pcg32,
) -> Option<Transition> {
    for event in &input.events {
        match *event {
            InputEvent::MouseDown { x, y } => {
                if layout::name_field(config).contains(x, y) {
                    entry.focused = !entry.focused;
                } else if layout::start_button(config).contains(x, y) && entry.can_confirm() {
                    return Some(Transition::Start(entry.buffer.clone()));
                } else {
                    entry.focused = false;
                }
            }
            InputEvent::KeyDown(Key::Enter) if entry.focused && entry.can_confirm() => {
                return Some(Transition::Start(entry.buffer.clone()));
            }
            InputEvent::KeyDown(Key::Backspace) if entry.focused => entry.backspace(),
            InputEvent::Text(c) if entry.focused => {
                entry.push_char(c);
            }
            _ => {}
        }
    }

    entry.clouds.advance(rng);
    None
}

fn active_tick(
    session: &mut Session,
    config: &GameConfig,
    input: &TickInput,
    rng: &mut Pcg32,
) -> Option<Transition> {
    if input.key_down().any(|key| key == Key::Space) {
        session.actor.flap();
    }
    if input.autopilot && autopilot_wants_flap(session) {
        session.actor.flap();
    }

    let speed = difficulty::speed(session.score, config);
    session.actor.advance();
    session.ground.scroll(speed);
    session.clouds.advance(rng);

    let update = session.track.update(&session.actor, speed, rng);
    session.score += update.passed;
    session.ticks += 1;

    let crashed = update.collided || collision::out_of_bounds(&session.actor, config.ground_y());
    crashed.then_some(Transition::Crash)
}

fn game_over_tick(input: &TickInput) -> Option<Transition> {
    input.key_down().find_map(|key| match key {
        Key::R => Some(Transition::Restart),
        Key::T => Some(Transition::SwitchActor),
        _ => None,
    })
}

/// Flap when falling and below the next gap's target line
fn autopilot_wants_flap(session: &Session) -> bool {
    let actor = &session.actor;
    if actor.is_rising() {
        return false;
    }
    let target = session
        .track
        .next_unpassed()
        .map(|o| o.bottom_y as f32 - AUTOPILOT_MARGIN)
        .unwrap_or(actor.spawn_y);
    actor.y > target
}
