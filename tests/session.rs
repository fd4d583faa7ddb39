//! End-to-end drive of the public API: name entry, play, game over, and back

use flying_adventure::GameConfig;
use flying_adventure::draw::{self, DrawCommand};
use flying_adventure::platform::{InputEvent, Key};
use flying_adventure::sim::{
    Actor, Game, Scene, SceneKind, Session, TickInput, TickOutcome, layout, speed, tick,
};

fn events(events: Vec<InputEvent>) -> TickInput {
    TickInput::from_events(events)
}

fn enter_name(game: &mut Game, name: &str) {
    let (x, y) = layout::name_field(&game.config).center();
    let mut typed = vec![InputEvent::MouseDown { x, y }];
    typed.extend(name.chars().map(InputEvent::Text));
    tick(game, &events(typed));
    assert_eq!(game.kind(), SceneKind::NameEntry);

    let (bx, by) = layout::start_button(&game.config).center();
    tick(game, &events(vec![InputEvent::MouseDown { x: bx, y: by }]));
    assert_eq!(game.kind(), SceneKind::Active);
}

fn session_mut(game: &mut Game) -> &mut Session {
    match &mut game.scene {
        Scene::Active { session, .. } | Scene::GameOver { session, .. } => session,
        Scene::NameEntry(_) => panic!("no session on the name entry screen"),
    }
}

/// Hold the actor at spawn and open every gap around it
fn pin(game: &mut Game) {
    let config = game.config.clone();
    let session = session_mut(game);
    session.actor = Actor::spawn(&config);
    for obstacle in &mut session.track.obstacles {
        obstacle.gap_height = 400;
        obstacle.top_height = 200;
        obstacle.bottom_y = 400;
    }
}

fn crash(game: &mut Game) {
    let ground = game.config.ground_y();
    session_mut(game).actor.y = ground;
    tick(game, &TickInput::default());
    assert_eq!(game.kind(), SceneKind::GameOver);
}

fn hud_text(game: &Game) -> Vec<String> {
    draw::frame(game)
        .into_iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn test_three_passes_raise_speed() {
    let mut game = Game::new(GameConfig::default(), 2024);
    enter_name(&mut game, "ada");
    assert_eq!(game.scene.identity(), Some("ada"));

    let mut ticks = 0;
    while session_mut(&mut game).score < 3 {
        pin(&mut game);
        tick(&mut game, &TickInput::default());
        assert_eq!(game.kind(), SceneKind::Active, "crashed at tick {}", ticks);
        ticks += 1;
        assert!(ticks < 2000, "never scored three");
    }

    let session = session_mut(&mut game);
    assert_eq!(session.score, 3);
    assert_eq!(speed(session.score, &GameConfig::default()), 9);

    // The next tick scrolls at the new speed
    pin(&mut game);
    let before = session_mut(&mut game).track.obstacles.last().map(|o| o.x);
    tick(&mut game, &TickInput::default());
    let after = session_mut(&mut game).track.obstacles.last().map(|o| o.x);
    match (before, after) {
        (Some(b), Some(a)) => assert_eq!(b - a, 9.0),
        _ => panic!("track emptied"),
    }

    assert!(hud_text(&game).contains(&"Score: 3".to_string()));
}

#[test]
fn test_restart_keeps_player() {
    let mut game = Game::new(GameConfig::default(), 7);
    enter_name(&mut game, "bo");
    for _ in 0..20 {
        pin(&mut game);
        tick(&mut game, &TickInput::default());
    }
    crash(&mut game);

    let text = hud_text(&game);
    assert!(text.contains(&"GAME OVER".to_string()));
    assert!(text.contains(&"Player: bo - Score: 0".to_string()));

    // Frozen until a key arrives
    let frozen_x = session_mut(&mut game).track.obstacles[0].x;
    tick(&mut game, &events(vec![InputEvent::KeyDown(Key::Space)]));
    assert_eq!(game.kind(), SceneKind::GameOver);
    assert_eq!(session_mut(&mut game).track.obstacles[0].x, frozen_x);

    tick(&mut game, &events(vec![InputEvent::KeyDown(Key::R)]));
    assert_eq!(game.kind(), SceneKind::Active);
    assert_eq!(game.scene.identity(), Some("bo"));
    let session = session_mut(&mut game);
    assert_eq!(session.score, 0);
    assert_eq!(session.ticks, 0);
    assert_eq!(session.track.obstacles.len(), 1);
    assert_eq!(session.track.obstacles[0].x, 900.0);
}

#[test]
fn test_switch_actor_returns_to_name_entry() {
    let mut game = Game::new(GameConfig::default(), 8);
    enter_name(&mut game, "cy");
    crash(&mut game);

    tick(&mut game, &events(vec![InputEvent::KeyDown(Key::T)]));
    assert_eq!(game.kind(), SceneKind::NameEntry);
    assert!(game.scene.identity().is_none());
    match &game.scene {
        Scene::NameEntry(entry) => {
            assert!(entry.buffer.is_empty());
            assert!(!entry.focused);
        }
        _ => unreachable!(),
    }

    enter_name(&mut game, "dee");
    assert_eq!(game.scene.identity(), Some("dee"));
}

#[test]
fn test_quit_from_every_scene() {
    let mut game = Game::new(GameConfig::default(), 9);
    assert_eq!(
        tick(&mut game, &events(vec![InputEvent::Quit])),
        TickOutcome::Quit
    );

    enter_name(&mut game, "eve");
    assert_eq!(
        tick(&mut game, &events(vec![InputEvent::Quit])),
        TickOutcome::Quit
    );

    crash(&mut game);
    assert_eq!(
        tick(&mut game, &events(vec![InputEvent::Quit])),
        TickOutcome::Quit
    );
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed: u64| {
        let mut game = Game::new(GameConfig::default(), seed);
        enter_name(&mut game, "fay");
        for i in 0..400 {
            let input = TickInput {
                events: if i % 20 == 0 {
                    vec![InputEvent::KeyDown(Key::Space)]
                } else {
                    Vec::new()
                },
                autopilot: true,
            };
            tick(&mut game, &input);
        }
        draw::frame(&game)
    };

    assert_eq!(run(42), run(42));
}
