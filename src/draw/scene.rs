//! Scene painter: `Game` to an ordered list of draw commands
//!
//! Play order is fixed: background, clouds, actor, obstacles, ground, score,
//! then the game-over overlay and status lines. Stateless; calling it twice
//! on the same game yields the same list.

use glam::Vec2;

use super::{Color, DrawCommand, TextAnchor, colors, fonts};
use crate::config::GameConfig;
use crate::consts::{GROUND_MARK_SPACING, WING_PHASE_MAX};
use crate::sim::{Actor, Cloud, CloudSet, Game, Ground, NameEntry, Obstacle, Rect, Scene, Session};
use crate::sim::{layout, obstacle_boxes};

const TITLE: &str = "Flying Adventure";
const NAME_PROMPT: &str = "Enter your username:";
const START_LABEL: &str = "Start";
const INSTRUCTIONS: &str = "Press SPACE to flap wings and avoid obstacles!";

const OBSTACLE_CAP: f32 = 30.0;
const GROUND_MARK_HEIGHT: f32 = 5.0;
const GROUND_MARK_WIDTH: f32 = 2.0;
const WIDGET_BORDER: f32 = 2.0;
const WING_TILT_LIMIT: f32 = 20.0;

/// Everything to draw for the current scene, back to front
pub fn frame(game: &Game) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(64);
    match &game.scene {
        Scene::NameEntry(entry) => name_entry(entry, &game.config, &mut out),
        Scene::Active { session, .. } => play(session, &game.config, &mut out),
        Scene::GameOver { identity, session } => {
            play(session, &game.config, &mut out);
            game_over(identity, session.score, &game.config, &mut out);
        }
    }
    out
}

fn play(session: &Session, config: &GameConfig, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Clear(colors::SKY_BLUE));
    clouds(&session.clouds, out);
    actor(&session.actor, out);
    for obstacle in &session.track.obstacles {
        obstacle_shapes(obstacle, config, out);
    }
    ground(&session.ground, out);
    score(session.score, config, out);
}

fn game_over(identity: &str, score: u32, config: &GameConfig, out: &mut Vec<DrawCommand>) {
    let cx = config.screen_width() / 2.0;
    let cy = config.screen_height() / 2.0;

    out.push(DrawCommand::Overlay(colors::OVERLAY));
    out.push(text("GAME OVER", cx, cy, fonts::TITLE, colors::RED, TextAnchor::Center));

    let lines = [
        "Press R to restart".to_string(),
        "Press T to switch player".to_string(),
        format!("Player: {} - Score: {}", identity, score),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        let y = cy + 50.0 * (i + 1) as f32;
        out.push(text(line, cx, y, fonts::MENU, colors::WHITE, TextAnchor::TopCenter));
    }
}

fn name_entry(entry: &NameEntry, config: &GameConfig, out: &mut Vec<DrawCommand>) {
    let cx = config.screen_width() / 2.0;
    let cy = config.screen_height() / 2.0;
    let field = layout::name_field(config);
    let button = layout::start_button(config);
    let fill = if entry.focused {
        colors::FIELD_FOCUSED
    } else {
        colors::FIELD_IDLE
    };

    // Shapes first, then every label
    out.push(DrawCommand::Clear(colors::SKY_BLUE));
    clouds(&entry.clouds, out);
    let (mx, my) = layout::mascot(config);
    actor(&Actor::new(mx, my, config), out);
    widget(field, fill, out);
    widget(button, fill, out);

    shadowed(out, TITLE, Vec2::new(cx, 150.0), 2.0, fonts::TITLE, TextAnchor::TopCenter);
    shadowed(out, NAME_PROMPT, Vec2::new(cx, cy - 50.0), 2.0, fonts::MENU, TextAnchor::Center);
    if !entry.buffer.is_empty() {
        shadowed(out, &entry.buffer, rect_center(&field), 1.0, fonts::MENU, TextAnchor::Center);
    }
    shadowed(out, START_LABEL, rect_center(&button), 1.0, fonts::MENU, TextAnchor::Center);

    let hint_pos = Vec2::new(cx, config.screen_height() - 100.0);
    shadowed(out, INSTRUCTIONS, hint_pos, 1.0, fonts::HINT, TextAnchor::Center);
}

/// Body, eye, beak and wing
pub fn actor(actor: &Actor, out: &mut Vec<DrawCommand>) {
    let c = Vec2::new(actor.x, actor.y);

    out.push(DrawCommand::Circle {
        center: c,
        radius: actor.radius,
        color: colors::ACTOR_BODY,
    });
    out.push(DrawCommand::Circle {
        center: c + Vec2::new(5.0, -5.0),
        radius: 4.0,
        color: colors::BLACK,
    });
    out.push(DrawCommand::Circle {
        center: c + Vec2::new(6.0, -6.0),
        radius: 2.0,
        color: colors::WHITE,
    });
    out.push(DrawCommand::Polygon {
        points: vec![
            c + Vec2::new(15.0, 0.0),
            c + Vec2::new(25.0, -5.0),
            c + Vec2::new(25.0, 5.0),
        ],
        color: colors::ACTOR_BEAK,
    });

    let tip = wing_lift(actor.wing_phase) + actor.angle.trunc().clamp(-WING_TILT_LIMIT, WING_TILT_LIMIT);
    out.push(DrawCommand::Polygon {
        points: vec![
            c + Vec2::new(-5.0, 0.0),
            c + Vec2::new(-15.0, tip),
            c + Vec2::new(-5.0, 5.0),
        ],
        color: colors::ACTOR_WING,
    });
}

/// Vertical offset of the wing tip for each animation phase
fn wing_lift(phase: u8) -> f32 {
    match phase {
        WING_PHASE_MAX => -10.0,
        1 => -5.0,
        _ => 0.0,
    }
}

fn clouds(set: &CloudSet, out: &mut Vec<DrawCommand>) {
    for cloud in &set.clouds {
        cloud_puffs(cloud, out);
    }
}

fn cloud_puffs(cloud: &Cloud, out: &mut Vec<DrawCommand>) {
    let c = Vec2::new(cloud.x, cloud.y);
    let side = Vec2::new(cloud.size * 0.5, 0.0);
    for (center, radius) in [
        (c, cloud.size),
        (c - side, cloud.size * 0.8),
        (c + side, cloud.size * 0.8),
    ] {
        out.push(DrawCommand::Circle {
            center,
            radius,
            color: colors::CLOUD_WHITE,
        });
    }
}

fn obstacle_shapes(obstacle: &Obstacle, config: &GameConfig, out: &mut Vec<DrawCommand>) {
    let [top, bottom] = obstacle_boxes(obstacle, config.screen_height());
    let dark = colors::BROWN.darken(colors::DETAIL_DARKEN);

    out.push(DrawCommand::Rect {
        rect: top,
        color: colors::BROWN,
    });
    out.push(DrawCommand::Rect {
        rect: Rect::new(
            obstacle.x,
            obstacle.top_height as f32 - OBSTACLE_CAP,
            obstacle.width,
            OBSTACLE_CAP,
        ),
        color: dark,
    });
    out.push(DrawCommand::Rect {
        rect: bottom,
        color: colors::BROWN,
    });
    out.push(DrawCommand::Rect {
        rect: Rect::new(obstacle.x, obstacle.bottom_y as f32, obstacle.width, OBSTACLE_CAP),
        color: dark,
    });
}

fn ground(ground: &Ground, out: &mut Vec<DrawCommand>) {
    let width = ground.tile_width();
    let dark = colors::GRASS_GREEN.darken(colors::DETAIL_DARKEN);

    for x in [ground.x1, ground.x2] {
        out.push(DrawCommand::Rect {
            rect: Rect::new(x, ground.y, width, ground.height),
            color: colors::GRASS_GREEN,
        });
    }
    for tile_x in [ground.x1, ground.x2] {
        let start = tile_x.trunc();
        let mut mark = start;
        while mark < start + width {
            out.push(DrawCommand::Line {
                from: Vec2::new(mark, ground.y),
                to: Vec2::new(mark, ground.y + GROUND_MARK_HEIGHT),
                width: GROUND_MARK_WIDTH,
                color: dark,
            });
            mark += GROUND_MARK_SPACING;
        }
    }
}

fn score(score: u32, config: &GameConfig, out: &mut Vec<DrawCommand>) {
    let label = format!("Score: {}", score);
    let right = config.screen_width() - 10.0;
    out.push(text(
        label.clone(),
        right + 2.0,
        12.0,
        fonts::SCORE,
        colors::BLACK,
        TextAnchor::TopRight,
    ));
    out.push(text(label, right, 10.0, fonts::SCORE, colors::WHITE, TextAnchor::TopRight));
}

/// Filled widget box with a black border
fn widget(rect: Rect, fill: Color, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Rect { rect, color: fill });

    let tl = Vec2::new(rect.x, rect.y);
    let tr = Vec2::new(rect.right(), rect.y);
    let br = Vec2::new(rect.right(), rect.bottom());
    let bl = Vec2::new(rect.x, rect.bottom());
    for (from, to) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        out.push(DrawCommand::Line {
            from,
            to,
            width: WIDGET_BORDER,
            color: colors::BLACK,
        });
    }
}

/// White text over a black copy nudged down-right by `offset`
fn shadowed(
    out: &mut Vec<DrawCommand>,
    label: &str,
    pos: Vec2,
    offset: f32,
    size: f32,
    anchor: TextAnchor,
) {
    let shadow = pos + Vec2::splat(offset);
    out.push(text(label, shadow.x, shadow.y, size, colors::BLACK, anchor));
    out.push(text(label, pos.x, pos.y, size, colors::WHITE, anchor));
}

fn text(
    label: impl Into<String>,
    x: f32,
    y: f32,
    size: f32,
    color: Color,
    anchor: TextAnchor,
) -> DrawCommand {
    DrawCommand::Text {
        text: label.into(),
        pos: Vec2::new(x, y),
        size,
        color,
        anchor,
    }
}

fn rect_center(rect: &Rect) -> Vec2 {
    let (x, y) = rect.center();
    Vec2::new(x, y)
}
