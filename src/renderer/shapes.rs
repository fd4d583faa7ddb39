//! Shape generation for 2D primitives
//!
//! Geometry commands become triangle lists in screen pixels; the pipeline
//! maps pixels to clip space. Text and overlays are not tessellated.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::draw::{Color, DrawCommand, colors};
use crate::sim::Rect;

/// Triangles for one frame plus the clear color
#[derive(Debug, Clone)]
pub struct Batch {
    pub clear: Color,
    pub vertices: Vec<Vertex>,
}

/// Tessellate every geometry command, in order
pub fn tessellate(commands: &[DrawCommand]) -> Batch {
    let mut clear = colors::BLACK;
    let mut vertices = Vec::with_capacity(commands.len() * 48);

    for command in commands {
        match command {
            DrawCommand::Clear(color) => {
                clear = *color;
                vertices.clear();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, segments_for(*radius))),
            DrawCommand::Polygon { points, color } => vertices.extend(polygon(points, *color)),
            DrawCommand::Rect { rect, color } => vertices.extend(rect_quad(rect, *color)),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(*from, *to, *width, *color)),
            DrawCommand::Text { .. } | DrawCommand::Overlay(_) => {}
        }
    }

    Batch { clear, vertices }
}

/// More segments for bigger circles so cloud edges stay smooth
fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 64)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::colored(center.x, center.y, color));
        vertices.push(Vertex::colored(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::colored(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Two triangles; empty rects produce nothing
pub fn rect_quad(rect: &Rect, color: Color) -> Vec<Vertex> {
    if rect.is_empty() {
        return Vec::new();
    }
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    vec![
        Vertex::colored(l, t, color),
        Vertex::colored(l, b, color),
        Vertex::colored(r, t, color),
        Vertex::colored(r, t, color),
        Vertex::colored(l, b, color),
        Vertex::colored(r, b, color),
    ]
}

/// Triangle fan from the first point (convex polygons only)
pub fn polygon(points: &[Vec2], color: Color) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let origin = points[0];
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::colored(origin.x, origin.y, color));
        vertices.push(Vertex::colored(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::colored(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Segment as a quad `width` pixels thick
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::colored(a1.x, a1.y, color),
        Vertex::colored(b1.x, b1.y, color),
        Vertex::colored(a2.x, a2.y, color),
        Vertex::colored(a2.x, a2.y, color),
        Vertex::colored(b1.x, b1.y, color),
        Vertex::colored(b2.x, b2.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{TextAnchor, fonts};

    #[test]
    fn test_circle_triangle_count() {
        let v = circle(Vec2::ZERO, 10.0, colors::WHITE, 16);
        assert_eq!(v.len(), 48);
        assert_eq!(v[0].position, [0.0, 0.0]);
        assert!((v[1].position[0] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_rect_skipped() {
        assert!(rect_quad(&Rect::new(0.0, 0.0, 80.0, -40.0), colors::RED).is_empty());
        assert_eq!(rect_quad(&Rect::new(0.0, 0.0, 80.0, 40.0), colors::RED).len(), 6);
    }

    #[test]
    fn test_polygon_fan() {
        let tri = [Vec2::ZERO, Vec2::X, Vec2::Y];
        assert_eq!(polygon(&tri, colors::WHITE).len(), 3);
        let quad = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        assert_eq!(polygon(&quad, colors::WHITE).len(), 6);
        assert!(polygon(&tri[..2], colors::WHITE).is_empty());
    }

    #[test]
    fn test_vertical_line_width() {
        let v = line(Vec2::new(10.0, 0.0), Vec2::new(10.0, 5.0), 2.0, colors::BLACK);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - 9.0).abs() < 1e-5 && (max - 11.0).abs() < 1e-5);
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, colors::BLACK).is_empty());
    }

    #[test]
    fn test_tessellate_skips_hud_and_uses_clear() {
        let commands = vec![
            DrawCommand::Clear(colors::SKY_BLUE),
            DrawCommand::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: colors::RED,
            },
            DrawCommand::Text {
                text: "hi".to_string(),
                pos: Vec2::ZERO,
                size: fonts::MENU,
                color: colors::WHITE,
                anchor: TextAnchor::TopLeft,
            },
            DrawCommand::Overlay(colors::OVERLAY),
        ];
        let batch = tessellate(&commands);
        assert_eq!(batch.clear, colors::SKY_BLUE);
        assert_eq!(batch.vertices.len(), 6);
        assert_eq!(batch.vertices[0].color, colors::RED.to_linear());
    }
}
