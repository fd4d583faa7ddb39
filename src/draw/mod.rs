//! Render boundary as data
//!
//! The simulation never talks to a graphics API. Each frame is described as
//! an ordered list of [`DrawCommand`]s in logical screen pixels (origin top
//! left, y down), which a backend replays in order.

pub mod scene;

use glam::Vec2;

use crate::sim::Rect;

pub use scene::frame;

/// 8-bit sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Darker shade, saturating at black
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Linear-light RGBA for an sRGB render target
    pub fn to_linear(self) -> [f32; 4] {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a as f32 / 255.0,
        ]
    }

    /// CSS `rgba()` string for the 2D canvas
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Palette
pub mod colors {
    use super::Color;

    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const CLOUD_WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRASS_GREEN: Color = Color::rgb(34, 139, 34);
    pub const BROWN: Color = Color::rgb(139, 69, 19);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const ACTOR_BODY: Color = Color::rgb(255, 165, 0);
    pub const ACTOR_BEAK: Color = Color::rgb(255, 140, 0);
    pub const ACTOR_WING: Color = Color::rgb(220, 120, 0);

    pub const FIELD_FOCUSED: Color = Color::rgb(52, 152, 219);
    pub const FIELD_IDLE: Color = Color::rgb(41, 128, 185);

    /// Game-over dimming (half-transparent black)
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 128);

    /// Shade used for obstacle caps and ground marks
    pub const DETAIL_DARKEN: u8 = 20;
}

/// Text sizes in pixels
pub mod fonts {
    pub const SCORE: f32 = 50.0;
    pub const MENU: f32 = 32.0;
    pub const TITLE: f32 = 70.0;
    pub const HINT: f32 = 24.0;
}

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
}

/// One primitive drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Filled convex polygon
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    },
    /// Alpha-blend a full-screen color over everything drawn so far
    Overlay(Color),
}

impl DrawCommand {
    /// Geometry that goes through the triangle pipeline
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            DrawCommand::Circle { .. }
                | DrawCommand::Polygon { .. }
                | DrawCommand::Rect { .. }
                | DrawCommand::Line { .. }
        )
    }

    /// Text and overlays, composited above geometry
    pub fn is_hud(&self) -> bool {
        matches!(self, DrawCommand::Text { .. } | DrawCommand::Overlay(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_saturates() {
        assert_eq!(colors::BROWN.darken(20), Color::rgb(119, 49, 0));
        assert_eq!(colors::GRASS_GREEN.darken(40), Color::rgb(0, 99, 0));
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(colors::BLACK.to_linear(), [0.0, 0.0, 0.0, 1.0]);
        let white = colors::WHITE.to_linear();
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
        let overlay = colors::OVERLAY.to_linear();
        assert!((overlay[3] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_css_string() {
        assert_eq!(colors::OVERLAY.to_css(), "rgba(0,0,0,0.502)");
        assert_eq!(colors::RED.to_css(), "rgba(255,0,0,1.000)");
    }
}
