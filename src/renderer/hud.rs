//! Text and overlay layer
//!
//! A transparent 2D canvas stacked over the WebGPU canvas. It replays the
//! `Text` and `Overlay` commands of a frame in order; geometry is ignored.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::draw::{DrawCommand, TextAnchor};

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

pub struct HudLayer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Game screen size in logical pixels
    logical: (f32, f32),
}

impl HudLayer {
    /// Attach to the canvas with the given element id
    pub fn new(document: &Document, id: &str, logical: (f32, f32)) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str("hud canvas missing"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            logical,
        })
    }

    /// Match the backing store to the GPU canvas
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn draw(&self, commands: &[DrawCommand]) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_transform(
            width / self.logical.0 as f64,
            0.0,
            0.0,
            height / self.logical.1 as f64,
            0.0,
            0.0,
        )?;

        for command in commands {
            match command {
                DrawCommand::Overlay(color) => {
                    self.ctx.set_fill_style_str(&color.to_css());
                    self.ctx
                        .fill_rect(0.0, 0.0, self.logical.0 as f64, self.logical.1 as f64);
                }
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    color,
                    anchor,
                } => {
                    let (align, baseline) = match anchor {
                        TextAnchor::TopLeft => ("left", "top"),
                        TextAnchor::TopCenter => ("center", "top"),
                        TextAnchor::TopRight => ("right", "top"),
                        TextAnchor::Center => ("center", "middle"),
                    };
                    self.ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
                    self.ctx.set_text_align(align);
                    self.ctx.set_text_baseline(baseline);
                    self.ctx.set_fill_style_str(&color.to_css());
                    self.ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
