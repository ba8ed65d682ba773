//! Canvas 2D backend
//!
//! Executes a draw list on a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::DrawCmd;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Canvas backing size in pixels
    pub size: (u32, u32),
}

impl CanvasRenderer {
    /// Size the canvas to the playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, width: f32, height: f32) -> Result<Self, JsValue> {
        let size = (width as u32, height as u32);
        canvas.set_width(size.0);
        canvas.set_height(size.1);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        log::info!("Canvas renderer ready ({}x{})", size.0, size.1);
        Ok(Self { ctx, size })
    }

    pub fn render(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear { width, height } => {
                    self.ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCmd::Rect { rect, color } => {
                    self.ctx.set_fill_style_str(&color.to_string());
                    self.ctx.fill_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    self.ctx.begin_path();
                    if let Err(e) =
                        self.ctx
                            .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    {
                        log::warn!("Canvas arc failed: {:?}", e);
                        continue;
                    }
                    self.ctx.set_fill_style_str(&color.to_string());
                    self.ctx.fill();
                }
            }
        }
    }
}
