//! Canvas 2D surface

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, RenderError, Surface};
use crate::sim::collision::Rect;

/// Draws onto an HTML canvas through its 2D context.
///
/// The context is looked up on first use and again after a failed lookup,
/// so a canvas that is not ready yet just skips frames.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    /// Size the canvas backing store to the logical field
    pub fn new(canvas: HtmlCanvasElement, field: Vec2) -> Self {
        canvas.set_width(field.x as u32);
        canvas.set_height(field.y as u32);
        Self { canvas, ctx: None }
    }

    fn context(&mut self) -> Result<&CanvasRenderingContext2d, RenderError> {
        if self.ctx.is_none() {
            let ctx = self
                .canvas
                .get_context("2d")
                .map_err(|e| RenderError::Backend(format!("{:?}", e)))?
                .ok_or(RenderError::ContextUnavailable)?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| RenderError::ContextUnavailable)?;
            self.ctx = Some(ctx);
        }
        self.ctx.as_ref().ok_or(RenderError::ContextUnavailable)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ctx = self.context()?;
        ctx.set_fill_style_str(&color.to_css());
        ctx.fill_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError> {
        let ctx = self.context()?;
        ctx.set_fill_style_str(&color.to_css());
        ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        Ok(())
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), RenderError> {
        let ctx = self.context()?;
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .map_err(|e| RenderError::Backend(format!("{:?}", e)))?;
        ctx.fill();
        Ok(())
    }
}
