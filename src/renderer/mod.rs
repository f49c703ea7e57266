//! 2D rendering
//!
//! The simulation never draws. Each frame the session hands a
//! [`FrameSnapshot`] to [`draw_frame`], which issues flat shapes against a
//! [`Surface`]. On the web the surface is a canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;
use thiserror::Error;

use crate::sim::collision::Rect;
use crate::sim::state::{FrameSnapshot, MovePattern};

/// Drawing failures; the frame is skipped and the game carries on
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("2D drawing context is unavailable")]
    ContextUnavailable,
    #[error("drawing backend failed: {0}")]
    Backend(String),
}

/// RGBA colour, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS colour string, as canvas fill styles expect
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::rgb(135, 206, 235);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 0.8);
    pub const PLAYER: Color = Color::rgb(52, 152, 219);
    pub const ENEMY_STRAIGHT: Color = Color::rgb(231, 76, 60);
    pub const ENEMY_ZIGZAG: Color = Color::rgb(230, 126, 34);
    pub const ENEMY_CIRCLE: Color = Color::rgb(155, 89, 182);
}

/// A drawing target sized to the logical field
pub trait Surface {
    fn clear(&mut self, color: Color) -> Result<(), RenderError>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), RenderError>;
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), RenderError>;
}

fn enemy_color(pattern: MovePattern) -> Color {
    match pattern {
        MovePattern::Straight => palette::ENEMY_STRAIGHT,
        MovePattern::Zigzag => palette::ENEMY_ZIGZAG,
        MovePattern::Circle => palette::ENEMY_CIRCLE,
    }
}

/// Draw one frame: sky, clouds (optional), enemies, then the player on top
pub fn draw_frame(
    surface: &mut dyn Surface,
    frame: &FrameSnapshot<'_>,
    show_clouds: bool,
) -> Result<(), RenderError> {
    surface.clear(palette::SKY)?;

    if show_clouds {
        for cloud in frame.clouds {
            surface.fill_circle(cloud.pos, cloud.size, palette::CLOUD)?;
        }
    }

    for enemy in frame.enemies {
        surface.fill_rect(enemy.rect(), enemy_color(enemy.pattern))?;
    }

    surface.fill_rect(frame.player.rect(), palette::PLAYER)?;
    Ok(())
}
