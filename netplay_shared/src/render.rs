//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! Define traits that a renderer implementation would satisfy.

use crate::math::IVec2;

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: u32 = 320;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Opaque drawable handed to the renderer at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            name: "player".to_string(),
            width: 16,
            height: 16,
        }
    }
}

/// Window parameters a backend needs before the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// A minimal 2D rendering API.
pub trait RenderBackend: Send {
    fn open(&mut self, window: &WindowSpec, sprite: Sprite);
    fn begin_frame(&mut self);
    /// Draws the sprite translated by `offset`.
    fn draw_sprite(&mut self, offset: IVec2);
    fn end_frame(&mut self);

    /// Logical screen size, independent of the window size.
    fn layout(&self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// A no-op renderer useful for headless tests.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn open(&mut self, _window: &WindowSpec, _sprite: Sprite) {}
    fn begin_frame(&mut self) {}
    fn draw_sprite(&mut self, _offset: IVec2) {}
    fn end_frame(&mut self) {}
}

/// Records draw calls of the last completed frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub window: Option<WindowSpec>,
    pub frames: u64,
    pending: Vec<IVec2>,
    pub last_frame: Vec<IVec2>,
}

impl RenderBackend for RecordingRenderer {
    fn open(&mut self, window: &WindowSpec, _sprite: Sprite) {
        self.window = Some(window.clone());
    }

    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn draw_sprite(&mut self, offset: IVec2) {
        self.pending.push(offset);
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}
