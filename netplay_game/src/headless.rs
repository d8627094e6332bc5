//! Headless collaborators for running the demo without a graphics backend.
//!
//! - [`ConsoleInput`]: each stdin line names the keys held for one frame,
//!   e.g. `left` or `up right`.
//! - [`TraceRenderer`]: logs player positions whenever they change.

use std::io::BufRead;

use netplay_shared::{
    input::{InputSource, Keys},
    math::IVec2,
    render::{RenderBackend, Sprite, WindowSpec},
};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Parses a console line into held keys. Unknown words are skipped.
pub fn parse_keys(line: &str) -> Keys {
    let mut keys = Keys::empty();
    for word in line.split_whitespace() {
        match Keys::from_key_word(word) {
            Some(k) => keys |= k,
            None => warn!(word, "Unknown key name"),
        }
    }
    keys
}

/// Keyboard stand-in fed from stdin.
pub struct ConsoleInput {
    rx: mpsc::Receiver<Keys>,
    held: Keys,
}

impl ConsoleInput {
    /// Spawns the stdin reader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Keys>(32);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let keys = parse_keys(&line);
                if !keys.is_empty() && tx.blocking_send(keys).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: mpsc::Receiver<Keys>) -> Self {
        Self {
            rx,
            held: Keys::empty(),
        }
    }
}

impl InputSource for ConsoleInput {
    fn is_key_pressed(&self, key: Keys) -> bool {
        self.held.contains(key)
    }

    /// One queued line per frame; no line means nothing is held.
    fn begin_frame(&mut self) {
        self.held = self.rx.try_recv().unwrap_or_default();
    }
}

/// Renderer that reports positions through `tracing`.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pending: Vec<IVec2>,
    shown: Vec<IVec2>,
}

impl RenderBackend for TraceRenderer {
    fn open(&mut self, window: &WindowSpec, sprite: Sprite) {
        info!(
            title = %window.title,
            width = window.width,
            height = window.height,
            sprite = %sprite.name,
            "Window opened"
        );
    }

    fn begin_frame(&mut self) {
        self.pending.clear();
    }

    fn draw_sprite(&mut self, offset: IVec2) {
        self.pending.push(offset);
    }

    fn end_frame(&mut self) {
        if self.pending != self.shown {
            info!(players = ?self.pending, "Players moved");
            std::mem::swap(&mut self.pending, &mut self.shown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys_combines_and_skips_noise() {
        assert_eq!(parse_keys("left"), Keys::LEFT);
        assert_eq!(parse_keys("  up   RIGHT "), Keys::UP | Keys::RIGHT);
        assert_eq!(parse_keys("jump down"), Keys::DOWN);
        assert_eq!(parse_keys(""), Keys::empty());
    }

    #[test]
    fn console_input_holds_one_line_per_frame() {
        let (tx, rx) = mpsc::channel(4);
        let mut input = ConsoleInput::from_receiver(rx);
        tx.try_send(Keys::LEFT).unwrap();
        tx.try_send(Keys::UP).unwrap();

        input.begin_frame();
        assert!(input.is_key_pressed(Keys::LEFT));
        input.begin_frame();
        assert!(input.is_key_pressed(Keys::UP));
        assert!(!input.is_key_pressed(Keys::LEFT));
        input.begin_frame();
        assert!(!input.is_key_pressed(Keys::UP));
    }

    #[test]
    fn trace_renderer_tracks_last_shown_frame() {
        let mut r = TraceRenderer::default();
        r.begin_frame();
        r.draw_sprite(IVec2::new(1, 1));
        r.end_frame();
        assert_eq!(r.shown, vec![IVec2::new(1, 1)]);
        r.begin_frame();
        r.draw_sprite(IVec2::new(1, 1));
        r.end_frame();
        assert_eq!(r.shown, vec![IVec2::new(1, 1)]);
    }
}
