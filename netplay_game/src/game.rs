//! Frame driver.
//!
//! Glues the authority loop to its collaborators: an input source sampled
//! each frame, an outbound message sink, and a renderer that draws one sprite
//! per player.

use std::time::Duration;

use netplay_shared::{
    config::{DemoConfig, Role},
    input::InputSource,
    net::{FrameWriter, MessageSink, NetMsg},
    render::{RenderBackend, Sprite},
};
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::info;

use crate::{authority::Authority, session::Session};

/// A running demo: state, I/O, and collaborators for one role.
pub struct Game<S, I, R> {
    authority: Authority,
    sink: S,
    input: I,
    renderer: R,
    relay: Option<JoinHandle<anyhow::Result<()>>>,
    frame: u64,
}

impl<I, R> Game<FrameWriter, I, R>
where
    I: InputSource,
    R: RenderBackend,
{
    /// Starts the relay for `session` and opens the window.
    pub fn start(session: Session, cfg: &DemoConfig, input: I, renderer: R) -> Self {
        let role = session.role();
        let (writer, inbox, relay) = session.start();
        let authority = Authority::new(role, cfg.start_positions(), inbox);
        let mut game = Self::new(authority, writer, input, renderer);
        game.relay = Some(relay);
        game.renderer.open(&cfg.window(role), Sprite::default());
        info!(%role, "Game started");
        game
    }
}

impl<S, I, R> Game<S, I, R>
where
    S: MessageSink,
    I: InputSource,
    R: RenderBackend,
{
    pub fn new(authority: Authority, sink: S, input: I, renderer: R) -> Self {
        Self {
            authority,
            sink,
            input,
            renderer,
            relay: None,
            frame: 0,
        }
    }

    /// Builds a game around an existing queue, with no relay attached.
    pub fn with_inbox(
        cfg: &DemoConfig,
        role: Role,
        inbox: mpsc::UnboundedReceiver<NetMsg>,
        sink: S,
        input: I,
        renderer: R,
    ) -> Self {
        let authority = Authority::new(role, cfg.start_positions(), inbox);
        Self::new(authority, sink, input, renderer)
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Update then draw, once.
    pub async fn frame(&mut self) -> anyhow::Result<()> {
        self.input.begin_frame();
        self.authority.update(&self.input, &mut self.sink).await?;
        self.draw();
        self.frame += 1;
        Ok(())
    }

    fn draw(&mut self) {
        self.renderer.begin_frame();
        for pos in self.authority.players() {
            self.renderer.draw_sprite(*pos);
        }
        self.renderer.end_frame();
    }

    /// Runs frames at `frame_hz` until a frame fails.
    pub async fn run(&mut self, frame_hz: u32) -> anyhow::Result<()> {
        let frame_interval = Duration::from_secs_f32(1.0 / frame_hz.max(1) as f32);
        let mut next_frame = Instant::now();
        loop {
            self.frame().await?;
            next_frame += frame_interval;
            tokio::time::sleep_until(next_frame).await;
        }
    }

    /// Runs a fixed number of frames without pacing.
    pub async fn run_for_frames(&mut self, n: u64) -> anyhow::Result<()> {
        for _ in 0..n {
            self.frame().await?;
        }
        Ok(())
    }
}

impl<S, I, R> Drop for Game<S, I, R> {
    fn drop(&mut self) {
        if let Some(relay) = self.relay.take() {
            relay.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use netplay_shared::{input::Keys, math::IVec2, net::PlayerId, render::RecordingRenderer};

    #[derive(Default)]
    struct Recorder(Vec<NetMsg>);

    #[async_trait]
    impl MessageSink for Recorder {
        async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
            self.0.push(*msg);
            Ok(())
        }
    }

    #[tokio::test]
    async fn draws_both_players_every_frame() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut game = Game::with_inbox(
            &DemoConfig::default(),
            Role::Join,
            rx,
            Recorder::default(),
            Keys::empty(),
            RecordingRenderer::default(),
        );

        game.run_for_frames(2).await.unwrap();
        assert_eq!(
            game.renderer().last_frame,
            vec![IVec2::new(100, 100), IVec2::new(200, 200)]
        );

        tx.send(NetMsg::position_update(PlayerId::JOINER, IVec2::new(201, 200)))
            .unwrap();
        game.frame().await.unwrap();
        assert_eq!(game.frames(), 3);
        assert_eq!(game.renderer().frames, 3);
        assert_eq!(game.renderer().last_frame[1], IVec2::new(201, 200));
    }

    #[tokio::test]
    async fn held_keys_change_between_frames() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut game = Game::with_inbox(
            &DemoConfig::default(),
            Role::Host,
            rx,
            Recorder::default(),
            Keys::RIGHT,
            RecordingRenderer::default(),
        );
        game.run_for_frames(3).await.unwrap();
        *game.input_mut() = Keys::empty();
        game.run_for_frames(2).await.unwrap();
        assert_eq!(game.authority().players()[0], IVec2::new(103, 100));
    }

    #[tokio::test]
    async fn lost_peer_stops_the_loop() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut game = Game::with_inbox(
            &DemoConfig::default(),
            Role::Host,
            rx,
            Recorder::default(),
            Keys::empty(),
            RecordingRenderer::default(),
        );
        drop(tx);
        assert!(game.run(1000).await.is_err());
        assert_eq!(game.renderer().frames, 0);
    }
}
