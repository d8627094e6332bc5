//! `netplay_game`
//!
//! Both roles of the demo, sharing one process type:
//! - Session setup (host accepts exactly one peer, join dials it)
//! - Inbound relay task feeding a typed queue
//! - Per-frame authority loop (drain, local input, emit)
//! - Frame driver and headless input/render collaborators
//!
//! Networking model:
//! - TCP only; one connection for the lifetime of the process.
//! - The host is authoritative for both player positions.

pub mod authority;
pub mod game;
pub mod headless;
pub mod relay;
pub mod session;

pub use authority::Authority;
pub use game::Game;
pub use session::Session;
