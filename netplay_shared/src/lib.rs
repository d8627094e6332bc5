//! `netplay_shared`
//!
//! Libraries used by both the host and the join role.
//!
//! Design goals:
//! - Integer, deterministic positions.
//! - One explicit wire format shared by both peers.
//! - Traits at the collaborator seams (input, rendering, outbound messages).
//! - No `unsafe`.

pub mod config;
pub mod input;
pub mod math;
pub mod net;
pub mod render;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::input::*;
    pub use crate::math::*;
    pub use crate::net::*;
    pub use crate::render::*;
}
