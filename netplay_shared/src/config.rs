//! Configuration system.
//!
//! The role and address come from the command line; everything else has a
//! default and may be overridden from a JSON file.

use std::{fmt, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    math::IVec2,
    render::{WindowSpec, SCREEN_HEIGHT, SCREEN_WIDTH},
};

/// Which side of the connection this process is. Fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Listens, accepts one peer, and owns both positions.
    Host,
    /// Dials the host and follows its positions.
    Join,
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Role::Host),
            "join" => Ok(Role::Join),
            other => anyhow::bail!("unknown role {other:?}, expected `host` or `join`"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => f.write_str("host"),
            Role::Join => f.write_str("join"),
        }
    }
}

/// Tunables shared by both roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Frames per second of the update/draw cycle.
    #[serde(default = "default_frame_hz")]
    pub frame_hz: u32,
    /// Initial position of the host's player.
    #[serde(default = "default_host_start")]
    pub host_start: IVec2,
    /// Initial position of the joiner's player.
    #[serde(default = "default_join_start")]
    pub join_start: IVec2,
    /// Window size as a multiple of the logical screen.
    #[serde(default = "default_window_scale")]
    pub window_scale: u32,
}

fn default_frame_hz() -> u32 {
    60
}

fn default_host_start() -> IVec2 {
    IVec2::new(100, 100)
}

fn default_join_start() -> IVec2 {
    IVec2::new(200, 200)
}

fn default_window_scale() -> u32 {
    2
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frame_hz: default_frame_hz(),
            host_start: default_host_start(),
            join_start: default_join_start(),
            window_scale: default_window_scale(),
        }
    }
}

impl DemoConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Starting positions, indexed by player slot.
    pub fn start_positions(&self) -> [IVec2; 2] {
        [self.host_start, self.join_start]
    }

    pub fn window(&self, role: Role) -> WindowSpec {
        let title = match role {
            Role::Host => "Multiplayer Server",
            Role::Join => "Multiplayer Client",
        };
        WindowSpec {
            title: title.to_string(),
            width: SCREEN_WIDTH * self.window_scale,
            height: SCREEN_HEIGHT * self.window_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = DemoConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg.frame_hz, 60);
        assert_eq!(
            cfg.start_positions(),
            [IVec2::new(100, 100), IVec2::new(200, 200)]
        );
    }

    #[test]
    fn partial_override() {
        let cfg = DemoConfig::from_json_str(r#"{"frame_hz":30,"join_start":{"x":5,"y":6}}"#)
            .unwrap();
        assert_eq!(cfg.frame_hz, 30);
        assert_eq!(cfg.host_start, IVec2::new(100, 100));
        assert_eq!(cfg.join_start, IVec2::new(5, 6));
    }

    #[test]
    fn role_parsing() {
        assert_eq!("host".parse::<Role>().unwrap(), Role::Host);
        assert_eq!("join".parse::<Role>().unwrap(), Role::Join);
        assert!("spectate".parse::<Role>().is_err());
    }

    #[test]
    fn window_is_scaled_and_titled_per_role() {
        let cfg = DemoConfig::default();
        let w = cfg.window(Role::Host);
        assert_eq!((w.width, w.height), (640, 480));
        assert_eq!(w.title, "Multiplayer Server");
        assert_eq!(cfg.window(Role::Join).title, "Multiplayer Client");
    }
}
