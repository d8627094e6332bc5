//! Demo binary.
//!
//! Usage:
//!   netplay host <address> [--config demo.json] [--frame-hz 60]
//!   netplay join <address> [--config demo.json] [--frame-hz 60]
//!
//! The host listens on `<address>` and accepts a single client; join dials it.
//! With no graphics backend, keys are typed on stdin (one line per frame,
//! e.g. `left` or `up right`) and player positions are logged when they move.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use netplay_game::{
    headless::{ConsoleInput, TraceRenderer},
    Game, Session,
};
use netplay_shared::config::{DemoConfig, Role};
use tracing::{error, info};

#[derive(Debug, PartialEq)]
struct Args {
    role: Role,
    addr: String,
    config: Option<PathBuf>,
    frame_hz: Option<u32>,
}

/// `None` means the invocation is not usable and usage should be shown.
fn parse_args(args: &[String]) -> Option<Args> {
    if args.len() < 3 {
        return None;
    }
    let role = args[1].parse::<Role>().ok()?;
    let mut parsed = Args {
        role,
        addr: args[2].clone(),
        config: None,
        frame_hz: None,
    };
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--frame-hz" if i + 1 < args.len() => {
                parsed.frame_hz = args[i + 1].parse().ok();
                i += 2;
            }
            _ => i += 1,
        }
    }
    Some(parsed)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    };
    if let Some(hz) = args.frame_hz {
        cfg.frame_hz = hz;
    }
    info!(role = %args.role, addr = %args.addr, frame_hz = cfg.frame_hz, "Starting");

    let session = Session::establish(args.role, &args.addr)
        .await
        .context("establish session")?;

    println!("Type key names (left, right, up, down) and press enter to move one step.");
    println!();

    let mut game = Game::start(session, &cfg, ConsoleInput::spawn(), TraceRenderer::default());
    game.run(cfg.frame_hz).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let raw: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&raw) else {
        let program = raw.first().map(String::as_str).unwrap_or("netplay");
        println!("Usage: '{program} host <address>' or '{program} join <address>'");
        return Ok(());
    };

    if let Err(e) = run(args).await {
        error!(error = %format!("{e:#}"), "Fatal");
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn too_few_arguments_show_usage() {
        assert_eq!(parse_args(&argv("netplay")), None);
        assert_eq!(parse_args(&argv("netplay host")), None);
    }

    #[test]
    fn unknown_role_shows_usage() {
        assert_eq!(parse_args(&argv("netplay watch 127.0.0.1:4000")), None);
    }

    #[test]
    fn role_address_and_flags() {
        let args = parse_args(&argv(
            "netplay join 10.0.0.2:4000 --frame-hz 30 --config demo.json",
        ))
        .unwrap();
        assert_eq!(args.role, Role::Join);
        assert_eq!(args.addr, "10.0.0.2:4000");
        assert_eq!(args.frame_hz, Some(30));
        assert_eq!(args.config, Some(PathBuf::from("demo.json")));
    }

    #[test]
    fn bad_frame_rate_is_ignored() {
        let args = parse_args(&argv("netplay host :4000 --frame-hz fast")).unwrap();
        assert_eq!(args.role, Role::Host);
        assert_eq!(args.frame_hz, None);
    }
}
