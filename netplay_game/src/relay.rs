//! Inbound relay.
//!
//! Blocks on the network so the frame loop never has to. Messages reach the
//! queue in wire order; the first read or decode error ends the relay, and
//! the closed queue is what the frame loop treats as fatal.

use netplay_shared::net::{FrameReader, NetMsg};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, trace};

/// Spawns the relay task and returns the queue it feeds.
pub fn spawn_relay(
    reader: FrameReader,
) -> (mpsc::UnboundedReceiver<NetMsg>, JoinHandle<anyhow::Result<()>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_relay(reader, tx));
    (rx, handle)
}

/// Forwards decoded messages until the stream fails or nobody is listening.
pub async fn run_relay(
    mut reader: FrameReader,
    tx: mpsc::UnboundedSender<NetMsg>,
) -> anyhow::Result<()> {
    loop {
        let msg = match reader.recv().await {
            Ok(msg) => msg,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Inbound stream failed");
                return Err(e);
            }
        };
        trace!(?msg, "Inbound message");
        if tx.send(msg).is_err() {
            debug!("Frame loop gone, stopping relay");
            return Ok(());
        }
    }
}
