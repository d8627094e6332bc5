//! Transport session.
//!
//! Owns the single connection to the peer until the game starts, at which
//! point it is split: the read half goes to the relay task and the write half
//! to the frame loop.

use std::net::SocketAddr;

use anyhow::Context;
use netplay_shared::{
    config::Role,
    net::{FrameWriter, NetMsg, ReliableConn, ReliableListener},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::info;

use crate::relay::spawn_relay;

/// One established connection plus the role this process plays on it.
#[derive(Debug)]
pub struct Session {
    role: Role,
    conn: ReliableConn,
    peer: SocketAddr,
}

impl Session {
    /// Listens or dials depending on `role`.
    pub async fn establish(role: Role, addr: &str) -> anyhow::Result<Self> {
        match role {
            Role::Host => Self::host(addr).await,
            Role::Join => Self::join(addr).await,
        }
    }

    /// Binds `addr` and waits for the single peer.
    pub async fn host(addr: &str) -> anyhow::Result<Self> {
        let listener = ReliableListener::bind(addr).await?;
        info!(local = %listener.local_addr()?, "Waiting for a client");
        Self::accept(listener).await
    }

    /// Accepts on an already bound listener. Useful when binding to port 0.
    pub async fn accept(listener: ReliableListener) -> anyhow::Result<Self> {
        let (conn, peer) = listener.accept().await?;
        info!(%peer, "client connected");
        Ok(Self {
            role: Role::Host,
            conn,
            peer,
        })
    }

    /// Dials the host at `addr`.
    pub async fn join(addr: &str) -> anyhow::Result<Self> {
        let conn = ReliableConn::connect(addr).await?;
        let peer = conn.peer_addr().context("peer addr")?;
        info!(%peer, "connected to server");
        Ok(Self {
            role: Role::Join,
            conn,
            peer,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Starts the inbound relay and hands back the outbound writer and the
    /// queue it fills.
    pub fn start(
        self,
    ) -> (
        FrameWriter,
        mpsc::UnboundedReceiver<NetMsg>,
        JoinHandle<anyhow::Result<()>>,
    ) {
        let (reader, writer) = self.conn.into_split();
        let (inbox, relay) = spawn_relay(reader);
        (writer, inbox, relay)
    }
}
