//! Networking primitives.
//!
//! Goals:
//! - One reliable (TCP) stream to exactly one peer.
//! - Length-prefixed frames carrying self-describing JSON values, so either
//!   side can tell message variants apart without an external schema.
//! - Split read/write halves so a relay task can own the reader while the
//!   frame loop owns the writer.

use std::net::SocketAddr;

use anyhow::Context;
use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpListener, TcpStream,
    },
};

use crate::math::IVec2;

/// Upper bound on a single frame payload. Anything larger is a corrupt stream.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Identifies one of the two player slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// The listening peer's player.
    pub const HOST: Self = PlayerId(0);
    /// The connecting peer's player.
    pub const JOINER: Self = PlayerId(1);

    /// Slot index, or `None` when the id names no player.
    pub fn slot(self) -> Option<usize> {
        match self.0 {
            0 | 1 => Some(self.0 as usize),
            _ => None,
        }
    }
}

/// Messages exchanged between host and joiner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NetMsg {
    /// Joiner -> host: move my player by this relative delta.
    MoveRequest { dx: i32, dy: i32 },
    /// Host -> joiner: this player is now exactly here.
    PositionUpdate { player_id: PlayerId, x: i32, y: i32 },
}

impl NetMsg {
    pub fn move_request(delta: IVec2) -> Self {
        NetMsg::MoveRequest {
            dx: delta.x,
            dy: delta.y,
        }
    }

    pub fn position_update(player_id: PlayerId, pos: IVec2) -> Self {
        NetMsg::PositionUpdate {
            player_id,
            x: pos.x,
            y: pos.y,
        }
    }
}

/// Anything the frame loop can hand an outbound message to.
#[async_trait]
pub trait MessageSink: Send {
    async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()>;
}

async fn write_frame<W>(w: &mut W, msg: &NetMsg) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let payload = encode_to_bytes(msg)?;
    let mut buf = BytesMut::with_capacity(4 + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.extend_from_slice(&payload);
    w.write_all(&buf).await.context("tcp write")?;
    Ok(())
}

async fn read_frame<R>(r: &mut R) -> anyhow::Result<NetMsg>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    r.read_exact(&mut len_buf).await.context("tcp read len")?;
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_LEN {
        anyhow::bail!("frame of {len} bytes exceeds limit of {MAX_FRAME_LEN}");
    }
    let mut payload = vec![0u8; len];
    r.read_exact(&mut payload)
        .await
        .context("tcp read payload")?;
    decode_from_bytes(&payload)
}

/// Reliable connection over TCP with length-prefixed frames.
#[derive(Debug)]
pub struct ReliableConn {
    stream: TcpStream,
}

impl ReliableConn {
    pub fn new(stream: TcpStream) -> Self {
        Self { stream }
    }

    /// Dials the host.
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("tcp connect {addr}"))?;
        Ok(Self::new(stream))
    }

    pub async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
        write_frame(&mut self.stream, msg).await
    }

    /// Waits for one complete frame.
    pub async fn recv(&mut self) -> anyhow::Result<NetMsg> {
        read_frame(&mut self.stream).await
    }

    pub fn peer_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.stream.local_addr()?)
    }

    /// Splits into an owned reader and writer.
    pub fn into_split(self) -> (FrameReader, FrameWriter) {
        let (read, write) = self.stream.into_split();
        (FrameReader { read }, FrameWriter { write })
    }
}

/// Read half of a [`ReliableConn`].
#[derive(Debug)]
pub struct FrameReader {
    read: OwnedReadHalf,
}

impl FrameReader {
    pub async fn recv(&mut self) -> anyhow::Result<NetMsg> {
        read_frame(&mut self.read).await
    }
}

/// Write half of a [`ReliableConn`].
#[derive(Debug)]
pub struct FrameWriter {
    write: OwnedWriteHalf,
}

impl FrameWriter {
    pub async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
        write_frame(&mut self.write, msg).await
    }
}

#[async_trait]
impl MessageSink for FrameWriter {
    async fn send(&mut self, msg: &NetMsg) -> anyhow::Result<()> {
        FrameWriter::send(self, msg).await
    }
}

/// TCP listener for the host role.
pub struct ReliableListener {
    listener: TcpListener,
}

impl ReliableListener {
    pub async fn bind(addr: &str) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("tcp bind {addr}"))?;
        Ok(Self { listener })
    }

    /// Accepts the single peer. The listener is consumed, so no second
    /// connection is ever taken.
    pub async fn accept(self) -> anyhow::Result<(ReliableConn, SocketAddr)> {
        let (stream, addr) = self.listener.accept().await.context("tcp accept")?;
        Ok((ReliableConn::new(stream), addr))
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

/// Frame payload encoding: one JSON value per message.
pub fn encode_to_bytes(msg: &NetMsg) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(msg).context("serialize msg")?;
    Ok(Bytes::from(payload))
}

pub fn decode_from_bytes(b: &[u8]) -> anyhow::Result<NetMsg> {
    serde_json::from_slice(b).context("deserialize msg")
}
