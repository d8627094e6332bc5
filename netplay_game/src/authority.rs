//! Authority loop.
//!
//! Runs once per frame:
//! 1. Drain every queued inbound message without waiting.
//! 2. Sample local input into at most one unit step.
//! 3. Emit the resulting update.
//!
//! The host owns both positions: a joiner's `MoveRequest` is applied to the
//! joiner's slot and echoed back as an absolute `PositionUpdate`. The joiner
//! never moves anything itself, it only overwrites what the host reports.

use netplay_shared::{
    config::Role,
    input::{movement_delta, InputSource},
    math::IVec2,
    net::{MessageSink, NetMsg, PlayerId},
};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Player positions plus the inbound queue that feeds them.
pub struct Authority {
    role: Role,
    players: [IVec2; 2],
    inbox: mpsc::UnboundedReceiver<NetMsg>,
}

impl Authority {
    pub fn new(role: Role, start: [IVec2; 2], inbox: mpsc::UnboundedReceiver<NetMsg>) -> Self {
        Self {
            role,
            players: start,
            inbox,
        }
    }

    /// Positions indexed by player slot.
    pub fn players(&self) -> &[IVec2; 2] {
        &self.players
    }

    /// Applies one inbound message. Returns the reply to send, if any.
    pub fn apply(&mut self, msg: NetMsg) -> Option<NetMsg> {
        match (self.role, msg) {
            (Role::Host, NetMsg::MoveRequest { dx, dy }) => {
                let slot = &mut self.players[1];
                let Some(next) = slot.checked_add(IVec2::new(dx, dy)) else {
                    warn!(dx, dy, "Move request overflows position, ignoring");
                    return None;
                };
                *slot = next;
                Some(NetMsg::position_update(PlayerId::JOINER, next))
            }
            (Role::Join, NetMsg::PositionUpdate { player_id, x, y }) => {
                match player_id.slot() {
                    Some(slot) => self.players[slot] = IVec2::new(x, y),
                    None => warn!(?player_id, "Position update for unknown player"),
                }
                None
            }
            (role, msg) => {
                debug!(%role, ?msg, "Message not meant for this role, ignoring");
                None
            }
        }
    }

    /// Processes everything currently queued and returns the replies.
    ///
    /// Never waits: an empty queue returns immediately. A closed queue means
    /// the relay died, which is fatal.
    pub fn drain(&mut self) -> anyhow::Result<Vec<NetMsg>> {
        let mut replies = Vec::new();
        loop {
            match self.inbox.try_recv() {
                Ok(msg) => replies.extend(self.apply(msg)),
                Err(TryRecvError::Empty) => return Ok(replies),
                Err(TryRecvError::Disconnected) => {
                    anyhow::bail!("connection to peer lost")
                }
            }
        }
    }

    /// Turns a local step into the message announcing it.
    pub fn local_move(&mut self, delta: IVec2) -> Option<NetMsg> {
        if delta.is_zero() {
            return None;
        }
        match self.role {
            Role::Host => {
                let slot = &mut self.players[0];
                let Some(next) = slot.checked_add(delta) else {
                    warn!(dx = delta.x, dy = delta.y, "Local move overflows position, ignoring");
                    return None;
                };
                *slot = next;
                Some(NetMsg::position_update(PlayerId::HOST, next))
            }
            Role::Join => Some(NetMsg::move_request(delta)),
        }
    }

    /// One full frame update.
    pub async fn update<I, S>(&mut self, input: &I, sink: &mut S) -> anyhow::Result<()>
    where
        I: InputSource + ?Sized,
        S: MessageSink + ?Sized,
    {
        for reply in self.drain()? {
            emit(sink, &reply).await;
        }
        if let Some(msg) = self.local_move(movement_delta(input)) {
            emit(sink, &msg).await;
        }
        Ok(())
    }
}

/// Sends are fire-and-forget; a dead peer surfaces through the relay instead.
async fn emit<S: MessageSink + ?Sized>(sink: &mut S, msg: &NetMsg) {
    if let Err(e) = sink.send(msg).await {
        warn!(error = %format!("{e:#}"), ?msg, "Send failed, dropping message");
    }
}
