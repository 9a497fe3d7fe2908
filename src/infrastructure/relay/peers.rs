//! Relay client table and fan-out

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::infrastructure::bus::protocol::{encode_line, RelayFrame};
use crate::domain::wire::BusMessage;

struct Peer {
    channels: HashSet<String>,
    outbox: mpsc::Sender<String>,
}

/// Connected relay clients and their subscriptions
#[derive(Default)]
pub struct PeerTable {
    next_id: u64,
    peers: HashMap<u64, Peer>,
}

impl PeerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client; lines written to `outbox` are sent to it
    pub fn add(&mut self, outbox: mpsc::Sender<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.peers.insert(
            id,
            Peer {
                channels: HashSet::new(),
                outbox,
            },
        );
        id
    }

    pub fn remove(&mut self, id: u64) {
        self.peers.remove(&id);
    }

    pub fn contains(&self, id: u64) -> bool {
        self.peers.contains_key(&id)
    }

    /// Apply a frame from client `id`.
    ///
    /// Returns how many clients a posted message was queued for; `0` for
    /// subscription frames.
    pub fn apply(&mut self, id: u64, frame: RelayFrame) -> usize {
        match frame {
            RelayFrame::Subscribe { channel } => {
                if let Some(peer) = self.peers.get_mut(&id) {
                    peer.channels.insert(channel);
                }
                0
            }
            RelayFrame::Unsubscribe { channel } => {
                if let Some(peer) = self.peers.get_mut(&id) {
                    peer.channels.remove(&channel);
                }
                0
            }
            RelayFrame::Post { message } => self.fan_out(&message),
        }
    }

    /// Queue a message for every subscriber.
    ///
    /// A subscriber whose outbox is full or closed is dropped from the table;
    /// its connection is torn down once its writer sees the closed outbox.
    fn fan_out(&mut self, message: &BusMessage) -> usize {
        let line = match encode_line(message) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(name = %message.name, error = %e, "failed to encode relayed message");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut dropped = Vec::new();
        for (id, peer) in &self.peers {
            if !peer.channels.contains(&message.name) {
                continue;
            }
            match peer.outbox.try_send(line.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(peer = *id, "relay client is not reading, disconnecting");
                    dropped.push(*id);
                }
                Err(TrySendError::Closed(_)) => dropped.push(*id),
            }
        }
        for id in dropped {
            self.peers.remove(&id);
        }

        delivered
    }
}
