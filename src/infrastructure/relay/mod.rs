//! Bus relay - fans notifications out between processes
//!
//! Stands in for the OS distributed notification center. Every connected
//! client may subscribe to channels; a posted message is written to every
//! client subscribed to its name, the poster included.

mod peers;

pub use peers::PeerTable;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use super::bus::protocol::{read_frame, RelayFrame};
use super::bus::SocketPath;

/// Lines queued per client before it counts as stalled
pub const OUTBOX_CAPACITY: usize = 256;

/// Relay errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Another relay is already listening on {0}")]
    AlreadyRunning(PathBuf),

    #[error("Failed to bind relay socket: {0}")]
    Bind(#[from] io::Error),
}

/// Relay server bound to a Unix socket
pub struct BusRelay {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
    peers: Arc<Mutex<PeerTable>>,
}

impl BusRelay {
    /// Create a new relay
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
            peers: Arc::new(Mutex::new(PeerTable::new())),
        }
    }

    /// Bind to the socket.
    ///
    /// A leftover socket file is replaced, but a socket that still accepts
    /// connections belongs to a running relay and is left alone.
    pub fn bind(&mut self) -> Result<(), RelayError> {
        if self.socket_path.is_live() {
            return Err(RelayError::AlreadyRunning(
                self.socket_path.path().to_path_buf(),
            ));
        }
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        tracing::info!(socket = %self.socket_path.path().display(), "relay listening");
        Ok(())
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        self.socket_path.path()
    }

    /// Accept and serve clients until the task is dropped
    pub async fn run(&self) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let peers = Arc::clone(&self.peers);
                    tokio::spawn(async move {
                        if let Err(e) = handle_peer(stream, peers).await {
                            tracing::warn!(error = %e, "relay client error");
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "relay accept error");
                }
            }
        }
    }

    /// Remove the socket file if this relay bound it
    pub fn cleanup(&self) {
        if self.listener.is_some() {
            let _ = self.socket_path.cleanup();
        }
    }
}

impl Drop for BusRelay {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn lock_peers(peers: &Mutex<PeerTable>) -> MutexGuard<'_, PeerTable> {
    peers.lock().unwrap_or_else(|e| e.into_inner())
}

/// Serve one client until it disconnects
async fn handle_peer(stream: UnixStream, peers: Arc<Mutex<PeerTable>>) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let (tx, mut rx) = mpsc::channel::<String>(OUTBOX_CAPACITY);
    let id = lock_peers(&peers).add(tx);
    tracing::debug!(peer = id, "relay client connected");

    let writer_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if writer.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let mut reader = BufReader::new(reader);
    let result = loop {
        match read_frame(&mut reader).await {
            Ok(Some(line)) => match serde_json::from_str::<RelayFrame>(&line) {
                Ok(frame) => {
                    let mut table = lock_peers(&peers);
                    let delivered = table.apply(id, frame);
                    tracing::trace!(peer = id, delivered, "relay frame applied");
                    if !table.contains(id) {
                        break Ok(());
                    }
                }
                Err(e) => tracing::warn!(peer = id, error = %e, "dropping malformed relay frame"),
            },
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    // A peer evicted for not draining its outbox may be stuck mid-write
    let evicted = {
        let mut table = lock_peers(&peers);
        let evicted = !table.contains(id);
        table.remove(id);
        evicted
    };
    if evicted {
        writer_task.abort();
    } else {
        // Dropping the outbox sender ends the writer task
        let _ = writer_task.await;
    }
    tracing::debug!(peer = id, "relay client disconnected");

    result
}
