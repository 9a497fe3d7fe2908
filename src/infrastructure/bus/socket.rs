//! Unix socket client for the bus relay

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::sync::{mpsc, Mutex};

use super::protocol::{encode_line, read_frame, RelayFrame};
use crate::application::ports::{BusError, NotificationBus};
use crate::domain::wire::BusMessage;

const SOCKET_FILE_NAME: &str = "growl-shim.sock";

/// Relay socket path resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(SOCKET_FILE_NAME));
        Self { path }
    }

    /// Use an explicit path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Check whether something accepts connections on the socket
    pub fn is_live(&self) -> bool {
        std::os::unix::net::UnixStream::connect(&self.path).is_ok()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification bus backed by a connection to a running relay
pub struct SocketBus {
    writer: Mutex<OwnedWriteHalf>,
}

impl SocketBus {
    /// Connect to the relay.
    ///
    /// Messages for subscribed channels arrive on the returned receiver; it
    /// closes when the relay goes away.
    pub async fn connect(
        socket_path: SocketPath,
    ) -> Result<(Self, mpsc::UnboundedReceiver<BusMessage>), BusError> {
        let stream = UnixStream::connect(socket_path.path()).await.map_err(|e| {
            BusError::NotConnected(format!("{}: {}", socket_path.path().display(), e))
        })?;
        let (reader, writer) = stream.into_split();

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_messages(reader, tx));

        tracing::debug!(socket = %socket_path.path().display(), "connected to relay");
        let bus = Self {
            writer: Mutex::new(writer),
        };
        Ok((bus, rx))
    }

    async fn send_frame(&self, frame: &RelayFrame) -> Result<(), BusError> {
        let line = encode_line(frame)?;
        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| BusError::SendFailed(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| BusError::SendFailed(e.to_string()))
    }
}

#[async_trait]
impl NotificationBus for SocketBus {
    async fn post(&self, message: BusMessage) -> Result<(), BusError> {
        self.send_frame(&RelayFrame::Post { message }).await
    }

    async fn subscribe(&self, channel: &str) -> Result<(), BusError> {
        self.send_frame(&RelayFrame::Subscribe {
            channel: channel.to_string(),
        })
        .await
    }

    async fn unsubscribe(&self, channel: &str) -> Result<(), BusError> {
        self.send_frame(&RelayFrame::Unsubscribe {
            channel: channel.to_string(),
        })
        .await
    }
}

/// Forward relay lines to the inbound channel until either side closes
async fn read_messages(reader: OwnedReadHalf, tx: mpsc::UnboundedSender<BusMessage>) {
    let mut reader = BufReader::new(reader);
    loop {
        match read_frame(&mut reader).await {
            Ok(Some(line)) => match serde_json::from_str::<BusMessage>(&line) {
                Ok(message) => {
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "dropping malformed relay message"),
            },
            Ok(None) => {
                tracing::debug!("relay closed the connection");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "relay read failed");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_uses_xdg_runtime_dir() {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("growl-shim.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("growl-shim.sock"));

        let socket_path = SocketPath::new();
        assert_eq!(socket_path.path(), path.as_path());
    }

    #[test]
    fn socket_path_from_explicit_path() {
        let socket_path = SocketPath::from_path("/tmp/custom.sock");
        assert_eq!(socket_path.path(), Path::new("/tmp/custom.sock"));
    }

    #[tokio::test]
    async fn connect_to_missing_socket_fails() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = SocketPath::from_path(dir.path().join("missing.sock"));

        let result = SocketBus::connect(socket_path).await;
        assert!(matches!(result, Err(BusError::NotConnected(_))));
    }
}
