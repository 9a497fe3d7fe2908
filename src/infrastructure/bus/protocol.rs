//! Relay wire protocol
//!
//! Newline-delimited JSON. Clients send [`RelayFrame`]s; the relay answers
//! with one [`BusMessage`] per line for every delivered message.

use std::io;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::domain::wire::BusMessage;

/// Longest accepted line, newline excluded. Leaves room for base64 icons.
pub const MAX_FRAME_LEN: usize = 4 * 1024 * 1024;

/// Client to relay frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum RelayFrame {
    Post { message: BusMessage },
    Subscribe { channel: String },
    Unsubscribe { channel: String },
}

/// Serialize a value as one protocol line, including the trailing newline
pub fn encode_line<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    Ok(line)
}

/// Read one line of at most [`MAX_FRAME_LEN`] bytes.
///
/// Returns `None` at end of stream. A longer line is an `InvalidData` error;
/// the connection should be dropped since the stream is no longer framed.
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    read_frame_limited(reader, MAX_FRAME_LEN).await
}

async fn read_frame_limited<R>(reader: &mut R, max_len: usize) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let read = (&mut *reader)
        .take(max_len as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await?;
    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if buf.len() > max_len {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("relay frame longer than {} bytes", max_len),
        ));
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
