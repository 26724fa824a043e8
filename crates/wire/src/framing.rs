// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire framing: each [`Message`](crate::Message) is a single JSON object
//! followed by a line feed. Readers consume one line and parse it; writers
//! flush after every write so the peer observes the message immediately.

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::Message;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Serialises a message as a single line of JSON (no trailing newline —
/// callers writing to a stream should use [`write_message`] instead, which
/// appends the line feed and flushes).
pub fn encode(message: &Message) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode(line: &str) -> Result<Message, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}

/// Reads one newline-delimited JSON message from `reader`. Returns `Ok(None)`
/// on clean EOF (peer closed the connection without sending a final
/// message) — this is not an error, callers should exit their loop.
pub async fn read_message<R>(reader: &mut BufReader<R>) -> Result<Option<Message>, ProtocolError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(decode(trimmed)?))
}

/// Writes one message followed by a line feed, then flushes.
pub async fn write_message<W>(writer: &mut W, message: &Message) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = encode(message)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "framing_tests.rs"]
mod tests;
