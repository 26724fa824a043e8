// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tees a child process's stdout/stderr: forwards it live to the invoking
//! terminal while simultaneously accumulating it into a buffer, so a
//! failing run can surface the full captured output in its error without
//! losing the live-streaming UX the original tool gave users.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Reads `source` line by line, printing each line to `print_to` (stdout or
/// stderr) when `print_output` is set, and always appending it to the
/// returned buffer. Runs until EOF.
pub async fn tee<R>(source: R, print_output: bool, to_stderr: bool) -> Arc<Mutex<String>>
where
    R: AsyncRead + Unpin,
{
    let buffer = Arc::new(Mutex::new(String::new()));
    let mut reader = BufReader::new(source).lines();
    while let Ok(Some(line)) = reader.next_line().await {
        if print_output {
            if to_stderr {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
        let mut buf = buffer.lock();
        buf.push_str(&line);
        buf.push('\n');
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn captures_every_line() {
        let source = Cursor::new(b"one\ntwo\nthree\n".to_vec());
        let buf = tee(source, false, false).await;
        assert_eq!(buf.lock().as_str(), "one\ntwo\nthree\n");
    }
}
