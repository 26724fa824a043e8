// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Coordination protocol: message vocabulary and newline-delimited JSON
//! framing over the per-execution stream socket.

pub mod framing;
pub mod message;

pub use framing::{decode, encode, read_message, write_message, ProtocolError};
pub use message::Message;
