// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Chat message record.
//!
//! Packs a chat line into a fixed 65-byte record and reads it back through
//! a serde struct. Transport is left to the caller.
//!
//! Run with:
//! ```bash
//! cargo run --example chat_message -- alice "hello there"
//! ```

use packrec::{Codec, SchemaBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    name: Vec<u8>,
    ip: Vec<u8>,
    message: Vec<u8>,
}

#[derive(Serialize)]
struct Outgoing<'a> {
    name: &'a str,
    ip: &'a str,
    message: &'a str,
}

fn trimmed(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn main() -> packrec::Result<()> {
    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "anonymous".to_string());
    let message = args.next().unwrap_or_else(|| "Hello World!".to_string());

    let codec = Codec::new(
        SchemaBuilder::new("ChatMessage")
            .fixed_bytes("name", 0, 18)
            .fixed_bytes("ip", 1, 15)
            .fixed_bytes("message", 2, 32)
            .build()?,
    );
    println!(
        "{}: {} bytes, format {}",
        codec.layout().name(),
        codec.size(),
        codec.layout().format_string()
    );

    let packed = codec.pack_struct(&Outgoing {
        name: &name,
        ip: "127.0.0.1",
        message: &message,
    })?;
    println!("packed: {:02x?}", packed);

    let received: ChatMessage = codec.unpack_struct(&packed)?;
    println!(
        "[{}@{}] {}",
        trimmed(&received.name),
        trimmed(&received.ip),
        trimmed(&received.message)
    );
    Ok(())
}
