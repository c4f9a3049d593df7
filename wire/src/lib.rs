//! Packet layouts, per-version catalogs and datagram scanning for CIGI.
//!
//! This crate handles the Common Image Generator Interface wire format for
//! CIGI 1, 2, 3.0 (and 3.1), 3.2 and 3.3: packet layouts, the catalog that
//! maps each version's packet ids to layouts, and splitting a datagram into
//! packets. Translating packets between versions lives in the `convert`
//! crate.
//!
//! # Design Principles
//!
//! - **Explicit versions** - Every decode and scan takes the `CigiVersion`;
//!   ids are never resolved without one.
//! - **Bounded decoding** - Declared sizes are checked against the buffer and
//!   the layout before any field is read.
//! - **All or nothing** - A failed encode writes no bytes; a failed decode
//!   returns no partial packet.
//! - **No I/O** - Catalogs are static tables; callers own every buffer.

mod body;
mod catalog;
mod enums;
mod error;
mod header;
mod ids;
mod limits;
mod message;
mod packet;
mod packets;
mod scanner;
mod version;

pub use body::{
    decode_body, decode_body_for, encode_body, padded_text_len, NewerField, PacketBody,
    PacketReader, PacketWriter, TEXT_ALIGNMENT,
};
pub use catalog::{catalog, lookup, Catalog, PacketSpec};
pub use enums::*;
pub use error::{
    ConversionSubject, ConversionTable, LengthReason, LimitKind, PacketError, PacketResult,
};
pub use header::{PacketHeader, PacketSize, BYTE_SWAP_MAGIC, HEADER_SIZE, MAX_PACKET_SIZE};
pub use ids::{v1, v2, v3};
pub use limits::Limits;
pub use message::MessageBuilder;
pub use packet::{CigiMessage, Packet, PacketKind};
pub use packets::*;
pub use scanner::{scan, scan_all, scan_with_limits, Scanner};
pub use version::CigiVersion;
