//! Inspection and conversion tools for CIGI datagrams.
//!
//! This crate provides the library half of the `cigi-tools` binary:
//!
//! - Load captured datagrams, raw or as hex text
//! - Split a datagram into packets and report offsets, ids and sizes
//! - Re-encode a datagram for another CIGI version
//! - List a version's packet catalog
//!
//! # Design Principles
//!
//! - **Never give up early** - Inspection reports every packet it could scan,
//!   then the error that stopped it.
//! - **Same code path** - Conversion goes through the scanner, `convert` and
//!   `MessageBuilder` exactly as a host would.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use wire::{CigiMessage, CigiVersion, Limits, MessageBuilder, Packet, PacketKind};

/// Parses a version as written on the command line: `1`, `2`, `3`, `3.0`
/// to `3.3`.
pub fn parse_version(text: &str) -> Result<CigiVersion, String> {
    let (major, minor) = match text.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (text, "0"),
    };
    let major = major
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("invalid major version `{text}`"))?;
    let minor = minor
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("invalid minor version `{text}`"))?;
    CigiVersion::from_parts(major, minor)
        .ok_or_else(|| format!("unsupported CIGI version `{text}`"))
}

/// Parses hex text: whitespace, commas and `0x` prefixes are ignored.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(|token| token.trim_start_matches("0x").trim_start_matches("0X"))
        .collect();
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        bail!("invalid hex digit `{bad}`");
    }
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits ({})", digits.len());
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte `{}`", &digits[i..i + 2]))
        })
        .collect()
}

/// Reads a datagram file. `.hex` and `.txt` files hold hex text; anything
/// else is raw bytes.
pub fn load_datagram(path: &Path) -> Result<Vec<u8>> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("hex") || ext.eq_ignore_ascii_case("txt"));
    if is_text {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read hex datagram {}", path.display()))?;
        parse_hex(&text).with_context(|| format!("parse hex datagram {}", path.display()))
    } else {
        fs::read(path).with_context(|| format!("read datagram {}", path.display()))
    }
}

/// One scanned packet.
#[derive(Debug, Clone, Serialize)]
pub struct PacketSummary {
    pub offset: usize,
    pub id: u8,
    pub kind: PacketKind,
    pub size: usize,
    /// Earliest version that carries the packet unchanged.
    pub version: CigiVersion,
    pub packet: Packet,
}

/// Result of scanning one datagram.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub version: CigiVersion,
    pub datagram_len: usize,
    pub packets: Vec<PacketSummary>,
    /// Error that ended the scan early, with the offset it occurred at.
    pub error: Option<ScanFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub offset: usize,
    pub message: String,
}

/// Scans `bytes` as a `version` datagram.
///
/// Never fails: a malformed packet ends the report with [`ScanFailure`],
/// keeping the packets scanned before it.
pub fn inspect_datagram(bytes: &[u8], version: CigiVersion, limits: &Limits) -> InspectReport {
    let mut scanner = wire::scan_with_limits(bytes, version, limits);
    let mut packets = Vec::new();
    let mut error = None;
    let mut offset = scanner.position();
    while let Some(result) = scanner.next() {
        match result {
            Ok(packet) => packets.push(PacketSummary {
                offset,
                id: packet.packet_id(),
                kind: packet.kind(),
                size: scanner.position() - offset,
                version: packet.version(),
                packet,
            }),
            Err(err) => {
                tracing::debug!(offset, %err, "scan stopped");
                error = Some(ScanFailure {
                    offset,
                    message: err.to_string(),
                });
            }
        }
        offset = scanner.position();
    }
    let trailing = bytes.len().saturating_sub(scanner.position());
    if error.is_none() && trailing > 0 {
        tracing::warn!(trailing, "trailing bytes after last packet");
    }
    InspectReport {
        version,
        datagram_len: bytes.len(),
        packets,
        error,
    }
}

pub fn format_report_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} datagram: {} bytes, {} packets",
        report.version,
        report.datagram_len,
        report.packets.len()
    );
    for summary in &report.packets {
        let _ = writeln!(
            out,
            "  @{:<5} id {:<3} {:<36} {:>3} bytes  ({})",
            summary.offset, summary.id, summary.kind, summary.size, summary.version
        );
    }
    if let Some(failure) = &report.error {
        let _ = writeln!(out, "  error at offset {}: {}", failure.offset, failure.message);
    }
    out
}

/// Re-encodes every packet of a `from` datagram for `to`.
pub fn convert_datagram(
    bytes: &[u8],
    from: CigiVersion,
    to: CigiVersion,
    limits: &Limits,
) -> Result<Vec<u8>> {
    let packets: Vec<Packet> = wire::scan_with_limits(bytes, from, limits)
        .collect::<Result<_, _>>()
        .with_context(|| format!("scan {from} datagram"))?;
    let mut builder = MessageBuilder::with_limits(to, limits.clone());
    for (index, packet) in packets.iter().enumerate() {
        let converted = convert::convert_packet(packet, to)
            .with_context(|| format!("convert packet {index} ({}) to {to}", packet.kind()))?;
        builder
            .push(&converted)
            .with_context(|| format!("encode packet {index} ({})", converted.kind()))?;
    }
    tracing::debug!(packets = packets.len(), bytes = builder.len(), "converted datagram");
    Ok(builder.finish())
}

/// One catalog entry, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    pub id: u8,
    pub kind: PacketKind,
    pub layout: CigiVersion,
    pub size: String,
}

pub fn catalog_rows(version: CigiVersion) -> Vec<CatalogRow> {
    let mut rows: Vec<CatalogRow> = wire::catalog(version)
        .entries()
        .map(|spec| CatalogRow {
            id: spec.id(),
            kind: spec.kind(),
            layout: spec.layout(),
            size: spec.size().to_string(),
        })
        .collect();
    rows.sort_by_key(|row| row.id);
    rows
}
