//! Splitting a datagram into packets.

use std::iter::FusedIterator;

use crate::catalog::{catalog, Catalog};
use crate::error::{LimitKind, PacketError, PacketResult};
use crate::header::HEADER_SIZE;
use crate::limits::Limits;
use crate::packet::Packet;
use crate::version::CigiVersion;

/// Iterator over the packets of one datagram.
///
/// Packets are yielded in buffer order. The first error is yielded once
/// and ends the scan; fewer than two trailing bytes end it cleanly.
#[derive(Debug)]
pub struct Scanner<'a> {
    buf: &'a [u8],
    catalog: &'static Catalog,
    limits: Limits,
    position: usize,
    count: usize,
    started: bool,
    done: bool,
}

/// Scans `buf` as a datagram of `version` with default limits.
#[must_use]
pub fn scan(buf: &[u8], version: CigiVersion) -> Scanner<'_> {
    scan_with_limits(buf, version, &Limits::default())
}

/// Scans `buf` as a datagram of `version`.
#[must_use]
pub fn scan_with_limits<'a>(buf: &'a [u8], version: CigiVersion, limits: &Limits) -> Scanner<'a> {
    Scanner {
        buf,
        catalog: catalog(version),
        limits: limits.clone(),
        position: 0,
        count: 0,
        started: false,
        done: false,
    }
}

/// Decodes every packet of `buf`, failing on the first error.
pub fn scan_all(buf: &[u8], version: CigiVersion) -> PacketResult<Vec<Packet>> {
    scan(buf, version).collect()
}

impl Scanner<'_> {
    /// Offset of the next packet.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Packets yielded so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn version(&self) -> CigiVersion {
        self.catalog.version()
    }

    fn fail(&mut self, err: PacketError) -> Option<PacketResult<Packet>> {
        self.done = true;
        Some(Err(err))
    }

    fn check_datagram(&mut self) -> Option<PacketResult<Packet>> {
        self.started = true;
        if self.buf.len() > self.limits.max_datagram_bytes {
            return self.fail(PacketError::LimitsExceeded {
                kind: LimitKind::DatagramBytes,
                limit: self.limits.max_datagram_bytes,
                actual: self.buf.len(),
            });
        }
        None
    }
}

impl Iterator for Scanner<'_> {
    type Item = PacketResult<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            if let Some(err) = self.check_datagram() {
                return Some(err);
            }
        }

        let rest = &self.buf[self.position..];
        if rest.len() < HEADER_SIZE {
            self.done = true;
            return None;
        }
        if self.count >= self.limits.max_packets {
            return self.fail(PacketError::LimitsExceeded {
                kind: LimitKind::PacketCount,
                limit: self.limits.max_packets,
                actual: self.count + 1,
            });
        }

        match self.catalog.decode(rest) {
            Ok((packet, used)) => {
                self.position += used;
                self.count += 1;
                Some(Ok(packet))
            }
            Err(err) => self.fail(err),
        }
    }
}

impl FusedIterator for Scanner<'_> {}
