//! Assembling outgoing datagrams.

use crate::catalog::{catalog, Catalog};
use crate::error::{LimitKind, PacketError, PacketResult};
use crate::limits::Limits;
use crate::packet::{CigiMessage, Packet};
use crate::version::CigiVersion;

/// Builds one datagram of a single CIGI version.
///
/// Every pushed packet is checked against the version's catalog, so the
/// finished datagram scans back with the same version. A rejected push
/// leaves the datagram unchanged.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    catalog: &'static Catalog,
    limits: Limits,
    buf: Vec<u8>,
    count: usize,
}

impl MessageBuilder {
    #[must_use]
    pub fn new(version: CigiVersion) -> Self {
        Self::with_limits(version, Limits::default())
    }

    #[must_use]
    pub fn with_limits(version: CigiVersion, limits: Limits) -> Self {
        Self {
            catalog: catalog(version),
            limits,
            buf: Vec::new(),
            count: 0,
        }
    }

    #[must_use]
    pub const fn version(&self) -> CigiVersion {
        self.catalog.version()
    }

    /// Appends `packet`, returning its encoded size.
    pub fn push(&mut self, packet: &Packet) -> PacketResult<usize> {
        if self.count >= self.limits.max_packets {
            return Err(PacketError::LimitsExceeded {
                kind: LimitKind::PacketCount,
                limit: self.limits.max_packets,
                actual: self.count + 1,
            });
        }
        let len = packet.encoded_len();
        let total = self.buf.len() + len;
        if total > self.limits.max_datagram_bytes {
            return Err(PacketError::LimitsExceeded {
                kind: LimitKind::DatagramBytes,
                limit: self.limits.max_datagram_bytes,
                actual: total,
            });
        }

        let start = self.buf.len();
        self.buf.resize(total, 0);
        match self.catalog.encode(packet, &mut self.buf[start..]) {
            Ok(written) => {
                self.buf.truncate(start + written);
                self.count += 1;
                Ok(written)
            }
            Err(err) => {
                self.buf.truncate(start);
                Err(err)
            }
        }
    }

    /// Datagram size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn packet_count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Empties the datagram, keeping its allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::{
        AnimationStopNotification, IgControl, IgControlV3_2, StartOfFrame, StartOfFrameV3,
    };
    use crate::scanner::scan_all;

    fn stop(entity_id: u16) -> Packet {
        Packet::from(AnimationStopNotification { entity_id })
    }

    #[test]
    fn pushes_scan_back() {
        let mut builder = MessageBuilder::new(CigiVersion::V3_2);
        assert!(builder.is_empty());
        builder
            .push(&Packet::from(IgControl::V3_2(IgControlV3_2::default())))
            .unwrap();
        builder.push(&stop(4)).unwrap();
        assert_eq!(builder.len(), 32);
        assert_eq!(builder.packet_count(), 2);

        let bytes = builder.finish();
        let packets = scan_all(&bytes, CigiVersion::V3_2).unwrap();
        assert_eq!(packets[1], stop(4));
    }

    #[test]
    fn rejected_push_leaves_datagram_unchanged() {
        let mut builder = MessageBuilder::new(CigiVersion::V3_3);
        builder.push(&stop(1)).unwrap();
        let before = builder.as_bytes().to_vec();

        let err = builder
            .push(&Packet::from(StartOfFrame::V3(StartOfFrameV3::default())))
            .unwrap_err();
        assert!(matches!(err, PacketError::WrongVersion { .. }));
        assert_eq!(builder.as_bytes(), before.as_slice());
        assert_eq!(builder.packet_count(), 1);
    }

    #[test]
    fn legacy_builder_rejects_v3_packets() {
        let mut builder = MessageBuilder::new(CigiVersion::V2);
        assert!(builder.push(&stop(1)).is_err());
        assert!(builder.is_empty());
    }

    #[test]
    fn limits_enforced() {
        let limits = Limits {
            max_datagram_bytes: 20,
            max_packets: 8,
        };
        let mut builder = MessageBuilder::with_limits(CigiVersion::V3, limits);
        builder.push(&stop(1)).unwrap();
        builder.push(&stop(2)).unwrap();
        assert_eq!(
            builder.push(&stop(3)),
            Err(PacketError::LimitsExceeded {
                kind: LimitKind::DatagramBytes,
                limit: 20,
                actual: 24,
            })
        );

        let limits = Limits {
            max_datagram_bytes: 1024,
            max_packets: 1,
        };
        let mut builder = MessageBuilder::with_limits(CigiVersion::V3, limits);
        builder.push(&stop(1)).unwrap();
        assert!(matches!(
            builder.push(&stop(2)),
            Err(PacketError::LimitsExceeded {
                kind: LimitKind::PacketCount,
                ..
            })
        ));
    }

    #[test]
    fn clear_resets() {
        let mut builder = MessageBuilder::new(CigiVersion::V3);
        builder.push(&stop(1)).unwrap();
        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.packet_count(), 0);
        assert_eq!(builder.version(), CigiVersion::V3);
    }
}
