//! Configurable limits for bounded scanning.

/// Limits enforced while scanning a datagram.
///
/// A datagram larger than `max_datagram_bytes`, or holding more than
/// `max_packets` packets, ends the scan with
/// [`PacketError::LimitsExceeded`](crate::PacketError::LimitsExceeded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum datagram size in bytes.
    pub max_datagram_bytes: usize,

    /// Maximum number of packets in one datagram.
    pub max_packets: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Largest UDP payload
            max_datagram_bytes: 64 * 1024,

            // A full datagram of 16-byte packets
            max_packets: 4096,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_datagram_bytes: 4096,
            max_packets: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_datagram_bytes: usize::MAX,
            max_packets: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_datagram_bytes, 64 * 1024);
        assert_eq!(limits.max_packets, 4096);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = Limits::for_testing();
        let default_limits = Limits::default();

        assert!(test_limits.max_datagram_bytes < default_limits.max_datagram_bytes);
        assert!(test_limits.max_packets < default_limits.max_packets);
    }

    #[test]
    fn unlimited_limits() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_datagram_bytes, usize::MAX);
        assert_eq!(limits.max_packets, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_packets, 64);
    }
}
