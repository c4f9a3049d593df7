//! CIGI protocol versions with distinct wire layouts.

use std::fmt;

/// A CIGI version whose packets this crate can encode and decode.
///
/// Versions are ordered oldest first. CIGI 3.1 shares every layout with 3.0
/// and is represented by [`CigiVersion::V3`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CigiVersion {
    /// CIGI 1.x.
    V1,
    /// CIGI 2.x.
    V2,
    /// CIGI 3.0 and 3.1.
    V3,
    /// CIGI 3.2.
    V3_2,
    /// CIGI 3.3.
    V3_3,
}

impl CigiVersion {
    /// Every supported version, oldest first.
    pub const ALL: [Self; 5] = [Self::V1, Self::V2, Self::V3, Self::V3_2, Self::V3_3];

    /// Resolves a major/minor pair as carried by IG Control and Start Of Frame.
    ///
    /// Minor versions of CIGI 1 and 2 never changed a layout and are ignored.
    #[must_use]
    pub const fn from_parts(major: u8, minor: u8) -> Option<Self> {
        match (major, minor) {
            (1, _) => Some(Self::V1),
            (2, _) => Some(Self::V2),
            (3, 0 | 1) => Some(Self::V3),
            (3, 2) => Some(Self::V3_2),
            (3, 3) => Some(Self::V3_3),
            _ => None,
        }
    }

    #[must_use]
    pub const fn major(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 | Self::V3_2 | Self::V3_3 => 3,
        }
    }

    #[must_use]
    pub const fn minor(self) -> u8 {
        match self {
            Self::V1 | Self::V2 | Self::V3 => 0,
            Self::V3_2 => 2,
            Self::V3_3 => 3,
        }
    }

    /// Returns `true` for CIGI 1 and 2.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        self.major() < 3
    }
}

impl fmt::Display for CigiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CIGI {}.{}", self.major(), self.minor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_ordered() {
        assert!(CigiVersion::V1 < CigiVersion::V2);
        assert!(CigiVersion::V3 < CigiVersion::V3_2);
        assert!(CigiVersion::V3_2 < CigiVersion::V3_3);
        let mut sorted = CigiVersion::ALL;
        sorted.sort();
        assert_eq!(sorted, CigiVersion::ALL);
    }

    #[test]
    fn from_parts_maps_3_1_to_3_0() {
        assert_eq!(CigiVersion::from_parts(3, 1), Some(CigiVersion::V3));
        assert_eq!(CigiVersion::from_parts(3, 0), Some(CigiVersion::V3));
        assert_eq!(CigiVersion::from_parts(2, 4), Some(CigiVersion::V2));
        assert_eq!(CigiVersion::from_parts(3, 4), None);
        assert_eq!(CigiVersion::from_parts(4, 0), None);
    }

    #[test]
    fn parts_roundtrip() {
        for version in CigiVersion::ALL {
            assert_eq!(
                CigiVersion::from_parts(version.major(), version.minor()),
                Some(version)
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(CigiVersion::V3_2.to_string(), "CIGI 3.2");
        assert_eq!(CigiVersion::V1.to_string(), "CIGI 1.0");
    }
}
