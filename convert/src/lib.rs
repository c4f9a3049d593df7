//! Cross-version conversion of CIGI packets and enumerations.
//!
//! A host speaking one CIGI version and an IG speaking another only
//! interoperate if every packet is re-expressed in the receiver's layout.
//! This crate provides the per-direction enumeration tables and a packet
//! converter built on them.
//!
//! # Design Principles
//!
//! - **Explicit refusal** - A value without a counterpart fails with
//!   `NoConversionAvailable`; nothing is silently substituted.
//! - **Whole packets** - A conversion either yields a complete packet in the
//!   target layout or an error.
//! - **Static tables** - One table per direction, one entry per source enumerator, all `static`.
//! - **Pure** - No state, no I/O; the same input always converts the same way.

mod collision;
mod control;
mod entity;
mod environment;
mod packet;
mod query;
mod tables;
mod view;

pub use packet::{convert_all, convert_packet};
pub use tables::*;

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{CigiVersion, ConversionTable};

    #[test]
    fn public_api_exports() {
        let _ = COMPONENT_CLASS_V1_TO_V3.kind();
        let _ = Mapping::<u8>::NoConversion;
        assert_eq!(
            convert_enum(ConversionTable::IgMode, CigiVersion::V3, CigiVersion::V3_3, 1),
            Ok(1)
        );
    }

    #[test]
    fn tables_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Table<wire::IgMode, wire::IgModeLegacy>>();
        assert_send_sync::<Mapping<wire::ComponentClassV3>>();
    }
}
