//! IG-originated notifications and text messages.

use crate::body::{padded_text_len, PacketBody, PacketReader, PacketWriter};
use crate::error::PacketResult;
use crate::header::PacketSize;
use crate::ids::{v2, v3};

/// Animation Stop Notification (CIGI 3): an entity's animation finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationStopNotification {
    pub entity_id: u16,
}

impl PacketBody for AnimationStopNotification {
    const SIZE: PacketSize = PacketSize::Fixed(8);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.entity_id)?;
        writer.reserved(4)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        let entity_id = reader.u16()?;
        reader.skip(4)?;
        Ok(Self { entity_id })
    }
}

single_packet!(AnimationStopNotification => v3::ANIMATION_STOP_NOTIFICATION, V3);

/// Event Notification (CIGI 3): an IG-defined event with three data words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventNotification {
    pub event_id: u16,
    pub data: [u32; 3],
}

impl PacketBody for EventNotification {
    const SIZE: PacketSize = PacketSize::Fixed(16);

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.event_id)?;
        writer.words(&self.data)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            event_id: reader.u16()?,
            data: reader.words()?,
        })
    }
}

single_packet!(EventNotification => v3::EVENT_NOTIFICATION, V3);

/// Bytes before the message text.
const MESSAGE_FIXED: usize = 4;

/// Free-form IG text. Laid out identically in CIGI 2 and 3: a message id,
/// then NUL-terminated text padded to a multiple of 8 bytes, at most 104
/// bytes in all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IgMessageText {
    pub message_id: u16,
    pub text: String,
}

impl IgMessageText {
    /// Longest text that still fits the packet.
    pub const MAX_TEXT_LEN: usize = 104 - MESSAGE_FIXED - 1;

    pub fn new(message_id: u16, text: impl Into<String>) -> Self {
        Self {
            message_id,
            text: text.into(),
        }
    }
}

impl PacketBody for IgMessageText {
    const SIZE: PacketSize = PacketSize::Variable { min: 8, max: 104 };

    fn encoded_len(&self) -> usize {
        padded_text_len(MESSAGE_FIXED, &self.text)
    }

    fn write_body(&self, writer: &mut PacketWriter<'_>) -> PacketResult<()> {
        writer.u16(self.message_id)?;
        writer.padded_text("text", &self.text)
    }

    fn read_body(reader: &mut PacketReader<'_>) -> PacketResult<Self> {
        Ok(Self {
            message_id: reader.u16()?,
            text: reader.padded_text()?,
        })
    }
}

packet_family! {
    /// IG Message: diagnostic text from the IG.
    IgMessage {
        V2(IgMessageText) => v2::IG_MESSAGE, V2;
        V3(IgMessageText) => v3::IG_MESSAGE, V3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::decode_body;
    use crate::error::{LengthReason, PacketError};
    use crate::packet::CigiMessage;

    #[test]
    fn ig_message_layout() {
        let message = IgMessage::V3(IgMessageText::new(7, "HELLO"));
        assert_eq!(message.encoded_len(), 16);
        let bytes = message.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[117, 16, 0, 7]);
        assert_eq!(&bytes[4..], b"HELLO\0\0\0\0\0\0\0");
    }

    #[test]
    fn ig_message_ids_per_version() {
        let text = IgMessageText::new(1, "x");
        assert_eq!(IgMessage::V2(text.clone()).packet_id(), 108);
        assert_eq!(IgMessage::V3(text).packet_id(), 117);
    }

    #[test]
    fn empty_text_still_terminated() {
        let bytes = IgMessage::V2(IgMessageText::default()).to_bytes().unwrap();
        assert_eq!(bytes, vec![108, 8, 0, 0, 0, 0, 0, 0]);
        let (decoded, used) = decode_body::<IgMessageText>(108, &bytes).unwrap();
        assert_eq!(decoded, IgMessageText::default());
        assert_eq!(used, 8);
    }

    #[test]
    fn longest_text_fits() {
        let text = "a".repeat(IgMessageText::MAX_TEXT_LEN);
        let message = IgMessage::V3(IgMessageText::new(0, text.clone()));
        assert_eq!(message.encoded_len(), 104);
        let bytes = message.to_bytes().unwrap();
        let (decoded, _) = decode_body::<IgMessageText>(117, &bytes).unwrap();
        assert_eq!(decoded.text, text);

        let too_long = IgMessage::V3(IgMessageText::new(0, format!("{text}a")));
        assert!(matches!(
            too_long.to_bytes(),
            Err(PacketError::MalformedVariableLength {
                reason: LengthReason::ExceedsMaximum { max: 104 },
                ..
            })
        ));
    }

    #[test]
    fn non_utf8_text_is_refused() {
        let mut bytes = vec![0xFFu8; 104];
        bytes[0] = 117;
        bytes[1] = 104;
        bytes[2] = 0;
        bytes[3] = 1;
        bytes[103] = 0;
        assert_eq!(
            decode_body::<IgMessageText>(117, &bytes),
            Err(PacketError::InvalidField {
                packet_id: 117,
                field: "text",
                value: 0xFF
            })
        );
    }

    #[test]
    fn event_notification_words() {
        let packet = EventNotification {
            event_id: 0x0102,
            data: [1, 2, 0xFFFF_FFFF],
        };
        let bytes = packet.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[116, 16, 1, 2]);
        assert_eq!(&bytes[12..], &[0xFF; 4]);
        let (decoded, _) = decode_body::<EventNotification>(116, &bytes).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn animation_stop_reserved_bytes() {
        let mut bytes = AnimationStopNotification { entity_id: 3 }.to_bytes().unwrap();
        assert_eq!(bytes, vec![115, 8, 0, 3, 0, 0, 0, 0]);
        bytes[6] = 0xAA;
        let (decoded, _) = decode_body::<AnimationStopNotification>(115, &bytes).unwrap();
        assert_eq!(decoded.entity_id, 3);
    }
}
