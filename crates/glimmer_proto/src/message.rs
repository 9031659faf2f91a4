//! The four effect messages and their codec.
//!
//! [`EffectMessage`] is the only type that crosses the process boundary.
//! Effect state itself is never transmitted; each side reconstructs it by
//! applying these events in arrival order.

use bytes::Bytes;
use glimmer_world::{CreatureId, EffectName, Position};

use crate::error::ProtoError;
use crate::opcode;
use crate::wire::{MAX_STRING_LEN, WireReader, WireWriter};

/// A single attach or detach event on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectMessage {
    /// Attach `name` to the creature with the given id.
    AttachCreature {
        /// The target creature.
        creature: CreatureId,
        /// The effect to attach.
        name: EffectName,
    },
    /// Detach one occurrence of `name` from the creature with the given id.
    DetachCreature {
        /// The target creature.
        creature: CreatureId,
        /// The effect to detach.
        name: EffectName,
    },
    /// Attach `name` to the tile at `position`.
    AttachPosition {
        /// The effect to attach.
        name: EffectName,
        /// The target tile position.
        position: Position,
    },
    /// Detach one occurrence of `name` from the tile at `position`.
    DetachPosition {
        /// The effect to detach.
        name: EffectName,
        /// The target tile position.
        position: Position,
    },
}

impl EffectMessage {
    /// The wire opcode for this message.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        match self {
            Self::AttachCreature { .. } => opcode::ATTACH_CREATURE_EFFECT,
            Self::DetachCreature { .. } => opcode::DETACH_CREATURE_EFFECT,
            Self::AttachPosition { .. } => opcode::ATTACH_POSITION_EFFECT,
            Self::DetachPosition { .. } => opcode::DETACH_POSITION_EFFECT,
        }
    }

    /// The effect name carried by this message.
    #[must_use]
    pub fn name(&self) -> &EffectName {
        match self {
            Self::AttachCreature { name, .. }
            | Self::DetachCreature { name, .. }
            | Self::AttachPosition { name, .. }
            | Self::DetachPosition { name, .. } => name,
        }
    }

    /// Append this message's wire form to `writer`.
    ///
    /// Creature messages carry `u32 id, string name`; position messages carry
    /// `string name, position`. Field order is part of the wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::StringTooLong`] if the effect name does not fit
    /// the `u16` length prefix. The name is checked before anything is
    /// written, so a failed encode leaves `writer` unchanged.
    pub fn encode_into(&self, writer: &mut WireWriter) -> Result<(), ProtoError> {
        let name_len = self.name().as_str().len();
        if name_len > MAX_STRING_LEN {
            return Err(ProtoError::StringTooLong(name_len));
        }
        writer.write_u8(self.opcode());
        match self {
            Self::AttachCreature { creature, name } | Self::DetachCreature { creature, name } => {
                writer.write_u32(creature.id());
                writer.write_string(name.as_str())?;
            }
            Self::AttachPosition { name, position } | Self::DetachPosition { name, position } => {
                writer.write_string(name.as_str())?;
                writer.write_position(*position);
            }
        }
        Ok(())
    }

    /// Encode this message into a fresh frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::StringTooLong`] if the effect name does not fit
    /// the `u16` length prefix.
    pub fn encode(&self) -> Result<Bytes, ProtoError> {
        let mut writer = WireWriter::new();
        self.encode_into(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Decode one message from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::UnknownOpcode`] without consuming anything if the
    /// next byte is not an effect opcode, and [`ProtoError::Malformed`] if the
    /// buffer is exhausted before the message completes.
    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtoError> {
        let op = reader.peek_u8()?;
        if !opcode::is_effect_opcode(op) {
            return Err(ProtoError::UnknownOpcode(op));
        }
        reader.read_u8()?;

        match op {
            opcode::ATTACH_CREATURE_EFFECT | opcode::DETACH_CREATURE_EFFECT => {
                let creature = CreatureId::from_raw(reader.read_u32()?);
                let name = EffectName::from(reader.read_string()?);
                if op == opcode::ATTACH_CREATURE_EFFECT {
                    Ok(Self::AttachCreature { creature, name })
                } else {
                    Ok(Self::DetachCreature { creature, name })
                }
            }
            _ => {
                let name = EffectName::from(reader.read_string()?);
                let position = reader.read_position()?;
                if op == opcode::ATTACH_POSITION_EFFECT {
                    Ok(Self::AttachPosition { name, position })
                } else {
                    Ok(Self::DetachPosition { name, position })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(message: &EffectMessage) -> EffectMessage {
        let bytes = message.encode().unwrap();
        let mut reader = WireReader::new(&bytes);
        let decoded = EffectMessage::decode(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 0);
        decoded
    }

    #[test]
    fn test_roundtrip_all_variants() {
        let messages = [
            EffectMessage::AttachCreature {
                creature: CreatureId(42),
                name: EffectName::from("smoke"),
            },
            EffectMessage::DetachCreature {
                creature: CreatureId(42),
                name: EffectName::from("smoke"),
            },
            EffectMessage::AttachPosition {
                name: EffectName::from("spark"),
                position: Position::new(100, 200, 7),
            },
            EffectMessage::DetachPosition {
                name: EffectName::from("spark"),
                position: Position::new(100, 200, 7),
            },
        ];
        for message in &messages {
            assert_eq!(&roundtrip(message), message);
        }
    }

    #[test]
    fn test_roundtrip_empty_name_and_boundary_values() {
        let messages = [
            EffectMessage::AttachCreature {
                creature: CreatureId(u32::MAX),
                name: EffectName::from(""),
            },
            EffectMessage::DetachPosition {
                name: EffectName::from(""),
                position: Position::new(u16::MAX, u16::MAX, u8::MAX),
            },
            EffectMessage::AttachPosition {
                name: EffectName::from("spark"),
                position: Position::new(0, 0, 0),
            },
        ];
        for message in &messages {
            assert_eq!(&roundtrip(message), message);
        }
    }

    #[test]
    fn test_attach_creature_wire_layout() {
        let message = EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("smoke"),
        };
        let bytes = message.encode().unwrap();
        let mut expected = vec![0x39, 42, 0, 0, 0, 5, 0];
        expected.extend_from_slice(b"smoke");
        assert_eq!(&bytes[..], &expected[..]);
    }

    #[test]
    fn test_attach_position_wire_layout() {
        let message = EffectMessage::AttachPosition {
            name: EffectName::from("spark"),
            position: Position::new(100, 200, 7),
        };
        let bytes = message.encode().unwrap();
        let mut expected = vec![0x3D, 5, 0];
        expected.extend_from_slice(b"spark");
        expected.extend_from_slice(&[100, 0, 200, 0, 7]);
        assert_eq!(&bytes[..], &expected[..]);
    }

    #[test]
    fn test_unknown_opcode_is_not_consumed() {
        let buf = [0x0B, 0xFF, 0xFF];
        let mut reader = WireReader::new(&buf);
        assert_eq!(
            EffectMessage::decode(&mut reader),
            Err(ProtoError::UnknownOpcode(0x0B))
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_truncated_message_is_malformed() {
        let message = EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("smoke"),
        };
        let bytes = message.encode().unwrap();
        for cut in 1..bytes.len() {
            let mut reader = WireReader::new(&bytes[..cut]);
            assert_eq!(
                EffectMessage::decode(&mut reader),
                Err(ProtoError::Malformed("buffer exhausted")),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_decode_leaves_trailing_bytes() {
        let mut writer = WireWriter::new();
        EffectMessage::DetachCreature {
            creature: CreatureId(7),
            name: EffectName::from("fire"),
        }
        .encode_into(&mut writer)
        .unwrap();
        writer.write_u8(0xAB);
        let bytes = writer.into_bytes();
        let mut reader = WireReader::new(&bytes);
        EffectMessage::decode(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        let mut reader = WireReader::new(&[]);
        assert_eq!(
            EffectMessage::decode(&mut reader),
            Err(ProtoError::Malformed("buffer exhausted"))
        );
    }

    #[test]
    fn test_oversized_name_does_not_encode() {
        let message = EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("x".repeat(MAX_STRING_LEN + 1)),
        };
        assert_eq!(
            message.encode(),
            Err(ProtoError::StringTooLong(MAX_STRING_LEN + 1))
        );
        let mut writer = WireWriter::new();
        assert!(message.encode_into(&mut writer).is_err());
        assert!(writer.is_empty());
    }
}
