//! Protocol opcodes.
//!
//! The four opcode values below are the persisted wire contract shared with
//! every deployed client; they must never be renumbered.

/// Attach a named effect to a creature. Server → Client.
pub const ATTACH_CREATURE_EFFECT: u8 = 0x39;

/// Detach a named effect from a creature. Server → Client.
pub const DETACH_CREATURE_EFFECT: u8 = 0x3A;

/// Attach a named effect to a map tile. Server → Client.
pub const ATTACH_POSITION_EFFECT: u8 = 0x3D;

/// Detach a named effect from a map tile. Server → Client.
pub const DETACH_POSITION_EFFECT: u8 = 0x3E;

/// Returns `true` if `opcode` belongs to the attached-effects extension.
///
/// Opcodes outside this set are owned by the enclosing protocol dispatch and
/// must be left for it to consume.
#[must_use]
pub const fn is_effect_opcode(opcode: u8) -> bool {
    matches!(
        opcode,
        ATTACH_CREATURE_EFFECT
            | DETACH_CREATURE_EFFECT
            | ATTACH_POSITION_EFFECT
            | DETACH_POSITION_EFFECT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values_are_stable() {
        assert_eq!(ATTACH_CREATURE_EFFECT, 0x39);
        assert_eq!(DETACH_CREATURE_EFFECT, 0x3A);
        assert_eq!(ATTACH_POSITION_EFFECT, 0x3D);
        assert_eq!(DETACH_POSITION_EFFECT, 0x3E);
    }

    #[test]
    fn test_is_effect_opcode() {
        assert!(is_effect_opcode(0x39));
        assert!(is_effect_opcode(0x3A));
        assert!(is_effect_opcode(0x3D));
        assert!(is_effect_opcode(0x3E));
        assert!(!is_effect_opcode(0x3B));
        assert!(!is_effect_opcode(0x00));
        assert!(!is_effect_opcode(0xFF));
    }
}
