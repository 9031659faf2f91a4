//! Protocol-layer error types.

use thiserror::Error;

/// Errors while encoding or decoding an effect message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtoError {
    /// The buffer ran out, or a field could not be read, before the message
    /// completed. The surrounding frame is assumed intact; only this message
    /// is lost.
    #[error("malformed message: {0}")]
    Malformed(&'static str),

    /// The opcode does not belong to the attached-effects extension. The
    /// reader is left positioned on the opcode byte so the enclosing dispatch
    /// can consume it.
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),

    /// A string is longer than the `u16` length prefix can describe. Only
    /// encoding can hit this; decoded strings are bounded by their prefix.
    #[error("string of {0} bytes does not fit the u16 length prefix")]
    StringTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        assert_eq!(
            ProtoError::Malformed("buffer exhausted").to_string(),
            "malformed message: buffer exhausted"
        );
        assert_eq!(
            ProtoError::UnknownOpcode(0x0B).to_string(),
            "unknown opcode 0x0B"
        );
        assert_eq!(
            ProtoError::StringTooLong(70000).to_string(),
            "string of 70000 bytes does not fit the u16 length prefix"
        );
    }
}
