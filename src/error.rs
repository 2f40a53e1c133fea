use thiserror::Error;

use crate::constant::CapabilityFlags;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The client did not set `CLIENT_PROTOCOL_41`. Pre-4.1 handshakes have a
    /// different layout and are rejected; the connection should be closed.
    #[error("Unsupported protocol: capability flags 0x{:08X} lack CLIENT_PROTOCOL_41", .0.bits())]
    UnsupportedProtocol(CapabilityFlags),

    #[error("Truncated packet: needed {needed} bytes, {remaining} remaining")]
    TruncatedPacket { needed: usize, remaining: usize },

    #[error("Malformed length-encoded integer: invalid marker 0x{0:02X}")]
    MalformedVarint(u8),

    #[error("Malformed length prefix: length {length} exceeds {remaining} remaining bytes")]
    MalformedLengthPrefix { length: u64, remaining: usize },

    #[error("Trailing bytes: {0} bytes left after the handshake response")]
    TrailingBytes(usize),

    /// A NUL-terminated field given to the encoder contains a NUL byte
    #[error("Cannot encode {0}: contains a NUL byte")]
    NulInField(&'static str),

    /// A 1-byte length prefix cannot describe the auth response
    #[error("Cannot encode auth response of {0} bytes with a 1-byte length prefix")]
    AuthResponseTooLong(usize),
}

impl Error {
    /// Whether the error came from malformed or short packet bytes, as opposed
    /// to a protocol the decoder does not speak or a record that cannot be encoded.
    pub fn is_malformed_packet(&self) -> bool {
        matches!(
            self,
            Error::TruncatedPacket { .. }
                | Error::MalformedVarint(_)
                | Error::MalformedLengthPrefix { .. }
                | Error::TrailingBytes(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
