//! Server-side decoder for the MySQL `HandshakeResponse41` packet.
//!
//! ```rs
//! let response = read_handshake_response(payload)?;
//! if response.database().is_some() { /* ... */ }
//! ```

pub mod constant;
pub mod error;
mod opts;
pub mod password;
pub mod protocol;

pub use opts::DecodeOpts;
pub use protocol::ByteCursor;
pub use protocol::connection::{
    AuthResponseEncoding, HandshakeResponse, HandshakeResponseDecoder, read_handshake_response,
    write_handshake_response,
};

#[cfg(test)]
mod constant_test;
