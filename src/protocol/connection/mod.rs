mod handshake_response;


pub use handshake_response::AuthResponseEncoding;
pub use handshake_response::HandshakeResponse;
pub use handshake_response::HandshakeResponseDecoder;
pub use handshake_response::SCRAMBLE_MARKER;
pub use handshake_response::read_handshake_response;
pub use handshake_response::write_handshake_response;
