use std::collections::HashMap;

use tracing::{instrument, trace};
use zerocopy::byteorder::little_endian::U32 as U32LE;
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::constant::{CapabilityFlags, DEFAULT_MAX_PACKET_SIZE, UTF8MB4_GENERAL_CI};
use crate::error::{Error, Result};
use crate::opts::DecodeOpts;
use crate::password::SCRAMBLE_LENGTH;
use crate::protocol::cursor::ByteCursor;
use crate::protocol::primitive::*;

/// Non-standard marker some peers put at the start of the reserved bytes to
/// carry a scramble instead of filler.
pub const SCRAMBLE_MARKER: &[u8; 3] = b"x@8";

/// Reserved bytes between the character set and the username
const RESERVED_LEN: usize = 23;

#[derive(Debug, Clone, Copy, FromBytes, KnownLayout, Immutable)]
#[repr(C, packed)]
struct HandshakeResponseFixedFields {
    max_packet_size: U32LE,
    charset: u8,
    reserved_probe: [u8; 3],
}

/// Contents of the 23 reserved bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservedField {
    Filler,
    /// `x@8` followed by `SCRAMBLE_LENGTH` bytes of scramble
    Scramble([u8; SCRAMBLE_LENGTH]),
}

impl ReservedField {
    /// `probe` is the first three reserved bytes, already consumed.
    fn read(probe: &[u8; 3], cursor: &mut ByteCursor<'_>, scramble_marker: bool) -> Result<Self> {
        if scramble_marker && probe == SCRAMBLE_MARKER {
            let scramble = cursor.read_fixed_fields::<[u8; SCRAMBLE_LENGTH]>()?;
            Ok(Self::Scramble(*scramble))
        } else {
            cursor.skip(RESERVED_LEN - probe.len())?;
            Ok(Self::Filler)
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Self::Filler => out.extend_from_slice(&[0u8; RESERVED_LEN]),
            Self::Scramble(scramble) => {
                write_bytes_fix(out, SCRAMBLE_MARKER);
                write_bytes_fix(out, scramble);
            }
        }
    }
}

/// Wire encoding of the auth response, chosen by the client's capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResponseEncoding {
    /// `string<lenenc>` (CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA)
    LengthEncoded,
    /// `int<1>` length followed by the data (CLIENT_SECURE_CONNECTION)
    LengthPrefixed,
    /// `string<NUL>` (pre-4.1 authentication)
    NulTerminated,
}

impl AuthResponseEncoding {
    pub fn negotiate(capabilities: CapabilityFlags) -> Self {
        if capabilities.is_plugin_auth_lenenc() {
            Self::LengthEncoded
        } else if capabilities.is_secure_connection() {
            Self::LengthPrefixed
        } else {
            Self::NulTerminated
        }
    }

    fn read<'a>(self, cursor: &mut ByteCursor<'a>) -> Result<&'a [u8]> {
        match self {
            Self::LengthEncoded => cursor.read_bytes_lenenc(),
            Self::LengthPrefixed => cursor.read_bytes_u8_prefixed(),
            Self::NulTerminated => cursor.read_string_null(),
        }
    }

    /// Reject data this encoding cannot carry without loss
    fn check(self, data: &[u8]) -> Result<()> {
        match self {
            Self::LengthEncoded => Ok(()),
            Self::LengthPrefixed if data.len() > usize::from(u8::MAX) => {
                Err(Error::AuthResponseTooLong(data.len()))
            }
            Self::LengthPrefixed => Ok(()),
            Self::NulTerminated => check_no_nul("auth response", data),
        }
    }

    /// Callers run [`Self::check`] first.
    fn write(self, out: &mut Vec<u8>, data: &[u8]) {
        match self {
            Self::LengthEncoded => write_bytes_lenenc(out, data),
            Self::LengthPrefixed => {
                write_int_1(out, data.len() as u8);
                write_bytes_fix(out, data);
            }
            Self::NulTerminated => write_bytes_null(out, data),
        }
    }
}

/// Handshake response packet sent by client (HandshakeResponse41)
///
/// Decoded records are immutable. The `with_*` methods exist to build a
/// record for [`write_handshake_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeResponse {
    capabilities: CapabilityFlags,
    max_packet_size: u32,
    character_set: u8,
    scramble_extension: Option<[u8; SCRAMBLE_LENGTH]>,
    username: String,
    auth_response: Vec<u8>,
    database: Option<String>,
    plugin_name: Option<String>,
    connect_attributes: Option<HashMap<String, String>>,
}

impl HandshakeResponse {
    pub fn new(
        capabilities: CapabilityFlags,
        username: impl Into<String>,
        auth_response: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            capabilities,
            max_packet_size: DEFAULT_MAX_PACKET_SIZE,
            character_set: UTF8MB4_GENERAL_CI,
            scramble_extension: None,
            username: username.into(),
            auth_response: auth_response.into(),
            database: None,
            plugin_name: None,
            connect_attributes: None,
        }
    }

    pub fn with_max_packet_size(mut self, max_packet_size: u32) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    pub fn with_character_set(mut self, character_set: u8) -> Self {
        self.character_set = character_set;
        self
    }

    pub fn with_scramble_extension(mut self, scramble: [u8; SCRAMBLE_LENGTH]) -> Self {
        self.scramble_extension = Some(scramble);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_plugin_name(mut self, plugin_name: impl Into<String>) -> Self {
        self.plugin_name = Some(plugin_name.into());
        self
    }

    /// Add one attribute, replacing an earlier value for the same key
    pub fn with_connect_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.connect_attributes
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_connect_attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.connect_attributes = Some(attributes);
        self
    }

    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    pub fn max_packet_size(&self) -> u32 {
        self.max_packet_size
    }

    pub fn character_set(&self) -> u8 {
        self.character_set
    }

    /// Scramble carried in the reserved bytes after the `x@8` marker
    pub fn scramble_extension(&self) -> Option<&[u8; SCRAMBLE_LENGTH]> {
        self.scramble_extension.as_ref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn auth_response(&self) -> &[u8] {
        &self.auth_response
    }

    pub fn auth_response_encoding(&self) -> AuthResponseEncoding {
        AuthResponseEncoding::negotiate(self.capabilities)
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn plugin_name(&self) -> Option<&str> {
        self.plugin_name.as_deref()
    }

    pub fn connect_attributes(&self) -> Option<&HashMap<String, String>> {
        self.connect_attributes.as_ref()
    }

    pub fn connect_attribute(&self, key: &str) -> Option<&str> {
        self.connect_attributes
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    /// `program_name` as set by native clients (mysql CLI, Workbench), falling
    /// back to the connector's `_client_name`.
    pub fn program_name(&self) -> Option<&str> {
        self.connect_attribute("program_name")
            .or_else(|| self.connect_attribute("_client_name"))
    }
}

/// Decoder for [`HandshakeResponse`] packet bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct HandshakeResponseDecoder {
    opts: DecodeOpts,
}

impl HandshakeResponseDecoder {
    pub fn new(opts: DecodeOpts) -> Self {
        Self { opts }
    }

    /// Decode one handshake response, advancing `cursor` past it.
    ///
    /// Fails with [`Error::UnsupportedProtocol`] right after the capability
    /// flags if the client does not speak the 4.1 protocol. Optional trailing
    /// fields are read only when their capability is set and bytes remain.
    #[instrument(skip_all)]
    pub fn decode(&self, cursor: &mut ByteCursor<'_>) -> Result<HandshakeResponse> {
        let capabilities = CapabilityFlags::from_wire(cursor.read_int_4()?);
        if !capabilities.is_protocol_41() {
            return Err(Error::UnsupportedProtocol(capabilities));
        }

        let fixed = cursor.read_fixed_fields::<HandshakeResponseFixedFields>()?;
        let max_packet_size = fixed.max_packet_size.get();
        let character_set = fixed.charset;

        let reserved = ReservedField::read(&fixed.reserved_probe, cursor, self.opts.scramble_marker)?;
        let scramble_extension = match reserved {
            ReservedField::Scramble(scramble) => {
                trace!("reserved bytes carry a scramble");
                Some(scramble)
            }
            ReservedField::Filler => {
                trace!("reserved bytes are filler");
                None
            }
        };

        let username = to_text(cursor.read_string_null()?);

        let encoding = AuthResponseEncoding::negotiate(capabilities);
        trace!(?encoding, "reading auth response");
        let auth_response = encoding.read(cursor)?.to_vec();

        let database = if cursor.has_remaining() && capabilities.is_connect_with_db() {
            Some(to_text(cursor.read_string_null()?))
        } else {
            None
        };

        let plugin_name = if cursor.has_remaining() && capabilities.is_plugin_auth() {
            Some(to_text(cursor.read_string_null()?))
        } else {
            None
        };

        let connect_attributes = if cursor.has_remaining() && capabilities.is_connect_attrs() {
            Some(read_connect_attributes(cursor)?)
        } else {
            None
        };

        if cursor.has_remaining() {
            if self.opts.strict {
                return Err(Error::TrailingBytes(cursor.remaining()));
            }
            trace!(remaining = cursor.remaining(), "ignoring trailing bytes");
        }

        Ok(HandshakeResponse {
            capabilities,
            max_packet_size,
            character_set,
            scramble_extension,
            username,
            auth_response,
            database,
            plugin_name,
            connect_attributes,
        })
    }
}

/// Read a handshake response packet body with default options
pub fn read_handshake_response(payload: &[u8]) -> Result<HandshakeResponse> {
    HandshakeResponseDecoder::default().decode(&mut ByteCursor::new(payload))
}

/// Pair count followed by that many (key, value) length-encoded strings
fn read_connect_attributes(cursor: &mut ByteCursor<'_>) -> Result<HashMap<String, String>> {
    let count = cursor.read_int_lenenc()?;

    // each pair takes at least two bytes, so a bogus count cannot reserve more than the packet
    let capacity = usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(cursor.remaining() / 2);
    let mut attributes = HashMap::with_capacity(capacity);

    for _ in 0..count {
        let key = to_text(cursor.read_bytes_lenenc()?);
        let value = to_text(cursor.read_bytes_lenenc()?);
        attributes.insert(key, value);
    }

    Ok(attributes)
}

/// Invalid UTF-8 is replaced rather than rejected
fn to_text(bytes: &[u8]) -> String {
    match simdutf8::basic::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn check_no_nul(field: &'static str, data: &[u8]) -> Result<()> {
    if data.contains(&0) {
        Err(Error::NulInField(field))
    } else {
        Ok(())
    }
}

/// Write handshake response packet body (HandshakeResponse41)
///
/// Optional fields are written only when their capability flag is set. An
/// absent database or plugin name is written as an empty string when a later
/// field follows it, so that the fields after it stay aligned.
///
/// Fails without writing anything if a NUL-terminated field contains a NUL
/// byte, or if the auth response does not fit its 1-byte length prefix.
pub fn write_handshake_response(out: &mut Vec<u8>, response: &HandshakeResponse) -> Result<()> {
    let capabilities = response.capabilities;
    let auth_encoding = response.auth_response_encoding();

    check_no_nul("username", response.username.as_bytes())?;
    auth_encoding.check(&response.auth_response)?;
    if let Some(db) = response.database.as_deref().filter(|_| capabilities.is_connect_with_db()) {
        check_no_nul("database", db.as_bytes())?;
    }
    if let Some(plugin) = response.plugin_name.as_deref().filter(|_| capabilities.is_plugin_auth()) {
        check_no_nul("plugin name", plugin.as_bytes())?;
    }

    // capability flags (4 bytes)
    write_int_4(out, capabilities.bits());

    // max packet size (4 bytes)
    write_int_4(out, response.max_packet_size);

    // charset (1 byte)
    write_int_1(out, response.character_set);

    // reserved (23 bytes)
    let reserved = match response.scramble_extension {
        Some(scramble) => ReservedField::Scramble(scramble),
        None => ReservedField::Filler,
    };
    reserved.write(out);

    // username (null-terminated)
    write_string_null(out, &response.username);

    auth_encoding.write(out, &response.auth_response);

    let attributes = response
        .connect_attributes
        .as_ref()
        .filter(|_| capabilities.is_connect_attrs());
    let plugin_name = response
        .plugin_name
        .as_deref()
        .filter(|_| capabilities.is_plugin_auth());

    if capabilities.is_connect_with_db() {
        match response.database.as_deref() {
            Some(db) => write_string_null(out, db),
            None if plugin_name.is_some() || attributes.is_some() => write_string_null(out, ""),
            None => {}
        }
    }

    if capabilities.is_plugin_auth() {
        match plugin_name {
            Some(plugin) => write_string_null(out, plugin),
            None if attributes.is_some() => write_string_null(out, ""),
            None => {}
        }
    }

    if let Some(attributes) = attributes {
        let mut pairs: Vec<_> = attributes.iter().collect();
        pairs.sort();

        write_int_lenenc(out, pairs.len() as u64);
        for (key, value) in pairs {
            write_string_lenenc(out, key);
            write_string_lenenc(out, value);
        }
    }

    Ok(())
}
