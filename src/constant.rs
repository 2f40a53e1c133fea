bitflags::bitflags! {
    /// Client capability flags sent in the first four bytes of the handshake response
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u32 {
        const CLIENT_LONG_PASSWORD = 0x00000001;
        const CLIENT_FOUND_ROWS = 0x00000002;
        const CLIENT_LONG_FLAG = 0x00000004;
        const CLIENT_CONNECT_WITH_DB = 0x00000008;
        const CLIENT_NO_SCHEMA = 0x00000010;
        const CLIENT_COMPRESS = 0x00000020;
        const CLIENT_ODBC = 0x00000040;
        const CLIENT_LOCAL_FILES = 0x00000080;
        const CLIENT_IGNORE_SPACE = 0x00000100;
        const CLIENT_PROTOCOL_41 = 0x00000200;
        const CLIENT_INTERACTIVE = 0x00000400;
        const CLIENT_SSL = 0x00000800;
        const CLIENT_IGNORE_SIGPIPE = 0x00001000;
        const CLIENT_TRANSACTIONS = 0x00002000;
        const CLIENT_RESERVED = 0x00004000;
        /// Formerly CLIENT_RESERVED2; 4.1 authentication with a length-prefixed auth response
        const CLIENT_SECURE_CONNECTION = 0x00008000;
        const CLIENT_MULTI_STATEMENTS = 0x00010000;
        const CLIENT_MULTI_RESULTS = 0x00020000;
        const CLIENT_PS_MULTI_RESULTS = 0x00040000;
        const CLIENT_PLUGIN_AUTH = 0x00080000;
        const CLIENT_CONNECT_ATTRS = 0x00100000;
        const CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA = 0x00200000;
        const CLIENT_CAN_HANDLE_EXPIRED_PASSWORDS = 0x00400000;
        const CLIENT_SESSION_TRACK = 0x00800000;
        const CLIENT_DEPRECATE_EOF = 0x01000000;
        const CLIENT_OPTIONAL_RESULTSET_METADATA = 0x02000000;
        const CLIENT_ZSTD_COMPRESSION_ALGORITHM = 0x04000000;
        const CLIENT_QUERY_ATTRIBUTES = 0x08000000;
        const CLIENT_MULTI_FACTOR_AUTHENTICATION = 0x10000000;
        const CLIENT_CAPABILITY_EXTENSION = 0x20000000;
        const CLIENT_SSL_VERIFY_SERVER_CERT = 0x40000000;
        const CLIENT_REMEMBER_OPTIONS = 0x80000000;
    }
}

impl CapabilityFlags {
    /// Interpret a raw wire value. Every bit is kept, including ones this crate
    /// has no name for.
    pub const fn from_wire(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    pub const fn is_protocol_41(&self) -> bool {
        self.contains(Self::CLIENT_PROTOCOL_41)
    }

    pub const fn is_secure_connection(&self) -> bool {
        self.contains(Self::CLIENT_SECURE_CONNECTION)
    }

    pub const fn is_plugin_auth(&self) -> bool {
        self.contains(Self::CLIENT_PLUGIN_AUTH)
    }

    pub const fn is_plugin_auth_lenenc(&self) -> bool {
        self.contains(Self::CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA)
    }

    pub const fn is_connect_with_db(&self) -> bool {
        self.contains(Self::CLIENT_CONNECT_WITH_DB)
    }

    pub const fn is_connect_attrs(&self) -> bool {
        self.contains(Self::CLIENT_CONNECT_ATTRS)
    }
}

/// Flags a modern 4.1+ client typically sends.
pub const CAPABILITIES_MODERN_CLIENT: CapabilityFlags = CapabilityFlags::CLIENT_LONG_PASSWORD
    .union(CapabilityFlags::CLIENT_LONG_FLAG)
    .union(CapabilityFlags::CLIENT_PROTOCOL_41)
    .union(CapabilityFlags::CLIENT_TRANSACTIONS)
    .union(CapabilityFlags::CLIENT_SECURE_CONNECTION)
    .union(CapabilityFlags::CLIENT_MULTI_RESULTS)
    .union(CapabilityFlags::CLIENT_PLUGIN_AUTH)
    .union(CapabilityFlags::CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA);

/// utf8_general_ci
pub const UTF8_GENERAL_CI: u8 = 33;

/// utf8mb4_general_ci
pub const UTF8MB4_GENERAL_CI: u8 = 45;

/// Default `max_packet_size` sent by most connectors (16 MiB)
pub const DEFAULT_MAX_PACKET_SIZE: u32 = 16777216;
