use crate::constant::{CAPABILITIES_MODERN_CLIENT, CapabilityFlags};

#[test]
fn test_capability_bit_assignments() {
    // Published protocol bit positions the decoder branches on
    assert_eq!(CapabilityFlags::CLIENT_CONNECT_WITH_DB.bits(), 1 << 3);
    assert_eq!(CapabilityFlags::CLIENT_PROTOCOL_41.bits(), 1 << 9);
    assert_eq!(CapabilityFlags::CLIENT_SECURE_CONNECTION.bits(), 1 << 15);
    assert_eq!(CapabilityFlags::CLIENT_PLUGIN_AUTH.bits(), 1 << 19);
    assert_eq!(CapabilityFlags::CLIENT_CONNECT_ATTRS.bits(), 1 << 20);
    assert_eq!(
        CapabilityFlags::CLIENT_PLUGIN_AUTH_LENENC_CLIENT_DATA.bits(),
        1 << 21
    );
}

#[test]
fn test_all_bits_are_named() {
    assert_eq!(CapabilityFlags::all().bits(), 0xFFFFFFFF);
}

#[test]
fn test_from_wire_retains_bits() {
    let flags = CapabilityFlags::from_wire(0xFFFF_FFFF);
    assert_eq!(flags.bits(), 0xFFFF_FFFF);

    let flags = CapabilityFlags::from_wire(0x0000_0200);
    assert!(flags.is_protocol_41());
    assert!(!flags.is_secure_connection());
}

#[test]
fn test_predicates() {
    let flags = CapabilityFlags::CLIENT_PROTOCOL_41
        | CapabilityFlags::CLIENT_CONNECT_WITH_DB
        | CapabilityFlags::CLIENT_CONNECT_ATTRS;

    assert!(flags.is_protocol_41());
    assert!(flags.is_connect_with_db());
    assert!(flags.is_connect_attrs());
    assert!(!flags.is_plugin_auth());
    assert!(!flags.is_plugin_auth_lenenc());
    assert!(!flags.is_secure_connection());
}

#[test]
fn test_modern_client_flags() {
    assert!(CAPABILITIES_MODERN_CLIENT.is_protocol_41());
    assert!(CAPABILITIES_MODERN_CLIENT.is_secure_connection());
    assert!(CAPABILITIES_MODERN_CLIENT.is_plugin_auth());
    assert!(CAPABILITIES_MODERN_CLIENT.is_plugin_auth_lenenc());
    assert!(
        !CAPABILITIES_MODERN_CLIENT.is_connect_with_db(),
        "CLIENT_CONNECT_WITH_DB depends on whether a database is given"
    );
}
