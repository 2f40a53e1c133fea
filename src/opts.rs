use smart_default::SmartDefault;

/// A configuration for decoding handshake responses
///
/// ```rs
/// let mut opts = DecodeOpts::default();
/// opts.strict = true;
/// let decoder = HandshakeResponseDecoder::new(opts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, SmartDefault)]
pub struct DecodeOpts {
    /// Reject bytes left over after the last field the capabilities call for.
    /// Some drivers append data the server never reads, so this is off by default.
    #[default = false]
    pub strict: bool,

    /// Recognise the `x@8` marker in the reserved bytes and read the scramble
    /// that follows it. When disabled, the 23 reserved bytes are always skipped.
    #[default = true]
    pub scramble_marker: bool,
}

impl DecodeOpts {
    /// Options that reject trailing bytes
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }
}
