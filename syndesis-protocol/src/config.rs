//! Link configuration
//!
//! The protocol went through several revisions on the wire: with and without
//! acknowledgments, with and without an `AT+`-style frame prefix, and with
//! diverging acknowledgment behavior for get requests. All of those variants
//! are expressed here as one configuration record with named fields instead
//! of a family of constructors.

use heapless::Vec;

/// Default key/value separator
pub const DEFAULT_SEPARATOR: u8 = b'=';

/// Default query marker (follows the separator in a get request)
pub const DEFAULT_QUERY: u8 = b'?';

/// Default marker introducing a base64 payload
pub const DEFAULT_BASE64_MARKER: u8 = b'@';

/// Default frame terminator
pub const DEFAULT_TERMINATOR: u8 = b'\n';

/// Default per-byte read timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u32 = 10;

/// Maximum length of an optional frame prefix
pub const MAX_PREFIX_LEN: usize = 8;

/// Acknowledgment behavior for get requests
///
/// The set path always replies `OK`/`INVALID` when acknowledgments are
/// enabled, but peers in the field expect one of three different behaviors
/// for gets, so the policy is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GetAckPolicy {
    /// Never reply to a get; the answer frame is the only response
    Never,
    /// Reply `INVALID` when no handler claimed the get, stay silent on success
    #[default]
    OnFailure,
    /// Reply `OK`/`INVALID` exactly as for a set
    Always,
}

/// Errors detected while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two delimiter roles share the same byte
    DuplicateDelimiter,
    /// The frame prefix contains a delimiter byte
    DelimiterInPrefix,
}

/// Protocol parameters, fixed at link construction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Byte between the key and a value or query marker
    pub separator: u8,
    /// Byte after the separator denoting a get rather than a set
    pub query: u8,
    /// Byte between the key and a base64 payload
    pub base64_marker: u8,
    /// Byte ending every frame, never part of key or value content
    pub terminator: u8,
    /// Whether the receive path emits `OK`/`INVALID` replies
    pub ack: bool,
    /// Acknowledgment behavior for get requests (only when `ack` is set)
    pub get_ack: GetAckPolicy,
    /// Optional sentinel a frame must start with to be processed at all
    pub prefix: Option<Vec<u8, MAX_PREFIX_LEN>>,
    /// Per-byte read timeout for frame and acknowledgment reads
    pub timeout_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            query: DEFAULT_QUERY,
            base64_marker: DEFAULT_BASE64_MARKER,
            terminator: DEFAULT_TERMINATOR,
            ack: true,
            get_ack: GetAckPolicy::default(),
            prefix: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl LinkConfig {
    /// Check the delimiter invariants
    ///
    /// The separator, query, base64 marker and terminator must all be
    /// distinct, and a configured prefix must not contain any of them
    /// (a frame starting with a delimiter could never carry a key).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delims = [self.separator, self.query, self.base64_marker, self.terminator];
        for (i, a) in delims.iter().enumerate() {
            if delims[i + 1..].contains(a) {
                return Err(ConfigError::DuplicateDelimiter);
            }
        }
        if let Some(prefix) = &self.prefix {
            if prefix.iter().any(|b| delims.contains(b)) {
                return Err(ConfigError::DelimiterInPrefix);
            }
        }
        Ok(())
    }

    /// Set an `AT+`-style frame prefix, truncating to [`MAX_PREFIX_LEN`]
    pub fn with_prefix(mut self, prefix: &[u8]) -> Self {
        let len = prefix.len().min(MAX_PREFIX_LEN);
        let mut vec = Vec::new();
        // Cannot fail, len is clamped to capacity
        let _ = vec.extend_from_slice(&prefix[..len]);
        self.prefix = Some(vec);
        self
    }
}
