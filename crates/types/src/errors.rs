/// Error types shared across the launch trading core

use thiserror::Error;

// ============================================================================
// Main Error Enum
// ============================================================================

/// Error enum covering codec, quoting, and signing failures.
///
/// Format errors are caller-correctable and never retried. Quote errors
/// mean "cannot quote now". Signer errors are user-actionable and are
/// surfaced verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LaunchError {
    // ========================================================================
    // Format Errors
    // ========================================================================

    /// Input was not valid hex
    #[error("Invalid hex in {context}: {reason}")]
    InvalidHex { context: String, reason: String },

    /// Address hex decoded to an unsupported length
    #[error("Address must be 20 or 32 bytes, got {len} hex chars")]
    InvalidAddressLength { len: usize },

    /// Raw signature was not exactly 65 bytes
    #[error("Signature must be 65 bytes, got {len}")]
    InvalidSignatureLength { len: usize },

    /// Amount string was malformed
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Externally-sourced value could not be interpreted as an amount
    #[error("Cannot parse external value as an amount")]
    UnparseableAmount,

    // ========================================================================
    // Quote Errors
    // ========================================================================

    /// Effective pool reserves are zero; the pool cannot be quoted
    #[error("Pool reserves are not initialized for quoting")]
    PoolUninitialized,

    /// The quoted output amount was zero
    #[error("Quote output is zero; check pool state")]
    ZeroQuote,

    /// A computed or sampled price fell outside the plausible range
    #[error("Price {price} outside expected range (0, 1000)")]
    PriceOutOfRange { price: f64 },

    // ========================================================================
    // Signer Errors
    // ========================================================================

    /// Declared request owner does not match the connected signer identity
    #[error("Owner {declared} does not match connected signer {connected}")]
    OwnerMismatch { declared: String, connected: String },

    /// The external signing agent is unavailable or refused to sign
    #[error("Signing agent unavailable: {reason}")]
    SignerUnavailable { reason: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================

    /// Bounded registry poll exhausted all attempts without resolving
    #[error("Identity not resolvable after {attempts} attempts")]
    RegistryTimeout { attempts: u32 },

    /// External query collaborator failed
    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },
}

impl LaunchError {
    /// Helper for hex decode failures
    pub fn invalid_hex(context: &str, reason: impl ToString) -> Self {
        LaunchError::InvalidHex {
            context: context.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Helper for malformed amount strings
    pub fn invalid_amount(input: &str, reason: &str) -> Self {
        LaunchError::InvalidAmount {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
