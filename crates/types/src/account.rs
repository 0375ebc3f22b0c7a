/// Chain account identities and externally-produced signatures
///
/// The chain accepts two fixed-length address forms packed as a tagged
/// variant, and an ECDSA signature layout with a normalized recovery byte.
/// Tag values and byte order are part of the wire contract.

use serde::{Deserialize, Serialize};

use crate::errors::LaunchError;
use crate::LaunchResult;

// ============================================================================
// Account Owner
// ============================================================================

/// A chain account identity: a 32-byte chain-native address (variant tag 1)
/// or a 20-byte EVM-style address (variant tag 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountOwner {
    Address32([u8; 32]),
    Address20([u8; 20]),
}

impl AccountOwner {
    /// Parse an owner from hex, accepting an optional `0x` prefix and any
    /// letter case. Only 40 and 64 hex characters are valid lengths.
    pub fn parse(input: &str) -> LaunchResult<AccountOwner> {
        let normalized = input.trim().to_lowercase();
        let normalized = normalized.strip_prefix("0x").unwrap_or(&normalized);
        let bytes = hex::decode(normalized)
            .map_err(|e| LaunchError::invalid_hex("account owner", e))?;
        match normalized.len() {
            40 => {
                let mut addr = [0u8; 20];
                addr.copy_from_slice(&bytes);
                Ok(AccountOwner::Address20(addr))
            }
            64 => {
                let mut addr = [0u8; 32];
                addr.copy_from_slice(&bytes);
                Ok(AccountOwner::Address32(addr))
            }
            len => Err(LaunchError::InvalidAddressLength { len }),
        }
    }

    /// Variant tag as encoded on the wire
    pub fn tag(&self) -> u8 {
        match self {
            AccountOwner::Address32(_) => 1,
            AccountOwner::Address20(_) => 2,
        }
    }

    /// Raw address bytes without the tag
    pub fn address_bytes(&self) -> &[u8] {
        match self {
            AccountOwner::Address32(bytes) => bytes,
            AccountOwner::Address20(bytes) => bytes,
        }
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address_bytes()))
    }
}

impl std::str::FromStr for AccountOwner {
    type Err = LaunchError;

    fn from_str(s: &str) -> LaunchResult<AccountOwner> {
        AccountOwner::parse(s)
    }
}

impl std::fmt::Display for AccountOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Account Signature
// ============================================================================

/// Variant tag for the EVM secp256k1 signature form
pub const EVM_SECP256K1_TAG: u8 = 2;

/// An externally-produced 65-byte (r, s, v) signature plus its signer's
/// 20-byte address, as the chain verifier expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSignature {
    signature: [u8; 65],
    address: [u8; 20],
}

impl AccountSignature {
    /// Build a signature from the raw hex a signing agent returned and the
    /// caller-declared signer address.
    ///
    /// The recovery byte is normalized to Ethereum's 27/28 form: some
    /// agents return 0/1 instead. 27/28 pass through unchanged.
    pub fn from_hex(raw_sig_hex: &str, address_hex: &str) -> LaunchResult<AccountSignature> {
        let sig_normalized = raw_sig_hex.trim().to_lowercase();
        let sig_normalized = sig_normalized.strip_prefix("0x").unwrap_or(&sig_normalized);
        let sig_bytes = hex::decode(sig_normalized)
            .map_err(|e| LaunchError::invalid_hex("signature", e))?;
        if sig_bytes.len() != 65 {
            return Err(LaunchError::InvalidSignatureLength { len: sig_bytes.len() });
        }
        let mut signature = [0u8; 65];
        signature.copy_from_slice(&sig_bytes);
        if signature[64] == 0 || signature[64] == 1 {
            signature[64] += 27;
        }

        let addr_normalized = address_hex.trim().to_lowercase();
        let addr_normalized = addr_normalized.strip_prefix("0x").unwrap_or(&addr_normalized);
        let addr_bytes = hex::decode(addr_normalized)
            .map_err(|e| LaunchError::invalid_hex("signer address", e))?;
        if addr_bytes.len() != 20 {
            return Err(LaunchError::InvalidAddressLength { len: addr_normalized.len() });
        }
        let mut address = [0u8; 20];
        address.copy_from_slice(&addr_bytes);

        Ok(AccountSignature { signature, address })
    }

    /// Wire layout: tag 2 + 65 signature bytes + 20 address bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 65 + 20);
        out.push(EVM_SECP256K1_TAG);
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.address);
        out
    }

    /// Lowercase hex of the wire layout, as sent over transport
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    pub fn recovery_byte(&self) -> u8 {
        self.signature[64]
    }
}
