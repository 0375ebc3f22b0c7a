/// Canonical request encoding
///
/// Serializes structured requests into the exact byte layout the on-chain
/// deserializer reads: ULEB128-length-prefixed UTF-8 for strings, one tag
/// byte for enum variants, 16-byte little-endian for amounts, and fields
/// emitted strictly in declaration order. The decoder on the other end is
/// positional; reordering anything here breaks signature verification.

use sha3::{Digest, Keccak256};

use launch_types::{
    AccountOwner, Amount, ApproveRequest, CreateTokenRequest, TokenMetadata, TradeRequest,
};

// ============================================================================
// Encoding Primitives
// ============================================================================

/// Append a ULEB128-encoded unsigned integer (little-endian base-128,
/// continuation bit on all but the last byte).
pub fn encode_uleb128(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Decode a ULEB128 integer, returning the value and the number of bytes
/// consumed. `None` on truncated input or a value exceeding u64.
pub fn decode_uleb128(input: &[u8]) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in input.iter().enumerate() {
        let chunk = (byte & 0x7f) as u64;
        let shift = 7 * i as u32;
        // A chunk whose bits fall off the top would wrap to a wrong value
        let shifted = chunk.checked_shl(shift)?;
        if shifted >> shift != chunk {
            return None;
        }
        value = value.checked_add(shifted)?;
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// Append a length-prefixed byte sequence.
pub fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    encode_uleb128(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

/// Decode a length-prefixed byte sequence, returning the payload and the
/// total bytes consumed.
pub fn decode_bytes(input: &[u8]) -> Option<(Vec<u8>, usize)> {
    let (len, header) = decode_uleb128(input)?;
    let len = len as usize;
    let end = header.checked_add(len)?;
    if input.len() < end {
        return None;
    }
    Some((input[header..end].to_vec(), end))
}

/// Append a length-prefixed UTF-8 string.
pub fn encode_string(value: &str, out: &mut Vec<u8>) {
    encode_bytes(value.as_bytes(), out);
}

/// Append a single variant tag byte. Tag range is enforced by the type.
pub fn encode_variant(tag: u8, out: &mut Vec<u8>) {
    out.push(tag);
}

/// Append a u128 as 16 little-endian bytes.
pub fn encode_u128_le(value: u128, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn encode_amount(amount: Amount, out: &mut Vec<u8>) {
    encode_u128_le(amount.to_attos(), out);
}

fn encode_owner(owner: &AccountOwner, out: &mut Vec<u8>) {
    encode_variant(owner.tag(), out);
    out.extend_from_slice(owner.address_bytes());
}

fn encode_metadata(metadata: &TokenMetadata, out: &mut Vec<u8>) {
    encode_string(&metadata.name, out);
    encode_string(&metadata.symbol, out);
    out.push(metadata.decimals);
}

// ============================================================================
// Signable Payloads
// ============================================================================

/// A request that can be canonically encoded and hashed for signing.
///
/// The signing digest is domain-separated: `keccak256(TYPE_NAME ++ "::" ++
/// payload)`. The type-name prefixes are wire constants; a signature over
/// one request type can never be replayed as another.
pub trait SignablePayload {
    /// Exact domain-separation prefix (without the trailing `::`)
    const TYPE_NAME: &'static str;

    /// Append the canonical field encoding to `out`
    fn encode_payload(&self, out: &mut Vec<u8>);

    /// Canonical payload bytes
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_payload(&mut out);
        out
    }

    /// 32-byte digest presented to the signing agent
    fn signing_digest(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(Self::TYPE_NAME.as_bytes());
        hasher.update(b"::");
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }
}

impl SignablePayload for TradeRequest {
    const TYPE_NAME: &'static str = "TradeRequest";

    fn encode_payload(&self, out: &mut Vec<u8>) {
        encode_owner(&self.owner, out);
        encode_string(&self.symbol, out);
        encode_variant(self.side.tag(), out);
        encode_amount(self.amount, out);
        encode_amount(self.min_out, out);
    }
}

impl SignablePayload for ApproveRequest {
    const TYPE_NAME: &'static str = "ApproveRequest";

    fn encode_payload(&self, out: &mut Vec<u8>) {
        encode_owner(&self.owner, out);
        encode_owner(&self.spender, out);
        encode_amount(self.allowance, out);
    }
}

impl SignablePayload for CreateTokenRequest {
    const TYPE_NAME: &'static str = "CreateTokenRequest";

    fn encode_payload(&self, out: &mut Vec<u8>) {
        encode_owner(&self.owner, out);
        encode_metadata(&self.metadata, out);
        encode_amount(self.initial_supply, out);
    }
}
