/// Signable request payloads
///
/// Field order in these structs is part of the wire contract: the on-chain
/// deserializer reads fields positionally, so the codec must emit them in
/// exactly this order.

use serde::{Deserialize, Serialize};

use crate::account::AccountOwner;
use crate::amount::Amount;

// ============================================================================
// Trade Side
// ============================================================================

/// Trade direction, encoded as a variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl Side {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// Request Payloads
// ============================================================================

/// A buy or sell against a token's pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub owner: AccountOwner,
    pub symbol: String,
    pub side: Side,
    pub amount: Amount,
    pub min_out: Amount,
}

/// An allowance grant letting a spender pull funds from the owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub owner: AccountOwner,
    pub spender: AccountOwner,
    pub allowance: Amount,
}

/// Token metadata registered at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Registration of a new token and its initial supply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTokenRequest {
    pub owner: AccountOwner,
    pub metadata: TokenMetadata,
    pub initial_supply: Amount,
}
