/// Client SDK for the launch trading core
///
/// Provides the pieces a dashboard needs to interact with the chain:
/// - Canonical request encoding matching the on-chain deserializer
/// - Domain-separated hashing and signature repacking
/// - Trade quoting and spot-price sampling against fresh pool snapshots
/// - A bounded poll for eventual-consistency registry lookups

pub mod client;
pub mod codec;
pub mod retry;
pub mod signer;

pub use client::*;
pub use codec::*;
pub use retry::*;
pub use signer::*;

// Re-export the shared types and math the SDK surface is built from
pub use launch_math::{SpotOptions, SpotPrice, TradeQuote};
pub use launch_types::{
    AccountOwner, AccountSignature, Amount, ApproveRequest, Candle, CreateTokenRequest,
    LaunchError, LaunchResult, PoolState, PricePoint, Side, TokenMetadata, TradeRequest,
};
