/// Market state and price series types

use serde::{Deserialize, Serialize};

// ============================================================================
// Pool State
// ============================================================================

/// A snapshot of pool reserves and configuration, fetched fresh for every
/// quote. Never cache across calls: reserves change every block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Real base-asset reserve, in attos
    pub base_reserve: u128,

    /// Real token reserve, in attos
    pub token_reserve: u128,

    /// Virtual base-asset offset shaping the bonding curve
    pub virtual_base: u128,

    /// Virtual token offset shaping the bonding curve
    pub virtual_token: u128,

    /// Swap fee in basis points (0..=10000)
    pub fee_bps: u16,

    /// Total supply placed on the curve at genesis, when known.
    /// Used only as a reserve-corruption heuristic.
    pub total_curve_supply: Option<u128>,
}

impl PoolState {
    /// Effective base reserve including the virtual offset, saturating
    pub fn effective_base(&self) -> u128 {
        self.base_reserve.saturating_add(self.virtual_base)
    }

    /// Effective token reserve including the virtual offset, saturating
    pub fn effective_token(&self) -> u128 {
        self.token_reserve.saturating_add(self.virtual_token)
    }
}

// ============================================================================
// Price Series
// ============================================================================

/// One sampled spot price. `time` may be epoch seconds or milliseconds;
/// the candle aggregator detects the unit by magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: i64,
    pub value: f64,
}

/// A fixed-width OHLC interval derived from price samples.
///
/// Candles are recomputed from scratch on every refresh and never mutated
/// incrementally afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start in epoch seconds
    pub bucket_start: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
