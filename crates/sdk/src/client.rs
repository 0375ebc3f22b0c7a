/// Quote and sampling flows against the external chain-query collaborator
///
/// The query service returns reserves and pool config in loosely-shaped
/// JSON; everything is run through the explicit `ExternalAmount` decoder
/// before any arithmetic. Pool snapshots are fetched fresh for every call
/// and never cached: reserves change every block.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use launch_math::{quote, spot_price, SpotOptions, SpotPrice, TradeQuote};
use launch_types::{Amount, ExternalAmount, LaunchError, LaunchResult, PoolState, Side};

// ============================================================================
// Chain Query Collaborator
// ============================================================================

/// Raw pool data as returned by the query service. Every amount field is
/// kept as JSON until the loose decoder has classified its shape.
#[derive(Debug, Clone, Default)]
pub struct RawPoolState {
    pub base_reserve: Value,
    pub token_reserve: Value,
    pub virtual_base: Value,
    pub virtual_token: Value,
    pub fee_bps: Option<u64>,
    pub total_curve_supply: Value,
}

/// External chain-query collaborator. Implementations are network-bound;
/// callers cancel by dropping the future.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// Current reserves and pool config for a token symbol
    async fn pool_state(&self, symbol: &str) -> anyhow::Result<RawPoolState>;

    /// Resolve a token symbol to its registered application identity
    async fn token_app_id(&self, symbol: &str) -> anyhow::Result<Option<String>>;
}

// ============================================================================
// Pool Parsing
// ============================================================================

/// Interpret a raw snapshot into validated pool state.
///
/// Reserves are required; virtual offsets and the curve supply default to
/// zero/absent when the service omits them (matching the on-chain
/// defaults for pools created without curve shaping).
pub fn parse_pool_state(raw: &RawPoolState) -> LaunchResult<PoolState> {
    let base_reserve = ExternalAmount::parse(&raw.base_reserve)?;
    let token_reserve = ExternalAmount::parse(&raw.token_reserve)?;
    let virtual_base = ExternalAmount::parse(&raw.virtual_base).unwrap_or(0);
    let virtual_token = ExternalAmount::parse(&raw.virtual_token).unwrap_or(0);
    let total_curve_supply = ExternalAmount::parse(&raw.total_curve_supply).ok();

    Ok(PoolState {
        base_reserve,
        token_reserve,
        virtual_base,
        virtual_token,
        fee_bps: raw.fee_bps.unwrap_or(0).min(10_000) as u16,
        total_curve_supply,
    })
}

// ============================================================================
// Quote and Sampling Flows
// ============================================================================

/// Fetch a fresh pool snapshot and quote a trade against it.
pub async fn fetch_quote(
    query: &dyn ChainQuery,
    symbol: &str,
    side: Side,
    amount_in: Amount,
    slippage_bps: u64,
) -> LaunchResult<TradeQuote> {
    let raw = query
        .pool_state(symbol)
        .await
        .map_err(|e| LaunchError::QueryFailed {
            reason: e.to_string(),
        })?;
    let pool = parse_pool_state(&raw)?;
    debug!(symbol, ?side, amount_in = %amount_in, "quoting against fresh pool state");
    quote(&pool, side, amount_in, slippage_bps)
}

/// Fetch a fresh pool snapshot and compute a validated spot price.
///
/// Prices outside `(0, 1000)` are rejected here so they can never
/// propagate into recorded history.
pub async fn sample_spot_price(
    query: &dyn ChainQuery,
    symbol: &str,
    opts: &SpotOptions,
) -> LaunchResult<SpotPrice> {
    let raw = query
        .pool_state(symbol)
        .await
        .map_err(|e| LaunchError::QueryFailed {
            reason: e.to_string(),
        })?;
    let pool = parse_pool_state(&raw)?;
    let spot = spot_price(&pool, opts)?;
    if spot.recovered {
        debug!(symbol, price = spot.price, "spot price derived from genesis curve config");
    }
    Ok(spot)
}

/// Shorten an application identity for display: `8 leading...6 trailing`.
/// Cuts on character boundaries, so arbitrary UTF-8 input never panics.
pub fn format_app_id(app_id: &str) -> String {
    let trimmed = app_id.trim();
    let chars = trimmed.chars().count();
    if chars <= 14 {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(8).collect();
    let tail: String = trimmed.chars().skip(chars - 6).collect();
    format!("{}...{}", head, tail)
}
