/// Protocol constants used across the launch trading core

// ============================================================================
// Amount Constants
// ============================================================================

/// Number of fractional digits in an `Amount` (attos scale)
pub const AMOUNT_DECIMALS: u32 = 18;

/// Attos per whole unit: 10^18
pub const ATTOS_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================================
// Quoting Constants
// ============================================================================

/// Default slippage bound applied to quotes (1%)
pub const DEFAULT_SLIPPAGE_BPS: u64 = 100;

/// Upper bound on a plausible spot price, in base units per token.
///
/// Anything at or above this is treated as a unit mismatch or reserve
/// corruption upstream and rejected rather than clamped.
pub const PRICE_UPPER_BOUND: f64 = 1000.0;

// ============================================================================
// Candle Constants
// ============================================================================

/// Width of a candle bucket in seconds
pub const CANDLE_INTERVAL_SECS: i64 = 60;

/// Epoch values above this are interpreted as milliseconds, not seconds
pub const MILLIS_THRESHOLD: i64 = 20_000_000_000;

/// Minimum high/low spread enforced on a flat candle
pub const CANDLE_MIN_RANGE: f64 = 1e-8;
