/// Mathematical utilities for the launch trading core
///
/// This crate reproduces the on-chain contract's saturating u128
/// arithmetic client-side, computes trade quotes and slippage bounds that
/// match what the chain will enforce, and aggregates sampled spot prices
/// into fixed-width candles.

pub mod amm;
pub mod candles;
pub mod sat;

// Re-export commonly used functions
pub use amm::*;
pub use candles::*;
pub use sat::*;
