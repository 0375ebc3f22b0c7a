/// Bounded polling for eventual-consistency lookups
///
/// Creating a token schedules an on-chain operation; the registry may not
/// be readable immediately afterwards. The poll below is an accommodation
/// for that window, not a correctness mechanism: the schedule is data, the
/// bound is hard, and exhausting it is reported rather than retried
/// forever.

use std::time::Duration;

use tracing::debug;

use launch_types::{LaunchError, LaunchResult};

use crate::client::ChainQuery;

// ============================================================================
// Retry Policy
// ============================================================================

/// A bounded retry schedule: attempt `i` is followed by a delay of
/// `base_delay + step * i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub step: Duration,
}

/// Schedule used while waiting for a newly-registered token to resolve
pub const REGISTRY_POLL: RetryPolicy = RetryPolicy {
    max_attempts: 12,
    base_delay: Duration::from_millis(400),
    step: Duration::from_millis(150),
};

impl RetryPolicy {
    /// The inter-attempt delays, as pure data for deterministic testing
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_attempts).map(|attempt| self.base_delay + self.step * attempt)
    }
}

// ============================================================================
// Registry Poll
// ============================================================================

/// Poll until a token symbol resolves to its registered identity.
///
/// Query errors count as "not resolvable yet" and consume an attempt;
/// the caller cancels by dropping the future.
pub async fn wait_for_token_app_id(
    query: &dyn ChainQuery,
    symbol: &str,
    policy: &RetryPolicy,
) -> LaunchResult<String> {
    for (attempt, delay) in policy.delays().enumerate() {
        match query.token_app_id(symbol).await {
            Ok(Some(app_id)) if !app_id.is_empty() => {
                debug!(symbol, attempt, "token identity resolved");
                return Ok(app_id);
            }
            Ok(_) => {}
            Err(e) => {
                debug!(symbol, attempt, error = %e, "registry lookup failed, will retry");
            }
        }
        if (attempt as u32) + 1 < policy.max_attempts {
            tokio::time::sleep(delay).await;
        }
    }
    Err(LaunchError::RegistryTimeout {
        attempts: policy.max_attempts,
    })
}
