/// Domain-separated signing pipeline
///
/// The SDK never touches key material. It hashes the canonical payload
/// under the request type's domain prefix, hands the digest to an external
/// signing agent, and repacks the raw signature into the chain verifier's
/// layout. The agent applies whatever message-prefix hashing it requires
/// on top of the digest; no extra prefix is added here.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use launch_types::{AccountSignature, LaunchError, LaunchResult};

use crate::codec::SignablePayload;

// ============================================================================
// Signing Agent
// ============================================================================

/// External wallet agent that signs 32-byte digests.
///
/// Signing may block indefinitely while the user decides; callers cancel
/// by dropping the future.
#[async_trait]
pub trait SigningAgent: Send + Sync {
    /// The identity the agent is currently connected as, if any
    async fn connected_address(&self) -> LaunchResult<Option<String>>;

    /// Sign a digest (`0x`-prefixed hex of 32 bytes) for `address`,
    /// returning the raw 65-byte (r, s, v) signature as hex
    async fn sign_digest(&self, digest_hex: &str, address: &str) -> LaunchResult<String>;
}

/// Hash a request and obtain its packed signature from the agent.
///
/// The declared owner must match the agent's connected identity
/// (case-insensitively) *before* the agent is invoked, so a user is never
/// prompted to sign a request they did not intend to authorize. The
/// packed signature always carries the caller-declared address; an
/// address recovered from the signature itself is never trusted.
pub async fn sign_request<R>(
    agent: &dyn SigningAgent,
    owner_hex: &str,
    request: &R,
) -> LaunchResult<String>
where
    R: SignablePayload + Sync,
{
    let declared = owner_hex.trim();
    if declared.is_empty() {
        return Err(LaunchError::SignerUnavailable {
            reason: "no owner declared".to_string(),
        });
    }

    let connected = agent
        .connected_address()
        .await?
        .ok_or_else(|| LaunchError::SignerUnavailable {
            reason: "no connected identity".to_string(),
        })?;
    if !declared.eq_ignore_ascii_case(connected.trim()) {
        return Err(LaunchError::OwnerMismatch {
            declared: declared.to_string(),
            connected,
        });
    }

    let digest = request.signing_digest();
    let digest_hex = format!("0x{}", hex::encode(digest));
    debug!(request_type = R::TYPE_NAME, digest = %digest_hex, "requesting signature");

    let raw_signature = agent.sign_digest(&digest_hex, declared).await?;
    let packed = AccountSignature::from_hex(&raw_signature, declared)?;
    Ok(packed.to_hex())
}

// ============================================================================
// Wallet Context
// ============================================================================

/// The currently-connected wallet identity.
///
/// Threaded explicitly into signing and submission instead of being read
/// from ambient storage; `WalletWatch` is the single subscription point
/// that updates it on external change notifications.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletContext {
    pub address: Option<String>,
}

/// Broadcast handle for wallet identity changes
pub struct WalletWatch {
    tx: watch::Sender<WalletContext>,
}

impl WalletWatch {
    pub fn new(initial: WalletContext) -> Self {
        let (tx, _) = watch::channel(initial);
        WalletWatch { tx }
    }

    /// Replace the current identity; all subscribers observe the change
    pub fn update(&self, context: WalletContext) {
        let _ = self.tx.send(context);
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletContext> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> WalletContext {
        self.tx.borrow().clone()
    }
}

impl Default for WalletWatch {
    fn default() -> Self {
        WalletWatch::new(WalletContext::default())
    }
}
