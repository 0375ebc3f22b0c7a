//! End-to-end flows through the SDK surface
//!
//! Exercises the full user paths: quote a trade against a fresh pool
//! snapshot, sign the resulting request through a fake wallet agent, and
//! wait out the registry's eventual-consistency window after creating a
//! token.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use launch_sdk::{
    fetch_quote, parse_pool_state, sign_request, wait_for_token_app_id, AccountOwner, Amount,
    ChainQuery, CreateTokenRequest, LaunchError, LaunchResult, RawPoolState, RetryPolicy, Side,
    SignablePayload, SigningAgent, TokenMetadata, TradeRequest,
};

const OWNER: &str = "0xabababababababababababababababababababab";

struct FakeChain {
    registry_calls: AtomicU32,
    registry_ready_after: u32,
}

impl FakeChain {
    fn new(registry_ready_after: u32) -> Self {
        FakeChain {
            registry_calls: AtomicU32::new(0),
            registry_ready_after,
        }
    }
}

#[async_trait]
impl ChainQuery for FakeChain {
    async fn pool_state(&self, _symbol: &str) -> anyhow::Result<RawPoolState> {
        Ok(RawPoolState {
            base_reserve: json!("100"),
            token_reserve: json!({"attos": "500000000000000000000"}),
            virtual_base: json!(null),
            virtual_token: json!(null),
            fee_bps: Some(30),
            total_curve_supply: json!(null),
        })
    }

    async fn token_app_id(&self, _symbol: &str) -> anyhow::Result<Option<String>> {
        let call = self.registry_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.registry_ready_after {
            Ok(Some("6a570896ff23d7a1".to_string()))
        } else {
            Ok(None)
        }
    }
}

struct FakeWallet {
    address: String,
}

#[async_trait]
impl SigningAgent for FakeWallet {
    async fn connected_address(&self) -> LaunchResult<Option<String>> {
        Ok(Some(self.address.clone()))
    }

    async fn sign_digest(&self, digest_hex: &str, _address: &str) -> LaunchResult<String> {
        // A real agent hashes and signs; the layout contract is all the
        // SDK depends on: 65 bytes, recovery byte last.
        assert_eq!(digest_hex.len(), 66, "digest must be 32 bytes of 0x-hex");
        Ok(format!("0x{}{}", "42".repeat(64), "00"))
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 12,
        base_delay: Duration::from_millis(1),
        step: Duration::from_millis(0),
    }
}

#[tokio::test]
async fn trade_flow_quotes_then_signs() {
    let chain = FakeChain::new(1);
    let wallet = FakeWallet {
        address: OWNER.to_string(),
    };

    let quote = fetch_quote(
        &chain,
        "TKN",
        Side::Buy,
        Amount::from_decimal("10").unwrap(),
        100,
    )
    .await
    .unwrap();
    assert_eq!(quote.expected_out.to_attos(), 496_905_680_031_636_460_276);

    let request = TradeRequest {
        owner: AccountOwner::parse(OWNER).unwrap(),
        symbol: "TKN".to_string(),
        side: Side::Buy,
        amount: Amount::from_decimal("10").unwrap(),
        min_out: quote.min_out,
    };
    let signature_hex = sign_request(&wallet, OWNER, &request).await.unwrap();

    let packed = hex::decode(&signature_hex).unwrap();
    assert_eq!(packed.len(), 86);
    assert_eq!(packed[0], 2);
    assert_eq!(packed[65], 27); // v 0 -> 27
    assert_eq!(&packed[66..], AccountOwner::parse(OWNER).unwrap().address_bytes());
}

#[tokio::test]
async fn create_token_flow_signs_and_waits_for_registry() {
    let chain = FakeChain::new(4);
    let wallet = FakeWallet {
        address: OWNER.to_string(),
    };

    let request = CreateTokenRequest {
        owner: AccountOwner::parse(OWNER).unwrap(),
        metadata: TokenMetadata {
            name: "Example".to_string(),
            symbol: "EXM".to_string(),
            decimals: 18,
        },
        initial_supply: Amount::from_decimal("1000000000").unwrap(),
    };

    // Payload bytes and digest are stable across calls
    assert_eq!(request.to_bytes(), request.to_bytes());
    assert!(sign_request(&wallet, OWNER, &request).await.is_ok());

    let app_id = wait_for_token_app_id(&chain, "EXM", &fast_policy())
        .await
        .unwrap();
    assert_eq!(app_id, "6a570896ff23d7a1");
    assert_eq!(chain.registry_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn mismatched_owner_never_reaches_the_wallet() {
    let wallet = FakeWallet {
        address: "0xffffffffffffffffffffffffffffffffffffffff".to_string(),
    };
    let request = TradeRequest {
        owner: AccountOwner::parse(OWNER).unwrap(),
        symbol: "TKN".to_string(),
        side: Side::Sell,
        amount: Amount::ONE,
        min_out: Amount::ZERO,
    };
    let err = sign_request(&wallet, OWNER, &request).await.unwrap_err();
    assert!(matches!(err, LaunchError::OwnerMismatch { .. }));
}

#[test]
fn pool_parsing_rejects_unknown_shapes() {
    let raw = RawPoolState {
        base_reserve: json!(["not", "an", "amount"]),
        token_reserve: json!("500"),
        virtual_base: json!(null),
        virtual_token: json!(null),
        fee_bps: None,
        total_curve_supply: json!(null),
    };
    assert!(matches!(
        parse_pool_state(&raw),
        Err(LaunchError::UnparseableAmount)
    ));
}
