use async_trait::async_trait;
use serde_json::Value;

use rust_decimal::Decimal;

use crate::converters::smallest_unit_to_amount;
use crate::error::{BelugaError, Result};
use crate::payloads::ContractParams;

/// Boundary to the ledger: the only place the SDK suspends.
///
/// Implementations own transport, encoding, signing, retries and
/// cancellation. Failures should be reported as
/// [`BelugaError::RemoteUnavailable`] carrying the underlying error; the SDK
/// passes them through untouched.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Pool address registered in `factory_id` for the pair and fee, if any
    async fn resolve_pool_address(
        &self,
        factory_id: &str,
        token_a: &str,
        token_b: &str,
        fee_bps: u32,
    ) -> Result<Option<String>>;

    /// Send a state-changing contract call
    async fn submit(&self, contract_id: &str, function: &str, params: &ContractParams)
    -> Result<Value>;

    /// Evaluate a read-only contract call
    async fn query(&self, contract_id: &str, function: &str, params: &ContractParams)
    -> Result<Value>;
}

/// Default collaborator when no ledger integration is wired in. Every call
/// fails with [`BelugaError::Unimplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLedger;

#[async_trait]
impl LedgerClient for OfflineLedger {
    async fn resolve_pool_address(
        &self,
        _factory_id: &str,
        _token_a: &str,
        _token_b: &str,
        _fee_bps: u32,
    ) -> Result<Option<String>> {
        Err(BelugaError::Unimplemented("resolve_pool_address"))
    }

    async fn submit(
        &self,
        _contract_id: &str,
        _function: &str,
        _params: &ContractParams,
    ) -> Result<Value> {
        Err(BelugaError::Unimplemented("submit"))
    }

    async fn query(
        &self,
        _contract_id: &str,
        _function: &str,
        _params: &ContractParams,
    ) -> Result<Value> {
        Err(BelugaError::Unimplemented("query"))
    }
}

// REPLY DECODING
// a reply that lacks a field is a collaborator fault, not a caller mistake

fn field<'a>(reply: &'a Value, operation: &str, name: &str) -> Result<&'a Value> {
    reply.get(name).ok_or_else(|| {
        BelugaError::remote(
            operation,
            anyhow::anyhow!("reply has no field `{name}`: {reply}"),
        )
    })
}

/// Accepts both JSON numbers and decimal strings.
pub(crate) fn field_u128(reply: &Value, operation: &str, name: &str) -> Result<u128> {
    let value = field(reply, operation, name)?;
    let parsed = match value {
        Value::String(s) => s.parse::<u128>().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    };
    parsed.ok_or_else(|| {
        BelugaError::remote(
            operation,
            anyhow::anyhow!("field `{name}` is not an unsigned integer: {value}"),
        )
    })
}

pub(crate) fn field_i32(reply: &Value, operation: &str, name: &str) -> Result<i32> {
    let value = field(reply, operation, name)?;
    let parsed = match value {
        Value::String(s) => s.parse::<i32>().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| {
        BelugaError::remote(
            operation,
            anyhow::anyhow!("field `{name}` is not a 32-bit integer: {value}"),
        )
    })
}

pub(crate) fn field_u32(reply: &Value, operation: &str, name: &str) -> Result<u32> {
    let value = field_u128(reply, operation, name)?;
    u32::try_from(value).map_err(|e| BelugaError::remote(operation, e))
}

/// Token amount in smallest units together with its human value. An amount too
/// wide for a `Decimal` is a reply fault.
pub(crate) fn field_amount(reply: &Value, operation: &str, name: &str) -> Result<(u128, Decimal)> {
    let units = field_u128(reply, operation, name)?;
    let amount = smallest_unit_to_amount(units).map_err(|e| BelugaError::remote(operation, e))?;
    Ok((units, amount))
}

/// Whole reply read as a single unsigned integer
pub(crate) fn reply_u64(reply: &Value, operation: &str) -> Result<u64> {
    let parsed = match reply {
        Value::String(s) => s.parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        BelugaError::remote(operation, anyhow::anyhow!("expected an unsigned integer, got {reply}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[tokio::test]
    async fn offline_ledger_is_unimplemented() {
        let ledger = OfflineLedger;
        assert_matches!(
            ledger.resolve_pool_address("CFACTORY", "CA", "CB", 30).await,
            Err(BelugaError::Unimplemented("resolve_pool_address"))
        );
        assert_matches!(
            ledger.query("CPOOL", "get_pool_state", &ContractParams::default()).await,
            Err(BelugaError::Unimplemented("query"))
        );
    }

    #[test]
    fn decodes_numbers_and_strings() {
        let reply = json!({ "liquidity": "340282366920938463463374607431768211455", "tick": -540, "bps": 30 });
        assert_eq!(field_u128(&reply, "q", "liquidity").unwrap(), u128::MAX);
        assert_eq!(field_i32(&reply, "q", "tick").unwrap(), -540);
        assert_eq!(field_u32(&reply, "q", "bps").unwrap(), 30);
        assert_eq!(reply_u64(&json!("12"), "q").unwrap(), 12);
    }

    #[test]
    fn unrepresentable_amount_is_a_remote_fault() {
        let reply = json!({ "amount_out": u128::MAX.to_string(), "fees": "1000" });
        assert_eq!(
            field_amount(&reply, "q", "fees").unwrap(),
            (1_000, rust_decimal_macros::dec!(0.0001))
        );
        assert_matches!(
            field_amount(&reply, "preview_swap", "amount_out"),
            Err(BelugaError::RemoteUnavailable { operation, .. }) if operation == "preview_swap"
        );
    }

    #[test]
    fn missing_field_is_a_remote_fault() {
        assert_matches!(
            field_u128(&json!({}), "get_pool_state", "liquidity"),
            Err(BelugaError::RemoteUnavailable { operation, .. }) if operation == "get_pool_state"
        );
    }
}
