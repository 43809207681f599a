//! SDK error types

use thiserror::Error;

/// Every failure the SDK reports.
///
/// Validation variants are deterministic caller mistakes and are raised before
/// any payload is built. Remote variants come from the ledger collaborator and
/// are never retried here.
#[derive(Error, Debug)]
pub enum BelugaError {
    /// Input outside the domain of a conversion (non-positive price, negative amount, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value outside a protocol bound
    #[error("{what} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: String,
        min: String,
        max: String,
    },

    /// Value under a protocol floor
    #[error("{what} below minimum: {value} < {min}")]
    BelowMinimum {
        what: &'static str,
        value: String,
        min: String,
    },

    /// Lower bound not strictly below the upper bound
    #[error("Invalid range: lower tick {lower} must be less than upper tick {upper}")]
    InvalidRange { lower: i32, upper: i32 },

    #[error("Unknown fee tier: {0} (expected STABLE, VOLATILE or EXOTIC)")]
    UnknownFeeTier(String),

    /// Missing or contradictory network setup
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No ledger integration is wired for this call
    #[error("Not implemented: {0} requires a ledger client")]
    Unimplemented(&'static str),

    /// The ledger collaborator failed; the underlying failure is kept as the source
    #[error("Remote call {operation} failed")]
    RemoteUnavailable {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Pool not found for {token_a}/{token_b} ({fee_tier})")]
    PoolNotFound {
        token_a: String,
        token_b: String,
        fee_tier: &'static str,
    },
}

impl BelugaError {
    pub(crate) fn out_of_range(
        what: &'static str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        BelugaError::OutOfRange {
            what,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub(crate) fn below_minimum(what: &'static str, value: impl ToString, min: impl ToString) -> Self {
        BelugaError::BelowMinimum {
            what,
            value: value.to_string(),
            min: min.to_string(),
        }
    }

    /// Wrap a collaborator failure without altering it.
    pub fn remote(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        BelugaError::RemoteUnavailable {
            operation: operation.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BelugaError>;
