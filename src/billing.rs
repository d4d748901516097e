use crate::types::{BillingPair, ResourceBreakdown, ResourceKind, UsageRecord};

const BILLING_KEY: &str = "billing";

/// Iterate the fully-formed `key=<digits>` tokens of a TRES descriptor such as
/// `cpu=4,mem=8000,billing=120,gres/gpu=1`.
///
/// `/` is treated as a separator too, so `gres/gpu=1` yields `("gpu", 1)`.
/// Tokens with a non-numeric or empty value are skipped.
fn tokens(descriptor: &str) -> impl Iterator<Item = (&str, u64)> {
    descriptor
        .split([',', '/'])
        .filter_map(|token| {
            let (key, value) = token.trim().split_once('=')?;
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some((key, value.parse::<u64>().ok()?))
        })
}

/// Value of the `billing=<digits>` token, if any.
pub fn billing_units(descriptor: &str) -> Option<u64> {
    tokens(descriptor)
        .find(|(key, _)| *key == BILLING_KEY)
        .map(|(_, value)| value)
}

pub fn billing_or_zero(descriptor: &str) -> u64 {
    billing_units(descriptor).unwrap_or(0)
}

/// cpu, mem and gpu amounts of a descriptor. Every other kind is dropped.
pub fn resource_breakdown(descriptor: &str) -> ResourceBreakdown {
    let mut breakdown = ResourceBreakdown::default();
    for (key, value) in tokens(descriptor) {
        if let Some(kind) = ResourceKind::from_key(key) {
            breakdown.insert_first(kind, value);
        }
    }
    breakdown
}

impl BillingPair {
    /// Both sides must carry a billing token.
    pub fn extract(record: &UsageRecord) -> Option<Self> {
        Some(BillingPair {
            consumed: billing_units(&record.consumed_raw)?,
            allocated: billing_units(&record.allocated_raw)?,
        })
    }
}
