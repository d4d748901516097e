use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One row of `sshare -P` output. An empty `user` marks the account-level row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageRecord {
    pub account: String,
    pub user: String,
    /// `GrpTRESRaw`: what the association has consumed so far.
    pub consumed_raw: String,
    /// `GrpTRESMins`: the association's allocation ceiling.
    pub allocated_raw: String,
}

impl UsageRecord {
    pub fn is_account_row(&self) -> bool {
        self.user.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPair {
    pub consumed: u64,
    pub allocated: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Cpu,
    Mem,
    Gpu,
}

impl ResourceKind {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cpu" => Some(ResourceKind::Cpu),
            "mem" => Some(ResourceKind::Mem),
            "gpu" => Some(ResourceKind::Gpu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Cpu => "cpu",
            ResourceKind::Mem => "mem",
            ResourceKind::Gpu => "gpu",
        }
    }
}

/// Resource amounts restricted to cpu, mem and gpu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBreakdown(BTreeMap<ResourceKind, u64>);

impl ResourceBreakdown {
    /// Record a value unless the kind is already present.
    pub fn insert_first(&mut self, kind: ResourceKind, value: u64) {
        self.0.entry(kind).or_insert(value);
    }

    pub fn get(&self, kind: ResourceKind) -> Option<u64> {
        self.0.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add every amount of `other` into this breakdown, saturating at `u64::MAX`.
    pub fn accumulate_from(&mut self, other: &ResourceBreakdown) {
        for (kind, value) in &other.0 {
            let slot = self.0.entry(*kind).or_insert(0);
            *slot = slot.saturating_add(*value);
        }
    }
}

impl fmt::Display for ResourceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (kind, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", kind.as_str(), value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub account: String,
    pub allocation_su: u64,
    pub remaining_su: i64,
    pub used_su: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDetail {
    pub account: String,
    pub user: String,
    pub consumed_su: u64,
    pub percent_of_allocation: f64,
    pub resources: ResourceBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRollup {
    pub account: String,
    pub total_consumed: u64,
    pub resource_totals: ResourceBreakdown,
    pub percent_of_allocation: f64,
}

/// One account of the detailed breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBreakdown {
    pub header: AccountSummary,
    pub users: Vec<UserDetail>,
    pub rollup: AccountRollup,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailedBreakdown {
    AccountNotFound(String),
    Accounts(Vec<AccountBreakdown>),
}

/// Flattened row of the detailed view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailedRow<'a> {
    Header(&'a AccountSummary),
    User(&'a UserDetail),
    Separator,
    Total(&'a AccountRollup),
}

impl DetailedBreakdown {
    pub fn rows(&self) -> Vec<DetailedRow<'_>> {
        let DetailedBreakdown::Accounts(accounts) = self else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        for group in accounts {
            rows.push(DetailedRow::Header(&group.header));
            rows.extend(group.users.iter().map(DetailedRow::User));
            rows.push(DetailedRow::Separator);
            rows.push(DetailedRow::Total(&group.rollup));
        }
        rows
    }
}

/// Remaining balance of an account, broadcast to one of its users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub user: String,
    #[serde(rename = "project")]
    pub account: String,
    #[serde(rename = "value")]
    pub remaining: i64,
}

/// `a - b` for SU counts, saturating at the `i64` range.
pub fn su_difference(a: u64, b: u64) -> i64 {
    let a = i64::try_from(a).unwrap_or(i64::MAX);
    let b = i64::try_from(b).unwrap_or(i64::MAX);
    a.saturating_sub(b)
}

/// `100 * part / whole`, or 0 when `whole` is 0.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
