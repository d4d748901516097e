use std::collections::{HashMap, HashSet};

use crate::billing::{billing_or_zero, resource_breakdown};
use crate::types::{
    percent_of, su_difference, AccountBreakdown, AccountRollup, AccountSummary, Balance,
    BillingPair, DetailedBreakdown, UsageRecord, UserDetail,
};

/// Administrative account with no end-user meaning, never exported.
pub const ROOT_ACCOUNT: &str = "root";

/// Partition records by account, keeping first-seen account order and the
/// original record order within each account.
fn partition_by_account<'a, I>(records: I) -> Vec<(&'a str, Vec<&'a UsageRecord>)>
where
    I: IntoIterator<Item = &'a UsageRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&UsageRecord>)> = Vec::new();

    for r in records {
        let i = *index.entry(r.account.as_str()).or_insert_with(|| {
            groups.push((r.account.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(r);
    }

    groups
}

fn matches_filter(record: &UsageRecord, filter: Option<&str>) -> bool {
    filter.is_none_or(|account| record.account == account)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the summary line for one account from its allocation and usage.
pub fn account_summary(account: &str, allocation_su: u64, used_su: u64) -> AccountSummary {
    AccountSummary {
        account: account.to_string(),
        allocation_su,
        remaining_su: su_difference(allocation_su, used_su),
        used_su,
        used_percent: round2(percent_of(used_su, allocation_su)),
    }
}

/// One summary per account for the table view.
///
/// Only per-user rows that carry both billing tokens qualify. The first
/// qualifying row of an account drives its totals: Slurm repeats the account's
/// allocation on every association row, so one row is representative.
pub fn account_summaries(records: &[UsageRecord], account: Option<&str>) -> Vec<AccountSummary> {
    let qualifying = records
        .iter()
        .filter(|r| matches_filter(r, account))
        .filter(|r| !r.is_account_row());

    let mut seen: HashSet<&str> = HashSet::new();
    let mut summaries = Vec::new();

    for r in qualifying {
        let Some(pair) = BillingPair::extract(r) else {
            continue;
        };
        if !seen.insert(r.account.as_str()) {
            continue;
        }
        summaries.push(account_summary(&r.account, pair.allocated, pair.consumed));
    }

    summaries
}

/// Per-account, per-user breakdown for the detailed view.
pub fn detailed_breakdown(records: &[UsageRecord], account: Option<&str>) -> DetailedBreakdown {
    if let Some(name) = account {
        if !records.iter().any(|r| r.account == name) {
            return DetailedBreakdown::AccountNotFound(name.to_string());
        }
    }

    let groups = partition_by_account(records.iter().filter(|r| matches_filter(r, account)));

    DetailedBreakdown::Accounts(
        groups
            .into_iter()
            .map(|(name, rows)| breakdown_for_account(name, &rows))
            .collect(),
    )
}

fn breakdown_for_account(account: &str, rows: &[&UsageRecord]) -> AccountBreakdown {
    // The boundary record sets the allocation for the whole account.
    let allocation = rows
        .first()
        .map(|r| billing_or_zero(&r.allocated_raw))
        .unwrap_or(0);

    let empty = AccountRollup {
        account: account.to_string(),
        ..Default::default()
    };

    let (users, mut rollup) = rows.iter().filter(|r| !r.is_account_row()).fold(
        (Vec::new(), empty),
        |(mut users, mut rollup), r| {
            let consumed = billing_or_zero(&r.consumed_raw);
            let detail = UserDetail {
                account: account.to_string(),
                user: r.user.clone(),
                consumed_su: consumed,
                percent_of_allocation: percent_of(consumed, allocation),
                resources: resource_breakdown(&r.consumed_raw),
            };

            rollup.total_consumed = rollup.total_consumed.saturating_add(consumed);
            rollup.resource_totals.accumulate_from(&detail.resources);
            users.push(detail);
            (users, rollup)
        },
    );
    rollup.percent_of_allocation = percent_of(rollup.total_consumed, allocation);

    AccountBreakdown {
        header: account_summary(account, allocation, rollup.total_consumed),
        users,
        rollup,
    }
}

/// Remaining account balance broadcast to each user of the account.
///
/// An account-level row establishes the account's remaining balance; user rows
/// that follow an established account each emit one entry. `root` and accounts
/// without an allocation are never reported.
pub fn balances(records: &[UsageRecord]) -> Vec<Balance> {
    let mut established: HashMap<&str, i64> = HashMap::new();
    let mut out = Vec::new();

    for r in records.iter().filter(|r| r.account != ROOT_ACCOUNT) {
        if r.is_account_row() {
            let allocated = billing_or_zero(&r.allocated_raw);
            if allocated == 0 {
                established.remove(r.account.as_str());
            } else {
                let consumed = billing_or_zero(&r.consumed_raw);
                established.insert(r.account.as_str(), su_difference(allocated, consumed));
            }
            continue;
        }

        if let Some(&remaining) = established.get(r.account.as_str()) {
            out.push(Balance {
                user: r.user.clone(),
                account: r.account.clone(),
                remaining,
            });
        }
    }

    out
}
