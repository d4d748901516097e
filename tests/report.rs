use std::collections::HashSet;

use scredits::aggregate::{account_summaries, balances, detailed_breakdown, ROOT_ACCOUNT};
use scredits::billing::billing_or_zero;
use scredits::parse::parse_sshare_output;
use scredits::types::{DetailedBreakdown, DetailedRow};

const ALL: &str = include_str!("data/sshare_all.txt");
const OWN: &str = include_str!("data/sshare_own.txt");

#[test]
fn every_data_line_becomes_a_record() {
    let data_lines = ALL.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
    assert_eq!(parse_sshare_output(ALL).len(), data_lines);
}

#[test]
fn balance_count_matches_allocated_user_pairs() {
    let records = parse_sshare_output(ALL);

    let allocated: HashSet<&str> = records
        .iter()
        .filter(|r| r.is_account_row() && billing_or_zero(&r.allocated_raw) > 0)
        .map(|r| r.account.as_str())
        .collect();
    let expected = records
        .iter()
        .filter(|r| !r.is_account_row())
        .filter(|r| r.account != ROOT_ACCOUNT && allocated.contains(r.account.as_str()))
        .count();

    assert_eq!(balances(&records).len(), expected);
}

#[test]
fn summaries_hold_the_remaining_identity() {
    let records = parse_sshare_output(OWN);
    let summaries = account_summaries(&records, None);
    assert_eq!(summaries.len(), 2);
    for s in &summaries {
        assert_eq!(s.remaining_su, s.allocation_su as i64 - s.used_su as i64);
        if s.allocation_su == 0 {
            assert_eq!(s.used_percent, 0.0);
        }
    }
}

#[test]
fn detailed_covers_every_account_in_order() {
    let records = parse_sshare_output(ALL);
    let breakdown = detailed_breakdown(&records, None);

    let headers: Vec<&str> = breakdown
        .rows()
        .into_iter()
        .filter_map(|r| match r {
            DetailedRow::Header(h) => Some(h.account.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(headers, ["root", "phys", "chem", "bio"]);

    let DetailedBreakdown::Accounts(groups) = breakdown else {
        panic!("expected accounts");
    };
    let user_rows: usize = groups.iter().map(|g| g.users.len()).sum();
    assert_eq!(user_rows, records.iter().filter(|r| !r.is_account_row()).count());
}
