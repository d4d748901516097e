use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::types::{AccountSummary, Balance, DetailedBreakdown, DetailedRow};

const SEPARATOR_WIDTH: [usize; 5] = [20, 15, 15, 15, 30];

fn new_table<'a>(header: impl IntoIterator<Item = &'a str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.into_iter().map(Cell::new));
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn summary_table(summaries: &[AccountSummary]) -> Table {
    let mut table = new_table([
        "Account",
        "Allocation(SU)",
        "Remaining(SU)",
        "Used(SU)",
        "Used(%)",
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.account),
            number(s.allocation_su),
            number(s.remaining_su),
            number(s.used_su),
            number(format!("{:.2}", s.used_percent)),
        ]);
    }

    table
}

pub fn detailed_table(breakdown: &DetailedBreakdown) -> Table {
    let mut table = new_table([
        "Account",
        "User",
        "Consumed(SU)",
        "%SU Usage",
        "Used Resources",
    ]);

    for row in breakdown.rows() {
        let cells: Vec<Cell> = match row {
            DetailedRow::Header(h) => vec![
                Cell::new(&h.account),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ],
            DetailedRow::User(u) => vec![
                Cell::new(""),
                Cell::new(&u.user),
                number(u.consumed_su),
                number(percent(u.percent_of_allocation)),
                Cell::new(u.resources.to_string()),
            ],
            DetailedRow::Separator => SEPARATOR_WIDTH
                .iter()
                .map(|w| Cell::new("-".repeat(*w)))
                .collect(),
            DetailedRow::Total(t) => vec![
                Cell::new(""),
                Cell::new("Total:"),
                number(t.total_consumed),
                number(percent(t.percent_of_allocation)),
                Cell::new(t.resource_totals.to_string()),
            ],
        };
        table.add_row(cells);
    }

    table
}

#[derive(Debug, Serialize)]
pub struct ExportConfig {
    pub unit: &'static str,
    pub project_type: &'static str,
}

/// Feed consumed by the billing dashboard.
#[derive(Debug, Serialize)]
pub struct BalanceExport<'a> {
    pub version: u32,
    pub timestamp: i64,
    pub config: ExportConfig,
    pub balances: &'a [Balance],
}

impl<'a> BalanceExport<'a> {
    pub fn new(balances: &'a [Balance], timestamp: i64) -> Self {
        Self {
            version: 1,
            timestamp,
            config: ExportConfig {
                unit: "SU",
                project_type: "project",
            },
            balances,
        }
    }
}

pub fn print_summary_table(summaries: &[AccountSummary]) {
    println!("{}", summary_table(summaries));
}

pub fn print_detailed_table(breakdown: &DetailedBreakdown) {
    println!("{}", detailed_table(breakdown));
}

pub fn print_json(balances: &[Balance]) -> Result<()> {
    let export = BalanceExport::new(balances, chrono::Utc::now().timestamp());
    let json = serde_json::to_string_pretty(&export).context("serializing balance export")?;
    println!("{json}");
    Ok(())
}
