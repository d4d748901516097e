use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};

use scredits::accounting::{self, Scope};
use scredits::cli::{Cli, Mode};
use scredits::reset::ResetWindow;
use scredits::types::{DetailedBreakdown, UsageRecord};
use scredits::{aggregate, config, output, parse};

fn register_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        // stdout carries the report itself
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn no_data_message(account: Option<&str>) -> String {
    match account {
        Some(name) => format!("No data available for account '{name}'."),
        None => "No data available.".to_string(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    register_logging(cli.verbose)?;

    let config = config::load_config();
    debug!(?config, "loaded config");

    let mode = cli.mode();
    let account = cli.account.as_deref();
    let source = accounting::accounting_source(cli.input.as_deref(), &config.sshare);

    let scope = match mode {
        Mode::Table => Scope::Own,
        Mode::Detailed | Mode::Json => Scope::All,
    };
    let records = parse::parse_sshare_output(&source.fetch(scope)?);
    debug!("Parsed {} accounting records.", records.len());

    if mode != Mode::Json {
        let window = ResetWindow::read(
            &config.last_reset_file,
            &config.next_reset_file,
            &config.reset_format,
        );
        println!("{window}\n");
    }

    match mode {
        Mode::Table => {
            let summaries = aggregate::account_summaries(&records, account);
            if summaries.is_empty() {
                println!("{}", no_data_message(account));
            } else {
                output::print_summary_table(&summaries);
            }
        }
        Mode::Detailed => match aggregate::detailed_breakdown(&records, account) {
            DetailedBreakdown::AccountNotFound(name) => {
                println!("Account '{name}' does not exist.");
            }
            DetailedBreakdown::Accounts(groups) if groups.is_empty() => {
                println!("{}", no_data_message(None));
            }
            breakdown => output::print_detailed_table(&breakdown),
        },
        Mode::Json => {
            let records: Vec<UsageRecord> = match account {
                Some(name) => records.into_iter().filter(|r| r.account == name).collect(),
                None => records,
            };
            output::print_json(&aggregate::balances(&records))?;
        }
    }

    Ok(())
}
