//! Slurm SU accounting reports: parse `sshare -P` output, aggregate it per
//! account and user, and render it as tables or a JSON balance feed.

pub mod accounting;
pub mod aggregate;
pub mod billing;
pub mod cli;
pub mod config;
pub mod output;
pub mod parse;
pub mod reset;
pub mod types;
