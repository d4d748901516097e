use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_RESET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ResetDateError {
    #[error("cannot read reset file")]
    Io(#[from] io::Error),
    #[error("reset file is empty")]
    Empty,
    #[error("reset date does not match the expected format")]
    Format(#[from] chrono::ParseError),
}

/// Last and next credit reset, as published by the cluster admins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetWindow {
    pub last_reset: Option<NaiveDateTime>,
    pub next_reset: Option<NaiveDateTime>,
}

impl ResetWindow {
    /// Read both reset files. Each value that cannot be read or parsed is
    /// treated as unknown on its own.
    pub fn read(last_path: &Path, next_path: &Path, format: &str) -> Self {
        ResetWindow {
            last_reset: read_reset_date(last_path, format),
            next_reset: read_reset_date(next_path, format),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.last_reset.is_none() && self.next_reset.is_none()
    }
}

fn read_reset_date(path: &Path, format: &str) -> Option<NaiveDateTime> {
    let parsed = fs::read_to_string(path)
        .map_err(ResetDateError::from)
        .and_then(|text| parse_reset_date(&text, format));

    match parsed {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "reset date unavailable");
            None
        }
    }
}

/// Parse the first non-empty line of a reset file.
pub fn parse_reset_date(text: &str, format: &str) -> Result<NaiveDateTime, ResetDateError> {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or(ResetDateError::Empty)?;
    Ok(NaiveDateTime::parse_from_str(line, format)?)
}

impl fmt::Display for ResetWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("Reset dates not found or invalid format.");
        }

        let show = |date: Option<NaiveDateTime>| match date {
            Some(d) => d.format(DEFAULT_RESET_FORMAT).to_string(),
            None => "unknown".to_string(),
        };
        writeln!(f, "Last credit reset: {}", show(self.last_reset))?;
        write!(f, "Next credit reset: {}", show(self.next_reset))
    }
}
