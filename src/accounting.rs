use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// `sshare` columns, in the order the record parser expects them.
pub const SSHARE_FIELDS: &str = "account,user,GrpTRESRaw,GrpTRESMins";

/// Which associations an accounting query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Associations of the invoking user.
    Own,
    /// Every user of every account (`sshare -a`).
    All,
}

/// Where the pipe-delimited accounting text comes from.
pub trait AccountingSource {
    fn fetch(&self, scope: Scope) -> Result<String>;
}

/// Live query through the `sshare` binary.
pub struct Sshare {
    pub program: String,
}

impl Sshare {
    pub fn args(scope: Scope) -> Vec<&'static str> {
        let mut args = Vec::new();
        if scope == Scope::All {
            args.push("-a");
        }
        args.extend(["-o", SSHARE_FIELDS, "-P"]);
        args
    }
}

impl AccountingSource for Sshare {
    /// A failed or missing `sshare` is logged and reported as empty output.
    fn fetch(&self, scope: Scope) -> Result<String> {
        let args = Self::args(scope);
        debug!("Executing command: {} {}", self.program, args.join(" "));

        let output = match Command::new(&self.program).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                warn!("failed to run {}: {e}", self.program);
                return Ok(String::new());
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                status = %output.status,
                stderr = %stderr.trim(),
                "{} exited unsuccessfully",
                self.program
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A previously captured `sshare -P` dump. `-` reads standard input.
pub struct SavedOutput {
    pub path: PathBuf,
}

impl AccountingSource for SavedOutput {
    fn fetch(&self, _scope: Scope) -> Result<String> {
        if self.path == Path::new("-") {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading accounting data from stdin")?;
            return Ok(buf);
        }

        debug!(path = %self.path.display(), "reading saved accounting data");
        fs::read_to_string(&self.path)
            .with_context(|| format!("reading accounting data from {}", self.path.display()))
    }
}

pub fn accounting_source(input: Option<&Path>, sshare: &str) -> Box<dyn AccountingSource> {
    match input {
        Some(path) => Box::new(SavedOutput {
            path: path.to_path_buf(),
        }),
        None => Box::new(Sshare {
            program: sshare.to_string(),
        }),
    }
}
