use crate::types::UsageRecord;

const DELIMITER: char = '|';

/// Parse `sshare -o account,user,GrpTRESRaw,GrpTRESMins -P` output.
///
/// Leading blank lines are skipped, then the first line is the header and is
/// always dropped. Fields past the fourth are ignored, missing trailing fields
/// are left empty.
pub fn parse_sshare_output(text: &str) -> Vec<UsageRecord> {
    text.trim_start()
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> UsageRecord {
    let mut fields = line.split(DELIMITER).map(str::trim);
    let mut next = || fields.next().unwrap_or_default().to_string();

    UsageRecord {
        account: next(),
        user: next(),
        consumed_raw: next(),
        allocated_raw: next(),
    }
}
