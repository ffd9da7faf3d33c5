use std::io::Write;

use everify_lib::User;

use crate::batch::{Mode, VerificationReport};
use crate::verify::VerifyOutcome;

struct Labels {
    verified: &'static str,
    skipped: &'static str,
    failed: &'static str,
}

fn labels(mode: Mode) -> Labels {
    match mode {
        Mode::Email => Labels {
            verified: "Emails verified:",
            skipped: "Emails skipped:",
            failed: "Emails failed verification:",
        },
        Mode::Username => Labels {
            verified: "Usernames which emails verified:",
            skipped: "Usernames which emails skipped:",
            failed: "Usernames which emails failed verification:",
        },
    }
}

fn write_list<W>(out: &mut W, label: &str, list: &[String]) -> crate::error::Result
where
    W: Write
{
    writeln!(out, "{} {}", label, serde_json::to_string_pretty(list)?)?;

    Ok(())
}

/// prints the outcome of a single verification as pretty json
pub fn write_outcome<W>(out: &mut W, outcome: &VerifyOutcome) -> crate::error::Result
where
    W: Write
{
    let json = serde_json::to_string_pretty(outcome)?;

    writeln!(out, "User verified: {}", json)?;

    Ok(())
}

/// prints the three buckets of a batch as json arrays with labels matching
/// the mode
pub fn write_report<W>(out: &mut W, report: &VerificationReport, mode: Mode) -> crate::error::Result
where
    W: Write
{
    let labels = labels(mode);

    write_list(out, labels.verified, &report.verified)?;
    write_list(out, labels.skipped, &report.skipped)?;
    write_list(out, labels.failed, &report.failed)?;

    Ok(())
}

pub fn write_users<W>(out: &mut W, users: &[User]) -> crate::error::Result
where
    W: Write
{
    writeln!(out, "{}", serde_json::to_string_pretty(users)?)?;

    Ok(())
}
