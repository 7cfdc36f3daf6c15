//! Parsing of `/proc/<pid>/stat` records.
//!
//! The record starts with `pid (comm) state ppid pgrp session ...`. The comm
//! field is whatever the process chose as its name and may itself contain
//! spaces and parentheses, so the name runs from the first `(` to the *last*
//! `)` in the record.

use crate::process::error::ProcError;
use crate::process::record::ProcessRecord;

/// Parses the status record of `pid` into a [`ProcessRecord`].
///
/// Only the name, state, ppid, pgrp and session fields are read; anything
/// after the session field is ignored.
pub fn parse_stat(pid: u32, content: &str) -> Result<ProcessRecord, ProcError> {
    let open = content
        .find('(')
        .ok_or_else(|| ProcError::malformed(pid, "missing '(' before process name"))?;
    let close = content[open + 1..]
        .rfind(')')
        .map(|i| open + 1 + i)
        .ok_or_else(|| ProcError::malformed(pid, "missing ')' after process name"))?;

    let name = &content[open + 1..close];
    if name.is_empty() {
        return Err(ProcError::malformed(pid, "empty process name"));
    }

    let rest = content[close + 1..]
        .strip_prefix(' ')
        .ok_or_else(|| ProcError::malformed(pid, "no separator after process name"))?;
    let mut fields = rest.split_whitespace();

    let state_field = next_field(pid, &mut fields, "state")?;
    let mut state_chars = state_field.chars();
    let state = match (state_chars.next(), state_chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(ProcError::malformed(
                pid,
                format!("state '{state_field}' is not a single character"),
            ))
        }
    };

    let ppid: u32 = parse_field(pid, &mut fields, "ppid")?;
    let pgrp: i32 = parse_field(pid, &mut fields, "pgrp")?;
    let session: i32 = parse_field(pid, &mut fields, "session")?;

    Ok(ProcessRecord::new(
        pid,
        ppid,
        name.to_string(),
        state,
        pgrp,
        session,
    ))
}

fn next_field<'a>(
    pid: u32,
    fields: &mut impl Iterator<Item = &'a str>,
    label: &str,
) -> Result<&'a str, ProcError> {
    fields
        .next()
        .ok_or_else(|| ProcError::malformed(pid, format!("missing {label} field")))
}

fn parse_field<'a, T: std::str::FromStr>(
    pid: u32,
    fields: &mut impl Iterator<Item = &'a str>,
    label: &str,
) -> Result<T, ProcError> {
    let raw = next_field(pid, fields, label)?;
    raw.parse()
        .map_err(|_| ProcError::malformed(pid, format!("{label} '{raw}' is not a number")))
}
