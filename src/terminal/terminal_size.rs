// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal width discovery.
//!
//! The winsize ioctl answers instantly on every modern terminal; the DSR
//! probe is the fallback for serial lines and odd pseudo-terminals that
//! report a zero-column window. The probe measures the width by parking the
//! cursor at the right margin (`CSI 999 C`), asking the terminal where the
//! cursor ended up (`CSI 6 n`), and moving it back.

use crate::ansi::{CsiSequence, ESC_BYTE};
use crate::DEFAULT_TERMINAL_COLUMNS;
use std::io::{Read, Write};

/// Longest cursor-position report we are willing to buffer: `ESC [ r ; c R`.
const REPORT_BUF_MAX: usize = 32;

/// Number of columns of the controlling terminal.
///
/// Tries the winsize ioctl on stdout first; on failure or a zero-column
/// answer, falls back to the DSR probe over the session's devices. If the
/// probe fails at any step, assumes [`DEFAULT_TERMINAL_COLUMNS`].
pub fn get_columns(input: &mut dyn Read, output: &mut dyn Write) -> usize {
    match rustix::termios::tcgetwinsize(rustix::stdio::stdout()) {
        Ok(size) if size.ws_col > 0 => usize::from(size.ws_col),
        _ => {
            tracing::debug!("winsize ioctl unavailable, probing with DSR");
            probe_columns(input, output)
                .filter(|cols| *cols > 0)
                .unwrap_or(DEFAULT_TERMINAL_COLUMNS)
        }
    }
}

/// The DSR probe. `None` means any step failed and the caller should assume
/// the default width.
fn probe_columns(input: &mut dyn Read, output: &mut dyn Write) -> Option<usize> {
    // Initial cursor column, so it can be restored afterwards.
    let start = query_cursor_column(input, output)?;

    // Park at the right margin and ask again; the reported column is the
    // terminal width.
    output
        .write_all(CsiSequence::CursorForward(999).to_string().as_bytes())
        .ok()?;
    let cols = query_cursor_column(input, output)?;

    // Best effort restore; the width is already known.
    if cols > start {
        let _ = output.write_all(CsiSequence::CursorBackward(cols - start).to_string().as_bytes());
    }
    Some(cols)
}

/// Emit `CSI 6 n` and parse the `CSI row ; col R` reply. Returns the column.
fn query_cursor_column(input: &mut dyn Read, output: &mut dyn Write) -> Option<usize> {
    output
        .write_all(CsiSequence::QueryCursorPosition.to_string().as_bytes())
        .ok()?;
    output.flush().ok()?;

    let mut report = [0u8; REPORT_BUF_MAX];
    let mut used = 0;
    while used < report.len() - 1 {
        let mut byte = [0u8; 1];
        match input.read(&mut byte) {
            Ok(1) => {}
            _ => break,
        }
        if byte[0] == b'R' {
            break;
        }
        report[used] = byte[0];
        used += 1;
    }

    parse_cursor_report(&report[..used]).map(|(_row, col)| col)
}

/// Parse `ESC [ row ; col` (the terminating `R` already stripped).
fn parse_cursor_report(report: &[u8]) -> Option<(usize, usize)> {
    if report.len() < 2 || report[0] != ESC_BYTE || report[1] != b'[' {
        return None;
    }
    let body = std::str::from_utf8(&report[2..]).ok()?;
    let (row, col) = body.split_once(';')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}
