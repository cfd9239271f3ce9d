// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode handling using rustix's safe termios API.
//!
//! Raw mode delivers every keystroke to the program as individual bytes:
//! no line buffering, no echo, no signal generation (Ctrl-C arrives as byte
//! `0x03`). The original attributes are snapshotted before the switch and the
//! session holds that snapshot until [`disable_raw_mode`] restores it, so the
//! terminal can be put back byte-for-byte on every exit path, including
//! abnormal ones.

use crate::ReadlineError;
use rustix::fd::BorrowedFd;
use rustix::termios::{self, ControlModes, InputModes, LocalModes, OptionalActions, OutputModes,
                      SpecialCodeIndex, Termios};
use std::io;

/// Switch the terminal behind `fd` into raw mode.
///
/// Derives the raw attributes from the current ones: clear BRKINT, ICRNL,
/// INPCK, ISTRIP, IXON on input; clear OPOST on output; set CS8; clear ECHO,
/// ICANON, IEXTEN, ISIG; VMIN=1, VTIME=0 so `read` returns every single byte
/// without a timer. Applied with drain-and-flush semantics
/// ([`OptionalActions::Flush`]).
///
/// Returns the pre-switch attribute snapshot; pass it to
/// [`disable_raw_mode`] to restore.
///
/// # Errors
///
/// - [`ReadlineError::NotATerminal`] if `fd` is not a TTY.
/// - [`ReadlineError::Io`] if the attributes cannot be read or applied.
pub fn enable_raw_mode(fd: BorrowedFd<'_>) -> Result<Termios, ReadlineError> {
    if !termios::isatty(fd) {
        return Err(ReadlineError::NotATerminal);
    }

    let original = termios::tcgetattr(fd).map_err(io::Error::from)?;

    let mut raw = original.clone();
    raw.input_modes.remove(
        InputModes::BRKINT
            | InputModes::ICRNL
            | InputModes::INPCK
            | InputModes::ISTRIP
            | InputModes::IXON,
    );
    raw.output_modes.remove(OutputModes::OPOST);
    raw.control_modes.insert(ControlModes::CS8);
    raw.local_modes.remove(
        LocalModes::ECHO | LocalModes::ICANON | LocalModes::IEXTEN | LocalModes::ISIG,
    );
    raw.special_codes[SpecialCodeIndex::VMIN] = 1;
    raw.special_codes[SpecialCodeIndex::VTIME] = 0;

    termios::tcsetattr(fd, OptionalActions::Flush, &raw).map_err(io::Error::from)?;

    tracing::debug!("raw mode engaged");
    Ok(original)
}

/// Restore the attribute snapshot taken by [`enable_raw_mode`].
///
/// Errors are tolerated: this can run during process teardown when there is
/// nothing sensible left to do about a failure. Idempotence is enforced by
/// the session, which only holds a snapshot while raw mode is engaged.
pub fn disable_raw_mode(fd: BorrowedFd<'_>, original: &Termios) {
    if termios::tcsetattr(fd, OptionalActions::Flush, original).is_err() {
        tracing::warn!("failed to restore terminal attributes");
    } else {
        tracing::debug!("raw mode restored");
    }
}
