// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The editor session and its blocking entry point.
//!
//! One [`Readline`] owns everything a line edit touches: the three byte
//! devices, the prompt, the terminal geometry captured at creation, the edit
//! buffer, the history, and the completion/hint providers. [`read_line`]
//! blocks until one line is produced or the user signals EOF/interrupt.
//!
//! ### Inputs and dependency injection
//!
//! Production sessions wrap raw file descriptors ([`Readline::new`],
//! [`Readline::with_fds`]). Tests and embedders can instead supply any
//! `Read`/`Write` implementations via [`Readline::with_devices`] and drive
//! the full editing loop from in-memory buffers; raw-mode toggling is
//! skipped because there is no descriptor to toggle.
//!
//! [`read_line`]: Readline::read_line

use crate::readline_impl::history::History;
use crate::readline_impl::line_state::LineState;
use crate::terminal::device::{borrow_fd, FdReader, FdWriter};
use crate::terminal::raw_mode::{disable_raw_mode, enable_raw_mode};
use crate::terminal::terminal_size::get_columns;
use crate::terminal::tty::{is_a_tty, is_unsupported_term};
use crate::{
    Completer, Hinter, InputDevice, OutputDevice, ReadlineError, ReadlineEvent,
    DEFAULT_TERMINAL_COLUMNS, LINE_BUFFER_MAX,
};
use rustix::termios::Termios;
use std::io::{Read, Write};
use std::os::fd::RawFd;
use std::path::Path;

/// One interactive editor session. See the [module docs](self) for the
/// overall shape and the crate docs for a usage example.
pub struct Readline {
    pub(crate) input: InputDevice,
    pub(crate) output: OutputDevice,
    /// Diagnostic channel; the completion bell rings here.
    pub(crate) error: OutputDevice,

    /// Input descriptor, when the session wraps real fds. Raw-mode target.
    pub(crate) in_fd: Option<RawFd>,

    pub(crate) prompt: String,

    /// Terminal width in columns, captured at creation.
    pub(crate) cols: usize,

    pub(crate) multiline: bool,

    /// The pre-raw attribute snapshot. `Some` iff raw mode is engaged; taken
    /// on every exit path so the terminal is always restored.
    pub(crate) raw_mode: Option<Termios>,

    pub(crate) line: LineState,
    pub(crate) history: History,

    pub(crate) completer: Option<Box<dyn Completer>>,
    pub(crate) hinter: Option<Box<dyn Hinter>>,
}

impl Readline {
    /// Session over stdin/stdout/stderr.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::with_fds(0, 1, 2, prompt)
    }

    /// Session over caller-owned descriptors. Input and output are typically
    /// the same TTY; they stay separate so the host may redirect either.
    ///
    /// The descriptors must remain open for the lifetime of the session.
    #[must_use]
    pub fn with_fds(in_fd: RawFd, out_fd: RawFd, err_fd: RawFd, prompt: impl Into<String>) -> Self {
        let mut input = FdReader::new(in_fd);
        let mut output = FdWriter::new(out_fd);

        // Width probe only makes sense against a terminal; over a pipe the
        // DSR reply would never come.
        let cols = if is_a_tty(borrow_fd(in_fd)) {
            get_columns(&mut input, &mut output)
        } else {
            DEFAULT_TERMINAL_COLUMNS
        };

        Self {
            input: Box::new(input),
            output: Box::new(output),
            error: Box::new(FdWriter::new(err_fd)),
            in_fd: Some(in_fd),
            prompt: prompt.into(),
            cols,
            multiline: false,
            raw_mode: None,
            line: LineState::new(),
            history: History::new(),
            completer: None,
            hinter: None,
        }
    }

    /// Session over injected devices, for tests and embedders. The devices
    /// are treated as a raw-capable terminal of the given width; termios
    /// calls are skipped.
    #[must_use]
    pub fn with_devices(
        input: InputDevice,
        output: OutputDevice,
        error: OutputDevice,
        prompt: impl Into<String>,
        cols: usize,
    ) -> Self {
        Self {
            input,
            output,
            error,
            in_fd: None,
            prompt: prompt.into(),
            cols: cols.max(1),
            multiline: false,
            raw_mode: None,
            line: LineState::new(),
            history: History::new(),
            completer: None,
            hinter: None,
        }
    }

    /// Blocking read of one line.
    ///
    /// Dispatches on the input: not a TTY reads a plain unbounded line (no
    /// prompt, no editing); a terminal in the unsupported-`$TERM` blacklist
    /// gets the prompt plus a cooked-mode read; everything else runs the raw
    /// editing loop. On return the cursor sits on a fresh line and cooked
    /// mode is restored.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Io`] if reading keystrokes or writing the prompt
    /// failed mid-edit; the line is abandoned and the terminal restored.
    pub fn read_line(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        self.line.reset();
        self.history.reset_browse();

        if let Some(fd) = self.in_fd {
            if !is_a_tty(borrow_fd(fd)) {
                return self.read_line_no_tty();
            }
            if is_unsupported_term() {
                return self.read_line_unsupported_term();
            }
        }
        self.read_line_raw()
    }

    /// Empty the edit buffer and repaint. Hosts call this between commands.
    pub fn clear_buffer(&mut self) {
        self.line.clear();
        self.refresh_line(true);
    }

    /// Switch between single-line and multi-line rendering.
    pub fn set_multiline(&mut self, multiline: bool) {
        self.multiline = multiline;
    }

    /// Replace the prompt. Takes effect at the next refresh.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Install or remove the tab-completion provider for this session.
    pub fn set_completer(&mut self, completer: Option<Box<dyn Completer>>) {
        self.completer = completer;
    }

    /// Install or remove the hint provider for this session.
    pub fn set_hinter(&mut self, hinter: Option<Box<dyn Hinter>>) {
        self.hinter = hinter;
    }

    /// Append a line to the history. Returns whether it was stored (a repeat
    /// of the newest entry is suppressed).
    pub fn history_add(&mut self, line: &str) -> bool {
        self.history.add(line)
    }

    /// Change the history capacity (must be >= 1).
    ///
    /// # Errors
    ///
    /// [`ReadlineError::InvalidArgument`] when `max_len` is zero.
    pub fn history_set_max_len(&mut self, max_len: usize) -> Result<(), ReadlineError> {
        self.history.set_max_len(max_len)
    }

    /// Persist the history to `path` (mode `0600`).
    ///
    /// # Errors
    ///
    /// [`ReadlineError::HistoryIo`] with the underlying failure.
    pub fn history_save(&self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        self.history.save(path)
    }

    /// Load history entries from `path`.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::HistoryIo`] with the underlying failure (including a
    /// missing file); the store is left untouched.
    pub fn history_load(&mut self, path: impl AsRef<Path>) -> Result<(), ReadlineError> {
        self.history.load(path)
    }

    /// Read access to the history store.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) {
        use crate::ansi::CsiSequence;
        let _ = write!(
            self.output,
            "{}{}",
            CsiSequence::CursorHome,
            CsiSequence::EraseScreen
        );
        let _ = self.output.flush();
    }

    /// Leave raw mode (if engaged) and drop the history. Idempotent; safe to
    /// register at process exit so a crash mid-edit cannot leave the TTY
    /// scrambled.
    pub fn restore(&mut self) {
        self.release_raw_mode();
        self.history.clear();
    }

    // Raw-mode bookkeeping. Sessions over injected devices have no
    // descriptor to toggle, so both are no-ops there.

    pub(crate) fn engage_raw_mode(&mut self) -> Result<(), ReadlineError> {
        if let Some(fd) = self.in_fd {
            self.raw_mode = Some(enable_raw_mode(borrow_fd(fd))?);
        }
        Ok(())
    }

    pub(crate) fn release_raw_mode(&mut self) {
        if let (Some(fd), Some(saved)) = (self.in_fd, self.raw_mode.take()) {
            disable_raw_mode(borrow_fd(fd), &saved);
        }
    }

    /// The TTY editing path: raw mode around the edit loop, then a fresh
    /// line for the host.
    fn read_line_raw(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        self.engage_raw_mode()?;
        let outcome = self.edit_loop();
        self.release_raw_mode();

        // Cooked mode again: LF gets its CR back from the line discipline.
        let _ = self.output.write_all(b"\n");
        let _ = self.output.flush();

        if let Ok(ReadlineEvent::Line(_)) = &outcome {
            let _ = self.output.write_all(b"\r");
            let _ = self.output.flush();
        }
        outcome
    }

    /// Input is a pipe or file: one plain line, no length bound.
    fn read_line_no_tty(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        let mut line: Vec<u8> = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            let n = self.input.read(&mut byte)?;
            if n == 0 {
                if line.is_empty() {
                    return Ok(ReadlineEvent::Eof);
                }
                break;
            }
            if byte[0] == b'\n' {
                break;
            }
            line.push(byte[0]);
        }
        Ok(ReadlineEvent::Line(
            String::from_utf8_lossy(&line).into_owned(),
        ))
    }

    /// `$TERM` cannot handle escape sequences: prompt plus a cooked-mode
    /// read, capped at the line buffer size, no editing.
    fn read_line_unsupported_term(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()?;

        let mut line: Vec<u8> = Vec::new();
        let mut saw_any = false;
        while line.len() < LINE_BUFFER_MAX - 1 {
            let mut byte = [0u8; 1];
            let n = self.input.read(&mut byte)?;
            if n == 0 {
                break;
            }
            saw_any = true;
            if byte[0] == b'\n' {
                break;
            }
            line.push(byte[0]);
        }
        if !saw_any {
            return Ok(ReadlineEvent::Eof);
        }

        while line.last().is_some_and(|b| *b == b'\r') {
            line.pop();
        }
        let _ = self.output.write_all(b"\r");
        let _ = self.output.flush();
        Ok(ReadlineEvent::Line(
            String::from_utf8_lossy(&line).into_owned(),
        ))
    }
}

/// Restore the terminal when the session goes away, whatever the path.
impl Drop for Readline {
    fn drop(&mut self) {
        self.release_raw_mode();
    }
}
