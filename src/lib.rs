// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `r3bl_readline_sync` library is a small, synchronous, blocking line
//! editor for POSIX terminals. Each call to [`Readline::read_line`] puts the
//! terminal in raw mode, runs an interactive editing loop (cursor movement,
//! kill-line and kill-word deletions, history recall, tab-completion,
//! optional hints to the right of the input), and produces one finished
//! line.
//!
//! It is the deliberate synchronous counterpart to `r3bl_terminal_async`: same
//! problem domain, no async runtime. Use this crate when your host program is
//! a plain blocking REPL, shell, or diagnostic CLI that just needs a line at a
//! time.
//!
//! # Why use this crate
//!
//! 1. [`std::io::BufRead::read_line`] gives you cooked-mode input: no cursor
//!    movement, no history, no completion. This crate gives you all three in
//!    about the footprint of the classic C `linenoise` library.
//! 2. No runtime, no threads, no global state. Every piece of state
//!    (including the completion and hints callbacks) lives inside the
//!    [`Readline`] session, so two independent sessions can coexist.
//! 3. Degrades gracefully: when the input is not a TTY (pipe, file redirect)
//!    it reads a plain unbounded line; on terminals that cannot handle escape
//!    sequences (`$TERM` in `dumb`, `cons25`, `emacs`) it falls back to a
//!    prompt plus a cooked-mode read.
//!
//! # Features
//!
//! - Single-line editing with a sliding window when the line outgrows the
//!   terminal width, or multi-line editing ([`Readline::set_multiline`]).
//! - Emacs-style key bindings: Ctrl-A/E, Ctrl-B/F, Ctrl-K/U/W, Ctrl-T,
//!   Ctrl-P/N, Ctrl-L, plus arrows, Home/End, Delete, Backspace.
//! - Bounded history with duplicate suppression, file load/save
//!   ([`Readline::history_load`], [`Readline::history_save`]; files are
//!   created with mode `0600`).
//! - Tab-completion via a session-scoped [`Completer`]; repeated TAB cycles
//!   candidates, ESC restores the original line.
//! - Ghost-text hints via a session-scoped [`Hinter`], rendered to the right
//!   of the input with optional color and bold styling.
//! - Dependency-injected devices: construct with [`Readline::with_devices`]
//!   to drive the full editing loop from in-memory buffers in tests.
//!
//! # How to use this crate
//!
//! ```no_run
//! use r3bl_readline_sync::{Readline, ReadlineEvent};
//!
//! fn main() -> Result<(), r3bl_readline_sync::ReadlineError> {
//!     let mut rl = Readline::new("> ");
//!     loop {
//!         match rl.read_line()? {
//!             ReadlineEvent::Line(line) => {
//!                 println!("echo: {line}");
//!                 rl.history_add(&line);
//!             }
//!             ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Run `cargo run --example shell` for a complete REPL with completion,
//! hints, and a persistent history file.
//!
//! # Scope
//!
//! POSIX only (termios). Input is treated as a byte stream and one byte
//! occupies one display column; grapheme-cluster width accounting is out of
//! scope. There is no incremental history search and no syntax highlighting
//! of the edit buffer (only the hint text is styled).

// Attach sources.
pub mod ansi;
pub mod public_api;
pub mod readline_impl;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export the public API.
pub use public_api::*;
pub use readline_impl::history::History;

// Type aliases.

/// Byte source the editor reads keystrokes from. Injectable for tests.
pub type InputDevice = Box<dyn std::io::Read + Send>;

/// Byte sink the editor renders to. Injectable for tests.
pub type OutputDevice = Box<dyn std::io::Write + Send>;

// Constants.

/// Hard cap on the edit buffer in bytes, terminator slot included; the
/// longest editable line is one byte less.
pub const LINE_BUFFER_MAX: usize = 4096;

/// Default bound on the number of retained history entries.
pub const HISTORY_DEFAULT_MAX_LEN: usize = 100;

/// Column count assumed when the terminal cannot report its width.
pub const DEFAULT_TERMINAL_COLUMNS: usize = 80;

/// `$TERM` values known to not understand the escape sequences the renderer
/// emits. Matched case-insensitively.
pub const UNSUPPORTED_TERMINALS: &[&str] = &["dumb", "cons25", "emacs"];
