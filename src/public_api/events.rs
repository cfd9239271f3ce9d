// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;
use thiserror::Error;

/// Events emitted by [`crate::Readline::read_line`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadlineEvent {
    /// The user entered a line of text, returned without its terminator.
    Line(String),

    /// The user pressed Ctrl-D on an empty line, or the input reached end of
    /// file before any byte arrived.
    Eof,

    /// The user pressed Ctrl-C.
    Interrupted,
}

/// Errors surfaced by the session API. Such errors generally require specific
/// procedures to recover from; there is no internal retry.
#[derive(Debug, Error)]
pub enum ReadlineError {
    /// Raw mode was requested on a file descriptor that is not a terminal.
    #[error("file descriptor is not a terminal")]
    NotATerminal,

    /// Reading keystrokes or writing the prompt failed mid-edit. The current
    /// line is abandoned and cooked mode has been restored.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A history file operation failed. The store is left as it was.
    #[error("history file error")]
    HistoryIo(#[source] io::Error),

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
