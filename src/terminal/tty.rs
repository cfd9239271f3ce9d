// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! TTY detection and the unsupported-terminal blacklist.

use crate::UNSUPPORTED_TERMINALS;
use rustix::fd::BorrowedFd;

/// Whether `fd` refers to a terminal.
#[must_use]
pub fn is_a_tty(fd: BorrowedFd<'_>) -> bool {
    rustix::termios::isatty(fd)
}

/// Whether `$TERM` names a terminal known to not understand basic escape
/// sequences. Such terminals get the prompt-plus-cooked-read fallback
/// instead of the editing loop.
#[must_use]
pub fn is_unsupported_term() -> bool {
    match std::env::var("TERM") {
        Ok(term) => term_is_unsupported(&term),
        Err(_) => false,
    }
}

fn term_is_unsupported(term: &str) -> bool {
    UNSUPPORTED_TERMINALS
        .iter()
        .any(|t| term.eq_ignore_ascii_case(t))
}

#[cfg(test)]
mod tests {
    use super::term_is_unsupported;

    #[test]
    fn test_blacklist_is_case_insensitive() {
        assert!(term_is_unsupported("dumb"));
        assert!(term_is_unsupported("DUMB"));
        assert!(term_is_unsupported("Emacs"));
        assert!(term_is_unsupported("cons25"));
        assert!(!term_is_unsupported("xterm-256color"));
        assert!(!term_is_unsupported(""));
    }
}
