// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI escape sequence generation.
//!
//! The renderer stays deliberately cheap: the complete inventory is CR, EL 0,
//! CUF, CUB, CUU, CUD, DSR 6n, CUP home, ED 2, and one SGR pair for hint
//! styling. The fewer sequences emitted, the more terminals behave.

use std::fmt::{self, Display};

/// The two-byte Control Sequence Introducer prefix, `ESC [`.
pub const CSI_START: &str = "\x1b[";

/// First byte of every escape sequence.
pub const ESC_BYTE: u8 = 0x1b;

/// Resets all SGR attributes. Written after a styled hint.
pub const SGR_RESET: &str = "\x1b[0m";

/// Rings the terminal bell.
pub const BELL: &str = "\x07";

/// One CSI control sequence, rendered through [`Display`].
///
/// Parameters are emitted exactly as given, including a zero count where the
/// refresh algorithms produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiSequence {
    /// `CSI n C`: move the cursor right n columns.
    CursorForward(usize),
    /// `CSI n D`: move the cursor left n columns.
    CursorBackward(usize),
    /// `CSI n A`: move the cursor up n rows.
    CursorUp(usize),
    /// `CSI n B`: move the cursor down n rows.
    CursorDown(usize),
    /// `CSI 0 K`: erase from the cursor to the end of the line.
    EraseToEndOfLine,
    /// `CSI H`: cursor to the upper-left corner.
    CursorHome,
    /// `CSI 2 J`: erase the entire screen.
    EraseScreen,
    /// `CSI 6 n`: ask the terminal to report the cursor position as
    /// `CSI row ; col R`.
    QueryCursorPosition,
}

impl Display for CsiSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsiSequence::CursorForward(n) => write!(f, "{CSI_START}{n}C"),
            CsiSequence::CursorBackward(n) => write!(f, "{CSI_START}{n}D"),
            CsiSequence::CursorUp(n) => write!(f, "{CSI_START}{n}A"),
            CsiSequence::CursorDown(n) => write!(f, "{CSI_START}{n}B"),
            CsiSequence::EraseToEndOfLine => write!(f, "{CSI_START}0K"),
            CsiSequence::CursorHome => write!(f, "{CSI_START}H"),
            CsiSequence::EraseScreen => write!(f, "{CSI_START}2J"),
            CsiSequence::QueryCursorPosition => write!(f, "{CSI_START}6n"),
        }
    }
}

/// SGR prelude for a styled hint: `CSI bold ; color ; 49 m`.
///
/// The trailing `49` keeps the terminal's default background. Callers pair
/// this with [`SGR_RESET`].
#[must_use]
pub fn sgr_hint_style(bold: bool, color: u8) -> String {
    format!("{CSI_START}{};{};49m", u8::from(bold), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequences_render_byte_exact() {
        assert_eq!(CsiSequence::CursorForward(7).to_string(), "\x1b[7C");
        assert_eq!(CsiSequence::CursorBackward(12).to_string(), "\x1b[12D");
        assert_eq!(CsiSequence::CursorUp(1).to_string(), "\x1b[1A");
        assert_eq!(CsiSequence::CursorDown(3).to_string(), "\x1b[3B");
        assert_eq!(CsiSequence::EraseToEndOfLine.to_string(), "\x1b[0K");
        assert_eq!(CsiSequence::CursorHome.to_string(), "\x1b[H");
        assert_eq!(CsiSequence::EraseScreen.to_string(), "\x1b[2J");
        assert_eq!(CsiSequence::QueryCursorPosition.to_string(), "\x1b[6n");
    }

    #[test]
    fn test_sgr_hint_style() {
        assert_eq!(sgr_hint_style(false, 35), "\x1b[0;35;49m");
        assert_eq!(sgr_hint_style(true, 37), "\x1b[1;37;49m");
    }
}
