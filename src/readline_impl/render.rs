// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line refresh: the single-line and multi-line repaint algorithms.
//!
//! Both algorithms compose the entire frame into an [`OutputBuffer`] and
//! flush it with one write. The multi-line variant keeps a render memo on
//! [`LineState`] (`oldpos`, `maxrows`) so it can erase the rows the previous
//! frame occupied before painting the new one.

use super::line_state::LineState;
use super::output_buffer::OutputBuffer;
use crate::ansi::{sgr_hint_style, CsiSequence, SGR_RESET};
use crate::public_api::callbacks::Hint;
use std::io::Write;

/// Repaint the edited line, dispatching on the multi-line flag.
pub(crate) fn refresh_line(
    state: &mut LineState,
    prompt: &str,
    cols: usize,
    multiline: bool,
    hint: Option<&Hint>,
    term: &mut dyn Write,
) {
    if multiline {
        refresh_multi_line(state, prompt, cols, hint, term);
    } else {
        refresh_single_line(state, prompt, cols, hint, term);
    }
}

/// Single-line repaint.
///
/// Slides a visible window over the buffer so that the prompt plus the
/// window fit the terminal width with the cursor always in frame, then
/// repaints in place: CR, prompt, window, hint, erase-to-EOL, cursor.
fn refresh_single_line(
    state: &LineState,
    prompt: &str,
    cols: usize,
    hint: Option<&Hint>,
    term: &mut dyn Write,
) {
    let plen = prompt.len();
    let buf = state.buf();
    let mut start = 0;
    let mut len = state.len();
    let mut pos = state.pos();

    // Slide the left edge right until the cursor is in frame. The `pos > 0`
    // guard clamps the degenerate case of a prompt wider than the terminal,
    // which would otherwise underflow.
    while pos > 0 && plen + pos >= cols {
        start += 1;
        len -= 1;
        pos -= 1;
    }
    // Truncate the tail so prompt plus window fit the width.
    while len > 0 && plen + len > cols {
        len -= 1;
    }

    let mut ab = OutputBuffer::new();
    ab.push_str("\r");
    ab.push_str(prompt);
    ab.push_bytes(&buf[start..start + len]);
    push_hint(&mut ab, state.len(), plen, cols, hint);
    ab.push_seq(CsiSequence::EraseToEndOfLine);
    // Place the cursor. A zero-count CUF is emitted when the cursor belongs
    // at the left edge; terminals leave it there.
    ab.push_str("\r");
    ab.push_seq(CsiSequence::CursorForward(pos + plen));
    ab.flush_to(term);
}

/// Multi-line repaint.
///
/// Row arithmetic is 1-based: `rows` is how many rows the prompt plus buffer
/// occupy, `rpos` the row the cursor was on at the previous refresh, `rpos2`
/// the row it must end on now. The previous frame (up to `maxrows` rows) is
/// erased top to bottom before the new one is painted.
fn refresh_multi_line(
    state: &mut LineState,
    prompt: &str,
    cols: usize,
    hint: Option<&Hint>,
    term: &mut dyn Write,
) {
    let plen = prompt.len();
    let len = state.len();
    let pos = state.pos();
    let mut rows = (plen + len + cols - 1) / cols;
    let rpos = (plen + state.oldpos + cols) / cols;
    let old_rows = state.maxrows;

    if rows > state.maxrows {
        state.maxrows = rows;
    }

    let mut ab = OutputBuffer::new();

    // Go down to the last row of the previous frame, then clear each row
    // while walking back up, finishing with the top row.
    if old_rows > rpos {
        ab.push_seq(CsiSequence::CursorDown(old_rows - rpos));
    }
    for _ in 1..old_rows {
        ab.push_str("\r");
        ab.push_seq(CsiSequence::EraseToEndOfLine);
        ab.push_seq(CsiSequence::CursorUp(1));
    }
    ab.push_str("\r");
    ab.push_seq(CsiSequence::EraseToEndOfLine);

    ab.push_str(prompt);
    ab.push_bytes(state.buf());
    push_hint(&mut ab, len, plen, cols, hint);

    // Cursor at end-of-line exactly on the right margin: emit a newline so
    // it does not stick to the margin, and account for the extra row.
    if pos > 0 && pos == len && (pos + plen) % cols == 0 {
        ab.push_str("\n\r");
        rows += 1;
        if rows > state.maxrows {
            state.maxrows = rows;
        }
    }

    // Go up from the bottom of the new frame to the cursor row.
    let rpos2 = (plen + pos + cols) / cols;
    if rows > rpos2 {
        ab.push_seq(CsiSequence::CursorUp(rows - rpos2));
    }

    // And across to the cursor column.
    let col = (plen + pos) % cols;
    ab.push_str("\r");
    if col > 0 {
        ab.push_seq(CsiSequence::CursorForward(col));
    }

    state.oldpos = pos;
    ab.flush_to(term);
}

/// Append the hint to the right of the buffer when it fits.
///
/// Only rendered while the prompt plus the whole buffer leave spare columns;
/// the hint is truncated to the remainder. A bold hint without a color gets
/// white (37). Styled hints are wrapped in an SGR pair.
fn push_hint(ab: &mut OutputBuffer, len: usize, plen: usize, cols: usize, hint: Option<&Hint>) {
    let Some(hint) = hint else { return };
    if plen + len >= cols {
        return;
    }

    let hint_max = cols - (plen + len);
    let shown = &hint.text.as_bytes()[..hint.text.len().min(hint_max)];

    let mut color = hint.color;
    if hint.bold && color.is_none() {
        color = Some(37);
    }
    let styled = color.is_some() || hint.bold;

    if styled {
        ab.push_str(&sgr_hint_style(hint.bold, color.unwrap_or(37)));
    }
    ab.push_bytes(shown);
    if styled {
        ab.push_str(SGR_RESET);
    }
}
