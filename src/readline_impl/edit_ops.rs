// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Edit operations composed with rendering: mutate the line state, then
//! repaint exactly once. The pure mutations live in [`super::line_state`];
//! this file owns the parts that need the whole session (hint lookup, the
//! insert fast path, history recall, the bell).

use super::history::HistoryDirection;
use super::render;
use crate::ansi::BELL;
use crate::{Readline, ReadlineError};
use std::io::Write;

impl Readline {
    /// Repaint the edited line. `with_hints` is false only for the final
    /// repaint on ENTER, so the finished line is left without ghost text.
    pub(crate) fn refresh_line(&mut self, with_hints: bool) {
        let hint = if with_hints {
            let input = self.line.to_text();
            self.hinter.as_ref().and_then(|h| h.hint(&input))
        } else {
            None
        };
        render::refresh_line(
            &mut self.line,
            &self.prompt,
            self.cols,
            self.multiline,
            hint.as_ref(),
            &mut *self.output,
        );
    }

    /// Insert one byte at the cursor.
    ///
    /// Appending to a line that fits the width needs no repaint: the byte
    /// itself is the frame. That fast path is only valid in single-line mode
    /// with no hinter installed (a hint would have to move). A write error
    /// here aborts the edit.
    pub(crate) fn edit_insert(&mut self, c: u8) -> Result<(), ReadlineError> {
        let was_append = self.line.pos() == self.line.len();
        if !self.line.insert(c) {
            return Ok(());
        }
        let fits = self.prompt.len() + self.line.len() < self.cols;
        if was_append && !self.multiline && fits && self.hinter.is_none() {
            self.output.write_all(&[c])?;
            self.output.flush()?;
        } else {
            self.refresh_line(true);
        }
        Ok(())
    }

    /// Replace the edited line with the next or previous history entry.
    ///
    /// The in-progress buffer is written back into the slot being left, so
    /// edits made while browsing survive the round trip. The index clamps at
    /// both ends without repainting.
    pub(crate) fn edit_history_next(&mut self, direction: HistoryDirection) {
        let len = self.history.len();
        if len <= 1 {
            return;
        }

        let leaving = len - 1 - self.history.index;
        self.history.replace(leaving, self.line.to_text());

        match direction {
            HistoryDirection::Prev => {
                if self.history.index + 1 >= len {
                    self.history.index = len - 1;
                    return;
                }
                self.history.index += 1;
            }
            HistoryDirection::Next => {
                if self.history.index == 0 {
                    return;
                }
                self.history.index -= 1;
            }
        }

        if let Some(entry) = self.history.entry(len - 1 - self.history.index) {
            let bytes = entry.as_bytes().to_vec();
            self.line.load(&bytes);
        }
        self.refresh_line(true);
    }

    /// Ring the bell on the diagnostic channel. Best effort.
    pub(crate) fn ring_bell(&mut self) {
        let _ = self.error.write_all(BELL.as_bytes());
        let _ = self.error.flush();
    }
}
