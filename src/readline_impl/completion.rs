// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The TAB completion sub-mode.
//!
//! Entered from the editing loop when TAB is pressed with a completer
//! installed. Cycles through the candidates plus one extra position meaning
//! "the original line"; the candidate on display is rendered by temporarily
//! swapping the buffer, so the real line is only mutated on commit.

use super::event_loop::key;
use crate::{Readline, ReadlineError};

impl Readline {
    /// Run the completion sub-mode.
    ///
    /// Returns `None` when the main loop should read the next key itself
    /// (no candidates, ESC cancel, or EOF), or `Some(byte)` when a
    /// non-cycling key arrived: the candidate on display (if any) has been
    /// committed and the byte must be re-dispatched by the caller.
    pub(crate) fn complete_line(&mut self) -> Result<Option<u8>, ReadlineError> {
        let input = self.line.to_text();
        let candidates = match &self.completer {
            Some(completer) => completer.complete(&input),
            None => return Ok(None),
        };

        if candidates.is_empty() {
            self.ring_bell();
            return Ok(None);
        }

        // Positions 0..N show candidates; N shows the original buffer.
        let mut shown = 0usize;
        loop {
            if shown < candidates.len() {
                let saved = self.line.save_content();
                self.line.load(candidates[shown].as_bytes());
                self.refresh_line(true);
                self.line.restore_content(saved);
            } else {
                self.refresh_line(true);
            }

            let Some(c) = self.read_byte()? else {
                return Ok(None);
            };

            match c {
                key::TAB => {
                    shown = (shown + 1) % (candidates.len() + 1);
                    if shown == candidates.len() {
                        self.ring_bell();
                    }
                }
                key::ESC => {
                    // Re-show the original buffer and resume normal editing.
                    if shown < candidates.len() {
                        self.refresh_line(true);
                    }
                    return Ok(None);
                }
                other => {
                    if shown < candidates.len() {
                        self.line.load(candidates[shown].as_bytes());
                    }
                    return Ok(Some(other));
                }
            }
        }
    }
}
