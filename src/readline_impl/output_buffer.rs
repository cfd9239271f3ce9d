// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Single-flush output composition.
//!
//! The render engine composes a complete refresh (cursor moves, prompt,
//! buffer, hints, trailing erase) here and emits it with one write, so a slow
//! terminal never shows a half-painted frame.

use crate::ansi::CsiSequence;
use std::io::Write;

/// Append-only byte buffer flushed in a single write.
#[derive(Debug, Default)]
pub(crate) struct OutputBuffer {
    bytes: Vec<u8>,
}

impl OutputBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.bytes.extend_from_slice(s.as_bytes());
    }

    pub(crate) fn push_seq(&mut self, seq: CsiSequence) {
        self.push_str(&seq.to_string());
    }

    /// One write, one flush. Errors are swallowed: the refresh is a
    /// best-effort display and there is no recovery path mid-edit.
    pub(crate) fn flush_to(self, term: &mut dyn Write) {
        if term.write_all(&self.bytes).is_err() {
            return;
        }
        let _ = term.flush();
    }
}
