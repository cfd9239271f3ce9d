// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The core editing loop: read one byte, decode, dispatch, repaint.
//!
//! The decoder recognizes the emacs-style control bytes plus the liberal
//! two-byte (three for CSI digit forms) ESC sequences; unknown sequences are
//! silently discarded to tolerate terminal variation. States: idle, inside
//! an ESC sequence (one or two bytes deep, or after a CSI digit), or the
//! completion sub-mode in [`super::completion`]. Terminal states are ENTER
//! (line done) and CTRL-C / CTRL-D-at-empty (interrupt / EOF sentinels).

use super::history::HistoryDirection;
use crate::{Readline, ReadlineError, ReadlineEvent};
use std::io::{Read, Write};

/// The byte values the dispatcher matches on.
pub(crate) mod key {
    pub const CTRL_A: u8 = 1;
    pub const CTRL_B: u8 = 2;
    pub const CTRL_C: u8 = 3;
    pub const CTRL_D: u8 = 4;
    pub const CTRL_E: u8 = 5;
    pub const CTRL_F: u8 = 6;
    pub const CTRL_H: u8 = 8;
    pub const TAB: u8 = 9;
    pub const CTRL_K: u8 = 11;
    pub const CTRL_L: u8 = 12;
    pub const ENTER: u8 = 13;
    pub const CTRL_N: u8 = 14;
    pub const CTRL_P: u8 = 16;
    pub const CTRL_T: u8 = 20;
    pub const CTRL_U: u8 = 21;
    pub const CTRL_W: u8 = 23;
    pub const ESC: u8 = 27;
    pub const BACKSPACE: u8 = 127;
}

impl Readline {
    /// One blocking byte from the input device. `None` is end of input.
    pub(crate) fn read_byte(&mut self) -> Result<Option<u8>, ReadlineError> {
        let mut byte = [0u8; 1];
        let n = self.input.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }

    /// The interactive editing loop. Expects raw mode to be engaged.
    ///
    /// Writes the prompt, appends the scratch history slot, then dispatches
    /// bytes until ENTER (line), CTRL-C (interrupted), CTRL-D on an empty
    /// line (EOF), or end of input (line as typed so far).
    pub(crate) fn edit_loop(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()?;

        // The newest history slot mirrors the in-progress line while the
        // user browses; see the history module docs.
        self.history.push_scratch();

        loop {
            let Some(byte) = self.read_byte()? else {
                return Ok(ReadlineEvent::Line(self.line.to_text()));
            };

            let mut c = byte;
            if c == key::TAB && self.completer.is_some() {
                match self.complete_line()? {
                    None => continue,
                    Some(next) => c = next,
                }
            }

            match c {
                key::ENTER => {
                    self.history.pop_scratch();
                    if self.multiline && self.line.move_end() {
                        self.refresh_line(true);
                    }
                    if self.hinter.is_some() {
                        // Repaint without the hint so the finished line is
                        // left as the user typed it.
                        self.refresh_line(false);
                    }
                    return Ok(ReadlineEvent::Line(self.line.to_text()));
                }
                key::CTRL_C => {
                    return Ok(ReadlineEvent::Interrupted);
                }
                key::BACKSPACE | key::CTRL_H => {
                    if self.line.backspace() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_D => {
                    // Delete forward, or signal EOF on an empty line.
                    if self.line.is_empty() {
                        self.history.pop_scratch();
                        return Ok(ReadlineEvent::Eof);
                    }
                    if self.line.delete() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_T => {
                    if self.line.transpose() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_B => {
                    if self.line.move_left() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_F => {
                    if self.line.move_right() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_P => self.edit_history_next(HistoryDirection::Prev),
                key::CTRL_N => self.edit_history_next(HistoryDirection::Next),
                key::ESC => self.handle_escape()?,
                key::CTRL_U => {
                    self.line.kill_line();
                    self.refresh_line(true);
                }
                key::CTRL_K => {
                    self.line.kill_to_end();
                    self.refresh_line(true);
                }
                key::CTRL_A => {
                    if self.line.move_home() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_E => {
                    if self.line.move_end() {
                        self.refresh_line(true);
                    }
                }
                key::CTRL_L => {
                    self.clear_screen();
                    self.refresh_line(true);
                }
                key::CTRL_W => {
                    self.line.delete_prev_word();
                    self.refresh_line(true);
                }
                c if c >= 0x20 => self.edit_insert(c)?,
                _ => {
                    // Control byte with no binding: ignored.
                }
            }
        }
    }

    /// Decode the remainder of an ESC sequence.
    ///
    /// Reads up to two more bytes (three for the `CSI digit ~` forms). Only
    /// arrows, Home, End, and `CSI 3~` (Delete) are bound; everything else
    /// is discarded.
    fn handle_escape(&mut self) -> Result<(), ReadlineError> {
        let Some(seq0) = self.read_byte()? else {
            return Ok(());
        };
        let Some(seq1) = self.read_byte()? else {
            return Ok(());
        };

        if seq0 == b'[' {
            if seq1.is_ascii_digit() {
                let Some(seq2) = self.read_byte()? else {
                    return Ok(());
                };
                if seq2 == b'~' && seq1 == b'3' {
                    if self.line.delete() {
                        self.refresh_line(true);
                    }
                }
            } else {
                match seq1 {
                    b'A' => self.edit_history_next(HistoryDirection::Prev),
                    b'B' => self.edit_history_next(HistoryDirection::Next),
                    b'C' => {
                        if self.line.move_right() {
                            self.refresh_line(true);
                        }
                    }
                    b'D' => {
                        if self.line.move_left() {
                            self.refresh_line(true);
                        }
                    }
                    b'H' => {
                        if self.line.move_home() {
                            self.refresh_line(true);
                        }
                    }
                    b'F' => {
                        if self.line.move_end() {
                            self.refresh_line(true);
                        }
                    }
                    _ => {}
                }
            }
        } else if seq0 == b'O' {
            match seq1 {
                b'H' => {
                    if self.line.move_home() {
                        self.refresh_line(true);
                    }
                }
                b'F' => {
                    if self.line.move_end() {
                        self.refresh_line(true);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Debug helper: engage raw mode and echo scan codes for every key until
    /// the last four input bytes spell `quit`.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::NotATerminal`] / [`ReadlineError::Io`] from raw-mode
    /// engagement or device I/O. Raw mode is released on every path.
    pub fn print_key_codes(&mut self) -> Result<(), ReadlineError> {
        self.output.write_all(
            b"Key codes debugging mode.\n\
              Press keys to see scan codes. Type 'quit' at any time to exit.\n",
        )?;
        self.output.flush()?;

        self.engage_raw_mode()?;
        let outcome = self.key_codes_loop();
        self.release_raw_mode();
        outcome
    }

    fn key_codes_loop(&mut self) -> Result<(), ReadlineError> {
        let mut window = [b' '; 4];
        loop {
            let Some(c) = self.read_byte()? else {
                return Ok(());
            };

            window.rotate_left(1);
            window[3] = c;
            if &window == b"quit" {
                return Ok(());
            }

            let printable = if c.is_ascii_graphic() || c == b' ' {
                c as char
            } else {
                '?'
            };
            // Manual CR: raw mode has output post-processing disabled.
            let msg = format!("'{printable}' {c:02x} ({c}) (type quit to exit)\n\r");
            self.output.write_all(msg.as_bytes())?;
            self.output.flush()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_fixtures::StdoutMock;
    use crate::{Hint, Readline, ReadlineEvent};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    /// Editor over scripted input bytes and captured output.
    fn editor(input: &[u8], prompt: &str, cols: usize) -> (Readline, StdoutMock, StdoutMock) {
        let output = StdoutMock::default();
        let bell = StdoutMock::default();
        let rl = Readline::with_devices(
            Box::new(Cursor::new(input.to_vec())),
            Box::new(output.clone()),
            Box::new(bell.clone()),
            prompt,
            cols,
        );
        (rl, output, bell)
    }

    fn line(event: ReadlineEvent) -> String {
        match event {
            ReadlineEvent::Line(text) => text,
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_input_returns_line() {
        let (mut rl, output, _) = editor(b"hi\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(event, ReadlineEvent::Line("hi".into()));

        // The host decides whether it enters history.
        assert!(rl.history_add("hi"));
        assert_eq!(rl.history().entries(), ["hi"]);

        // Prompt written, bytes echoed by the append fast path, then the
        // fresh line + carriage return for the host.
        let frame = output.get_copy_of_buffer_as_string();
        assert!(frame.starts_with("> hi"), "frame: {frame:?}");
        assert!(frame.ends_with("\n\r"), "frame: {frame:?}");
    }

    #[test]
    fn test_long_line_slides_window_and_returns_all_bytes() {
        let (mut rl, output, _) = editor(b"abcdefghijklmno\r", "> ", 10);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "abcdefghijklmno");

        // Once the line outgrows the width, repaints keep the cursor in
        // frame: the last full repaint shows the tail window.
        let frame = output.get_copy_of_buffer_as_string();
        assert!(frame.contains("\r> ijklmno"), "frame: {frame:?}");
    }

    #[test]
    fn test_completion_commit_via_enter() {
        let (mut rl, _, _) = editor(b"h\t\r", "> ", 80);
        rl.set_completer(Some(Box::new(|input: &str| -> Vec<String> {
            if input.starts_with('h') {
                vec!["hello".into()]
            } else {
                vec![]
            }
        })));
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "hello");
    }

    #[test]
    fn test_completion_esc_restores_original() {
        let (mut rl, _, bell) = editor(b"h\t\t\x1b\r", "> ", 80);
        rl.set_completer(Some(Box::new(|input: &str| -> Vec<String> {
            if input.starts_with('h') {
                vec!["hello".into()]
            } else {
                vec![]
            }
        })));
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "h");
        // The second TAB wrapped back to the original slot and beeped.
        assert_eq!(bell.get_copy_of_buffer_as_string(), "\x07");
    }

    #[test]
    fn test_completion_empty_candidates_beeps_and_resumes() {
        let (mut rl, _, bell) = editor(b"x\tyz\r", "> ", 80);
        rl.set_completer(Some(Box::new(|_: &str| -> Vec<String> { vec![] })));
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "xyz");
        assert_eq!(bell.get_copy_of_buffer_as_string(), "\x07");
    }

    #[test]
    fn test_completion_other_key_commits_and_redispatches() {
        // '!' commits the candidate and is then inserted after it.
        let (mut rl, _, _) = editor(b"h\t!\r", "> ", 80);
        rl.set_completer(Some(Box::new(|input: &str| -> Vec<String> {
            if input.starts_with('h') {
                vec!["hello".into()]
            } else {
                vec![]
            }
        })));
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "hello!");
    }

    #[test]
    fn test_kill_prev_word_leaves_empty_line() {
        let (mut rl, _, _) = editor(b"abc\x17\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "");
    }

    #[test]
    fn test_kill_prev_word_keeps_earlier_words() {
        let (mut rl, _, _) = editor(b"a b c\x17\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "a b ");
    }

    #[test]
    fn test_up_up_recalls_second_newest_entry() {
        let (mut rl, _, _) = editor(b"\x1b[A\x1b[A\r", "> ", 80);
        rl.history_add("one");
        rl.history_add("two");
        rl.history_add("three");
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "two");
    }

    #[test]
    fn test_up_clamps_at_oldest_entry() {
        let (mut rl, _, _) = editor(b"\x1b[A\x1b[A\x1b[A\x1b[A\x1b[A\r", "> ", 80);
        rl.history_add("one");
        rl.history_add("two");
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "one");
    }

    #[test]
    fn test_down_returns_to_live_buffer() {
        let (mut rl, _, _) = editor(b"wip\x1b[A\x1b[B\r", "> ", 80);
        rl.history_add("old");
        let event = rl.read_line().unwrap();
        // Up recalls "old", down comes back to the in-progress line.
        assert_eq!(line(event), "wip");
    }

    #[test]
    fn test_ctrl_d_on_empty_line_is_eof() {
        let (mut rl, _, _) = editor(b"\x04", "> ", 80);
        assert_eq!(rl.read_line().unwrap(), ReadlineEvent::Eof);
    }

    #[test]
    fn test_ctrl_d_on_content_deletes_forward() {
        // Ctrl-B left over 'b', Ctrl-D deletes it.
        let (mut rl, _, _) = editor(b"ab\x02\x04\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "a");
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let (mut rl, output, _) = editor(b"abc\x03", "> ", 80);
        assert_eq!(rl.read_line().unwrap(), ReadlineEvent::Interrupted);
        // Still leaves the cursor on a fresh line.
        let frame = output.get_copy_of_buffer_as_string();
        assert!(frame.ends_with('\n'), "frame: {frame:?}");
    }

    #[test]
    fn test_eof_mid_edit_returns_line_so_far() {
        let (mut rl, _, _) = editor(b"ab", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "ab");
    }

    #[test]
    fn test_backspace_and_ctrl_h() {
        let (mut rl, _, _) = editor(b"abc\x7fd\x08e\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "abe");
    }

    #[test]
    fn test_transpose() {
        let (mut rl, _, _) = editor(b"ab\x02\x14\r", "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "ba");
    }

    #[test]
    fn test_home_end_and_kill_ops() {
        // Ctrl-A then Ctrl-K wipes the line from the start.
        let (mut rl, _, _) = editor(b"hello\x01\x0b\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "");

        // Ctrl-U wipes regardless of the cursor.
        let (mut rl, _, _) = editor(b"hello\x15\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "");

        // Home via ESC [ H, then typing prepends.
        let (mut rl, _, _) = editor(b"bc\x1b[HA\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "Abc");

        // End via ESC O F after Home.
        let (mut rl, _, _) = editor(b"ab\x1b[H\x1bOFc\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "abc");
    }

    #[test]
    fn test_delete_key_csi_3_tilde() {
        let (mut rl, _, _) = editor(b"abc\x1b[H\x1b[3~\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "bc");
    }

    #[test]
    fn test_unknown_escape_sequences_are_discarded() {
        // ESC [ Z (unbound) and ESC O Q (unbound) leave the line alone.
        let (mut rl, _, _) = editor(b"ab\x1b[Z\x1bOQc\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "abc");
    }

    #[test]
    fn test_unbound_control_bytes_are_ignored() {
        // Ctrl-G (7) and Ctrl-V (22) have no binding and insert nothing.
        let (mut rl, _, _) = editor(b"a\x07\x16b\r", "> ", 80);
        assert_eq!(line(rl.read_line().unwrap()), "ab");
    }

    #[test]
    fn test_hint_shown_while_typing_and_absent_after_enter() {
        let (mut rl, output, _) = editor(b"hello\r", "> ", 40);
        rl.set_hinter(Some(Box::new(|input: &str| -> Option<Hint> {
            (input == "hello").then(|| Hint::new(" World").color(35))
        })));
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "hello");

        let frame = output.get_copy_of_buffer_as_string();
        // The hint appeared once the buffer matched.
        assert!(frame.contains(" World"), "frame: {frame:?}");
        // The final repaint dropped it: the last frame before the closing
        // newline has no hint text.
        let last_repaint = frame.rfind("\r> hello").unwrap();
        assert!(!frame[last_repaint..].contains("World"), "frame: {frame:?}");
    }

    #[test]
    fn test_insert_full_buffer_keeps_line_at_capacity() {
        let mut input = vec![b'x'; crate::LINE_BUFFER_MAX + 50];
        input.push(b'\r');
        let (mut rl, _, _) = editor(&input, "> ", 80);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event).len(), crate::LINE_BUFFER_MAX - 1);
    }

    #[test]
    fn test_scratch_slot_lifecycle() {
        let (mut rl, _, _) = editor(b"hi\r", "> ", 80);
        rl.history_add("old");
        let _ = rl.read_line().unwrap();
        // The scratch slot was appended on entry and popped on ENTER.
        assert_eq!(rl.history().entries(), ["old"]);
    }

    #[test]
    fn test_browsing_writes_live_buffer_back_into_slot() {
        // Type "wip", go up, then ENTER on the recalled entry: the scratch
        // slot held "wip" and is popped; "old" is returned.
        let (mut rl, _, _) = editor(b"wip\x1b[A\r", "> ", 80);
        rl.history_add("old");
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "old");
        assert_eq!(rl.history().entries(), ["old"]);
    }

    #[test]
    fn test_multiline_enter_moves_to_end_first() {
        // In multi-line mode ENTER first jumps to the end of the line.
        let (mut rl, _, _) = editor(b"abcd\x02\x02\r", "> ", 80);
        rl.set_multiline(true);
        let event = rl.read_line().unwrap();
        assert_eq!(line(event), "abcd");
    }

    #[test]
    fn test_print_key_codes_until_quit() {
        let (mut rl, output, _) = editor(b"aquit", "> ", 80);
        rl.print_key_codes().unwrap();
        let frame = output.get_copy_of_buffer_as_string();
        assert!(frame.contains("'a' 61 (97)"), "frame: {frame:?}");
        // The trailing 't' of "quit" terminates the loop before echoing.
        assert!(!frame.contains("'t' 74"), "frame: {frame:?}");
    }

    #[test]
    fn test_clear_screen_emits_home_then_erase() {
        let (mut rl, output, _) = editor(b"", "> ", 80);
        rl.clear_screen();
        assert_eq!(output.get_copy_of_buffer_as_string(), "\x1b[H\x1b[2J");
    }
}
