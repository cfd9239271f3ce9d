// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared test doubles for the editing loop and renderer.

use std::io::{Result, Write};
use std::sync::{Arc, Mutex};

/// Cloneable capture device: every clone shares the same buffer, so a test
/// can hand one clone to the editor and keep another to inspect the output.
#[derive(Clone, Default)]
pub(crate) struct StdoutMock {
    pub buffer: Arc<Mutex<Vec<u8>>>,
}

impl StdoutMock {
    pub fn get_copy_of_buffer(&self) -> Vec<u8> {
        self.buffer.lock().unwrap().clone()
    }

    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8(buffer_data.clone()).expect("utf8")
    }

    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        let stripped = strip_ansi_escapes::strip(buffer_data.clone());
        String::from_utf8(stripped).expect("utf8")
    }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clones_share_one_buffer() {
        let mut mock = StdoutMock::default();
        let observer = mock.clone();

        mock.write_all(b"hello world").unwrap();
        mock.flush().unwrap();

        assert_eq!(observer.get_copy_of_buffer_as_string(), "hello world");
        assert_eq!(observer.get_copy_of_buffer(), b"hello world");
    }

    #[test]
    fn test_strip_ansi_accessor() {
        let mut mock = StdoutMock::default();
        mock.write_all(b"\x1b[31mred\x1b[0m").unwrap();
        assert_eq!(mock.get_copy_of_buffer_as_string_strip_ansi(), "red");
    }
}
