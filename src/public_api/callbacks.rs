// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Host-supplied completion and hint providers.
//!
//! Both are session-scoped: register them with
//! [`crate::Readline::set_completer`] / [`crate::Readline::set_hinter`] and
//! two independent sessions can carry different providers. Plain closures
//! implement both traits via the blanket impls.

/// Supplies tab-completion candidates for the current input.
///
/// Invoked when the user presses TAB. An empty vector rings the bell and
/// editing resumes; otherwise further TAB presses cycle the candidates and
/// any other key commits the one on display.
pub trait Completer {
    fn complete(&self, input: &str) -> Vec<String>;
}

impl<F> Completer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn complete(&self, input: &str) -> Vec<String> {
        self(input)
    }
}

/// Ghost text shown to the right of the input: suggestion text plus optional
/// ANSI styling. Erased on the next refresh, never editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub text: String,

    /// ANSI foreground color code (30-37, 90-97). `None` renders unstyled
    /// unless `bold` is set, in which case white (37) is assumed.
    pub color: Option<u8>,

    pub bold: bool,
}

impl Hint {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    #[must_use]
    pub fn color(mut self, color: u8) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Supplies the hint for the current input, re-queried at every refresh.
pub trait Hinter {
    fn hint(&self, input: &str) -> Option<Hint>;
}

impl<F> Hinter for F
where
    F: Fn(&str) -> Option<Hint>,
{
    fn hint(&self, input: &str) -> Option<Hint> {
        self(input)
    }
}
