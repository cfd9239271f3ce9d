// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive REPL driving every feature of the editor: completion, hints,
//! multi-line mode, key-code debugging, and a persistent history file.
//!
//! ```bash
//! cargo run --example shell                # plain REPL
//! cargo run --example shell -- --multiline # multi-line editing
//! cargo run --example shell -- --keycodes  # scan-code debugging mode
//! ```
//!
//! Type text and press Enter to echo it; `/historylen N` resizes the
//! history; `/exit` (or Ctrl-C / Ctrl-D on an empty line) quits.

use miette::IntoDiagnostic;
use r3bl_readline_sync::{Hint, Readline, ReadlineEvent};

const HISTORY_FILE: &str = "history.txt";

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut rl = Readline::new("> ");

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--multiline" => {
                rl.set_multiline(true);
                println!("Multi-line mode enabled.");
            }
            "--keycodes" => {
                rl.print_key_codes().into_diagnostic()?;
                return Ok(());
            }
            other => {
                eprintln!("Usage: shell [--multiline] [--keycodes]");
                miette::bail!("unrecognized option: {other}");
            }
        }
    }

    rl.set_completer(Some(Box::new(|input: &str| -> Vec<String> {
        if input.eq_ignore_ascii_case("hello") {
            vec!["hello World".into()]
        } else if input.starts_with('h') {
            vec!["hello".into()]
        } else {
            vec![]
        }
    })));

    rl.set_hinter(Some(Box::new(|input: &str| -> Option<Hint> {
        input
            .eq_ignore_ascii_case("hello")
            .then(|| Hint::new(" World").color(35))
    })));

    // A missing history file on first run is expected.
    if rl.history_load(HISTORY_FILE).is_err() {
        tracing::debug!("no history file yet");
    }

    loop {
        match rl.read_line().into_diagnostic()? {
            ReadlineEvent::Line(line) => {
                if line == "/exit" {
                    break;
                } else if let Some(rest) = line.strip_prefix("/historylen") {
                    let new_len: usize = rest.trim().parse().unwrap_or(0);
                    if let Err(err) = rl.history_set_max_len(new_len) {
                        eprintln!("{err}");
                    }
                } else if line.starts_with('/') {
                    println!("Unrecognized command: {line}");
                } else if !line.is_empty() {
                    println!("echo: '{line}'");
                    rl.history_add(&line);
                    rl.history_save(HISTORY_FILE).into_diagnostic()?;
                }
            }
            ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
        }
    }

    rl.restore();
    Ok(())
}
