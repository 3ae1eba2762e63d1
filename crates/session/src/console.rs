//! Abstract prompt/response surface.
//!
//! The workflow is line-oriented and blocking: every prompt suspends until
//! the next input line is available. The trait keeps the workflow testable;
//! [`StdConsole`] is the real terminal, [`ScriptedConsole`] replays a canned
//! input sequence and captures everything written.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{SessionError, SessionResult};

/// A line-oriented prompt/response surface.
pub trait Console {
    /// Write one status line.
    fn say(&mut self, line: &str) -> SessionResult<()>;

    /// Write a prompt line, then block for the next input line.
    fn prompt(&mut self, line: &str) -> SessionResult<String>;
}

/// The process's stdin/stdout.
///
/// End-of-file on stdin is [`SessionError::InputClosed`]: a closed stream
/// can never produce a valid answer, so looping on it would spin forever.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn say(&mut self, line: &str) -> SessionResult<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn prompt(&mut self, line: &str) -> SessionResult<String> {
        {
            let mut out = io::stdout().lock();
            writeln!(out, "{line}")?;
            out.flush()?;
        }
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Scripted console for tests/dev.
///
/// Answers prompts from a fixed input sequence and keeps a transcript of
/// every line written (prompts included). Running out of scripted input
/// behaves like end-of-file.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything written so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Whether any written line contains `needle`.
    pub fn wrote(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    /// Scripted lines not yet consumed.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) -> SessionResult<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn prompt(&mut self, line: &str) -> SessionResult<String> {
        self.transcript.push(line.to_string());
        self.inputs.pop_front().ok_or(SessionError::InputClosed)
    }
}
