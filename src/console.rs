//! Line-oriented terminal I/O
//!
//! The shell and the contact builder never touch stdin/stdout directly.
//! They talk to a [`Console`], which is either the real [`Terminal`] or a
//! [`ScriptedConsole`] fed from a list of answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{cursor, execute, terminal};

/// A blocking source of answers and sink of output lines
pub trait Console {
    /// Shows `prompt` and reads one line of input.
    ///
    /// Returns `Ok(None)` once the input is exhausted. The trailing line
    /// terminator is stripped, other whitespace is left alone.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Writes one line of output
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Clears the screen if the console supports it
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console bound to the process's stdin and stdout
pub struct Terminal {
    clear_screen: bool,
}

impl Terminal {
    pub fn new(clear_screen: bool) -> Self {
        Self { clear_screen }
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout(), "{}", line)
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        // Piped output gets no escape codes
        if !self.clear_screen || !stdout.is_terminal() {
            return Ok(());
        }
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }
}

/// Console that replays canned answers and records everything written
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    lines: Vec<String>,
    clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines written so far, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All written lines joined with newlines
    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Number of times the screen was cleared
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
