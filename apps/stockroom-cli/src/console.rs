//! Line-oriented terminal I/O.
//!
//! Generic over the reader and writer so the menu loop can be driven from a
//! script in tests. End of input is reported as `None`, never as an error.
//! Bytes that are not UTF-8 (a Latin-1 terminal typing "Señal") are replaced
//! with U+FFFD instead of failing the read.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// ANSI: clear screen, cursor to top-left.
const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

pub const PAUSE_PROMPT: &str = "Presione Enter para continuar...";

pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Console {
            input,
            output,
            clear_screen,
        }
    }

    /// Writes `label` without a newline and reads one line.
    ///
    /// Returns the line without its terminator, or `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    /// Draws a horizontal rule of `width` copies of `ch`.
    pub fn rule(&mut self, ch: char, width: usize) -> io::Result<()> {
        let line: String = std::iter::repeat(ch).take(width).collect();
        writeln!(self.output, "{line}")
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SEQUENCE}")?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Waits for Enter. Returns `false` at end of input.
    pub fn pause(&mut self) -> io::Result<bool> {
        self.blank()?;
        Ok(self.prompt(PAUSE_PROMPT)?.is_some())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
