//! Line-oriented prompt/answer channel over any reader and writer.

use std::io::{BufRead, Write};

use log::warn;

use crate::error::Result;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `prompt` and read one line.
    ///
    /// Returns `Ok(None)` when the answer could not be read (closed stream or
    /// read error). Only failures to write the prompt are errors.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                warn!("input closed while waiting for an answer");
                Ok(None)
            }
            Ok(_) => {
                let answer = line.strip_suffix('\n').unwrap_or(&line);
                let answer = answer.strip_suffix('\r').unwrap_or(answer);
                Ok(Some(answer.to_string()))
            }
            Err(err) => {
                warn!("failed to read answer: {err}");
                Ok(None)
            }
        }
    }

    /// Ask a yes/no question. Only "yes" (any case) counts as yes.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print a rule of `width` dashes.
    pub fn rule(&mut self, width: usize) -> Result<()> {
        self.say(&"-".repeat(width))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
