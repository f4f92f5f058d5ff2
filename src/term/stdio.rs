//! Terminal implementation of `Interaction`: stdout for output, one stdin
//! line per answer.

use std::io::{self, BufRead, Write};

use crate::core::error::PromptError;
use crate::core::ports::Interaction;

/// Reads answers from any line source; `StdinIo::stdin()` for the real terminal.
pub struct StdinIo<R> {
    input: R,
}

impl StdinIo<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self { input: io::stdin().lock() }
    }
}

impl<R: BufRead> StdinIo<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Interaction for StdinIo<R> {
    fn say(&mut self, text: &str) {
        println!("{text}");
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // EOF: treat as the user walking away
            println!();
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }
}
