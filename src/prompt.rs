//! Line based user input. Every question is asked a bounded number of times.
use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::{constants::MAX_INPUT_ATTEMPTS, errors::CoffeeMakerError};

pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Prompter<R, W> {
        Prompter {
            input,
            output,
            max_attempts: MAX_INPUT_ATTEMPTS,
        }
    }

    pub fn say(&mut self, message: &str) -> Result<(), CoffeeMakerError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Prints `question` and reads one trimmed line
    pub fn read_line(&mut self, question: &str) -> Result<String, CoffeeMakerError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("[PROMPT] Input closed");
            return Err(CoffeeMakerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Asks `question` until `parse` accepts the answer. The rejection message of `parse` is
    /// printed after every invalid answer.
    pub fn ask<T, F>(&mut self, question: &str, parse: F) -> Result<T, CoffeeMakerError>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        for attempt in 1..=self.max_attempts {
            let answer = self.read_line(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    debug!("[PROMPT] Rejected answer {:?} (attempt {})", answer, attempt);
                    self.say(&rejection)?;
                }
            }
        }
        warn!("[PROMPT] Gave up after {} invalid answers", self.max_attempts);
        Err(CoffeeMakerError::TooManyInvalidAttempts)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
