//! Line-based prompts with bounded retry.
//!
//! Each question is asked until the answer parses, at most
//! `max_attempts` times. A rejected answer prints a hint and asks again;
//! end of input or running out of attempts is an error.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Attempts per question before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Why a question went unanswered.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing the prompt failed.
    #[error("prompt i/o failed: {0}")]
    Io(#[from] io::Error),
    /// Input closed before a valid answer.
    #[error("input ended before a valid answer to \"{prompt}\"")]
    Eof {
        /// The unanswered prompt.
        prompt: String,
    },
    /// Every attempt was rejected.
    #[error("no valid answer to \"{prompt}\" after {attempts} attempts")]
    TooManyAttempts {
        /// The unanswered prompt.
        prompt: String,
        /// Attempts made.
        attempts: usize,
    },
}

/// Asks questions on `output` and reads answers from `input`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// A prompter allowing [`DEFAULT_MAX_ATTEMPTS`] attempts per question.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Allow `attempts` attempts per question (at least one).
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// The output sink, for messages between questions.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, &'static str>,
    ) -> Result<T, PromptError> {
        let mut line = String::new();
        for _ in 0..self.max_attempts {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Eof {
                    prompt: prompt.to_owned(),
                });
            }
            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(hint) => writeln!(self.output, "{hint}")?,
            }
        }
        Err(PromptError::TooManyAttempts {
            prompt: prompt.to_owned(),
            attempts: self.max_attempts,
        })
    }

    /// A whole number greater than zero.
    pub fn positive_integer(&mut self, prompt: &str) -> Result<u64, PromptError> {
        self.ask(prompt, |s| match s.parse::<u64>() {
            Ok(0) => Err("Please enter a value greater than zero."),
            Ok(v) => Ok(v),
            Err(_) => Err("Please enter a whole number."),
        })
    }

    /// A finite number greater than zero.
    pub fn positive_number(&mut self, prompt: &str) -> Result<f64, PromptError> {
        self.ask(prompt, |s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            Ok(_) => Err("Please enter a value greater than zero."),
            Err(_) => Err("Please enter a number."),
        })
    }

    /// A probability in (0, 1].
    pub fn probability(&mut self, prompt: &str) -> Result<f64, PromptError> {
        self.ask(prompt, |s| match s.parse::<f64>() {
            Ok(p) if p > 0.0 && p <= 1.0 => Ok(p),
            _ => Err("Please enter a probability greater than 0 and at most 1."),
        })
    }

    /// One letter out of `options` (uppercase), case-insensitive.
    pub fn choice(&mut self, prompt: &str, options: &[char]) -> Result<char, PromptError> {
        let keyed: Vec<(char, char)> = options.iter().map(|&c| (c, c)).collect();
        self.select(prompt, &keyed)
    }

    /// The value keyed by the letter typed, matched case-insensitively.
    pub fn select<T: Copy>(
        &mut self,
        prompt: &str,
        options: &[(char, T)],
    ) -> Result<T, PromptError> {
        const HINT: &str = "Please choose one of the listed letters.";
        self.ask(prompt, |s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => options
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(&c))
                    .map(|&(_, value)| value)
                    .ok_or(HINT),
                _ => Err(HINT),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    fn transcript(p: &Prompter<&[u8], Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn retries_until_positive() {
        let mut p = prompter("abc\n0\n-3\n12\n");
        assert_eq!(p.positive_integer("Size: ").unwrap(), 12);
        let out = transcript(&p);
        assert_eq!(out.matches("Size: ").count(), 4);
        assert!(out.contains("greater than zero"));
    }

    #[test]
    fn numbers_reject_non_finite() {
        let mut p = prompter("inf\nNaN\n2.5\n");
        assert_eq!(p.positive_number("T: ").unwrap(), 2.5);
    }

    #[test]
    fn probability_bounds() {
        let mut p = prompter("0\n1.01\n1\n");
        assert_eq!(p.probability("p1: ").unwrap(), 1.0);
        let mut p = prompter("0.25\n");
        assert_eq!(p.probability("p1: ").unwrap(), 0.25);
    }

    #[test]
    fn choice_is_case_insensitive_and_single_letter() {
        let mut p = prompter("glauber\nx\n  k \n");
        assert_eq!(p.choice("[G/K]: ", &['G', 'K']).unwrap(), 'K');
    }

    #[test]
    fn select_returns_the_keyed_value() {
        let mut p = prompter("q\nb\n");
        assert_eq!(p.select("[A/B]: ", &[('A', 1), ('B', 2)]).unwrap(), 2);
        assert!(transcript(&p).contains("listed letters"));
    }

    #[test]
    fn eof_is_an_error() {
        let mut p = prompter("nope\n");
        assert!(matches!(
            p.positive_integer("Loops: "),
            Err(PromptError::Eof { .. })
        ));
    }

    #[test]
    fn attempts_are_bounded() {
        let mut p = prompter("a\nb\nc\nd\n").with_max_attempts(3);
        match p.choice("[V/D]: ", &['V', 'D']) {
            Err(PromptError::TooManyAttempts { attempts, .. }) => assert_eq!(attempts, 3),
            other => panic!("expected TooManyAttempts, got {other:?}"),
        }
    }
}
