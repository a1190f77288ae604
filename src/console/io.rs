//! Line-oriented terminal I/O.
//!
//! [`Console`] wraps any `BufRead`/`Write` pair so sessions can be driven by
//! stdin/stdout or by scripted input in tests.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crossterm::style::Stylize;

use crate::error::{EmsError, EmsResult};

/// Prompting and status output over a reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console. `color` enables ANSI styling of status lines.
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one trimmed line. End of input is `InputClosed`.
    pub fn read_line(&mut self) -> EmsResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EmsError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Writes `label` and reads the answer.
    pub fn prompt(&mut self, label: &str) -> EmsResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompts until `validate` accepts the answer.
    ///
    /// Validation failures are shown and the question repeated; any other
    /// error is returned.
    pub fn prompt_valid<T>(
        &mut self,
        label: &str,
        validate: impl Fn(&str) -> EmsResult<T>,
    ) -> EmsResult<T> {
        loop {
            let answer = self.prompt(label)?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(e @ EmsError::Validation { .. }) => self.error(e)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Like [`Console::prompt_valid`], but a blank answer skips the field.
    pub fn prompt_optional<T>(
        &mut self,
        label: &str,
        validate: impl Fn(&str) -> EmsResult<T>,
    ) -> EmsResult<Option<T>> {
        loop {
            let answer = self.prompt(label)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e @ EmsError::Validation { .. }) => self.error(e)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Prints a numbered list and returns the zero-based index picked.
    pub fn choose<T: Display>(&mut self, label: &str, options: &[T]) -> EmsResult<usize> {
        for (i, option) in options.iter().enumerate() {
            self.line(format!("{}. {option}", i + 1))?;
        }
        let count = options.len();
        self.prompt_valid(label, |raw| match raw.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
            _ => Err(EmsError::validation(
                "choice",
                format!("enter a number from 1 to {count}"),
            )),
        })
    }

    /// Prints a titled menu and reads the raw choice.
    pub fn menu(&mut self, title: &str, items: &[&str]) -> EmsResult<String> {
        self.heading(title)?;
        for (i, item) in items.iter().enumerate() {
            self.line(format!("{}. {item}", i + 1))?;
        }
        self.prompt("Enter your choice: ")
    }

    /// Writes a plain line.
    pub fn line(&mut self, text: impl Display) -> EmsResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Writes a pre-rendered block, such as a table.
    pub fn block(&mut self, text: &str) -> EmsResult<()> {
        write!(self.output, "{text}")?;
        if !text.ends_with('\n') {
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// Writes a section heading.
    pub fn heading(&mut self, text: &str) -> EmsResult<()> {
        let text = format!("\n--- {text} ---");
        if self.color {
            self.line(text.bold().cyan())
        } else {
            self.line(text)
        }
    }

    /// Writes a success line.
    pub fn success(&mut self, text: impl Display) -> EmsResult<()> {
        if self.color {
            self.line(text.to_string().green())
        } else {
            self.line(text)
        }
    }

    /// Writes a failure line.
    pub fn error(&mut self, text: impl Display) -> EmsResult<()> {
        if self.color {
            self.line(text.to_string().red())
        } else {
            self.line(text)
        }
    }

    /// Writes an informational line.
    pub fn info(&mut self, text: impl Display) -> EmsResult<()> {
        if self.color {
            self.line(text.to_string().yellow())
        } else {
            self.line(text)
        }
    }

    /// Reports a failed operation and lets the menu continue.
    ///
    /// Closed input and terminal I/O failures end the session instead.
    pub fn settle(&mut self, result: EmsResult<()>) -> EmsResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e @ (EmsError::InputClosed | EmsError::Io { .. })) => Err(e),
            Err(e) => self.error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_prompt_valid_repeats_until_accepted() {
        let mut c = console("12345\n9876543210\n");
        let number = c
            .prompt_valid("Contact: ", validation::contact_number)
            .unwrap();
        assert_eq!(number, "9876543210");

        let out = output(c);
        assert_eq!(out.matches("Contact: ").count(), 2);
        assert!(out.contains("Invalid contact_number"));
    }

    #[test]
    fn test_prompt_optional_blank_skips() {
        let mut c = console("\n");
        assert_eq!(c.prompt_optional("Age: ", validation::age).unwrap(), None);
    }

    #[test]
    fn test_end_of_input_is_input_closed() {
        let mut c = console("abc\n");
        let result = c.prompt_valid("Age: ", validation::age);
        assert!(matches!(result, Err(EmsError::InputClosed)));
    }

    #[test]
    fn test_choose_returns_zero_based_index() {
        let mut c = console("9\n2\n");
        let index = c.choose("Pick: ", &["IT", "Finance"]).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_settle_reports_and_continues() {
        let mut c = console("");
        assert!(c.settle(Err(EmsError::MustCheckInFirst)).is_ok());
        assert!(c.settle(Err(EmsError::InputClosed)).is_err());
        assert!(output(c).contains("You must check-in first!"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut c = console("");
        c.success("Saved").unwrap();
        assert_eq!(output(c), "Saved\n");
    }
}
