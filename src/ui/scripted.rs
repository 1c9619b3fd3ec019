use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use super::Console;

/// Console replaying prepared answers and recording everything written to it
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: RefCell<VecDeque<String>>,
    output: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConsole {
    /// Create a console without any answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console answering prompts with the given lines, in order
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Lines written to regular output, empty lines included
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// Lines written to error output
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Messages of all prompts and confirmations shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Answers not consumed yet
    pub fn remaining_answers(&self) -> usize {
        self.answers.borrow().len()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.output.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn write_error_line(&self, line: &str) -> io::Result<()> {
        self.errors.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn prompt(&self, message: &str) -> io::Result<String> {
        self.prompts.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}
