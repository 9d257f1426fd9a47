//! Terminal input and output.
//!
//! The controller talks to the user only through [`Console`], so it can be
//! driven by a scripted implementation in tests.

use anyhow::Result;
use dialoguer::console::Term;
use dialoguer::{Confirm, Input, Select};
use phonebook_core::ValidationError;

use crate::strings;

/// Checks a line of user input before it is accepted.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), ValidationError>;

/// User interaction primitives used by the application.
pub trait Console {
    /// Shows `items` and returns the index of the chosen one.
    ///
    /// The cursor starts on `default`, or on the first item.
    fn select(&mut self, prompt: &str, items: &[String], default: Option<usize>)
    -> Result<usize>;

    /// Reads a line, asking again with the validator's message until it passes.
    ///
    /// `default` is offered as the pre-filled answer.
    fn input(&mut self, prompt: &str, default: Option<&str>, validate: Validator<'_>)
    -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Writes a line of text.
    fn print(&mut self, text: &str) -> Result<()>;

    /// Waits until the user presses a key.
    fn pause(&mut self) -> Result<()>;

    /// Clears the screen.
    fn clear(&mut self) -> Result<()>;
}

/// [`Console`] backed by the process terminal.
pub struct TerminalConsole {
    term: Term,
}

impl TerminalConsole {
    /// Creates a console writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<usize> {
        let choice = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default.filter(|&i| i < items.len()).unwrap_or(0))
            .interact_on(&self.term)?;
        Ok(choice)
    }

    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = input
            .validate_with(|value: &String| validate(value.trim()))
            .interact_text_on(&self.term)?;
        Ok(value.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact_on(&self.term)?;
        Ok(confirmed)
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.term.write_line(text)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.term.write_line("")?;
        self.term.write_line(strings::PRESS_ANY_KEY)?;
        self.term.read_key()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.term.clear_screen()?;
        Ok(())
    }
}

#[cfg(test)]
pub mod scripted {
    //! A [`Console`] that replays prepared answers and records output.

    use std::collections::VecDeque;

    use anyhow::{Result, bail};

    use super::{Console, Validator};

    /// One prepared answer.
    #[derive(Debug, Clone)]
    pub enum Answer {
        /// Choose the item with this label.
        Select(&'static str),
        /// Type this line.
        Input(&'static str),
        /// Accept the pre-filled input or the preselected item.
        Default,
        /// Answer a yes/no question.
        Confirm(bool),
    }

    /// Replays [`Answer`]s in order and records everything shown.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        answers: VecDeque<Answer>,
        /// Lines printed, including validation messages of rejected input.
        pub output: Vec<String>,
        /// Prompts shown, in order.
        pub prompts: Vec<String>,
    }

    impl ScriptedConsole {
        pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        pub fn printed(&self, text: &str) -> bool {
            self.output.iter().any(|line| line.contains(text))
        }

        pub fn finished(&self) -> bool {
            self.answers.is_empty()
        }

        fn next(&mut self, prompt: &str) -> Result<Answer> {
            self.prompts.push(prompt.to_string());
            match self.answers.pop_front() {
                Some(answer) => Ok(answer),
                None => bail!("no answer left for prompt {prompt:?}"),
            }
        }
    }

    impl Console for ScriptedConsole {
        fn select(
            &mut self,
            prompt: &str,
            items: &[String],
            default: Option<usize>,
        ) -> Result<usize> {
            match self.next(prompt)? {
                Answer::Select(label) => match items.iter().position(|i| i == label) {
                    Some(index) => Ok(index),
                    None => bail!("{label:?} not offered for {prompt:?}: {items:?}"),
                },
                Answer::Default => Ok(default.filter(|&i| i < items.len()).unwrap_or(0)),
                other => bail!("expected a selection for {prompt:?}, got {other:?}"),
            }
        }

        fn input(
            &mut self,
            prompt: &str,
            default: Option<&str>,
            validate: Validator<'_>,
        ) -> Result<String> {
            loop {
                let value = match self.next(prompt)? {
                    Answer::Input(text) => text.to_string(),
                    Answer::Default => match default {
                        Some(default) => default.to_string(),
                        None => bail!("no default for {prompt:?}"),
                    },
                    other => bail!("expected input for {prompt:?}, got {other:?}"),
                };
                match validate(&value) {
                    Ok(()) => return Ok(value),
                    Err(e) => self.output.push(e.message().to_string()),
                }
            }
        }

        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            match self.next(prompt)? {
                Answer::Confirm(yes) => Ok(yes),
                other => bail!("expected confirmation for {prompt:?}, got {other:?}"),
            }
        }

        fn print(&mut self, text: &str) -> Result<()> {
            self.output.extend(text.lines().map(str::to_string));
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }
    }
}
