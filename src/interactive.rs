use inquire::{Confirm, InquireError, Select, Text};

/// A value to ask the user for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    pub question: String,
    pub help: String,
    /// When not empty the answer must be one of these.
    pub options: Vec<String>,
    pub default: Option<String>,
    pub required: bool,
}

impl Input {
    /// A required choice among `options`.
    pub fn select<S: AsRef<str>>(
        question: &str,
        help: &str,
        options: &[S],
        default: Option<&str>,
    ) -> Self {
        Self {
            question: question.to_owned(),
            help: help.to_owned(),
            options: options.iter().map(|o| o.as_ref().to_owned()).collect(),
            default: default.map(str::to_owned),
            required: true,
        }
    }

    /// A required free-form answer.
    pub fn text(question: &str, default: Option<&str>) -> Self {
        Self {
            question: question.to_owned(),
            default: default.map(str::to_owned),
            required: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("a value for '{0}' is required")]
    Required(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("unable to prompt: {0}")]
    Terminal(String),
}

impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Terminal(other.to_string()),
        }
    }
}

/// Resolves values that may come from a prompt.
pub trait Prompter {
    /// Whether answers come from a person. Resolution steps that only make
    /// sense with a person in the loop check this first.
    fn is_interactive(&self) -> bool;

    fn ask(&self, input: &Input) -> Result<String, PromptError>;
}

/// Asks for an explicit yes before a destructive operation.
pub trait Confirmer {
    fn confirm(&self, question: &str) -> Result<bool, PromptError>;
}

/// Answers every question with its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(&self, input: &Input) -> Result<String, PromptError> {
        match input.default.as_deref() {
            Some(default) if !default.is_empty() => Ok(default.to_owned()),
            _ if input.required => Err(PromptError::Required(input.question.clone())),
            _ => Ok(String::new()),
        }
    }
}

/// Prompts on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&self, input: &Input) -> Result<String, PromptError> {
        if input.options.is_empty() {
            return self.ask_text(input);
        }

        let mut options = input.options.clone();
        let cursor = match input.default.as_ref() {
            None => 0,
            Some(default) => match options.iter().position(|option| option == default) {
                Some(position) => position,
                None => {
                    // Keep a default that isn't a standard choice selectable.
                    options.insert(0, default.clone());
                    0
                }
            },
        };

        let mut prompt = Select::new(&input.question, options).with_starting_cursor(cursor);
        if !input.help.is_empty() {
            prompt = prompt.with_help_message(&input.help);
        }

        Ok(prompt.prompt()?)
    }
}

impl TerminalPrompter {
    fn ask_text(&self, input: &Input) -> Result<String, PromptError> {
        let mut prompt = Text::new(&input.question);
        if !input.help.is_empty() {
            prompt = prompt.with_help_message(&input.help);
        }
        if let Some(default) = input.default.as_deref() {
            prompt = prompt.with_default(default);
        }
        if input.required {
            prompt = prompt.with_validator(inquire::required!());
        }

        Ok(prompt.prompt()?.trim().to_owned())
    }
}

impl Confirmer for TerminalPrompter {
    fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        Ok(Confirm::new(&format!("Are you sure you want to {question}?"))
            .with_default(false)
            .prompt()?)
    }
}

/// Confirms everything, for `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _question: &str) -> Result<bool, PromptError> {
        Ok(true)
    }
}
