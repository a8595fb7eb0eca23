use crate::error::GenerationError;
use std::fmt;

/// Rendered text of [`Summary::Empty`].
pub const NO_TEXT_MESSAGE: &str = "No text provided for summarization.";

/// Rendered text of [`Summary::TooShort`].
pub const TOO_SHORT_MESSAGE: &str = "Text is too short to summarize effectively.";

/// Prefix of the rendered text of [`Summary::Failed`].
pub const ERROR_PREFIX: &str = "Error during summarization: ";

/// Inputs shorter than this many characters are not sent to the model.
pub const MIN_INPUT_CHARS: usize = 100;

/// Whitespace test used to detect blank input. Besides Unicode whitespace it
/// treats the ASCII file/group/record/unit separators (U+001C..=U+001F) as
/// blank.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True when `text` is empty or made only of blank characters.
pub fn is_blank(text: &str) -> bool {
    text.trim_matches(is_blank_char).is_empty()
}

/// Outcome of summarizing one text.
///
/// `Display` renders the outcome as a single string: the summary itself, one
/// of the two fixed validation messages, or an error message starting with
/// [`ERROR_PREFIX`]. Match on the variants to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// The input was empty or only whitespace.
    Empty,
    /// The input was below [`MIN_INPUT_CHARS`] characters.
    TooShort,
    /// The model produced a summary.
    Success(String),
    /// Generation failed.
    Failed(GenerationError),
}

impl Summary {
    pub fn is_success(&self) -> bool {
        matches!(self, Summary::Success(_))
    }

    /// The generated summary, if there is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Summary::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            Summary::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Flatten into the single-string form.
    pub fn into_text(self) -> String {
        match self {
            Summary::Success(text) => text,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Empty => f.write_str(NO_TEXT_MESSAGE),
            Summary::TooShort => f.write_str(TOO_SHORT_MESSAGE),
            Summary::Success(text) => f.write_str(text),
            Summary::Failed(err) => write!(f, "{}{}", ERROR_PREFIX, err),
        }
    }
}
