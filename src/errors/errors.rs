use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Lexical errors come from the scanner, everything else from the parser.
    pub fn is_lexical(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnterminatedLiteral { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParse { .. } => "NoPrefixParse",
            ErrorImpl::InvalidObjectKey { .. } => "InvalidObjectKey",
            ErrorImpl::InvalidConfigKey { .. } => "InvalidConfigKey",
            ErrorImpl::SemicolonSeparator => "SemicolonSeparator",
            ErrorImpl::SameLineStatement { .. } => "SameLineStatement",
            ErrorImpl::MissingThrowExpression => "MissingThrowExpression",
            ErrorImpl::TryWithoutHandler => "TryWithoutHandler",
            ErrorImpl::ReservedKeyword { .. } => "ReservedKeyword",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidExport { .. } => "InvalidExport",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedLiteral { form, .. } => {
                ErrorTip::Suggestion(format!("close the {} before the end of the file", form))
            }
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("expected {}, got {}", expected, found))
            }
            ErrorImpl::NoPrefixParse { found } => {
                ErrorTip::Suggestion(format!("{} cannot start an expression", found))
            }
            ErrorImpl::InvalidObjectKey { .. } => ErrorTip::Suggestion(String::from(
                "object keys must be identifiers or strings",
            )),
            ErrorImpl::InvalidConfigKey { .. } => ErrorTip::Suggestion(String::from(
                "declaration keys must be identifiers or keywords",
            )),
            ErrorImpl::SemicolonSeparator => {
                ErrorTip::Suggestion(String::from("put each statement on its own line"))
            }
            ErrorImpl::SameLineStatement { .. } => {
                ErrorTip::Suggestion(String::from("put each statement on its own line"))
            }
            ErrorImpl::MissingThrowExpression => ErrorTip::None,
            ErrorImpl::TryWithoutHandler => ErrorTip::Suggestion(String::from(
                "add a `catch (e) { ... }` or `finally { ... }` block",
            )),
            ErrorImpl::ReservedKeyword { keyword } => {
                ErrorTip::Suggestion(format!("`{}` is reserved for future use", keyword))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("invalid number: `{}`", token))
            }
            ErrorImpl::InvalidExport { .. } => ErrorTip::Suggestion(String::from(
                "only declarations and assignments can be exported",
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "move inner parts into separate assignments",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.internal_error {
            // The position is part of the message itself
            ErrorImpl::UnterminatedLiteral { .. } => write!(f, "{}", self.internal_error),
            _ => write!(f, "{} at {}", self.internal_error, self.position),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated {form} starting at {start}")]
    UnterminatedLiteral { form: String, start: Position },
    #[error("expected {expected}, got {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("no prefix parse function for {found}")]
    NoPrefixParse { found: String },
    #[error("invalid object key: {found}")]
    InvalidObjectKey { found: String },
    #[error("invalid config key: {found}")]
    InvalidConfigKey { found: String },
    #[error("semicolons are not allowed as statement separators; use newlines instead")]
    SemicolonSeparator,
    #[error("unexpected token {found} on same line as previous statement; expected newline")]
    SameLineStatement { found: String },
    #[error("throw statement requires an expression")]
    MissingThrowExpression,
    #[error("try statement must have at least one 'catch' or 'finally' clause")]
    TryWithoutHandler,
    #[error("'{keyword}' is a reserved keyword")]
    ReservedKeyword { keyword: String },
    #[error("could not parse {token:?} as number")]
    NumberParseError { token: String },
    #[error("cannot export {found}")]
    InvalidExport { found: String },
    #[error("nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Ordered sink shared by the lexer and the parser.
///
/// Entries whose rendered text is identical to an earlier entry are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { entries: vec![] }
    }

    /// Records `error` unless an identical message is already present.
    /// Returns whether it was recorded.
    pub fn push(&mut self, error: Error) -> bool {
        let message = error.to_string();
        if self.entries.iter().any(|existing| existing.to_string() == message) {
            return false;
        }

        self.entries.push(error);
        true
    }

    pub fn errors(&self) -> Vec<String> {
        self.entries.iter().map(|error| error.to_string()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
