use logos::Span;
use std::fmt;

//===----------------------------------------------------------------------===//
// Error
//===----------------------------------------------------------------------===//

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SyntaxError(SyntaxError),
    ValueError(String),
    OverflowError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SyntaxError(e) => write!(f, "{}", e),
            Error::ValueError(e) => write!(f, "Value error: {}", e),
            Error::OverflowError(e) => write!(f, "Overflow error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

//===----------------------------------------------------------------------===//
// SyntaxError
//===----------------------------------------------------------------------===//

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    UnexpectedEOF { expected: Option<String> },
    UnexpectedToken { found: String, expected: String },
    InvalidCharacter { found: String },
    UnterminatedString,
    UnknownCommand { name: String },
    WrongArgumentCount { error_str: String },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxError::UnexpectedEOF { expected } => {
                write!(
                    f,
                    "Unexpected EOF: {}",
                    expected.clone().unwrap_or("None".to_string())
                )
            }
            SyntaxError::UnexpectedToken { found, expected } => {
                write!(f, "Unexpected token: {} (expected: {})", found, expected)
            }
            SyntaxError::InvalidCharacter { found } => {
                write!(f, "Invalid character: {}", found)
            }
            SyntaxError::UnterminatedString => write!(f, "Unterminated string"),
            SyntaxError::UnknownCommand { name } => {
                write!(f, "Unknown command: {}", name)
            }
            SyntaxError::WrongArgumentCount { error_str } => write!(f, "{}", error_str),
        }
    }
}

//===----------------------------------------------------------------------===//
// ErrorWithSpan
//===----------------------------------------------------------------------===//

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorWithSpan {
    pub error: Error,
    pub span: Span,
    pub source: String, // Keep original source for context
}

impl ErrorWithSpan {
    pub fn new(error: Error, span: Span, source: &str) -> Self {
        Self { error, span, source: source.to_string() }
    }

    /// Renders the error with the offending line and a caret underline
    /// below the span.
    pub fn format_error(&self) -> String {
        let start = self.span.start.min(self.source.len());
        let line_start = self.source[..start].rfind('\n').map(|pos| pos + 1).unwrap_or(0);

        let line_end = self.source[start..]
            .find('\n')
            .map(|pos| start + pos)
            .unwrap_or(self.source.len());

        let line_number = self.source[..start].matches('\n').count() + 1;
        let column = start - line_start + 1;

        let line_content = &self.source[line_start..line_end];
        let underline = " ".repeat(column - 1) + &"^".repeat(self.span.len().max(1));

        format!(
            "Error at ({}:{})\n{}\n{}\n{}",
            line_number, column, line_content, underline, self.error
        )
    }
}

impl fmt::Display for ErrorWithSpan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ErrorWithSpan {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_points_at_span() {
        let err = ErrorWithSpan::new(
            Error::SyntaxError(SyntaxError::UnknownCommand { name: "loop".to_string() }),
            0..4,
            "loop 1 2",
        );

        assert_eq!(
            err.format_error(),
            "Error at (1:1)\nloop 1 2\n^^^^\nUnknown command: loop"
        );
    }

    #[test]
    fn format_error_on_second_line() {
        let err = ErrorWithSpan::new(Error::ValueError("bad".to_string()), 10..12, "sum 1\nsum -1");

        let rendered = err.format_error();
        assert!(rendered.starts_with("Error at (2:5)\nsum -1\n    ^^\n"));
        assert!(rendered.ends_with("Value error: bad"));
    }
}
