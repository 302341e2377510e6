use logos::{Logos, Span};
use std::fmt;

use crate::error::{Error, ErrorWithSpan, SyntaxError};
use crate::value::{Number, Value};

//===----------------------------------------------------------------------===//
// Utils
//===----------------------------------------------------------------------===//

/// Unescapes a string literal by converting escape sequences to their actual characters.
/// Handles common escape sequences: \n, \t, \r, \", \\, and others.
fn unescape_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some('0') => result.push('\0'),
                Some(other) => {
                    // Unknown escapes are kept verbatim
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

//===----------------------------------------------------------------------===//
// Token
//===----------------------------------------------------------------------===//

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n,]+")]
pub enum Token {
    #[regex(r";[^\n]*")]
    Comment,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let slice = lex.slice();
        unescape_string(&slice[1..slice.len() - 1])
    })]
    Str(String),

    // Runs to EOF without a closing quote. Loses to `Str` whenever the
    // closing quote exists since that match is longer.
    #[regex(r#""([^"\\]|\\.)*"#, priority = 0)]
    UnterminatedStr,

    // Out-of-range literals fail the callback and surface as lexer errors
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*", |lex| lex.slice().to_owned())]
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Comment => write!(f, ";"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Nil => write!(f, "nil"),
            Token::Str(s) => write!(f, "{:?}", s),
            Token::UnterminatedStr => write!(f, "\""),
            Token::Int(int) => write!(f, "{}", int),
            Token::Float(float) => write!(f, "{}", float),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

/// A token together with its byte span in the source line.
#[derive(Debug, PartialEq, Clone)]
pub struct TokenAST {
    pub token: Token,
    pub span: Span,
}

//===----------------------------------------------------------------------===//
// Tokenizer
//===----------------------------------------------------------------------===//

pub fn tokenize(source: &str) -> Result<Vec<TokenAST>, ErrorWithSpan> {
    let mut lexer = Token::lexer(source);
    let mut tokens: Vec<TokenAST> = vec![];

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Comment) => continue,
            Ok(Token::UnterminatedStr) => {
                return Err(ErrorWithSpan::new(
                    Error::SyntaxError(SyntaxError::UnterminatedString),
                    lexer.span(),
                    source,
                ));
            }
            Ok(token) => tokens.push(TokenAST { token, span: lexer.span() }),
            Err(()) => {
                return Err(ErrorWithSpan::new(
                    Error::SyntaxError(SyntaxError::InvalidCharacter {
                        found: lexer.slice().to_string(),
                    }),
                    lexer.span(),
                    source,
                ));
            }
        }
    }

    Ok(tokens)
}

//===----------------------------------------------------------------------===//
// Command
//===----------------------------------------------------------------------===//

/// A single REPL request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `sum LIMIT` or `sum INDEX ACC LIMIT`
    Sum { index: i64, accumulator: Number, limit: i64 },
    /// `steps INDEX LIMIT`
    Steps { index: i64, limit: i64 },
    /// `truthy VALUE`
    Truthy(Value),
    /// `branch VALUE THEN ELSE`
    Branch { condition: Value, then: Value, otherwise: Value },
}

struct Reader<'a> {
    source: &'a str,
    name: TokenAST,
    args: Vec<TokenAST>,
}

impl<'a> Reader<'a> {
    fn error(&self, error: SyntaxError, span: Span) -> ErrorWithSpan {
        ErrorWithSpan::new(Error::SyntaxError(error), span, self.source)
    }

    fn command_span(&self) -> Span {
        let end = self.args.last().map_or(self.name.span.end, |arg| arg.span.end);
        self.name.span.start..end
    }

    fn wrong_count(&self, usage: &str) -> ErrorWithSpan {
        self.error(
            SyntaxError::WrongArgumentCount {
                error_str: format!(
                    "Wrong number of arguments to {}. Usage: {}",
                    self.name.token, usage
                ),
            },
            self.command_span(),
        )
    }

    fn int(&self, arg: &TokenAST) -> Result<i64, ErrorWithSpan> {
        match arg.token {
            Token::Int(int) => Ok(int),
            _ => Err(self.error(
                SyntaxError::UnexpectedToken {
                    found: arg.token.to_string(),
                    expected: "integer".to_string(),
                },
                arg.span.clone(),
            )),
        }
    }

    fn number(&self, arg: &TokenAST) -> Result<Number, ErrorWithSpan> {
        match arg.token {
            Token::Int(int) => Ok(Number::Int(int)),
            Token::Float(float) => Ok(Number::Float(float)),
            _ => Err(self.error(
                SyntaxError::UnexpectedToken {
                    found: arg.token.to_string(),
                    expected: "number".to_string(),
                },
                arg.span.clone(),
            )),
        }
    }

    fn value(&self, arg: &TokenAST) -> Result<Value, ErrorWithSpan> {
        match &arg.token {
            Token::Nil => Ok(Value::Nil),
            Token::True => Ok(Value::Bool(true)),
            Token::False => Ok(Value::Bool(false)),
            Token::Int(int) => Ok(Value::Number(Number::Int(*int))),
            Token::Float(float) => Ok(Value::Number(Number::Float(*float))),
            Token::Str(s) => Ok(Value::Str(s.clone())),
            _ => Err(self.error(
                SyntaxError::UnexpectedToken {
                    found: arg.token.to_string(),
                    expected: "value".to_string(),
                },
                arg.span.clone(),
            )),
        }
    }

    fn read_command(&self) -> Result<Command, ErrorWithSpan> {
        let word = match &self.name.token {
            Token::Word(word) => word.as_str(),
            other => {
                return Err(self.error(
                    SyntaxError::UnexpectedToken {
                        found: other.to_string(),
                        expected: "command".to_string(),
                    },
                    self.name.span.clone(),
                ));
            }
        };
        let args = self.args.as_slice();

        match word {
            "sum" => match args {
                [limit] => Ok(Command::Sum {
                    index: 0,
                    accumulator: Number::Int(0),
                    limit: self.int(limit)?,
                }),
                [index, accumulator, limit] => Ok(Command::Sum {
                    index: self.int(index)?,
                    accumulator: self.number(accumulator)?,
                    limit: self.int(limit)?,
                }),
                _ => Err(self.wrong_count("sum LIMIT | sum INDEX ACC LIMIT")),
            },
            "steps" => match args {
                [index, limit] => {
                    Ok(Command::Steps { index: self.int(index)?, limit: self.int(limit)? })
                }
                _ => Err(self.wrong_count("steps INDEX LIMIT")),
            },
            "truthy" => match args {
                [value] => Ok(Command::Truthy(self.value(value)?)),
                _ => Err(self.wrong_count("truthy VALUE")),
            },
            "branch" => match args {
                [condition, then, otherwise] => Ok(Command::Branch {
                    condition: self.value(condition)?,
                    then: self.value(then)?,
                    otherwise: self.value(otherwise)?,
                }),
                _ => Err(self.wrong_count("branch VALUE THEN ELSE")),
            },
            _ => Err(self.error(
                SyntaxError::UnknownCommand { name: word.to_string() },
                self.name.span.clone(),
            )),
        }
    }
}

/// Reads one command from a line of input.
pub fn read(source: &str) -> Result<Command, ErrorWithSpan> {
    let mut tokens = tokenize(source)?.into_iter();

    let name = match tokens.next() {
        Some(name) => name,
        None => {
            return Err(ErrorWithSpan::new(
                Error::SyntaxError(SyntaxError::UnexpectedEOF {
                    expected: Some("command".to_string()),
                }),
                source.len()..source.len(),
                source,
            ));
        }
    };

    let reader = Reader { source, name, args: tokens.collect() };
    reader.read_command()
}
