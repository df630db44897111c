//! Directive argument tokenizing.
//!
//! Splits the argument string of a directive (`"file" 0 ~ 4 section = "~"`)
//! into tokens. Whitespace separates tokens except inside double quotes, and
//! `=` is always a token of its own.

use crate::DirectiveError;

/// A single token from a directive argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare or quoted value, with quotes stripped and escapes resolved.
    Value(String),
    /// The `=` separating a `name = value` pair.
    Equals,
}

impl Token {
    /// Text of the token as written by the user (`=` for [`Token::Equals`]).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Equals => "=",
        }
    }
}

/// Split a directive argument string into tokens.
///
/// Inside double quotes `\"` becomes `"` and `\\` becomes `\`; any other
/// backslash is kept as written. A quoted `"="` is a value, not a separator.
///
/// # Example
///
/// ```
/// use mrst_directive::{Token, split_args};
///
/// let tokens = split_args(r#"blah="hello""#).unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Value("blah".to_owned()),
///         Token::Equals,
///         Token::Value("hello".to_owned()),
///     ]
/// );
/// ```
pub fn split_args(input: &str) -> Result<Vec<Token>, DirectiveError> {
    let mut tokens = Vec::new();
    let mut current = TokenBuf::default();
    let mut chars = input.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => {
                current.started = true;
                let mut closed = false;
                while let Some((_, q)) = chars.next() {
                    match q {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, escaped @ ('"' | '\\'))) => current.text.push(escaped),
                            Some((_, other)) => {
                                current.text.push('\\');
                                current.text.push(other);
                            }
                            None => break,
                        },
                        _ => current.text.push(q),
                    }
                }
                if !closed {
                    return Err(DirectiveError::Malformed(format!(
                        "unterminated quote starting at byte {pos}"
                    )));
                }
            }
            '=' => {
                current.flush_into(&mut tokens);
                tokens.push(Token::Equals);
            }
            c if c.is_whitespace() => current.flush_into(&mut tokens),
            _ => {
                current.started = true;
                current.text.push(c);
            }
        }
    }
    current.flush_into(&mut tokens);

    Ok(tokens)
}

/// Token being accumulated.
///
/// `started` distinguishes an empty quoted value (`""`) from no token at all.
#[derive(Default)]
struct TokenBuf {
    text: String,
    started: bool,
}

impl TokenBuf {
    fn flush_into(&mut self, tokens: &mut Vec<Token>) {
        if self.started {
            tokens.push(Token::Value(std::mem::take(&mut self.text)));
            self.started = false;
        }
    }
}
