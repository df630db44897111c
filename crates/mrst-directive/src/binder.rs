//! Binding tokens to a directive's parameter schema.

use std::collections::HashMap;

use crate::{DirectiveError, Token};

/// Parameter schema of a directive.
///
/// Leading tokens bind to [`positional`](Self::positional) in order; every
/// parameter, positional or not, may also be given as `name = value`.
#[derive(Debug)]
pub struct ParamSchema {
    /// Directive name used in error messages.
    pub directive: &'static str,
    /// Parameters accepted positionally, in binding order.
    pub positional: &'static [&'static str],
    /// Parameters accepted only as `name = value`.
    pub named: &'static [&'static str],
}

impl ParamSchema {
    /// Resolve a user-supplied name to the schema's parameter name.
    fn lookup(&self, name: &str) -> Option<&'static str> {
        self.positional
            .iter()
            .chain(self.named)
            .find(|param| **param == name)
            .copied()
    }
}

/// Raw string values bound to a schema, not yet typed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BoundArgs {
    directive: &'static str,
    values: HashMap<&'static str, String>,
}

impl BoundArgs {
    /// Get a bound value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Remove and return a bound value.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Remove a value and parse it as an unsigned integer.
    ///
    /// An unset or empty value yields `None`.
    pub fn take_integer(&mut self, name: &'static str) -> Result<Option<usize>, DirectiveError> {
        match self.take(name) {
            None => Ok(None),
            Some(value) if value.is_empty() => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| DirectiveError::InvalidInteger {
                    directive: self.directive,
                    name,
                    value,
                }),
        }
    }

    /// Remove a mandatory value.
    pub fn require(&mut self, name: &'static str) -> Result<String, DirectiveError> {
        self.take(name)
            .ok_or(DirectiveError::MissingRequiredArgument {
                directive: self.directive,
                name,
            })
    }

    fn insert(&mut self, name: &'static str, value: String) -> Result<(), DirectiveError> {
        if self.values.contains_key(name) {
            return Err(DirectiveError::DuplicateParameter {
                directive: self.directive,
                name,
            });
        }
        self.values.insert(name, value);
        Ok(())
    }
}

/// Bind tokens to `schema`.
///
/// Positional values must precede all `name = value` pairs.
///
/// # Example
///
/// ```
/// use mrst_directive::{ParamSchema, bind, split_args};
///
/// const SCHEMA: ParamSchema = ParamSchema {
///     directive: "demo",
///     positional: &["path", "start"],
///     named: &["section"],
/// };
///
/// let tokens = split_args(r#""a.txt" section = "~""#).unwrap();
/// let args = bind(&tokens, &SCHEMA).unwrap();
/// assert_eq!(args.get("path"), Some("a.txt"));
/// assert_eq!(args.get("start"), None);
/// assert_eq!(args.get("section"), Some("~"));
/// ```
pub fn bind(tokens: &[Token], schema: &ParamSchema) -> Result<BoundArgs, DirectiveError> {
    let mut bound = BoundArgs {
        directive: schema.directive,
        values: HashMap::new(),
    };
    let mut positional = schema.positional.iter();
    let mut seen_named = false;
    let mut rest = tokens;

    loop {
        rest = match rest {
            [] => break,
            [Token::Value(name), Token::Equals, Token::Value(value), tail @ ..] => {
                let param = schema
                    .lookup(name)
                    .ok_or_else(|| DirectiveError::UnknownParameter {
                        directive: schema.directive,
                        name: name.clone(),
                    })?;
                bound.insert(param, value.clone())?;
                seen_named = true;
                tail
            }
            [Token::Value(name), Token::Equals, ..] => {
                return Err(DirectiveError::Malformed(format!(
                    "missing value for {name}"
                )));
            }
            [Token::Value(value), tail @ ..] => {
                if seen_named {
                    return Err(DirectiveError::Malformed(format!(
                        "positional value {value:?} after named arguments"
                    )));
                }
                let param = positional.next().ok_or_else(|| {
                    DirectiveError::Malformed(format!(
                        "unexpected positional value {value:?} for {}",
                        schema.directive
                    ))
                })?;
                bound.insert(param, value.clone())?;
                tail
            }
            [Token::Equals, ..] => {
                return Err(DirectiveError::Malformed(
                    "`=` without a parameter name".to_owned(),
                ));
            }
        };
    }

    Ok(bound)
}
