//! Directive recognition and typed arguments.
//!
//! Two directives take arguments:
//!
//! - `~dumpfile "<path>" [<start> [<end> [<indent>]]] [name=value ...]` on its
//!   own template line
//! - `~see-file "<path>"` on a comment line inside a source file header

use std::sync::LazyLock;

use regex::Regex;

use crate::{DirectiveError, ParamSchema, bind, split_args};

/// Marker opening an explicit code span.
pub const BEGIN_DOC: &str = "~begin-doc";

/// Marker closing an explicit code span.
pub const END_DOC: &str = "~end-doc";

/// Value of `end` meaning "to end of file".
const END_OF_FILE: &str = "~";

static DUMPFILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^~dumpfile\s+(".*?)\s*$"#).unwrap());

static SEE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~see-file(?:\s+(.*?))?\s*$").unwrap());

/// Schema of the `~dumpfile` directive.
pub const DUMPFILE_SCHEMA: ParamSchema = ParamSchema {
    directive: "dumpfile",
    positional: &["input_file", "start", "end", "indent"],
    named: &["section", "start_after", "end_before"],
};

/// Schema of the `~see-file` directive.
pub const SEE_FILE_SCHEMA: ParamSchema = ParamSchema {
    directive: "see-file",
    positional: &["path"],
    named: &[],
};

/// Match a template line against the `~dumpfile` pattern.
///
/// Returns the raw argument string when the line is a `~dumpfile` directive.
/// A directive line must name a quoted path; anything else is plain text.
#[must_use]
pub fn match_dumpfile(line: &str) -> Option<&str> {
    match_pattern(&DUMPFILE_PATTERN, line)
}

/// Match a comment body against the `~see-file` pattern.
#[must_use]
pub fn match_see_file(body: &str) -> Option<&str> {
    match_pattern(&SEE_FILE_PATTERN, body)
}

fn match_pattern<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    let caps = pattern.captures(line)?;
    Some(caps.get(1).map_or("", |m| m.as_str()))
}

/// Arguments of a `~dumpfile` directive.
///
/// `start` and `indent` default to `0`; `end` of `None` means end of file,
/// whether it was omitted, given as `~`, or given as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpfileArgs {
    /// Path of the included file, relative to the including file.
    pub input_file: String,
    /// First line to include (zero-based).
    pub start: usize,
    /// Line to stop before, or `None` for end of file.
    pub end: Option<usize>,
    /// Spaces prefixed to each line of a verbatim include.
    pub indent: usize,
    /// Heading character already active in the including document.
    pub section: Option<String>,
    /// Include only lines after the first line containing this text.
    pub start_after: Option<String>,
    /// Stop before the first following line containing this text.
    pub end_before: Option<String>,
}

impl DumpfileArgs {
    /// Parse the argument string of a `~dumpfile` directive.
    ///
    /// # Example
    ///
    /// ```
    /// use mrst_directive::DumpfileArgs;
    ///
    /// let args = DumpfileArgs::parse(r#""file" 0 ~ 4"#).unwrap();
    /// assert_eq!(args.input_file, "file");
    /// assert_eq!(args.start, 0);
    /// assert_eq!(args.end, None);
    /// assert_eq!(args.indent, 4);
    /// ```
    pub fn parse(args: &str) -> Result<Self, DirectiveError> {
        let tokens = split_args(args)?;
        let mut bound = bind(&tokens, &DUMPFILE_SCHEMA)?;

        let input_file = bound.require("input_file")?;
        // `0` is the unset value, so it also means end of file.
        let end = if bound.get("end") == Some(END_OF_FILE) {
            bound.take("end");
            None
        } else {
            bound.take_integer("end")?.filter(|&end| end != 0)
        };

        Ok(Self {
            input_file,
            start: bound.take_integer("start")?.unwrap_or(0),
            end,
            indent: bound.take_integer("indent")?.unwrap_or(0),
            section: bound.take("section"),
            start_after: bound.take("start_after"),
            end_before: bound.take("end_before"),
        })
    }
}

/// Arguments of a `~see-file` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeeFileArgs {
    /// Path of the referenced file, relative to the referencing file.
    pub path: String,
}

impl SeeFileArgs {
    /// Parse the argument string of a `~see-file` directive.
    pub fn parse(args: &str) -> Result<Self, DirectiveError> {
        let tokens = split_args(args)?;
        let mut bound = bind(&tokens, &SEE_FILE_SCHEMA)?;
        Ok(Self {
            path: bound.require("path")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_match_dumpfile() {
        assert_eq!(match_dumpfile(r#"~dumpfile "a.cpp" 1 2"#), Some(r#""a.cpp" 1 2"#));
        assert_eq!(match_dumpfile(r#"~dumpfile "a.cpp"   "#), Some(r#""a.cpp""#));
    }

    #[test]
    fn test_match_dumpfile_requires_quoted_path() {
        assert_eq!(match_dumpfile("~dumpfile"), None);
        assert_eq!(match_dumpfile("~dumpfile   "), None);
        assert_eq!(match_dumpfile("~dumpfile is the include directive"), None);
        assert_eq!(match_dumpfile(r#"~dumpfile"a.cpp""#), None);
    }

    #[test]
    fn test_match_dumpfile_rejects_other_lines() {
        assert_eq!(match_dumpfile("Some text"), None);
        assert_eq!(match_dumpfile(r#"  ~dumpfile "a.cpp""#), None);
        assert_eq!(match_dumpfile(r#"~dumpfiles "a.cpp""#), None);
    }

    #[test]
    fn test_match_see_file() {
        assert_eq!(match_see_file(r#"~see-file "x.cpp""#), Some(r#""x.cpp""#));
        assert_eq!(match_see_file("see-file x"), None);
    }

    #[test]
    fn test_insufficient_args() {
        let err = DumpfileArgs::parse("").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::MissingRequiredArgument {
                directive: "dumpfile",
                name: "input_file",
            }
        );
    }

    #[test]
    fn test_defaults() {
        let args = DumpfileArgs::parse(r#""file""#).unwrap();
        assert_eq!(
            args,
            DumpfileArgs {
                input_file: "file".to_owned(),
                ..DumpfileArgs::default()
            }
        );
    }

    #[test]
    fn test_positional_args() {
        let args = DumpfileArgs::parse(r#""file" 0 ~ 4"#).unwrap();
        assert_eq!(
            args,
            DumpfileArgs {
                input_file: "file".to_owned(),
                start: 0,
                end: None,
                indent: 4,
                ..DumpfileArgs::default()
            }
        );
    }

    #[test]
    fn test_explicit_end() {
        let args = DumpfileArgs::parse(r#""file" 3 10"#).unwrap();
        assert_eq!(args.start, 3);
        assert_eq!(args.end, Some(10));
    }

    #[test]
    fn test_zero_end_means_end_of_file() {
        let args = DumpfileArgs::parse(r#""file" 3 0 4"#).unwrap();
        assert_eq!(args.start, 3);
        assert_eq!(args.end, None);
        assert_eq!(args.indent, 4);

        let args = DumpfileArgs::parse(r#""file" end = 0"#).unwrap();
        assert_eq!(args.end, None);
    }

    #[test]
    fn test_keyword_arg() {
        let args = DumpfileArgs::parse(r#""file" 0 ~ 8 section = "~""#).unwrap();
        assert_eq!(args.indent, 8);
        assert_eq!(args.section.as_deref(), Some("~"));
        assert_eq!(args.start, 0);
    }

    #[test]
    fn test_keyword_arg_with_escaped_quotes() {
        let args = DumpfileArgs::parse(
            r#""file" 0 ~ 8 section = "~" start_after = "The fine feathered friends of \"Bird Beach\"""#,
        )
        .unwrap();
        assert_eq!(
            args,
            DumpfileArgs {
                input_file: "file".to_owned(),
                start: 0,
                end: None,
                indent: 8,
                section: Some("~".to_owned()),
                start_after: Some(r#"The fine feathered friends of "Bird Beach""#.to_owned()),
                end_before: None,
            }
        );
    }

    #[test]
    fn test_tilde_end_by_name() {
        let args = DumpfileArgs::parse(r#""file" end = ~"#).unwrap();
        assert_eq!(args.end, None);
    }

    #[test]
    fn test_unknown_keyword() {
        let err = DumpfileArgs::parse(r#""file" colour = "red""#).unwrap_err();
        assert_eq!(err.to_string(), "Unknown dumpfile arg: colour");
    }

    #[test]
    fn test_set_twice() {
        let err = DumpfileArgs::parse(r#""file" 2 start = 3"#).unwrap_err();
        assert_eq!(err.to_string(), "dumpfile arg start set twice");
    }

    #[test]
    fn test_invalid_integer() {
        let err = DumpfileArgs::parse(r#""file" two"#).unwrap_err();
        assert!(matches!(
            err,
            DirectiveError::InvalidInteger { name: "start", .. }
        ));
    }

    #[test]
    fn test_see_file_args() {
        let args = SeeFileArgs::parse(r#""../examples/demo.cpp""#).unwrap();
        assert_eq!(args.path, "../examples/demo.cpp");
    }

    #[test]
    fn test_see_file_rejects_extra_args() {
        assert!(SeeFileArgs::parse(r#""a.cpp" 3"#).is_err());
        assert!(SeeFileArgs::parse("").is_err());
    }
}
