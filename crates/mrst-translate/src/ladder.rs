//! Heading ladder.
//!
//! reStructuredText infers heading depth from the order in which underline
//! characters first appear. mrst fixes that order so headings from included
//! fragments can be shifted below the heading active in the including
//! document by adding an offset to the ladder index.

use crate::TranslateError;

/// Underline characters from the strongest heading to the weakest.
pub const LADDER: [char; 5] = ['=', '-', '~', '^', '\''];

/// Position of `c` on the ladder.
#[must_use]
pub fn ladder_index(c: char) -> Option<usize> {
    LADDER.iter().position(|&l| l == c)
}

/// Underline character for a rendered heading level.
#[must_use]
pub fn underline_char(level: usize) -> Option<char> {
    LADDER.get(level).copied()
}

/// Raw level of a header from the border character of its second ruler.
pub(crate) fn raw_level(border: char) -> usize {
    usize::from(border != '=')
}

/// Offset added to raw heading levels for a section character.
///
/// `None` or an empty string yields `0`; otherwise the section must be a
/// single ladder character and the offset is its index plus one.
///
/// # Example
///
/// ```
/// use mrst_translate::section_offset;
///
/// assert_eq!(section_offset(None).unwrap(), 0);
/// assert_eq!(section_offset(Some("~")).unwrap(), 3);
/// assert!(section_offset(Some("*")).is_err());
/// ```
pub fn section_offset(section: Option<&str>) -> Result<usize, TranslateError> {
    let Some(section) = section.filter(|s| !s.is_empty()) else {
        return Ok(0);
    };

    let mut chars = section.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ladder_index(c)
            .map(|index| index + 1)
            .ok_or_else(|| TranslateError::InvalidSection(section.to_owned())),
        _ => Err(TranslateError::InvalidSection(section.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_index() {
        assert_eq!(ladder_index('='), Some(0));
        assert_eq!(ladder_index('\''), Some(4));
        assert_eq!(ladder_index('#'), None);
    }

    #[test]
    fn test_raw_level() {
        assert_eq!(raw_level('='), 0);
        assert_eq!(raw_level('-'), 1);
    }

    #[test]
    fn test_section_offset_every_ladder_char() {
        for (index, c) in LADDER.iter().enumerate() {
            assert_eq!(section_offset(Some(&c.to_string())).unwrap(), index + 1);
        }
    }

    #[test]
    fn test_section_offset_empty_is_zero() {
        assert_eq!(section_offset(Some("")).unwrap(), 0);
    }

    #[test]
    fn test_section_offset_tilde_shifts_to_caret_and_quote() {
        let offset = section_offset(Some("~")).unwrap();
        assert_eq!(underline_char(offset), Some('^'));
        assert_eq!(underline_char(1 + offset), Some('\''));
    }

    #[test]
    fn test_section_offset_rejects_multiple_chars() {
        let err = section_offset(Some("~~")).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidSection(s) if s == "~~"));
    }

    #[test]
    fn test_underline_char_out_of_range() {
        assert_eq!(underline_char(5), None);
    }
}
