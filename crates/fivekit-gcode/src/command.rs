//! G-code line parsing
//!
//! Splits a line into its command word and letter/value words. Comments are
//! removed before splitting; the untouched source text is kept so lines no
//! processor claims can be written back verbatim.

use fivekit_core::GcodeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A single letter/value word such as `X10.5`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Upper-case address letter
    pub letter: char,
    /// Numeric value
    pub value: f64,
}

impl Word {
    /// Parse a word, `None` if it is not a letter followed by a number
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let value = chars.as_str().parse::<f64>().ok()?;
        value.is_finite().then_some(Self { letter, value })
    }
}

/// A parsed, non-empty G-code line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcodeLine {
    /// 1-based line number in the source
    pub line_number: u32,
    /// Source text as read
    pub source: String,
    /// Leading `G` or `M` word, normalized to two digits (`G1` becomes `G01`)
    pub command: Option<String>,
    /// Remaining words in order
    pub words: Vec<Word>,
}

impl GcodeLine {
    /// Value of the first word with `letter`
    pub fn get(&self, letter: char) -> Option<f64> {
        let letter = letter.to_ascii_uppercase();
        self.words
            .iter()
            .find(|w| w.letter == letter)
            .map(|w| w.value)
    }

    /// Whether a word with `letter` is present
    pub fn has(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Whether the line has any of the given letters
    pub fn has_any(&self, letters: &[char]) -> bool {
        letters.iter().any(|&l| self.has(l))
    }

    /// The G number of the command word, if it is a G command.
    pub fn g_code(&self) -> Option<u32> {
        self.command
            .as_deref()
            .and_then(|c| c.strip_prefix('G'))
            .and_then(|n| n.parse().ok())
    }

    /// Whether this is a G00/G01 move
    pub fn is_straight_move(&self) -> bool {
        matches!(self.g_code(), Some(0) | Some(1))
    }

    /// Whether this is a G02/G03 arc
    pub fn is_arc(&self) -> bool {
        matches!(self.g_code(), Some(2) | Some(3))
    }
}

fn comment_regex() -> &'static Regex {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMENT_REGEX.get_or_init(|| Regex::new(r"\([^)]*\)|\(.*$|;.*$").expect("invalid regex pattern"))
}

/// Remove `( … )` and `; …` comments from a line.
pub fn strip_comments(line: &str) -> String {
    comment_regex().replace_all(line, " ").trim().to_string()
}

fn normalize_command(token: &str) -> Option<String> {
    let mut chars = token.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if letter != 'G' && letter != 'M' {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    // `G1` and `G01` are the same command; `G38.2` keeps its suffix
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits, None),
    };
    let number: u32 = whole.parse().ok()?;
    Some(match fraction {
        Some(f) => format!("{}{:02}.{}", letter, number, f),
        None => format!("{}{:02}", letter, number),
    })
}

/// Parse one line.
///
/// Returns `Ok(None)` for lines that are empty once comments are removed.
pub fn parse_line(line_number: u32, source: &str) -> Result<Option<GcodeLine>, GcodeError> {
    let cleaned = strip_comments(source);
    let mut tokens = cleaned.split_whitespace().peekable();
    let Some(&first) = tokens.peek() else {
        return Ok(None);
    };

    let command = normalize_command(first);
    if command.is_some() {
        tokens.next();
    }

    let words = tokens
        .map(|t| {
            Word::parse(t).ok_or_else(|| GcodeError::InvalidWord {
                line_number,
                word: t.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(GcodeLine {
        line_number,
        source: source.to_string(),
        command,
        words,
    }))
}

/// Parse a whole program, numbering lines from 1 and skipping blanks.
pub fn parse_program(text: &str) -> Result<Vec<GcodeLine>, GcodeError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_number = u32::try_from(idx + 1).map_err(|_| GcodeError::Other {
            message: "program exceeds u32::MAX lines".to_string(),
        })?;
        if let Some(line) = parse_line(line_number, raw)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oriented_line() {
        let line = parse_line(1, "G01 X1.000 Y-2.5 Z3 I0 J0 K1")
            .unwrap()
            .unwrap();
        assert_eq!(line.command.as_deref(), Some("G01"));
        assert_eq!(line.get('X'), Some(1.0));
        assert_eq!(line.get('y'), Some(-2.5));
        assert_eq!(line.get('K'), Some(1.0));
        assert!(line.is_straight_move());
        assert_eq!(line.words.len(), 6);
    }

    #[test]
    fn test_normalizes_short_command() {
        let line = parse_line(4, "g1 x5").unwrap().unwrap();
        assert_eq!(line.command.as_deref(), Some("G01"));
        assert_eq!(line.g_code(), Some(1));
        assert_eq!(line.get('X'), Some(5.0));

        let arc = parse_line(5, "G3 X0 Y1 I-1 J0").unwrap().unwrap();
        assert!(arc.is_arc());
    }

    #[test]
    fn test_strips_comments() {
        assert_eq!(strip_comments("G00 X1 (rapid) Y2 ; trailing"), "G00 X1   Y2");
        let line = parse_line(2, "G00 X1 (rapid) Y2 ; trailing")
            .unwrap()
            .unwrap();
        assert_eq!(line.get('Y'), Some(2.0));
        assert_eq!(line.source, "G00 X1 (rapid) Y2 ; trailing");
    }

    #[test]
    fn test_empty_and_comment_only_lines() {
        assert!(parse_line(1, "").unwrap().is_none());
        assert!(parse_line(1, "   ").unwrap().is_none());
        assert!(parse_line(1, "; header").unwrap().is_none());
        assert!(parse_line(1, "(only a comment)").unwrap().is_none());
    }

    #[test]
    fn test_modal_line_without_command() {
        let line = parse_line(9, "X10 Y20").unwrap().unwrap();
        assert!(line.command.is_none());
        assert_eq!(line.get('X'), Some(10.0));
    }

    #[test]
    fn test_invalid_word() {
        let err = parse_line(12, "G01 Xabc Y1").unwrap_err();
        match err {
            GcodeError::InvalidWord { line_number, word } => {
                assert_eq!(line_number, 12);
                assert_eq!(word, "Xabc");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_program_numbers_lines() {
        let program = "; start\nG21\n\nG01 X1 Y2\nM02\n";
        let lines = parse_program(program).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_number, 2);
        assert_eq!(lines[1].line_number, 4);
        assert_eq!(lines[2].command.as_deref(), Some("M02"));
    }
}
