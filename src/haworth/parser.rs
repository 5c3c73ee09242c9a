//! Sugar-code decoding.
//!
//! A code is a body (`prefix position* config terminal`) optionally followed
//! by a footnote block such as `[1=sulfate,2=OCH3]`. Each body character
//! stands for exactly one carbon.

use super::error::{ParseError, ParseErrorKind};
use crate::model::code::{FootnoteTable, ParsedCode, Position, PositionRole, Terminal};
use crate::model::types::{Config, FischerSide, Modification, Prefix};
use std::str::FromStr;
use tracing::debug;

/// Decodes a sugar code.
pub fn parse(text: &str) -> Result<ParsedCode, ParseError> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }
    if let Some((pos, _)) = text.char_indices().find(|(_, c)| c.is_whitespace()) {
        return Err(ParseError::new(ParseErrorKind::Whitespace, pos));
    }

    let (body, footnotes) = split_footnotes(text)?;

    if let Some((pos, ch)) = body.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(ParseError::new(ParseErrorKind::UnexpectedChar { ch }, pos));
    }
    let chars: Vec<char> = body.chars().collect();
    if chars.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }

    let prefix = match_prefix(&chars)?;
    let carbon_count = u8::try_from(chars.len()).map_err(|_| too_many_carbons(chars.len()))?;
    let span = prefix.carbon_span();

    let tail = &chars[span..];
    if tail.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingConfig, chars.len()));
    }
    if tail.len() == 1 {
        return Err(ParseError::new(
            ParseErrorKind::MissingTerminal,
            chars.len(),
        ));
    }

    let mut positions = prefix_positions(prefix);
    let config_idx = chars.len() - 2;
    for (idx, &ch) in chars.iter().enumerate().take(config_idx).skip(span) {
        let role = classify_position(ch, idx, &footnotes)?;
        let carbon = u8::try_from(idx + 1).map_err(|_| too_many_carbons(chars.len()))?;
        positions.push(Position { carbon, role });
    }

    let config_ch = chars[config_idx];
    let config = Config::from_symbol(config_ch).ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidConfig { ch: config_ch }, config_idx)
    })?;

    let terminal_idx = chars.len() - 1;
    let terminal = classify_terminal(chars[terminal_idx], terminal_idx, &footnotes)?;

    let parsed = ParsedCode::new(
        prefix,
        positions,
        config,
        terminal,
        footnotes,
        carbon_count,
        text.to_string(),
    );

    debug!(
        code = text,
        prefix = %parsed.prefix(),
        carbons = parsed.carbon_count(),
        config = %parsed.config(),
        "parsed sugar code"
    );

    Ok(parsed)
}

/// Carbon numbers are stored as `u8`; the offset points at the first carbon
/// past the limit.
fn too_many_carbons(found: usize) -> ParseError {
    let max = usize::from(u8::MAX);
    ParseError::new(ParseErrorKind::TooManyCarbons { found, max }, max)
}

/// Decodes a sugar code whose carbon count is declared separately.
pub fn parse_with_carbon_count(text: &str, expected: usize) -> Result<ParsedCode, ParseError> {
    let parsed = parse(text)?;
    let found = parsed.carbon_count();
    if found != expected {
        return Err(ParseError::new(
            ParseErrorKind::LengthMismatch { expected, found },
            expected.min(found),
        ));
    }
    Ok(parsed)
}

impl FromStr for ParsedCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn split_footnotes(text: &str) -> Result<(&str, FootnoteTable), ParseError> {
    let Some(open) = text.find('[') else {
        if let Some(pos) = text.find(']') {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedChar { ch: ']' },
                pos,
            ));
        }
        return Ok((text, FootnoteTable::new()));
    };

    let close = match text[open..].find(']') {
        Some(rel) => open + rel,
        None => {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedFootnoteBlock,
                open,
            ));
        }
    };
    if close + 1 != text.len() {
        return Err(ParseError::new(ParseErrorKind::TrailingText, close + 1));
    }

    let table = parse_footnote_list(&text[open + 1..close], open + 1)?;
    Ok((&text[..open], table))
}

fn parse_footnote_list(list: &str, offset: usize) -> Result<FootnoteTable, ParseError> {
    let mut table = FootnoteTable::new();
    let mut start = 0usize;

    for entry in list.split(',') {
        let position = offset + start;
        let (digit, name) = parse_footnote_entry(entry)
            .ok_or_else(|| ParseError::new(malformed(entry), position))?;
        if table.insert(digit, name.to_string()).is_some() {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateFootnote { digit },
                position,
            ));
        }
        start += entry.len() + 1;
    }

    Ok(table)
}

fn malformed(entry: &str) -> ParseErrorKind {
    ParseErrorKind::MalformedFootnote {
        entry: entry.to_string(),
    }
}

fn parse_footnote_entry(entry: &str) -> Option<(char, &str)> {
    let (key, value) = entry.split_once('=')?;
    let mut key_chars = key.chars();
    let digit = key_chars.next().filter(char::is_ascii_digit)?;
    if key_chars.next().is_some() || !is_identifier(value) {
        return None;
    }
    Some((digit, value))
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

fn match_prefix(chars: &[char]) -> Result<Prefix, ParseError> {
    const PREFIXES: [Prefix; 2] = [Prefix::Ketose2, Prefix::Aldose];

    for prefix in PREFIXES {
        let symbol = prefix.symbol();
        if chars.len() >= symbol.len() && chars.iter().zip(symbol.chars()).all(|(a, b)| *a == b) {
            return Ok(prefix);
        }
    }
    Err(ParseError::new(
        ParseErrorKind::UnknownPrefix { ch: chars[0] },
        0,
    ))
}

fn prefix_positions(prefix: Prefix) -> Vec<Position> {
    match prefix {
        Prefix::Aldose => vec![Position {
            carbon: 1,
            role: PositionRole::Carbonyl,
        }],
        Prefix::Ketose2 => vec![
            Position {
                carbon: 1,
                role: PositionRole::Hydroxymethyl,
            },
            Position {
                carbon: 2,
                role: PositionRole::Carbonyl,
            },
        ],
    }
}

fn classify_position(
    ch: char,
    idx: usize,
    footnotes: &FootnoteTable,
) -> Result<PositionRole, ParseError> {
    if let Some(side) = FischerSide::from_symbol(ch) {
        return Ok(PositionRole::Stereo { side });
    }
    if ch.is_ascii_lowercase() {
        return Modification::from_letter(ch)
            .map(|modification| PositionRole::Modified { modification })
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownLetter { ch }, idx));
    }
    if ch.is_ascii_digit() {
        let name = resolve_footnote(ch, idx, footnotes)?;
        return Ok(match Modification::from_name(name) {
            Some(modification) => PositionRole::Modified { modification },
            None => PositionRole::Footnote {
                digit: ch,
                name: name.to_string(),
            },
        });
    }
    Err(ParseError::new(ParseErrorKind::UnexpectedChar { ch }, idx))
}

fn classify_terminal(
    ch: char,
    idx: usize,
    footnotes: &FootnoteTable,
) -> Result<Terminal, ParseError> {
    if ch == 'M' {
        return Ok(Terminal::Hydroxymethyl);
    }
    if ch.is_ascii_lowercase() {
        return Modification::from_letter(ch)
            .map(|modification| Terminal::Modified { modification })
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownLetter { ch }, idx));
    }
    if ch.is_ascii_digit() {
        let name = resolve_footnote(ch, idx, footnotes)?;
        return Ok(match Modification::from_name(name) {
            Some(modification) => Terminal::Modified { modification },
            None => Terminal::Footnote {
                digit: ch,
                name: name.to_string(),
            },
        });
    }
    Err(ParseError::new(ParseErrorKind::InvalidTerminal { ch }, idx))
}

fn resolve_footnote<'a>(
    digit: char,
    idx: usize,
    footnotes: &'a FootnoteTable,
) -> Result<&'a str, ParseError> {
    footnotes
        .get(&digit)
        .map(String::as_str)
        .ok_or_else(|| ParseError::new(ParseErrorKind::UndefinedFootnote { digit }, idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().reason
    }

    #[test]
    fn parses_glucose() {
        let code = parse("ARLRDM").unwrap();
        assert_eq!(code.prefix(), Prefix::Aldose);
        assert_eq!(code.config(), Config::D);
        assert_eq!(code.terminal(), &Terminal::Hydroxymethyl);
        assert_eq!(code.carbon_count(), 6);
        assert_eq!(code.positions().len() + 2, code.carbon_count());
        assert_eq!(code.positions()[0].role, PositionRole::Carbonyl);
        assert_eq!(
            code.role_of(3),
            Some(&PositionRole::Stereo {
                side: FischerSide::Left
            })
        );
        assert_eq!(code.config_carbon(), 5);
        assert_eq!(code.terminal_carbon(), 6);
    }

    #[test]
    fn parses_fructose_with_two_carbon_prefix() {
        let code = parse("MKLRDM").unwrap();
        assert_eq!(code.prefix(), Prefix::Ketose2);
        assert_eq!(code.carbon_count(), 6);
        assert_eq!(code.positions()[0].role, PositionRole::Hydroxymethyl);
        assert_eq!(code.positions()[1].role, PositionRole::Carbonyl);
        assert_eq!(code.positions()[2].carbon, 3);
    }

    #[test]
    fn raw_text_round_trips() {
        for text in ["ARLRDM", "MKLRDM", "AdRDM", "ADM", "A1LRDM[1=sulfate]", "ARLRD2[2=OCH3]"] {
            let code = parse(text).unwrap();
            assert_eq!(code.raw_text(), text);
            assert_eq!(code.to_string(), text);
            assert_eq!(code.positions().len() + 2, code.carbon_count());
        }
    }

    #[test]
    fn three_carbon_code_is_valid() {
        let code = parse("ADM").unwrap();
        assert_eq!(code.carbon_count(), 3);
        assert_eq!(code.positions().len(), 1);
    }

    #[test]
    fn letter_codes_become_modifications() {
        let code = parse("AdRDM").unwrap();
        assert_eq!(
            code.role_of(2),
            Some(&PositionRole::Modified {
                modification: Modification::Deoxy
            })
        );
        let code = parse("ARLRDc").unwrap();
        assert_eq!(
            code.terminal(),
            &Terminal::Modified {
                modification: Modification::Carboxyl
            }
        );
    }

    #[test]
    fn footnote_digits_resolve_through_table() {
        let code = parse("A1LRDM[1=sulfate]").unwrap();
        assert_eq!(
            code.role_of(2),
            Some(&PositionRole::Footnote {
                digit: '1',
                name: "sulfate".into()
            })
        );
        assert_eq!(code.footnotes().len(), 1);
        assert_eq!(code.body(), "A1LRDM");
    }

    #[test]
    fn footnote_naming_a_builtin_resolves_to_the_builtin() {
        let code = parse("A1LRDM[1=amino]").unwrap();
        assert_eq!(
            code.role_of(2),
            Some(&PositionRole::Modified {
                modification: Modification::Amino
            })
        );
    }

    #[test]
    fn unused_footnotes_are_accepted() {
        let code = parse("ARLRDM[1=sulfate,2=methyl]").unwrap();
        assert_eq!(code.footnotes().len(), 2);
        assert_eq!(code.carbon_count(), 6);
    }

    #[test]
    fn undefined_footnote_digit_is_an_error() {
        let err = parse("A1LRDM").unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UndefinedFootnote { digit: '1' });
        assert_eq!(err.position, 1);

        let err = parse("ARLRD3[1=sulfate]").unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UndefinedFootnote { digit: '3' });
        assert_eq!(err.position, 5);
    }

    #[test]
    fn unknown_lowercase_letter_is_an_error() {
        let err = parse("ARxRDM").unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::UnknownLetter { ch: 'x' });
        assert_eq!(err.position, 2);
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        assert_eq!(kind("KRLRDM"), ParseErrorKind::UnknownPrefix { ch: 'K' });
        assert_eq!(kind("MRLRDM"), ParseErrorKind::UnknownPrefix { ch: 'M' });
    }

    #[test]
    fn missing_config_and_terminal() {
        assert_eq!(kind("A"), ParseErrorKind::MissingConfig);
        assert_eq!(kind("MK"), ParseErrorKind::MissingConfig);
        assert_eq!(kind("AD"), ParseErrorKind::MissingTerminal);
    }

    #[test]
    fn invalid_config_letter() {
        let err = parse("ARLRXM").unwrap_err();
        assert_eq!(err.reason, ParseErrorKind::InvalidConfig { ch: 'X' });
        assert_eq!(err.position, 4);
    }

    #[test]
    fn invalid_terminal_symbol() {
        assert_eq!(kind("ARLRDQ"), ParseErrorKind::InvalidTerminal { ch: 'Q' });
        assert_eq!(kind("ARLRDz"), ParseErrorKind::UnknownLetter { ch: 'z' });
    }

    #[test]
    fn config_letter_inside_body_is_unexpected() {
        assert_eq!(kind("ADDM"), ParseErrorKind::UnexpectedChar { ch: 'D' });
    }

    #[test]
    fn malformed_footnote_blocks() {
        assert!(matches!(
            kind("ARLRDM[1sulfate]"),
            ParseErrorKind::MalformedFootnote { .. }
        ));
        assert!(matches!(
            kind("ARLRDM[x=sulfate]"),
            ParseErrorKind::MalformedFootnote { .. }
        ));
        assert!(matches!(
            kind("ARLRDM[1=]"),
            ParseErrorKind::MalformedFootnote { .. }
        ));
        assert!(matches!(
            kind("ARLRDM[]"),
            ParseErrorKind::MalformedFootnote { .. }
        ));
        assert_eq!(kind("ARLRDM[1=a"), ParseErrorKind::UnclosedFootnoteBlock);
        assert_eq!(kind("ARLRDM[1=a]X"), ParseErrorKind::TrailingText);
        assert_eq!(
            kind("A1LRDM[1=a,1=b]"),
            ParseErrorKind::DuplicateFootnote { digit: '1' }
        );
    }

    #[test]
    fn malformed_footnote_reports_entry_offset() {
        let err = parse("ARLRDM[1=ok,bad]").unwrap_err();
        assert_eq!(err.position, 12);
    }

    #[test]
    fn empty_and_whitespace_inputs() {
        assert_eq!(kind(""), ParseErrorKind::Empty);
        assert_eq!(kind(" ARLRDM"), ParseErrorKind::Whitespace);
        assert_eq!(kind("ARLRDM\n"), ParseErrorKind::Whitespace);
        assert_eq!(kind("[1=a]"), ParseErrorKind::Empty);
    }

    #[test]
    fn declared_length_must_match_body() {
        assert!(parse_with_carbon_count("ARLRDM", 6).is_ok());
        let err = parse_with_carbon_count("ARLRDM", 5).unwrap_err();
        assert_eq!(
            err.reason,
            ParseErrorKind::LengthMismatch {
                expected: 5,
                found: 6
            }
        );
    }

    #[test]
    fn carbon_numbers_stop_at_the_u8_limit() {
        let longest = format!("A{}DM", "R".repeat(252));
        let code = parse(&longest).unwrap();
        assert_eq!(code.carbon_count(), 255);
        assert_eq!(code.terminal_carbon(), 255);
        assert_eq!(code.config_carbon(), 254);
        assert_eq!(code.positions().last().unwrap().carbon, 253);

        let err = parse(&format!("A{}DM", "R".repeat(300))).unwrap_err();
        assert_eq!(
            err.reason,
            ParseErrorKind::TooManyCarbons {
                found: 303,
                max: 255
            }
        );
        assert_eq!(err.position, 255);
        assert!(matches!(
            kind(&format!("MK{}DM", "L".repeat(252))),
            ParseErrorKind::TooManyCarbons { found: 256, .. }
        ));
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let code: ParsedCode = "ALLRDM".parse().unwrap();
        assert_eq!(code.carbon_count(), 6);
        assert!("".parse::<ParsedCode>().is_err());
    }
}
