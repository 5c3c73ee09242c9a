use super::types::{Config, FischerSide, Modification, Prefix};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Footnote digit → substituent identifier, as declared in the `[...]` block.
pub type FootnoteTable = BTreeMap<char, String>;

/// What a single body character says about its carbon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionRole {
    /// Aldehyde (aldose C1) or ketone (ketose C2) carbon of the prefix.
    Carbonyl,
    /// Ketose C1 contributed by the `M` of `MK`.
    Hydroxymethyl,
    /// `R` / `L` stereocenter.
    Stereo { side: FischerSide },
    /// Built-in lowercase letter code.
    Modified { modification: Modification },
    /// Digit resolved through the footnote table.
    Footnote { digit: char, name: String },
}

/// One carbon before the configurational carbon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based carbon number.
    pub carbon: u8,
    pub role: PositionRole,
}

/// The last carbon of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Terminal {
    /// `M`: primary alcohol, CH2OH.
    Hydroxymethyl,
    Modified { modification: Modification },
    Footnote { digit: char, name: String },
}

impl Terminal {
    /// Whether the terminal carbon still carries a hydroxyl that can close a ring.
    pub fn has_hydroxyl(&self) -> bool {
        matches!(self, Terminal::Hydroxymethyl)
    }
}

/// A decoded sugar code.
///
/// `positions` lists every carbon before the configurational carbon (the
/// prefix carbons included), so `positions.len() + 2 == carbon_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCode {
    prefix: Prefix,
    positions: Vec<Position>,
    config: Config,
    terminal: Terminal,
    footnotes: FootnoteTable,
    carbon_count: u8,
    raw_text: String,
}

impl ParsedCode {
    pub(crate) fn new(
        prefix: Prefix,
        positions: Vec<Position>,
        config: Config,
        terminal: Terminal,
        footnotes: FootnoteTable,
        carbon_count: u8,
        raw_text: String,
    ) -> Self {
        debug_assert_eq!(positions.len() + 2, usize::from(carbon_count));
        Self {
            prefix,
            positions,
            config,
            terminal,
            footnotes,
            carbon_count,
            raw_text,
        }
    }

    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn footnotes(&self) -> &FootnoteTable {
        &self.footnotes
    }

    pub fn carbon_count(&self) -> usize {
        usize::from(self.carbon_count)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Carbon number of the configurational (penultimate) carbon.
    #[inline]
    pub fn config_carbon(&self) -> u8 {
        self.carbon_count - 1
    }

    /// Carbon number of the terminal carbon.
    #[inline]
    pub fn terminal_carbon(&self) -> u8 {
        self.carbon_count
    }

    /// Role of a carbon listed in `positions`, if any.
    pub fn role_of(&self, carbon: u8) -> Option<&PositionRole> {
        self.positions
            .iter()
            .find(|p| p.carbon == carbon)
            .map(|p| &p.role)
    }

    /// The body without the footnote block.
    pub fn body(&self) -> &str {
        match self.raw_text.find('[') {
            Some(idx) => &self.raw_text[..idx],
            None => &self.raw_text,
        }
    }
}

impl fmt::Display for ParsedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
