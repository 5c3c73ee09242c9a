//! Error types for Haworth generation.
//!
//! Errors are tiered by the stage that raises them: sugar-code parsing,
//! ring-closure chemistry, and geometry (degenerate primitives or connector
//! overlaps found by the legality gate). Style configuration errors sit
//! beside them. None of them are transient; the input must be corrected.

use crate::model::ops::OpId;
use crate::model::types::RingType;
use std::fmt;
use thiserror::Error;

/// What went wrong while decoding a sugar code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty sugar code")]
    Empty,

    #[error("surrounding whitespace is not allowed")]
    Whitespace,

    #[error("unknown prefix starting with '{ch}' (expected 'A' or 'MK')")]
    UnknownPrefix { ch: char },

    #[error("unknown letter code '{ch}'")]
    UnknownLetter { ch: char },

    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char },

    #[error("footnote digit '{digit}' is not defined in the footnote block")]
    UndefinedFootnote { digit: char },

    #[error("malformed footnote entry '{entry}'")]
    MalformedFootnote { entry: String },

    #[error("footnote digit '{digit}' is defined more than once")]
    DuplicateFootnote { digit: char },

    #[error("footnote block is not closed with ']'")]
    UnclosedFootnoteBlock,

    #[error("text after the footnote block")]
    TrailingText,

    #[error("missing config letter")]
    MissingConfig,

    #[error("invalid config letter '{ch}' (expected 'D' or 'L')")]
    InvalidConfig { ch: char },

    #[error("missing terminal symbol")]
    MissingTerminal,

    #[error("invalid terminal symbol '{ch}'")]
    InvalidTerminal { ch: char },

    #[error("body has {found} carbons, at most {max} are supported")]
    TooManyCarbons { found: usize, max: usize },

    #[error("body has {found} carbons but {expected} were declared")]
    LengthMismatch { expected: usize, found: usize },
}

/// A sugar code that could not be decoded, with the offending character offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at position {position}")]
pub struct ParseError {
    pub reason: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(reason: ParseErrorKind, position: usize) -> Self {
        Self { reason, position }
    }
}

/// A well-formed code that cannot be drawn as the requested ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChemistryError {
    /// The prefix, ring size and carbon count cannot close a 5- or 6-membered ring.
    #[error("'{code}' cannot form a {ring_type}: {reason}")]
    NotHaworthEligible {
        code: String,
        ring_type: RingType,
        reason: String,
    },

    /// The prefix has no ring-closure rule.
    #[error("no ring-closure rule for prefix '{prefix}' as a {ring_type}")]
    UnsupportedCombination { prefix: String, ring_type: RingType },
}

impl ChemistryError {
    pub fn not_eligible(code: &str, ring_type: RingType, reason: impl Into<String>) -> Self {
        Self::NotHaworthEligible {
            code: code.to_string(),
            ring_type,
            reason: reason.into(),
        }
    }
}

/// A connector whose stroke penetrates another label's box.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapError {
    /// The connector op.
    pub op_id_a: OpId,
    /// The text op it paints through.
    pub op_id_b: OpId,
    /// Depth of the stroke inside the label box, in rendering units.
    pub penetration_distance: f64,
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "connector op {} penetrates label op {} by {:.2}",
            self.op_id_a, self.op_id_b, self.penetration_distance
        )
    }
}

impl std::error::Error for OverlapError {}

/// Geometry that must not be handed to a painter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A primitive whose bounding box is non-finite or has zero area.
    #[error("{kind} op {op_id} has a degenerate bounding box")]
    DegenerateBounds { op_id: OpId, kind: &'static str },

    /// Render parameters that cannot produce a drawing.
    #[error("invalid render parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The ring template has no slot for a required ring position.
    #[error("ring template has no slot for {what}")]
    MissingSlot { what: String },

    /// A style value the renderer cannot draw with.
    #[error("invalid style: {0}")]
    InvalidStyle(String),
}

/// Style configuration problems.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to parse style TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid style value for '{field}': {detail}")]
    Invalid { field: &'static str, detail: String },
}

/// Errors that can occur anywhere in the Haworth pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid sugar code: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Chemistry(#[from] ChemistryError),

    #[error("render failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("{0}")]
    Style(#[from] StyleError),

    /// The legality gate rejected the rendered ops.
    #[error("{} connector overlap(s) found; first: {}", violations.len(), first_violation(violations))]
    Illegal { violations: Vec<OverlapError> },
}

fn first_violation(violations: &[OverlapError]) -> String {
    violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl From<Vec<OverlapError>> for Error {
    fn from(violations: Vec<OverlapError>) -> Self {
        Error::Illegal { violations }
    }
}
