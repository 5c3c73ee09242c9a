//! Reading batch requests and writing diagrams.
//!
//! A batch file lists one sugar code per line, optionally followed by a ring
//! type and an anomer:
//!
//! ```text
//! # code      ring      anomer
//! ARLRDM      pyranose  alpha
//! MKLRDM      furanose  beta
//! AdRDM       f
//! ```
//!
//! Blank lines and `#` comments are ignored. Missing fields fall back to the
//! caller's defaults. Output is JSON through `serde_json`.

use std::fmt;

pub mod batch;
pub mod error;
pub mod json;

pub use batch::{Request, read_requests};
pub use json::{write_json, write_json_lines};

/// Data formats handled by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Line-oriented batch requests.
    Requests,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Requests => write!(f, "request list"),
            Format::Json => write!(f, "JSON"),
        }
    }
}
