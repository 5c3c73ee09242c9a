//! A pure Rust library for drawing Haworth projections of monosaccharides.
//! It decodes compact sugar codes, resolves the ring-closed substituent map
//! for a chosen ring size and anomer, and lays out a schematic diagram as a
//! flat list of drawing primitives checked for label overlaps.
//!
//! # Features
//!
//! - **Sugar codes** — Parse codes such as `ARLRDM` (D-glucose) or `MKLRDM`
//!   (D-fructose), with built-in modification letters and footnoted
//!   substituents (`A1LRDM[1=sulfate]`)
//! - **Ring closure** — Pyranose and furanose forms for aldoses and ketoses,
//!   with α/β anomers and exocyclic chains for longer sugars
//! - **Schematic layout** — Ring edges, connectors and labels placed on a
//!   fixed template, with a small length ladder that pushes colliding labels
//!   apart
//! - **Legality gate** — Every connector is checked against every foreign
//!   label before a diagram is returned
//! - **JSON output** — Specs and op lists serialize with `serde`
//!
//! # Quick Start
//!
//! The main entry point is [`draw`], which runs the whole pipeline on one
//! code:
//!
//! ```
//! use haworth_forge::{Anomer, HaworthError, RenderConfig, RingType, SubstituentKey, draw};
//!
//! // α-D-glucopyranose
//! let diagram = draw("ARLRDM", RingType::Pyranose, Anomer::Alpha, &RenderConfig::default())?;
//!
//! assert_eq!(diagram.spec.title(), "alpha-D-Glucopyranose");
//! assert_eq!(diagram.spec.substituents()[&SubstituentKey::down(1)], "OH");
//! assert_eq!(diagram.spec.substituents()[&SubstituentKey::up(5)], "CH2OH");
//!
//! assert!(diagram.ops.iter().any(|op| op.is_text()));
//! assert!(diagram.ops.iter().any(|op| op.is_connector()));
//! # Ok::<(), HaworthError>(())
//! ```
//!
//! Each stage is also available on its own:
//!
//! ```
//! use haworth_forge::{Anomer, RenderConfig, RingType, generate, parse, render, strict_validate};
//!
//! let parsed = parse("AdRDM").unwrap();
//! let spec = generate(&parsed, RingType::Furanose, Anomer::Beta).unwrap();
//! let ops = render(&spec, &RenderConfig::default()).unwrap();
//! assert!(strict_validate(&ops).is_ok());
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Batch request files and JSON output
//! - [`draw`] — Full pipeline: parse, resolve, render and gate
//! - [`RenderConfig`] — Bond length, font size and drawing style
//!
//! # Data Types
//!
//! ## Sugar Codes
//!
//! - [`ParsedCode`] — Decoded prefix, positions, config and terminal
//! - [`Position`] / [`PositionRole`] — What each body character says
//! - [`Terminal`] — The last carbon of the chain
//! - [`Prefix`], [`Config`], [`Modification`] — Code vocabulary
//!
//! ## Ring Forms
//!
//! - [`HaworthSpec`] — Substituent map for one ring form
//! - [`SubstituentKey`] — One face of one ring carbon (`C2_up`)
//! - [`ChainCarbon`] / [`Branch`] — Exocyclic chain beyond the closure carbon
//! - [`RingType`], [`Anomer`], [`Face`], [`FischerSide`]
//!
//! ## Drawing
//!
//! - [`RenderOp`] — Line, polygon, path or text primitive
//! - [`Point`], [`Anchor`], [`PathCommand`], [`OpId`]
//! - [`Rect`] — Axis-aligned bounds used by layout and the gate
//!
//! ## Errors
//!
//! - [`HaworthError`] — Pipeline error wrapping [`ParseError`],
//!   [`ChemistryError`], [`GeometryError`] and [`StyleError`]
//! - [`OverlapError`] — One connector reaching into a foreign label

mod haworth;
mod model;

pub mod io;

pub use model::code::{FootnoteTable, ParsedCode, Position, PositionRole, Terminal};
pub use model::ops::{Anchor, OpId, PathCommand, Point, RenderOp};
pub use model::spec::{Branch, ChainCarbon, HaworthSpec, SubstituentKey};
pub use model::types::{
    Anomer, Config, Face, FischerSide, Modification, ParseAnomerError, ParseRingTypeError, Prefix,
    RingType,
};

pub use haworth::{
    AttachConstraint, AttachTarget, ChemistryError, ClosureRule, ColorStyle,
    DEFAULT_PENETRATION_EPSILON, Diagram, GateStyle, GeometryError, LayoutStyle, OverlapError,
    ParseError, ParseErrorKind, Rect, RenderConfig, StrokeStyle, Style, StyleError, closure_rule,
    default_style, draw, generate, load_style, op_bounds, parse, parse_with_carbon_count, render,
    render_with, strict_validate, strict_validate_with, text_box,
};

pub use haworth::Error as HaworthError;
