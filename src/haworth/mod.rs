mod config;
mod error;
mod gate;
mod generator;
mod geometry;
mod layout;
mod names;
mod parser;
mod render;
mod topology;

pub use config::{
    ColorStyle, GateStyle, LayoutStyle, RenderConfig, StrokeStyle, Style, default_style,
    load_style,
};
pub use error::{
    ChemistryError, Error, GeometryError, OverlapError, ParseError, ParseErrorKind, StyleError,
};
pub use gate::{DEFAULT_PENETRATION_EPSILON, strict_validate, strict_validate_with};
pub use generator::{ClosureRule, closure_rule, generate};
pub use geometry::{AttachConstraint, AttachTarget, Rect, op_bounds, text_box};
pub use parser::{parse, parse_with_carbon_count};
pub use render::{render, render_with};

use crate::model::ops::RenderOp;
use crate::model::spec::HaworthSpec;
use crate::model::types::{Anomer, RingType};
use serde::Serialize;
use tracing::{debug, warn};

/// A resolved spec together with the ops that draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub spec: HaworthSpec,
    pub ops: Vec<RenderOp>,
}

/// Runs the full pipeline: parse, resolve, render and gate.
///
/// The gate uses the tolerance from `config.style.gate`.
pub fn draw(
    code: &str,
    ring_type: RingType,
    anomer: Anomer,
    config: &RenderConfig,
) -> Result<Diagram, Error> {
    let parsed = parser::parse(code)?;
    let spec = generator::generate(&parsed, ring_type, anomer)?;
    let ops = render::render(&spec, config)?;

    if let Err(violations) = gate::strict_validate_with(&ops, config.style.gate.epsilon) {
        warn!(
            code,
            ring = %ring_type,
            anomer = %anomer,
            violations = violations.len(),
            "rendered ops failed the legality gate"
        );
        return Err(Error::Illegal { violations });
    }

    debug!(code, title = spec.title(), ops = ops.len(), "drew Haworth diagram");
    Ok(Diagram { spec, ops })
}
